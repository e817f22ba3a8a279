use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::{ListenerError, PayloadMode};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 12345;
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;
pub const DEFAULT_ACK: &str = "received\n";

/// Listener settings. Every field may be omitted from the RON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListenerConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound on a single read; each read is treated as one chunk.
    pub buffer_size: usize,
    pub ack: String,
    pub payload_mode: PayloadMode,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.into(),
            port: DEFAULT_PORT,
            buffer_size: DEFAULT_BUFFER_SIZE,
            ack: DEFAULT_ACK.into(),
            payload_mode: PayloadMode::default(),
        }
    }
}

impl ListenerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn validate(&self) -> Result<(), ListenerError> {
        if self.buffer_size == 0 {
            return Err(ListenerError::InvalidConfig(
                "buffer_size must be at least 1".into(),
            ));
        }
        if self.host.is_empty() {
            return Err(ListenerError::InvalidConfig("host must not be empty".into()));
        }
        Ok(())
    }

    pub fn from_ron_str(text: &str) -> Result<Self, ListenerError> {
        let config: ListenerConfig = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ListenerError> {
        let text = fs::read_to_string(path).map_err(|source| ListenerError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&text)
    }
}
