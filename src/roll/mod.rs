mod layout;
mod scene;

pub use layout::{
    GRID_WIDTH, KEY_HEIGHT, NOTE_HEIGHT, PitchWindow, RangeMode, TICK_SCALE, beat_width, row_top,
    tick_to_x,
};
pub use scene::{
    DrawCommand, NOTE_PALETTE, Point, Rect, Rgb, Scene, Stroke, Viewport, render,
};
