use log::Level;

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    // Verbose while developing locally
    Level::Debug
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

pub const SPLINE_SCENE_URL: &str = "https://prod.spline.design/EF7JOSsHLk16Tlw9/scene.splinecode";

// Palette
pub const PAPER: &str = "#F0F0F0";
pub const INK: &str = "#000000";
pub const ACCENT: &str = "#CCFF00";

/// Viewport width (px) below which the navbar collapses to a menu toggle.
pub const NAV_BREAKPOINT_PX: f64 = 768.0;

// Stair transition
pub const STAIR_COLUMNS: usize = 6;
pub const STAIR_DURATION: f64 = 0.9;
pub const STAIR_OVERLAP: f64 = 0.8;
pub const STAIR_TRAVEL_PERCENT: f64 = 110.0;

pub const NAV_ROLL_DURATION: f64 = 0.35;

pub const CURSOR_FOLLOW_DURATION: f64 = 0.2;

// Feature tiles
pub const TILE_COLOR_DURATION: f64 = 0.25;
pub const THUMB_FADE_DURATION: f64 = 0.3;
pub const THUMB_FOLLOW_DURATION: f64 = 0.2;
pub const THUMB_HIDDEN_SCALE: f64 = 0.9;
/// Thumbnail is drawn this far up and left of the pointer.
pub const THUMB_ANCHOR: (f64, f64) = (100.0, 80.0);

// Marquee
pub const MARQUEE_REPEAT: usize = 20;
pub const MARQUEE_CYCLE_SECS: f64 = 20.0;
pub const MARQUEE_TRAVEL_PERCENT: f64 = 50.0;
pub const VELOCITY_THRESHOLD: f64 = 0.2;
pub const VELOCITY_CLAMP: f64 = 2.0;
pub const RATE_RAMP_SECS: f64 = 0.2;
/// A scroll pause this long (ms) counts as zero velocity.
pub const SCROLL_IDLE_MS: u32 = 150;

// Scroll effects
pub const REVEAL_START_FRACTION: f64 = 0.8;
pub const REVEAL_DURATION: f64 = 0.8;
pub const PARALLAX_Y_PERCENT: f64 = -10.0;
