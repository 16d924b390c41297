pub mod ease;
pub mod engine;
pub mod pose;
pub mod ticker;
pub mod timeline;

pub use ease::Ease;
pub use engine::{AnimContext, TrackId};
pub use pose::{Display, Props, TargetId};
pub use timeline::{Position, Timeline, TweenSpec};
