pub mod camera_replay;
pub mod data_feed;

pub use camera_replay::{CameraReplay, CameraReplayHandler, ReplayState};
pub use data_feed::{DataFeed, DataFeedHandler};
