pub mod sample_batch;
pub mod camera;

pub use sample_batch::SampleBatch;
pub use camera::{CameraAnimationData, CameraLocation};
