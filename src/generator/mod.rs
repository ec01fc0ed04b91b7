pub mod spectrum;
pub mod stream;

pub use spectrum::SpectrumDataGenerator;
pub use stream::{run_stream, StreamOptions};
