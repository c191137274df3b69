pub mod constants;
pub mod progress;

pub use constants::*;
pub use progress::StageProgress;
