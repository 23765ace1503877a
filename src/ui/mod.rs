pub mod progress;
pub mod output;

pub use progress::ProgressManager;
pub use output::{OutputFormatter, OutputMode};
