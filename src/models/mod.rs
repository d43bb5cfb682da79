pub mod sentiment;
pub mod statistics;
pub mod transcript;

pub use sentiment::*;
pub use statistics::*;
pub use transcript::*;
