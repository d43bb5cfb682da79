pub mod cache;
pub mod input;

pub use cache::*;
pub use input::*;
