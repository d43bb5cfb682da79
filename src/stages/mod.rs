pub mod evaluate;
pub mod plot;
pub mod report;

pub use evaluate::*;
pub use plot::*;
pub use report::*;
