pub mod calendar;
pub mod engine;
pub mod holidays;
pub mod workflow;

pub use calendar::*;
pub use engine::*;
pub use holidays::*;
pub use workflow::*;
