pub mod policy;
pub mod ticket;

pub use policy::*;
pub use ticket::*;
