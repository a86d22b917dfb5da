pub mod entities;
pub mod labels;
pub mod ports;

pub use entities::*;
pub use ports::*;
