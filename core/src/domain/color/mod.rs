pub mod clustering;
pub mod entities;
pub mod ports;
pub mod services;

pub use entities::*;
pub use ports::*;
