pub mod health;
pub mod outfit;
pub mod server;
