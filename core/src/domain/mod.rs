pub mod classification;
pub mod color;
pub mod common;
pub mod styling;
pub mod wardrobe;
