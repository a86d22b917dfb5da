pub mod classification;
pub mod color;
pub mod llm;
pub mod storage;
