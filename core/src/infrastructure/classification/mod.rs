pub mod model_fetcher;
pub mod onnx_classifier;
pub mod preprocess;

pub use model_fetcher::ModelFetcher;
pub use onnx_classifier::OnnxGarmentClassifier;
