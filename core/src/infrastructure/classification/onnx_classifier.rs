use std::{
    collections::BTreeMap,
    path::Path,
    sync::Mutex,
};

use ort::{
    session::{Session, builder::GraphOptimizationLevel},
    value::TensorRef,
};
use tracing::{info, instrument, warn};

use crate::{
    domain::{
        classification::{
            entities::{Classification, ModelKind},
            ports::GarmentClassifier,
        },
        common::entities::app_errors::CoreError,
        wardrobe::entities::GarmentCategory,
    },
    infrastructure::classification::preprocess::{
        INPUT_SHAPE, argmax, is_distribution, load_input, softmax,
    },
};

/// Garment and pattern classifier backed by ONNX Runtime.
///
/// Sessions are loaded once; kinds whose weight file is missing or broken
/// answer with [`Classification::unavailable`].
pub struct OnnxGarmentClassifier {
    sessions: BTreeMap<ModelKind, Mutex<Session>>,
}

impl OnnxGarmentClassifier {
    pub fn load(model_dir: &Path) -> Self {
        let mut sessions = BTreeMap::new();

        for kind in ModelKind::ALL {
            let path = model_dir.join(kind.weight_file());
            if !path.is_file() {
                warn!(model = %kind, path = %path.display(), "Model weights not found");
                continue;
            }

            match build_session(&path) {
                Ok(session) => {
                    info!(model = %kind, path = %path.display(), "Model loaded");
                    sessions.insert(kind, Mutex::new(session));
                }
                Err(e) => {
                    warn!(model = %kind, path = %path.display(), error = %e, "Failed to load model");
                }
            }
        }

        Self { sessions }
    }

    fn classify(&self, kind: ModelKind, image_path: &Path) -> Classification {
        let Some(session) = self.sessions.get(&kind) else {
            return Classification::unavailable();
        };

        let input = match load_input(image_path) {
            Ok(input) => input,
            Err(e) => {
                warn!(model = %kind, path = %image_path.display(), error = %e, "Image preprocessing failed");
                return Classification::preprocess_failed();
            }
        };

        let probabilities = match run(session, &input) {
            Ok(probabilities) => probabilities,
            Err(e) => {
                warn!(model = %kind, error = %e, "Inference failed");
                return Classification::inference_failed();
            }
        };

        if probabilities.len() != kind.labels().len() {
            warn!(
                model = %kind,
                outputs = probabilities.len(),
                labels = kind.labels().len(),
                "Model output width does not match label list"
            );
        }

        match argmax(&probabilities) {
            Some((index, probability)) => Classification::new(kind.label_for(index), probability),
            None => {
                warn!(model = %kind, "Model returned no usable scores");
                Classification::inference_failed()
            }
        }
    }
}

fn build_session(path: &Path) -> Result<Session, CoreError> {
    Session::builder()
        .map_err(|e| CoreError::ModelLoad(format!("Failed to create session builder: {}", e)))?
        .with_optimization_level(GraphOptimizationLevel::Level3)
        .map_err(|e| CoreError::ModelLoad(format!("Failed to set optimization level: {}", e)))?
        .commit_from_file(path)
        .map_err(|e| CoreError::ModelLoad(format!("Failed to load ONNX model: {}", e)))
}

/// Runs one image through a session and returns class probabilities.
fn run(session: &Mutex<Session>, input: &[f32]) -> Result<Vec<f32>, CoreError> {
    let tensor = TensorRef::from_array_view((INPUT_SHAPE, input))
        .map_err(|e| CoreError::Inference(format!("Failed to create input tensor: {}", e)))?;

    let mut session = session
        .lock()
        .map_err(|_| CoreError::Inference("model session lock poisoned".to_string()))?;

    let outputs = session
        .run(ort::inputs![tensor])
        .map_err(|e| CoreError::Inference(format!("ONNX inference failed: {}", e)))?;

    let (_, scores) = outputs[0]
        .try_extract_tensor::<f32>()
        .map_err(|e| CoreError::Inference(format!("Failed to extract scores: {}", e)))?;

    if is_distribution(scores) {
        Ok(scores.to_vec())
    } else {
        Ok(softmax(scores))
    }
}

impl GarmentClassifier for OnnxGarmentClassifier {
    #[instrument(skip(self))]
    fn classify_item(&self, image_path: &Path, category: GarmentCategory) -> Classification {
        self.classify(ModelKind::from(category), image_path)
    }

    #[instrument(skip(self))]
    fn classify_pattern(&self, image_path: &Path) -> Classification {
        self.classify(ModelKind::Pattern, image_path)
    }

    fn loaded_models(&self) -> Vec<String> {
        self.sessions.keys().map(|kind| kind.to_string()).collect()
    }
}
