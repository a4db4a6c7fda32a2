//! ONNX Runtime inference. Input: [1, n] f32. Output: first element of the selected output tensor.
//! Regressors and classifiers exported from scikit-learn both fit this contract.

use super::Predict;
use crate::config::ModelConfig;
use crate::error::{GatewayError, GatewayResult};
use ndarray::Array2;
use ort::session::Session;
use ort::value::{DynValue, Tensor};
use std::path::Path;
use std::sync::OnceLock;

static ORT_INIT: OnceLock<Result<(), String>> = OnceLock::new();

/// The runtime library is loaded dynamically; a missing library panics inside `ort`.
fn init_env() -> Result<(), String> {
    ORT_INIT
        .get_or_init(|| {
            std::panic::catch_unwind(|| {
                ort::init()
                    .with_name("spendsense")
                    .commit()
                    .map(|_| ())
                    .map_err(|e| e.to_string())
            })
            .unwrap_or_else(|_| Err("ONNX Runtime library could not be loaded".to_string()))
        })
        .clone()
}

pub struct OnnxPredictor {
    name: String,
    session: Session,
    input_name: String,
    output_name: String,
}

impl OnnxPredictor {
    /// Load a model from `path`. A missing or unreadable file is an artifact load error.
    pub fn load(path: &Path, config: &ModelConfig) -> GatewayResult<Self> {
        let name = config.file.clone();
        if !path.exists() {
            return Err(GatewayError::artifact(&name, format!("{} not found", path.display())));
        }
        init_env().map_err(|e| GatewayError::artifact(&name, e))?;

        let session = Session::builder()
            .and_then(|b| b.commit_from_file(path))
            .map_err(|e| GatewayError::artifact(&name, e))?;

        let input_name = match &config.input {
            Some(n) => n.clone(),
            None => session
                .inputs
                .first()
                .map(|i| i.name.clone())
                .unwrap_or_else(|| "float_input".to_string()),
        };

        let output_name = match &config.output {
            Some(n) => n.clone(),
            None => session
                .outputs
                .iter()
                .find(|o| o.name.contains("label"))
                .or_else(|| session.outputs.first())
                .map(|o| o.name.clone())
                .ok_or_else(|| GatewayError::artifact(&name, "model declares no outputs"))?,
        };

        tracing::info!(model = %name, input = %input_name, output = %output_name, "ONNX model loaded");

        Ok(Self {
            name,
            session,
            input_name,
            output_name,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn first_scalar(value: &DynValue) -> Option<f64> {
        if let Ok(view) = value.try_extract_tensor::<f32>() {
            return view.iter().next().map(|v| f64::from(*v));
        }
        if let Ok(view) = value.try_extract_tensor::<f64>() {
            return view.iter().next().copied();
        }
        if let Ok(view) = value.try_extract_tensor::<i64>() {
            return view.iter().next().map(|v| *v as f64);
        }
        None
    }
}

impl Predict for OnnxPredictor {
    fn predict(&self, features: &[f32]) -> GatewayResult<f64> {
        let fail = |e: String| GatewayError::Prediction(format!("{}: {}", self.name, e));

        let arr = Array2::from_shape_vec((1, features.len()), features.to_vec())
            .map_err(|e| fail(e.to_string()))?;
        let input = Tensor::from_array(arr).map_err(|e| fail(e.to_string()))?;
        let inputs = ort::inputs![self.input_name.as_str() => input].map_err(|e| fail(e.to_string()))?;

        let outputs = self.session.run(inputs).map_err(|e| fail(e.to_string()))?;
        let out = outputs
            .get(self.output_name.as_str())
            .ok_or_else(|| fail(format!("missing output `{}`", self.output_name)))?;

        Self::first_scalar(out).ok_or_else(|| fail("empty or non-numeric output".to_string()))
    }
}
