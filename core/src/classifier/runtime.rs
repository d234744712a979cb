//! ONNX Runtime wrapper and the inference backend seam.
//!
//! The cascade never talks to `ort` directly; it goes through the
//! [`InferenceBackend`] trait so tests can substitute a recording mock
//! and deployments can swap the execution strategy once at startup.

use super::config::ModelKind;
use ndarray::Array4;
use ort::session::{builder::GraphOptimizationLevel, Session};
use serde::Serialize;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Errors that can occur inside the classification engine.
#[derive(Debug)]
pub enum EngineError {
    /// Model file missing on disk. Fatal for that model; never retried
    /// automatically.
    ModelNotFound(PathBuf),
    /// Model file present but could not be opened as an inference graph.
    ModelLoad(String),
    /// Runtime failure during a forward pass.
    Inference(String),
    /// Unreadable or corrupt input image.
    Preprocess(String),
    /// Invalid or unreadable configuration.
    Config(String),
    /// A model name that does not exist in the registry. Indicates a
    /// programming error, so this one is allowed to reach the caller.
    UnknownModel(String),
}

impl Display for EngineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ModelNotFound(path) => write!(f, "model not found: {}", path.display()),
            Self::ModelLoad(msg) => write!(f, "model load error: {}", msg),
            Self::Inference(msg) => write!(f, "inference error: {}", msg),
            Self::Preprocess(msg) => write!(f, "preprocess error: {}", msg),
            Self::Config(msg) => write!(f, "config error: {}", msg),
            Self::UnknownModel(name) => write!(f, "unknown model: {}", name),
        }
    }
}

impl std::error::Error for EngineError {}

/// Raw tensor returned by a model run, before any decoding.
#[derive(Clone, Debug)]
pub struct ModelOutput {
    pub shape: Vec<usize>,
    pub data: Vec<f32>,
}

/// Load state of one model, for diagnostics only.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct ModelStatus {
    pub kind: ModelKind,
    pub loaded: bool,
}

/// Strategy interface between the cascade and the inference runtime.
///
/// Selected once at construction time, never probed per call. The
/// production implementation is [`super::registry::ModelRegistry`].
pub trait InferenceBackend: Send + Sync {
    /// Run one forward pass. Implementations must serialize access per
    /// model: a session is not safe for concurrent inference.
    fn run(&self, kind: ModelKind, input: Array4<f32>) -> Result<ModelOutput, EngineError>;

    /// Release the native resources of one model. No-op when the model
    /// is not loaded.
    fn unload(&self, kind: ModelKind);

    /// Release all model sessions.
    fn unload_all(&self) {
        for kind in ModelKind::CASCADE {
            self.unload(kind);
        }
    }

    /// Current load state per model.
    fn status(&self) -> Vec<ModelStatus>;
}

/// Load an ONNX session from a model file.
///
/// CPU execution only, and graph optimization disabled: optimized
/// graphs were observed to alter output tensor layout across runtime
/// versions, and the decoders rely on the published layout.
pub fn load_session(model_path: &Path) -> Result<Session, EngineError> {
    if !model_path.exists() {
        return Err(EngineError::ModelNotFound(model_path.to_path_buf()));
    }

    let model_bytes = std::fs::read(model_path).map_err(|e| {
        EngineError::ModelLoad(format!(
            "failed to read model file {}: {}",
            model_path.display(),
            e
        ))
    })?;

    Session::builder()
        .map_err(|e| EngineError::ModelLoad(e.to_string()))?
        .with_optimization_level(GraphOptimizationLevel::Disable)
        .map_err(|e| EngineError::ModelLoad(e.to_string()))?
        .with_intra_threads(1)
        .map_err(|e| EngineError::ModelLoad(e.to_string()))?
        .commit_from_memory(&model_bytes)
        .map_err(|e| EngineError::ModelLoad(format!("{}: {}", model_path.display(), e)))
}

/// Softmax function for converting logits to probabilities.
pub fn softmax(logits: &[f32]) -> Vec<f32> {
    let max_val = logits.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    let exp_vals: Vec<f32> = logits.iter().map(|x| (x - max_val).exp()).collect();
    let sum: f32 = exp_vals.iter().sum();
    exp_vals.iter().map(|x| x / sum).collect()
}
