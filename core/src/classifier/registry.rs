//! Model session lifecycle.
//!
//! The registry owns one slot per cascade model. Sessions load lazily
//! on first use, stay cached until explicitly unloaded, and are
//! guarded by a per-model mutex because an ONNX session is not safe
//! for concurrent inference.

use super::config::{ModelDescriptor, ModelKind};
use super::runtime::{load_session, EngineError, InferenceBackend, ModelOutput, ModelStatus};
use ndarray::Array4;
use ort::session::Session;
use ort::value::Tensor;
use std::sync::Mutex;

struct ModelSlot {
    descriptor: ModelDescriptor,
    session: Mutex<Option<Session>>,
}

/// Owns and serializes access to the three inference sessions.
pub struct ModelRegistry {
    slots: Vec<ModelSlot>,
}

impl ModelRegistry {
    /// Build a registry from resolved descriptors. No session is
    /// opened until the first `run` for that model.
    pub fn new(descriptors: Vec<ModelDescriptor>) -> Self {
        let slots = descriptors
            .into_iter()
            .map(|descriptor| ModelSlot {
                descriptor,
                session: Mutex::new(None),
            })
            .collect();
        Self { slots }
    }

    fn slot(&self, kind: ModelKind) -> Result<&ModelSlot, EngineError> {
        self.slots
            .iter()
            .find(|slot| slot.descriptor.kind == kind)
            .ok_or_else(|| EngineError::UnknownModel(kind.to_string()))
    }

    /// Descriptor for one model.
    pub fn descriptor(&self, kind: ModelKind) -> Result<&ModelDescriptor, EngineError> {
        self.slot(kind).map(|slot| &slot.descriptor)
    }

    /// Ensure the session for `kind` is open. Idempotent: a cached
    /// session is left untouched. A missing or malformed model file
    /// fails here and is not retried automatically.
    pub fn load(&self, kind: ModelKind) -> Result<(), EngineError> {
        let slot = self.slot(kind)?;
        let mut guard = slot
            .session
            .lock()
            .map_err(|_| EngineError::Inference(format!("{} session lock poisoned", kind)))?;
        if guard.is_none() {
            tracing::info!(
                model = %kind,
                path = %slot.descriptor.file_path.display(),
                "loading model session"
            );
            *guard = Some(load_session(&slot.descriptor.file_path)?);
        }
        Ok(())
    }

    /// Whether a session is currently cached for `kind`.
    pub fn is_loaded(&self, kind: ModelKind) -> bool {
        self.slot(kind)
            .ok()
            .and_then(|slot| slot.session.lock().ok().map(|guard| guard.is_some()))
            .unwrap_or(false)
    }
}

impl InferenceBackend for ModelRegistry {
    fn run(&self, kind: ModelKind, input: Array4<f32>) -> Result<ModelOutput, EngineError> {
        self.load(kind)?;

        let slot = self.slot(kind)?;
        let mut guard = slot
            .session
            .lock()
            .map_err(|_| EngineError::Inference(format!("{} session lock poisoned", kind)))?;

        let session = guard
            .as_mut()
            .ok_or_else(|| EngineError::Inference(format!("{} session missing after load", kind)))?;

        let input_tensor =
            Tensor::from_array(input).map_err(|e| EngineError::Inference(e.to_string()))?;

        let outputs = session
            .run(ort::inputs![slot.descriptor.input_name.as_str() => input_tensor])
            .map_err(|e| EngineError::Inference(format!("{}: {}", kind, e)))?;

        let output = match outputs.get(slot.descriptor.output_name.as_str()) {
            Some(value) => value.view(),
            None => outputs.values().next().ok_or_else(|| {
                EngineError::Inference(format!("{} produced no output tensor", kind))
            })?,
        };

        let (shape, data) = output
            .try_extract_tensor::<f32>()
            .map_err(|e| EngineError::Inference(e.to_string()))?;

        Ok(ModelOutput {
            shape: shape.iter().map(|&dim| dim as usize).collect(),
            data: data.to_vec(),
        })
    }

    fn unload(&self, kind: ModelKind) {
        if let Ok(slot) = self.slot(kind) {
            if let Ok(mut guard) = slot.session.lock() {
                if guard.take().is_some() {
                    tracing::info!(model = %kind, "model session released");
                }
            }
        }
    }

    fn status(&self) -> Vec<ModelStatus> {
        self.slots
            .iter()
            .map(|slot| ModelStatus {
                kind: slot.descriptor.kind,
                loaded: slot
                    .session
                    .lock()
                    .map(|guard| guard.is_some())
                    .unwrap_or(false),
            })
            .collect()
    }
}
