//! Core classification engine for Tintype.
//!
//! This crate exposes the cascading multi-model category engine used
//! by the CLI and future preview UI: three ONNX models tried in fixed
//! priority order, a configurable category priority table, and a JSON
//! report writer for downstream consumers.

pub mod classifier;
pub mod progress;
pub mod reporting;

pub use classifier::{
    CascadeClassifier, CategoryRules, ClassificationMethod, ClassificationResult,
    ClassifyOptions, Detection, EngineConfig, EngineError, ImageMeta, ImageSource,
    InferenceBackend, ModelDescriptor, ModelKind, ModelRegistry, ModelStatus,
    DEFAULT_CONFIG_FILE,
};
pub use reporting::{print_summary, write_report, ReportingError};
