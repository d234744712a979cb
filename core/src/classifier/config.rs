//! Configuration for the cascading classification engine.
//!
//! Model descriptors, thresholds, and the user-editable category
//! tables load from a TOML file (`tintype.toml`) so categories and
//! models can be changed without recompiling:
//!
//! ```toml
//! models_dir = "models"
//!
//! [models.id_card]
//! path = "id-card-detector.onnx"
//!
//! [thresholds]
//! general_confidence = 0.4
//!
//! [categories.priorities]
//! pet = 1
//!
//! [categories.object_map]
//! skateboard = "travel"
//! ```
//!
//! Every section is optional; absent sections fall back to built-in
//! defaults, including the full category priority table and the
//! object-to-category map.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

use super::labels;
use super::runtime::EngineError;

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "tintype.toml";

/// Category assigned when a class label has no mapping, or when no
/// detection survives the cascade.
pub const FALLBACK_CATEGORY: &str = "other";

/// Priority used for categories missing from the priority table
/// (lowest rank: any listed category wins over an unlisted one).
pub const DEFAULT_PRIORITY: u32 = 999;

/// The three cascade models, in invocation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    IdCard,
    GeneralDetector,
    FallbackClassifier,
}

impl ModelKind {
    /// Cascade order. `used_models` in a result is always a prefix of
    /// this sequence.
    pub const CASCADE: [ModelKind; 3] = [
        ModelKind::IdCard,
        ModelKind::GeneralDetector,
        ModelKind::FallbackClassifier,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IdCard => "id_card",
            Self::GeneralDetector => "general_detector",
            Self::FallbackClassifier => "fallback_classifier",
        }
    }
}

impl Display for ModelKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for a single model file.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModelFileConfig {
    /// Path to the ONNX file (relative to `models_dir` or absolute).
    pub path: PathBuf,
    /// Inline class labels (index = class id). Empty means: use
    /// `labels_file`, or the built-in set for this model.
    #[serde(default)]
    pub labels: Vec<String>,
    /// Path to a label file (CSV or one label per line).
    #[serde(default)]
    pub labels_file: Option<PathBuf>,
    /// Name of the single input tensor.
    pub input_name: String,
    /// Name of the single output tensor.
    pub output_name: String,
    /// Square input size in pixels (letterbox or center-crop target).
    pub input_size: u32,
}

/// Per-model descriptor resolved from the config: absolute file path,
/// concrete class list, tensor names, and cascade priority.
#[derive(Clone, Debug)]
pub struct ModelDescriptor {
    pub kind: ModelKind,
    pub file_path: PathBuf,
    pub class_labels: Vec<String>,
    pub input_name: String,
    pub output_name: String,
    pub input_size: u32,
    pub priority: u32,
}

/// The three model slots of the cascade.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModelsConfig {
    #[serde(default = "default_id_card_model")]
    pub id_card: ModelFileConfig,
    #[serde(default = "default_general_model")]
    pub general_detector: ModelFileConfig,
    #[serde(default = "default_fallback_model")]
    pub fallback_classifier: ModelFileConfig,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            id_card: default_id_card_model(),
            general_detector: default_general_model(),
            fallback_classifier: default_fallback_model(),
        }
    }
}

fn default_id_card_model() -> ModelFileConfig {
    ModelFileConfig {
        path: PathBuf::from("id-card-detector.onnx"),
        labels: Vec::new(),
        labels_file: None,
        input_name: "images".to_string(),
        output_name: "output0".to_string(),
        input_size: 640,
    }
}

fn default_general_model() -> ModelFileConfig {
    ModelFileConfig {
        path: PathBuf::from("yolov8n.onnx"),
        labels: Vec::new(),
        labels_file: None,
        input_name: "images".to_string(),
        output_name: "output0".to_string(),
        input_size: 640,
    }
}

fn default_fallback_model() -> ModelFileConfig {
    ModelFileConfig {
        path: PathBuf::from("scene-classifier.onnx"),
        labels: Vec::new(),
        labels_file: None,
        input_name: "input".to_string(),
        output_name: "logits".to_string(),
        input_size: 224,
    }
}

/// Confidence thresholds and the detection cap.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Thresholds {
    /// Minimum confidence for an ID-card detection to count.
    #[serde(default = "default_id_card_confidence")]
    pub id_card_confidence: f32,
    /// Minimum confidence for a general-detector box to survive.
    #[serde(default = "default_general_confidence")]
    pub general_confidence: f32,
    /// Minimum softmax probability for a fallback-classifier label.
    #[serde(default = "default_fallback_confidence")]
    pub fallback_confidence: f32,
    /// Upper bound on detections kept after deduplication.
    #[serde(default = "default_max_detections")]
    pub max_detections: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            id_card_confidence: default_id_card_confidence(),
            general_confidence: default_general_confidence(),
            fallback_confidence: default_fallback_confidence(),
            max_detections: default_max_detections(),
        }
    }
}

fn default_id_card_confidence() -> f32 {
    0.5
}

fn default_general_confidence() -> f32 {
    0.25
}

fn default_fallback_confidence() -> f32 {
    0.3
}

fn default_max_detections() -> usize {
    20
}

/// User-editable category tables: the priority ranking and the raw
/// class label to category mapping.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CategoryRules {
    /// Category id -> priority. Lower value = higher priority.
    #[serde(default = "default_priorities")]
    pub priorities: HashMap<String, u32>,
    /// Raw class label -> category id.
    #[serde(default = "default_object_map")]
    pub object_map: HashMap<String, String>,
}

impl Default for CategoryRules {
    fn default() -> Self {
        Self {
            priorities: default_priorities(),
            object_map: default_object_map(),
        }
    }
}

impl CategoryRules {
    /// Category for a raw class label; unmapped labels fall back to
    /// [`FALLBACK_CATEGORY`].
    pub fn category_for<'a>(&'a self, label: &str) -> &'a str {
        self.object_map
            .get(label)
            .map(String::as_str)
            .unwrap_or(FALLBACK_CATEGORY)
    }

    /// Priority of a category; absent categories rank last.
    pub fn priority_of(&self, category: &str) -> u32 {
        self.priorities
            .get(category)
            .copied()
            .unwrap_or(DEFAULT_PRIORITY)
    }
}

fn default_priorities() -> HashMap<String, u32> {
    [
        ("id_card", 0),
        ("people", 1),
        ("pet", 2),
        ("food", 3),
        ("travel", 4),
        ("screenshot", 5),
    ]
    .into_iter()
    .map(|(category, priority)| (category.to_string(), priority))
    .collect()
}

fn default_object_map() -> HashMap<String, String> {
    let mut map = HashMap::new();

    let mut insert_all = |labels: &[&str], category: &str| {
        for label in labels {
            map.insert(label.to_string(), category.to_string());
        }
    };

    insert_all(&["id_card_front", "id_card_back"], "id_card");
    insert_all(&["person"], "people");
    insert_all(
        &[
            "cat", "dog", "bird", "horse", "sheep", "cow", "elephant", "bear", "zebra", "giraffe",
        ],
        "pet",
    );
    insert_all(
        &[
            "banana", "apple", "sandwich", "orange", "broccoli", "carrot", "hot dog", "pizza",
            "donut", "cake", "bowl", "noodles", "sushi", "hotpot", "barbecue", "dessert",
            "coffee", "bread", "fruit plate",
        ],
        "food",
    );
    insert_all(
        &[
            "airplane", "train", "boat", "bus", "bicycle", "motorcycle", "suitcase", "backpack",
            "surfboard", "skis", "snowboard", "mountain", "beach", "forest", "lake", "river",
            "waterfall", "desert", "snowfield", "sunset", "city skyline", "temple", "bridge",
            "harbor", "amusement park", "campsite", "night sky", "aurora",
        ],
        "travel",
    );

    map
}

/// Root engine configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Base directory for model files.
    #[serde(default = "default_models_dir")]
    pub models_dir: PathBuf,

    #[serde(default)]
    pub models: ModelsConfig,

    #[serde(default)]
    pub thresholds: Thresholds,

    #[serde(default)]
    pub categories: CategoryRules,
}

fn default_models_dir() -> PathBuf {
    PathBuf::from("models")
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            models_dir: default_models_dir(),
            models: ModelsConfig::default(),
            thresholds: Thresholds::default(),
            categories: CategoryRules::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(EngineError::Config(format!(
                "config file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| EngineError::Config(format!("failed to read config: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| EngineError::Config(format!("invalid config TOML: {}", e)))
    }

    /// Load from the default location, falling back to defaults.
    pub fn load_or_default() -> Self {
        Self::load(DEFAULT_CONFIG_FILE).unwrap_or_default()
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), EngineError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| EngineError::Config(format!("failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| EngineError::Config(format!("failed to write config: {}", e)))
    }

    fn model(&self, kind: ModelKind) -> &ModelFileConfig {
        match kind {
            ModelKind::IdCard => &self.models.id_card,
            ModelKind::GeneralDetector => &self.models.general_detector,
            ModelKind::FallbackClassifier => &self.models.fallback_classifier,
        }
    }

    /// Full path to a model file.
    pub fn model_path(&self, kind: ModelKind) -> PathBuf {
        let model = self.model(kind);
        if model.path.is_absolute() {
            model.path.clone()
        } else {
            self.models_dir.join(&model.path)
        }
    }

    /// Resolve the descriptor for one model, loading its label file if
    /// the config names one.
    pub fn descriptor(&self, kind: ModelKind) -> Result<ModelDescriptor, EngineError> {
        let model = self.model(kind);
        let class_labels = labels::resolve_labels(
            &self.models_dir,
            &model.labels,
            model.labels_file.as_deref(),
            kind,
        )?;

        let priority = ModelKind::CASCADE
            .iter()
            .position(|k| *k == kind)
            .unwrap_or(ModelKind::CASCADE.len()) as u32;

        Ok(ModelDescriptor {
            kind,
            file_path: self.model_path(kind),
            class_labels,
            input_name: model.input_name.clone(),
            output_name: model.output_name.clone(),
            input_size: model.input_size,
            priority,
        })
    }

    /// Resolve all three descriptors in cascade order.
    pub fn descriptors(&self) -> Result<Vec<ModelDescriptor>, EngineError> {
        ModelKind::CASCADE
            .iter()
            .map(|kind| self.descriptor(*kind))
            .collect()
    }
}
