//! Label loading strategies for the cascade models.
//!
//! Each model resolves its class list from, in order: inline labels in
//! the config, an external label file (CSV or plain text), or the
//! built-in set for that model.

use super::config::ModelKind;
use super::runtime::EngineError;
use csv::ReaderBuilder;
use std::fs;
use std::path::Path;

/// Resolve the class list for one model.
pub fn resolve_labels(
    models_dir: &Path,
    inline: &[String],
    labels_file: Option<&Path>,
    kind: ModelKind,
) -> Result<Vec<String>, EngineError> {
    if !inline.is_empty() {
        return Ok(inline.to_vec());
    }

    if let Some(labels_file) = labels_file {
        let label_path = if labels_file.is_absolute() {
            labels_file.to_path_buf()
        } else {
            models_dir.join(labels_file)
        };

        if !label_path.exists() {
            return Err(EngineError::Config(format!(
                "label file not found: {}",
                label_path.display()
            )));
        }

        let is_csv = label_path
            .extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

        return if is_csv {
            load_labels_from_csv(&label_path)
        } else {
            load_labels_from_text(&label_path)
        };
    }

    Ok(builtin_labels(kind))
}

/// Built-in class list for a model, used when the config supplies none.
pub fn builtin_labels(kind: ModelKind) -> Vec<String> {
    let labels: &[&str] = match kind {
        ModelKind::IdCard => ID_CARD_LABELS,
        ModelKind::GeneralDetector => COCO_LABELS,
        ModelKind::FallbackClassifier => SCENE_LABELS,
    };
    labels.iter().map(|s| s.to_string()).collect()
}

/// Load labels from a CSV file.
///
/// Expects a header row; label names are taken from the second column.
pub fn load_labels_from_csv(path: &Path) -> Result<Vec<String>, EngineError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| {
            EngineError::Config(format!("failed to read labels CSV {}: {}", path.display(), e))
        })?;

    let mut labels = Vec::new();
    for record in reader.records() {
        let record = record
            .map_err(|e| EngineError::Config(format!("invalid label record: {}", e)))?;
        if let Some(name) = record.get(1) {
            let trimmed = name.trim();
            if !trimmed.is_empty() {
                labels.push(trimmed.to_string());
            }
        }
    }

    if labels.is_empty() {
        return Err(EngineError::Config(format!(
            "no labels found in {}",
            path.display()
        )));
    }

    Ok(labels)
}

/// Load labels from a plain text file, one label per line.
pub fn load_labels_from_text(path: &Path) -> Result<Vec<String>, EngineError> {
    let content = fs::read_to_string(path).map_err(|e| {
        EngineError::Config(format!("failed to read label file {}: {}", path.display(), e))
    })?;

    let labels: Vec<String> = content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect();

    if labels.is_empty() {
        return Err(EngineError::Config(format!(
            "no labels found in {}",
            path.display()
        )));
    }

    Ok(labels)
}

/// Classes of the binary ID-card detection head. Index order matters:
/// the cascade treats indices 0 and 1 as front/back hits.
pub const ID_CARD_LABELS: &[&str] = &["id_card_front", "id_card_back"];

/// COCO class order used by the 80-class general detector.
pub const COCO_LABELS: &[&str] = &[
    "person", "bicycle", "car", "motorcycle", "airplane", "bus", "train", "truck", "boat",
    "traffic light", "fire hydrant", "stop sign", "parking meter", "bench", "bird", "cat", "dog",
    "horse", "sheep", "cow", "elephant", "bear", "zebra", "giraffe", "backpack", "umbrella",
    "handbag", "tie", "suitcase", "frisbee", "skis", "snowboard", "sports ball", "kite",
    "baseball bat", "baseball glove", "skateboard", "surfboard", "tennis racket", "bottle",
    "wine glass", "cup", "fork", "knife", "spoon", "bowl", "banana", "apple", "sandwich",
    "orange", "broccoli", "carrot", "hot dog", "pizza", "donut", "cake", "chair", "couch",
    "potted plant", "bed", "dining table", "toilet", "tv", "laptop", "mouse", "remote",
    "keyboard", "cell phone", "microwave", "oven", "toaster", "sink", "refrigerator", "book",
    "clock", "vase", "scissors", "teddy bear", "hair drier", "toothbrush",
];

/// Scene classes of the fallback classifier head.
pub const SCENE_LABELS: &[&str] = &[
    "mountain", "beach", "forest", "lake", "river", "waterfall", "desert", "snowfield",
    "sunset", "city skyline", "street", "temple", "bridge", "harbor", "amusement park",
    "campsite", "garden", "field", "night sky", "aurora",
    "noodles", "sushi", "hotpot", "barbecue", "dessert", "coffee", "bread", "fruit plate",
    "living room", "bedroom", "office", "classroom", "stadium", "concert", "whiteboard",
    "document",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_sets_have_expected_sizes() {
        assert_eq!(builtin_labels(ModelKind::IdCard).len(), 2);
        assert_eq!(builtin_labels(ModelKind::GeneralDetector).len(), 80);
        assert!(!builtin_labels(ModelKind::FallbackClassifier).is_empty());
    }

    #[test]
    fn inline_labels_win_over_builtins() {
        let inline = vec!["a".to_string(), "b".to_string()];
        let labels =
            resolve_labels(Path::new("."), &inline, None, ModelKind::GeneralDetector).unwrap();
        assert_eq!(labels, inline);
    }

    #[test]
    fn missing_label_file_is_a_config_error() {
        let result = resolve_labels(
            Path::new("."),
            &[],
            Some(Path::new("does-not-exist.txt")),
            ModelKind::IdCard,
        );
        assert!(matches!(result, Err(EngineError::Config(_))));
    }

    #[test]
    fn coco_indices_match_known_classes() {
        assert_eq!(COCO_LABELS[0], "person");
        assert_eq!(COCO_LABELS[16], "dog");
        assert_eq!(COCO_LABELS[15], "cat");
    }
}
