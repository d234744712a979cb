//! Detection filtering and per-class deduplication.
//!
//! Scores coming out of the detection heads are already-normalized
//! probabilities, so no activation is applied here. Deduplication is
//! class-level only: the highest-confidence box per class label
//! survives, with no geometric overlap test. One detection per class
//! is all the category resolver needs.

use super::tensor::DetectionGrid;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One surviving detection from a model run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Detection {
    pub class_label: String,
    pub confidence: f32,
    pub class_index: usize,
    /// `[x, y, w, h]` in model input coordinates; `None` for
    /// pseudo-detections without box regression.
    pub bounding_box: Option<[f32; 4]>,
}

/// Turn raw per-box score vectors into the final detection list.
///
/// Boxes whose best class score exceeds `confidence_threshold` are
/// sorted by confidence descending, reduced to one detection per class
/// label, and capped at `max_detections`.
pub fn filter_detections(
    grid: &DetectionGrid,
    class_labels: &[String],
    confidence_threshold: f32,
    max_detections: usize,
) -> Vec<Detection> {
    let mut candidates = Vec::new();

    for box_index in 0..grid.num_boxes() {
        let (class_index, confidence) = best_class(grid, box_index);

        if !confidence.is_finite() || confidence <= confidence_threshold {
            continue;
        }

        let class_label = class_labels
            .get(class_index)
            .cloned()
            .unwrap_or_else(|| format!("class_{}", class_index));

        candidates.push(Detection {
            class_label,
            confidence,
            class_index,
            bounding_box: Some(grid.bounding_box(box_index)),
        });
    }

    candidates.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

    // Highest-confidence instance of each class wins; the rest drop.
    let mut seen = HashSet::new();
    let mut survivors = Vec::new();
    for detection in candidates {
        if survivors.len() >= max_detections {
            break;
        }
        if seen.insert(detection.class_label.clone()) {
            survivors.push(detection);
        }
    }

    survivors
}

/// Best class for one box: the maximum over its class-score channels.
/// For the two-channel ID-card head this is the direct comparison of
/// the front/back scores.
fn best_class(grid: &DetectionGrid, box_index: usize) -> (usize, f32) {
    let mut best_index = 0;
    let mut best_score = f32::NEG_INFINITY;
    for class_index in 0..grid.num_classes() {
        let score = grid.class_score(box_index, class_index);
        if score > best_score {
            best_index = class_index;
            best_score = score;
        }
    }
    (best_index, best_score)
}
