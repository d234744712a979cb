//! Category resolution: reduce a detection list to one category.
//!
//! Each detection votes for the category its class label maps to; a
//! category's score is the best confidence among its votes. The
//! priority table then ranks candidate categories, with confidence as
//! the tie-break.

use super::config::CategoryRules;
use super::postprocess::Detection;
use std::collections::HashMap;

/// Winning category with the score of its strongest detection.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedCategory {
    pub category: String,
    pub confidence: f32,
}

/// Resolve a detection set to one category, or `None` when the set is
/// empty (the orchestrator turns that into the no-detection result).
///
/// Selection is fully deterministic: smallest priority wins; equal
/// priorities fall back to the higher score; an exact score tie falls
/// back to the lexicographically smaller category name.
pub fn resolve(detections: &[Detection], rules: &CategoryRules) -> Option<ResolvedCategory> {
    if detections.is_empty() {
        return None;
    }

    let mut scores: HashMap<&str, f32> = HashMap::new();
    for detection in detections {
        let category = rules.category_for(&detection.class_label);
        let entry = scores.entry(category).or_insert(f32::NEG_INFINITY);
        if detection.confidence > *entry {
            *entry = detection.confidence;
        }
    }

    scores
        .into_iter()
        .map(|(category, score)| (rules.priority_of(category), score, category))
        .min_by(|a, b| {
            a.0.cmp(&b.0)
                .then_with(|| b.1.total_cmp(&a.1))
                .then_with(|| a.2.cmp(b.2))
        })
        .map(|(_, score, category)| ResolvedCategory {
            category: category.to_string(),
            confidence: score,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detection(label: &str, confidence: f32) -> Detection {
        Detection {
            class_label: label.to_string(),
            confidence,
            class_index: 0,
            bounding_box: None,
        }
    }

    #[test]
    fn empty_detections_resolve_to_none() {
        assert!(resolve(&[], &CategoryRules::default()).is_none());
    }

    #[test]
    fn maps_labels_through_object_map() {
        let result = resolve(&[detection("dog", 0.82)], &CategoryRules::default()).unwrap();
        assert_eq!(result.category, "pet");
        assert!((result.confidence - 0.82).abs() < 1e-6);
    }

    #[test]
    fn unmapped_labels_land_in_other() {
        let result = resolve(&[detection("toothbrush", 0.9)], &CategoryRules::default()).unwrap();
        assert_eq!(result.category, "other");
    }

    #[test]
    fn priority_beats_confidence() {
        // people (priority 1) wins over food (priority 3) despite the
        // lower score.
        let detections = vec![detection("person", 0.4), detection("pizza", 0.95)];
        let result = resolve(&detections, &CategoryRules::default()).unwrap();
        assert_eq!(result.category, "people");
    }

    #[test]
    fn equal_priority_falls_back_to_score() {
        let mut rules = CategoryRules::default();
        rules.priorities.insert("pet".to_string(), 3);
        // pet and food now share priority 3; the 0.8 vote must win.
        let detections = vec![detection("pizza", 0.6), detection("dog", 0.8)];
        let result = resolve(&detections, &rules).unwrap();
        assert_eq!(result.category, "pet");
        assert!((result.confidence - 0.8).abs() < 1e-6);
    }

    #[test]
    fn category_score_is_best_of_its_votes() {
        let detections = vec![detection("dog", 0.5), detection("cat", 0.75)];
        let result = resolve(&detections, &CategoryRules::default()).unwrap();
        assert_eq!(result.category, "pet");
        assert!((result.confidence - 0.75).abs() < 1e-6);
    }

    #[test]
    fn resolution_is_deterministic() {
        let detections = vec![
            detection("dog", 0.7),
            detection("person", 0.7),
            detection("pizza", 0.7),
        ];
        let rules = CategoryRules::default();
        let first = resolve(&detections, &rules).unwrap();
        for _ in 0..10 {
            assert_eq!(resolve(&detections, &rules).unwrap(), first);
        }
    }
}
