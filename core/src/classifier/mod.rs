//! Cascading multi-model photo classification.
//!
//! This module turns a raw image into one category label. A cheap
//! screenshot heuristic runs first and can skip inference entirely;
//! otherwise up to three ONNX models run in fixed priority order: the
//! binary ID-card detector, the 80-class general object detector, and
//! a scene classifier as the last resort.
//!
//! Each stage only runs when the previous one produced nothing usable,
//! and a stage failure degrades that stage to zero detections instead
//! of aborting the call: a photo always comes back with a category.
//!
//! # Configuration
//!
//! Model paths, thresholds, and the user-editable category tables load
//! from `tintype.toml`; see [`EngineConfig`].

mod config;
mod labels;
mod postprocess;
mod registry;
mod resolver;
mod runtime;
mod screenshot;
mod tensor;

pub use config::{
    CategoryRules, EngineConfig, ModelDescriptor, ModelFileConfig, ModelKind, Thresholds,
    DEFAULT_CONFIG_FILE, DEFAULT_PRIORITY, FALLBACK_CATEGORY,
};
pub use labels::{builtin_labels, COCO_LABELS, ID_CARD_LABELS, SCENE_LABELS};
pub use postprocess::{filter_detections, Detection};
pub use registry::ModelRegistry;
pub use resolver::{resolve, ResolvedCategory};
pub use runtime::{
    load_session, softmax, EngineError, InferenceBackend, ModelOutput, ModelStatus,
};
pub use screenshot::is_screenshot;
pub use tensor::{
    decode_detection_output, encode_center_crop, encode_letterbox, DetectionGrid,
    CLASSIFIER_INPUT_SIZE, DETECTOR_INPUT_SIZE,
};

use image::DynamicImage;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Category and confidence reported for screenshots.
const SCREENSHOT_CATEGORY: &str = "screenshot";
const SCREENSHOT_CONFIDENCE: f32 = 0.9;

/// Confidence reported when nothing was detected or the image was
/// unreadable.
const NO_DETECTION_CONFIDENCE: f32 = 0.5;

/// A readable image handed in by the scanning collaborator.
#[derive(Clone)]
pub enum ImageSource {
    Path(PathBuf),
    Bytes(Vec<u8>),
    Pixels(DynamicImage),
}

impl ImageSource {
    fn file_name(&self) -> Option<&str> {
        match self {
            Self::Path(path) => path.file_name().and_then(|name| name.to_str()),
            _ => None,
        }
    }
}

/// Optional metadata accompanying an image. Dimensions and file name
/// from here take precedence over decoded values for the screenshot
/// check.
#[derive(Clone, Debug, Default)]
pub struct ImageMeta {
    pub file_name: Option<String>,
    pub file_size: Option<u64>,
    pub timestamp: Option<String>,
    pub dimensions: Option<(u32, u32)>,
}

/// Per-call options.
#[derive(Clone, Debug, Default)]
pub struct ClassifyOptions {
    /// Release all model sessions once the call completes. Memory
    /// release is caller-driven, never automatic.
    pub unload_after_classification: bool,
}

/// How the final category was decided.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationMethod {
    /// Screenshot heuristic matched; no model ran.
    MobileScreenshot,
    /// A detection model produced the category.
    SmartDetection,
    /// Nothing was found; the image is filed as "other".
    NoDetection,
    /// The fallback classifier decided, or the image was unreadable.
    Fallback,
}

/// The sole output of the engine, handed to the storage collaborator.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub category: String,
    pub confidence: f32,
    pub reason: String,
    pub method: ClassificationMethod,
    pub detections: Vec<Detection>,
    pub id_card_detected: bool,
    pub used_models: Vec<ModelKind>,
}

/// The cascade orchestrator.
///
/// Holds the resolved model descriptors, the thresholds, the category
/// tables, and the inference backend. The backend is injected once at
/// construction; production uses [`ModelRegistry`], tests use mocks.
///
/// There is no timeout around model inference: a hung native call
/// blocks the classification until it returns.
pub struct CascadeClassifier {
    backend: Box<dyn InferenceBackend>,
    id_card: ModelDescriptor,
    general: ModelDescriptor,
    fallback: ModelDescriptor,
    thresholds: Thresholds,
    categories: CategoryRules,
}

impl CascadeClassifier {
    /// Build a classifier backed by a [`ModelRegistry`] over the
    /// configured model files. Model sessions load lazily on first
    /// use.
    pub fn new(config: &EngineConfig) -> Result<Self, EngineError> {
        let registry = ModelRegistry::new(config.descriptors()?);
        Self::with_backend(config, Box::new(registry))
    }

    /// Build a classifier over a custom inference backend.
    pub fn with_backend(
        config: &EngineConfig,
        backend: Box<dyn InferenceBackend>,
    ) -> Result<Self, EngineError> {
        Ok(Self {
            backend,
            id_card: config.descriptor(ModelKind::IdCard)?,
            general: config.descriptor(ModelKind::GeneralDetector)?,
            fallback: config.descriptor(ModelKind::FallbackClassifier)?,
            thresholds: config.thresholds.clone(),
            categories: config.categories.clone(),
        })
    }

    /// Classify one image. Never fails: model-stage errors degrade the
    /// stage, and an unreadable image yields the "other" fallback
    /// result.
    pub fn classify(
        &self,
        source: &ImageSource,
        meta: &ImageMeta,
        options: &ClassifyOptions,
    ) -> ClassificationResult {
        let result = self.classify_inner(source, meta);
        if options.unload_after_classification {
            self.backend.unload_all();
        }
        result
    }

    /// Classify a batch strictly one image at a time, preserving input
    /// order. A failed image yields its "other" entry; it never poisons
    /// the rest of the batch.
    pub fn classify_batch(
        &self,
        items: &[(ImageSource, ImageMeta)],
        options: &ClassifyOptions,
    ) -> Vec<ClassificationResult> {
        let results = items
            .iter()
            .map(|(source, meta)| self.classify_inner(source, meta))
            .collect();
        if options.unload_after_classification {
            self.backend.unload_all();
        }
        results
    }

    /// Release all model sessions.
    pub fn unload_models(&self) {
        self.backend.unload_all();
    }

    /// Load state of each model, for diagnostics.
    pub fn model_status(&self) -> Vec<ModelStatus> {
        self.backend.status()
    }

    fn classify_inner(&self, source: &ImageSource, meta: &ImageMeta) -> ClassificationResult {
        let image = match decode_image(source) {
            Ok(image) => image,
            Err(err) => {
                tracing::warn!(error = %err, "image unreadable, filing as other");
                return ClassificationResult {
                    category: FALLBACK_CATEGORY.to_string(),
                    confidence: NO_DETECTION_CONFIDENCE,
                    reason: format!("image unreadable: {}", err),
                    method: ClassificationMethod::Fallback,
                    detections: Vec::new(),
                    id_card_detected: false,
                    used_models: Vec::new(),
                };
            }
        };

        // Screenshot check pre-empts all model inference.
        let (width, height) = meta
            .dimensions
            .unwrap_or_else(|| (image.width(), image.height()));
        let file_name = meta.file_name.as_deref().or_else(|| source.file_name());
        if is_screenshot(width, height, file_name) {
            let reason = if height > 0 && width as f32 / height as f32 <= 0.5 {
                format!("portrait aspect ratio {:.2}", width as f32 / height as f32)
            } else {
                "file name marks a screenshot".to_string()
            };
            tracing::debug!(width, height, ?file_name, "screenshot heuristic matched");
            return ClassificationResult {
                category: SCREENSHOT_CATEGORY.to_string(),
                confidence: SCREENSHOT_CONFIDENCE,
                reason,
                method: ClassificationMethod::MobileScreenshot,
                detections: Vec::new(),
                id_card_detected: false,
                used_models: Vec::new(),
            };
        }

        let mut used_models = Vec::new();
        let mut stage_notes: Vec<String> = Vec::new();

        // Stage 1: ID-card detector.
        used_models.push(ModelKind::IdCard);
        let id_detections = self
            .detector_stage(&self.id_card, &image, self.thresholds.id_card_confidence)
            .unwrap_or_else(|err| {
                tracing::warn!(model = %ModelKind::IdCard, error = %err, "stage degraded to zero detections");
                stage_notes.push(format!("id card stage failed: {}", err));
                Vec::new()
            });
        let id_hits: Vec<Detection> = id_detections
            .into_iter()
            .filter(|d| d.class_index <= 1)
            .collect();
        if !id_hits.is_empty() {
            let top = &id_hits[0];
            let reason = with_notes(
                format!("id card detected: {} ({:.2})", top.class_label, top.confidence),
                &stage_notes,
            );
            return self.resolved(
                id_hits,
                ClassificationMethod::SmartDetection,
                reason,
                true,
                used_models,
            );
        }

        // Stage 2: general object detector.
        used_models.push(ModelKind::GeneralDetector);
        let general_detections = self
            .detector_stage(&self.general, &image, self.thresholds.general_confidence)
            .unwrap_or_else(|err| {
                tracing::warn!(model = %ModelKind::GeneralDetector, error = %err, "stage degraded to zero detections");
                stage_notes.push(format!("general stage failed: {}", err));
                Vec::new()
            });
        if !general_detections.is_empty() {
            let top = &general_detections[0];
            let reason = with_notes(
                format!("objects detected: {} ({:.2})", top.class_label, top.confidence),
                &stage_notes,
            );
            return self.resolved(
                general_detections,
                ClassificationMethod::SmartDetection,
                reason,
                false,
                used_models,
            );
        }

        // Stage 3: fallback scene classifier.
        used_models.push(ModelKind::FallbackClassifier);
        let fallback_detections = self.fallback_stage(&image).unwrap_or_else(|err| {
            tracing::warn!(model = %ModelKind::FallbackClassifier, error = %err, "stage degraded to zero detections");
            stage_notes.push(format!("fallback stage failed: {}", err));
            Vec::new()
        });
        if !fallback_detections.is_empty() {
            let top = &fallback_detections[0];
            let reason = with_notes(
                format!(
                    "fallback classification: {} ({:.2})",
                    top.class_label, top.confidence
                ),
                &stage_notes,
            );
            return self.resolved(
                fallback_detections,
                ClassificationMethod::Fallback,
                reason,
                false,
                used_models,
            );
        }

        ClassificationResult {
            category: FALLBACK_CATEGORY.to_string(),
            confidence: NO_DETECTION_CONFIDENCE,
            reason: with_notes("no detections above thresholds".to_string(), &stage_notes),
            method: ClassificationMethod::NoDetection,
            detections: Vec::new(),
            id_card_detected: false,
            used_models,
        }
    }

    fn detector_stage(
        &self,
        descriptor: &ModelDescriptor,
        image: &DynamicImage,
        threshold: f32,
    ) -> Result<Vec<Detection>, EngineError> {
        let input = encode_letterbox(image, descriptor.input_size);
        let output = self.backend.run(descriptor.kind, input)?;
        let grid = decode_detection_output(&output);
        Ok(filter_detections(
            &grid,
            &descriptor.class_labels,
            threshold,
            self.thresholds.max_detections,
        ))
    }

    /// Run the classifier head: softmax over its logits, labels above
    /// the threshold become pseudo-detections spanning the whole crop.
    fn fallback_stage(&self, image: &DynamicImage) -> Result<Vec<Detection>, EngineError> {
        let size = self.fallback.input_size;
        let input = encode_center_crop(image, size);
        let output = self.backend.run(ModelKind::FallbackClassifier, input)?;

        let probabilities = softmax(&output.data);
        let full_image = [0.0, 0.0, size as f32, size as f32];

        let mut detections: Vec<Detection> = probabilities
            .iter()
            .enumerate()
            .filter(|(_, p)| **p > self.thresholds.fallback_confidence)
            .map(|(class_index, p)| Detection {
                class_label: self
                    .fallback
                    .class_labels
                    .get(class_index)
                    .cloned()
                    .unwrap_or_else(|| format!("class_{}", class_index)),
                confidence: *p,
                class_index,
                bounding_box: Some(full_image),
            })
            .collect();

        detections.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        detections.truncate(self.thresholds.max_detections);
        Ok(detections)
    }

    fn resolved(
        &self,
        detections: Vec<Detection>,
        method: ClassificationMethod,
        reason: String,
        id_card_detected: bool,
        used_models: Vec<ModelKind>,
    ) -> ClassificationResult {
        match resolve(&detections, &self.categories) {
            Some(winner) => {
                tracing::debug!(
                    category = %winner.category,
                    confidence = winner.confidence,
                    ?method,
                    "cascade resolved"
                );
                ClassificationResult {
                    category: winner.category,
                    confidence: winner.confidence,
                    reason,
                    method,
                    detections,
                    id_card_detected,
                    used_models,
                }
            }
            None => ClassificationResult {
                category: FALLBACK_CATEGORY.to_string(),
                confidence: NO_DETECTION_CONFIDENCE,
                reason,
                method: ClassificationMethod::NoDetection,
                detections: Vec::new(),
                id_card_detected,
                used_models,
            },
        }
    }
}

fn decode_image(source: &ImageSource) -> Result<DynamicImage, EngineError> {
    match source {
        ImageSource::Path(path) => image::open(path)
            .map_err(|e| EngineError::Preprocess(format!("{}: {}", path.display(), e))),
        ImageSource::Bytes(bytes) => image::load_from_memory(bytes)
            .map_err(|e| EngineError::Preprocess(e.to_string())),
        ImageSource::Pixels(image) => Ok(image.clone()),
    }
}

fn with_notes(reason: String, notes: &[String]) -> String {
    if notes.is_empty() {
        reason
    } else {
        format!("{} ({})", reason, notes.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array4;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    /// Backend double that records every call and serves canned
    /// outputs per model.
    struct MockBackend {
        calls: Mutex<Vec<ModelKind>>,
        unloads: Mutex<Vec<ModelKind>>,
        outputs: Mutex<HashMap<ModelKind, Result<ModelOutput, String>>>,
    }

    impl MockBackend {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                unloads: Mutex::new(Vec::new()),
                outputs: Mutex::new(HashMap::new()),
            }
        }

        fn set_output(&self, kind: ModelKind, output: ModelOutput) {
            self.outputs.lock().unwrap().insert(kind, Ok(output));
        }

        fn set_failure(&self, kind: ModelKind, message: &str) {
            self.outputs
                .lock()
                .unwrap()
                .insert(kind, Err(message.to_string()));
        }

        fn calls(&self) -> Vec<ModelKind> {
            self.calls.lock().unwrap().clone()
        }

        fn unloads(&self) -> Vec<ModelKind> {
            self.unloads.lock().unwrap().clone()
        }

        fn empty_output(kind: ModelKind) -> ModelOutput {
            match kind {
                ModelKind::IdCard => ModelOutput {
                    shape: vec![1, 6, 0],
                    data: Vec::new(),
                },
                ModelKind::GeneralDetector => ModelOutput {
                    shape: vec![1, 84, 0],
                    data: Vec::new(),
                },
                ModelKind::FallbackClassifier => ModelOutput {
                    shape: vec![1, SCENE_LABELS.len()],
                    data: vec![0.0; SCENE_LABELS.len()],
                },
            }
        }
    }

    impl InferenceBackend for Arc<MockBackend> {
        fn run(&self, kind: ModelKind, _input: Array4<f32>) -> Result<ModelOutput, EngineError> {
            self.calls.lock().unwrap().push(kind);
            match self.outputs.lock().unwrap().get(&kind) {
                Some(Ok(output)) => Ok(output.clone()),
                Some(Err(message)) => Err(EngineError::Inference(message.clone())),
                None => Ok(MockBackend::empty_output(kind)),
            }
        }

        fn unload(&self, kind: ModelKind) {
            self.unloads.lock().unwrap().push(kind);
        }

        fn status(&self) -> Vec<ModelStatus> {
            ModelKind::CASCADE
                .iter()
                .map(|&kind| ModelStatus {
                    kind,
                    loaded: false,
                })
                .collect()
        }
    }

    fn engine() -> (CascadeClassifier, Arc<MockBackend>) {
        let mock = Arc::new(MockBackend::new());
        let classifier =
            CascadeClassifier::with_backend(&EngineConfig::default(), Box::new(Arc::clone(&mock)))
                .unwrap();
        (classifier, mock)
    }

    /// Feature-major detector output: `channels` x one box per
    /// `(class_index, confidence)` pair, plausible geometry filled in.
    fn detector_output(channels: usize, boxes: &[(usize, f32)]) -> ModelOutput {
        let num_boxes = boxes.len();
        let mut data = vec![0.0f32; channels * num_boxes];
        for (box_index, (class_index, confidence)) in boxes.iter().enumerate() {
            data[box_index] = 320.0;
            data[num_boxes + box_index] = 320.0;
            data[2 * num_boxes + box_index] = 80.0;
            data[3 * num_boxes + box_index] = 60.0;
            data[(4 + class_index) * num_boxes + box_index] = *confidence;
        }
        ModelOutput {
            shape: vec![1, channels, num_boxes],
            data,
        }
    }

    /// Classifier logits with one hot class.
    fn classifier_output(hot_index: usize, logit: f32) -> ModelOutput {
        let mut data = vec![0.0f32; SCENE_LABELS.len()];
        data[hot_index] = logit;
        ModelOutput {
            shape: vec![1, SCENE_LABELS.len()],
            data,
        }
    }

    fn photo(width: u32, height: u32) -> ImageSource {
        ImageSource::Pixels(DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
            width,
            height,
            image::Rgb([120, 130, 140]),
        )))
    }

    fn named(file_name: &str) -> ImageMeta {
        ImageMeta {
            file_name: Some(file_name.to_string()),
            ..ImageMeta::default()
        }
    }

    fn assert_cascade_prefix(used: &[ModelKind]) {
        assert!(used.len() <= ModelKind::CASCADE.len());
        assert_eq!(used, &ModelKind::CASCADE[..used.len()]);
    }

    #[test]
    fn screenshot_by_shape_preempts_all_models() {
        let (classifier, mock) = engine();
        let result = classifier.classify(
            &photo(1080, 2400),
            &named("Screenshot_2024.png"),
            &ClassifyOptions::default(),
        );

        assert_eq!(result.category, "screenshot");
        assert_eq!(result.method, ClassificationMethod::MobileScreenshot);
        assert!((result.confidence - 0.9).abs() < 1e-6);
        assert!(result.detections.is_empty());
        assert!(result.used_models.is_empty());
        assert!(mock.calls().is_empty());
    }

    #[test]
    fn screenshot_by_name_preempts_all_models() {
        let (classifier, mock) = engine();
        let result = classifier.classify(
            &photo(1920, 1080),
            &named("Screenshot_login.png"),
            &ClassifyOptions::default(),
        );

        assert_eq!(result.method, ClassificationMethod::MobileScreenshot);
        assert!(mock.calls().is_empty());
    }

    #[test]
    fn metadata_dimensions_override_decoded_size() {
        let (classifier, mock) = engine();
        let meta = ImageMeta {
            dimensions: Some((1080, 2400)),
            ..ImageMeta::default()
        };
        let result = classifier.classify(&photo(100, 100), &meta, &ClassifyOptions::default());
        assert_eq!(result.method, ClassificationMethod::MobileScreenshot);
        assert!(mock.calls().is_empty());
    }

    #[test]
    fn general_detection_maps_dog_to_pet() {
        // Scenario: landscape photo, no ID card, general detector sees
        // a dog at 0.82.
        let (classifier, mock) = engine();
        mock.set_output(ModelKind::IdCard, detector_output(6, &[(0, 0.2)]));
        mock.set_output(ModelKind::GeneralDetector, detector_output(84, &[(16, 0.82)]));

        let result = classifier.classify(
            &photo(1920, 1080),
            &named("IMG_001.jpg"),
            &ClassifyOptions::default(),
        );

        assert_eq!(result.category, "pet");
        assert_eq!(result.method, ClassificationMethod::SmartDetection);
        assert!(!result.id_card_detected);
        assert_eq!(
            result.used_models,
            vec![ModelKind::IdCard, ModelKind::GeneralDetector]
        );
        assert_eq!(
            mock.calls(),
            vec![ModelKind::IdCard, ModelKind::GeneralDetector]
        );
        assert_cascade_prefix(&result.used_models);
    }

    #[test]
    fn id_card_hit_short_circuits_the_cascade() {
        let (classifier, mock) = engine();
        mock.set_output(ModelKind::IdCard, detector_output(6, &[(0, 0.75)]));

        let result = classifier.classify(
            &photo(1920, 1080),
            &named("IMG_002.jpg"),
            &ClassifyOptions::default(),
        );

        assert!(result.id_card_detected);
        assert_eq!(result.category, "id_card");
        assert_eq!(result.method, ClassificationMethod::SmartDetection);
        assert_eq!(result.used_models, vec![ModelKind::IdCard]);
        assert_eq!(mock.calls(), vec![ModelKind::IdCard]);
        assert_cascade_prefix(&result.used_models);
    }

    #[test]
    fn fallback_classifier_decides_when_detectors_find_nothing() {
        let (classifier, mock) = engine();
        // Logit 3.0 against 35 zeros puts "mountain" at ~0.36 after
        // softmax, above the 0.3 default threshold.
        mock.set_output(ModelKind::FallbackClassifier, classifier_output(0, 3.0));

        let result = classifier.classify(
            &photo(1920, 1080),
            &named("IMG_003.jpg"),
            &ClassifyOptions::default(),
        );

        assert_eq!(result.method, ClassificationMethod::Fallback);
        assert_eq!(result.category, "travel");
        assert_eq!(result.used_models, ModelKind::CASCADE.to_vec());
        assert!(!result.detections.is_empty());
        assert_eq!(result.detections[0].class_label, "mountain");
        assert!(result.detections[0].bounding_box.is_some());
        assert_cascade_prefix(&result.used_models);
    }

    #[test]
    fn empty_cascade_yields_no_detection_result() {
        let (classifier, _mock) = engine();
        let result = classifier.classify(
            &photo(1920, 1080),
            &named("IMG_004.jpg"),
            &ClassifyOptions::default(),
        );

        assert_eq!(result.category, "other");
        assert!((result.confidence - 0.5).abs() < 1e-6);
        assert_eq!(result.method, ClassificationMethod::NoDetection);
        assert!(result.detections.is_empty());
        assert_eq!(result.used_models, ModelKind::CASCADE.to_vec());
    }

    #[test]
    fn stage_failure_degrades_and_cascade_continues() {
        let (classifier, mock) = engine();
        mock.set_failure(ModelKind::IdCard, "native crash");
        mock.set_output(ModelKind::GeneralDetector, detector_output(84, &[(16, 0.82)]));

        let result = classifier.classify(
            &photo(1920, 1080),
            &named("IMG_005.jpg"),
            &ClassifyOptions::default(),
        );

        assert_eq!(result.category, "pet");
        assert!(result.reason.contains("id card stage failed"));
        assert_eq!(
            result.used_models,
            vec![ModelKind::IdCard, ModelKind::GeneralDetector]
        );
    }

    #[test]
    fn unreadable_image_files_as_other() {
        let (classifier, mock) = engine();
        let result = classifier.classify(
            &ImageSource::Bytes(vec![0x00, 0x01, 0x02]),
            &ImageMeta::default(),
            &ClassifyOptions::default(),
        );

        assert_eq!(result.category, "other");
        assert!((result.confidence - 0.5).abs() < 1e-6);
        assert_eq!(result.method, ClassificationMethod::Fallback);
        assert!(mock.calls().is_empty());
    }

    #[test]
    fn unload_option_releases_every_model() {
        let (classifier, mock) = engine();
        let options = ClassifyOptions {
            unload_after_classification: true,
        };
        classifier.classify(&photo(1920, 1080), &named("IMG_006.jpg"), &options);
        assert_eq!(mock.unloads(), ModelKind::CASCADE.to_vec());
    }

    #[test]
    fn batch_preserves_order_and_survives_bad_images() {
        let (classifier, mock) = engine();
        mock.set_output(ModelKind::GeneralDetector, detector_output(84, &[(0, 0.9)]));

        let items = vec![
            (photo(1920, 1080), named("a.jpg")),
            (ImageSource::Bytes(vec![0xff]), ImageMeta::default()),
            (photo(1080, 2400), named("b.png")),
        ];
        let results = classifier.classify_batch(&items, &ClassifyOptions::default());

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].category, "people");
        assert_eq!(results[1].category, "other");
        assert_eq!(results[1].method, ClassificationMethod::Fallback);
        assert_eq!(results[2].category, "screenshot");
    }
}
