//! Bitmap to tensor conversion and raw detector output decoding.
//!
//! Two encoders feed the models: letterbox for the detection models,
//! center-crop for the fallback classifier. Both normalize pixels to
//! `[0,1]` and reorder interleaved RGB into planar CHW, producing
//! `[1, 3, size, size]` tensors.

use super::runtime::ModelOutput;
use image::DynamicImage;
use ndarray::{Array3, Array4, Axis};

/// Letterbox target used by both detection models.
pub const DETECTOR_INPUT_SIZE: u32 = 640;

/// Center-crop target used by the fallback classifier.
pub const CLASSIFIER_INPUT_SIZE: u32 = 224;

/// Channel count of the binary ID-card detection head (4 + 2 classes).
const ID_CARD_CHANNELS: usize = 6;

/// Channel count of the 80-class general detection head (4 + 80).
const GENERAL_CHANNELS: usize = 84;

/// Scale so the longer side fits `target`, center on a black square
/// canvas, normalize, planarize.
pub fn encode_letterbox(image: &DynamicImage, target: u32) -> Array4<f32> {
    let (orig_w, orig_h) = (image.width().max(1), image.height().max(1));

    let scale = (target as f32 / orig_w as f32).min(target as f32 / orig_h as f32);
    let new_w = ((orig_w as f32 * scale).round() as u32).clamp(1, target);
    let new_h = ((orig_h as f32 * scale).round() as u32).clamp(1, target);

    let resized = image
        .resize_exact(new_w, new_h, image::imageops::FilterType::Triangle)
        .to_rgb8();

    let offset_x = ((target - new_w) / 2) as usize;
    let offset_y = ((target - new_h) / 2) as usize;

    // Black padding around the scaled image.
    let mut canvas = Array3::<f32>::zeros((3, target as usize, target as usize));
    fill_planar(&mut canvas, &resized, offset_x, offset_y);

    canvas.insert_axis(Axis(0))
}

/// Scale so the shorter side fills `target` (cover), crop the centered
/// square, normalize, planarize.
pub fn encode_center_crop(image: &DynamicImage, target: u32) -> Array4<f32> {
    let (orig_w, orig_h) = (image.width().max(1), image.height().max(1));

    let scale = (target as f32 / orig_w as f32).max(target as f32 / orig_h as f32);
    let new_w = ((orig_w as f32 * scale).round() as u32).max(target);
    let new_h = ((orig_h as f32 * scale).round() as u32).max(target);

    let resized = image
        .resize_exact(new_w, new_h, image::imageops::FilterType::Triangle)
        .to_rgb8();

    let crop_x = (new_w - target) / 2;
    let crop_y = (new_h - target) / 2;
    let cropped = image::imageops::crop_imm(&resized, crop_x, crop_y, target, target).to_image();

    let mut canvas = Array3::<f32>::zeros((3, target as usize, target as usize));
    fill_planar(&mut canvas, &cropped, 0, 0);

    canvas.insert_axis(Axis(0))
}

/// Copy interleaved RGB pixels into a planar CHW canvas, scaling each
/// channel into `[0,1]`.
fn fill_planar(
    canvas: &mut Array3<f32>,
    rgb: &image::RgbImage,
    offset_x: usize,
    offset_y: usize,
) {
    let width = rgb.width() as usize;
    let height = rgb.height() as usize;
    let raw = rgb.as_raw();

    for y in 0..height {
        for x in 0..width {
            let src = (y * width + x) * 3;
            canvas[[0, offset_y + y, offset_x + x]] = raw[src] as f32 / 255.0;
            canvas[[1, offset_y + y, offset_x + x]] = raw[src + 1] as f32 / 255.0;
            canvas[[2, offset_y + y, offset_x + x]] = raw[src + 2] as f32 / 255.0;
        }
    }
}

/// Decoded view over a feature-major detector output.
///
/// The raw tensor is `[1, 4 + num_classes, num_boxes]` with each
/// channel stored as one contiguous run of per-box values. The grid
/// keeps that layout and exposes per-box accessors; validity decisions
/// belong to the postprocessor.
#[derive(Clone, Debug)]
pub struct DetectionGrid {
    num_boxes: usize,
    num_classes: usize,
    data: Vec<f32>,
}

impl DetectionGrid {
    /// Grid with no boxes, used for unsupported output layouts.
    pub fn empty() -> Self {
        Self {
            num_boxes: 0,
            num_classes: 0,
            data: Vec::new(),
        }
    }

    pub fn num_boxes(&self) -> usize {
        self.num_boxes
    }

    pub fn num_classes(&self) -> usize {
        self.num_classes
    }

    pub fn is_empty(&self) -> bool {
        self.num_boxes == 0
    }

    /// Score of class `class_index` for box `box_index`.
    pub fn class_score(&self, box_index: usize, class_index: usize) -> f32 {
        self.data[(4 + class_index) * self.num_boxes + box_index]
    }

    /// Box geometry in model input coordinates, converted from the
    /// center-x/center-y/width/height channels to `[x, y, w, h]`.
    pub fn bounding_box(&self, box_index: usize) -> [f32; 4] {
        let cx = self.data[box_index];
        let cy = self.data[self.num_boxes + box_index];
        let w = self.data[2 * self.num_boxes + box_index];
        let h = self.data[3 * self.num_boxes + box_index];
        [cx - w / 2.0, cy - h / 2.0, w, h]
    }
}

/// Decode a raw detector output into a [`DetectionGrid`].
///
/// Only the two known heads are accepted: 6 channels (binary ID-card
/// model) and 84 channels (80-class general model). Any other channel
/// count yields zero detections.
pub fn decode_detection_output(output: &ModelOutput) -> DetectionGrid {
    if output.shape.len() != 3 || output.shape[0] != 1 {
        tracing::warn!(shape = ?output.shape, "unexpected detector output shape");
        return DetectionGrid::empty();
    }

    let channels = output.shape[1];
    let num_boxes = output.shape[2];

    if channels != ID_CARD_CHANNELS && channels != GENERAL_CHANNELS {
        tracing::warn!(channels, "unsupported detector channel count");
        return DetectionGrid::empty();
    }

    if output.data.len() != channels * num_boxes {
        tracing::warn!(
            expected = channels * num_boxes,
            actual = output.data.len(),
            "detector output length does not match its shape"
        );
        return DetectionGrid::empty();
    }

    DetectionGrid {
        num_boxes,
        num_classes: channels - 4,
        data: output.data.clone(),
    }
}
