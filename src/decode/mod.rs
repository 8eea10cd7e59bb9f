//! Decoding of raw pose-network output into candidate detections.
//!
//! The network emits a flat `f32` buffer of fixed-stride anchor records:
//! `cx, cy, w, h, confidence` followed by `(x, y, confidence)` for each
//! keypoint. Decoding filters anchors by confidence, rescales coordinates into
//! the target image once, and converts boxes to corner form. Results keep
//! anchor order; ranking is left to suppression.

use crate::geometry::BoundingBox;
use crate::trace::{enter_span, trace_count};
use crate::util::math::anchor_stride;
use crate::util::{PoseError, PoseResult};

#[cfg(feature = "rayon")]
pub mod rayon;
pub mod yolo;

pub use yolo::YoloPoseParser;

/// One keypoint in target image coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Keypoint {
    /// Horizontal position.
    pub x: f32,
    /// Vertical position.
    pub y: f32,
    /// Per-keypoint confidence as emitted by the network.
    pub confidence: f32,
}

impl Keypoint {
    /// Creates a keypoint.
    pub fn new(x: f32, y: f32, confidence: f32) -> Self {
        Self { x, y, confidence }
    }
}

/// A decoded pose candidate.
#[derive(Clone, Debug, PartialEq)]
pub struct Detection {
    /// Person bounding box in corner form.
    pub bbox: BoundingBox,
    /// Detection-level confidence.
    pub confidence: f32,
    /// Keypoints in anchor order, one per configured keypoint.
    pub keypoints: Vec<Keypoint>,
}

/// Convention used by the network for its output coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoordinateKind {
    /// Coordinates are fractions of the input frame in `[0, 1]`.
    Normalized01,
    /// Coordinates are pixels of the square model input.
    ModelInputPixels,
}

/// Source convention plus target image size.
///
/// Resolved once per decode into a per-axis scale; decoded detections are in
/// target pixels and are never rescaled again.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoordinateSpace {
    /// Output convention of the network.
    pub kind: CoordinateKind,
    /// Side length of the square model input, in pixels.
    pub model_input_size: f32,
    /// Target image width.
    pub image_width: f32,
    /// Target image height.
    pub image_height: f32,
}

impl CoordinateSpace {
    /// Normalized network output mapped onto a `image_width` x `image_height` image.
    pub fn normalized(image_width: f32, image_height: f32) -> Self {
        Self {
            kind: CoordinateKind::Normalized01,
            model_input_size: 1.0,
            image_width,
            image_height,
        }
    }

    /// Model-input pixel output mapped onto a `image_width` x `image_height` image.
    pub fn model_input(model_input_size: f32, image_width: f32, image_height: f32) -> Self {
        Self {
            kind: CoordinateKind::ModelInputPixels,
            model_input_size,
            image_width,
            image_height,
        }
    }

    /// Returns the `(x, y)` scale factors applied to raw coordinates.
    pub fn scale(&self) -> (f32, f32) {
        match self.kind {
            CoordinateKind::Normalized01 => (self.image_width, self.image_height),
            CoordinateKind::ModelInputPixels => (
                self.image_width / self.model_input_size,
                self.image_height / self.model_input_size,
            ),
        }
    }
}

impl Default for CoordinateSpace {
    fn default() -> Self {
        Self::model_input(640.0, 640.0, 640.0)
    }
}

/// A strategy that turns a raw output buffer into candidate detections.
pub trait PoseParser {
    /// Keypoints carried by each detection.
    fn num_keypoints(&self) -> usize;

    /// Decodes `buffer` into candidates in anchor order.
    fn parse(&self, buffer: &[f32]) -> PoseResult<Vec<Detection>>;
}

/// Returns the anchor stride for `num_keypoints`, rejecting empty layouts.
pub(crate) fn checked_stride(num_keypoints: usize) -> PoseResult<usize> {
    match anchor_stride(num_keypoints) {
        Some(stride) if num_keypoints > 0 => Ok(stride),
        other => Err(PoseError::InvalidBufferShape {
            num_keypoints,
            stride: other.unwrap_or(0),
        }),
    }
}

/// Decodes a single anchor record.
///
/// Returns `None` if the record is shorter than one stride or its confidence
/// is below `confidence_threshold`; keypoints of rejected anchors are not read.
pub fn decode_anchor(
    record: &[f32],
    num_keypoints: usize,
    confidence_threshold: f32,
    scale: (f32, f32),
) -> Option<Detection> {
    let stride = anchor_stride(num_keypoints)?;
    let record = record.get(..stride)?;

    let confidence = record[4];
    if confidence < confidence_threshold {
        return None;
    }

    let (sx, sy) = scale;
    let bbox = BoundingBox::from_center(
        record[0] * sx,
        record[1] * sy,
        record[2] * sx,
        record[3] * sy,
    );
    let keypoints = record[5..]
        .chunks_exact(3)
        .map(|kp| Keypoint::new(kp[0] * sx, kp[1] * sy, kp[2]))
        .collect();

    Some(Detection {
        bbox,
        confidence,
        keypoints,
    })
}

/// Decodes every complete anchor in `buffer`.
///
/// A trailing partial record is ignored. Fails with
/// [`PoseError::InvalidBufferShape`] when `num_keypoints` is zero; an empty
/// result is not an error.
pub fn decode(
    buffer: &[f32],
    num_keypoints: usize,
    confidence_threshold: f32,
    space: CoordinateSpace,
) -> PoseResult<Vec<Detection>> {
    let stride = checked_stride(num_keypoints)?;
    let scale = space.scale();
    let _span = enter_span!("decode", anchors = buffer.len() / stride, stride = stride);

    let detections: Vec<Detection> = buffer
        .chunks_exact(stride)
        .filter_map(|record| decode_anchor(record, num_keypoints, confidence_threshold, scale))
        .collect();

    trace_count!("decode", detections.len());
    Ok(detections)
}
