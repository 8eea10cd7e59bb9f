//! Rayon-parallel anchor decoding (feature-gated).
//!
//! Anchors are independent, so records are decoded across threads and
//! collected back in anchor order.

use crate::decode::{checked_stride, decode_anchor, CoordinateSpace, Detection};
use crate::trace::{enter_span, trace_count};
use crate::util::PoseResult;
use rayon::prelude::*;

/// Parallel counterpart of [`crate::decode::decode`] with identical output.
pub fn decode_par(
    buffer: &[f32],
    num_keypoints: usize,
    confidence_threshold: f32,
    space: CoordinateSpace,
) -> PoseResult<Vec<Detection>> {
    let stride = checked_stride(num_keypoints)?;
    let scale = space.scale();
    let _span = enter_span!("decode_par", anchors = buffer.len() / stride, stride = stride);

    // collect preserves anchor order.
    let detections: Vec<Detection> = buffer
        .par_chunks_exact(stride)
        .filter_map(|record| decode_anchor(record, num_keypoints, confidence_threshold, scale))
        .collect();

    trace_count!("decode", detections.len());
    Ok(detections)
}
