//! Numeric helpers shared by the decoder and the pipeline.

/// Number of values per anchor record for `num_keypoints` keypoints.
///
/// Four box fields, one confidence, then `(x, y, confidence)` per keypoint.
/// Returns `None` on overflow.
pub(crate) fn anchor_stride(num_keypoints: usize) -> Option<usize> {
    num_keypoints.checked_mul(3)?.checked_add(5)
}

/// Returns true if `value` is finite and strictly positive.
pub(crate) fn is_positive_finite(value: f32) -> bool {
    value.is_finite() && value > 0.0
}
