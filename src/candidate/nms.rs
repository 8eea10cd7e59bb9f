//! Non-maximum suppression for pose detections.

use std::cmp::Ordering;

use crate::decode::Detection;
use crate::geometry::iou;
use crate::trace::{enter_span, trace_count};

/// Descending confidence with `-0.0 == 0.0`; NaN stays totally ordered.
fn confidence_cmp_desc(a: &Detection, b: &Detection) -> Ordering {
    (b.confidence + 0.0).total_cmp(&(a.confidence + 0.0))
}

/// Returns the input positions of the detections that survive suppression.
///
/// Positions are ordered by descending confidence; equal confidences keep
/// their input order. Each survivor removes every later, not yet removed
/// candidate whose IoU with the survivor's own box exceeds `iou_threshold`.
pub fn suppress_indices(detections: &[Detection], iou_threshold: f32) -> Vec<usize> {
    let mut order: Vec<usize> = (0..detections.len()).collect();
    // sort_by is stable
    order.sort_by(|&a, &b| confidence_cmp_desc(&detections[a], &detections[b]));

    let mut removed = vec![false; order.len()];
    let mut kept = Vec::new();
    for pos in 0..order.len() {
        if removed[pos] {
            continue;
        }
        let survivor = &detections[order[pos]].bbox;
        kept.push(order[pos]);

        for later in pos + 1..order.len() {
            if removed[later] {
                continue;
            }
            if iou(survivor, &detections[order[later]].bbox) > iou_threshold {
                removed[later] = true;
            }
        }
    }

    kept
}

/// Removes redundant overlapping detections.
///
/// Returns survivors in descending confidence order. The threshold is used
/// as given; an empty input yields an empty output.
pub fn suppress(detections: Vec<Detection>, iou_threshold: f32) -> Vec<Detection> {
    let _span = enter_span!("suppress", candidates = detections.len());

    let kept = suppress_indices(&detections, iou_threshold);
    let mut slots: Vec<Option<Detection>> = detections.into_iter().map(Some).collect();
    let out: Vec<Detection> = kept.into_iter().filter_map(|idx| slots[idx].take()).collect();

    trace_count!("suppress", out.len());
    out
}

#[cfg(test)]
mod tests {
    use super::{suppress, suppress_indices};
    use crate::decode::Detection;
    use crate::geometry::BoundingBox;

    fn det(x: f32, y: f32, size: f32, confidence: f32) -> Detection {
        Detection {
            bbox: BoundingBox::new(x, y, size, size),
            confidence,
            keypoints: Vec::new(),
        }
    }

    #[test]
    fn survivors_suppress_only_against_their_own_box() {
        // b is removed by a; c overlaps b past the threshold but a only at 0.43.
        let a = det(0.0, 0.0, 10.0, 0.9);
        let b = det(2.0, 0.0, 10.0, 0.8);
        let c = det(4.0, 0.0, 10.0, 0.7);
        let kept = suppress_indices(&[a, b, c], 0.5);
        assert_eq!(kept, vec![0, 2]);
    }

    #[test]
    fn equal_confidence_keeps_input_order() {
        let dets = vec![
            det(0.0, 0.0, 10.0, 0.5),
            det(100.0, 0.0, 10.0, 0.5),
            det(200.0, 0.0, 10.0, 0.5),
        ];
        assert_eq!(suppress_indices(&dets, 0.5), vec![0, 1, 2]);
    }

    #[test]
    fn signed_zero_confidences_tie_in_input_order() {
        let kept = suppress(vec![det(0.0, 0.0, 10.0, -0.0), det(1.0, 0.0, 10.0, 0.0)], 0.45);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].bbox.x, 0.0);

        let kept = suppress(vec![det(1.0, 0.0, 10.0, 0.0), det(0.0, 0.0, 10.0, -0.0)], 0.45);
        assert_eq!(kept[0].bbox.x, 1.0);
    }

    #[test]
    fn nan_confidence_ranks_first() {
        let dets = vec![det(0.0, 0.0, 10.0, 0.9), det(1.0, 0.0, 10.0, f32::NAN)];
        let kept = suppress(dets, 0.45);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].bbox.x, 1.0);
        assert!(kept[0].confidence.is_nan());
    }

    #[test]
    fn threshold_comparison_is_strict() {
        let a = det(0.0, 0.0, 10.0, 0.9);
        let b = det(0.0, 0.0, 10.0, 0.8);
        // IoU == 1.0 is not greater than 1.0.
        assert_eq!(suppress(vec![a, b], 1.0).len(), 2);
    }
}
