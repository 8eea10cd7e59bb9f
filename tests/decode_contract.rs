use posedecode::{decode, CoordinateSpace, PoseError};

/// Builds one anchor record with `num_keypoints` keypoints at `(kx, ky, kc)`.
fn anchor(bbox: [f32; 4], conf: f32, keypoints: &[(f32, f32, f32)]) -> Vec<f32> {
    let mut record = vec![bbox[0], bbox[1], bbox[2], bbox[3], conf];
    for &(kx, ky, kc) in keypoints {
        record.extend_from_slice(&[kx, ky, kc]);
    }
    record
}

fn unit_space() -> CoordinateSpace {
    CoordinateSpace::model_input(640.0, 640.0, 640.0)
}

#[test]
fn buffer_shorter_than_one_stride_is_empty() {
    let buffer = [0.5f32; 7];
    let detections = decode(&buffer, 1, 0.0, unit_space()).unwrap();
    assert!(detections.is_empty());

    let detections = decode(&[], 17, 0.5, unit_space()).unwrap();
    assert!(detections.is_empty());
}

#[test]
fn zero_keypoints_is_invalid_shape() {
    let err = decode(&[0.0; 10], 0, 0.5, unit_space()).unwrap_err();
    assert_eq!(
        err,
        PoseError::InvalidBufferShape {
            num_keypoints: 0,
            stride: 5,
        }
    );
}

#[test]
fn trailing_partial_record_is_ignored() {
    let mut buffer = anchor([10.0, 10.0, 4.0, 4.0], 0.9, &[(1.0, 1.0, 1.0)]);
    // Partial second anchor with a high confidence value in position 4.
    buffer.extend_from_slice(&[20.0, 20.0, 4.0, 4.0, 0.99, 1.0]);
    let detections = decode(&buffer, 1, 0.5, unit_space()).unwrap();
    assert_eq!(detections.len(), 1);
    assert_eq!(detections[0].confidence, 0.9);
}

#[test]
fn below_threshold_anchors_never_appear() {
    let mut buffer = Vec::new();
    let confidences = [0.1f32, 0.49, 0.5, 0.8, 0.3];
    for (idx, &conf) in confidences.iter().enumerate() {
        let cx = 10.0 + idx as f32 * 100.0;
        buffer.extend(anchor([cx, 10.0, 8.0, 8.0], conf, &[(cx, 10.0, 0.9)]));
    }
    let detections = decode(&buffer, 1, 0.5, unit_space()).unwrap();
    let kept: Vec<f32> = detections.iter().map(|d| d.confidence).collect();
    assert_eq!(kept, vec![0.5, 0.8]);
    assert!(detections.iter().all(|d| d.confidence >= 0.5));
}

#[test]
fn output_keeps_anchor_order() {
    let mut buffer = anchor([10.0, 10.0, 8.0, 8.0], 0.6, &[(0.0, 0.0, 0.0)]);
    buffer.extend(anchor([200.0, 10.0, 8.0, 8.0], 0.95, &[(0.0, 0.0, 0.0)]));
    buffer.extend(anchor([400.0, 10.0, 8.0, 8.0], 0.7, &[(0.0, 0.0, 0.0)]));
    let detections = decode(&buffer, 1, 0.5, unit_space()).unwrap();
    let order: Vec<f32> = detections.iter().map(|d| d.confidence).collect();
    assert_eq!(order, vec![0.6, 0.95, 0.7]);
}

#[test]
fn normalized_keypoint_maps_to_image_pixels() {
    let buffer = anchor([0.5, 0.5, 0.25, 0.5], 0.9, &[(0.5, 0.5, 0.7)]);
    let space = CoordinateSpace::normalized(640.0, 480.0);
    let detections = decode(&buffer, 1, 0.5, space).unwrap();
    let det = &detections[0];

    assert_eq!(det.keypoints[0].x, 320.0);
    assert_eq!(det.keypoints[0].y, 240.0);
    assert_eq!(det.keypoints[0].confidence, 0.7);
    assert_eq!(det.bbox.width, 160.0);
    assert_eq!(det.bbox.height, 240.0);
    assert_eq!(det.bbox.x, 240.0);
    assert_eq!(det.bbox.y, 120.0);
}

#[test]
fn model_input_pixels_rescale_to_target_image() {
    let buffer = anchor([320.0, 320.0, 64.0, 64.0], 0.9, &[(160.0, 480.0, 0.4)]);
    let space = CoordinateSpace::model_input(640.0, 1280.0, 320.0);
    let det = &decode(&buffer, 1, 0.5, space).unwrap()[0];

    // x scale 2.0, y scale 0.5
    assert_eq!(det.bbox.x, 640.0 - 64.0);
    assert_eq!(det.bbox.y, 160.0 - 16.0);
    assert_eq!(det.bbox.width, 128.0);
    assert_eq!(det.bbox.height, 32.0);
    assert_eq!(det.keypoints[0].x, 320.0);
    assert_eq!(det.keypoints[0].y, 240.0);
    assert_eq!(det.keypoints[0].confidence, 0.4);
}

#[test]
fn every_detection_carries_all_keypoints() {
    let keypoints: Vec<(f32, f32, f32)> = (0..17).map(|i| (i as f32, i as f32, 0.9)).collect();
    let mut buffer = anchor([100.0, 100.0, 50.0, 50.0], 0.9, &keypoints);
    buffer.extend(anchor([300.0, 100.0, 50.0, 50.0], 0.8, &keypoints));
    let detections = decode(&buffer, 17, 0.5, unit_space()).unwrap();
    assert_eq!(detections.len(), 2);
    for det in &detections {
        assert_eq!(det.keypoints.len(), 17);
        assert_eq!(det.keypoints[16].x, 16.0);
    }
}
