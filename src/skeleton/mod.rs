//! Skeletons handed to rendering and retargeting consumers.
//!
//! A skeleton is built from one surviving detection. It has no identity
//! across frames.

pub mod coco;

use crate::decode::{Detection, Keypoint};

/// Joints at or below this confidence are not drawn.
pub const JOINT_DRAW_THRESHOLD: f32 = 0.5;

/// Joint position in target image coordinates plus its confidence.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Joint {
    /// Horizontal position.
    pub x: f32,
    /// Vertical position.
    pub y: f32,
    /// Per-joint confidence.
    pub confidence: f32,
}

impl Joint {
    /// Whether a renderer should draw this joint.
    pub fn is_drawable(&self) -> bool {
        self.confidence > JOINT_DRAW_THRESHOLD
    }

    /// Joint as a plain 3-vector; the third component is confidence, not depth.
    pub fn to_array(&self) -> [f32; 3] {
        [self.x, self.y, self.confidence]
    }
}

impl From<Keypoint> for Joint {
    fn from(kp: Keypoint) -> Self {
        Self {
            x: kp.x,
            y: kp.y,
            confidence: kp.confidence,
        }
    }
}

/// Ordered joints of one detected person.
#[derive(Clone, Debug, PartialEq)]
pub struct Skeleton {
    joints: Vec<Joint>,
    confidence: f32,
}

impl Skeleton {
    /// Builds a skeleton from a decoded detection.
    pub fn from_detection(detection: &Detection) -> Self {
        Self {
            joints: detection.keypoints.iter().copied().map(Joint::from).collect(),
            confidence: detection.confidence,
        }
    }

    /// Joints in keypoint order.
    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    /// Returns the joint at `index`, if present.
    pub fn joint(&self, index: usize) -> Option<&Joint> {
        self.joints.get(index)
    }

    /// Detection-level confidence.
    pub fn confidence(&self) -> f32 {
        self.confidence
    }

    /// Bones from `edges` whose two endpoints are both drawable.
    ///
    /// Edges referencing missing joints are skipped.
    pub fn drawable_bones<'a>(
        &'a self,
        edges: &'a [(usize, usize)],
    ) -> impl Iterator<Item = (&'a Joint, &'a Joint)> + 'a {
        edges.iter().filter_map(move |&(a, b)| {
            let ja = self.joints.get(a)?;
            let jb = self.joints.get(b)?;
            (ja.is_drawable() && jb.is_drawable()).then_some((ja, jb))
        })
    }

    /// Component-wise mean of the selected joints.
    ///
    /// Returns `None` for an empty selection or an out-of-range index.
    pub fn average_joints(&self, indices: &[usize]) -> Option<[f32; 3]> {
        if indices.is_empty() {
            return None;
        }
        let mut sum = [0.0f32; 3];
        for &idx in indices {
            let v = self.joints.get(idx)?.to_array();
            sum[0] += v[0];
            sum[1] += v[1];
            sum[2] += v[2];
        }
        let n = indices.len() as f32;
        Some([sum[0] / n, sum[1] / n, sum[2] / n])
    }
}

/// Picks the skeleton for this cycle from suppressed detections.
///
/// Takes the first detection, which is the most confident after suppression.
/// `None` means no skeleton this cycle.
pub fn select_skeleton(detections: &[Detection]) -> Option<Skeleton> {
    detections.first().map(Skeleton::from_detection)
}
