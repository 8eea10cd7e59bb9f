//! posedecode turns raw YOLO-style pose network output into skeletons.
//!
//! The crate decodes fixed-stride anchor records into detections in target
//! image coordinates, removes overlapping candidates with greedy IoU
//! non-maximum suppression, and selects the most confident skeleton. Decoding
//! can run across threads via the `rayon` feature; the `tracing` feature emits
//! spans around decode and suppression.

mod candidate;
pub mod decode;
pub mod geometry;
pub mod lowlevel;
pub mod pipeline;
pub mod skeleton;
mod trace;
pub mod util;

pub use decode::{
    decode, CoordinateKind, CoordinateSpace, Detection, Keypoint, PoseParser, YoloPoseParser,
};
pub use geometry::{iou, BoundingBox};
pub use pipeline::{PipelineConfig, PosePipeline};
pub use skeleton::coco::{CocoKeypoint, COCO_BONES};
pub use skeleton::{select_skeleton, Joint, Skeleton, JOINT_DRAW_THRESHOLD};
pub use util::{PoseError, PoseResult};

pub use candidate::nms::suppress;
