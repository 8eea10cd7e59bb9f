//! YOLO-style pose head parser.

use crate::decode::{checked_stride, decode, CoordinateSpace, Detection, PoseParser};
use crate::util::PoseResult;

/// Parser for single-class YOLO pose heads.
///
/// Holds the decode configuration so a pipeline can swap parsers without
/// touching suppression.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct YoloPoseParser {
    num_keypoints: usize,
    confidence_threshold: f32,
    space: CoordinateSpace,
    parallel: bool,
}

impl YoloPoseParser {
    /// Creates a parser, validating the anchor layout up front.
    pub fn new(
        num_keypoints: usize,
        confidence_threshold: f32,
        space: CoordinateSpace,
    ) -> PoseResult<Self> {
        checked_stride(num_keypoints)?;
        Ok(Self {
            num_keypoints,
            confidence_threshold,
            space,
            parallel: false,
        })
    }

    /// Decodes anchors in parallel when the `rayon` feature is enabled.
    ///
    /// Output is identical to the sequential path. Ignored without `rayon`.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Minimum anchor confidence kept by the parser.
    pub fn confidence_threshold(&self) -> f32 {
        self.confidence_threshold
    }

    /// Coordinate space applied during decode.
    pub fn space(&self) -> CoordinateSpace {
        self.space
    }

    /// Whether parallel decode was requested.
    pub fn parallel(&self) -> bool {
        self.parallel
    }
}

impl PoseParser for YoloPoseParser {
    fn num_keypoints(&self) -> usize {
        self.num_keypoints
    }

    fn parse(&self, buffer: &[f32]) -> PoseResult<Vec<Detection>> {
        #[cfg(feature = "rayon")]
        if self.parallel {
            return crate::decode::rayon::decode_par(
                buffer,
                self.num_keypoints,
                self.confidence_threshold,
                self.space,
            );
        }

        decode(
            buffer,
            self.num_keypoints,
            self.confidence_threshold,
            self.space,
        )
    }
}
