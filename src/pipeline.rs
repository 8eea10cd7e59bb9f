//! Decode, suppress, select.
//!
//! `PosePipeline` wires a [`PoseParser`] to IoU suppression and skeleton
//! selection. The parser is generic so alternative heads can be plugged in
//! without changing suppression.

use crate::candidate::nms::suppress;
use crate::decode::{CoordinateKind, CoordinateSpace, Detection, PoseParser, YoloPoseParser};
use crate::skeleton::{select_skeleton, Skeleton};
use crate::util::math::is_positive_finite;
use crate::util::{PoseError, PoseResult};

/// Tunable parameters of the pose pipeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PipelineConfig {
    /// Keypoints per anchor.
    pub num_keypoints: usize,
    /// Anchors below this confidence are discarded during decode.
    pub confidence_threshold: f32,
    /// Candidates overlapping a survivor above this IoU are suppressed.
    pub iou_threshold: f32,
    /// Source convention and target image size.
    pub coordinate_space: CoordinateSpace,
    /// Keep at most this many survivors; 0 keeps all.
    pub max_detections: usize,
    /// Decode anchors with rayon when the `rayon` feature is enabled.
    pub parallel: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            num_keypoints: 17,
            confidence_threshold: 0.5,
            iou_threshold: 0.45,
            coordinate_space: CoordinateSpace::default(),
            max_detections: 0,
            parallel: false,
        }
    }
}

impl PipelineConfig {
    /// Checks values that would make every decode meaningless.
    ///
    /// Thresholds are not range-checked beyond being finite.
    pub fn validate(&self) -> PoseResult<()> {
        if !self.confidence_threshold.is_finite() {
            return Err(PoseError::InvalidConfig("confidence_threshold must be finite"));
        }
        if !self.iou_threshold.is_finite() {
            return Err(PoseError::InvalidConfig("iou_threshold must be finite"));
        }
        let space = &self.coordinate_space;
        if !is_positive_finite(space.image_width) || !is_positive_finite(space.image_height) {
            return Err(PoseError::InvalidConfig("image size must be positive"));
        }
        if space.kind == CoordinateKind::ModelInputPixels
            && !is_positive_finite(space.model_input_size)
        {
            return Err(PoseError::InvalidConfig("model_input_size must be positive"));
        }
        Ok(())
    }
}

/// Pose post-processing pipeline for one inference result at a time.
#[derive(Clone, Debug)]
pub struct PosePipeline<P = YoloPoseParser> {
    parser: P,
    iou_threshold: f32,
    max_detections: usize,
}

impl PosePipeline<YoloPoseParser> {
    /// Builds a YOLO pose pipeline from a validated configuration.
    pub fn from_config(cfg: PipelineConfig) -> PoseResult<Self> {
        cfg.validate()?;
        let parser = YoloPoseParser::new(
            cfg.num_keypoints,
            cfg.confidence_threshold,
            cfg.coordinate_space,
        )?
        .with_parallel(cfg.parallel);
        Ok(Self::new(parser)
            .with_iou_threshold(cfg.iou_threshold)
            .with_max_detections(cfg.max_detections))
    }
}

impl<P: PoseParser> PosePipeline<P> {
    /// Creates a pipeline with the default IoU threshold and no cap.
    pub fn new(parser: P) -> Self {
        let defaults = PipelineConfig::default();
        Self {
            parser,
            iou_threshold: defaults.iou_threshold,
            max_detections: defaults.max_detections,
        }
    }

    /// Sets the suppression IoU threshold.
    pub fn with_iou_threshold(mut self, iou_threshold: f32) -> Self {
        self.iou_threshold = iou_threshold;
        self
    }

    /// Caps the number of survivors; 0 keeps all.
    pub fn with_max_detections(mut self, max_detections: usize) -> Self {
        self.max_detections = max_detections;
        self
    }

    /// Parser used for decoding.
    pub fn parser(&self) -> &P {
        &self.parser
    }

    /// Suppression IoU threshold.
    pub fn iou_threshold(&self) -> f32 {
        self.iou_threshold
    }

    /// Decodes `buffer` and returns suppressed detections, most confident first.
    pub fn detect(&self, buffer: &[f32]) -> PoseResult<Vec<Detection>> {
        let candidates = self.parser.parse(buffer)?;
        let mut kept = suppress(candidates, self.iou_threshold);
        if self.max_detections > 0 && kept.len() > self.max_detections {
            kept.truncate(self.max_detections);
        }
        Ok(kept)
    }

    /// Runs [`Self::detect`] and selects this cycle's skeleton.
    ///
    /// `Ok(None)` means nothing was detected.
    pub fn detect_skeleton(&self, buffer: &[f32]) -> PoseResult<Option<Skeleton>> {
        let detections = self.detect(buffer)?;
        Ok(select_skeleton(&detections))
    }
}
