use clap::Parser;
use posedecode::{
    CoordinateKind, CoordinateSpace, Detection, PipelineConfig, PosePipeline, Skeleton,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "Pose output decoder (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output for decode and suppression.
    #[arg(long)]
    trace: bool,
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum CoordinateKindConfig {
    Normalized01,
    ModelInputPixels,
}

impl From<CoordinateKindConfig> for CoordinateKind {
    fn from(value: CoordinateKindConfig) -> Self {
        match value {
            CoordinateKindConfig::Normalized01 => CoordinateKind::Normalized01,
            CoordinateKindConfig::ModelInputPixels => CoordinateKind::ModelInputPixels,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct CoordinateSpaceJson {
    kind: CoordinateKindConfig,
    model_input_size: f32,
    image_width: f32,
    image_height: f32,
}

impl Default for CoordinateSpaceJson {
    fn default() -> Self {
        let space = CoordinateSpace::default();
        Self {
            kind: CoordinateKindConfig::ModelInputPixels,
            model_input_size: space.model_input_size,
            image_width: space.image_width,
            image_height: space.image_height,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Config {
    buffer_path: String,
    output_path: Option<String>,
    num_keypoints: usize,
    confidence_threshold: f32,
    iou_threshold: f32,
    coordinate_space: CoordinateSpaceJson,
    max_detections: usize,
    parallel: bool,
}

impl Default for Config {
    fn default() -> Self {
        let cfg = PipelineConfig::default();
        Self {
            buffer_path: String::new(),
            output_path: None,
            num_keypoints: cfg.num_keypoints,
            confidence_threshold: cfg.confidence_threshold,
            iou_threshold: cfg.iou_threshold,
            coordinate_space: CoordinateSpaceJson::default(),
            max_detections: cfg.max_detections,
            parallel: cfg.parallel,
        }
    }
}

impl Config {
    fn pipeline_config(&self) -> PipelineConfig {
        let space = &self.coordinate_space;
        PipelineConfig {
            num_keypoints: self.num_keypoints,
            confidence_threshold: self.confidence_threshold,
            iou_threshold: self.iou_threshold,
            coordinate_space: CoordinateSpace {
                kind: space.kind.into(),
                model_input_size: space.model_input_size,
                image_width: space.image_width,
                image_height: space.image_height,
            },
            max_detections: self.max_detections,
            parallel: self.parallel,
        }
    }
}

#[derive(Debug, Serialize)]
struct DetectionRecord {
    confidence: f32,
    bbox: [f32; 4],
    keypoints: Vec<[f32; 3]>,
}

impl From<&Detection> for DetectionRecord {
    fn from(value: &Detection) -> Self {
        Self {
            confidence: value.confidence,
            bbox: [
                value.bbox.x,
                value.bbox.y,
                value.bbox.width,
                value.bbox.height,
            ],
            keypoints: value
                .keypoints
                .iter()
                .map(|kp| [kp.x, kp.y, kp.confidence])
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
struct SkeletonRecord {
    confidence: f32,
    joints: Vec<[f32; 3]>,
}

impl From<Skeleton> for SkeletonRecord {
    fn from(value: Skeleton) -> Self {
        Self {
            confidence: value.confidence(),
            joints: value.joints().iter().map(|j| j.to_array()).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
struct Output {
    skeleton: Option<SkeletonRecord>,
    detections: Vec<DetectionRecord>,
}

/// Decodes little-endian `f32` values; a trailing partial value is an error.
fn parse_le_f32(bytes: &[u8]) -> Result<Vec<f32>, Box<dyn std::error::Error>> {
    if bytes.len() % 4 != 0 {
        return Err(format!("raw buffer length {} is not a multiple of 4", bytes.len()).into());
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect())
}

fn load_buffer(path: &Path) -> Result<Vec<f32>, Box<dyn std::error::Error>> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    } else {
        parse_le_f32(&fs::read(path)?)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive("posedecode=debug".parse()?),
            )
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.buffer_path.is_empty() {
        return Err("buffer_path must be set in the config".into());
    }

    let pipeline = PosePipeline::from_config(config.pipeline_config())?;
    let buffer = load_buffer(Path::new(&config.buffer_path))?;
    info!(values = buffer.len(), "loaded output buffer");

    let detections = pipeline.detect(&buffer)?;
    let skeleton = posedecode::select_skeleton(&detections).map(SkeletonRecord::from);
    let output = Output {
        skeleton,
        detections: detections.iter().map(DetectionRecord::from).collect(),
    };
    let json = serde_json::to_string_pretty(&output)?;

    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{parse_le_f32, Config};

    #[test]
    fn parse_le_f32_reads_values_in_order() {
        let mut bytes = Vec::new();
        for v in [1.0f32, -2.5, 0.125] {
            bytes.extend_from_slice(&v.to_le_bytes());
        }
        assert_eq!(parse_le_f32(&bytes).unwrap(), vec![1.0, -2.5, 0.125]);
        assert!(parse_le_f32(&bytes[..5]).is_err());
    }

    #[test]
    fn example_config_builds_a_pipeline() {
        let config: Config = serde_json::from_str(super::EXAMPLE_JSON).unwrap();
        let cfg = config.pipeline_config();
        assert_eq!(cfg.num_keypoints, 17);
        assert_eq!(cfg.coordinate_space.scale(), (2.0, 1.125));
        assert!(posedecode::PosePipeline::from_config(cfg).is_ok());
    }
}
