use clap::Parser;
use harris_corner::image::convert::normalize_to_u8;
use harris_corner::io::{load_gray_f32, save_gray_u8};
use harris_corner::{
    Corner, CornerDetector, DetectorConfig, NmsStrategy, ResponseConfig, SuppressConfig,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "Harris corner detector (JSON config driven)")]
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
    /// Enable tracing output for performance profiling.
    #[arg(long)]
    trace: bool,
}

#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
enum StrategyConfig {
    #[default]
    Auto,
    Direct,
    SlidingMax,
}

impl From<StrategyConfig> for NmsStrategy {
    fn from(value: StrategyConfig) -> Self {
        match value {
            StrategyConfig::Auto => NmsStrategy::Auto,
            StrategyConfig::Direct => NmsStrategy::Direct,
            StrategyConfig::SlidingMax => NmsStrategy::SlidingMax,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ResponseConfigJson {
    k: f32,
    block_size: usize,
    aperture_size: usize,
}

impl Default for ResponseConfigJson {
    fn default() -> Self {
        let cfg = ResponseConfig::default();
        Self {
            k: cfg.k,
            block_size: cfg.block_size,
            aperture_size: cfg.aperture_size,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SuppressConfigJson {
    threshold: f32,
    window_size: usize,
    strategy: StrategyConfig,
}

impl Default for SuppressConfigJson {
    fn default() -> Self {
        let cfg = SuppressConfig::default();
        Self {
            threshold: cfg.threshold,
            window_size: cfg.window_size,
            strategy: StrategyConfig::Auto,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct Config {
    image_path: String,
    mask_path: Option<String>,
    response_path: Option<String>,
    output_path: Option<String>,
    max_corners: Option<usize>,
    parallel: bool,
    response: ResponseConfigJson,
    suppress: SuppressConfigJson,
}

impl Config {
    fn detector_config(&self) -> DetectorConfig {
        DetectorConfig {
            response: ResponseConfig {
                k: self.response.k,
                block_size: self.response.block_size,
                aperture_size: self.response.aperture_size,
                parallel: false,
            },
            suppress: SuppressConfig {
                threshold: self.suppress.threshold,
                window_size: self.suppress.window_size,
                strategy: self.suppress.strategy.into(),
                parallel: false,
            },
            max_corners: self.max_corners,
        }
        .with_parallel(self.parallel)
    }
}

#[derive(Debug, Serialize)]
struct CornerRecord {
    x: usize,
    y: usize,
    score: f32,
}

impl From<Corner> for CornerRecord {
    fn from(value: Corner) -> Self {
        Self {
            x: value.x,
            y: value.y,
            score: value.score,
        }
    }
}

#[derive(Debug, Serialize)]
struct Output {
    width: usize,
    height: usize,
    corners: Vec<CornerRecord>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive("harris_corner=info".parse()?),
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
    if config.image_path.is_empty() {
        return Err("image_path must be set in the config".into());
    }

    let detector = CornerDetector::new(config.detector_config());

    let image = load_gray_f32(&config.image_path)?;
    let detection = detector.detect(image.view())?;

    if let Some(path) = &config.mask_path {
        save_gray_u8(path, detection.mask.view())?;
    }
    if let Some(path) = &config.response_path {
        let display = normalize_to_u8(detection.response.view())?;
        save_gray_u8(path, display.view())?;
    }

    let corners = match config.max_corners {
        Some(k) => detection.corners_topk(k)?,
        None => detection.corners()?,
    };
    tracing::info!(corners = corners.len(), "detection finished");

    let output = Output {
        width: image.width(),
        height: image.height(),
        corners: corners.into_iter().map(CornerRecord::from).collect(),
    };
    let json = serde_json::to_string_pretty(&output)?;

    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
