//! Run configuration
//!
//! Values come from the command line, optionally layered over a JSON file
//! with the same four keys. Command-line values win.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::projection::{SourceSystem, TargetSystem};

/// Target system used when none is configured
pub const DEFAULT_TARGET_PROJECTION: &str = "WGS84";

/// Command-line arguments
#[derive(Parser, Debug, Default)]
#[command(name = "obj-reproject", version, about = "Reproject the vertices of an OBJ mesh")]
pub struct Cli {
    /// The source OBJ file to transform
    #[arg(long, alias = "sourceFile")]
    pub source_file: Option<PathBuf>,

    /// The path and filename of the output OBJ file
    #[arg(long, alias = "targetFile")]
    pub target_file: Option<PathBuf>,

    /// Projection of the source file: any PROJ identifier, or "ECEF"
    #[arg(long, alias = "sourceProjection")]
    pub source_projection: Option<String>,

    /// Projection of the output file: any PROJ identifier, "ECEF", or "ENU"
    /// for a local east-north-up frame centered at the first vertex
    /// [default: WGS84]
    #[arg(long, alias = "targetProjection")]
    pub target_projection: Option<String>,

    /// JSON file providing any of the options above
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Contents of a JSON configuration file
#[derive(Deserialize, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FileConfig {
    pub source_file: Option<PathBuf>,
    pub target_file: Option<PathBuf>,
    pub source_projection: Option<String>,
    pub target_projection: Option<String>,
}

impl FileConfig {
    /// Reads a JSON configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Parses JSON configuration text
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::Config(e.to_string()))
    }
}

/// Fully resolved configuration for one run
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub source_file: PathBuf,
    pub target_file: PathBuf,
    pub source: SourceSystem,
    pub target: TargetSystem,
}

impl Config {
    /// Resolves the command line, loading the referenced config file if any
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Self::merge(cli, file)
    }

    /// Merges command-line values over file values
    pub fn merge(cli: Cli, file: FileConfig) -> Result<Self> {
        let source_file = cli
            .source_file
            .or(file.source_file)
            .ok_or_else(|| missing("source file"))?;
        let target_file = cli
            .target_file
            .or(file.target_file)
            .ok_or_else(|| missing("target file"))?;
        let source_projection = cli
            .source_projection
            .or(file.source_projection)
            .ok_or_else(|| missing("source projection"))?;
        let target_projection = cli
            .target_projection
            .or(file.target_projection)
            .unwrap_or_else(|| DEFAULT_TARGET_PROJECTION.to_string());

        Ok(Self {
            source_file,
            target_file,
            source: source_projection.parse()?,
            target: target_projection.parse()?,
        })
    }
}

fn missing(what: &str) -> Error {
    Error::Config(format!("missing required {}", what))
}
