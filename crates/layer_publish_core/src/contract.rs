use std::path::{Component, Path, PathBuf};

pub const DEFAULT_REGION: &str = "us-east-1";
pub const COMPATIBLE_RUNTIMES: [&str; 3] = ["python3.14", "python3.13", "python3.12"];
pub const COMPATIBLE_ARCHITECTURES: [&str; 1] = ["arm64"];

const BYTES_PER_MEGABYTE: f64 = 1024.0 * 1024.0;

/// Caller-supplied inputs of a single publish invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishArgs {
    pub zip_file: PathBuf,
    pub layer_name: String,
    pub region: String,
    pub description: Option<String>,
}

/// Everything sent to the remote publish operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerPublishRequest {
    pub layer_name: String,
    pub region: String,
    pub zip_bytes: Vec<u8>,
    pub compatible_runtimes: Vec<String>,
    pub compatible_architectures: Vec<String>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishResult {
    pub layer_arn: String,
    pub version: i64,
    pub version_arn: String,
}

pub fn default_description(layer_name: &str) -> String {
    format!("Lambda layer for {layer_name}")
}

/// An empty description counts as absent.
pub fn resolve_description(layer_name: &str, description: Option<&str>) -> String {
    match description {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => default_description(layer_name),
    }
}

pub fn build_request(args: &PublishArgs, zip_bytes: Vec<u8>) -> LayerPublishRequest {
    LayerPublishRequest {
        layer_name: args.layer_name.clone(),
        region: args.region.clone(),
        zip_bytes,
        compatible_runtimes: COMPATIBLE_RUNTIMES.iter().map(|value| value.to_string()).collect(),
        compatible_architectures: COMPATIBLE_ARCHITECTURES
            .iter()
            .map(|value| value.to_string())
            .collect(),
        description: resolve_description(&args.layer_name, args.description.as_deref()),
    }
}

/// Collapses repeated separators and drops `.` segments, e.g. `./dist//a.zip`
/// becomes `dist/a.zip`. `..` is kept.
pub fn display_path(path: &Path) -> PathBuf {
    let normalized: PathBuf = path
        .components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect();
    if normalized.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        normalized
    }
}

pub fn format_megabytes(size_bytes: u64) -> String {
    format!("{:.2}", size_bytes as f64 / BYTES_PER_MEGABYTE)
}
