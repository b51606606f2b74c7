use std::fs;
use std::io::Write;

use tracing::{debug, info};

use crate::contract::{
    build_request, display_path, format_megabytes, PublishArgs, PublishResult,
};
use crate::error::PublishError;
use crate::publisher::LayerVersionPublisher;

pub const SUCCESS_MARKER: &str = "✓ Layer uploaded successfully!";

/// Reads the zip archive and publishes it as a new layer version.
///
/// Progress lines go to `out`. The file is checked and read completely before
/// the single remote call; nothing is retried.
pub fn publish(
    args: &PublishArgs,
    publisher: &dyn LayerVersionPublisher,
    out: &mut impl Write,
) -> Result<PublishResult, PublishError> {
    let metadata = match fs::metadata(&args.zip_file) {
        Ok(value) if value.is_file() => value,
        _ => {
            return Err(PublishError::FileNotFound {
                path: args.zip_file.clone(),
            })
        }
    };

    writeln!(
        out,
        "Reading zip file: {}",
        display_path(&args.zip_file).display()
    )?;
    writeln!(out, "File size: {} MB", format_megabytes(metadata.len()))?;

    let zip_bytes = fs::read(&args.zip_file).map_err(|source| PublishError::ReadZip {
        path: args.zip_file.clone(),
        source,
    })?;
    let request = build_request(args, zip_bytes);
    debug!(
        layer_name = %request.layer_name,
        region = %request.region,
        zip_bytes = request.zip_bytes.len(),
        "built publish request"
    );

    writeln!(out)?;
    writeln!(
        out,
        "Uploading layer '{}' to region '{}'...",
        request.layer_name, request.region
    )?;
    out.flush()?;

    let result = publisher
        .publish_layer_version(&request)
        .map_err(PublishError::RemoteService)?;
    info!(
        layer_name = %request.layer_name,
        version = result.version,
        "published layer version"
    );

    writeln!(out)?;
    writeln!(out, "{SUCCESS_MARKER}")?;
    writeln!(out, "Layer ARN: {}", result.layer_arn)?;
    writeln!(out, "Version: {}", result.version)?;
    writeln!(out, "Version ARN: {}", result.version_arn)?;

    Ok(result)
}
