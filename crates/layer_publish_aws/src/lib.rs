//! AWS-oriented adapters for Lambda layer publishing.
//!
//! This crate owns the AWS SDK integration, logging setup, and the
//! `upload_layer` binary. Request construction, output, and error reporting
//! live in `layer_publish_core`.

pub mod adapters;
pub mod logging;
