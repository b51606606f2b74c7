//! Lambda layer publishing primitives.
//!
//! This crate owns the publish request contract, the error taxonomy, and the
//! command-line flow that turns a local zip archive into one new layer
//! version. It intentionally excludes AWS SDK concerns: the remote call sits
//! behind [`publisher::LayerVersionPublisher`], implemented by
//! `layer_publish_aws`.

pub mod cli;
pub mod contract;
pub mod error;
pub mod publish;
pub mod publisher;
