use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use tracing::debug;

use crate::contract::{PublishArgs, DEFAULT_REGION};
use crate::publish::publish;
use crate::publisher::LayerVersionPublisher;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "upload_layer",
    version,
    about = "Upload a zip file as a Lambda layer",
    long_about = "Upload a zip file as a new AWS Lambda layer version, compatible with\n\
                  python3.12-python3.14 on arm64. Credentials are resolved by the\n\
                  standard AWS provider chain (environment, shared config, roles)."
)]
pub struct Cli {
    /// Path to the zip file
    pub zip_file: PathBuf,
    /// Name for the Lambda layer
    #[arg(long, short = 'n')]
    pub layer_name: String,
    /// AWS region
    #[arg(long, short = 'r', default_value = DEFAULT_REGION)]
    pub region: String,
    /// Description for the layer
    #[arg(long, short = 'd')]
    pub description: Option<String>,
}

impl Cli {
    pub fn publish_args(&self) -> PublishArgs {
        PublishArgs {
            zip_file: self.zip_file.clone(),
            layer_name: self.layer_name.clone(),
            region: self.region.clone(),
            description: self.description.clone(),
        }
    }
}

/// Runs one publish invocation and returns the process exit code.
pub fn run(
    cli: &Cli,
    publisher: &dyn LayerVersionPublisher,
    stdout: &mut impl Write,
    stderr: &mut impl Write,
) -> i32 {
    match publish(&cli.publish_args(), publisher, stdout) {
        Ok(_) => EXIT_SUCCESS,
        Err(err) => {
            debug!(local = err.is_local(), "layer publish failed");
            // Nothing useful left to do if stderr itself is gone.
            let _ = writeln!(stderr, "Error: {err}");
            EXIT_FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tempfile::NamedTempFile;

    use super::*;
    use crate::contract::{LayerPublishRequest, PublishResult};
    use crate::publish::SUCCESS_MARKER;

    struct FixedPublisher {
        calls: AtomicUsize,
        response: Result<PublishResult, String>,
    }

    impl FixedPublisher {
        fn returning(response: Result<PublishResult, String>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                response,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl LayerVersionPublisher for FixedPublisher {
        fn publish_layer_version(
            &self,
            _request: &LayerPublishRequest,
        ) -> Result<PublishResult, String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.response.clone()
        }
    }

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("upload_layer").chain(args.iter().copied()))
            .expect("arguments should parse")
    }

    #[test]
    fn parses_short_flags() {
        let cli = parse(&["layer.zip", "-n", "deps", "-r", "eu-west-1", "-d", "shared deps"]);
        assert_eq!(cli.zip_file, PathBuf::from("layer.zip"));
        assert_eq!(cli.layer_name, "deps");
        assert_eq!(cli.region, "eu-west-1");
        assert_eq!(cli.description.as_deref(), Some("shared deps"));
    }

    #[test]
    fn region_defaults_and_description_is_optional() {
        let cli = parse(&["layer.zip", "--layer-name", "deps"]);
        assert_eq!(cli.region, "us-east-1");
        assert_eq!(cli.description, None);
    }

    #[test]
    fn layer_name_is_required() {
        assert!(Cli::try_parse_from(["upload_layer", "layer.zip"]).is_err());
        assert!(Cli::try_parse_from(["upload_layer", "--layer-name", "deps"]).is_err());
    }

    #[test]
    fn success_prints_remote_identifiers_and_exits_zero() {
        let zip = NamedTempFile::new().expect("create temp zip");
        let cli = parse(&[zip.path().to_str().expect("utf8 path"), "-n", "foo"]);
        let publisher = FixedPublisher::returning(Ok(PublishResult {
            layer_arn: "arn:aws:lambda:us-east-1:123456789012:layer:foo".to_string(),
            version: 3,
            version_arn: "arn:aws:lambda:us-east-1:123456789012:layer:foo:3".to_string(),
        }));
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();

        let code = run(&cli, &publisher, &mut stdout, &mut stderr);

        assert_eq!(code, EXIT_SUCCESS);
        assert_eq!(publisher.calls(), 1);
        assert!(stderr.is_empty());
        let printed = String::from_utf8(stdout).expect("utf8 output");
        let (_, after_marker) = printed
            .split_once(SUCCESS_MARKER)
            .expect("success marker printed");
        let layer_arn = "arn:aws:lambda:us-east-1:123456789012:layer:foo";
        assert!(after_marker.contains(&format!("Layer ARN: {layer_arn}\n")));
        assert!(after_marker.contains("Version: 3\n"));
        assert!(after_marker.contains(&format!("Version ARN: {layer_arn}:3\n")));
    }

    #[test]
    fn remote_failure_exits_one_with_error_on_stderr() {
        let zip = NamedTempFile::new().expect("create temp zip");
        let cli = parse(&[zip.path().to_str().expect("utf8 path"), "-n", "foo"]);
        let publisher = FixedPublisher::returning(Err(
            "AccessDeniedException: not authorized to perform lambda:PublishLayerVersion"
                .to_string(),
        ));
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();

        let code = run(&cli, &publisher, &mut stdout, &mut stderr);

        assert_eq!(code, EXIT_FAILURE);
        assert_eq!(
            String::from_utf8(stderr).expect("utf8 stderr"),
            "Error: AccessDeniedException: not authorized to perform lambda:PublishLayerVersion\n"
        );
        let printed = String::from_utf8(stdout).expect("utf8 output");
        assert!(!printed.contains(SUCCESS_MARKER));
        assert!(!printed.contains("Layer ARN:"));
    }

    #[test]
    fn missing_file_exits_one_without_remote_call() {
        let cli = parse(&["/no/such/layer.zip", "-n", "foo"]);
        let publisher = FixedPublisher::returning(Err("unreachable".to_string()));
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();

        let code = run(&cli, &publisher, &mut stdout, &mut stderr);

        assert_eq!(code, EXIT_FAILURE);
        assert_eq!(publisher.calls(), 0);
        assert!(stdout.is_empty());
        assert_eq!(
            String::from_utf8(stderr).expect("utf8 stderr"),
            "Error: Zip file not found: /no/such/layer.zip\n"
        );
    }
}
