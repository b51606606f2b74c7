use aws_config::BehaviorVersion;
use aws_sdk_lambda::config::Region;
use aws_sdk_lambda::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_lambda::operation::publish_layer_version::PublishLayerVersionOutput;
use aws_sdk_lambda::primitives::Blob;
use aws_sdk_lambda::types::{Architecture, LayerVersionContentInput, Runtime};
use layer_publish_core::contract::{LayerPublishRequest, PublishResult};
use layer_publish_core::publisher::LayerVersionPublisher;
use tracing::debug;

/// Publishes layer versions through `lambda:PublishLayerVersion`.
///
/// The trait is synchronous, so calls must happen inside a multi-thread tokio
/// runtime.
pub struct AwsLayerVersionPublisher {
    lambda_client: aws_sdk_lambda::Client,
}

impl AwsLayerVersionPublisher {
    pub fn new(lambda_client: aws_sdk_lambda::Client) -> Self {
        Self { lambda_client }
    }

    /// Builds a client for `region` using the default credential chain.
    pub async fn for_region(region: &str) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;
        Self::new(aws_sdk_lambda::Client::new(&config))
    }
}

impl LayerVersionPublisher for AwsLayerVersionPublisher {
    fn publish_layer_version(
        &self,
        request: &LayerPublishRequest,
    ) -> Result<PublishResult, String> {
        let client = self.lambda_client.clone();
        let content = LayerVersionContentInput::builder()
            .zip_file(Blob::new(request.zip_bytes.clone()))
            .build();
        let layer_name = request.layer_name.clone();
        let description = request.description.clone();
        let runtimes = compatible_runtimes(request);
        let architectures = compatible_architectures(request);

        debug!(layer_name = %layer_name, "calling PublishLayerVersion");
        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .publish_layer_version()
                    .layer_name(layer_name)
                    .content(content)
                    .set_compatible_runtimes(Some(runtimes))
                    .set_compatible_architectures(Some(architectures))
                    .description(description)
                    .send()
                    .await
                    .map(|output| publish_result_from_output(&output))
                    .map_err(|error| describe_sdk_error(&error))
            })
        })
    }
}

fn compatible_runtimes(request: &LayerPublishRequest) -> Vec<Runtime> {
    request
        .compatible_runtimes
        .iter()
        .map(|value| Runtime::from(value.as_str()))
        .collect()
}

fn compatible_architectures(request: &LayerPublishRequest) -> Vec<Architecture> {
    request
        .compatible_architectures
        .iter()
        .map(|value| Architecture::from(value.as_str()))
        .collect()
}

/// `CODE: message` for service errors, otherwise the `Display` text of the
/// error followed by each of its sources.
fn describe_sdk_error<E, R>(error: &SdkError<E, R>) -> String
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    if let Some(service_error) = error.as_service_error() {
        match (service_error.code(), service_error.message()) {
            (Some(code), Some(message)) => return format!("{code}: {message}"),
            (Some(code), None) => return code.to_string(),
            _ => {}
        }
    }

    let mut description = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        description.push_str(": ");
        description.push_str(&cause.to_string());
        source = std::error::Error::source(cause);
    }
    description
}

fn publish_result_from_output(output: &PublishLayerVersionOutput) -> PublishResult {
    PublishResult {
        layer_arn: output.layer_arn().unwrap_or_default().to_string(),
        version: output.version(),
        version_arn: output.layer_version_arn().unwrap_or_default().to_string(),
    }
}
