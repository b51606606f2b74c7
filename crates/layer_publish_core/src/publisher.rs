use crate::contract::{LayerPublishRequest, PublishResult};

/// Remote "publish layer version" capability.
///
/// Every successful call creates a new, immutable layer version on the remote
/// side; implementations must not retry.
pub trait LayerVersionPublisher {
    fn publish_layer_version(&self, request: &LayerPublishRequest) -> Result<PublishResult, String>;
}
