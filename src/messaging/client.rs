/// Open Cloud messaging-service publisher
use crate::{
    config::{HttpConfig, MessagingConfig, OpenCloudConfig},
    error::RelayResult,
    messaging::{Envelope, MessagePublisher, Topic},
    upstream::{self, API_KEY_HEADER},
};
use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

const SERVICE: &str = "messaging";

#[derive(Serialize)]
struct PublishBody {
    message: String,
}

/// Publishes envelopes to a universe's messaging topics
#[derive(Clone)]
pub struct OpenCloudMessagingClient {
    http_client: reqwest::Client,
    cloud: OpenCloudConfig,
    topics: MessagingConfig,
}

impl OpenCloudMessagingClient {
    pub fn new(
        cloud: OpenCloudConfig,
        topics: MessagingConfig,
        http: &HttpConfig,
    ) -> RelayResult<Self> {
        Ok(Self {
            http_client: upstream::build_http_client(http)?,
            cloud,
            topics,
        })
    }

    fn topic_url(&self, topic: Topic) -> String {
        format!(
            "{}/messaging-service/v1/universes/{}/topics/{}",
            self.cloud.base_url,
            self.cloud.universe_id,
            topic.name(&self.topics)
        )
    }
}

#[async_trait]
impl MessagePublisher for OpenCloudMessagingClient {
    async fn publish(&self, topic: Topic, envelope: &Envelope) -> RelayResult<()> {
        let body = PublishBody {
            message: envelope.to_message()?,
        };
        let request = self
            .http_client
            .post(self.topic_url(topic))
            .header(API_KEY_HEADER, &self.cloud.api_key)
            .json(&body);

        let response = upstream::send(SERVICE, request).await?;
        if !response.status().is_success() {
            return Err(upstream::rejection(response).await);
        }

        debug!("Published to {}", topic.name(&self.topics));
        Ok(())
    }
}
