use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Url};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::model::NotificationRequest;
use crate::notifier::{DeliveryError, Notifier};
use crate::settings::{ConfigError, ConnectorConfig};

/// Posts notifications to the update-wake-order endpoint.
#[derive(Debug, Clone)]
pub struct HttpNotifier {
    client: Client,
    endpoint: Url,
}

impl HttpNotifier {
    pub fn new(config: &ConnectorConfig) -> Result<Self, ConfigError> {
        let endpoint = Url::parse(&config.api_url)
            .map_err(|e| ConfigError::Invalid(format!("api_url '{}': {}", config.api_url, e)))?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .user_agent(format!("wake-order/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ConfigError::Client(e.to_string()))?;

        info!(%endpoint, timeout_ms = config.request_timeout_ms, "Created HttpNotifier");
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl Notifier for HttpNotifier {
    #[instrument(skip(self, request), fields(
        wake_cart_id = %request.connector_token(),
        wake_order = %request.order_id(),
    ))]
    async fn notify(&self, request: NotificationRequest) -> Result<Value, DeliveryError> {
        debug!(?request, "Sending request");

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let claims_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.contains("json"))
            .unwrap_or(false);
        let text = response.text().await?;

        if !status.is_success() {
            warn!(status = status.as_u16(), body = %text, "Request rejected");
            return Err(DeliveryError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let body = parse_body(&text, claims_json)?;
        debug!(response = %body, "Response received");
        Ok(body)
    }
}

/// Turns a 2xx body into JSON without imposing a schema.
///
/// Empty bodies become `null`. Non-JSON text is kept as a string unless the
/// server said it was sending JSON.
pub fn parse_body(text: &str, claims_json: bool) -> Result<Value, DeliveryError> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    match serde_json::from_str(text) {
        Ok(value) => Ok(value),
        Err(e) if claims_json => Err(DeliveryError::MalformedResponse(e.to_string())),
        Err(_) => Ok(Value::String(text.to_string())),
    }
}
