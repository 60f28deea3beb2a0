use async_trait::async_trait;
use gloo_net::http::Request;
use log::{debug, error, info};
use serde::Deserialize;

use crate::error::{RemoteError, RemoteResult};
use crate::lead::form::ContactLead;

pub const FALLBACK_MESSAGE: &str =
    "Thanks for your response! Join our WhatsApp community to hear about upcoming sessions.";
pub const FALLBACK_WHATSAPP_LINK: &str = "https://chat.whatsapp.com/DesignCircleCommunity";

/// Optional body the webhook may answer with.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WebhookReply {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub whatsapp_link: Option<String>,
}

/// What the visitor sees once the form is done, whatever happened on the wire.
#[derive(Clone, Debug, PartialEq)]
pub struct Completion {
    pub message: String,
    pub whatsapp_link: String,
    /// False when the webhook call failed. Only used for telemetry.
    pub delivered: bool,
}

impl Completion {
    pub fn from_reply(reply: WebhookReply) -> Self {
        let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        Self {
            message: non_empty(reply.message).unwrap_or_else(|| FALLBACK_MESSAGE.to_string()),
            whatsapp_link: non_empty(reply.whatsapp_link)
                .unwrap_or_else(|| FALLBACK_WHATSAPP_LINK.to_string()),
            delivered: true,
        }
    }

    pub fn fallback() -> Self {
        Self {
            message: FALLBACK_MESSAGE.to_string(),
            whatsapp_link: FALLBACK_WHATSAPP_LINK.to_string(),
            delivered: false,
        }
    }
}

#[async_trait(?Send)]
pub trait LeadTransport {
    async fn post_lead(&self, lead: &ContactLead) -> RemoteResult<WebhookReply>;
}

/// Posts leads to the community webhook as JSON.
#[derive(Clone, Debug, PartialEq)]
pub struct WebhookClient {
    url: String,
}

impl WebhookClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[async_trait(?Send)]
impl LeadTransport for WebhookClient {
    async fn post_lead(&self, lead: &ContactLead) -> RemoteResult<WebhookReply> {
        let response = Request::post(&self.url).json(lead)?.send().await?;

        if !response.ok() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteError::Status { status, body });
        }

        let body = response.text().await?;
        Ok(parse_reply(&body))
    }
}

/// Webhooks often answer 2xx with plain text; anything that isn't the JSON shape is an empty reply.
pub fn parse_reply(body: &str) -> WebhookReply {
    if body.trim().is_empty() {
        return WebhookReply::default();
    }
    serde_json::from_str(body).unwrap_or_else(|e| {
        debug!("Webhook reply was not JSON ({}), using defaults", e);
        WebhookReply::default()
    })
}

/// Sends the lead once. Never fails: errors are logged and replaced with the fallback completion.
pub async fn deliver<T>(transport: &T, lead: &ContactLead) -> Completion
where
    T: LeadTransport + ?Sized,
{
    match transport.post_lead(lead).await {
        Ok(reply) => {
            info!("Lead submitted");
            Completion::from_reply(reply)
        }
        Err(e) => {
            error!("Lead submission failed: {}", e);
            Completion::fallback()
        }
    }
}
