use serde::Deserialize;
use serde_json::json;

use crate::{
    config::MailingListConfig,
    error::{AppError, Result},
};

/// Pass-through client for a Mailchimp-compatible list API. The portal only
/// ever subscribes addresses; everything else about the list lives upstream.
pub struct MailingListClient {
    http: reqwest::Client,
    config: MailingListConfig,
}

#[derive(Deserialize)]
struct UpstreamError {
    #[serde(default)]
    title: String,
}

impl MailingListClient {
    pub fn new(config: Option<MailingListConfig>) -> Option<Self> {
        config.and_then(|cfg| {
            if cfg.enabled {
                Some(Self {
                    http: reqwest::Client::new(),
                    config: cfg,
                })
            } else {
                None
            }
        })
    }

    /// Subscribes an address. An already-subscribed address reports success;
    /// any other upstream failure surfaces as `External` rather than being
    /// swallowed.
    pub async fn subscribe(&self, email: &str) -> Result<()> {
        let url = format!(
            "https://{}.api.mailchimp.com/3.0/lists/{}/members",
            self.config.server_prefix, self.config.audience_id
        );

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("apikey {}", self.config.api_key))
            .json(&json!({
                "email_address": email,
                "status": "subscribed",
            }))
            .send()
            .await
            .map_err(|e| AppError::External(format!("Mailing list unreachable: {}", e)))?;

        if response.status().is_success() {
            return Ok(());
        }

        // The upstream answers 400 for an address that is already on the
        // list; that is success from the subscriber's point of view.
        let body: UpstreamError = response.json().await.unwrap_or(UpstreamError {
            title: String::new(),
        });
        if body.title == "Member Exists" {
            tracing::debug!(email, "address already subscribed");
            return Ok(());
        }

        Err(AppError::External(format!(
            "Mailing list rejected subscription: {}",
            body.title
        )))
    }
}
