use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use super::{EmailRequest, EmailTransport, TemplateParams};
use crate::config::ContactConfig;
use crate::{Error, Result};

#[derive(Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a TemplateParams,
}

/// EmailJS REST transport
pub struct EmailJsTransport {
    client: Client,
    endpoint: String,
}

impl EmailJsTransport {
    pub fn new(config: &ContactConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        url::Url::parse(&config.endpoint)?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }
}

#[async_trait::async_trait]
impl EmailTransport for EmailJsTransport {
    async fn send(&self, request: &EmailRequest) -> Result<()> {
        let body = SendRequest {
            service_id: &request.service_id,
            template_id: &request.template_id,
            user_id: &request.public_key,
            template_params: &request.params,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Transport(format!("EmailJS request failed: {}", e)))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let text = response.text().await.unwrap_or_default();
        Err(Error::Transport(format!(
            "EmailJS rejected the message ({}): {}",
            status,
            text.trim()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let params = TemplateParams {
            from_name: "Ada".into(),
            from_email: "ada@example.com".into(),
            message: "Hello".into(),
            to_name: "Fadi Saif".into(),
        };
        let body = SendRequest {
            service_id: "svc",
            template_id: "tpl",
            user_id: "key",
            template_params: &params,
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["service_id"], "svc");
        assert_eq!(json["template_id"], "tpl");
        assert_eq!(json["user_id"], "key");
        assert_eq!(json["template_params"]["from_email"], "ada@example.com");
        assert_eq!(json["template_params"]["to_name"], "Fadi Saif");
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        let config = ContactConfig {
            endpoint: "not a url".into(),
            ..Default::default()
        };
        assert!(matches!(EmailJsTransport::new(&config), Err(Error::UrlParse(_))));
    }
}
