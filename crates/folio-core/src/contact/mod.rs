mod emailjs;
mod form;

pub use emailjs::EmailJsTransport;
pub use form::{ContactForm, ContactService, FormField, SubmitOutcome};

use serde::Serialize;

use crate::Result;

/// Template variables delivered with a contact message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateParams {
    pub from_name: String,
    pub from_email: String,
    pub message: String,
    pub to_name: String,
}

/// One send attempt: template variables plus service identifiers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailRequest {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    pub params: TemplateParams,
}

/// Delivers contact messages to a third-party email service
#[async_trait::async_trait]
pub trait EmailTransport: Send + Sync {
    async fn send(&self, request: &EmailRequest) -> Result<()>;
}
