use std::sync::{Arc, OnceLock};

use regex::Regex;

use super::{EmailRequest, EmailTransport, TemplateParams};
use crate::config::ContactConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Message,
}

impl FormField {
    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Your Name",
            FormField::Email => "Your Email",
            FormField::Message => "Your Message",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            FormField::Name => FormField::Email,
            FormField::Email => FormField::Message,
            FormField::Message => FormField::Name,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            FormField::Name => FormField::Message,
            FormField::Email => FormField::Name,
            FormField::Message => FormField::Email,
        }
    }
}

/// What a visitor typed into the contact form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

fn email_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static regex"))
}

impl ContactForm {
    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Message => &self.message,
        }
    }

    pub fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Message => &mut self.message,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// First problem found, if any
    pub fn validate(&self) -> Option<(FormField, String)> {
        for field in [FormField::Name, FormField::Email, FormField::Message] {
            if self.field(field).trim().is_empty() {
                return Some((field, format!("{} is required", field.label())));
            }
        }
        if !email_pattern().is_match(self.email.trim()) {
            return Some((FormField::Email, "Please enter a valid email address".to_string()));
        }
        None
    }
}

/// Result of a submit, with the text shown to the visitor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Sent,
    Invalid { field: FormField, reason: String },
    /// Template id or public key missing; nothing was sent
    ConfigurationError { fallback_email: String },
    /// The transport rejected or failed the send
    TransportFailure { fallback_email: String, reason: String },
}

impl SubmitOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, SubmitOutcome::Sent)
    }

    pub fn title(&self) -> &'static str {
        match self {
            SubmitOutcome::Sent => "Message sent!",
            SubmitOutcome::Invalid { .. } => "Check the form",
            SubmitOutcome::ConfigurationError { .. } => "Configuration error",
            SubmitOutcome::TransportFailure { .. } => "Failed to send message",
        }
    }

    pub fn description(&self) -> String {
        match self {
            SubmitOutcome::Sent => {
                "Thank you for reaching out. I'll get back to you soon.".to_string()
            }
            SubmitOutcome::Invalid { reason, .. } => reason.clone(),
            SubmitOutcome::ConfigurationError { fallback_email } => format!(
                "Email service is not configured yet. Please contact me directly at {}",
                fallback_email
            ),
            SubmitOutcome::TransportFailure { fallback_email, .. } => format!(
                "Something went wrong. Please try again or email me directly at {}",
                fallback_email
            ),
        }
    }
}

/// Validates a form and hands it to the email transport
#[derive(Clone)]
pub struct ContactService {
    config: ContactConfig,
    transport: Arc<dyn EmailTransport>,
    owner_name: String,
    owner_email: String,
}

impl ContactService {
    pub fn new(
        config: ContactConfig,
        transport: Arc<dyn EmailTransport>,
        owner_name: impl Into<String>,
        owner_email: impl Into<String>,
    ) -> Self {
        Self {
            config,
            transport,
            owner_name: owner_name.into(),
            owner_email: owner_email.into(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.config.credentials().is_some()
    }

    pub async fn submit(&self, form: &ContactForm) -> SubmitOutcome {
        if let Some((field, reason)) = form.validate() {
            return SubmitOutcome::Invalid { field, reason };
        }

        let Some((template_id, public_key)) = self.config.credentials() else {
            tracing::warn!("Contact form submitted but email service is not configured");
            return SubmitOutcome::ConfigurationError {
                fallback_email: self.owner_email.clone(),
            };
        };

        let request = EmailRequest {
            service_id: self.config.service_id.clone(),
            template_id: template_id.to_string(),
            public_key: public_key.to_string(),
            params: TemplateParams {
                from_name: form.name.trim().to_string(),
                from_email: form.email.trim().to_string(),
                message: form.message.trim().to_string(),
                to_name: self.owner_name.clone(),
            },
        };

        match self.transport.send(&request).await {
            Ok(()) => {
                tracing::info!("Contact message sent");
                SubmitOutcome::Sent
            }
            Err(e) => {
                tracing::error!("Contact message failed: {}", e);
                SubmitOutcome::TransportFailure {
                    fallback_email: self.owner_email.clone(),
                    reason: e.to_string(),
                }
            }
        }
    }
}
