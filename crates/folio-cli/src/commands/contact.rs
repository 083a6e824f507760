use std::sync::Arc;

use anyhow::{bail, Result};

use folio_core::{
    contact::{ContactForm, ContactService, EmailJsTransport},
    AppConfig, ContentStore,
};

pub async fn run(config: &AppConfig, name: String, email: String, message: String) -> Result<()> {
    let portfolio = ContentStore::load(config)?;
    let transport = Arc::new(EmailJsTransport::new(&config.contact)?);
    let service = ContactService::new(
        config.contact.clone(),
        transport,
        portfolio.personal.name.clone(),
        portfolio.personal.email.clone(),
    );

    let form = ContactForm {
        name,
        email,
        message,
    };

    let outcome = service.submit(&form).await;
    if outcome.is_sent() {
        println!("{} {}", outcome.title(), outcome.description());
        Ok(())
    } else {
        bail!("{}: {}", outcome.title(), outcome.description())
    }
}
