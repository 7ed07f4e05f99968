//! services/submission_service.rs
//! Orquesta un envío del formulario: primero el correo, después el registro.

use std::sync::Arc;

use crate::{
    errors::SubmissionError,
    models::email_model::{EmailForm, EmailRecord, NewEmailRecord},
    services::{email_store::EmailStore, mail_service::MailTransport},
};

#[derive(Clone)]
pub struct SubmissionService {
    mailer: Arc<dyn MailTransport>,
    store: Arc<dyn EmailStore>,
}

impl SubmissionService {
    pub fn new(mailer: Arc<dyn MailTransport>, store: Arc<dyn EmailStore>) -> Self {
        Self { mailer, store }
    }

    pub fn store(&self) -> &Arc<dyn EmailStore> {
        &self.store
    }

    /// Envía el correo y luego guarda el registro.
    ///
    /// No es atómico: si el correo falla no se toca la base de datos, pero si la
    /// base de datos falla el correo ya fue entregado al relay.
    pub async fn submit(&self, form: EmailForm) -> Result<EmailRecord, SubmissionError> {
        let record = NewEmailRecord::from(form);

        // 1) Correo
        self.mailer
            .send(&record.recipient, &record.subject, &record.body)
            .await
            .map_err(SubmissionError::Mail)?;
        log::info!("Email entregado al relay para {}", record.recipient);

        // 2) Base de datos
        let saved = self
            .store
            .save(record)
            .await
            .map_err(SubmissionError::Database)?;
        log::info!("Email guardado con id={}", saved.id);

        Ok(saved)
    }
}
