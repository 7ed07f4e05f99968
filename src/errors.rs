//! errors.rs
//! Errores de un envío de formulario: falla el correo o falla la base de datos.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SubmissionError {
    /// El relay SMTP rechazó o no aceptó el mensaje. No se guardó nada.
    #[error("Failed to send email")]
    Mail(#[source] anyhow::Error),

    /// El correo ya salió, pero el registro no se pudo guardar.
    #[error("Failed to save email record")]
    Database(#[source] anyhow::Error),
}

impl SubmissionError {
    pub fn kind(&self) -> &'static str {
        match self {
            SubmissionError::Mail(_) => "mail",
            SubmissionError::Database(_) => "database",
        }
    }
}

impl ResponseError for SubmissionError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        // La causa se queda en el log; al usuario solo le llega la clase de falla.
        HttpResponse::build(self.status_code())
            .content_type("text/plain; charset=utf-8")
            .body(self.to_string())
    }
}
