//! models/email_model.rs
//! Estructuras del formulario y del registro guardado en la tabla `emails`.

use serde::{Deserialize, Serialize};

/// Campos del formulario HTML (`application/x-www-form-urlencoded`).
#[derive(Debug, Clone, Deserialize)]
pub struct EmailForm {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Registro aún sin id; el id lo asigna la base de datos.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmailRecord {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

impl From<EmailForm> for NewEmailRecord {
    fn from(form: EmailForm) -> Self {
        NewEmailRecord {
            recipient: form.to,
            subject: form.subject,
            body: form.body,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct EmailRecord {
    pub id: i64,
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

impl EmailRecord {
    pub fn from_new(id: i64, new: NewEmailRecord) -> Self {
        EmailRecord {
            id,
            recipient: new.recipient,
            subject: new.subject,
            body: new.body,
        }
    }
}

/// Para listar correos guardados con paginación
#[derive(Debug, Clone, Serialize)]
pub struct ListEmailsResponse {
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
    pub items: Vec<EmailRecord>,
}
