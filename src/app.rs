//! app.rs
//! Rutas y construcción del estado compartido a partir de `AppConfig`.

use std::sync::Arc;

use actix_web::{cookie::Key, web};
use actix_web_flash_messages::{storage::CookieMessageStore, FlashMessagesFramework};
use anyhow::Result;

use crate::{
    config::app_config::AppConfig,
    handlers::{email_handler, form_handler},
    services::{
        email_store::SqlEmailStore, mail_service::SmtpMailService,
        submission_service::SubmissionService,
    },
    views::index_view::IndexView,
};

pub fn init_app(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/")
            .route(web::get().to(form_handler::index_endpoint))
            .route(web::post().to(form_handler::submit_email_endpoint)),
    )
    .service(
        web::scope("/api")
            .route("/emails", web::get().to(email_handler::list_emails_endpoint)),
    );
}

/// Servicios listos para clonar dentro de cada worker de `HttpServer`.
#[derive(Clone)]
pub struct AppState {
    pub submission_service: SubmissionService,
    pub index_view: IndexView,
    pub flash_messages: FlashMessagesFramework,
}

impl AppState {
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let mailer = SmtpMailService::new(&config.mail)?;
        let store = SqlEmailStore::new(config.database.url());
        Ok(AppState {
            submission_service: SubmissionService::new(Arc::new(mailer), Arc::new(store)),
            index_view: IndexView::new()?,
            flash_messages: flash_messages_framework(config),
        })
    }
}

pub fn flash_messages_framework(config: &AppConfig) -> FlashMessagesFramework {
    let key = Key::from(&config.cookie_key_material());
    let store = CookieMessageStore::builder(key).build();
    FlashMessagesFramework::builder(store).build()
}
