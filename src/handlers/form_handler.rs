//! handlers/form_handler.rs
//! GET / (formulario) y POST / (enviar + guardar).

use actix_web::{http::header, web, HttpResponse};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};

use crate::{
    errors::SubmissionError,
    models::email_model::EmailForm,
    services::submission_service::SubmissionService,
    views::index_view::{FlashView, IndexView},
};

/// GET /
pub async fn index_endpoint(
    view: web::Data<IndexView>,
    flash_messages: IncomingFlashMessages,
) -> HttpResponse {
    let messages: Vec<FlashView> = flash_messages
        .iter()
        .map(|m| FlashView {
            level: format!("{:?}", m.level()).to_lowercase(),
            content: m.content().to_string(),
        })
        .collect();

    match view.render(&messages) {
        Ok(html) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(html),
        Err(e) => {
            log::error!("Error renderizando index: {:?}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// POST /
pub async fn submit_email_endpoint(
    submission_service: web::Data<SubmissionService>,
    form: web::Form<EmailForm>,
) -> Result<HttpResponse, SubmissionError> {
    let form = form.into_inner();
    log::info!("Nuevo envío para {}", form.to);

    let record = submission_service.submit(form).await.map_err(|e| {
        log::error!("Envío fallido ({}): {:?}", e.kind(), e);
        e
    })?;

    FlashMessage::success(format!(
        "Email sent to {} and saved in DB!",
        record.recipient
    ))
    .send();

    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, "/"))
        .finish())
}
