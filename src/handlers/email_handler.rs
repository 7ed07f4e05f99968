//! handlers/email_handler.rs
//! Consulta de solo lectura de los correos guardados.

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::{
    models::email_model::ListEmailsResponse,
    services::{
        email_store::{page_offset, MAX_PAGE_SIZE},
        submission_service::SubmissionService,
    },
};

#[derive(Deserialize)]
pub struct PaginationQuery {
    page: Option<u64>,
    page_size: Option<u64>,
}

/// GET /api/emails
pub async fn list_emails_endpoint(
    submission_service: web::Data<SubmissionService>,
    query: web::Query<PaginationQuery>,
) -> HttpResponse {
    let page = query.page.unwrap_or(1).max(1);
    let page_size = query.page_size.unwrap_or(10).clamp(1, MAX_PAGE_SIZE);

    if page_offset(page, page_size).is_err() {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Page out of range"
        }));
    }

    match submission_service.store().list(page, page_size).await {
        Ok((total, items)) => HttpResponse::Ok().json(ListEmailsResponse {
            total,
            page,
            page_size,
            items,
        }),
        Err(e) => {
            log::error!("Error listando emails: {:?}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Internal server error"
            }))
        }
    }
}
