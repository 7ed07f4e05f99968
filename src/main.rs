use actix_web::{web, App, HttpServer};
use dotenv::dotenv;

use crate::app::AppState;
use crate::config::app_config::AppConfig;
use crate::logger::init_logger;

mod app;
mod config;
mod errors;
mod handlers;
mod logger;
mod models;
mod services;
mod views;

#[cfg(test)]
mod tests;

const BIND_ADDR: (&str, u16) = ("0.0.0.0", 5001);

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok(); // Cargar .env al inicio
    init_logger();

    let config = AppConfig::from_env().unwrap_or_else(|e| {
        log::error!("Configuración inválida: {:?}", e);
        std::process::exit(1);
    });

    let state = AppState::from_config(&config).unwrap_or_else(|e| {
        log::error!("No se pudo inicializar la aplicación: {:?}", e);
        std::process::exit(1);
    });

    // Levantar servidor
    log::info!("Levantando servidor en {}:{}", BIND_ADDR.0, BIND_ADDR.1);
    HttpServer::new(move || {
        App::new()
            .wrap(state.flash_messages.clone())
            .app_data(web::Data::new(state.submission_service.clone()))
            .app_data(web::Data::new(state.index_view.clone()))
            .configure(app::init_app)
    })
    .bind(BIND_ADDR)?
    .run()
    .await
}
