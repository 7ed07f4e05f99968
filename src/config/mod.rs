//! config/mod.rs
//! Configuración de la aplicación (SMTP, base de datos, llave secreta).

pub mod app_config;
