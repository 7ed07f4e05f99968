//! services/mod.rs
//! Módulo que agrupa los "servicios": correo, persistencia y la orquestación de ambos.

pub mod email_store;
pub mod mail_service;
pub mod submission_service;
