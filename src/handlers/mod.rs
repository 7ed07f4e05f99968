//! handlers/mod.rs
//! Módulo que agrupa los handlers HTTP.

pub mod email_handler;
pub mod form_handler;
