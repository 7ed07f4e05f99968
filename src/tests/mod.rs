//! tests/mod.rs
//! Pruebas del servicio: configuración, correo, persistencia y HTTP.

mod store_tests;
