//! views/mod.rs
//! Renderizado de páginas HTML con Handlebars.

pub mod index_view;
