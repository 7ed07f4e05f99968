//! views/index_view.rs
//! Página única: formulario + mensajes flash pendientes.

use anyhow::{Context, Result};
use handlebars::Handlebars;
use serde::Serialize;
use serde_json::json;

const INDEX_TEMPLATE: &str = "index";

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FlashView {
    pub level: String,
    pub content: String,
}

#[derive(Clone)]
pub struct IndexView {
    hbs: Handlebars<'static>,
}

impl IndexView {
    pub fn new() -> Result<Self> {
        let mut hbs = Handlebars::new();
        hbs.set_strict_mode(true);
        hbs.register_template_string(INDEX_TEMPLATE, include_str!("../../templates/index.hbs"))
            .context("No se pudo registrar la plantilla index")?;
        Ok(Self { hbs })
    }

    /// El contenido de los mensajes se escapa (puede traer el destinatario tal cual).
    pub fn render(&self, messages: &[FlashView]) -> Result<String> {
        self.hbs
            .render(INDEX_TEMPLATE, &json!({ "messages": messages }))
            .context("No se pudo renderizar la plantilla index")
    }
}
