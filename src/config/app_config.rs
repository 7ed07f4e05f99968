//! config/app_config.rs
//! Configuración global leída de variables de entorno (o de un .env), con valores por defecto.

use anyhow::{anyhow, Context, Result};
use sha2::{Digest, Sha512};

const DEFAULT_MAIL_SERVER: &str = "mailhog-lol";
const DEFAULT_MAIL_PORT: u16 = 1025;
const DEFAULT_SENDER: &str = "noreply@example.com";
const DEFAULT_DB_HOST: &str = "mysql-db";
const DEFAULT_DB_USER: &str = "flaskuser";
const DEFAULT_DB_PASSWORD: &str = "flaskpass";
const DEFAULT_DB_NAME: &str = "emailsdb";
const DEFAULT_SECRET_KEY: &str = "supersecretkey";

/// Modo de cifrado hacia el relay SMTP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailSecurity {
    /// Texto plano (MailHog y similares)
    None,
    /// STARTTLS
    StartTls,
    /// TLS implícito desde el primer byte
    Wrapper,
}

#[derive(Debug, Clone)]
pub struct MailConfig {
    pub host: String,
    pub port: u16,
    pub security: MailSecurity,
    pub username: Option<String>,
    pub password: Option<String>,
    pub sender: String,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub user: String,
    pub password: String,
    pub name: String,
    /// Si viene `DATABASE_URL`, gana sobre host/user/password/name.
    pub url_override: Option<String>,
}

impl DatabaseConfig {
    /// URL de conexión para `sqlx::AnyConnection`. Usuario y contraseña van
    /// percent-encoded: pueden traer `@`, `/`, `:`, `#` o `%`.
    pub fn url(&self) -> String {
        match &self.url_override {
            Some(url) => url.clone(),
            None => format!(
                "mysql://{}:{}@{}/{}",
                urlencoding::encode(&self.user),
                urlencoding::encode(&self.password),
                self.host,
                self.name
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub mail: MailConfig,
    pub database: DatabaseConfig,
    pub secret_key: String,
}

impl AppConfig {
    /// Lee la configuración del entorno del proceso.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Construye la configuración a partir de cualquier fuente clave -> valor.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let port = match lookup("MAIL_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("MAIL_PORT inválido: {raw:?}"))?,
            None => DEFAULT_MAIL_PORT,
        };

        let use_tls = parse_flag(lookup("MAIL_USE_TLS"), "MAIL_USE_TLS")?;
        let use_ssl = parse_flag(lookup("MAIL_USE_SSL"), "MAIL_USE_SSL")?;
        let security = match (use_ssl, use_tls) {
            (true, _) => MailSecurity::Wrapper,
            (false, true) => MailSecurity::StartTls,
            (false, false) => MailSecurity::None,
        };

        let mail = MailConfig {
            host: get("MAIL_SERVER", DEFAULT_MAIL_SERVER),
            port,
            security,
            username: lookup("MAIL_USERNAME").filter(|v| !v.is_empty()),
            password: lookup("MAIL_PASSWORD").filter(|v| !v.is_empty()),
            sender: get("MAIL_DEFAULT_SENDER", DEFAULT_SENDER),
        };

        let database = DatabaseConfig {
            host: get("DB_HOST", DEFAULT_DB_HOST),
            user: get("DB_USER", DEFAULT_DB_USER),
            password: get("DB_PASSWORD", DEFAULT_DB_PASSWORD),
            name: get("DB_NAME", DEFAULT_DB_NAME),
            url_override: lookup("DATABASE_URL").filter(|v| !v.is_empty()),
        };

        Ok(AppConfig {
            mail,
            database,
            secret_key: get("SECRET_KEY", DEFAULT_SECRET_KEY),
        })
    }

    /// Llave de 64 bytes para firmar la cookie de mensajes flash.
    pub fn cookie_key_material(&self) -> Vec<u8> {
        Sha512::digest(self.secret_key.as_bytes()).to_vec()
    }
}

fn parse_flag(raw: Option<String>, key: &str) -> Result<bool> {
    let Some(raw) = raw else {
        return Ok(false);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(anyhow!("{key} inválido: {other:?}")),
    }
}
