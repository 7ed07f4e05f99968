//! services/email_store.rs
//! Persistencia de `EmailRecord` en la tabla `emails`.
//! Una conexión nueva por llamada, sin pool; se cierra en todos los caminos.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use sqlx::{AnyConnection, Connection};

use crate::models::email_model::{EmailRecord, NewEmailRecord};

const CREATE_TABLE_MYSQL: &str = r#"
    CREATE TABLE IF NOT EXISTS emails (
        id INT AUTO_INCREMENT PRIMARY KEY,
        recipient VARCHAR(255),
        subject VARCHAR(255),
        body TEXT
    )
"#;

const CREATE_TABLE_SQLITE: &str = r#"
    CREATE TABLE IF NOT EXISTS emails (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        recipient VARCHAR(255),
        subject VARCHAR(255),
        body TEXT
    )
"#;

pub const MAX_PAGE_SIZE: u64 = 100;

const INSERT_SQL: &str = "INSERT INTO emails (recipient, subject, body) VALUES (?, ?, ?)";

const INSERT_RETURNING_SQL: &str =
    "INSERT INTO emails (recipient, subject, body) VALUES (?, ?, ?) RETURNING id";

// En MySQL una columna TEXT llega como BLOB al driver Any; el CAST la devuelve como texto.
const SELECT_PAGE_MYSQL: &str = "SELECT id, recipient, subject, CAST(body AS CHAR) AS body \
     FROM emails ORDER BY id DESC LIMIT ? OFFSET ?";

const SELECT_PAGE_SQLITE: &str =
    "SELECT id, recipient, subject, body FROM emails ORDER BY id DESC LIMIT ? OFFSET ?";

/// Desplazamiento SQL de la página `page` (desde 1); error si no cabe en un `i64`.
pub fn page_offset(page: u64, page_size: u64) -> Result<i64> {
    page.max(1)
        .checked_sub(1)
        .and_then(|p| p.checked_mul(page_size))
        .and_then(|offset| i64::try_from(offset).ok())
        .ok_or_else(|| anyhow!("Page {page} is out of range"))
}

#[async_trait]
pub trait EmailStore: Send + Sync {
    /// Asegura la tabla y guarda el registro; devuelve el registro con su id.
    async fn save(&self, record: NewEmailRecord) -> Result<EmailRecord>;

    /// Total de registros y la página pedida, más recientes primero.
    async fn list(&self, page: u64, page_size: u64) -> Result<(u64, Vec<EmailRecord>)>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Backend {
    MySql,
    Sqlite,
}

impl Backend {
    fn of(conn: &AnyConnection) -> Result<Self> {
        match conn.backend_name() {
            "MySQL" => Ok(Backend::MySql),
            "SQLite" => Ok(Backend::Sqlite),
            other => Err(anyhow!("Unsupported database backend: {other}")),
        }
    }

    pub(crate) fn create_table_sql(self) -> &'static str {
        match self {
            Backend::MySql => CREATE_TABLE_MYSQL,
            Backend::Sqlite => CREATE_TABLE_SQLITE,
        }
    }

    pub(crate) fn select_page_sql(self) -> &'static str {
        match self {
            Backend::MySql => SELECT_PAGE_MYSQL,
            Backend::Sqlite => SELECT_PAGE_SQLITE,
        }
    }
}

#[derive(Clone, Debug)]
pub struct SqlEmailStore {
    database_url: String,
}

impl SqlEmailStore {
    pub fn new(database_url: impl Into<String>) -> Self {
        sqlx::any::install_default_drivers();
        SqlEmailStore {
            database_url: database_url.into(),
        }
    }

    async fn connect(&self) -> Result<AnyConnection> {
        AnyConnection::connect(&self.database_url)
            .await
            .context("Failed to open database connection")
    }

    async fn insert(conn: &mut AnyConnection, record: NewEmailRecord) -> Result<EmailRecord> {
        let backend = Backend::of(conn)?;
        let mut tx = conn.begin().await.context("Failed to begin transaction")?;

        sqlx::query(backend.create_table_sql())
            .execute(&mut *tx)
            .await
            .context("Failed to create emails table")?;

        // El driver Any de SQLite no reporta last_insert_id; ahí se usa RETURNING.
        let id = match backend {
            Backend::MySql => sqlx::query(INSERT_SQL)
                .bind(record.recipient.clone())
                .bind(record.subject.clone())
                .bind(record.body.clone())
                .execute(&mut *tx)
                .await
                .context("Failed to insert email record")?
                .last_insert_id()
                .ok_or_else(|| anyhow!("Database did not report the inserted id"))?,
            Backend::Sqlite => sqlx::query_scalar::<_, i64>(INSERT_RETURNING_SQL)
                .bind(record.recipient.clone())
                .bind(record.subject.clone())
                .bind(record.body.clone())
                .fetch_one(&mut *tx)
                .await
                .context("Failed to insert email record")?,
        };

        tx.commit().await.context("Failed to commit email record")?;

        Ok(EmailRecord::from_new(id, record))
    }

    async fn select_page(
        conn: &mut AnyConnection,
        offset: i64,
        page_size: u64,
    ) -> Result<(u64, Vec<EmailRecord>)> {
        let backend = Backend::of(conn)?;
        sqlx::query(backend.create_table_sql())
            .execute(&mut *conn)
            .await
            .context("Failed to create emails table")?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM emails")
            .fetch_one(&mut *conn)
            .await
            .context("Failed to count email records")?;

        let items = sqlx::query_as::<_, EmailRecord>(backend.select_page_sql())
            .bind(page_size as i64)
            .bind(offset)
            .fetch_all(&mut *conn)
            .await
            .context("Failed to list email records")?;

        Ok((total.max(0) as u64, items))
    }

    /// Cierra la conexión pase lo que pase con `outcome`.
    async fn release<T>(conn: AnyConnection, outcome: Result<T>) -> Result<T> {
        let closed = conn.close().await;
        match (outcome, closed) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(e)) => {
                Err(anyhow::Error::new(e).context("Failed to close database connection"))
            }
            (Err(e), close_result) => {
                if let Err(close_err) = close_result {
                    log::warn!("Error cerrando conexión tras una falla: {}", close_err);
                }
                Err(e)
            }
        }
    }
}

#[async_trait]
impl EmailStore for SqlEmailStore {
    async fn save(&self, record: NewEmailRecord) -> Result<EmailRecord> {
        let mut conn = self.connect().await?;
        let outcome = Self::insert(&mut conn, record).await;
        Self::release(conn, outcome).await
    }

    async fn list(&self, page: u64, page_size: u64) -> Result<(u64, Vec<EmailRecord>)> {
        let page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        let offset = page_offset(page, page_size)?;

        let mut conn = self.connect().await?;
        let outcome = Self::select_page(&mut conn, offset, page_size).await;
        Self::release(conn, outcome).await
    }
}
