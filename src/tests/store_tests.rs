//! tests/store_tests.rs
//! Pruebas de `SqlEmailStore` sobre un SQLite en un directorio temporal.

#[cfg(test)]
mod tests {
    use actix_rt::test;
    use sqlx::{AnyConnection, Connection};

    use crate::models::email_model::NewEmailRecord;
    use crate::services::email_store::{page_offset, Backend, EmailStore, SqlEmailStore};
    use crate::tests::mocks::sqlite_url;

    async fn run_sql(url: &str, sql: &str) {
        let mut conn = AnyConnection::connect(url).await.expect("connect");
        sqlx::query(sql).execute(&mut conn).await.expect("sql");
        conn.close().await.expect("close");
    }

    fn record(recipient: &str, subject: &str, body: &str) -> NewEmailRecord {
        NewEmailRecord {
            recipient: recipient.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        }
    }

    #[test]
    async fn test_save_creates_table_lazily() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = SqlEmailStore::new(sqlite_url(&dir));

        let saved = store
            .save(record("alice@example.com", "Hi", "Hello"))
            .await
            .expect("save");

        assert!(saved.id > 0);
        assert_eq!(saved.recipient, "alice@example.com");
        assert_eq!(saved.subject, "Hi");
        assert_eq!(saved.body, "Hello");

        let (total, items) = store.list(1, 10).await.expect("list");
        assert_eq!(total, 1);
        assert_eq!(items, vec![saved]);
    }

    #[test]
    async fn test_list_on_empty_database() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = SqlEmailStore::new(sqlite_url(&dir));

        let (total, items) = store.list(1, 10).await.expect("list");
        assert_eq!(total, 0);
        assert!(items.is_empty());
    }

    #[test]
    async fn test_identical_records_get_distinct_ids() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = SqlEmailStore::new(sqlite_url(&dir));

        let first = store
            .save(record("bob@example.com", "Same", "Same"))
            .await
            .expect("first");
        let second = store
            .save(record("bob@example.com", "Same", "Same"))
            .await
            .expect("second");

        assert!(second.id > first.id);

        let (total, _) = store.list(1, 10).await.expect("list");
        assert_eq!(total, 2);
    }

    #[test]
    async fn test_list_paginates_newest_first() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = SqlEmailStore::new(sqlite_url(&dir));

        for i in 0..5 {
            store
                .save(record("carol@example.com", &format!("Subject {i}"), "body"))
                .await
                .expect("save");
        }

        let (total, page_one) = store.list(1, 2).await.expect("page 1");
        assert_eq!(total, 5);
        let subjects: Vec<_> = page_one.iter().map(|r| r.subject.as_str()).collect();
        assert_eq!(subjects, vec!["Subject 4", "Subject 3"]);

        let (_, page_three) = store.list(3, 2).await.expect("page 3");
        assert_eq!(page_three.len(), 1);
        assert_eq!(page_three[0].subject, "Subject 0");

        // page 0 se trata como la primera
        let (_, page_zero) = store.list(0, 2).await.expect("page 0");
        assert_eq!(page_zero, page_one);
    }

    #[test]
    async fn test_unreachable_database_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        // Sin mode=rwc SQLite no crea el archivo.
        let url = format!("sqlite://{}", dir.path().join("missing.db").display());
        let store = SqlEmailStore::new(url);

        assert!(store.save(record("dave@example.com", "Hi", "Hello")).await.is_err());
    }

    #[test]
    async fn test_failed_insert_releases_connection() {
        let dir = tempfile::tempdir().expect("tempdir");
        let url = sqlite_url(&dir);
        let store = SqlEmailStore::new(url.clone());

        // Tabla `emails` existente pero sin las columnas esperadas:
        // CREATE TABLE IF NOT EXISTS no la toca y el INSERT falla ya conectado.
        run_sql(&url, "CREATE TABLE emails (id INTEGER PRIMARY KEY, other TEXT)").await;

        let failed = store.save(record("erin@example.com", "Hi", "Hello")).await;
        assert!(failed.is_err());

        // Si la conexión fallida siguiera abierta con su transacción, el DROP
        // chocaría con el lock de escritura.
        run_sql(&url, "DROP TABLE emails").await;

        let saved = store
            .save(record("erin@example.com", "Hi", "Hello"))
            .await
            .expect("save after fixing table");
        assert_eq!(saved.id, 1);

        let (total, _) = store.list(1, 10).await.expect("list");
        assert_eq!(total, 1);
    }

    #[test]
    async fn test_huge_page_is_an_error_not_a_panic() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = SqlEmailStore::new(sqlite_url(&dir));

        assert!(store.list(u64::MAX, 10).await.is_err());
        assert!(store.list(1 << 62, 10).await.is_err());
    }

    #[test]
    async fn test_page_offset_bounds() {
        assert_eq!(page_offset(0, 10).expect("page 0"), 0);
        assert_eq!(page_offset(1, 10).expect("page 1"), 0);
        assert_eq!(page_offset(3, 25).expect("page 3"), 50);
        assert!(page_offset(u64::MAX, 10).is_err());
        assert!(page_offset(1 << 62, 10).is_err());
        // cabe en u64 pero no en i64
        assert!(page_offset((1 << 62) + 1, 2).is_err());
    }

    #[test]
    async fn test_mysql_listing_reads_body_as_text() {
        // TEXT en MySQL llega como BLOB al driver Any; el listado debe castearlo.
        assert!(Backend::MySql
            .select_page_sql()
            .contains("CAST(body AS CHAR) AS body"));
        assert!(Backend::MySql
            .create_table_sql()
            .contains("id INT AUTO_INCREMENT PRIMARY KEY"));
        assert!(!Backend::Sqlite.select_page_sql().contains("CAST"));
    }
}
