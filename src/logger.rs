//! logger.rs
//! Logger con env_logger. `RUST_LOG` manda; sin él, info para la app y
//! warn para sqlx (cada sentencia se loguea en info y ensucia la salida).

const DEFAULT_FILTER: &str = "info,sqlx=warn";

pub fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_FILTER))
        .format_timestamp_secs()
        .format_module_path(false)
        .init();

    log::debug!("Logger inicializado (filtro por defecto: {})", DEFAULT_FILTER);
}
