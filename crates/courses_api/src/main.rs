use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use clap::Parser;
use courses_api::{configure, AppConfig, AppState};
use courses_core::{init_logging, SqliteUnitOfWork};
use log::info;
use std::io;
use std::path::PathBuf;

/// Course management HTTP server.
#[derive(Debug, Parser)]
#[command(name = "courses_api", version)]
struct Args {
    /// TOML configuration file; falls back to `COURSES_CONFIG`.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    let config = AppConfig::resolve(args.config)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err.to_string()))?;

    init_logging(&config.logging.level, config.logging.dir.as_deref())
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;

    // Applies pending migrations before the first request.
    SqliteUnitOfWork::open(&config.database.path)
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err.to_string()))?;

    let state = AppState::from_config(&config);
    let bind = (config.server.host.clone(), config.server.port);
    info!(
        "event=server_start module=api status=ok host={} port={} default_semester={}",
        bind.0, bind.1, config.courses.default_semester
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(configure)
    })
    .bind(bind)?
    .run()
    .await
}
