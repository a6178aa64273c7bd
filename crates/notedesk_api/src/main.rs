//! API server entry point.

use actix_web::{web, App, HttpServer};
use clap::Parser;
use notedesk_api::{routes, ApiState};
use notedesk_core::db::open_db;
use notedesk_core::{default_log_level, init_logging};
use std::io;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "notedesk_api", about = "NoteDesk REST API server")]
struct Args {
    /// Listen address.
    #[arg(long, default_value = "127.0.0.1:8000")]
    addr: String,
    /// SQLite database file.
    #[arg(long, default_value = "notes.db")]
    db: PathBuf,
    /// Absolute log directory. File logging is disabled when unset.
    #[arg(long)]
    log_dir: Option<String>,
    /// Log level (trace|debug|info|warn|error).
    #[arg(long)]
    log_level: Option<String>,
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();

    if let Some(log_dir) = &args.log_dir {
        let level = args.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).map_err(io::Error::other)?;
    }

    // Apply migrations up front so the first request never races bootstrap.
    open_db(&args.db).map_err(io::Error::other)?;

    let state = ApiState::new(&args.db);
    log::info!(
        "event=api_start module=api status=ok addr={} db={}",
        args.addr,
        args.db.display()
    );

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .configure(routes::configure)
    })
    .bind(&args.addr)?
    .run()
    .await
}
