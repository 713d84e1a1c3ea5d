pub use error::Error;
mod command;
mod db;
mod error;
mod rest;
mod server;
mod service;
use std::env;
use tracing_subscriber::EnvFilter;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[actix_web::main]
async fn main() -> Result<()> {
    init_logging();

    let mut conn = db::open_connection()?;
    db::migration::run(&mut conn)?;

    let args: Vec<String> = env::args().collect();

    let command = match args.get(1) {
        Some(some) => some,
        None => Err(Error::Cli("No actions passed".into()))?,
    };

    match command.as_str() {
        "server" => server::run().await?,
        "db" => db::run_command(&args[2..], conn)?,
        "add-admin" => command::add_admin::run(&args[2..], &conn)?,
        first_arg => Err(Error::Cli(format!("Unknown command: {first_arg}")))?,
    }

    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if cfg!(debug_assertions) {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .without_time()
            .init();
    }
}
