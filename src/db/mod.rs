use crate::service::filesystem::data_dir_file_path;
use crate::{Error, Result};
use deadpool_sqlite::{Config, Pool, Runtime};
use rusqlite::Connection;
use serde::Deserialize;
use std::fmt;
use tracing::info;

pub mod access_token;
pub mod admin;
pub mod conf;
pub mod daily_report;
pub mod fish;
pub mod migration;

const DB_FILE_NAME: &str = "perikanan.db";

pub fn open_connection() -> Result<Connection> {
    let conn = Connection::open(data_dir_file_path(DB_FILE_NAME)?)?;
    // WAL mode is persisted in the db file, pooled connections inherit it
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.pragma_update(None, "synchronous", "NORMAL")?;
    Ok(conn)
}

pub fn pool() -> Result<Pool> {
    Config::new(data_dir_file_path(DB_FILE_NAME)?)
        .create_pool(Runtime::Tokio1)
        .map_err(Into::into)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Asc => write!(f, "ASC"),
            SortOrder::Desc => write!(f, "DESC"),
        }
    }
}

pub fn run_command(args: &[String], conn: Connection) -> Result<()> {
    let first_arg = match args.first() {
        Some(some) => some,
        None => Err(Error::Cli("No DB actions passed".into()))?,
    };

    match first_arg.as_str() {
        // Migrations are applied on every start
        "migrate" => {}
        "path" => info!(path = ?conn.path(), "Database location"),
        _ => Err(Error::Cli(format!("Unknown command: {first_arg}")))?,
    }

    Ok(())
}

#[cfg(test)]
pub mod test {
    use deadpool_sqlite::{Config, Pool, Runtime};
    use rusqlite::Connection;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static MEM_DB_COUNTER: AtomicUsize = AtomicUsize::new(1);

    pub fn conn() -> Connection {
        let mut conn = Connection::open_in_memory().unwrap();
        super::migration::run(&mut conn).unwrap();
        conn
    }

    // The first connection has to stay open, otherwise the shared in-memory db is dropped
    pub fn pool() -> Pool {
        let uri = format!(
            "file::testdb_{}:?mode=memory&cache=shared",
            MEM_DB_COUNTER.fetch_add(1, Ordering::Relaxed)
        );
        let mut conn = Connection::open(&uri).unwrap();
        super::migration::run(&mut conn).unwrap();
        let pool = Config::new(uri).create_pool(Runtime::Tokio1).unwrap();
        std::mem::forget(conn);
        pool
    }

    // Shared-cache memory dbs fail concurrent writers with SQLITE_LOCKED instead of waiting
    pub fn file_pool(dir: &Path) -> Pool {
        let path = dir.join("test.db");
        let mut conn = Connection::open(&path).unwrap();
        conn.pragma_update(None, "journal_mode", "WAL").unwrap();
        super::migration::run(&mut conn).unwrap();
        Config::new(path).create_pool(Runtime::Tokio1).unwrap()
    }
}
