use crate::Result;
use include_dir::include_dir;
use include_dir::Dir;
use rusqlite::Connection;
use std::fmt;
use tracing::info;
use tracing::warn;

static MIGRATIONS_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/migrations");

struct Migration {
    version: i16,
    sql: String,
}

impl fmt::Display for Migration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {})",
            self.version,
            self.sql
                .replace("\n", "")
                .replace("    ", "")
                .replace(";", "; "),
        )
    }
}

pub fn run(conn: &mut Connection) -> Result<()> {
    execute_migrations(&embedded_migrations()?, conn)
}

// Files are named 1.sql, 2.sql, ... and the first gap ends the sequence
fn embedded_migrations() -> Result<Vec<Migration>> {
    let mut res = vec![];

    for version in 1.. {
        let file_name = format!("{version}.sql");
        let Some(file) = MIGRATIONS_DIR.get_file(&file_name) else {
            break;
        };
        let sql = file.contents_utf8().ok_or(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("Can't read {file_name} in UTF-8"),
        ))?;
        res.push(Migration {
            version,
            sql: sql.to_string(),
        });
    }

    Ok(res)
}

fn schema_version(conn: &Connection) -> Result<i16> {
    conn.query_row("SELECT user_version FROM pragma_user_version", [], |row| {
        row.get(0)
    })
    .map_err(Into::into)
}

fn execute_migrations(migrations: &[Migration], conn: &mut Connection) -> Result<()> {
    let mut schema_ver = schema_version(conn)?;

    let new_migrations: Vec<&Migration> = migrations
        .iter()
        .filter(|it| it.version > schema_ver)
        .collect();

    for migration in new_migrations {
        warn!(%migration, "Found new migration");
        let tx = conn.transaction()?;
        tx.execute_batch(&migration.sql)?;
        tx.execute_batch(&format!("PRAGMA user_version={}", migration.version))?;
        tx.commit()?;
        schema_ver = migration.version;
    }

    info!(schema_ver, "Database schema is up to date");

    Ok(())
}
