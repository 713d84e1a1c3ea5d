use crate::{service, Error, Result};
use rusqlite::Connection;

pub fn run(args: &[String], conn: &Connection) -> Result<()> {
    let (name, password) = match args {
        [name, password] => (name, password),
        _ => Err(Error::Cli("Usage: add-admin <name> <password>".into()))?,
    };
    service::admin::add(name, password, conn)?;
    Ok(())
}
