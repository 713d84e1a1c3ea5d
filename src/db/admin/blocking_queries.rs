use super::schema::{self, Admin, Columns};
use crate::Result;
use rusqlite::{params, Connection, OptionalExtension};

pub fn insert(name: &str, password: &str, conn: &Connection) -> Result<Admin> {
    let sql = format!(
        r#"
            INSERT INTO {table} ({name}, {password})
            VALUES (?1, ?2)
            RETURNING {projection}
        "#,
        table = schema::TABLE_NAME,
        name = Columns::Name.as_str(),
        password = Columns::Password.as_str(),
        projection = Admin::projection(),
    );
    conn.query_row(&sql, params![name, password], Admin::mapper())
        .map_err(Into::into)
}

pub fn select_by_id(id: i64, conn: &Connection) -> Result<Option<Admin>> {
    let sql = format!(
        r#"
            SELECT {projection}
            FROM {table}
            WHERE {id} = ?1
        "#,
        projection = Admin::projection(),
        table = schema::TABLE_NAME,
        id = Columns::Id.as_str(),
    );
    conn.query_row(&sql, params![id], Admin::mapper())
        .optional()
        .map_err(Into::into)
}

pub fn select_by_name(name: &str, conn: &Connection) -> Result<Option<Admin>> {
    let sql = format!(
        r#"
            SELECT {projection}
            FROM {table}
            WHERE {name} = ?1
        "#,
        projection = Admin::projection(),
        table = schema::TABLE_NAME,
        name = Columns::Name.as_str(),
    );
    conn.query_row(&sql, params![name], Admin::mapper())
        .optional()
        .map_err(Into::into)
}

pub fn count(conn: &Connection) -> Result<i64> {
    let sql = format!("SELECT count(*) FROM {table}", table = schema::TABLE_NAME);
    conn.query_row(&sql, [], |row| row.get(0))
        .map_err(Into::into)
}

#[cfg(test)]
mod test {
    use crate::db::test::conn;
    use crate::Result;

    #[test]
    fn insert() -> Result<()> {
        let conn = conn();
        let admin = super::insert("admin", "hash", &conn)?;
        assert_eq!("admin", admin.name);
        assert_eq!("hash", admin.password);
        assert_eq!(Some(admin), super::select_by_id(1, &conn)?);
        Ok(())
    }

    #[test]
    fn insert_duplicate_name() -> Result<()> {
        let conn = conn();
        super::insert("admin", "hash", &conn)?;
        assert!(super::insert("admin", "hash", &conn).is_err());
        assert_eq!(1, super::count(&conn)?);
        Ok(())
    }

    #[test]
    fn select_by_name() -> Result<()> {
        let conn = conn();
        assert_eq!(None, super::select_by_name("admin", &conn)?);
        let admin = super::insert("admin", "hash", &conn)?;
        assert_eq!(Some(admin), super::select_by_name("admin", &conn)?);
        Ok(())
    }
}
