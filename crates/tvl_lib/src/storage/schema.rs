use rusqlite::{Connection, Result};

pub fn create_tables(conn: &Connection) -> Result<()> {
    // Append-only TVL history
    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS tvl (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            value TEXT NOT NULL,                      -- canonical decimal string, USD
            computed_at INTEGER NOT NULL              -- unix milliseconds, UTC
        )
        "#,
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_tvl_computed_at ON tvl(computed_at DESC, id DESC)",
        [],
    )?;

    Ok(())
}
