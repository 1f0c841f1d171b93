use rusqlite::Row;

/// Column-name based mapping from a SQLite row into a model.
pub trait FromSqliteRow: Sized {
    fn from_row(row: &Row) -> rusqlite::Result<Self>;
}
