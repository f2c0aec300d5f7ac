use rusqlite::{Connection, OptionalExtension, params};

use super::DbResult;
use crate::models::Todo;

/// One request's unit of work: an open connection with a transaction in
/// progress.
///
/// Reads and writes go through the same transaction. Call [`Session::commit`]
/// to persist mutations; dropping the session without committing rolls them
/// back and closes the connection.
pub struct Session {
    conn: Connection,
}

impl Session {
    pub(super) fn begin(conn: Connection) -> DbResult<Self> {
        conn.execute_batch("BEGIN")?;
        Ok(Session { conn })
    }

    /// Commit the transaction and release the connection.
    pub fn commit(self) -> DbResult<()> {
        self.conn.execute_batch("COMMIT")?;
        Ok(())
    }

    pub fn list_todos(&self) -> DbResult<Vec<Todo>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, content FROM todos ORDER BY id ASC")?;
        let rows = stmt.query_map([], row_to_todo)?;

        let mut todos = Vec::new();
        for row in rows {
            todos.push(row?);
        }
        Ok(todos)
    }

    pub fn insert_todo(&self, content: &str) -> DbResult<Todo> {
        self.conn
            .execute("INSERT INTO todos (content) VALUES (?1)", params![content])?;
        Ok(Todo {
            id: self.conn.last_insert_rowid(),
            content: content.to_string(),
        })
    }

    pub fn get_todo(&self, id: i64) -> DbResult<Option<Todo>> {
        let todo = self
            .conn
            .query_row(
                "SELECT id, content FROM todos WHERE id = ?1",
                params![id],
                row_to_todo,
            )
            .optional()?;
        Ok(todo)
    }

    /// Overwrite `content` on the row with `id`. Returns `None` when no row
    /// matches, in which case nothing was written.
    pub fn update_todo(&self, id: i64, content: &str) -> DbResult<Option<Todo>> {
        let todo = self
            .conn
            .query_row(
                "UPDATE todos SET content = ?1 WHERE id = ?2 RETURNING id, content",
                params![content, id],
                row_to_todo,
            )
            .optional()?;
        Ok(todo)
    }

    /// Remove the row with `id`. Returns `false` when no row matched.
    pub fn delete_todo(&self, id: i64) -> DbResult<bool> {
        let rows_changed = self
            .conn
            .execute("DELETE FROM todos WHERE id = ?1", params![id])?;
        Ok(rows_changed > 0)
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if self.conn.is_autocommit() {
            return;
        }
        match self.conn.execute_batch("ROLLBACK") {
            Ok(()) => tracing::trace!("session released without commit"),
            Err(e) => tracing::warn!(error = %e, "failed to roll back session"),
        }
    }
}

fn row_to_todo(row: &rusqlite::Row) -> rusqlite::Result<Todo> {
    Ok(Todo {
        id: row.get(0)?,
        content: row.get(1)?,
    })
}
