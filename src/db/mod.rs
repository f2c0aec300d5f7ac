use rusqlite::{Connection, OptionalExtension, params};
use std::path::{Path, PathBuf};
use std::time::Duration;

mod session;

pub use session::Session;

/// Current schema version written to the `config` table by `migrate()`.
pub const SCHEMA_VERSION: i32 = 1;

/// How long a connection waits on a locked database before giving up.
const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage task join error: {0}")]
    Task(String),

    #[error("invalid schema version: {0}")]
    SchemaVersion(String),
}

/// Process-root handle to the todo database.
///
/// Holds only connection configuration, so it is cheap to clone into each
/// request. Every unit of work opens its own connection through
/// [`Store::session`] and releases it when the [`Session`] is dropped.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
    busy_timeout: Duration,
}

impl Store {
    /// Create a handle for the database at `path`. Nothing is opened yet.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Store {
            path: path.as_ref().to_path_buf(),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }

    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a connection and begin a unit of work.
    pub fn session(&self) -> DbResult<Session> {
        let conn = self.connect()?;
        Session::begin(conn)
    }

    /// Run `func` with a fresh session on a blocking worker thread.
    ///
    /// The session is moved into `func`; mutations must call
    /// [`Session::commit`] before returning. Whatever is not committed when
    /// the session drops is rolled back.
    pub async fn run<T, F>(&self, func: F) -> DbResult<T>
    where
        T: Send + 'static,
        F: FnOnce(Session) -> DbResult<T> + Send + 'static,
    {
        let store = self.clone();
        tokio::task::spawn_blocking(move || {
            let session = store.session()?;
            func(session)
        })
        .await
        .map_err(|e| DbError::Task(e.to_string()))?
    }

    /// Create the schema tables if they don't exist and record
    /// [`SCHEMA_VERSION`] on first run.
    pub fn migrate(&self) -> DbResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = self.connect()?;
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS config (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS todos (
                id      INTEGER PRIMARY KEY AUTOINCREMENT,
                content TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_todos_content ON todos(content);
            ",
        )?;

        conn.execute(
            "INSERT OR IGNORE INTO config (key, value) VALUES ('schema_version', ?1)",
            params![SCHEMA_VERSION.to_string()],
        )?;
        Ok(())
    }

    /// Read the recorded schema version, if the database has been migrated.
    pub fn schema_version(&self) -> DbResult<i32> {
        let conn = self.connect()?;
        get_schema_version(&conn)
    }

    fn connect(&self) -> DbResult<Connection> {
        let conn = Connection::open(&self.path)?;
        conn.busy_timeout(self.busy_timeout)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
        Ok(conn)
    }
}

fn get_schema_version(conn: &Connection) -> DbResult<i32> {
    let value: Option<String> = conn
        .query_row(
            "SELECT value FROM config WHERE key = 'schema_version'",
            [],
            |row| row.get(0),
        )
        .optional()?;
    match value {
        Some(v) => v
            .parse::<i32>()
            .map_err(|e| DbError::SchemaVersion(format!("{v}: {e}"))),
        None => Ok(0),
    }
}
