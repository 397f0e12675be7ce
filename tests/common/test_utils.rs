use once_cell::sync::OnceCell;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool as Pool, SqlitePoolOptions};
use sqlx::Error;
use std::env;
use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::sync::Mutex;

static TEST_DB: OnceCell<Mutex<Option<TestDb>>> = OnceCell::new();
static DB_PATH: OnceCell<PathBuf> = OnceCell::new();

#[derive(Debug)]
pub struct TestDb {
    pub pool: Pool,
    pub db_path: PathBuf,
}

impl TestDb {
    // Get the database instance - one temp file database per test binary
    pub async fn get_instance() -> Result<Pool, Error> {
        let test_db = TEST_DB.get_or_init(|| Mutex::new(None));
        let mut guard = test_db.lock().await;

        // If the database instance already exists, return it.
        // Avoid creating a new database instance for each test
        if let Some(db) = guard.as_ref() {
            return Ok(db.pool.clone());
        }

        let db = Self::setup_database().await?;
        let pool = db.pool.clone();
        *guard = Some(db);
        Ok(pool)
    }

    async fn setup_database() -> Result<Self, Error> {
        // Configuration the services read from the environment. Set before
        // any pool is handed out, so every test sees the same values.
        env::set_var("JWT_SECRET", "matchday-test-secret");
        env::set_var("BCRYPT_COST", "4");

        let db_path = DB_PATH
            .get_or_init(|| {
                let timestamp = SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .unwrap()
                    .as_nanos();
                env::temp_dir().join(format!(
                    "matchday_test_{}_{}.db",
                    std::process::id(),
                    timestamp
                ))
            })
            .clone();

        let options = SqliteConnectOptions::new()
            .filename(&db_path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(10)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        sqlx::migrate!()
            .run(&pool)
            .await
            .map_err(|e| Error::Migrate(Box::new(e)))?;

        Ok(Self { pool, db_path })
    }

    // Teardown function to remove the database file after the test run
    // (not after each test). Called from a #[dtor] hook, so it stays sync.
    pub fn cleanup_database_sync() -> std::io::Result<()> {
        if let Some(path) = DB_PATH.get() {
            for suffix in ["", "-wal", "-shm"] {
                let mut file = path.clone().into_os_string();
                file.push(suffix);
                let file = PathBuf::from(file);
                if file.exists() {
                    std::fs::remove_file(file)?;
                }
            }
        }
        Ok(())
    }
}
