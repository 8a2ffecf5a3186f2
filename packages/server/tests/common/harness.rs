//! Test harness providing a migrated database per test.
//!
//! SQLite databases are cheap, so unlike container-backed setups each test
//! gets its own temp-dir database and full isolation.

use sqlx::SqlitePool;
use tempfile::TempDir;
use test_context::AsyncTestContext;

use classtrack_core::persistence::db;
use classtrack_core::persistence::{EntityFactory, Lookup, RootWriter};

/// Per-test infrastructure: a fresh, fully migrated database.
///
/// # Example
///
/// ```ignore
/// #[test_context(TestHarness)]
/// #[tokio::test]
/// async fn my_test(ctx: &TestHarness) {
///     let lookup = ctx.lookup();
///     // ... test code
/// }
/// ```
pub struct TestHarness {
    /// Database pool - use this for test fixtures.
    pub db_pool: SqlitePool,
    // Keep the directory alive for the duration of the test.
    _dir: TempDir,
}

impl TestHarness {
    pub fn factory(&self) -> EntityFactory {
        EntityFactory::new(self.db_pool.clone())
    }

    pub fn writer(&self) -> RootWriter {
        RootWriter::new(self.db_pool.clone())
    }

    pub fn lookup(&self) -> Lookup {
        Lookup::new(self.db_pool.clone())
    }
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        // Respect RUST_LOG; try_init avoids panicking when another test won.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let url = format!("sqlite:{}", dir.path().join("classtrack.db").display());

        let pool = db::connect(&url).await.expect("failed to open test database");
        db::migrate(&pool).await.expect("failed to run migrations");

        Self {
            db_pool: pool,
            _dir: dir,
        }
    }

    async fn teardown(self) {
        self.db_pool.close().await;
    }
}
