use crate::{logging_driver::DriverOp, ExecLog, LoggingDriver};

use std::sync::{Arc, Mutex};
use strata::Db;
use strata_driver_memory::Memory;

/// Runs one test against a fresh in-memory database.
///
/// Every driver call is recorded so tests can assert on what reached
/// storage.
pub struct DbTest {
    ops_log: Arc<Mutex<Vec<DriverOp>>>,
}

impl DbTest {
    pub fn new() -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        Self {
            ops_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Compiles the schema and connects it to a logging memory driver.
    pub async fn try_setup_db(&mut self, builder: strata::db::Builder) -> strata::Result<Db> {
        let driver = LoggingDriver::new(Box::new(Memory::new()));
        self.ops_log = driver.ops_log_handle();

        builder.connect(driver).await
    }

    pub async fn setup_db(&mut self, builder: strata::db::Builder) -> Db {
        self.try_setup_db(builder).await.unwrap()
    }

    /// The driver calls made so far.
    pub fn log(&self) -> ExecLog {
        ExecLog::new(self.ops_log.clone())
    }

    /// Runs `test_fn` to completion on a current-thread runtime.
    pub fn run_test<F>(&mut self, test_fn: F)
    where
        F: for<'a> FnOnce(
            &'a mut DbTest,
        ) -> std::pin::Pin<Box<dyn std::future::Future<Output = ()> + 'a>>,
    {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("Failed to create Tokio runtime");

        runtime.block_on(test_fn(self));
    }
}

impl Default for DbTest {
    fn default() -> Self {
        Self::new()
    }
}
