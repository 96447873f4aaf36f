use crate::logging_driver::DriverOp;
use std::sync::{Arc, Mutex};

/// A wrapper around the operations log that provides a clean API for tests
pub struct ExecLog {
    ops: Arc<Mutex<Vec<DriverOp>>>,
}

impl ExecLog {
    pub(crate) fn new(ops: Arc<Mutex<Vec<DriverOp>>>) -> Self {
        Self { ops }
    }

    pub fn len(&self) -> usize {
        self.ops.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.lock().unwrap().is_empty()
    }

    /// Count operations matching the given predicate
    pub fn count<F>(&self, predicate: F) -> usize
    where
        F: Fn(&DriverOp) -> bool,
    {
        self.ops.lock().unwrap().iter().filter(|op| predicate(op)).count()
    }

    /// Number of records written to `list`
    pub fn creates(&self, list: &str) -> usize {
        self.count(|op| matches!(op, DriverOp::Create { list: l, .. } if l == list))
    }

    /// Number of writes of any kind: creates, updates and link changes
    pub fn writes(&self) -> usize {
        self.count(|op| {
            matches!(
                op,
                DriverOp::Create { .. }
                    | DriverOp::Update { .. }
                    | DriverOp::Connect { .. }
                    | DriverOp::Disconnect { .. }
            )
        })
    }

    pub fn clear(&self) {
        self.ops.lock().unwrap().clear();
    }

    /// Remove and return the oldest operation
    pub fn pop(&self) -> Option<DriverOp> {
        let mut ops = self.ops.lock().unwrap();
        (!ops.is_empty()).then(|| ops.remove(0))
    }
}
