use crate::{Error, Result, SchemaIssue};

/// Collects schema problems so one build reports all of them.
#[derive(Debug, Default)]
pub(crate) struct ErrorSet {
    issues: Vec<SchemaIssue>,
}

impl ErrorSet {
    pub(crate) fn new() -> ErrorSet {
        ErrorSet::default()
    }

    pub(crate) fn list(&mut self, list: &str, message: impl Into<String>) {
        self.push(SchemaIssue::list(list, message));
    }

    pub(crate) fn field(&mut self, list: &str, field: &str, message: impl Into<String>) {
        self.push(SchemaIssue::field(list, field, message));
    }

    pub(crate) fn push(&mut self, issue: SchemaIssue) {
        tracing::debug!(%issue, "schema issue");
        self.issues.push(issue);
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.issues.len()
    }

    pub(crate) fn into_result(self) -> Result<()> {
        if self.issues.is_empty() {
            Ok(())
        } else {
            Err(Error::invalid_schema(self.issues))
        }
    }
}
