use super::Error;

/// Error when a schema definition is invalid.
///
/// This occurs when:
/// - A default is illegal for the field's scalar type, or is set on a `many`
///   field
/// - A field operation needs an explicit resolver and none was supplied
/// - A `multi` field contains a subfield that is not a scalar or enum
/// - A relation sets both a foreign key and a relation name, or its target
///   list is not registered
///
/// Every issue found across the schema is reported together; compilation
/// does not stop at the first one.
#[derive(Debug)]
pub(super) struct InvalidSchemaError {
    issues: Vec<SchemaIssue>,
}

/// One configuration problem, scoped to a list and optionally a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaIssue {
    pub list: String,
    pub field: Option<String>,
    pub message: String,
}

impl SchemaIssue {
    pub fn list(list: impl Into<String>, message: impl Into<String>) -> SchemaIssue {
        SchemaIssue {
            list: list.into(),
            field: None,
            message: message.into(),
        }
    }

    pub fn field(
        list: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> SchemaIssue {
        SchemaIssue {
            list: list.into(),
            field: Some(field.into()),
            message: message.into(),
        }
    }
}

impl core::fmt::Display for SchemaIssue {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match &self.field {
            Some(field) => write!(f, "{}.{}: {}", self.list, field, self.message),
            None => write!(f, "{}: {}", self.list, self.message),
        }
    }
}

impl std::error::Error for InvalidSchemaError {}

impl core::fmt::Display for InvalidSchemaError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("invalid schema: ")?;

        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            core::fmt::Display::fmt(issue, f)?;
        }

        Ok(())
    }
}

impl Error {
    /// Creates an invalid schema error carrying every collected issue.
    pub fn invalid_schema(issues: Vec<SchemaIssue>) -> Error {
        Error::from(super::ErrorKind::InvalidSchema(InvalidSchemaError {
            issues,
        }))
    }

    /// Returns `true` if this error is an invalid schema error.
    pub fn is_invalid_schema(&self) -> bool {
        self.find_invalid_schema().is_some()
    }

    /// The issues reported by an invalid schema error. Empty for any other
    /// kind of error.
    pub fn schema_issues(&self) -> &[SchemaIssue] {
        self.find_invalid_schema()
            .map(|err| &err.issues[..])
            .unwrap_or(&[])
    }

    fn find_invalid_schema(&self) -> Option<&InvalidSchemaError> {
        self.find_kind(|kind| match kind {
            super::ErrorKind::InvalidSchema(err) => Some(err),
            _ => None,
        })
    }
}
