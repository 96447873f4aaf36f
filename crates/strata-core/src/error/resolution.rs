use super::Error;

/// Error when one or more field resolvers fail or return a value outside
/// the field's declared shape.
///
/// Each failure is attached to the `List.field` path it came from. Sibling
/// fields keep resolving; the failures are gathered here afterwards.
#[derive(Debug)]
pub(super) struct ResolutionError {
    failures: Vec<FieldFailure>,
}

/// A single field's resolution failure.
#[derive(Debug, Clone)]
pub struct FieldFailure {
    path: Box<str>,
    cause: Error,
}

impl FieldFailure {
    /// The `List.field` path of the failing field.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// What went wrong.
    pub fn cause(&self) -> &Error {
        &self.cause
    }
}

impl std::error::Error for ResolutionError {}

impl core::fmt::Display for ResolutionError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        for (i, failure) in self.failures.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(
                f,
                "resolution failed at `{}`: {}",
                failure.path, failure.cause
            )?;
        }
        Ok(())
    }
}

impl Error {
    /// Creates a resolution error for the field at `path`.
    pub fn resolution(path: impl Into<String>, cause: Error) -> Error {
        Error::from(super::ErrorKind::Resolution(ResolutionError {
            failures: vec![FieldFailure {
                path: path.into().into(),
                cause,
            }],
        }))
    }

    /// Merges several errors into one resolution error. Failures of nested
    /// resolution errors are flattened; other errors are kept with an empty
    /// path.
    pub fn resolution_set(errors: impl IntoIterator<Item = Error>) -> Error {
        let mut failures = vec![];

        for err in errors {
            if err.is_resolution() {
                failures.extend(err.resolution_failures().iter().cloned());
            } else {
                failures.push(FieldFailure {
                    path: "".into(),
                    cause: err,
                });
            }
        }

        Error::from(super::ErrorKind::Resolution(ResolutionError { failures }))
    }

    /// Returns `true` if this error is a resolution error.
    pub fn is_resolution(&self) -> bool {
        self.find_resolution().is_some()
    }

    /// The per-field failures of a resolution error. Empty for any other
    /// kind of error.
    pub fn resolution_failures(&self) -> &[FieldFailure] {
        self.find_resolution()
            .map(|err| &err.failures[..])
            .unwrap_or(&[])
    }

    fn find_resolution(&self) -> Option<&ResolutionError> {
        self.find_kind(|kind| match kind {
            super::ErrorKind::Resolution(err) => Some(err),
            _ => None,
        })
    }
}
