use super::Error;

/// Error when a relation input combines verbs whose intent conflicts.
///
/// This occurs when:
/// - A to-one input supplies more than one of `create`, `connect` and
///   `disconnect`
/// - A to-many input combines `set` with verbs the configured set policy
///   forbids
///
/// The mutation fails; intent is never guessed.
#[derive(Debug)]
pub(super) struct AmbiguousRelationInputError {
    path: Box<str>,
    message: Box<str>,
}

impl std::error::Error for AmbiguousRelationInputError {}

impl core::fmt::Display for AmbiguousRelationInputError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "ambiguous relation input for `{}`: {}",
            self.path, self.message
        )
    }
}

impl Error {
    /// Creates an ambiguous relation input error for the relation field at
    /// `path` (`List.field`).
    pub fn ambiguous_relation_input(
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::AmbiguousRelationInput(
            AmbiguousRelationInputError {
                path: path.into().into(),
                message: message.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is an ambiguous relation input error.
    pub fn is_ambiguous_relation_input(&self) -> bool {
        self.find_kind(|kind| match kind {
            super::ErrorKind::AmbiguousRelationInput(err) => Some(err),
            _ => None,
        })
        .is_some()
    }
}
