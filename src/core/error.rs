//! Fatal, run-aborting errors.
//!
//! Only conditions that would corrupt translator-owned data live here. Everything
//! recoverable (unparsable source, invalid catalog JSON, failed translation batch)
//! is reported as an [`crate::issues::Issue`] instead and never aborts a run.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// A message key contains the path separator and would be read back as
    /// nested namespace segments.
    #[error(
        "message key \"{key}\" in {file}:{line} contains a dot; keys would be interpreted as namespaces. \
         Rename the key, or use a marker element to keep dotted text as the default value"
    )]
    KeyContainsSeparator {
        key: String,
        file: String,
        line: usize,
    },

    /// A catalog path would be used both as a namespace and as a message.
    #[error("structural conflict at \"{path}\": {detail}")]
    StructuralConflict { path: String, detail: String },
}

impl ScanError {
    pub(crate) fn namespace_is_message(path: &str) -> Self {
        Self::StructuralConflict {
            path: path.to_string(),
            detail: "path holds a message but a record uses it as a namespace".to_string(),
        }
    }

    pub(crate) fn message_is_namespace(path: &str) -> Self {
        Self::StructuralConflict {
            path: path.to_string(),
            detail: "path holds a namespace but a record assigns a message to it".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_error_names_key_and_location() {
        let err = ScanError::KeyContainsSeparator {
            key: "a.b".to_string(),
            file: "src/app.tsx".to_string(),
            line: 3,
        };
        let message = err.to_string();
        assert!(message.contains("\"a.b\""));
        assert!(message.contains("src/app.tsx:3"));
    }

    #[test]
    fn test_structural_conflict_message() {
        let err = ScanError::namespace_is_message("payment.title");
        assert!(err.to_string().starts_with("structural conflict at \"payment.title\""));
    }
}
