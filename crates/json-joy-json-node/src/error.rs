//! Located errors carried by [`Node`](crate::Node)s.

use crate::types::{Path, PathStep};
use crate::validate::InvalidProperty;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Result type alias for node operations.
pub type NodeResult<T> = Result<T, NodeError>;

/// Shared, type-erased cause of an internal error.
pub type Cause = Arc<dyn StdError + Send + Sync>;

/// What went wrong, independent of where.
#[derive(Debug, Clone, Error)]
pub enum ErrorKind {
    /// No value exists at the path. Not a processing failure.
    #[error("undefined")]
    Undefined,
    #[error("internal error. err={0}")]
    Internal(#[source] Cause),
    #[error("{0}")]
    Unmarshal(#[source] Arc<serde_json::Error>),
    #[error("{0}")]
    Marshal(#[source] Arc<serde_json::Error>),
    #[error("cannot read properties of null (reading '{0}')")]
    ReadOnNull(PathStep),
    #[error("cannot read properties of undefined (reading '{0}')")]
    ReadOnUndefined(PathStep),
    #[error("cannot set properties of null (setting '{0}')")]
    SetOnNull(PathStep),
    #[error("cannot set properties of undefined (setting '{0}')")]
    SetOnUndefined(PathStep),
    /// A step was grafted onto a value that is not the matching container.
    #[error("cannot create property '{step}' on {type_name}")]
    CreateProperty {
        step: PathStep,
        type_name: &'static str,
    },
    /// An array could not be grown far enough to hold the index.
    #[error("array cannot grow to index '{0}'")]
    IndexTooLarge(PathStep),
    #[error(transparent)]
    InvalidProperty(#[from] InvalidProperty),
    #[error("node value is nil")]
    NotEnumerable,
    #[error("node is not {expected}")]
    WrongShape { expected: &'static str },
}

impl PartialEq for ErrorKind {
    fn eq(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
            && self.to_string() == other.to_string()
    }
}

/// An [`ErrorKind`] tagged with the path at which it occurred.
///
/// Renders as `<message> at <path>`, or just `<message>` at the root.
/// [`ErrorKind::Undefined`] always renders as `undefined`.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeError {
    kind: ErrorKind,
    path: Path,
}

impl NodeError {
    /// Tag `kind` with the path it occurred at.
    pub fn new(kind: ErrorKind, path: Path) -> Self {
        Self { kind, path }
    }

    pub(crate) fn internal<E>(path: Path, cause: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::new(ErrorKind::Internal(Arc::new(cause)), path)
    }

    pub(crate) fn unmarshal(path: Path, err: serde_json::Error) -> Self {
        Self::new(ErrorKind::Unmarshal(Arc::new(err)), path)
    }

    pub(crate) fn marshal(path: Path, err: serde_json::Error) -> Self {
        Self::new(ErrorKind::Marshal(Arc::new(err)), path)
    }

    /// What went wrong.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Where it went wrong.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True for [`ErrorKind::Undefined`].
    pub fn is_undefined(&self) -> bool {
        matches!(self.kind, ErrorKind::Undefined)
    }
}

impl fmt::Display for NodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() || self.is_undefined() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{} at {}", self.kind, self.path)
        }
    }
}

impl StdError for NodeError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.kind.source()
    }
}

/// Check whether `err`, or any error in its source chain, is an undefined
/// [`NodeError`].
///
/// # Example
///
/// ```
/// use json_joy_json_node::{is_undefined, parse_str};
///
/// let doc = parse_str(r#"{"key1": "value1"}"#);
/// let err = doc.get("invalid_key").unmarshal::<String>().unwrap_err();
/// assert!(is_undefined(&err));
/// assert_eq!(err.to_string(), "undefined");
/// ```
pub fn is_undefined(err: &(dyn StdError + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        if let Some(node_err) = e.downcast_ref::<NodeError>() {
            if node_err.is_undefined() {
                return true;
            }
        }
        current = e.source();
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(steps: Vec<PathStep>) -> Path {
        steps.into()
    }

    fn key(k: &str) -> PathStep {
        PathStep::Key(k.to_string())
    }

    #[test]
    fn test_display_with_path() {
        let err = NodeError::new(
            ErrorKind::ReadOnNull(key("xxx")),
            path(vec![key("key1"), key("key2"), key("xxx")]),
        );
        assert_eq!(
            err.to_string(),
            "cannot read properties of null (reading 'xxx') at $['key1']['key2']['xxx']"
        );
    }

    #[test]
    fn test_display_at_root_omits_location() {
        let err = NodeError::new(ErrorKind::NotEnumerable, Path::root());
        assert_eq!(err.to_string(), "node value is nil");
    }

    #[test]
    fn test_display_messages() {
        let p = path(vec![PathStep::Index(2)]);
        let cases = [
            (ErrorKind::ReadOnUndefined(PathStep::Index(2)), "cannot read properties of undefined (reading '2') at $[2]"),
            (ErrorKind::SetOnNull(PathStep::Index(2)), "cannot set properties of null (setting '2') at $[2]"),
            (ErrorKind::SetOnUndefined(PathStep::Index(2)), "cannot set properties of undefined (setting '2') at $[2]"),
            (
                ErrorKind::CreateProperty { step: PathStep::Index(2), type_name: "string" },
                "cannot create property '2' on string at $[2]",
            ),
            (ErrorKind::WrongShape { expected: "an array" }, "node is not an array at $[2]"),
            (ErrorKind::IndexTooLarge(PathStep::Index(2)), "array cannot grow to index '2' at $[2]"),
        ];
        for (kind, want) in cases {
            assert_eq!(NodeError::new(kind, p.clone()).to_string(), want);
        }
    }

    #[test]
    fn test_undefined_renders_without_path() {
        let err = NodeError::new(ErrorKind::Undefined, path(vec![key("missing")]));
        assert_eq!(err.to_string(), "undefined");
        assert_eq!(err.path().to_string(), "$['missing']");
    }

    #[test]
    fn test_is_undefined_only_for_undefined() {
        let undefined = NodeError::new(ErrorKind::Undefined, path(vec![key("a")]));
        let null_read = NodeError::new(ErrorKind::ReadOnNull(key("a")), path(vec![key("a")]));
        assert!(is_undefined(&undefined));
        assert!(!is_undefined(&null_read));
    }

    #[test]
    fn test_is_undefined_walks_source_chain() {
        #[derive(Debug, Error)]
        #[error("wrapped")]
        struct Wrapper(#[source] NodeError);

        let wrapped = Wrapper(NodeError::new(ErrorKind::Undefined, Path::root()));
        assert!(is_undefined(&wrapped));
    }

    #[test]
    fn test_internal_error_keeps_cause() {
        let cause = serde_json::from_str::<u8>("x").unwrap_err();
        let message = cause.to_string();
        let err = NodeError::internal(Path::root(), cause);
        assert_eq!(err.to_string(), format!("internal error. err={}", message));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_kind_equality() {
        assert_eq!(ErrorKind::ReadOnNull(key("a")), ErrorKind::ReadOnNull(key("a")));
        assert_ne!(ErrorKind::ReadOnNull(key("a")), ErrorKind::SetOnNull(key("a")));
        assert_ne!(ErrorKind::ReadOnNull(key("a")), ErrorKind::ReadOnNull(key("b")));
    }
}
