//! The located JSON node.

use crate::error::{ErrorKind, NodeError, NodeResult};
use crate::types::{Path, PathStep};
use serde::de::DeserializeOwned;
use serde::ser::{Error as _, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A JSON value at a path, or the reason there is no usable value there.
///
/// Nodes are immutable, cheap to clone, and safe to share between threads.
/// Navigation ([`get`](Node::get)) and mutation ([`set`](Node::set_in)) never
/// fail outright: failures travel inside the returned node and surface from
/// [`error`](Node::error), [`marshal`](Node::marshal) or
/// [`unmarshal`](Node::unmarshal).
#[derive(Clone)]
pub struct Node(Arc<NodeInner>);

struct NodeInner {
    /// The node this one was reached from. Only read while grafting a `set`
    /// back onto its ancestors.
    parent: Option<Node>,
    value: Option<Value>,
    path: Path,
    error: Option<NodeError>,
}

impl Node {
    /// Wrap `value` as a document root.
    pub fn new(value: Value) -> Self {
        Self::build(None, Path::root(), Some(value), None)
    }

    pub(crate) fn build(
        parent: Option<Node>,
        path: Path,
        value: Option<Value>,
        error: Option<NodeError>,
    ) -> Self {
        Node(Arc::new(NodeInner {
            parent,
            value,
            path,
            error,
        }))
    }

    /// Root node carrying `error` and no value.
    pub(crate) fn failed_root(error: NodeError) -> Self {
        Self::build(None, Path::root(), None, Some(error))
    }

    /// Child of `self` at `step` holding `value`.
    pub(crate) fn child(&self, step: PathStep, value: Value) -> Node {
        let path = self.path().append(step);
        Self::build(Some(self.clone()), path, Some(value), None)
    }

    /// Child of `self` at `step` that failed with `kind`.
    pub(crate) fn failed_child(&self, step: PathStep, kind: ErrorKind) -> Node {
        let path = self.path().append(step);
        let error = NodeError::new(kind, path.clone());
        Self::build(Some(self.clone()), path, None, Some(error))
    }

    /// Same place in the tree as `self`, holding `value` instead.
    pub(crate) fn with_value(&self, value: Value) -> Node {
        Self::build(self.0.parent.clone(), self.path().clone(), Some(value), None)
    }

    /// Same place and value as `self`, failed with `error` instead.
    pub(crate) fn with_error(&self, error: NodeError) -> Node {
        Self::build(
            self.0.parent.clone(),
            self.path().clone(),
            self.0.value.clone(),
            Some(error),
        )
    }

    pub(crate) fn parent(&self) -> Option<&Node> {
        self.0.parent.as_ref()
    }

    /// The raw value slot, regardless of error state.
    pub(crate) fn raw_value(&self) -> Option<&Value> {
        self.0.value.as_ref()
    }

    /// The value, or `None` when the node is undefined or failed.
    pub fn value(&self) -> Option<&Value> {
        match self.0.error {
            Some(_) => None,
            None => self.0.value.as_ref(),
        }
    }

    /// Where this node was reached from the document root.
    pub fn path(&self) -> &Path {
        &self.0.path
    }

    /// The error carried by this node, including [`ErrorKind::Undefined`].
    pub fn error(&self) -> Option<&NodeError> {
        self.0.error.as_ref()
    }

    /// True when no value exists at this node's path.
    pub fn is_undefined(&self) -> bool {
        self.error().is_some_and(NodeError::is_undefined)
    }

    /// True when the value is JSON `null`.
    pub fn is_null(&self) -> bool {
        matches!(self.value(), Some(Value::Null))
    }

    /// Failure other than undefined, which short-circuits every operation.
    pub(crate) fn is_failed(&self) -> bool {
        self.error().is_some_and(|e| !e.is_undefined())
    }

    /// The elements of an array value, each as a child node.
    ///
    /// # Errors
    ///
    /// Returns the node's own error if it has one, or a located error when the
    /// value is `null` or not an array.
    pub fn as_array(&self) -> NodeResult<Vec<Node>> {
        if let Some(err) = self.error() {
            return Err(err.clone());
        }
        match self.raw_value() {
            Some(Value::Array(elements)) => Ok(elements
                .iter()
                .enumerate()
                .map(|(i, v)| self.child(PathStep::Index(i), v.clone()))
                .collect()),
            Some(Value::Null) | None => Err(self.located(ErrorKind::NotEnumerable)),
            Some(_) => Err(self.located(ErrorKind::WrongShape {
                expected: "an array",
            })),
        }
    }

    /// The members of an object value, each as a child node.
    ///
    /// Iteration order of the returned map carries no meaning.
    ///
    /// # Errors
    ///
    /// Same as [`as_array`](Node::as_array), for objects.
    pub fn as_object(&self) -> NodeResult<BTreeMap<String, Node>> {
        if let Some(err) = self.error() {
            return Err(err.clone());
        }
        match self.raw_value() {
            Some(Value::Object(members)) => Ok(members
                .iter()
                .map(|(k, v)| (k.clone(), self.child(PathStep::Key(k.clone()), v.clone())))
                .collect()),
            Some(Value::Null) | None => Err(self.located(ErrorKind::NotEnumerable)),
            Some(_) => Err(self.located(ErrorKind::WrongShape {
                expected: "an object",
            })),
        }
    }

    /// Encode the value as compact JSON.
    ///
    /// # Errors
    ///
    /// Returns the node's own error without encoding anything, or a
    /// [`ErrorKind::Marshal`] error located at this node.
    pub fn marshal(&self) -> NodeResult<Vec<u8>> {
        if let Some(err) = self.error() {
            return Err(err.clone());
        }
        let value = self.raw_value().unwrap_or(&Value::Null);
        serde_json::to_vec(value).map_err(|e| NodeError::marshal(self.path().clone(), e))
    }

    /// Decode the value into `T`.
    ///
    /// The value is encoded and then decoded into `T`, so `T`'s
    /// `Deserialize` rules (renames, defaults, numeric range checks) apply
    /// exactly as they would to the raw JSON text.
    ///
    /// # Errors
    ///
    /// Returns the node's own error, or an [`ErrorKind::Unmarshal`] error
    /// located at this node when `T` rejects the value.
    pub fn unmarshal<T: DeserializeOwned>(&self) -> NodeResult<T> {
        let data = self.marshal()?;
        serde_json::from_slice(&data).map_err(|e| NodeError::unmarshal(self.path().clone(), e))
    }

    /// Decode the value into `dest`, replacing its previous contents.
    ///
    /// `dest` is left untouched on failure.
    pub fn unmarshal_into<T: DeserializeOwned>(&self, dest: &mut T) -> NodeResult<()> {
        *dest = self.unmarshal()?;
        Ok(())
    }

    fn located(&self, kind: ErrorKind) -> NodeError {
        NodeError::new(kind, self.path().clone())
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        Node::new(value)
    }
}

/// Two nodes are interchangeable when their path, value and error agree.
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.path() == other.path()
            && self.error() == other.error()
            && self.value() == other.value()
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("path", &format_args!("{}", self.path()))
            .field("value", &self.value())
            .field("error", &self.error())
            .finish()
    }
}

/// Serializes the node's value, so a node can be passed to
/// [`set`](Node::set). A node that carries an error refuses to serialize.
impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if let Some(err) = self.error() {
            return Err(S::Error::custom(err));
        }
        match self.raw_value() {
            Some(value) => value.serialize(serializer),
            None => serializer.serialize_unit(),
        }
    }
}
