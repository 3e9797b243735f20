//! Path-tracking navigation and copy-on-write updates over dynamic JSON.
//!
//! A [`Node`] is a JSON value together with the path at which it was reached.
//! Drilling into a document never panics and never needs a type check at each
//! level: a missing member yields an *undefined* node, reading through `null`
//! yields a node carrying a located error, and either state flows through the
//! rest of the chain until the caller asks for the value.
//!
//! Values are [`serde_json::Value`]s. Numbers keep serde_json's representation
//! (integers stay integers, everything else is `f64`). Without the
//! `preserve_order` feature objects are key-ordered, so [`Node::marshal`]
//! emits keys lexicographically.
//!
//! # Example
//!
//! ```
//! use json_joy_json_node::{is_undefined, parse, steps};
//!
//! let doc = parse(br#"{
//!     "total_count": 2,
//!     "artifacts": [
//!         {"id": 11, "name": "Rails"},
//!         {"id": 13, "name": "Test output"}
//!     ]
//! }"#);
//!
//! // Chained or folded navigation
//! let name: String = doc.get("artifacts").get(1).get("name").unmarshal().unwrap();
//! assert_eq!(name, "Test output");
//! assert_eq!(doc.get_in(steps!["artifacts", 1, "name"]), doc.get("artifacts").get(1).get("name"));
//!
//! // Absence and failure are told apart
//! let err = doc.get("missing").marshal().unwrap_err();
//! assert!(is_undefined(&err));
//! let err = doc.get("total_count").get("x").get("y").marshal().unwrap_err();
//! assert!(!is_undefined(&err));
//! assert_eq!(
//!     err.to_string(),
//!     "cannot read properties of undefined (reading 'y') at $['total_count']['x']['y']"
//! );
//!
//! // Copy-on-write updates
//! let updated = doc.set_in("Golang", steps!["artifacts", 0, "name"]);
//! #[cfg(not(feature = "preserve_order"))]
//! assert_eq!(
//!     updated.marshal().unwrap(),
//!     br#"{"artifacts":[{"id":11,"name":"Golang"},{"id":13,"name":"Test output"}],"total_count":2}"#
//! );
//! ```

pub mod types;
pub use types::{Path, PathStep};

pub mod validate;
pub use validate::{InvalidProperty, Property};

pub mod value;
pub use value::{coerce, type_name};

pub mod error;
pub use error::{is_undefined, Cause, ErrorKind, NodeError, NodeResult};

mod node;
pub use node::Node;

mod get;
mod set;

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decode JSON text into a root node.
///
/// Invalid input does not fail here: the returned node carries an
/// [`ErrorKind::Unmarshal`] error and every operation on it reports it.
pub fn parse(data: &[u8]) -> Node {
    match serde_json::from_slice::<Value>(data) {
        Ok(value) => Node::new(value),
        Err(e) => {
            tracing::debug!(error = %e, "input is not valid JSON");
            Node::failed_root(NodeError::unmarshal(Path::root(), e))
        }
    }
}

/// [`parse`] for string input.
pub fn parse_str(data: &str) -> Node {
    parse(data.as_bytes())
}

/// Decode the value of `node` into a new `T`.
///
/// ```
/// use json_joy_json_node::{parse_str, unmarshal_node};
///
/// #[derive(serde::Deserialize)]
/// struct Artifact {
///     id: u32,
///     name: String,
/// }
///
/// let doc = parse_str(r#"{"artifacts": [{"id": 11, "name": "Rails"}, {"id": 13, "name": "Test output"}]}"#);
/// let artifact: Artifact = unmarshal_node(&doc.get("artifacts").get(1)).unwrap();
/// assert_eq!(artifact.id, 13);
/// assert_eq!(artifact.name, "Test output");
/// ```
pub fn unmarshal_node<T: DeserializeOwned>(node: &Node) -> NodeResult<T> {
    node.unmarshal()
}
