use crate::error::{ErrorKind, NodeError};
use crate::node::Node;
use crate::types::PathStep;
use crate::validate::Property;
use crate::value::{coerce, type_name};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

impl Node {
    /// Replace this node's value with `value`, keeping its path and parent.
    ///
    /// An undefined node accepts the value; a node carrying any other error
    /// is returned unchanged. If `value` cannot be represented as JSON the
    /// result carries an [`ErrorKind::Internal`] error.
    pub fn set<T: Serialize + ?Sized>(&self, value: &T) -> Node {
        if self.is_failed() {
            return self.clone();
        }
        match coerce(value) {
            Ok(v) => self.with_value(v),
            Err(e) => {
                warn!(path = %self.path(), error = %e, "value is not representable as JSON");
                self.with_error(NodeError::internal(self.path().clone(), e))
            }
        }
    }

    /// Return a copy of this node with `value` written at `props` below it.
    ///
    /// Missing object members are inserted and arrays grow (padding with
    /// `null`) to reach the index. Containers along the path are rebuilt;
    /// nothing reachable from `self` is modified.
    ///
    /// Errors are carried by the returned node and located where the write
    /// stopped:
    /// - writing a member of `null` or of an undefined value is a
    ///   `cannot set properties of ...` error when it happens at the last
    ///   step, and the plain read error when an earlier step was missing;
    /// - writing a key into a non-object or an index into a non-array is a
    ///   [`ErrorKind::CreateProperty`] error.
    ///
    /// # Example
    ///
    /// ```
    /// use json_joy_json_node::{parse_str, steps};
    ///
    /// let doc = parse_str(r#"{"total_count": 2, "artifacts": [{"id": 11, "name": "Rails"}]}"#);
    /// let updated = doc.set_in("Golang", steps!["artifacts", 0, "name"]);
    /// #[cfg(not(feature = "preserve_order"))]
    /// assert_eq!(
    ///     updated.marshal().unwrap(),
    ///     br#"{"artifacts":[{"id":11,"name":"Golang"}],"total_count":2}"#
    /// );
    /// // The original document is unchanged.
    /// assert_eq!(
    ///     doc.get_in(steps!["artifacts", 0, "name"]).value(),
    ///     Some(&serde_json::json!("Rails"))
    /// );
    /// ```
    pub fn set_in<T, I>(&self, value: &T, props: I) -> Node
    where
        T: Serialize + ?Sized,
        I: IntoIterator,
        I::Item: Property,
    {
        if self.is_failed() {
            return self.clone();
        }

        let mut steps = Vec::new();
        for prop in props {
            match prop.into_step() {
                Ok(step) => steps.push(step),
                Err(invalid) => {
                    return self.with_error(NodeError::new(
                        ErrorKind::InvalidProperty(invalid),
                        self.path().clone(),
                    ))
                }
            }
        }
        if steps.is_empty() {
            return self.set(value);
        }

        let depth = steps.len();
        let target = steps
            .into_iter()
            .fold(self.clone(), |node, step| node.get_step(step))
            .set(value);

        if let Some(err) = target.error() {
            let reached_target = target.path().len() == self.path().len() + depth;
            let remapped = match (err.kind(), reached_target) {
                (ErrorKind::ReadOnUndefined(step), true) => Some(ErrorKind::SetOnUndefined(step.clone())),
                (ErrorKind::ReadOnNull(step), true) => Some(ErrorKind::SetOnNull(step.clone())),
                _ => None,
            };
            return match remapped {
                Some(kind) => {
                    debug!(path = %target.path(), "write stopped at target");
                    target.with_error(NodeError::new(kind, target.path().clone()))
                }
                None => target,
            };
        }

        target.ascend(depth)
    }

    /// Graft this node's value into its ancestors, `depth` levels up.
    fn ascend(&self, depth: usize) -> Node {
        let mut current = self.clone();
        for _ in 0..depth {
            if current.error().is_some() {
                break;
            }
            let (Some(parent), Some(step), Some(value)) =
                (current.parent(), current.path().last(), current.value())
            else {
                break;
            };
            current = parent.graft(value.clone(), step.clone());
        }
        current
    }

    /// Rebuild this node with `child` placed at `step`.
    fn graft(&self, child: Value, step: PathStep) -> Node {
        if self.is_undefined() {
            return self.failed_child(step.clone(), ErrorKind::SetOnUndefined(step));
        }
        if self.is_failed() {
            return self.clone();
        }
        let Some(value) = self.raw_value() else {
            return self.failed_child(step.clone(), ErrorKind::SetOnUndefined(step));
        };
        if value.is_null() {
            return self.failed_child(step.clone(), ErrorKind::SetOnNull(step));
        }

        let found = match (&step, value) {
            (PathStep::Index(i), Value::Array(elements)) => {
                let i = *i;
                let Some(mut grown) = grown_to(elements, i) else {
                    debug!(path = %self.path(), index = i, "array cannot grow to index");
                    return self.failed_child(
                        PathStep::Index(i),
                        ErrorKind::IndexTooLarge(PathStep::Index(i)),
                    );
                };
                grown[i] = child;
                return self.with_value(Value::Array(grown));
            }
            (PathStep::Key(k), Value::Object(members)) => {
                let mut updated = members.clone();
                updated.insert(k.clone(), child);
                return self.with_value(Value::Object(updated));
            }
            (_, other) => type_name(other),
        };

        debug!(path = %self.path(), step = %step, found, "cannot create property");
        self.failed_child(
            step.clone(),
            ErrorKind::CreateProperty {
                step,
                type_name: found,
            },
        )
    }
}

/// Copy `elements` into an array long enough to hold index `i`, padding with
/// `null`. `None` if that length cannot be allocated.
fn grown_to(elements: &[Value], i: usize) -> Option<Vec<Value>> {
    let len = i.checked_add(1)?.max(elements.len());
    let mut grown = Vec::new();
    grown.try_reserve_exact(len).ok()?;
    grown.extend(elements.iter().cloned());
    grown.resize(len, Value::Null);
    Some(grown)
}
