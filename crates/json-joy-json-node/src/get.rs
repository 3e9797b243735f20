use crate::error::{ErrorKind, NodeError};
use crate::node::Node;
use crate::types::PathStep;
use crate::validate::Property;
use serde_json::Value;
use tracing::trace;

impl Node {
    /// Get the child at `prop`: an object key for strings, an array index
    /// for integers.
    ///
    /// Never fails outright. A missing child is an undefined node; reading
    /// through `null` or through an undefined node produces a node carrying
    /// a located error; a node that already failed is returned unchanged.
    ///
    /// # Example
    ///
    /// ```
    /// use json_joy_json_node::parse_str;
    ///
    /// let doc = parse_str(r#"{"key1": {"key2": null}}"#);
    /// let node = doc.get("key1").get("key2").get("xxx").get("yyy");
    /// assert_eq!(
    ///     node.error().unwrap().to_string(),
    ///     "cannot read properties of null (reading 'xxx') at $['key1']['key2']['xxx']"
    /// );
    /// ```
    pub fn get(&self, prop: impl Property) -> Node {
        if self.is_failed() {
            return self.clone();
        }
        match prop.into_step() {
            Ok(step) => self.get_step(step),
            Err(invalid) => self.with_error(NodeError::new(
                ErrorKind::InvalidProperty(invalid),
                self.path().clone(),
            )),
        }
    }

    /// Get the descendant reached by following `props` left to right.
    ///
    /// Equivalent to chaining [`get`](Node::get) once per property. With no
    /// properties the node itself is returned.
    ///
    /// ```
    /// use json_joy_json_node::{parse_str, steps};
    ///
    /// let doc = parse_str(r#"{"artifacts": [{"name": "Rails"}]}"#);
    /// let name: String = doc.get_in(steps!["artifacts", 0, "name"]).unmarshal().unwrap();
    /// assert_eq!(name, "Rails");
    /// ```
    pub fn get_in<I>(&self, props: I) -> Node
    where
        I: IntoIterator,
        I::Item: Property,
    {
        props
            .into_iter()
            .fold(self.clone(), |node, prop| node.get(prop))
    }

    pub(crate) fn get_step(&self, step: PathStep) -> Node {
        if self.is_failed() {
            return self.clone();
        }
        if self.is_undefined() {
            trace!(path = %self.path(), step = %step, "read through undefined");
            return self.failed_child(step.clone(), ErrorKind::ReadOnUndefined(step));
        }
        let Some(value) = self.raw_value() else {
            return self.failed_child(step.clone(), ErrorKind::ReadOnUndefined(step));
        };

        if value.is_null() {
            trace!(path = %self.path(), step = %step, "read through null");
            return self.failed_child(step.clone(), ErrorKind::ReadOnNull(step));
        }

        let found = match (&step, value) {
            // An index at or past the end is undefined, never an error.
            (PathStep::Index(i), Value::Array(elements)) => elements.get(*i),
            (PathStep::Key(k), Value::Object(members)) => members.get(k),
            _ => None,
        };

        match found {
            Some(v) => {
                let v = v.clone();
                self.child(step, v)
            }
            None => {
                trace!(path = %self.path(), step = %step, "no value at step");
                self.failed_child(step, ErrorKind::Undefined)
            }
        }
    }
}
