//! Normalization of raw access arguments into [`PathStep`]s.

use crate::types::PathStep;
use thiserror::Error;

/// A raw argument that cannot be used as a path step.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid property. prop={0}")]
pub struct InvalidProperty(pub String);

/// Anything that can address a child of a JSON container.
///
/// Strings become object keys, integers of any width become array indices.
/// Negative integers and integers that do not fit `usize` are rejected.
///
/// # Example
///
/// ```
/// use json_joy_json_node::{PathStep, Property};
///
/// assert_eq!("name".into_step(), Ok(PathStep::Key("name".into())));
/// assert_eq!(3u8.into_step(), Ok(PathStep::Index(3)));
/// assert_eq!(3i64.into_step(), Ok(PathStep::Index(3)));
/// assert!((-1i32).into_step().is_err());
/// ```
pub trait Property {
    fn into_step(self) -> Result<PathStep, InvalidProperty>;
}

impl Property for PathStep {
    fn into_step(self) -> Result<PathStep, InvalidProperty> {
        Ok(self)
    }
}

impl Property for &PathStep {
    fn into_step(self) -> Result<PathStep, InvalidProperty> {
        Ok(self.clone())
    }
}

impl Property for Result<PathStep, InvalidProperty> {
    fn into_step(self) -> Result<PathStep, InvalidProperty> {
        self
    }
}

impl Property for &str {
    fn into_step(self) -> Result<PathStep, InvalidProperty> {
        Ok(PathStep::Key(self.to_owned()))
    }
}

impl Property for String {
    fn into_step(self) -> Result<PathStep, InvalidProperty> {
        Ok(PathStep::Key(self))
    }
}

impl Property for &String {
    fn into_step(self) -> Result<PathStep, InvalidProperty> {
        Ok(PathStep::Key(self.clone()))
    }
}

macro_rules! impl_index_property {
    ($($int:ty),* $(,)?) => {
        $(
            impl Property for $int {
                fn into_step(self) -> Result<PathStep, InvalidProperty> {
                    usize::try_from(self)
                        .map(PathStep::Index)
                        .map_err(|_| InvalidProperty(self.to_string()))
                }
            }
        )*
    };
}

impl_index_property!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

/// Build a list of mixed key/index steps for [`Node::get_in`](crate::Node::get_in)
/// and [`Node::set_in`](crate::Node::set_in).
///
/// ```
/// use json_joy_json_node::{parse_str, steps};
///
/// let doc = parse_str(r#"{"a": [{"b": 1}]}"#);
/// assert_eq!(doc.get_in(steps!["a", 0, "b"]).value(), Some(&serde_json::json!(1)));
/// ```
#[macro_export]
macro_rules! steps {
    () => {
        ::std::vec::Vec::<$crate::PathStep>::new()
    };
    ($($prop:expr),+ $(,)?) => {
        [$($crate::Property::into_step($prop)),+]
    };
}
