//! Path types for located JSON nodes.

use std::fmt;

/// A single step from a container to one of its children.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathStep {
    /// Object member access.
    Key(String),
    /// Array element access.
    Index(usize),
}

impl PathStep {
    /// Get the key if this is an object step.
    pub fn as_key(&self) -> Option<&str> {
        match self {
            PathStep::Key(k) => Some(k),
            PathStep::Index(_) => None,
        }
    }

    /// Get the index if this is an array step.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            PathStep::Key(_) => None,
            PathStep::Index(i) => Some(*i),
        }
    }

    fn write_bracketed(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathStep::Key(k) => write!(f, "['{}']", k),
            PathStep::Index(i) => write!(f, "[{}]", i),
        }
    }
}

/// Prints the bare step, as it appears inside diagnostics (`name`, `3`).
impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathStep::Key(k) => f.write_str(k),
            PathStep::Index(i) => write!(f, "{}", i),
        }
    }
}

/// Location of a node, as the sequence of steps taken from the document root.
///
/// Renders as `$['artifacts'][0]['name']`. The root path renders as the empty
/// string.
///
/// # Example
///
/// ```
/// use json_joy_json_node::{Path, PathStep};
///
/// let path = Path::root()
///     .append(PathStep::Key("artifacts".into()))
///     .append(PathStep::Index(0));
/// assert_eq!(path.to_string(), "$['artifacts'][0]");
/// assert_eq!(Path::root().to_string(), "");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path(Vec<PathStep>);

impl Path {
    /// An empty path.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// The empty path.
    pub fn root() -> Self {
        Self::new()
    }

    /// Return a new path with `step` appended. `self` is left untouched.
    pub fn append(&self, step: PathStep) -> Path {
        let mut steps = Vec::with_capacity(self.0.len() + 1);
        steps.extend(self.0.iter().cloned());
        steps.push(step);
        Path(steps)
    }

    /// Number of steps from the root.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for the root path.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The step that reached this location, `None` at the root.
    pub fn last(&self) -> Option<&PathStep> {
        self.0.last()
    }

    /// The steps, outermost first.
    pub fn steps(&self) -> &[PathStep] {
        &self.0
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return Ok(());
        }
        f.write_str("$")?;
        for step in self {
            step.write_bracketed(f)?;
        }
        Ok(())
    }
}

impl From<Vec<PathStep>> for Path {
    fn from(steps: Vec<PathStep>) -> Self {
        Path(steps)
    }
}

impl FromIterator<PathStep> for Path {
    fn from_iter<I: IntoIterator<Item = PathStep>>(iter: I) -> Self {
        Path(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a PathStep;
    type IntoIter = std::slice::Iter<'a, PathStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
