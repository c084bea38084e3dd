use std::fmt;
use std::str::FromStr;

/// Error type for dotted-path parsing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("invalid todo number '{path}': segment '{segment}' is not a non-negative integer")]
    InvalidSegment { path: String, segment: String },
}

/// Index sequence addressing a node from the roots, e.g. `1.2.0` → `[1, 2, 0]`.
///
/// The empty path means "top level". Paths are positional: they shift
/// whenever an earlier sibling is inserted or removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TodoPath(Vec<usize>);

impl TodoPath {
    pub fn root() -> Self {
        TodoPath(Vec::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Path of the `index`-th child of this node
    pub fn child(&self, index: usize) -> TodoPath {
        let mut indices = self.0.clone();
        indices.push(index);
        TodoPath(indices)
    }
}

impl fmt::Display for TodoPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, index) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", index)?;
        }
        Ok(())
    }
}

impl FromStr for TodoPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_path(s)
    }
}

/// Parse a dotted path like `"1.1.0"` into `[1, 1, 0]`.
///
/// Bounds are not checked here; the tree operations do that.
pub fn parse_path(s: &str) -> Result<TodoPath, PathError> {
    if s.is_empty() {
        return Ok(TodoPath::root());
    }
    s.split('.')
        .map(|segment| parse_segment(s, segment))
        .collect::<Result<Vec<_>, _>>()
        .map(TodoPath)
}

fn parse_segment(path: &str, segment: &str) -> Result<usize, PathError> {
    let invalid = || PathError::InvalidSegment {
        path: path.to_string(),
        segment: segment.to_string(),
    };
    // usize::from_str also takes a leading '+', which is not a path segment
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    segment.parse().map_err(|_| invalid())
}
