use indexmap::IndexSet;

use crate::model::todo::TodoNode;
use crate::ops::path::TodoPath;

/// Error type for path-addressed tree operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("a todo number is required")]
    EmptyPath,
    #[error("failed to access index {index} at level {depth} (only {len} todos there)")]
    OutOfBounds {
        index: usize,
        depth: usize,
        len: usize,
    },
}

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------

/// Resolve a non-empty path to the sibling list holding its target and the
/// target's index in that list. Every index along the way is bounds-checked.
fn slot_mut<'a>(
    roots: &'a mut Vec<TodoNode>,
    path: &TodoPath,
) -> Result<(&'a mut Vec<TodoNode>, usize), TreeError> {
    let (&last, parents) = path.indices().split_last().ok_or(TreeError::EmptyPath)?;
    let mut level = roots;
    for (depth, &index) in parents.iter().enumerate() {
        let len = level.len();
        level = match level.get_mut(index) {
            Some(node) => &mut node.children,
            None => return Err(TreeError::OutOfBounds { index, depth, len }),
        };
    }
    check_bounds(level.len(), last, parents.len())?;
    Ok((level, last))
}

fn slot<'a>(roots: &'a [TodoNode], path: &TodoPath) -> Result<(&'a [TodoNode], usize), TreeError> {
    let (&last, parents) = path.indices().split_last().ok_or(TreeError::EmptyPath)?;
    let mut level = roots;
    for (depth, &index) in parents.iter().enumerate() {
        let node = level.get(index).ok_or(TreeError::OutOfBounds {
            index,
            depth,
            len: level.len(),
        })?;
        level = &node.children;
    }
    check_bounds(level.len(), last, parents.len())?;
    Ok((level, last))
}

fn check_bounds(len: usize, index: usize, depth: usize) -> Result<(), TreeError> {
    if index >= len {
        return Err(TreeError::OutOfBounds { index, depth, len });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Mutations
// ---------------------------------------------------------------------------

/// Append `node` as the last root (empty path) or as the last child of the
/// node at `parent`. Returns the path of the inserted node.
pub fn insert(
    roots: &mut Vec<TodoNode>,
    node: TodoNode,
    parent: &TodoPath,
) -> Result<TodoPath, TreeError> {
    if parent.is_root() {
        roots.push(node);
        return Ok(parent.child(roots.len() - 1));
    }
    let (level, index) = slot_mut(roots, parent)?;
    let children = &mut level[index].children;
    children.push(node);
    Ok(parent.child(children.len() - 1))
}

/// Flip the done flag of the node at `path`. Returns the new value.
pub fn toggle_done(roots: &mut Vec<TodoNode>, path: &TodoPath) -> Result<bool, TreeError> {
    let (level, index) = slot_mut(roots, path)?;
    let node = &mut level[index];
    node.done = !node.done;
    Ok(node.done)
}

/// Remove the node at `path` (with its subtree), keeping sibling order.
pub fn delete_at(roots: &mut Vec<TodoNode>, path: &TodoPath) -> Result<TodoNode, TreeError> {
    let (level, index) = slot_mut(roots, path)?;
    Ok(level.remove(index))
}

pub fn search<'a>(roots: &'a [TodoNode], path: &TodoPath) -> Result<&'a TodoNode, TreeError> {
    let (level, index) = slot(roots, path)?;
    Ok(&level[index])
}

/// Remove the first done node in depth-first pre-order and stop.
///
/// A done node is never descended into; it goes with its whole subtree.
/// Returns `None` once no done node remains.
pub fn prune_done(roots: &mut Vec<TodoNode>) -> Option<TodoNode> {
    for index in 0..roots.len() {
        if roots[index].done {
            return Some(roots.remove(index));
        }
        if let Some(removed) = prune_done(&mut roots[index].children) {
            return Some(removed);
        }
    }
    None
}

/// Run [`prune_done`] to its fixed point, returning every removed node in
/// removal order.
pub fn prune_all_done(roots: &mut Vec<TodoNode>) -> Vec<TodoNode> {
    let mut removed = Vec::new();
    while let Some(node) = prune_done(roots) {
        removed.push(node);
    }
    removed
}

// ---------------------------------------------------------------------------
// Traversals
// ---------------------------------------------------------------------------

/// A node visited during a traversal, with its path at the time of the walk
#[derive(Debug, Clone)]
pub struct TodoEntry<'a> {
    pub path: TodoPath,
    /// Nesting depth (0 = root)
    pub depth: usize,
    pub node: &'a TodoNode,
}

/// Lazy depth-first, pre-order walk over a forest
pub struct Walk<'a> {
    stack: Vec<(TodoPath, &'a TodoNode)>,
    skip_done: bool,
}

impl<'a> Walk<'a> {
    fn new(roots: &'a [TodoNode], skip_done: bool) -> Self {
        let mut walk = Walk {
            stack: Vec::new(),
            skip_done,
        };
        walk.push_children(&TodoPath::root(), roots);
        walk
    }

    fn push_children(&mut self, parent: &TodoPath, children: &'a [TodoNode]) {
        self.stack.extend(
            children
                .iter()
                .enumerate()
                .rev()
                .map(|(i, node)| (parent.child(i), node)),
        );
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = TodoEntry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (path, node) = self.stack.pop()?;
            if self.skip_done && node.done {
                continue;
            }
            self.push_children(&path, &node.children);
            return Some(TodoEntry {
                depth: path.depth() - 1,
                path,
                node,
            });
        }
    }
}

/// Every node in the forest
pub fn walk(roots: &[TodoNode]) -> Walk<'_> {
    Walk::new(roots, false)
}

/// Nodes to display. Without `include_done`, a done node vanishes together
/// with all of its descendants, done or not.
pub fn render(roots: &[TodoNode], include_done: bool) -> Walk<'_> {
    Walk::new(roots, !include_done)
}

/// Every node whose tag equals `tag`, at any depth
pub fn filter_by_tag<'a>(
    roots: &'a [TodoNode],
    tag: &'a str,
) -> impl Iterator<Item = TodoEntry<'a>> + 'a {
    walk(roots).filter(move |entry| entry.node.tag == tag)
}

/// Distinct non-empty tags in first-seen order
pub fn collect_tags(roots: &[TodoNode]) -> IndexSet<String> {
    walk(roots)
        .filter(|entry| entry.node.has_tag())
        .map(|entry| entry.node.tag.clone())
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
