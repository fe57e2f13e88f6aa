//! The path engine: normalization of path representations and the
//! generational resolution loop behind the public query surface.

use crate::ast::{AppliedNode, Key, Node, Path, PathComponent};
use crate::error::PathError;
use crate::handlers;
use crate::mutation::{self, WriteOp};
use crate::parser;
use log::{debug, trace};
use serde_json::Value;

/// Normalization of the three accepted path representations into a [`Path`].
///
/// Normalizing an already-normalized path is the identity.
pub trait IntoPath {
    fn into_path(self) -> Result<Path, PathError>;
}

impl IntoPath for Path {
    fn into_path(self) -> Result<Path, PathError> {
        Ok(self)
    }
}

impl IntoPath for &Path {
    fn into_path(self) -> Result<Path, PathError> {
        Ok(self.clone())
    }
}

impl IntoPath for &str {
    fn into_path(self) -> Result<Path, PathError> {
        parser::parse_path(self)
    }
}

impl IntoPath for &String {
    fn into_path(self) -> Result<Path, PathError> {
        parser::parse_path(self)
    }
}

impl IntoPath for String {
    fn into_path(self) -> Result<Path, PathError> {
        parser::parse_path(&self)
    }
}

impl IntoPath for &[Key] {
    fn into_path(self) -> Result<Path, PathError> {
        Ok(Path::from_keys(self))
    }
}

impl IntoPath for Vec<Key> {
    fn into_path(self) -> Result<Path, PathError> {
        Ok(Path::from_keys(&self))
    }
}

impl IntoPath for Vec<PathComponent> {
    fn into_path(self) -> Result<Path, PathError> {
        Ok(Path::from_components(self))
    }
}

/// The query and mutation engine.
///
/// Stateless and cheap to construct; callers own an instance explicitly and
/// may share it freely, since the only mutable state in any operation is the
/// caller-supplied tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathEngine;

impl PathEngine {
    pub fn new() -> Self {
        PathEngine
    }

    /// Parses a path string into its AST.
    pub fn parse(&self, text: &str) -> Result<Path, PathError> {
        parser::parse_path(text)
    }

    /// Renders a path (in any accepted representation) to its canonical
    /// string form.
    pub fn stringify<P: IntoPath>(&self, path: P) -> Result<String, PathError> {
        Ok(path.into_path()?.to_string())
    }

    /// Resolves a path against a tree, returning every matching location as
    /// a [`Node`]. `count` caps the number of matches; `Some(0)` returns an
    /// empty set without touching the tree.
    pub fn nodes<'a, P: IntoPath>(
        &self,
        tree: &'a Value,
        path: P,
        count: Option<usize>,
    ) -> Result<Vec<Node<'a>>, PathError> {
        if count == Some(0) {
            return Ok(Vec::new());
        }
        ensure_container(tree)?;
        let path = path.into_path()?;
        resolve_nodes(tree, &path, count)
    }

    /// Resolves a path and projects the matches to their values.
    pub fn query<'a, P: IntoPath>(
        &self,
        tree: &'a Value,
        path: P,
        count: Option<usize>,
    ) -> Result<Vec<&'a Value>, PathError> {
        Ok(self
            .nodes(tree, path, count)?
            .into_iter()
            .map(|node| node.value)
            .collect())
    }

    /// Resolves a path and projects the matches to their canonical paths.
    pub fn paths<P: IntoPath>(
        &self,
        tree: &Value,
        path: P,
        count: Option<usize>,
    ) -> Result<Vec<Path>, PathError> {
        Ok(self
            .nodes(tree, path, count)?
            .into_iter()
            .map(|node| node.path)
            .collect())
    }

    /// Returns the first match's value, or `None` when nothing matches.
    pub fn value<'a, P: IntoPath>(
        &self,
        tree: &'a Value,
        path: P,
    ) -> Result<Option<&'a Value>, PathError> {
        Ok(self
            .nodes(tree, path, Some(1))?
            .into_iter()
            .next()
            .map(|node| node.value))
    }

    /// Returns the container that directly holds the first match, or `None`
    /// when nothing matches or the match is the root itself.
    pub fn parent<'a, P: IntoPath>(
        &self,
        tree: &'a Value,
        path: P,
    ) -> Result<Option<&'a Value>, PathError> {
        let Some(node) = self.nodes(tree, path, Some(1))?.into_iter().next() else {
            return Ok(None);
        };
        let Some((parent_path, _)) = node.path.split_last() else {
            return Ok(None);
        };
        self.value(tree, parent_path)
    }

    /// Assigns `value` at the path, creating missing intermediate containers
    /// on the way (an object when the next step is a name or string key, an
    /// array when it is an integer index). Returns the assigned value.
    pub fn set_value<P: IntoPath>(
        &self,
        tree: &mut Value,
        path: P,
        value: Value,
    ) -> Result<Value, PathError> {
        ensure_container(tree)?;
        let path = path.into_path()?;
        match mutation::write_through(tree, &path, WriteOp::Assign(value))? {
            Some(assigned) => Ok(assigned),
            None => Err(PathError::Invariant(
                "assignment produced no value".to_string(),
            )),
        }
    }

    /// Removes the location addressed by the path. Deleting through a
    /// missing intermediate segment is a silent no-op.
    pub fn delete<P: IntoPath>(&self, tree: &mut Value, path: P) -> Result<(), PathError> {
        ensure_container(tree)?;
        let path = path.into_path()?;
        mutation::write_through(tree, &path, WriteOp::Delete)?;
        Ok(())
    }

    /// Transforms every match with `f`, deepest matches first, re-resolving
    /// each parent container against the live tree so that shallower
    /// replacements cannot invalidate deeper matches. Returns the matches in
    /// application order with their post-transform values.
    pub fn apply<P, F>(
        &self,
        tree: &mut Value,
        path: P,
        f: F,
    ) -> Result<Vec<AppliedNode>, PathError>
    where
        P: IntoPath,
        F: FnMut(&Value) -> Value,
    {
        let matched: Vec<Path> = self.paths(&*tree, path, None)?;
        mutation::apply_paths(tree, matched, f)
    }
}

/// Fails when the mutation/query target is not a container.
fn ensure_container(tree: &Value) -> Result<(), PathError> {
    if tree.is_object() || tree.is_array() {
        Ok(())
    } else {
        Err(PathError::TypeError(
            "target must be an object or array".to_string(),
        ))
    }
}

/// The generational resolution loop. Each non-root component maps the
/// current generation of candidates to the next; the final component's
/// results accumulate into the match set, truncated at `count`.
pub(crate) fn resolve_nodes<'a>(
    tree: &'a Value,
    path: &Path,
    count: Option<usize>,
) -> Result<Vec<Node<'a>>, PathError> {
    let steps = path.steps();
    let root = Node {
        path: Path::root(),
        value: tree,
    };
    if steps.is_empty() {
        return Ok(vec![root]);
    }

    let reached = |n: usize| count.is_some_and(|c| n >= c);
    let mut partials = vec![root];
    let mut matches: Vec<Node<'a>> = Vec::new();

    for (i, component) in steps.iter().enumerate() {
        if reached(matches.len()) {
            break;
        }
        let last = i + 1 == steps.len();
        let mut next_generation = Vec::new();

        for candidate in &partials {
            if reached(matches.len()) {
                break;
            }
            // Only the final component can spend the remaining match budget;
            // truncating intermediate generations could drop real matches.
            let budget = if last {
                count.map(|c| c - matches.len())
            } else {
                None
            };
            let results = handlers::resolve(component, candidate, budget)?;
            trace!(
                "component {} expanded {} into {} candidate(s)",
                component.kind(),
                candidate.path,
                results.len()
            );
            if last {
                matches.extend(results);
            } else {
                next_generation.extend(results);
            }
        }
        partials = next_generation;
    }

    if let Some(c) = count {
        matches.truncate(c);
    }
    debug!("resolved {} to {} match(es)", path, matches.len());
    Ok(matches)
}
