//! Resolvers that apply one path component to one candidate location.
//!
//! Each resolver is a pure function from `(component, candidate)` to the next
//! generation of candidates. Dispatch is an exhaustive match over the closed
//! component union, so every component kind is guaranteed a resolver at
//! compile time; only the root marker has none, and meeting it in resolver
//! position is a caller-visible configuration error. Resolvers never mutate
//! the tree.

use crate::ast::{Key, MemberTest, Node, Path, PathComponent, Scope, SubscriptTest};
use crate::error::PathError;
use serde_json::Value;

/// Resolves one component against one candidate, yielding the next
/// generation. `budget` is an optional upper bound on how many matches are
/// still wanted; descendant searches use it to stop early. Final truncation
/// authority stays with the engine.
pub fn resolve<'a>(
    component: &PathComponent,
    candidate: &Node<'a>,
    budget: Option<usize>,
) -> Result<Vec<Node<'a>>, PathError> {
    match component {
        PathComponent::Root => Err(PathError::NoResolver(component.kind().to_string())),
        PathComponent::Member {
            scope: Scope::Child,
            test,
        } => Ok(collect_child_entries(candidate, |key| {
            member_matches(test, key)
        })),
        PathComponent::Subscript {
            scope: Scope::Child,
            test,
        } => Ok(collect_child_entries(candidate, |key| {
            subscript_matches(test, key)
        })),
        PathComponent::Member {
            scope: Scope::Descendant,
            test,
        } => Ok(collect_descendant_entries(candidate, budget, |key| {
            member_matches(test, key)
        })),
        PathComponent::Subscript {
            scope: Scope::Descendant,
            test,
        } => Ok(collect_descendant_entries(candidate, budget, |key| {
            subscript_matches(test, key)
        })),
    }
}

// --- Key tests ---

/// The key of one entry of a container, borrowed from the tree.
enum EntryKey<'v> {
    Name(&'v str),
    Index(usize),
}

impl EntryKey<'_> {
    fn to_key(&self) -> Key {
        match self {
            EntryKey::Name(name) => Key::Name((*name).to_string()),
            EntryKey::Index(i) => Key::Index(*i),
        }
    }
}

fn member_matches(test: &MemberTest, key: &EntryKey) -> bool {
    match test {
        MemberTest::Name(name) => matches!(key, EntryKey::Name(k) if k == name),
        MemberTest::Wildcard => true,
    }
}

fn subscript_matches(test: &SubscriptTest, key: &EntryKey) -> bool {
    match test {
        // An integer subscript addresses array positions, and object keys
        // spelled as that integer's decimal form.
        SubscriptTest::Index(i) => match key {
            EntryKey::Index(k) => k == i,
            EntryKey::Name(k) => *k == i.to_string(),
        },
        SubscriptTest::Key(wanted) => matches!(key, EntryKey::Name(k) if k == wanted),
        SubscriptTest::Wildcard => true,
    }
}

// --- Collectors ---

/// Enumerates a container's entries in natural order: object insertion order
/// or array index order. Scalars have no entries.
fn children(value: &Value) -> Vec<(EntryKey<'_>, &Value)> {
    match value {
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| (EntryKey::Name(k.as_str()), v))
            .collect(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, v)| (EntryKey::Index(i), v))
            .collect(),
        _ => Vec::new(),
    }
}

/// Emitted paths always extend by concrete child components so that every
/// reported path re-parses to the same location.
fn component_for(key: &EntryKey) -> PathComponent {
    PathComponent::for_key(&key.to_key())
}

fn collect_child_entries<'a, F>(candidate: &Node<'a>, test: F) -> Vec<Node<'a>>
where
    F: Fn(&EntryKey) -> bool,
{
    let mut results = Vec::new();
    for (key, child) in children(candidate.value) {
        if test(&key) {
            results.push(Node {
                path: candidate.path.join(component_for(&key)),
                value: child,
            });
        }
    }
    results
}

/// Pre-order depth-first search of the whole subtree. Each container is
/// tested before its children, parents before descendants, entries in their
/// natural enumeration order.
fn collect_descendant_entries<'a, F>(
    candidate: &Node<'a>,
    budget: Option<usize>,
    test: F,
) -> Vec<Node<'a>>
where
    F: Fn(&EntryKey) -> bool + Copy,
{
    let mut results = Vec::new();
    walk(&candidate.path, candidate.value, budget, test, &mut results);
    results
}

fn walk<'a, F>(
    base: &Path,
    value: &'a Value,
    budget: Option<usize>,
    test: F,
    results: &mut Vec<Node<'a>>,
) where
    F: Fn(&EntryKey) -> bool + Copy,
{
    let full = |results: &Vec<Node<'a>>| budget.is_some_and(|b| results.len() >= b);

    for (key, child) in children(value) {
        if full(results) {
            return;
        }
        if test(&key) {
            results.push(Node {
                path: base.join(component_for(&key)),
                value: child,
            });
        }
    }
    for (key, child) in children(value) {
        if full(results) {
            return;
        }
        if child.is_object() || child.is_array() {
            walk(&base.join(component_for(&key)), child, budget, test, results);
        }
    }
}
