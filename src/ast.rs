//! Defines the path component model and the `Path` AST.
//!
//! A parsed path is an ordered, root-first sequence of [`PathComponent`]s.
//! The component kinds form a closed union, so resolution and canonical
//! rendering are both exhaustive matches: adding a new kind forces the
//! compiler to demand a resolver and a stringify rule together.

use crate::grammar;
use serde_json::Value;
use std::fmt;

/// The axis of movement from a candidate location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Immediate children only (`.name`, `[0]`).
    Child,
    /// The entire subtree below the candidate (`..name`, `..[0]`).
    Descendant,
}

/// The test a member component applies to an entry's key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberTest {
    /// A bare identifier name (e.g. `.title`).
    Name(String),
    /// The wildcard test (`.*`), matching every entry.
    Wildcard,
}

/// The test a subscript component applies to an entry's key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptTest {
    /// A non-negative integer index (e.g. `[2]`).
    Index(usize),
    /// A quoted string key (e.g. `["odd key"]`).
    Key(String),
    /// The wildcard subscript (`[*]`), matching every entry.
    Wildcard,
}

/// One step of a parsed path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathComponent {
    /// The singleton root marker, rendered `$`. Always and only the first
    /// component of a normalized path.
    Root,
    Member { scope: Scope, test: MemberTest },
    Subscript { scope: Scope, test: SubscriptTest },
}

impl PathComponent {
    /// A child member component for a bare name.
    pub fn member(name: impl Into<String>) -> Self {
        PathComponent::Member {
            scope: Scope::Child,
            test: MemberTest::Name(name.into()),
        }
    }

    /// A child subscript component for an array index.
    pub fn index(i: usize) -> Self {
        PathComponent::Subscript {
            scope: Scope::Child,
            test: SubscriptTest::Index(i),
        }
    }

    /// A child subscript component for a string key.
    pub fn key(key: impl Into<String>) -> Self {
        PathComponent::Subscript {
            scope: Scope::Child,
            test: SubscriptTest::Key(key.into()),
        }
    }

    /// The concrete child component addressing `key`, picking member syntax
    /// for identifier-shaped names and subscript syntax otherwise.
    pub fn for_key(key: &Key) -> Self {
        match key {
            Key::Name(name) if grammar::is_identifier(name) => PathComponent::member(name.clone()),
            Key::Name(name) => PathComponent::key(name.clone()),
            Key::Index(i) => PathComponent::index(*i),
        }
    }

    /// The single concrete key this component addresses, if it has one.
    /// Root and wildcard components address no single key.
    pub fn plain_key(&self) -> Option<Key> {
        match self {
            PathComponent::Root => None,
            PathComponent::Member {
                test: MemberTest::Name(name),
                ..
            } => Some(Key::Name(name.clone())),
            PathComponent::Member {
                test: MemberTest::Wildcard,
                ..
            } => None,
            PathComponent::Subscript { test, .. } => match test {
                SubscriptTest::Index(i) => Some(Key::Index(*i)),
                SubscriptTest::Key(key) => Some(Key::Name(key.clone())),
                SubscriptTest::Wildcard => None,
            },
        }
    }

    /// A short human-readable name for the component kind, used in errors.
    pub fn kind(&self) -> &'static str {
        match self {
            PathComponent::Root => "root",
            PathComponent::Member {
                scope: Scope::Child,
                ..
            } => "child-member",
            PathComponent::Member {
                scope: Scope::Descendant,
                ..
            } => "descendant-member",
            PathComponent::Subscript {
                scope: Scope::Child,
                ..
            } => "child-subscript",
            PathComponent::Subscript {
                scope: Scope::Descendant,
                ..
            } => "descendant-subscript",
        }
    }
}

/// A plain key in the array-of-keys path representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Name(String),
    Index(usize),
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Name(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Name(s)
    }
}

impl From<usize> for Key {
    fn from(i: usize) -> Self {
        Key::Index(i)
    }
}

/// A normalized path: a root-first ordered sequence of components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path(Vec<PathComponent>);

impl Path {
    /// The path addressing the tree root itself (`$`).
    pub fn root() -> Self {
        Path(vec![PathComponent::Root])
    }

    /// Builds a path from components, prepending the root marker when the
    /// sequence does not already start with one.
    pub fn from_components(components: Vec<PathComponent>) -> Self {
        if components.first() == Some(&PathComponent::Root) {
            Path(components)
        } else {
            let mut full = Vec::with_capacity(components.len() + 1);
            full.push(PathComponent::Root);
            full.extend(components);
            Path(full)
        }
    }

    /// Normalizes an ordered sequence of plain keys. A leading `"$"` name is
    /// treated as the root marker and dropped; identifier-shaped names become
    /// child members, everything else a child subscript.
    pub fn from_keys(keys: &[Key]) -> Self {
        let mut components = vec![PathComponent::Root];
        for (i, key) in keys.iter().enumerate() {
            if i == 0 && matches!(key, Key::Name(name) if name == "$") {
                continue;
            }
            components.push(PathComponent::for_key(key));
        }
        Path(components)
    }

    pub fn components(&self) -> &[PathComponent] {
        &self.0
    }

    /// The components after the root marker.
    pub fn steps(&self) -> &[PathComponent] {
        &self.0[1..]
    }

    /// Number of components, root included.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns a new path extended by one component.
    pub fn join(&self, component: PathComponent) -> Self {
        let mut components = self.0.clone();
        components.push(component);
        Path(components)
    }

    /// Removes and returns the final component. The root marker is never
    /// popped.
    pub fn pop(&mut self) -> Option<PathComponent> {
        if self.0.len() > 1 { self.0.pop() } else { None }
    }

    /// Splits into the parent path and the final component. `None` for the
    /// bare root.
    pub fn split_last(&self) -> Option<(Path, &PathComponent)> {
        if self.0.len() > 1 {
            let (last, parent) = self.0.split_last()?;
            Some((Path(parent.to_vec()), last))
        } else {
            None
        }
    }
}

impl fmt::Display for Path {
    /// Renders the canonical string form. The rendering table is total over
    /// the component union, so this cannot fail.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for component in &self.0 {
            match component {
                PathComponent::Root => write!(f, "$")?,
                PathComponent::Member { scope, test } => {
                    match scope {
                        Scope::Child => write!(f, ".")?,
                        Scope::Descendant => write!(f, "..")?,
                    }
                    match test {
                        MemberTest::Name(name) => write!(f, "{}", name)?,
                        MemberTest::Wildcard => write!(f, "*")?,
                    }
                }
                PathComponent::Subscript { scope, test } => {
                    if *scope == Scope::Descendant {
                        write!(f, "..")?;
                    }
                    match test {
                        SubscriptTest::Index(i) => write!(f, "[{}]", i)?,
                        SubscriptTest::Key(key) => write!(f, "[{}]", grammar::quote(key))?,
                        SubscriptTest::Wildcard => write!(f, "[*]")?,
                    }
                }
            }
        }
        Ok(())
    }
}

/// A resolved match: the location's path from the root and a borrow of its
/// current value in the caller's tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Node<'a> {
    pub path: Path,
    pub value: &'a Value,
}

/// A match returned by `apply`, carrying the owned post-transform value.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedNode {
    pub path: Path,
    pub value: Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_keys_renders_member_or_subscript() {
        let path = Path::from_keys(&["$".into(), "a".into(), Key::Index(0)]);
        assert_eq!(path.to_string(), "$.a[0]");

        let path = Path::from_keys(&["odd key".into(), "ok".into()]);
        assert_eq!(path.to_string(), "$[\"odd key\"].ok");
    }

    #[test]
    fn test_from_keys_without_leading_root() {
        let path = Path::from_keys(&["a".into(), "b".into()]);
        assert_eq!(path.to_string(), "$.a.b");
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn test_from_components_is_idempotent_about_root() {
        let explicit = Path::from_components(vec![PathComponent::Root, PathComponent::member("a")]);
        let implicit = Path::from_components(vec![PathComponent::member("a")]);
        assert_eq!(explicit, implicit);
    }

    #[test]
    fn test_display_descendant_and_wildcard() {
        let path = Path::from_components(vec![
            PathComponent::Member {
                scope: Scope::Descendant,
                test: MemberTest::Name("author".into()),
            },
            PathComponent::Member {
                scope: Scope::Child,
                test: MemberTest::Wildcard,
            },
            PathComponent::Subscript {
                scope: Scope::Descendant,
                test: SubscriptTest::Index(2),
            },
        ]);
        assert_eq!(path.to_string(), "$..author.*..[2]");
    }

    #[test]
    fn test_display_quotes_string_keys() {
        let path = Path::from_components(vec![PathComponent::key("say \"hi\"")]);
        assert_eq!(path.to_string(), "$[\"say \\\"hi\\\"\"]");
    }

    #[test]
    fn test_pop_never_removes_root() {
        let mut path = Path::from_keys(&["a".into()]);
        assert_eq!(path.pop(), Some(PathComponent::member("a")));
        assert_eq!(path.pop(), None);
        assert_eq!(path.to_string(), "$");
    }

    #[test]
    fn test_split_last() {
        let path = Path::from_keys(&["a".into(), "b".into()]);
        let (parent, last) = path.split_last().unwrap();
        assert_eq!(parent.to_string(), "$.a");
        assert_eq!(last, &PathComponent::member("b"));
        assert!(Path::root().split_last().is_none());
    }

    #[test]
    fn test_plain_key() {
        assert_eq!(
            PathComponent::member("a").plain_key(),
            Some(Key::Name("a".into()))
        );
        assert_eq!(PathComponent::index(3).plain_key(), Some(Key::Index(3)));
        assert_eq!(
            PathComponent::key("odd key").plain_key(),
            Some(Key::Name("odd key".into()))
        );
        assert_eq!(PathComponent::Root.plain_key(), None);
    }
}
