//! The write-through mutation layer: assignment with vivification,
//! structural deletion, and the deepest-first `apply` pass.
//!
//! Everything here is built on the engine's read resolution: intermediate
//! steps of a write are located by re-resolving one component at a time
//! against the current cursor, and `apply` re-resolves every parent
//! container against the live tree instead of holding references across
//! mutations.

use crate::ast::{AppliedNode, Key, Path, PathComponent, SubscriptTest};
use crate::engine;
use crate::error::PathError;
use log::trace;
use serde_json::{Map, Value};

/// What the write-through walk does at the final component.
pub(crate) enum WriteOp {
    Assign(Value),
    Delete,
}

/// Walks the path's non-root components left to right, descending through a
/// cursor into the tree. Non-final components are resolved with the engine's
/// own resolution (first match wins); on a miss, assignment vivifies a fresh
/// container of the kind the *next* component needs, while deletion stops as
/// a silent no-op. The final component assigns or removes at its own key.
///
/// Returns the assigned value for `Assign`, `None` for `Delete`.
pub(crate) fn write_through(
    tree: &mut Value,
    path: &Path,
    op: WriteOp,
) -> Result<Option<Value>, PathError> {
    let steps = path.steps();
    let mut cursor = tree;

    for i in 0..steps.len() {
        let component = &steps[i];

        if i + 1 == steps.len() {
            return match op {
                WriteOp::Delete => {
                    delete_key(cursor, component)?;
                    Ok(None)
                }
                WriteOp::Assign(value) => {
                    assign_key(cursor, component, value.clone())?;
                    Ok(Some(value))
                }
            };
        }

        // Re-resolve this single component against the cursor; the probe
        // path is `$` plus the component, exactly what `nodes` would run.
        let found = {
            let probe = Path::from_components(vec![component.clone()]);
            engine::resolve_nodes(&*cursor, &probe, Some(1))?
                .into_iter()
                .next()
                .map(|node| node.path)
        };

        match found {
            Some(found_path) => {
                cursor = descend(cursor, found_path.steps())?;
            }
            None => {
                if matches!(op, WriteOp::Delete) {
                    // Missing intermediate: nothing to delete.
                    return Ok(None);
                }
                let fresh = vivified_container(&steps[i + 1]);
                trace!(
                    "vivifying {} at {}",
                    if fresh.is_array() { "array" } else { "object" },
                    component.kind()
                );
                assign_key(cursor, component, fresh)?;
                cursor = step_into(cursor, component)?;
            }
        }
    }

    Err(PathError::Invariant(
        "write-through walk exhausted the path without a terminal step".to_string(),
    ))
}

/// Transforms every matched path with `f`, deepest first. Sorting is stable,
/// so sibling matches keep their generation order.
pub(crate) fn apply_paths<F>(
    tree: &mut Value,
    mut matched: Vec<Path>,
    mut f: F,
) -> Result<Vec<AppliedNode>, PathError>
where
    F: FnMut(&Value) -> Value,
{
    matched.sort_by(|a, b| b.len().cmp(&a.len()));

    let missing = Value::Null;
    let mut applied = Vec::with_capacity(matched.len());
    for path in matched {
        let Some((parent_path, last)) = path.split_last() else {
            return Err(PathError::TypeError(
                "cannot apply a transform to the root itself".to_string(),
            ));
        };
        let parent = descend(tree, parent_path.steps())?;
        let current = read_key(parent, last).unwrap_or(&missing);
        let new_value = f(current);
        assign_key(parent, last, new_value.clone())?;
        applied.push(AppliedNode {
            path,
            value: new_value,
        });
    }
    Ok(applied)
}

/// The empty container a vivified step must hold so that the following
/// component can resolve into it.
fn vivified_container(next: &PathComponent) -> Value {
    match next {
        PathComponent::Subscript {
            test: SubscriptTest::Index(_),
            ..
        } => Value::Array(Vec::new()),
        _ => Value::Object(Map::new()),
    }
}

// --- Cursor movement ---

/// Descends mutably through a sequence of concrete child components.
fn descend<'t>(
    mut cursor: &'t mut Value,
    steps: &[PathComponent],
) -> Result<&'t mut Value, PathError> {
    for component in steps {
        cursor = step_into(cursor, component)?;
    }
    Ok(cursor)
}

fn step_into<'t>(
    cursor: &'t mut Value,
    component: &PathComponent,
) -> Result<&'t mut Value, PathError> {
    let key = plain_key(component)?;
    let next = match (cursor, &key) {
        (Value::Object(map), Key::Name(name)) => map.get_mut(name),
        (Value::Object(map), Key::Index(i)) => map.get_mut(&i.to_string()),
        (Value::Array(items), Key::Index(i)) => items.get_mut(*i),
        _ => None,
    };
    next.ok_or_else(|| {
        PathError::Invariant(format!(
            "resolved location '{}' is no longer present",
            component.kind()
        ))
    })
}

// --- Key-level primitives ---

fn plain_key(component: &PathComponent) -> Result<Key, PathError> {
    component.plain_key().ok_or_else(|| {
        PathError::TypeError(format!(
            "component '{}' does not address a single key and cannot be written through",
            component.kind()
        ))
    })
}

fn read_key<'t>(container: &'t Value, component: &PathComponent) -> Option<&'t Value> {
    let key = component.plain_key()?;
    match (container, &key) {
        (Value::Object(map), Key::Name(name)) => map.get(name),
        (Value::Object(map), Key::Index(i)) => map.get(&i.to_string()),
        (Value::Array(items), Key::Index(i)) => items.get(*i),
        _ => None,
    }
}

fn assign_key(
    container: &mut Value,
    component: &PathComponent,
    value: Value,
) -> Result<(), PathError> {
    let key = plain_key(component)?;
    match (container, key) {
        (Value::Object(map), Key::Name(name)) => {
            map.insert(name, value);
            Ok(())
        }
        (Value::Object(map), Key::Index(i)) => {
            map.insert(i.to_string(), value);
            Ok(())
        }
        (Value::Array(items), Key::Index(i)) => {
            if i >= items.len() {
                items.resize(i + 1, Value::Null);
            }
            items[i] = value;
            Ok(())
        }
        (Value::Array(_), Key::Name(name)) => Err(PathError::TypeError(format!(
            "cannot assign string key '{}' on an array",
            name
        ))),
        _ => Err(PathError::TypeError(
            "cannot assign into a non-container value".to_string(),
        )),
    }
}

/// Removes a key from a container. Missing keys and non-container targets
/// are silent no-ops. Object removal preserves the order of the remaining
/// entries.
fn delete_key(container: &mut Value, component: &PathComponent) -> Result<(), PathError> {
    let key = plain_key(component)?;
    match (container, key) {
        (Value::Object(map), Key::Name(name)) => {
            map.shift_remove(&name);
        }
        (Value::Object(map), Key::Index(i)) => {
            map.shift_remove(&i.to_string());
        }
        (Value::Array(items), Key::Index(i)) => {
            if i < items.len() {
                items.remove(i);
            }
        }
        _ => {}
    }
    Ok(())
}
