mod common;

use common::{TestResult, store};
use jsonpath::PathEngine;
use serde_json::json;

#[test]
fn test_delete_removes_only_the_target() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let engine = PathEngine::new();
    let mut data = json!({ "a": 1, "b": 2, "c": 3, "z": { "a": 100, "b": 200 } });
    engine.delete(&mut data, "$.a")?;
    assert_eq!(data, json!({ "b": 2, "c": 3, "z": { "a": 100, "b": 200 } }));
    Ok(())
}

#[test]
fn test_delete_through_missing_intermediate() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let engine = PathEngine::new();
    let mut data = json!({ "a": { "d": 1 } });
    engine.delete(&mut data, "$.a.b.c")?;
    assert_eq!(data, json!({ "a": { "d": 1 } }));
    Ok(())
}

#[test]
fn test_set_existing_path() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let engine = PathEngine::new();
    let mut data = json!({ "a": { "b": { "c": 1 } } });
    engine.set_value(&mut data, "$.a.b.c", json!(99))?;
    assert_eq!(data, json!({ "a": { "b": { "c": 99 } } }));
    Ok(())
}

#[test]
fn test_set_vivifies_missing_containers() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let engine = PathEngine::new();
    let mut data = json!({});
    engine.set_value(&mut data, "$.x.y", json!(5))?;
    assert_eq!(data, json!({ "x": { "y": 5 } }));

    let mut data = json!({});
    engine.set_value(&mut data, "$.list[0].name", json!("first"))?;
    assert_eq!(data, json!({ "list": [{ "name": "first" }] }));
    Ok(())
}

#[test]
fn test_apply_wildcard_increments_siblings() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let engine = PathEngine::new();
    let mut data = json!({ "a": 1, "b": 2 });
    engine.apply(&mut data, "$.*", |v| json!(v.as_i64().unwrap() + 1))?;
    assert_eq!(data, json!({ "a": 2, "b": 3 }));
    Ok(())
}

#[test]
fn test_apply_on_store_prices() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let engine = PathEngine::new();
    let mut data = store();
    let applied = engine.apply(&mut data, "$..price", |v| {
        json!(v.as_f64().unwrap() + 1.0)
    })?;
    assert_eq!(applied.len(), 4);
    assert_eq!(
        engine.value(&data, "$.store.bicycle.price")?,
        Some(&json!(19.95 + 1.0))
    );
    Ok(())
}

#[test]
fn test_apply_is_deepest_first() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let engine = PathEngine::new();
    let mut data = json!({ "outer": { "inner": { "outer": 1 } } });
    let applied = engine.apply(&mut data, "$..outer", |v| {
        if v.is_object() {
            json!("flattened")
        } else {
            json!(v.as_i64().unwrap() + 1)
        }
    })?;
    // The deeper match is applied before its container is replaced.
    assert_eq!(applied[0].path.to_string(), "$.outer.inner.outer");
    assert_eq!(applied[0].value, json!(2));
    assert_eq!(data, json!({ "outer": "flattened" }));
    Ok(())
}

#[test]
fn test_mutation_on_missing_paths_is_quiet() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let engine = PathEngine::new();
    let mut data = store();
    let before = data.clone();

    engine.delete(&mut data, "$.store.magazine.title")?;
    let applied = engine.apply(&mut data, "$.store.magazine", |v| v.clone())?;
    assert!(applied.is_empty());
    assert_eq!(data, before);
    Ok(())
}
