//! Environment file and override precedence tests.
//!
//! Responsibilities:
//! - Test that the environment file is applied before the override.
//! - Test that the environment file is applied before any step runs.
//! - Test that a missing environment file is skipped.

use std::sync::{Arc, Mutex};

use serde_json::json;

use super::{fixture_store, set_steps, temp_config_dir, write_environment};
use crate::initializer::{HandlerRegistry, InitializerRun, RunState, run, run_with};

#[test]
fn test_override_wins_over_environment_file() {
    let temp = temp_config_dir();
    write_environment(temp.path(), "test", "x: 5\n");
    let mut store = fixture_store(temp.path());
    let mut registry = HandlerRegistry::new();

    run_with(&mut store, &mut registry, |cfg| cfg.set("x", 10)).unwrap();

    assert_eq!(store.get("x").unwrap(), Some(json!(10)));
}

#[test]
fn test_environment_file_value_stands_without_override() {
    let temp = temp_config_dir();
    let path = write_environment(temp.path(), "test", "x: 5\n");
    let mut store = fixture_store(temp.path());
    let mut registry = HandlerRegistry::new();

    let report = run(&mut store, &mut registry).unwrap();

    assert_eq!(store.get("x").unwrap(), Some(json!(5)));
    assert_eq!(report.environment_file, Some(path));
}

#[test]
fn test_only_current_environment_file_is_applied() {
    let temp = temp_config_dir();
    write_environment(temp.path(), "test", "x: test\n");
    write_environment(temp.path(), "production", "x: production\n");
    let mut store = fixture_store(temp.path());
    let mut registry = HandlerRegistry::new();

    run(&mut store, &mut registry).unwrap();

    assert_eq!(store.get("x").unwrap(), Some(json!("test")));
}

#[test]
fn test_environment_file_applied_before_steps() {
    let temp = temp_config_dir();
    write_environment(temp.path(), "test", "greeting: hello\n");
    let mut store = fixture_store(temp.path());
    set_steps(&mut store, &["check"]);

    let mut registry = HandlerRegistry::new().with("check", |cfg| {
        let greeting = cfg.get("greeting")?;
        cfg.set("seen", greeting.unwrap_or_default());
        Ok(())
    });

    run(&mut store, &mut registry).unwrap();

    assert_eq!(store.get("seen").unwrap(), Some(json!("hello")));
}

#[test]
fn test_environment_file_can_declare_steps() {
    let temp = temp_config_dir();
    write_environment(temp.path(), "test", "initializers: [seed]\n");
    let mut store = fixture_store(temp.path());
    let mut registry = HandlerRegistry::new().with("seed", |cfg| {
        cfg.set("seeded", true);
        Ok(())
    });

    let report = run(&mut store, &mut registry).unwrap();

    assert_eq!(report.steps, vec!["seed"]);
    assert_eq!(store.get("seeded").unwrap(), Some(json!(true)));
}

#[test]
fn test_missing_environment_file_is_skipped() {
    let temp = temp_config_dir();
    let mut store = fixture_store(temp.path());
    let mut registry = HandlerRegistry::new();

    let report = run(&mut store, &mut registry).unwrap();

    assert_eq!(report.environment_file, None);
    assert_eq!(store.get("x").unwrap(), None);
}

#[test]
fn test_environment_captured_at_start_of_run() {
    let temp = temp_config_dir();
    let mut store = fixture_store(temp.path());
    let mut registry = HandlerRegistry::new();

    let mut run = InitializerRun::new(&mut store, &mut registry);
    run.prepare_with(|cfg| cfg.set("environment", "production"))
        .unwrap();
    assert_eq!(run.environment(), Some("test"));

    let report = run.run_steps().unwrap();
    assert_eq!(report.environment, "test");
}

#[test]
fn test_prepare_stops_before_steps() {
    let temp = temp_config_dir();
    write_environment(temp.path(), "test", "x: 5\n");
    let mut store = fixture_store(temp.path());
    set_steps(&mut store, &["unregistered"]);
    let mut registry = HandlerRegistry::new();

    let mut run = InitializerRun::new(&mut store, &mut registry);
    run.prepare().unwrap();

    assert_eq!(run.state(), RunState::OverrideApplied);
    assert_eq!(run.store().get("x").unwrap(), Some(json!(5)));
}

#[test]
fn test_handlers_see_captured_environment_after_override() {
    let temp = temp_config_dir();
    let mut store = fixture_store(temp.path());
    set_steps(&mut store, &["record"]);
    let seen = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&seen);
    let mut registry = HandlerRegistry::new().with("record", move |cfg| {
        *sink.lock().unwrap() = Some(cfg.environment()?);
        Ok(())
    });

    let report = run_with(&mut store, &mut registry, |cfg| {
        cfg.set("environment", "production")
    })
    .unwrap();

    assert_eq!(report.environment, "test");
    assert_eq!(seen.lock().unwrap().as_deref(), Some("test"));
    assert_eq!(store.environment().unwrap(), "test");
}

#[test]
fn test_environment_file_cannot_switch_environment() {
    let temp = temp_config_dir();
    write_environment(temp.path(), "test", "environment: production\nx: 1\n");
    let mut store = fixture_store(temp.path());
    let mut registry = HandlerRegistry::new();

    let report = run(&mut store, &mut registry).unwrap();

    assert_eq!(report.environment, "test");
    assert_eq!(store.environment().unwrap(), "test");
    assert_eq!(store.get("x").unwrap(), Some(json!(1)));
}

#[test]
fn test_step_cannot_switch_environment_for_later_steps() {
    let temp = temp_config_dir();
    let mut store = fixture_store(temp.path());
    set_steps(&mut store, &["switch", "record"]);
    let seen = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&seen);
    let mut registry = HandlerRegistry::new()
        .with("switch", |cfg| {
            cfg.set("environment", "production");
            Ok(())
        })
        .with("record", move |cfg| {
            *sink.lock().unwrap() = Some(cfg.environment()?);
            Ok(())
        });

    run(&mut store, &mut registry).unwrap();

    assert_eq!(seen.lock().unwrap().as_deref(), Some("test"));
}
