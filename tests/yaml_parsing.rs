//! Integration tests for task file parsing

mod common;

use graft::config::{parse_config, parse_config_file, validate_config};
use graft::runner::{ExecStyle, Registry};

#[test]
fn test_parse_complete_task_file() {
    let yaml = r#"
default:
  pre: build

setup:
  cmd: mkdir -p build

compile:
  pre: setup
  cmd:
    - cc -c -o build/main.o main.c
    - cc -o build/app build/main.o
  out: build/app

build:
  pre: compile

serve:
  pre: build
  cmd: ./build/app --serve
  spawn: true
"#;

    let config = parse_config(yaml).unwrap();
    validate_config(&config).unwrap();

    assert_eq!(config.tasks.len(), 5);

    // Single-string fields normalize to one-element sequences
    let default = config.tasks.get("default").unwrap();
    assert_eq!(default.pre, vec!["build".to_string()]);
    assert!(default.cmd.is_empty());

    let compile = config.tasks.get("compile").unwrap();
    assert_eq!(compile.pre, vec!["setup".to_string()]);
    assert_eq!(compile.cmd.len(), 2);
    assert_eq!(compile.out, vec!["build/app".to_string()]);
    assert!(!compile.spawn);

    let serve = config.tasks.get("serve").unwrap();
    assert!(serve.spawn);
}

#[test]
fn test_string_and_sequence_forms_are_equivalent() {
    let string_form = parse_config("t:\n  pre: a\n  cmd: run\n  out: f\n").unwrap();
    let seq_form = parse_config("t:\n  pre: [a]\n  cmd: [run]\n  out: [f]\n").unwrap();

    let s = string_form.tasks.get("t").unwrap();
    let q = seq_form.tasks.get("t").unwrap();
    assert_eq!(s.pre, q.pre);
    assert_eq!(s.cmd, q.cmd);
    assert_eq!(s.out, q.out);
}

#[test]
fn test_empty_and_null_bodies() {
    let config = parse_config("explicit: {}\nbare:\n").unwrap();

    for name in ["explicit", "bare"] {
        let task = config.tasks.get(name).unwrap();
        assert!(task.pre.is_empty());
        assert!(task.cmd.is_empty());
        assert!(task.out.is_empty());
        assert!(!task.spawn);
    }
}

#[test]
fn test_parse_task_file_from_disk() {
    let (_temp_dir, task_path) = common::create_task_file(
        r#"
hello:
  cmd: echo hello
"#,
    );

    let config = parse_config_file(&task_path).unwrap();
    assert!(config.tasks.contains_key("hello"));
}

#[test]
fn test_registry_from_parsed_file() {
    let config = parse_config(
        r#"
b:
  cmd: echo b
a:
  cmd: echo a
  spawn: true
"#,
    )
    .unwrap();

    let registry = Registry::load(config);
    assert_eq!(registry.names(), vec!["a", "b"]);
    assert_eq!(registry.get("a").unwrap().style, ExecStyle::Streaming);
    assert_eq!(registry.get("b").unwrap().style, ExecStyle::Buffered);
}

#[test]
fn test_cycle_rejected_at_validation() {
    let config = parse_config("a:\n  pre: b\nb:\n  pre: a\n").unwrap();
    assert!(validate_config(&config).is_err());
}

#[test]
fn test_malformed_yaml_is_an_error() {
    assert!(parse_config("t:\n  cmd: [unclosed\n").is_err());
    assert!(parse_config("- a\n- list\n").is_err());
}
