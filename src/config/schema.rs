//! Task file validation
//!
//! The memoized engine would deadlock on a precondition cycle (a task would
//! end up awaiting its own in-progress handle), so cycles are rejected here
//! before a Registry is ever built. Unknown precondition names are left for
//! the engine to report, task by task, at execution time.

use crate::config::types::Config;
use crate::error::{ConfigError, ConfigResult};
use std::collections::HashSet;

/// Validate a complete task file
pub fn validate_config(config: &Config) -> ConfigResult<()> {
    detect_circular_preconditions(config)
}

/// Detect cycles in the precondition graph
fn detect_circular_preconditions(config: &Config) -> ConfigResult<()> {
    let mut visited = HashSet::new();

    for task_name in config.tasks.keys() {
        let mut stack = Vec::new();
        check_precondition_cycle(config, task_name, &mut visited, &mut stack)?;
    }

    Ok(())
}

/// Recursively check for cycles reachable from one task
fn check_precondition_cycle(
    config: &Config,
    task_name: &str,
    visited: &mut HashSet<String>,
    stack: &mut Vec<String>,
) -> ConfigResult<()> {
    if stack.iter().any(|name| name == task_name) {
        stack.push(task_name.to_string());
        return Err(ConfigError::CircularPreconditions(stack.join(" -> ")));
    }

    // Already fully processed via another root
    if visited.contains(task_name) {
        return Ok(());
    }

    // Names that resolve to no task are the engine's problem, not a cycle
    let Some(body) = config.tasks.get(task_name) else {
        return Ok(());
    };

    stack.push(task_name.to_string());

    for precondition in &body.pre {
        check_precondition_cycle(config, precondition, visited, stack)?;
    }

    stack.pop();
    visited.insert(task_name.to_string());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse::parse_config;

    #[test]
    fn test_validate_valid_config() {
        let config = parse_config(
            r#"
setup:
  cmd: mkdir -p build
build:
  pre: setup
  cmd: make
"#,
        )
        .unwrap();

        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_detect_direct_cycle() {
        let config = parse_config(
            r#"
a:
  pre: b
b:
  pre: a
"#,
        )
        .unwrap();

        let result = validate_config(&config);
        assert!(matches!(result, Err(ConfigError::CircularPreconditions(_))));
    }

    #[test]
    fn test_detect_self_cycle() {
        let config = parse_config("a:\n  pre: a\n").unwrap();

        let result = validate_config(&config);
        assert!(matches!(result, Err(ConfigError::CircularPreconditions(_))));
    }

    #[test]
    fn test_cycle_error_names_the_chain() {
        let config = parse_config(
            r#"
a:
  pre: b
b:
  pre: c
c:
  pre: a
"#,
        )
        .unwrap();

        match validate_config(&config) {
            Err(ConfigError::CircularPreconditions(chain)) => {
                assert!(chain.contains(" -> "));
            }
            other => panic!("expected a cycle error, got {:?}", other),
        }
    }

    #[test]
    fn test_diamond_is_not_a_cycle() {
        let config = parse_config(
            r#"
a:
  cmd: echo a
b:
  pre: a
c:
  pre: a
d:
  pre: [b, c]
"#,
        )
        .unwrap();

        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_unknown_precondition_passes_validation() {
        // Left to the engine, which reports it as an undefined task
        let config = parse_config("a:\n  pre: ghost\n").unwrap();
        assert!(validate_config(&config).is_ok());
    }
}
