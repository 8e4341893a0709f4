//! Core task file types
//!
//! This module defines the data structures that represent a graft.yml task
//! file: a top-level mapping from task name to task body.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Top-level task file structure: the file itself is the task mapping.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Config {
    /// Tasks defined in the file, keyed by name
    pub tasks: HashMap<String, TaskBody>,
}

/// One task as written in the task file
///
/// Every field is optional. `pre`, `cmd`, and `out` accept either a single
/// string or a sequence of strings; both forms normalize to a `Vec<String>`
/// here, so nothing downstream ever re-inspects the original shape.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TaskBody {
    /// Names of tasks that must complete before this one
    #[serde(default, deserialize_with = "deserialize_string_or_seq")]
    pub pre: Vec<String>,

    /// Shell commands to execute, in order
    #[serde(default, deserialize_with = "deserialize_string_or_seq")]
    pub cmd: Vec<String>,

    /// Output paths; if any one exists the task is considered up to date
    #[serde(default, deserialize_with = "deserialize_string_or_seq")]
    pub out: Vec<String>,

    /// Stream command output live instead of buffering it
    #[serde(default)]
    pub spawn: bool,
}

impl<'de> Deserialize<'de> for Config {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;
        use serde_yaml::Value;

        let value = Value::deserialize(deserializer)?;

        let mapping = match value {
            Value::Mapping(mapping) => mapping,
            // An empty file parses as null: no tasks defined
            Value::Null => return Ok(Config::default()),
            _ => return Err(D::Error::custom("task file must be a mapping of task names")),
        };

        let mut tasks = HashMap::new();
        for (key, body) in mapping {
            let name = match key {
                Value::String(name) => name,
                other => {
                    return Err(D::Error::custom(format!(
                        "task names must be strings, got {:?}",
                        other
                    )))
                }
            };

            let body = match body {
                // A bare `name:` entry is a task with all defaults
                Value::Null => TaskBody::default(),
                other => TaskBody::deserialize(other).map_err(D::Error::custom)?,
            };

            tasks.insert(name, body);
        }

        Ok(Config { tasks })
    }
}

/// Custom deserializer that accepts a single string or an array of strings
fn deserialize_string_or_seq<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    use serde_yaml::Value;

    let value = Value::deserialize(deserializer)?;

    match value {
        // Single string
        Value::String(s) => Ok(vec![s]),
        // Array of strings
        Value::Sequence(seq) => seq
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Ok(s),
                other => Err(D::Error::custom(format!(
                    "expected a string, got {:?}",
                    other
                ))),
            })
            .collect(),
        // Null or not present
        Value::Null => Ok(Vec::new()),
        _ => Err(D::Error::custom("expected a string or a list of strings")),
    }
}
