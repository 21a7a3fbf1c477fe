//! Typed shape of a technique file.
//!
//! The YAML is validated into this model exactly once at load. Only a
//! non-mapping root is fatal; every field below that degrades to `None` or
//! empty when missing, null, or of an unexpected type, so one malformed
//! test never sinks the whole document.

use anyhow::{bail, Result};
use serde_yaml::Value;

/// One technique file (`Txxxx.yaml`).
#[derive(Debug, Default)]
pub struct Document {
    /// `attack_technique`, trimmed. Such as `T1059.004`.
    pub technique: String,
    /// `display_name`, falling back to the top-level `name`, trimmed.
    pub display_name: String,
    /// `atomic_tests` in file order.
    pub tests: Vec<AtomicTest>,
}

#[derive(Debug, Default)]
pub struct AtomicTest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub supported_platforms: Vec<String>,
    pub auto_generated_guid: Option<String>,
    /// Parameter names and definitions, in YAML insertion order.
    pub input_arguments: Vec<(String, InputArgument)>,
    pub executor: Executor,
}

#[derive(Debug, Default)]
pub struct InputArgument {
    pub description: Option<String>,
    pub arg_type: Option<String>,
    pub default: Option<String>,
}

#[derive(Debug, Default)]
pub struct Executor {
    pub name: Option<String>,
    pub command: Option<String>,
    pub cleanup_command: Option<String>,
    /// Only an actual YAML boolean counts; `"true"` the string does not.
    pub elevation_required: Option<bool>,
}

impl Document {
    /// Validate a parsed YAML value into the fixed shape.
    pub fn from_yaml(root: &Value) -> Result<Document> {
        if root.as_mapping().is_none() {
            bail!("input did not parse into a mapping");
        }
        let technique = scalar_string(root.get("attack_technique"))
            .map(|s| s.trim().to_string())
            .unwrap_or_default();
        let display_name = scalar_string(root.get("display_name"))
            .or_else(|| scalar_string(root.get("name")))
            .map(|s| s.trim().to_string())
            .unwrap_or_default();
        let tests = root
            .get("atomic_tests")
            .and_then(Value::as_sequence)
            .map(|seq| seq.iter().map(AtomicTest::from_yaml).collect())
            .unwrap_or_default();
        Ok(Document {
            technique,
            display_name,
            tests,
        })
    }
}

impl AtomicTest {
    /// Never fails: a non-mapping entry becomes an all-default test.
    fn from_yaml(value: &Value) -> AtomicTest {
        AtomicTest {
            name: scalar_string(value.get("name")),
            description: scalar_string(value.get("description")),
            supported_platforms: string_sequence(value.get("supported_platforms")),
            auto_generated_guid: scalar_string(value.get("auto_generated_guid")),
            input_arguments: argument_pairs(value.get("input_arguments")),
            executor: Executor::from_yaml(value.get("executor")),
        }
    }
}

impl Executor {
    fn from_yaml(value: Option<&Value>) -> Executor {
        let Some(v) = value else {
            return Executor::default();
        };
        Executor {
            name: scalar_string(v.get("name")),
            command: scalar_string(v.get("command")),
            cleanup_command: scalar_string(v.get("cleanup_command")),
            elevation_required: v.get("elevation_required").and_then(Value::as_bool),
        }
    }
}

/// Stringify a scalar: strings verbatim, numbers and booleans in their YAML
/// spelling. Null, missing and structured values yield `None`.
fn scalar_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn string_sequence(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_sequence)
        .map(|seq| seq.iter().filter_map(|v| scalar_string(Some(v))).collect())
        .unwrap_or_default()
}

fn argument_pairs(value: Option<&Value>) -> Vec<(String, InputArgument)> {
    let Some(map) = value.and_then(Value::as_mapping) else {
        return Vec::new();
    };
    map.iter()
        .map(|(k, v)| {
            let name = scalar_string(Some(k)).unwrap_or_default();
            let arg = InputArgument {
                description: scalar_string(v.get("description")),
                arg_type: scalar_string(v.get("type")),
                default: scalar_string(v.get("default")),
            };
            (name, arg)
        })
        .collect()
}
