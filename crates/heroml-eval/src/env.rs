//! Layered environments for the HeroML interpreter.
//!
//! Three layers, outermost to innermost:
//! - the dynamic environment: long-lived, seeded from initial values,
//!   grown by step outputs;
//! - the step environment: run-scoped `step_<i>` / `step_<i>_<j>`
//!   outputs, merged into the dynamic environment at run end;
//! - iteration scopes: a single loop-variable binding that never
//!   escapes its loop body.

use std::collections::BTreeMap;

use serde_json::Value;

/// A flat name → value mapping.
///
/// Values are arbitrary JSON: step outputs are strings, initial values
/// may be strings, arrays, or anything JSON-serializable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    bindings: BTreeMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name`, replacing any existing binding.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Fold `other` into this environment. `other` wins on collision.
    pub fn merge(&mut self, other: Environment) {
        self.bindings.extend(other.bindings);
    }

    pub fn bindings(&self) -> &BTreeMap<String, Value> {
        &self.bindings
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl FromIterator<(String, Value)> for Environment {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            bindings: iter.into_iter().collect(),
        }
    }
}

/// A read view of an environment with at most one local binding
/// layered on top.
///
/// Loop iterations resolve their loop variable here; the binding drops
/// with the scope and never persists.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    env: &'a Environment,
    local: Option<(&'a str, &'a Value)>,
}

impl<'a> Scope<'a> {
    /// A scope with no local binding.
    pub fn new(env: &'a Environment) -> Self {
        Self { env, local: None }
    }

    /// A scope with one local binding shadowing `env`.
    pub fn with_binding(env: &'a Environment, name: &'a str, value: &'a Value) -> Self {
        Self {
            env,
            local: Some((name, value)),
        }
    }

    /// Look up a name, innermost first.
    pub fn get(&self, name: &str) -> Option<&'a Value> {
        match self.local {
            Some((local, value)) if local == name => Some(value),
            _ => self.env.get(name),
        }
    }
}

/// Seed the dynamic environment for a run.
///
/// `variables` is the program's declared-variable list; `supplied`
/// maps names to initial values. A declared variable with no supplied
/// value is left absent; referencing it later fails as
/// `UndefinedVariable`. Step-result names are never expected in
/// `supplied` and are skipped silently.
pub fn assign_initial_values(
    variables: &[String],
    supplied: &BTreeMap<String, Value>,
) -> Environment {
    let mut environment = Environment::new();
    for name in variables {
        match supplied.get(name) {
            Some(value) => environment.insert(name.clone(), value.clone()),
            None if heroml_lexer::has_step_prefix(name) => {}
            None => log::warn!("no initial value supplied for variable: {name}"),
        }
    }
    environment
}
