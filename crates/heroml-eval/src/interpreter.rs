//! Sequential AST interpreter.
//!
//! Processes nodes strictly in source order against the layered
//! environments, invoking the generator once per `Default` node and
//! once per loop iteration. The first runtime failure halts the run;
//! partial results are not surfaced.

use heroml_types::{ActionType, AstNode};
use serde_json::Value;

use crate::env::{Environment, Scope};
use crate::error::{EvalError, EvalResult};
use crate::generator::Generator;
use crate::subst;

/// The HeroML interpreter.
///
/// Holds the injected generator and the model identifier passed to it
/// on every invocation. One interpreter may serve many runs; each run
/// owns its environments, so independent runs are free to proceed
/// concurrently if the generator tolerates it.
pub struct Interpreter<'g> {
    generator: &'g dyn Generator,
    model: String,
}

impl<'g> Interpreter<'g> {
    pub fn new(generator: &'g dyn Generator, model: impl Into<String>) -> Self {
        Self {
            generator,
            model: model.into(),
        }
    }

    /// Execute `nodes` against a fresh run seeded with `initial`.
    ///
    /// On a clean finish the step environment is merged into the
    /// dynamic environment and the merged mapping is returned. On the
    /// first failure the run halts and only the error escapes.
    pub fn run(&self, nodes: &[AstNode], initial: Environment) -> EvalResult<Environment> {
        let mut dynamic = initial;
        let mut steps = Environment::new();

        for (index, node) in nodes.iter().enumerate() {
            log::debug!("processing node {index} ({})", node.kind);
            self.eval_node(node, index, &mut dynamic, &mut steps)?;
        }

        dynamic.merge(steps);
        Ok(dynamic)
    }

    fn eval_node(
        &self,
        node: &AstNode,
        index: usize,
        dynamic: &mut Environment,
        steps: &mut Environment,
    ) -> EvalResult<()> {
        match node.kind {
            ActionType::Default => self.eval_default(node, index, dynamic, steps),
            ActionType::Loop => self.eval_loop(node, index, dynamic, steps),
            ActionType::Any => Err(EvalError::UnknownNodeType(node.kind)),
        }
    }

    fn eval_default(
        &self,
        node: &AstNode,
        index: usize,
        dynamic: &mut Environment,
        steps: &mut Environment,
    ) -> EvalResult<()> {
        let Some(text) = node.body.as_leaf() else {
            return Err(EvalError::InvalidContentForAction(ActionType::Default));
        };

        let prompt = subst::resolve(text, &Scope::new(dynamic), &Scope::new(steps))?;
        let response = self.generate(&prompt)?;

        let key = format!("step_{}", index + 1);
        steps.insert(key.clone(), Value::String(response.clone()));
        dynamic.insert(key, Value::String(response));
        Ok(())
    }

    fn eval_loop(
        &self,
        node: &AstNode,
        index: usize,
        dynamic: &mut Environment,
        steps: &mut Environment,
    ) -> EvalResult<()> {
        let referenced = node
            .referenced_response
            .as_deref()
            .ok_or(EvalError::LoopReferenceNull)?;
        let value = dynamic
            .get(referenced)
            .ok_or_else(|| EvalError::UndefinedVariable(referenced.to_string()))?;
        let items = decode_items(referenced, value)?;

        let Some(text) = node.body.as_leaf() else {
            return Err(EvalError::InvalidContentForAction(ActionType::Loop));
        };
        let loop_variable = node.variables.first();

        for (sub, item) in items.iter().enumerate() {
            let (dynamic_scope, step_scope) = match loop_variable {
                Some(name) => (
                    Scope::with_binding(dynamic, name, item),
                    Scope::with_binding(steps, name, item),
                ),
                None => (Scope::new(dynamic), Scope::new(steps)),
            };
            let resolved = subst::resolve(text, &dynamic_scope, &step_scope)?;
            // The raw item rides along as a trailing JSON line.
            let prompt = format!("{resolved} \n{item}");
            let response = self.generate(&prompt)?;

            let key = format!("step_{}_{}", index + 1, sub + 1);
            steps.insert(key.clone(), Value::String(response.clone()));
            // Loop outputs are visible to the rest of this run at once.
            dynamic.insert(key, Value::String(response));
        }
        Ok(())
    }

    fn generate(&self, prompt: &str) -> EvalResult<String> {
        log::trace!("prompt: {prompt}");
        Ok(self.generator.generate(&self.model, prompt)?)
    }
}

/// Decode a loop's referenced value into its items: a JSON array
/// directly, or a string that parses to one.
fn decode_items(name: &str, value: &Value) -> EvalResult<Vec<Value>> {
    match value {
        Value::Array(items) => Ok(items.clone()),
        Value::String(text) => match serde_json::from_str(text) {
            Ok(Value::Array(items)) => Ok(items),
            _ => Err(EvalError::LoopVariableNotArray(name.to_string())),
        },
        _ => Err(EvalError::LoopVariableNotArray(name.to_string())),
    }
}
