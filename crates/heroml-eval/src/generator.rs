//! The text-generation boundary.
//!
//! The interpreter's only IO dependency. Injected at interpreter
//! construction, so hosts wire a real backend and tests wire a
//! scripted fake.

use std::cell::RefCell;
use std::collections::VecDeque;

use thiserror::Error;

/// A failed generation. Fatal to the current run; the interpreter
/// never retries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct GeneratorError(String);

impl GeneratorError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// The text-generation collaborator.
///
/// Invoked once per `Default` node and once per loop iteration: given
/// a model identifier and a fully resolved prompt, produce the
/// generated text. Calls are blocking and synchronous; there is no
/// retry, backoff, or timeout at this layer.
pub trait Generator {
    fn generate(&self, model: &str, prompt: &str) -> Result<String, GeneratorError>;
}

/// One recorded [`ScriptedGenerator`] invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub model: String,
    pub prompt: String,
}

/// Scripted fake generator for tests: answers from a response queue
/// and records every call it receives.
#[derive(Debug, Default)]
pub struct ScriptedGenerator {
    responses: RefCell<VecDeque<String>>,
    calls: RefCell<Vec<RecordedCall>>,
}

impl ScriptedGenerator {
    pub fn new(responses: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            responses: RefCell::new(responses.into_iter().map(Into::into).collect()),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }
}

impl Generator for ScriptedGenerator {
    fn generate(&self, model: &str, prompt: &str) -> Result<String, GeneratorError> {
        self.calls.borrow_mut().push(RecordedCall {
            model: model.to_string(),
            prompt: prompt.to_string(),
        });
        self.responses
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| GeneratorError::new("scripted generator has no response left"))
    }
}
