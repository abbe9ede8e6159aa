//! Integration tests for the HeroML interpreter.
//!
//! Covers:
//! - default steps: substitution, generation, step-key binding
//! - loop steps: item decoding, per-iteration scopes, sub-keys
//! - runtime failure modes and halt-on-first-error semantics
//! - the generator contract (model pass-through, call ordering)

use heroml_eval::{
    Environment, EvalError, Generator, GeneratorError, Interpreter, ScriptedGenerator, Value,
};
use heroml_types::{ActionType, AstNode, Body, Rules};
use serde_json::json;

// ══════════════════════════════════════════════════════════════════════════════
// Helpers
// ══════════════════════════════════════════════════════════════════════════════

/// A leaf node with no loop reference.
fn default_node(body: &str) -> AstNode {
    AstNode {
        kind: ActionType::Default,
        variables: Vec::new(),
        rules: Rules::default(),
        body: Body::Leaf(body.to_string()),
        references: Vec::new(),
        referenced_response: None,
        aggregate_responses: true,
    }
}

/// A loop node iterating the referenced name, binding `variable`.
fn loop_node(body: &str, variable: &str, referenced: &str) -> AstNode {
    AstNode {
        kind: ActionType::Loop,
        variables: vec![variable.to_string()],
        rules: Rules::default(),
        body: Body::Leaf(body.to_string()),
        references: Vec::new(),
        referenced_response: Some(referenced.to_string()),
        aggregate_responses: true,
    }
}

fn initial(pairs: &[(&str, Value)]) -> Environment {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
}

/// A generator that always fails.
struct FailingGenerator;

impl Generator for FailingGenerator {
    fn generate(&self, _model: &str, _prompt: &str) -> Result<String, GeneratorError> {
        Err(GeneratorError::new("backend unreachable"))
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Default steps
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn default_step_resolves_generates_and_binds() {
    let generator = ScriptedGenerator::new(["a fine poem"]);
    let interpreter = Interpreter::new(&generator, "test-model");

    let nodes = [default_node("Write a poem about {{topic}}.")];
    let env = interpreter
        .run(&nodes, initial(&[("topic", json!("bees"))]))
        .unwrap();

    let calls = generator.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].model, "test-model");
    assert_eq!(calls[0].prompt, "Write a poem about bees.");
    assert_eq!(env.get("step_1"), Some(&json!("a fine poem")));
    assert_eq!(env.get("topic"), Some(&json!("bees")));
}

#[test]
fn default_outputs_are_visible_to_later_steps() {
    let generator = ScriptedGenerator::new(["first", "second"]);
    let interpreter = Interpreter::new(&generator, "m");

    let nodes = [
        default_node("start with {{seed}}"),
        default_node("continue from {{step_1}}"),
    ];
    let env = interpreter
        .run(&nodes, initial(&[("seed", json!("x"))]))
        .unwrap();

    assert_eq!(generator.calls()[1].prompt, "continue from first");
    assert_eq!(env.get("step_2"), Some(&json!("second")));
}

#[test]
fn list_values_substitute_joined() {
    let generator = ScriptedGenerator::new(["ok"]);
    let interpreter = Interpreter::new(&generator, "m");

    let nodes = [default_node("consider: {{options}}")];
    interpreter
        .run(&nodes, initial(&[("options", json!(["a", "b", 3]))]))
        .unwrap();

    assert_eq!(generator.calls()[0].prompt, "consider: a, b, 3");
}

#[test]
fn default_with_sequence_body_is_invalid_content() {
    let generator = ScriptedGenerator::new(["never used"]);
    let interpreter = Interpreter::new(&generator, "m");

    let mut node = default_node("");
    node.body = Body::Sequence(vec![default_node("inner")]);

    let err = interpreter.run(&[node], Environment::new()).unwrap_err();
    assert_eq!(
        err,
        EvalError::InvalidContentForAction(ActionType::Default)
    );
    assert!(generator.calls().is_empty());
}

// ══════════════════════════════════════════════════════════════════════════════
// Loop steps
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn loop_runs_one_generation_per_item() {
    let generator = ScriptedGenerator::new([r#"["alpha","beta"]"#, "article one", "article two"]);
    let interpreter = Interpreter::new(&generator, "m");

    let nodes = [
        default_node("List two topics about {{subject}}."),
        loop_node("Write a short article about {{step_1}}", "step_1", "step_1"),
    ];
    let env = interpreter
        .run(&nodes, initial(&[("subject", json!("bees"))]))
        .unwrap();

    let calls = generator.calls();
    assert_eq!(calls.len(), 3);
    // The iteration scope shadows the step environment, so {{step_1}}
    // is the current item, with the raw item appended as a JSON line.
    assert_eq!(calls[1].prompt, "Write a short article about alpha \n\"alpha\"");
    assert_eq!(calls[2].prompt, "Write a short article about beta \n\"beta\"");

    assert_eq!(env.get("step_2_1"), Some(&json!("article one")));
    assert_eq!(env.get("step_2_2"), Some(&json!("article two")));
}

#[test]
fn loop_accepts_a_decoded_array_value() {
    let generator = ScriptedGenerator::new(["one", "two"]);
    let interpreter = Interpreter::new(&generator, "m");

    let nodes = [loop_node("Describe {{item}}", "item", "things")];
    let env = interpreter
        .run(&nodes, initial(&[("things", json!(["a", "b"]))]))
        .unwrap();

    assert_eq!(generator.calls().len(), 2);
    assert_eq!(env.get("step_1_1"), Some(&json!("one")));
    assert_eq!(env.get("step_1_2"), Some(&json!("two")));
    // The loop variable never escapes its iteration.
    assert!(!env.contains("item"));
}

#[test]
fn loop_outputs_are_visible_before_run_end() {
    let generator = ScriptedGenerator::new(["first item out", "after"]);
    let interpreter = Interpreter::new(&generator, "m");

    // The second step cannot reach step_1_1 through substitution (sub-
    // keys are not step tokens), but the dynamic environment already
    // holds it while the run is still going; the merged result keeps it.
    let nodes = [
        loop_node("Handle {{item}}", "item", "things"),
        default_node("wrap up {{seed}}"),
    ];
    let env = interpreter
        .run(
            &nodes,
            initial(&[("things", json!(["only"])), ("seed", json!("s"))]),
        )
        .unwrap();

    assert_eq!(env.get("step_1_1"), Some(&json!("first item out")));
    assert_eq!(env.get("step_2"), Some(&json!("after")));
}

#[test]
fn loop_without_reference_halts() {
    let generator = ScriptedGenerator::new(["never"]);
    let interpreter = Interpreter::new(&generator, "m");

    let mut node = loop_node("body {{item}}", "item", "unused");
    node.referenced_response = None;

    let err = interpreter.run(&[node], Environment::new()).unwrap_err();
    assert_eq!(err, EvalError::LoopReferenceNull);
}

#[test]
fn loop_over_missing_name_is_undefined() {
    let generator = ScriptedGenerator::new(["never"]);
    let interpreter = Interpreter::new(&generator, "m");

    let nodes = [loop_node("body {{item}}", "item", "missing")];
    let err = interpreter.run(&nodes, Environment::new()).unwrap_err();
    assert_eq!(err, EvalError::UndefinedVariable("missing".to_string()));
}

#[test]
fn loop_over_non_array_halts() {
    let generator = ScriptedGenerator::new(["never"]);
    let interpreter = Interpreter::new(&generator, "m");

    let nodes = [loop_node("body {{item}}", "item", "things")];
    for bad in [json!("not json at all"), json!(42), json!({"k": "v"})] {
        let err = interpreter
            .run(&nodes, initial(&[("things", bad)]))
            .unwrap_err();
        assert_eq!(err, EvalError::LoopVariableNotArray("things".to_string()));
    }
    assert!(generator.calls().is_empty());
}

// ══════════════════════════════════════════════════════════════════════════════
// Halting
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn unknown_node_type_halts() {
    let generator = ScriptedGenerator::new(["never"]);
    let interpreter = Interpreter::new(&generator, "m");

    let mut node = default_node("text");
    node.kind = ActionType::Any;

    let err = interpreter.run(&[node], Environment::new()).unwrap_err();
    assert_eq!(err, EvalError::UnknownNodeType(ActionType::Any));
}

#[test]
fn generator_failure_halts_without_partial_results() {
    let interpreter = Interpreter::new(&FailingGenerator, "m");

    let nodes = [
        default_node("first {{seed}}"),
        default_node("never reached"),
    ];
    let err = interpreter
        .run(&nodes, initial(&[("seed", json!("x"))]))
        .unwrap_err();

    assert!(matches!(err, EvalError::GeneratorFailure(_)));
    assert_eq!(err.to_string(), "generator failure: backend unreachable");
}

#[test]
fn undefined_variable_halts_before_generation() {
    let generator = ScriptedGenerator::new(["never"]);
    let interpreter = Interpreter::new(&generator, "m");

    let nodes = [default_node("uses {{ghost}} here")];
    let err = interpreter.run(&nodes, Environment::new()).unwrap_err();

    assert_eq!(err, EvalError::UndefinedVariable("ghost".to_string()));
    assert!(generator.calls().is_empty());
}

#[test]
fn scripted_generator_exhaustion_is_a_generator_failure() {
    let generator = ScriptedGenerator::new(["only one"]);
    let interpreter = Interpreter::new(&generator, "m");

    let nodes = [default_node("a {{s}}"), default_node("b {{s}}")];
    let err = interpreter
        .run(&nodes, initial(&[("s", json!("x"))]))
        .unwrap_err();
    assert!(matches!(err, EvalError::GeneratorFailure(_)));
}
