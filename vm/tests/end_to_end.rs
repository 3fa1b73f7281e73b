use core::InterpretResult;
use vm::Vm;

/// Runs `source` against a VM writing to an in-memory buffer and returns
/// both the result and the bytes that would have gone to stdout, so a
/// scenario can assert on the literal printed value, not just the
/// `InterpretResult` variant.
fn interpret_capturing(source: &str) -> (InterpretResult, String) {
    let mut vm = Vm::with_writer(Vec::new());
    let result = vm.interpret(source);
    let output = String::from_utf8(vm.into_writer()).expect("output must be valid utf-8");
    (result, output)
}

#[test]
fn scenario_arithmetic_precedence() {
    let (result, output) = interpret_capturing("1 + 2 * 3");
    assert_eq!(result, InterpretResult::Ok);
    assert_eq!(output, "7\n");
}

#[test]
fn scenario_grouping() {
    let (result, output) = interpret_capturing("(1 + 2) * 3");
    assert_eq!(result, InterpretResult::Ok);
    assert_eq!(output, "9\n");
}

#[test]
fn scenario_logical_negation_of_nil() {
    let (result, output) = interpret_capturing("!nil");
    assert_eq!(result, InterpretResult::Ok);
    assert_eq!(output, "true\n");
}

#[test]
fn scenario_string_concatenation() {
    let (result, output) = interpret_capturing("\"foo\" + \"bar\"");
    assert_eq!(result, InterpretResult::Ok);
    assert_eq!(output, "foobar\n");
}

#[test]
fn scenario_mixed_plus_operands_fails_at_runtime() {
    let mut vm = Vm::new();
    assert_eq!(vm.interpret("1 + \"x\""), InterpretResult::RuntimeError);
}

#[test]
fn scenario_less_equal_desugaring() {
    let (result, output) = interpret_capturing("1 <= 2");
    assert_eq!(result, InterpretResult::Ok);
    assert_eq!(output, "true\n");
}

#[test]
fn scenario_dangling_operator_is_compile_error() {
    let mut vm = Vm::new();
    assert_eq!(vm.interpret("1 +"), InterpretResult::CompileError);
}

#[test]
fn each_interpret_call_starts_with_a_fresh_stack() {
    let mut vm = Vm::new();
    assert_eq!(vm.interpret("1 + \"oops\""), InterpretResult::RuntimeError);
    // A prior runtime error must not corrupt subsequent runs.
    assert_eq!(vm.interpret("1 + 1"), InterpretResult::Ok);
}

#[test]
fn equality_never_crosses_kinds() {
    let mut vm = Vm::new();
    assert_eq!(vm.interpret("1 == \"1\""), InterpretResult::Ok);
}

#[test]
fn and_or_are_eager_boolean_combinators() {
    let mut vm = Vm::new();
    assert_eq!(vm.interpret("true and false"), InterpretResult::Ok);
    assert_eq!(vm.interpret("true or false"), InterpretResult::Ok);
}
