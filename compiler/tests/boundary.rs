use core::Heap;
use compiler::Compiler;

#[test]
fn missing_closing_paren_is_a_compile_error() {
    let mut heap = Heap::new();
    assert!(Compiler::compile("(1 + 2", &mut heap).is_err());
}

#[test]
fn empty_source_is_a_compile_error() {
    let mut heap = Heap::new();
    assert!(Compiler::compile("", &mut heap).is_err());
}

#[test]
fn unterminated_string_is_a_compile_error() {
    let mut heap = Heap::new();
    assert!(Compiler::compile("\"never closed", &mut heap).is_err());
}

#[test]
fn two_hundred_fifty_six_constants_is_the_ceiling() {
    let mut heap = Heap::new();
    let ok_source = (0..256).map(|n| n.to_string()).collect::<Vec<_>>().join(" + ");
    assert!(Compiler::compile(&ok_source, &mut heap).is_ok());

    let mut heap = Heap::new();
    let over_source = (0..257).map(|n| n.to_string()).collect::<Vec<_>>().join(" + ");
    assert!(Compiler::compile(&over_source, &mut heap).is_err());
}

#[test]
fn first_error_suppresses_cascading_errors() {
    // Two unexpected characters in a row should still report as a single
    // compile failure (panic-mode error suppression), not crash the
    // compiler.
    let mut heap = Heap::new();
    assert!(Compiler::compile("@ #", &mut heap).is_err());
}
