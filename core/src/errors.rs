/// The outcome of a single `Vm::interpret` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpretResult {
  Ok,
  CompileError,
  RuntimeError,
}

/// A marker that compilation failed.
///
/// The diagnostic itself was already printed to stderr at the point of
/// detection (see `Compiler::error_at`); this type carries no message of
/// its own — just a flag, not an accumulated list of errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileError;
