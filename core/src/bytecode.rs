use num_derive::FromPrimitive;
use num_traits::FromPrimitive as _;

/// The set of instructions supported by the virtual machine.
///
/// **NOTE:** Changing the order in which members are declared creates
/// incompatibilities between different versions of the interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
#[repr(u8)]
pub enum OpCode {
  // Instructions with zero chunk operands.
  Add,
  Subtract,
  Multiply,
  Divide,
  Negate,
  Not,
  Equal,
  Greater,
  Less,
  And,
  Or,
  True,
  False,
  Nil,
  Return,

  // Instructions with one chunk operand (a constant-pool index).
  Constant,
}

impl OpCode {
  /// Decodes a raw byte back into an `OpCode`.
  ///
  /// Returns `None` for any byte with no matching variant; that should only
  /// happen if a chunk's bytecode has been corrupted or hand-assembled
  /// incorrectly, since the compiler only ever emits valid opcodes.
  pub fn from_byte(byte: u8) -> Option<OpCode> {
    FromPrimitive::from_u8(byte)
  }
}
