pub mod bytecode;
pub mod chunk;
pub mod errors;
pub mod objects;
pub mod tokens;
pub mod utils;
pub mod value;

pub use bytecode::OpCode;
pub use chunk::Chunk;
pub use errors::{CompileError, InterpretResult};
pub use objects::{Heap, Obj, ObjHandle, ObjString};
pub use tokens::{Token, TokenKind};
pub use value::Value;

/// Crate version, read from this crate's own Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Maximum number of values the VM's stack may hold at once.
pub const STACK_MAX: usize = 256;

/// Maximum number of distinct constants a single chunk may hold. Enforced
/// because constant-bearing opcodes carry a single byte operand.
pub const CONSTANTS_MAX: usize = 256;
