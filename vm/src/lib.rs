use std::io::{self, Stdout, Write};

use compiler::Compiler;
use core::{Chunk, Heap, InterpretResult, OpCode, Value, STACK_MAX};

/// The outcome of executing a single instruction.
enum RuntimeResult {
    Continue,
    Ok,
    RuntimeError,
}

/// A stack-based virtual machine. Owns the heap arena every object
/// allocated during a run (by the compiler's string constants, or by
/// concatenation at runtime) is registered into.
///
/// Generic over the sink `Return` prints to (`Stdout` by default) so tests
/// can swap in an in-memory buffer and assert on the exact bytes printed,
/// rather than only on the `InterpretResult` the run ended with.
pub struct Vm<W: Write = Stdout> {
    heap: Heap,
    stack: Vec<Value>,
    ip: usize,
    out: W,
}

impl Default for Vm<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl Vm<Stdout> {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl<W: Write> Vm<W> {
    /// Builds a VM that prints `Return`'s value to `out` instead of stdout.
    pub fn with_writer(out: W) -> Self {
        Self { heap: Heap::new(), stack: Vec::with_capacity(STACK_MAX), ip: 0, out }
    }

    /// Consumes the VM and hands back its output sink, e.g. to inspect a
    /// buffer a test ran against.
    pub fn into_writer(self) -> W {
        self.out
    }

    /// Compiles and executes `source`. Returns `CompileError` without
    /// running anything if compilation failed; otherwise runs the
    /// resulting chunk to completion (or to the first runtime error).
    pub fn interpret(&mut self, source: &str) -> InterpretResult {
        log::debug!("interpreting {} bytes of source", source.len());

        let chunk = match Compiler::compile(source, &mut self.heap) {
            Ok(chunk) => chunk,
            Err(_) => {
                log::debug!("compilation failed, not running");
                return InterpretResult::CompileError;
            }
        };

        #[cfg(feature = "PLV")]
        plv::disassemble_chunk(&chunk, &self.heap, "script");

        self.ip = 0;
        self.run(&chunk)
    }

    fn run(&mut self, chunk: &Chunk) -> InterpretResult {
        loop {
            let instruction = self.read_byte(chunk);

            let exec = match OpCode::from_byte(instruction) {
                Some(OpCode::Constant) => self.op_constant(chunk),
                Some(OpCode::Nil) => self.op_push(chunk, Value::Nil),
                Some(OpCode::True) => self.op_push(chunk, Value::Bool(true)),
                Some(OpCode::False) => self.op_push(chunk, Value::Bool(false)),
                Some(OpCode::Equal) => self.op_equal(chunk),
                Some(OpCode::Greater) => self.op_compare(chunk, |a, b| a > b),
                Some(OpCode::Less) => self.op_compare(chunk, |a, b| a < b),
                Some(OpCode::Add) => self.op_add(chunk),
                Some(OpCode::Subtract) => self.op_numeric(chunk, |a, b| a - b),
                Some(OpCode::Multiply) => self.op_numeric(chunk, |a, b| a * b),
                Some(OpCode::Divide) => self.op_numeric(chunk, |a, b| a / b),
                Some(OpCode::Not) => self.op_not(chunk),
                Some(OpCode::Negate) => self.op_negate(chunk),
                Some(OpCode::And) => self.op_and_or(chunk, |a, b| a && b),
                Some(OpCode::Or) => self.op_and_or(chunk, |a, b| a || b),
                Some(OpCode::Return) => self.op_return(),
                None => {
                    self.runtime_error(chunk, "Unknown opcode.");
                    RuntimeResult::RuntimeError
                }
            };

            match exec {
                RuntimeResult::Continue => continue,
                RuntimeResult::Ok => return InterpretResult::Ok,
                RuntimeResult::RuntimeError => return InterpretResult::RuntimeError,
            }
        }
    }

    fn read_byte(&mut self, chunk: &Chunk) -> u8 {
        let byte = chunk.code[self.ip];
        self.ip += 1;
        byte
    }

    fn push(&mut self, value: Value) -> Result<(), &'static str> {
        if self.stack.len() >= STACK_MAX {
            return Err("Stack overflow.");
        }
        self.stack.push(value);
        Ok(())
    }

    fn pop(&mut self) -> Value {
        self.stack.pop().expect("pop() called on an empty VM stack")
    }

    fn peek(&self, distance: usize) -> Value {
        self.stack[self.stack.len() - 1 - distance]
    }

    fn reset_stack(&mut self) {
        self.stack.clear();
    }

    /// Reports a runtime error: the formatted message, then the source line
    /// the failing instruction came from, then a stack reset.
    fn runtime_error(&mut self, chunk: &Chunk, message: &str) {
        let line = chunk.lines[self.ip - 1];
        log::debug!("runtime error at line {}: {}", line, message);
        eprintln!("{}", message);
        eprintln!("[line {}] in script", line);
        self.reset_stack();
    }

    fn op_push(&mut self, chunk: &Chunk, value: Value) -> RuntimeResult {
        match self.push(value) {
            Ok(()) => RuntimeResult::Continue,
            Err(msg) => {
                self.runtime_error(chunk, msg);
                RuntimeResult::RuntimeError
            }
        }
    }

    fn op_constant(&mut self, chunk: &Chunk) -> RuntimeResult {
        let index = self.read_byte(chunk) as usize;
        let value = chunk.constants[index];
        self.op_push(chunk, value)
    }

    fn op_return(&mut self) -> RuntimeResult {
        let value = self.pop();
        writeln!(self.out, "{}", value.display(&self.heap)).expect("failed to write output");
        RuntimeResult::Ok
    }

    fn op_negate(&mut self, chunk: &Chunk) -> RuntimeResult {
        if !self.peek(0).is_number() {
            self.runtime_error(chunk, "Operand must be a number.");
            return RuntimeResult::RuntimeError;
        }
        let n = self.pop().as_number().unwrap();
        self.op_push(chunk, Value::Number(-n))
    }

    fn op_not(&mut self, chunk: &Chunk) -> RuntimeResult {
        let value = self.pop();
        self.op_push(chunk, Value::Bool(value.is_falsey()))
    }

    fn op_equal(&mut self, chunk: &Chunk) -> RuntimeResult {
        let b = self.pop();
        let a = self.pop();
        let equal = a.values_equal(&b, &self.heap);
        self.op_push(chunk, Value::Bool(equal))
    }

    fn op_numeric(&mut self, chunk: &Chunk, op: fn(f64, f64) -> f64) -> RuntimeResult {
        if !self.peek(0).is_number() || !self.peek(1).is_number() {
            self.runtime_error(chunk, "Operands must be number.");
            return RuntimeResult::RuntimeError;
        }
        let b = self.pop().as_number().unwrap();
        let a = self.pop().as_number().unwrap();
        self.op_push(chunk, Value::Number(op(a, b)))
    }

    fn op_compare(&mut self, chunk: &Chunk, op: fn(f64, f64) -> bool) -> RuntimeResult {
        if !self.peek(0).is_number() || !self.peek(1).is_number() {
            self.runtime_error(chunk, "Operands must be number.");
            return RuntimeResult::RuntimeError;
        }
        let b = self.pop().as_number().unwrap();
        let a = self.pop().as_number().unwrap();
        self.op_push(chunk, Value::Bool(op(a, b)))
    }

    /// `+` accepts two numbers or two strings; anything else is a runtime
    /// error. String concatenation allocates a fresh heap object rather
    /// than mutating either operand.
    fn op_add(&mut self, chunk: &Chunk) -> RuntimeResult {
        let (a, b) = (self.peek(1), self.peek(0));

        match (a, b) {
            (Value::Number(_), Value::Number(_)) => self.op_numeric(chunk, |a, b| a + b),
            (Value::Obj(a_handle), Value::Obj(b_handle)) => {
                let concatenated =
                    format!("{}{}", self.heap.as_str(a_handle), self.heap.as_str(b_handle));
                self.pop();
                self.pop();
                let handle = self.heap.alloc_string(concatenated);
                self.op_push(chunk, Value::Obj(handle))
            }
            _ => {
                self.runtime_error(chunk, "Operands of '+' must be number or string.");
                RuntimeResult::RuntimeError
            }
        }
    }

    /// `and`/`or` are eager: both operands are always evaluated (there is
    /// no jump machinery to short-circuit with), then combined with the
    /// given boolean operator. See DESIGN.md for why these are real
    /// opcodes with well-defined semantics rather than no-ops.
    fn op_and_or(&mut self, chunk: &Chunk, op: fn(bool, bool) -> bool) -> RuntimeResult {
        let b = self.pop();
        let a = self.pop();
        let result = op(!a.is_falsey(), !b.is_falsey());
        self.op_push(chunk, Value::Bool(result))
    }
}
