use core::{Chunk, Heap, OpCode, Value};

/// Prints a human-readable disassembly of `chunk` to stdout, one line per
/// instruction: byte offset, source line (or `|` when unchanged from the
/// previous instruction), mnemonic, and — for constant-bearing opcodes —
/// the resolved constant value.
///
/// Purely observational: nothing here affects `Vm::interpret`'s return
/// value or the stdout/stderr contract the VM itself is held to.
pub fn disassemble_chunk(chunk: &Chunk, heap: &Heap, name: &str) {
    println!("== {} ==", name);

    let mut offset = 0;
    while offset < chunk.len() {
        offset = disassemble_instruction(chunk, heap, offset);
    }
}

/// Disassembles the single instruction at `offset` and returns the offset
/// of the next one.
pub fn disassemble_instruction(chunk: &Chunk, heap: &Heap, offset: usize) -> usize {
    print!("{:04} ", offset);

    if offset > 0 && chunk.lines[offset] == chunk.lines[offset - 1] {
        print!("   | ");
    } else {
        print!("{:4} ", chunk.lines[offset]);
    }

    let byte = chunk.code[offset];
    match OpCode::from_byte(byte) {
        Some(OpCode::Constant) => constant_instruction("OP_CONSTANT", chunk, heap, offset),
        Some(OpCode::Nil) => simple_instruction("OP_NIL", offset),
        Some(OpCode::True) => simple_instruction("OP_TRUE", offset),
        Some(OpCode::False) => simple_instruction("OP_FALSE", offset),
        Some(OpCode::Equal) => simple_instruction("OP_EQUAL", offset),
        Some(OpCode::Greater) => simple_instruction("OP_GREATER", offset),
        Some(OpCode::Less) => simple_instruction("OP_LESS", offset),
        Some(OpCode::Add) => simple_instruction("OP_ADD", offset),
        Some(OpCode::Subtract) => simple_instruction("OP_SUBTRACT", offset),
        Some(OpCode::Multiply) => simple_instruction("OP_MULTIPLY", offset),
        Some(OpCode::Divide) => simple_instruction("OP_DIVIDE", offset),
        Some(OpCode::Not) => simple_instruction("OP_NOT", offset),
        Some(OpCode::Negate) => simple_instruction("OP_NEGATE", offset),
        Some(OpCode::And) => simple_instruction("OP_AND", offset),
        Some(OpCode::Or) => simple_instruction("OP_OR", offset),
        Some(OpCode::Return) => simple_instruction("OP_RETURN", offset),
        None => {
            println!("Unknown opcode {}", byte);
            offset + 1
        }
    }
}

fn simple_instruction(name: &str, offset: usize) -> usize {
    println!("{}", name);
    offset + 1
}

fn constant_instruction(name: &str, chunk: &Chunk, heap: &Heap, offset: usize) -> usize {
    let index = chunk.code[offset + 1] as usize;
    let value: &Value = &chunk.constants[index];
    println!("{:<16} {:4} '{}'", name, index, value.display(heap));
    offset + 2
}

/// Prints the VM's live value stack, left (bottom) to right (top). An
/// interactive/debug-only aid, not part of the VM's semantic contract.
pub fn print_value_stack(stack: &[Value], heap: &Heap) {
    print!("          ");
    for value in stack {
        print!("[ {} ]", value.display(heap));
    }
    println!();
}
