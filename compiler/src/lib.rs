mod precedence;

use core::{CompileError, Heap, OpCode, Token, TokenKind};
use core::utils::{parse_number_lexeme, strip_string_quotes};
use core::{Chunk, Value};
use lexer::Scanner;
use precedence::{get_rule, ParseFn, Precedence};

/// A Pratt (precedence-climbing) parser that compiles a source string
/// directly into a `Chunk`, without ever building an intermediate AST.
pub struct Compiler<'a> {
    scanner: Scanner<'a>,
    previous: Token<'a>,
    current: Token<'a>,
    had_error: bool,
    panic_mode: bool,
    chunk: Chunk,
    heap: &'a mut Heap,
}

impl<'a> Compiler<'a> {
    /// Compiles `source` into a `Chunk`, allocating any string constants
    /// into `heap`. Returns `CompileError` if any compile error was
    /// reported; the chunk is still fully built in that case, but the
    /// caller (the VM) must discard it rather than execute it.
    pub fn compile(source: &'a str, heap: &'a mut Heap) -> Result<Chunk, CompileError> {
        log::debug!("compiling {} bytes of source", source.len());

        let eof_sentinel = Token::new(TokenKind::EOF, "", 0);
        let mut compiler = Self {
            scanner: Scanner::new(source),
            previous: eof_sentinel,
            current: eof_sentinel,
            had_error: false,
            panic_mode: false,
            chunk: Chunk::new(),
            heap,
        };

        compiler.advance();
        compiler.expression();
        compiler.consume(TokenKind::EOF, "Expect end of expression.");
        compiler.emit_byte(OpCode::Return as u8);

        if compiler.had_error {
            log::debug!("compilation finished with errors");
            Err(CompileError)
        } else {
            Ok(compiler.chunk)
        }
    }

    /// Advances the token window by one, skipping (and reporting) any error
    /// tokens the scanner produces along the way.
    fn advance(&mut self) {
        self.previous = self.current;

        loop {
            self.current = self.scanner.scan_token();
            if self.current.kind != TokenKind::ERROR {
                break;
            }
            self.error_at_current(self.current.lexeme);
        }
    }

    /// Consumes the current token if it matches `kind`; otherwise reports
    /// `message` as a compile error at the current token.
    fn consume(&mut self, kind: TokenKind, message: &str) {
        if self.current.kind == kind {
            self.advance();
            return;
        }
        self.error_at_current(message);
    }

    fn emit_byte(&mut self, byte: u8) {
        let line = self.previous.line;
        self.chunk.write_byte(byte, line);
    }

    fn emit_bytes(&mut self, a: u8, b: u8) {
        self.emit_byte(a);
        self.emit_byte(b);
    }

    /// Adds `value` to the chunk's constant pool, reporting a compile error
    /// instead of emitting an out-of-range index if the pool is already
    /// full (a single byte can only address 256 constants).
    fn make_constant(&mut self, value: Value) -> u8 {
        if self.chunk.constants.len() >= core::CONSTANTS_MAX {
            self.error_at_previous("Too many constants in one chunk.");
            return 0;
        }
        self.chunk.add_constant(value) as u8
    }

    fn emit_constant(&mut self, value: Value) {
        let index = self.make_constant(value);
        self.emit_bytes(OpCode::Constant as u8, index);
    }

    fn error_at_current(&mut self, message: &str) {
        let tok = self.current;
        self.error_at(tok, message);
    }

    fn error_at_previous(&mut self, message: &str) {
        let tok = self.previous;
        self.error_at(tok, message);
    }

    /// Reports a compile error at `token`, then enters panic mode so that
    /// cascading errors from the same failure are suppressed until the
    /// compiler reaches end-of-input.
    fn error_at(&mut self, token: Token, message: &str) {
        if self.panic_mode {
            return;
        }
        self.panic_mode = true;
        self.had_error = true;

        eprint!("[line {}] Error", token.line);
        match token.kind {
            TokenKind::EOF => eprint!(" at end"),
            TokenKind::ERROR => {}
            _ => eprint!(" at '{}'", token.lexeme),
        }
        eprintln!(": {}", message);
    }

    fn expression(&mut self) {
        self.parse_precedence(Precedence::PREC_ASSIGNMENT);
    }

    /// The core Pratt-parsing loop: parse one prefix expression, then keep
    /// folding in infix operators whose precedence is at least `precedence`.
    fn parse_precedence(&mut self, precedence: Precedence) {
        self.advance();
        let prefix_rule = get_rule(self.previous.kind).prefix;
        if prefix_rule == ParseFn::NONE {
            self.error_at_previous("Expect expression.");
            return;
        }
        self.run_parse_fn(prefix_rule);

        while precedence <= get_rule(self.current.kind).precedence {
            self.advance();
            let infix_rule = get_rule(self.previous.kind).infix;
            self.run_parse_fn(infix_rule);
        }
    }

    fn run_parse_fn(&mut self, parse_fn: ParseFn) {
        match parse_fn {
            ParseFn::Grouping => self.grouping(),
            ParseFn::Unary => self.unary(),
            ParseFn::Binary => self.binary(),
            ParseFn::Number => self.number(),
            ParseFn::StringLit => self.string(),
            ParseFn::Literal => self.literal(),
            ParseFn::NONE => unreachable!("run_parse_fn called with ParseFn::NONE"),
        }
    }

    fn number(&mut self) {
        let value = match parse_number_lexeme(self.previous.lexeme) {
            Ok(n) => n,
            Err(_) => {
                self.error_at_previous("Invalid number literal.");
                0.0
            }
        };
        self.emit_constant(Value::Number(value));
    }

    fn string(&mut self) {
        let chars = strip_string_quotes(self.previous.lexeme).to_string();
        let handle = self.heap.alloc_string(chars);
        self.emit_constant(Value::Obj(handle));
    }

    fn grouping(&mut self) {
        self.parse_precedence(Precedence::PREC_ASSIGNMENT);
        self.consume(TokenKind::R_PAREN, "Expect ')' after expression.");
    }

    fn unary(&mut self) {
        let operator = self.previous.kind;
        self.parse_precedence(Precedence::PREC_UNARY);

        match operator {
            TokenKind::MINUS => self.emit_byte(OpCode::Negate as u8),
            TokenKind::BANG => self.emit_byte(OpCode::Not as u8),
            _ => unreachable!("unary() called for non-unary operator {:?}", operator),
        }
    }

    /// Parses the right-hand operand of a binary expression at one
    /// precedence level higher than the operator's own, so that same-level
    /// operators chain left-associatively, then emits the operator's
    /// opcode(s).
    fn binary(&mut self) {
        let operator = self.previous.kind;
        let rule = get_rule(operator);
        self.parse_precedence(rule.precedence.next());

        match operator {
            TokenKind::PLUS => self.emit_byte(OpCode::Add as u8),
            TokenKind::MINUS => self.emit_byte(OpCode::Subtract as u8),
            TokenKind::STAR => self.emit_byte(OpCode::Multiply as u8),
            TokenKind::SLASH => self.emit_byte(OpCode::Divide as u8),
            TokenKind::AND => self.emit_byte(OpCode::And as u8),
            TokenKind::OR => self.emit_byte(OpCode::Or as u8),
            TokenKind::EQUAL_EQUAL => self.emit_byte(OpCode::Equal as u8),
            TokenKind::BANG_EQUAL => self.emit_bytes(OpCode::Equal as u8, OpCode::Not as u8),
            TokenKind::LESS => self.emit_byte(OpCode::Less as u8),
            TokenKind::GREATER => self.emit_byte(OpCode::Greater as u8),
            TokenKind::LESS_EQUAL => self.emit_bytes(OpCode::Greater as u8, OpCode::Not as u8),
            TokenKind::GREATER_EQUAL => self.emit_bytes(OpCode::Less as u8, OpCode::Not as u8),
            _ => unreachable!("binary() called for non-binary operator {:?}", operator),
        }
    }

    fn literal(&mut self) {
        match self.previous.kind {
            TokenKind::TRUE => self.emit_byte(OpCode::True as u8),
            TokenKind::FALSE => self.emit_byte(OpCode::False as u8),
            TokenKind::NIL => self.emit_byte(OpCode::Nil as u8),
            _ => unreachable!("literal() called for non-literal token"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile_ok(source: &str) -> Chunk {
        let mut heap = Heap::new();
        match Compiler::compile(source, &mut heap) {
            Ok(chunk) => chunk,
            Err(_) => panic!("expected '{}' to compile without errors", source),
        }
    }

    fn compile_err(source: &str) {
        let mut heap = Heap::new();
        if Compiler::compile(source, &mut heap).is_ok() {
            panic!("expected '{}' to fail to compile", source);
        }
    }

    #[test]
    fn compiles_number_literal() {
        let chunk = compile_ok("1");
        assert_eq!(chunk.code.last().copied(), Some(OpCode::Return as u8));
        assert!(chunk.constants.len() == 1);
    }

    #[test]
    fn precedence_orders_factor_above_term() {
        // "1 + 2 * 3" should emit: Constant 1, Constant 2, Constant 3, Multiply, Add, Return
        let chunk = compile_ok("1 + 2 * 3");
        let ops: Vec<u8> = chunk.code.clone();
        assert_eq!(ops.last().copied(), Some(OpCode::Return as u8));
        assert_eq!(ops[ops.len() - 2], OpCode::Add as u8);
        assert_eq!(ops[ops.len() - 3], OpCode::Multiply as u8);
    }

    #[test]
    fn less_equal_desugars_to_greater_not() {
        let chunk = compile_ok("1 <= 2");
        assert!(chunk.code.contains(&(OpCode::Greater as u8)));
        assert!(chunk.code.contains(&(OpCode::Not as u8)));
    }

    #[test]
    fn grouping_requires_closing_paren() {
        compile_err("(1 + 2");
    }

    #[test]
    fn empty_source_is_a_compile_error() {
        compile_err("");
    }

    #[test]
    fn too_many_constants_is_a_compile_error() {
        let source = (0..257).map(|n| n.to_string()).collect::<Vec<_>>().join(" + ");
        compile_err(&source);
    }

    #[test]
    fn exactly_256_constants_compiles() {
        let source = (0..256).map(|n| n.to_string()).collect::<Vec<_>>().join(" + ");
        compile_ok(&source);
    }

    #[test]
    fn string_literal_allocates_heap_object() {
        let mut heap = Heap::new();
        let chunk = Compiler::compile("\"hi\"", &mut heap).expect("should compile");
        assert_eq!(heap.len(), 1);
        assert_eq!(chunk.constants.len(), 1);
    }
}
