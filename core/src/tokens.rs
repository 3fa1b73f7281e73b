/// The kinds of tokens recognized by the scanner.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
  // Single-character punctuation.
  L_PAREN,
  R_PAREN,
  L_BRACE,
  R_BRACE,
  COMMA,
  DOT,
  MINUS,
  PLUS,
  SEMICOLON,
  SLASH,
  STAR,

  // One or two character tokens.
  BANG,
  BANG_EQUAL,
  EQUAL,
  EQUAL_EQUAL,
  GREATER,
  GREATER_EQUAL,
  LESS,
  LESS_EQUAL,

  // Literals.
  IDENTIFIER,
  STRING,
  NUMBER,

  // Keywords.
  AND,
  CLASS,
  ELSE,
  FALSE,
  FOR,
  FUN,
  IF,
  NIL,
  OR,
  PRINT,
  RETURN,
  SUPER,
  THIS,
  TRUE,
  VAR,
  WHILE,

  ERROR,
  EOF,
}

/// A single lexical token produced by the scanner.
///
/// `lexeme` borrows directly from the source string for ordinary tokens, so
/// a `Token` never outlives the source it was scanned from. Error tokens are
/// the one exception: their lexeme is the diagnostic message itself (a
/// `'static` string literal), not a source slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
  pub kind: TokenKind,
  pub lexeme: &'a str,
  pub line: usize,
}

impl<'a> Token<'a> {
  pub fn new(kind: TokenKind, lexeme: &'a str, line: usize) -> Self {
    Self { kind, lexeme, line }
  }
}
