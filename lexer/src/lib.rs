use core::tokens::{Token, TokenKind};

/// Scans a source string into a lazy stream of tokens.
///
/// `Scanner` never looks further ahead than the single token requested by
/// `scan_token` — it holds no buffer of upcoming tokens. The two-token
/// lookahead the Pratt compiler needs (`previous`/`current`) is the
/// compiler's own responsibility, not the scanner's.
pub struct Scanner<'a> {
  source: &'a str,
  start: usize,
  current: usize,
  line: usize,
}

impl<'a> Scanner<'a> {
  pub fn new(source: &'a str) -> Self {
    Self { source, start: 0, current: 0, line: 1 }
  }

  /// Scans and returns the next token, advancing past any leading
  /// whitespace and comments first.
  pub fn scan_token(&mut self) -> Token<'a> {
    self.skip_whitespace();
    self.start = self.current;

    if self.is_at_end() {
      return self.make_token(TokenKind::EOF);
    }

    let c = self.advance();

    if is_alpha(c) {
      return self.identifier();
    }
    if c.is_ascii_digit() {
      return self.number();
    }

    match c {
      '(' => self.make_token(TokenKind::L_PAREN),
      ')' => self.make_token(TokenKind::R_PAREN),
      '{' => self.make_token(TokenKind::L_BRACE),
      '}' => self.make_token(TokenKind::R_BRACE),
      ';' => self.make_token(TokenKind::SEMICOLON),
      ',' => self.make_token(TokenKind::COMMA),
      '.' => self.make_token(TokenKind::DOT),
      '-' => self.make_token(TokenKind::MINUS),
      '+' => self.make_token(TokenKind::PLUS),
      '/' => self.make_token(TokenKind::SLASH),
      '*' => self.make_token(TokenKind::STAR),
      '!' => {
        let kind = if self.matches('=') { TokenKind::BANG_EQUAL } else { TokenKind::BANG };
        self.make_token(kind)
      }
      '=' => {
        let kind = if self.matches('=') { TokenKind::EQUAL_EQUAL } else { TokenKind::EQUAL };
        self.make_token(kind)
      }
      '<' => {
        let kind = if self.matches('=') { TokenKind::LESS_EQUAL } else { TokenKind::LESS };
        self.make_token(kind)
      }
      '>' => {
        let kind = if self.matches('=') { TokenKind::GREATER_EQUAL } else { TokenKind::GREATER };
        self.make_token(kind)
      }
      '"' => self.string(),
      _ => self.make_error_token("Unexpected character."),
    }
  }

  fn is_at_end(&self) -> bool {
    self.current >= self.source.len()
  }

  /// Consumes and returns the current character.
  fn advance(&mut self) -> char {
    let c = self.source[self.current..].chars().next().unwrap();
    self.current += c.len_utf8();
    c
  }

  /// Looks at the current character without consuming it. Returns `'\0'`
  /// as the end-of-source sentinel, so callers can compare against it
  /// without special-casing `Option::None`.
  fn peek(&self) -> char {
    self.source[self.current..].chars().next().unwrap_or('\0')
  }

  /// Looks one character past the current one without consuming anything.
  fn peek_next(&self) -> char {
    let mut chars = self.source[self.current..].chars();
    chars.next();
    chars.next().unwrap_or('\0')
  }

  /// Consumes the current character if it matches `expected`.
  fn matches(&mut self, expected: char) -> bool {
    if self.is_at_end() || self.peek() != expected {
      return false;
    }
    self.current += expected.len_utf8();
    true
  }

  fn skip_whitespace(&mut self) {
    loop {
      match self.peek() {
        ' ' | '\r' | '\t' => {
          self.advance();
        }
        '\n' => {
          self.line += 1;
          self.advance();
        }
        '/' => {
          if self.peek_next() == '/' {
            while self.peek() != '\n' && !self.is_at_end() {
              self.advance();
            }
          } else {
            return;
          }
        }
        _ => return,
      }
    }
  }

  fn identifier(&mut self) -> Token<'a> {
    while is_alpha(self.peek()) || self.peek().is_ascii_digit() {
      self.advance();
    }
    let text = &self.source[self.start..self.current];
    self.make_token(identifier_kind(text))
  }

  fn number(&mut self) -> Token<'a> {
    while self.peek().is_ascii_digit() {
      self.advance();
    }

    if self.peek() == '.' && self.peek_next().is_ascii_digit() {
      self.advance();
      while self.peek().is_ascii_digit() {
        self.advance();
      }
    }

    self.make_token(TokenKind::NUMBER)
  }

  /// Scans a string literal. A raw newline or end-of-source before the
  /// closing quote is an unterminated string, per this language's rules —
  /// multi-line string literals are not supported.
  fn string(&mut self) -> Token<'a> {
    loop {
      if self.is_at_end() || self.peek() == '\n' {
        return self.make_error_token("Unterminated string.");
      }
      if self.peek() == '"' {
        break;
      }
      self.advance();
    }

    self.advance(); // the closing quote
    self.make_token(TokenKind::STRING)
  }

  fn make_token(&self, kind: TokenKind) -> Token<'a> {
    Token::new(kind, &self.source[self.start..self.current], self.line)
  }

  fn make_error_token(&self, message: &'static str) -> Token<'a> {
    Token::new(TokenKind::ERROR, message, self.line)
  }
}

fn is_alpha(c: char) -> bool {
  c.is_ascii_alphabetic() || c == '_'
}

/// Classifies a fully-scanned identifier lexeme as a keyword, or as a
/// plain `IDENTIFIER` if it matches none.
fn identifier_kind(text: &str) -> TokenKind {
  match text {
    "and" => TokenKind::AND,
    "class" => TokenKind::CLASS,
    "else" => TokenKind::ELSE,
    "false" => TokenKind::FALSE,
    "for" => TokenKind::FOR,
    "fun" => TokenKind::FUN,
    "if" => TokenKind::IF,
    "nil" => TokenKind::NIL,
    "or" => TokenKind::OR,
    "print" => TokenKind::PRINT,
    "return" => TokenKind::RETURN,
    "super" => TokenKind::SUPER,
    "this" => TokenKind::THIS,
    "true" => TokenKind::TRUE,
    "var" => TokenKind::VAR,
    "while" => TokenKind::WHILE,
    _ => TokenKind::IDENTIFIER,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn kinds(source: &str) -> Vec<TokenKind> {
    let mut scanner = Scanner::new(source);
    let mut out = Vec::new();
    loop {
      let tok = scanner.scan_token();
      let done = tok.kind == TokenKind::EOF;
      out.push(tok.kind);
      if done {
        break;
      }
    }
    out
  }

  #[test]
  fn scans_arithmetic_expression() {
    assert_eq!(
      kinds("1 + 2 * 3"),
      vec![
        TokenKind::NUMBER,
        TokenKind::PLUS,
        TokenKind::NUMBER,
        TokenKind::STAR,
        TokenKind::NUMBER,
        TokenKind::EOF,
      ]
    );
  }

  #[test]
  fn two_char_operators_are_maximal_munch() {
    assert_eq!(kinds("<= >= == !="), vec![
      TokenKind::LESS_EQUAL,
      TokenKind::GREATER_EQUAL,
      TokenKind::EQUAL_EQUAL,
      TokenKind::BANG_EQUAL,
      TokenKind::EOF,
    ]);
  }

  #[test]
  fn skips_line_comments() {
    assert_eq!(kinds("1 // two\n+ 2"), vec![
      TokenKind::NUMBER,
      TokenKind::PLUS,
      TokenKind::NUMBER,
      TokenKind::EOF,
    ]);
  }

  #[test]
  fn tracks_line_numbers_across_newlines() {
    let mut scanner = Scanner::new("1\n+\n2");
    let a = scanner.scan_token();
    let b = scanner.scan_token();
    let c = scanner.scan_token();
    assert_eq!((a.line, b.line, c.line), (1, 2, 3));
  }

  #[test]
  fn unterminated_string_is_an_error_token() {
    let mut scanner = Scanner::new("\"unterminated");
    let tok = scanner.scan_token();
    assert_eq!(tok.kind, TokenKind::ERROR);
    assert_eq!(tok.lexeme, "Unterminated string.");
  }

  #[test]
  fn newline_inside_string_is_unterminated() {
    let mut scanner = Scanner::new("\"oops\nmore\"");
    let tok = scanner.scan_token();
    assert_eq!(tok.kind, TokenKind::ERROR);
  }

  #[test]
  fn string_lexeme_includes_quotes() {
    let mut scanner = Scanner::new("\"hi\"");
    let tok = scanner.scan_token();
    assert_eq!(tok.kind, TokenKind::STRING);
    assert_eq!(tok.lexeme, "\"hi\"");
  }

  #[test]
  fn keywords_classify_correctly() {
    assert_eq!(kinds("and or nil true false"), vec![
      TokenKind::AND,
      TokenKind::OR,
      TokenKind::NIL,
      TokenKind::TRUE,
      TokenKind::FALSE,
      TokenKind::EOF,
    ]);
  }

  #[test]
  fn identifier_not_confused_with_keyword_prefix() {
    assert_eq!(kinds("andy"), vec![TokenKind::IDENTIFIER, TokenKind::EOF]);
  }
}
