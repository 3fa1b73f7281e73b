/// Parses a scanned `NUMBER` token's lexeme into an `f64`.
///
/// The scanner only ever produces lexemes matching `digit+ ('.' digit+)?`,
/// so this should never fail in practice. The `Result` is kept (rather than
/// unwrapping) so the compiler can surface a proper compile error instead of
/// panicking if that invariant is ever broken by a future scanner change.
pub fn parse_number_lexeme(lexeme: &str) -> Result<f64, std::num::ParseFloatError> {
  lexeme.parse::<f64>()
}

/// Strips the surrounding double quotes from a scanned `STRING` token's
/// lexeme.
pub fn strip_string_quotes(lexeme: &str) -> &str {
  &lexeme[1..lexeme.len() - 1]
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_integer_and_decimal_lexemes() {
    assert_eq!(parse_number_lexeme("42").unwrap(), 42.0);
    assert_eq!(parse_number_lexeme("3.14").unwrap(), 3.14);
  }

  #[test]
  fn strips_quotes() {
    assert_eq!(strip_string_quotes("\"hi\""), "hi");
    assert_eq!(strip_string_quotes("\"\""), "");
  }
}
