use core::tokens::TokenKind;

/// Precedence of an expression, lowest to highest. `parse_precedence` climbs
/// this ladder: it keeps consuming infix operators whose precedence is at
/// least as high as the level it was called with.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub enum Precedence {
    PREC_NONE,
    PREC_ASSIGNMENT, // unused by this grammar, kept for ladder continuity
    PREC_OR,         // or
    PREC_AND,        // and
    PREC_EQUALITY,   // == !=
    PREC_COMPARISON, // < > <= >=
    PREC_TERM,       // + -
    PREC_FACTOR,     // * /
    PREC_UNARY,      // ! -
    PREC_CALL,       // . () — unused by this grammar, kept for ladder continuity
    PREC_PRIMARY,
}

impl Precedence {
    /// Returns the next-higher precedence level, for parsing the
    /// right-hand side of a left-associative binary operator.
    pub fn next(self) -> Precedence {
        match self {
            Precedence::PREC_NONE => Precedence::PREC_ASSIGNMENT,
            Precedence::PREC_ASSIGNMENT => Precedence::PREC_OR,
            Precedence::PREC_OR => Precedence::PREC_AND,
            Precedence::PREC_AND => Precedence::PREC_EQUALITY,
            Precedence::PREC_EQUALITY => Precedence::PREC_COMPARISON,
            Precedence::PREC_COMPARISON => Precedence::PREC_TERM,
            Precedence::PREC_TERM => Precedence::PREC_FACTOR,
            Precedence::PREC_FACTOR => Precedence::PREC_UNARY,
            Precedence::PREC_UNARY => Precedence::PREC_CALL,
            Precedence::PREC_CALL => Precedence::PREC_PRIMARY,
            Precedence::PREC_PRIMARY => Precedence::PREC_PRIMARY,
        }
    }
}

/// The parsing function associated with a token in prefix or infix
/// position. Dispatched with a `match` in `Compiler` rather than a table of
/// function pointers, since `match` is the idiomatic Rust stand-in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParseFn {
    Grouping,
    Unary,
    Binary,
    Number,
    StringLit,
    Literal,
    NONE,
}

/// The parsing rule for a single token kind: what to do when it's seen in
/// prefix position, what to do when it's seen in infix position, and the
/// precedence of the infix use (if any).
#[derive(Debug, Clone, Copy)]
pub struct ParserRule {
    pub prefix: ParseFn,
    pub infix: ParseFn,
    pub precedence: Precedence,
}

const NO_RULE: ParserRule =
    ParserRule { prefix: ParseFn::NONE, infix: ParseFn::NONE, precedence: Precedence::PREC_NONE };

/// Looks up the parsing rule for a token kind.
pub fn get_rule(kind: TokenKind) -> ParserRule {
    match kind {
        TokenKind::L_PAREN => ParserRule { prefix: ParseFn::Grouping, ..NO_RULE },

        TokenKind::MINUS => ParserRule {
            prefix: ParseFn::Unary,
            infix: ParseFn::Binary,
            precedence: Precedence::PREC_TERM,
        },
        TokenKind::PLUS => {
            ParserRule { infix: ParseFn::Binary, precedence: Precedence::PREC_TERM, ..NO_RULE }
        }
        TokenKind::SLASH | TokenKind::STAR => {
            ParserRule { infix: ParseFn::Binary, precedence: Precedence::PREC_FACTOR, ..NO_RULE }
        }

        TokenKind::BANG => ParserRule { prefix: ParseFn::Unary, ..NO_RULE },
        TokenKind::BANG_EQUAL | TokenKind::EQUAL_EQUAL => {
            ParserRule { infix: ParseFn::Binary, precedence: Precedence::PREC_EQUALITY, ..NO_RULE }
        }
        TokenKind::GREATER | TokenKind::GREATER_EQUAL | TokenKind::LESS | TokenKind::LESS_EQUAL => {
            ParserRule {
                infix: ParseFn::Binary,
                precedence: Precedence::PREC_COMPARISON,
                ..NO_RULE
            }
        }

        TokenKind::NUMBER => ParserRule { prefix: ParseFn::Number, ..NO_RULE },
        TokenKind::STRING => ParserRule { prefix: ParseFn::StringLit, ..NO_RULE },

        TokenKind::AND => {
            ParserRule { infix: ParseFn::Binary, precedence: Precedence::PREC_AND, ..NO_RULE }
        }
        TokenKind::OR => {
            ParserRule { infix: ParseFn::Binary, precedence: Precedence::PREC_OR, ..NO_RULE }
        }

        TokenKind::TRUE | TokenKind::FALSE | TokenKind::NIL => {
            ParserRule { prefix: ParseFn::Literal, ..NO_RULE }
        }

        // Every other token kind has no associated expression rule.
        _ => NO_RULE,
    }
}
