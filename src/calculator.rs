//! Spoken arithmetic
//!
//! Turns "calculate 2 plus 2" into `2 + 2` and evaluates it with a small
//! recursive-descent parser. The grammar only knows numeric literals and the
//! four binary operators (plus unary minus on a literal); every other token
//! is rejected before anything is evaluated.
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := factor (('*' | '/') factor)*
//! factor := '-' factor | number
//! ```

use std::iter::Peekable;
use std::str::Chars;

use thiserror::Error;

/// Words spoken in place of operator symbols
const OPERATOR_WORDS: &[(&str, &str)] = &[
    ("plus", "+"),
    ("minus", "-"),
    ("times", "*"),
    ("x", "*"),
    ("over", "/"),
];

/// Two-word operators, replaced before word mapping
const OPERATOR_PHRASES: &[(&str, &str)] = &[("multiplied by", "*"), ("divided by", "/")];

/// Lead-in words dropped from the request
const FILLER_WORDS: &[&str] = &[
    "calculate", "compute", "what", "what's", "whats", "is", "how", "much", "equals",
];

/// Why an expression was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// Nothing left to evaluate
    #[error("empty expression")]
    Empty,

    /// A character outside the arithmetic alphabet
    #[error("unexpected token '{0}'")]
    UnexpectedToken(String),

    /// Operator without a right-hand operand
    #[error("unexpected end of expression")]
    UnexpectedEnd,

    /// A literal that is not a number
    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    /// Division by zero
    #[error("division by zero")]
    DivisionByZero,

    /// The result is not a finite number
    #[error("result out of range")]
    Overflow,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
}

/// Whether a lower-cased transcript asks for arithmetic
///
/// An operator has to sit between numeric operands. Either a standalone
/// operator (`plus`, `times`, `-`) stands next to a number, or the whole
/// request reduces to an expression. Dashes and slashes inside words such
/// as `covid-19` or `2024-03-09` in a longer sentence do not count.
#[must_use]
pub fn mentions_arithmetic(transcript: &str) -> bool {
    if !transcript.chars().any(|c| c.is_ascii_digit()) {
        return false;
    }

    let expression = to_expression(transcript);
    let words: Vec<&str> = expression.split_whitespace().collect();
    let beside_number = |i: usize| {
        let before = i.checked_sub(1).and_then(|j| words.get(j));
        before.is_some_and(|w| is_literal(w)) || words.get(i + 1).is_some_and(|w| is_literal(w))
    };
    let spoken = words
        .iter()
        .enumerate()
        .any(|(i, w)| is_operator(w) && beside_number(i));

    spoken || tokenize(&expression).is_ok_and(|tokens| has_binary_operator(&tokens))
}

fn is_operator(word: &str) -> bool {
    matches!(word, "+" | "-" | "*" | "/")
}

fn is_literal(word: &str) -> bool {
    word.replace(',', "").parse::<f64>().is_ok_and(f64::is_finite)
}

fn has_binary_operator(tokens: &[Token]) -> bool {
    tokens.windows(2).any(|pair| {
        matches!(
            pair,
            [
                Token::Number(_),
                Token::Plus | Token::Minus | Token::Star | Token::Slash
            ]
        )
    })
}

/// Rewrite a spoken request into an operator expression
///
/// `"calculate 2 plus 2"` becomes `"2 + 2"`. Unknown words are kept so that
/// evaluation rejects them.
#[must_use]
pub fn to_expression(transcript: &str) -> String {
    let mut text = transcript.to_lowercase().replace('×', " * ").replace('÷', " / ");
    for (phrase, symbol) in OPERATOR_PHRASES {
        text = text.replace(phrase, &format!(" {symbol} "));
    }

    text.split_whitespace()
        .map(trim_word)
        .filter(|w| !w.is_empty() && !FILLER_WORDS.contains(w))
        .map(|w| {
            OPERATOR_WORDS
                .iter()
                .find(|(word, _)| *word == w)
                .map_or(w, |&(_, symbol)| symbol)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Evaluate an operator expression
///
/// # Errors
///
/// Returns an error for any token outside numbers and `+ - * /`, for
/// malformed expressions and for division by zero
pub fn evaluate(expression: &str) -> Result<f64, EvalError> {
    let tokens = tokenize(expression)?;
    if tokens.is_empty() {
        return Err(EvalError::Empty);
    }

    let mut parser = Parser { tokens: &tokens, pos: 0 };
    let value = parser.expr()?;

    if let Some(token) = parser.peek() {
        return Err(EvalError::UnexpectedToken(token.to_string()));
    }
    if !value.is_finite() {
        return Err(EvalError::Overflow);
    }

    Ok(value)
}

/// Format a result the way it should be spoken
///
/// Whole numbers lose their fraction, others keep up to four decimals.
/// Magnitudes past 1e15 are spoken in exponent form.
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.abs() >= 1e15 {
        return format!("{value:e}");
    }

    let rounded = (value * 10_000.0).round() / 10_000.0;
    if rounded == 0.0 {
        return "0".to_string();
    }
    if rounded.fract() == 0.0 {
        return format!("{rounded:.0}");
    }

    let text = format!("{rounded:.4}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Strip punctuation STT tends to attach to words
fn trim_word(word: &str) -> &str {
    word.trim_end_matches(['?', '!', ',', ';'])
        .trim_end_matches('.')
}

fn tokenize(expression: &str) -> Result<Vec<Token>, EvalError> {
    let mut tokens = Vec::new();
    let mut chars = expression.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '+' => {
                chars.next();
                tokens.push(Token::Plus);
            }
            '-' => {
                chars.next();
                tokens.push(Token::Minus);
            }
            '*' => {
                chars.next();
                tokens.push(Token::Star);
            }
            '/' => {
                chars.next();
                tokens.push(Token::Slash);
            }
            c if c.is_ascii_digit() || c == '.' => {
                tokens.push(Token::Number(read_number(&mut chars)?));
            }
            other => {
                let word: String = std::iter::once(other)
                    .chain(chars.by_ref().skip(1).take_while(|c| !c.is_whitespace()))
                    .collect();
                return Err(EvalError::UnexpectedToken(word));
            }
        }
    }

    Ok(tokens)
}

/// Read a literal such as `12`, `3.5` or `1,000`
fn read_number(chars: &mut Peekable<Chars<'_>>) -> Result<f64, EvalError> {
    let mut literal = String::new();
    while let Some(&c) = chars.peek() {
        if c.is_ascii_digit() || c == '.' {
            literal.push(c);
        } else if c != ',' {
            break;
        }
        chars.next();
    }

    literal
        .parse()
        .map_err(|_| EvalError::InvalidNumber(literal))
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.peek();
        self.pos += 1;
        token
    }

    fn expr(&mut self) -> Result<f64, EvalError> {
        let mut value = self.term()?;
        while let Some(op @ (Token::Plus | Token::Minus)) = self.peek() {
            self.pos += 1;
            let rhs = self.term()?;
            value = if op == Token::Plus { value + rhs } else { value - rhs };
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<f64, EvalError> {
        let mut value = self.factor()?;
        while let Some(op @ (Token::Star | Token::Slash)) = self.peek() {
            self.pos += 1;
            let rhs = self.factor()?;
            value = if op == Token::Star {
                value * rhs
            } else {
                if rhs == 0.0 {
                    return Err(EvalError::DivisionByZero);
                }
                value / rhs
            };
        }
        Ok(value)
    }

    fn factor(&mut self) -> Result<f64, EvalError> {
        match self.advance() {
            Some(Token::Number(n)) => Ok(n),
            Some(Token::Minus) => Ok(-self.factor()?),
            Some(other) => Err(EvalError::UnexpectedToken(other.to_string())),
            None => Err(EvalError::UnexpectedEnd),
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Plus => f.write_str("+"),
            Self::Minus => f.write_str("-"),
            Self::Star => f.write_str("*"),
            Self::Slash => f.write_str("/"),
        }
    }
}
