//! Inline calculator for arithmetic queries.
//!
//! Queries such as `12+3` or `(4.5 - 1) * 2` produce a pseudo-result shown at
//! the top of the list. Evaluation is a small recursive-descent parser over
//! numeric literals and `+ - * / ( )`; nothing else in the input is ever
//! interpreted. Nesting of parentheses and unary signs is bounded, so
//! pathological input is rejected instead of exhausting the stack.
//!
//! # Grammar
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := factor (('*' | '/') factor)*
//! factor := ('+' | '-') factor | number | '(' expr ')'
//! number := digits ['.' digits] | '.' digits
//! ```

use super::result::SearchResult;

/// Deepest nesting of parentheses and unary signs the parser will follow.
const MAX_DEPTH: usize = 256;

/// Evaluates `query` and wraps the answer as a calculator pseudo-result.
///
/// Returns `None` when the query is not arithmetic, fails to parse, or the
/// value is not finite. Never panics and never reports an error.
///
/// # Examples
///
/// ```
/// use flashfind::domain::calculator::evaluate_query;
///
/// let result = evaluate_query("12+3").unwrap();
/// assert_eq!(result.name, "= 15");
/// assert_eq!(result.path, "15");
///
/// assert!(evaluate_query("hello").is_none());
/// assert!(evaluate_query("1/0").is_none());
/// ```
#[must_use]
pub fn evaluate_query(query: &str) -> Option<SearchResult> {
    let expression = query.trim();
    if !is_arithmetic(expression) {
        return None;
    }

    match evaluate(expression) {
        Ok(value) => {
            let formatted = format_value(value);
            tracing::trace!(expression, value = %formatted, "calculator matched");
            Some(SearchResult::calculation(&formatted))
        }
        Err(e) => {
            tracing::trace!(expression, error = %e, "calculator rejected expression");
            None
        }
    }
}

/// Pre-filter deciding whether a query is worth evaluating at all.
///
/// The text may only contain digits, whitespace, `.`, `+`, `-`, `*`, `/`, `(`
/// and `)`, and must contain at least one digit and one operator.
#[must_use]
pub fn is_arithmetic(text: &str) -> bool {
    let allowed = text
        .chars()
        .all(|c| c.is_ascii_digit() || c.is_whitespace() || "+-*/().".contains(c));

    allowed
        && text.chars().any(|c| c.is_ascii_digit())
        && text.chars().any(|c| "+-*/".contains(c))
}

/// Formats a finite value the way it is displayed and copied.
///
/// Integral values print without a fractional part and negative zero prints
/// as `0`.
#[must_use]
pub fn format_value(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{value}")
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum CalcError {
    InvalidNumber(String),
    UnexpectedChar(char),
    UnsupportedOperator(&'static str),
    UnexpectedToken(usize),
    UnexpectedEnd,
    NotFinite,
    TooDeep,
}

impl std::fmt::Display for CalcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidNumber(literal) => write!(f, "invalid number literal '{literal}'"),
            Self::UnexpectedChar(c) => write!(f, "unexpected character '{c}'"),
            Self::UnsupportedOperator(op) => write!(f, "unsupported operator '{op}'"),
            Self::UnexpectedToken(pos) => write!(f, "unexpected token at position {pos}"),
            Self::UnexpectedEnd => write!(f, "unexpected end of expression"),
            Self::NotFinite => write!(f, "result is not finite"),
            Self::TooDeep => write!(f, "expression nested deeper than {MAX_DEPTH} levels"),
        }
    }
}

fn evaluate(expression: &str) -> Result<f64, CalcError> {
    let tokens = tokenize(expression)?;
    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        depth: 0,
    };
    let value = parser.expr()?;
    if parser.pos != tokens.len() {
        return Err(CalcError::UnexpectedToken(parser.pos));
    }
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::NotFinite)
    }
}

fn tokenize(expression: &str) -> Result<Vec<Token>, CalcError> {
    let chars: Vec<char> = expression.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            c if c.is_whitespace() => {
                i += 1;
            }
            '0'..='9' | '.' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let literal: String = chars[start..i].iter().collect();
                let value = literal
                    .parse::<f64>()
                    .map_err(|_| CalcError::InvalidNumber(literal.clone()))?;
                tokens.push(Token::Number(value));
            }
            '+' | '-' | '*' => {
                // No increment, decrement or exponent operators.
                if chars.get(i + 1) == Some(&c) {
                    return Err(CalcError::UnsupportedOperator(match c {
                        '+' => "++",
                        '-' => "--",
                        _ => "**",
                    }));
                }
                tokens.push(match c {
                    '+' => Token::Plus,
                    '-' => Token::Minus,
                    _ => Token::Star,
                });
                i += 1;
            }
            '/' => {
                tokens.push(Token::Slash);
                i += 1;
            }
            '(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            other => return Err(CalcError::UnexpectedChar(other)),
        }
    }

    Ok(tokens)
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expr(&mut self) -> Result<f64, CalcError> {
        let mut value = self.term()?;
        while let Some(op @ (Token::Plus | Token::Minus)) = self.peek() {
            self.pos += 1;
            let rhs = self.term()?;
            if op == Token::Plus {
                value += rhs;
            } else {
                value -= rhs;
            }
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<f64, CalcError> {
        let mut value = self.factor()?;
        while let Some(op @ (Token::Star | Token::Slash)) = self.peek() {
            self.pos += 1;
            let rhs = self.factor()?;
            if op == Token::Star {
                value *= rhs;
            } else {
                value /= rhs;
            }
        }
        Ok(value)
    }

    fn factor(&mut self) -> Result<f64, CalcError> {
        if self.depth >= MAX_DEPTH {
            return Err(CalcError::TooDeep);
        }
        self.depth += 1;
        let value = self.primary();
        self.depth -= 1;
        value
    }

    fn primary(&mut self) -> Result<f64, CalcError> {
        match self.next() {
            Some(Token::Number(n)) => Ok(n),
            Some(Token::Minus) => Ok(-self.factor()?),
            Some(Token::Plus) => self.factor(),
            Some(Token::LParen) => {
                let value = self.expr()?;
                match self.next() {
                    Some(Token::RParen) => Ok(value),
                    Some(_) => Err(CalcError::UnexpectedToken(self.pos - 1)),
                    None => Err(CalcError::UnexpectedEnd),
                }
            }
            Some(_) => Err(CalcError::UnexpectedToken(self.pos - 1)),
            None => Err(CalcError::UnexpectedEnd),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value_of(query: &str) -> Option<String> {
        evaluate_query(query).map(|r| r.path)
    }

    #[test]
    fn evaluates_simple_sum() {
        let result = evaluate_query("12+3").unwrap();
        assert_eq!(result.name, "= 15");
        assert_eq!(result.path, "15");
        assert_eq!(result.extension, "calc");
    }

    #[test]
    fn honors_precedence_and_parentheses() {
        assert_eq!(value_of("2+3*4").as_deref(), Some("14"));
        assert_eq!(value_of("(2+3)*4").as_deref(), Some("20"));
        assert_eq!(value_of("10 - 4 - 3").as_deref(), Some("3"));
        assert_eq!(value_of("7/2").as_deref(), Some("3.5"));
        assert_eq!(value_of(" 5 * 6 ").as_deref(), Some("30"));
    }

    #[test]
    fn supports_unary_signs_and_decimals() {
        assert_eq!(value_of("-3+5").as_deref(), Some("2"));
        assert_eq!(value_of("2*-3").as_deref(), Some("-6"));
        assert_eq!(value_of(".5+.25").as_deref(), Some("0.75"));
        assert_eq!(value_of("0.1+0.2").as_deref(), Some("0.30000000000000004"));
        assert_eq!(value_of("-0*1").as_deref(), Some("0"));
    }

    #[test]
    fn rejects_non_arithmetic_text() {
        assert!(evaluate_query("hello").is_none());
        assert!(evaluate_query("report 2+2").is_none());
        assert!(evaluate_query("42").is_none());
        assert!(evaluate_query("").is_none());
        assert!(evaluate_query("+-").is_none());
    }

    #[test]
    fn rejects_non_finite_results() {
        assert!(evaluate_query("1/0").is_none());
        assert!(evaluate_query("0/0").is_none());
        assert!(evaluate_query("-1/0").is_none());
    }

    #[test]
    fn malformed_expressions_fail_cleanly() {
        for query in ["2**2", "1++2", "3--1", "1.2.3+1", "(1+2", "1+2)", "1 2+3", "()+1", "*5+1", "5+"] {
            assert!(evaluate_query(query).is_none(), "expected no result for {query:?}");
        }
    }

    #[test]
    fn deep_nesting_is_rejected_without_overflow() {
        assert!(evaluate_query(&format!("{}1+1", "(".repeat(100_000))).is_none());
        assert!(evaluate_query(&format!("{}1", "- ".repeat(50_000))).is_none());

        let nested = format!("{}1+1{}", "(".repeat(100), ")".repeat(100));
        assert_eq!(value_of(&nested).as_deref(), Some("2"));
    }

    #[test]
    fn prefilter_requires_digit_and_operator() {
        assert!(is_arithmetic("1+1"));
        assert!(is_arithmetic("(3)/ 4"));
        assert!(!is_arithmetic("1 1"));
        assert!(!is_arithmetic("+ -"));
        assert!(!is_arithmetic("1+x"));
    }
}
