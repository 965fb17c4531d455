//! Boolean query AST and the two-operand textual front-end

use std::fmt;

use crate::error::IndexError;

const AND_SEPARATOR: &str = " AND ";
const OR_SEPARATOR: &str = " OR ";

/// Closed set of query nodes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Query {
    Term(String),
    And(Box<Query>, Box<Query>),
    Or(Box<Query>, Box<Query>),
}

impl Query {
    pub fn term(term: impl Into<String>) -> Self {
        Query::Term(term.into())
    }

    pub fn and(left: Query, right: Query) -> Self {
        Query::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: Query, right: Query) -> Self {
        Query::Or(Box::new(left), Box::new(right))
    }

    /// Parse `"a"`, `"a AND b"` or `"a OR b"`.
    ///
    /// `AND` is checked before `OR`. Exactly two operands are accepted; nested
    /// or longer expressions are rejected rather than guessed at. Operands are
    /// trimmed and lower-cased to match tokenizer output.
    pub fn parse(input: &str) -> Result<Query, IndexError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(IndexError::EmptyQuery);
        }

        if input.contains(AND_SEPARATOR) {
            let (left, right) = split_two(input, AND_SEPARATOR)?;
            return Ok(Query::and(left, right));
        }
        if input.contains(OR_SEPARATOR) {
            let (left, right) = split_two(input, OR_SEPARATOR)?;
            return Ok(Query::or(left, right));
        }

        Ok(Query::Term(normalize(input)))
    }

    /// The two plain terms of an `And(Term, Term)` query.
    pub fn as_term_pair(&self) -> Option<(&str, &str)> {
        match self {
            Query::And(left, right) => match (left.as_ref(), right.as_ref()) {
                (Query::Term(a), Query::Term(b)) => Some((a.as_str(), b.as_str())),
                _ => None,
            },
            _ => None,
        }
    }
}

fn split_two(input: &str, separator: &str) -> Result<(Query, Query), IndexError> {
    let operands: Vec<&str> = input.split(separator).map(str::trim).collect();
    match operands.as_slice() {
        [left, right] if !left.is_empty() && !right.is_empty() => Ok((
            Query::Term(normalize(left)),
            Query::Term(normalize(right)),
        )),
        _ => Err(IndexError::UnsupportedQuery(format!(
            "expected exactly two operands around '{}'",
            separator.trim()
        ))),
    }
}

fn normalize(operand: &str) -> String {
    operand.trim().to_lowercase()
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Query::Term(term) => f.write_str(term),
            Query::And(left, right) => write!(f, "({left} AND {right})"),
            Query::Or(left, right) => write!(f, "({left} OR {right})"),
        }
    }
}
