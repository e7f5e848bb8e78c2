//! Recursive-descent formula evaluation.
//!
//! Raw text that does not start with `=` is returned verbatim. Otherwise the
//! rest is tokenized and a single expression is evaluated:
//!
//! ```text
//! expr     := NUMBER | RANGE | CELLREF | call
//! call     := IDENT '(' ( expr (',' expr)* )? ')'
//! RANGE    := CELLREF ':' CELLREF      (one token)
//! CELLREF  := [A-Z]+[0-9]+
//! ```
//!
//! Tokens left over after the expression are ignored. Nothing is cached:
//! every reference re-evaluates the referenced cell.

use std::collections::VecDeque;
use std::fmt;

use log::{debug, warn};

use super::coord::{Coord, is_reference_token};
use super::format::format_number;
use super::grid::Grid;
use super::tokenize::{Token, tokenize};
use crate::error::{FormulaError, Result};
use crate::procedures::Procedure;

/// Longest chain of cell references followed before giving up.
pub const MAX_REFERENCE_DEPTH: usize = 128;

/// Deepest expression nesting, counting both procedure calls and references,
/// before evaluation gives up. Keeps recursion well inside a 2 MiB thread stack.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Intermediate value of an expression.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
    /// Values of a range, row-major, holes omitted.
    List(Vec<Value>),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => f.write_str(&format_number(*n)),
            Value::Text(text) => f.write_str(text),
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
        }
    }
}

/// Evaluate raw cell text against `grid`.
pub fn evaluate(raw: &str, grid: &Grid) -> Result<String> {
    Evaluator::new(grid).evaluate_raw(raw)
}

/// Walks one formula, tracking which cells are mid-evaluation so that
/// self-referential formulas fail instead of recursing forever.
pub(crate) struct Evaluator<'g> {
    grid: &'g Grid,
    stack: Vec<Coord>,
    depth: usize,
}

impl<'g> Evaluator<'g> {
    pub(crate) fn new(grid: &'g Grid) -> Self {
        Evaluator {
            grid,
            stack: Vec::new(),
            depth: 0,
        }
    }

    /// Evaluate a stored cell. Faults stop here: they set the cell's error flag
    /// and come back as the displayed message.
    pub(crate) fn cell_value(&mut self, coord: Coord) -> String {
        let Some(raw) = self.grid.raw_value(coord) else {
            return String::new();
        };

        self.stack.push(coord);
        let result = self.evaluate_raw(&raw);
        self.stack.pop();

        match result {
            Ok(value) => {
                self.grid.set_error(coord, false);
                value
            }
            Err(e) => {
                debug!("evaluation of {} failed: {}", coord, e);
                self.grid.set_error(coord, true);
                format!("Error: {}", e)
            }
        }
    }

    fn evaluate_raw(&mut self, raw: &str) -> Result<String> {
        let Some(formula) = raw.strip_prefix('=') else {
            return Ok(raw.to_string());
        };
        let mut tokens = tokenize(formula);
        let value = self.expr(&mut tokens)?;
        Ok(value.to_string())
    }

    fn expr(&mut self, tokens: &mut VecDeque<Token>) -> Result<Value> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(FormulaError::NestingTooDeep(MAX_NESTING_DEPTH));
        }
        self.depth += 1;
        let value = self.term(tokens);
        self.depth -= 1;
        value
    }

    fn term(&mut self, tokens: &mut VecDeque<Token>) -> Result<Value> {
        let word = match tokens.pop_front() {
            Some(Token::Word(word)) => word,
            Some(other) => {
                return Err(FormulaError::syntax(format!("unexpected token '{}'", other)));
            }
            None => return Err(FormulaError::syntax("unexpected end of formula")),
        };

        if let Ok(n) = word.parse::<f64>() {
            return Ok(Value::Number(n));
        }

        if let Some((start, end)) = word.split_once(':') {
            let malformed = || FormulaError::MalformedReference(word.clone());
            let start = Coord::parse(start).map_err(|_| malformed())?;
            let end = Coord::parse(end).map_err(|_| malformed())?;
            return self.range(start, end);
        }

        if is_reference_token(&word) {
            let coord = Coord::parse(&word)?;
            return self.reference(coord);
        }

        self.call(&word, tokens)
    }

    fn reference(&mut self, coord: Coord) -> Result<Value> {
        if self.stack.contains(&coord) {
            warn!("cyclic reference to {} via {:?}", coord, self.stack);
            return Err(FormulaError::CyclicReference(coord.key()));
        }
        if self.stack.len() >= MAX_REFERENCE_DEPTH {
            return Err(FormulaError::ReferenceDepthExceeded(MAX_REFERENCE_DEPTH));
        }
        Ok(Value::Text(self.cell_value(coord)))
    }

    fn range(&mut self, start: Coord, end: Coord) -> Result<Value> {
        let values = self
            .grid
            .present_in_range(start, end)
            .into_iter()
            .map(|coord| self.reference(coord))
            .collect::<Result<Vec<_>>>()?;
        Ok(Value::List(values))
    }

    fn call(&mut self, name: &str, tokens: &mut VecDeque<Token>) -> Result<Value> {
        if tokens.pop_front() != Some(Token::Open) {
            return Err(FormulaError::syntax(format!("expected '(' after '{}'", name)));
        }

        let mut args = Vec::new();
        if tokens.front() == Some(&Token::Close) {
            tokens.pop_front();
        } else {
            loop {
                args.push(self.expr(tokens)?);
                match tokens.pop_front() {
                    Some(Token::Comma) => {}
                    Some(Token::Close) => break,
                    Some(other) => {
                        return Err(FormulaError::syntax(format!(
                            "expected ',' or ')' but found '{}'",
                            other
                        )));
                    }
                    None => {
                        return Err(FormulaError::syntax("expected ')' at the end of arguments"));
                    }
                }
            }
        }

        let procedure: Procedure = name.parse()?;
        procedure.call(&args)
    }
}
