//! Built-in spreadsheet procedures.
//!
//! Conventions:
//! - Formula-facing names are lowercase (`sum`, `mean`, ...) and matched exactly.
//! - Every procedure takes the flattened numeric arguments and yields one number,
//!   rendered with two fixed decimals. Formulas that read the result back
//!   re-parse that string, so precision is two decimals per nesting level.
//! - Adding a procedure means adding a variant, its entry in [`Procedure::ALL`],
//!   and its arms in `name`/`apply`.

use crate::engine::{Value, format_fixed};
use crate::error::{FormulaError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Procedure {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Sum,
    Prod,
    Mean,
    Median,
    Var,
    Std,
    Min,
    Max,
}

impl Procedure {
    pub const ALL: &'static [Procedure] = &[
        Procedure::Add,
        Procedure::Sub,
        Procedure::Mul,
        Procedure::Div,
        Procedure::Mod,
        Procedure::Pow,
        Procedure::Sum,
        Procedure::Prod,
        Procedure::Mean,
        Procedure::Median,
        Procedure::Var,
        Procedure::Std,
        Procedure::Min,
        Procedure::Max,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Procedure::Add => "add",
            Procedure::Sub => "sub",
            Procedure::Mul => "mul",
            Procedure::Div => "div",
            Procedure::Mod => "mod",
            Procedure::Pow => "pow",
            Procedure::Sum => "sum",
            Procedure::Prod => "prod",
            Procedure::Mean => "mean",
            Procedure::Median => "median",
            Procedure::Var => "var",
            Procedure::Std => "std",
            Procedure::Min => "min",
            Procedure::Max => "max",
        }
    }

    pub fn from_name(name: &str) -> Option<Procedure> {
        Procedure::ALL.iter().copied().find(|p| p.name() == name)
    }

    /// Apply to already-flattened numeric arguments.
    pub fn apply(self, args: &[f64]) -> Result<f64> {
        let n = match self {
            Procedure::Add => binary(args, |a, b| a + b),
            Procedure::Sub => binary(args, |a, b| a - b),
            Procedure::Mul => binary(args, |a, b| a * b),
            Procedure::Div => binary(args, |a, b| a / b),
            Procedure::Mod => binary(args, |a, b| a % b),
            Procedure::Pow => binary(args, f64::powf),
            Procedure::Sum => sum(args),
            Procedure::Prod => args.iter().product(),
            Procedure::Mean => mean(args),
            Procedure::Median => median(args),
            Procedure::Var => variance(args),
            Procedure::Std => variance(args).sqrt(),
            Procedure::Min => extreme(args, |candidate, best| candidate < best),
            Procedure::Max => extreme(args, |candidate, best| candidate > best),
        };
        Ok(n)
    }

    /// Flatten raw arguments, apply, and render the two-decimal result.
    pub fn call(self, args: &[Value]) -> Result<Value> {
        let numbers = flatten_numbers(args)?;
        let n = self.apply(&numbers)?;
        Ok(Value::Text(format_fixed(n)))
    }
}

impl std::str::FromStr for Procedure {
    type Err = FormulaError;

    fn from_str(s: &str) -> Result<Self> {
        Procedure::from_name(s).ok_or_else(|| FormulaError::UnknownProcedure(s.to_string()))
    }
}

/// Depth-first flatten of nested lists, coercing each scalar to a float.
/// Empty text counts as `0`.
pub fn flatten_numbers(args: &[Value]) -> Result<Vec<f64>> {
    let mut out = Vec::new();
    for arg in args {
        push_numbers(arg, &mut out)?;
    }
    Ok(out)
}

fn push_numbers(value: &Value, out: &mut Vec<f64>) -> Result<()> {
    match value {
        Value::Number(n) => out.push(*n),
        Value::Text(text) => out.push(coerce_number(text)?),
        Value::List(items) => {
            for item in items {
                push_numbers(item, out)?;
            }
        }
    }
    Ok(())
}

fn coerce_number(text: &str) -> Result<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    trimmed
        .parse::<f64>()
        .map_err(|_| FormulaError::InvalidNumericArgument(text.to_string()))
}

/// Reads only the first two values; a missing operand is NaN.
fn binary(args: &[f64], op: impl Fn(f64, f64) -> f64) -> f64 {
    let operand = |i: usize| args.get(i).copied().unwrap_or(f64::NAN);
    op(operand(0), operand(1))
}

fn sum(args: &[f64]) -> f64 {
    args.iter().fold(0.0, |acc, n| acc + n)
}

fn mean(args: &[f64]) -> f64 {
    sum(args) / args.len() as f64
}

fn median(args: &[f64]) -> f64 {
    if args.is_empty() {
        return f64::NAN;
    }
    let mut sorted = args.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Population variance.
fn variance(args: &[f64]) -> f64 {
    let mu = mean(args);
    let squared: Vec<f64> = args.iter().map(|n| (n - mu).powi(2)).collect();
    sum(&squared) / args.len() as f64
}

fn extreme(args: &[f64], better: impl Fn(f64, f64) -> bool) -> f64 {
    let Some((&first, rest)) = args.split_first() else {
        return f64::NAN;
    };
    rest.iter()
        .fold(first, |best, &n| if better(n, best) { n } else { best })
}
