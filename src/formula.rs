//! Cell text evaluation.
//!
//! The render pipeline hands every cell's raw text to a [`TextEvaluator`]
//! together with the [`FormulaTable`] and a same-sheet lookup. The default
//! [`FormulaEvaluator`] handles:
//! - `=A1` (the referenced cell's raw text)
//! - `=NAME(arg, ...)` with arguments that are references, ranges (`A1:B3`)
//!   or literals
//!
//! Referenced cells are read raw, never re-evaluated, so reference cycles
//! cannot recurse. A formula whose ranges address more than
//! [`MAX_RANGE_CELLS`] cells displays [`RANGE_ERROR`] without reading any of
//! them.

use std::collections::HashMap;

use crate::cell_ref::{parse_cell_range, parse_cell_ref};

/// Upper bound on the cells one formula may address through ranges
pub const MAX_RANGE_CELLS: u64 = 100_000;

/// Display text for a formula whose ranges exceed [`MAX_RANGE_CELLS`]
pub const RANGE_ERROR: &str = "#REF!";

/// A formula implementation: argument values in, display string out
pub type FormulaFn = fn(&[String]) -> String;

/// Same-sheet cell lookup `(row, col) -> raw text`
pub type CellLookup<'a> = dyn Fn(u32, u32) -> String + 'a;

/// Turns a cell's raw text into the string to display
pub trait TextEvaluator {
    fn evaluate(&self, text: &str, formulas: &FormulaTable, lookup: &CellLookup<'_>) -> String;
}

/// Named formula definitions, keyed by upper-case name
#[derive(Clone)]
pub struct FormulaTable {
    entries: HashMap<String, FormulaFn>,
}

impl Default for FormulaTable {
    fn default() -> Self {
        let mut table = Self::empty();
        table.register("SUM", sum);
        table.register("AVERAGE", average);
        table.register("MAX", max);
        table.register("MIN", min);
        table.register("CONCAT", concat);
        table
    }
}

impl std::fmt::Debug for FormulaTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("FormulaTable").field("names", &names).finish()
    }
}

impl FormulaTable {
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register (or replace) a formula under `name` (case-insensitive)
    pub fn register(&mut self, name: &str, f: FormulaFn) {
        self.entries.insert(name.to_ascii_uppercase(), f);
    }

    pub fn get(&self, name: &str) -> Option<FormulaFn> {
        self.entries.get(&name.to_ascii_uppercase()).copied()
    }
}

/// Default evaluator for `=`-prefixed cell text
#[derive(Debug, Clone, Copy, Default)]
pub struct FormulaEvaluator;

impl TextEvaluator for FormulaEvaluator {
    fn evaluate(&self, text: &str, formulas: &FormulaTable, lookup: &CellLookup<'_>) -> String {
        let Some(expr) = text.strip_prefix('=').map(str::trim) else {
            return text.to_string();
        };

        if let Some((row, col)) = parse_cell_ref(expr) {
            return lookup(row, col);
        }

        let Some((name, args)) = split_call(expr) else {
            return text.to_string();
        };
        let Some(f) = formulas.get(name) else {
            return text.to_string();
        };

        let args: Vec<&str> = args
            .split(',')
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .collect();
        let addressed: u64 = args.iter().map(|a| range_cell_count(a)).sum();
        if addressed > MAX_RANGE_CELLS {
            return RANGE_ERROR.to_string();
        }

        let mut values = Vec::new();
        for arg in args {
            expand_arg(arg, lookup, &mut values);
        }
        f(&values)
    }
}

/// Split `NAME(args)` into `("NAME", "args")`
fn split_call(expr: &str) -> Option<(&str, &str)> {
    let inner = expr.strip_suffix(')')?;
    let (name, args) = inner.split_once('(')?;
    let name = name.trim();
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return None;
    }
    Some((name, args))
}

/// Number of cells a range argument addresses; zero for anything else
fn range_cell_count(arg: &str) -> u64 {
    if !arg.contains(':') {
        return 0;
    }
    parse_cell_range(arg).map_or(0, |(r1, c1, r2, c2)| {
        (u64::from(r2 - r1) + 1) * (u64::from(c2 - c1) + 1)
    })
}

fn expand_arg(arg: &str, lookup: &CellLookup<'_>, out: &mut Vec<String>) {
    if arg.contains(':') {
        if let Some((r1, c1, r2, c2)) = parse_cell_range(arg) {
            for row in r1..=r2 {
                for col in c1..=c2 {
                    out.push(lookup(row, col));
                }
            }
            return;
        }
    } else if let Some((row, col)) = parse_cell_ref(arg) {
        out.push(lookup(row, col));
        return;
    }
    let literal = arg
        .strip_prefix('"')
        .and_then(|a| a.strip_suffix('"'))
        .unwrap_or(arg);
    out.push(literal.to_string());
}

fn numbers(values: &[String]) -> impl Iterator<Item = f64> + '_ {
    values.iter().filter_map(|v| v.trim().parse::<f64>().ok())
}

fn format_number(n: f64) -> String {
    format!("{}", n)
}

fn sum(values: &[String]) -> String {
    format_number(numbers(values).fold(0.0, |total, n| total + n))
}

fn average(values: &[String]) -> String {
    let (total, count) = numbers(values).fold((0.0, 0u32), |(t, c), n| (t + n, c + 1));
    if count == 0 {
        return "#DIV/0!".to_string();
    }
    format_number(total / f64::from(count))
}

fn max(values: &[String]) -> String {
    format_number(numbers(values).reduce(f64::max).unwrap_or(0.0))
}

fn min(values: &[String]) -> String {
    format_number(numbers(values).reduce(f64::min).unwrap_or(0.0))
}

fn concat(values: &[String]) -> String {
    values.concat()
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn lookup(row: u32, col: u32) -> String {
        match (row, col) {
            (0, 0) => "1".into(),
            (1, 0) => "2".into(),
            (2, 0) => "4.5".into(),
            (0, 1) => "hello".into(),
            _ => String::new(),
        }
    }

    fn eval(text: &str) -> String {
        FormulaEvaluator.evaluate(text, &FormulaTable::default(), &lookup)
    }

    #[test]
    fn test_plain_text_passes_through() {
        assert_eq!(eval("plain"), "plain");
        assert_eq!(eval(""), "");
    }

    #[test]
    fn test_reference_reads_target_cell() {
        assert_eq!(eval("=B1"), "hello");
        assert_eq!(eval("=A2"), "2");
    }

    #[test]
    fn test_sum_over_range() {
        assert_eq!(eval("=SUM(A1:A3)"), "7.5");
        assert_eq!(eval("=sum(A1, A2, 10)"), "13");
    }

    #[test]
    fn test_average_max_min() {
        assert_eq!(eval("=AVERAGE(A1:A2)"), "1.5");
        assert_eq!(eval("=MAX(A1:A3)"), "4.5");
        assert_eq!(eval("=MIN(A1:A3)"), "1");
        assert_eq!(eval("=AVERAGE(B1)"), "#DIV/0!");
    }

    #[test]
    fn test_sum_of_nothing_is_zero() {
        assert_eq!(eval("=SUM(B5:B6)"), "0");
        assert_eq!(eval("=SUM(B1)"), "0");
    }

    #[test]
    fn test_oversized_range_is_not_expanded() {
        let calls = Cell::new(0u32);
        let counting = |row: u32, col: u32| {
            calls.set(calls.get() + 1);
            lookup(row, col)
        };
        let table = FormulaTable::default();
        assert_eq!(
            FormulaEvaluator.evaluate("=SUM(A1:Z4000000000)", &table, &counting),
            RANGE_ERROR
        );
        assert_eq!(
            FormulaEvaluator.evaluate("=SUM(A1:A60000, B1:B60000)", &table, &counting),
            RANGE_ERROR
        );
        assert_eq!(calls.get(), 0);

        assert_eq!(
            FormulaEvaluator.evaluate("=SUM(A1:A100000)", &table, &counting),
            "7.5"
        );
        assert_eq!(calls.get(), 100_000);
    }

    #[test]
    fn test_concat_literals() {
        assert_eq!(eval(r#"=CONCAT(B1, " ", "world")"#), "hello world");
    }

    #[test]
    fn test_unknown_formula_renders_raw() {
        assert_eq!(eval("=NOPE(A1)"), "=NOPE(A1)");
        assert_eq!(eval("=1+"), "=1+");
    }

    #[test]
    fn test_custom_formula() {
        let mut table = FormulaTable::empty();
        table.register("count", |v| v.len().to_string());
        let out = FormulaEvaluator.evaluate("=COUNT(A1:B2)", &table, &lookup);
        assert_eq!(out, "4");
    }
}
