//! The `inspect` command: size up an item file without asking anything

use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use super::output::Output;
use crate::domain::{dedupe, max_comparisons, min_comparisons};
use crate::storage::read_items;

/// Summary of an item file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Inspection {
    pub lines: usize,
    pub distinct: usize,
    pub duplicates: usize,
    pub max_comparisons: usize,
    pub min_comparisons: usize,
}

impl Inspection {
    pub fn of(lines: usize, distinct: usize) -> Self {
        Self {
            lines,
            distinct,
            duplicates: lines - distinct,
            max_comparisons: max_comparisons(distinct),
            min_comparisons: min_comparisons(distinct),
        }
    }
}

pub fn run(input: &Path, output: &Output) -> Result<()> {
    let items = read_items(input)?;
    let lines = items.len();
    let distinct = dedupe(items).len();
    output.verbose_ctx("inspect", &format!("{} lines, {} distinct", lines, distinct));

    let report = Inspection::of(lines, distinct);

    if output.is_json() {
        output.data(&report);
    } else {
        output.field("Items", report.lines);
        output.field("Distinct items", report.distinct);
        output.field("Duplicates dropped", report.duplicates);
        output.field("Comparisons (max)", report.max_comparisons);
        output.field("Comparisons (min)", report.min_comparisons);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inspection_counts() {
        let report = Inspection::of(5, 4);
        assert_eq!(report.duplicates, 1);
        assert_eq!(report.max_comparisons, 6);
        assert_eq!(report.min_comparisons, 5);
    }

    #[test]
    fn empty_inspection() {
        assert_eq!(
            Inspection::of(0, 0),
            Inspection {
                lines: 0,
                distinct: 0,
                duplicates: 0,
                max_comparisons: 0,
                min_comparisons: 0,
            }
        );
    }
}
