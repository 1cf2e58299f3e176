//! The `sort` command: run an interactive ordering session

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use super::output::Output;
use super::prompt::PromptOracle;
use super::tui;
use crate::domain::{sort_with, Item, OrderEngine, SortOutcome};
use crate::storage::{is_stdio, read_items, write_order, Config};

/// Separator between the two items of a `--given` ordering
const GIVEN_SEPARATOR: &str = " < ";

#[derive(Args, Debug)]
pub struct SortArgs {
    /// File with one item per line
    pub input: PathBuf,

    /// Where to write the order (`-` for stdout; defaults to the configured output)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Seed for the presentation shuffle, for reproducible sessions
    #[arg(long, env = "PAIRSORT_SEED")]
    pub seed: Option<u64>,

    /// Use the line prompt even on a terminal
    #[arg(long)]
    pub plain: bool,

    /// An ordering known in advance, as "FIRST < SECOND" (repeatable)
    #[arg(long, value_name = "FIRST < SECOND")]
    pub given: Vec<String>,
}

/// Splits `"a < b"` into its two items
pub fn parse_given(ordering: &str) -> Result<(Item, Item)> {
    let (before, after) = ordering
        .split_once(GIVEN_SEPARATOR)
        .with_context(|| format!("Expected \"FIRST < SECOND\", got '{}'", ordering))?;

    let (before, after) = (before.trim(), after.trim());
    if before.is_empty() || after.is_empty() {
        bail!("Both sides of '{}' must name an item", ordering);
    }

    Ok((Item::new(before), Item::new(after)))
}

pub fn run(args: SortArgs, config: &Config, output: &Output) -> Result<()> {
    if is_stdio(&args.input) {
        bail!("Items must come from a file: stdin is reserved for answers");
    }

    let items = read_items(&args.input)?;
    output.verbose_ctx(
        "sort",
        &format!("Read {} lines from {}", items.len(), args.input.display()),
    );

    let seed = args.seed.or(config.seed).unwrap_or_else(rand::random);
    let mut engine = OrderEngine::with_seed(items, seed);
    output.verbose_ctx(
        "sort",
        &format!("{} distinct items, seed {}", engine.len(), seed),
    );

    for ordering in &args.given {
        let (before, after) = parse_given(ordering)?;
        engine
            .record(&before, &after)
            .with_context(|| format!("Invalid --given '{}'", ordering))?;
        output.verbose_ctx("sort", &format!("Given: {} before {}", before, after));
    }

    let interactive = !args.plain && io::stdin().is_terminal() && io::stdout().is_terminal();
    let outcome = if interactive {
        tui::run(&mut engine, config, output)?
    } else {
        output.verbose_ctx("sort", "Using line prompt");
        let stdin = io::stdin();
        let mut oracle = PromptOracle::new(stdin.lock(), io::stderr(), config.display.show_progress);
        sort_with(&mut engine, &mut oracle)?
    };

    let stats = engine.stats();
    let order = match outcome {
        SortOutcome::Completed(order) => order,
        SortOutcome::Abandoned => bail!(
            "Session abandoned after {} answers; nothing written",
            stats.asked
        ),
    };

    let destination = args.output.unwrap_or_else(|| config.output.clone());
    write_order(&destination, &order)?;
    output.verbose_ctx(
        "sort",
        &format!(
            "Asked {}, skipped {} as implied, {} given",
            stats.asked, stats.pruned, stats.given
        ),
    );

    // stdout carries the order itself; keep it clean
    if is_stdio(&destination) {
        return Ok(());
    }

    if output.is_json() {
        output.data(&serde_json::json!({
            "order": order,
            "asked": stats.asked,
            "pruned": stats.pruned,
            "given": stats.given,
            "seed": stats.seed,
            "output": destination.display().to_string(),
        }));
    } else {
        output.success(&format!(
            "Sorted {} items with {} comparisons ({} skipped as implied); wrote {}",
            order.len(),
            stats.asked,
            stats.pruned,
            destination.display()
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_given_splits_on_separator() {
        let (a, b) = parse_given("apple pie < banana split").unwrap();
        assert_eq!(a.as_str(), "apple pie");
        assert_eq!(b.as_str(), "banana split");
    }

    #[test]
    fn parse_given_keeps_inner_angle_brackets() {
        let (a, b) = parse_given("x<y < z").unwrap();
        assert_eq!(a.as_str(), "x<y");
        assert_eq!(b.as_str(), "z");
    }

    #[test]
    fn parse_given_rejects_malformed() {
        assert!(parse_given("apple banana").is_err());
        assert!(parse_given(" < banana").is_err());
        assert!(parse_given("apple <  ").is_err());
    }
}
