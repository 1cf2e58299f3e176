//! # Command-Line Interface
//!
//! User-facing commands, output formatting, and the two interactive front
//! ends that answer comparisons.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `sort <INPUT>` | Interactive session; writes the final order |
//! | `inspect <INPUT>` | Item counts and comparison bounds |
//! | `config` | Show (or `--init`) the configuration |
//!
//! ## Front Ends
//!
//! - Terminal UI (ratatui) when stdin and stdout are terminals
//! - Line prompt otherwise, or with `sort --plain`; prompts go to stderr
//!
//! ## Output Formats
//!
//! All commands support the `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output on stderr:
//! ```bash
//! pairsort --verbose sort books.txt
//! ```

mod app;
mod output;
mod sort;
mod inspect;
mod config_cmd;
mod prompt;
mod tui;

pub use app::{Cli, Commands, run};
pub use output::{Output, OutputFormat};
pub use prompt::{parse_reply, PromptOracle};
