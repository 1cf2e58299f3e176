//! # Storage Layer
//!
//! File access for pairsort. The engine itself never touches the filesystem.
//!
//! ## Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Items | One per line, trimmed, blanks skipped | any path, `-` for stdin |
//! | Final order | Newline-joined, no trailing newline | `-o` path, `-` for stdout |
//! | Config | TOML | `~/.config/pairsort/config.toml` or `--config` |
//!
//! Order files are written atomically (temp file + rename) under an `fs2`
//! exclusive lock.

mod lines;
mod config;

pub use lines::{is_stdio, parse_items, read_items, render_order, write_order, STDIO_PATH};
pub use config::{Config, ConfigError, DisplayConfig, KeyConfig, DEFAULT_OUTPUT};
