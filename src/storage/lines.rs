//! Line-oriented item files
//!
//! Input is one item per line; surrounding whitespace is trimmed and blank
//! lines are skipped. Output is the final order joined with `\n`, without a
//! trailing newline. The path `-` means stdin or stdout.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;

use crate::domain::Item;

/// Path that stands for stdin/stdout
pub const STDIO_PATH: &str = "-";

/// Returns true if the path means stdin/stdout
pub fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == STDIO_PATH
}

/// Splits text into items: trimmed, blank lines dropped
///
/// Duplicates are kept; the engine collapses them.
pub fn parse_items(text: &str) -> Vec<Item> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(Item::new)
        .collect()
}

/// Reads items from a file, or stdin for `-`
pub fn read_items(path: &Path) -> Result<Vec<Item>> {
    let mut text = String::new();

    if is_stdio(path) {
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read items from stdin")?;
        return Ok(parse_items(&text));
    }

    let mut file = File::open(path)
        .with_context(|| format!("Failed to open input file: {}", path.display()))?;

    // Acquire shared lock for reading
    file.lock_shared()
        .with_context(|| format!("Failed to acquire read lock on {}", path.display()))?;

    file.read_to_string(&mut text)
        .with_context(|| format!("Failed to read input file: {}", path.display()))?;

    // Lock is released when file is dropped
    Ok(parse_items(&text))
}

/// Joins items with newlines, no trailing newline
pub fn render_order(items: &[Item]) -> String {
    items
        .iter()
        .map(Item::as_str)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Writes the final order to a file, or stdout for `-`
///
/// File writes go through a temp file and a rename, so a reader never sees
/// a half-written order.
pub fn write_order(path: &Path, items: &[Item]) -> Result<()> {
    let content = render_order(items);

    if is_stdio(path) {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        if !content.is_empty() {
            writeln!(out, "{}", content).context("Failed to write order to stdout")?;
        }
        return Ok(());
    }

    // Ensure parent directory exists
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    // Write to temp file first
    let temp_path = temp_path_for(path);

    {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

        // Acquire exclusive lock
        file.lock_exclusive()
            .with_context(|| format!("Failed to acquire write lock on {}", temp_path.display()))?;

        let mut writer = BufWriter::new(&file);
        writer
            .write_all(content.as_bytes())
            .context("Failed to write order")?;
        writer.flush().context("Failed to flush order")?;
    }

    // Atomic rename
    fs::rename(&temp_path, path).with_context(|| {
        format!(
            "Failed to rename {} to {}",
            temp_path.display(),
            path.display()
        )
    })?;

    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn texts(items: &[Item]) -> Vec<&str> {
        items.iter().map(Item::as_str).collect()
    }

    #[test]
    fn parse_trims_and_skips_blank_lines() {
        let items = parse_items("  apple \n\n\tbanana\n   \ncherry\r\n");
        assert_eq!(texts(&items), vec!["apple", "banana", "cherry"]);
    }

    #[test]
    fn parse_keeps_duplicates() {
        let items = parse_items("a\nb\na\n");
        assert_eq!(texts(&items), vec!["a", "b", "a"]);
    }

    #[test]
    fn render_has_no_trailing_newline() {
        let items = vec![Item::new("one"), Item::new("two")];
        assert_eq!(render_order(&items), "one\ntwo");
        assert_eq!(render_order(&[]), "");
    }

    #[test]
    fn read_missing_file_is_error() {
        let dir = TempDir::new().unwrap();
        let err = read_items(&dir.path().join("missing.txt")).unwrap_err();
        assert!(format!("{:#}", err).contains("missing.txt"));
    }

    #[test]
    fn write_and_read_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.txt");
        let items = vec![Item::new("first"), Item::new("second")];

        write_order(&path, &items).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond");
        assert_eq!(read_items(&path).unwrap(), items);
    }

    #[test]
    fn creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join("out.txt");

        write_order(&path, &[Item::new("x")]).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn atomic_write_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.txt");

        write_order(&path, &[Item::new("old")]).unwrap();
        write_order(&path, &[Item::new("new")]).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
        assert!(!temp_path_for(&path).exists());
    }

    #[test]
    fn dash_is_stdio() {
        assert!(is_stdio(Path::new("-")));
        assert!(!is_stdio(Path::new("./-")));
    }
}
