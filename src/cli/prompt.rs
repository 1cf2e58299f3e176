//! Line-mode oracle
//!
//! Asks each comparison on a text stream and reads the answer from a line
//! of input. Used when no terminal UI is available or `--plain` is given.

use std::io::{BufRead, Write};

use crate::domain::{Choice, Decision, Oracle, OracleError, Pair, Progress};

/// Interprets one line of input
///
/// Accepts `1`/`2`, `l`/`r`, `left`/`right` and `q`/`quit`, case-insensitive.
pub fn parse_reply(line: &str) -> Option<Decision> {
    match line.trim().to_lowercase().as_str() {
        "1" | "l" | "left" => Some(Decision::Choose(Choice::First)),
        "2" | "r" | "right" => Some(Decision::Choose(Choice::Second)),
        "q" | "quit" => Some(Decision::Abandon),
        _ => None,
    }
}

/// Oracle backed by a line reader and a prompt writer
pub struct PromptOracle<R, W> {
    input: R,
    prompt: W,
    show_progress: bool,
}

impl<R: BufRead, W: Write> PromptOracle<R, W> {
    pub fn new(input: R, prompt: W, show_progress: bool) -> Self {
        Self {
            input,
            prompt,
            show_progress,
        }
    }

    fn ask(&mut self, pair: &Pair, progress: Progress) -> std::io::Result<()> {
        if self.show_progress {
            writeln!(self.prompt, "[{}] Which comes first?", progress)?;
        } else {
            writeln!(self.prompt, "Which comes first?")?;
        }
        writeln!(self.prompt, "  1) {}", pair.first)?;
        writeln!(self.prompt, "  2) {}", pair.second)?;
        write!(self.prompt, "> ")?;
        self.prompt.flush()
    }
}

impl<R: BufRead, W: Write> Oracle for PromptOracle<R, W> {
    fn choose(&mut self, pair: &Pair, progress: Progress) -> Result<Decision, OracleError> {
        loop {
            self.ask(pair, progress)?;

            // Raw bytes: a line that is not UTF-8 is just another bad answer
            let mut line = Vec::new();
            if self.input.read_until(b'\n', &mut line)? == 0 {
                // EOF: nobody left to answer
                writeln!(self.prompt)?;
                return Ok(Decision::Abandon);
            }

            match parse_reply(&String::from_utf8_lossy(&line)) {
                Some(decision) => return Ok(decision),
                None => writeln!(
                    self.prompt,
                    "Please answer 1 or 2 (l/r also work, q to quit)."
                )?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{sort_with, Item, OrderEngine, SortOutcome};
    use std::io::Cursor;

    fn pair() -> Pair {
        Pair::new(Item::new("tea"), Item::new("coffee"))
    }

    #[test]
    fn parse_reply_variants() {
        assert_eq!(parse_reply("1\n"), Some(Decision::Choose(Choice::First)));
        assert_eq!(parse_reply(" Left "), Some(Decision::Choose(Choice::First)));
        assert_eq!(parse_reply("R"), Some(Decision::Choose(Choice::Second)));
        assert_eq!(parse_reply("2"), Some(Decision::Choose(Choice::Second)));
        assert_eq!(parse_reply("QUIT"), Some(Decision::Abandon));
        assert_eq!(parse_reply("3"), None);
        assert_eq!(parse_reply(""), None);
    }

    #[test]
    fn prompts_with_both_items_and_progress() {
        let mut prompt = Vec::new();
        let mut oracle = PromptOracle::new(Cursor::new("2\n"), &mut prompt, true);

        let decision = oracle
            .choose(&pair(), Progress { resolved: 1, total: 3 })
            .unwrap();
        assert_eq!(decision, Decision::Choose(Choice::Second));

        let text = String::from_utf8(prompt).unwrap();
        assert!(text.contains("[1/3] Which comes first?"));
        assert!(text.contains("1) tea"));
        assert!(text.contains("2) coffee"));
    }

    #[test]
    fn progress_can_be_hidden() {
        let mut prompt = Vec::new();
        let mut oracle = PromptOracle::new(Cursor::new("1\n"), &mut prompt, false);
        oracle.choose(&pair(), Progress::default()).unwrap();

        let text = String::from_utf8(prompt).unwrap();
        assert!(text.starts_with("Which comes first?"));
    }

    #[test]
    fn reprompts_on_invalid_input() {
        let mut prompt = Vec::new();
        let mut oracle = PromptOracle::new(Cursor::new("maybe\n\n1\n"), &mut prompt, false);

        let decision = oracle.choose(&pair(), Progress::default()).unwrap();
        assert_eq!(decision, Decision::Choose(Choice::First));

        let text = String::from_utf8(prompt).unwrap();
        assert_eq!(text.matches("Please answer 1 or 2").count(), 2);
    }

    #[test]
    fn reprompts_on_invalid_utf8() {
        let mut prompt = Vec::new();
        let input: &[u8] = b"\xff\xfe\n2\n";
        let mut oracle = PromptOracle::new(Cursor::new(input), &mut prompt, false);

        let decision = oracle.choose(&pair(), Progress::default()).unwrap();
        assert_eq!(decision, Decision::Choose(Choice::Second));

        let text = String::from_utf8(prompt).unwrap();
        assert_eq!(text.matches("Please answer 1 or 2").count(), 1);
    }

    #[test]
    fn eof_abandons() {
        let mut oracle = PromptOracle::new(Cursor::new(""), Vec::new(), false);
        assert_eq!(
            oracle.choose(&pair(), Progress::default()).unwrap(),
            Decision::Abandon
        );
    }

    #[test]
    fn drives_a_whole_session() {
        // Always picking the left item still yields a complete, valid order
        let answers = "1\n".repeat(10);
        let mut oracle = PromptOracle::new(Cursor::new(answers), Vec::new(), true);
        let mut engine = OrderEngine::with_seed(["a", "b", "c", "d"], 12);

        let SortOutcome::Completed(order) = sort_with(&mut engine, &mut oracle).unwrap() else {
            panic!("session should complete");
        };

        assert_eq!(order.len(), 4);
        for c in engine.comparisons() {
            let a = order.iter().position(|i| i == &c.first).unwrap();
            let b = order.iter().position(|i| i == &c.second).unwrap();
            assert!(a < b);
        }
    }
}
