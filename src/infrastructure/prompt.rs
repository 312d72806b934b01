//! Yes/no confirmation prompts

use crate::messages::Message;
use std::io::{self, BufRead, Write};

/// Asks the user to confirm an action
pub trait Confirm {
    /// Returns the answer, or `default` when no answer can be read
    fn confirm(&mut self, message: &Message, default: bool) -> bool;
}

/// Prompts on a terminal (or any reader/writer pair)
pub struct TerminalConfirm<R, W> {
    input: R,
    output: W,
}

impl TerminalConfirm<io::StdinLock<'static>, io::Stderr> {
    /// Prompt on stderr and read the answer from stdin
    pub fn stdio() -> Self {
        TerminalConfirm::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> TerminalConfirm<R, W> {
    pub fn new(input: R, output: W) -> Self {
        TerminalConfirm { input, output }
    }
}

impl<R: BufRead, W: Write> Confirm for TerminalConfirm<R, W> {
    fn confirm(&mut self, message: &Message, default: bool) -> bool {
        let choices = if default { "[Y/n]" } else { "[y/N]" };

        loop {
            if write!(self.output, "{} {} ", message.render(), choices)
                .and_then(|_| self.output.flush())
                .is_err()
            {
                return default;
            }

            let mut answer = String::new();
            match self.input.read_line(&mut answer) {
                // EOF, or input was interrupted
                Ok(0) | Err(_) => {
                    let _ = writeln!(self.output);
                    return default;
                }
                Ok(_) => {}
            }

            match answer.trim().to_lowercase().as_str() {
                "" => return default,
                "y" | "yes" => return true,
                "n" | "no" => return false,
                _ => {
                    let _ = writeln!(self.output, "Please answer yes or no.");
                }
            }
        }
    }
}

/// Answers yes without asking
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, _message: &Message, _default: bool) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::MsgText;

    fn ask(input: &str, default: bool) -> (bool, String) {
        let mut output = Vec::new();
        let answer = TerminalConfirm::new(input.as_bytes(), &mut output)
            .confirm(&Message::normal(MsgText::Continue), default);
        (answer, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_yes_and_no() {
        assert!(ask("y\n", false).0);
        assert!(ask("YES\n", false).0);
        assert!(!ask("n\n", true).0);
        assert!(!ask("no\n", true).0);
    }

    #[test]
    fn test_empty_answer_uses_default() {
        assert!(!ask("\n", false).0);
        assert!(ask("\n", true).0);
    }

    #[test]
    fn test_eof_uses_default() {
        assert!(!ask("", false).0);
        assert!(ask("", true).0);
    }

    #[test]
    fn test_invalid_answer_asks_again() {
        let (answer, output) = ask("maybe\ny\n", false);
        assert!(answer);
        assert!(output.contains("Please answer yes or no."));
        assert_eq!(output.matches("[y/N]").count(), 2);
    }

    #[test]
    fn test_prompt_shows_question() {
        let (_, output) = ask("n\n", false);
        assert!(output.starts_with("Do you want to continue importing entries from Day One? [y/N]"));
    }

    #[test]
    fn test_assume_yes() {
        assert!(AssumeYes.confirm(&Message::normal(MsgText::ConfirmClear), false));
    }
}
