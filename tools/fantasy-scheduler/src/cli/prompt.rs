use colored::*;
use std::io::{BufRead, Write};
use tracing::debug;

use crate::error::SessionError;

/// `q` or `quit`, in any case
pub fn is_quit(answer: &str) -> bool {
    let answer = answer.trim();
    answer.eq_ignore_ascii_case("q") || answer.eq_ignore_ascii_case("quit")
}

/// Split a comma separated roster line into trimmed, non-empty names
pub fn parse_roster(line: &str) -> Vec<String> {
    line.split(',').map(str::trim).filter(|name| !name.is_empty()).map(str::to_string).collect()
}

/// Line-oriented prompts over any reader/writer pair
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `prompt` and read one trimmed answer
    ///
    /// Returns [`SessionError::Quit`] for `q`/`quit` and at end of input.
    pub fn ask(&mut self, prompt: &str) -> Result<String, SessionError> {
        write!(self.output, "{}", prompt.bold())?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            debug!("End of input");
            writeln!(self.output)?;
            return Err(SessionError::Quit);
        }

        let answer = line.trim();
        if is_quit(answer) {
            return Err(SessionError::Quit);
        }

        Ok(answer.to_string())
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_quit_words() {
        assert!(is_quit("q"));
        assert!(is_quit(" QUIT "));
        assert!(is_quit("Quit"));
        assert!(!is_quit("quinn"));
        assert!(!is_quit(""));
    }

    #[test]
    fn test_parse_roster_drops_blank_entries() {
        assert_eq!(
            parse_roster(" LeBron James, ,Stephen Curry ,"),
            vec!["LeBron James".to_string(), "Stephen Curry".to_string()]
        );
        assert!(parse_roster(" , ").is_empty());
    }

    #[test]
    fn test_ask_returns_trimmed_answer() {
        let mut prompter = prompter("  2  \n");
        assert_eq!(prompter.ask("Choice: ").unwrap(), "2");

        let output = String::from_utf8(prompter.into_output()).unwrap();
        assert!(output.contains("Choice: "));
    }

    #[test]
    fn test_ask_signals_quit() {
        let mut prompter = prompter("Q\n");
        assert!(matches!(prompter.ask("> "), Err(SessionError::Quit)));
    }

    #[test]
    fn test_end_of_input_is_quit() {
        let mut prompter = prompter("");
        assert!(matches!(prompter.ask("> "), Err(SessionError::Quit)));
    }
}
