use crate::error::{Result, TabGrepError};
use console::Term;
use dialoguer::{theme::ColorfulTheme, Input};
use std::io::{self, BufRead, IsTerminal, Write};

enum Source<R, W> {
    Terminal(Term),
    Lines { reader: R, writer: W },
}

/// Asks for one answer per prompt, either through an interactive terminal
/// or line by line over any reader/writer pair.
pub struct Prompter<R, W> {
    source: Source<R, W>,
}

impl Prompter<io::StdinLock<'static>, Box<dyn Write>> {
    /// Reads answers from stdin, with line editing when stdin is a terminal.
    /// Prompts go to stderr when stdout carries machine-readable output.
    pub fn stdin(prompt_to_stderr: bool) -> Self {
        let term = if prompt_to_stderr {
            Term::stderr()
        } else {
            Term::stdout()
        };
        if io::stdin().is_terminal() && term.is_term() {
            return Self {
                source: Source::Terminal(term),
            };
        }

        let writer: Box<dyn Write> = if prompt_to_stderr {
            Box::new(io::stderr())
        } else {
            Box::new(io::stdout())
        };
        Self::new(io::stdin().lock(), writer)
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            source: Source::Lines { reader, writer },
        }
    }

    /// Shows `label` and returns the cleaned answer.
    pub fn ask(&mut self, label: &str) -> Result<String> {
        let answer = match &mut self.source {
            Source::Terminal(term) => {
                let theme = ColorfulTheme::default();
                Input::<String>::with_theme(&theme)
                    .with_prompt(label)
                    .allow_empty(true)
                    .interact_text_on(term)?
            }
            Source::Lines { reader, writer } => read_answer(reader, writer, label)?,
        };

        Ok(clean_input(&answer))
    }

    /// Asks only when no value was supplied up front.
    pub fn ask_unless(&mut self, given: Option<&str>, label: &str) -> Result<String> {
        match given {
            Some(value) => Ok(clean_input(value)),
            None => self.ask(label),
        }
    }

    /// The prompt sink of a line-based prompter.
    pub fn into_writer(self) -> Option<W> {
        match self.source {
            Source::Lines { writer, .. } => Some(writer),
            Source::Terminal(_) => None,
        }
    }
}

fn read_answer<R: BufRead, W: Write>(reader: &mut R, writer: &mut W, label: &str) -> Result<String> {
    write!(writer, "{}: ", label)?;
    writer.flush()?;

    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(TabGrepError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("input closed while waiting for {:?}", label),
        )));
    }

    Ok(line)
}

/// Drops line endings around the answer and every double quote, so paths
/// pasted from a file manager ("C:\data dir") work unchanged.
pub fn clean_input(input: &str) -> String {
    input
        .trim_matches(|c| c == '\r' || c == '\n')
        .replace('"', "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_clean_input() {
        assert_eq!(clean_input("settings.json\n"), "settings.json");
        assert_eq!(clean_input("settings.json\r\n"), "settings.json");
        assert_eq!(clean_input("\"C:\\data dir\"\r\n"), "C:\\data dir");
        assert_eq!(clean_input("  spaced  \n"), "  spaced  ");
    }

    #[test]
    fn test_prompts_in_order() {
        let input = Cursor::new("cfg.json\n\"/data\"\r\n/out\n");
        let mut prompter = Prompter::new(input, Vec::new());

        assert_eq!(prompter.ask("Setting JSON").unwrap(), "cfg.json");
        assert_eq!(prompter.ask("Data Folder").unwrap(), "/data");
        assert_eq!(prompter.ask("Output Folder").unwrap(), "/out");

        let shown = String::from_utf8(prompter.into_writer().unwrap()).unwrap();
        assert_eq!(shown, "Setting JSON: Data Folder: Output Folder: ");
    }

    #[test]
    fn test_last_line_without_newline() {
        let mut prompter = Prompter::new(Cursor::new("/out"), Vec::new());
        assert_eq!(prompter.ask("Output Folder").unwrap(), "/out");
    }

    #[test]
    fn test_closed_input_is_error() {
        let mut prompter = Prompter::new(Cursor::new(""), Vec::new());
        let result = prompter.ask("Setting JSON");
        assert!(matches!(result, Err(TabGrepError::Io(_))));
    }

    #[test]
    fn test_ask_unless_skips_prompt() {
        let mut prompter = Prompter::new(Cursor::new("from-stdin\n"), Vec::new());

        assert_eq!(
            prompter.ask_unless(Some("\"given\""), "Data Folder").unwrap(),
            "given"
        );
        assert_eq!(prompter.ask_unless(None, "Data Folder").unwrap(), "from-stdin");

        let shown = String::from_utf8(prompter.into_writer().unwrap()).unwrap();
        assert_eq!(shown, "Data Folder: ");
    }
}
