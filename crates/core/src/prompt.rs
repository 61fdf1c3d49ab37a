//! Interactive input
//!
//! The scaffolder asks its questions through [`PromptSource`] so scripted
//! answers can stand in for a terminal.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Source of interactive answers.
pub trait PromptSource {
    /// Print a question and read one trimmed line of input.
    fn ask(&mut self, question: &str) -> io::Result<String>;

    /// Ask, substituting `default` when the answer is empty.
    fn ask_or(&mut self, question: &str, default: &str) -> io::Result<String> {
        let answer = self.ask(question)?;
        if answer.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(answer)
        }
    }
}

/// Terminal-backed prompt source.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinPrompt;

impl PromptSource for StdinPrompt {
    fn ask(&mut self, question: &str) -> io::Result<String> {
        println!("{question}");
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// Pre-scripted answers, consumed in order. Used where no terminal is
/// attached, and by tests.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<String>,
}

impl ScriptedPrompt {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
        }
    }
}

impl PromptSource for ScriptedPrompt {
    fn ask(&mut self, _question: &str) -> io::Result<String> {
        self.answers.pop_front().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "no scripted answer left")
        })
    }
}
