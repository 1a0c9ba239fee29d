use crate::artifacts::merge::{CONFLICT_END, CONFLICT_SEPARATOR, CONFLICT_START};
use std::io::{BufRead, Write};

/// A pair of differing lines at the same position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineConflict<'a> {
    /// 1-based line number
    pub line_number: usize,
    pub first: &'a [u8],
    pub second: &'a [u8],
}

/// Decides what replaces a conflicting pair of lines in the merge output
pub trait ConflictResolver {
    fn resolve(&mut self, conflict: &LineConflict<'_>) -> anyhow::Result<Vec<Vec<u8>>>;
}

/// Emits a conflict block labelled with the first file's name
#[derive(Debug, Clone)]
pub struct MarkerResolver {
    label: String,
}

impl MarkerResolver {
    pub fn new(label: impl Into<String>) -> Self {
        MarkerResolver {
            label: label.into(),
        }
    }
}

impl ConflictResolver for MarkerResolver {
    fn resolve(&mut self, conflict: &LineConflict<'_>) -> anyhow::Result<Vec<Vec<u8>>> {
        Ok(vec![
            format!("{} {}", CONFLICT_START, self.label).into_bytes(),
            conflict.first.to_vec(),
            CONFLICT_SEPARATOR.as_bytes().to_vec(),
            conflict.second.to_vec(),
            CONFLICT_END.as_bytes().to_vec(),
        ])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    First,
    Second,
    Edit,
}

impl Choice {
    fn parse(answer: &str) -> Self {
        match answer.trim().to_ascii_lowercase().as_str() {
            "1" | "first" => Choice::First,
            "2" | "second" => Choice::Second,
            _ => Choice::Edit,
        }
    }
}

/// Asks for every conflict: keep the first line, the second, or type a
/// replacement
///
/// Blocks on `input` until an answer arrives; running out of input is an
/// error.
pub struct InteractiveResolver<R: BufRead, W: Write> {
    input: R,
    prompt: W,
}

impl<R: BufRead, W: Write> InteractiveResolver<R, W> {
    pub fn new(input: R, prompt: W) -> Self {
        InteractiveResolver { input, prompt }
    }

    fn read_answer(&mut self) -> anyhow::Result<String> {
        self.prompt.flush()?;

        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            anyhow::bail!("input closed before every conflict was resolved");
        }

        Ok(answer.trim_end_matches(['\n', '\r']).to_string())
    }
}

impl<R: BufRead, W: Write> ConflictResolver for InteractiveResolver<R, W> {
    fn resolve(&mut self, conflict: &LineConflict<'_>) -> anyhow::Result<Vec<Vec<u8>>> {
        writeln!(self.prompt, "Conflict at line {}:", conflict.line_number)?;
        writeln!(self.prompt, "1: {}", String::from_utf8_lossy(conflict.first))?;
        writeln!(self.prompt, "2: {}", String::from_utf8_lossy(conflict.second))?;
        write!(self.prompt, "Choose (1/2/e=edit): ")?;

        let line = match Choice::parse(&self.read_answer()?) {
            Choice::First => conflict.first.to_vec(),
            Choice::Second => conflict.second.to_vec(),
            Choice::Edit => {
                write!(self.prompt, "Edit> ")?;
                self.read_answer()?.into_bytes()
            }
        };

        Ok(vec![line])
    }
}
