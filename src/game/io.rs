//! Line-oriented channel between the controller and the player.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use super::events::{GameEvent, Prompt};

/// How the controller talks to the human.
///
/// `next_human_input` returns `Ok(None)` when no more input will come.
pub trait TurnIo {
    fn next_human_input(&mut self, prompt: &Prompt) -> io::Result<Option<String>>;
    fn announce(&mut self, event: &GameEvent) -> io::Result<()>;
}

/// Interactive console over any reader/writer pair.
pub struct ConsoleIo<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsoleIo<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Give back the reader and writer.
    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }
}

impl ConsoleIo<io::StdinLock<'static>, io::Stdout> {
    /// Console on the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TurnIo for ConsoleIo<R, W> {
    fn next_human_input(&mut self, prompt: &Prompt) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn announce(&mut self, event: &GameEvent) -> io::Result<()> {
        writeln!(self.output, "{event}")?;
        self.output.flush()
    }
}

/// Pre-recorded input with captured output, for tests and replays.
#[derive(Clone, Debug, Default)]
pub struct ScriptedIo {
    inputs: VecDeque<String>,
    prompts: Vec<Prompt>,
    events: Vec<GameEvent>,
}

impl ScriptedIo {
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Prompts shown so far.
    pub fn prompts(&self) -> &[Prompt] {
        &self.prompts
    }

    /// Events announced so far.
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Inputs not yet consumed.
    pub fn remaining(&self) -> usize {
        self.inputs.len()
    }
}

impl TurnIo for ScriptedIo {
    fn next_human_input(&mut self, prompt: &Prompt) -> io::Result<Option<String>> {
        self.prompts.push(prompt.clone());
        Ok(self.inputs.pop_front())
    }

    fn announce(&mut self, event: &GameEvent) -> io::Result<()> {
        self.events.push(event.clone());
        Ok(())
    }
}
