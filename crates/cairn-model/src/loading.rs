// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Instance loader for the checkpoint-tour domain.
//!
//! This module turns whitespace-delimited text streams into a validated
//! [`Model`], mapping the slot table, opening grids, travel matrix, and
//! event parameters into the compact layout consumed by the solver.
//!
//! The format (whitespace-separated tokens, `#` starts a comment that runs
//! to the end of the line):
//!
//! ```raw
//! N S                    // checkpoint count, slot count
//! t_1 ... t_S            // slot-start minutes
//! o_1_1 ... o_1_S        // opening flags (0/1) of checkpoint 1
//! ...
//! o_N_1 ... o_N_S        // opening flags of checkpoint N
//! f_1 ... f_S            // opening flags of Finish
//! m_1_1 ... m_1_(N+2)    // travel matrix row 1 (checkpoints, Start, Finish)
//! ...
//! m_(N+2)_1 ... m_(N+2)_(N+2)
//! start end dwell speed naismith
//! ```
//!
//! The parser accepts any `BufRead`, file path, raw reader, or string
//! slice, making it convenient to integrate with benchmarks, tests, and
//! tooling.

use crate::{
    index::{CheckpointIndex, Node, SlotIndex},
    model::{Model, ModelBuildError, ModelBuilder},
};
use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
    str::FromStr,
};

/// The error type for the instance loading process.
#[derive(Debug)]
pub enum InstanceLoadError {
    /// An I/O error occurred while reading the input stream.
    Io(std::io::Error),
    /// The input stream ended unexpectedly (e.g., missing tokens).
    UnexpectedEof,
    /// A token could not be parsed into the expected numeric type.
    Parse(ParseTokenError),
    /// The instance dimensions (N or S) are out of range.
    InvalidDimensions,
    /// The assembled instance failed model validation.
    Model(ModelBuildError),
}

/// Details about a failed token parsing attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTokenError {
    /// The string token that failed to parse.
    pub token: String,
    /// The name of the type we tried to parse into (e.g., "i32").
    pub type_name: &'static str,
}

impl std::fmt::Display for ParseTokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Could not parse token '{}' as type {}",
            self.token, self.type_name
        )
    }
}

impl std::error::Error for ParseTokenError {}

impl std::fmt::Display for InstanceLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::UnexpectedEof => write!(f, "Unexpected end of file while parsing instance"),
            Self::Parse(e) => write!(f, "Parse error: {}", e),
            Self::InvalidDimensions => write!(
                f,
                "Instance dimensions (N and S) must be positive and within the supported maxima"
            ),
            Self::Model(e) => write!(f, "Model validation error: {}", e),
        }
    }
}

impl std::error::Error for InstanceLoadError {}

impl From<std::io::Error> for InstanceLoadError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ParseTokenError> for InstanceLoadError {
    fn from(e: ParseTokenError) -> Self {
        Self::Parse(e)
    }
}

impl From<ModelBuildError> for InstanceLoadError {
    fn from(e: ModelBuildError) -> Self {
        Self::Model(e)
    }
}

/// A loader for checkpoint-tour instances in the text format above.
///
/// # Examples
///
/// ```rust
/// # use cairn_model::loading::InstanceLoader;
///
/// let text = "\
/// 1 1
/// 600
/// 1
/// 1
/// 0 5 5
/// 5 0 5
/// 5 5 0
/// 600 700 7 4.0 10.0
/// ";
/// let model = InstanceLoader::default().from_str(text).unwrap();
/// assert_eq!(model.num_checkpoints(), 1);
/// assert_eq!(model.dwell(), 7);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstanceLoader;

impl InstanceLoader {
    /// Creates a loader.
    #[inline]
    pub fn new() -> Self {
        Self
    }

    /// Loads an instance from a file path.
    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<Model, InstanceLoadError> {
        let file = File::open(path)?;
        self.from_reader(file)
    }

    /// Loads an instance from any reader.
    pub fn from_reader<R: Read>(&self, reader: R) -> Result<Model, InstanceLoadError> {
        self.load(BufReader::new(reader))
    }

    /// Loads an instance from a string slice.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(&self, text: &str) -> Result<Model, InstanceLoadError> {
        self.load(text.as_bytes())
    }

    fn load<R: BufRead>(&self, reader: R) -> Result<Model, InstanceLoadError> {
        let mut tokens = Tokenizer::new(reader);

        let num_checkpoints: usize = tokens.next_parsed("usize")?;
        let num_slots: usize = tokens.next_parsed("usize")?;
        if num_checkpoints == 0
            || num_checkpoints > Model::MAX_CHECKPOINTS
            || num_slots == 0
            || num_slots > crate::schedule::SlotSchedule::MAX_SLOTS
        {
            return Err(InstanceLoadError::InvalidDimensions);
        }

        let mut slot_starts = Vec::with_capacity(num_slots);
        for _ in 0..num_slots {
            slot_starts.push(tokens.next_parsed::<i32>("i32")?);
        }

        let mut builder = ModelBuilder::new(num_checkpoints, slot_starts);

        for checkpoint in 0..num_checkpoints {
            for slot in 0..num_slots {
                let flag: u32 = tokens.next_parsed("u32")?;
                if flag != 0 {
                    builder.open_checkpoint(CheckpointIndex::new(checkpoint), SlotIndex::new(slot));
                }
            }
        }

        for slot in 0..num_slots {
            let flag: u32 = tokens.next_parsed("u32")?;
            if flag != 0 {
                builder.open_finish(SlotIndex::new(slot));
            }
        }

        let num_nodes = num_checkpoints + 2;
        for from in 0..num_nodes {
            for to in 0..num_nodes {
                let minutes: f32 = tokens.next_parsed("f32")?;
                builder.set_travel_time(
                    node_at(from, num_checkpoints),
                    node_at(to, num_checkpoints),
                    minutes,
                );
            }
        }

        let start: i32 = tokens.next_parsed("i32")?;
        let end: i32 = tokens.next_parsed("i32")?;
        let dwell: i32 = tokens.next_parsed("i32")?;
        let speed: f32 = tokens.next_parsed("f32")?;
        let naismith: f32 = tokens.next_parsed("f32")?;

        builder
            .event_window(start, end)
            .dwell(dwell)
            .speed(speed)
            .naismith(naismith);

        Ok(builder.build()?)
    }
}

#[inline]
fn node_at(position: usize, num_checkpoints: usize) -> Node {
    if position < num_checkpoints {
        Node::Checkpoint(CheckpointIndex::new(position))
    } else if position == num_checkpoints {
        Node::Start
    } else {
        Node::Finish
    }
}

/// A whitespace tokenizer over buffered lines, dropping `#` comments.
struct Tokenizer<R> {
    reader: R,
    pending: Vec<String>,
}

impl<R: BufRead> Tokenizer<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            pending: Vec::new(),
        }
    }

    fn next_token(&mut self) -> Result<String, InstanceLoadError> {
        loop {
            if let Some(token) = self.pending.pop() {
                return Ok(token);
            }

            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Err(InstanceLoadError::UnexpectedEof);
            }

            let payload = line.split('#').next().unwrap_or("");
            // Reversed so `pop` hands tokens back in line order.
            self.pending
                .extend(payload.split_whitespace().rev().map(str::to_owned));
        }
    }

    fn next_parsed<T: FromStr>(
        &mut self,
        type_name: &'static str,
    ) -> Result<T, InstanceLoadError> {
        let token = self.next_token()?;
        token.parse::<T>().map_err(|_| {
            InstanceLoadError::Parse(ParseTokenError {
                token,
                type_name,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL_INSTANCE: &str = "\
# two checkpoints, two slots
2 2
600 630
1 0     # checkpoint 0 openings
0 1     # checkpoint 1 openings
1 1     # finish openings
0 10 15 5
10 0 20 7
3 7 0 9
6 8 11 0
600 720 7 4.5 10.0
";

    #[test]
    fn test_loads_a_small_instance() {
        let model = InstanceLoader::new().from_str(SMALL_INSTANCE).unwrap();

        assert_eq!(model.num_checkpoints(), 2);
        assert_eq!(model.num_slots(), 2);
        assert_eq!(model.schedule().starts(), &[600, 630]);

        assert!(model.is_open(CheckpointIndex::new(0), SlotIndex::new(0)));
        assert!(!model.is_open(CheckpointIndex::new(0), SlotIndex::new(1)));
        assert!(!model.is_open(CheckpointIndex::new(1), SlotIndex::new(0)));
        assert!(model.is_open(CheckpointIndex::new(1), SlotIndex::new(1)));
        assert!(model.is_finish_open(SlotIndex::new(0)));
        assert!(model.is_finish_open(SlotIndex::new(1)));

        assert_eq!(
            model.travel_time(Node::Start, Node::Checkpoint(CheckpointIndex::new(1))),
            7.0
        );
        assert_eq!(
            model.travel_time(Node::Checkpoint(CheckpointIndex::new(0)), Node::Finish),
            5.0
        );
        assert_eq!(model.travel_time(Node::Finish, Node::Finish), 0.0);

        assert_eq!(model.start_time(), 600);
        assert_eq!(model.end_time(), 720);
        assert_eq!(model.dwell(), 7);
        assert_eq!(model.speed(), 4.5);
        assert_eq!(model.naismith(), 10.0);
    }

    #[test]
    fn test_reader_and_str_agree() {
        let from_str = InstanceLoader::new().from_str(SMALL_INSTANCE).unwrap();
        let from_reader = InstanceLoader::new()
            .from_reader(SMALL_INSTANCE.as_bytes())
            .unwrap();
        assert_eq!(from_str.num_checkpoints(), from_reader.num_checkpoints());
        assert_eq!(from_str.schedule().starts(), from_reader.schedule().starts());
        assert_eq!(from_str.end_time(), from_reader.end_time());
    }

    #[test]
    fn test_rejects_truncated_input() {
        let truncated = "2 2\n600 630\n1 0\n";
        match InstanceLoader::new().from_str(truncated) {
            Err(InstanceLoadError::UnexpectedEof) => {}
            other => panic!("expected UnexpectedEof, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_rejects_bad_token() {
        let garbled = "2 two\n";
        match InstanceLoader::new().from_str(garbled) {
            Err(InstanceLoadError::Parse(e)) => {
                assert_eq!(e.token, "two");
                assert_eq!(e.type_name, "usize");
            }
            other => panic!("expected Parse error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        for header in ["0 2", "18 2", "2 0", "2 16"] {
            let text = format!("{header}\n600\n");
            match InstanceLoader::new().from_str(&text) {
                Err(InstanceLoadError::InvalidDimensions) => {}
                other => panic!("expected InvalidDimensions, got {:?}", other.map(|_| ())),
            }
        }
    }

    #[test]
    fn test_propagates_model_validation() {
        // Slot starts out of order.
        let text = "\
1 2
630 600
1 1
1 1
0 1 1
1 0 1
1 1 0
600 700 7 4.0 10.0
";
        match InstanceLoader::new().from_str(text) {
            Err(InstanceLoadError::Model(_)) => {}
            other => panic!("expected Model error, got {:?}", other.map(|_| ())),
        }
    }
}
