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

use cairn_core::utils::index::{TypedIndex, TypedIndexTag};

/// A tag type for checkpoint indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct CheckpointIndexTag;

impl TypedIndexTag for CheckpointIndexTag {
    const NAME: &'static str = "CheckpointIndex";
}

/// A typed index for intermediate checkpoints.
pub type CheckpointIndex = TypedIndex<CheckpointIndexTag>;

/// A tag type for service-slot indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct SlotIndexTag;

impl TypedIndexTag for SlotIndexTag {
    const NAME: &'static str = "SlotIndex";
}

/// A typed index for half-hour service slots.
pub type SlotIndex = TypedIndex<SlotIndexTag>;

/// A node of the travel-time matrix.
///
/// The matrix covers the intermediate checkpoints plus the two fixed event
/// nodes. Rows and columns follow the host convention: checkpoints occupy
/// positions `0..N-1`, Start is the next position (`N`), and Finish the one
/// after that (`N+1`).
///
/// # Examples
///
/// ```rust
/// # use cairn_model::index::{CheckpointIndex, Node};
///
/// let cp = Node::Checkpoint(CheckpointIndex::new(2));
/// assert_eq!(cp.position(5), 2);
/// assert_eq!(Node::Start.position(5), 5);
/// assert_eq!(Node::Finish.position(5), 6);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Node {
    /// An intermediate checkpoint.
    Checkpoint(CheckpointIndex),
    /// The fixed departure node of the tour.
    Start,
    /// The fixed arrival node of the tour.
    Finish,
}

impl Node {
    /// Returns the matrix position of this node for an instance with
    /// `num_checkpoints` intermediate checkpoints.
    ///
    /// # Panics
    ///
    /// In debug mode, panics if the node is a checkpoint whose index is
    /// not in `0..num_checkpoints`.
    #[inline]
    pub fn position(&self, num_checkpoints: usize) -> usize {
        match self {
            Node::Checkpoint(cp) => {
                debug_assert!(
                    cp.get() < num_checkpoints,
                    "called `Node::position` with checkpoint index out of bounds: the len is {} but the index is {}",
                    num_checkpoints,
                    cp.get()
                );
                cp.get()
            }
            Node::Start => num_checkpoints,
            Node::Finish => num_checkpoints + 1,
        }
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Node::Checkpoint(cp) => write!(f, "{}", cp),
            Node::Start => write!(f, "Start"),
            Node::Finish => write!(f, "Finish"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_positions_follow_host_convention() {
        let n = 17;
        assert_eq!(Node::Checkpoint(CheckpointIndex::new(0)).position(n), 0);
        assert_eq!(Node::Checkpoint(CheckpointIndex::new(16)).position(n), 16);
        assert_eq!(Node::Start.position(n), 17);
        assert_eq!(Node::Finish.position(n), 18);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            format!("{}", Node::Checkpoint(CheckpointIndex::new(4))),
            "CheckpointIndex(4)"
        );
        assert_eq!(format!("{}", Node::Start), "Start");
        assert_eq!(format!("{}", Node::Finish), "Finish");
    }
}
