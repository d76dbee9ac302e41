//! Traversal protocol: what visitors see and what they return.

use ringtree_core::Position;

use crate::cursor::Cursor;

/// Continuation returned by `each` visitors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Flow {
    /// Keep walking.
    Continue,
    /// Stop the whole traversal; no further node is visited.
    Stop,
}

impl Flow {
    /// Map an integer continuation: 0 stops, anything else continues.
    pub fn from_signed(signal: i32) -> Self {
        if signal == 0 {
            Self::Stop
        } else {
            Self::Continue
        }
    }

    /// Whether this is [`Flow::Stop`].
    pub fn is_stop(self) -> bool {
        self == Self::Stop
    }
}

/// Direction returned by `path` visitors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Step {
    /// End the descent at the current node.
    Stop,
    /// Continue into child slot `k`. A missing child also ends the descent.
    Descend(usize),
}

impl Step {
    /// Binary "left" child (slot 1).
    pub const LEFT: Step = Step::Descend(crate::binary::LEFT);

    /// Binary "right" child (slot 0).
    pub const RIGHT: Step = Step::Descend(crate::binary::RIGHT);

    /// Map a signed binary continuation: positive goes left, negative goes
    /// right, zero stops.
    pub fn from_signed(signal: i32) -> Self {
        match signal {
            0 => Self::Stop,
            s if s > 0 => Self::LEFT,
            _ => Self::RIGHT,
        }
    }
}

/// How far `each` walks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Traversal {
    /// Pre-order over the whole tree.
    #[default]
    Recursive,
    /// Visit the root only and never recurse into children.
    RootOnly,
}

/// One node as presented to a visitor.
#[derive(Debug)]
pub struct Visit<'a, T> {
    /// Cursor at the visited node.
    pub cursor: Cursor,
    /// Coordinates of the visited node.
    pub position: Position,
    /// The node's payload.
    pub payload: &'a T,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flow_from_signed() {
        assert_eq!(Flow::from_signed(0), Flow::Stop);
        assert_eq!(Flow::from_signed(1), Flow::Continue);
        assert_eq!(Flow::from_signed(-1), Flow::Continue);
        assert!(Flow::Stop.is_stop());
    }

    #[test]
    fn step_from_signed() {
        assert_eq!(Step::from_signed(0), Step::Stop);
        assert_eq!(Step::from_signed(5), Step::Descend(1));
        assert_eq!(Step::from_signed(-3), Step::Descend(0));
    }
}
