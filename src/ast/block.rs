use super::{Position, Statement};

/// An ordered sequence of statements; evaluates to its last non-Comment
/// statement's value, or Nil if empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub position: Position,
}
