use super::{Expression, Position};

/// `let name = value`. The resulting cell is never reassignable.
#[derive(Debug, Clone, PartialEq)]
pub struct Let {
    pub name: String,
    pub value: Box<Expression>,
    pub position: Position,
}

/// `let mut name = value`. The resulting cell may later be reassigned.
#[derive(Debug, Clone, PartialEq)]
pub struct MutableLet {
    pub name: String,
    pub value: Box<Expression>,
    pub position: Position,
}

/// `name = value`, rebinding an existing mutable cell found by walking
/// outward through enclosing scopes.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub name: String,
    pub value: Box<Expression>,
    pub position: Position,
}
