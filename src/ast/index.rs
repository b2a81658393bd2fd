use super::{Expression, Position};

#[derive(Debug, Clone, PartialEq)]
pub struct Index {
    pub target: Box<Expression>,
    pub index: Box<Expression>,
    pub position: Position,
}
