use super::{Expression, Position};

/// `[ item, item, … ]`, insertion order preserved.
#[derive(Debug, Clone, PartialEq)]
pub struct ListLit {
    pub items: Vec<Expression>,
    pub position: Position,
}

/// `{ item, item, … }`, insertion order preserved by the parser; duplicate
/// elimination under structural equality is an evaluator concern.
#[derive(Debug, Clone, PartialEq)]
pub struct SetLit {
    pub items: Vec<Expression>,
    pub position: Position,
}

/// `#{ key: value, … }`, insertion order preserved by the parser.
#[derive(Debug, Clone, PartialEq)]
pub struct DictionaryLit {
    pub pairs: Vec<(Expression, Expression)>,
    pub position: Position,
}
