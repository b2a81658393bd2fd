use super::{Expression, Position};

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// A line comment, carrying its full literal text (including `//`).
    /// Never contributes to the program's result value.
    Comment { text: String, position: Position },
    Expression(Expression),
}
