use super::Position;

/// Digit-underscore run, e.g. `1_000`. Kept as text; the evaluator strips
/// underscores and decodes it.
#[derive(Debug, Clone, PartialEq)]
pub struct IntegerLit {
    pub text: String,
    pub position: Position,
}

/// Digit-underscore-dot run, e.g. `1_000.5`.
#[derive(Debug, Clone, PartialEq)]
pub struct DecimalLit {
    pub text: String,
    pub position: Position,
}

/// Already-unescaped string value (the parser performs the `\" \\ \n \t`
/// substitution while building this node).
#[derive(Debug, Clone, PartialEq)]
pub struct StringLit {
    pub value: String,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BooleanLit {
    pub value: bool,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NilLit {
    pub position: Position,
}
