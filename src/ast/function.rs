use super::{Block, Position};

/// `|params| body` or `|| body`. The body is always a Block: the parser
/// wraps a bare expression body in a single-statement Block.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionLit {
    pub parameters: Vec<String>,
    pub body: Block,
    pub position: Position,
}
