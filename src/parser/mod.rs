//! Pratt-style, precedence-climbing parser: a flat token stream in, a
//! tagged-variant AST out. No teacher module does real precedence climbing
//! (its live parser is `pest`-grammar-driven); this follows the general
//! shape found throughout the wider example pack's hand-rolled parsers —
//! one recursive-descent function per precedence level, current/peek token
//! tracking, no backtracking except the narrow bare-operator-identifier
//! lookahead noted below.

use crate::ast::*;
use crate::error::ParseError;
use crate::lexer::{Lexer, Token, TokenKind};

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

type PResult<T> = Result<T, ParseError>;

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    pub fn parse_source(source: &str) -> PResult<Program> {
        Self::new(Lexer::lex(source)).parse_program()
    }

    pub fn parse_program(&mut self) -> PResult<Program> {
        let mut statements = vec![];
        while !self.at(TokenKind::Eof) {
            statements.push(self.parse_statement()?);
        }
        Ok(Program { statements })
    }

    // ---- token stream helpers -------------------------------------------------

    fn current(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn peek_kind(&self, distance: usize) -> TokenKind {
        self.tokens
            .get(self.pos + distance)
            .map(|t| t.kind)
            .unwrap_or(TokenKind::Eof)
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    fn advance(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, kind: TokenKind) -> PResult<Token> {
        if self.at(kind) {
            Ok(self.advance())
        } else {
            Err(ParseError::new(format!(
                "expected {:?}, found {:?} at byte {}",
                kind,
                self.current().kind,
                self.current().position
            )))
        }
    }

    // ---- statements -------------------------------------------------------

    fn parse_statement(&mut self) -> PResult<Statement> {
        if self.at(TokenKind::Comment) {
            let token = self.advance();
            return Ok(Statement::Comment {
                text: token.literal,
                position: token.position,
            });
        }

        if self.at(TokenKind::Ident) && self.peek_kind(1) == TokenKind::Assign {
            let name_token = self.advance();
            self.expect(TokenKind::Assign)?;
            let value = self.parse_expression()?;
            self.consume_optional_semicolon();
            return Ok(Statement::Expression(Expression::Assignment(Assignment {
                name: name_token.literal,
                value: Box::new(value),
                position: name_token.position,
            })));
        }

        let expr = self.parse_expression()?;
        self.consume_optional_semicolon();
        Ok(Statement::Expression(expr))
    }

    fn consume_optional_semicolon(&mut self) {
        if self.at(TokenKind::Semicolon) {
            self.advance();
        }
    }

    fn parse_brace_block(&mut self) -> PResult<Block> {
        let open = self.expect(TokenKind::LBrace)?;
        let mut statements = vec![];
        while !self.at(TokenKind::RBrace) && !self.at(TokenKind::Eof) {
            statements.push(self.parse_statement()?);
        }
        self.expect(TokenKind::RBrace)?;
        Ok(Block {
            statements,
            position: open.position,
        })
    }

    // ---- expressions, lowest to highest precedence -------------------------

    fn parse_expression(&mut self) -> PResult<Expression> {
        self.parse_thread()
    }

    /// Level 1: `x |> f |> g`, left-associative, folded into one node.
    fn parse_thread(&mut self) -> PResult<Expression> {
        let position = self.current().position;
        let initial = self.parse_compose()?;
        if !self.at(TokenKind::PipeGt) {
            return Ok(initial);
        }
        let mut functions = vec![];
        while self.at(TokenKind::PipeGt) {
            self.advance();
            functions.push(self.parse_compose()?);
        }
        Ok(Expression::Thread(FunctionThread {
            initial: Box::new(initial),
            functions,
            position,
        }))
    }

    /// Level 2: `f >> g >> h`, packed into one node of >= 2 functions.
    fn parse_compose(&mut self) -> PResult<Expression> {
        let position = self.current().position;
        let first = self.parse_or()?;
        if !self.at(TokenKind::GtGt) {
            return Ok(first);
        }
        let mut functions = vec![first];
        while self.at(TokenKind::GtGt) {
            self.advance();
            functions.push(self.parse_or()?);
        }
        Ok(Expression::Composition(FunctionComposition {
            functions,
            position,
        }))
    }

    /// Level 3: `||`, left-associative. A `||` encountered here is always a
    /// binary operator — the zero-arg function literal is only recognised
    /// at expression-start, i.e. inside `parse_primary`.
    fn parse_or(&mut self) -> PResult<Expression> {
        self.parse_left_assoc_binary(Self::parse_and, &[(TokenKind::OrOr, InfixOp::Or)])
    }

    fn parse_and(&mut self) -> PResult<Expression> {
        self.parse_left_assoc_binary(Self::parse_equality, &[(TokenKind::AndAnd, InfixOp::And)])
    }

    fn parse_equality(&mut self) -> PResult<Expression> {
        self.parse_left_assoc_binary(
            Self::parse_comparison,
            &[
                (TokenKind::EqEq, InfixOp::Equal),
                (TokenKind::NotEq, InfixOp::NotEqual),
            ],
        )
    }

    fn parse_comparison(&mut self) -> PResult<Expression> {
        self.parse_left_assoc_binary(
            Self::parse_additive,
            &[
                (TokenKind::Gt, InfixOp::GreaterThan),
                (TokenKind::Lt, InfixOp::LessThan),
                (TokenKind::Gte, InfixOp::GreaterThanOrEqual),
                (TokenKind::Lte, InfixOp::LessThanOrEqual),
            ],
        )
    }

    fn parse_additive(&mut self) -> PResult<Expression> {
        self.parse_left_assoc_binary(
            Self::parse_multiplicative,
            &[
                (TokenKind::Plus, InfixOp::Add),
                (TokenKind::Minus, InfixOp::Subtract),
            ],
        )
    }

    fn parse_multiplicative(&mut self) -> PResult<Expression> {
        self.parse_left_assoc_binary(
            Self::parse_unary,
            &[
                (TokenKind::Star, InfixOp::Multiply),
                (TokenKind::Slash, InfixOp::Divide),
            ],
        )
    }

    fn parse_left_assoc_binary(
        &mut self,
        mut operand: impl FnMut(&mut Self) -> PResult<Expression>,
        operators: &[(TokenKind, InfixOp)],
    ) -> PResult<Expression> {
        let position = self.current().position;
        let mut left = operand(self)?;
        loop {
            let Some(&(_, op)) = operators.iter().find(|(kind, _)| self.at(*kind)) else {
                break;
            };
            self.advance();
            let right = operand(self)?;
            left = Expression::Infix(Infix {
                operator: op,
                left: Box::new(left),
                right: Box::new(right),
                position,
            });
        }
        Ok(left)
    }

    /// Level 9: prefix `-`. A `-` is only a negation when it is immediately
    /// followed by something that can start an operand; otherwise it falls
    /// through to `parse_primary`, which treats a bare operator symbol as an
    /// identifier (so `fold(0, -, xs)` works).
    fn parse_unary(&mut self) -> PResult<Expression> {
        if self.at(TokenKind::Minus) && can_start_primary(self.peek_kind(1)) {
            let token = self.advance();
            let operand = self.parse_unary()?;
            return Ok(Expression::Prefix(Prefix {
                operator: PrefixOp::Negate,
                operand: Box::new(operand),
                position: token.position,
            }));
        }
        self.parse_postfix()
    }

    /// Level 10: postfix indexing and call, chained left-associatively.
    fn parse_postfix(&mut self) -> PResult<Expression> {
        let mut expr = self.parse_primary()?;
        loop {
            match self.current().kind {
                TokenKind::LParen => {
                    let position = self.advance().position;
                    let arguments = self.parse_call_arguments()?;
                    expr = Expression::Call(Call {
                        callee: Box::new(expr),
                        arguments,
                        position,
                    });
                }
                TokenKind::LBracket => {
                    let position = self.advance().position;
                    let index = self.parse_expression()?;
                    self.expect(TokenKind::RBracket)?;
                    expr = Expression::Index(Index {
                        target: Box::new(expr),
                        index: Box::new(index),
                        position,
                    });
                }
                _ => break,
            }
        }
        Ok(expr)
    }

    fn parse_call_arguments(&mut self) -> PResult<Vec<Expression>> {
        let mut arguments = vec![];
        if !self.at(TokenKind::RParen) {
            arguments.push(self.parse_expression()?);
            while self.at(TokenKind::Comma) {
                self.advance();
                if self.at(TokenKind::RParen) {
                    break;
                }
                arguments.push(self.parse_expression()?);
            }
        }
        self.expect(TokenKind::RParen)?;
        Ok(arguments)
    }

    /// Level 11: literals, identifiers, grouping, collections, `let`/`if`,
    /// function literals, and bare operator symbols used as identifiers.
    fn parse_primary(&mut self) -> PResult<Expression> {
        let token = self.current().clone();
        match token.kind {
            TokenKind::Integer => {
                self.advance();
                Ok(Expression::Integer(IntegerLit {
                    text: token.literal,
                    position: token.position,
                }))
            }
            TokenKind::Decimal => {
                self.advance();
                Ok(Expression::Decimal(DecimalLit {
                    text: token.literal,
                    position: token.position,
                }))
            }
            TokenKind::Str => {
                self.advance();
                Ok(Expression::Str(StringLit {
                    value: unescape(&token.literal),
                    position: token.position,
                }))
            }
            TokenKind::True | TokenKind::False => {
                self.advance();
                Ok(Expression::Boolean(BooleanLit {
                    value: token.kind == TokenKind::True,
                    position: token.position,
                }))
            }
            TokenKind::Nil => {
                self.advance();
                Ok(Expression::Nil(NilLit {
                    position: token.position,
                }))
            }
            TokenKind::Ident => {
                self.advance();
                Ok(Expression::Identifier(Identifier {
                    name: token.literal,
                    position: token.position,
                }))
            }
            TokenKind::Plus | TokenKind::Minus | TokenKind::Star | TokenKind::Slash => {
                self.advance();
                Ok(Expression::Identifier(Identifier {
                    name: token.literal,
                    position: token.position,
                }))
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expression()?;
                self.expect(TokenKind::RParen)?;
                Ok(inner)
            }
            TokenKind::LBracket => self.parse_list(),
            TokenKind::LBrace => self.parse_set(),
            TokenKind::HashBrace => self.parse_dictionary(),
            TokenKind::Pipe => self.parse_function(false),
            TokenKind::OrOr => self.parse_function(true),
            TokenKind::Let => self.parse_let(),
            TokenKind::If => self.parse_if(),
            other => Err(ParseError::new(format!(
                "unexpected token {other:?} at byte {}",
                token.position
            ))),
        }
    }

    fn parse_list(&mut self) -> PResult<Expression> {
        let open = self.expect(TokenKind::LBracket)?;
        let items = self.parse_comma_separated(TokenKind::RBracket)?;
        Ok(Expression::List(ListLit {
            items,
            position: open.position,
        }))
    }

    fn parse_set(&mut self) -> PResult<Expression> {
        let open = self.expect(TokenKind::LBrace)?;
        let items = self.parse_comma_separated(TokenKind::RBrace)?;
        Ok(Expression::Set(SetLit {
            items,
            position: open.position,
        }))
    }

    fn parse_comma_separated(&mut self, end: TokenKind) -> PResult<Vec<Expression>> {
        let mut items = vec![];
        if !self.at(end) {
            items.push(self.parse_expression()?);
            while self.at(TokenKind::Comma) {
                self.advance();
                if self.at(end) {
                    break;
                }
                items.push(self.parse_expression()?);
            }
        }
        self.expect(end)?;
        Ok(items)
    }

    fn parse_dictionary(&mut self) -> PResult<Expression> {
        let open = self.expect(TokenKind::HashBrace)?;
        let mut pairs = vec![];
        if !self.at(TokenKind::RBrace) {
            pairs.push(self.parse_dictionary_pair()?);
            while self.at(TokenKind::Comma) {
                self.advance();
                if self.at(TokenKind::RBrace) {
                    break;
                }
                pairs.push(self.parse_dictionary_pair()?);
            }
        }
        self.expect(TokenKind::RBrace)?;
        Ok(Expression::Dictionary(DictionaryLit {
            pairs,
            position: open.position,
        }))
    }

    fn parse_dictionary_pair(&mut self) -> PResult<(Expression, Expression)> {
        let key = self.parse_expression()?;
        self.expect(TokenKind::Colon)?;
        let value = self.parse_expression()?;
        Ok((key, value))
    }

    fn parse_function(&mut self, zero_arg: bool) -> PResult<Expression> {
        let position = self.current().position;
        let parameters = if zero_arg {
            self.expect(TokenKind::OrOr)?;
            vec![]
        } else {
            self.expect(TokenKind::Pipe)?;
            let mut params = vec![];
            if !self.at(TokenKind::Pipe) {
                params.push(self.expect(TokenKind::Ident)?.literal);
                while self.at(TokenKind::Comma) {
                    self.advance();
                    params.push(self.expect(TokenKind::Ident)?.literal);
                }
            }
            self.expect(TokenKind::Pipe)?;
            params
        };

        let body = if self.at(TokenKind::LBrace) {
            self.parse_brace_block()?
        } else {
            let expr_position = self.current().position;
            let expr = self.parse_expression()?;
            Block {
                statements: vec![Statement::Expression(expr)],
                position: expr_position,
            }
        };

        Ok(Expression::Function(FunctionLit {
            parameters,
            body,
            position,
        }))
    }

    fn parse_let(&mut self) -> PResult<Expression> {
        let position = self.expect(TokenKind::Let)?.position;
        let mutable = if self.at(TokenKind::Mut) {
            self.advance();
            true
        } else {
            false
        };
        let name = self.expect(TokenKind::Ident)?.literal;
        self.expect(TokenKind::Assign)?;
        let value = Box::new(self.parse_expression()?);

        Ok(if mutable {
            Expression::MutableLet(MutableLet {
                name,
                value,
                position,
            })
        } else {
            Expression::Let(Let {
                name,
                value,
                position,
            })
        })
    }

    fn parse_if(&mut self) -> PResult<Expression> {
        let position = self.expect(TokenKind::If)?.position;
        let condition = Box::new(self.parse_expression()?);
        let consequence = self.parse_brace_block()?;
        let alternative = if self.at(TokenKind::Else) {
            self.advance();
            Some(self.parse_brace_block()?)
        } else {
            None
        };
        Ok(Expression::If(IfExpr {
            condition,
            consequence,
            alternative,
            position,
        }))
    }
}

/// Tokens that can legally open a new operand, used to disambiguate a bare
/// `-` (negation vs. the identifier form of the operator).
fn can_start_primary(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Integer
            | TokenKind::Decimal
            | TokenKind::Str
            | TokenKind::True
            | TokenKind::False
            | TokenKind::Nil
            | TokenKind::Ident
            | TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Star
            | TokenKind::Slash
            | TokenKind::LParen
            | TokenKind::LBracket
            | TokenKind::LBrace
            | TokenKind::HashBrace
            | TokenKind::Pipe
            | TokenKind::OrOr
            | TokenKind::Let
            | TokenKind::If
    )
}

/// Strips the surrounding quotes and substitutes the four escapes the
/// language defines; no others exist.
fn unescape(raw: &str) -> String {
    let inner = raw.strip_prefix('"').and_then(|s| s.strip_suffix('"')).unwrap_or(raw);
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('"') => out.push('"'),
                Some('\\') => out.push('\\'),
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}
