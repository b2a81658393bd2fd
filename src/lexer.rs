//! Hand-rolled scanner turning source text into a flat, finite token stream.
//!
//! A `Peekable<Chars>` walked left to right, tracking a running byte offset,
//! emitting the token set this language needs.

use std::collections::HashMap;
use std::iter::Peekable;
use std::str::Chars;

use once_cell::sync::Lazy;

/// Byte offset of a token's first character within the source text.
pub type Position = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Integer,
    Decimal,
    Str,
    True,
    False,
    Nil,
    Let,
    Mut,
    If,
    Else,
    Ident,
    Comment,
    Plus,
    Minus,
    Star,
    Slash,
    Assign,
    Gt,
    Lt,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    LParen,
    RParen,
    Semicolon,
    Comma,
    Colon,
    Pipe,
    EqEq,
    NotEq,
    Gte,
    Lte,
    AndAnd,
    OrOr,
    PipeGt,
    GtGt,
    HashBrace,
    Eof,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub position: Position,
}

impl Token {
    fn new(kind: TokenKind, literal: impl Into<String>, position: Position) -> Self {
        Self {
            kind,
            literal: literal.into(),
            position,
        }
    }
}

/// Two-character operators, matched greedily before any single-character
/// punctuation. Built once and reused for every `Lexer::lex` call.
static TWO_CHAR_OPERATORS: Lazy<HashMap<&'static str, TokenKind>> = Lazy::new(|| {
    use TokenKind::*;
    HashMap::from([
        ("==", EqEq),
        ("!=", NotEq),
        (">=", Gte),
        ("<=", Lte),
        ("&&", AndAnd),
        ("||", OrOr),
        ("|>", PipeGt),
        (">>", GtGt),
        ("#{", HashBrace),
    ])
});

fn keyword(ident: &str) -> Option<TokenKind> {
    use TokenKind::*;
    match ident {
        "let" => Some(Let),
        "mut" => Some(Mut),
        "if" => Some(If),
        "else" => Some(Else),
        "true" => Some(True),
        "false" => Some(False),
        "nil" => Some(Nil),
        _ => None,
    }
}

pub struct Lexer<'a> {
    source: &'a str,
    chars: Peekable<Chars<'a>>,
    offset: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.chars().peekable(),
            offset: 0,
        }
    }

    /// Scans the whole source into a flat, EOF-terminated token sequence.
    pub fn lex(source: &'a str) -> Vec<Token> {
        let mut lexer = Self::new(source);
        let mut tokens = vec![];

        while let Some(token) = lexer.next_token() {
            tokens.push(token);
        }

        tokens.push(Token::new(TokenKind::Eof, "", lexer.offset));
        tokens
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn peek_at(&self, distance: usize) -> Option<char> {
        self.source[self.offset..].chars().nth(distance)
    }

    fn bump(&mut self) -> Option<char> {
        let next = self.chars.next()?;
        self.offset += next.len_utf8();
        Some(next)
    }

    fn next_token(&mut self) -> Option<Token> {
        self.skip_whitespace();

        let start = self.offset;
        let next = self.peek()?;

        let token = match next {
            '/' if self.peek_at(1) == Some('/') => self.lex_comment(start),
            '"' => self.lex_string(start),
            '0'..='9' => self.lex_number(start),
            c if is_ident_start(c) => self.lex_ident(start),
            _ => {
                if let Some(token) = self.lex_operator(start) {
                    token
                } else {
                    // Unknown character: skip it silently and keep scanning.
                    self.bump();
                    return self.next_token();
                }
            }
        };

        Some(token)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.bump();
        }
    }

    fn lex_comment(&mut self, start: Position) -> Token {
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            text.push(c);
            self.bump();
        }
        Token::new(TokenKind::Comment, text, start)
    }

    fn lex_string(&mut self, start: Position) -> Token {
        let mut text = String::from("\"");
        self.bump(); // opening quote

        while let Some(c) = self.peek() {
            if c == '"' {
                text.push(c);
                self.bump();
                break;
            }
            if c == '\\' {
                text.push(c);
                self.bump();
                if let Some(escaped) = self.peek() {
                    text.push(escaped);
                    self.bump();
                }
                continue;
            }
            text.push(c);
            self.bump();
        }

        Token::new(TokenKind::Str, text, start)
    }

    fn lex_number(&mut self, start: Position) -> Token {
        let mut text = String::new();
        let mut seen_dot = false;

        while let Some(c) = self.peek() {
            match c {
                '0'..='9' | '_' => {
                    text.push(c);
                    self.bump();
                }
                '.' if !seen_dot => {
                    seen_dot = true;
                    text.push(c);
                    self.bump();
                }
                _ => break,
            }
        }

        let kind = if seen_dot {
            TokenKind::Decimal
        } else {
            TokenKind::Integer
        };
        Token::new(kind, text, start)
    }

    fn lex_ident(&mut self, start: Position) -> Token {
        let mut text = String::new();

        while matches!(self.peek(), Some(c) if is_ident_continue(c)) {
            text.push(self.bump().unwrap());
        }

        let kind = keyword(&text).unwrap_or(TokenKind::Ident);
        Token::new(kind, text, start)
    }

    fn lex_operator(&mut self, start: Position) -> Option<Token> {
        if let Some(two) = self.peek_two() {
            if let Some(kind) = TWO_CHAR_OPERATORS.get(two.as_str()) {
                self.bump();
                self.bump();
                return Some(Token::new(*kind, two, start));
            }
        }

        use TokenKind::*;
        let kind = match self.peek()? {
            '+' => Plus,
            '-' => Minus,
            '*' => Star,
            '/' => Slash,
            '=' => Assign,
            '>' => Gt,
            '<' => Lt,
            '{' => LBrace,
            '}' => RBrace,
            '[' => LBracket,
            ']' => RBracket,
            '(' => LParen,
            ')' => RParen,
            ';' => Semicolon,
            ',' => Comma,
            ':' => Colon,
            '|' => Pipe,
            _ => return None,
        };

        let c = self.bump().unwrap();
        Some(Token::new(kind, c.to_string(), start))
    }

    fn peek_two(&self) -> Option<String> {
        let rest = &self.source[self.offset..];
        let mut chars = rest.chars();
        let a = chars.next()?;
        let b = chars.next()?;
        Some([a, b].iter().collect())
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::lex(source).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn lexes_let_binding() {
        use TokenKind::*;
        assert_eq!(kinds("let x = 1;"), vec![Let, Ident, Assign, Integer, Semicolon, Eof]);
    }

    #[test]
    fn lexes_mut_keyword() {
        use TokenKind::*;
        assert_eq!(kinds("let mut c = 0;"), vec![Let, Mut, Ident, Assign, Integer, Semicolon, Eof]);
    }

    #[test]
    fn lexes_underscored_integer() {
        let tokens = Lexer::lex("1_000_000");
        assert_eq!(tokens[0].kind, TokenKind::Integer);
        assert_eq!(tokens[0].literal, "1_000_000");
    }

    #[test]
    fn lexes_decimal_and_stops_on_second_dot() {
        // The run "1.5" is consumed as one Decimal token; the leftover "." is
        // not itself a valid token and is skipped, leaving a separate Integer.
        let tokens = Lexer::lex("1.5.6");
        assert_eq!(tokens[0].kind, TokenKind::Decimal);
        assert_eq!(tokens[0].literal, "1.5");
        assert_eq!(tokens[1].kind, TokenKind::Integer);
        assert_eq!(tokens[1].literal, "6");
    }

    #[test]
    fn lexes_string_with_escapes_raw() {
        let tokens = Lexer::lex(r#""a\"b\nc""#);
        assert_eq!(tokens[0].kind, TokenKind::Str);
        assert_eq!(tokens[0].literal, r#""a\"b\nc""#);
    }

    #[test]
    fn lexes_comment_full_line() {
        let tokens = Lexer::lex("// hello world\n1");
        assert_eq!(tokens[0].kind, TokenKind::Comment);
        assert_eq!(tokens[0].literal, "// hello world");
        assert_eq!(tokens[1].kind, TokenKind::Integer);
    }

    #[test]
    fn two_char_operators_match_greedily() {
        use TokenKind::*;
        assert_eq!(kinds("|> >> == != >= <= && || #{"), vec![
            PipeGt, GtGt, EqEq, NotEq, Gte, Lte, AndAnd, OrOr, HashBrace, Eof
        ]);
    }

    #[test]
    fn bare_hash_is_skipped_silently() {
        let tokens = Lexer::lex("# 1");
        assert_eq!(tokens[0].kind, TokenKind::Integer);
    }

    #[test]
    fn unknown_characters_are_skipped() {
        let tokens = Lexer::lex("1 @ 2");
        assert_eq!(tokens.iter().map(|t| t.kind).collect::<Vec<_>>(), vec![
            TokenKind::Integer, TokenKind::Integer, TokenKind::Eof
        ]);
    }
}
