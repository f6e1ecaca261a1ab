//! Tokenizer for the formula grammar: numbers, cell references, `+ - * /`,
//! parentheses.

use crate::position::Position;
use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    Number(f64),
    Reference(Position),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{n}"),
            Token::Reference(p) => write!(f, "{p}"),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Eof => write!(f, "<eof>"),
        }
    }
}

pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            chars: input.chars().peekable(),
        }
    }

    /// Tokenize the entire input, or fail at the offending character.
    pub fn tokenize(input: &str) -> Result<Vec<Token>, String> {
        let mut lexer = Lexer::new(input);
        let mut tokens = Vec::new();
        loop {
            let tok = lexer.next_token()?;
            let done = tok == Token::Eof;
            tokens.push(tok);
            if done {
                break;
            }
        }
        Ok(tokens)
    }

    fn next_token(&mut self) -> Result<Token, String> {
        self.skip_whitespace();
        let Some(&c) = self.chars.peek() else {
            return Ok(Token::Eof);
        };

        match c {
            '+' => {
                self.chars.next();
                Ok(Token::Plus)
            }
            '-' => {
                self.chars.next();
                Ok(Token::Minus)
            }
            '*' => {
                self.chars.next();
                Ok(Token::Star)
            }
            '/' => {
                self.chars.next();
                Ok(Token::Slash)
            }
            '(' => {
                self.chars.next();
                Ok(Token::LParen)
            }
            ')' => {
                self.chars.next();
                Ok(Token::RParen)
            }
            c if c.is_ascii_digit() || c == '.' => Ok(Token::Number(self.lex_number()?)),
            c if c.is_ascii_alphabetic() => Ok(Token::Reference(self.lex_reference())),
            other => Err(format!("unexpected character '{other}'")),
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.chars.peek(), Some(c) if c.is_whitespace()) {
            self.chars.next();
        }
    }

    fn lex_number(&mut self) -> Result<f64, String> {
        let mut text = String::new();
        while matches!(self.chars.peek(), Some(c) if c.is_ascii_digit() || *c == '.') {
            text.push(self.chars.next().unwrap());
        }
        text.parse::<f64>()
            .map_err(|_| format!("invalid number literal '{text}'"))
    }

    fn lex_reference(&mut self) -> Position {
        let mut text = String::new();
        while matches!(self.chars.peek(), Some(c) if c.is_ascii_alphanumeric()) {
            text.push(self.chars.next().unwrap());
        }
        Position::parse(&text)
    }
}
