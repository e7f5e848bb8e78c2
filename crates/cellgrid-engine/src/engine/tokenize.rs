//! Formula tokenizer.
//!
//! Splits formula text on `(`, `)`, `,`, `=` and whitespace. Each delimiter
//! except whitespace becomes its own token; any run of other characters is a
//! single [`Token::Word`]. `:` is not a delimiter, so `B1:C5` stays one word.

use std::collections::VecDeque;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    Open,
    Close,
    Comma,
    Equals,
    Word(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Open => f.write_str("("),
            Token::Close => f.write_str(")"),
            Token::Comma => f.write_str(","),
            Token::Equals => f.write_str("="),
            Token::Word(word) => f.write_str(word),
        }
    }
}

fn delimiter(ch: char) -> Option<Token> {
    match ch {
        '(' => Some(Token::Open),
        ')' => Some(Token::Close),
        ',' => Some(Token::Comma),
        '=' => Some(Token::Equals),
        _ => None,
    }
}

/// Tokenize formula text into a queue consumed from the front.
pub fn tokenize(input: &str) -> VecDeque<Token> {
    let mut tokens = VecDeque::new();
    let mut current = String::new();

    for ch in input.chars() {
        let delim = delimiter(ch);
        if delim.is_none() && !ch.is_whitespace() {
            current.push(ch);
            continue;
        }

        if !current.is_empty() {
            tokens.push_back(Token::Word(std::mem::take(&mut current)));
        }
        if let Some(token) = delim {
            tokens.push_back(token);
        }
    }

    if !current.is_empty() {
        tokens.push_back(Token::Word(current));
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(s: &str) -> Token {
        Token::Word(s.to_string())
    }

    #[test]
    fn test_tokenize_call() {
        let tokens: Vec<Token> = tokenize("sum(1,2)").into();
        assert_eq!(
            tokens,
            vec![word("sum"), Token::Open, word("1"), Token::Comma, word("2"), Token::Close]
        );
    }

    #[test]
    fn test_range_is_single_token() {
        let tokens: Vec<Token> = tokenize("mean(B1:C5, 7)").into();
        assert_eq!(
            tokens,
            vec![
                word("mean"),
                Token::Open,
                word("B1:C5"),
                Token::Comma,
                word("7"),
                Token::Close
            ]
        );
    }

    #[test]
    fn test_whitespace_only_separates() {
        let tokens: Vec<Token> = tokenize("  add ( 1\t 2 )\n").into();
        assert_eq!(
            tokens,
            vec![word("add"), Token::Open, word("1"), word("2"), Token::Close]
        );
    }

    #[test]
    fn test_equals_is_a_token() {
        let tokens: Vec<Token> = tokenize("=A1=").into();
        assert_eq!(tokens, vec![Token::Equals, word("A1"), Token::Equals]);
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn test_non_ascii_words() {
        let tokens: Vec<Token> = tokenize("本日は 晴天").into();
        assert_eq!(tokens, vec![word("本日は"), word("晴天")]);
    }
}
