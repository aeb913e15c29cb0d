use crate::ast::{CompareOp, Token};

/// Errors raised while turning query text into tokens.
///
/// Lexical failures propagate through the parser unmodified; the parser
/// never interprets or recovers from them.
#[derive(Debug, Clone, PartialEq)]
pub enum LexError {
    /// A character that cannot start any token
    UnexpectedChar { ch: char, position: usize },

    /// A string literal missing its closing quote
    UnterminatedString { position: usize },

    /// An unknown backslash escape inside a string literal
    InvalidEscape { ch: char, position: usize },

    /// An integer literal that does not fit a 64-bit value
    InvalidInteger { text: String, position: usize },
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LexError::UnexpectedChar { ch, position } => {
                write!(f, "Unexpected character '{}' at position {}", ch, position)
            }
            LexError::UnterminatedString { position } => {
                write!(f, "Unterminated string starting at position {}", position)
            }
            LexError::InvalidEscape { ch, position } => {
                write!(f, "Invalid escape sequence '\\{}' at position {}", ch, position)
            }
            LexError::InvalidInteger { text, position } => {
                write!(f, "Invalid integer literal '{}' at position {}", text, position)
            }
        }
    }
}

impl std::error::Error for LexError {}

pub struct Lexer {
    input: Vec<char>,
    position: usize,
    token_start: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
            token_start: 0,
        }
    }

    /// Offset (in characters) where the most recently returned token began.
    pub fn token_start(&self) -> usize {
        self.token_start
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_identifier(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if ch.is_alphanumeric() || ch == '_' {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    fn read_string(&mut self, quote: char) -> Result<String, LexError> {
        let start = self.position;
        let mut result = String::new();
        self.advance(); // Consume opening quote

        while let Some(ch) = self.current_char() {
            match ch {
                c if c == quote => {
                    self.advance();
                    return Ok(result);
                }
                '\\' => {
                    self.advance(); // Consume backslash
                    match self.current_char() {
                        Some('n') => result.push('\n'),
                        Some('t') => result.push('\t'),
                        Some('r') => result.push('\r'),
                        Some('"') => result.push('"'),
                        Some('\'') => result.push('\''),
                        Some('\\') => result.push('\\'),
                        Some(ch) => {
                            return Err(LexError::InvalidEscape {
                                ch,
                                position: self.position,
                            });
                        }
                        None => return Err(LexError::UnterminatedString { position: start }),
                    }
                    self.advance();
                }
                _ => {
                    result.push(ch);
                    self.advance();
                }
            }
        }

        Err(LexError::UnterminatedString { position: start })
    }

    fn read_number(&mut self) -> Result<Token, LexError> {
        let start = self.position;
        let mut number = String::new();

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                number.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        match number.parse::<i64>() {
            Ok(n) => Ok(Token::Integer(n)),
            Err(_) => Err(LexError::InvalidInteger {
                text: number,
                position: start,
            }),
        }
    }

    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();
        self.token_start = self.position;

        match self.current_char() {
            None => Ok(Token::Eof),
            Some('*') => {
                self.advance();
                Ok(Token::Star)
            }
            Some(',') => {
                self.advance();
                Ok(Token::Comma)
            }
            Some('(') => {
                self.advance();
                Ok(Token::LParen)
            }
            Some(')') => {
                self.advance();
                Ok(Token::RParen)
            }
            Some('=') => {
                if self.peek_char(1) == Some('=') {
                    self.advance();
                }
                self.advance();
                Ok(Token::Operator(CompareOp::Eq))
            }
            Some('!') => {
                if self.peek_char(1) == Some('=') {
                    self.advance();
                    self.advance();
                    Ok(Token::Operator(CompareOp::NotEq))
                } else {
                    Err(LexError::UnexpectedChar {
                        ch: '!',
                        position: self.position,
                    })
                }
            }
            Some('<') => {
                if self.peek_char(1) == Some('=') {
                    self.advance();
                    self.advance();
                    Ok(Token::Operator(CompareOp::LtEq))
                } else if self.peek_char(1) == Some('>') {
                    self.advance();
                    self.advance();
                    Ok(Token::Operator(CompareOp::NotEq))
                } else {
                    self.advance();
                    Ok(Token::Operator(CompareOp::Lt))
                }
            }
            Some('>') => {
                if self.peek_char(1) == Some('=') {
                    self.advance();
                    self.advance();
                    Ok(Token::Operator(CompareOp::GtEq))
                } else {
                    self.advance();
                    Ok(Token::Operator(CompareOp::Gt))
                }
            }
            Some('"') => Ok(Token::String(self.read_string('"')?)),
            Some('\'') => Ok(Token::String(self.read_string('\'')?)),
            Some(ch) if ch.is_alphabetic() || ch == '_' => {
                let ident = self.read_identifier();

                // Keywords are case-insensitive, SQL-style
                Ok(match ident.to_ascii_lowercase().as_str() {
                    "select" => Token::Select,
                    "from" => Token::From,
                    "where" => Token::Where,
                    "group" => Token::Group,
                    "by" => Token::By,
                    "order" => Token::Order,
                    "asc" => Token::Asc,
                    "desc" => Token::Desc,
                    "limit" => Token::Limit,
                    "and" => Token::And,
                    "or" => Token::Or,
                    "in" => Token::In,
                    "between" => Token::Between,
                    "as" => Token::As,
                    _ => Token::Identifier(ident),
                })
            }
            Some(ch) if ch.is_ascii_digit() => self.read_number(),
            Some(ch) => Err(LexError::UnexpectedChar {
                ch,
                position: self.position,
            }),
        }
    }
}

#[test]
fn test_keywords() {
    let mut lexer = Lexer::new("select FROM Where GROUP by ORDER asc DESC limit");
    assert_eq!(lexer.next_token(), Ok(Token::Select));
    assert_eq!(lexer.next_token(), Ok(Token::From));
    assert_eq!(lexer.next_token(), Ok(Token::Where));
    assert_eq!(lexer.next_token(), Ok(Token::Group));
    assert_eq!(lexer.next_token(), Ok(Token::By));
    assert_eq!(lexer.next_token(), Ok(Token::Order));
    assert_eq!(lexer.next_token(), Ok(Token::Asc));
    assert_eq!(lexer.next_token(), Ok(Token::Desc));
    assert_eq!(lexer.next_token(), Ok(Token::Limit));
    assert_eq!(lexer.next_token(), Ok(Token::Eof));
}

#[test]
fn test_operators() {
    let mut lexer = Lexer::new("= == != <> < > <= >=");
    assert_eq!(lexer.next_token(), Ok(Token::Operator(CompareOp::Eq)));
    assert_eq!(lexer.next_token(), Ok(Token::Operator(CompareOp::Eq)));
    assert_eq!(lexer.next_token(), Ok(Token::Operator(CompareOp::NotEq)));
    assert_eq!(lexer.next_token(), Ok(Token::Operator(CompareOp::NotEq)));
    assert_eq!(lexer.next_token(), Ok(Token::Operator(CompareOp::Lt)));
    assert_eq!(lexer.next_token(), Ok(Token::Operator(CompareOp::Gt)));
    assert_eq!(lexer.next_token(), Ok(Token::Operator(CompareOp::LtEq)));
    assert_eq!(lexer.next_token(), Ok(Token::Operator(CompareOp::GtEq)));
}

#[test]
fn test_simple_query() {
    let mut lexer = Lexer::new("SELECT ip, count(status) FROM access");
    assert_eq!(lexer.next_token(), Ok(Token::Select));
    assert_eq!(lexer.next_token(), Ok(Token::Identifier("ip".to_string())));
    assert_eq!(lexer.next_token(), Ok(Token::Comma));
    assert_eq!(lexer.next_token(), Ok(Token::Identifier("count".to_string())));
    assert_eq!(lexer.next_token(), Ok(Token::LParen));
    assert_eq!(lexer.next_token(), Ok(Token::Identifier("status".to_string())));
    assert_eq!(lexer.next_token(), Ok(Token::RParen));
    assert_eq!(lexer.next_token(), Ok(Token::From));
    assert_eq!(lexer.next_token(), Ok(Token::Identifier("access".to_string())));
    assert_eq!(lexer.next_token(), Ok(Token::Eof));
}
