use std::fmt;

const WHITESPACE: &[char] = &[' ', '\t', '\r', '\n', '\x0B'];
const SYMBOLS: &[char] = &['<', '|', '>'];

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Token {
    Word(String),
    Pipe,
    RedirectIn,
    RedirectOut,
    End,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Word(word) => write!(f, "{}", word),
            Token::Pipe => write!(f, "|"),
            Token::RedirectIn => write!(f, "<"),
            Token::RedirectOut => write!(f, ">"),
            Token::End => write!(f, "newline"),
        }
    }
}

/// Classifies the next token of `input` and returns it together with the
/// unconsumed remainder.
pub fn tokenize(input: &str) -> (Token, &str) {
    let input = input.trim_start_matches(WHITESPACE);
    let mut chars = input.chars();

    match chars.next() {
        None => (Token::End, input),
        Some('|') => (Token::Pipe, chars.as_str()),
        Some('<') => (Token::RedirectIn, chars.as_str()),
        Some('>') => (Token::RedirectOut, chars.as_str()),
        Some(_) => {
            let end = input
                .find(|c: char| WHITESPACE.contains(&c) || SYMBOLS.contains(&c))
                .unwrap_or(input.len());
            (Token::Word(input[..end].to_string()), &input[end..])
        }
    }
}

/// True when `line` holds no tokens at all.
pub fn is_blank(line: &str) -> bool {
    line.trim_matches(WHITESPACE).is_empty()
}

pub struct Lexer<'a> {
    rest: &'a str,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { rest: input }
    }

    pub fn next_token(&mut self) -> Token {
        let (token, rest) = tokenize(self.rest);
        self.rest = rest;
        token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(s: &str) -> Token {
        Token::Word(s.to_string())
    }

    #[test]
    fn test_simple_command() {
        let mut lexer = Lexer::new("ls -l");
        assert_eq!(lexer.next_token(), word("ls"));
        assert_eq!(lexer.next_token(), word("-l"));
        assert_eq!(lexer.next_token(), Token::End);
        assert_eq!(lexer.next_token(), Token::End);
    }

    #[test]
    fn test_pipe() {
        let mut lexer = Lexer::new("ls | grep foo");
        assert_eq!(lexer.next_token(), word("ls"));
        assert_eq!(lexer.next_token(), Token::Pipe);
        assert_eq!(lexer.next_token(), word("grep"));
        assert_eq!(lexer.next_token(), word("foo"));
        assert_eq!(lexer.next_token(), Token::End);
    }

    #[test]
    fn test_redirections_without_spaces() {
        let mut lexer = Lexer::new("cat<in.txt>out.txt|wc");
        assert_eq!(lexer.next_token(), word("cat"));
        assert_eq!(lexer.next_token(), Token::RedirectIn);
        assert_eq!(lexer.next_token(), word("in.txt"));
        assert_eq!(lexer.next_token(), Token::RedirectOut);
        assert_eq!(lexer.next_token(), word("out.txt"));
        assert_eq!(lexer.next_token(), Token::Pipe);
        assert_eq!(lexer.next_token(), word("wc"));
        assert_eq!(lexer.next_token(), Token::End);
    }

    #[test]
    fn test_whitespace_set() {
        let mut lexer = Lexer::new(" \t\x0Becho\r\nhi \n");
        assert_eq!(lexer.next_token(), word("echo"));
        assert_eq!(lexer.next_token(), word("hi"));
        assert_eq!(lexer.next_token(), Token::End);
    }

    #[test]
    fn test_quotes_are_plain_word_text() {
        let mut lexer = Lexer::new(r#"echo "a b""#);
        assert_eq!(lexer.next_token(), word("echo"));
        assert_eq!(lexer.next_token(), word("\"a"));
        assert_eq!(lexer.next_token(), word("b\""));
        assert_eq!(lexer.next_token(), Token::End);
    }

    #[test]
    fn test_tokenize_returns_remainder() {
        let (token, rest) = tokenize("  echo hello");
        assert_eq!(token, word("echo"));
        assert_eq!(rest, " hello");

        let (token, rest) = tokenize(">file");
        assert_eq!(token, Token::RedirectOut);
        assert_eq!(rest, "file");

        let (token, rest) = tokenize(" \t ");
        assert_eq!(token, Token::End);
        assert_eq!(rest, "");
    }

    #[test]
    fn test_is_blank_uses_token_whitespace() {
        assert!(is_blank(""));
        assert!(is_blank(" \t\r\n\x0B"));
        assert!(!is_blank("\u{a0}"));
        assert!(!is_blank("  |  "));
    }
}
