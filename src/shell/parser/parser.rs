use log::trace;
use thiserror::Error;

use super::ast::{Node, RedirectKind};
use super::lexer::{Lexer, Token};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("missing file for redirection")]
    MissingRedirectTarget,
    #[error("syntax error near `{found}`")]
    Syntax { found: String },
}

struct Redirection {
    kind: RedirectKind,
    target: String,
}

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current_token: Token,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Lexer::new(input);
        let current_token = lexer.next_token();
        Parser {
            lexer,
            current_token,
        }
    }

    fn next_token(&mut self) {
        self.current_token = self.lexer.next_token();
    }

    /// line := pipeline End
    pub fn parse_line(&mut self) -> Result<Node, ParseError> {
        let node = self.parse_pipeline()?;
        match &self.current_token {
            Token::End => Ok(node),
            other => Err(ParseError::Syntax {
                found: other.to_string(),
            }),
        }
    }

    /// pipeline := simple_cmd ( '|' pipeline )?
    fn parse_pipeline(&mut self) -> Result<Node, ParseError> {
        let left = self.parse_simple_command()?;
        if self.current_token != Token::Pipe {
            return Ok(left);
        }

        self.next_token(); // skip '|'
        let right = self.parse_pipeline()?;
        Ok(Node::pipeline(left, right))
    }

    /// simple_cmd := redir* word* redir*, redirections interleaved freely with words
    fn parse_simple_command(&mut self) -> Result<Node, ParseError> {
        let mut argv = Vec::new();
        let mut redirections = Vec::new();

        loop {
            match &self.current_token {
                Token::Pipe | Token::End => break,
                Token::RedirectIn => redirections.push(self.parse_redirection(RedirectKind::In)?),
                Token::RedirectOut => {
                    redirections.push(self.parse_redirection(RedirectKind::Out)?)
                }
                Token::Word(word) => {
                    argv.push(word.clone());
                    self.next_token();
                }
            }
        }

        trace!("simple command {:?} with {} redirection(s)", argv, redirections.len());

        // The first redirection seen becomes the outermost node.
        let node = redirections
            .into_iter()
            .rev()
            .fold(Node::simple(argv), |inner, redirection| {
                Node::redirect(redirection.kind, redirection.target, inner)
            });
        Ok(node)
    }

    /// redir := ('<' | '>') word
    fn parse_redirection(&mut self, kind: RedirectKind) -> Result<Redirection, ParseError> {
        self.next_token(); // skip the operator

        match &self.current_token {
            Token::Word(target) => {
                let redirection = Redirection {
                    kind,
                    target: target.clone(),
                };
                self.next_token();
                Ok(redirection)
            }
            _ => Err(ParseError::MissingRedirectTarget),
        }
    }
}

pub fn parse_line(text: &str) -> Result<Node, ParseError> {
    Parser::new(text).parse_line()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(clippy::unwrap_used)]
    fn parse(text: &str) -> Node {
        parse_line(text).unwrap()
    }

    #[test]
    fn test_simple_command() {
        assert_eq!(parse("ls -l"), Node::simple(["ls", "-l"]));
    }

    #[test]
    fn test_empty_line() {
        assert_eq!(parse(""), Node::Simple { argv: vec![] });
        assert_eq!(parse(" \t \n"), Node::Simple { argv: vec![] });
    }

    #[test]
    fn test_pipeline_is_right_nested() {
        assert_eq!(
            parse("a | b -x | c"),
            Node::pipeline(
                Node::simple(["a"]),
                Node::pipeline(Node::simple(["b", "-x"]), Node::simple(["c"])),
            )
        );
    }

    #[test]
    fn test_redirection() {
        assert_eq!(
            parse("echo hello > output.txt"),
            Node::redirect(
                RedirectKind::Out,
                "output.txt",
                Node::simple(["echo", "hello"])
            )
        );
    }

    #[test]
    fn test_first_redirection_is_outermost() {
        assert_eq!(
            parse("cat < in.txt > out.txt"),
            Node::redirect(
                RedirectKind::In,
                "in.txt",
                Node::redirect(RedirectKind::Out, "out.txt", Node::simple(["cat"])),
            )
        );
    }

    #[test]
    fn test_redirections_interleaved_with_words() {
        assert_eq!(
            parse("> out.txt sort < in.txt -r"),
            Node::redirect(
                RedirectKind::Out,
                "out.txt",
                Node::redirect(RedirectKind::In, "in.txt", Node::simple(["sort", "-r"])),
            )
        );
    }

    #[test]
    fn test_redirections_stay_on_their_stage() {
        assert_eq!(
            parse("cat < in.txt | wc -l > out.txt"),
            Node::pipeline(
                Node::redirect(RedirectKind::In, "in.txt", Node::simple(["cat"])),
                Node::redirect(RedirectKind::Out, "out.txt", Node::simple(["wc", "-l"])),
            )
        );
    }

    #[test]
    fn test_bare_pipe_yields_empty_commands() {
        assert_eq!(
            parse("| wc"),
            Node::pipeline(Node::Simple { argv: vec![] }, Node::simple(["wc"]))
        );
        assert_eq!(
            parse("ls |"),
            Node::pipeline(Node::simple(["ls"]), Node::Simple { argv: vec![] })
        );
    }

    #[test]
    fn test_missing_redirect_target() {
        assert_eq!(
            parse_line("echo hello >"),
            Err(ParseError::MissingRedirectTarget)
        );
        assert_eq!(
            parse_line("cat < | wc"),
            Err(ParseError::MissingRedirectTarget)
        );
        assert_eq!(
            parse_line("cat > < in"),
            Err(ParseError::MissingRedirectTarget)
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ParseError::MissingRedirectTarget.to_string(),
            "missing file for redirection"
        );
        assert_eq!(
            ParseError::Syntax {
                found: "|".to_string()
            }
            .to_string(),
            "syntax error near `|`"
        );
    }

    #[test]
    fn test_argv_round_trip() {
        let line = "grep -v  foo.txt\t| tr a-z A-Z |sort -k2 ./x";
        let tree = parse(line);

        let words: Vec<String> = tree
            .argv_lists()
            .into_iter()
            .flatten()
            .cloned()
            .collect();
        let expected: Vec<String> = line
            .split(|c: char| c.is_ascii_whitespace() || c == '|')
            .filter(|w| !w.is_empty())
            .map(String::from)
            .collect();
        assert_eq!(words, expected);
    }

    #[test]
    fn test_display_reparses_to_same_tree() {
        let tree = parse("<in sort -r >out | uniq -c | head -n 3 > top.txt");
        assert_eq!(parse(&tree.to_string()), tree);
    }
}
