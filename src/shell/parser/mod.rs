mod ast;
mod lexer;
mod parser;

pub use ast::{Node, RedirectKind};
pub use lexer::is_blank;
pub use parser::parse_line;
