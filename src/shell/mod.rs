mod builtins;
mod executor;
mod parser;
mod readline;
mod shell;

pub use shell::Shell;
