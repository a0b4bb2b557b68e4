use nix::errno::Errno;
use thiserror::Error;

/// Failures that end the process interpreting a command tree.
#[derive(Error, Debug)]
pub enum ExecError {
    #[error("{0}: command not found")]
    CommandNotFound(String),

    #[error("{program}: {source}")]
    Exec {
        program: String,
        #[source]
        source: Errno,
    },

    #[error("{0}: argument contains a NUL byte")]
    NulByte(String),

    #[error("{path}: {source}")]
    Redirect {
        path: String,
        #[source]
        source: Errno,
    },

    #[error("pipe error: {0}")]
    Pipe(#[source] Errno),

    #[error("fork failed: {0}")]
    Fork(#[source] Errno),

    #[error("cannot rebind descriptor: {0}")]
    Dup(#[source] Errno),
}

impl ExecError {
    pub fn exit_code(&self) -> i32 {
        match self {
            ExecError::CommandNotFound(_) => 127,
            ExecError::Exec { .. } | ExecError::NulByte(_) => 126,
            _ => 1,
        }
    }
}
