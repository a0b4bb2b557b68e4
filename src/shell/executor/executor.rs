use std::convert::Infallible;
use std::ffi::CString;
use std::os::fd::{IntoRawFd, RawFd};
use std::process;

use log::debug;
use nix::errno::Errno;
use nix::fcntl::{open, OFlag};
use nix::sys::signal::{signal, SigHandler, Signal};
use nix::sys::stat::Mode;
use nix::unistd::{close, dup2, execvp, fork, pipe, ForkResult};

use super::error::ExecError;
use crate::shell::parser::{Node, RedirectKind};

/// Interprets `tree` inside a disposable process and never returns: the
/// process image is replaced by the last program, or the process exits.
pub fn execute(tree: Node) -> ! {
    // The Rust runtime ignores SIGPIPE, and ignored signals survive exec.
    // SAFETY: restoring the default disposition installs no handler.
    if let Err(err) = unsafe { signal(Signal::SIGPIPE, SigHandler::SigDfl) } {
        debug!("cannot restore SIGPIPE: {}", err);
    }

    match run(&tree) {
        Ok(never) => match never {},
        Err(err) => {
            debug!("aborting: {:?}", err);
            eprintln!("myshell: {}", err);
            process::exit(err.exit_code());
        }
    }
}

/// Only ever returns on failure.
fn run(node: &Node) -> Result<Infallible, ExecError> {
    match node {
        Node::Simple { argv } => exec_simple(argv),
        Node::Redirect {
            kind,
            target,
            inner,
        } => exec_redirect(*kind, target, inner),
        Node::Pipeline { left, right } => exec_pipeline(left, right),
    }
}

fn exec_simple(argv: &[String]) -> Result<Infallible, ExecError> {
    let Some(program) = argv.first() else {
        process::exit(0);
    };

    let args = argv
        .iter()
        .map(|arg| CString::new(arg.as_str()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| ExecError::NulByte(program.clone()))?;

    debug!("exec {:?}", argv);
    match execvp(&args[0], &args) {
        Ok(never) => match never {},
        Err(Errno::ENOENT) => Err(ExecError::CommandNotFound(program.clone())),
        Err(source) => Err(ExecError::Exec {
            program: program.clone(),
            source,
        }),
    }
}

fn exec_redirect(kind: RedirectKind, target: &str, inner: &Node) -> Result<Infallible, ExecError> {
    let (flags, stream) = match kind {
        RedirectKind::In => (OFlag::O_RDONLY, libc::STDIN_FILENO),
        RedirectKind::Out => (
            OFlag::O_WRONLY | OFlag::O_CREAT | OFlag::O_TRUNC,
            libc::STDOUT_FILENO,
        ),
    };
    // rw-rw-rw-, narrowed by the umask
    let mode = Mode::S_IRUSR
        | Mode::S_IWUSR
        | Mode::S_IRGRP
        | Mode::S_IWGRP
        | Mode::S_IROTH
        | Mode::S_IWOTH;

    let fd = open(target, flags, mode).map_err(|source| ExecError::Redirect {
        path: target.to_string(),
        source,
    })?;
    debug!("{} {} on fd {}", kind, target, stream);
    rebind(fd, stream)?;
    run(inner)
}

fn exec_pipeline(left: &Node, right: &Node) -> Result<Infallible, ExecError> {
    let (read_end, write_end) = pipe().map_err(ExecError::Pipe)?;

    // SAFETY: the shell is single threaded, and the child only rebinds
    // descriptors before exec'ing or exiting.
    match unsafe { fork() }.map_err(ExecError::Fork)? {
        ForkResult::Child => {
            drop(read_end);
            rebind(write_end.into_raw_fd(), libc::STDOUT_FILENO)?;
            run(left)
        }
        ForkResult::Parent { child } => {
            debug!("started `{}` as {}", left, child);
            drop(write_end);
            rebind(read_end.into_raw_fd(), libc::STDIN_FILENO)?;
            run(right)
        }
    }
}

/// Makes `stream` refer to `fd` and closes the original descriptor.
fn rebind(fd: RawFd, stream: RawFd) -> Result<(), ExecError> {
    if fd == stream {
        return Ok(());
    }
    dup2(fd, stream).map_err(ExecError::Dup)?;
    close(fd).map_err(ExecError::Dup)
}
