use log::{debug, error};
use nix::errno::Errno;
use nix::sys::wait::{waitpid, WaitStatus};
use nix::unistd::Pid;

/// Shell-style status: the exit code, or 128 plus the signal number.
pub fn status_code(status: WaitStatus) -> Option<i32> {
    match status {
        WaitStatus::Exited(_, code) => Some(code),
        WaitStatus::Signaled(_, signal, _) => Some(128 + signal as i32),
        _ => None,
    }
}

/// Blocks until the line's process and every reparented descendant have
/// terminated, returning the status of `line_pid`.
pub fn wait_line(line_pid: Pid) -> i32 {
    let mut line_status = 0;

    loop {
        match waitpid(Pid::from_raw(-1), None) {
            Ok(status) => {
                let Some(code) = status_code(status) else {
                    continue;
                };
                if status.pid() == Some(line_pid) {
                    debug!("line process {} finished with {}", line_pid, code);
                    line_status = code;
                } else {
                    debug!("reaped {:?}", status);
                }
            }
            Err(Errno::EINTR) => continue,
            Err(Errno::ECHILD) => break,
            Err(err) => {
                error!("unexpected waitpid error: {}", err);
                line_status = 1;
                break;
            }
        }
    }
    line_status
}
