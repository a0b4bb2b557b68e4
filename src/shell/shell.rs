use log::{debug, error, warn};
use nix::unistd::{fork, ForkResult};
use std::error::Error;
use std::io::{self, Write};

use crate::shell::builtins::{self, Builtin};
use crate::shell::executor;
use crate::shell::parser::{self, Node};
use crate::shell::readline::{ReadlineError, ReadlineManager};
use crate::utils::config::Config;
use crate::utils::theme::Theme;

/// Orphaned pipeline stages get reparented to the shell, so a line only
/// completes once its whole process tree has exited.
#[cfg(any(target_os = "linux", target_os = "android"))]
fn become_subreaper() {
    if let Err(err) = nix::sys::prctl::set_child_subreaper(true) {
        warn!("cannot become a child subreaper: {}", err);
    }
}

#[cfg(not(any(target_os = "linux", target_os = "android")))]
fn become_subreaper() {
    debug!("child subreaper unsupported, pipelines are waited on through their last stage");
}

enum Flow {
    Continue,
    Exit,
}

pub struct Shell<'a> {
    config: &'a Config,
    theme: Theme,
    readline: ReadlineManager<'a>,
    last_status: i32,
}

impl<'a> Shell<'a> {
    pub fn new(config: &'a Config) -> Result<Self, ReadlineError> {
        Ok(Self {
            config,
            theme: Theme::load(&config.theme),
            readline: ReadlineManager::new(config)?,
            last_status: 0,
        })
    }

    pub fn run(&mut self) -> Result<(), Box<dyn Error>> {
        debug!("starting {}...", self.config.name);

        become_subreaper();
        self.readline.load_history();
        let result = self.run_loop();
        self.readline.save_history();

        debug!("leaving {}, last status {}", self.config.name, self.last_status);
        result
    }

    fn run_loop(&mut self) -> Result<(), Box<dyn Error>> {
        loop {
            io::stdout().flush()?;

            match self.readline.readline(&self.theme.prompt) {
                Ok(line) => {
                    if let Flow::Exit = self.handle_input(&line) {
                        return Ok(());
                    }
                }
                Err(ReadlineError::Eof) => {
                    debug!("EOF on input");
                    return Ok(());
                }
                Err(ReadlineError::Interrupted) => {
                    debug!("line discarded by interrupt");
                }
                Err(ReadlineError::Io(err)) if err.kind() == io::ErrorKind::InvalidData => {
                    warn!("discarding unreadable line: {}", err);
                    self.report(&format!("input line discarded: {}", err));
                }
                Err(err) => {
                    error!("cannot read input: {}", err);
                    return Err(err.into());
                }
            }
        }
    }

    fn handle_input(&mut self, line: &str) -> Flow {
        if line.len() > self.config.max_line_length {
            self.report(&format!(
                "line too long ({} bytes, limit {}), discarded",
                line.len(),
                self.config.max_line_length
            ));
            return Flow::Continue;
        }
        if parser::is_blank(line) {
            return Flow::Continue;
        }
        self.readline.add_history(line);

        match Builtin::detect(line) {
            Some(Builtin::Exit) => {
                println!("{}", (self.theme.success_style)(self.theme.farewell.clone()));
                return Flow::Exit;
            }
            Some(Builtin::ChangeDir(target)) => {
                if let Err(err) = builtins::change_dir(target) {
                    self.report(&err.to_string());
                }
                return Flow::Continue;
            }
            None => {}
        }

        match parser::parse_line(line) {
            Ok(tree) => {
                if let Some(status) = self.spawn_line(tree) {
                    self.last_status = status;
                }
            }
            Err(err) => {
                debug!("parse error in {:?}: {}", line, err);
                self.report(&err.to_string());
            }
        }
        Flow::Continue
    }

    /// Runs `tree` in a fresh child process and waits for it.
    fn spawn_line(&self, tree: Node) -> Option<i32> {
        debug!(
            "executing `{}` ({} command(s))",
            tree,
            tree.argv_lists().len()
        );

        // SAFETY: the shell is single threaded; the child never returns
        // into the loop.
        match unsafe { fork() } {
            Ok(ForkResult::Child) => executor::execute(tree),
            Ok(ForkResult::Parent { child }) => {
                let status = executor::wait_line(child);
                debug!("line finished with status {}", status);
                Some(status)
            }
            Err(err) => {
                error!("fork failed: {}", err);
                self.report(&format!("forking child process failed: {}", err));
                None
            }
        }
    }

    fn report(&self, message: &str) {
        eprintln!(
            "{}",
            (self.theme.error_style)(format!("{}: {}", self.config.name, message))
        );
    }
}
