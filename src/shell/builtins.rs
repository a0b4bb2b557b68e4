use std::path::Path;
use std::{env, fs, io};

use log::debug;
use thiserror::Error;

#[derive(Debug, PartialEq, Eq)]
pub enum Builtin<'a> {
    ChangeDir(&'a str),
    Exit,
}

impl<'a> Builtin<'a> {
    /// Built-ins are recognized by prefix and never reach the parser.
    pub fn detect(line: &'a str) -> Option<Self> {
        if let Some(target) = line.strip_prefix("cd ") {
            Some(Builtin::ChangeDir(target.trim()))
        } else if line.starts_with("exit") {
            Some(Builtin::Exit)
        } else {
            None
        }
    }
}

#[derive(Error, Debug)]
pub enum BuiltinError {
    #[error("cd: {0}: not a directory")]
    NotADirectory(String),
    #[error("cd: {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

pub fn change_dir(target: &str) -> Result<(), BuiltinError> {
    let io_error = |source| BuiltinError::Io {
        path: target.to_string(),
        source,
    };

    let metadata = fs::metadata(Path::new(target)).map_err(io_error)?;
    if !metadata.is_dir() {
        return Err(BuiltinError::NotADirectory(target.to_string()));
    }
    env::set_current_dir(target).map_err(io_error)?;
    debug!("working directory is now {}", target);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_detect() {
        assert_eq!(Builtin::detect("cd /tmp"), Some(Builtin::ChangeDir("/tmp")));
        assert_eq!(Builtin::detect("cd  src \t"), Some(Builtin::ChangeDir("src")));
        assert_eq!(Builtin::detect("exit"), Some(Builtin::Exit));
        assert_eq!(Builtin::detect("exit 3"), Some(Builtin::Exit));
        assert_eq!(Builtin::detect("cd"), None);
        assert_eq!(Builtin::detect(" cd /tmp"), None);
        assert_eq!(Builtin::detect("echo exit"), None);
    }

    #[test]
    fn test_change_dir_rejects_files() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().to_string_lossy().to_string();
        let before = env::current_dir().unwrap();

        let err = change_dir(&path).unwrap_err();
        assert!(matches!(err, BuiltinError::NotADirectory(_)));
        assert_eq!(env::current_dir().unwrap(), before);
    }

    #[test]
    fn test_change_dir_missing_target() {
        let err = change_dir("/definitely/not/here").unwrap_err();
        assert!(matches!(err, BuiltinError::Io { .. }));
        assert!(err.to_string().starts_with("cd: /definitely/not/here: "));
    }
}
