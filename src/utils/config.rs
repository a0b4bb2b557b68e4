use dotenv::dotenv;
use rustyline::EditMode;
use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;

pub const DEFAULT_MAX_LINE_LENGTH: usize = 4096;

pub struct Config {
    pub name: String,
    pub config_dir: PathBuf,
    pub theme: String,
    pub history_file: PathBuf,
    pub editor_mode: String,
    pub logger_level: String,
    pub logger_dir: Option<PathBuf>,
    pub max_line_length: usize,
}

impl Config {
    fn get_config_dir(home: Option<String>) -> PathBuf {
        match home {
            Some(home) => PathBuf::from(home).join(".config/myshell"),
            None => PathBuf::from("tmp"),
        }
    }

    fn default(config_dir: PathBuf) -> Self {
        Config {
            name: String::from("myshell"),
            history_file: config_dir.join(".myshell_history"),
            config_dir,
            theme: String::from("default"),
            editor_mode: String::from("emacs"),
            logger_level: String::from("warn"),
            logger_dir: None,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
        }
    }

    pub fn new() -> Self {
        // .env files first, real environment variables win
        if cfg!(debug_assertions) {
            dotenv::from_filename(".env.development").ok();
        } else {
            dotenv().ok();
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Creates the directory the history file lives in.
    pub fn ensure_history_dir(&self) -> io::Result<()> {
        match self.history_file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
            _ => Ok(()),
        }
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default(Self::get_config_dir(lookup("HOME")));

        if let Some(theme) = lookup("MYSHELL_THEME") {
            config.theme = theme;
        }

        if let Some(editor) = lookup("MYSHELL_EDITOR") {
            config.editor_mode = editor;
        }

        if let Some(history) = lookup("MYSHELL_HISTORY") {
            config.history_file = PathBuf::from(history);
        }

        if let Some(level) = lookup("MYSHELL_LOG_LEVEL") {
            config.logger_level = level;
        }

        if let Some(dir) = lookup("MYSHELL_LOG_DIR").filter(|dir| !dir.is_empty()) {
            config.logger_dir = Some(PathBuf::from(dir));
        }

        if let Some(max) = lookup("MYSHELL_MAX_LINE").and_then(|max| max.trim().parse().ok()) {
            config.max_line_length = max;
        }

        config
    }

    pub fn get_edit_mode(&self) -> EditMode {
        match self.editor_mode.to_lowercase().as_str() {
            "vi" => EditMode::Vi,
            _ => EditMode::Emacs,
        }
    }
}
