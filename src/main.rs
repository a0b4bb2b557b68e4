use log::{debug, warn};

use crate::shell::Shell;
use crate::utils::config::Config;
use crate::utils::log::init_logger;

mod shell;
mod utils;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::new();
    init_logger(&config);
    debug!("config loaded from {}", config.config_dir.display());
    if let Err(err) = config.ensure_history_dir() {
        warn!(
            "cannot create history directory for {}: {}",
            config.history_file.display(),
            err
        );
    }

    let mut shell = Shell::new(&config)?;
    shell.run()
}
