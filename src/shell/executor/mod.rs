mod error;
mod executor;
mod wait;

pub use executor::execute;
pub use wait::wait_line;
