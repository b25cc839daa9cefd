use std::time::Duration;

use log::LevelFilter;

/// Initialize the logger with the specified level
pub fn init_logger(level: LevelFilter) {
    env_logger::Builder::from_default_env().filter_level(level).init();
}

/// Format a duration as `HH:MM:SS.fff`.
pub fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    let hours = millis / 3_600_000;
    let minutes = millis / 60_000 % 60;
    let seconds = millis / 1000 % 60;
    format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis % 1000)
}
