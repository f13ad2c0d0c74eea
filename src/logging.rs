use std::{
    fs::{self, File, OpenOptions},
    io::Write,
    path::PathBuf,
    str::FromStr,
};

use chrono::Local;
use env_logger::{Builder, Target};
use log::LevelFilter;

use crate::config::APP_NAME;

/// Environment variable that overrides the configured filter.
pub const LOG_ENV: &str = "SPOTIFY_RESOLVER_LOG";

/// `<data_local_dir>/spotify-resolver/spotify-resolver.log`.
pub fn log_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_NAME);
    path.push(format!("{}.log", APP_NAME));
    path
}

/// Maps a config `log_level` to a filter; `WARNING` and `CRITICAL` are accepted too.
pub fn parse_level(level: &str) -> LevelFilter {
    match level.trim().to_ascii_lowercase().as_str() {
        "warning" => LevelFilter::Warn,
        "critical" | "fatal" => LevelFilter::Error,
        other => LevelFilter::from_str(other).unwrap_or(LevelFilter::Info),
    }
}

/// Starts the diagnostic log.
///
/// Records go to the log file so they never interleave with menus on the
/// terminal. If the file cannot be opened, warnings and errors go to stderr.
pub fn init(verbose: bool, config_level: &str) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        parse_level(config_level)
    };

    let mut builder = Builder::new();
    builder.filter_level(level).parse_env(LOG_ENV).format(|buf, record| {
        writeln!(
            buf,
            "{} - {} - {} - {}",
            Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
            record.target(),
            record.level(),
            record.args()
        )
    });

    match open_log_file() {
        Ok(file) => {
            builder.target(Target::Pipe(Box::new(file)));
        }
        Err(e) => {
            builder.target(Target::Stderr).filter_level(LevelFilter::Warn);
            eprintln!("Cannot open log file {}: {}", log_path().display(), e);
        }
    }

    let _ = builder.try_init();
}

fn open_log_file() -> std::io::Result<File> {
    let path = log_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}
