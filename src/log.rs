use std::io::Write;

use log::LevelFilter;

/// Initializes `env_logger` writing to stderr. `level` is the default filter; the
/// `RUST_LOG` environment variable takes precedence. Calling it twice is harmless.
pub fn build_logger_for_level(level: LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {:<5} {}] {}",
                buf.timestamp_millis(),
                record.level(),
                record.module_path().unwrap_or_default(),
                record.args()
            )
        })
        .try_init();
}

/// Raises `default` by one level per occurrence of `-v`
pub fn build_logger_for_verbosity(default: LevelFilter, verbosity: usize) {
    let level = match (default as usize) + verbosity {
        0 => LevelFilter::Off,
        1 => LevelFilter::Error,
        2 => LevelFilter::Warn,
        3 => LevelFilter::Info,
        4 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    build_logger_for_level(level);
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn repeated_initialization() {
        build_logger_for_verbosity(LevelFilter::Warn, 2);
        build_logger_for_level(LevelFilter::Info);
        ::log::debug!("logger is up");
    }
}
