//! Logger setup.
//!
//! Log lines go to stdout as `[HH:MM:SS.mmm LEVEL target] message`.

use log::LevelFilter;

/// Installs the global logger with the given maximum level.
///
/// Fails if a logger is already installed.
pub fn init(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {:<5} {}] {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(LevelFilter::Trace)
        .chain(std::io::stdout())
        .apply()?;
    set_level(level);
    Ok(())
}

/// Changes the maximum level after the logger is installed.
pub fn set_level(level: LevelFilter) {
    log::set_max_level(level);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_is_rejected() {
        let _ = init(LevelFilter::Warn);
        assert!(init(LevelFilter::Info).is_err());
        set_level(LevelFilter::Debug);
        assert_eq!(log::max_level(), LevelFilter::Debug);
    }
}
