use std::io::IsTerminal;

use tracing::Level;

/// `-v` count to log level: none → WARN, `-v` → INFO, `-vv` and more → DEBUG
pub fn level_for_verbosity(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    }
}

/// Install the stderr log subscriber. A second call is a no-op.
pub fn init(verbose: u8) {
    tracing_subscriber::fmt()
        .with_max_level(level_for_verbosity(verbose))
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(level_for_verbosity(0), Level::WARN);
        assert_eq!(level_for_verbosity(1), Level::INFO);
        assert_eq!(level_for_verbosity(2), Level::DEBUG);
        assert_eq!(level_for_verbosity(5), Level::DEBUG);
    }

    #[test]
    fn test_repeated_init_is_harmless() {
        init(1);
        init(2);
        tracing::info!("logging initialised twice");
    }
}
