use std::io::Write;

/// Picks the log level for the requested verbosity. `verbose` wins over `quiet`.
pub fn level_filter(verbose: bool, quiet: bool) -> log::LevelFilter {
    if verbose {
        log::LevelFilter::Trace
    } else if quiet {
        log::LevelFilter::Error
    } else {
        log::LevelFilter::Info
    }
}

pub fn init_logger(verbose: bool, quiet: bool) {
    env_logger::Builder::new()
        .filter_level(level_filter(verbose, quiet))
        .format(|buf, record| writeln!(buf, "[{}]: {}", record.level(), record.args()))
        .init();
}
