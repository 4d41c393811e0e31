/// Environment variable with `env_logger` filter directives
pub const ENV_VAR: &str = "TIME_INTERVAL_LOG";

fn builder(default_level: log::LevelFilter) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(default_level);
    builder.format_timestamp_millis();
    builder.parse_env(ENV_VAR);
    builder
}

pub fn init(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    builder(level).init();
}

#[cfg(test)]
pub fn init_for_tests() {
    let _ = builder(log::LevelFilter::Trace).is_test(true).try_init();
}
