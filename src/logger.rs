use env_logger::Env;

use crate::config::RunEnv;

/// Initializes `env_logger`. `RUST_LOG` wins over the per-environment default.
pub fn init(run_env: RunEnv) {
    // We minimize logging when running tests.
    let default_level = match run_env {
        RunEnv::Test => "warn",
        RunEnv::Development | RunEnv::Production => "info",
    };
    // A second init (e.g. from several tests) is not an error.
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or(default_level))
        .try_init();
}

/// Redacts `parts` from `text` in production; returns `text` unchanged elsewhere.
pub fn sensitive(text: &str, parts: &[&str], run_env: RunEnv) -> String {
    if !run_env.is_production() {
        return text.to_string();
    }
    parts
        .iter()
        .filter(|part| !part.is_empty())
        .fold(text.to_string(), |redacted, part| {
            redacted.replace(part, &"*".repeat(part.chars().count()))
        })
}
