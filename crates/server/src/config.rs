use shared_types::{AppConfig, FeatureFlags};
use std::sync::OnceLock;

static FLAGS: OnceLock<FeatureFlags> = OnceLock::new();

/// Path to the config file, relative to the working directory.
const CONFIG_PATH: &str = "config.toml";

/// Parse the contents of `config.toml`. Invalid TOML disables every flag.
pub fn parse_feature_flags(contents: &str) -> FeatureFlags {
    match toml::from_str::<AppConfig>(contents) {
        Ok(config) => config.features,
        Err(e) => {
            tracing::warn!(error = %e, path = CONFIG_PATH, "invalid config file, all features off");
            FeatureFlags::default()
        }
    }
}

/// Read `config.toml` into the global flags. Only the first call has effect.
pub fn load_feature_flags() -> &'static FeatureFlags {
    FLAGS.get_or_init(|| match std::fs::read_to_string(CONFIG_PATH) {
        Ok(contents) => {
            let flags = parse_feature_flags(&contents);
            tracing::info!(?flags, "feature flags loaded");
            flags
        }
        Err(e) => {
            tracing::info!(error = %e, path = CONFIG_PATH, "config file not found, all features off");
            FeatureFlags::default()
        }
    })
}

/// Loaded feature flags, or all-off defaults before `load_feature_flags` runs.
pub fn feature_flags() -> &'static FeatureFlags {
    static DEFAULT: FeatureFlags = FeatureFlags {
        llm: false,
        s3: false,
        registration: false,
    };
    FLAGS.get().unwrap_or(&DEFAULT)
}

/// Read a numeric environment variable, falling back on absence or parse failure.
pub fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Maximum accepted upload size in bytes (`MAX_UPLOAD_BYTES`).
pub fn max_upload_bytes() -> u64 {
    env_parse("MAX_UPLOAD_BYTES", shared_types::DEFAULT_MAX_UPLOAD_BYTES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_enabled_flags() {
        let flags = parse_feature_flags("[features]\nllm = true\ns3 = false\n");
        assert!(flags.llm);
        assert!(!flags.s3);
        assert!(!flags.registration);
    }

    #[test]
    fn invalid_toml_turns_everything_off() {
        assert_eq!(parse_feature_flags("[features"), FeatureFlags::default());
    }

    #[test]
    fn env_parse_falls_back_on_garbage() {
        std::env::set_var("COUNSELOR_TEST_ENV_PARSE", "not-a-number");
        assert_eq!(env_parse("COUNSELOR_TEST_ENV_PARSE", 7u32), 7);
        std::env::set_var("COUNSELOR_TEST_ENV_PARSE", " 42 ");
        assert_eq!(env_parse("COUNSELOR_TEST_ENV_PARSE", 7u32), 42);
        assert_eq!(env_parse("COUNSELOR_TEST_ENV_UNSET", 3u64), 3);
    }
}
