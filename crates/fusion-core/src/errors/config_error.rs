/// Configuration errors. Fatal at startup, rejected on reload.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid weight profile: {reason}")]
    InvalidWeights { reason: String },

    #[error("invalid value for {field}: {reason}")]
    Invalid { field: String, reason: String },
}
