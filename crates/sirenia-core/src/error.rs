pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid config JSON: {0}")]
    ConfigJson(#[from] serde_json::Error),

    #[error("Invalid config YAML: {0}")]
    ConfigYaml(#[from] serde_yaml::Error),

    #[error("Unknown editor mode: {value}")]
    UnknownMode { value: String },

    #[error("Unknown theme: {value}")]
    UnknownTheme { value: String },
}
