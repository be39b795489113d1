#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Settings for talking to the marketplace server.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    /// Origin of the marketplace server, e.g. `https://pinup.example`.
    pub api_base_url: String,
    pub http_timeout_secs: u64,
    pub http_connect_timeout_secs: u64,
    pub http_user_agent: String,
    /// Display name attached to every newly registered location.
    pub location_name: String,
}
