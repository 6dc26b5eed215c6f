use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// API key for the hosted chat model. The assistant endpoint is disabled without it.
    #[serde(default)]
    pub assistant_api_key: Option<String>,

    /// Chat completions endpoint
    #[serde(default = "default_assistant_api_url")]
    pub assistant_api_url: String,

    /// Model identifier sent with every completion request
    #[serde(default = "default_assistant_model")]
    pub assistant_model: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_assistant_api_url() -> String {
    "https://openrouter.ai/api/v1/chat/completions".to_string()
}

fn default_assistant_model() -> String {
    "google/gemini-pro".to_string()
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Socket address the server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
