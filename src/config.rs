use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub sample_interval: u64,
    pub history_size: usize,
    pub namespace: String,
    pub kube_api_url: Option<String>,
    pub kube_token: Option<String>,
    pub kube_insecure_tls: bool,
    pub provider_timeout: u64,
    pub ai_engine_url: String,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: env::var("OPSDECK_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(8000),
            sample_interval: env::var("OPSDECK_SAMPLE_INTERVAL")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
            history_size: env::var("OPSDECK_HISTORY_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(100),
            namespace: env::var("OPSDECK_NAMESPACE").unwrap_or_else(|_| "default".to_string()),
            kube_api_url: env::var("OPSDECK_KUBE_API_URL").ok(),
            kube_token: env::var("OPSDECK_KUBE_TOKEN").ok(),
            kube_insecure_tls: env::var("OPSDECK_KUBE_INSECURE_TLS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(false),
            provider_timeout: env::var("OPSDECK_PROVIDER_TIMEOUT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5),
            ai_engine_url: env::var("OPSDECK_AI_ENGINE_URL")
                .unwrap_or_else(|_| "http://localhost:8001".to_string()),
            log_level: env::var("OPSDECK_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
