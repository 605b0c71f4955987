use anyhow::{Context, Result};
use std::env;

pub const DEFAULT_DOC_SERVICE_URL: &str = "http://localhost:5000";
pub const DEFAULT_LLM_ENDPOINT: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_LLM_MODEL: &str = "google/gemini-2.0-flash-exp";
pub const DEFAULT_PORT: u16 = 3000;

/// Gateway configuration, read once from the environment at startup and
/// passed into handler construction.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Base URL of the document-processing service (`PY_URL`).
    pub doc_service_url: String,
    /// Bearer credential for the LLM API (`GEMINI_API_KEY`).
    pub llm_api_key: String,
    /// Chat-completion endpoint (`GEMINI_ENDPOINT`).
    pub llm_endpoint: String,
    /// Model identifier sent with every completion request (`GEMINI_MODEL`).
    pub llm_model: String,
    /// Listen port (`PORT`).
    pub port: u16,
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self> {
        let doc_service_url =
            env::var("PY_URL").unwrap_or_else(|_| DEFAULT_DOC_SERVICE_URL.to_string());

        let llm_api_key = env::var("GEMINI_API_KEY")
            .map_err(|_| anyhow::anyhow!("GEMINI_API_KEY environment variable not set"))?;

        let llm_endpoint =
            env::var("GEMINI_ENDPOINT").unwrap_or_else(|_| DEFAULT_LLM_ENDPOINT.to_string());
        let llm_model =
            env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_LLM_MODEL.to_string());

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("invalid PORT value: {}", raw))?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            doc_service_url,
            llm_api_key,
            llm_endpoint,
            llm_model,
            port,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test so the environment mutations below never race each other.
    #[test]
    fn from_env_reads_overrides_and_defaults() {
        env::set_var("GEMINI_API_KEY", "test-key-1234");
        env::remove_var("PY_URL");
        env::remove_var("GEMINI_ENDPOINT");
        env::remove_var("GEMINI_MODEL");
        env::remove_var("PORT");

        let config = GatewayConfig::from_env().unwrap();
        assert_eq!(config.doc_service_url, DEFAULT_DOC_SERVICE_URL);
        assert_eq!(config.llm_endpoint, DEFAULT_LLM_ENDPOINT);
        assert_eq!(config.llm_model, DEFAULT_LLM_MODEL);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.llm_api_key, "test-key-1234");

        env::set_var("PY_URL", "http://docs.internal:5000");
        env::set_var("GEMINI_ENDPOINT", "http://llm.internal/v1/chat/completions");
        env::set_var("GEMINI_MODEL", "test/model");
        env::set_var("PORT", "8080");

        let config = GatewayConfig::from_env().unwrap();
        assert_eq!(config.doc_service_url, "http://docs.internal:5000");
        assert_eq!(config.llm_endpoint, "http://llm.internal/v1/chat/completions");
        assert_eq!(config.llm_model, "test/model");
        assert_eq!(config.port, 8080);

        env::set_var("PORT", "not-a-port");
        assert!(GatewayConfig::from_env().is_err());
        env::remove_var("PORT");

        env::remove_var("GEMINI_API_KEY");
        assert!(GatewayConfig::from_env().is_err());

        env::remove_var("PY_URL");
        env::remove_var("GEMINI_ENDPOINT");
        env::remove_var("GEMINI_MODEL");
    }
}
