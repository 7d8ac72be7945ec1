//! Gateway configuration. Load from TOML or env.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::WenjianResult;
use crate::knowledge::KnowledgeBase;
use crate::responder::{Responder, DEFAULT_REPLY_LOG_CHARS};
use crate::rules::RuleTable;

fn default_reply_log_chars() -> usize {
    DEFAULT_REPLY_LOG_CHARS
}

/// | Key / Env | Default | Description |
/// |-----------|---------|-------------|
/// | service_name / WENJIAN__SERVICE_NAME | 文鉴通助手 API | Reported by `/api/health`. |
/// | host / WENJIAN__HOST | 0.0.0.0 | Bind address. |
/// | port / WENJIAN__PORT, PORT | 5000 | Bind port; plain `PORT` wins. |
/// | knowledge_path / WENJIAN__KNOWLEDGE_PATH | unset | TOML knowledge set replacing the built-in one. |
/// | cors_origins / WENJIAN__CORS_ORIGINS | empty | Allowed origins, comma separated; empty allows any. |
/// | reply_log_chars / WENJIAN__REPLY_LOG_CHARS | 100 | Reply chars kept in logs. |
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    pub service_name: String,
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub knowledge_path: Option<String>,
    #[serde(default)]
    pub cors_origins: Vec<String>,
    #[serde(default = "default_reply_log_chars")]
    pub reply_log_chars: usize,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            service_name: "文鉴通助手 API".to_string(),
            host: "0.0.0.0".to_string(),
            port: 5000,
            knowledge_path: None,
            cors_origins: Vec::new(),
            reply_log_chars: DEFAULT_REPLY_LOG_CHARS,
        }
    }
}

impl GatewayConfig {
    /// Precedence: env `WENJIAN_CONFIG` path > `config/gateway.toml` > defaults,
    /// then `WENJIAN__*` environment, then `PORT`.
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var("WENJIAN_CONFIG").unwrap_or_else(|_| "config/gateway.toml".to_string());
        Self::load_from(Path::new(&config_path))
    }

    pub fn load_from(path: &Path) -> Result<Self, config::ConfigError> {
        let defaults = Self::default();
        let builder = config::Config::builder()
            .set_default("service_name", defaults.service_name)?
            .set_default("host", defaults.host)?
            .set_default("port", defaults.port as i64)?
            .set_default("reply_log_chars", defaults.reply_log_chars as i64)?;

        let builder = if path.exists() {
            builder.add_source(config::File::from(path))
        } else {
            builder
        };

        let built = builder
            .add_source(
                config::Environment::with_prefix("WENJIAN")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors_origins")
                    .try_parsing(true),
            )
            .build()?;

        let mut cfg: Self = built.try_deserialize()?;
        cfg.apply_port_override(std::env::var("PORT").ok())?;
        Ok(cfg)
    }

    /// Plain `PORT` (as set by hosting platforms) wins; a value that is not a
    /// port number is a configuration error.
    fn apply_port_override(&mut self, raw: Option<String>) -> Result<(), config::ConfigError> {
        let Some(raw) = raw else {
            return Ok(());
        };
        self.port = raw
            .trim()
            .parse()
            .map_err(|_| config::ConfigError::Message(format!("invalid PORT: {:?}", raw)))?;
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Responder over the configured knowledge set (built-in when unset).
    pub fn build_responder(&self) -> WenjianResult<Responder> {
        let responder = match self.knowledge_path.as_deref().map(str::trim) {
            Some(path) if !path.is_empty() => {
                let knowledge = KnowledgeBase::load(path)?;
                Responder::new(Arc::new(knowledge), RuleTable::builtin())?
            }
            _ => Responder::builtin(),
        };
        Ok(responder.with_reply_log_chars(self.reply_log_chars))
    }
}
