//! Provider configuration from TOML (`[providers]` section)

use relay_domain::{AnthropicProviderConfig, OpenAiProviderConfig, ProviderConfig};
use serde::{Deserialize, Serialize};

/// Anthropic API provider configuration (slot A).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAnthropicConfig {
    /// Name shown next to this provider's answers.
    pub display_name: String,
    /// Environment variable name for the API key (default: "ANTHROPIC_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended, prefer the env var).
    pub api_key: Option<String>,
    /// Base URL for the Anthropic API.
    pub base_url: String,
    /// Model identifier.
    pub model: String,
    /// Max tokens per response.
    pub max_tokens: u32,
    /// Anthropic API version header.
    pub api_version: String,
}

impl Default for FileAnthropicConfig {
    fn default() -> Self {
        let d = AnthropicProviderConfig::default();
        Self {
            display_name: d.display_name,
            api_key_env: d.api_key_env,
            api_key: d.api_key,
            base_url: d.base_url,
            model: d.model,
            max_tokens: d.max_tokens,
            api_version: d.api_version,
        }
    }
}

/// OpenAI API provider configuration (slot B).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOpenAiConfig {
    /// Name shown next to this provider's answers.
    pub display_name: String,
    /// Environment variable name for the API key (default: "OPENAI_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended, prefer the env var).
    pub api_key: Option<String>,
    /// Base URL for the OpenAI API (can be overridden for compatible gateways).
    pub base_url: String,
    /// Model identifier.
    pub model: String,
    /// Max tokens per response.
    pub max_tokens: u32,
}

impl Default for FileOpenAiConfig {
    fn default() -> Self {
        let d = OpenAiProviderConfig::default();
        Self {
            display_name: d.display_name,
            api_key_env: d.api_key_env,
            api_key: d.api_key,
            base_url: d.base_url,
            model: d.model,
            max_tokens: d.max_tokens,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    /// Anthropic API settings.
    pub anthropic: FileAnthropicConfig,
    /// OpenAI API settings.
    pub openai: FileOpenAiConfig,
}

impl FileProvidersConfig {
    /// Convert to the serialization-free domain type.
    pub fn to_provider_config(&self) -> ProviderConfig {
        let a = &self.anthropic;
        let o = &self.openai;
        ProviderConfig {
            anthropic: AnthropicProviderConfig {
                display_name: a.display_name.clone(),
                api_key_env: a.api_key_env.clone(),
                api_key: a.api_key.clone(),
                base_url: a.base_url.clone(),
                model: a.model.clone(),
                max_tokens: a.max_tokens,
                api_version: a.api_version.clone(),
            },
            openai: OpenAiProviderConfig {
                display_name: o.display_name.clone(),
                api_key_env: o.api_key_env.clone(),
                api_key: o.api_key.clone(),
                base_url: o.base_url.clone(),
                model: o.model.clone(),
                max_tokens: o.max_tokens,
            },
        }
    }
}
