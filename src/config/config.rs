use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use url::Url;

/// Solana RPC endpoint configuration.
///
/// All on-chain data comes from this single JSON-RPC endpoint. Public
/// mainnet endpoints work but rate-limit aggressively; a dedicated
/// provider URL is recommended for scheduled runs.
#[derive(Debug, Deserialize, Clone)]
pub struct RpcSettings {
    pub url: String,
    #[serde(default = "default_rpc_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_rpc_timeout_secs() -> u64 {
    30
}

/// Tracked token configuration.
///
/// Exactly one SPL mint is tracked per deployment; the dataset files are
/// keyed by timestamp, not mint, so changing the mint mid-dataset mixes
/// histories. Point `storage.data_dir` somewhere fresh instead.
#[derive(Debug, Deserialize, Clone)]
pub struct TokenSettings {
    pub mint: String,
}

/// Dataset and report storage configuration.
///
/// The raw/processed/reports subdirectories live under `data_dir` and are
/// created at startup before any pipeline stage runs.
#[derive(Debug, Deserialize, Clone)]
pub struct StorageSettings {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_data_dir() -> String {
    "data".to_string()
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings { data_dir: default_data_dir() }
    }
}

/// Optional in-process scheduling.
///
/// Disabled by default: the normal deployment is one run per invocation
/// with external automation providing the daily trigger. When enabled the
/// process stays alive and re-runs the pipeline on a fixed interval.
#[derive(Debug, Deserialize, Clone)]
pub struct SchedulerSettings {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_run_interval_secs")]
    pub run_interval_secs: u64,
}

fn default_run_interval_secs() -> u64 {
    86_400
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        SchedulerSettings { enabled: false, run_interval_secs: default_run_interval_secs() }
    }
}

/// Root application configuration.
///
/// Loaded once at startup from `config.yaml` (optional) layered with
/// `GLYPH__*`-prefixed environment variables (e.g. `GLYPH__RPC__URL`),
/// then validated before any component runs. Components receive settings
/// explicitly; nothing reads the environment after this point.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub rpc: RpcSettings,
    pub token: TokenSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub scheduler: SchedulerSettings,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::with_prefix("GLYPH").separator("__").try_parsing(true))
            .build()?;

        let settings: Settings = s.try_deserialize()?;

        settings.validate()
    }

    /// Reject configurations that would fail later at the RPC or storage
    /// layer, so bad deployments die at startup with a clear message.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.rpc.url.trim().is_empty() {
            return Err(ConfigError::Message("rpc.url must be set".to_string()));
        }
        let parsed = Url::parse(&self.rpc.url)
            .map_err(|e| ConfigError::Message(format!("rpc.url is not a valid URL: {e}")))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ConfigError::Message(format!(
                "rpc.url must be an http(s) endpoint, got scheme '{}'",
                parsed.scheme()
            )));
        }

        if self.rpc.timeout_secs == 0 {
            return Err(ConfigError::Message("rpc.timeout_secs must be non-zero".to_string()));
        }

        let decoded = bs58::decode(&self.token.mint)
            .into_vec()
            .map_err(|e| ConfigError::Message(format!("token.mint is not valid base58: {e}")))?;
        if decoded.len() != 32 {
            return Err(ConfigError::Message(format!(
                "token.mint must decode to 32 bytes, got {}",
                decoded.len()
            )));
        }

        if self.storage.data_dir.trim().is_empty() {
            return Err(ConfigError::Message("storage.data_dir must be set".to_string()));
        }

        if self.scheduler.run_interval_secs == 0 {
            return Err(ConfigError::Message(
                "scheduler.run_interval_secs must be non-zero".to_string(),
            ));
        }

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_settings() -> Settings {
        Settings {
            rpc: RpcSettings {
                url: "https://api.mainnet-beta.solana.com".to_string(),
                timeout_secs: 30,
            },
            token: TokenSettings {
                // The USDC mint, a well-formed 32-byte base58 address
                mint: "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v".to_string(),
            },
            storage: StorageSettings::default(),
            scheduler: SchedulerSettings::default(),
        }
    }

    #[test]
    fn test_valid_settings_pass() {
        assert!(valid_settings().validate().is_ok());
    }

    #[test]
    fn test_blank_rpc_url_rejected() {
        let mut settings = valid_settings();
        settings.rpc.url = "  ".to_string();
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("rpc.url"));
    }

    #[test]
    fn test_non_http_rpc_url_rejected() {
        let mut settings = valid_settings();
        settings.rpc.url = "ws://api.mainnet-beta.solana.com".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_malformed_mint_rejected() {
        let mut settings = valid_settings();
        settings.token.mint = "not-base58-0OIl".to_string();
        assert!(settings.validate().is_err());

        let mut settings = valid_settings();
        // Valid base58 but too short to be a pubkey
        settings.token.mint = "abc".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_zero_interval_rejected() {
        let mut settings = valid_settings();
        settings.scheduler.run_interval_secs = 0;
        assert!(settings.validate().is_err());
    }
}
