use clap::builder::TypedValueParser as _;
use clap::Parser;
use dotenvy::dotenv;
use log::LevelFilter;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq)]
pub enum RuntimeEnv {
    Development,
    Production,
    Staging,
}

#[derive(Debug, PartialEq, Eq)]
pub struct RuntimeEnvParseError;

impl FromStr for RuntimeEnv {
    type Err = RuntimeEnvParseError;
    fn from_str(level: &str) -> Result<RuntimeEnv, Self::Err> {
        match level.to_lowercase().as_str() {
            "development" => Ok(RuntimeEnv::Development),
            "production" => Ok(RuntimeEnv::Production),
            "staging" => Ok(RuntimeEnv::Staging),
            _ => Err(RuntimeEnvParseError),
        }
    }
}

impl fmt::Display for RuntimeEnv {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RuntimeEnv::Development => write!(f, "development"),
            RuntimeEnv::Production => write!(f, "production"),
            RuntimeEnv::Staging => write!(f, "staging"),
        }
    }
}

#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// A list of full CORS origin URLs that allowed to receive server responses.
    #[arg(
        long,
        env,
        value_delimiter = ',',
        use_value_delimiter = true,
        default_value = "http://localhost:3000,https://localhost:3000"
    )]
    pub allowed_origins: Vec<String>,

    /// The host interface to listen for incoming connections
    #[arg(short, long, env, default_value = "127.0.0.1")]
    pub interface: Option<String>,

    /// The host TCP port to listen for incoming connections
    #[arg(short, long, env, default_value_t = 4000)]
    pub port: u16,

    /// The symmetric secret used to both sign and verify auth tokens.
    /// There is no default; an absent or too-short secret aborts startup.
    #[arg(long, env)]
    jwt_secret: Option<String>,

    /// The value placed into the `typ` header of issued auth tokens.
    #[arg(long, env, default_value = "JWT")]
    jwt_type: String,

    /// The `iss` claim stamped into issued auth tokens. Verification rejects
    /// any other issuer.
    #[arg(long, env, default_value = "beerbrawl-backend")]
    jwt_issuer: String,

    /// The `aud` claim stamped into issued auth tokens. Verification rejects
    /// any other audience.
    #[arg(long, env, default_value = "beerbrawl-app")]
    jwt_audience: String,

    /// Auth token lifetime in milliseconds (default: 12 hours)
    #[arg(long, env, default_value_t = 43_200_000)]
    jwt_expiration_ms: u64,

    /// The scheme label prepended to issued tokens and expected back on the
    /// Authorization header.
    #[arg(long, env, default_value = "Bearer ")]
    auth_token_prefix: String,

    /// Set the log level verbosity threshold (level) to control what gets displayed on console output
    #[arg(
        short,
        long,
        env,
        default_value_t = LevelFilter::Info,
        value_parser = clap::builder::PossibleValuesParser::new(["OFF", "ERROR", "WARN", "INFO", "DEBUG", "TRACE"])
            .map(|s| s.parse::<LevelFilter>().unwrap()),
        )]
    pub log_level_filter: LevelFilter,

    /// Set the runtime environment to use.
    #[arg(
    short,
    long,
    env,
    default_value_t = RuntimeEnv::Development,
    value_parser = clap::builder::PossibleValuesParser::new([
        "DEVELOPMENT", "PRODUCTION", "STAGING",
        "development", "production", "staging"
    ])
        .map(|s| s.parse::<RuntimeEnv>().unwrap()),
    )]
    pub runtime_env: RuntimeEnv,
}

impl Default for Config {
    fn default() -> Self {
        // Defaults only - no CLI arguments are consulted. This is what tests
        // construct their Config from.
        Config::parse_from(["beerbrawl"])
    }
}

impl Config {
    pub fn new() -> Self {
        // Load .env file first
        dotenv().ok();
        // Then parse the command line parameters and flags
        Config::parse()
    }

    pub fn jwt_secret(&self) -> Option<String> {
        self.jwt_secret.clone()
    }

    pub fn set_jwt_secret(mut self, jwt_secret: String) -> Self {
        self.jwt_secret = Some(jwt_secret);
        self
    }

    pub fn jwt_type(&self) -> &str {
        &self.jwt_type
    }

    pub fn jwt_issuer(&self) -> &str {
        &self.jwt_issuer
    }

    pub fn set_jwt_issuer(mut self, jwt_issuer: String) -> Self {
        self.jwt_issuer = jwt_issuer;
        self
    }

    pub fn jwt_audience(&self) -> &str {
        &self.jwt_audience
    }

    /// Returns the configured auth token lifetime in milliseconds.
    pub fn jwt_expiration_ms(&self) -> u64 {
        self.jwt_expiration_ms
    }

    pub fn set_jwt_expiration_ms(mut self, jwt_expiration_ms: u64) -> Self {
        self.jwt_expiration_ms = jwt_expiration_ms;
        self
    }

    pub fn auth_token_prefix(&self) -> &str {
        &self.auth_token_prefix
    }

    pub fn runtime_env(&self) -> RuntimeEnv {
        self.runtime_env.clone()
    }

    pub fn is_production(&self) -> bool {
        // This could check an environment variable, or a config field
        self.runtime_env() == RuntimeEnv::Production
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_has_expected_token_settings() {
        let config = Config::default();

        assert_eq!(config.jwt_secret(), None);
        assert_eq!(config.jwt_type(), "JWT");
        assert_eq!(config.jwt_issuer(), "beerbrawl-backend");
        assert_eq!(config.jwt_audience(), "beerbrawl-app");
        assert_eq!(config.jwt_expiration_ms(), 43_200_000);
        assert_eq!(config.auth_token_prefix(), "Bearer ");
    }

    #[test]
    fn test_builder_setters_override_defaults() {
        let config = Config::default()
            .set_jwt_secret("secret".to_string())
            .set_jwt_expiration_ms(1_000);

        assert_eq!(config.jwt_secret(), Some("secret".to_string()));
        assert_eq!(config.jwt_expiration_ms(), 1_000);
    }

    #[test]
    fn test_runtime_env_round_trips_through_strings() {
        assert_eq!("production".parse(), Ok(RuntimeEnv::Production));
        assert_eq!("STAGING".parse(), Ok(RuntimeEnv::Staging));
        assert_eq!(
            "something-else".parse::<RuntimeEnv>(),
            Err(RuntimeEnvParseError)
        );
        assert_eq!(RuntimeEnv::Development.to_string(), "development");
    }

    #[test]
    fn test_default_config_is_not_production() {
        assert!(!Config::default().is_production());
    }
}
