use std::env;
use std::fmt;
use std::time::Duration;

/// Fields the backend store fills in itself; never offered as inputs.
pub const DEFAULT_EXCLUDED_FIELDS: [&str; 3] = ["id", "created", "updated"];

pub const DEFAULT_FORM_TITLE: &str = "データ送信フォーム";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub backend: BackendConfig,
    pub form: FormConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub base_url: String,
    pub collection: String,
    pub token: Option<SecretToken>,
    /// Send the token on record creation as well as on schema reads.
    pub auth_on_create: bool,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct FormConfig {
    pub excluded_fields: Vec<String>,
    pub title: String,
    /// Forward declared boolean fields missing from the post as `false`.
    pub fill_unchecked_booleans: bool,
    /// Map non-2xx backend responses to an error instead of echoing them as success.
    pub strict_upstream_status: bool,
}

/// Backend credential. Debug output never shows the value.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretToken(String);

impl SecretToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretToken(***)")
    }
}

impl BackendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl FormConfig {
    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded_fields.iter().any(|excluded| excluded == name)
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("APP_ENV").as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            Some("staging") | Some("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_overrides(lookup)
    }

    fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        // Server overrides
        if let Some(v) = lookup("FORMBUILDER_HOST") {
            self.server.host = v;
        }
        if let Some(port) = lookup("FORMBUILDER_PORT")
            .or_else(|| lookup("PORT"))
            .and_then(|v| v.parse::<u16>().ok())
        {
            self.server.port = port;
        }

        // Backend overrides
        if let Some(v) = lookup("PB_URL") {
            self.backend.base_url = v;
        }
        if let Some(v) = lookup("PB_COLLECTION") {
            self.backend.collection = v;
        }
        if let Some(v) = lookup("PB_TOKEN") {
            let trimmed = v.trim();
            self.backend.token = (!trimmed.is_empty()).then(|| SecretToken::new(trimmed));
        }
        if let Some(v) = lookup("PB_AUTH_ON_CREATE") {
            self.backend.auth_on_create = v.parse().unwrap_or(self.backend.auth_on_create);
        }
        if let Some(v) = lookup("PB_TIMEOUT_SECS") {
            self.backend.timeout_secs = v.parse().unwrap_or(self.backend.timeout_secs);
        }

        // Form overrides
        if let Some(v) = lookup("FORM_EXCLUDED_FIELDS") {
            self.form.excluded_fields = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        if let Some(v) = lookup("FORM_TITLE") {
            self.form.title = v;
        }
        if let Some(v) = lookup("FORM_FILL_UNCHECKED_BOOLEANS") {
            self.form.fill_unchecked_booleans = v.parse().unwrap_or(self.form.fill_unchecked_booleans);
        }
        if let Some(v) = lookup("FORM_STRICT_UPSTREAM_STATUS") {
            self.form.strict_upstream_status = v.parse().unwrap_or(self.form.strict_upstream_status);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 48080,
            },
            backend: BackendConfig {
                base_url: "http://localhost:8090".to_string(),
                collection: "radiospec".to_string(),
                token: None,
                auth_on_create: false,
                timeout_secs: 10,
            },
            form: FormConfig::default(),
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            ..Self::development()
        }
    }

    fn production() -> Self {
        let mut config = Self::development();
        config.environment = Environment::Production;
        config.backend.timeout_secs = 5;
        config
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            excluded_fields: DEFAULT_EXCLUDED_FIELDS.iter().map(|s| s.to_string()).collect(),
            title: DEFAULT_FORM_TITLE.to_string(),
            fill_unchecked_booleans: false,
            strict_upstream_status: true,
        }
    }
}
