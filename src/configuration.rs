use secrecy::{ExposeSecret, Secret};
use serde_aux::field_attributes::deserialize_number_from_string;

#[derive(serde::Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub email_verifier: ProviderSettings,
    pub phone_validator: ProviderSettings,
    pub captcha_verifier: ProviderSettings,
    pub email_delivery: EmailDeliverySettings,
    pub contact_form: ContactFormSettings,
}

#[derive(serde::Deserialize, Clone)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
    /// Origins allowed to call the API from a browser. `*` allows any origin.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Connection details for one upstream validation provider.
///
/// For the CAPTCHA verifier `api_key` holds the server-side secret.
#[derive(serde::Deserialize, Clone)]
pub struct ProviderSettings {
    pub base_url: String,
    pub api_key: Option<Secret<String>>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
}

impl ProviderSettings {
    /// The key, unless it is absent or blank.
    pub fn api_key(&self) -> Option<Secret<String>> {
        self.api_key
            .as_ref()
            .filter(|key| !key.expose_secret().trim().is_empty())
            .cloned()
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_milliseconds)
    }
}

#[derive(serde::Deserialize, Clone)]
pub struct EmailDeliverySettings {
    pub base_url: String,
    pub service_id: String,
    pub template_id: String,
    pub public_key: Secret<String>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
}

impl EmailDeliverySettings {
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_milliseconds)
    }
}

#[derive(serde::Deserialize, Clone)]
pub struct ContactFormSettings {
    /// Where the validation backend is reachable from the client.
    pub api_base_url: String,
    pub default_country_code: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub success_reset_milliseconds: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
}

impl ContactFormSettings {
    pub fn success_reset_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.success_reset_milliseconds)
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_milliseconds)
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let mut settings = config::Config::default();
    let base_path = std::env::current_dir()
        .map_err(|e| config::ConfigError::Message(format!("Failed to determine the current directory: {}", e)))?;
    let configuration_directory = base_path.join("configuration");

    // Read the "default" configuration file
    settings.merge(config::File::from(configuration_directory.join("base")).required(true))?;

    // Detect the running environment, default to `local`
    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;

    // Layer on the environment-specific values
    settings.merge(
        config::File::from(configuration_directory.join(environment.as_str())).required(true),
    )?;

    // E.g. `APP_EMAIL_VERIFIER__API_KEY=...` sets `Settings.email_verifier.api_key`
    settings.merge(config::Environment::with_prefix("app").separator("__"))?;

    settings.try_into()
}

/// The possible runtime environments for our application.
#[derive(Debug)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}
