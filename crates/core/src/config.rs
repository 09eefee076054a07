use crate::language::{Language, DEFAULT_SOURCE_LANG, DEFAULT_TARGET_LANG};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

pub const DEFAULT_ENDPOINT_BASE: &str = "http://localhost:8000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const ENV_API_URL: &str = "TRANSLATOR_API_URL";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "TRANSLATOR_TIMEOUT_SECS";

const TRANSLATE_PATH: &str = "translate";

/// Root address of the translation service, without a trailing slash.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct EndpointBase(String);

impl EndpointBase {
    pub fn new<S: Into<String>>(value: S) -> Result<Self, ConfigError> {
        let base = Self::unchecked(value);
        base.parse()?;
        Ok(base)
    }

    fn unchecked<S: Into<String>>(value: S) -> Self {
        Self(value.into().trim().trim_end_matches('/').to_owned())
    }

    fn parse(&self) -> Result<Url, ConfigError> {
        let parsed =
            Url::parse(&self.0).map_err(|e| ConfigError::InvalidEndpoint(self.0.clone(), e))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(parsed.scheme().to_owned()));
        }
        Ok(parsed)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Appends the `translate` segment to the base path. Any query on the base
    /// is kept and any fragment dropped. A base that does not parse is joined
    /// textually and left for the HTTP client to reject.
    pub fn translate_url(&self) -> String {
        match self.parse() {
            Ok(mut url) => {
                url.set_fragment(None);
                if let Ok(mut segments) = url.path_segments_mut() {
                    segments.pop_if_empty().push(TRANSLATE_PATH);
                }
                url.into()
            }
            Err(_) => format!("{}/{}", self.0, TRANSLATE_PATH),
        }
    }
}

impl Default for EndpointBase {
    fn default() -> Self {
        Self(DEFAULT_ENDPOINT_BASE.to_owned())
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RequestTimeout {
    pub secs: u64,
}

impl RequestTimeout {
    pub fn new(secs: u64) -> Result<Self, ConfigError> {
        if secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(Self { secs })
    }

    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.secs)
    }
}

impl Default for RequestTimeout {
    fn default() -> Self {
        Self {
            secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    pub endpoint: EndpointBase,
    pub source_lang: Language,
    pub target_lang: Language,
    pub request_timeout: RequestTimeout,
}

impl AppConfig {
    pub fn new(endpoint: EndpointBase) -> Self {
        Self {
            endpoint,
            source_lang: DEFAULT_SOURCE_LANG,
            target_lang: DEFAULT_TARGET_LANG,
            request_timeout: RequestTimeout::default(),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("invalid endpoint url {0:?}: {1}")]
    InvalidEndpoint(String, url::ParseError),
    #[error("endpoint scheme must be http or https, got {0:?}")]
    UnsupportedScheme(String),
    #[error("request timeout must be > 0 s")]
    ZeroTimeout,
    #[error("invalid request timeout {0:?}")]
    InvalidTimeout(String),
}

pub trait Env {
    fn var(&self, key: &str) -> Option<String>;
}

#[derive(Clone, Debug, Default)]
pub struct StdEnv;

impl Env for StdEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

#[derive(Clone, Debug, Default)]
pub struct MapEnv {
    vars: std::collections::BTreeMap<String, String>,
}

impl MapEnv {
    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_owned(), value.to_owned());
        self
    }
}

impl Env for MapEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Picks the endpoint once at startup. A blank value counts as absent, so the
/// default stands when neither the flag nor the environment supplies one.
/// A malformed override is still used; requests to it fail like any other
/// unreachable service.
pub fn resolve_endpoint(cli_value: Option<String>, env: &impl Env) -> EndpointBase {
    match non_blank(cli_value).or_else(|| non_blank(env.var(ENV_API_URL))) {
        Some(v) => match EndpointBase::new(v.clone()) {
            Ok(endpoint) => {
                tracing::debug!(endpoint = %endpoint.as_str(), "endpoint override found");
                endpoint
            }
            Err(e) => {
                tracing::warn!(
                    endpoint = %v,
                    error = %e,
                    "configured endpoint is not a valid http(s) url"
                );
                EndpointBase::unchecked(v)
            }
        },
        None => {
            tracing::debug!(endpoint = DEFAULT_ENDPOINT_BASE, "using default endpoint");
            EndpointBase::default()
        }
    }
}

pub fn resolve_request_timeout(
    cli_value: Option<u64>,
    env: &impl Env,
) -> Result<RequestTimeout, ConfigError> {
    match cli_value {
        Some(secs) => RequestTimeout::new(secs),
        None => match non_blank(env.var(ENV_REQUEST_TIMEOUT_SECS)) {
            Some(v) => {
                let secs = v
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidTimeout(v.clone()))?;
                RequestTimeout::new(secs)
            }
            None => Ok(RequestTimeout::default()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_cli_takes_precedence_over_env() {
        let env = MapEnv::default().with_var(ENV_API_URL, "http://env:9000");
        let ep = resolve_endpoint(Some("http://cli:9000".to_owned()), &env);
        assert_eq!(ep.as_str(), "http://cli:9000");
    }

    #[test]
    fn endpoint_env_used_when_cli_missing() {
        let env = MapEnv::default().with_var(ENV_API_URL, "https://translate.example.com/");
        let ep = resolve_endpoint(None, &env);
        assert_eq!(ep.as_str(), "https://translate.example.com");
        assert_eq!(ep.translate_url(), "https://translate.example.com/translate");
    }

    #[test]
    fn endpoint_default_used_when_env_blank() {
        let env = MapEnv::default().with_var(ENV_API_URL, "   ");
        let ep = resolve_endpoint(None, &env);
        assert_eq!(ep.as_str(), DEFAULT_ENDPOINT_BASE);
        assert_eq!(ep.translate_url(), "http://localhost:8000/translate");
    }

    #[test]
    fn endpoint_rejects_garbage_and_non_http() {
        assert!(matches!(
            EndpointBase::new("not a url"),
            Err(ConfigError::InvalidEndpoint(..))
        ));
        assert_eq!(
            EndpointBase::new("ftp://host"),
            Err(ConfigError::UnsupportedScheme("ftp".to_owned()))
        );
    }

    #[test]
    fn malformed_override_is_kept_not_fatal() {
        let env = MapEnv::default().with_var(ENV_API_URL, "translator:8000");
        let ep = resolve_endpoint(None, &env);
        assert_eq!(ep.as_str(), "translator:8000");
        assert_eq!(ep.translate_url(), "translator:8000/translate");

        let ep = resolve_endpoint(Some("not a url/".to_owned()), &MapEnv::default());
        assert_eq!(ep.as_str(), "not a url");
    }

    #[test]
    fn translate_url_respects_path_query_and_fragment() {
        let url = |base: &str| EndpointBase::new(base).expect("valid").translate_url();
        assert_eq!(url("http://h/api"), "http://h/api/translate");
        assert_eq!(url("http://h/api/"), "http://h/api/translate");
        assert_eq!(url("http://h/api?k=1"), "http://h/api/translate?k=1");
        assert_eq!(url("http://h/api#top"), "http://h/api/translate");
        assert_eq!(url("http://h:8000"), "http://h:8000/translate");
    }

    #[test]
    fn timeout_resolution() {
        let env = MapEnv::default().with_var(ENV_REQUEST_TIMEOUT_SECS, "5");
        assert_eq!(resolve_request_timeout(None, &env), Ok(RequestTimeout { secs: 5 }));
        assert_eq!(resolve_request_timeout(Some(7), &env), Ok(RequestTimeout { secs: 7 }));
        assert_eq!(resolve_request_timeout(Some(0), &env), Err(ConfigError::ZeroTimeout));
        assert_eq!(
            resolve_request_timeout(None, &MapEnv::default()),
            Ok(RequestTimeout::default())
        );

        let bad = MapEnv::default().with_var(ENV_REQUEST_TIMEOUT_SECS, "soon");
        assert_eq!(
            resolve_request_timeout(None, &bad),
            Err(ConfigError::InvalidTimeout("soon".to_owned()))
        );
    }

    #[test]
    fn app_config_defaults_to_en_to_de() {
        let cfg = AppConfig::new(EndpointBase::default());
        assert_eq!(cfg.source_lang, Language::En);
        assert_eq!(cfg.target_lang, Language::De);
        assert_eq!(cfg.request_timeout.duration(), Duration::from_secs(30));
    }
}
