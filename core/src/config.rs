//! Client configuration parsed from environment variables.

pub const DEFAULT_ENDPOINT: &str = "http://localhost:3000/students";
pub const ENDPOINT_ENV: &str = "STUDENTS_ENDPOINT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the student resource collection, without trailing `/`.
    pub endpoint: String,
}

impl ClientConfig {
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.trim().trim_end_matches('/').to_string(),
        }
    }

    /// Build config from the environment.
    ///
    /// Optional:
    /// - `STUDENTS_ENDPOINT`: default `http://localhost:3000/students`
    pub fn from_env() -> Self {
        Self::from_endpoint_var(std::env::var(ENDPOINT_ENV).ok().as_deref())
    }

    fn from_endpoint_var(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(endpoint) if !endpoint.is_empty() => Self::new(endpoint),
            _ => Self::new(DEFAULT_ENDPOINT),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}
