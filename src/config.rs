use std::env;
use std::fmt;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Data-source configuration
// ---------------------------------------------------------------------------

/// Environment variable naming the BOL02 export (URL or local path).
/// `.env` files are honoured via dotenvy at startup.
pub const SOURCE_ENV_VAR: &str = "BOL02_TRACKING_URL";

/// Where the tracking CSV comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Url(String),
    File(PathBuf),
}

impl DataSource {
    /// Read the configured source from the environment, if set.
    pub fn from_env() -> Option<Self> {
        let value = env::var(SOURCE_ENV_VAR).ok()?;
        let value = value.trim();
        if value.is_empty() {
            None
        } else {
            Some(Self::parse(value))
        }
    }

    /// Anything that is not an http(s) URL is treated as a local path.
    pub fn parse(value: &str) -> Self {
        if value.starts_with("http://") || value.starts_with("https://") {
            DataSource::Url(value.to_string())
        } else {
            DataSource::File(PathBuf::from(value))
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Url(url) => write!(f, "{url}"),
            DataSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}
