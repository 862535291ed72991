use anyhow::{anyhow, Result};
use config::Config;
use serde::Deserialize;
use std::path::Path;

/// Default FDSN event service of the IRIS DMC
pub const DEFAULT_ENDPOINT: &str = "https://service.iris.edu/fdsnws/event/1/query";

pub struct SeisqueryConfig {
    /// URL of the event query service, without query string
    pub endpoint: String,

    /// User-Agent header sent with every request
    pub user_agent: String,
}

/// Keys recognised in the configuration file and environment
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    endpoint: Option<String>,
    user_agent: Option<String>,
}

const EMPTY_CONFIG: &str = r#"### seisquery configuration file

### event query service
# endpoint = "https://service.iris.edu/fdsnws/event/1/query"

### User-Agent header sent to the service
# user_agent = "seisquery"
"#;

fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

impl Default for SeisqueryConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user_agent: default_user_agent(),
        }
    }
}

impl SeisqueryConfig {
    /// Function to create and initialize a new configuration
    ///
    /// An explicit `path` that does not exist yet is created with a commented
    /// template. Without a path, `$HOME/.seisquery/seisquery.toml` is read when
    /// present. Environment variables prefixed with `SEISQUERY_` win over the
    /// file.
    pub fn new(path: &Option<String>) -> Result<SeisqueryConfig> {
        let mut builder = Config::builder();

        match path {
            Some(p) => {
                let path = Path::new(p.as_str());
                if path.exists() {
                    let path_str = path
                        .to_str()
                        .ok_or_else(|| anyhow!("Could not convert path to string"))?;
                    builder = builder.add_source(config::File::with_name(path_str));
                } else {
                    std::fs::write(p.as_str(), EMPTY_CONFIG)
                        .map_err(|e| anyhow!("Unable to create config file: {}", e))?;
                }
            }
            None => {
                if let Some(p) = Self::config_file_path() {
                    if Path::new(p.as_str()).exists() {
                        builder = builder.add_source(config::File::with_name(p.as_str()));
                    }
                }
            }
        }

        // Add in settings from the environment (with a prefix of SEISQUERY)
        // E.g., `SEISQUERY_ENDPOINT=http://localhost:8080/query ./seisquery` would set the endpoint
        builder = builder.add_source(config::Environment::with_prefix("SEISQUERY"));

        let settings = builder
            .build()
            .map_err(|e| anyhow!("Failed to build configuration: {}", e))?;

        let raw = settings
            .try_deserialize::<RawConfig>()
            .map_err(|e| anyhow!("Failed to deserialize configuration: {}", e))?;

        let endpoint = match raw.endpoint {
            Some(e) if e.trim().is_empty() => return Err(anyhow!("endpoint must not be empty")),
            Some(e) => e.trim().to_string(),
            None => DEFAULT_ENDPOINT.to_string(),
        };

        let user_agent = raw
            .user_agent
            .filter(|ua| !ua.trim().is_empty())
            .unwrap_or_else(default_user_agent);

        Ok(SeisqueryConfig {
            endpoint,
            user_agent,
        })
    }

    /// Get the default config file path
    pub fn config_file_path() -> Option<String> {
        dirs::home_dir().map(|h| format!("{}/.seisquery/seisquery.toml", h.to_string_lossy()))
    }

    /// Display configuration summary
    pub fn summary(&self) -> String {
        [
            format!("Endpoint:    {}", self.endpoint),
            format!("User-Agent:  {}", self.user_agent),
        ]
        .join("\n")
    }
}
