use crate::config::{ServiceConfig, DEFAULT_CONTAINER_DIR, DEFAULT_CONTENT_DIR, DEFAULT_REGION};
use crate::utils::error::{Result, StackError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File-based alternative to the process environment (stack.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub service: ServiceSection,
    pub provision: Option<ProvisionSection>,
    pub paths: Option<PathsSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceSection {
    pub name: String,
    pub domain_name: String,
    pub frontend_subdomain: String,
    pub backend_subdomain: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvisionSection {
    pub account: Option<String>,
    pub region: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsSection {
    pub content_dir: Option<PathBuf>,
    pub container_dir: Option<PathBuf>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(StackError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| StackError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    pub fn into_service_config(self) -> ServiceConfig {
        let provision = self.provision.unwrap_or(ProvisionSection {
            account: None,
            region: None,
        });
        let paths = self.paths.unwrap_or(PathsSection {
            content_dir: None,
            container_dir: None,
        });

        ServiceConfig {
            service_name: self.service.name,
            domain_name: self.service.domain_name,
            frontend_subdomain: self.service.frontend_subdomain,
            backend_subdomain: self.service.backend_subdomain,
            account: provision.account,
            region: provision
                .region
                .unwrap_or_else(|| DEFAULT_REGION.to_string()),
            content_dir: paths
                .content_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONTENT_DIR)),
            container_dir: paths
                .container_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONTAINER_DIR)),
        }
    }
}

/// Replaces `${VAR_NAME}` occurrences with the corresponding environment
/// variable; unresolved names are left in place.
fn substitute_env_vars(content: &str) -> String {
    use regex::Regex;
    let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    })
    .to_string()
}
