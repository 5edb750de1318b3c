#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::utils::error::{Result, StackError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_CONTENT_DIR: &str = "./content";
pub const DEFAULT_CONTAINER_DIR: &str = "./docker";

/// Immutable service configuration, constructed once at process entry and
/// passed to the builder. Loaded from the environment or from a stack.toml.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub service_name: String,
    pub domain_name: String,
    pub frontend_subdomain: String,
    pub backend_subdomain: String,
    pub account: Option<String>,
    pub region: String,
    pub content_dir: PathBuf,
    pub container_dir: PathBuf,
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            service_name: required_env("SERVICE_NAME")?,
            domain_name: required_env("DOMAIN_NAME")?,
            frontend_subdomain: required_env("FRONTEND_SUBDOMAIN")?,
            backend_subdomain: required_env("BACKEND_SUBDOMAIN")?,
            account: env::var("ACCOUNT_ID").ok(),
            region: env::var("REGION").unwrap_or_else(|_| DEFAULT_REGION.to_string()),
            content_dir: env::var("CONTENT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONTENT_DIR)),
            container_dir: env::var("CONTAINER_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONTAINER_DIR)),
        })
    }

    pub fn frontend_domain(&self) -> String {
        format!("{}.{}", self.frontend_subdomain, self.domain_name)
    }

    pub fn backend_domain(&self) -> String {
        format!("{}.{}", self.backend_subdomain, self.domain_name)
    }

    pub fn frontend_url(&self) -> String {
        format!("https://{}", self.frontend_domain())
    }

    pub fn backend_url(&self) -> String {
        format!("https://{}", self.backend_domain())
    }
}

fn required_env(name: &str) -> Result<String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(StackError::MissingConfigError {
            field: name.to_string(),
        }),
    }
}

impl Validate for ServiceConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("service_name", &self.service_name)?;
        validation::validate_domain_name("domain_name", &self.domain_name)?;
        validation::validate_subdomain_label("frontend_subdomain", &self.frontend_subdomain)?;
        validation::validate_subdomain_label("backend_subdomain", &self.backend_subdomain)?;

        // The frontend domain doubles as the bucket name, so it must satisfy
        // bucket naming rules as well
        validation::validate_bucket_name("frontend_domain", &self.frontend_domain())?;

        validation::validate_aws_region("region", &self.region)?;
        validation::validate_path("content_dir", &self.content_dir.to_string_lossy())?;
        validation::validate_path("container_dir", &self.container_dir.to_string_lossy())?;

        if self.frontend_subdomain == self.backend_subdomain {
            return Err(StackError::InvalidConfigValueError {
                field: "backend_subdomain".to_string(),
                value: self.backend_subdomain.clone(),
                reason: "Frontend and backend subdomains must differ".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ServiceConfig {
        ServiceConfig {
            service_name: "svc".to_string(),
            domain_name: "example.com".to_string(),
            frontend_subdomain: "app".to_string(),
            backend_subdomain: "api".to_string(),
            account: None,
            region: DEFAULT_REGION.to_string(),
            content_dir: PathBuf::from(DEFAULT_CONTENT_DIR),
            container_dir: PathBuf::from(DEFAULT_CONTAINER_DIR),
        }
    }

    #[test]
    fn test_domain_helpers() {
        let config = sample();
        assert_eq!(config.frontend_domain(), "app.example.com");
        assert_eq!(config.backend_domain(), "api.example.com");
        assert_eq!(config.frontend_url(), "https://app.example.com");
        assert_eq!(config.backend_url(), "https://api.example.com");
    }

    #[test]
    fn test_validate_accepts_sample() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_equal_subdomains() {
        let mut config = sample();
        config.backend_subdomain = "app".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_domain() {
        let mut config = sample();
        config.domain_name = "not a domain".to_string();
        assert!(config.validate().is_err());
    }

    // Single test for the env path so the process environment is only
    // mutated from one place.
    #[test]
    fn test_from_env_requires_every_key() {
        let required = [
            "SERVICE_NAME",
            "DOMAIN_NAME",
            "FRONTEND_SUBDOMAIN",
            "BACKEND_SUBDOMAIN",
        ];
        let values = ["svc", "example.com", "app", "api"];

        for (key, value) in required.iter().zip(values.iter()) {
            env::set_var(key, value);
        }

        let config = ServiceConfig::from_env().unwrap();
        assert_eq!(config.service_name, "svc");
        assert_eq!(config.region, DEFAULT_REGION);
        assert_eq!(config.account, None);
        assert_eq!(config.content_dir, PathBuf::from(DEFAULT_CONTENT_DIR));

        for missing in &required {
            env::remove_var(missing);
            let err = ServiceConfig::from_env().unwrap_err();
            match err {
                StackError::MissingConfigError { field } => assert_eq!(&field, missing),
                other => panic!("expected MissingConfigError, got {:?}", other),
            }
            env::set_var(missing, "restored.value");
        }

        for key in &required {
            env::remove_var(key);
        }
    }
}
