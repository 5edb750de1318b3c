use crate::utils::error::{Result, StackError};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(StackError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(StackError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(StackError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_domain_name(field_name: &str, domain: &str) -> Result<()> {
    validate_non_empty_string(field_name, domain)?;

    if domain.contains("://") || domain.contains('/') {
        return Err(StackError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: domain.to_string(),
            reason: "Expected a bare domain name, not a URL".to_string(),
        });
    }

    if !domain.contains('.') {
        return Err(StackError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: domain.to_string(),
            reason: "Domain must contain at least one dot".to_string(),
        });
    }

    // Round-trip through a URL parser to catch invalid hostnames
    match Url::parse(&format!("https://{}", domain)) {
        Ok(url) if url.host_str() == Some(domain) => Ok(()),
        _ => Err(StackError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: domain.to_string(),
            reason: "Not a valid DNS hostname".to_string(),
        }),
    }
}

pub fn validate_subdomain_label(field_name: &str, label: &str) -> Result<()> {
    validate_non_empty_string(field_name, label)?;

    if label.contains('.') {
        return Err(StackError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: label.to_string(),
            reason: "Subdomain must be a single label without dots".to_string(),
        });
    }

    if !label
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(StackError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: label.to_string(),
            reason: "Subdomain can only contain lowercase letters, numbers, and hyphens"
                .to_string(),
        });
    }

    if label.starts_with('-') || label.ends_with('-') {
        return Err(StackError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: label.to_string(),
            reason: "Subdomain cannot start or end with a hyphen".to_string(),
        });
    }

    Ok(())
}

pub fn validate_bucket_name(field_name: &str, bucket_name: &str) -> Result<()> {
    if bucket_name.is_empty() {
        return Err(StackError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: bucket_name.to_string(),
            reason: "Bucket name cannot be empty".to_string(),
        });
    }

    if bucket_name.len() < 3 || bucket_name.len() > 63 {
        return Err(StackError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: bucket_name.to_string(),
            reason: "Bucket name must be between 3 and 63 characters".to_string(),
        });
    }

    if !bucket_name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.')
    {
        return Err(StackError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: bucket_name.to_string(),
            reason: "Bucket name can only contain lowercase letters, numbers, hyphens, and dots"
                .to_string(),
        });
    }

    if bucket_name.starts_with('-') || bucket_name.ends_with('-') {
        return Err(StackError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: bucket_name.to_string(),
            reason: "Bucket name cannot start or end with a hyphen".to_string(),
        });
    }

    Ok(())
}

pub fn validate_aws_region(field_name: &str, region: &str) -> Result<()> {
    validate_non_empty_string(field_name, region)?;

    if !region
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(StackError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: region.to_string(),
            reason: "Region can only contain lowercase letters, numbers, and hyphens".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_domain_name() {
        assert!(validate_domain_name("domain_name", "example.com").is_ok());
        assert!(validate_domain_name("domain_name", "sub.example.co.uk").is_ok());
        assert!(validate_domain_name("domain_name", "").is_err());
        assert!(validate_domain_name("domain_name", "localhost").is_err());
        assert!(validate_domain_name("domain_name", "https://example.com").is_err());
        assert!(validate_domain_name("domain_name", "exa mple.com").is_err());
    }

    #[test]
    fn test_validate_subdomain_label() {
        assert!(validate_subdomain_label("frontend_subdomain", "app").is_ok());
        assert!(validate_subdomain_label("frontend_subdomain", "app-v2").is_ok());
        assert!(validate_subdomain_label("frontend_subdomain", "app.www").is_err());
        assert!(validate_subdomain_label("frontend_subdomain", "App").is_err());
        assert!(validate_subdomain_label("frontend_subdomain", "-app").is_err());
        assert!(validate_subdomain_label("frontend_subdomain", "").is_err());
    }

    #[test]
    fn test_validate_bucket_name() {
        assert!(validate_bucket_name("bucket", "app.example.com").is_ok());
        assert!(validate_bucket_name("bucket", "ab").is_err());
        assert!(validate_bucket_name("bucket", "Invalid_Bucket").is_err());
        assert!(validate_bucket_name("bucket", "-bucket").is_err());
    }

    #[test]
    fn test_validate_aws_region() {
        assert!(validate_aws_region("region", "us-east-1").is_ok());
        assert!(validate_aws_region("region", "ap-southeast-2").is_ok());
        assert!(validate_aws_region("region", "US-EAST-1").is_err());
        assert!(validate_aws_region("region", "").is_err());
    }
}
