use crate::adapters::manifest::render_manifest;
use crate::domain::model::{ExistingZone, StackDeclaration, StackOutputs, ZoneLookupResult};
use crate::domain::ports::{ProvisioningEngine, ZoneDirectory};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;

/// Zone directory backed by a fixed map, for offline runs and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticZoneDirectory {
    zones: HashMap<String, String>,
}

impl StaticZoneDirectory {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_zone(domain_name: &str, zone_id: &str) -> Self {
        let mut zones = HashMap::new();
        zones.insert(domain_name.to_string(), zone_id.to_string());
        Self { zones }
    }
}

impl ZoneDirectory for StaticZoneDirectory {
    async fn find_zone(&self, domain_name: &str) -> Result<ZoneLookupResult> {
        match self.zones.get(domain_name) {
            Some(zone_id) => Ok(ZoneLookupResult::Found(ExistingZone {
                zone_id: zone_id.clone(),
                zone_name: domain_name.to_string(),
            })),
            None => Ok(ZoneLookupResult::NotFound),
        }
    }
}

/// Engine stand-in that renders the manifest instead of applying it. Writes
/// to a file when given a path, otherwise prints to stdout.
#[derive(Debug, Clone, Default)]
pub struct DryRunEngine {
    out: Option<PathBuf>,
}

impl DryRunEngine {
    pub fn new(out: Option<PathBuf>) -> Self {
        Self { out }
    }
}

#[async_trait]
impl ProvisioningEngine for DryRunEngine {
    async fn submit(&self, stack: &StackDeclaration) -> Result<StackOutputs> {
        let manifest = render_manifest(stack);
        let rendered = serde_json::to_string_pretty(&manifest)?;

        match &self.out {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() {
                        std::fs::create_dir_all(parent)?;
                    }
                }
                std::fs::write(path, rendered)?;
                tracing::info!("Wrote declaration manifest to {}", path.display());
            }
            None => println!("{}", rendered),
        }

        Ok(stack.literal_outputs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_directory_hits_and_misses() {
        let directory = StaticZoneDirectory::with_zone("example.com", "Z123");

        let found = directory.find_zone("example.com").await.unwrap();
        assert_eq!(
            found,
            ZoneLookupResult::Found(ExistingZone {
                zone_id: "Z123".to_string(),
                zone_name: "example.com".to_string(),
            })
        );

        let missing = directory.find_zone("other.com").await.unwrap();
        assert_eq!(missing, ZoneLookupResult::NotFound);
    }
}
