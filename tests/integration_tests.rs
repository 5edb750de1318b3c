use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use web_stack::core::{
    AliasTarget, ProvisioningEngine, ResourceKind, StackDeclaration, StackOutputs, ZoneDirectory,
    ZoneLookupResult, ZoneRef,
};
use web_stack::utils::error::{Result, StackError};
use web_stack::{DeployEngine, DryRunEngine, ServiceConfig, StaticZoneDirectory};

#[derive(Clone, Default)]
struct RecordingEngine {
    submitted: Arc<Mutex<Vec<StackDeclaration>>>,
}

impl RecordingEngine {
    fn new() -> Self {
        Self::default()
    }

    async fn submissions(&self) -> Vec<StackDeclaration> {
        self.submitted.lock().await.clone()
    }
}

#[async_trait]
impl ProvisioningEngine for RecordingEngine {
    async fn submit(&self, stack: &StackDeclaration) -> Result<StackOutputs> {
        let mut submitted = self.submitted.lock().await;
        submitted.push(stack.clone());
        Ok(stack.literal_outputs())
    }
}

struct FailingZoneDirectory;

impl ZoneDirectory for FailingZoneDirectory {
    async fn find_zone(&self, _domain_name: &str) -> Result<ZoneLookupResult> {
        Err(StackError::ZoneLookupError {
            message: "access denied".to_string(),
        })
    }
}

fn sample_config() -> ServiceConfig {
    ServiceConfig {
        service_name: "svc".to_string(),
        domain_name: "example.com".to_string(),
        frontend_subdomain: "app".to_string(),
        backend_subdomain: "api".to_string(),
        account: None,
        region: "us-east-1".to_string(),
        content_dir: PathBuf::from("./content"),
        container_dir: PathBuf::from("./docker"),
    }
}

#[tokio::test]
async fn test_end_to_end_without_existing_zone() {
    let recorder = RecordingEngine::new();
    let engine = DeployEngine::new(StaticZoneDirectory::empty(), recorder.clone());

    let outputs = engine.run(&sample_config()).await.unwrap();

    let submissions = recorder.submissions().await;
    assert_eq!(submissions.len(), 1);
    let stack = &submissions[0];

    // Exactly one new public hosted zone named after the domain
    let zones: Vec<_> = stack
        .resources
        .iter()
        .filter_map(|n| match &n.kind {
            ResourceKind::HostedZone { zone_name } => Some(zone_name.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(zones, vec!["example.com"]);

    // Certificates for both subdomains, all bound to the declared zone
    let mut cert_domains: Vec<String> = stack
        .resources
        .iter()
        .filter_map(|n| match &n.kind {
            ResourceKind::Certificate { domain_name, zone, .. } => {
                assert_eq!(zone, &ZoneRef::Declared("example.comHostedZone".to_string()));
                Some(domain_name.clone())
            }
            _ => None,
        })
        .collect();
    cert_domains.sort();
    assert_eq!(cert_domains, vec!["api.example.com", "app.example.com"]);

    // Bucket named after the frontend domain, distribution fronting it
    let bucket = stack
        .resources
        .iter()
        .find_map(|n| match &n.kind {
            ResourceKind::Bucket { bucket_name, .. } => Some((n.id.clone(), bucket_name.clone())),
            _ => None,
        })
        .unwrap();
    assert_eq!(bucket.1, "app.example.com");

    let distribution = stack
        .resources
        .iter()
        .find_map(|n| match &n.kind {
            ResourceKind::Distribution { origin_bucket, .. } => {
                Some((n.id.clone(), origin_bucket.clone()))
            }
            _ => None,
        })
        .unwrap();
    assert_eq!(distribution.1, bucket.0);

    // Exactly two alias records with the right targets
    let records: Vec<_> = stack
        .resources
        .iter()
        .filter_map(|n| match &n.kind {
            ResourceKind::AliasRecord {
                record_name,
                target,
                ..
            } => Some((record_name.clone(), target.clone())),
            _ => None,
        })
        .collect();
    assert_eq!(records.len(), 2);
    assert!(records.contains(&(
        "app.example.com".to_string(),
        AliasTarget::Distribution(distribution.0),
    )));
    assert!(records.contains(&(
        "api.example.com".to_string(),
        AliasTarget::LoadBalancer("svc".to_string()),
    )));

    assert_eq!(
        outputs.values.get("FrontendUrl").unwrap(),
        "https://app.example.com"
    );
    assert_eq!(
        outputs.values.get("BackendUrl").unwrap(),
        "https://api.example.com"
    );
}

#[tokio::test]
async fn test_end_to_end_reuses_existing_zone() {
    let recorder = RecordingEngine::new();
    let engine = DeployEngine::new(
        StaticZoneDirectory::with_zone("example.com", "Z2FDTNDATAQYW2"),
        recorder.clone(),
    );

    engine.run(&sample_config()).await.unwrap();

    let submissions = recorder.submissions().await;
    assert_eq!(submissions.len(), 1);
    let stack = &submissions[0];

    // Zero new-zone declarations when the zone already exists
    assert!(!stack
        .resources
        .iter()
        .any(|n| matches!(n.kind, ResourceKind::HostedZone { .. })));

    for node in &stack.resources {
        if let ResourceKind::AliasRecord { zone, .. } = &node.kind {
            assert_eq!(
                zone,
                &ZoneRef::Existing {
                    zone_id: "Z2FDTNDATAQYW2".to_string(),
                    zone_name: "example.com".to_string(),
                }
            );
        }
    }
}

#[tokio::test]
async fn test_invalid_config_fails_before_submission() {
    let recorder = RecordingEngine::new();
    let engine = DeployEngine::new(StaticZoneDirectory::empty(), recorder.clone());

    let mut config = sample_config();
    config.domain_name = "not a domain".to_string();

    let result = engine.run(&config).await;
    assert!(result.is_err());
    assert!(recorder.submissions().await.is_empty());
}

#[tokio::test]
async fn test_zone_lookup_error_is_fatal() {
    let recorder = RecordingEngine::new();
    let engine = DeployEngine::new(FailingZoneDirectory, recorder.clone());

    let err = engine.run(&sample_config()).await.unwrap_err();
    assert!(matches!(err, StackError::ZoneLookupError { .. }));
    assert!(recorder.submissions().await.is_empty());
}

#[tokio::test]
async fn test_dry_run_writes_manifest_file() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let manifest_path = temp_dir.path().join("manifest.json");

    let engine = DeployEngine::new(
        StaticZoneDirectory::empty(),
        DryRunEngine::new(Some(manifest_path.clone())),
    );

    let outputs = engine.run(&sample_config()).await.unwrap();

    let rendered = std::fs::read_to_string(&manifest_path).unwrap();
    let manifest: serde_json::Value = serde_json::from_str(&rendered).unwrap();

    assert_eq!(manifest["stack"], "svc");
    let resources = manifest["resources"].as_array().unwrap();
    assert!(resources
        .iter()
        .any(|r| r["type"] == "compute/load-balanced-service"));

    // Attribute outputs stay pending in a dry run
    assert!(outputs
        .values
        .get("DistributionId")
        .unwrap()
        .starts_with("(pending:"));
}
