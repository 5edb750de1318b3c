use crate::adapters::manifest::render_manifest;
use crate::domain::model::{ExistingZone, StackDeclaration, StackOutputs, ZoneLookupResult};
use crate::domain::ports::{ProvisioningEngine, ZoneDirectory};
use crate::utils::error::{Result, StackError};
use async_trait::async_trait;
use aws_sdk_route53::Client as Route53Client;
use aws_sdk_s3::Client as S3Client;
use std::env;

/// Hosted zone lookup against Route53. Only an empty result is `NotFound`;
/// SDK failures (permissions, network) propagate as errors instead of
/// silently triggering zone creation.
#[derive(Debug, Clone)]
pub struct Route53ZoneDirectory {
    client: Route53Client,
}

impl Route53ZoneDirectory {
    pub fn new(client: Route53Client) -> Self {
        Self { client }
    }
}

impl ZoneDirectory for Route53ZoneDirectory {
    async fn find_zone(&self, domain_name: &str) -> Result<ZoneLookupResult> {
        // Route53 stores zone names with a trailing dot
        let wanted = format!("{}.", domain_name.trim_end_matches('.'));

        let resp = self
            .client
            .list_hosted_zones_by_name()
            .dns_name(domain_name)
            .send()
            .await
            .map_err(|e| StackError::ZoneLookupError {
                message: format!("ListHostedZonesByName failed: {}", e),
            })?;

        for zone in resp.hosted_zones() {
            let private = zone.config().map(|c| c.private_zone()).unwrap_or(false);
            if zone.name() == wanted && !private {
                let zone_id = zone.id().trim_start_matches("/hostedzone/").to_string();
                tracing::debug!("Found hosted zone {} for {}", zone_id, domain_name);
                return Ok(ZoneLookupResult::Found(ExistingZone {
                    zone_id,
                    zone_name: domain_name.to_string(),
                }));
            }
        }

        Ok(ZoneLookupResult::NotFound)
    }
}

/// Where the provisioning engine picks manifests up.
#[derive(Debug, Clone)]
pub struct IntakeConfig {
    pub bucket: String,
    pub prefix: String,
}

impl IntakeConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            bucket: env::var("INTAKE_BUCKET").map_err(|_| StackError::MissingConfigError {
                field: "INTAKE_BUCKET".to_string(),
            })?,
            prefix: env::var("INTAKE_PREFIX").unwrap_or_else(|_| "stacks".to_string()),
        })
    }
}

/// Hands the rendered manifest to the provisioning engine by writing it to
/// the engine's S3 intake location. The engine applies it asynchronously and
/// resolves the attribute outputs; this adapter reports what is already
/// known plus the manifest location.
#[derive(Debug, Clone)]
pub struct S3IntakeEngine {
    client: S3Client,
    config: IntakeConfig,
}

impl S3IntakeEngine {
    pub fn new(client: S3Client, config: IntakeConfig) -> Self {
        Self { client, config }
    }

    fn manifest_key(&self, stack: &StackDeclaration) -> String {
        format!(
            "{}/{}/{}.json",
            self.config.prefix,
            stack.stack_name,
            chrono::Utc::now().format("%Y%m%dT%H%M%SZ")
        )
    }
}

#[async_trait]
impl ProvisioningEngine for S3IntakeEngine {
    async fn submit(&self, stack: &StackDeclaration) -> Result<StackOutputs> {
        let manifest = render_manifest(stack);
        let body = serde_json::to_vec_pretty(&manifest)?;
        let key = self.manifest_key(stack);

        self.client
            .put_object()
            .bucket(&self.config.bucket)
            .key(&key)
            .content_type("application/json")
            .body(body.into())
            .send()
            .await
            .map_err(|e| StackError::EngineError {
                message: format!("Failed to submit the declaration manifest: {}", e),
            })?;

        let location = format!("s3://{}/{}", self.config.bucket, key);
        tracing::info!("Declaration submitted to {}", location);

        let mut outputs = stack.literal_outputs();
        outputs
            .values
            .insert("ManifestLocation".to_string(), location);
        Ok(outputs)
    }
}
