use crate::config::ServiceConfig;
use crate::domain::model::{
    AliasTarget, OutputValue, ResourceKind, ResourceNode, StackDeclaration, StackOutput,
    TlsPolicy, ZoneLookupResult, ZoneRef,
};
use crate::utils::error::Result;

/// CloudFront only accepts certificates issued in this region, regardless of
/// where the rest of the stack lives.
pub const CERTIFICATE_REGION: &str = "us-east-1";

pub const INDEX_DOCUMENT: &str = "index.html";
pub const ERROR_DOCUMENT: &str = "error.html";
pub const NETWORK_MAX_AZS: u8 = 2;

/// Assembles the declaration graph for one web service: hosted zone,
/// certificates, static site bucket + distribution, container service, and
/// the alias records tying them to DNS. Pure; nothing is applied here.
pub struct StackBuilder<'a> {
    config: &'a ServiceConfig,
}

impl<'a> StackBuilder<'a> {
    pub fn new(config: &'a ServiceConfig) -> Self {
        Self { config }
    }

    pub fn build(&self, lookup: ZoneLookupResult) -> Result<StackDeclaration> {
        let cfg = self.config;
        let site_domain = cfg.frontend_domain();
        let api_domain = cfg.backend_domain();

        let mut resources = Vec::new();

        // Zone resolution: reuse over creation
        let zone = match lookup {
            ZoneLookupResult::Found(existing) => ZoneRef::Existing {
                zone_id: existing.zone_id,
                zone_name: existing.zone_name,
            },
            ZoneLookupResult::NotFound => {
                let id = format!("{}HostedZone", cfg.domain_name);
                resources.push(ResourceNode {
                    id: id.clone(),
                    kind: ResourceKind::HostedZone {
                        zone_name: cfg.domain_name.clone(),
                    },
                });
                ZoneRef::Declared(id)
            }
        };

        // DNS-validated certificates, one per public-facing endpoint
        let frontend_cert_id = format!("{}SiteCertificate", site_domain);
        resources.push(ResourceNode {
            id: frontend_cert_id.clone(),
            kind: ResourceKind::Certificate {
                domain_name: site_domain.clone(),
                zone: zone.clone(),
                region: CERTIFICATE_REGION.to_string(),
            },
        });

        let backend_cert_id = format!("{}SiteCertificate", api_domain);
        resources.push(ResourceNode {
            id: backend_cert_id.clone(),
            kind: ResourceKind::Certificate {
                domain_name: api_domain.clone(),
                zone: zone.clone(),
                region: CERTIFICATE_REGION.to_string(),
            },
        });

        // Static site: bucket named after the frontend domain, fronted by the
        // distribution, refreshed by a content deployment
        let bucket_id = "SiteBucket".to_string();
        resources.push(ResourceNode {
            id: bucket_id.clone(),
            kind: ResourceKind::Bucket {
                bucket_name: site_domain.clone(),
                index_document: INDEX_DOCUMENT.to_string(),
                error_document: ERROR_DOCUMENT.to_string(),
                public_read: true,
            },
        });

        let distribution_id = "SiteDistribution".to_string();
        resources.push(ResourceNode {
            id: distribution_id.clone(),
            kind: ResourceKind::Distribution {
                origin_bucket: bucket_id.clone(),
                certificate: frontend_cert_id.clone(),
                aliases: vec![site_domain.clone()],
                minimum_tls: TlsPolicy::TlsV1_2,
            },
        });

        resources.push(ResourceNode {
            id: "DeployWithInvalidation".to_string(),
            kind: ResourceKind::ContentDeployment {
                source_dir: cfg.content_dir.clone(),
                bucket: bucket_id.clone(),
                distribution: distribution_id.clone(),
                invalidation_paths: vec!["/*".to_string()],
            },
        });

        // Compute: network, cluster, public load-balanced container service
        let network_id = format!("{}Network", cfg.domain_name);
        resources.push(ResourceNode {
            id: network_id.clone(),
            kind: ResourceKind::Network {
                max_azs: NETWORK_MAX_AZS,
            },
        });

        let cluster_id = "Cluster".to_string();
        resources.push(ResourceNode {
            id: cluster_id.clone(),
            kind: ResourceKind::Cluster {
                network: network_id,
            },
        });

        let service_id = cfg.service_name.clone();
        resources.push(ResourceNode {
            id: service_id.clone(),
            kind: ResourceKind::ContainerService {
                service_name: cfg.service_name.clone(),
                cluster: cluster_id,
                image_context: cfg.container_dir.clone(),
                assign_public_ip: true,
            },
        });

        // Alias records: backend to the load balancer, frontend to the CDN
        resources.push(ResourceNode {
            id: format!("{}SiteAliasRecord", api_domain),
            kind: ResourceKind::AliasRecord {
                record_name: api_domain.clone(),
                zone: zone.clone(),
                target: AliasTarget::LoadBalancer(service_id),
            },
        });

        resources.push(ResourceNode {
            id: format!("{}SiteAliasRecord", site_domain),
            kind: ResourceKind::AliasRecord {
                record_name: site_domain.clone(),
                zone,
                target: AliasTarget::Distribution(distribution_id.clone()),
            },
        });

        let outputs = vec![
            StackOutput {
                name: "FrontendUrl".to_string(),
                value: OutputValue::Literal(cfg.frontend_url()),
            },
            StackOutput {
                name: "BackendUrl".to_string(),
                value: OutputValue::Literal(cfg.backend_url()),
            },
            StackOutput {
                name: "FrontendCertificateArn".to_string(),
                value: OutputValue::Attribute {
                    resource: frontend_cert_id,
                    attribute: "CertificateArn".to_string(),
                },
            },
            StackOutput {
                name: "BackendCertificateArn".to_string(),
                value: OutputValue::Attribute {
                    resource: backend_cert_id,
                    attribute: "CertificateArn".to_string(),
                },
            },
            StackOutput {
                name: "BucketName".to_string(),
                value: OutputValue::Literal(site_domain),
            },
            StackOutput {
                name: "DistributionId".to_string(),
                value: OutputValue::Attribute {
                    resource: distribution_id,
                    attribute: "DistributionId".to_string(),
                },
            },
        ];

        Ok(StackDeclaration {
            stack_name: cfg.service_name.clone(),
            account: cfg.account.clone(),
            region: cfg.region.clone(),
            resources,
            outputs,
        })
    }
}
