use crate::utils::error::{Result, StackError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Name under which a resource is declared and referenced within one stack.
pub type LogicalId = String;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingZone {
    pub zone_id: String,
    pub zone_name: String,
}

/// Outcome of looking a hosted zone up in the live provider. A lookup that
/// mechanically fails (permissions, network) is an `Err` at the port, not a
/// `NotFound`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoneLookupResult {
    Found(ExistingZone),
    NotFound,
}

/// Reference to the hosted zone carried by records and certificates. Either
/// the zone pre-exists (reuse) or it is declared by this stack (fallback).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoneRef {
    Existing { zone_id: String, zone_name: String },
    Declared(LogicalId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TlsPolicy {
    TlsV1,
    TlsV1_1,
    TlsV1_2,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AliasTarget {
    Distribution(LogicalId),
    LoadBalancer(LogicalId),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ResourceKind {
    HostedZone {
        zone_name: String,
    },
    Certificate {
        domain_name: String,
        zone: ZoneRef,
        region: String,
    },
    Bucket {
        bucket_name: String,
        index_document: String,
        error_document: String,
        public_read: bool,
    },
    Distribution {
        origin_bucket: LogicalId,
        certificate: LogicalId,
        aliases: Vec<String>,
        minimum_tls: TlsPolicy,
    },
    ContentDeployment {
        source_dir: PathBuf,
        bucket: LogicalId,
        distribution: LogicalId,
        invalidation_paths: Vec<String>,
    },
    Network {
        max_azs: u8,
    },
    Cluster {
        network: LogicalId,
    },
    ContainerService {
        service_name: String,
        cluster: LogicalId,
        image_context: PathBuf,
        assign_public_ip: bool,
    },
    AliasRecord {
        record_name: String,
        zone: ZoneRef,
        target: AliasTarget,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceNode {
    pub id: LogicalId,
    pub kind: ResourceKind,
}

/// Output values are either known at declaration time or an attribute the
/// engine resolves on apply (certificate identifier, distribution id).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputValue {
    Literal(String),
    Attribute {
        resource: LogicalId,
        attribute: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackOutput {
    pub name: String,
    pub value: OutputValue,
}

/// Resolved outputs returned by a provisioning engine after submit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackOutputs {
    pub values: BTreeMap<String, String>,
}

/// The declaration graph: desired resources and their cross-references,
/// built once and handed to the engine in a single submit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackDeclaration {
    pub stack_name: String,
    pub account: Option<String>,
    pub region: String,
    pub resources: Vec<ResourceNode>,
    pub outputs: Vec<StackOutput>,
}

impl StackDeclaration {
    pub fn resource(&self, id: &str) -> Option<&ResourceNode> {
        self.resources.iter().find(|node| node.id == id)
    }

    pub fn resources_of<F: Fn(&ResourceKind) -> bool>(&self, pred: F) -> Vec<&ResourceNode> {
        self.resources
            .iter()
            .filter(|node| pred(&node.kind))
            .collect()
    }

    /// Internal consistency check run before submit: logical ids are unique,
    /// every cross-reference resolves to a node of the expected kind, all
    /// zone references denote the same zone, and every certificate's domain
    /// is matched by exactly one alias record.
    pub fn validate(&self) -> Result<()> {
        let mut seen = std::collections::HashSet::new();
        for node in &self.resources {
            if !seen.insert(node.id.as_str()) {
                return Err(StackError::GraphError {
                    message: format!("Duplicate logical id: {}", node.id),
                });
            }
        }

        let mut zone_refs: Vec<&ZoneRef> = Vec::new();
        for node in &self.resources {
            match &node.kind {
                ResourceKind::Certificate { zone, .. } => {
                    self.check_zone_ref(&node.id, zone)?;
                    zone_refs.push(zone);
                }
                ResourceKind::AliasRecord { zone, target, .. } => {
                    self.check_zone_ref(&node.id, zone)?;
                    zone_refs.push(zone);
                    match target {
                        AliasTarget::Distribution(id) => self.check_ref(
                            &node.id,
                            id,
                            |k| matches!(k, ResourceKind::Distribution { .. }),
                            "distribution",
                        )?,
                        AliasTarget::LoadBalancer(id) => self.check_ref(
                            &node.id,
                            id,
                            |k| matches!(k, ResourceKind::ContainerService { .. }),
                            "container service",
                        )?,
                    }
                }
                ResourceKind::Distribution {
                    origin_bucket,
                    certificate,
                    ..
                } => {
                    self.check_ref(
                        &node.id,
                        origin_bucket,
                        |k| matches!(k, ResourceKind::Bucket { .. }),
                        "bucket",
                    )?;
                    self.check_ref(
                        &node.id,
                        certificate,
                        |k| matches!(k, ResourceKind::Certificate { .. }),
                        "certificate",
                    )?;
                }
                ResourceKind::ContentDeployment {
                    bucket,
                    distribution,
                    ..
                } => {
                    self.check_ref(
                        &node.id,
                        bucket,
                        |k| matches!(k, ResourceKind::Bucket { .. }),
                        "bucket",
                    )?;
                    self.check_ref(
                        &node.id,
                        distribution,
                        |k| matches!(k, ResourceKind::Distribution { .. }),
                        "distribution",
                    )?;
                }
                ResourceKind::Cluster { network } => {
                    self.check_ref(
                        &node.id,
                        network,
                        |k| matches!(k, ResourceKind::Network { .. }),
                        "network",
                    )?;
                }
                ResourceKind::ContainerService { cluster, .. } => {
                    self.check_ref(
                        &node.id,
                        cluster,
                        |k| matches!(k, ResourceKind::Cluster { .. }),
                        "cluster",
                    )?;
                }
                ResourceKind::HostedZone { .. }
                | ResourceKind::Bucket { .. }
                | ResourceKind::Network { .. } => {}
            }
        }

        if let Some(first) = zone_refs.first() {
            if zone_refs.iter().any(|z| z != first) {
                return Err(StackError::GraphError {
                    message: "All records and certificates must reference the same hosted zone"
                        .to_string(),
                });
            }
        }

        for node in &self.resources {
            if let ResourceKind::Certificate { domain_name, .. } = &node.kind {
                let matching = self
                    .resources
                    .iter()
                    .filter(|n| {
                        matches!(&n.kind, ResourceKind::AliasRecord { record_name, .. }
                            if record_name == domain_name)
                    })
                    .count();
                if matching != 1 {
                    return Err(StackError::GraphError {
                        message: format!(
                            "Certificate {} for {} must match exactly one alias record, found {}",
                            node.id, domain_name, matching
                        ),
                    });
                }
            }
        }

        for output in &self.outputs {
            if let OutputValue::Attribute { resource, .. } = &output.value {
                if self.resource(resource).is_none() {
                    return Err(StackError::GraphError {
                        message: format!(
                            "Output {} references undeclared resource {}",
                            output.name, resource
                        ),
                    });
                }
            }
        }

        Ok(())
    }

    /// Outputs resolvable without applying anything. Attribute outputs stay
    /// marked as pending; the engine fills them in on apply.
    pub fn literal_outputs(&self) -> StackOutputs {
        let mut values = BTreeMap::new();
        for output in &self.outputs {
            let value = match &output.value {
                OutputValue::Literal(v) => v.clone(),
                OutputValue::Attribute {
                    resource,
                    attribute,
                } => format!("(pending: {}.{})", resource, attribute),
            };
            values.insert(output.name.clone(), value);
        }
        StackOutputs { values }
    }

    fn check_zone_ref(&self, from: &str, zone: &ZoneRef) -> Result<()> {
        match zone {
            ZoneRef::Existing { .. } => Ok(()),
            ZoneRef::Declared(id) => self.check_ref(
                from,
                id,
                |k| matches!(k, ResourceKind::HostedZone { .. }),
                "hosted zone",
            ),
        }
    }

    fn check_ref<F: Fn(&ResourceKind) -> bool>(
        &self,
        from: &str,
        to: &str,
        pred: F,
        expected: &str,
    ) -> Result<()> {
        match self.resource(to) {
            Some(node) if pred(&node.kind) => Ok(()),
            Some(_) => Err(StackError::GraphError {
                message: format!("{} references {} which is not a {}", from, to, expected),
            }),
            None => Err(StackError::GraphError {
                message: format!("{} references undeclared resource {}", from, to),
            }),
        }
    }
}
