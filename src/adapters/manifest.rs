use crate::domain::model::{
    AliasTarget, OutputValue, ResourceKind, ResourceNode, StackDeclaration, StackOutput,
    TlsPolicy, ZoneRef,
};
use serde_json::{json, Value};

pub const MANIFEST_VERSION: u32 = 1;

/// Renders the declaration graph into the engine wire format: a JSON
/// document of typed resource entries in declaration order, with `ref` /
/// `attr` objects for cross-references. Engines translate this into their
/// own resource model; nothing provider-specific leaks into the graph.
pub fn render_manifest(stack: &StackDeclaration) -> Value {
    json!({
        "version": MANIFEST_VERSION,
        "generatedAt": chrono::Utc::now().to_rfc3339(),
        "stack": stack.stack_name,
        "account": stack.account,
        "region": stack.region,
        "resources": stack.resources.iter().map(render_resource).collect::<Vec<_>>(),
        "outputs": stack.outputs.iter().map(render_output).collect::<Vec<_>>(),
    })
}

fn render_resource(node: &ResourceNode) -> Value {
    let (type_name, properties) = match &node.kind {
        ResourceKind::HostedZone { zone_name } => (
            "dns/hosted-zone",
            json!({
                "zoneName": zone_name,
                "public": true,
            }),
        ),
        ResourceKind::Certificate {
            domain_name,
            zone,
            region,
        } => (
            "tls/certificate",
            json!({
                "domainName": domain_name,
                "validation": "dns",
                "zone": render_zone_ref(zone),
                "region": region,
            }),
        ),
        ResourceKind::Bucket {
            bucket_name,
            index_document,
            error_document,
            public_read,
        } => (
            "storage/site-bucket",
            json!({
                "bucketName": bucket_name,
                "indexDocument": index_document,
                "errorDocument": error_document,
                "publicRead": public_read,
            }),
        ),
        ResourceKind::Distribution {
            origin_bucket,
            certificate,
            aliases,
            minimum_tls,
        } => (
            "cdn/distribution",
            json!({
                "origin": reference(origin_bucket),
                "certificate": reference(certificate),
                "aliases": aliases,
                "minimumTls": tls_policy_name(*minimum_tls),
            }),
        ),
        ResourceKind::ContentDeployment {
            source_dir,
            bucket,
            distribution,
            invalidation_paths,
        } => (
            "cdn/content-deployment",
            json!({
                "sourceDir": source_dir,
                "bucket": reference(bucket),
                "distribution": reference(distribution),
                "invalidationPaths": invalidation_paths,
            }),
        ),
        ResourceKind::Network { max_azs } => (
            "compute/network",
            json!({
                "maxAvailabilityZones": max_azs,
            }),
        ),
        ResourceKind::Cluster { network } => (
            "compute/cluster",
            json!({
                "network": reference(network),
            }),
        ),
        ResourceKind::ContainerService {
            service_name,
            cluster,
            image_context,
            assign_public_ip,
        } => (
            "compute/load-balanced-service",
            json!({
                "serviceName": service_name,
                "cluster": reference(cluster),
                "imageContext": image_context,
                "assignPublicIp": assign_public_ip,
            }),
        ),
        ResourceKind::AliasRecord {
            record_name,
            zone,
            target,
        } => (
            "dns/alias-record",
            json!({
                "recordName": record_name,
                "zone": render_zone_ref(zone),
                "target": render_alias_target(target),
            }),
        ),
    };

    json!({
        "id": node.id,
        "type": type_name,
        "properties": properties,
    })
}

fn render_output(output: &StackOutput) -> Value {
    match &output.value {
        OutputValue::Literal(value) => json!({
            "name": output.name,
            "value": value,
        }),
        OutputValue::Attribute {
            resource,
            attribute,
        } => json!({
            "name": output.name,
            "attr": { "resource": resource, "name": attribute },
        }),
    }
}

fn render_zone_ref(zone: &ZoneRef) -> Value {
    match zone {
        ZoneRef::Existing { zone_id, zone_name } => json!({
            "zoneId": zone_id,
            "zoneName": zone_name,
        }),
        ZoneRef::Declared(id) => reference(id),
    }
}

fn render_alias_target(target: &AliasTarget) -> Value {
    match target {
        AliasTarget::Distribution(id) => json!({ "distribution": reference(id) }),
        AliasTarget::LoadBalancer(id) => json!({ "loadBalancer": reference(id) }),
    }
}

fn reference(id: &str) -> Value {
    json!({ "ref": id })
}

fn tls_policy_name(policy: TlsPolicy) -> &'static str {
    match policy {
        TlsPolicy::TlsV1 => "TLSv1",
        TlsPolicy::TlsV1_1 => "TLSv1.1",
        TlsPolicy::TlsV1_2 => "TLSv1.2",
    }
}
