use crate::domain::model::{StackDeclaration, StackOutputs, ZoneLookupResult};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Lookup of pre-existing hosted zones in the live provider. `Ok(NotFound)`
/// means the zone genuinely does not exist; mechanical failures (permissions,
/// network) are errors and must not be folded into `NotFound`.
pub trait ZoneDirectory: Send + Sync {
    fn find_zone(
        &self,
        domain_name: &str,
    ) -> impl std::future::Future<Output = Result<ZoneLookupResult>> + Send;
}

/// The external provisioning engine. Accepts one complete declaration graph
/// and owns diffing, ordering, retries, and application against the provider.
#[async_trait]
pub trait ProvisioningEngine: Send + Sync {
    async fn submit(&self, stack: &StackDeclaration) -> Result<StackOutputs>;
}
