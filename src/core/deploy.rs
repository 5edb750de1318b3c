use crate::config::ServiceConfig;
use crate::core::builder::StackBuilder;
use crate::domain::model::{StackOutputs, ZoneLookupResult};
use crate::domain::ports::{ProvisioningEngine, ZoneDirectory};
use crate::utils::error::Result;
use crate::utils::validation::Validate;

/// Drives one deployment: validate the configuration, resolve the hosted
/// zone, build and check the declaration graph, submit it to the engine.
pub struct DeployEngine<Z: ZoneDirectory, E: ProvisioningEngine> {
    zones: Z,
    engine: E,
}

impl<Z: ZoneDirectory, E: ProvisioningEngine> DeployEngine<Z, E> {
    pub fn new(zones: Z, engine: E) -> Self {
        Self { zones, engine }
    }

    pub async fn run(&self, config: &ServiceConfig) -> Result<StackOutputs> {
        config.validate()?;

        tracing::info!("Resolving hosted zone for {}", config.domain_name);
        let lookup = self.zones.find_zone(&config.domain_name).await?;
        match &lookup {
            ZoneLookupResult::Found(zone) => {
                tracing::info!("Reusing hosted zone {} ({})", zone.zone_name, zone.zone_id);
            }
            ZoneLookupResult::NotFound => {
                tracing::info!(
                    "No hosted zone found for {}, declaring a new public zone",
                    config.domain_name
                );
            }
        }

        let stack = StackBuilder::new(config).build(lookup)?;
        stack.validate()?;
        tracing::info!(
            "Declared {} resources for stack {}",
            stack.resources.len(),
            stack.stack_name
        );

        tracing::info!("Submitting declaration to the provisioning engine");
        let outputs = self.engine.submit(&stack).await?;
        tracing::info!("Submit completed with {} outputs", outputs.values.len());

        Ok(outputs)
    }
}
