pub mod builder;
pub mod deploy;

pub use crate::domain::model::{
    AliasTarget, OutputValue, ResourceKind, ResourceNode, StackDeclaration, StackOutput,
    StackOutputs, TlsPolicy, ZoneLookupResult, ZoneRef,
};
pub use crate::domain::ports::{ProvisioningEngine, ZoneDirectory};
pub use crate::utils::error::Result;
