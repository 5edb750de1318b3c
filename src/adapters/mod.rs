// Adapters layer: manifest rendering plus concrete zone directories and
// provisioning engine hand-offs.

pub mod local;
pub mod manifest;

#[cfg(feature = "aws")]
pub mod aws;
