//! Domain types.

mod device;
mod summary;

pub use device::Device;
pub use summary::DistributionSummary;
