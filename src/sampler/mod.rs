mod config;
mod precomputed;
mod sampler;

pub use config::{SamplerConfig, Verbosity};
pub use precomputed::PrecomputedSampler;
pub use sampler::{Ensemble, PartitionSampler};
pub(crate) use sampler::check_shape;
