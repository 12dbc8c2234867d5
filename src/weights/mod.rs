mod engine;
mod ess;
mod hooks;

pub use engine::{EssBasis, ImportanceWeights, WeightEngine};
pub use ess::effective_sample_size;
pub use hooks::{ClipTruncation, DefaultTruncation, NoScore, PlanScorer, WeightTruncation};
