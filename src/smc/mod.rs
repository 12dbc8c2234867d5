mod config;
mod map;
mod params;
mod result;
mod run;

pub use config::RunConfig;
pub use map::DistrictMap;
pub use params::SmcParams;
pub use result::{ALGORITHM, SmcResult};
pub use run::run_smc;
