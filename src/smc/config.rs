use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::{
    constraints::ConstraintSpec,
    error::Result,
    graph::Graph,
    io::json::read_json,
    smc::{DistrictMap, SmcParams},
};

/// Everything a run needs besides the sampler, as read from a JSON file:
///
/// ```json
/// {
///   "adjacency": [[1, 2], [0, 3], [0, 3], [1, 2]],
///   "pop": [10, 10, 10, 10],
///   "counties": [1, 1, 2, 2],
///   "params": { "ndists": 2, "nsims": 500 },
///   "constraints": { "status_quo": { "strength": 0.5, "current": [1, 1, 2, 2] } }
/// }
/// ```
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    pub adjacency: Graph,
    pub pop: Vec<u64>,
    #[serde(default)]
    pub counties: Option<Vec<u32>>,
    pub params: SmcParams,
    #[serde(default)]
    pub constraints: ConstraintSpec,
}

impl RunConfig {
    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        read_json(path).with_context(|| format!("[RunConfig::from_json_file] reading {}", path.display()))
    }

    /// Build the district map described by this config.
    pub fn district_map(&self) -> Result<DistrictMap> {
        let map = DistrictMap::new(self.adjacency.clone(), self.pop.clone())?;
        Ok(match &self.counties {
            Some(counties) => map.with_counties(counties.clone()),
            None => map,
        })
    }
}
