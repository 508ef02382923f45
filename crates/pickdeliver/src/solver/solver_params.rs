use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

fn default_max_cycles() -> usize {
    10
}

fn default_enable_local_search() -> bool {
    true
}

#[derive(Deserialize, Serialize, JsonSchema, Clone, Debug)]
pub struct SolverParams {
    /// Upper bound on local search cycles, each cycle accepting at most one move
    #[serde(default = "default_max_cycles")]
    pub max_cycles: usize,

    #[serde(default = "default_enable_local_search")]
    pub enable_local_search: bool,
}

impl Default for SolverParams {
    fn default() -> Self {
        SolverParams {
            max_cycles: default_max_cycles(),
            enable_local_search: default_enable_local_search(),
        }
    }
}
