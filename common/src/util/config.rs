use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub annealing: AnnealingConfig,
}

#[derive(Debug, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_netlist_file")]
    pub netlist_file: String,
    #[serde(default = "default_output_file")]
    pub output_file: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            netlist_file: default_netlist_file(),
            output_file: default_output_file(),
        }
    }
}

/// Annealing schedule shared by every replica. `replicas = 0` means "one
/// per available hardware thread".
#[derive(Debug, Deserialize, Clone)]
pub struct AnnealingConfig {
    #[serde(default = "default_initial_temp")]
    pub initial_temp: f64,
    #[serde(default = "default_final_temp")]
    pub final_temp: f64,
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    #[serde(default = "default_moves_per_temp")]
    pub moves_per_temp: usize,
    #[serde(default = "default_replicas")]
    pub replicas: usize,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_auto_tune")]
    pub auto_tune: bool,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        Self {
            initial_temp: default_initial_temp(),
            final_temp: default_final_temp(),
            alpha: default_alpha(),
            moves_per_temp: default_moves_per_temp(),
            replicas: default_replicas(),
            seed: default_seed(),
            auto_tune: default_auto_tune(),
        }
    }
}

fn default_initial_temp() -> f64 {
    1000.0
}

fn default_final_temp() -> f64 {
    0.01
}

fn default_alpha() -> f64 {
    0.95
}

fn default_moves_per_temp() -> usize {
    100
}

fn default_replicas() -> usize {
    10
}

fn default_seed() -> u64 {
    1
}

fn default_auto_tune() -> bool {
    true
}

fn default_netlist_file() -> String {
    "inputs/netlist.txt".to_string()
}

fn default_output_file() -> String {
    "output/placement.txt".to_string()
}
