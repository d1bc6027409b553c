//! Output configuration (`[output]` section)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Colored terminal output (default: true)
    pub color: bool,
    /// Default file for `map` output (default: "map.svg")
    pub map_file: String,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            color: true,
            map_file: "map.svg".to_string(),
        }
    }
}
