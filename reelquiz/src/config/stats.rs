use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct StatisticsConfig {
    /// Where the statistics table is stored. Defaults to the platform data
    /// directory.
    pub directory: Option<PathBuf>,
}
