use serde::{Deserialize, Serialize};

/// One reading of a surface form. Lower cost is preferred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingEntry {
    pub reading: String,
    pub cost: i16,
}
