//! Level data structure.

use serde::Serialize;

/// A coarse course classification, e.g. "Undergraduate Year 2".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Level {
    pub name: String,
}

impl Level {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
