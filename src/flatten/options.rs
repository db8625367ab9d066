use serde::{Deserialize, Serialize};

/// Flatten switches. Both default to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FlattenOptions {
    /// Walk arrays element by element, using the index as a path segment.
    /// When off, an array is written whole under `$set`.
    pub expand_arrays: bool,

    /// Drop empty maps/arrays instead of writing them under `$set`.
    pub skip_empty_containers: bool,
}

impl FlattenOptions {
    /// Options used when re-flattening a merge payload.
    pub const MERGE: FlattenOptions = FlattenOptions {
        expand_arrays: true,
        skip_empty_containers: true,
    };

    pub fn expand_arrays(mut self, on: bool) -> Self {
        self.expand_arrays = on;
        self
    }

    pub fn skip_empty_containers(mut self, on: bool) -> Self {
        self.skip_empty_containers = on;
        self
    }
}
