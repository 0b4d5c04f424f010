//! Transportable dump of the cache contents.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{ExpiryIndex, Metadata};

/// Everything needed to rebuild a cache elsewhere: the encoded live values,
/// the counters and the expiry timestamps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheExport {
    /// Logical key → encoded value
    pub entries: BTreeMap<String, String>,
    pub metadata: Metadata,
    pub expiry: ExpiryIndex,
    /// When the export was taken (Unix milliseconds)
    pub exported_at: i64,
}

impl CacheExport {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
