//! Media asset registry
//!
//! Three fixed, ordered sets: one neutral image, the celebration pool, and the
//! protest pool. The core never fetches these; it only picks which one shows.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque reference to an image (usually a URL)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetRef(pub String);

impl AssetRef {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssetError {
    #[error("celebration asset set is empty")]
    NoCelebrationAssets,
    #[error("protest asset set is empty")]
    NoProtestAssets,
}

/// Wire shape of the registry before validation
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawRegistry {
    default: AssetRef,
    celebration: Vec<AssetRef>,
    protest: Vec<AssetRef>,
}

/// Validated asset sets. Both pools are non-empty, so modulo indexing is total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRegistry", into = "RawRegistry")]
pub struct AssetRegistry {
    default: AssetRef,
    celebration: Vec<AssetRef>,
    protest: Vec<AssetRef>,
}

impl AssetRegistry {
    pub fn new(
        default: AssetRef,
        celebration: Vec<AssetRef>,
        protest: Vec<AssetRef>,
    ) -> Result<Self, AssetError> {
        if celebration.is_empty() {
            return Err(AssetError::NoCelebrationAssets);
        }
        if protest.is_empty() {
            return Err(AssetError::NoProtestAssets);
        }
        Ok(Self {
            default,
            celebration,
            protest,
        })
    }

    pub fn default_asset(&self) -> &AssetRef {
        &self.default
    }

    pub fn celebration(&self) -> &[AssetRef] {
        &self.celebration
    }

    pub fn protest(&self) -> &[AssetRef] {
        &self.protest
    }

    /// Shown if an accepted prompt somehow has no chosen asset
    pub fn celebration_fallback(&self) -> &AssetRef {
        &self.celebration[0]
    }

    /// Round-robin protest image for the k-th decline (k >= 1)
    pub fn protest_for(&self, decline_count: u32) -> &AssetRef {
        let k = decline_count.saturating_sub(1) as usize;
        &self.protest[k % self.protest.len()]
    }
}

impl TryFrom<RawRegistry> for AssetRegistry {
    type Error = AssetError;

    fn try_from(raw: RawRegistry) -> Result<Self, Self::Error> {
        Self::new(raw.default, raw.celebration, raw.protest)
    }
}

impl From<AssetRegistry> for RawRegistry {
    fn from(reg: AssetRegistry) -> Self {
        Self {
            default: reg.default,
            celebration: reg.celebration,
            protest: reg.protest,
        }
    }
}

const GIPHY: &str = "https://media.giphy.com/media";

impl Default for AssetRegistry {
    fn default() -> Self {
        let gif = |id: &str| AssetRef(format!("{GIPHY}/{id}/giphy.gif"));
        Self {
            default: gif("cLS1cfxvGOVpf9g3y"),
            celebration: vec![
                gif("XNnL0o4f6L5UuR7v1E"), // heart hug
                gif("5GovlCZycMqd2"),      // happy dance
                gif("l41lI4bY2eBIn0zfy"),  // cat hug
                gif("14412MUKmbQqyc"),     // happy puppy
            ],
            protest: vec![
                gif("L95Z8wUX8OyoU"), // crying pikachu
                gif("OPU6wUKARA8AU"), // sad spongebob
                gif("7SF5scGB2AFrO"), // sad dog
                gif("MDJ9IbxxvDUQM"), // sad cat
                gif("vncvVvC6y5tUv"), // crying panda
                gif("qQhCYKAtGZFC0"), // dramatic crying
                gif("9Y5BbDSkSTiY8"), // devastated cat
            ],
        }
    }
}
