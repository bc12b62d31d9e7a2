//! Reference library - largely static seed content with a stale-checked cache
//!
//! Industries, size bands, compliance frameworks, vendor profiles and common
//! pain points ship embedded in the binary and can be overridden by
//! `<workspace>/library.toml`. The parsed library is cached; staleness is
//! detected by content checksum, and `invalidate` drops the cache explicitly.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::PathBuf;
use std::sync::Mutex;

const LIBRARY_SEED: &str = include_str!("library_seed.toml");

/// Parsed reference data
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceLibrary {
    pub industries: Vec<IndustryEntry>,
    pub size_bands: Vec<SizeBand>,
    pub compliance_frameworks: Vec<ComplianceFramework>,
    pub vendors: Vec<VendorProfile>,
    pub pain_points: Vec<PainPointEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndustryEntry {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub regulated: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SizeBand {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComplianceFramework {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VendorProfile {
    pub id: String,
    pub name: String,
    /// "wired", "wireless", "firewall" or "nac"
    #[serde(default)]
    pub category: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PainPointEntry {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub category: String,
}

impl ReferenceLibrary {
    pub fn vendors_in_category(&self, category: &str) -> Vec<&VendorProfile> {
        self.vendors
            .iter()
            .filter(|v| v.category == category)
            .collect()
    }

    pub fn industry_ids(&self) -> Vec<String> {
        self.industries.iter().map(|i| i.id.clone()).collect()
    }
}

/// Content checksum used for staleness detection
pub fn calculate_checksum(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("sha256:{:x}", hasher.finalize())
}

/// Cached loader for the reference library
pub struct LibraryCache {
    override_path: PathBuf,
    cached: Mutex<Option<(String, ReferenceLibrary)>>,
}

impl LibraryCache {
    /// `workspace` is the nacplan workspace directory; the override file is
    /// `<workspace>/library.toml`
    pub fn new(workspace: impl Into<PathBuf>) -> Self {
        Self {
            override_path: workspace.into().join("library.toml"),
            cached: Mutex::new(None),
        }
    }

    fn source(&self) -> Result<String> {
        if self.override_path.exists() {
            return std::fs::read_to_string(&self.override_path)
                .with_context(|| format!("Failed to read {}", self.override_path.display()));
        }
        Ok(LIBRARY_SEED.to_string())
    }

    /// Load the library, reusing the cached parse while the source content
    /// is unchanged
    pub fn load(&self) -> Result<ReferenceLibrary> {
        let source = self.source()?;
        let checksum = calculate_checksum(&source);

        if let Ok(guard) = self.cached.lock() {
            if let Some((cached_checksum, library)) = guard.as_ref() {
                if *cached_checksum == checksum {
                    return Ok(library.clone());
                }
            }
        }

        let library: ReferenceLibrary = toml::from_str(&source).with_context(|| {
            format!(
                "Failed to parse reference library ({})",
                if self.override_path.exists() {
                    self.override_path.display().to_string()
                } else {
                    "embedded seed".to_string()
                }
            )
        })?;

        if let Ok(mut guard) = self.cached.lock() {
            *guard = Some((checksum, library.clone()));
        }
        Ok(library)
    }

    /// Explicit invalidation hook for mutations that can stale the cache
    pub fn invalidate(&self) {
        if let Ok(mut guard) = self.cached.lock() {
            *guard = None;
        }
    }

    /// Whether a cached parse is currently held
    pub fn is_cached(&self) -> bool {
        self.cached
            .lock()
            .map(|guard| guard.is_some())
            .unwrap_or(false)
    }
}
