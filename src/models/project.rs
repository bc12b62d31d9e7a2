//! Project record types
//!
//! The typed shape behind the project-creation wizard. Every field has a
//! serde default so a freshly created form state is always renderable, and
//! the stored YAML stays loadable as fields are added.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A NAC deployment-planning project
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectRecord {
    /// Assigned by the store on creation
    #[serde(default)]
    pub id: String,

    /// Directory-safe identifier derived from the name
    #[serde(default)]
    pub slug: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub client_name: String,

    #[serde(default)]
    pub industry: String,

    /// Primary contact, optional
    #[serde(default)]
    pub contact_email: String,

    #[serde(default)]
    pub organization: Organization,

    #[serde(default)]
    pub stakeholders: Vec<Stakeholder>,

    #[serde(default)]
    pub network: NetworkScope,

    /// Compliance framework ids from the reference library
    #[serde(default)]
    pub compliance: Vec<String>,

    #[serde(default)]
    pub pain_points: Vec<PainPoint>,

    #[serde(default)]
    pub requirements: Vec<RequirementItem>,

    /// Unset until the rollout step is answered
    #[serde(default)]
    pub rollout: Option<RolloutPlan>,

    #[serde(default)]
    pub summary: GeneratedContent,

    #[serde(default)]
    pub status: ProjectStatus,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Client organization profile
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Organization {
    /// One of the size bands in `SIZE_BANDS`
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub employees: u64,
}

/// Fixed company size bands accepted by the organization step
pub const SIZE_BANDS: &[&str] = &["small", "medium", "large", "enterprise"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Stakeholder {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Natural key within the stakeholder collection
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkScope {
    #[serde(default)]
    pub total_devices: u64,
    #[serde(default)]
    pub wired: bool,
    #[serde(default)]
    pub wireless: bool,
    #[serde(default)]
    pub vpn: bool,
    #[serde(default)]
    pub sites: Vec<Site>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Site {
    #[serde(default)]
    pub id: String,
    /// Natural key within the site collection
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub device_count: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PainPoint {
    #[serde(default)]
    pub id: String,
    /// Natural key within the pain point collection
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub impact: PainImpact,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PainImpact {
    Low,
    #[default]
    Medium,
    High,
}

impl PainImpact {
    pub fn name(&self) -> &'static str {
        match self {
            PainImpact::Low => "low",
            PainImpact::Medium => "medium",
            PainImpact::High => "high",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequirementItem {
    #[serde(default)]
    pub id: String,
    /// Natural key within the requirement collection
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub priority: Priority,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    #[default]
    MustHave,
    ShouldHave,
    NiceToHave,
}

impl Priority {
    pub fn name(&self) -> &'static str {
        match self {
            Priority::MustHave => "must-have",
            Priority::ShouldHave => "should-have",
            Priority::NiceToHave => "nice-to-have",
        }
    }
}

/// Rollout approach; the active variant decides which fields exist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "approach", rename_all = "lowercase")]
pub enum RolloutPlan {
    /// Site-by-site or group-by-group enforcement
    Phased { phases: Vec<RolloutPhase> },
    /// Single cutover date for the whole estate
    BigBang { target_date: String },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RolloutPhase {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub target_date: String,
}

/// AI-generated enrichment, optional to wizard completion
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneratedContent {
    #[serde(default)]
    pub executive: String,
    #[serde(default)]
    pub recommendations: String,
}

/// Record lifecycle as stored
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    #[default]
    Planning,
    /// Environment discovery has been attached
    Scoped,
}

/// Slim row for the cached list view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub slug: String,
    pub name: String,
    pub client_name: String,
    pub status: ProjectStatus,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}
