//! Project store - record persistence behind the dispatcher
//!
//! The trait is the persistence collaborator contract: async record
//! operations returning `Result`, never assumed synchronous by callers.
//! `FsProjectStore` keeps one directory per project under
//! `<workspace>/projects/<slug>/` with YAML documents inside, and caches
//! the list view until explicitly invalidated.

use crate::models::{DiscoveryRecord, ProjectRecord, ProjectStatus, ProjectSummary};
use crate::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use uuid::Uuid;
use walkdir::WalkDir;

const PROJECT_FILE: &str = "project.yaml";
const DISCOVERY_FILE: &str = "discovery.yaml";

/// Identifiers assigned by the store on creation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredProject {
    pub id: String,
    pub slug: String,
}

/// Persistence collaborator contract
#[async_trait]
pub trait ProjectStore: Send + Sync {
    async fn create_project(&self, record: ProjectRecord) -> Result<StoredProject>;
    async fn load_project(&self, slug: &str) -> Result<ProjectRecord>;
    async fn update_project(&self, slug: &str, record: ProjectRecord) -> Result<()>;
    async fn delete_project(&self, slug: &str) -> Result<()>;
    async fn list_projects(&self) -> Result<Vec<ProjectSummary>>;
    async fn attach_discovery(&self, slug: &str, record: DiscoveryRecord) -> Result<()>;
    async fn load_discovery(&self, slug: &str) -> Result<Option<DiscoveryRecord>>;

    /// Drop any cached read views; called after a staling mutation
    fn invalidate_list_cache(&self);
}

/// Filesystem-backed store rooted at the workspace directory
pub struct FsProjectStore {
    workspace: PathBuf,
    list_cache: Mutex<Option<Vec<ProjectSummary>>>,
}

impl FsProjectStore {
    pub fn new(workspace: impl Into<PathBuf>) -> Self {
        Self {
            workspace: workspace.into(),
            list_cache: Mutex::new(None),
        }
    }

    pub fn projects_dir(&self) -> PathBuf {
        self.workspace.join("projects")
    }

    fn project_dir(&self, slug: &str) -> PathBuf {
        self.projects_dir().join(slug)
    }

    fn read_record(&self, path: &Path) -> Result<ProjectRecord> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_yaml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    fn write_record(&self, slug: &str, record: &ProjectRecord) -> Result<()> {
        let dir = self.project_dir(slug);
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        let content =
            serde_yaml::to_string(record).context("Failed to serialize project record")?;
        std::fs::write(dir.join(PROJECT_FILE), content)
            .with_context(|| format!("Failed to write project '{}'", slug))?;
        Ok(())
    }

    fn scan_summaries(&self) -> Result<Vec<ProjectSummary>> {
        let projects_dir = self.projects_dir();
        if !projects_dir.exists() {
            return Ok(Vec::new());
        }

        let mut summaries = Vec::new();
        for entry in WalkDir::new(&projects_dir)
            .min_depth(2)
            .max_depth(2)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name() == PROJECT_FILE)
        {
            let record = self.read_record(entry.path())?;
            summaries.push(ProjectSummary {
                slug: record.slug.clone(),
                name: record.name.clone(),
                client_name: record.client_name.clone(),
                status: record.status,
                updated_at: record.updated_at,
            });
        }

        summaries.sort_by(|a, b| a.slug.cmp(&b.slug));
        Ok(summaries)
    }
}

#[async_trait]
impl ProjectStore for FsProjectStore {
    async fn create_project(&self, mut record: ProjectRecord) -> Result<StoredProject> {
        let base_slug = slugify(&record.name);
        let slug = find_available_slug(&base_slug, &self.projects_dir());

        record.id = Uuid::new_v4().to_string();
        record.slug = slug.clone();
        let now = Utc::now();
        record.created_at = Some(now);
        record.updated_at = Some(now);

        self.write_record(&slug, &record)?;

        Ok(StoredProject {
            id: record.id,
            slug,
        })
    }

    async fn load_project(&self, slug: &str) -> Result<ProjectRecord> {
        let path = self.project_dir(slug).join(PROJECT_FILE);
        if !path.exists() {
            anyhow::bail!("Project '{}' not found", slug);
        }
        self.read_record(&path)
    }

    async fn update_project(&self, slug: &str, mut record: ProjectRecord) -> Result<()> {
        if !self.project_dir(slug).join(PROJECT_FILE).exists() {
            anyhow::bail!("Project '{}' not found", slug);
        }
        record.slug = slug.to_string();
        record.updated_at = Some(Utc::now());
        self.write_record(slug, &record)
    }

    async fn delete_project(&self, slug: &str) -> Result<()> {
        let dir = self.project_dir(slug);
        if !dir.exists() {
            anyhow::bail!("Project '{}' not found", slug);
        }
        std::fs::remove_dir_all(&dir)
            .with_context(|| format!("Failed to delete project '{}'", slug))?;
        Ok(())
    }

    async fn list_projects(&self) -> Result<Vec<ProjectSummary>> {
        if let Ok(guard) = self.list_cache.lock() {
            if let Some(cached) = guard.as_ref() {
                return Ok(cached.clone());
            }
        }

        let summaries = self.scan_summaries()?;
        if let Ok(mut guard) = self.list_cache.lock() {
            *guard = Some(summaries.clone());
        }
        Ok(summaries)
    }

    async fn attach_discovery(&self, slug: &str, mut record: DiscoveryRecord) -> Result<()> {
        let mut project = self.load_project(slug).await?;

        record.project_slug = slug.to_string();
        record.completed_at = Some(Utc::now());
        let content =
            serde_yaml::to_string(&record).context("Failed to serialize discovery record")?;
        std::fs::write(self.project_dir(slug).join(DISCOVERY_FILE), content)
            .with_context(|| format!("Failed to write discovery for '{}'", slug))?;

        project.status = ProjectStatus::Scoped;
        self.update_project(slug, project).await
    }

    async fn load_discovery(&self, slug: &str) -> Result<Option<DiscoveryRecord>> {
        let path = self.project_dir(slug).join(DISCOVERY_FILE);
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let record = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(Some(record))
    }

    fn invalidate_list_cache(&self) {
        if let Ok(mut guard) = self.list_cache.lock() {
            *guard = None;
        }
    }
}

/// Directory-safe identifier: lowercase alphanumeric runs joined by hyphens
pub fn slugify(name: &str) -> String {
    let mut slug = String::new();
    let mut last_was_dash = true;

    for c in name.trim().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_was_dash = false;
        } else if !last_was_dash {
            slug.push('-');
            last_was_dash = true;
        }
    }

    let slug = slug.trim_end_matches('-').to_string();
    if slug.is_empty() {
        "project".to_string()
    } else {
        slug
    }
}

/// Resolve slug collisions with a numeric suffix: acme, acme-2, acme-3, ...
fn find_available_slug(base: &str, projects_dir: &Path) -> String {
    if !projects_dir.join(base).exists() {
        return base.to_string();
    }

    let mut highest = 1;
    if let Ok(entries) = std::fs::read_dir(projects_dir) {
        for entry in entries.flatten() {
            if let Some(name) = entry.file_name().to_str() {
                if let Some(suffix) = name.strip_prefix(&format!("{}-", base)) {
                    if let Ok(num) = suffix.parse::<u32>() {
                        highest = highest.max(num);
                    }
                }
            }
        }
    }

    let mut counter = highest + 1;
    loop {
        let candidate = format!("{}-{}", base, counter);
        if !projects_dir.join(&candidate).exists() {
            return candidate;
        }
        counter += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_record(name: &str) -> ProjectRecord {
        ProjectRecord {
            name: name.to_string(),
            client_name: "Acme Corp".to_string(),
            industry: "finance".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Acme NAC Rollout"), "acme-nac-rollout");
        assert_eq!(slugify("  HQ / Campus (2026)  "), "hq-campus-2026");
        assert_eq!(slugify("___"), "project");
        assert_eq!(slugify(""), "project");
    }

    #[tokio::test]
    async fn test_create_and_load_round_trip() {
        let temp = TempDir::new().unwrap();
        let store = FsProjectStore::new(temp.path());

        let stored = store.create_project(sample_record("Acme NAC")).await.unwrap();
        assert_eq!(stored.slug, "acme-nac");
        assert!(!stored.id.is_empty());

        let loaded = store.load_project("acme-nac").await.unwrap();
        assert_eq!(loaded.name, "Acme NAC");
        assert_eq!(loaded.client_name, "Acme Corp");
        assert!(loaded.created_at.is_some());
    }

    #[tokio::test]
    async fn test_slug_collision_gets_numeric_suffix() {
        let temp = TempDir::new().unwrap();
        let store = FsProjectStore::new(temp.path());

        let first = store.create_project(sample_record("Acme NAC")).await.unwrap();
        let second = store.create_project(sample_record("Acme NAC")).await.unwrap();
        let third = store.create_project(sample_record("Acme NAC")).await.unwrap();

        assert_eq!(first.slug, "acme-nac");
        assert_eq!(second.slug, "acme-nac-2");
        assert_eq!(third.slug, "acme-nac-3");
    }

    #[tokio::test]
    async fn test_list_cache_requires_explicit_invalidation() {
        let temp = TempDir::new().unwrap();
        let store = FsProjectStore::new(temp.path());

        store.create_project(sample_record("First")).await.unwrap();
        let listed = store.list_projects().await.unwrap();
        assert_eq!(listed.len(), 1);

        // A second create without invalidation leaves the cached view stale
        store.create_project(sample_record("Second")).await.unwrap();
        assert_eq!(store.list_projects().await.unwrap().len(), 1);

        store.invalidate_list_cache();
        assert_eq!(store.list_projects().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_attach_discovery_marks_project_scoped() {
        let temp = TempDir::new().unwrap();
        let store = FsProjectStore::new(temp.path());

        store.create_project(sample_record("Acme NAC")).await.unwrap();
        assert!(store.load_discovery("acme-nac").await.unwrap().is_none());

        let mut discovery = DiscoveryRecord::default();
        discovery.infrastructure.switch_vendors.push("cisco-catalyst".to_string());
        store.attach_discovery("acme-nac", discovery).await.unwrap();

        let loaded = store.load_discovery("acme-nac").await.unwrap().unwrap();
        assert_eq!(loaded.project_slug, "acme-nac");
        assert!(loaded.completed_at.is_some());

        let project = store.load_project("acme-nac").await.unwrap();
        assert_eq!(project.status, ProjectStatus::Scoped);
    }

    #[tokio::test]
    async fn test_missing_project_errors() {
        let temp = TempDir::new().unwrap();
        let store = FsProjectStore::new(temp.path());

        assert!(store.load_project("ghost").await.is_err());
        assert!(store.delete_project("ghost").await.is_err());
        assert!(store
            .update_project("ghost", sample_record("Ghost"))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_delete_project() {
        let temp = TempDir::new().unwrap();
        let store = FsProjectStore::new(temp.path());

        store.create_project(sample_record("Doomed")).await.unwrap();
        store.delete_project("doomed").await.unwrap();
        store.invalidate_list_cache();

        assert!(store.list_projects().await.unwrap().is_empty());
    }
}
