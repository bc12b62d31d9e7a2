//! End-to-end wizard flows against mock collaborators

use anyhow::Result;
use async_trait::async_trait;
use nacplan::ai::ContentGenerator;
use nacplan::export::MarkdownExporter;
use nacplan::forms::{discovery, project};
use nacplan::models::{DiscoveryRecord, ProjectRecord, ProjectStatus, ProjectSummary};
use nacplan::store::{slugify, ProjectStore, StoredProject};
use nacplan::ui::Level;
use nacplan::wizard::{ActionDispatcher, SubmissionResult, WizardPhase, WizardSession};
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tempfile::TempDir;
use uuid::Uuid;

// ============================================================================
// Mock collaborators
// ============================================================================

#[derive(Default)]
struct MemoryStore {
    projects: Mutex<HashMap<String, ProjectRecord>>,
    discoveries: Mutex<HashMap<String, DiscoveryRecord>>,
    invalidations: AtomicUsize,
}

#[async_trait]
impl ProjectStore for MemoryStore {
    async fn create_project(&self, mut record: ProjectRecord) -> Result<StoredProject> {
        let slug = slugify(&record.name);
        record.id = Uuid::new_v4().to_string();
        record.slug = slug.clone();
        let id = record.id.clone();
        self.projects.lock().unwrap().insert(slug.clone(), record);
        Ok(StoredProject { id, slug })
    }

    async fn load_project(&self, slug: &str) -> Result<ProjectRecord> {
        self.projects
            .lock()
            .unwrap()
            .get(slug)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Project '{}' not found", slug))
    }

    async fn update_project(&self, slug: &str, record: ProjectRecord) -> Result<()> {
        self.projects.lock().unwrap().insert(slug.to_string(), record);
        Ok(())
    }

    async fn delete_project(&self, slug: &str) -> Result<()> {
        self.projects.lock().unwrap().remove(slug);
        Ok(())
    }

    async fn list_projects(&self) -> Result<Vec<ProjectSummary>> {
        Ok(self
            .projects
            .lock()
            .unwrap()
            .values()
            .map(|record| ProjectSummary {
                slug: record.slug.clone(),
                name: record.name.clone(),
                client_name: record.client_name.clone(),
                status: record.status,
                updated_at: record.updated_at,
            })
            .collect())
    }

    async fn attach_discovery(&self, slug: &str, mut record: DiscoveryRecord) -> Result<()> {
        let mut projects = self.projects.lock().unwrap();
        let project = projects
            .get_mut(slug)
            .ok_or_else(|| anyhow::anyhow!("Project '{}' not found", slug))?;
        project.status = ProjectStatus::Scoped;
        record.project_slug = slug.to_string();
        self.discoveries
            .lock()
            .unwrap()
            .insert(slug.to_string(), record);
        Ok(())
    }

    async fn load_discovery(&self, slug: &str) -> Result<Option<DiscoveryRecord>> {
        Ok(self.discoveries.lock().unwrap().get(slug).cloned())
    }

    fn invalidate_list_cache(&self) {
        self.invalidations.fetch_add(1, Ordering::SeqCst);
    }
}

/// Store whose writes always reject, like an unreachable backend
struct FailingStore;

#[async_trait]
impl ProjectStore for FailingStore {
    async fn create_project(&self, _record: ProjectRecord) -> Result<StoredProject> {
        anyhow::bail!("network error")
    }

    async fn load_project(&self, _slug: &str) -> Result<ProjectRecord> {
        anyhow::bail!("network error")
    }

    async fn update_project(&self, _slug: &str, _record: ProjectRecord) -> Result<()> {
        anyhow::bail!("network error")
    }

    async fn delete_project(&self, _slug: &str) -> Result<()> {
        anyhow::bail!("network error")
    }

    async fn list_projects(&self) -> Result<Vec<ProjectSummary>> {
        anyhow::bail!("network error")
    }

    async fn attach_discovery(&self, _slug: &str, _record: DiscoveryRecord) -> Result<()> {
        anyhow::bail!("network error")
    }

    async fn load_discovery(&self, _slug: &str) -> Result<Option<DiscoveryRecord>> {
        anyhow::bail!("network error")
    }

    fn invalidate_list_cache(&self) {}
}

struct StaticGenerator(&'static str);

#[async_trait]
impl ContentGenerator for StaticGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        Ok(self.0.to_string())
    }
}

struct FailingGenerator;

#[async_trait]
impl ContentGenerator for FailingGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        anyhow::bail!("model overloaded")
    }
}

struct UnconfiguredGenerator;

#[async_trait]
impl ContentGenerator for UnconfiguredGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        anyhow::bail!("should not be called")
    }

    fn is_configured(&self) -> bool {
        false
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn filled_project_session() -> WizardSession {
    let mut session = WizardSession::new(project::definition(), project::defaults().unwrap());
    session.form_mut().set("name", json!("Acme NAC"));
    session.form_mut().set("client_name", json!("Acme Corp"));
    session.form_mut().set("industry", json!("finance"));
    session.form_mut().set("organization.size", json!("medium"));
    session.form_mut().set("network.total_devices", json!(1200));
    session.form_mut().set(
        "rollout",
        json!({"approach": "phased", "phases": [{"name": "HQ pilot", "target_date": "2026-10"}]}),
    );
    session
}

fn at_terminal(mut session: WizardSession) -> WizardSession {
    let total = session.total_steps();
    match session.jump_to(total) {
        Ok(nacplan::wizard::StepOutcome::Moved(_)) => session,
        other => panic!("could not reach terminal step: {:?}", other),
    }
}

fn dispatcher_with<S: ProjectStore, G: ContentGenerator>(
    store: S,
    generator: G,
    workspace: &TempDir,
) -> ActionDispatcher<S, G, MarkdownExporter> {
    ActionDispatcher::new(store, generator, MarkdownExporter::new(workspace.path())).quiet()
}

// ============================================================================
// Submission
// ============================================================================

#[tokio::test]
async fn test_full_project_flow_submits_and_persists() {
    let workspace = TempDir::new().unwrap();
    let mut session = at_terminal(filled_project_session());
    let mut dispatcher = dispatcher_with(MemoryStore::default(), StaticGenerator("ok"), &workspace);

    let result = dispatcher.submit_project(&mut session).await.unwrap();
    match &result {
        SubmissionResult::Created { slug, id } => {
            assert_eq!(slug, "acme-nac");
            assert!(!id.is_empty());
        }
        other => panic!("expected creation, got {:?}", other),
    }

    assert_eq!(session.phase(), WizardPhase::Submitted);
    assert_eq!(dispatcher.store().invalidations.load(Ordering::SeqCst), 1);

    let stored = dispatcher.store().load_project("acme-nac").await.unwrap();
    assert_eq!(stored.name, "Acme NAC");
    assert_eq!(stored.network.total_devices, 1200);

    let notifications = dispatcher.notifications_mut().drain();
    assert!(notifications
        .iter()
        .any(|n| n.level == Level::Success && n.message.contains("acme-nac")));
}

#[tokio::test]
async fn test_scenario_d_failing_store_preserves_session() {
    let workspace = TempDir::new().unwrap();
    let mut session = at_terminal(filled_project_session());
    let terminal_step = session.current_step();
    let mut dispatcher = dispatcher_with(FailingStore, StaticGenerator("ok"), &workspace);

    let result = dispatcher.submit_project(&mut session).await.unwrap();
    match &result {
        SubmissionResult::Failed { reason } => assert!(reason.contains("network error")),
        other => panic!("expected failure, got {:?}", other),
    }

    // Still editing, still on the final step, form untouched
    assert_eq!(session.phase(), WizardPhase::Editing);
    assert_eq!(session.current_step(), terminal_step);
    assert_eq!(session.form().get_str("name"), Some("Acme NAC"));

    let notifications = dispatcher.notifications_mut().drain();
    assert!(notifications
        .iter()
        .any(|n| n.level == Level::Error && n.message.contains("network error")));

    // The user may re-trigger the same action manually
    let retry = dispatcher.submit_project(&mut session).await.unwrap();
    assert!(matches!(retry, SubmissionResult::Failed { .. }));
}

#[tokio::test]
async fn test_submit_requires_terminal_step() {
    let workspace = TempDir::new().unwrap();
    let mut session = filled_project_session();
    let mut dispatcher = dispatcher_with(MemoryStore::default(), StaticGenerator("ok"), &workspace);

    let err = dispatcher.submit_project(&mut session).await.unwrap_err();
    assert!(err.to_string().contains("final step"));
}

#[tokio::test]
async fn test_double_submit_is_rejected() {
    let workspace = TempDir::new().unwrap();
    let mut session = at_terminal(filled_project_session());
    let mut dispatcher = dispatcher_with(MemoryStore::default(), StaticGenerator("ok"), &workspace);

    let first = dispatcher.submit_project(&mut session).await.unwrap();
    assert!(first.is_created());

    let err = dispatcher.submit_project(&mut session).await.unwrap_err();
    assert!(err.to_string().contains("already submitted"));
}

// ============================================================================
// Discovery
// ============================================================================

#[tokio::test]
async fn test_discovery_flow_attaches_to_project() {
    let workspace = TempDir::new().unwrap();
    let mut dispatcher = dispatcher_with(MemoryStore::default(), StaticGenerator("ok"), &workspace);

    let mut project_session = at_terminal(filled_project_session());
    dispatcher.submit_project(&mut project_session).await.unwrap();

    let mut session = WizardSession::new(discovery::definition(), discovery::defaults().unwrap());
    session
        .form_mut()
        .set("infrastructure.switch_vendors", json!(["cisco-catalyst"]));
    session.form_mut().set("endpoints.iot_devices", json!(40));
    let mut session = at_terminal(session);

    let result = dispatcher
        .submit_discovery("acme-nac", &mut session)
        .await
        .unwrap();
    assert!(result.is_created());
    assert_eq!(session.phase(), WizardPhase::Submitted);

    let project = dispatcher.store().load_project("acme-nac").await.unwrap();
    assert_eq!(project.status, ProjectStatus::Scoped);

    let findings = dispatcher
        .store()
        .load_discovery("acme-nac")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(findings.project_slug, "acme-nac");
    assert_eq!(findings.infrastructure.switch_vendors, vec!["cisco-catalyst"]);
}

#[tokio::test]
async fn test_discovery_gate_blocks_empty_switch_estate() {
    let mut session = WizardSession::new(discovery::definition(), discovery::defaults().unwrap());
    // Step 1 (identity) is optional, step 2 requires a switch vendor
    assert!(matches!(
        session.jump_to(session.total_steps()),
        Ok(nacplan::wizard::StepOutcome::Rejected(_))
    ));
    assert_eq!(session.current_step(), 1);
}

// ============================================================================
// Secondary actions: AI generation and export
// ============================================================================

#[tokio::test]
async fn test_generation_writes_content_and_notifies() {
    let workspace = TempDir::new().unwrap();
    let mut dispatcher = dispatcher_with(
        MemoryStore::default(),
        StaticGenerator("A concise summary."),
        &workspace,
    );

    let mut record = ProjectRecord {
        name: "Acme NAC".to_string(),
        ..Default::default()
    };
    let wrote = dispatcher.generate_summary(&mut record).await.unwrap();

    assert!(wrote);
    assert_eq!(record.summary.executive, "A concise summary.");
    assert!(dispatcher
        .notifications()
        .iter()
        .any(|n| n.level == Level::Success));
}

#[tokio::test]
async fn test_generation_failure_is_a_notification_not_an_error() {
    let workspace = TempDir::new().unwrap();
    let mut dispatcher = dispatcher_with(MemoryStore::default(), FailingGenerator, &workspace);

    let mut record = ProjectRecord::default();
    let wrote = dispatcher.generate_summary(&mut record).await.unwrap();

    assert!(!wrote);
    assert!(record.summary.executive.is_empty());
    assert!(dispatcher
        .notifications()
        .iter()
        .any(|n| n.level == Level::Error && n.message.contains("model overloaded")));
}

#[tokio::test]
async fn test_unconfigured_generator_is_skipped() {
    let workspace = TempDir::new().unwrap();
    let mut dispatcher = dispatcher_with(MemoryStore::default(), UnconfiguredGenerator, &workspace);

    let mut record = ProjectRecord::default();
    let wrote = dispatcher.generate_summary(&mut record).await.unwrap();

    assert!(!wrote);
    assert!(dispatcher
        .notifications()
        .iter()
        .any(|n| n.level == Level::Info && n.message.contains("not configured")));
}

#[tokio::test]
async fn test_recommendations_use_discovery_findings() {
    let workspace = TempDir::new().unwrap();
    let mut dispatcher = dispatcher_with(
        MemoryStore::default(),
        StaticGenerator("- Use the existing RADIUS tier."),
        &workspace,
    );

    let mut record = ProjectRecord::default();
    let mut findings = DiscoveryRecord::default();
    findings.infrastructure.radius_present = true;

    let wrote = dispatcher
        .generate_recommendations(&mut record, Some(&findings))
        .await
        .unwrap();

    assert!(wrote);
    assert!(record.summary.recommendations.contains("RADIUS"));
}

#[tokio::test]
async fn test_export_plan_writes_document() {
    let workspace = TempDir::new().unwrap();
    let mut dispatcher = dispatcher_with(MemoryStore::default(), StaticGenerator("ok"), &workspace);

    let mut record = ProjectRecord {
        name: "Acme NAC".to_string(),
        client_name: "Acme Corp".to_string(),
        ..Default::default()
    };
    record.network.total_devices = 900;

    let output = workspace.path().join("exports/acme-nac-plan.md");
    let written = dispatcher
        .export_plan(&record, None, 60, &output)
        .unwrap()
        .unwrap();

    let content = std::fs::read_to_string(&written).unwrap();
    assert!(content.contains("Acme NAC"));
    assert!(content.contains("900"));
    assert!(dispatcher
        .notifications()
        .iter()
        .any(|n| n.level == Level::Success && n.message.contains("exported")));
}
