//! External action dispatcher
//!
//! Fires on explicit user action only: final submission, AI content
//! generation, document export. Each action has its own progress indicator
//! and its own success/failure notification; collaborator errors are
//! surfaced verbatim and the form state is left untouched so the user can
//! correct and re-trigger. Nothing here retries automatically.

use crate::ai::{prompts, ContentGenerator};
use crate::export::DocumentExporter;
use crate::models::{DiscoveryRecord, ProjectRecord};
use crate::store::ProjectStore;
use crate::ui::NotificationQueue;
use crate::wizard::session::WizardSession;
use crate::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Outcome of a submission attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResult {
    Created { id: String, slug: String },
    Failed { reason: String },
}

impl SubmissionResult {
    pub fn is_created(&self) -> bool {
        matches!(self, SubmissionResult::Created { .. })
    }
}

/// Dispatcher owning the collaborators and the notification queue
pub struct ActionDispatcher<S, G, E>
where
    S: ProjectStore,
    G: ContentGenerator,
    E: DocumentExporter,
{
    store: S,
    generator: G,
    exporter: E,
    notifications: NotificationQueue,
    show_progress: bool,
}

impl<S, G, E> ActionDispatcher<S, G, E>
where
    S: ProjectStore,
    G: ContentGenerator,
    E: DocumentExporter,
{
    pub fn new(store: S, generator: G, exporter: E) -> Self {
        Self {
            store,
            generator,
            exporter,
            notifications: NotificationQueue::new(),
            show_progress: true,
        }
    }

    /// Disable spinners (non-interactive runs and tests)
    pub fn quiet(mut self) -> Self {
        self.show_progress = false;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn notifications(&self) -> &NotificationQueue {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut NotificationQueue {
        &mut self.notifications
    }

    fn spinner(&self, message: &str) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));
        Some(bar)
    }

    /// Submit the finished project wizard. Success invalidates the cached
    /// list view and marks the session Submitted; failure leaves everything
    /// as it was.
    pub async fn submit_project(&mut self, session: &mut WizardSession) -> Result<SubmissionResult> {
        session.ensure_submittable()?;

        let record: ProjectRecord = session
            .form()
            .to_typed()
            .context("Project form state is not a valid record")?;

        let spinner = self.spinner("Saving project...");
        let outcome = self.store.create_project(record).await;
        if let Some(bar) = spinner {
            bar.finish_and_clear();
        }

        match outcome {
            Ok(stored) => {
                self.store.invalidate_list_cache();
                session.mark_submitted();
                self.notifications
                    .success(format!("Project '{}' created", stored.slug));
                Ok(SubmissionResult::Created {
                    id: stored.id,
                    slug: stored.slug,
                })
            }
            Err(err) => {
                let reason = err.to_string();
                self.notifications.error(reason.clone());
                Ok(SubmissionResult::Failed { reason })
            }
        }
    }

    /// Submit the finished discovery wizard against an existing project
    pub async fn submit_discovery(
        &mut self,
        slug: &str,
        session: &mut WizardSession,
    ) -> Result<SubmissionResult> {
        session.ensure_submittable()?;

        let record: DiscoveryRecord = session
            .form()
            .to_typed()
            .context("Discovery form state is not a valid record")?;

        let spinner = self.spinner("Saving discovery...");
        let outcome = self.store.attach_discovery(slug, record).await;
        if let Some(bar) = spinner {
            bar.finish_and_clear();
        }

        match outcome {
            Ok(()) => {
                self.store.invalidate_list_cache();
                session.mark_submitted();
                self.notifications
                    .success(format!("Discovery attached to '{}'", slug));
                Ok(SubmissionResult::Created {
                    id: slug.to_string(),
                    slug: slug.to_string(),
                })
            }
            Err(err) => {
                let reason = err.to_string();
                self.notifications.error(reason.clone());
                Ok(SubmissionResult::Failed { reason })
            }
        }
    }

    /// Generate AI enrichment into a record. Returns whether content was
    /// written; collaborator failure is a notification, not an error.
    pub async fn generate_summary(&mut self, record: &mut ProjectRecord) -> Result<bool> {
        if !self.generator.is_configured() {
            self.notifications
                .info("AI generation is not configured; skipping");
            return Ok(false);
        }

        let prompt = prompts::executive_summary_prompt(record);
        let spinner = self.spinner("Generating executive summary...");
        let outcome = self.generator.generate(&prompt).await;
        if let Some(bar) = spinner {
            bar.finish_and_clear();
        }

        match outcome {
            Ok(text) => {
                record.summary.executive = text;
                self.notifications.success("Executive summary generated");
                Ok(true)
            }
            Err(err) => {
                self.notifications.error(err.to_string());
                Ok(false)
            }
        }
    }

    /// Generate recommendations, enriched with discovery findings when present
    pub async fn generate_recommendations(
        &mut self,
        record: &mut ProjectRecord,
        discovery: Option<&DiscoveryRecord>,
    ) -> Result<bool> {
        if !self.generator.is_configured() {
            self.notifications
                .info("AI generation is not configured; skipping");
            return Ok(false);
        }

        let prompt = prompts::recommendations_prompt(record, discovery);
        let spinner = self.spinner("Generating recommendations...");
        let outcome = self.generator.generate(&prompt).await;
        if let Some(bar) = spinner {
            bar.finish_and_clear();
        }

        match outcome {
            Ok(text) => {
                record.summary.recommendations = text;
                self.notifications.success("Recommendations generated");
                Ok(true)
            }
            Err(err) => {
                self.notifications.error(err.to_string());
                Ok(false)
            }
        }
    }

    /// Export the plan document; a terminal side effect outside the wizard
    /// state machine
    pub fn export_plan(
        &mut self,
        record: &ProjectRecord,
        discovery: Option<&DiscoveryRecord>,
        completion: u8,
        output: &Path,
    ) -> Result<Option<PathBuf>> {
        match self.exporter.export(record, discovery, completion, output) {
            Ok(path) => {
                self.notifications
                    .success(format!("Plan exported to {}", path.display()));
                Ok(Some(path))
            }
            Err(err) => {
                self.notifications.error(err.to_string());
                Ok(None)
            }
        }
    }
}
