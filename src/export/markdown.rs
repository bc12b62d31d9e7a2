//! Plan document export
//!
//! Renders a project record (plus discovery findings when present) into a
//! markdown document and writes it next to the workspace. The embedded
//! template can be overridden by `<workspace>/templates/plan.md`;
//! variables use `{{key}}` syntax.

use crate::models::{DiscoveryRecord, ProjectRecord, ProjectStatus, RolloutPlan};
use crate::{Context, Result};
use chrono::Utc;
use std::path::{Path, PathBuf};

const PLAN_TEMPLATE: &str = include_str!("../../templates/plan.md");

/// Document export collaborator contract
pub trait DocumentExporter: Send + Sync {
    /// Render and write the plan; returns the written path
    fn export(
        &self,
        record: &ProjectRecord,
        discovery: Option<&DiscoveryRecord>,
        completion: u8,
        output: &Path,
    ) -> Result<PathBuf>;
}

/// Markdown renderer writing under the workspace export directory
pub struct MarkdownExporter {
    workspace: PathBuf,
}

impl MarkdownExporter {
    pub fn new(workspace: impl Into<PathBuf>) -> Self {
        Self {
            workspace: workspace.into(),
        }
    }

    fn template(&self) -> Result<String> {
        let override_path = self.workspace.join("templates/plan.md");
        if override_path.exists() {
            return std::fs::read_to_string(&override_path)
                .with_context(|| format!("Failed to read {}", override_path.display()));
        }
        Ok(PLAN_TEMPLATE.to_string())
    }
}

impl DocumentExporter for MarkdownExporter {
    fn export(
        &self,
        record: &ProjectRecord,
        discovery: Option<&DiscoveryRecord>,
        completion: u8,
        output: &Path,
    ) -> Result<PathBuf> {
        let content = render_plan(&self.template()?, record, discovery, completion);

        if let Some(parent) = output.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(output, content)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        Ok(output.to_path_buf())
    }
}

fn render_plan(
    template: &str,
    record: &ProjectRecord,
    discovery: Option<&DiscoveryRecord>,
    completion: u8,
) -> String {
    let status = match record.status {
        ProjectStatus::Planning => "planning",
        ProjectStatus::Scoped => "scoped",
    };

    let mut access_layers = Vec::new();
    if record.network.wired {
        access_layers.push("wired");
    }
    if record.network.wireless {
        access_layers.push("wireless");
    }
    if record.network.vpn {
        access_layers.push("vpn");
    }
    let access_layers = if access_layers.is_empty() {
        "not specified".to_string()
    } else {
        access_layers.join(", ")
    };

    let vars: Vec<(&str, String)> = vec![
        ("name", record.name.clone()),
        ("client_name", record.client_name.clone()),
        ("industry", record.industry.clone()),
        ("status", status.to_string()),
        ("completion", completion.to_string()),
        ("generated_at", Utc::now().format("%Y-%m-%d %H:%M UTC").to_string()),
        ("org_size", or_dash(&record.organization.size)),
        ("org_region", or_dash(&record.organization.region)),
        ("org_employees", record.organization.employees.to_string()),
        ("total_devices", record.network.total_devices.to_string()),
        ("access_layers", access_layers),
        ("sites_section", sites_section(record)),
        ("stakeholders_section", stakeholders_section(record)),
        ("compliance_section", list_section(&record.compliance)),
        ("pain_points_section", pain_points_section(record)),
        ("requirements_section", requirements_section(record)),
        ("rollout_section", rollout_section(record)),
        ("discovery_section", discovery_section(discovery)),
        ("summary_section", summary_section(record)),
    ];

    let mut result = template.to_string();
    for (key, value) in vars {
        let placeholder = format!("{{{{{}}}}}", key);
        result = result.replace(&placeholder, &value);
    }
    result
}

fn or_dash(value: &str) -> String {
    if value.trim().is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}

fn list_section(items: &[String]) -> String {
    if items.is_empty() {
        return "_None selected._".to_string();
    }
    items
        .iter()
        .map(|item| format!("- {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

fn sites_section(record: &ProjectRecord) -> String {
    if record.network.sites.is_empty() {
        return "### Sites\n\n_No sites captured._".to_string();
    }
    let rows = record
        .network
        .sites
        .iter()
        .map(|site| {
            format!(
                "| {} | {} | {} |",
                site.name,
                or_dash(&site.location),
                site.device_count
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    format!("### Sites\n\n| Site | Location | Devices |\n|---|---|---|\n{}", rows)
}

fn stakeholders_section(record: &ProjectRecord) -> String {
    if record.stakeholders.is_empty() {
        return "_No stakeholders captured._".to_string();
    }
    record
        .stakeholders
        .iter()
        .map(|s| format!("- **{}** ({}) - {}", s.name, or_dash(&s.role), s.email))
        .collect::<Vec<_>>()
        .join("\n")
}

fn pain_points_section(record: &ProjectRecord) -> String {
    if record.pain_points.is_empty() {
        return "_No pain points captured._".to_string();
    }
    record
        .pain_points
        .iter()
        .map(|p| format!("- {} _(impact: {})_", p.title, p.impact.name()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn requirements_section(record: &ProjectRecord) -> String {
    if record.requirements.is_empty() {
        return "_No requirements captured._".to_string();
    }
    record
        .requirements
        .iter()
        .map(|r| format!("- [{}] {}", r.priority.name(), r.title))
        .collect::<Vec<_>>()
        .join("\n")
}

fn rollout_section(record: &ProjectRecord) -> String {
    match &record.rollout {
        None => "_No rollout approach chosen yet._".to_string(),
        Some(RolloutPlan::BigBang { target_date }) => {
            format!("Single cutover targeted for **{}**.", or_dash(target_date))
        }
        Some(RolloutPlan::Phased { phases }) => {
            let rows = phases
                .iter()
                .enumerate()
                .map(|(i, phase)| {
                    format!("{}. **{}** - target {}", i + 1, phase.name, or_dash(&phase.target_date))
                })
                .collect::<Vec<_>>()
                .join("\n");
            format!("Phased enforcement:\n\n{}", rows)
        }
    }
}

fn discovery_section(discovery: Option<&DiscoveryRecord>) -> String {
    let Some(d) = discovery else {
        return String::new();
    };

    format!(
        r#"## Discovery Findings

- Directory services: {dirs}
- Identity provider: {idp}
- MFA enabled: {mfa}
- Switch vendors: {switches}
- Wireless vendors: {wireless}
- RADIUS present: {radius}
- Managed workstations: {workstations}
- Mobile devices: {mobile}
- IoT devices: {iot}
- BYOD allowed: {byod}
- Existing NAC: {nac}
- Firewalls: {firewalls}
- SIEM: {siem}"#,
        dirs = join_or_dash(&d.identity.directory_services),
        idp = or_dash(&d.identity.idp),
        mfa = d.identity.mfa_enabled,
        switches = join_or_dash(&d.infrastructure.switch_vendors),
        wireless = join_or_dash(&d.infrastructure.wireless_vendors),
        radius = d.infrastructure.radius_present,
        workstations = d.endpoints.managed_workstations,
        mobile = d.endpoints.mobile_devices,
        iot = d.endpoints.iot_devices,
        byod = d.endpoints.byod_allowed,
        nac = or_dash(&d.security.existing_nac),
        firewalls = join_or_dash(&d.security.firewall_vendors),
        siem = or_dash(&d.security.siem),
    )
}

fn summary_section(record: &ProjectRecord) -> String {
    let mut sections = Vec::new();
    if !record.summary.executive.is_empty() {
        sections.push(format!("## Executive Summary\n\n{}", record.summary.executive));
    }
    if !record.summary.recommendations.is_empty() {
        sections.push(format!(
            "## Recommendations\n\n{}",
            record.summary.recommendations
        ));
    }
    sections.join("\n\n")
}

fn join_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}
