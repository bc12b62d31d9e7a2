//! Prompt templates for AI content generation
//!
//! Prompts are built from the project record (and discovery findings when
//! present) and sent to the configured generation endpoint.

use crate::models::{DiscoveryRecord, ProjectRecord};

/// Executive summary prompt for a planned deployment
pub fn executive_summary_prompt(record: &ProjectRecord) -> String {
    let pain_points = if record.pain_points.is_empty() {
        "none recorded".to_string()
    } else {
        record
            .pain_points
            .iter()
            .map(|p| format!("- {} (impact: {})", p.title, p.impact.name()))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let compliance = if record.compliance.is_empty() {
        "none".to_string()
    } else {
        record.compliance.join(", ")
    };

    format!(
        r#"## Project
{name} for {client} ({industry})

## Scope
- Total devices: {devices}
- Sites: {sites}
- Compliance frameworks: {compliance}

## Pain Points
{pain_points}

## Instructions
Write a concise executive summary (3 short paragraphs) of this NAC
deployment project for a non-technical sponsor. Cover the business driver,
the scope, and the expected outcome. Plain prose, no headings.
"#,
        name = record.name,
        client = record.client_name,
        industry = record.industry,
        devices = record.network.total_devices,
        sites = record.network.sites.len(),
        compliance = compliance,
        pain_points = pain_points,
    )
}

/// Recommendations prompt, enriched with discovery findings when available
pub fn recommendations_prompt(record: &ProjectRecord, discovery: Option<&DiscoveryRecord>) -> String {
    let environment = match discovery {
        Some(d) => format!(
            r#"## Discovered Environment
- Directory services: {dirs}
- Switch vendors: {switches}
- Wireless vendors: {wireless}
- RADIUS present: {radius}
- Existing NAC: {nac}
- BYOD allowed: {byod}
- IoT devices: {iot}
"#,
            dirs = join_or_none(&d.identity.directory_services),
            switches = join_or_none(&d.infrastructure.switch_vendors),
            wireless = join_or_none(&d.infrastructure.wireless_vendors),
            radius = d.infrastructure.radius_present,
            nac = if d.security.existing_nac.is_empty() {
                "none"
            } else {
                d.security.existing_nac.as_str()
            },
            byod = d.endpoints.byod_allowed,
            iot = d.endpoints.iot_devices,
        ),
        None => "## Discovered Environment\nNo discovery has been run yet.\n".to_string(),
    };

    format!(
        r#"## Project
{name} for {client} ({industry}), {devices} devices

{environment}
## Instructions
List the top 5 technical recommendations for this NAC deployment as a
markdown bullet list. Be specific to the environment above; one sentence
per recommendation.
"#,
        name = record.name,
        client = record.client_name,
        industry = record.industry,
        devices = record.network.total_devices,
        environment = environment,
    )
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}
