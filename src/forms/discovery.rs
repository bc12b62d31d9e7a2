//! Environment discovery wizard
//!
//! Five steps walking the client's existing identity, network, endpoint and
//! security estate. Findings attach to an existing project record.

use crate::models::DiscoveryRecord;
use crate::store::ReferenceLibrary;
use crate::ui::prompts;
use crate::wizard::{
    FormState, ScoredField, StepSpec, Violation, WizardDefinition, WizardSession,
};
use crate::Result;
use serde_json::{json, Value};

/// The discovery step sequence
pub fn definition() -> WizardDefinition {
    WizardDefinition::new(
        "discovery",
        vec![
            // Identity findings are optional; many engagements start without them
            StepSpec::new("identity", "Identity", "Directory services and identity providers in use."),
            StepSpec::new(
                "infrastructure",
                "Network Infrastructure",
                "Switching, wireless and RADIUS estate.",
            )
            .with_check(check_infrastructure),
            StepSpec::new("endpoints", "Endpoints", "What connects to the network."),
            StepSpec::new("security", "Security Stack", "Incumbent NAC, firewalls and SIEM."),
            StepSpec::new("review", "Review & Attach", "Check findings before attaching them."),
        ],
        vec![
            ScoredField { path: "identity.directory_services", weight: 1 },
            ScoredField { path: "infrastructure.switch_vendors", weight: 2 },
            ScoredField { path: "endpoints.managed_workstations", weight: 1 },
            ScoredField { path: "security.firewall_vendors", weight: 1 },
        ],
    )
}

/// Default form state: the serialized default record
pub fn defaults() -> Result<FormState> {
    FormState::from_typed(&DiscoveryRecord::default())
}

/// NAC planning is meaningless without knowing the switching estate
fn check_infrastructure(state: &FormState) -> Vec<Violation> {
    let switches = state
        .get_array("infrastructure.switch_vendors")
        .map(Vec::len)
        .unwrap_or(0);
    if switches == 0 {
        vec![Violation::field(
            "infrastructure.switch_vendors",
            "Record at least one switch vendor",
        )]
    } else {
        Vec::new()
    }
}

/// Interactive filler for one step; called by the shared drive loop
pub fn prompt_step(
    step_id: &str,
    session: &mut WizardSession,
    library: &ReferenceLibrary,
) -> Result<()> {
    match step_id {
        "identity" => prompt_identity(session),
        "infrastructure" => prompt_infrastructure(session, library),
        "endpoints" => prompt_endpoints(session),
        "security" => prompt_security(session, library),
        "review" => {
            print_review(session);
            Ok(())
        }
        _ => Ok(()),
    }
}

fn selected_strings(session: &WizardSession, path: &str) -> Vec<String> {
    session
        .form()
        .get_array(path)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn vendor_multi_select(
    session: &mut WizardSession,
    library: &ReferenceLibrary,
    category: &str,
    path: &str,
    label: &str,
) -> Result<()> {
    let vendors = library.vendors_in_category(category);
    let labels: Vec<String> = vendors.iter().map(|v| v.name.clone()).collect();
    let selected = selected_strings(session, path);
    let checked: Vec<bool> = vendors.iter().map(|v| selected.contains(&v.id)).collect();

    let picked = prompts::multi_select(label, &labels, &checked)?;
    let ids: Vec<String> = picked
        .into_iter()
        .filter_map(|i| vendors.get(i))
        .map(|v| v.id.clone())
        .collect();
    session.form_mut().set(path, json!(ids));
    Ok(())
}

fn prompt_identity(session: &mut WizardSession) -> Result<()> {
    let known = [
        "active-directory",
        "entra-id",
        "ldap",
        "okta",
        "google-workspace",
    ];
    let labels: Vec<String> = known.iter().map(|s| s.to_string()).collect();
    let selected = selected_strings(session, "identity.directory_services");
    let checked: Vec<bool> = known.iter().map(|s| selected.contains(&s.to_string())).collect();

    let picked = prompts::multi_select("Directory services", &labels, &checked)?;
    let services: Vec<String> = picked.into_iter().map(|i| known[i].to_string()).collect();
    session
        .form_mut()
        .set("identity.directory_services", json!(services));

    let idp = prompts::input_text(
        "Identity provider (optional)",
        session.form().get_str("identity.idp").unwrap_or_default(),
    )?;
    session.form_mut().set("identity.idp", json!(idp));

    let mfa = prompts::confirm(
        "Is MFA enforced?",
        session.form().get_bool("identity.mfa_enabled").unwrap_or(false),
    )?;
    session.form_mut().set("identity.mfa_enabled", json!(mfa));
    Ok(())
}

fn prompt_infrastructure(session: &mut WizardSession, library: &ReferenceLibrary) -> Result<()> {
    vendor_multi_select(
        session,
        library,
        "wired",
        "infrastructure.switch_vendors",
        "Switch vendors",
    )?;
    vendor_multi_select(
        session,
        library,
        "wireless",
        "infrastructure.wireless_vendors",
        "Wireless vendors",
    )?;

    let radius = prompts::confirm(
        "Is a RADIUS service already deployed?",
        session
            .form()
            .get_bool("infrastructure.radius_present")
            .unwrap_or(false),
    )?;
    session
        .form_mut()
        .set("infrastructure.radius_present", json!(radius));
    Ok(())
}

fn prompt_endpoints(session: &mut WizardSession) -> Result<()> {
    for (path, label) in [
        ("endpoints.managed_workstations", "Managed workstations"),
        ("endpoints.mobile_devices", "Mobile devices"),
        ("endpoints.iot_devices", "IoT devices"),
    ] {
        let current = session.form().get_u64(path).unwrap_or(0);
        let value = prompts::input_u64(label, current)?;
        session.form_mut().set(path, json!(value));
    }

    let byod = prompts::confirm(
        "Is BYOD allowed?",
        session.form().get_bool("endpoints.byod_allowed").unwrap_or(false),
    )?;
    session.form_mut().set("endpoints.byod_allowed", json!(byod));
    Ok(())
}

fn prompt_security(session: &mut WizardSession, library: &ReferenceLibrary) -> Result<()> {
    let nac_vendors = library.vendors_in_category("nac");
    let mut options: Vec<String> = vec!["None".to_string()];
    options.extend(nac_vendors.iter().map(|v| v.name.clone()));

    let current = session
        .form()
        .get_str("security.existing_nac")
        .unwrap_or_default()
        .to_string();
    let default = nac_vendors
        .iter()
        .position(|v| v.id == current)
        .map(|i| i + 1)
        .unwrap_or(0);
    let picked = prompts::select("Existing NAC product", &options, default)?;
    let existing = if picked == 0 {
        String::new()
    } else {
        nac_vendors[picked - 1].id.clone()
    };
    session.form_mut().set("security.existing_nac", json!(existing));

    vendor_multi_select(
        session,
        library,
        "firewall",
        "security.firewall_vendors",
        "Firewall vendors",
    )?;

    let siem = prompts::input_text(
        "SIEM platform (optional)",
        session.form().get_str("security.siem").unwrap_or_default(),
    )?;
    session.form_mut().set("security.siem", json!(siem));
    Ok(())
}

fn print_review(session: &WizardSession) {
    let form = session.form();
    println!(
        "   Directories: {}",
        selected_strings(session, "identity.directory_services").join(", ")
    );
    println!(
        "   Switches:    {}",
        selected_strings(session, "infrastructure.switch_vendors").join(", ")
    );
    println!(
        "   Workstations: {}",
        form.get_u64("endpoints.managed_workstations").unwrap_or(0)
    );
    println!(
        "   IoT devices: {}",
        form.get_u64("endpoints.iot_devices").unwrap_or(0)
    );
    let nac = form.get_str("security.existing_nac").unwrap_or("");
    println!(
        "   Existing NAC: {}",
        if nac.is_empty() { "none" } else { nac }
    );
}
