// src/formatting.rs

//! Per-event message formatters.
//!
//! Each supported webhook kind gets a typed field struct extracted from the
//! raw payload in one defaulting pass, and a pure formatter that renders the
//! Telegram HTML message from it. The only branching left in the formatters
//! themselves is the documented conclusion/state split; every optional field
//! has already been resolved to its placeholder by the time a template is
//! built.

use crate::payload::{lookup, str_or};
use chrono::{DateTime, FixedOffset};
use serde_json::Value;

/// Fields rendered by the push message, defaults already applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushFields {
    pub repo_name: String,
    pub repo_url: String,
    pub branch: String,
    pub pusher: String,
    pub commit_id: String,
    pub commit_message: String,
    pub compare_url: String,
}

impl PushFields {
    pub fn from_payload(payload: &Value) -> Self {
        let full_ref = str_or(payload, "ref", "");
        let branch = full_ref
            .strip_prefix("refs/heads/")
            .unwrap_or(&full_ref)
            .to_string();
        // Commit ids are shown in their 7-character short form.
        let commit_id: String = str_or(payload, "head_commit.id", "").chars().take(7).collect();

        Self {
            repo_name: str_or(payload, "repository.name", "N/A"),
            repo_url: str_or(payload, "repository.html_url", ""),
            branch,
            pusher: str_or(payload, "pusher.name", "N/A"),
            commit_id,
            commit_message: str_or(payload, "head_commit.message", "N/A"),
            compare_url: str_or(payload, "compare", ""),
        }
    }
}

pub fn format_push(fields: &PushFields) -> String {
    format!(
        "🚀 <b>Nuevo Push Recibido</b>\n\n\
         📦 <b>Repo:</b> <a href=\"{}\">{}</a>\n\
         🌿 <b>Rama:</b> <code>{}</code>\n\
         👤 <b>Autor:</b> {}\n\n\
         📝 <b>Commit:</b> <code>{}</code>\n\
         💬 <b>Mensaje:</b> {}\n\n\
         🔗 <a href=\"{}\"><b>Ver Diferencias (Diff)</b></a>",
        fields.repo_url,
        fields.repo_name,
        fields.branch,
        fields.pusher,
        fields.commit_id,
        fields.commit_message,
        fields.compare_url,
    )
}

/// Fields rendered by the workflow_run messages, defaults already applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowRunFields {
    pub repo_name: String,
    pub repo_url: String,
    pub workflow_name: String,
    pub branch: String,
    pub event: String,
    pub conclusion: String,
    pub run_url: String,
    /// Wall-clock run time rendered as `"<seconds>s"`, or `"N/A"` when
    /// either timestamp is missing or unparsable.
    pub duration: String,
}

impl WorkflowRunFields {
    pub fn from_payload(payload: &Value) -> Self {
        Self {
            repo_name: str_or(payload, "repository.name", "N/A"),
            repo_url: str_or(payload, "repository.html_url", ""),
            workflow_name: str_or(payload, "workflow_run.name", "N/A"),
            branch: str_or(payload, "workflow_run.head_branch", "N/A"),
            event: str_or(payload, "workflow_run.event", "N/A"),
            conclusion: str_or(payload, "workflow_run.conclusion", ""),
            run_url: str_or(payload, "workflow_run.html_url", ""),
            duration: run_duration(payload),
        }
    }
}

/// Parses an ISO-8601 timestamp at `path`, normalizing a trailing `Z` UTC
/// designator to an explicit `+00:00` offset first.
fn parse_utc_timestamp(payload: &Value, path: &str) -> Option<DateTime<FixedOffset>> {
    let raw = lookup(payload, path)?.as_str()?;
    let normalized = match raw.strip_suffix('Z') {
        Some(prefix) => format!("{prefix}+00:00"),
        None => raw.to_string(),
    };
    DateTime::parse_from_rfc3339(&normalized).ok()
}

fn run_duration(payload: &Value) -> String {
    let started = parse_utc_timestamp(payload, "workflow_run.run_started_at");
    let updated = parse_utc_timestamp(payload, "workflow_run.updated_at");
    match (started, updated) {
        (Some(started), Some(updated)) => format!("{}s", (updated - started).num_seconds()),
        _ => "N/A".to_string(),
    }
}

pub fn format_workflow_run(fields: &WorkflowRunFields) -> String {
    if fields.conclusion == "failure" {
        format!(
            "💀 <b>FALLO CRÍTICO EN GITHUB ACTIONS</b>\n\n\
             📦 <b>Repo:</b> <a href=\"{}\">{}</a>\n\
             ⚙️ <b>Workflow:</b> <code>{}</code>\n\
             🌿 <b>Rama:</b> <code>{}</code>\n\n\
             🧨 <b>Evento:</b> {}\n\
             ❌ <b>Estado:</b> FAILURE\n\n\
             🆘 <a href=\"{}\"><b>VER LOGS DEL ERROR</b></a>",
            fields.repo_url,
            fields.repo_name,
            fields.workflow_name,
            fields.branch,
            fields.event,
            fields.run_url,
        )
    } else {
        format!(
            "✅ <b>GITHUB ACTION COMPLETADO</b>\n\n\
             📦 <b>Repo:</b> <a href=\"{}\">{}</a>\n\
             ⚙️ <b>Workflow:</b> <code>{}</code>\n\
             🌿 <b>Rama:</b> <code>{}</code>\n\n\
             🏁 <b>Conclusión:</b> {}\n\
             ⏱️ <b>Duración:</b> {}\n\n\
             🔍 <a href=\"{}\"><b>VER DETALLES</b></a>",
            fields.repo_url,
            fields.repo_name,
            fields.workflow_name,
            fields.branch,
            fields.conclusion,
            fields.duration,
            fields.run_url,
        )
    }
}

/// Fields rendered by the deployment_status messages, defaults already
/// applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentStatusFields {
    pub state: String,
    pub repo_name: String,
    pub repo_url: String,
    pub deployment_ref: String,
    pub environment: String,
    pub description: String,
    pub target_url: String,
    /// The target url as shown inline in the success message ("N/A" when
    /// absent, unlike the href which degrades to an empty string).
    pub target_url_display: String,
    /// Branch shown on success, resolved from the provider metadata.
    pub success_branch: String,
}

impl DeploymentStatusFields {
    pub fn from_payload(payload: &Value) -> Self {
        Self {
            state: str_or(payload, "deployment_status.state", ""),
            repo_name: str_or(payload, "repository.name", "N/A"),
            repo_url: str_or(payload, "repository.html_url", ""),
            deployment_ref: str_or(payload, "deployment.ref", "N/A"),
            environment: str_or(payload, "deployment.environment", "N/A"),
            description: str_or(payload, "deployment_status.description", "N/A"),
            target_url: str_or(payload, "deployment_status.target_url", ""),
            target_url_display: str_or(payload, "deployment_status.target_url", "N/A"),
            success_branch: success_branch(payload),
        }
    }
}

/// Vercel reports the branch under `deployment.meta.githubCommitRef`; older
/// payloads carried it under `deployment.payload` instead. An empty `meta`
/// object falls through like a missing one, and a missing `githubCommitRef`
/// in the chosen object falls back to the deployment's own ref.
fn success_branch(payload: &Value) -> String {
    let meta = lookup(payload, "deployment.meta")
        .and_then(Value::as_object)
        .filter(|m| !m.is_empty())
        .or_else(|| lookup(payload, "deployment.payload").and_then(Value::as_object));

    meta.and_then(|m| m.get("githubCommitRef"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| str_or(payload, "deployment.ref", "N/A"))
}

/// Renders the deployment_status message, or `None` when the state is one
/// the service deliberately stays silent about (pending, in_progress, ...).
pub fn format_deployment_status(fields: &DeploymentStatusFields) -> Option<String> {
    match fields.state.as_str() {
        "failure" => Some(format!(
            "🔥 <b>¡FALLÓ EL DESPLIEGUE!</b>\n\n\
             📂 <b>Repo:</b> <a href=\"{}\">{}</a>\n\
             🌿 <b>Rama:</b> <code>{}</code>\n\
             🌍 <b>Entorno:</b> {}\n\n\
             📜 <b>Detalle:</b>\n\
             <code>{}</code>\n\n\
             🔗 <a href=\"{}\"><b>VER LOGS DEL ERROR</b></a>",
            fields.repo_url,
            fields.repo_name,
            fields.deployment_ref,
            fields.environment,
            fields.description,
            fields.target_url,
        )),
        "success" => Some(format!(
            "🎉 <b>¡DESPLIEGUE EXITOSO!</b>\n\n\
             📂 <b>Repo:</b> <a href=\"{}\">{}</a>\n\
             🌿 <b>Rama:</b> <code>{}</code>\n\
             🌍 <b>Entorno:</b> {}\n\n\
             🔗 <b>Link:</b> <code>{}</code>\n\n\
             👉 <a href=\"{}\"><b>Hacer Clic para Abrir</b></a>",
            fields.repo_url,
            fields.repo_name,
            fields.success_branch,
            fields.environment,
            fields.target_url_display,
            fields.target_url,
        )),
        _ => None,
    }
}
