//! Discovery profile command handlers.

use serde::Serialize;
use tabled::Tabled;

use nmsops_core::{
    Console, DiscoveryDraft, DiscoveryProfile, DiscoveryProfileSummary, DiscoverySubmission,
    TargetMode,
};

use crate::cli::{DiscoveryArgs, DiscoveryCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DiscoveryRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Targets")]
    targets: String,
    #[tabled(rename = "Count")]
    count: u64,
    #[tabled(rename = "Credentials")]
    credentials: String,
    #[tabled(rename = "CIDR")]
    cidr: String,
}

const MAX_TARGETS_SHOWN: usize = 48;

impl From<&DiscoveryProfileSummary> for DiscoveryRow {
    fn from(s: &DiscoveryProfileSummary) -> Self {
        let targets = if s.targets.chars().count() > MAX_TARGETS_SHOWN {
            let head: String = s.targets.chars().take(MAX_TARGETS_SHOWN).collect();
            format!("{head}...")
        } else {
            s.targets.clone()
        };
        Self {
            id: s.id,
            targets,
            count: s.target_count,
            credentials: join_ids(&s.credential_profile_ids),
            cidr: if s.is_cidr { "yes" } else { "no" }.into(),
        }
    }
}

/// Single-profile view; `addresses` is filled by `--expand`.
#[derive(Serialize)]
struct DiscoveryDetail {
    #[serde(flatten)]
    summary: DiscoveryProfileSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    addresses: Option<Vec<String>>,
}

fn join_ids(ids: &[i64]) -> String {
    ids.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

fn detail(d: &DiscoveryDetail) -> String {
    let s = &d.summary;
    let mut lines = vec![
        format!("ID:          {}", s.id),
        format!("Targets:     {}", s.targets),
        format!("Count:       {}", s.target_count),
        format!("Credentials: {}", join_ids(&s.credential_profile_ids)),
        format!("CIDR:        {}", if s.is_cidr { "yes" } else { "no" }),
    ];
    if let Some(ref addresses) = d.addresses {
        lines.push(String::new());
        lines.extend(addresses.iter().cloned());
    }
    lines.join("\n")
}

async fn find_profile(console: &Console, id: i64) -> Result<DiscoveryProfile, CliError> {
    console
        .list_discovery_profiles()
        .await?
        .into_iter()
        .find(|p| p.id == id)
        .ok_or_else(|| CliError::NotFound {
            resource_type: "discovery profile".into(),
            identifier: id.to_string(),
            list_command: "discovery list".into(),
        })
}

fn target_mode(cidr: bool) -> TargetMode {
    if cidr { TargetMode::Cidr } else { TargetMode::List }
}

fn report(action: &str, submission: &DiscoverySubmission, global: &GlobalOpts) {
    if !global.quiet {
        eprintln!(
            "Discovery profile {action}: {} ({} target(s))",
            submission.targets,
            submission.targets.size()
        );
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    console: &Console,
    args: DiscoveryArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        DiscoveryCommand::List => {
            let summaries: Vec<DiscoveryProfileSummary> = console
                .list_discovery_profiles()
                .await?
                .iter()
                .map(DiscoveryProfileSummary::from)
                .collect();
            let out = output::render_list(
                &global.output,
                &summaries,
                |s| DiscoveryRow::from(s),
                |s| s.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DiscoveryCommand::Get { id, expand } => {
            let profile = find_profile(console, id).await?;
            let addresses = if expand {
                let set = console.expand_targets(&profile.targets)?;
                Some(set.iter().map(|a| a.to_string()).collect())
            } else {
                None
            };
            let view = DiscoveryDetail {
                summary: DiscoveryProfileSummary::from(&profile),
                addresses,
            };
            let out = output::render_single(&global.output, &view, detail, |d| {
                d.summary.id.to_string()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DiscoveryCommand::Create {
            targets,
            cidr,
            credentials,
        } => {
            let mut draft = DiscoveryDraft::new();
            draft.set_mode(target_mode(cidr));
            draft.edit_targets(targets);
            draft.set_credentials(credentials);

            let submission = console.submit_discovery(&draft).await?;
            report("created", &submission, global);
            Ok(())
        }

        DiscoveryCommand::Update {
            id,
            targets,
            cidr,
            credentials,
        } => {
            let profile = find_profile(console, id).await?;
            let mut draft = DiscoveryDraft::for_edit(&profile);
            if let Some(targets) = targets {
                draft.set_mode(target_mode(cidr));
                draft.edit_targets(targets);
            }
            if !credentials.is_empty() {
                draft.set_credentials(credentials);
            }

            let submission = console.submit_discovery(&draft).await?;
            report("updated", &submission, global);
            Ok(())
        }

        DiscoveryCommand::Delete { id } => {
            if !util::confirm(&format!("Delete discovery profile {id}?"), global.yes)? {
                return Ok(());
            }
            console.delete_discovery_profile(id).await?;
            if !global.quiet {
                eprintln!("Discovery profile {id} deleted");
            }
            Ok(())
        }

        DiscoveryCommand::Run { id } => {
            console.run_discovery(id).await?;
            if !global.quiet {
                eprintln!("Discovery started for profile {id}");
            }
            Ok(())
        }
    }
}
