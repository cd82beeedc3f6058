//! Device command handlers.

use serde::Serialize;
use tabled::Tabled;

use nmsops_core::{Console, Device, DeviceAddress, ProvisioningSelection};

use crate::cli::{DevicesArgs, DevicesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "Credential")]
    credential: String,
    #[tabled(rename = "Provisioned")]
    provisioned: String,
}

/// Serialized form with dotted addresses.
#[derive(Serialize)]
struct DeviceView {
    ip: String,
    credential_id: Option<i64>,
    provisioned: bool,
}

impl From<&DeviceView> for DeviceRow {
    fn from(v: &DeviceView) -> Self {
        Self {
            ip: v.ip.clone(),
            credential: v.credential_id.map_or_else(|| "-".into(), |id| id.to_string()),
            provisioned: if v.provisioned { "yes" } else { "no" }.into(),
        }
    }
}

impl From<&Device> for DeviceView {
    fn from(d: &Device) -> Self {
        Self {
            ip: d.address.to_string(),
            credential_id: d.credential_id,
            provisioned: d.provisioned,
        }
    }
}

fn report(sent: usize, global: &GlobalOpts) {
    if global.quiet {
        return;
    }
    if sent == 0 {
        eprintln!("Nothing to change");
    } else {
        eprintln!("Provisioning updated for {sent} device(s)");
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    console: &Console,
    args: DevicesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        DevicesCommand::List => {
            let devices = console.list_devices().await?;
            let views: Vec<DeviceView> = devices.iter().map(DeviceView::from).collect();
            let out = output::render_list(
                &global.output,
                &views,
                |v| DeviceRow::from(v),
                |v| v.ip.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::Provision { devices } => {
            let addresses = util::parse_addresses(&devices)?;
            let sent = console.set_provisioned(&addresses, true).await?;
            report(sent, global);
            Ok(())
        }

        DevicesCommand::Set {
            devices,
            provisioned,
        } => {
            let addresses = util::parse_addresses(&devices)?;
            let sent = console.set_provisioned(&addresses, provisioned).await?;
            report(sent, global);
            Ok(())
        }

        DevicesCommand::Toggle { devices, all } => {
            let mut selection = ProvisioningSelection::new();
            if all {
                let listed: Vec<DeviceAddress> = console
                    .list_devices()
                    .await?
                    .iter()
                    .map(|d| d.address)
                    .collect();
                selection.toggle_all(&listed);
            } else {
                for address in util::parse_addresses(&devices)? {
                    selection.toggle(address);
                }
            }

            // Fails before prompting when nothing is selected
            selection.request()?;
            if !util::confirm(
                &format!("Flip provisioning for {} device(s)?", selection.len()),
                global.yes,
            )? {
                return Ok(());
            }
            let sent = console.submit_provisioning(&mut selection).await?;
            report(sent, global);
            Ok(())
        }
    }
}
