//! Offline target-set resolution.
//!
//! Runs the same resolver the discovery forms use, without a backend.

use serde::Serialize;
use tabled::Tabled;

use nmsops_core::{CidrBlock, ResolvedTargets, TargetMode, TargetSetResolver};

use crate::cli::{GlobalOpts, TargetsArgs, TargetsCommand};
use crate::config;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct AddressRow {
    #[tabled(rename = "IP")]
    ip: String,
}

#[derive(Serialize)]
struct BlockView {
    block: String,
    network: String,
    broadcast: String,
    prefix: u8,
    size: u64,
}

impl From<&CidrBlock> for BlockView {
    fn from(b: &CidrBlock) -> Self {
        Self {
            block: b.to_string(),
            network: b.network().to_string(),
            broadcast: b.broadcast().to_string(),
            prefix: b.prefix(),
            size: b.size(),
        }
    }
}

fn block_detail(v: &BlockView) -> String {
    [
        format!("Block:     {}", v.block),
        format!("Network:   {}", v.network),
        format!("Broadcast: {}", v.broadcast),
        format!("Prefix:    /{}", v.prefix),
        format!("Addresses: {}", v.size),
    ]
    .join("\n")
}

fn render_addresses(global: &GlobalOpts, addresses: &[String]) -> String {
    output::render_list(
        &global.output,
        addresses,
        |ip| AddressRow { ip: ip.clone() },
        Clone::clone,
    )
}

pub fn handle(args: TargetsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        TargetsCommand::Resolve {
            text,
            cidr,
            expand,
            ceiling,
        } => {
            let mode = if cidr { TargetMode::Cidr } else { TargetMode::List };
            let resolver = TargetSetResolver::with_text(mode, text);
            let targets = resolver.resolve()?;

            let out = match &targets {
                ResolvedTargets::Block(block) if !expand => output::render_single(
                    &global.output,
                    &BlockView::from(block),
                    block_detail,
                    |v| v.block.clone(),
                ),
                _ => {
                    let ceiling = ceiling.unwrap_or_else(|| {
                        config::expansion_ceiling(global, &config::load_config_or_default())
                    });
                    let addresses: Vec<String> = targets
                        .expand(ceiling)?
                        .iter()
                        .map(|a| a.to_string())
                        .collect();
                    render_addresses(global, &addresses)
                }
            };
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
