//! Credential profile command handlers.

use secrecy::SecretString;
use tabled::Tabled;

use nmsops_core::{Console, CredentialProfileDraft, CredentialProfileRef};

use crate::cli::{CredentialFields, CredentialsArgs, CredentialsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct CredentialRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Hostname")]
    hostname: String,
    #[tabled(rename = "Port")]
    port: u16,
}

impl From<&CredentialProfileRef> for CredentialRow {
    fn from(p: &CredentialProfileRef) -> Self {
        Self {
            id: p.id,
            hostname: p.hostname.clone(),
            port: p.port,
        }
    }
}

/// Validate the form fields, prompting for the password when it was not
/// supplied by flag or environment.
fn draft(fields: CredentialFields) -> Result<CredentialProfileDraft, CliError> {
    let password = match fields.password {
        Some(password) => password,
        None => rpassword::prompt_password("Password: ").map_err(util::prompt_err)?,
    };
    Ok(CredentialProfileDraft::new(
        &fields.hostname,
        SecretString::from(password),
        &fields.port,
    )?)
}

pub async fn handle(
    console: &Console,
    args: CredentialsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        CredentialsCommand::List => {
            let profiles = console.list_credential_profiles().await?;
            let out = output::render_list(
                &global.output,
                &profiles,
                |p| CredentialRow::from(p),
                |p| p.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CredentialsCommand::Create(fields) => {
            let draft = draft(fields)?;
            console.create_credential_profile(&draft).await?;
            if !global.quiet {
                eprintln!("Credential profile created for {}", draft.hostname);
            }
            Ok(())
        }

        CredentialsCommand::Update { id, fields } => {
            let draft = draft(fields)?;
            console.update_credential_profile(id, &draft).await?;
            if !global.quiet {
                eprintln!("Credential profile {id} updated");
            }
            Ok(())
        }

        CredentialsCommand::Delete { id } => {
            if !util::confirm(&format!("Delete credential profile {id}?"), global.yes)? {
                return Ok(());
            }
            console.delete_credential_profile(id).await?;
            if !global.quiet {
                eprintln!("Credential profile {id} deleted");
            }
            Ok(())
        }
    }
}
