//! Shared helpers for command handlers.

use nmsops_core::{DeviceAddress, ResolvedTargets, TargetMode, TargetSpec};

use crate::error::CliError;

/// Parse device address arguments. Each argument may itself hold a
/// comma-separated list; duplicates collapse and the result is sorted.
///
/// Every malformed token is reported at once.
pub fn parse_addresses(args: &[String]) -> Result<Vec<DeviceAddress>, CliError> {
    let addresses = match TargetSpec::from_input(TargetMode::List, &args.join(",")).resolve()? {
        ResolvedTargets::Addresses(set) => set.to_vec(),
        ResolvedTargets::Block(_) => Vec::new(),
    };
    if addresses.is_empty() {
        return Err(CliError::Validation {
            field: "devices".into(),
            reason: "at least one device address is required".into(),
        });
    }
    Ok(addresses)
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Map a dialoguer / interactive I/O failure into CliError.
pub fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn accepts_separate_and_comma_joined_args() {
        let args = vec!["10.0.0.2, 10.0.0.1".to_owned(), "10.0.0.2".to_owned()];
        let parsed: Vec<String> = parse_addresses(&args)
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(parsed, ["10.0.0.1", "10.0.0.2"]);
    }

    #[test]
    fn reports_every_bad_token() {
        let args = vec!["10.0.0.1".to_owned(), "foo,10.0.0.256".to_owned()];
        match parse_addresses(&args).unwrap_err() {
            CliError::Validation { field, reason } => {
                assert_eq!(field, "targets");
                assert!(reason.contains("foo, 10.0.0.256"), "{reason}");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn blank_input_is_rejected() {
        assert!(matches!(
            parse_addresses(&[" , ".to_owned()]),
            Err(CliError::Validation { .. })
        ));
    }
}
