use std::process::ExitCode;

use sheets_diagnostics::adapters::config::app_config::AppConfig;
use sheets_diagnostics::adapters::sheets::spreadsheet_manager::GoogleSheetsAuthorizer;
use sheets_diagnostics::application::diagnostic::{ConnectionDiagnostic, DiagnosticOptions};
use sheets_diagnostics::prettyprint::console::Console;
use thiserror::Error;
use tracing::{error, info, instrument};

pub const USAGE: &str = "\
Usage: sheets-diagnostics [--sheet <NAME>] [--skip-write]

Checks Google Sheets access for the service account described by the
GOOGLE_* environment variables.

Options:
  --sheet <NAME>   Spreadsheet to open instead of GOOGLE_SHEET_NAME
  --skip-write     Do not append the test row
  -h, --help       Print this help";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Invalid command: {details}")]
    InvalidCommand { details: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Diagnose(DiagnosticOptions),
    Help,
}

pub fn parse_args<I>(args: I) -> Result<Command, CommandError>
where
    I: IntoIterator<Item = String>,
{
    let mut options = DiagnosticOptions::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "--skip-write" => options.skip_write = true,
            "--sheet" => {
                let name = args.next().ok_or_else(|| CommandError::InvalidCommand {
                    details: "--sheet requires a spreadsheet name".to_string(),
                })?;
                options.sheet_name = Some(name);
            }
            other => match other.strip_prefix("--sheet=") {
                Some(name) => options.sheet_name = Some(name.to_string()),
                None => {
                    return Err(CommandError::InvalidCommand {
                        details: format!("unknown argument '{}'", other),
                    })
                }
            },
        }
    }

    if options.sheet_name.as_deref() == Some("") {
        return Err(CommandError::InvalidCommand {
            details: "spreadsheet name must not be empty".to_string(),
        });
    }

    Ok(Command::Diagnose(options))
}

#[instrument(skip(config))]
pub async fn run(options: DiagnosticOptions, config: &AppConfig) -> ExitCode {
    let mut console = Console::stdout();
    let authorizer = GoogleSheetsAuthorizer;
    let diagnostic = ConnectionDiagnostic::new(&authorizer, options);

    match diagnostic
        .run(&config.configuration_set(), &mut console)
        .await
    {
        Ok(summary) => {
            info!("Diagnostics passed: {:?}", summary);
            ExitCode::SUCCESS
        }
        Err(report) => {
            error!("Diagnostics stopped: {}", report);
            tracing::debug!("{:?}", report);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Command, CommandError> {
        parse_args(args.iter().map(|arg| arg.to_string()))
    }

    #[test]
    fn test_no_arguments_runs_every_check() {
        assert_eq!(
            parse(&[]),
            Ok(Command::Diagnose(DiagnosticOptions::default()))
        );
    }

    #[test]
    fn test_sheet_and_skip_write() {
        let expected = Command::Diagnose(DiagnosticOptions {
            sheet_name: Some("Leads 2024".to_string()),
            skip_write: true,
        });
        assert_eq!(parse(&["--sheet", "Leads 2024", "--skip-write"]), Ok(expected.clone()));
        assert_eq!(parse(&["--skip-write", "--sheet=Leads 2024"]), Ok(expected));
    }

    #[test]
    fn test_help_wins() {
        assert_eq!(parse(&["--skip-write", "--help"]), Ok(Command::Help));
        assert_eq!(parse(&["-h"]), Ok(Command::Help));
    }

    #[test]
    fn test_invalid_arguments() {
        assert!(matches!(
            parse(&["--sheet"]),
            Err(CommandError::InvalidCommand { .. })
        ));
        assert!(matches!(
            parse(&["--sheet="]),
            Err(CommandError::InvalidCommand { .. })
        ));
        assert_eq!(
            parse(&["--verbose"]),
            Err(CommandError::InvalidCommand {
                details: "unknown argument '--verbose'".to_string()
            })
        );
    }
}
