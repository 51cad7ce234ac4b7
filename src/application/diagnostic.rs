use std::io::Write;

use error_stack::{report, Report};
use thiserror::Error;
use tracing::instrument;

use crate::domain::configuration::{ConfigurationSet, Disclosure, ResolvedConfiguration};
use crate::domain::credentials::{KeyFormat, ServiceAccountCredentials, SCOPES};
use crate::domain::sheets::row::Row;
use crate::ports::spreadsheet::{
    describe, GatewayError, SpreadsheetAuthorizer, SpreadsheetClient, Worksheet,
};
use crate::prettyprint::console::Console;

/// Row appended by the write check.
pub const TEST_ROW: [&str; 3] = ["TEST", "діагностика", "успішна"];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticError {
    #[error("Missing environment variables: {}", .missing.join(", "))]
    MissingConfiguration { missing: Vec<&'static str> },
    #[error("Failed to assemble service account credentials")]
    CredentialAssembly,
    #[error("Authorization with Google failed")]
    Authentication,
    #[error("Spreadsheet '{name}' not found")]
    SpreadsheetNotFound { name: String },
    #[error("Failed to open spreadsheet '{name}'")]
    OpenFailed { name: String },
    #[error("Failed to append the test row")]
    WriteFailed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosticOptions {
    /// Overrides `GOOGLE_SHEET_NAME`.
    pub sheet_name: Option<String>,
    pub skip_write: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticSummary {
    pub sheet_name: String,
    pub worksheet_title: String,
    pub headers: Vec<String>,
    pub test_row_written: bool,
}

/// Five fail-fast checks of a Google Sheets service-account setup. Every
/// failure is reported on the console where it happens; the returned error
/// only tells the caller which check stopped the run.
pub struct ConnectionDiagnostic<'a> {
    authorizer: &'a dyn SpreadsheetAuthorizer,
    options: DiagnosticOptions,
}

impl std::fmt::Debug for ConnectionDiagnostic<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionDiagnostic")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

type StepResult<T> = error_stack::Result<T, DiagnosticError>;

impl<'a> ConnectionDiagnostic<'a> {
    pub fn new(authorizer: &'a dyn SpreadsheetAuthorizer, options: DiagnosticOptions) -> Self {
        Self {
            authorizer,
            options,
        }
    }

    #[instrument(skip_all)]
    pub async fn run<W: Write>(
        &self,
        configuration: &ConfigurationSet,
        console: &mut Console<W>,
    ) -> StepResult<DiagnosticSummary> {
        console.banner("🔍 GOOGLE SHEETS CONNECTION DIAGNOSTICS");

        let resolved = check_configuration(configuration, console)?;
        let credentials = assemble_credentials(&resolved, console)?;
        let client = self.authenticate(&credentials, console).await?;

        let sheet_name = self
            .options
            .sheet_name
            .clone()
            .unwrap_or_else(|| resolved.sheet_name.clone());
        let (worksheet, headers) =
            open_spreadsheet(client.as_ref(), &sheet_name, &resolved.client_email, console)
                .await?;

        let test_row_written = if self.options.skip_write {
            console.section("✍️  Step 5: Test write");
            console.line("Skipped (--skip-write)");
            false
        } else {
            write_test_row(worksheet.as_ref(), console).await?;
            true
        };

        console.blank();
        console.banner("✅ ALL CHECKS PASSED!");
        console.blank();
        console.line("Google Sheets connection works correctly!");
        console.flush();

        Ok(DiagnosticSummary {
            sheet_name,
            worksheet_title: worksheet.title().to_string(),
            headers,
            test_row_written,
        })
    }

    async fn authenticate<W: Write>(
        &self,
        credentials: &ServiceAccountCredentials,
        console: &mut Console<W>,
    ) -> StepResult<Box<dyn SpreadsheetClient>> {
        console.section("🔐 Step 3: Authorizing with Google");

        match self.authorizer.authorize(credentials, &SCOPES).await {
            Ok(client) => {
                console.success("Service account credentials accepted");
                console.success("Authorization with Google succeeded!");
                Ok(client)
            }
            Err(report) => {
                let (kind, message) = describe(&report);
                console.failure(format_args!("AUTHORIZATION ERROR: {}: {}", kind, message));
                console.numbered(
                    "Possible causes:",
                    &[
                        "Private key is malformed (check the \\n escapes)",
                        "Service account does not exist or was deleted",
                        "Google Sheets / Drive API is not enabled in Google Cloud Console",
                    ],
                );
                console.flush();
                Err(report.change_context(DiagnosticError::Authentication))
            }
        }
    }
}

fn check_configuration<W: Write>(
    configuration: &ConfigurationSet,
    console: &mut Console<W>,
) -> StepResult<ResolvedConfiguration> {
    console.section("📋 Step 1: Checking environment variables");

    for (var, value) in configuration.entries() {
        match value {
            Some(value) => match var.disclosure() {
                Disclosure::LengthOnly => console.success(format_args!(
                    "{}: present (length: {} characters)",
                    var,
                    value.chars().count()
                )),
                Disclosure::Full => console.success(format_args!("{}: {}", var, value)),
                Disclosure::PresenceOnly => console.success(format_args!("{}: present", var)),
            },
            None => console.failure(format_args!("{}: MISSING!", var)),
        }
    }

    configuration.resolve().map_err(|missing| {
        console.blank();
        console.failure("PROBLEM: some environment variables are missing!");
        console.line("Add the missing variables in your hosting environment settings (e.g. Render.com → Environment)");
        console.flush();
        report!(DiagnosticError::MissingConfiguration {
            missing: missing.into_iter().map(|var| var.name()).collect(),
        })
    })
}

fn assemble_credentials<W: Write>(
    resolved: &ResolvedConfiguration,
    console: &mut Console<W>,
) -> StepResult<ServiceAccountCredentials> {
    console.section("🔑 Step 2: Building credentials");

    let credentials = ServiceAccountCredentials::assemble(resolved);

    match credentials.key_format() {
        KeyFormat::WellFormed => console.success("Private key is formatted correctly"),
        KeyFormat::MissingPemHeader { preview } => {
            tracing::warn!("private key does not start with a PEM header");
            console.warning("WARNING: private key may be formatted incorrectly");
            console.line(format_args!("Starts with: {}...", preview));
        }
    }

    credentials.to_key_document().map_err(|err| {
        console.failure(format_args!("ERROR while formatting credentials: {}", err));
        console.flush();
        Report::new(err).change_context(DiagnosticError::CredentialAssembly)
    })?;

    console.success("Credentials record created");
    Ok(credentials)
}

async fn open_spreadsheet<W: Write>(
    client: &dyn SpreadsheetClient,
    sheet_name: &str,
    client_email: &str,
    console: &mut Console<W>,
) -> StepResult<(Box<dyn Worksheet>, Vec<String>)> {
    console.section("📊 Step 4: Opening the spreadsheet");
    console.line(format_args!("Trying to open spreadsheet: '{}'", sheet_name));

    let opened = match client.open_first_sheet(sheet_name).await {
        Ok(worksheet) => {
            console.success(format_args!("Spreadsheet '{}' opened successfully!", sheet_name));
            let headers = worksheet.row_values(Row::FIRST).await;
            headers.map(|headers| (worksheet, headers))
        }
        Err(report) => Err(report),
    };

    match opened {
        Ok((worksheet, headers)) => {
            if headers.is_empty() {
                console.warning("WARNING: the sheet is empty (no headers)");
            } else {
                console.blank();
                console.line("📋 Sheet headers:");
                for (index, header) in headers.iter().enumerate() {
                    console.line(format_args!("   {}. {}", index + 1, header));
                }
            }
            Ok((worksheet, headers))
        }
        Err(report) => {
            let not_found = matches!(
                report.current_context(),
                GatewayError::SpreadsheetNotFound { .. }
            );
            if not_found {
                report_not_found(sheet_name, client_email, console);
                return Err(report.change_context(DiagnosticError::SpreadsheetNotFound {
                    name: sheet_name.to_string(),
                }));
            }

            let (kind, message) = describe(&report);
            console.failure(format_args!("OTHER ERROR: {}: {}", kind, message));
            console.flush();
            Err(report.change_context(DiagnosticError::OpenFailed {
                name: sheet_name.to_string(),
            }))
        }
    }
}

fn report_not_found<W: Write>(sheet_name: &str, client_email: &str, console: &mut Console<W>) {
    console.failure(format_args!("SPREADSHEET NOT FOUND: '{}'", sheet_name));
    console.numbered(
        "Possible causes:",
        &[
            "The spreadsheet name is misspelled (check letter case and spaces)",
            "The spreadsheet is NOT shared with the service account email",
        ],
    );
    console.blank();
    console.line(format_args!(
        "Check that the spreadsheet is shared with: {}",
        client_email
    ));
    console.numbered(
        "How to share:",
        &[
            "Open the spreadsheet in Google Sheets",
            "Click 'Share'",
            "Add the email above",
            "Choose the 'Editor' role",
        ],
    );
    console.flush();
}

async fn write_test_row<W: Write>(
    worksheet: &dyn Worksheet,
    console: &mut Console<W>,
) -> StepResult<()> {
    console.section("✍️  Step 5: Test write");

    let row: Vec<String> = TEST_ROW.iter().map(|cell| cell.to_string()).collect();
    match worksheet.append_row(&row).await {
        Ok(()) => {
            console.success("Test row appended successfully!");
            console.blank();
            console.line("Check the spreadsheet: a new row starting with 'TEST' should appear");
            Ok(())
        }
        Err(report) => {
            let (kind, message) = describe(&report);
            console.failure(format_args!("WRITE ERROR: {}: {}", kind, message));
            console.blank();
            console.line("Likely cause: the service account has 'Viewer' access instead of 'Editor'");
            console.flush();
            Err(report.change_context(DiagnosticError::WriteFailed))
        }
    }
}
