use strum::IntoStaticStr;
use thiserror::Error;

use crate::domain::credentials::ServiceAccountCredentials;
use crate::domain::sheets::row::Row;

/// Failures reported by the remote spreadsheet service. The variant name is
/// printed as the error kind.
#[derive(Error, Debug, Clone, PartialEq, Eq, IntoStaticStr)]
pub enum GatewayError {
    #[error("Could not set up the HTTPS client")]
    HttpClient,
    #[error("Service account key was rejected")]
    InvalidCredentials,
    #[error("Could not obtain an access token")]
    TokenRequest,
    #[error("Spreadsheet '{name}' not found")]
    SpreadsheetNotFound { name: String },
    #[error("Request to the spreadsheet service failed")]
    Request,
    #[error("Unexpected response from the spreadsheet service")]
    MalformedResponse,
}

impl GatewayError {
    pub fn kind(&self) -> &'static str {
        self.into()
    }
}

#[async_trait::async_trait]
pub trait SpreadsheetAuthorizer: Send + Sync {
    /// Authenticates the service account for `scopes` and returns a client
    /// handle bound to it.
    async fn authorize(
        &self,
        credentials: &ServiceAccountCredentials,
        scopes: &[&str],
    ) -> error_stack::Result<Box<dyn SpreadsheetClient>, GatewayError>;
}

#[async_trait::async_trait]
pub trait SpreadsheetClient: Send + Sync {
    /// Opens the spreadsheet titled `name` and returns its first worksheet.
    async fn open_first_sheet(
        &self,
        name: &str,
    ) -> error_stack::Result<Box<dyn Worksheet>, GatewayError>;
}

#[async_trait::async_trait]
pub trait Worksheet: Send + Sync {
    fn title(&self) -> &str;

    async fn row_values(&self, row: Row) -> error_stack::Result<Vec<String>, GatewayError>;

    async fn append_row(&self, values: &[String]) -> error_stack::Result<(), GatewayError>;
}

/// Error kind and message of a gateway report, including printable attachments.
pub fn describe(report: &error_stack::Report<GatewayError>) -> (&'static str, String) {
    let mut message = format!("{report:#}");
    let details = report.frames().filter_map(|frame| {
        frame
            .downcast_ref::<String>()
            .map(String::as_str)
            .or_else(|| frame.downcast_ref::<&'static str>().copied())
    });
    for detail in details {
        message.push_str(" (");
        message.push_str(detail);
        message.push(')');
    }
    (report.current_context().kind(), message)
}
