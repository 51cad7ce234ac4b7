use error_stack::{report, ResultExt};
use serde::Deserialize;
use tracing::instrument;

use crate::ports::spreadsheet::GatewayError;

const DRIVE_FILES_URL: &str = "https://www.googleapis.com/drive/v3/files";
const SPREADSHEET_MIME_TYPE: &str = "application/vnd.google-apps.spreadsheet";

#[derive(Deserialize, Debug)]
struct FileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DriveFile {
    pub id: String,
    pub name: String,
}

/// Resolves spreadsheets by title through the Drive v3 API; the Sheets API
/// itself only addresses spreadsheets by id.
pub struct DriveLookup {
    http: reqwest::Client,
    access_token: String,
}

impl std::fmt::Debug for DriveLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DriveLookup {{ access_token: <redacted> }}")
    }
}

fn escape_query_literal(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

pub fn spreadsheet_query(name: &str) -> String {
    format!(
        "name = '{}' and mimeType = '{}' and trashed = false",
        escape_query_literal(name),
        SPREADSHEET_MIME_TYPE
    )
}

fn first_match(list: FileList, name: &str) -> error_stack::Result<DriveFile, GatewayError> {
    list.files.into_iter().next().ok_or_else(|| {
        report!(GatewayError::SpreadsheetNotFound {
            name: name.to_string()
        })
    })
}

impl DriveLookup {
    pub fn new(access_token: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            access_token,
        }
    }

    #[instrument]
    pub async fn find_spreadsheet(
        &self,
        name: &str,
    ) -> error_stack::Result<DriveFile, GatewayError> {
        let query = spreadsheet_query(name);
        let response = self
            .http
            .get(DRIVE_FILES_URL)
            .bearer_auth(&self.access_token)
            .query(&[
                ("q", query.as_str()),
                ("fields", "files(id,name)"),
                ("pageSize", "10"),
                ("supportsAllDrives", "true"),
                ("includeItemsFromAllDrives", "true"),
            ])
            .send()
            .await
            .change_context(GatewayError::Request)
            .attach_printable("Drive files.list request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(report!(GatewayError::Request))
                .attach_printable(format!("Drive API responded with {status}: {body}"));
        }

        let list: FileList = response
            .json()
            .await
            .change_context(GatewayError::MalformedResponse)?;
        tracing::debug!("Drive returned {} candidate(s)", list.files.len());

        first_match(list, name)
    }
}
