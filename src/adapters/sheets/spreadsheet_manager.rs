use std::sync::Arc;

use error_stack::{report, ResultExt};
use google_sheets4::{api::ValueRange, Sheets};
use tracing::instrument;

use super::{
    auth,
    drive_lookup::DriveLookup,
    http_client::{self, Connector},
    value_range_factory::{cell_to_string, ValueRangeFactory},
};
use crate::domain::credentials::ServiceAccountCredentials;
use crate::domain::sheets::{a1_notation, row::Row};
use crate::ports::spreadsheet::{
    GatewayError, SpreadsheetAuthorizer, SpreadsheetClient, Worksheet,
};

type Hub = Sheets<Connector>;

/// Authorizes against Google with a service-account key.
#[derive(Debug, Default)]
pub struct GoogleSheetsAuthorizer;

#[async_trait::async_trait]
impl SpreadsheetAuthorizer for GoogleSheetsAuthorizer {
    #[instrument(skip_all)]
    async fn authorize(
        &self,
        credentials: &ServiceAccountCredentials,
        scopes: &[&str],
    ) -> error_stack::Result<Box<dyn SpreadsheetClient>, GatewayError> {
        let client = http_client::http_client()?;
        let authenticator = auth::auth(credentials, client.clone()).await?;
        let access_token = auth::access_token(&authenticator, scopes).await?;
        tracing::debug!("access token obtained");

        let hub: Hub = Sheets::new(client, authenticator);
        Ok(Box::new(SpreadsheetManager {
            hub: Arc::new(hub),
            drive: DriveLookup::new(access_token),
        }))
    }
}

pub struct SpreadsheetManager {
    hub: Arc<Hub>,
    drive: DriveLookup,
}

impl std::fmt::Debug for SpreadsheetManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SpreadsheetManager {{ drive: {:?} }}", self.drive)
    }
}

impl SpreadsheetManager {
    #[instrument]
    async fn first_sheet_title(
        &self,
        spreadsheet_id: &str,
    ) -> error_stack::Result<String, GatewayError> {
        let (_, spreadsheet) = self
            .hub
            .spreadsheets()
            .get(spreadsheet_id)
            .doit()
            .await
            .change_context(GatewayError::Request)
            .attach_printable_lazy(|| format!("Failed to fetch spreadsheet {}", spreadsheet_id))?;

        spreadsheet
            .sheets
            .unwrap_or_default()
            .into_iter()
            .find_map(|sheet| sheet.properties.and_then(|properties| properties.title))
            .ok_or_else(|| report!(GatewayError::MalformedResponse))
            .attach_printable_lazy(|| format!("Spreadsheet {} has no sheets", spreadsheet_id))
    }
}

#[async_trait::async_trait]
impl SpreadsheetClient for SpreadsheetManager {
    #[instrument]
    async fn open_first_sheet(
        &self,
        name: &str,
    ) -> error_stack::Result<Box<dyn Worksheet>, GatewayError> {
        let file = self.drive.find_spreadsheet(name).await?;
        let title = self.first_sheet_title(&file.id).await?;
        tracing::info!("Opened '{}' ({}), first sheet '{}'", file.name, file.id, title);

        Ok(Box::new(ManagedWorksheet {
            hub: Arc::clone(&self.hub),
            spreadsheet_id: file.id,
            title,
        }))
    }
}

pub struct ManagedWorksheet {
    hub: Arc<Hub>,
    spreadsheet_id: String,
    title: String,
}

impl std::fmt::Debug for ManagedWorksheet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ManagedWorksheet {{ spreadsheet_id: {:?}, title: {:?} }}",
            self.spreadsheet_id, self.title
        )
    }
}

#[async_trait::async_trait]
impl Worksheet for ManagedWorksheet {
    fn title(&self) -> &str {
        &self.title
    }

    #[instrument]
    async fn row_values(&self, row: Row) -> error_stack::Result<Vec<String>, GatewayError> {
        let range = a1_notation::whole_row(&self.title, row);
        let (_, value_range) = self
            .hub
            .spreadsheets()
            .values_get(&self.spreadsheet_id, &range)
            .major_dimension("ROWS")
            .doit()
            .await
            .change_context(GatewayError::Request)
            .attach_printable_lazy(|| format!("Failed to read range {}", range))?;

        // Trailing empty cells are omitted by the API; an empty row has no values at all.
        let cells = value_range
            .values
            .unwrap_or_default()
            .into_iter()
            .next()
            .unwrap_or_default();

        Ok(cells.into_iter().map(cell_to_string).collect())
    }

    #[instrument]
    async fn append_row(&self, values: &[String]) -> error_stack::Result<(), GatewayError> {
        let range = a1_notation::whole_sheet(&self.title);
        self.hub
            .spreadsheets()
            .values_append(
                ValueRange::from_single_row(values),
                &self.spreadsheet_id,
                &range,
            )
            .value_input_option("RAW")
            .doit()
            .await
            .map(|_| ())
            .change_context(GatewayError::Request)
            .attach_printable_lazy(|| format!("Failed to append to range {}", range))
    }
}
