use std::{collections::HashMap, fmt::Debug, path::Path};

use error_stack::{report, ResultExt};
use google_sheets4::{
    api::{Scope, Spreadsheet},
    Sheets,
};
use thiserror::Error;
use tracing::instrument;

use crate::config::sheets_config::SpreadsheetConfig;

use super::{
    auth,
    http_client::{self, Connector},
};

/// Every request is authorized for full read/write access to spreadsheets.
pub(super) const SCOPE: Scope = Scope::Spreadsheet;

/// An authorized Sheets client bound to one spreadsheet.
pub struct SpreadsheetManager {
    pub config: SpreadsheetConfig,
    pub(super) hub: Sheets<Connector>,
}

impl Debug for SpreadsheetManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SpreadsheetManager {{ config: {:?} }}", self.config)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpreadsheetManagerError {
    #[error("Service account key file not found")]
    CredentialsNotFound,
    #[error("Invalid service account credentials")]
    InvalidCredentials,
    #[error("Failed to build HTTPS client")]
    FailedToBuildClient,
    #[error("Failed to fetch range")]
    FailedToFetchRange,
    #[error("Failed to write range")]
    FailedToWriteRange,
    #[error("Failed to format range")]
    FailedToFormatRange,
    #[error("Failed to fetch spreadsheet")]
    FailedToFetchSpreadsheet,
    #[error("Sheet {0:?} not found in spreadsheet")]
    SheetNotFound(String),
    #[error("Invalid A1 range")]
    InvalidRange,
    #[error("Values do not match the shape of the range")]
    ShapeMismatch,
    #[error("Invalid color")]
    InvalidColor,
}

impl SpreadsheetManager {
    #[instrument(name = "SpreadsheetManager::new")]
    pub async fn new(
        config: SpreadsheetConfig,
    ) -> error_stack::Result<Self, SpreadsheetManagerError> {
        let secret = auth::read_key(Path::new(config.priv_key.as_ref())).await?;
        let client = http_client::http_client()?;
        let auth = auth::auth(secret, client.clone()).await?;
        let hub = Sheets::new(client, auth);

        Ok(SpreadsheetManager { config, hub })
    }

    /// Shorthand for [`SpreadsheetManager::new`] from a key path and spreadsheet id.
    pub async fn connect(
        priv_key: impl Into<Box<str>>,
        spreadsheet_id: impl Into<Box<str>>,
    ) -> error_stack::Result<Self, SpreadsheetManagerError> {
        Self::new(SpreadsheetConfig {
            priv_key: priv_key.into(),
            spreadsheet_id: spreadsheet_id.into(),
        })
        .await
    }

    /// Points subsequent calls at another spreadsheet, reusing the authorized client.
    pub fn select_spreadsheet(&mut self, spreadsheet_id: impl Into<Box<str>>) {
        self.config.spreadsheet_id = spreadsheet_id.into();
    }

    pub fn spreadsheet_id(&self) -> &str {
        &self.config.spreadsheet_id
    }

    #[instrument]
    pub async fn spreadsheet_info(
        &self,
    ) -> error_stack::Result<Spreadsheet, SpreadsheetManagerError> {
        let (_, spreadsheet) = self
            .hub
            .spreadsheets()
            .get(&self.config.spreadsheet_id)
            .add_scope(SCOPE)
            .doit()
            .await
            .change_context(SpreadsheetManagerError::FailedToFetchSpreadsheet)
            .attach_printable_lazy(|| {
                format!("Failed to fetch spreadsheet {}", self.config.spreadsheet_id)
            })?;

        Ok(spreadsheet)
    }

    /// Maps each sheet title to its numeric sheet id.
    #[instrument]
    pub async fn sheet_ids(
        &self,
    ) -> error_stack::Result<HashMap<String, i32>, SpreadsheetManagerError> {
        let spreadsheet = self.spreadsheet_info().await?;

        Ok(sheet_ids_of(&spreadsheet).into_iter().collect())
    }

    /// Resolves a sheet title to its sheet id. Without a title, A1 ranges refer
    /// to the first visible sheet, so that one is returned.
    #[instrument]
    pub async fn sheet_id(
        &self,
        sheet_title: Option<&str>,
    ) -> error_stack::Result<i32, SpreadsheetManagerError> {
        let spreadsheet = self.spreadsheet_info().await?;
        let sheet_ids = sheet_ids_of(&spreadsheet);

        let found = match sheet_title {
            Some(title) => sheet_ids
                .iter()
                .find(|(name, _)| name == title)
                .map(|(_, id)| *id),
            None => first_visible_sheet_id(&spreadsheet),
        };

        found.ok_or_else(|| {
            let title = sheet_title.unwrap_or_default().to_string();
            report!(SpreadsheetManagerError::SheetNotFound(title)).attach_printable(format!(
                "Available sheets: {:?}",
                sheet_ids.iter().map(|(name, _)| name).collect::<Vec<_>>()
            ))
        })
    }
}

/// Sheet titles and ids, in tab order.
pub(super) fn sheet_ids_of(spreadsheet: &Spreadsheet) -> Vec<(String, i32)> {
    spreadsheet
        .sheets
        .iter()
        .flatten()
        .filter_map(|sheet| {
            let properties = sheet.properties.as_ref()?;
            Some((properties.title.clone()?, properties.sheet_id?))
        })
        .collect()
}

/// Id of the first sheet in tab order that is not hidden.
pub(super) fn first_visible_sheet_id(spreadsheet: &Spreadsheet) -> Option<i32> {
    spreadsheet
        .sheets
        .iter()
        .flatten()
        .filter_map(|sheet| sheet.properties.as_ref())
        .find(|properties| properties.hidden != Some(true))
        .and_then(|properties| properties.sheet_id)
}
