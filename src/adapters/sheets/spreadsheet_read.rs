use error_stack::{report, ResultExt};
use tracing::instrument;

use super::{
    grid::{self, Grid},
    spreadsheet_manager::{SpreadsheetManager, SpreadsheetManagerError, SCOPE},
};

/// How the API should render values on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueRenderOption {
    /// Values as displayed in the UI, always strings.
    #[default]
    Formatted,
    /// Numbers and booleans as JSON scalars.
    Unformatted,
    Formula,
}

impl ValueRenderOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueRenderOption::Formatted => "FORMATTED_VALUE",
            ValueRenderOption::Unformatted => "UNFORMATTED_VALUE",
            ValueRenderOption::Formula => "FORMULA",
        }
    }
}

pub trait SpreadsheetRead {
    async fn read_range(&self, range: &str) -> error_stack::Result<Grid, SpreadsheetManagerError>;

    async fn read_range_with(
        &self,
        range: &str,
        render: ValueRenderOption,
    ) -> error_stack::Result<Grid, SpreadsheetManagerError>;

    async fn read_rectangular(
        &self,
        range: &str,
    ) -> error_stack::Result<Grid, SpreadsheetManagerError>;
}

impl SpreadsheetRead for SpreadsheetManager {
    #[instrument]
    async fn read_range(&self, range: &str) -> error_stack::Result<Grid, SpreadsheetManagerError> {
        self.read_range_with(range, ValueRenderOption::default()).await
    }

    #[instrument]
    async fn read_range_with(
        &self,
        range: &str,
        render: ValueRenderOption,
    ) -> error_stack::Result<Grid, SpreadsheetManagerError> {
        let (_, value_range) = self
            .hub
            .spreadsheets()
            .values_get(&self.config.spreadsheet_id, range)
            .value_render_option(render.as_str())
            .major_dimension("ROWS")
            .add_scope(SCOPE)
            .doit()
            .await
            .change_context(SpreadsheetManagerError::FailedToFetchRange)
            .attach_printable_lazy(|| format!("Failed to fetch values for range {}", range))?;

        // An empty range comes back without a `values` field at all.
        let values = value_range.values.unwrap_or_default();
        tracing::debug!(rows = values.len(), "Fetched range");
        Ok(values)
    }

    /// Reads a bounded range and pads the result to exactly its row and column count.
    #[instrument]
    async fn read_rectangular(
        &self,
        range: &str,
    ) -> error_stack::Result<Grid, SpreadsheetManagerError> {
        let cell_range = grid::bounded_range(range)
            .ok_or_else(|| report!(SpreadsheetManagerError::InvalidRange))
            .attach_printable_lazy(|| format!("{} is not a bounded A1 cell range", range))?;

        let values = self.read_range(range).await?;

        Ok(grid::pad_to_shape(
            values,
            cell_range.row_count() as usize,
            cell_range.column_count() as usize,
        ))
    }
}
