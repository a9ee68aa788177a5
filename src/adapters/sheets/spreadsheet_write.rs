use error_stack::ResultExt;
use google_sheets4::api::{UpdateValuesResponse, ValueRange};
use serde_json::Value;
use tracing::instrument;

use super::{
    grid::{self, Grid},
    spreadsheet_manager::{SpreadsheetManager, SpreadsheetManagerError, SCOPE},
    spreadsheet_read::SpreadsheetRead,
    value_range_factory::ValueRangeFactory,
};

/// How the API should interpret written values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueInputOption {
    /// Stored as-is.
    Raw,
    /// Parsed as if typed into the UI: `=SUM(A1:A3)` becomes a formula,
    /// `"3"` becomes a number.
    #[default]
    UserEntered,
}

impl ValueInputOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueInputOption::Raw => "RAW",
            ValueInputOption::UserEntered => "USER_ENTERED",
        }
    }
}

pub trait SpreadsheetWrite {
    async fn write_range(
        &self,
        range: &str,
        values: Grid,
    ) -> error_stack::Result<UpdateValuesResponse, SpreadsheetManagerError>;

    async fn write_range_with(
        &self,
        range: &str,
        values: Grid,
        input: ValueInputOption,
    ) -> error_stack::Result<UpdateValuesResponse, SpreadsheetManagerError>;

    async fn map_cells<F>(
        &self,
        range: &str,
        func: F,
    ) -> error_stack::Result<UpdateValuesResponse, SpreadsheetManagerError>
    where
        F: FnMut(&Value) -> Value;
}

impl SpreadsheetWrite for SpreadsheetManager {
    #[instrument(skip(values))]
    async fn write_range(
        &self,
        range: &str,
        values: Grid,
    ) -> error_stack::Result<UpdateValuesResponse, SpreadsheetManagerError> {
        self.write_range_with(range, values, ValueInputOption::default())
            .await
    }

    /// Overwrites `range` with `values`. Bounded ranges are checked against the
    /// grid's shape first. Single cells and open ranges are left for the API.
    #[instrument(skip(values))]
    async fn write_range_with(
        &self,
        range: &str,
        values: Grid,
        input: ValueInputOption,
    ) -> error_stack::Result<UpdateValuesResponse, SpreadsheetManagerError> {
        match grid::write_target(range) {
            Some(cell_range) => grid::check_shape(&values, &cell_range)
                .attach_printable_lazy(|| format!("Refusing to write to range {}", range))?,
            None => tracing::debug!("Range {} is an anchor or open, skipping shape check", range),
        }

        let (_, response) = self
            .hub
            .spreadsheets()
            .values_update(
                ValueRange::from_rows(values),
                &self.config.spreadsheet_id,
                range,
            )
            .value_input_option(input.as_str())
            .add_scope(SCOPE)
            .doit()
            .await
            .change_context(SpreadsheetManagerError::FailedToWriteRange)
            .attach_printable_lazy(|| format!("Failed to write to range {} ", range))?;

        tracing::debug!(updated_cells = ?response.updated_cells, "Wrote range");
        Ok(response)
    }

    /// Reads `range`, applies `func` to every cell (empty cells included) and
    /// writes the result back.
    #[instrument(skip(func))]
    async fn map_cells<F>(
        &self,
        range: &str,
        func: F,
    ) -> error_stack::Result<UpdateValuesResponse, SpreadsheetManagerError>
    where
        F: FnMut(&Value) -> Value,
    {
        let cells = self.read_rectangular(range).await?;
        let altered_cells = grid::map_grid(&cells, func);

        self.write_range(range, altered_cells).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_input_option_strings() {
        assert_eq!(ValueInputOption::Raw.as_str(), "RAW");
        assert_eq!(ValueInputOption::default().as_str(), "USER_ENTERED");
    }
}
