use error_stack::{report, ResultExt};
use google_sheets4::{
    api::{
        BatchUpdateSpreadsheetRequest, BatchUpdateSpreadsheetResponse, CellData, CellFormat,
        Color, GridRange, RepeatCellRequest, Request, Spreadsheet,
    },
    FieldMask,
};
use tracing::instrument;

use crate::domain::sheets::{
    a1_notation::{A1Notation, FromA1Notation},
    cell_range::CellRange,
    color::RgbColor,
};

use super::{
    cell_range::ToGridRange,
    spreadsheet_manager::{SpreadsheetManager, SpreadsheetManagerError, SCOPE},
};

pub const BACKGROUND_COLOR_FIELDS: &str = "userEnteredFormat.backgroundColor";

pub trait SpreadsheetFormat {
    async fn set_cell_format(
        &self,
        range: &str,
        cell_format: CellFormat,
        fields: &str,
    ) -> error_stack::Result<BatchUpdateSpreadsheetResponse, SpreadsheetManagerError>;

    async fn set_background_color(
        &self,
        range: &str,
        color: RgbColor,
    ) -> error_stack::Result<BatchUpdateSpreadsheetResponse, SpreadsheetManagerError>;

    async fn read_background_colors(
        &self,
        range: &str,
    ) -> error_stack::Result<Vec<Vec<Option<RgbColor>>>, SpreadsheetManagerError>;
}

pub fn to_api_color(color: RgbColor) -> Color {
    Color {
        red: Some(color.red()),
        green: Some(color.green()),
        blue: Some(color.blue()),
        alpha: None,
    }
}

/// The API leaves out zero components, so a missing one reads as `0.0`.
pub fn from_api_color(
    color: &Color,
) -> error_stack::Result<RgbColor, SpreadsheetManagerError> {
    RgbColor::new(
        color.red.unwrap_or_default(),
        color.green.unwrap_or_default(),
        color.blue.unwrap_or_default(),
    )
    .change_context(SpreadsheetManagerError::InvalidColor)
    .attach_printable_lazy(|| format!("API returned color {:?}", color))
}

fn parse_range(range: &str) -> error_stack::Result<CellRange, SpreadsheetManagerError> {
    CellRange::from_a1_notation(&A1Notation::from(range))
        .change_context(SpreadsheetManagerError::InvalidRange)
        .attach_printable_lazy(|| format!("{} is not an A1 cell range", range))
}

fn repeat_cell_request(
    grid_range: GridRange,
    cell_format: CellFormat,
    fields: &str,
) -> BatchUpdateSpreadsheetRequest {
    let fields = fields
        .parse::<FieldMask>()
        .unwrap_or_else(|never| match never {});

    BatchUpdateSpreadsheetRequest {
        requests: Some(vec![Request {
            repeat_cell: Some(RepeatCellRequest {
                range: Some(grid_range),
                cell: Some(CellData {
                    user_entered_format: Some(cell_format),
                    ..Default::default()
                }),
                fields: Some(fields),
            }),
            ..Default::default()
        }]),
        ..Default::default()
    }
}

/// Extracts user-entered background colors from a `spreadsheets.get` response
/// that included grid data for `range`. Rows and cells the API left out are
/// filled with `None`, so the result always has the shape of `range`.
fn background_colors_of(
    spreadsheet: Spreadsheet,
    range: &CellRange,
) -> error_stack::Result<Vec<Vec<Option<RgbColor>>>, SpreadsheetManagerError> {
    let (row_count, column_count) = (range.row_count() as usize, range.column_count() as usize);

    let row_data = spreadsheet
        .sheets
        .into_iter()
        .flatten()
        .next()
        .and_then(|sheet| sheet.data)
        .into_iter()
        .flatten()
        .next()
        .and_then(|grid_data| grid_data.row_data)
        .unwrap_or_default();

    let mut colors = row_data
        .into_iter()
        .map(|row| {
            row.values
                .unwrap_or_default()
                .iter()
                .map(|cell| {
                    cell.user_entered_format
                        .as_ref()
                        .and_then(|format| format.background_color.as_ref())
                        .map(from_api_color)
                        .transpose()
                })
                .collect::<error_stack::Result<Vec<_>, _>>()
        })
        .collect::<error_stack::Result<Vec<_>, _>>()?;

    if colors.len() < row_count {
        colors.resize_with(row_count, Vec::new);
    }
    for row in colors.iter_mut() {
        if row.len() < column_count {
            row.resize(column_count, None);
        }
    }

    Ok(colors)
}

impl SpreadsheetFormat for SpreadsheetManager {
    /// Applies `cell_format` to every cell of `range`, touching only `fields`
    /// (e.g. `userEnteredFormat.backgroundColor`).
    #[instrument(skip(cell_format))]
    async fn set_cell_format(
        &self,
        range: &str,
        cell_format: CellFormat,
        fields: &str,
    ) -> error_stack::Result<BatchUpdateSpreadsheetResponse, SpreadsheetManagerError> {
        // batchUpdate only takes grid ranges, so A1 has to be resolved here.
        let cell_range = parse_range(range)?;
        let sheet_id = self.sheet_id(cell_range.sheet_title.as_deref()).await?;
        let grid_range = cell_range
            .to_grid_range(sheet_id)
            .change_context(SpreadsheetManagerError::InvalidRange)?;

        tracing::debug!(?grid_range, fields, "Formatting range");

        let (_, response) = self
            .hub
            .spreadsheets()
            .batch_update(
                repeat_cell_request(grid_range, cell_format, fields),
                &self.config.spreadsheet_id,
            )
            .add_scope(SCOPE)
            .doit()
            .await
            .change_context(SpreadsheetManagerError::FailedToFormatRange)
            .attach_printable_lazy(|| format!("Failed to format range {}", range))?;

        Ok(response)
    }

    #[instrument]
    async fn set_background_color(
        &self,
        range: &str,
        color: RgbColor,
    ) -> error_stack::Result<BatchUpdateSpreadsheetResponse, SpreadsheetManagerError> {
        let cell_format = CellFormat {
            background_color: Some(to_api_color(color)),
            ..Default::default()
        };

        self.set_cell_format(range, cell_format, BACKGROUND_COLOR_FIELDS)
            .await
    }

    #[instrument]
    async fn read_background_colors(
        &self,
        range: &str,
    ) -> error_stack::Result<Vec<Vec<Option<RgbColor>>>, SpreadsheetManagerError> {
        // Validate locally so a typo does not turn into a whole-sheet fetch.
        let cell_range = parse_range(range)?;

        let (_, spreadsheet) = self
            .hub
            .spreadsheets()
            .get(&self.config.spreadsheet_id)
            .add_ranges(range)
            .include_grid_data(true)
            .add_scope(SCOPE)
            .doit()
            .await
            .change_context(SpreadsheetManagerError::FailedToFetchSpreadsheet)
            .attach_printable_lazy(|| format!("Failed to fetch formatting of range {}", range))?;

        if spreadsheet.sheets.as_ref().map_or(true, Vec::is_empty) {
            return Err(report!(SpreadsheetManagerError::FailedToFetchRange))
                .attach_printable_lazy(|| format!("No grid data returned for range {}", range));
        }

        background_colors_of(spreadsheet, &cell_range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use google_sheets4::api::{GridData, RowData, Sheet};

    fn cell(color: Option<Color>) -> CellData {
        CellData {
            user_entered_format: color.map(|color| CellFormat {
                background_color: Some(color),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn spreadsheet_with_rows(rows: Vec<Vec<CellData>>) -> Spreadsheet {
        Spreadsheet {
            sheets: Some(vec![Sheet {
                data: Some(vec![GridData {
                    row_data: Some(
                        rows.into_iter()
                            .map(|values| RowData {
                                values: Some(values),
                                ..Default::default()
                            })
                            .collect(),
                    ),
                    ..Default::default()
                }]),
                ..Default::default()
            }]),
            ..Default::default()
        }
    }

    #[test]
    fn test_to_api_color() {
        let color = to_api_color(RgbColor::new(0.9, 0.9, 0.7).unwrap());
        assert_eq!(color.red, Some(0.9));
        assert_eq!(color.green, Some(0.9));
        assert_eq!(color.blue, Some(0.7));
        assert_eq!(color.alpha, None);
    }

    #[test]
    fn test_from_api_color_defaults_missing_components() {
        let color = from_api_color(&Color {
            red: Some(1.0),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(color, RgbColor::new(1.0, 0.0, 0.0).unwrap());
    }

    #[test]
    fn test_from_api_color_rejects_out_of_range() {
        let report = from_api_color(&Color {
            red: Some(2.0),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(
            report.current_context(),
            &SpreadsheetManagerError::InvalidColor
        );
    }

    #[test]
    fn test_repeat_cell_request_shape() {
        let range = parse_range("testing!A1:D2").unwrap();
        let grid_range = range.to_grid_range(3).unwrap();
        let cell_format = CellFormat {
            background_color: Some(to_api_color(RgbColor::new(0.8, 0.9, 0.8).unwrap())),
            ..Default::default()
        };

        let request = repeat_cell_request(grid_range, cell_format, BACKGROUND_COLOR_FIELDS);
        let json = serde_json::to_value(&request).unwrap();
        let repeat_cell = &json["requests"][0]["repeatCell"];

        assert_eq!(repeat_cell["range"]["sheetId"], 3);
        assert_eq!(repeat_cell["range"]["endRowIndex"], 2);
        assert_eq!(repeat_cell["range"]["endColumnIndex"], 4);
        assert_eq!(repeat_cell["fields"], "userEnteredFormat.backgroundColor");
        let blue = repeat_cell["cell"]["userEnteredFormat"]["backgroundColor"]["blue"]
            .as_f64()
            .unwrap();
        assert!((blue - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_parse_range_rejects_open_range() {
        let report = parse_range("testing!A:A").unwrap_err();
        assert_eq!(
            report.current_context(),
            &SpreadsheetManagerError::InvalidRange
        );
    }

    #[test]
    fn test_background_colors_of() {
        let yellow = to_api_color(RgbColor::new(0.9, 0.9, 0.7).unwrap());
        let spreadsheet = spreadsheet_with_rows(vec![
            vec![cell(Some(yellow.clone())), cell(None)],
            vec![cell(Some(yellow))],
        ]);
        let range = parse_range("testing!A1:B2").unwrap();

        let colors = background_colors_of(spreadsheet, &range).unwrap();
        let expected = RgbColor::new(0.9, 0.9, 0.7).unwrap();

        assert_eq!(colors.len(), 2);
        assert_eq!(colors[0], vec![Some(expected), None]);
        assert_eq!(colors[1], vec![Some(expected), None]);
    }

    #[test]
    fn test_background_colors_of_pads_missing_rows() {
        let yellow = to_api_color(RgbColor::new(0.9, 0.9, 0.7).unwrap());
        let spreadsheet = spreadsheet_with_rows(vec![vec![cell(Some(yellow))]]);
        let range = parse_range("testing!A1:C3").unwrap();

        let colors = background_colors_of(spreadsheet, &range).unwrap();

        assert_eq!(colors.len(), 3);
        assert!(colors.iter().all(|row| row.len() == 3));
        assert!(colors[0][0].is_some());
        assert_eq!(colors[2], vec![None, None, None]);
    }

    #[test]
    fn test_background_colors_of_empty_grid() {
        let range = parse_range("testing!A1:B2").unwrap();
        let colors = background_colors_of(spreadsheet_with_rows(Vec::new()), &range).unwrap();
        assert_eq!(colors, vec![vec![None, None], vec![None, None]]);
    }
}
