/// Where to find the service-account key and which spreadsheet to work on.
#[derive(serde::Deserialize, Debug, Clone)]
pub struct SpreadsheetConfig {
    pub priv_key: Box<str>,
    /// The `1lSFT-Nqka-...` part of the spreadsheet's browser URL.
    pub spreadsheet_id: Box<str>,
}
