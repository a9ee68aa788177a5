use error_stack::ResultExt;
use google_sheets4::{hyper, hyper_rustls};

use super::spreadsheet_manager::SpreadsheetManagerError;

pub type Connector = hyper_rustls::HttpsConnector<hyper::client::HttpConnector>;
pub type HttpClient = hyper::Client<Connector>;

/// HTTPS-only client trusting the platform's root certificates.
pub fn http_client() -> error_stack::Result<HttpClient, SpreadsheetManagerError> {
    let connector = hyper_rustls::HttpsConnectorBuilder::new()
        .with_native_roots()
        .change_context(SpreadsheetManagerError::FailedToBuildClient)
        .attach_printable("Could not load native root certificates")?
        .https_only()
        .enable_http1()
        .build();

    Ok(hyper::Client::builder().build(connector))
}
