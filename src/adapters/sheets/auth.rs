use std::path::Path;

use error_stack::{report, ResultExt};
use google_sheets4::oauth2::{self, authenticator::Authenticator, ServiceAccountKey};
use tracing::instrument;

use super::{
    http_client::{Connector, HttpClient},
    spreadsheet_manager::SpreadsheetManagerError,
};

/// Reads the service-account JSON key at `priv_key_path`.
///
/// The key is the file downloaded from the Google Cloud console under
/// IAM & Admin > Service Accounts > Manage keys > Add key. The spreadsheet
/// must be shared with the service account's email for requests to succeed.
#[instrument]
pub async fn read_key(
    priv_key_path: &Path,
) -> error_stack::Result<ServiceAccountKey, SpreadsheetManagerError> {
    if !priv_key_path.is_file() {
        return Err(report!(SpreadsheetManagerError::CredentialsNotFound))
            .attach_printable_lazy(|| {
                format!("JSON file {} not found", priv_key_path.display())
            });
    }

    let secret = oauth2::read_service_account_key(priv_key_path)
        .await
        .change_context(SpreadsheetManagerError::InvalidCredentials)
        .attach_printable_lazy(|| {
            format!(
                "Could not read service account private key at '{}'",
                priv_key_path.display()
            )
        })?;

    tracing::debug!(client_email = %secret.client_email, "Loaded service account key");
    Ok(secret)
}

pub async fn auth(
    secret: ServiceAccountKey,
    client: HttpClient,
) -> error_stack::Result<Authenticator<Connector>, SpreadsheetManagerError> {
    oauth2::ServiceAccountAuthenticator::with_client(secret, client)
        .build()
        .await
        .change_context(SpreadsheetManagerError::InvalidCredentials)
        .attach_printable("Could not create an authenticator")
}
