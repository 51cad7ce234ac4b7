use error_stack::{report, ResultExt};
use google_sheets4::oauth2::{self, authenticator::Authenticator};
use tracing::instrument;

use super::http_client::{Connector, HttpClient};
use crate::domain::credentials::ServiceAccountCredentials;
use crate::ports::spreadsheet::GatewayError;

/// Builds a service-account authenticator. The private key is parsed here, so
/// a malformed key fails before any request is made.
#[instrument(skip_all, fields(client_email = %credentials.client_email))]
pub async fn auth(
    credentials: &ServiceAccountCredentials,
    client: HttpClient,
) -> error_stack::Result<Authenticator<Connector>, GatewayError> {
    let key_document = credentials
        .to_key_document()
        .change_context(GatewayError::InvalidCredentials)?;
    let secret: oauth2::ServiceAccountKey = serde_json::from_value(key_document)
        .change_context(GatewayError::InvalidCredentials)
        .attach_printable("credential record is not a valid service account key")?;

    oauth2::ServiceAccountAuthenticator::with_client(secret, client)
        .build()
        .await
        .change_context(GatewayError::InvalidCredentials)
        .attach_printable_lazy(|| {
            format!(
                "could not create an authenticator for {}",
                credentials.client_email
            )
        })
}

/// Exchanges the signed assertion for an access token.
#[instrument(skip(authenticator))]
pub async fn access_token(
    authenticator: &Authenticator<Connector>,
    scopes: &[&str],
) -> error_stack::Result<String, GatewayError> {
    let token = authenticator
        .token(scopes)
        .await
        .change_context(GatewayError::TokenRequest)?;

    token
        .token()
        .map(str::to_owned)
        .ok_or_else(|| report!(GatewayError::TokenRequest))
        .attach_printable("token endpoint returned no access token")
}
