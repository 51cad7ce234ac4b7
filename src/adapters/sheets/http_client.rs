use error_stack::ResultExt;
use google_sheets4::{hyper, hyper_rustls};

use crate::ports::spreadsheet::GatewayError;

pub type Connector = hyper_rustls::HttpsConnector<hyper::client::HttpConnector>;
pub type HttpClient = hyper::Client<Connector>;

/// HTTPS client trusting the platform's root certificates.
pub fn http_client() -> error_stack::Result<HttpClient, GatewayError> {
    let connector = hyper_rustls::HttpsConnectorBuilder::new()
        .with_native_roots()
        .change_context(GatewayError::HttpClient)
        .attach_printable("could not load root certificates from the system store")?
        .https_or_http()
        .enable_http1()
        .build();

    Ok(hyper::Client::builder().build(connector))
}
