//! Fetch transport for the upload trigger.

use gloo_net::http::Request;
use platescan_core::{Transport, TransportError, FILE_FIELD};
use web_sys::{File, FormData};

/// Posts a `FormData` with the selected file to the plate server.
#[derive(Clone, Debug)]
pub struct FetchTransport {
    url: String,
}

impl FetchTransport {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Transport<File> for FetchTransport {
    async fn post_upload(&self, file: Option<File>) -> Result<String, TransportError> {
        let form_data = FormData::new()
            .map_err(|e| TransportError::Request(format!("Failed to create FormData: {:?}", e)))?;

        // Without a file the form goes out empty
        if let Some(file) = file {
            form_data
                .append_with_blob_and_filename(FILE_FIELD, &file, &file.name())
                .map_err(|e| TransportError::Request(format!("Failed to append file: {:?}", e)))?;
        }

        let request = Request::post(&self.url)
            .body(form_data)
            .map_err(|e| TransportError::Request(format!("Failed to build request: {}", e)))?;

        let response = request
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        log::debug!("{} answered {}", self.url, response.status());

        // The body is decoded whatever the status: error replies come as 4xx/5xx
        response
            .text()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))
    }
}
