use reqwest::blocking::{multipart, Client, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::ClientConfig;
use crate::consts::{DOWNLOAD_PATH, PROCESS_FAILED_MESSAGE, PROCESS_PATH};
use crate::error::{Result, WatermarkError};
use crate::file::SelectedFile;
use crate::params::WatermarkParameters;
use crate::payload::ProcessedImagePayload;

use super::ProcessingService;

/// Body of a `/process` reply. Success carries `image`, failure carries `error`.
#[derive(Debug, Default, Deserialize)]
struct ProcessReply {
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Serialize)]
struct DownloadRequest<'a> {
    image: &'a str,
}

/// Blocking HTTP implementation of [`ProcessingService`].
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl ProcessingService for HttpClient {
    fn process(
        &self,
        file: &SelectedFile,
        params: &WatermarkParameters,
    ) -> Result<ProcessedImagePayload> {
        let part = multipart::Part::bytes(file.bytes.to_vec())
            .file_name(file.name.clone())
            .mime_str(&file.media_type)?;
        let form = multipart::Form::new()
            .part("image", part)
            .text("text", params.text.clone())
            .text("opacity", params.opacity.value().to_string())
            .text("color", params.color.to_hex());

        let url = self.url(PROCESS_PATH);
        info!("POST {url} ({} bytes, text {:?})", file.len(), params.text);
        let response = self.client.post(&url).multipart(form).send()?;
        let status = response.status();
        let body = response.bytes()?;
        debug!("{url} answered {status} ({} bytes)", body.len());

        // Error replies without a JSON body still fail with the status code.
        let reply: ProcessReply = if status.is_success() {
            serde_json::from_slice(&body)?
        } else {
            serde_json::from_slice(&body).unwrap_or_default()
        };

        if !status.is_success() || reply.error.is_some() {
            return Err(WatermarkError::Remote {
                status: status.as_u16(),
                message: reply
                    .error
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| PROCESS_FAILED_MESSAGE.to_string()),
            });
        }

        ProcessedImagePayload::parse(reply.image.unwrap_or_default())
    }

    fn download(&self, payload: &ProcessedImagePayload) -> Result<Vec<u8>> {
        let url = self.url(DOWNLOAD_PATH);
        info!("POST {url}");
        let response = self
            .client
            .post(&url)
            .json(&DownloadRequest {
                image: payload.as_str(),
            })
            .send()?;
        let response = ensure_success(response)?;
        let bytes = response.bytes()?;
        debug!("{url} returned {} bytes", bytes.len());
        Ok(bytes.to_vec())
    }
}

fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    Err(WatermarkError::Remote {
        status: status.as_u16(),
        message: format!("server returned {status}"),
    })
}
