//! HTTP client for the console `/system/setting` API.

use opshub_settings::{ImageKind, SystemSetting};
use reqwest::{multipart, Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

use crate::error::{ClientError, ClientResult};

const SETTING_PATH: &str = "/system/setting";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Error body shape the server uses for rejected requests.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Client for the system settings endpoints.
///
/// Every request carries the session bearer token in the `Authorization`
/// header. The client is cheap to clone; the underlying connection pool is
/// shared.
#[derive(Clone)]
pub struct SettingsClient {
    http_client: Client,
    base_url: String,
    access_token: String,
}

impl SettingsClient {
    pub fn new(base_url: impl Into<String>, access_token: impl Into<String>) -> ClientResult<Self> {
        let http_client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self {
            http_client,
            base_url,
            access_token: access_token.into(),
        })
    }

    fn auth_header(&self) -> String {
        format!("Bearer {}", self.access_token)
    }

    fn setting_url(&self) -> String {
        format!("{}{}", self.base_url, SETTING_PATH)
    }

    /// Fetch the current settings record.
    ///
    /// The server answers with an empty JSON object (or 404) while no record
    /// has been created yet; both map to `None`.
    pub async fn get_setting(&self) -> ClientResult<Option<SystemSetting>> {
        let response = self
            .http_client
            .get(self.setting_url())
            .header("Authorization", self.auth_header())
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
            status if status.is_success() => {
                let value: serde_json::Value = response
                    .json()
                    .await
                    .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;
                match &value {
                    serde_json::Value::Null => Ok(None),
                    serde_json::Value::Object(map) if map.is_empty() => Ok(None),
                    _ => serde_json::from_value(value)
                        .map(Some)
                        .map_err(|e| ClientError::InvalidResponse(e.to_string())),
                }
            }
            status => Err(self.api_error(status, response).await),
        }
    }

    /// Create the settings record. Used when no record exists yet.
    pub async fn create_setting(&self, payload: &SystemSetting) -> ClientResult<SystemSetting> {
        let response = self
            .http_client
            .post(self.setting_url())
            .header("Authorization", self.auth_header())
            .json(payload)
            .send()
            .await?;
        self.read_record(response).await
    }

    /// Update the settings record; `payload` must carry the version token the
    /// record was loaded with.
    pub async fn update_setting(&self, payload: &SystemSetting) -> ClientResult<SystemSetting> {
        let response = self
            .http_client
            .put(self.setting_url())
            .header("Authorization", self.auth_header())
            .json(payload)
            .send()
            .await?;
        self.read_record(response).await
    }

    /// Restore the server-side defaults.
    pub async fn reset_setting(&self) -> ClientResult<()> {
        let response = self
            .http_client
            .post(format!("{}/reset", self.setting_url()))
            .header("Authorization", self.auth_header())
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(()),
            status => Err(self.api_error(status, response).await),
        }
    }

    /// Upload a favicon or logo image (multipart, `file` part) and return the
    /// reference the server assigned to it.
    pub async fn upload_image(
        &self,
        kind: ImageKind,
        filename: &str,
        bytes: Vec<u8>,
    ) -> ClientResult<String> {
        let part = multipart::Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str(mime_for(filename))?;
        let form = multipart::Form::new().part("file", part);

        let response = self
            .http_client
            .post(format!("{}/upload/{}", self.setting_url(), kind.as_str()))
            .header("Authorization", self.auth_header())
            .multipart(form)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {
                let text = response.text().await?;
                // Reference comes back either as a JSON string or as raw text.
                match serde_json::from_str::<String>(&text) {
                    Ok(reference) => Ok(reference),
                    Err(_) => Ok(text.trim().to_string()),
                }
            }
            StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
            status => {
                let body = response.text().await.unwrap_or_default();
                // Surface the server-provided message verbatim when present.
                let message = serde_json::from_str::<ApiErrorBody>(&body)
                    .map(|b| b.message)
                    .unwrap_or_else(|_| {
                        if body.is_empty() {
                            status.to_string()
                        } else {
                            body
                        }
                    });
                Err(ClientError::Upload(message))
            }
        }
    }

    async fn read_record(&self, response: reqwest::Response) -> ClientResult<SystemSetting> {
        match response.status() {
            status if status.is_success() => response
                .json::<SystemSetting>()
                .await
                .map_err(|e| ClientError::InvalidResponse(e.to_string())),
            status => Err(self.api_error(status, response).await),
        }
    }

    async fn api_error(&self, status: StatusCode, response: reqwest::Response) -> ClientError {
        if status == StatusCode::UNAUTHORIZED {
            return ClientError::Unauthorized;
        }
        let body = response.text().await.unwrap_or_else(|_| status.to_string());
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .map(|b| b.message)
            .unwrap_or(body);
        ClientError::Api(status, message)
    }
}

fn mime_for(filename: &str) -> &'static str {
    let extension = filename
        .rsplit('.')
        .next()
        .map(|ext| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("ico") => "image/x-icon",
        _ => "application/octet-stream",
    }
}
