use async_trait::async_trait;
use reqwest::{multipart, Client};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use crate::{
    application::{error::ApplicationError, services::StorageService},
    domain::{
        config::app::TelegramConfig,
        models::file::{FileData, StorageHandle},
    },
    services::error::RelayError,
};

/// Envelope every Bot API method answers with.
#[derive(Debug, Deserialize)]
struct BotResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
    error_code: Option<u16>,
}

impl<T> BotResponse<T> {
    fn into_result(self) -> Result<T, RelayError> {
        let description = self
            .description
            .unwrap_or_else(|| "Unknown error".to_string());

        match (self.ok, self.result) {
            (true, Some(result)) => Ok(result),
            (true, None) => Err(RelayError::ProviderError(
                "Telegram API returned no result".to_string(),
            )),
            (false, _) => Err(match self.error_code {
                Some(401) | Some(403) => RelayError::Unauthorized(description),
                Some(404) => RelayError::NotFound(description),
                _ => RelayError::ProviderError(description),
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SentMessage {
    message_id: i64,
    document: Option<Document>,
}

#[derive(Debug, Deserialize)]
struct Document {
    file_id: String,
    file_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RemoteFile {
    file_path: Option<String>,
}

/// Stores uploads as documents posted to a Telegram channel by a bot.
pub struct TelegramStorageService {
    client: Client,
    api_url: String,
    bot_token: String,
    channel_id: String,
}

impl TelegramStorageService {
    pub fn new(config: TelegramConfig) -> Result<Self, RelayError> {
        if config.bot_token.is_empty() || config.channel_id.is_empty() {
            return Err(RelayError::InvalidCredentials(
                "Telegram bot token and channel ID are required".to_string(),
            ));
        }

        Ok(Self {
            client: Client::new(),
            api_url: config.api_url.trim_end_matches('/').to_string(),
            bot_token: config.bot_token,
            channel_id: config.channel_id,
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_url, self.bot_token, method)
    }

    fn file_url(&self, file_path: &str) -> String {
        format!("{}/file/bot{}/{}", self.api_url, self.bot_token, file_path)
    }

    fn masked_token(&self) -> String {
        let visible: String = self.bot_token.chars().take(10).collect();
        format!("{}...", visible)
    }

    async fn read_response<T>(response: reqwest::Response) -> Result<T, RelayError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let status = response.status();
        let body = response.text().await.map_err(RelayError::from)?;

        let parsed: BotResponse<T> = serde_json::from_str(&body).map_err(|e| {
            warn!("Unparseable Telegram response (status {}): {}", status, e);
            RelayError::ProviderError("Invalid response from Telegram API".to_string())
        })?;

        parsed.into_result()
    }
}

#[async_trait]
impl StorageService for TelegramStorageService {
    async fn upload(&self, file_data: FileData) -> Result<StorageHandle, ApplicationError> {
        info!(
            "Uploading to Telegram: {}, size: {} bytes, channel: {}, bot: {}",
            file_data.filename,
            file_data.size(),
            self.channel_id,
            self.masked_token()
        );

        let original_name = file_data.filename.clone();
        let document = multipart::Part::bytes(file_data.content)
            .file_name(file_data.filename)
            .mime_str(&file_data.mime_type)
            .map_err(|e| RelayError::InternalError(e.to_string()))?;

        let form = multipart::Form::new()
            .part("document", document)
            .text("chat_id", self.channel_id.clone());

        let response = self
            .client
            .post(self.method_url("sendDocument"))
            .multipart(form)
            .send()
            .await
            .map_err(RelayError::from)?;

        let message: SentMessage = Self::read_response(response).await?;
        let document = message.document.ok_or_else(|| {
            RelayError::ProviderError("Telegram response has no document".to_string())
        })?;

        info!(
            "Telegram accepted {} as message {}",
            original_name, message.message_id
        );

        Ok(StorageHandle {
            file_id: document.file_id,
            message_id: message.message_id,
            file_name: document.file_name.unwrap_or(original_name),
        })
    }

    async fn download_link(&self, handle: &StorageHandle) -> Result<String, ApplicationError> {
        let response = self
            .client
            .get(self.method_url("getFile"))
            .query(&[("file_id", handle.file_id.as_str())])
            .send()
            .await
            .map_err(RelayError::from)?;

        let remote: RemoteFile = Self::read_response(response).await?;
        let file_path = remote.file_path.ok_or_else(|| {
            RelayError::ProviderError("Telegram did not return a file path".to_string())
        })?;

        Ok(self.file_url(&file_path))
    }

    async fn delete(&self, handle: &StorageHandle) -> Result<(), ApplicationError> {
        let response = self
            .client
            .post(self.method_url("deleteMessage"))
            .json(&json!({
                "chat_id": self.channel_id,
                "message_id": handle.message_id,
            }))
            .send()
            .await
            .map_err(RelayError::from)?;

        let _: bool = Self::read_response(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TelegramStorageService {
        TelegramStorageService::new(TelegramConfig {
            api_url: "https://api.telegram.org/".to_string(),
            bot_token: "123456:secret-token".to_string(),
            channel_id: "@files".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn builds_method_and_file_urls() {
        let service = service();
        assert_eq!(
            service.method_url("sendDocument"),
            "https://api.telegram.org/bot123456:secret-token/sendDocument"
        );
        assert_eq!(
            service.file_url("documents/file_1.pdf"),
            "https://api.telegram.org/file/bot123456:secret-token/documents/file_1.pdf"
        );
        assert_eq!(service.masked_token(), "123456:sec...");
    }

    #[test]
    fn rejects_missing_credentials() {
        let result = TelegramStorageService::new(TelegramConfig {
            api_url: "https://api.telegram.org".to_string(),
            bot_token: String::new(),
            channel_id: "@files".to_string(),
        });
        assert!(matches!(result, Err(RelayError::InvalidCredentials(_))));
    }

    #[test]
    fn parses_send_document_result() {
        let body = r#"{
            "ok": true,
            "result": {
                "message_id": 77,
                "document": { "file_id": "BQACAgI", "file_name": "report.pdf" }
            }
        }"#;
        let parsed: BotResponse<SentMessage> = serde_json::from_str(body).unwrap();
        let message = parsed.into_result().unwrap();
        assert_eq!(message.message_id, 77);
        let document = message.document.unwrap();
        assert_eq!(document.file_id, "BQACAgI");
        assert_eq!(document.file_name.as_deref(), Some("report.pdf"));
    }

    #[test]
    fn maps_api_failures_by_error_code() {
        let parsed: BotResponse<bool> = serde_json::from_str(
            r#"{"ok": false, "error_code": 401, "description": "Unauthorized"}"#,
        )
        .unwrap();
        assert!(matches!(parsed.into_result(), Err(RelayError::Unauthorized(_))));

        let parsed: BotResponse<bool> = serde_json::from_str(
            r#"{"ok": false, "error_code": 400, "description": "Bad Request: chat not found"}"#,
        )
        .unwrap();
        match parsed.into_result() {
            Err(RelayError::ProviderError(msg)) => assert!(msg.contains("chat not found")),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
