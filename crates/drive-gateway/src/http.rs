//! HTTP gateway speaking the file store's REST API.

use async_trait::async_trait;
use futures::TryStreamExt;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tokio_util::io::ReaderStream;
use tracing::debug;

use drive_core::config::server::ServerConfig;
use drive_core::error::{AppError, ErrorKind};
use drive_core::result::AppResult;
use drive_entity::file::wire::{ApiResponse, FileDto, LoginData, LoginRequest};
use drive_entity::{EntryId, FileEntry};

use crate::gateway::{Blob, ByteStream, GatewayOp, MutationGateway};

/// Gateway backed by the file store's HTTP API.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    /// Shared HTTP client with the configured timeouts.
    client: Client,
    /// Base URL without a trailing slash.
    base_url: String,
    /// Bearer token sent with every request.
    token: Option<String>,
}

impl HttpGateway {
    /// Create a gateway from server settings and an optional bearer token.
    pub fn new(config: &ServerConfig, token: Option<String>) -> AppResult<Self> {
        Ok(Self {
            client: build_client(config)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Exchange credentials for a bearer token.
    pub async fn login(
        config: &ServerConfig,
        username: &str,
        password: &str,
    ) -> AppResult<LoginData> {
        let gateway = Self::new(config, None)?;
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let builder = gateway
            .client
            .post(gateway.url("/api/auth/login"))
            .json(&request);

        gateway
            .send_envelope::<LoginData>(builder, "login")
            .await?
            .ok_or_else(|| AppError::gateway("Login response carried no token"))
    }

    /// Base URL this gateway talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request and unwrap the JSON envelope.
    async fn send_envelope<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        action: &str,
    ) -> AppResult<Option<T>> {
        let response = self
            .authorized(builder)
            .send()
            .await
            .map_err(|e| transport_error(action, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| transport_error(action, e))?;

        let envelope: Option<ApiResponse<T>> = serde_json::from_str(&body).ok();

        match envelope {
            Some(envelope) if status.is_success() && envelope.success => Ok(envelope.data),
            Some(envelope) if !envelope.message.is_empty() => {
                Err(AppError::gateway(envelope.message))
            }
            _ if status.is_success() => Err(AppError::gateway(format!(
                "{action} failed: unexpected response body"
            ))),
            _ => Err(AppError::gateway(format!("{action} failed: HTTP {status}"))),
        }
    }

    /// Send a request whose payload must be present.
    async fn send_required<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        action: &str,
    ) -> AppResult<T> {
        self.send_envelope(builder, action)
            .await?
            .ok_or_else(|| AppError::gateway(format!("{action} failed: response carried no data")))
    }

    async fn entry(&self, builder: RequestBuilder, op: GatewayOp) -> AppResult<FileEntry> {
        let dto: FileDto = self.send_required(builder, &op.to_string()).await?;
        Ok(FileEntry::from(dto))
    }
}

#[async_trait]
impl MutationGateway for HttpGateway {
    async fn list(&self, parent_id: Option<EntryId>) -> AppResult<Vec<FileEntry>> {
        debug!(parent_id = ?parent_id, "Listing folder");
        let mut builder = self.client.get(self.url("/api/files"));
        if let Some(parent_id) = parent_id {
            builder = builder.query(&[("parentId", parent_id.get())]);
        }

        let dtos: Vec<FileDto> = self
            .send_envelope(builder, "list")
            .await?
            .unwrap_or_default();
        Ok(dtos.into_iter().map(FileEntry::from).collect())
    }

    async fn upload(
        &self,
        blob: Blob,
        filename: &str,
        parent_id: Option<EntryId>,
    ) -> AppResult<FileEntry> {
        debug!(filename, parent_id = ?parent_id, "Uploading file");
        let mime = mime_guess::from_path(filename)
            .first_or_octet_stream()
            .to_string();

        let part = match blob {
            Blob::Bytes(bytes) => Part::stream(reqwest::Body::from(bytes)),
            Blob::File(path) => {
                let file = tokio::fs::File::open(&path).await?;
                let length = file.metadata().await?.len();
                Part::stream_with_length(
                    reqwest::Body::wrap_stream(ReaderStream::new(file)),
                    length,
                )
            }
        };
        let part = part
            .file_name(filename.to_string())
            .mime_str(&mime)
            .map_err(|e| {
                AppError::with_source(ErrorKind::Internal, format!("Invalid MIME type: {mime}"), e)
            })?;

        let mut form = Form::new().part("file", part);
        if let Some(parent_id) = parent_id {
            form = form.text("parentId", parent_id.to_string());
        }

        let builder = self.client.post(self.url("/api/files/upload")).multipart(form);
        self.entry(builder, GatewayOp::Upload).await
    }

    async fn download(&self, id: EntryId) -> AppResult<ByteStream> {
        debug!(entry_id = %id, "Downloading file");
        let response: Response = self
            .authorized(self.client.get(self.url(&format!("/api/files/download/{id}"))))
            .send()
            .await
            .map_err(|e| transport_error("download", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiResponse<serde_json::Value>>(&body)
                .ok()
                .map(|envelope| envelope.message)
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| format!("download failed: HTTP {status}"));
            return Err(AppError::gateway(message));
        }

        let stream = response.bytes_stream().map_err(std::io::Error::other);
        Ok(Box::pin(stream))
    }

    async fn delete(&self, id: EntryId) -> AppResult<()> {
        debug!(entry_id = %id, "Deleting entry");
        let builder = self.client.delete(self.url(&format!("/api/files/{id}")));
        self.send_envelope::<serde_json::Value>(builder, "delete")
            .await
            .map(|_| ())
    }

    async fn create_folder(&self, name: &str, parent_id: Option<EntryId>) -> AppResult<FileEntry> {
        debug!(name, parent_id = ?parent_id, "Creating folder");
        let mut params = vec![("folderName", name.to_string())];
        if let Some(parent_id) = parent_id {
            params.push(("parentId", parent_id.to_string()));
        }
        let builder = self.client.post(self.url("/api/files/folder")).form(&params);
        self.entry(builder, GatewayOp::CreateFolder).await
    }

    async fn rename(&self, id: EntryId, new_name: &str) -> AppResult<FileEntry> {
        debug!(entry_id = %id, new_name, "Renaming entry");
        let builder = self
            .client
            .put(self.url(&format!("/api/files/rename/{id}")))
            .query(&[("newName", new_name)]);
        self.entry(builder, GatewayOp::Rename).await
    }

    async fn move_entry(
        &self,
        id: EntryId,
        target_parent_id: Option<EntryId>,
    ) -> AppResult<FileEntry> {
        debug!(entry_id = %id, target = ?target_parent_id, "Moving entry");
        let mut builder = self.client.put(self.url(&format!("/api/files/move/{id}")));
        if let Some(target) = target_parent_id {
            builder = builder.query(&[("targetFolderId", target.get())]);
        }
        self.entry(builder, GatewayOp::Move).await
    }

    async fn preview(&self, id: EntryId) -> AppResult<String> {
        debug!(entry_id = %id, "Fetching preview");
        let builder = self.client.get(self.url(&format!("/api/files/preview/{id}")));
        self.send_required(builder, "preview").await
    }
}

fn build_client(config: &ServerConfig) -> AppResult<Client> {
    Client::builder()
        .timeout(config.request_timeout())
        .connect_timeout(config.connect_timeout())
        .build()
        .map_err(|e| {
            AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
        })
}

fn transport_error(action: &str, err: reqwest::Error) -> AppError {
    let message = if err.is_timeout() {
        format!("{action} failed: request timed out")
    } else {
        format!("{action} failed: {err}")
    };
    AppError::with_source(ErrorKind::Gateway, message, err)
}
