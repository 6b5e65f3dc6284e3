//! Web API v1 HTTP client (reqwest-based).

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use tvadmin_core::{ApiError, ApiResult, Device, Group, RemoteApi, SharePermission, User};

use crate::auth::ApiToken;
use crate::config::{ConfigError, WebApiConfig};
use crate::wire::{
    CreateGroupRequest, CreatedGroup, DeviceList, GroupList, ShareGroupRequest,
    UpdateDeviceRequest, UserList, WireShare,
};

/// Client for the device, group and user endpoints of the Web API.
#[derive(Debug, Clone)]
pub struct WebApiClient {
    /// Base URL (e.g. "<https://webapi.teamviewer.com/api/v1>").
    base_url: String,
    token: ApiToken,
    http_client: Client,
}

impl WebApiClient {
    pub fn new(config: &WebApiConfig) -> Result<Self, ConfigError> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("tvadmin/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self::with_http_client(
            config.api_url.clone(),
            config.api_token.clone(),
            http_client,
        ))
    }

    /// Create a client with a pre-built `reqwest::Client` (for testing).
    #[must_use]
    pub fn with_http_client(base_url: impl Into<String>, token: ApiToken, http_client: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            token,
            http_client,
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = self.url(path);
        debug!(%url, "GET");
        let response = self.send(self.http_client.get(&url)).await?;
        Self::handle_response(response).await
    }

    async fn send(&self, request: RequestBuilder) -> ApiResult<reqwest::Response> {
        self.token
            .authorize(request)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))
    }

    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ApiResult<T> {
        if response.status().is_success() {
            let body = response
                .text()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;
            serde_json::from_str(&body)
                .map_err(|e| ApiError::Decode(format!("Failed to parse response: {e}")))
        } else {
            Self::handle_error_response(response).await
        }
    }

    async fn handle_empty_response(response: reqwest::Response) -> ApiResult<()> {
        if response.status().is_success() {
            Ok(())
        } else {
            Self::handle_error_response(response).await
        }
    }

    async fn handle_error_response<T>(response: reqwest::Response) -> ApiResult<T> {
        let status = response.status();

        let retry_after = response
            .headers()
            .get("Retry-After")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<no body>".to_string());

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ApiError::Unauthorized(body)),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound(body)),
            StatusCode::TOO_MANY_REQUESTS => {
                warn!(?retry_after, "Web API rate limited");
                Err(ApiError::RateLimited {
                    retry_after_secs: retry_after,
                })
            }
            _ => {
                let message = if body.is_empty() {
                    format!("HTTP {status}")
                } else {
                    body
                };
                Err(ApiError::Status {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }
}

#[async_trait]
impl RemoteApi for WebApiClient {
    async fn fetch_devices(&self) -> ApiResult<Vec<Device>> {
        let list: DeviceList = self.get("/devices").await?;
        Ok(list.devices.into_iter().map(Device::from).collect())
    }

    async fn fetch_groups(&self) -> ApiResult<Vec<Group>> {
        let list: GroupList = self.get("/groups").await?;
        Ok(list.groups.into_iter().map(Group::from).collect())
    }

    async fn fetch_users(&self) -> ApiResult<Vec<User>> {
        let list: UserList = self.get("/users?full_list=true").await?;
        Ok(list.users.into_iter().map(User::from).collect())
    }

    async fn create_group(&self, name: &str) -> ApiResult<Group> {
        let url = self.url("/groups");
        debug!(%url, group = %name, "POST");
        let request = self
            .http_client
            .post(&url)
            .json(&CreateGroupRequest { name });
        let response = self.send(request).await?;
        let created: CreatedGroup = Self::handle_response(response).await?;
        Ok(Group::new(created.id, created.name))
    }

    async fn move_device_to_group(&self, device_id: &str, group_id: &str) -> ApiResult<()> {
        let url = self.url(&format!("/devices/{device_id}"));
        debug!(%url, %group_id, "PUT");
        let request = self
            .http_client
            .put(&url)
            .json(&UpdateDeviceRequest { groupid: group_id });
        let response = self.send(request).await?;
        Self::handle_empty_response(response).await
    }

    async fn share_group(
        &self,
        group_id: &str,
        user_id: &str,
        permission: SharePermission,
    ) -> ApiResult<()> {
        let url = self.url(&format!("/groups/{group_id}/share_group"));
        debug!(%url, %user_id, %permission, "POST");
        let body = ShareGroupRequest {
            users: vec![WireShare {
                userid: user_id.to_string(),
                permissions: permission.as_str().to_string(),
            }],
        };
        let response = self.send(self.http_client.post(&url).json(&body)).await?;
        Self::handle_empty_response(response).await
    }

    async fn delete_device(&self, device_id: &str) -> ApiResult<()> {
        let url = self.url(&format!("/devices/{device_id}"));
        debug!(%url, "DELETE");
        let response = self.send(self.http_client.delete(&url)).await?;
        Self::handle_empty_response(response).await
    }
}
