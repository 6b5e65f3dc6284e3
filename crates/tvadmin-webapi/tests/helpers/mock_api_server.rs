//! Mock Web API server using wiremock.

#![allow(dead_code)]

use serde_json::{json, Value};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tvadmin_webapi::{ApiToken, WebApiClient};

pub const TEST_TOKEN: &str = "test-token-123";

pub struct MockApiServer {
    server: MockServer,
}

impl MockApiServer {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    pub fn server(&self) -> &MockServer {
        &self.server
    }

    /// Client pointing at this server with [`TEST_TOKEN`].
    pub fn client(&self) -> WebApiClient {
        self.client_with_token(TEST_TOKEN)
    }

    pub fn client_with_token(&self, token: &str) -> WebApiClient {
        WebApiClient::with_http_client(self.uri(), ApiToken::new(token), reqwest::Client::new())
    }

    pub async fn mock_devices(&self, devices: Value) {
        Mock::given(method("GET"))
            .and(path("/devices"))
            .and(header("Authorization", format!("Bearer {TEST_TOKEN}").as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "devices": devices })))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_groups(&self, groups: Value) {
        Mock::given(method("GET"))
            .and(path("/groups"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "groups": groups })))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_users(&self, users: Value) {
        Mock::given(method("GET"))
            .and(path("/users"))
            .and(query_param("full_list", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "users": users })))
            .mount(&self.server)
            .await;
    }

    /// Every request to `path` answers with `status` and `body`.
    pub async fn mock_error(&self, http_method: &str, url_path: &str, status: u16, body: &str) {
        Mock::given(method(http_method))
            .and(path(url_path))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }
}

pub fn device_json(id: &str, alias: &str, online: bool) -> Value {
    json!({
        "device_id": id,
        "alias": alias,
        "remotecontrol_id": format!("r{}", 100_000_000 + id.len()),
        "online_state": if online { "Online" } else { "Offline" },
        "assigned_to": true,
        "last_seen": "2024-03-01T08:30:00Z"
    })
}
