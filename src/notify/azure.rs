//! Azure DevOps thread service implementation

use crate::auth::Credential;
use crate::error::{Error, NotificationErrorKind, Result};
use crate::notify::{CommentThread, NotifyTarget, ThreadService};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};

/// REST API version for pull request thread operations
const API_VERSION: &str = "7.1";

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Azure DevOps service using reqwest
pub struct AzureDevOpsService {
    client: Client,
    target: NotifyTarget,
    credential: Credential,
}

#[derive(Deserialize)]
struct ThreadList {
    value: Vec<Thread>,
}

#[derive(Deserialize)]
struct Thread {
    id: u64,
    #[serde(default)]
    comments: Vec<Comment>,
}

#[derive(Deserialize)]
struct Comment {
    // deleted comments come back without content
    content: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateThreadPayload {
    comments: Vec<NewComment>,
    // 1 = active
    status: u8,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NewComment {
    parent_comment_id: u64,
    content: String,
    // 1 = text
    comment_type: u8,
}

impl AzureDevOpsService {
    /// Create a service for one pull request with an explicit credential
    pub fn new(target: NotifyTarget, credential: Credential) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            target,
            credential,
        }
    }

    fn threads_url(&self) -> String {
        let base = self.target.organization.as_str().trim_end_matches('/');
        format!(
            "{base}/{}/_apis/git/repositories/{}/pullRequests/{}/threads?api-version={API_VERSION}",
            urlencoding::encode(&self.target.project),
            urlencoding::encode(&self.target.repository),
            self.target.pull_request,
        )
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.credential {
            Credential::Bearer(token) => request.bearer_auth(token),
            Credential::Pat(pat) => request.basic_auth("", Some(pat)),
        }
    }
}

fn classify(status: StatusCode) -> NotificationErrorKind {
    match status.as_u16() {
        401 => NotificationErrorKind::Authentication,
        403 => NotificationErrorKind::Permission,
        404 => NotificationErrorKind::NotFound,
        _ => NotificationErrorKind::Other,
    }
}

fn transport_error(context: &str, err: &reqwest::Error) -> Error {
    Error::Notification {
        kind: NotificationErrorKind::Other,
        message: format!("{context}: {err}"),
    }
}

#[async_trait]
impl ThreadService for AzureDevOpsService {
    async fn list_threads(&self) -> Result<Vec<CommentThread>> {
        let url = self.threads_url();
        let response = self
            .authorize(self.client.get(&url))
            .send()
            .await
            .map_err(|e| transport_error("listing threads", &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Notification {
                kind: classify(status),
                message: format!("listing threads returned {status}"),
            });
        }

        let payload: ThreadList = response
            .json()
            .await
            .map_err(|e| transport_error("decoding thread list", &e))?;

        Ok(payload
            .value
            .into_iter()
            .map(|thread| CommentThread {
                id: thread.id,
                comments: thread
                    .comments
                    .into_iter()
                    .filter_map(|c| c.content)
                    .collect(),
            })
            .collect())
    }

    async fn create_thread(&self, body: &str) -> Result<()> {
        let url = self.threads_url();
        let payload = CreateThreadPayload {
            comments: vec![NewComment {
                parent_comment_id: 0,
                content: body.to_string(),
                comment_type: 1,
            }],
            status: 1,
        };

        let response = self
            .authorize(self.client.post(&url))
            .json(&payload)
            .send()
            .await
            .map_err(|e| transport_error("creating thread", &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Notification {
                kind: classify(status),
                message: format!("creating thread returned {status}"),
            });
        }
        Ok(())
    }
}
