//! HTTP implementation of the API seam, backed by reqwest.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use echo_feed_types::{
    ApiErrorBody, AuthToken, Comment, CommentId, Credentials, LeaderboardEntry, NewCommentBody,
    NewPostBody, Post, PostId, TokenGrant, VoteBody, VoteReceipt, VoteTarget,
};

use super::{ApiError, FeedApi};

/// Per-request timeout. The engine has no retry layer, so a hung
/// request should fail rather than wedge the caller.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The real backend, over HTTP.
#[derive(Debug, Clone)]
pub struct HttpApi {
    base: Url,
    client: Client,
}

impl HttpApi {
    /// Build an API handle for a backend base URL, e.g.
    /// `http://127.0.0.1:8000/api/`.
    ///
    /// A missing trailing slash is added so relative endpoint joins
    /// land under the base path instead of replacing its last segment.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base = Url::parse(&normalized).map_err(|e| ApiError::InvalidUrl(e.to_string()))?;
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(Self { base, client })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path)
            .map_err(|e| ApiError::InvalidUrl(e.to_string()))
    }

    fn request(
        &self,
        method: Method,
        path: &str,
        auth: Option<&AuthToken>,
    ) -> Result<RequestBuilder, ApiError> {
        let mut builder = self.client.request(method, self.endpoint(path)?);
        if let Some(token) = auth {
            builder = builder.bearer_auth(token.reveal());
        }
        Ok(builder)
    }
}

async fn send(builder: RequestBuilder) -> Result<Response, ApiError> {
    builder
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))
}

/// Translate non-success statuses into [`ApiError`].
///
/// The backend reports failures as `{"error": ...}` or `{"detail": ...}`;
/// either becomes [`ApiError::Rejected`] with the server's message.
async fn check(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::UNAUTHORIZED {
        return Err(ApiError::Unauthorized);
    }
    let code = status.as_u16();
    match response.json::<ApiErrorBody>().await {
        Ok(body) => match body.message() {
            Some(msg) => Err(ApiError::Rejected(msg.to_string())),
            None => Err(ApiError::Status(code)),
        },
        Err(_) => Err(ApiError::Status(code)),
    }
}

/// Check the status, then decode the body.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    check(response)
        .await?
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

#[async_trait]
impl FeedApi for HttpApi {
    async fn login(&self, credentials: &Credentials) -> Result<TokenGrant, ApiError> {
        let builder = self.request(Method::POST, "token/", None)?.json(credentials);
        decode(send(builder).await?).await
    }

    async fn register(&self, credentials: &Credentials) -> Result<(), ApiError> {
        let builder = self
            .request(Method::POST, "register/", None)?
            .json(credentials);
        check(send(builder).await?).await.map(|_| ())
    }

    async fn list_posts(&self, auth: Option<&AuthToken>) -> Result<Vec<Post>, ApiError> {
        let builder = self.request(Method::GET, "posts/", auth)?;
        decode(send(builder).await?).await
    }

    async fn create_post(&self, auth: &AuthToken, content: &str) -> Result<Post, ApiError> {
        let body = NewPostBody {
            content: content.to_string(),
        };
        let builder = self.request(Method::POST, "posts/", Some(auth))?.json(&body);
        decode(send(builder).await?).await
    }

    async fn list_comments(
        &self,
        auth: Option<&AuthToken>,
        post: PostId,
    ) -> Result<Vec<Comment>, ApiError> {
        let path = format!("posts/{}/comments/", post.value());
        let builder = self.request(Method::GET, &path, auth)?;
        decode(send(builder).await?).await
    }

    async fn create_comment(
        &self,
        auth: &AuthToken,
        post: PostId,
        parent: Option<CommentId>,
        content: &str,
    ) -> Result<Comment, ApiError> {
        let path = format!("posts/{}/comments/", post.value());
        let body = NewCommentBody {
            content: content.to_string(),
            parent,
        };
        let builder = self.request(Method::POST, &path, Some(auth))?.json(&body);
        decode(send(builder).await?).await
    }

    async fn toggle_vote(
        &self,
        auth: &AuthToken,
        target: VoteTarget,
    ) -> Result<VoteReceipt, ApiError> {
        let path = format!("vote/{}/", target.id());
        let body = VoteBody::for_target(&target);
        let builder = self.request(Method::POST, &path, Some(auth))?.json(&body);
        decode(send(builder).await?).await
    }

    async fn leaderboard(
        &self,
        auth: Option<&AuthToken>,
    ) -> Result<Vec<LeaderboardEntry>, ApiError> {
        let builder = self.request(Method::GET, "leaderboard/", auth)?;
        decode(send(builder).await?).await
    }
}
