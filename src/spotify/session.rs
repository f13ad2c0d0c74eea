use std::time::Duration;

use reqwest::{
    Client, RequestBuilder, Response, StatusCode,
    header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, RETRY_AFTER, USER_AGENT},
};
use tokio::time::sleep;

use crate::{Res, config::Config, error::ResolverError, utils, warning};

const MAX_BACKOFF: Duration = Duration::from_secs(120);

/// When and how long to wait before repeating a request.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_retries: u32,
    /// Seconds; scaled by `2^(n-1)` for the n-th consecutive retry.
    pub backoff_factor: f64,
    pub status_forcelist: Vec<StatusCode>,
}

impl RetryPolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_retries: config.max_retries,
            backoff_factor: config.retry_delay.max(0.0),
            status_forcelist: vec![
                StatusCode::TOO_MANY_REQUESTS,
                StatusCode::INTERNAL_SERVER_ERROR,
                StatusCode::BAD_GATEWAY,
                StatusCode::SERVICE_UNAVAILABLE,
                StatusCode::GATEWAY_TIMEOUT,
            ],
        }
    }

    pub fn is_retryable(&self, status: StatusCode) -> bool {
        self.status_forcelist.contains(&status)
    }

    /// Delay before the `retry`-th consecutive retry (1-based).
    ///
    /// The first retry is immediate, later ones back off exponentially up to
    /// two minutes.
    pub fn backoff(&self, retry: u32) -> Duration {
        if retry <= 1 {
            return Duration::ZERO;
        }
        let exponent = (retry - 1).min(16) as i32;
        let secs = self.backoff_factor * 2f64.powi(exponent);
        Duration::try_from_secs_f64(secs).map_or(MAX_BACKOFF, |wait| wait.min(MAX_BACKOFF))
    }
}

/// Reusable HTTP session for one resolver run.
///
/// Built once from the [`Config`] and shared read-only by every request.
#[derive(Debug, Clone)]
pub struct Session {
    client: Client,
    retry: RetryPolicy,
    api_url: String,
    token_url: String,
}

impl Session {
    /// Builds the HTTP client with default headers, timeout and retry policy.
    ///
    /// # Example
    ///
    /// ```
    /// let session = Session::new(&config)?;
    /// let response = session.send(session.get(&url)).await?;
    /// ```
    pub fn new(config: &Config) -> Res<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        match HeaderValue::from_str(&config.user_agent) {
            Ok(agent) => {
                headers.insert(USER_AGENT, agent);
            }
            Err(_) => warning!("Ignoring invalid user_agent {:?}", config.user_agent),
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            retry: RetryPolicy::from_config(config),
            api_url: config.api_url.trim_end_matches('/').to_string(),
            token_url: config.token_url.clone(),
        })
    }

    pub fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }

    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    pub fn get(&self, url: &str) -> RequestBuilder {
        self.client.get(url)
    }

    pub fn post(&self, url: &str) -> RequestBuilder {
        self.client.post(url)
    }

    /// Sends a request, repeating it while the retry policy allows.
    ///
    /// Retries on the configured status codes and on connect or timeout
    /// failures. A `Retry-After` header overrides the computed backoff. Once
    /// the budget is spent the last response is returned as is, so callers
    /// still see the final status.
    pub async fn send(&self, request: RequestBuilder) -> Res<Response> {
        let request = request.build()?;
        let mut retries = 0;

        loop {
            let Some(attempt) = request.try_clone() else {
                return Ok(self.client.execute(request).await?);
            };
            let url = attempt.url().to_string();

            match self.client.execute(attempt).await {
                Ok(response)
                    if self.retry.is_retryable(response.status())
                        && retries < self.retry.max_retries =>
                {
                    retries += 1;
                    let wait = retry_after(&response).unwrap_or_else(|| self.retry.backoff(retries));
                    log::warn!(
                        "{} returned {}, retry {}/{} in {:?}",
                        url,
                        response.status(),
                        retries,
                        self.retry.max_retries,
                        wait
                    );
                    sleep(wait).await;
                }
                Ok(response) => return Ok(response),
                Err(err)
                    if (err.is_connect() || err.is_timeout())
                        && retries < self.retry.max_retries =>
                {
                    retries += 1;
                    let wait = self.retry.backoff(retries);
                    log::warn!(
                        "{} failed ({}), retry {}/{} in {:?}",
                        url,
                        err,
                        retries,
                        self.retry.max_retries,
                        wait
                    );
                    sleep(wait).await;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
}

fn retry_after(response: &Response) -> Option<Duration> {
    let secs = response
        .headers()
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()?;

    if secs > MAX_BACKOFF.as_secs() {
        warning!(
            "Retry after has reached an abnormal high of {} seconds, waiting {} seconds instead.",
            secs,
            MAX_BACKOFF.as_secs()
        );
        return Some(MAX_BACKOFF);
    }
    Some(Duration::from_secs(secs))
}

/// Passes 2xx responses through and turns anything else into an API error
/// carrying the status, URL and the start of the body.
pub(crate) async fn ensure_success(response: Response) -> Res<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().to_string();
    let body = response.text().await.unwrap_or_default();
    Err(ResolverError::Api {
        status: status.as_u16(),
        url,
        body: utils::snippet(&body, 200),
    })
}
