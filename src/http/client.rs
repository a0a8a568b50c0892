use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::{
    Client, Request, Url,
    header::{ACCEPT, HeaderMap, HeaderName, HeaderValue},
};
use serde_json::Value;
use tokio::time::{Instant, sleep, timeout};
use tracing::{debug, error, warn};

use crate::error::{ApiError, AppError, AppResult, DecodeError, HttpError};

use super::{Body, Envelope, RequestBody, RequestSpec, RetryPolicy, is_success_status, join_url};

/// Bodies longer than this are cut in log lines.
const BODY_LOG_LIMIT: usize = 512;

/// Everything the transport needs, resolved once per run.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub base_url: String,
    pub timeout: Duration,
    pub retry: RetryPolicy,
    pub user_agent: String,
    pub headers: Vec<(String, String)>,
}

/// HTTP client that retries failed attempts and normalizes every answer into an [`Envelope`].
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    timeout: Duration,
    retry: RetryPolicy,
}

struct AttemptFailure {
    message: String,
    timed_out: bool,
}

impl ApiClient {
    /// Builds the underlying HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error when the base URL or a default header is invalid, or
    /// the HTTP client cannot be built.
    pub fn new(options: &ClientOptions) -> AppResult<Self> {
        let base = Url::parse(&options.base_url).map_err(|err| {
            AppError::http(HttpError::InvalidBaseUrl {
                url: options.base_url.clone(),
                source: err,
            })
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(AppError::http(HttpError::UnsupportedScheme {
                url: options.base_url.clone(),
            }));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        for (key, value) in &options.headers {
            let name = HeaderName::from_bytes(key.as_bytes()).map_err(|err| {
                AppError::http(HttpError::InvalidHeaderName {
                    header: key.clone(),
                    source: err,
                })
            })?;
            let val = HeaderValue::from_str(value).map_err(|err| {
                AppError::http(HttpError::InvalidHeaderValue {
                    header: key.clone(),
                    source: err,
                })
            })?;
            headers.insert(name, val);
        }

        let client = Client::builder()
            .user_agent(options.user_agent.as_str())
            .default_headers(headers)
            .connect_timeout(options.timeout)
            .build()
            .map_err(|err| AppError::http(HttpError::BuildClientFailed { source: err }))?;

        Ok(Self {
            client,
            base_url: options.base_url.clone(),
            timeout: options.timeout,
            retry: options.retry,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    #[must_use]
    pub const fn retry(&self) -> RetryPolicy {
        self.retry
    }

    /// Resolves a path or absolute URL against the base URL.
    ///
    /// # Errors
    ///
    /// Returns an error when the joined URL does not parse.
    pub fn resolve_url(&self, target: &str) -> AppResult<Url> {
        let joined = join_url(&self.base_url, target);
        match Url::parse(&joined) {
            Ok(url) => Ok(url),
            Err(err) => Err(AppError::http(HttpError::InvalidUrl {
                url: joined,
                source: err,
            })),
        }
    }

    /// Shorthand for a GET with the client's default timeout and retries.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn get(&self, target: &str) -> AppResult<Envelope> {
        self.request(&RequestSpec::get(target)).await
    }

    /// GET that requires a JSON answer.
    ///
    /// # Errors
    ///
    /// Returns the request's error, or a decode error when the body is not JSON.
    pub async fn get_json(&self, target: &str) -> AppResult<Value> {
        let envelope = self.get(target).await?;
        match envelope.body {
            Body::Json(value) => Ok(value),
            Body::Text(text) => Err(AppError::decode(DecodeError::NotJson {
                url: envelope.url,
                preview: Body::Text(text).preview(BODY_LOG_LIMIT),
            })),
        }
    }

    /// Performs one logical request, retrying until a 2xx answer or the budget runs out.
    ///
    /// Attempt `n` (zero-based) is preceded by a sleep of `n * backoff_unit`
    /// and bounded by its own timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the final attempt ends with a non-2xx status
    /// or a transport failure, and [`HttpError`] without any attempt when the
    /// target URL or a header is invalid.
    pub async fn request(&self, spec: &RequestSpec) -> AppResult<Envelope> {
        let url = self.resolve_url(&spec.target)?;
        let attempt_timeout = spec.timeout.unwrap_or(self.timeout);
        let retry = spec
            .retries
            .map_or(self.retry, |retries| self.retry.with_retries(retries));
        let method = spec.method.as_str();

        debug!(
            method,
            url = %url,
            headers = ?spec.headers,
            body = ?spec.body,
            "Sending request"
        );

        let template = self.build_request(spec, &url)?;

        let mut attempt: u32 = 0;
        loop {
            if attempt > 0 {
                let delay = retry.delay_before(attempt);
                debug!(
                    method,
                    url = %url,
                    attempt,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    "Backing off before retry"
                );
                sleep(delay).await;
            }
            let attempts = attempt.saturating_add(1);

            let request = match template.try_clone() {
                Some(request) => request,
                None => self.build_request(spec, &url)?,
            };
            let failure = match self.attempt(request, &url, attempt_timeout, attempts).await {
                Ok(envelope) => {
                    debug!(
                        method,
                        url = %url,
                        status = envelope.status,
                        elapsed_ms = u64::try_from(envelope.elapsed.as_millis()).unwrap_or(u64::MAX),
                        body = %envelope.body.preview(BODY_LOG_LIMIT),
                        "Received response"
                    );
                    if envelope.ok {
                        return Ok(envelope);
                    }
                    ApiError::Status {
                        method: method.to_owned(),
                        url: envelope.url,
                        status: envelope.status,
                        status_text: envelope.status_text,
                        body: envelope.body,
                        attempts,
                    }
                }
                Err(failure) => ApiError::Transport {
                    method: method.to_owned(),
                    url: url.to_string(),
                    message: failure.message,
                    timed_out: failure.timed_out,
                    attempts,
                },
            };

            if attempt >= retry.retries {
                error!(
                    method,
                    url = %url,
                    status = failure.status(),
                    attempts,
                    body = %failure.body().preview(BODY_LOG_LIMIT),
                    "Request failed: {}",
                    failure
                );
                return Err(AppError::api(failure));
            }
            warn!(
                method,
                url = %url,
                status = failure.status(),
                attempt = attempts,
                max_attempts = retry.max_attempts(),
                "Request attempt failed, retrying: {}",
                failure
            );
            attempt = attempt.saturating_add(1);
        }
    }

    /// Builds the request once so malformed headers or bodies fail before any
    /// attempt is spent.
    fn build_request(&self, spec: &RequestSpec, url: &Url) -> AppResult<Request> {
        let mut builder = self.client.request(spec.method.to_reqwest(), url.clone());
        for (name, value) in &spec.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder = match spec.body.as_ref() {
            Some(RequestBody::Json(value)) => builder.json(value),
            Some(RequestBody::Text(text)) => builder.body(text.clone()),
            None => builder,
        };
        builder.build().map_err(|err| {
            AppError::http(HttpError::InvalidRequest {
                url: url.to_string(),
                source: err,
            })
        })
    }

    async fn attempt(
        &self,
        request: Request,
        url: &Url,
        attempt_timeout: Duration,
        attempts: u32,
    ) -> Result<Envelope, AttemptFailure> {
        let started = Instant::now();
        let exchange = async {
            let response = self.client.execute(request).await?;
            let status = response.status();
            let headers = collect_headers(response.headers());
            let bytes = response.bytes().await?;
            Ok::<_, reqwest::Error>((status, headers, bytes))
        };

        match timeout(attempt_timeout, exchange).await {
            Ok(Ok((status, headers, bytes))) => {
                let body = Body::decode(headers.get("content-type").map(String::as_str), &bytes);
                let code = status.as_u16();
                Ok(Envelope {
                    url: url.to_string(),
                    status: code,
                    status_text: status.canonical_reason().unwrap_or_default().to_owned(),
                    headers,
                    body,
                    ok: is_success_status(code),
                    elapsed: started.elapsed(),
                    attempts,
                })
            }
            Ok(Err(err)) => Err(AttemptFailure {
                timed_out: err.is_timeout(),
                message: err.to_string(),
            }),
            Err(_elapsed) => Err(AttemptFailure {
                timed_out: true,
                message: format!("timed out after {} ms", attempt_timeout.as_millis()),
            }),
        }
    }
}

fn collect_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (name.as_str().to_owned(), value.to_owned()))
        })
        .collect()
}
