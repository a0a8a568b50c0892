use futures_util::future::join_all;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::error::{
    ApiError, AppError, AppResult, DecodeError, HttpError, ValidationError, ValidationKind,
};
use crate::http::{ApiClient, Body, ClientOptions, Envelope};
use crate::validate::{JsonType, field_type, present_path, required_fields};

use super::{Item, StoryList, Updates, User};

/// Named operations over the item, user and list endpoints.
///
/// Identifiers are forwarded as given, so negative or absurd ids reach the
/// service and whatever it answers is normalized: a `null` payload or a
/// resource-missing status (400, 404, 410) becomes `None`. Every other
/// failure propagates.
#[derive(Debug, Clone)]
pub struct HnClient {
    api: ApiClient,
}

impl HnClient {
    /// # Errors
    ///
    /// Returns an error when the transport cannot be built from `options`.
    pub fn new(options: &ClientOptions) -> AppResult<Self> {
        Ok(Self::from_api(ApiClient::new(options)?))
    }

    #[must_use]
    pub const fn from_api(api: ApiClient) -> Self {
        Self { api }
    }

    #[must_use]
    pub const fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Fetches one item, or `None` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns transport errors other than resource-missing statuses, and
    /// validation or decode errors when the payload is not an item.
    pub async fn fetch_item(&self, id: i64) -> AppResult<Option<Item>> {
        let Some((url, value)) = self.fetch_item_value(id).await? else {
            return Ok(None);
        };
        decode(value, "item", &url).map(Some)
    }

    /// Like [`HnClient::fetch_item`], but returns the payload undecoded for
    /// schema checks.
    ///
    /// # Errors
    ///
    /// See [`HnClient::fetch_item`].
    pub async fn fetch_item_raw(&self, id: i64) -> AppResult<Option<Value>> {
        Ok(self.fetch_item_value(id).await?.map(|(_, value)| value))
    }

    /// Fetches several items concurrently. Results line up with `ids`.
    ///
    /// # Errors
    ///
    /// Returns the first error in input order.
    pub async fn fetch_items(&self, ids: &[i64]) -> AppResult<Vec<Option<Item>>> {
        join_all(ids.iter().map(|id| self.fetch_item(*id)))
            .await
            .into_iter()
            .collect()
    }

    /// Fetches up to `limit` ids from a story list, in server order.
    ///
    /// # Errors
    ///
    /// Returns transport errors, and a validation error when the payload is
    /// not an array of non-negative integers.
    pub async fn fetch_id_list(&self, list: StoryList, limit: usize) -> AppResult<Vec<u64>> {
        let endpoint = list.endpoint();
        let url = self.endpoint_url(&[endpoint.as_str()])?;
        let value = self.api.get_json(&url).await?;
        field_type(&value, "", JsonType::Array)?;

        let mut ids = Vec::new();
        if let Value::Array(entries) = &value {
            for (index, entry) in entries.iter().take(limit).enumerate() {
                let id = entry.as_u64().ok_or_else(|| {
                    ValidationError::new(
                        ValidationKind::Type,
                        index.to_string(),
                        format!("Expected {} entry {} to be an item id", list, index),
                        json!({ "expected": "non-negative integer", "actual": entry }),
                    )
                })?;
                ids.push(id);
            }
        }
        debug!(list = list.as_str(), limit, returned = ids.len(), "Fetched id list");
        Ok(ids)
    }

    /// Fetches a user profile, or `None` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns transport errors other than resource-missing statuses, and a
    /// validation error when `id`, `created` or `karma` is missing.
    pub async fn fetch_user(&self, name: &str) -> AppResult<Option<User>> {
        let Some((url, value)) = self.fetch_user_value(name).await? else {
            return Ok(None);
        };
        required_fields(&value, &["id", "created", "karma"])?;
        decode(value, "user", &url).map(Some)
    }

    /// Like [`HnClient::fetch_user`], but returns the payload undecoded.
    ///
    /// # Errors
    ///
    /// See [`HnClient::fetch_user`].
    pub async fn fetch_user_raw(&self, name: &str) -> AppResult<Option<Value>> {
        Ok(self.fetch_user_value(name).await?.map(|(_, value)| value))
    }

    /// Fetches the largest item id currently assigned.
    ///
    /// # Errors
    ///
    /// Returns transport errors, and a validation error when the payload is
    /// not a non-negative integer.
    pub async fn fetch_max_id(&self) -> AppResult<u64> {
        let url = self.endpoint_url(&["maxitem.json"])?;
        let value = self.api.get_json(&url).await?;
        field_type(&value, "", JsonType::Integer)?;
        value.as_u64().ok_or_else(|| {
            AppError::validation(ValidationError::new(
                ValidationKind::Range,
                "",
                "Expected the max item id to be non-negative",
                json!({ "actual": value }),
            ))
        })
    }

    /// Fetches the recently changed items and profiles.
    ///
    /// # Errors
    ///
    /// Returns transport errors, and validation or decode errors for a
    /// malformed payload.
    pub async fn fetch_updates(&self) -> AppResult<Updates> {
        let url = self.endpoint_url(&["updates.json"])?;
        let value = self.api.get_json(&url).await?;
        required_fields(&value, &["items", "profiles"])?;
        decode(value, "updates", &url)
    }

    /// Absolute URL for `segments` under the base URL, each segment
    /// percent-encoded.
    pub(crate) fn endpoint_url(&self, segments: &[&str]) -> AppResult<String> {
        let base = self.api.base_url();
        let mut url = Url::parse(base).map_err(|err| {
            AppError::http(HttpError::InvalidBaseUrl {
                url: base.to_owned(),
                source: err,
            })
        })?;
        {
            let Ok(mut path) = url.path_segments_mut() else {
                return Err(AppError::http(HttpError::UnsupportedScheme {
                    url: base.to_owned(),
                }));
            };
            path.pop_if_empty().extend(segments);
        }
        Ok(url.to_string())
    }

    async fn fetch_item_value(&self, id: i64) -> AppResult<Option<(String, Value)>> {
        let file = format!("{}.json", id);
        let url = self.endpoint_url(&["item", file.as_str()])?;
        let Some(envelope) = self.get_present(&url).await? else {
            return Ok(None);
        };
        let (resolved, value) = into_json(envelope)?;
        field_type(&value, "", JsonType::Object)?;
        if present_path(&value, "id").is_none() {
            warn!(id, url = %resolved, "Item payload has no id; treating it as missing");
            return Ok(None);
        }
        Ok(Some((resolved, value)))
    }

    async fn fetch_user_value(&self, name: &str) -> AppResult<Option<(String, Value)>> {
        let file = format!("{}.json", name);
        let url = self.endpoint_url(&["user", file.as_str()])?;
        let Some(envelope) = self.get_present(&url).await? else {
            return Ok(None);
        };
        let (resolved, value) = into_json(envelope)?;
        field_type(&value, "", JsonType::Object)?;
        Ok(Some((resolved, value)))
    }

    /// GET that maps "not found" answers to `None`.
    async fn get_present(&self, url: &str) -> AppResult<Option<Envelope>> {
        match self.api.get(url).await {
            Ok(envelope) if envelope.body.is_null() => {
                debug!(url, "Resource is null; treating it as missing");
                Ok(None)
            }
            Ok(envelope) => Ok(Some(envelope)),
            Err(err) if err.as_api().is_some_and(ApiError::is_resource_missing) => {
                debug!(url, error = %err, "Resource-missing status; treating it as missing");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}

fn into_json(envelope: Envelope) -> AppResult<(String, Value)> {
    match envelope.body {
        Body::Json(value) => Ok((envelope.url, value)),
        Body::Text(text) => Err(AppError::decode(DecodeError::NotJson {
            url: envelope.url,
            preview: Body::Text(text).preview(256),
        })),
    }
}

fn decode<T>(value: Value, target: &'static str, url: &str) -> AppResult<T>
where
    T: DeserializeOwned,
{
    serde_json::from_value(value).map_err(|err| {
        AppError::decode(DecodeError::Json {
            target,
            url: url.to_owned(),
            source: err,
        })
    })
}
