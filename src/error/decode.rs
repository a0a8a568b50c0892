use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Failed to decode {target} from {url}: {source}")]
    Json {
        target: &'static str,
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Expected a JSON body from {url}, got text: {preview}")]
    NotJson { url: String, preview: String },
}
