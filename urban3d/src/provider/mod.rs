//! Upstream service clients
//!
//! This module provides the HTTP abstraction plus the two upstream services
//! the system consumes: the Overpass geodata API and an optional hosted
//! text-generation model.
//!
//! ```ignore
//! use urban3d::provider::{AsyncReqwestClient, OverpassProvider, GeodataSource};
//!
//! let provider = OverpassProvider::new(AsyncReqwestClient::shared()?);
//! let response = provider.fetch_buildings(&bbox).await?;
//! ```

mod http;
mod overpass;
mod text_generation;
mod types;

pub use http::{AsyncHttpClient, AsyncReqwestClient, USER_AGENT};
pub use overpass::{
    Element, GeodataSource, OverpassProvider, OverpassResponse, DEFAULT_OVERPASS_TIMEOUT,
    DEFAULT_OVERPASS_URL,
};
pub use text_generation::{
    GenerateFuture, TextGenerationProvider, TextGenerator, DEFAULT_MAX_NEW_TOKENS,
    DEFAULT_TEXT_GENERATION_TIMEOUT, DEFAULT_TEXT_GENERATION_URL,
};
pub use types::ProviderError;

#[cfg(test)]
pub use http::tests::{MockAsyncHttpClient, RecordedRequest};
