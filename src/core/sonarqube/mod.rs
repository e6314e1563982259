//! SonarQube Web API client.
//!
//! All tools share one request primitive: an authenticated, time-bounded GET
//! against `<base>/api/<endpoint>` whose JSON body is decoded into the
//! tolerant models in [`models`].

mod client;
mod error;
pub mod models;

pub use client::{API_PREFIX, REQUEST_TIMEOUT, SonarQubeClient};
pub use error::{UpstreamError, UpstreamResult};
