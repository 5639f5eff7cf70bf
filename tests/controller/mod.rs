//! Tests for HTTP controller endpoints.
//!
//! Handlers are called directly with extracted arguments, except for the router tests
//! which drive the assembled router through `tower::ServiceExt::oneshot`.

mod availability;
mod router;
mod sync;

use axum::response::Response;
use huddle_test_utils::prelude::*;
use serde::de::DeserializeOwned;

use crate::util::TestContextExt;

/// Deserialize the JSON body of a handler response.
async fn json_body<T: DeserializeOwned>(response: Response) -> T {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    serde_json::from_slice(&bytes).unwrap()
}
