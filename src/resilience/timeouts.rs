//! Timeout enforcement.
//!
//! # Responsibilities
//! - Wrap upstream calls with a deadline
//! - Keep timeout errors distinct from connection errors
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - The deadline covers connect plus time to response headers; the body
//!   streams afterwards without a deadline
//! - Timed-out requests return 504 Gateway Timeout

use std::future::Future;
use std::time::Duration;

use crate::error::{ProxyError, ProxyResult};

/// Await `call`, failing with [`ProxyError::Timeout`] once `deadline` passes.
pub async fn with_deadline<F, T, E>(deadline: Duration, call: F) -> ProxyResult<T>
where
    F: Future<Output = Result<T, E>>,
    E: Into<ProxyError>,
{
    match tokio::time::timeout(deadline, call).await {
        Ok(result) => result.map_err(Into::into),
        Err(_) => Err(ProxyError::Timeout { after: deadline }),
    }
}
