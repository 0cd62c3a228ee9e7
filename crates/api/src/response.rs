//! Envelope for collection responses.

use serde::Serialize;

/// Lists are returned as `{ "data": [...] }` so fields such as paging
/// metadata can be added beside `data` later without breaking clients.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
