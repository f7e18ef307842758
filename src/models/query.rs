//! REST query envelope returned by the org's query endpoint

use serde::Deserialize;

/// Result set envelope: `{"totalSize": n, "done": bool, "records": [...]}`
///
/// `done` is reported but not acted on: this tool does not follow
/// `nextRecordsUrl`, so result sets beyond the first page are not fetched.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct QueryResponse<T> {
    pub total_size: u64,
    #[serde(default = "default_done")]
    pub done: bool,
    #[serde(default)]
    pub records: Vec<T>,
}

fn default_done() -> bool {
    true
}
