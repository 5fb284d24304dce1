use serde::{Deserialize, Serialize};

/// One object in the document bucket. `last_modified` is kept as the raw
/// string the backend sends; the client only displays it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BucketObject {
    pub key: String,
    pub size: u64,
    pub last_modified: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BucketListing {
    pub bucket: String,
    pub object_count: usize,
    pub objects: Vec<BucketObject>,
}
