//! File upload.

use std::path::Path;

use anyhow::Result;
use evalbox_core::api::{ApiClient, Callbacks, UploadFile};

use super::{parse_query, print_outcome};

pub async fn run(
    client: &ApiClient,
    file: &Path,
    to: &str,
    query: &[String],
    mime: Option<String>,
) -> Result<()> {
    let query = parse_query(query)?;
    let mut upload = UploadFile::from_path(file).await?;
    upload.mime = mime;
    tracing::debug!(file = %file.display(), bytes = upload.bytes.len(), "uploading");
    let outcome = client
        .upload_file(to, upload, &query, Callbacks::none())
        .await;
    print_outcome(outcome)
}
