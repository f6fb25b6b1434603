//! Async entry points.
//!
//! The Cloudinary client is blocking, so the whole fetch-and-layout pipeline
//! runs on tokio's blocking pool and the result is handed back to the caller.

use crate::{Error, GalleryConfig, ImageRecord, Page, Result};

/// Create the configured source, fetch, sample and lay out the page
pub async fn build_page(config: GalleryConfig) -> Result<Page> {
    run_blocking(move || {
        let source = crate::new_source(&config)?;
        crate::build_page(&config, &*source)
    })
    .await
}

/// Fetch the projected records without sampling them
pub async fn fetch_records(config: GalleryConfig) -> Result<Vec<ImageRecord>> {
    run_blocking(move || {
        let source = crate::new_source(&config)?;
        source.fetch_images(&config.query())
    })
    .await
}

async fn run_blocking<T, F>(job: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(job)
        .await
        .map_err(|e| Error::Other(format!("build task failed: {}", e)))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn build_page_from_fixture() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(
            file.path(),
            r#"[{"public_id": "wall/a", "format": "jpg", "width": 1, "height": 1},
                {"public_id": "wall/b", "format": "jpg", "width": 1, "height": 1}]"#,
        )
        .unwrap();

        let config = GalleryConfig {
            cloud_name: "demo".into(),
            folder: "wall".into(),
            fixture: Some(file.path().to_path_buf()),
            seed: Some(3),
            ..Default::default()
        };
        let page = build_page(config.clone()).await.expect("build");
        assert_eq!(page.gallery().len(), 2);

        let records = fetch_records(config).await.expect("fetch");
        assert_eq!(records[0].public_id, "wall/b");
    }

    #[tokio::test]
    async fn missing_fixture_surfaces_error() {
        let config = GalleryConfig {
            cloud_name: "demo".into(),
            folder: "wall".into(),
            fixture: Some("/nonexistent/records.json".into()),
            ..Default::default()
        };
        assert!(matches!(build_page(config).await, Err(Error::FetchError(_))));
    }
}
