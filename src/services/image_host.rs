//! Image ingestion for the bulk-create path
//!
//! Photos referenced by transient source URLs are re-hosted at the object
//! storage host so listing pages do not depend on third-party links staying
//! alive. Ingestion is strictly best-effort: any download or upload failure
//! leaves the original URL on the record and never fails the batch.

use std::sync::Arc;

use axum::async_trait;
use futures::future::join_all;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use crate::models::NewDentist;

/// Re-hosts an image found at `source_url` under a stable `public_id`,
/// returning the hosted URL
#[async_trait]
pub trait ImageHost: Send + Sync {
    async fn host_image(&self, source_url: &str, public_id: &str) -> anyhow::Result<String>;
}

/// HTTP-backed implementation talking to the object-storage upload endpoint
pub struct HttpImageHost {
    http: reqwest::Client,
    upload_url: String,
    api_key: String,
}

#[derive(Deserialize)]
struct UploadResponse {
    url: String,
}

impl HttpImageHost {
    pub fn new(http: reqwest::Client, upload_url: String, api_key: String) -> Self {
        Self {
            http,
            upload_url,
            api_key,
        }
    }
}

#[async_trait]
impl ImageHost for HttpImageHost {
    async fn host_image(&self, source_url: &str, public_id: &str) -> anyhow::Result<String> {
        // Download the source image
        let response = self
            .http
            .get(source_url)
            .send()
            .await?
            .error_for_status()?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("image/jpeg")
            .to_string();
        let bytes = response.bytes().await?;

        // Upload to the object-storage host under the stable id
        let upload_target = format!("{}/{}", self.upload_url.trim_end_matches('/'), public_id);
        let uploaded: UploadResponse = self
            .http
            .put(&upload_target)
            .bearer_auth(&self.api_key)
            .header(CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        debug!(public_id, hosted_url = %uploaded.url, "Image re-hosted");

        Ok(uploaded.url)
    }
}

/// Re-host the photos of a batch of records before insertion
///
/// Fan-out is bounded by a semaphore of `width` permits; the returned future
/// resolves only once every item has completed, so the caller can issue a
/// single batch insert afterwards. Records without a photo URL are skipped
/// (the field stays null); records whose ingestion fails keep their original
/// source URL.
pub async fn rehost_photos(host: &Arc<dyn ImageHost>, records: &mut [NewDentist], width: usize) {
    let semaphore = Arc::new(Semaphore::new(width.max(1)));

    let jobs: Vec<(usize, String, String)> = records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| {
            record
                .photo_url
                .clone()
                .map(|url| (index, url, format!("dentist-{}", record.id)))
        })
        .collect();

    let results = join_all(jobs.into_iter().map(|(index, source_url, public_id)| {
        let host = Arc::clone(host);
        let semaphore = Arc::clone(&semaphore);
        async move {
            let _permit = semaphore.acquire().await.ok();
            match host.host_image(&source_url, &public_id).await {
                Ok(hosted_url) => (index, Some(hosted_url)),
                Err(err) => {
                    warn!(
                        public_id,
                        source_url,
                        error = %err,
                        "Image ingestion failed, keeping original URL"
                    );
                    (index, None)
                }
            }
        }
    }))
    .await;

    for (index, hosted_url) in results {
        if let Some(url) = hosted_url {
            records[index].photo_url = Some(url);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DentistInput;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FlakyHost {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ImageHost for FlakyHost {
        async fn host_image(&self, source_url: &str, public_id: &str) -> anyhow::Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if source_url.contains("broken") {
                anyhow::bail!("download refused");
            }
            Ok(format!("https://img.example.com/{public_id}"))
        }
    }

    fn record_with_photo(photo_url: Option<&str>) -> NewDentist {
        DentistInput {
            name: Some("Dr. B".into()),
            specialty: Some("General".into()),
            address: Some("1 Avenue Y".into()),
            city: Some("Casablanca".into()),
            phone: Some("0600000001".into()),
            rating: Some(4.0),
            reviews_count: Some(3),
            latitude: Some(33.57),
            longitude: Some(-7.59),
            opening_hours: Some("9-17".into()),
            photo_url: photo_url.map(String::from),
            ..Default::default()
        }
        .validate()
        .expect("valid input")
    }

    #[tokio::test]
    async fn failed_ingestion_keeps_original_url() {
        let host: Arc<dyn ImageHost> = Arc::new(FlakyHost {
            calls: AtomicUsize::new(0),
        });

        let mut records = vec![
            record_with_photo(Some("https://photos.example.com/a.jpg")),
            record_with_photo(Some("https://photos.example.com/broken.jpg")),
            record_with_photo(Some("https://photos.example.com/c.jpg")),
        ];

        rehost_photos(&host, &mut records, 2).await;

        assert_eq!(
            records[0].photo_url.as_deref(),
            Some(format!("https://img.example.com/dentist-{}", records[0].id).as_str())
        );
        assert_eq!(
            records[1].photo_url.as_deref(),
            Some("https://photos.example.com/broken.jpg")
        );
        assert!(records[2]
            .photo_url
            .as_deref()
            .unwrap()
            .starts_with("https://img.example.com/"));
    }

    #[tokio::test]
    async fn absent_photo_is_not_ingested() {
        let host = Arc::new(FlakyHost {
            calls: AtomicUsize::new(0),
        });
        let dyn_host: Arc<dyn ImageHost> = host.clone();

        let mut records = vec![record_with_photo(None)];
        rehost_photos(&dyn_host, &mut records, 4).await;

        assert!(records[0].photo_url.is_none());
        assert_eq!(host.calls.load(Ordering::SeqCst), 0);
    }
}
