/// Image decoding module
///
/// This module handles:
/// - Generating grid thumbnails (thumbnail.rs)
/// - Generating viewer-sized previews (preview.rs)
///
/// Decoding is CPU-bound, so the async entry points run on tokio's
/// blocking pool and hand back iced image handles.

pub mod preview;
pub mod thumbnail;

use iced::widget::image::Handle;
use image::RgbaImage;
use std::sync::Arc;
use tokio::sync::Semaphore;

use crate::error::{GalleryError, GalleryResult};

/// Thumbnail decodes allowed to run at once
pub const MAX_CONCURRENT_DECODES: usize = 6;

/// Wrap decoded pixels in a handle the renderer can upload
pub fn to_handle(pixels: RgbaImage) -> Handle {
    let (width, height) = pixels.dimensions();
    Handle::from_rgba(width, height, pixels.into_raw())
}

/// Run `decode` on the blocking pool once a permit from `permits` is free.
///
/// The permit is held until the decode finishes, so the semaphore's permit
/// count caps how many decodes run concurrently.
pub async fn decode_limited<T, F>(permits: Arc<Semaphore>, decode: F) -> GalleryResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> GalleryResult<T> + Send + 'static,
{
    let permit = permits
        .acquire_owned()
        .await
        .map_err(|e| GalleryError::Task(e.to_string()))?;

    tokio::task::spawn_blocking(move || {
        let result = decode();
        drop(permit);
        result
    })
    .await
    .map_err(|e| GalleryError::Task(e.to_string()))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn decodes_in_flight_never_exceed_permits() {
        let permits = Arc::new(Semaphore::new(2));
        let running = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let jobs: Vec<_> = (0..16)
            .map(|i| {
                let permits = permits.clone();
                let running = running.clone();
                let peak = peak.clone();
                tokio::spawn(decode_limited(permits, move || {
                    let now = running.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    std::thread::sleep(Duration::from_millis(10));
                    running.fetch_sub(1, Ordering::SeqCst);
                    Ok(i)
                }))
            })
            .collect();

        let mut finished = Vec::new();
        for job in jobs {
            finished.push(job.await.unwrap().unwrap());
        }

        finished.sort();
        assert_eq!(finished, (0..16).collect::<Vec<_>>());
        assert!(peak.load(Ordering::SeqCst) <= 2);
        assert!(peak.load(Ordering::SeqCst) >= 1);
        assert_eq!(permits.available_permits(), 2);
    }

    #[tokio::test]
    async fn closed_semaphore_is_a_task_error() {
        let permits = Arc::new(Semaphore::new(1));
        permits.close();

        let result = decode_limited(permits, || Ok(())).await;
        assert!(matches!(result, Err(GalleryError::Task(_))));
    }

    #[tokio::test]
    async fn decode_errors_pass_through() {
        let permits = Arc::new(Semaphore::new(1));
        let result: GalleryResult<()> =
            decode_limited(permits.clone(), || Err(GalleryError::Task("boom".into()))).await;

        assert_eq!(result, Err(GalleryError::Task("boom".into())));
        assert_eq!(permits.available_permits(), 1);
    }
}
