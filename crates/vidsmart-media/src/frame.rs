//! Frame capture from local video files.

use std::path::Path;

use tracing::debug;

use vidsmart_models::ImageSignal;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::MediaResult;

/// Offset into the stream at which the frame is captured.
pub const FRAME_SEEK_SECONDS: f64 = 1.0;
/// Cap on the longer dimension of the captured frame.
pub const FRAME_MAX_DIMENSION: u32 = 512;
/// JPEG quality on the ffmpeg -q:v scale (2 best .. 31 worst); 4 ≈ 80%.
pub const FRAME_JPEG_QUALITY: u8 = 4;
/// Upper bound on a single capture run.
const FRAME_TIMEOUT_SECS: u64 = 30;

/// Capture a single frame from a local video file.
///
/// Seeks 1 second into the stream, rasterizes one frame, downscales so the
/// longer dimension does not exceed 512 px (never upscales), and encodes it
/// as JPEG. The scratch directory is removed on success and failure alike.
///
/// Fails with [`crate::MediaError::DecodeFailed`] when the input is not a
/// decodable video stream.
pub async fn extract_frame(video_path: impl AsRef<Path>) -> MediaResult<ImageSignal> {
    let video_path = video_path.as_ref();

    let scratch = tempfile::tempdir()?;
    let frame_path = scratch.path().join("frame.jpg");

    let filter = format!(
        "scale='min({max},iw)':'min({max},ih)':force_original_aspect_ratio=decrease:force_divisible_by=2",
        max = FRAME_MAX_DIMENSION
    );

    let cmd = FfmpegCommand::new(video_path, &frame_path)
        .seek(FRAME_SEEK_SECONDS)
        .single_frame()
        .video_filter(&filter)
        .jpeg_quality(FRAME_JPEG_QUALITY)
        .log_level("error");

    FfmpegRunner::new()
        .with_timeout(FRAME_TIMEOUT_SECS)
        .run(&cmd)
        .await?;

    let bytes = tokio::fs::read(&frame_path).await?;
    debug!(
        "Captured frame from {} ({} bytes)",
        video_path.display(),
        bytes.len()
    );

    Ok(ImageSignal::from_jpeg(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_filter_caps_longer_dimension() {
        let filter = format!(
            "scale='min({max},iw)':'min({max},ih)':force_original_aspect_ratio=decrease:force_divisible_by=2",
            max = FRAME_MAX_DIMENSION
        );
        assert!(filter.contains("512"));
        assert!(filter.contains("force_original_aspect_ratio=decrease"));
    }

    #[tokio::test]
    async fn test_extract_frame_fails_on_non_video_input() {
        if crate::check_ffmpeg().is_err() {
            return; // environment without ffmpeg
        }

        let dir = tempfile::tempdir().unwrap();
        let bogus = dir.path().join("not-a-video.mp4");
        tokio::fs::write(&bogus, b"definitely not an mp4").await.unwrap();

        let result = extract_frame(&bogus).await;
        assert!(matches!(
            result,
            Err(crate::MediaError::DecodeFailed { .. })
        ));
    }
}
