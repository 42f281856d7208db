//! Media signal extraction for the VidSmart catalog.
//!
//! Produces the image and text signals handed to the content analysis
//! client: a single frame captured from a local video file via FFmpeg, a
//! remote thumbnail downloaded from the public image host, or a video title
//! looked up through an oEmbed endpoint.

pub mod command;
pub mod error;
pub mod frame;
pub mod oembed;
pub mod thumbnail;

pub use command::{check_ffmpeg, FfmpegCommand, FfmpegRunner};
pub use error::{MediaError, MediaResult};
pub use frame::extract_frame;
pub use oembed::OembedClient;
pub use thumbnail::ThumbnailFetcher;
pub use vidsmart_models::ImageSignal;
