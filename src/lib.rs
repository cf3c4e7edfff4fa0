//! Harris corner detection with windowed non-maximum suppression.
//!
//! The crate exposes two stateless stages that a frame loop calls in
//! sequence:
//!
//! 1. [`compute_response`] turns a single-channel `f32` image into a
//!    cornerness map `det(M) - k·trace(M)²`, where `M` is the structure
//!    tensor of Sobel gradients accumulated over a clipped square window.
//! 2. [`suppress`] turns that map into a `0`/`255` mask of isolated local
//!    maxima above a threshold.
//!
//! [`CornerDetector`] chains both and extracts [`Corner`] lists. Optional
//! features add row parallelism (`rayon`), vectorised scoring (`simd`),
//! image file I/O (`image-io`) and tracing spans (`tracing`).

pub mod corner;
pub mod detector;
pub mod gradient;
pub mod image;
pub mod lowlevel;
pub mod response;
pub mod suppress;
pub mod tensor;
mod trace;
pub mod util;

#[cfg(feature = "image-io")]
pub use crate::image::io;

pub use corner::{corners_from_mask, Corner};
pub use crate::image::{ImageView, Mask, OwnedImage, ResponseMap, MASK_OFF, MASK_ON};
pub use detector::{CornerDetector, Detection, DetectorConfig};
pub use response::{compute_response, ResponseConfig};
pub use suppress::{suppress, NmsStrategy, SuppressConfig};
pub use util::{HarrisError, HarrisResult};
