//! Low-level building blocks for custom pipelines.
//!
//! These expose the gradient, tensor and corner-ranking pieces used by the
//! two stages. Most users should prefer [`crate::compute_response`],
//! [`crate::suppress`] and [`crate::CornerDetector`].

pub use crate::corner::sort_corners_desc;
pub use crate::gradient::{sobel_gradients, sobel_kernels, GradientField};
pub use crate::image::convert::{normalize_to_u8, u8_to_f32};
pub use crate::response::response_from_gradients;
pub use crate::tensor::{structure_tensor_at, StructureTensor, TensorIntegrals};
