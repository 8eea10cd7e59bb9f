//! Low-level building blocks for custom pose heads.
//!
//! These expose per-anchor decoding and index-level suppression for parsers
//! that do not fit [`crate::YoloPoseParser`]. Most users should prefer
//! [`crate::PosePipeline`].

pub use crate::candidate::nms::suppress_indices;
pub use crate::decode::decode_anchor;
#[cfg(feature = "rayon")]
pub use crate::decode::rayon::decode_par;
