//! Helpers shared by the build-time passes and the page model.

pub mod paths;

pub use paths::{absolutize, normalize_lexically, to_forward_slashes};
