//! Page metadata: per-document records, their location in the site and the hierarchy
//! assembled from all documents of a build.

pub mod data;
pub mod hierarchy;
pub mod location;
pub mod routes;

pub use data::PageData;
pub use hierarchy::PageTree;
pub use location::PageLocation;
pub use routes::Route;
