//! Render-time side of the build boundary
//!
//! Everything here works from a deserialized [`crate::Payload`] alone:
//!
//! - [`convert`]: element tree → component tree, with asset substitution
//! - [`memo`]: conversion reuse while the inputs are the same allocations
//! - [`cache`]: last-known-good current page and page hierarchy
//! - [`render`]: ties the three together for one page
//!
//! Rendering is single-threaded, so shared state uses `Rc` and `RefCell`.

pub mod cache;
pub mod component;
pub mod convert;
pub mod memo;
pub mod render;

pub use cache::{
    markdown_page, markdown_tree, with_page_cache, PageCache, RouteData, RouteDataError,
    RouteDataSource, Suspended,
};
pub use component::{Component, ComponentFactory, ComponentTree, ElementComponent};
pub use convert::{convert, convert_with};
pub use memo::ComponentMemo;
pub use render::{render_page, LoadedPage, PageContext, RenderedPage};
