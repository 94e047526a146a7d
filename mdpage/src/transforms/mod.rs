//! Build-time passes, in pipeline order
//!
//!     links     rewrite `.md` links into routes (on the Markdown syntax tree)
//!     lower     syntax tree → element tree, raw markup kept as `raw` nodes
//!     raw       expand `raw` nodes into elements
//!     annotate  heading ids (slug) + relative image collection (assets)
//!     prune     drop line-break-only text and empty paragraphs
//!
//! Every pass after `links` owns the element tree for the duration of the call and
//! mutates it in place. Only `raw` can fail.

pub mod annotate;
pub mod assets;
pub mod links;
pub mod lower;
pub mod prune;
pub mod raw;
pub mod slug;

pub use annotate::annotate;
pub use assets::{AssetMap, AssetResolver, PublicPathResolver};
pub use links::{LinkPolicy, LinkRewriter};
pub use lower::lower_document;
pub use prune::prune;
pub use raw::expand_raw;
pub use slug::{slugify, Slugger};
