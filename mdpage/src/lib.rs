//! Markdown pages as serializable element trees
//!
//!     This crate turns a Markdown document into a payload that a component-based renderer
//!     can consume without ever seeing the Markdown again: an element tree, the local assets
//!     it references and the page's metadata. At render time the same crate converts that
//!     tree back into components and keeps page data available across suspended reads.
//!
//!     TLDR:
//!         - Build time: Pipeline::transform(source, path) -> Payload, one document at a time.
//!         - Boundary: Payload / PageTree serialize to JSON (hast-style tree, see ./tree).
//!         - Render time: runtime::convert(tree, assets) and runtime::PageCache.
//!         - This is a pure lib: it never reads files, prints, or installs a log subscriber.
//!           mdpage-cli does all of that.
//!
//! Architecture
//!
//!     .
//!     ├── error.rs            # TransformError
//!     ├── tree                # Element tree (root / element / text) and its JSON shape
//!     ├── markdown            # comrak front end, extension registry, frontmatter + title
//!     ├── transforms          # build-time passes
//!     │   ├── links.rs        # .md links → routes
//!     │   ├── lower.rs        # syntax tree → element tree
//!     │   ├── raw.rs          # raw markup → elements
//!     │   ├── annotate.rs     # heading ids + asset collection (slug.rs, assets.rs)
//!     │   └── prune.rs        # blank text / empty paragraphs
//!     ├── page                # page records, locations, hierarchy, route tree
//!     ├── payload.rs          # the build boundary artifact
//!     ├── pipeline.rs         # runs the passes in order
//!     ├── runtime             # converter, memo, page cache, render context
//!     └── common              # lexical path helpers
//!
//! Testing
//!
//!     tests
//!     ├── lib.rs              # pulls in the subdirectories below
//!     ├── pipeline            # end-to-end document transforms
//!     └── runtime             # payload → components, page cache
//!
//!     Rust does not discover tests in subdirectories on its own, so tests/lib.rs declares them.
//!
//! Core Algorithms
//!
//!     The passes are plain tree rewrites over an owned tree. Two of them carry invariants
//!     that the rest of the system depends on:
//!         - Heading ids are unique per document: one Slugger per transform, numbered suffixes
//!           in document order.
//!         - Every img whose src starts with "." has an entry in the asset map, keyed by the
//!           literal src. The runtime looks sources up by that exact string.
//!
//!     Link rewriting is deliberately permissive: any link it cannot classify or resolve is
//!     left exactly as written. Raw markup is the opposite: a fragment the HTML tokenizer
//!     rejects fails the document.

pub mod common;
pub mod error;
pub mod markdown;
pub mod page;
pub mod payload;
pub mod pipeline;
pub mod runtime;
pub mod transforms;
pub mod tree;

pub use error::TransformError;
pub use markdown::{Extension, ExtensionRegistry};
pub use page::{PageData, PageLocation, PageTree, Route};
pub use payload::Payload;
pub use pipeline::{DocumentResult, Pipeline, TransformOptions};
pub use transforms::{AssetMap, AssetResolver, LinkPolicy, PublicPathResolver};
pub use tree::{Element, Node};
