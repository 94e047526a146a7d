//! Last-known-good page data for the rendering context.
//!
//! Rendering reads page data from an ambient per-route source that may not be ready
//! yet. That condition ([`Suspended`]) is passed straight back to the caller, which
//! retries per the host's suspension protocol. Every other failure is absorbed here:
//!
//! | read                     | current page                 | page tree                  |
//! |--------------------------|------------------------------|----------------------------|
//! | suspended                | `Err(Suspended)`             | `Err(Suspended)`           |
//! | failed / nothing usable  | last cached value (or none)  | cached value (or none)     |
//! | usable data              | cached, then returned        | cached forever, returned   |
//!
//! Slots are only ever overwritten by a successful read. The page tree is read at most
//! once successfully: after that the source is not consulted again.

use crate::page::PageData;
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use thiserror::Error;
use tracing::{error, trace, warn};

/// Route data is not available yet; retry later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("route data is not available yet")]
pub struct Suspended;

/// Failure of an ambient route data read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteDataError {
    #[error(transparent)]
    Pending(#[from] Suspended),
    #[error("route data read failed: {0}")]
    Failed(String),
}

/// What the route source returns: the page record and the page index, as raw JSON.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteData {
    pub page: Option<Value>,
    pub pages: Option<Value>,
}

/// Ambient per-route data.
pub trait RouteDataSource {
    fn read(&self) -> Result<RouteData, RouteDataError>;
}

impl<F> RouteDataSource for F
where
    F: Fn() -> Result<RouteData, RouteDataError>,
{
    fn read(&self) -> Result<RouteData, RouteDataError> {
        self()
    }
}

/// The two cache slots. Single-threaded; one instance per rendering context.
#[derive(Debug, Default)]
pub struct PageCache {
    current: RefCell<Option<Rc<PageData>>>,
    tree: RefCell<Option<Rc<PageData>>>,
    consecutive_fallbacks: Cell<u32>,
    stale_reads: Cell<u64>,
}

impl PageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Page data of the current route, falling back to the last good value.
    pub fn current_page(
        &self,
        source: &dyn RouteDataSource,
    ) -> Result<Option<Rc<PageData>>, Suspended> {
        let failure = match source.read() {
            Err(RouteDataError::Pending(suspended)) => {
                trace!("current page read suspended");
                return Err(suspended);
            }
            Err(RouteDataError::Failed(reason)) => reason,
            Ok(data) => match data.page.and_then(usable_page) {
                Some(page) => {
                    let page = Rc::new(page);
                    *self.current.borrow_mut() = Some(Rc::clone(&page));
                    self.consecutive_fallbacks.set(0);
                    return Ok(Some(page));
                }
                None => "no usable page data".to_string(),
            },
        };

        Ok(self.fall_back(&failure))
    }

    /// The page hierarchy, fetched once and kept for the life of the cache.
    pub fn page_tree(
        &self,
        source: &dyn RouteDataSource,
    ) -> Result<Option<Rc<PageData>>, Suspended> {
        if let Some(tree) = self.tree.borrow().as_ref() {
            return Ok(Some(Rc::clone(tree)));
        }

        match source.read() {
            Err(RouteDataError::Pending(suspended)) => {
                trace!("page tree read suspended");
                Err(suspended)
            }
            Err(RouteDataError::Failed(reason)) => {
                warn!(%reason, "page tree read failed");
                Ok(None)
            }
            Ok(data) => {
                let tree = data
                    .pages
                    .filter(|pages| !pages.is_null())
                    .and_then(|pages| serde_json::from_value::<PageData>(pages).ok())
                    .map(Rc::new);
                if let Some(tree) = &tree {
                    *self.tree.borrow_mut() = Some(Rc::clone(tree));
                }
                Ok(tree)
            }
        }
    }

    /// The cached current page without reading the source.
    pub fn cached_page(&self) -> Option<Rc<PageData>> {
        self.current.borrow().clone()
    }

    /// How many current-page reads were answered from the cache.
    pub fn stale_reads(&self) -> u64 {
        self.stale_reads.get()
    }

    fn fall_back(&self, reason: &str) -> Option<Rc<PageData>> {
        let consecutive = self.consecutive_fallbacks.get() + 1;
        self.consecutive_fallbacks.set(consecutive);
        self.stale_reads.set(self.stale_reads.get() + 1);

        let cached = self.cached_page();
        if consecutive > 1 {
            error!(%reason, consecutive, cached = cached.is_some(), "current page still unavailable, serving stale data");
        } else {
            warn!(%reason, cached = cached.is_some(), "current page unavailable, serving cached data");
        }
        cached
    }
}

/// A page record is usable when it is an object carrying its frontmatter.
fn usable_page(value: Value) -> Option<PageData> {
    let has_frontmatter = value
        .get("frontmatter")
        .is_some_and(|frontmatter| !frontmatter.is_null());
    if !has_frontmatter {
        return None;
    }
    serde_json::from_value(value).ok()
}

thread_local! {
    static PAGE_CACHE: PageCache = PageCache::new();
}

/// Run `f` with this thread's page cache.
pub fn with_page_cache<R>(f: impl FnOnce(&PageCache) -> R) -> R {
    PAGE_CACHE.with(f)
}

/// [`PageCache::current_page`] on this thread's cache.
pub fn markdown_page(source: &dyn RouteDataSource) -> Result<Option<Rc<PageData>>, Suspended> {
    with_page_cache(|cache| cache.current_page(source))
}

/// [`PageCache::page_tree`] on this thread's cache.
pub fn markdown_tree(source: &dyn RouteDataSource) -> Result<Option<Rc<PageData>>, Suspended> {
    with_page_cache(|cache| cache.page_tree(source))
}
