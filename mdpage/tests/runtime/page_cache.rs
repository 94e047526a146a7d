//! Page cache fed from a page index and payloads produced by the pipeline.

use crate::common::{options, transform};
use mdpage::runtime::{
    render_page, ComponentMemo, LoadedPage, PageCache, RouteData, RouteDataError,
    RouteDataSource, Suspended,
};
use mdpage::{LinkPolicy, PageTree, Pipeline};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Route source replaying a scripted sequence of reads.
struct Scripted {
    reads: RefCell<VecDeque<Result<RouteData, RouteDataError>>>,
}

impl Scripted {
    fn new(reads: Vec<Result<RouteData, RouteDataError>>) -> Self {
        Self {
            reads: RefCell::new(reads.into()),
        }
    }
}

impl RouteDataSource for Scripted {
    fn read(&self) -> Result<RouteData, RouteDataError> {
        self.reads
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(RouteDataError::Failed("script exhausted".into())))
    }
}

fn write_index(dir: &TempDir) -> std::path::PathBuf {
    let pipeline = Pipeline::new(options(LinkPolicy::Flatten)).unwrap();
    let results = pipeline.transform_batch([
        (Path::new("docs/readme.md"), "# Home\n"),
        (Path::new("docs/guide.md"), "# Guide\n"),
    ]);
    let tree = pipeline.page_tree(results.iter().map(|r| &r.result.as_ref().unwrap().page));

    let path = dir.path().join("pages.json");
    fs::write(&path, tree.to_json().unwrap()).unwrap();
    path
}

#[test]
fn test_cache_keeps_last_good_page_across_failures() {
    let p1 = transform("# First\n", "docs/first.md");
    let page_value = serde_json::to_value(&p1.page).unwrap();

    let source = Scripted::new(vec![
        Ok(RouteData {
            page: Some(page_value),
            pages: None,
        }),
        Err(RouteDataError::Failed("network".into())),
        Err(Suspended.into()),
        Ok(RouteData::default()),
    ]);
    let cache = PageCache::new();

    let first = cache.current_page(&source).unwrap().unwrap();
    assert_eq!(first.title.as_deref(), Some("First"));

    let after_error = cache.current_page(&source).unwrap().unwrap();
    assert_eq!(after_error.key, "first");

    assert_eq!(cache.current_page(&source), Err(Suspended));

    let after_empty = cache.current_page(&source).unwrap().unwrap();
    assert_eq!(after_empty.key, "first");
    assert_eq!(cache.stale_reads(), 2);
}

#[test]
fn test_page_index_from_disk_feeds_the_tree_slot() {
    let dir = TempDir::new().unwrap();
    let index_path = write_index(&dir);
    let index: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&index_path).unwrap()).unwrap();

    let source = Scripted::new(vec![
        Err(Suspended.into()),
        Ok(RouteData {
            page: None,
            pages: Some(index),
        }),
    ]);
    let cache = PageCache::new();

    assert_eq!(cache.page_tree(&source), Err(Suspended));
    let tree = cache.page_tree(&source).unwrap().unwrap();
    assert_eq!(tree.title.as_deref(), Some("Home"));
    assert_eq!(tree.children[0].key, "guide");

    // The script is exhausted; the cached tree is served without another read.
    let again = cache.page_tree(&source).unwrap().unwrap();
    assert_eq!(again, tree);
}

#[test]
fn test_render_context_carries_page_and_hierarchy() {
    let dir = TempDir::new().unwrap();
    let index_path = write_index(&dir);
    let tree = PageTree::from_json(&fs::read_to_string(index_path).unwrap()).unwrap();

    let loaded = LoadedPage::from(transform("# Guide\n\nBody.\n", "docs/guide.md"));
    let mut memo = ComponentMemo::new();
    let rendered = render_page(
        &loaded,
        Some(std::rc::Rc::new(tree.into_root())),
        &mut memo,
    );

    assert_eq!(rendered.context.page.path, "guide");
    let pages = rendered.context.pages.unwrap();
    assert_eq!(pages.children.len(), 1);
    assert_eq!(rendered.content.text_content(), "GuideBody.");
}
