//! Render-time unit for one page.

use super::component::Component;
use super::memo::ComponentMemo;
use crate::page::PageData;
use crate::payload::Payload;
use crate::transforms::AssetMap;
use crate::tree::Node;
use std::rc::Rc;

/// A payload loaded for rendering. The tree and assets are shared so conversions can be
/// memoized across renders.
#[derive(Debug, Clone)]
pub struct LoadedPage {
    pub tree: Rc<Node>,
    pub assets: Rc<AssetMap>,
    pub page: Rc<PageData>,
    pub template: Option<String>,
}

impl From<Payload> for LoadedPage {
    fn from(payload: Payload) -> Self {
        Self {
            tree: Rc::new(payload.tree),
            assets: Rc::new(payload.assets),
            page: Rc::new(payload.page),
            template: payload.template,
        }
    }
}

/// What templates can read while rendering a page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageContext {
    pub page: Rc<PageData>,
    pub pages: Option<Rc<PageData>>,
}

#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub template: Option<String>,
    pub content: Rc<Component>,
    pub context: PageContext,
}

pub fn render_page(
    loaded: &LoadedPage,
    pages: Option<Rc<PageData>>,
    memo: &mut ComponentMemo,
) -> RenderedPage {
    RenderedPage {
        template: loaded.template.clone(),
        content: memo.get_or_convert(&loaded.tree, &loaded.assets),
        context: PageContext {
            page: Rc::clone(&loaded.page),
            pages,
        },
    }
}
