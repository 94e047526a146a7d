//! Conversion memoized on input identity.

use super::component::Component;
use super::convert::convert;
use crate::transforms::AssetMap;
use crate::tree::Node;
use std::rc::Rc;

/// Remembers the last conversion and returns it again while the inputs are the same
/// allocations. Equal but distinct inputs are converted afresh.
#[derive(Debug, Default)]
pub struct ComponentMemo {
    last: Option<MemoEntry>,
}

#[derive(Debug)]
struct MemoEntry {
    tree: Rc<Node>,
    assets: Rc<AssetMap>,
    output: Rc<Component>,
}

impl ComponentMemo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_convert(&mut self, tree: &Rc<Node>, assets: &Rc<AssetMap>) -> Rc<Component> {
        if let Some(entry) = &self.last {
            if Rc::ptr_eq(&entry.tree, tree) && Rc::ptr_eq(&entry.assets, assets) {
                return Rc::clone(&entry.output);
            }
        }

        let output = Rc::new(
            convert(tree, assets).unwrap_or(Component::Fragment {
                children: Vec::new(),
            }),
        );
        self.last = Some(MemoEntry {
            tree: Rc::clone(tree),
            assets: Rc::clone(assets),
            output: Rc::clone(&output),
        });
        output
    }
}
