use crate::dom::Document;
use crate::model::Locator;

use super::extract::title_node;

/// Whether the target list is fully rendered: the container exists, holds at
/// least one item, and every item already carries non-empty title text.
///
/// Absence of any part of that structure means "not yet ready", never an
/// error — the host streams content in over several rendering passes and the
/// probe is expected to see half-built trees. Read-only.
pub fn is_ready(doc: &Document, locator: &Locator) -> bool {
    let Some(container) = doc.find_by_class(&locator.container_class) else {
        return false;
    };
    let items: Vec<_> = doc
        .children(container)
        .iter()
        .copied()
        .filter(|c| doc.tag(*c) == locator.item_tag)
        .collect();
    if items.is_empty() {
        return false;
    }
    items.iter().all(|item| {
        title_node(doc, *item, locator)
            .map(|t| !doc.text(t).trim().is_empty())
            .unwrap_or(false)
    })
}
