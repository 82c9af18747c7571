use tracing::debug;

use crate::dom::{Document, NodeId};
use crate::model::{ItemRecord, Locator};

/// The title-bearing element of one item, following the host's markup
/// shape: item → heading → link → title span.
pub fn title_node(doc: &Document, item: NodeId, locator: &Locator) -> Option<NodeId> {
    let heading = doc.first_child_by_tag(item, &locator.heading_tag)?;
    let link = doc.first_child_by_tag(heading, &locator.link_tag)?;
    doc.first_child_by_tag(link, &locator.title_tag)
}

/// Read the rendered list into records, one per item, in document order.
///
/// An item without a title element yields no record. Dropping it keeps the
/// batch moving; the gap is only worth a diagnostic.
pub fn extract(doc: &Document, container: NodeId, locator: &Locator) -> Vec<ItemRecord> {
    let mut records = Vec::new();
    for child in doc.children(container) {
        if doc.tag(*child) != locator.item_tag {
            continue;
        }
        match title_node(doc, *child, locator) {
            Some(title) => records.push(ItemRecord {
                node: *child,
                title: doc.text(title).trim().to_string(),
            }),
            None => debug!(node = %child, "item has no title element, skipping"),
        }
    }
    records
}
