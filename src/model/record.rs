use crate::dom::NodeId;

/// One extracted list item: the node that owns it in the host tree plus its
/// trimmed title text.
///
/// Records are short-lived — they are valid between one extraction and the
/// rewrite that follows it, and stale once the host tears the view down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRecord {
    pub node: NodeId,
    pub title: String,
}

/// A set of records sharing one derived key, in extraction order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub key: String,
    pub members: Vec<ItemRecord>,
}

impl Group {
    pub fn new(key: &str) -> Self {
        Group {
            key: key.to_string(),
            members: Vec::new(),
        }
    }

    /// A group folds into a collapsible section only when it has at least
    /// two members; a lone member is an orphan and stays inline.
    pub fn is_collapsible(&self) -> bool {
        self.members.len() >= 2
    }
}
