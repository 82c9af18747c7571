use std::fmt;

/// Handle into a [`Document`] arena. Copyable and stable for the lifetime
/// of the document — detaching a node never invalidates its id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug)]
struct Node {
    tag: String,
    class: Option<String>,
    text: String,
    visible: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    fn new(tag: &str, class: Option<&str>) -> Self {
        Node {
            tag: tag.to_string(),
            class: class.map(str::to_string),
            text: String::new(),
            visible: true,
            parent: None,
            children: Vec::new(),
        }
    }
}

/// An element tree owned by the hosting application.
///
/// Detaching a node removes it from its parent's child list but keeps it
/// alive, so a caller holding `NodeId`s can relocate nodes between parents
/// without ever copying them. Released slots (see [`Document::remove_subtree`])
/// are reused by later creates, so repeated view teardowns do not grow the
/// arena.
#[derive(Debug)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
    free: Vec<usize>,
}

impl Document {
    /// New document with a single `body` root.
    pub fn new() -> Self {
        let mut doc = Document {
            nodes: Vec::new(),
            root: NodeId(0),
            free: Vec::new(),
        };
        doc.root = doc.create("body");
        doc
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = node;
                NodeId(slot)
            }
            None => {
                let id = NodeId(self.nodes.len());
                self.nodes.push(node);
                id
            }
        }
    }

    pub fn create(&mut self, tag: &str) -> NodeId {
        self.alloc(Node::new(tag, None))
    }

    pub fn create_with_class(&mut self, tag: &str, class: &str) -> NodeId {
        self.alloc(Node::new(tag, Some(class)))
    }

    /// Number of live nodes (allocated and not released).
    pub fn node_count(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    pub fn tag(&self, id: NodeId) -> &str {
        &self.nodes[id.0].tag
    }

    pub fn class(&self, id: NodeId) -> Option<&str> {
        self.nodes[id.0].class.as_deref()
    }

    pub fn text(&self, id: NodeId) -> &str {
        &self.nodes[id.0].text
    }

    pub fn set_text(&mut self, id: NodeId, text: &str) {
        self.nodes[id.0].text = text.to_string();
    }

    pub fn is_visible(&self, id: NodeId) -> bool {
        self.nodes[id.0].visible
    }

    pub fn set_visible(&mut self, id: NodeId, visible: bool) {
        self.nodes[id.0].visible = visible;
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Append `child` as the last child of `parent`, detaching it from its
    /// current parent first. Relocation is a transfer of ownership, never a
    /// copy — the id stays the same.
    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Remove `id` from its parent's child list. The node stays alive.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent {
            self.nodes[parent.0].children.retain(|c| *c != id);
            self.nodes[id.0].parent = None;
        }
    }

    /// Detach every child of `id`, returning them in former document order.
    pub fn detach_children(&mut self, id: NodeId) -> Vec<NodeId> {
        let children = std::mem::take(&mut self.nodes[id.0].children);
        for child in &children {
            self.nodes[child.0].parent = None;
        }
        children
    }

    /// Detach `id` and release it and its whole subtree back to the arena.
    ///
    /// Ids of released nodes are dead and must not be used again; their
    /// slots will be handed out by later creates. The root cannot be
    /// removed.
    pub fn remove_subtree(&mut self, id: NodeId) {
        if id == self.root {
            return;
        }
        self.detach(id);
        let mut stack = vec![id];
        while let Some(node) = stack.pop() {
            stack.extend(std::mem::take(&mut self.nodes[node.0].children));
            self.nodes[node.0] = Node::new("", None);
            self.free.push(node.0);
        }
    }

    /// Depth-first search from the root for the first node with `class`.
    pub fn find_by_class(&self, class: &str) -> Option<NodeId> {
        self.find_by_class_under(self.root, class)
    }

    fn find_by_class_under(&self, id: NodeId, class: &str) -> Option<NodeId> {
        if self.class(id) == Some(class) {
            return Some(id);
        }
        for child in self.children(id) {
            if let Some(found) = self.find_by_class_under(*child, class) {
                return Some(found);
            }
        }
        None
    }

    /// First direct child of `id` with the given tag.
    pub fn first_child_by_tag(&self, id: NodeId, tag: &str) -> Option<NodeId> {
        self.children(id).iter().copied().find(|c| self.tag(*c) == tag)
    }
}

impl Default for Document {
    fn default() -> Self {
        Document::new()
    }
}
