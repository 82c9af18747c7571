use crate::dom::{Document, NodeId};
use crate::model::Locator;

pub const HOME: &str = "/home";
pub const LIBRARY: &str = "/library";

/// Demo catalog the simulated site streams in from its "backend".
const CATALOG: &[&str] = &[
    "intro-Welcome",
    "errors-Defining error types",
    "errors-The question mark operator",
    "Bonus interview",
    "async-Futures from scratch",
    "async-Pinning",
    "async-Executors and wakers",
    "macros-Declarative macros",
];

/// Ticks between arrival at the library route and the container mounting.
const MOUNT_DELAY: u32 = 2;

/// Items appended per tick once the container is mounted.
const STREAM_BATCH: usize = 2;

/// A stand-in for the hosting single-page app. It owns the view subtree,
/// re-renders on its own route changes, and — like the real thing — renders
/// the library list asynchronously: the container mounts a couple of ticks
/// after arrival, items stream in batch-wise, and each batch's title text
/// hydrates one tick after the item appears. The monitor gets no completion
/// signal for any of this; that is the point.
pub struct SiteHost {
    locator: Locator,
    view_root: NodeId,
    route: String,
    container: Option<NodeId>,
    mount_in: Option<u32>,
    pending: Vec<&'static str>,
    /// Title spans rendered last tick, still waiting for their text.
    unhydrated: Vec<(NodeId, &'static str)>,
}

impl SiteHost {
    pub fn new(doc: &mut Document, locator: &Locator, initial: &str) -> Self {
        let view_root = doc.create_with_class("div", "app");
        doc.append(doc.root(), view_root);
        let mut host = SiteHost {
            locator: locator.clone(),
            view_root,
            route: String::new(),
            container: None,
            mount_in: None,
            pending: Vec::new(),
            unhydrated: Vec::new(),
        };
        host.navigate_to(doc, initial);
        host
    }

    pub fn view_root(&self) -> NodeId {
        self.view_root
    }

    /// The site's own router. Tears the old view down and mounts the new
    /// one; a location change within the same route keeps the view.
    pub fn navigate_to(&mut self, doc: &mut Document, location: &str) {
        let route = location
            .split(['?', '#'])
            .next()
            .unwrap_or(location)
            .to_string();
        if route == self.route {
            return;
        }
        self.route = route;

        // Teardown releases the old view's nodes; holding on to them would
        // grow the arena on every depart/arrive cycle.
        for child in doc.detach_children(self.view_root) {
            doc.remove_subtree(child);
        }
        self.container = None;
        self.mount_in = None;
        self.pending.clear();
        self.unhydrated.clear();

        if self.route == LIBRARY {
            self.mount_in = Some(MOUNT_DELAY);
            self.pending = CATALOG.to_vec();
        } else {
            let note = doc.create("p");
            doc.set_text(note, "Nothing here. Press 2 to open the library.");
            doc.append(self.view_root, note);
        }
    }

    /// One tick of the site's asynchronous rendering.
    pub fn on_tick(&mut self, doc: &mut Document) {
        if let Some(ticks) = self.mount_in {
            if ticks > 0 {
                self.mount_in = Some(ticks - 1);
            } else {
                self.mount_in = None;
                let container = doc.create_with_class("div", &self.locator.container_class);
                doc.append(self.view_root, container);
                self.container = Some(container);
            }
            return;
        }

        for (span, title) in self.unhydrated.drain(..) {
            doc.set_text(span, title);
        }

        let Some(container) = self.container else {
            return;
        };
        let batch = self.pending.len().min(STREAM_BATCH);
        for title in self.pending.drain(..batch) {
            let item = doc.create(&self.locator.item_tag);
            let heading = doc.create(&self.locator.heading_tag);
            let link = doc.create(&self.locator.link_tag);
            let span = doc.create(&self.locator.title_tag);
            doc.append(link, span);
            doc.append(heading, link);
            doc.append(item, heading);
            doc.append(container, item);
            self.unhydrated.push((span, title));
        }
    }
}
