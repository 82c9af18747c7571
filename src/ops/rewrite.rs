use std::collections::HashMap;

use indexmap::IndexMap;

use crate::dom::{Document, NodeId};
use crate::model::{Group, Locator};

pub const SECTION_CLASS: &str = "shelve-section";
pub const HEADER_CLASS: &str = "shelve-header";
pub const BODY_CLASS: &str = "shelve-body";

/// Registry of the collapsible sections built by the last rewrite, keyed by
/// header node. Activation toggles only the matching body's visibility —
/// a local display flip with no effect on the data model or other sections.
#[derive(Debug, Default)]
pub struct Sections {
    by_header: HashMap<NodeId, NodeId>,
}

impl Sections {
    pub fn len(&self) -> usize {
        self.by_header.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_header.is_empty()
    }

    pub fn is_header(&self, id: NodeId) -> bool {
        self.by_header.contains_key(&id)
    }

    pub fn body_of(&self, header: NodeId) -> Option<NodeId> {
        self.by_header.get(&header).copied()
    }

    /// Handle an activation on `id`. Returns false when `id` is not a
    /// registered header, so callers can forward arbitrary clicks.
    pub fn activate(&self, doc: &mut Document, id: NodeId) -> bool {
        let Some(body) = self.body_of(id) else {
            return false;
        };
        let shown = doc.is_visible(body);
        doc.set_visible(body, !shown);
        true
    }
}

/// Rebuild the container from the grouped records.
///
/// Collapsible sections (groups of two or more) come first, in grouping
/// iteration order; orphans follow in their original extraction order with
/// their titles untouched. Every item node is relocated, never cloned, so
/// the same `NodeId` survives the regroup.
pub fn rewrite(
    doc: &mut Document,
    container: NodeId,
    groups: &IndexMap<String, Group>,
    locator: &Locator,
    delimiter: &str,
) -> Sections {
    // Item nodes stay alive through the records; clearing only detaches.
    doc.detach_children(container);

    let mut sections = Sections::default();
    for group in groups.values().filter(|g| g.is_collapsible()) {
        let section = doc.create_with_class("section", SECTION_CLASS);
        let header = doc.create_with_class("header", HEADER_CLASS);
        doc.set_text(header, &group.key.to_uppercase());
        let body = doc.create_with_class("div", BODY_CLASS);
        doc.set_visible(body, false);

        for member in &group.members {
            strip_title_prefix(doc, member.node, &member.title, locator, delimiter);
            doc.append(body, member.node);
        }
        doc.append(section, header);
        doc.append(section, body);
        doc.append(container, section);
        sections.by_header.insert(header, body);
    }

    for group in groups.values().filter(|g| !g.is_collapsible()) {
        for member in &group.members {
            doc.append(container, member.node);
        }
    }
    sections
}

/// Displayed title becomes the suffix after the first delimiter. A member
/// title with no delimiter (a title equal to its own key) is left alone.
fn strip_title_prefix(
    doc: &mut Document,
    item: NodeId,
    title: &str,
    locator: &Locator,
    delimiter: &str,
) {
    let Some((_, suffix)) = title.split_once(delimiter) else {
        return;
    };
    if let Some(node) = super::extract::title_node(doc, item, locator) {
        doc.set_text(node, suffix);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::extract::{extract, title_node};
    use crate::ops::group::group_records;

    fn build_list(titles: &[&str]) -> (Document, NodeId) {
        let mut doc = Document::new();
        let container = doc.create_with_class("div", "item-list");
        doc.append(doc.root(), container);
        for title in titles {
            let item = doc.create("article");
            let heading = doc.create("h3");
            let link = doc.create("a");
            let span = doc.create("span");
            doc.set_text(span, title);
            doc.append(link, span);
            doc.append(heading, link);
            doc.append(item, heading);
            doc.append(container, item);
        }
        (doc, container)
    }

    fn run_pipeline(titles: &[&str]) -> (Document, NodeId, Sections) {
        let (mut doc, container) = build_list(titles);
        let locator = Locator::default();
        let records = extract(&doc, container, &locator);
        let groups = group_records(records, "-");
        let sections = rewrite(&mut doc, container, &groups, &locator, "-");
        (doc, container, sections)
    }

    fn displayed_title(doc: &Document, item: NodeId) -> String {
        let node = title_node(doc, item, &Locator::default()).unwrap();
        doc.text(node).to_string()
    }

    #[test]
    fn sections_precede_orphans() {
        let (doc, container, sections) = run_pipeline(&[
            "alpha-one",
            "alpha-two",
            "beta-solo",
            "gamma-x",
            "gamma-y",
            "gamma-z",
        ]);
        assert_eq!(sections.len(), 2);

        let children = doc.children(container);
        assert_eq!(children.len(), 3);
        assert_eq!(doc.class(children[0]), Some(SECTION_CLASS));
        assert_eq!(doc.class(children[1]), Some(SECTION_CLASS));
        // The orphan comes last, title unchanged.
        assert_eq!(doc.tag(children[2]), "article");
        assert_eq!(displayed_title(&doc, children[2]), "beta-solo");

        let alpha_header = doc.first_child_by_tag(children[0], "header").unwrap();
        let gamma_header = doc.first_child_by_tag(children[1], "header").unwrap();
        assert_eq!(doc.text(alpha_header), "ALPHA");
        assert_eq!(doc.text(gamma_header), "GAMMA");
    }

    #[test]
    fn members_are_stripped_and_ordered() {
        let (doc, container, _) = run_pipeline(&["gamma-x", "gamma-y", "gamma-z", "solo"]);
        let section = doc.children(container)[0];
        let body = doc.first_child_by_tag(section, "div").unwrap();
        let titles: Vec<_> = doc
            .children(body)
            .iter()
            .map(|m| displayed_title(&doc, *m))
            .collect();
        assert_eq!(titles, vec!["x", "y", "z"]);
    }

    #[test]
    fn suffix_keeps_later_delimiters() {
        let (doc, container, _) = run_pipeline(&["alpha-one-two", "alpha-three"]);
        let section = doc.children(container)[0];
        let body = doc.first_child_by_tag(section, "div").unwrap();
        assert_eq!(displayed_title(&doc, doc.children(body)[0]), "one-two");
    }

    #[test]
    fn member_without_delimiter_keeps_its_title() {
        // "alpha" shares a key with "alpha-one" but has nothing to strip.
        let (doc, container, _) = run_pipeline(&["alpha", "alpha-one"]);
        let section = doc.children(container)[0];
        let body = doc.first_child_by_tag(section, "div").unwrap();
        assert_eq!(displayed_title(&doc, doc.children(body)[0]), "alpha");
        assert_eq!(displayed_title(&doc, doc.children(body)[1]), "one");
    }

    #[test]
    fn bodies_start_collapsed_and_toggle_idempotently() {
        let (mut doc, container, sections) = run_pipeline(&["alpha-one", "alpha-two"]);
        let section = doc.children(container)[0];
        let header = doc.first_child_by_tag(section, "header").unwrap();
        let body = sections.body_of(header).unwrap();

        assert!(!doc.is_visible(body));
        assert!(sections.activate(&mut doc, header));
        assert!(doc.is_visible(body));
        assert!(sections.activate(&mut doc, header));
        assert!(!doc.is_visible(body));
        // An even number of activations always lands back where it started.
        for _ in 0..6 {
            sections.activate(&mut doc, header);
        }
        assert!(!doc.is_visible(body));
    }

    #[test]
    fn activation_on_non_header_is_ignored() {
        let (mut doc, container, sections) = run_pipeline(&["alpha-one", "alpha-two"]);
        assert!(!sections.activate(&mut doc, container));
    }

    #[test]
    fn item_nodes_survive_regrouping_by_identity() {
        let (mut doc, container) = build_list(&["alpha-one", "alpha-two", "solo"]);
        let locator = Locator::default();
        let before: Vec<_> = doc.children(container).to_vec();
        let records = extract(&doc, container, &locator);
        let groups = group_records(records, "-");
        rewrite(&mut doc, container, &groups, &locator, "-");

        let section = doc.children(container)[0];
        let body = doc.first_child_by_tag(section, "div").unwrap();
        assert_eq!(doc.children(body), &before[0..2]);
        assert_eq!(doc.children(container)[1], before[2]);
    }

    #[test]
    fn empty_container_rewrites_to_nothing() {
        let (mut doc, container) = build_list(&[]);
        let locator = Locator::default();
        let records = extract(&doc, container, &locator);
        let groups = group_records(records, "-");
        let sections = rewrite(&mut doc, container, &groups, &locator, "-");
        assert!(sections.is_empty());
        assert!(doc.children(container).is_empty());
    }
}
