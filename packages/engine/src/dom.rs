//! Read-only helpers over the kuchiki DOM used by block import.

use kuchiki::traits::*;
use kuchiki::NodeRef;

/// Parse an HTML fragment inside a synthetic `<div>` and return that div.
///
/// Top-level nodes of the fragment are the children of the returned node.
pub fn parse_fragment(html: &str) -> Option<NodeRef> {
    let document = kuchiki::parse_html().one(format!("<div>{}</div>", html));
    document
        .select_first("body > div")
        .ok()
        .map(|root| root.as_node().clone())
}

/// Lowercase tag name of an element node
pub fn tag_name(node: &NodeRef) -> Option<&str> {
    node.as_element().map(|element| &*element.name.local)
}

pub fn has_tag(node: &NodeRef, tags: &[&str]) -> bool {
    tag_name(node).map_or(false, |tag| tags.contains(&tag))
}

/// Serialized markup of the node's children
pub fn inner_html(node: &NodeRef) -> String {
    node.children().map(|child| child.to_string()).collect()
}

pub fn attribute(node: &NodeRef, name: &str) -> Option<String> {
    node.as_element()
        .and_then(|element| element.attributes.borrow().get(name).map(str::to_string))
}

/// First descendant element with the given tag
pub fn first_descendant(node: &NodeRef, tag: &str) -> Option<NodeRef> {
    node.descendants()
        .find(|candidate| tag_name(candidate) == Some(tag))
}

/// All descendant elements with the given tag, in document order
pub fn descendants_with_tag(node: &NodeRef, tag: &str) -> Vec<NodeRef> {
    node.descendants()
        .filter(|candidate| tag_name(candidate) == Some(tag))
        .collect()
}

/// Child elements with one of the given tags
pub fn children_with_tags(node: &NodeRef, tags: &[&str]) -> Vec<NodeRef> {
    node.children().filter(|child| has_tag(child, tags)).collect()
}

/// True for text nodes holding only whitespace
pub fn is_blank_text(node: &NodeRef) -> bool {
    node.as_text()
        .map_or(false, |text| text.borrow().trim().is_empty())
}

/// True when the node's text content has something besides whitespace
pub fn has_meaningful_text(node: &NodeRef) -> bool {
    !node.text_contents().trim().is_empty()
}
