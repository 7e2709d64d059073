//! Tree extraction: walks the live node graph for one display and produces
//! either a [`UiNode`] snapshot tree or an attributed XML string.
//!
//! Every child handle acquired for traversal is wrapped in a [`NodeGuard`]
//! and therefore released right after its subtree is visited, on all exit
//! paths. A node observed mid-mutation may serialize an inconsistent
//! attribute combination; that is accepted.

use std::fmt::Write as _;

use crate::platform::{NodeGuard, NodeId, UiGraph, DEFAULT_DISPLAY};

use super::node::UiNode;

/// Resolve the root node used for snapshots and searches on `display_id`:
/// the first window root on the display, falling back to the active window
/// for the default display when the window set is empty.
pub(crate) fn display_root<'g>(graph: &'g dyn UiGraph, display_id: i32) -> Option<NodeGuard<'g>> {
    let mut roots: Vec<NodeGuard<'g>> = graph
        .window_roots(display_id)
        .into_iter()
        .map(|id| NodeGuard::new(graph, id))
        .collect();

    if roots.is_empty() {
        if display_id == DEFAULT_DISPLAY {
            return graph
                .active_window_root()
                .map(|id| NodeGuard::new(graph, id));
        }
        return None;
    }

    // Remaining roots are released as their guards drop.
    Some(roots.swap_remove(0))
}

/// Snapshot the display's UI tree as nested [`UiNode`] values.
pub fn json_hierarchy(graph: &dyn UiGraph, display_id: i32) -> Option<UiNode> {
    let root = display_root(graph, display_id)?;
    Some(snapshot_node(graph, root.id()))
}

fn snapshot_node(graph: &dyn UiGraph, node: NodeId) -> UiNode {
    let bounds = graph.bounds_in_screen(node);

    let mut children = Vec::new();
    for i in 0..graph.child_count(node) {
        if let Some(child) = graph.child(node, i) {
            let guard = NodeGuard::new(graph, child);
            children.push(snapshot_node(graph, guard.id()));
        }
    }

    UiNode {
        text: graph.text(node),
        resource_id: graph.resource_id(node),
        class_name: graph.class_name(node),
        package_name: graph.package_name(node),
        content_desc: graph.content_description(node),
        bounds,
        visible: graph.is_visible(node),
        checkable: graph.is_checkable(node),
        checked: graph.is_checked(node),
        clickable: graph.is_clickable(node),
        enabled: graph.is_enabled(node),
        focusable: graph.is_focusable(node),
        focused: graph.is_focused(node),
        scrollable: graph.is_scrollable(node),
        long_clickable: graph.is_long_clickable(node),
        password: graph.is_password(node),
        selected: graph.is_selected(node),
        drawing_order: graph.drawing_order(node),
        children,
    }
}

/// Render the display's UI tree as attributed XML markup. Serializes every
/// window root on the display; an empty window set yields a distinguishable
/// error payload instead of an empty tree.
pub fn xml_hierarchy(graph: &dyn UiGraph, display_id: i32) -> String {
    let roots: Vec<NodeGuard<'_>> = graph
        .window_roots(display_id)
        .into_iter()
        .map(|id| NodeGuard::new(graph, id))
        .collect();

    if roots.is_empty() {
        return format!("<error>No windows found on display {display_id}</error>");
    }

    let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\" ?>\n");
    let _ = writeln!(out, "<hierarchy displayId=\"{display_id}\">");
    for root in &roots {
        serialize_node(graph, root.id(), 0, &mut out);
    }
    out.push_str("</hierarchy>");
    out
}

fn serialize_node(graph: &dyn UiGraph, node: NodeId, index: usize, out: &mut String) {
    let bounds = graph.bounds_in_screen(node);
    let element = graph.class_name(node).unwrap_or_else(|| "node".to_string());

    let _ = write!(out, "<{element} ");
    push_attr(out, "index", &index.to_string());
    push_attr(
        out,
        "bounds",
        &format!(
            "{},{},{},{}",
            bounds.left, bounds.top, bounds.right, bounds.bottom
        ),
    );
    push_attr(out, "text", graph.text(node).as_deref().unwrap_or(""));
    push_attr(
        out,
        "resource-id",
        graph.resource_id(node).as_deref().unwrap_or(""),
    );
    push_attr(
        out,
        "content-desc",
        graph.content_description(node).as_deref().unwrap_or(""),
    );
    push_attr(out, "class", graph.class_name(node).as_deref().unwrap_or(""));
    push_attr(out, "visible", &graph.is_visible(node).to_string());
    push_attr(out, "checkable", &graph.is_checkable(node).to_string());
    push_attr(out, "checked", &graph.is_checked(node).to_string());
    push_attr(out, "selected", &graph.is_selected(node).to_string());
    push_attr(out, "enabled", &graph.is_enabled(node).to_string());
    push_attr(out, "clickable", &graph.is_clickable(node).to_string());
    push_attr(out, "focusable", &graph.is_focusable(node).to_string());
    push_attr(out, "focused", &graph.is_focused(node).to_string());
    push_attr(out, "scrollable", &graph.is_scrollable(node).to_string());
    push_attr(
        out,
        "long-clickable",
        &graph.is_long_clickable(node).to_string(),
    );
    push_attr(out, "password", &graph.is_password(node).to_string());
    push_attr(
        out,
        "drawing-order",
        &graph.drawing_order(node).to_string(),
    );
    push_attr(
        out,
        "package",
        graph.package_name(node).as_deref().unwrap_or(""),
    );

    let child_count = graph.child_count(node);
    if child_count > 0 {
        out.push_str(">\n");
        for i in 0..child_count {
            if let Some(child) = graph.child(node, i) {
                let guard = NodeGuard::new(graph, child);
                serialize_node(graph, guard.id(), i, out);
            }
        }
        let _ = writeln!(out, "</{element}>");
    } else {
        out.push_str("/>\n");
    }
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    let _ = write!(out, "{name}=\"{}\" ", escape_xml(value));
}

/// Escape the five XML metacharacters in an attribute value.
fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_xml_metacharacters() {
        assert_eq!(
            escape_xml(r#"a & b < c > d "e" 'f'"#),
            "a &amp; b &lt; c &gt; d &quot;e&quot; &apos;f&apos;"
        );
    }

    #[test]
    fn test_escape_xml_passthrough() {
        assert_eq!(escape_xml("Send 发送 ok"), "Send 发送 ok");
    }
}
