//! Focused-editable-field text injection.

use crate::platform::{NodeGuard, NodeId, UiGraph};

/// Find the first focused, editable node across the display's windows and
/// replace its text. Reports `false` when no such node exists or the
/// platform rejects the action.
pub fn set_focused_text(graph: &dyn UiGraph, display_id: i32, text: &str) -> bool {
    let roots: Vec<NodeGuard<'_>> = graph
        .window_roots(display_id)
        .into_iter()
        .map(|id| NodeGuard::new(graph, id))
        .collect();

    for root in &roots {
        if let Some(target) = find_focused_editable(graph, root.id()) {
            return graph.set_text(target.id(), text);
        }
    }
    false
}

/// Clear the focused editable field. Clearing is setting empty text.
pub fn clear_focused_text(graph: &dyn UiGraph, display_id: i32) -> bool {
    set_focused_text(graph, display_id, "")
}

fn find_focused_editable<'g>(graph: &'g dyn UiGraph, node: NodeId) -> Option<NodeGuard<'g>> {
    if graph.is_focused(node) && graph.is_editable(node) {
        return Some(NodeGuard::new(graph, graph.acquire(node)));
    }

    for i in 0..graph.child_count(node) {
        if let Some(child) = graph.child(node, i) {
            let guard = NodeGuard::new(graph, child);
            if let Some(found) = find_focused_editable(graph, guard.id()) {
                return Some(found);
            }
        }
    }
    None
}
