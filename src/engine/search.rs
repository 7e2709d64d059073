//! Scroll-until-found search: snapshot, match, pick the best scrollable
//! container, scroll one step, settle, retry up to a bound.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::platform::{NodeGuard, NodeId, UiGraph};

use super::extractor::display_root;
use super::geometry::Rect;

/// Settle delay after an accepted scroll, before the next snapshot.
const SCROLL_SETTLE: Duration = Duration::from_millis(700);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollDirection {
    Up,
    Down,
    Left,
    Right,
}

impl ScrollDirection {
    /// Down/right map to the platform's forward scroll action, up/left to
    /// backward.
    pub fn is_forward(self) -> bool {
        matches!(self, ScrollDirection::Down | ScrollDirection::Right)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollSearchRequest {
    #[serde(default)]
    pub display_id: i32,

    // Target matchers: exact equality on whichever fields are set.
    pub resource_id: Option<String>,
    pub class_name: Option<String>,
    pub text: Option<String>,
    pub description: Option<String>,

    // Container filter.
    pub container_resource_id: Option<String>,

    #[serde(default = "default_direction")]
    pub direction: ScrollDirection,
    #[serde(default = "default_max_retries")]
    pub max_retries: i32,
}

fn default_direction() -> ScrollDirection {
    ScrollDirection::Down
}

fn default_max_retries() -> i32 {
    5
}

impl ScrollSearchRequest {
    /// A search is well-formed only with at least one target matcher set.
    pub fn has_matcher(&self) -> bool {
        self.resource_id.is_some()
            || self.class_name.is_some()
            || self.text.is_some()
            || self.description.is_some()
    }
}

/// Result of a successful search. Transient, single-use.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FoundNodeInfo {
    pub text: Option<String>,
    pub resource_id: Option<String>,
    pub class_name: Option<String>,
    pub bounds: Rect,
    pub display_id: i32,
}

/// Run the scroll-search state machine. Terminal states: `Some` (found) or
/// `None` (display unresolvable, no container, scroll rejected, or retries
/// exhausted). Suspends only at the settle delay; all node handles acquired
/// within an attempt are released before the suspension.
pub async fn scroll_search(
    graph: &dyn UiGraph,
    req: &ScrollSearchRequest,
) -> Option<FoundNodeInfo> {
    for attempt in 0..req.max_retries {
        let root = display_root(graph, req.display_id)?;

        if let Some(found) = find_match(graph, root.id(), req) {
            tracing::debug!(attempt, "scroll-search matched target");
            return Some(found);
        }

        let container = {
            let mut best: Option<(NodeGuard<'_>, i64)> = None;
            collect_best_container(
                graph,
                root.id(),
                req.container_resource_id.as_deref(),
                &mut best,
            );
            best.map(|(guard, _)| guard)
        }?;

        let scrolled = graph.perform_scroll(container.id(), req.direction.is_forward());
        drop(container);
        drop(root);

        // A rejected scroll means the container is exhausted or not
        // scrollable right now; retrying cannot help.
        if !scrolled {
            return None;
        }

        tokio::time::sleep(SCROLL_SETTLE).await;
    }
    None
}

/// Depth-first exact match on `text` / `resourceId`, short-circuiting at
/// the first hit.
fn find_match(
    graph: &dyn UiGraph,
    node: NodeId,
    req: &ScrollSearchRequest,
) -> Option<FoundNodeInfo> {
    let text_hit = req
        .text
        .as_deref()
        .is_some_and(|t| graph.text(node).as_deref() == Some(t));
    let resource_hit = req
        .resource_id
        .as_deref()
        .is_some_and(|r| graph.resource_id(node).as_deref() == Some(r));

    if text_hit || resource_hit {
        return Some(FoundNodeInfo {
            text: graph.text(node),
            resource_id: graph.resource_id(node),
            class_name: graph.class_name(node),
            bounds: graph.bounds_in_screen(node),
            display_id: req.display_id,
        });
    }

    for i in 0..graph.child_count(node) {
        if let Some(child) = graph.child(node, i) {
            let guard = NodeGuard::new(graph, child);
            if let Some(found) = find_match(graph, guard.id(), req) {
                return Some(found);
            }
        }
    }
    None
}

/// Linear scan over scrollable nodes keeping the running best by bounds
/// area; only a strictly greater area replaces the incumbent, so ties
/// resolve first-encountered-wins. The winner's guard keeps one extra
/// handle alive past the traversal.
fn collect_best_container<'g>(
    graph: &'g dyn UiGraph,
    node: NodeId,
    container_resource_id: Option<&str>,
    best: &mut Option<(NodeGuard<'g>, i64)>,
) {
    let eligible = graph.is_scrollable(node)
        && container_resource_id
            .is_none_or(|rid| graph.resource_id(node).as_deref() == Some(rid));

    if eligible {
        let area = graph.bounds_in_screen(node).area();
        if best.as_ref().is_none_or(|(_, incumbent)| area > *incumbent) {
            *best = Some((NodeGuard::new(graph, graph.acquire(node)), area));
        }
    }

    for i in 0..graph.child_count(node) {
        if let Some(child) = graph.child(node, i) {
            let guard = NodeGuard::new(graph, child);
            collect_best_container(graph, guard.id(), container_resource_id, best);
        }
    }
}

/// Substring predicate over `text` and `contentDescription`, distinct by
/// design from the exact-equality matching used by [`scroll_search`].
pub fn contains_text(graph: &dyn UiGraph, node: NodeId, query: &str) -> bool {
    if graph.text(node).is_some_and(|t| t.contains(query))
        || graph
            .content_description(node)
            .is_some_and(|d| d.contains(query))
    {
        return true;
    }

    for i in 0..graph.child_count(node) {
        if let Some(child) = graph.child(node, i) {
            let guard = NodeGuard::new(graph, child);
            if contains_text(graph, guard.id(), query) {
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_to_scroll_action() {
        assert!(ScrollDirection::Down.is_forward());
        assert!(ScrollDirection::Right.is_forward());
        assert!(!ScrollDirection::Up.is_forward());
        assert!(!ScrollDirection::Left.is_forward());
    }

    #[test]
    fn test_request_defaults_and_matcher_check() {
        let req: ScrollSearchRequest =
            serde_json::from_str(r#"{"resourceId":"list_item_42"}"#).unwrap();
        assert_eq!(req.display_id, 0);
        assert_eq!(req.direction, ScrollDirection::Down);
        assert_eq!(req.max_retries, 5);
        assert!(req.has_matcher());

        let empty: ScrollSearchRequest = serde_json::from_str("{}").unwrap();
        assert!(!empty.has_matcher());
    }
}
