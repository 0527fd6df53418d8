//! Node predicates and semantics-tree search.
//!
//! Matchers mirror the query surface scenario scripts use against a live UI
//! tree: exact or substring text, action flags, role, and conjunction. Text
//! matches against either the node's text or its editable value, mirroring
//! how merged semantics expose field contents.

use crate::element::SemanticsNode;

/// A predicate over a single [`SemanticsNode`].
#[derive(Debug, Clone, PartialEq)]
pub enum NodeMatcher {
    /// Match the node's text or editable value, exactly or by substring.
    Text {
        /// The text to look for.
        value: String,
        /// When true, a containment match suffices; otherwise exact equality.
        substring: bool,
    },
    /// Match nodes that accept tap input.
    Clickable,
    /// Match nodes that accept text input.
    Editable,
    /// Match nodes with the given semantic role.
    Role(String),
    /// Match nodes accepted by every inner matcher.
    All(Vec<NodeMatcher>),
}

impl NodeMatcher {
    /// Exact text match.
    pub fn text(value: impl Into<String>) -> Self {
        NodeMatcher::Text {
            value: value.into(),
            substring: false,
        }
    }

    /// Substring text match.
    pub fn text_substring(value: impl Into<String>) -> Self {
        NodeMatcher::Text {
            value: value.into(),
            substring: true,
        }
    }

    /// Match nodes that accept tap input.
    pub fn clickable() -> Self {
        NodeMatcher::Clickable
    }

    /// Match nodes that accept text input.
    pub fn editable() -> Self {
        NodeMatcher::Editable
    }

    /// Match nodes with the given semantic role.
    pub fn role(value: impl Into<String>) -> Self {
        NodeMatcher::Role(value.into())
    }

    /// Conjunction: both this matcher and `other` must accept the node.
    pub fn and(self, other: NodeMatcher) -> Self {
        match self {
            NodeMatcher::All(mut inner) => {
                inner.push(other);
                NodeMatcher::All(inner)
            }
            first => NodeMatcher::All(vec![first, other]),
        }
    }

    /// True when this matcher accepts the node.
    pub fn matches(&self, node: &SemanticsNode) -> bool {
        match self {
            NodeMatcher::Text { value, substring } => {
                text_matches(node.text.as_deref(), value, *substring)
                    || text_matches(node.value.as_deref(), value, *substring)
            }
            NodeMatcher::Clickable => node.clickable,
            NodeMatcher::Editable => node.editable,
            NodeMatcher::Role(role) => node.role.as_deref() == Some(role.as_str()),
            NodeMatcher::All(inner) => inner.iter().all(|m| m.matches(node)),
        }
    }

    /// A short human-readable description, used in failure messages.
    pub fn describe(&self) -> String {
        match self {
            NodeMatcher::Text {
                value,
                substring: false,
            } => format!("text '{}'", value),
            NodeMatcher::Text {
                value,
                substring: true,
            } => format!("text containing '{}'", value),
            NodeMatcher::Clickable => "a clickable node".to_string(),
            NodeMatcher::Editable => "an editable node".to_string(),
            NodeMatcher::Role(role) => format!("role '{}'", role),
            NodeMatcher::All(inner) => inner
                .iter()
                .map(NodeMatcher::describe)
                .collect::<Vec<_>>()
                .join(" and "),
        }
    }
}

fn text_matches(candidate: Option<&str>, value: &str, substring: bool) -> bool {
    match candidate {
        Some(text) if substring => text.contains(value),
        Some(text) => text == value,
        None => false,
    }
}

/// Depth-first search collecting every node the matcher accepts, in
/// document order.
pub fn find_all(nodes: &[SemanticsNode], matcher: &NodeMatcher) -> Vec<SemanticsNode> {
    let mut result = Vec::new();
    collect(nodes, matcher, &mut result);
    result
}

/// The first node the matcher accepts, in document order.
pub fn find_first(nodes: &[SemanticsNode], matcher: &NodeMatcher) -> Option<SemanticsNode> {
    find_all(nodes, matcher).into_iter().next()
}

fn collect(nodes: &[SemanticsNode], matcher: &NodeMatcher, result: &mut Vec<SemanticsNode>) {
    for node in nodes {
        if matcher.matches(node) {
            result.push(node.clone());
        }
        collect(&node.children, matcher, result);
    }
}
