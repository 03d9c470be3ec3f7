//! Recursive tree walker.
//!
//! Visits every scalar string under a mapping and rewrites it through a
//! [`ReplacementPolicy`]. The walk never stops early: errors go to the sink
//! and traversal continues, so one pass reports every unresolved placeholder.

use super::error::ReplacementErrors;
use super::node::{Mapping, Node};
use super::policy::ReplacementPolicy;
use super::SecretMap;

/// Walk `node` in place. Returns the number of string fields visited.
pub fn walk<P: ReplacementPolicy + ?Sized>(
    node: &mut Mapping,
    policy: &P,
    secrets: &SecretMap,
    sink: &mut ReplacementErrors,
) -> usize {
    let mut visited = 0;
    for (key, value) in node.iter_mut() {
        visited += walk_value(key, value, policy, secrets, sink);
    }
    visited
}

fn walk_value<P: ReplacementPolicy + ?Sized>(
    key: &str,
    value: &mut Node,
    policy: &P,
    secrets: &SecretMap,
    sink: &mut ReplacementErrors,
) -> usize {
    match value {
        Node::Mapping(inner) => walk(inner, policy, secrets, sink),
        Node::Sequence(items) => items
            .iter_mut()
            .enumerate()
            .map(|(idx, item)| walk_value(&format!("{key}[{idx}]"), item, policy, secrets, sink))
            .sum(),
        Node::String(s) => {
            let resolution = policy.replace(key, s, secrets);
            sink.extend(resolution.errors);
            *value = resolution.value;
            1
        }
        Node::Bytes(_) | Node::Scalar(_) => 0,
    }
}
