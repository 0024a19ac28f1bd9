use crate::error::LinearizeError;
use crate::flow::{FlowDefinition, FlowNode};
use ahash::{AHashMap, AHashSet};
use tracing::debug;

/// Walks a flow graph from its root into an ordered node sequence.
///
/// The root is the first node, in definition order, that no edge targets.
/// From there the walk follows each node's single outgoing connection.
/// Connections to nodes that no longer exist end the walk.
pub struct Linearizer<'a> {
    flow: &'a FlowDefinition,
    nodes: AHashMap<&'a str, &'a FlowNode>,
    // Distinct outgoing targets per source, restricted to nodes that still exist.
    outgoing: AHashMap<&'a str, Vec<&'a str>>,
}

impl<'a> Linearizer<'a> {
    pub fn new(flow: &'a FlowDefinition) -> Self {
        let nodes: AHashMap<&str, &FlowNode> =
            flow.nodes.iter().map(|n| (n.id.as_str(), n)).collect();

        let mut outgoing: AHashMap<&str, Vec<&str>> = AHashMap::new();
        for edge in &flow.edges {
            if nodes.contains_key(edge.target.as_str()) {
                let targets = outgoing.entry(edge.source.as_str()).or_default();
                // Parallel edges between the same pair count once.
                if !targets.contains(&edge.target.as_str()) {
                    targets.push(edge.target.as_str());
                }
            }
        }

        Self {
            flow,
            nodes,
            outgoing,
        }
    }

    /// The root node: the first node no edge points at.
    pub fn root(&self) -> Option<&'a FlowNode> {
        let targeted: AHashSet<&str> = self.flow.edges.iter().map(|e| e.target.as_str()).collect();
        self.flow
            .nodes
            .iter()
            .find(|n| !targeted.contains(n.id.as_str()))
    }

    pub fn walk(&self) -> Result<Vec<&'a FlowNode>, LinearizeError> {
        let root = self.root().ok_or(LinearizeError::NoRootNode)?;

        let mut ordered = Vec::new();
        let mut visited: AHashSet<&str> = AHashSet::new();
        let mut current = root;

        loop {
            visited.insert(current.id.as_str());
            ordered.push(current);

            let next = match self.outgoing.get(current.id.as_str()).map(Vec::as_slice) {
                None | Some([]) => break,
                Some([target]) => *target,
                Some(targets) => {
                    return Err(LinearizeError::Branching {
                        node_id: current.id.clone(),
                        count: targets.len(),
                    });
                }
            };

            if visited.contains(next) {
                return Err(LinearizeError::Cycle {
                    node_id: next.to_string(),
                });
            }

            match self.nodes.get(next) {
                Some(&node) => current = node,
                None => break,
            }
        }

        debug!(
            root = %root.id,
            length = ordered.len(),
            "linearized flow"
        );
        Ok(ordered)
    }
}

/// Shorthand for `Linearizer::new(flow).walk()`.
pub fn linearize(flow: &FlowDefinition) -> Result<Vec<&FlowNode>, LinearizeError> {
    Linearizer::new(flow).walk()
}
