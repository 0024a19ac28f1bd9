use super::definition::{FlowDefinition, FlowEdge, FlowNode, NodeData, NodeKind, Position};
use ahash::AHashSet;
use tracing::debug;

/// Id of the trigger node every editor session starts with. It can never be removed.
pub const SEED_TRIGGER_ID: &str = "1";
/// Id of the reaction node every editor session starts with.
pub const SEED_ACTION_ID: &str = "2";

/// An incremental node update reported by the graph widget.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeChange {
    Position { id: String, position: Position },
    Select { id: String, selected: bool },
    Remove { id: String },
}

/// An incremental edge update reported by the graph widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeChange {
    Select { id: String, selected: bool },
    Remove { id: String },
}

/// Holds the graph of one editor session.
///
/// The store applies user gestures as they arrive and does not check the
/// shape of the resulting graph; that is the compiler's job. The only rule
/// it enforces is that the seed trigger survives.
#[derive(Debug, Clone)]
pub struct FlowStore {
    flow: FlowDefinition,
    selected_nodes: AHashSet<String>,
    selected_edges: AHashSet<String>,
    next_id: u64,
}

impl FlowStore {
    /// A trigger and an action, already linked.
    pub fn seeded() -> Self {
        let flow = FlowDefinition {
            nodes: vec![
                FlowNode::new(SEED_TRIGGER_ID, NodeKind::Trigger, NodeData::default()).at(300.0, 150.0),
                FlowNode::new(SEED_ACTION_ID, NodeKind::Action, NodeData::default()).at(350.0, 350.0),
            ],
            edges: vec![FlowEdge::between(SEED_TRIGGER_ID, SEED_ACTION_ID)],
        };
        Self::from_definition(flow)
    }

    /// Wraps an existing graph. Generated ids continue after the largest numeric id present.
    pub fn from_definition(flow: FlowDefinition) -> Self {
        let next_id = flow
            .nodes
            .iter()
            .filter_map(|n| n.id.parse::<u64>().ok())
            .max()
            .map_or(1, |max| max + 1);
        Self {
            flow,
            selected_nodes: AHashSet::new(),
            selected_edges: AHashSet::new(),
            next_id,
        }
    }

    pub fn nodes(&self) -> &[FlowNode] {
        &self.flow.nodes
    }

    pub fn edges(&self) -> &[FlowEdge] {
        &self.flow.edges
    }

    pub fn definition(&self) -> &FlowDefinition {
        &self.flow
    }

    pub fn node(&self, id: &str) -> Option<&FlowNode> {
        self.flow.node(id)
    }

    pub fn is_node_selected(&self, id: &str) -> bool {
        self.selected_nodes.contains(id)
    }

    pub fn is_edge_selected(&self, id: &str) -> bool {
        self.selected_edges.contains(id)
    }

    fn fresh_id(&mut self) -> String {
        let id = self.next_id;
        self.next_id += 1;
        id.to_string()
    }

    /// A connect gesture that landed on a node.
    ///
    /// Returns `false` when the two nodes are already connected in that
    /// direction, whatever the existing edge is called.
    pub fn connect(&mut self, source: &str, target: &str) -> bool {
        let edge = FlowEdge::between(source, target);
        if self
            .flow
            .edges
            .iter()
            .any(|e| e.id == edge.id || (e.source == source && e.target == target))
        {
            return false;
        }
        debug!(source, target, "connecting nodes");
        self.flow.edges.push(edge);
        true
    }

    /// A connect gesture released on empty canvas.
    ///
    /// Drops a new, unconfigured action node at `position` and links it from
    /// `from` when the gesture started on a node. The new edge shares the
    /// node's id. Returns the id of the new node.
    pub fn connect_dangling(&mut self, from: Option<&str>, position: Position) -> String {
        let id = self.fresh_id();
        let mut node = FlowNode::new(id.clone(), NodeKind::Action, NodeData::default());
        node.position = position;
        self.flow.nodes.push(node);

        if let Some(source) = from {
            self.flow
                .edges
                .push(FlowEdge::new(id.clone(), source, id.clone()));
        }
        debug!(node_id = %id, from = ?from, "added node from dangling connection");
        id
    }

    /// Applies a batch of node changes.
    ///
    /// A batch that removes the seed trigger is dropped as a whole and
    /// `false` is returned.
    pub fn apply_node_changes(&mut self, changes: &[NodeChange]) -> bool {
        let removes_seed = changes
            .iter()
            .any(|c| matches!(c, NodeChange::Remove { id } if id == SEED_TRIGGER_ID));
        if removes_seed {
            debug!("ignoring node changes that would remove the seed trigger");
            return false;
        }

        for change in changes {
            match change {
                NodeChange::Position { id, position } => {
                    if let Some(node) = self.flow.nodes.iter_mut().find(|n| n.id == *id) {
                        node.position = *position;
                    }
                }
                NodeChange::Select { id, selected } => {
                    if *selected {
                        self.selected_nodes.insert(id.clone());
                    } else {
                        self.selected_nodes.remove(id);
                    }
                }
                NodeChange::Remove { id } => {
                    self.flow.nodes.retain(|n| n.id != *id);
                    self.selected_nodes.remove(id);
                }
            }
        }
        true
    }

    pub fn apply_edge_changes(&mut self, changes: &[EdgeChange]) {
        for change in changes {
            match change {
                EdgeChange::Select { id, selected } => {
                    if *selected {
                        self.selected_edges.insert(id.clone());
                    } else {
                        self.selected_edges.remove(id);
                    }
                }
                EdgeChange::Remove { id } => {
                    self.flow.edges.retain(|e| e.id != *id);
                    self.selected_edges.remove(id);
                }
            }
        }
    }

    /// Replaces the payload of a node. Returns `false` if the node is gone.
    pub fn update_data(&mut self, node_id: &str, data: NodeData) -> bool {
        match self.node_data_mut(node_id) {
            Some(slot) => {
                *slot = data;
                true
            }
            None => false,
        }
    }

    pub(crate) fn node_data_mut(&mut self, node_id: &str) -> Option<&mut NodeData> {
        self.flow
            .nodes
            .iter_mut()
            .find(|n| n.id == node_id)
            .map(|n| &mut n.data)
    }
}

impl Default for FlowStore {
    fn default() -> Self {
        Self::seeded()
    }
}
