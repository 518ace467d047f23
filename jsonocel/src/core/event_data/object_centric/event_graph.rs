//! Event-object relation graph

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use tracing::debug;

use crate::core::event_data::object_centric::{ocel_struct::EventId, table::EventTable};

///
/// Directed graph over events
///
/// Contains one node per event and an edge `a -> b` if `b` is the next event
/// (in table order, i.e., chronologically) that shares an object with `a`.
///
#[derive(Debug, Clone, Default)]
pub struct EventGraph {
    graph: DiGraph<EventId, ()>,
    nodes: HashMap<EventId, NodeIndex>,
}

impl EventGraph {
    /// Build the graph from the object columns of an [`EventTable`]
    pub fn from_table(table: &EventTable) -> Self {
        let mut graph = DiGraph::with_capacity(table.len(), table.len());
        let mut nodes = HashMap::with_capacity(table.len());
        let mut last_event_of_object: HashMap<&str, NodeIndex> = HashMap::new();
        for row in table.rows() {
            let node = graph.add_node(row.event_id);
            nodes.insert(row.event_id, node);
            for oid in row.objects.iter().flatten() {
                if let Some(prev) = last_event_of_object.insert(oid.as_str(), node) {
                    // Objects listed twice for the same event do not create self-loops
                    if prev != node {
                        graph.update_edge(prev, node, ());
                    }
                }
            }
        }
        debug!(
            "Built event graph with {} nodes and {} edges",
            graph.node_count(),
            graph.edge_count()
        );
        Self { graph, nodes }
    }

    /// Number of events (nodes)
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Check whether an edge `from -> to` exists
    pub fn contains_edge(&self, from: EventId, to: EventId) -> bool {
        match (self.nodes.get(&from), self.nodes.get(&to)) {
            (Some(a), Some(b)) => self.graph.contains_edge(*a, *b),
            _ => false,
        }
    }

    fn neighbors(&self, id: EventId, dir: Direction) -> Vec<EventId> {
        let mut res: Vec<EventId> = self
            .nodes
            .get(&id)
            .map(|n| {
                self.graph
                    .neighbors_directed(*n, dir)
                    .map(|m| self.graph[m])
                    .collect()
            })
            .unwrap_or_default();
        res.sort();
        res
    }

    /// Direct successors of an event (sorted by id)
    pub fn successors(&self, id: EventId) -> Vec<EventId> {
        self.neighbors(id, Direction::Outgoing)
    }

    /// Direct predecessors of an event (sorted by id)
    pub fn predecessors(&self, id: EventId) -> Vec<EventId> {
        self.neighbors(id, Direction::Incoming)
    }

    /// All edges as `(from, to)` pairs
    pub fn edges(&self) -> Vec<(EventId, EventId)> {
        self.graph
            .raw_edges()
            .iter()
            .map(|e| (self.graph[e.source()], self.graph[e.target()]))
            .collect()
    }

    /// Underlying [`petgraph`] graph (node weights are [`EventId`]s)
    pub fn graph(&self) -> &DiGraph<EventId, ()> {
        &self.graph
    }
}
