use crate::config::RenderConfig;
use crate::network::Edge;
use crate::sequence::{Alphabet, SymbolKind, SyllableColors};
use crate::{Error, Result};
use petgraph::Direction;
use petgraph::prelude::EdgeRef;
use petgraph::stable_graph::{NodeIndex, StableGraph};
use std::f64::consts::PI;
use std::fmt;
use std::hash::Hash;

/// A syllable (alphabet state) drawn as a node
#[derive(Debug, Clone)]
pub struct SyllableNode {
    pub index: usize,
    pub symbol: String,
    pub kind: SymbolKind,
    pub color: String,
}

/// An observed transition type drawn as an edge
#[derive(Debug, Clone, Copy)]
pub struct TransitionEdge {
    pub weight: u32,
}

/// Directed graph view of a syllable network.
///
/// Every alphabet state becomes a node, including states never observed,
/// so node positions stay stable across birds sharing an alphabet.
pub struct SyllableGraph {
    pub graph: StableGraph<SyllableNode, TransitionEdge>,

    /// Alphabet index to graph node
    pub node_index: Vec<NodeIndex>,
}

impl SyllableGraph {
    pub fn build<S>(alphabet: &Alphabet<S>, edges: &[Edge<u32>], colors: &SyllableColors) -> Result<Self>
    where
        S: Eq + Hash + Clone + fmt::Display,
    {
        let mut graph = StableGraph::with_capacity(alphabet.len(), edges.len());
        let node_index: Vec<NodeIndex> = alphabet
            .entries()
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                graph.add_node(SyllableNode {
                    index,
                    symbol: entry.symbol.to_string(),
                    kind: entry.kind,
                    color: colors.get(index).to_string(),
                })
            })
            .collect();

        for edge in edges {
            let (Some(&from), Some(&to)) = (
                node_index.get(edge.source),
                node_index.get(edge.destination),
            ) else {
                return Err(Error::custom(format!(
                    "Edge {} -> {} is outside an alphabet of {} symbols",
                    edge.source,
                    edge.destination,
                    alphabet.len()
                )));
            };
            graph.add_edge(from, to, TransitionEdge { weight: edge.weight });
        }

        Ok(Self { graph, node_index })
    }

    pub fn node(&self, index: usize) -> Option<&SyllableNode> {
        self.node_index
            .get(index)
            .and_then(|&idx| self.graph.node_weight(idx))
    }

    /// `(destination index, weight)` of every transition leaving `index`
    pub fn outgoing(&self, index: usize) -> Vec<(usize, u32)> {
        let Some(&node) = self.node_index.get(index) else {
            return Vec::new();
        };
        let mut out: Vec<(usize, u32)> = self
            .graph
            .edges_directed(node, Direction::Outgoing)
            .filter_map(|edge| {
                self.graph
                    .node_weight(edge.target())
                    .map(|n| (n.index, edge.weight().weight))
            })
            .collect();
        out.sort_unstable();
        out
    }

    pub fn out_degree(&self, index: usize) -> usize {
        self.node_index.get(index).map_or(0, |&node| {
            self.graph.edges_directed(node, Direction::Outgoing).count()
        })
    }

    pub fn in_degree(&self, index: usize) -> usize {
        self.node_index.get(index).map_or(0, |&node| {
            self.graph.edges_directed(node, Direction::Incoming).count()
        })
    }

    /// Unit-circle positions, one per alphabet state.
    ///
    /// Angles run from -π to π over `n + 1` evenly spaced points (the last
    /// point coincides with the first and is unused); y is mirrored so the
    /// sequence runs clockwise.
    pub fn circular_layout(&self) -> Vec<(f64, f64)> {
        let n = self.node_index.len();
        (0..n)
            .map(|i| {
                let theta = -PI + 2.0 * PI * i as f64 / n as f64;
                (theta.cos(), -theta.sin())
            })
            .collect()
    }

    /// Export to DOT format for Graphviz (render with `neato` to keep the circular layout)
    pub fn to_dot(&self, render: &RenderConfig) -> String {
        let positions = self.circular_layout();

        let mut dot = "digraph SyllableNetwork {\n".to_string();
        dot.push_str("  layout=neato;\n");
        dot.push_str("  node [shape=circle, style=filled, fillcolor=white];\n\n");

        for (i, &node_idx) in self.node_index.iter().enumerate() {
            if let Some(node) = self.graph.node_weight(node_idx) {
                let (x, y) = positions[i];
                dot.push_str(&format!(
                    "  n{} [label=\"{}\", color=\"{}\", penwidth={}, pos=\"{:.3},{:.3}!\"];\n",
                    node.index,
                    escape_label(&node.symbol),
                    node.color,
                    render.node_pen_width,
                    x * render.radius,
                    y * render.radius
                ));
            }
        }

        dot.push('\n');

        for edge_idx in self.graph.edge_indices() {
            if let Some((from_idx, to_idx)) = self.graph.edge_endpoints(edge_idx)
                && let (Some(from), Some(to), Some(transition)) = (
                    self.graph.node_weight(from_idx),
                    self.graph.node_weight(to_idx),
                    self.graph.edge_weight(edge_idx),
                )
            {
                let pen_width = (render.line_width * transition.weight as f64)
                    .clamp(render.line_width, render.max_pen_width);
                dot.push_str(&format!(
                    "  n{} -> n{} [label=\"{}\", color=\"{}\", penwidth={:.2}];\n",
                    from.index, to.index, transition.weight, from.color, pen_width
                ));
            }
        }

        dot.push_str("}\n");
        dot
    }

    pub fn stats(&self) -> GraphStats {
        let total_weight = self
            .graph
            .edge_indices()
            .filter_map(|e| self.graph.edge_weight(e))
            .map(|t| u64::from(t.weight))
            .sum();

        GraphStats {
            total_syllables: self.graph.node_count(),
            total_transition_types: self.graph.edge_count(),
            total_transitions: total_weight,
            unvisited_syllables: (0..self.node_index.len())
                .filter(|&i| self.in_degree(i) == 0 && self.out_degree(i) == 0)
                .count(),
        }
    }
}

fn escape_label(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphStats {
    pub total_syllables: usize,
    pub total_transition_types: usize,
    pub total_transitions: u64,
    /// States with neither incoming nor outgoing transitions
    pub unvisited_syllables: usize,
}
