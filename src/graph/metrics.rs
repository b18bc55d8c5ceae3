//! Layout metrics
//!
//! Mermaid positions nodes roughly in declaration order, so the renderer
//! declares central packages first. These metrics provide the ordering keys.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet, VecDeque};

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;
use petgraph::visit::Dfs;

/// Total in + out edge count per package
pub fn degrees(edges: &BTreeSet<(String, String)>) -> BTreeMap<String, usize> {
    let mut degree: BTreeMap<String, usize> = BTreeMap::new();
    for (from, to) in edges {
        *degree.entry(from.clone()).or_default() += 1;
        *degree.entry(to.clone()).or_default() += 1;
    }
    degree
}

/// Number of distinct transitive descendants per package
///
/// Acyclic graphs are solved bottom-up in reverse topological order. If the
/// graph has a cycle every node gets its own depth-first walk instead.
pub fn subtree_sizes(edges: &BTreeSet<(String, String)>) -> BTreeMap<String, usize> {
    let graph: DiGraphMap<&str, ()> =
        DiGraphMap::from_edges(edges.iter().map(|(f, t)| (f.as_str(), t.as_str())));

    match toposort(&graph, None) {
        Ok(order) => {
            let mut descendants: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
            for &node in order.iter().rev() {
                let mut below = BTreeSet::new();
                for child in graph.neighbors(node) {
                    below.insert(child);
                    if let Some(grandchildren) = descendants.get(child) {
                        below.extend(grandchildren.iter().copied());
                    }
                }
                descendants.insert(node, below);
            }
            descendants
                .into_iter()
                .map(|(node, below)| (node.to_string(), below.len()))
                .collect()
        }
        Err(_) => graph
            .nodes()
            .map(|node| {
                let mut dfs = Dfs::new(&graph, node);
                let mut reached = 0usize;
                while let Some(next) = dfs.next(&graph) {
                    if next != node {
                        reached += 1;
                    }
                }
                (node.to_string(), reached)
            })
            .collect(),
    }
}

/// Shortest hop count from `root` to every reachable package
pub fn depths_from(root: &str, edges: &BTreeSet<(String, String)>) -> BTreeMap<String, usize> {
    let graph: DiGraphMap<&str, ()> =
        DiGraphMap::from_edges(edges.iter().map(|(f, t)| (f.as_str(), t.as_str())));

    let mut depth: BTreeMap<String, usize> = BTreeMap::from([(root.to_string(), 0)]);
    if !graph.contains_node(root) {
        return depth;
    }

    let mut queue = VecDeque::from([(root, 0usize)]);
    while let Some((node, hops)) = queue.pop_front() {
        for next in graph.neighbors(node) {
            if !depth.contains_key(next) {
                depth.insert(next.to_string(), hops + 1);
                queue.push_back((next, hops + 1));
            }
        }
    }
    depth
}

/// All three metrics for one deduplicated edge set
#[derive(Debug, Clone, Default)]
pub struct LayoutMetrics {
    degree: BTreeMap<String, usize>,
    subtree: BTreeMap<String, usize>,
    depth: BTreeMap<String, usize>,
}

impl LayoutMetrics {
    pub fn compute(root: &str, edges: &BTreeSet<(String, String)>) -> Self {
        Self {
            degree: degrees(edges),
            subtree: subtree_sizes(edges),
            depth: depths_from(root, edges),
        }
    }

    pub fn degree(&self, name: &str) -> usize {
        self.degree.get(name).copied().unwrap_or(0)
    }

    pub fn subtree_size(&self, name: &str) -> usize {
        self.subtree.get(name).copied().unwrap_or(0)
    }

    /// BFS depth from the root; unreachable packages read as 0
    pub fn depth(&self, name: &str) -> usize {
        self.depth.get(name).copied().unwrap_or(0)
    }

    /// Ordering for primary dependencies: biggest subtree first
    pub fn primary_key<'a>(&self, name: &'a str) -> (Reverse<usize>, Reverse<usize>, &'a str) {
        (
            Reverse(self.subtree_size(name)),
            Reverse(self.degree(name)),
            name,
        )
    }

    /// Ordering for every other node: most connected first
    pub fn node_key<'a>(&self, name: &'a str) -> (Reverse<usize>, &'a str) {
        (Reverse(self.degree(name)), name)
    }

    /// Ordering for edges: shallow, well-connected sources first
    pub fn edge_key<'a>(
        &self,
        from: &'a str,
        to: &'a str,
    ) -> (usize, Reverse<usize>, &'a str, Reverse<usize>, &'a str) {
        (
            self.depth(from),
            Reverse(self.degree(from)),
            from,
            Reverse(self.degree(to)),
            to,
        )
    }
}
