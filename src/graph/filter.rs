//! Graph filters
//!
//! Every filter borrows a graph and returns a new, smaller one. When several
//! are requested they run in this order: [`DependencyGraph::retain_names`]
//! (exclude base dependencies), [`DependencyGraph::filter_to_package`], then
//! [`DependencyGraph::trim_to_depth`].

use std::collections::{BTreeSet, HashMap, VecDeque};

use super::types::{DependencyGraph, Edge, NodeMap};

impl DependencyGraph {
    /// Restrict the graph to `package` and everything it transitively
    /// depends on
    ///
    /// The returned graph is rooted at `package`. A package without edges
    /// yields at most a single node.
    pub fn filter_to_package(&self, package: &str) -> DependencyGraph {
        let mut reachable: BTreeSet<&str> = BTreeSet::from([package]);
        loop {
            let before = reachable.len();
            for edge in &self.edges {
                if reachable.contains(edge.from.as_str()) {
                    reachable.insert(edge.to.as_str());
                }
            }
            if reachable.len() == before {
                break;
            }
        }

        let edges: Vec<Edge> = self
            .edges
            .iter()
            .filter(|e| reachable.contains(e.from.as_str()) && reachable.contains(e.to.as_str()))
            .cloned()
            .collect();

        let mut kept: BTreeSet<&str> = BTreeSet::from([package]);
        for edge in &edges {
            kept.insert(edge.from.as_str());
            kept.insert(edge.to.as_str());
        }

        DependencyGraph::new(package, self.nodes_named(&kept), edges)
    }

    /// Keep only packages within `depth` hops of the root
    ///
    /// A depth of 0 keeps the root alone.
    pub fn trim_to_depth(&self, depth: usize) -> DependencyGraph {
        let mut adjacency: HashMap<&str, Vec<&str>> = HashMap::new();
        for edge in &self.edges {
            adjacency
                .entry(edge.from.as_str())
                .or_default()
                .push(edge.to.as_str());
        }

        let mut seen: BTreeSet<&str> = BTreeSet::from([self.root.as_str()]);
        let mut queue: VecDeque<(&str, usize)> = VecDeque::from([(self.root.as_str(), 0)]);
        while let Some((name, hops)) = queue.pop_front() {
            if hops == depth {
                continue;
            }
            for &next in adjacency.get(name).into_iter().flatten() {
                if seen.insert(next) {
                    queue.push_back((next, hops + 1));
                }
            }
        }

        let edges = self
            .edges
            .iter()
            .filter(|e| seen.contains(e.from.as_str()) && seen.contains(e.to.as_str()))
            .filter(|e| depth > 0 || e.from != e.to)
            .cloned()
            .collect();

        DependencyGraph::new(self.root.clone(), self.nodes_named(&seen), edges)
    }

    /// Drop every package whose name is not in `allowed`
    pub fn retain_names(&self, allowed: &BTreeSet<String>) -> DependencyGraph {
        let nodes = self
            .nodes
            .iter()
            .filter(|(_, p)| allowed.contains(&p.name))
            .map(|(k, p)| (k.clone(), p.clone()))
            .collect();
        let edges = self
            .edges
            .iter()
            .filter(|e| allowed.contains(&e.from) && allowed.contains(&e.to))
            .cloned()
            .collect();

        DependencyGraph::new(self.root.clone(), nodes, edges)
    }

    fn nodes_named(&self, names: &BTreeSet<&str>) -> NodeMap {
        self.nodes
            .iter()
            .filter(|(_, p)| names.contains(p.name.as_str()))
            .map(|(k, p)| (k.clone(), p.clone()))
            .collect()
    }
}
