use std::{
    collections::{BTreeMap, BTreeSet},
    fmt::{self, Debug, Formatter},
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TopologyError<T>
where
    T: Debug,
{
    #[error("Cycle detected in dependency graph, from {0:?}")]
    CycleDetected(DepRoute<T>),
    #[error("Duplicate edge detected in dependency graph, from {0:?}")]
    DuplicateEdge(DepRoute<T>),
}

/// A path through the graph, printed as `a -> b -> c`.
pub struct DepRoute<T> {
    route: Vec<T>,
}

impl<T> DepRoute<T> {
    pub fn nodes(&self) -> &[T] {
        &self.route
    }
}

impl<T: Debug> Debug for DepRoute<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.route.is_empty() {
            return f.write_str("[]");
        }
        for (i, node) in self.route.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{node:?}")?;
        }
        Ok(())
    }
}

/// Dependency graph where `route_to(from, to)` means "`to` reads `from`".
#[derive(Debug)]
pub struct Graph<Node>
where
    Node: Debug + Copy + Ord,
{
    edges: BTreeMap<Node, BTreeSet<Node>>,
    duplicate: Option<(Node, Node)>,
}

impl<Node> Default for Graph<Node>
where
    Node: Debug + Copy + Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<Node> Graph<Node>
where
    Node: Debug + Copy + Ord,
{
    pub fn new() -> Self {
        Self {
            edges: BTreeMap::new(),
            duplicate: None,
        }
    }

    /// Registers a node that may have no edges at all.
    pub fn add_node(&mut self, node: Node) {
        self.edges.entry(node).or_default();
    }

    pub fn route_to(&mut self, from: Node, to: Node) {
        self.add_node(to);
        let is_new = self.edges.entry(from).or_default().insert(to);
        if !is_new && self.duplicate.is_none() {
            self.duplicate = Some((from, to));
        }
    }

    /// Orders every node after all the nodes it reads (Kahn's algorithm).
    pub fn topology_sort(&self) -> Result<Vec<Node>, TopologyError<Node>> {
        if let Some((from, to)) = self.duplicate {
            return Err(TopologyError::DuplicateEdge(DepRoute {
                route: vec![from, to],
            }));
        }

        let mut pending: BTreeMap<Node, usize> =
            self.edges.keys().map(|&node| (node, 0)).collect();
        for &to in self.edges.values().flatten() {
            *pending.entry(to).or_default() += 1;
        }

        let mut order = Vec::with_capacity(pending.len());
        let mut ready: Vec<Node> = pending
            .iter()
            .filter(|&(_, &count)| count == 0)
            .map(|(&node, _)| node)
            .collect();

        while let Some(node) = ready.pop() {
            order.push(node);
            for next in self.edges.get(&node).into_iter().flatten() {
                if let Some(count) = pending.get_mut(next) {
                    *count -= 1;
                    if *count == 0 {
                        ready.push(*next);
                    }
                }
            }
        }

        if order.len() < pending.len() {
            let route = self.find_cycle().unwrap_or_default();
            return Err(TopologyError::CycleDetected(DepRoute { route }));
        }
        Ok(order)
    }

    fn find_cycle(&self) -> Option<Vec<Node>> {
        let mut done = BTreeSet::new();
        let mut path = Vec::new();
        self.edges
            .keys()
            .find_map(|&start| self.visit(start, &mut path, &mut done))
    }

    /// Depth-first walk; returns the closed loop when `node` is already on `path`.
    fn visit(
        &self,
        node: Node,
        path: &mut Vec<Node>,
        done: &mut BTreeSet<Node>,
    ) -> Option<Vec<Node>> {
        if let Some(pos) = path.iter().position(|&on_path| on_path == node) {
            let mut cycle = path[pos..].to_vec();
            cycle.push(node);
            return Some(cycle);
        }
        if done.contains(&node) {
            return None;
        }

        path.push(node);
        for &next in self.edges.get(&node).into_iter().flatten() {
            if let Some(cycle) = self.visit(next, path, done) {
                return Some(cycle);
            }
        }
        path.pop();
        done.insert(node);
        None
    }
}
