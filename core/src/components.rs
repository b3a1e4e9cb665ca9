use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// One suspended DFS call: the node and how far we got through its targets.
struct Frame<N, It> {
    node: N,
    targets: It,
}

/// Discovery index and low-link of a visited node.
#[derive(Clone, Copy)]
struct Link {
    index: usize,
    low: usize,
}

/// Working state of one Tarjan run.
struct Tarjan<N, I: IntoIterator<Item = N>, F> {
    connected_to: F,
    links: HashMap<N, Link>,
    stack: Vec<N>,
    on_stack: HashSet<N>,
    frames: Vec<Frame<N, I::IntoIter>>,
    components: Vec<HashSet<N>>,
    next_index: usize,
}

impl<N, I, F> Tarjan<N, I, F>
where
    N: Hash + Eq + Clone,
    I: IntoIterator<Item = N>,
    F: FnMut(&N) -> I,
{
    fn new(connected_to: F) -> Self {
        Self {
            connected_to,
            links: HashMap::new(),
            stack: Vec::new(),
            on_stack: HashSet::new(),
            frames: Vec::new(),
            components: Vec::new(),
            next_index: 0,
        }
    }

    /// Number `node`, push it on the traversal stack and open its frame.
    fn discover(&mut self, node: N) {
        let index = self.next_index;
        self.next_index += 1;
        self.links.insert(node.clone(), Link { index, low: index });
        self.stack.push(node.clone());
        self.on_stack.insert(node.clone());
        let targets = (self.connected_to)(&node).into_iter();
        self.frames.push(Frame { node, targets });
    }

    fn lower(&mut self, node: &N, low: usize) {
        if let Some(link) = self.links.get_mut(node) {
            link.low = link.low.min(low);
        }
    }

    /// Depth-first from `root` until its frame closes.
    fn visit(&mut self, root: N) {
        self.discover(root);

        while let Some(frame) = self.frames.last_mut() {
            if let Some(target) = frame.targets.next() {
                let source = frame.node.clone();
                match self.links.get(&target).copied() {
                    None => self.discover(target),
                    Some(seen) if self.on_stack.contains(&target) => self.lower(&source, seen.low),
                    Some(_) => {}
                }
                continue;
            }

            let Some(Frame { node, .. }) = self.frames.pop() else {
                break;
            };
            self.finish(node);
        }
    }

    /// All targets of `node` are done: emit its component if it is a root,
    /// then pass its low-link up to the parent frame.
    fn finish(&mut self, node: N) {
        let Some(link) = self.links.get(&node).copied() else {
            return;
        };

        if link.low == link.index {
            let mut component = HashSet::new();
            while let Some(member) = self.stack.pop() {
                self.on_stack.remove(&member);
                let is_root = member == node;
                component.insert(member);
                if is_root {
                    break;
                }
            }
            self.components.push(component);
        }

        if let Some(parent) = self.frames.last().map(|f| f.node.clone()) {
            self.lower(&parent, link.low);
        }
    }
}

/// Strongly connected components (Tarjan), without recursion.
///
/// Every node of `nodes` ends up in exactly one returned set. Components are
/// emitted as their roots finish, so a component comes out before any
/// component that can reach it. Targets produced by `connected_to` that are
/// not in `nodes` are still traversed and reported.
///
/// The DFS keeps an explicit stack of `(node, target iterator)` frames, so
/// long chains cannot overflow the call stack.
#[tracing::instrument(skip_all)]
pub fn strongly_connected_components<N, I, F>(
    nodes: impl IntoIterator<Item = N>,
    connected_to: F,
) -> Vec<HashSet<N>>
where
    N: Hash + Eq + Clone,
    I: IntoIterator<Item = N>,
    F: FnMut(&N) -> I,
{
    let mut tarjan = Tarjan::new(connected_to);
    for node in nodes {
        if !tarjan.links.contains_key(&node) {
            tarjan.visit(node);
        }
    }

    tracing::debug!(
        nodes = tarjan.next_index,
        components = tarjan.components.len(),
        "strongly connected components"
    );
    tarjan.components
}
