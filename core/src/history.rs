use crate::search::{AStar, GoalSearch, PathNode, SearchState, SearchStep};

/// Recorded snapshots of a resumable search, with a cursor for moving back
/// and forth through them.
///
/// The live search is only advanced by [`SearchHistory::advance`]; the
/// cursor methods never touch it.
pub struct SearchHistory<'p, P: GoalSearch> {
    search: AStar<'p, P>,
    steps: Vec<SearchState<P::Key, P::Node>>,
    cursor: usize,
    finished: bool,
}

// Never empty: the seeded state is recorded on construction.
#[allow(clippy::len_without_is_empty)]
impl<'p, P> SearchHistory<'p, P>
where
    P: GoalSearch,
    P::Node: Clone,
{
    /// Start recording; the seeded state is step 0.
    pub fn new(search: AStar<'p, P>) -> Self {
        let initial = search.snapshot();
        let finished = search.is_finished();
        Self {
            search,
            steps: vec![initial],
            cursor: 0,
            finished,
        }
    }

    /// Drive the live search up to `count` more steps, recording each state,
    /// and move the cursor to the newest one. Returns how many steps were
    /// recorded; when nothing was recorded the cursor stays put.
    pub fn advance(&mut self, count: usize) -> usize {
        let mut recorded = 0;
        while recorded < count && !self.finished {
            match self.search.step() {
                SearchStep::Continue(state) => self.steps.push(state.clone()),
                SearchStep::Found(state) => {
                    self.steps.push(state.clone());
                    self.finished = true;
                }
                SearchStep::Exhausted => {
                    self.finished = true;
                    break;
                }
            }
            recorded += 1;
        }
        if recorded > 0 {
            self.cursor = self.steps.len() - 1;
        }
        recorded
    }

    /// Move the cursor `count` steps back, stopping at the first one.
    pub fn rewind(&mut self, count: usize) {
        self.cursor = self.cursor.saturating_sub(count);
    }

    /// Move the cursor `count` steps forward through already recorded
    /// states, stopping at the newest.
    pub fn forward(&mut self, count: usize) {
        self.cursor = (self.cursor + count).min(self.steps.len() - 1);
    }

    pub fn current(&self) -> &SearchState<P::Key, P::Node> {
        &self.steps[self.cursor]
    }

    /// The state just before the cursor, if any.
    pub fn previous(&self) -> Option<&SearchState<P::Key, P::Node>> {
        self.cursor.checked_sub(1).map(|i| &self.steps[i])
    }

    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// The live search hit its goal or ran out of frontier.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Cost of the goal in the newest recorded state.
    pub fn found_cost(&self) -> Option<f64> {
        self.steps
            .last()
            .and_then(|state| state.found_goal())
            .map(|goal| goal.cost())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Graph, RouteSearch};

    fn make_chain(n: u64) -> Graph {
        let mut g = Graph::new();
        g.load_edges((0..n - 1).map(|i| (i, i + 1, 1.0)));
        g
    }

    #[test]
    fn test_history_records_every_step() {
        let g = make_chain(4);
        let route = RouteSearch::new(&g, 3, |_| 0.0);
        let mut history = SearchHistory::new(AStar::new(&route, route.start(0)));
        assert_eq!(history.len(), 1);
        assert_eq!(history.current().expanded(), 0);
        assert!(history.previous().is_none());

        let recorded = history.advance(100);
        // Three expansions along the chain plus the goal pop.
        assert_eq!(recorded, 4);
        assert_eq!(history.len(), 5);
        assert!(history.is_finished());
        assert_eq!(history.found_cost(), Some(3.0));
        assert_eq!(history.position(), 4);
    }

    #[test]
    fn test_history_cursor_is_clamped() {
        let g = make_chain(5);
        let route = RouteSearch::new(&g, 4, |_| 0.0);
        let mut history = SearchHistory::new(AStar::new(&route, route.start(0)));
        history.advance(2);

        history.rewind(10);
        assert_eq!(history.position(), 0);
        assert_eq!(history.current().expanded(), 0);

        history.forward(1);
        assert_eq!(history.current().expanded(), 1);
        assert_eq!(history.previous().map(|s| s.expanded()), Some(0));

        history.forward(10);
        assert_eq!(history.position(), 2);
        assert!(!history.is_finished());
    }

    #[test]
    fn test_history_snapshots_do_not_change() {
        let g = make_chain(6);
        let route = RouteSearch::new(&g, 5, |_| 0.0);
        let mut history = SearchHistory::new(AStar::new(&route, route.start(0)));
        history.advance(1);
        let early = history.current().discovered();
        history.advance(10);

        history.rewind(history.len());
        history.forward(1);
        assert_eq!(history.current().discovered(), early);
        assert!(history.current().found_goal().is_none());
    }

    #[test]
    fn test_history_stops_when_exhausted() {
        let mut g = make_chain(3);
        g.add_node(9);
        let route = RouteSearch::new(&g, 9, |_| 0.0);
        let mut history = SearchHistory::new(AStar::new(&route, route.start(0)));

        let recorded = history.advance(50);
        // Three expansions, then the empty frontier ends recording.
        assert_eq!(recorded, 3);
        assert!(history.is_finished());
        assert_eq!(history.found_cost(), None);
        assert_eq!(history.advance(5), 0);
    }

    #[test]
    fn test_idle_advance_keeps_cursor() {
        let g = make_chain(5);
        let route = RouteSearch::new(&g, 4, |_| 0.0);
        let mut history = SearchHistory::new(AStar::new(&route, route.start(0)));
        history.advance(3);
        history.rewind(2);
        assert_eq!(history.position(), 1);

        assert_eq!(history.advance(0), 0);
        assert_eq!(history.position(), 1);

        history.advance(100);
        assert!(history.is_finished());
        history.rewind(3);
        let position = history.position();
        assert_eq!(history.advance(5), 0);
        assert_eq!(history.position(), position);
    }
}
