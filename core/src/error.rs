use thiserror::Error;

/// Errors surfaced by the search algorithms.
///
/// Popping an empty queue is not an error; those calls return `None`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The A* frontier emptied before any node satisfied the goal test.
    #[error("no path to the goal (frontier exhausted after {expanded} expansions)")]
    NoPathFound { expanded: usize },

    /// An all-pairs edge names a node that is not in the declared node list.
    #[error("edge references unknown node: {0}")]
    UnknownNode(String),
}

pub type Result<T> = std::result::Result<T, SearchError>;
