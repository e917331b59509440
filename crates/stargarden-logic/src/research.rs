//! Prerequisite gating over the fixed research graph.
//!
//! Five hard-coded nodes form a small DAG; a node unlocks once every
//! prerequisite id appears in the completed set. No cycle detection or
//! topological scheduling — the graph is tiny and fixed.

/// True when every prerequisite id is present in the completed list.
/// An empty prerequisite list is always met.
pub fn prerequisites_met(prereqs: &[String], completed: &[String]) -> bool {
    prereqs.iter().all(|id| completed.contains(id))
}
