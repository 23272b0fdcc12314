//! Breadth-first reconnection through free cells.
//!
//! Used to join the open end of a generated path to a required end point
//! (or back to its start for closed loops), and to bridge a manifold start
//! point to the first run. The search keeps a dense parent array sized to
//! the grid instead of a coordinate-keyed map.

use crate::grid::Grid;
use heatloop_core::GridPoint;
use std::collections::VecDeque;
use tracing::debug;

const UNSEEN: usize = usize::MAX;

/// Shortest 4-connected chain of cells from `from` to `to`.
///
/// Cells must be routable and not marked in `taken` (indexed like the grid);
/// `to` is admissible even when taken. The chain excludes `from` and ends
/// with `to`. Returns `Some(vec![])` when the two coincide and `None` when
/// the search space is exhausted.
pub fn shortest_chain(
    grid: &Grid,
    taken: &[bool],
    from: GridPoint,
    to: GridPoint,
) -> Option<Vec<GridPoint>> {
    let start = grid.index_of(from)?;
    let goal = grid.index_of(to)?;
    if start == goal {
        return Some(Vec::new());
    }
    if !grid.is_routable(to) {
        return None;
    }

    let mut parent = vec![UNSEEN; grid.len()];
    let mut queue = VecDeque::new();
    parent[start] = start;
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        for next in grid.point_at(current).neighbors4() {
            let Some(ni) = grid.index_of(next) else {
                continue;
            };
            if parent[ni] != UNSEEN {
                continue;
            }
            let free = grid.is_routable(next) && !taken.get(ni).copied().unwrap_or(false);
            if ni != goal && !free {
                continue;
            }
            parent[ni] = current;
            if ni == goal {
                let mut chain = vec![to];
                let mut at = current;
                while at != start {
                    chain.push(grid.point_at(at));
                    at = parent[at];
                }
                chain.reverse();
                debug!("Reconnected {} to {} in {} cells", from, to, chain.len());
                return Some(chain);
            }
            queue.push_back(ni);
        }
    }

    debug!("No free route from {} to {}", from, to);
    None
}
