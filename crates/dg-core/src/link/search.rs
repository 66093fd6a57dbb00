//! Iterative-deepening A* over a 4-connected grid
//!
//! Each iteration is a depth-first search bounded by `f = g + h`; the next
//! bound is the smallest `f` that exceeded the current one. A per-iteration
//! transposition table keyed by cell prunes revisits that are not cheaper.
//! The search stops once the bound passes `max_cost` or the expansion budget
//! is spent.

use hashbrown::HashMap;

use crate::error::LinkFailure;

/// A cell in grid coordinates
pub type GridPos = (i32, i32);

/// Neighbor order: N, E, S, W
const STEPS: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// A grid the search can walk.
pub trait CostGrid {
    /// Cost of stepping onto `pos`, `None` if it cannot be entered
    fn step_cost(&self, pos: GridPos) -> Option<u32>;

    /// Number of cells, used to derive the default cost bound
    fn cell_count(&self) -> usize;

    /// Largest value [`CostGrid::step_cost`] can return
    fn max_step_cost(&self) -> u32 {
        1
    }
}

/// Termination budgets of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// Largest f-cost bound tried; `None` means every cell at worst cost
    pub max_cost: Option<u32>,
    /// Total nodes generated across all iterations
    pub max_expansions: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_cost: None,
            max_expansions: 1_000_000,
        }
    }
}

/// A found path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Cells from start to goal, both included
    pub path: Vec<GridPos>,
    pub cost: u32,
    pub expansions: usize,
}

/// Manhattan distance, admissible while every step costs at least 1
pub fn manhattan(a: GridPos, b: GridPos) -> u32 {
    a.0.abs_diff(b.0).saturating_add(a.1.abs_diff(b.1))
}

struct Frame {
    pos: GridPos,
    g: u32,
    next_step: usize,
}

enum Iteration {
    Found(SearchResult),
    /// Smallest f over the bound, `None` if nothing was cut off
    Deepen(Option<u32>),
}

struct Search<'a, G: CostGrid> {
    grid: &'a G,
    goal: GridPos,
    max_expansions: usize,
    expansions: usize,
    table: HashMap<GridPos, u32>,
}

impl<G: CostGrid> Search<'_, G> {
    fn iterate(&mut self, start: GridPos, bound: u32) -> Result<Iteration, LinkFailure> {
        self.table.clear();
        self.table.insert(start, 0);
        let mut stack = vec![Frame {
            pos: start,
            g: 0,
            next_step: 0,
        }];
        let mut next_bound: Option<u32> = None;

        while let Some(frame) = stack.last_mut() {
            let Some(&(dx, dy)) = STEPS.get(frame.next_step) else {
                stack.pop();
                continue;
            };
            frame.next_step += 1;

            let pos = (frame.pos.0 + dx, frame.pos.1 + dy);
            let Some(cost) = self.grid.step_cost(pos) else {
                continue;
            };
            // costs past u32::MAX are beyond any bound
            let Some(g) = frame.g.checked_add(cost) else {
                continue;
            };
            if self.table.get(&pos).is_some_and(|&best| best <= g) {
                continue;
            }

            let Some(f) = g.checked_add(manhattan(pos, self.goal)) else {
                continue;
            };
            if f > bound {
                next_bound = Some(next_bound.map_or(f, |b| b.min(f)));
                continue;
            }

            self.expansions += 1;
            if self.expansions > self.max_expansions {
                return Err(LinkFailure::SearchExhausted {
                    bound,
                    expansions: self.expansions - 1,
                });
            }
            self.table.insert(pos, g);

            if pos == self.goal {
                let mut path: Vec<GridPos> = stack.iter().map(|f| f.pos).collect();
                path.push(pos);
                return Ok(Iteration::Found(SearchResult {
                    path,
                    cost: g,
                    expansions: self.expansions,
                }));
            }
            stack.push(Frame {
                pos,
                g,
                next_step: 0,
            });
        }

        Ok(Iteration::Deepen(next_bound))
    }
}

/// Find a cheapest path from `start` to `goal`.
///
/// The start cell is not charged and need not be enterable; the goal must be.
pub fn ida_star<G: CostGrid>(
    grid: &G,
    start: GridPos,
    goal: GridPos,
    limits: SearchLimits,
) -> Result<SearchResult, LinkFailure> {
    if start == goal {
        return Ok(SearchResult {
            path: vec![start],
            cost: 0,
            expansions: 0,
        });
    }

    let max_cost = limits.max_cost.unwrap_or_else(|| {
        let cells = u32::try_from(grid.cell_count()).unwrap_or(u32::MAX);
        cells.saturating_mul(grid.max_step_cost())
    });

    let mut search = Search {
        grid,
        goal,
        max_expansions: limits.max_expansions,
        expansions: 0,
        table: HashMap::new(),
    };

    let mut bound = manhattan(start, goal);
    while bound <= max_cost {
        match search.iterate(start, bound)? {
            Iteration::Found(result) => {
                log::debug!(
                    "path of cost {} found with bound {} after {} expansions",
                    result.cost,
                    bound,
                    result.expansions
                );
                return Ok(result);
            }
            Iteration::Deepen(Some(next)) => bound = next,
            Iteration::Deepen(None) => break,
        }
    }

    Err(LinkFailure::SearchExhausted {
        bound,
        expansions: search.expansions,
    })
}
