//! Monte Carlo Tree Search for the engine's moves.
//!
//! Each search builds a fresh tree rooted at the current board, runs a fixed
//! number of iterations and throws the tree away. One iteration is:
//!
//! 1. Selection: follow the highest-UCB child down to a childless node.
//! 2. Expansion: give that node one child per empty point, each with a WHITE
//!    stone on it, and pick the best-scoring new child.
//! 3. Simulation: random playout from the picked child.
//! 4. Backpropagation: add the playout result to every node up to the root.
//!
//! Nodes live in an arena and refer to each other by [`NodeId`]; a node owns
//! its children through the id list, the parent link is a plain back index.

use fastrand::Rng;
use tracing::{debug, trace};

use crate::board::{Board, Color, Point, vertex_name};
use crate::constants::EXPLORATION;
use crate::playout::simulate;
use crate::rules::legal_moves;

/// Index into the node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

/// A node in the search tree.
#[derive(Debug, Clone)]
pub struct TreeNode {
    /// Position at this node (owned copy)
    pub board: Board,
    /// Parent node (None for root)
    pub parent: Option<NodeId>,
    /// Move that produced this node (None for root)
    pub mv: Option<Point>,
    /// Number of visits
    pub visits: u32,
    /// Sum of playout results
    pub wins: i64,
    /// Side to move in a playout from here: `true` is WHITE
    pub is_max: bool,
    /// Child nodes, in creation order
    pub children: Vec<NodeId>,
}

impl TreeNode {
    fn new(board: Board, parent: Option<NodeId>, mv: Option<Point>) -> Self {
        Self {
            board,
            parent,
            mv,
            visits: 0,
            wins: 0,
            is_max: true,
            children: Vec::new(),
        }
    }

    /// Mean playout result, or 0 for an unvisited node.
    #[inline]
    pub fn winrate(&self) -> f64 {
        if self.visits > 0 {
            self.wins as f64 / self.visits as f64
        } else {
            0.0
        }
    }
}

/// Arena-backed search tree.
#[derive(Debug)]
pub struct SearchTree {
    nodes: Vec<TreeNode>,
}

impl SearchTree {
    /// Create a tree with a single root holding a copy of `board`.
    pub fn new(board: &Board) -> Self {
        Self {
            nodes: vec![TreeNode::new(board.clone(), None, None)],
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.0]
    }

    #[inline]
    fn get_mut(&mut self, id: NodeId) -> &mut TreeNode {
        &mut self.nodes[id.0]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// UCB1 score of a node; unvisited nodes score +inf.
    ///
    /// `wins/visits + C * sqrt(ln(parent.visits) / visits)`
    pub fn ucb_score(&self, id: NodeId) -> f64 {
        let node = self.get(id);
        if node.visits == 0 {
            return f64::INFINITY;
        }

        let visits = node.visits as f64;
        let exploitation = node.wins as f64 / visits;
        let exploration = match node.parent {
            Some(parent) if self.get(parent).visits > 0 => {
                let parent_visits = self.get(parent).visits as f64;
                EXPLORATION * (parent_visits.ln() / visits).sqrt()
            }
            _ => 0.0,
        };
        exploitation + exploration
    }

    /// Highest-UCB node among `ids`. Ties go to the earliest id in the slice.
    fn best_by_ucb(&self, ids: &[NodeId]) -> Option<NodeId> {
        let mut best: Option<(NodeId, f64)> = None;
        for &id in ids {
            let score = self.ucb_score(id);
            match best {
                Some((_, top)) if score <= top => {}
                _ => best = Some((id, score)),
            }
        }
        best.map(|(id, _)| id)
    }

    /// Descend from the root to a node without children.
    pub fn select(&self) -> NodeId {
        let mut id = self.root();
        while let Some(child) = self.best_by_ucb(&self.get(id).children) {
            id = child;
        }
        id
    }

    /// Add one WHITE-move child per empty point of `leaf`.
    ///
    /// Returns the best-scoring new child, or `None` when the board is full.
    pub fn expand(&mut self, leaf: NodeId) -> Option<NodeId> {
        let moves = legal_moves(&self.get(leaf).board);
        if moves.is_empty() {
            return None;
        }

        let mut created = Vec::with_capacity(moves.len());
        for mv in moves {
            let mut board = self.get(leaf).board.clone();
            board.set(mv, Some(Color::White));
            let id = NodeId(self.nodes.len());
            self.nodes.push(TreeNode::new(board, Some(leaf), Some(mv)));
            created.push(id);
        }
        self.get_mut(leaf).children.extend_from_slice(&created);

        self.best_by_ucb(&created)
    }

    /// Add one visit and `result` to `from` and each of its ancestors.
    pub fn backpropagate(&mut self, from: NodeId, result: i32) {
        let mut current = Some(from);
        while let Some(id) = current {
            let node = self.get_mut(id);
            node.visits += 1;
            node.wins += i64::from(result);
            current = node.parent;
        }
    }

    /// Run one select/expand/simulate/backpropagate cycle.
    pub fn iterate(&mut self, rng: &mut Rng) {
        let leaf = self.select();
        let Some(expanded) = self.expand(leaf) else {
            trace!(leaf = leaf.0, "nothing to expand");
            return;
        };

        let node = self.get(expanded);
        let mut scratch = node.board.clone();
        let result = simulate(&mut scratch, node.is_max, rng);
        trace!(node = expanded.0, result, "playout finished");

        self.backpropagate(expanded, result);
    }

    pub fn run(&mut self, iterations: usize, rng: &mut Rng) {
        for _ in 0..iterations {
            self.iterate(rng);
        }
    }

    /// Move of the root child with the best UCB score.
    pub fn best_move(&self) -> Option<Point> {
        let root = self.get(self.root());
        self.best_by_ucb(&root.children).and_then(|id| self.get(id).mv)
    }

    /// Log the statistics of the root's children.
    pub fn dump_children(&self) {
        for &id in &self.get(self.root()).children {
            let child = self.get(id);
            if let Some(mv) = child.mv {
                trace!(
                    mv = %vertex_name(mv),
                    visits = child.visits,
                    wins = child.wins,
                    winrate = child.winrate(),
                    "root child"
                );
            }
        }
    }
}

/// Search `board` for the engine's next move.
///
/// Returns `None` when the board has no empty point.
pub fn search(board: &Board, iterations: usize, rng: &mut Rng) -> Option<Point> {
    let mut tree = SearchTree::new(board);
    tree.run(iterations, rng);
    tree.dump_children();

    let best = tree.best_move();
    debug!(
        iterations,
        nodes = tree.len(),
        best = ?best.map(vertex_name),
        "search finished"
    );
    best
}
