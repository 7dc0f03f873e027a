//! Edmonds' blossom algorithm for minimum-weight perfect matchings on dense graphs.
//!
//! The solver works on the complete graph given by a [`WeightMatrix`] and runs in `O(n^3)`
//! time. It follows the primal-dual scheme: every real node carries a potential, every
//! blossom a non-negative dual, and only tight edges (reduced cost zero) may enter the
//! alternating forest. Reduced costs are kept doubled, i.e. the reduced cost of `{u, v}`
//! between different top-level blossoms is `2 w(u, v) - dual[u] - dual[v]`, so that all dual
//! steps stay exact halves of observed slacks.
//!
//! Nodes `0..n` are the real nodes; ids `n..2n` are recycled for blossoms.

use std::collections::VecDeque;

use log::trace;

use crate::{
    errors::{InvariantCheck, InvariantViolation},
    graph::*,
};

const NONE: usize = usize::MAX;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Label {
    Unlabeled,
    /// outer node of the alternating forest
    Even,
    /// inner node of the alternating forest
    Odd,
}

pub struct BlossomSolver {
    n: usize,
    /// number of ids in use (real nodes and blossoms, alive or expanded)
    n_x: usize,
    /// doubled edge costs between real nodes
    cost: Vec<Weight>,
    /// least reduced cost edge between two top-level ids `(x, y)`, stored with the real
    /// endpoint inside `x` first
    link: Vec<Option<Edge>>,
    /// potentials of real nodes and duals of blossoms
    dual: Vec<Weight>,
    /// real node matched to a real node or blossom
    mate: Vec<usize>,
    /// for a top-level id, the even real node offering the cheapest edge into it
    slack: Vec<usize>,
    /// top-level blossom containing an id
    top: Vec<usize>,
    /// for odd ids, the even real node through which they got labeled
    parent: Vec<usize>,
    label: Vec<Label>,
    /// sub-blossoms in cyclic order, starting at the base
    flower: Vec<Vec<usize>>,
    /// `flower_from[b * n + x]` is the direct sub-blossom of `b` containing real node `x`
    flower_from: Vec<usize>,
    visited: Vec<usize>,
    timestamp: usize,
    queue: VecDeque<usize>,
}

impl BlossomSolver {
    /// Prepares the solver for the complete graph `matrix`. Infinite entries are replaced by
    /// a finite penalty exceeding the weight of every perfect matching free of them.
    pub fn new(matrix: &WeightMatrix) -> Self {
        let n = matrix.len();
        let ids = 2 * n;

        let penalty = matrix
            .max_finite_weight()
            .map_or(1.0, |w| (n as Weight) * (w + 1.0));

        let mut cost = vec![0.0; n * n];
        let mut link = vec![None; ids * ids];
        for u in matrix.vertices() {
            for v in matrix.vertices() {
                if u == v {
                    continue;
                }
                let w = if matrix.has_edge(u, v) {
                    matrix.weight(u, v)
                } else {
                    penalty
                };
                cost[u as usize * n + v as usize] = 2.0 * w;
                link[u as usize * ids + v as usize] = Some(Edge(u, v));
            }
        }

        // half of the cheapest incident edge keeps every reduced cost non-negative
        let mut dual = vec![0.0; ids];
        for u in 0..n {
            dual[u] = (0..n)
                .filter(|&v| v != u)
                .map(|v| cost[u * n + v] / 2.0)
                .reduce(Weight::min)
                .unwrap_or(0.0);
        }

        let mut flower_from = vec![NONE; ids * n];
        for u in 0..n {
            flower_from[u * n + u] = u;
        }

        Self {
            n,
            n_x: n,
            cost,
            link,
            dual,
            mate: vec![NONE; ids],
            slack: vec![NONE; ids],
            top: (0..n).chain(std::iter::repeat_n(NONE, n)).collect(),
            parent: vec![NONE; ids],
            label: vec![Label::Unlabeled; ids],
            flower: vec![Vec::new(); ids],
            flower_from,
            visited: vec![0; ids],
            timestamp: 0,
            queue: VecDeque::new(),
        }
    }

    /// Augments until every node is matched.
    pub fn run(&mut self) -> Result<(), InvariantViolation> {
        if self.n % 2 == 1 {
            return Err(InvariantViolation::ImperfectMatching(format!(
                "{} nodes cannot be matched perfectly",
                self.n
            )));
        }

        let mut augmentations = 0;
        while self.augment_once()? {
            augmentations += 1;
        }

        trace!(
            "Blossom: {augmentations} augmentations on {} nodes using {} ids",
            self.n, self.n_x
        );

        Ok(())
    }

    /// Returns every matched pair `(u, v)` with `u < v`
    pub fn matched_pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.n).filter_map(|u| {
            let v = self.mate[u];
            (v != NONE && u < v).then_some((u, v))
        })
    }

    fn id_cost(&self, u: usize, v: usize) -> Weight {
        self.cost[u * self.n + v]
    }

    fn reduced_cost(&self, Edge(u, v): Edge) -> Weight {
        let (u, v) = (u as usize, v as usize);
        self.id_cost(u, v) - self.dual[u] - self.dual[v]
    }

    fn link(&self, x: usize, y: usize) -> Option<Edge> {
        self.link[x * 2 * self.n + y]
    }

    fn set_link(&mut self, x: usize, y: usize, edge: Option<Edge>) {
        let ids = 2 * self.n;
        self.link[x * ids + y] = edge;
    }

    fn edge_between(&self, x: usize, y: usize) -> Edge {
        self.link(x, y)
            .expect("distinct top-level ids of a complete graph are linked")
    }

    fn update_slack(&mut self, u: usize, x: usize) {
        let current = self.slack[x];
        if current == NONE
            || self.reduced_cost(self.edge_between(u, x))
                < self.reduced_cost(self.edge_between(current, x))
        {
            self.slack[x] = u;
        }
    }

    fn set_slack(&mut self, x: usize) {
        self.slack[x] = NONE;
        for u in 0..self.n {
            if self.top[u] != x
                && self.label[self.top[u]] == Label::Even
                && self.link(u, x).is_some()
            {
                self.update_slack(u, x);
            }
        }
    }

    fn push_queue(&mut self, x: usize) {
        if x < self.n {
            self.queue.push_back(x);
        } else {
            for i in 0..self.flower[x].len() {
                let y = self.flower[x][i];
                self.push_queue(y);
            }
        }
    }

    fn set_top(&mut self, x: usize, b: usize) {
        self.top[x] = b;
        if x >= self.n {
            for i in 0..self.flower[x].len() {
                let y = self.flower[x][i];
                self.set_top(y, b);
            }
        }
    }

    /// Returns the (even) position of sub-blossom `x` in `flower[b]`, reversing the cycle
    /// direction if required.
    fn position_in_flower(&mut self, b: usize, x: usize) -> usize {
        let pos = self.flower[b]
            .iter()
            .position(|&y| y == x)
            .expect("sub-blossom is part of its parent");

        if pos % 2 == 1 {
            self.flower[b][1..].reverse();
            self.flower[b].len() - pos
        } else {
            pos
        }
    }

    /// Matches the top-level id `u` along its link to `v`, recursively fixing the matching
    /// inside `u` and rotating its base.
    fn set_mate(&mut self, u: usize, v: usize) {
        let edge = self.edge_between(u, v);
        self.mate[u] = edge.1 as usize;
        if u < self.n {
            return;
        }

        let entry = self.flower_from[u * self.n + edge.0 as usize];
        let pos = self.position_in_flower(u, entry);
        for i in 0..pos {
            let (a, b) = (self.flower[u][i], self.flower[u][i ^ 1]);
            self.set_mate(a, b);
        }
        self.set_mate(entry, v);
        self.flower[u].rotate_left(pos);
    }

    /// Flips the alternating path from `u` up to its root, after `u` was matched to `v`
    fn augment(&mut self, mut u: usize, mut v: usize) {
        loop {
            let next = match self.mate[u] {
                NONE => NONE,
                m => self.top[m],
            };
            self.set_mate(u, v);
            if next == NONE {
                return;
            }

            let grand = self.top[self.parent[next]];
            self.set_mate(next, grand);
            u = grand;
            v = next;
        }
    }

    /// Walks up from the even ids `u` and `v` in alternation; returns the first id seen twice
    /// or None if the two nodes belong to different trees.
    fn lowest_common_ancestor(&mut self, mut u: usize, mut v: usize) -> Option<usize> {
        self.timestamp += 1;
        while u != NONE || v != NONE {
            if u != NONE {
                if self.visited[u] == self.timestamp {
                    return Some(u);
                }
                self.visited[u] = self.timestamp;

                u = match self.mate[u] {
                    NONE => NONE,
                    m => self.top[self.parent[self.top[m]]],
                };
            }
            std::mem::swap(&mut u, &mut v);
        }
        None
    }

    fn add_blossom(&mut self, u: usize, lca: usize, v: usize) {
        let mut b = self.n;
        while b < self.n_x && self.top[b] != NONE {
            b += 1;
        }
        if b == self.n_x {
            self.n_x += 1;
        }

        self.dual[b] = 0.0;
        self.label[b] = Label::Even;
        self.mate[b] = self.mate[lca];

        let mut flower = std::mem::take(&mut self.flower[b]);
        flower.clear();
        flower.push(lca);
        for (side, start) in [u, v].into_iter().enumerate() {
            let mut x = start;
            while x != lca {
                flower.push(x);
                let y = self.top[self.mate[x]];
                flower.push(y);
                self.push_queue(y);
                x = self.top[self.parent[y]];
            }
            if side == 0 {
                flower[1..].reverse();
            }
        }
        trace!("Blossom: contract {} sub-blossoms into {b}", flower.len());
        self.flower[b] = flower;
        self.set_top(b, b);

        for x in 0..self.n_x {
            self.set_link(b, x, None);
            self.set_link(x, b, None);
        }
        for x in 0..self.n {
            self.flower_from[b * self.n + x] = NONE;
        }

        for i in 0..self.flower[b].len() {
            let xs = self.flower[b][i];
            for x in 0..self.n_x {
                let Some(candidate) = self.link(xs, x) else {
                    continue;
                };

                let replace = match self.link(b, x) {
                    None => true,
                    Some(current) => self.reduced_cost(candidate) < self.reduced_cost(current),
                };
                if replace {
                    let reverse = self.link(x, xs);
                    self.set_link(b, x, Some(candidate));
                    self.set_link(x, b, reverse);
                }
            }

            for x in 0..self.n {
                if self.flower_from[xs * self.n + x] != NONE {
                    self.flower_from[b * self.n + x] = xs;
                }
            }
        }

        self.set_slack(b);
    }

    /// Dissolves the odd blossom `b` whose dual dropped to zero; the sub-blossoms on the even
    /// length path through `b` keep their place in the alternating tree.
    fn expand_blossom(&mut self, b: usize) {
        trace!("Blossom: expand {b}");
        for i in 0..self.flower[b].len() {
            let x = self.flower[b][i];
            self.set_top(x, x);
        }

        let entry = self.edge_between(b, self.parent[b]);
        let xr = self.flower_from[b * self.n + entry.0 as usize];
        let pos = self.position_in_flower(b, xr);

        for i in (0..pos).step_by(2) {
            let (xs, xns) = (self.flower[b][i], self.flower[b][i + 1]);
            self.parent[xs] = self.edge_between(xns, xs).0 as usize;
            self.label[xs] = Label::Odd;
            self.label[xns] = Label::Even;
            self.slack[xs] = NONE;
            self.set_slack(xns);
            self.push_queue(xns);
        }

        self.label[xr] = Label::Odd;
        self.parent[xr] = self.parent[b];

        for i in (pos + 1)..self.flower[b].len() {
            let xs = self.flower[b][i];
            self.label[xs] = Label::Unlabeled;
            self.set_slack(xs);
        }

        self.top[b] = NONE;
    }

    /// Handles a tight edge leaving an even id. Returns true if an augmentation took place.
    fn on_tight_edge(&mut self, edge: Edge) -> bool {
        let (eu, ev) = (edge.0 as usize, edge.1 as usize);
        let (u, v) = (self.top[eu], self.top[ev]);

        match self.label[v] {
            Label::Unlabeled => {
                self.parent[v] = eu;
                self.label[v] = Label::Odd;
                let next = self.top[self.mate[v]];
                self.slack[v] = NONE;
                self.slack[next] = NONE;
                self.label[next] = Label::Even;
                self.push_queue(next);
                false
            }
            Label::Even => match self.lowest_common_ancestor(u, v) {
                None => {
                    self.augment(u, v);
                    self.augment(v, u);
                    true
                }
                Some(lca) => {
                    self.add_blossom(u, lca, v);
                    false
                }
            },
            Label::Odd => false,
        }
    }

    /// Runs one stage: grows the alternating forest from all exposed ids, adjusting duals
    /// whenever the forest gets stuck. Returns false if there was nothing left to match.
    fn augment_once(&mut self) -> Result<bool, InvariantViolation> {
        self.label[..self.n_x].fill(Label::Unlabeled);
        self.slack[..self.n_x].fill(NONE);
        self.queue.clear();

        for x in 0..self.n_x {
            if self.top[x] == x && self.mate[x] == NONE {
                self.parent[x] = NONE;
                self.label[x] = Label::Even;
                self.push_queue(x);
            }
        }

        if self.queue.is_empty() {
            return Ok(false);
        }

        loop {
            while let Some(u) = self.queue.pop_front() {
                if self.label[self.top[u]] == Label::Odd {
                    continue;
                }

                for v in 0..self.n {
                    if self.top[u] == self.top[v] {
                        continue;
                    }

                    let edge = self.edge_between(u, v);
                    if self.reduced_cost(edge) <= EPSILON {
                        if self.on_tight_edge(edge) {
                            return Ok(true);
                        }
                    } else {
                        let target = self.top[v];
                        self.update_slack(u, target);
                    }
                }
            }

            let delta = self.next_dual_step()?;
            self.apply_dual_step(delta);

            self.queue.clear();
            for x in 0..self.n_x {
                let s = self.slack[x];
                if self.top[x] != x || s == NONE || self.top[s] == x {
                    continue;
                }

                let edge = self.edge_between(s, x);
                if self.reduced_cost(edge) <= EPSILON && self.on_tight_edge(edge) {
                    return Ok(true);
                }
            }

            for b in self.n..self.n_x {
                if self.top[b] == b && self.label[b] == Label::Odd && self.dual[b] <= EPSILON {
                    self.expand_blossom(b);
                }
            }
        }
    }

    /// Largest dual change keeping all reduced costs and blossom duals non-negative
    fn next_dual_step(&self) -> Result<Weight, InvariantViolation> {
        let mut delta = Weight::INFINITY;

        for b in self.n..self.n_x {
            if self.top[b] == b && self.label[b] == Label::Odd {
                delta = delta.min(self.dual[b] / 2.0);
            }
        }

        for x in 0..self.n_x {
            let s = self.slack[x];
            if self.top[x] != x || s == NONE {
                continue;
            }

            let reduced = self.reduced_cost(self.edge_between(s, x));
            match self.label[x] {
                Label::Unlabeled => delta = delta.min(reduced),
                Label::Even => delta = delta.min(reduced / 2.0),
                Label::Odd => {}
            }
        }

        if delta.is_finite() {
            Ok(delta.max(0.0))
        } else {
            Err(InvariantViolation::StalledSearch)
        }
    }

    fn apply_dual_step(&mut self, delta: Weight) {
        for u in 0..self.n {
            match self.label[self.top[u]] {
                Label::Even => self.dual[u] += delta,
                Label::Odd => self.dual[u] -= delta,
                Label::Unlabeled => {}
            }
        }

        for b in self.n..self.n_x {
            if self.top[b] != b {
                continue;
            }
            match self.label[b] {
                Label::Even => self.dual[b] += 2.0 * delta,
                Label::Odd => self.dual[b] -= 2.0 * delta,
                Label::Unlabeled => {}
            }
        }
    }

    /// Real nodes contained in blossom `b`
    fn members_of(&self, b: usize) -> Vec<usize> {
        if b < self.n {
            return vec![b];
        }
        self.flower[b]
            .iter()
            .flat_map(|&x| self.members_of(x))
            .collect()
    }
}

/// Verifies the LP duality certificate: the matching is perfect, all reduced costs (with
/// blossom duals of shared blossoms added back) are non-negative, matched edges are tight,
/// and every blossom with positive dual contains the maximum number of matched edges.
impl InvariantCheck<InvariantViolation> for BlossomSolver {
    fn is_correct(&self) -> Result<(), InvariantViolation> {
        let n = self.n;
        let tolerance = EPSILON * (n.max(1) as Weight);

        for u in 0..n {
            let v = self.mate[u];
            if v == NONE || v >= n || self.mate[v] != u {
                return Err(InvariantViolation::ImperfectMatching(format!(
                    "node {u} is not matched symmetrically"
                )));
            }
        }

        let mut shared_dual = vec![0.0; n * n];
        for b in n..self.n_x {
            if self.top[b] == NONE {
                continue;
            }

            if self.dual[b] < -tolerance {
                return Err(InvariantViolation::DualInfeasible(format!(
                    "blossom {b} has negative dual {}",
                    self.dual[b]
                )));
            }

            let members = self.members_of(b);
            let mut internal_matched = 0;
            for &u in &members {
                for &v in &members {
                    shared_dual[u * n + v] += self.dual[b];
                    internal_matched += (u < v && self.mate[u] == v) as usize;
                }
            }

            if self.dual[b] > tolerance && 2 * internal_matched + 1 != members.len() {
                return Err(InvariantViolation::DualInfeasible(format!(
                    "blossom {b} with {} nodes contains {internal_matched} matched edges",
                    members.len()
                )));
            }
        }

        for u in 0..n {
            for v in (u + 1)..n {
                let reduced = self.id_cost(u, v) - self.dual[u] - self.dual[v]
                    + shared_dual[u * n + v];

                if reduced < -tolerance {
                    return Err(InvariantViolation::DualInfeasible(format!(
                        "edge {{{u}, {v}}} has negative reduced cost {reduced}"
                    )));
                }

                if self.mate[u] == v && reduced > tolerance {
                    return Err(InvariantViolation::DualInfeasible(format!(
                        "matched edge {{{u}, {v}}} is not tight (reduced cost {reduced})"
                    )));
                }
            }
        }

        Ok(())
    }
}
