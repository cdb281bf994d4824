//! Search engine: BFS, cost-weighted depth-limited search, A*.
//!
//! Все алгоритмы реализованы как чистые функции поверх [`GridModel`]. Узлы живут в арене
//! [`SearchTree`], parent: индекс ([`NodeId`]), не ссылка. Восстановление пути
//! идёт по индексам от найденного узла к корню.
//!
//! NotFound: ожидаемый результат, не ошибка: вызывающий получает лучший
//! частичный путь (к самому глубокому осмотренному узлу) и последнюю стоимость.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet, VecDeque};

use crate::grid::{GridModel, Position};

/// Путь от старта до цели включительно
pub type Path = Vec<Position>;

/// Стоимость шага до pickup
pub const STEP_COST: f32 = 1.0;
/// Стоимость шага после pickup (скидка, но стоимость остаётся неотрицательной)
pub const DISCOUNTED_STEP_COST: f32 = 0.5;

/// Handle узла в арене [`SearchTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq)]
pub struct SearchNode {
    pub state: Position,
    pub parent: Option<NodeId>,
    /// Накопленная стоимость g(n), всегда ≥ 0
    pub cost: f32,
    /// Оценка h(n) до цели (0 для BFS/DLS)
    pub heuristic: f32,
    /// Число рёбер от корня
    pub depth: u32,
    /// DLS: путь уже прошёл через pickup
    pub has_pickup: bool,
}

impl SearchNode {
    /// f(n) = g(n) + h(n)
    pub fn priority(&self) -> f32 {
        self.cost + self.heuristic
    }
}

/// Арена узлов одного вызова поиска
#[derive(Debug, Default)]
pub struct SearchTree {
    nodes: Vec<SearchNode>,
}

impl SearchTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_root(&mut self, state: Position, heuristic: f32) -> NodeId {
        self.insert(SearchNode {
            state,
            parent: None,
            cost: 0.0,
            heuristic,
            depth: 0,
            has_pickup: false,
        })
    }

    pub fn insert(&mut self, node: SearchNode) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    /// Дочерний узел: depth = parent.depth + 1
    pub fn insert_child(
        &mut self,
        parent: NodeId,
        state: Position,
        cost: f32,
        heuristic: f32,
        has_pickup: bool,
    ) -> NodeId {
        let depth = self.node(parent).depth + 1;
        self.insert(SearchNode {
            state,
            parent: Some(parent),
            cost,
            heuristic,
            depth,
            has_pickup,
        })
    }

    pub fn node(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Путь root → id (идём по parent handles, затем разворачиваем)
    pub fn path_to(&self, id: NodeId) -> Path {
        let mut path = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.node(node_id);
            path.push(node.state);
            current = node.parent;
        }
        path.reverse();
        path
    }
}

/// Результат одного вызова поиска
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Цель достигнута: полный путь и его стоимость
    Found { path: Path, cost: f32 },
    /// Цель не достигнута: путь к самому глубокому узлу + последняя увиденная стоимость
    NotFound { partial: Path, cost: f32 },
}

impl SearchOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found { .. })
    }

    /// Полный путь (Found) или лучший частичный (NotFound)
    pub fn path(&self) -> &Path {
        match self {
            SearchOutcome::Found { path, .. } => path,
            SearchOutcome::NotFound { partial, .. } => partial,
        }
    }

    pub fn cost(&self) -> f32 {
        match self {
            SearchOutcome::Found { cost, .. } | SearchOutcome::NotFound { cost, .. } => *cost,
        }
    }

    /// Первый ход пути. None: агент остаётся на месте (путь из одной клетки или пустой).
    pub fn first_step(&self) -> Option<Position> {
        self.path().get(1).copied()
    }

    /// Число рёбер в пути
    pub fn steps(&self) -> usize {
        self.path().len().saturating_sub(1)
    }
}

/// Самый глубокий осмотренный узел (при равной глубине первый)
#[derive(Debug, Default)]
struct DeepestNode(Option<(NodeId, u32)>);

impl DeepestNode {
    fn observe(&mut self, tree: &SearchTree, id: NodeId) {
        let depth = tree.node(id).depth;
        match self.0 {
            Some((_, best)) if best >= depth => {}
            _ => self.0 = Some((id, depth)),
        }
    }

    fn partial_path(&self, tree: &SearchTree) -> Path {
        self.0.map(|(id, _)| tree.path_to(id)).unwrap_or_default()
    }
}

/// Breadth-first search (FIFO). Кратчайший путь по числу шагов.
pub fn breadth_first_search(origin: Position, target: Position, grid: &GridModel) -> SearchOutcome {
    let mut tree = SearchTree::new();
    let mut frontier = VecDeque::new();
    let mut explored: HashSet<Position> = HashSet::new();
    let mut deepest = DeepestNode::default();
    let mut last_cost = 0.0;

    frontier.push_back(tree.insert_root(origin, 0.0));

    while let Some(id) = frontier.pop_front() {
        let node = tree.node(id).clone();
        last_cost = node.cost;

        if node.state == target {
            return SearchOutcome::Found {
                path: tree.path_to(id),
                cost: node.cost,
            };
        }

        // Дубликаты в очереди: первое извлечение уже было на минимальной глубине
        if !explored.insert(node.state) {
            continue;
        }
        deepest.observe(&tree, id);

        for next in grid.neighbors(node.state) {
            if !explored.contains(&next) {
                let child = tree.insert_child(id, next, node.cost + STEP_COST, 0.0, false);
                frontier.push_back(child);
            }
        }
    }

    SearchOutcome::NotFound {
        partial: deepest.partial_path(&tree),
        cost: last_cost,
    }
}

/// Cost-weighted depth-limited search (LIFO) с pickup-скидкой.
///
/// `depth_limit`: потолок накопленной стоимости, не числа шагов: после pickup шаг
/// стоит [`DISCOUNTED_STEP_COST`], поэтому путь через pickup может содержать больше
/// рёбер, чем `depth_limit`. Скидка действует только на ходы после pickup.
pub fn depth_limited_search(
    origin: Position,
    target: Position,
    pickup: Position,
    depth_limit: f32,
    grid: &GridModel,
) -> SearchOutcome {
    depth_limited_search_from(origin, target, pickup, false, depth_limit, grid)
}

/// DLS с явным стартовым флагом: `start_with_pickup` даёт скидку с первого шага
/// (агент подобрал pickup в одном из прошлых ходов).
pub fn depth_limited_search_from(
    origin: Position,
    target: Position,
    pickup: Position,
    start_with_pickup: bool,
    depth_limit: f32,
    grid: &GridModel,
) -> SearchOutcome {
    let mut tree = SearchTree::new();
    let root = tree.insert(SearchNode {
        state: origin,
        parent: None,
        cost: 0.0,
        heuristic: 0.0,
        depth: 0,
        has_pickup: start_with_pickup,
    });
    let mut stack = vec![root];
    let mut explored: HashSet<Position> = HashSet::new();
    let mut deepest = DeepestNode::default();
    let mut last_cost = 0.0;

    while let Some(id) = stack.pop() {
        let node = tree.node(id).clone();
        last_cost = node.cost;

        if node.state == target {
            return SearchOutcome::Found {
                path: tree.path_to(id),
                cost: node.cost,
            };
        }

        if explored.contains(&node.state) {
            continue;
        }
        deepest.observe(&tree, id);

        if node.cost >= depth_limit {
            continue;
        }
        explored.insert(node.state);

        let step_cost = if node.has_pickup {
            DISCOUNTED_STEP_COST
        } else {
            STEP_COST
        };

        for next in grid.neighbors(node.state) {
            let has_pickup = node.has_pickup || next == pickup;
            let child = tree.insert_child(id, next, node.cost + step_cost, 0.0, has_pickup);
            stack.push(child);
        }
    }

    SearchOutcome::NotFound {
        partial: deepest.partial_path(&tree),
        cost: last_cost,
    }
}

/// Элемент приоритетной очереди A*: min по f(n), при равенстве: FIFO по seq
#[derive(Debug, Clone, Copy)]
struct FrontierEntry {
    priority: f32,
    seq: u64,
    node: NodeId,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    // BinaryHeap это max-heap, порядок обратный
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// A* с Manhattan-эвристикой (admissible + consistent на 4-связной сетке)
pub fn a_star_search(origin: Position, target: Position, grid: &GridModel) -> SearchOutcome {
    let heuristic = |position: Position| position.manhattan(target) as f32;

    let mut tree = SearchTree::new();
    let mut frontier = BinaryHeap::new();
    let mut explored: HashSet<Position> = HashSet::new();
    let mut deepest = DeepestNode::default();
    let mut last_cost = 0.0;
    let mut seq = 0u64;

    let root = tree.insert_root(origin, heuristic(origin));
    frontier.push(FrontierEntry {
        priority: tree.node(root).priority(),
        seq,
        node: root,
    });

    while let Some(entry) = frontier.pop() {
        let node = tree.node(entry.node).clone();
        last_cost = node.cost;

        if node.state == target {
            return SearchOutcome::Found {
                path: tree.path_to(entry.node),
                cost: node.cost,
            };
        }

        if !explored.insert(node.state) {
            continue;
        }
        deepest.observe(&tree, entry.node);

        for next in grid.neighbors(node.state) {
            if explored.contains(&next) {
                continue;
            }
            let child = tree.insert_child(
                entry.node,
                next,
                node.cost + STEP_COST,
                heuristic(next),
                false,
            );
            seq += 1;
            frontier.push(FrontierEntry {
                priority: tree.node(child).priority(),
                seq,
                node: child,
            });
        }
    }

    SearchOutcome::NotFound {
        partial: deepest.partial_path(&tree),
        cost: last_cost,
    }
}
