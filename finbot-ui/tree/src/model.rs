use std::fmt;

use crate::errors::TreeError;

/// Position of a row inside a [`TreeRows`] snapshot.
///
/// Ids come from a pre-order counter starting at `0` and are only meaningful
/// for the snapshot family produced by one [`flatten_tree`] call.
pub type RowId = usize;

/// Trait implemented by tree node types consumable by this crate.
pub trait TreeNode {
    /// Ordered children of the node.
    ///
    /// `None` and an empty slice both mark a leaf.
    fn children(&self) -> Option<&[Self]>
    where
        Self: Sized;
}

type SortKey<T> = dyn Fn(&T) -> f64;

/// Options controlling a single [`flatten_tree`] pass.
pub struct FlattenOptions<T> {
    sort_key: Option<Box<SortKey<T>>>,
    expand_all: bool,
}

impl<T> FlattenOptions<T> {
    /// Keep original child order and the default expansion rule.
    pub fn new() -> Self {
        Self {
            sort_key: None,
            expand_all: false,
        }
    }

    /// Sort siblings by descending score before descending into them.
    ///
    /// Scores are compared with [`f64::total_cmp`]; equal scores keep their
    /// original relative order.
    pub fn sort_key(mut self, sort_key: impl Fn(&T) -> f64 + 'static) -> Self {
        self.sort_key = Some(Box::new(sort_key));
        self
    }

    /// Start with every row expanded and visible.
    pub fn expand_all(mut self, expand_all: bool) -> Self {
        self.expand_all = expand_all;
        self
    }

    /// Return whether rows start fully expanded.
    pub fn is_expand_all(&self) -> bool {
        self.expand_all
    }

    fn sorted_indices(&self, nodes: &[T]) -> Vec<usize> {
        let mut ordered: Vec<usize> = (0..nodes.len()).collect();
        if let Some(sort_key) = self.sort_key.as_ref() {
            // `+ 0.0` folds `-0.0` into `0.0` so equal zeros stay stable.
            let scores: Vec<f64> =
                nodes.iter().map(|node| sort_key(node) + 0.0).collect();
            ordered.sort_by(|a, b| scores[*b].total_cmp(&scores[*a]));
        }
        ordered
    }
}

impl<T> Default for FlattenOptions<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for FlattenOptions<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlattenOptions")
            .field("sort_key", &self.sort_key.is_some())
            .field("expand_all", &self.expand_all)
            .finish()
    }
}

/// Expansion affordance shown in front of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Caret {
    /// Collapsed row with children.
    Right,
    /// Expanded row with children.
    Down,
    /// Leaf row, nothing to toggle.
    Blank,
}

impl Caret {
    /// Text glyph for the caret; empty for leaves.
    pub fn glyph(self) -> &'static str {
        match self {
            Caret::Right => "▸",
            Caret::Down => "▾",
            Caret::Blank => "",
        }
    }
}

/// One flattened tree node with its display state.
pub struct TreeRow<'a, T> {
    /// Pre-order position, equal to the row's index in its snapshot.
    pub id: RowId,
    /// Depth from the root (`0` for the root row).
    pub level: usize,
    /// Rank among siblings after sorting.
    pub order: usize,
    /// Whether the row's children take part in visibility.
    pub expanded: bool,
    /// Whether the row is currently rendered.
    pub visible: bool,
    /// Borrowed source node.
    pub node: &'a T,
}

impl<'a, T: TreeNode> TreeRow<'a, T> {
    /// Return whether the source node has no children.
    pub fn is_leaf(&self) -> bool {
        self.node.children().is_none_or(<[T]>::is_empty)
    }

    /// Return the caret matching the row's expansion state.
    pub fn caret(&self) -> Caret {
        if self.is_leaf() {
            Caret::Blank
        } else if self.expanded {
            Caret::Down
        } else {
            Caret::Right
        }
    }
}

impl<T> Clone for TreeRow<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TreeRow<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for TreeRow<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeRow")
            .field("id", &self.id)
            .field("level", &self.level)
            .field("order", &self.order)
            .field("expanded", &self.expanded)
            .field("visible", &self.visible)
            .field("node", self.node)
            .finish()
    }
}

/// Immutable snapshot of flattened rows.
///
/// Every toggle produces a new snapshot with the next version; the previous
/// one is left untouched so hosts can drop it whenever they like.
pub struct TreeRows<'a, T> {
    rows: Vec<TreeRow<'a, T>>,
    version: u64,
    expand_all: bool,
}

impl<'a, T: TreeNode> TreeRows<'a, T> {
    /// All rows in pre-order.
    pub fn rows(&self) -> &[TreeRow<'a, T>] {
        &self.rows
    }

    /// Row with the given id, if present.
    pub fn row(&self, id: RowId) -> Option<&TreeRow<'a, T>> {
        self.rows.get(id)
    }

    /// Rows that are currently visible, in pre-order.
    pub fn visible_rows(&self) -> impl Iterator<Item = &TreeRow<'a, T>> {
        self.rows.iter().filter(|row| row.visible)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of toggles applied since the snapshot family was flattened.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Whether the family was flattened in "expand all" mode.
    pub fn expand_all(&self) -> bool {
        self.expand_all
    }

    /// Flip the expansion of `id` and return the recomputed snapshot.
    ///
    /// Fails with [`TreeError::UnknownRow`] when `id` is outside the
    /// snapshot; the receiver is never modified.
    pub fn toggle_expansion(&self, id: RowId) -> Result<Self, TreeError> {
        if id >= self.rows.len() {
            log::warn!("toggle for unknown row {id} ignored");
            return Err(TreeError::UnknownRow {
                id,
                len: self.rows.len(),
            });
        }

        Ok(self.toggled(id))
    }

    /// Toggle a row known to exist in this snapshot.
    pub(crate) fn toggled(&self, id: RowId) -> Self {
        let mut rows = self.rows.clone();
        rows[id].expanded = !rows[id].expanded;
        recompute_visibility(&mut rows);

        let next = Self {
            rows,
            version: self.version + 1,
            expand_all: self.expand_all,
        };
        log::debug!(
            "row {id} toggled (expanded: {}), {}/{} rows visible, v{}",
            next.rows[id].expanded,
            next.visible_rows().count(),
            next.rows.len(),
            next.version,
        );
        next
    }
}

impl<T> Clone for TreeRows<'_, T> {
    fn clone(&self) -> Self {
        Self {
            rows: self.rows.clone(),
            version: self.version,
            expand_all: self.expand_all,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for TreeRows<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeRows")
            .field("version", &self.version)
            .field("expand_all", &self.expand_all)
            .field("rows", &self.rows)
            .finish()
    }
}

/// Flatten a tree into pre-order rows.
///
/// Siblings are ordered by descending `sort_key` score (stable). The root is
/// expanded, the root and its direct children are visible, and deeper rows
/// start collapsed and hidden unless `expand_all` is set.
pub fn flatten_tree<'a, T: TreeNode>(
    tree: Option<&'a T>,
    options: &FlattenOptions<T>,
) -> Result<TreeRows<'a, T>, TreeError> {
    let root = tree.ok_or(TreeError::MissingRoot)?;

    let mut rows = Vec::new();
    push_node(root, 0, 0, options, &mut rows);

    log::debug!(
        "flattened {} rows (expand_all: {})",
        rows.len(),
        options.expand_all
    );

    Ok(TreeRows {
        rows,
        version: 0,
        expand_all: options.expand_all,
    })
}

fn push_node<'a, T: TreeNode>(
    node: &'a T,
    level: usize,
    order: usize,
    options: &FlattenOptions<T>,
    rows: &mut Vec<TreeRow<'a, T>>,
) {
    rows.push(TreeRow {
        id: rows.len(),
        level,
        order,
        expanded: options.expand_all || level < 1,
        visible: options.expand_all || level <= 1,
        node,
    });

    if let Some(children) = node.children() {
        for (order, index) in
            options.sorted_indices(children).into_iter().enumerate()
        {
            push_node(&children[index], level + 1, order, options, rows);
        }
    }
}

/// Single forward pass: a collapsed row hides every following row that is
/// deeper than it, until a row at or above its level appears.
fn recompute_visibility<T>(rows: &mut [TreeRow<'_, T>]) {
    let mut suppressed: Option<usize> = None;

    for row in rows.iter_mut() {
        match suppressed {
            Some(level) if row.level > level => row.visible = false,
            _ => {
                suppressed = None;
                row.visible = true;
            },
        }

        if !row.expanded && suppressed.is_none() {
            suppressed = Some(row.level);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct TestNode {
        title: String,
        score: f64,
        children: Option<Vec<TestNode>>,
    }

    impl TestNode {
        fn leaf(title: &str) -> Self {
            Self::scored(title, 0.0)
        }

        fn scored(title: &str, score: f64) -> Self {
            Self {
                title: title.to_owned(),
                score,
                children: None,
            }
        }

        fn branch(title: &str, children: Vec<Self>) -> Self {
            Self {
                title: title.to_owned(),
                score: 0.0,
                children: Some(children),
            }
        }
    }

    impl TreeNode for TestNode {
        fn children(&self) -> Option<&[Self]> {
            self.children.as_deref()
        }
    }

    fn titles(rows: &TreeRows<'_, TestNode>) -> Vec<String> {
        rows.rows().iter().map(|row| row.node.title.clone()).collect()
    }

    fn visible_titles(rows: &TreeRows<'_, TestNode>) -> Vec<String> {
        rows.visible_rows()
            .map(|row| row.node.title.clone())
            .collect()
    }

    fn scenario() -> TestNode {
        TestNode::branch(
            "A",
            vec![
                TestNode::branch(
                    "B",
                    vec![TestNode::leaf("D"), TestNode::leaf("E")],
                ),
                TestNode::leaf("C"),
            ],
        )
    }

    /// Deterministic tree of `depth` levels where node `n` has `n % 4`
    /// children, driven by a small linear congruential generator.
    fn generated(seed: &mut u64, depth: usize) -> TestNode {
        *seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        let fan_out = if depth == 0 { 0 } else { (*seed >> 33) % 4 };
        let children = (0..fan_out)
            .map(|_| generated(seed, depth - 1))
            .collect::<Vec<_>>();
        TestNode {
            title: format!("n{}", *seed % 1000),
            score: ((*seed >> 40) % 5) as f64,
            children: if children.is_empty() {
                None
            } else {
                Some(children)
            },
        }
    }

    fn preorder<'t>(node: &'t TestNode, out: &mut Vec<&'t TestNode>) {
        out.push(node);
        for child in node.children().unwrap_or_default() {
            preorder(child, out);
        }
    }

    /// Visibility by the "every ancestor expanded" rule.
    fn ancestor_visibility(rows: &TreeRows<'_, TestNode>) -> Vec<bool> {
        let mut expanded_path: Vec<bool> = Vec::new();
        rows.rows()
            .iter()
            .map(|row| {
                expanded_path.truncate(row.level);
                let visible = expanded_path.iter().all(|expanded| *expanded);
                expanded_path.push(row.expanded);
                visible
            })
            .collect()
    }

    #[test]
    fn flatten_tree_rejects_missing_root() {
        let result = flatten_tree::<TestNode>(None, &FlattenOptions::new());
        assert_eq!(result.err(), Some(TreeError::MissingRoot));
    }

    #[test]
    fn flatten_tree_scenario_matches_default_rules() {
        let tree = scenario();
        let rows = flatten_tree(Some(&tree), &FlattenOptions::new())
            .expect("root is present");

        assert_eq!(titles(&rows), vec!["A", "B", "D", "E", "C"]);
        let state: Vec<(usize, bool, bool)> = rows
            .rows()
            .iter()
            .map(|row| (row.level, row.visible, row.expanded))
            .collect();
        assert_eq!(
            state,
            vec![
                (0, true, true),
                (1, true, false),
                (2, false, false),
                (2, false, false),
                (1, true, false),
            ]
        );
        assert_eq!(visible_titles(&rows), vec!["A", "B", "C"]);
    }

    #[test]
    fn toggling_scenario_branch_shows_then_hides_its_children() {
        let tree = scenario();
        let rows = flatten_tree(Some(&tree), &FlattenOptions::new())
            .expect("root is present");

        let opened = rows.toggle_expansion(1).expect("row exists");
        assert_eq!(visible_titles(&opened), vec!["A", "B", "D", "E", "C"]);

        let closed = opened.toggle_expansion(1).expect("row exists");
        assert_eq!(visible_titles(&closed), vec!["A", "B", "C"]);
        assert!(closed.row(0).is_some_and(|row| row.visible));
        assert!(closed.row(4).is_some_and(|row| row.visible));
    }

    #[test]
    fn flatten_tree_covers_every_node_with_contiguous_ids() {
        let mut seed = 7;
        for depth in 0..6 {
            let tree = generated(&mut seed, depth);
            let rows = flatten_tree(Some(&tree), &FlattenOptions::new())
                .expect("root is present");

            let mut nodes = Vec::new();
            preorder(&tree, &mut nodes);

            assert_eq!(rows.len(), nodes.len());
            for (index, (row, node)) in
                rows.rows().iter().zip(&nodes).enumerate()
            {
                assert_eq!(row.id, index);
                assert!(std::ptr::eq(row.node, *node));
            }
        }
    }

    #[test]
    fn flatten_tree_levels_match_ancestor_count() {
        let tree = TestNode::branch(
            "root",
            vec![TestNode::branch(
                "a",
                vec![TestNode::branch("b", vec![TestNode::leaf("c")])],
            )],
        );
        let rows = flatten_tree(Some(&tree), &FlattenOptions::new())
            .expect("root is present");

        let levels: Vec<usize> =
            rows.rows().iter().map(|row| row.level).collect();
        assert_eq!(levels, vec![0, 1, 2, 3]);
    }

    #[test]
    fn flatten_tree_sorts_siblings_by_descending_score() {
        let tree = TestNode::branch(
            "root",
            vec![
                TestNode::scored("three", 3.0),
                TestNode::scored("one", 1.0),
                TestNode::scored("two", 2.0),
            ],
        );
        let options =
            FlattenOptions::new().sort_key(|node: &TestNode| node.score);
        let rows =
            flatten_tree(Some(&tree), &options).expect("root is present");

        assert_eq!(titles(&rows), vec!["root", "three", "two", "one"]);
        let orders: Vec<usize> =
            rows.rows().iter().map(|row| row.order).collect();
        assert_eq!(orders, vec![0, 0, 1, 2]);
    }

    #[test]
    fn flatten_tree_keeps_original_order_for_equal_scores() {
        let tree = TestNode::branch(
            "root",
            vec![
                TestNode::scored("first", 1.0),
                TestNode::scored("big", 5.0),
                TestNode::scored("second", 1.0),
                TestNode::scored("third", 1.0),
            ],
        );
        let options =
            FlattenOptions::new().sort_key(|node: &TestNode| node.score);
        let rows =
            flatten_tree(Some(&tree), &options).expect("root is present");

        assert_eq!(
            titles(&rows),
            vec!["root", "big", "first", "second", "third"]
        );
    }

    #[test]
    fn flatten_tree_treats_signed_zero_scores_as_equal() {
        let tree = TestNode::branch(
            "root",
            vec![
                TestNode::scored("first", -0.0),
                TestNode::scored("second", 0.0),
            ],
        );
        let options =
            FlattenOptions::new().sort_key(|node: &TestNode| node.score);
        let rows =
            flatten_tree(Some(&tree), &options).expect("root is present");

        assert_eq!(titles(&rows), vec!["root", "first", "second"]);
    }

    #[test]
    fn flatten_tree_without_sort_key_keeps_child_order() {
        let tree = TestNode::branch(
            "root",
            vec![TestNode::scored("low", 1.0), TestNode::scored("high", 9.0)],
        );
        let rows = flatten_tree(Some(&tree), &FlattenOptions::new())
            .expect("root is present");

        assert_eq!(titles(&rows), vec!["root", "low", "high"]);
    }

    #[test]
    fn flatten_tree_resets_sibling_order_per_parent() {
        let tree = TestNode::branch(
            "root",
            vec![
                TestNode::branch(
                    "a",
                    vec![TestNode::leaf("a1"), TestNode::leaf("a2")],
                ),
                TestNode::branch("b", vec![TestNode::leaf("b1")]),
            ],
        );
        let rows = flatten_tree(Some(&tree), &FlattenOptions::new())
            .expect("root is present");

        let orders: Vec<(String, usize)> = rows
            .rows()
            .iter()
            .map(|row| (row.node.title.clone(), row.order))
            .collect();
        assert_eq!(orders[4], (String::from("b"), 1));
        assert_eq!(orders[5], (String::from("b1"), 0));
    }

    #[test]
    fn flatten_tree_expand_all_starts_everything_open() {
        let tree = scenario();
        let rows =
            flatten_tree(Some(&tree), &FlattenOptions::new().expand_all(true))
                .expect("root is present");

        assert!(rows.expand_all());
        assert!(rows.rows().iter().all(|row| row.expanded && row.visible));
    }

    #[test]
    fn toggle_expansion_rejects_unknown_row_without_changes() {
        let tree = scenario();
        let rows = flatten_tree(Some(&tree), &FlattenOptions::new())
            .expect("root is present");

        let result = rows.toggle_expansion(5);

        assert_eq!(result.err(), Some(TreeError::UnknownRow { id: 5, len: 5 }));
        assert_eq!(rows.version(), 0);
        assert_eq!(visible_titles(&rows), vec!["A", "B", "C"]);
    }

    #[test]
    fn toggle_expansion_returns_new_version_and_keeps_receiver() {
        let tree = scenario();
        let rows = flatten_tree(Some(&tree), &FlattenOptions::new())
            .expect("root is present");

        let next = rows.toggle_expansion(1).expect("row exists");

        assert_eq!(next.version(), 1);
        assert_eq!(rows.version(), 0);
        assert!(!rows.rows()[1].expanded);
        assert!(next.rows()[1].expanded);
    }

    #[test]
    fn toggle_expansion_never_changes_structure() {
        let mut seed = 99;
        let tree = generated(&mut seed, 5);
        let mut rows = flatten_tree(Some(&tree), &FlattenOptions::new())
            .expect("root is present");
        let structure = |rows: &TreeRows<'_, TestNode>| {
            rows.rows()
                .iter()
                .map(|row| (row.id, row.level, row.order))
                .collect::<Vec<_>>()
        };
        let before = structure(&rows);

        for step in 0..rows.len() * 2 {
            let id = (step * 7) % rows.len();
            rows = rows.toggle_expansion(id).expect("row exists");
            assert_eq!(structure(&rows), before);
        }
    }

    #[test]
    fn toggle_expansion_matches_ancestor_rule() {
        let mut seed = 2024;
        for depth in 1..6 {
            let tree = generated(&mut seed, depth);
            let mut rows = flatten_tree(Some(&tree), &FlattenOptions::new())
                .expect("root is present");

            for step in 0..rows.len() * 3 {
                seed = seed.wrapping_mul(6364136223846793005).wrapping_add(3);
                let id = (seed >> 33) as usize % rows.len();
                rows = rows.toggle_expansion(id).expect("row exists");

                let visible: Vec<bool> =
                    rows.rows().iter().map(|row| row.visible).collect();
                assert_eq!(visible, ancestor_visibility(&rows), "step {step}");
            }
        }
    }

    #[test]
    fn collapsing_hides_exactly_the_subtree() {
        let tree = TestNode::branch(
            "root",
            vec![
                TestNode::branch(
                    "a",
                    vec![
                        TestNode::branch("a1", vec![TestNode::leaf("a1x")]),
                        TestNode::leaf("a2"),
                    ],
                ),
                TestNode::leaf("b"),
            ],
        );
        let rows =
            flatten_tree(Some(&tree), &FlattenOptions::new().expand_all(true))
                .expect("root is present");

        let collapsed = rows.toggle_expansion(1).expect("row exists");
        assert_eq!(visible_titles(&collapsed), vec!["root", "a", "b"]);

        let reopened = collapsed.toggle_expansion(1).expect("row exists");
        assert_eq!(
            visible_titles(&reopened),
            vec!["root", "a", "a1", "a1x", "a2", "b"]
        );
    }

    #[test]
    fn expanding_restores_only_previously_expanded_descendants() {
        let tree = TestNode::branch(
            "root",
            vec![TestNode::branch(
                "a",
                vec![TestNode::branch("a1", vec![TestNode::leaf("a1x")])],
            )],
        );
        let rows = flatten_tree(Some(&tree), &FlattenOptions::new())
            .expect("root is present");

        let opened = rows.toggle_expansion(1).expect("row exists");
        assert_eq!(visible_titles(&opened), vec!["root", "a", "a1"]);
    }

    #[test]
    fn expand_then_collapse_restores_visibility() {
        let mut seed = 31;
        let tree = generated(&mut seed, 4);
        let rows = flatten_tree(Some(&tree), &FlattenOptions::new())
            .expect("root is present");
        let before: Vec<bool> =
            rows.rows().iter().map(|row| row.visible).collect();

        for id in 0..rows.len() {
            let round_trip = rows
                .toggle_expansion(id)
                .and_then(|rows| rows.toggle_expansion(id))
                .expect("row exists");
            let after: Vec<bool> =
                round_trip.rows().iter().map(|row| row.visible).collect();
            assert_eq!(after, before, "row {id}");
        }
    }

    #[test]
    fn toggling_leaf_keeps_visibility() {
        let tree = scenario();
        let rows =
            flatten_tree(Some(&tree), &FlattenOptions::new().expand_all(true))
                .expect("root is present");

        let toggled = rows.toggle_expansion(4).expect("row exists");

        assert!(toggled.rows()[4].is_leaf());
        assert_eq!(visible_titles(&toggled), visible_titles(&rows));
    }

    #[test]
    fn empty_children_slice_is_a_leaf() {
        let tree =
            TestNode::branch("root", vec![TestNode::branch("empty", vec![])]);
        let rows = flatten_tree(Some(&tree), &FlattenOptions::new())
            .expect("root is present");

        assert!(!rows.rows()[0].is_leaf());
        assert!(rows.rows()[1].is_leaf());
        assert_eq!(rows.rows()[1].caret(), Caret::Blank);
    }

    #[test]
    fn caret_follows_expansion_state() {
        let tree = scenario();
        let rows = flatten_tree(Some(&tree), &FlattenOptions::new())
            .expect("root is present");

        assert_eq!(rows.rows()[0].caret(), Caret::Down);
        assert_eq!(rows.rows()[1].caret(), Caret::Right);
        assert_eq!(rows.rows()[2].caret(), Caret::Blank);
        assert_eq!(Caret::Right.glyph(), "▸");
        assert_eq!(Caret::Down.glyph(), "▾");
        assert_eq!(Caret::Blank.glyph(), "");
    }
}
