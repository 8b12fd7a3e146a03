//! Red/black tree keyed by string.
//!
//! # Layout
//!
//! Nodes live in an arena (`Vec<Node<V>>`) and refer to each other by
//! index: `parent`, `left` and `right` are `Option<usize>`.  Nodes are never
//! removed, so an index stays valid for the lifetime of the tree and a
//! rotation is only a handful of index reassignments.
//!
//! # Invariants
//!
//! 1. Every node is red or black; the root is black.
//! 2. No red node has a red child.
//! 3. Every path from a node down to an absent child crosses the same
//!    number of black nodes.
//!
//! Insertion adds a red leaf and repairs bottom-up (see [`RedBlackTree::insert`]).
//! There is no delete: the tree backs a monotonically growing name index.

use std::cmp::Ordering;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Color {
    Red,
    Black,
}

#[derive(Clone, Debug)]
pub(crate) struct Node<V> {
    pub(crate) key:    String,
    pub(crate) value:  V,
    pub(crate) color:  Color,
    pub(crate) parent: Option<usize>,
    pub(crate) left:   Option<usize>,
    pub(crate) right:  Option<usize>,
}

/// Height-balanced string-keyed map.
///
/// A tree always holds at least one entry: construction takes the seed
/// key/value that becomes the first root.
#[derive(Clone, Debug)]
pub struct RedBlackTree<V> {
    pub(crate) nodes: Vec<Node<V>>,
    pub(crate) root:  usize,
}

impl<V> RedBlackTree<V> {
    /// Create a tree whose (black) root holds `key → value`.
    pub fn new(key: impl Into<String>, value: V) -> Self {
        Self {
            nodes: vec![Node {
                key: key.into(),
                value,
                color: Color::Black,
                parent: None,
                left: None,
                right: None,
            }],
            root: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`; kept for API symmetry with the other indices.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Insert `key → value`.  An existing key has its value replaced in
    /// place and the previous value is returned; the shape does not change.
    ///
    /// Repair after attaching the new red leaf `n`:
    ///
    /// - `n` is the root → paint it black.
    /// - parent is black → done.
    /// - uncle is red → parent and uncle black, grandparent red, continue
    ///   from the grandparent.
    /// - uncle absent or black → if `n` is an inner grandchild, rotate the
    ///   parent to straighten the path; then rotate the grandparent the
    ///   other way and swap colors (new top black, old grandparent red).
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();

        // ── BST descent ──────────────────────────────────────────────────
        let mut cur = self.root;
        let (parent, go_left) = loop {
            let node = &self.nodes[cur];
            match key.as_str().cmp(node.key.as_str()) {
                Ordering::Equal => {
                    return Some(std::mem::replace(&mut self.nodes[cur].value, value));
                }
                Ordering::Less => match node.left {
                    Some(l) => cur = l,
                    None => break (cur, true),
                },
                Ordering::Greater => match node.right {
                    Some(r) => cur = r,
                    None => break (cur, false),
                },
            }
        };

        let inserted = self.nodes.len();
        self.nodes.push(Node {
            key,
            value,
            color: Color::Red,
            parent: Some(parent),
            left: None,
            right: None,
        });
        if go_left {
            self.nodes[parent].left = Some(inserted);
        } else {
            self.nodes[parent].right = Some(inserted);
        }

        self.rebalance(inserted);

        // Rotations may have lifted a new node to the top.
        let mut top = inserted;
        while let Some(p) = self.nodes[top].parent {
            top = p;
        }
        self.root = top;
        self.nodes[top].color = Color::Black;

        None
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.find(key).map(|i| &self.nodes[i].value)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.find(key).map(|i| &mut self.nodes[i].value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Values in pre-order (node, left, right).
    pub fn pre_order(&self) -> Vec<&V> {
        let mut out = Vec::with_capacity(self.len());
        self.walk(Some(self.root), Order::Pre, &mut out);
        out
    }

    /// Values in in-order (left, node, right): ascending key order.
    pub fn in_order(&self) -> Vec<&V> {
        let mut out = Vec::with_capacity(self.len());
        self.walk(Some(self.root), Order::In, &mut out);
        out
    }

    /// Values in post-order (left, right, node).
    pub fn post_order(&self) -> Vec<&V> {
        let mut out = Vec::with_capacity(self.len());
        self.walk(Some(self.root), Order::Post, &mut out);
        out
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> Vec<&str> {
        let mut out = Vec::with_capacity(self.len());
        let mut stack = Vec::new();
        let mut cur = Some(self.root);
        while cur.is_some() || !stack.is_empty() {
            while let Some(i) = cur {
                stack.push(i);
                cur = self.nodes[i].left;
            }
            if let Some(i) = stack.pop() {
                out.push(self.nodes[i].key.as_str());
                cur = self.nodes[i].right;
            }
        }
        out
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        fn go<V>(t: &RedBlackTree<V>, n: Option<usize>) -> usize {
            match n {
                None => 0,
                Some(i) => 1 + go(t, t.nodes[i].left).max(go(t, t.nodes[i].right)),
            }
        }
        go(self, Some(self.root))
    }

    /// Key stored at the root.
    pub fn root_key(&self) -> &str {
        &self.nodes[self.root].key
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn find(&self, key: &str) -> Option<usize> {
        let mut cur = Some(self.root);
        while let Some(i) = cur {
            let node = &self.nodes[i];
            cur = match key.cmp(node.key.as_str()) {
                Ordering::Equal => return Some(i),
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
        }
        None
    }

    fn color(&self, n: Option<usize>) -> Color {
        n.map_or(Color::Black, |i| self.nodes[i].color)
    }

    fn is_left_child(&self, n: usize) -> bool {
        self.nodes[n]
            .parent
            .is_some_and(|p| self.nodes[p].left == Some(n))
    }

    fn rebalance(&mut self, mut n: usize) {
        loop {
            let Some(mut p) = self.nodes[n].parent else {
                self.nodes[n].color = Color::Black;
                return;
            };
            if self.nodes[p].color == Color::Black {
                return;
            }
            // A red parent is never the root, but stay total anyway.
            let Some(g) = self.nodes[p].parent else {
                self.nodes[p].color = Color::Black;
                return;
            };

            let parent_is_left = self.nodes[g].left == Some(p);
            let uncle = if parent_is_left {
                self.nodes[g].right
            } else {
                self.nodes[g].left
            };

            if let (Color::Red, Some(u)) = (self.color(uncle), uncle) {
                self.nodes[p].color = Color::Black;
                self.nodes[u].color = Color::Black;
                self.nodes[g].color = Color::Red;
                n = g;
                continue;
            }

            // Bent path: straighten it so `n` and `p` lean the same way.
            let n_is_left = self.is_left_child(n);
            if parent_is_left && !n_is_left {
                self.rotate_left(p);
                std::mem::swap(&mut n, &mut p);
            } else if !parent_is_left && n_is_left {
                self.rotate_right(p);
                std::mem::swap(&mut n, &mut p);
            }

            self.nodes[p].color = Color::Black;
            self.nodes[g].color = Color::Red;
            if parent_is_left {
                self.rotate_right(g);
            } else {
                self.rotate_left(g);
            }
            return;
        }
    }

    /// Lift `x.right` into `x`'s position.
    fn rotate_left(&mut self, x: usize) {
        let Some(y) = self.nodes[x].right else { return };
        let y_left = self.nodes[y].left;

        self.nodes[x].right = y_left;
        if let Some(b) = y_left {
            self.nodes[b].parent = Some(x);
        }
        self.replace_child(x, y);
        self.nodes[y].left = Some(x);
        self.nodes[x].parent = Some(y);
    }

    /// Lift `x.left` into `x`'s position.
    fn rotate_right(&mut self, x: usize) {
        let Some(y) = self.nodes[x].left else { return };
        let y_right = self.nodes[y].right;

        self.nodes[x].left = y_right;
        if let Some(b) = y_right {
            self.nodes[b].parent = Some(x);
        }
        self.replace_child(x, y);
        self.nodes[y].right = Some(x);
        self.nodes[x].parent = Some(y);
    }

    /// Point `old`'s parent (if any) at `new` instead, and give `new` that parent.
    fn replace_child(&mut self, old: usize, new: usize) {
        let parent = self.nodes[old].parent;
        self.nodes[new].parent = parent;
        if let Some(p) = parent {
            if self.nodes[p].left == Some(old) {
                self.nodes[p].left = Some(new);
            } else {
                self.nodes[p].right = Some(new);
            }
        }
    }

    fn walk<'a>(&'a self, n: Option<usize>, order: Order, out: &mut Vec<&'a V>) {
        let Some(i) = n else { return };
        let node = &self.nodes[i];
        if order == Order::Pre {
            out.push(&node.value);
        }
        self.walk(node.left, order, out);
        if order == Order::In {
            out.push(&node.value);
        }
        self.walk(node.right, order, out);
        if order == Order::Post {
            out.push(&node.value);
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq)]
enum Order {
    Pre,
    In,
    Post,
}
