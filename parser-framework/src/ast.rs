use common_framework::TextLoc;
use std::any::Any;
use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::rc::{Rc, Weak};

/// Enumeration identifying the concrete variants of a grammar's AST nodes.
///
/// The enumeration belongs to the grammar, not to this framework; any small
/// `Copy` enum qualifies.
pub trait NodeTag: Copy + Eq + fmt::Debug + 'static {}

impl<T> NodeTag for T where T: Copy + Eq + fmt::Debug + 'static {}

/// Shared handle to any node of a tree tagged by `T`.
pub type Node<T> = Rc<dyn AstNode<T>>;

/// Parent/child bookkeeping embedded in every AST node.
///
/// A node owns its children through the typed fields of its concrete type;
/// the base only keeps non-owning links, so dropping a root releases the
/// whole subtree and parents never keep children alive twice.
pub struct AstBase<T: NodeTag> {
    this: Weak<dyn AstNode<T>>,
    parent: RefCell<Weak<dyn AstNode<T>>>,
    childs: Vec<Weak<dyn AstNode<T>>>,
    loc: TextLoc,
}

impl<T: NodeTag> AstBase<T> {
    /// Allocates a node whose base spans `loc`.
    ///
    /// `build` receives the base (already knowing where the node will live)
    /// and returns the finished node. Children are adopted inside `build`
    /// with [`AstBase::add_child`]; afterwards the base is shared and no
    /// longer mutable.
    pub fn alloc<N, F>(loc: TextLoc, build: F) -> Rc<N>
    where
        N: AstNode<T> + 'static,
        F: FnOnce(AstBase<T>) -> N,
    {
        Rc::new_cyclic(|this: &Weak<N>| {
            let this: Weak<dyn AstNode<T>> = this.clone();
            build(AstBase {
                parent: RefCell::new(this.clone()),
                this,
                childs: Vec::new(),
                loc,
            })
        })
    }

    /// Makes `child` a child of the node being built.
    ///
    /// # Panics
    ///
    /// If `child` already has a parent, or is the node being built.
    pub fn add_child<N: AstNode<T> + ?Sized>(&mut self, child: &N) {
        let child_base = child.base();
        assert!(
            !Weak::ptr_eq(&child_base.this, &self.this),
            "AST node cannot be its own child"
        );
        assert!(child_base.is_root(), "AST node already has a parent");
        *child_base.parent.borrow_mut() = self.this.clone();
        self.childs.push(child_base.this.clone());
    }

    /// Adopts each of `childs` in order, as by [`AstBase::add_child`].
    pub fn add_childs<'a, N, I>(&mut self, childs: I)
    where
        N: AstNode<T> + ?Sized + 'a,
        I: IntoIterator<Item = &'a N>,
    {
        for child in childs {
            self.add_child(child);
        }
    }

    /// Returns `true` if the node is its own parent.
    pub fn is_root(&self) -> bool {
        Weak::ptr_eq(&self.parent.borrow(), &self.this)
    }

    /// The node's parent; the node itself when it is a root.
    ///
    /// # Panics
    ///
    /// If the parent has already been dropped.
    pub fn parent(&self) -> Node<T> {
        self.parent
            .borrow()
            .upgrade()
            .expect("AST node outlived its parent")
    }

    /// Walks parent links up to the root of the tree.
    ///
    /// # Panics
    ///
    /// If a link is dead or the links loop anywhere but at the root.
    pub fn root(&self) -> Node<T> {
        let mut node = self
            .this
            .upgrade()
            .expect("AST node is still under construction");
        let mut visited = HashSet::new();
        while !node.is_root() {
            assert!(
                visited.insert(Rc::as_ptr(&node) as *const ()),
                "cycle in AST parent links"
            );
            node = node.parent();
        }
        node
    }

    /// Copy of the node's children.
    pub fn childs(&self) -> Vec<Node<T>> {
        self.childs.iter().filter_map(Weak::upgrade).collect()
    }

    /// Returns `true` if `node` is one of this node's children.
    pub fn has_child<N: AstNode<T> + ?Sized>(&self, node: &N) -> bool {
        let this = &node.base().this;
        self.childs.iter().any(|child| Weak::ptr_eq(child, this))
    }

    /// Number of children still alive, matching [`AstBase::childs`].
    pub fn child_count(&self) -> usize {
        self.childs
            .iter()
            .filter(|child| child.strong_count() > 0)
            .count()
    }

    pub fn loc(&self) -> TextLoc {
        self.loc
    }
}

impl<T: NodeTag> fmt::Debug for AstBase<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AstBase")
            .field("loc", &self.loc)
            .field("is_root", &self.is_root())
            .field("childs", &self.childs.len())
            .finish()
    }
}

/// A node of an AST tagged by `T`.
///
/// Concrete node types embed an [`AstBase`] in a field named `base` and get
/// this trait from [`ast_node!`](crate::ast_node), which fixes their tag at
/// compile time.
pub trait AstNode<T: NodeTag> {
    fn base(&self) -> &AstBase<T>;

    /// The variant of this node.
    fn tag(&self) -> T;

    fn as_any(&self) -> &dyn Any;

    fn parent(&self) -> Node<T> {
        self.base().parent()
    }

    fn is_root(&self) -> bool {
        self.base().is_root()
    }

    fn root(&self) -> Node<T> {
        self.base().root()
    }

    fn childs(&self) -> Vec<Node<T>> {
        self.base().childs()
    }

    fn loc(&self) -> TextLoc {
        self.base().loc()
    }

    /// All nodes below this one, in pre-order.
    fn descendants(&self) -> Vec<Node<T>> {
        let mut out = Vec::new();
        let mut stack: Vec<Node<T>> = self.childs().into_iter().rev().collect();
        while let Some(node) = stack.pop() {
            stack.extend(node.childs().into_iter().rev());
            out.push(node);
        }
        out
    }
}

impl<'a, T: NodeTag> fmt::Debug for dyn AstNode<T> + 'a {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{}", self.tag(), self.loc())
    }
}

/// A node type bound to a single tag value.
pub trait TypedNode<T: NodeTag>: AstNode<T> {
    const TAG: T;
}

/// Marks the types that are AST node classes for tags `T`: the abstract
/// `dyn AstNode<T>` itself and every concrete node declared with
/// [`ast_node!`](crate::ast_node).
pub trait AstNodeClass<T: NodeTag> {
    /// `true` only for the abstract node type.
    const IS_BASE: bool;
}

impl<T: NodeTag> AstNodeClass<T> for dyn AstNode<T> {
    const IS_BASE: bool = true;
}

/// Whether `X` is an AST node class for tags `T`. Only compiles when it is.
pub const fn is_ast_node_class<T: NodeTag, X: AstNodeClass<T> + ?Sized>() -> bool {
    true
}

/// Whether `X` is a concrete AST node class, as opposed to the abstract
/// `dyn AstNode<T>`.
pub const fn is_ast_node_subclass<T: NodeTag, X: AstNodeClass<T> + ?Sized>() -> bool {
    !X::IS_BASE
}

/// Narrows `node` to the concrete type `N` if its tag says it is one.
pub fn downcast_node<T, N>(node: &dyn AstNode<T>) -> Option<&N>
where
    T: NodeTag,
    N: TypedNode<T> + 'static,
{
    if node.tag() != N::TAG {
        return None;
    }
    node.as_any().downcast_ref::<N>()
}

/// Declares `$node` as the AST node class for `$tag` value `$value`.
///
/// `$node` must have a field `base: AstBase<$tag>`.
///
/// ```
/// use parser_framework::{ast_node, AstBase, AstNode, TextLoc};
/// use std::rc::Rc;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// enum Nt {
///     Literal,
/// }
///
/// struct Literal {
///     base: AstBase<Nt>,
/// }
///
/// ast_node!(Literal, Nt => Nt::Literal);
///
/// let node: Rc<Literal> = AstBase::alloc(TextLoc::new(1, 1, 1, 3), |base| Literal { base });
/// assert_eq!(node.tag(), Nt::Literal);
/// assert!(node.is_root());
/// ```
#[macro_export]
macro_rules! ast_node {
    ($node:ty, $tag:ty => $value:expr) => {
        impl $crate::AstNode<$tag> for $node {
            fn base(&self) -> &$crate::AstBase<$tag> {
                &self.base
            }

            fn tag(&self) -> $tag {
                <Self as $crate::TypedNode<$tag>>::TAG
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }
        }

        impl $crate::TypedNode<$tag> for $node {
            const TAG: $tag = $value;
        }

        impl $crate::AstNodeClass<$tag> for $node {
            const IS_BASE: bool = false;
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast_node;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Nt {
        Leaf,
        Pair,
        Loose,
    }

    struct Leaf {
        base: AstBase<Nt>,
    }

    ast_node!(Leaf, Nt => Nt::Leaf);

    struct Pair {
        base: AstBase<Nt>,
        left: Node<Nt>,
        right: Node<Nt>,
    }

    ast_node!(Pair, Nt => Nt::Pair);

    /// Adopts children without keeping them alive.
    struct Loose {
        base: AstBase<Nt>,
    }

    ast_node!(Loose, Nt => Nt::Loose);

    fn leaf(col: usize) -> Node<Nt> {
        let node: Rc<Leaf> = AstBase::alloc(TextLoc::new(1, col, 1, col), |base| Leaf { base });
        node
    }

    fn pair(left: Node<Nt>, right: Node<Nt>) -> Rc<Pair> {
        let loc = common_framework::span_loc(&left.loc(), &right.loc());
        AstBase::alloc(loc, |mut base: AstBase<Nt>| {
            base.add_childs([&*left, &*right]);
            Pair { base, left, right }
        })
    }

    #[test]
    fn test_fresh_node_is_root() {
        let node = leaf(1);
        assert!(node.is_root());
        assert!(Rc::ptr_eq(&node.parent(), &node));
        assert!(Rc::ptr_eq(&node.root(), &node));
        assert!(node.childs().is_empty());
    }

    #[test]
    fn test_adoption_links_both_ways() {
        let left = leaf(1);
        let right = leaf(3);
        let parent = pair(left.clone(), right.clone());
        let parent_dyn: Node<Nt> = parent.clone();

        assert!(parent.is_root());
        assert!(!left.is_root());
        assert!(Rc::ptr_eq(&left.parent(), &parent_dyn));
        assert!(Rc::ptr_eq(&right.root(), &parent_dyn));
        assert!(parent.base.has_child(&*left));
        assert_eq!(parent.base.child_count(), 2);
        assert_eq!(parent.loc(), TextLoc::new(1, 1, 1, 3));
        assert!(Rc::ptr_eq(&parent.left, &left));
        assert!(Rc::ptr_eq(&parent.right, &right));
    }

    #[test]
    #[should_panic(expected = "already has a parent")]
    fn test_second_parent_is_rejected() {
        let shared = leaf(1);
        let _first = pair(shared.clone(), leaf(2));
        let _second = pair(shared, leaf(3));
    }

    #[test]
    #[should_panic(expected = "outlived its parent")]
    fn test_orphan_parent_query_panics() {
        let child = leaf(1);
        drop(pair(child.clone(), leaf(2)));
        assert!(!child.is_root());
        child.parent();
    }

    #[test]
    fn test_child_count_skips_dropped_children() {
        let kept = leaf(1);
        let loose: Rc<Loose> = AstBase::alloc(TextLoc::new(1, 1, 1, 2), |mut base: AstBase<Nt>| {
            base.add_child(&*kept);
            base.add_child(&*leaf(2));
            Loose { base }
        });
        assert_eq!(loose.base.child_count(), 1);
        assert_eq!(loose.childs().len(), loose.base.child_count());
        assert!(loose.base.has_child(&*kept));
    }

    #[test]
    fn test_downcast_checks_tag() {
        let node = pair(leaf(1), leaf(2));
        let node: Node<Nt> = node;
        assert!(downcast_node::<Nt, Pair>(&*node).is_some());
        assert!(downcast_node::<Nt, Leaf>(&*node).is_none());
    }

    #[test]
    fn test_debug_shows_tag_and_loc() {
        let node = leaf(4);
        assert_eq!(format!("{:?}", node), "Leaf@1:4");
    }

    const _: () = assert!(is_ast_node_class::<Nt, dyn AstNode<Nt>>());
    const _: () = assert!(is_ast_node_class::<Nt, Leaf>());
    const _: () = assert!(!is_ast_node_subclass::<Nt, dyn AstNode<Nt>>());
    const _: () = assert!(is_ast_node_subclass::<Nt, Pair>());
}
