use parser_framework::{
    ast_node, downcast_node, is_ast_node_class, is_ast_node_subclass, span_loc, AstBase, AstNode,
    Node, TextLoc,
};
use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Nt {
    Root,
    BoolLiteral,
    BinopLogor,
    DataDecl,
}

thread_local! {
    static DROPPED: Cell<usize> = const { Cell::new(0) };
}

fn dropped() -> usize {
    DROPPED.with(Cell::get)
}

/// Counts drops so tests can check each node is released exactly once.
struct DropGuard;

impl Drop for DropGuard {
    fn drop(&mut self) {
        DROPPED.with(|d| d.set(d.get() + 1));
    }
}

struct BoolLiteral {
    base: AstBase<Nt>,
    value: bool,
    _guard: DropGuard,
}

ast_node!(BoolLiteral, Nt => Nt::BoolLiteral);

impl BoolLiteral {
    fn new(loc: TextLoc, value: bool) -> Rc<Self> {
        AstBase::alloc(loc, |base| Self {
            base,
            value,
            _guard: DropGuard,
        })
    }
}

struct BinopLogor {
    base: AstBase<Nt>,
    lexpr: Node<Nt>,
    rexpr: Node<Nt>,
    _guard: DropGuard,
}

ast_node!(BinopLogor, Nt => Nt::BinopLogor);

impl BinopLogor {
    fn new(lexpr: Node<Nt>, rexpr: Node<Nt>) -> Rc<Self> {
        let loc = span_loc(&lexpr.loc(), &rexpr.loc());
        AstBase::alloc(loc, |mut base: AstBase<Nt>| {
            base.add_childs([&*lexpr, &*rexpr]);
            Self {
                base,
                lexpr,
                rexpr,
                _guard: DropGuard,
            }
        })
    }
}

struct DataDecl {
    base: AstBase<Nt>,
    name: String,
    expr: Node<Nt>,
    _guard: DropGuard,
}

ast_node!(DataDecl, Nt => Nt::DataDecl);

impl DataDecl {
    fn new(loc: TextLoc, name: &str, expr: Node<Nt>) -> Rc<Self> {
        AstBase::alloc(loc, |mut base: AstBase<Nt>| {
            base.add_child(&*expr);
            Self {
                base,
                name: name.to_string(),
                expr,
                _guard: DropGuard,
            }
        })
    }
}

struct Program {
    base: AstBase<Nt>,
    decls: Vec<Node<Nt>>,
}

ast_node!(Program, Nt => Nt::Root);

impl Program {
    fn new(loc: TextLoc, decls: Vec<Node<Nt>>) -> Rc<Self> {
        AstBase::alloc(loc, |mut base: AstBase<Nt>| {
            base.add_childs(decls.iter().map(|d| &**d));
            Self { base, decls }
        })
    }
}

const _: () = assert!(is_ast_node_class::<Nt, dyn AstNode<Nt>>());
const _: () = assert!(is_ast_node_class::<Nt, BoolLiteral>());
const _: () = assert!(is_ast_node_class::<Nt, DataDecl>());
const _: () = assert!(!is_ast_node_subclass::<Nt, dyn AstNode<Nt>>());
const _: () = assert!(is_ast_node_subclass::<Nt, BoolLiteral>());
const _: () = assert!(is_ast_node_subclass::<Nt, BinopLogor>());
const _: () = assert!(is_ast_node_subclass::<Nt, DataDecl>());

fn lit(loc: TextLoc, value: bool) -> Node<Nt> {
    BoolLiteral::new(loc, value)
}

#[test]
fn test_bool_literal_with_no_parent() {
    let node = BoolLiteral::new(TextLoc::new(1, 0, 1, 3), true);
    let node_dyn: Node<Nt> = node.clone();
    assert_eq!(node.tag(), Nt::BoolLiteral);
    assert!(node.value);
    assert!(Rc::ptr_eq(&node.parent(), &node_dyn));
    assert!(node.is_root());
}

#[test]
fn test_binary_logical_or() {
    let binop = BinopLogor::new(
        lit(TextLoc::new(1, 0, 1, 3), true),
        lit(TextLoc::new(1, 8, 1, 12), false),
    );
    assert!(binop.is_root());
    assert!(!binop.lexpr.is_root());
    assert!(!binop.rexpr.is_root());
    assert_eq!(binop.loc(), TextLoc::new(1, 0, 1, 12));
    assert_eq!(binop.childs().len(), 2);
}

#[test]
fn test_data_declaration_with_expression() {
    let expr = lit(TextLoc::default(), false);
    let decl = DataDecl::new(TextLoc::default(), "unifying_force", expr.clone());
    let decl_dyn: Node<Nt> = decl.clone();

    assert!(decl.is_root());
    assert_eq!(decl.name, "unifying_force");
    assert!(Rc::ptr_eq(&decl.expr, &expr));
    assert!(!Rc::ptr_eq(&decl.expr.parent(), &decl.expr));
    assert!(!expr.is_root());
    assert!(Rc::ptr_eq(&decl.expr.parent(), &decl_dyn));

    let childs = decl.childs();
    assert_eq!(childs.iter().filter(|c| Rc::ptr_eq(c, &expr)).count(), 1);
    assert!(decl.base.has_child(&*expr));
}

#[test]
fn test_childs_is_a_copy() {
    let decl = DataDecl::new(TextLoc::default(), "x", lit(TextLoc::default(), true));
    let mut childs = decl.childs();
    childs.clear();
    assert_eq!(decl.childs().len(), 1);
}

#[test]
fn test_root_lookup_from_deep_node() {
    let deepest = lit(TextLoc::new(1, 1, 1, 4), true);
    let or1 = BinopLogor::new(deepest.clone(), lit(TextLoc::new(1, 9, 1, 13), false));
    let or2 = BinopLogor::new(or1, lit(TextLoc::new(1, 18, 1, 21), true));
    let decl: Node<Nt> = DataDecl::new(TextLoc::new(1, 1, 1, 22), "a", or2);
    let program = Program::new(decl.loc(), vec![decl]);
    let program_dyn: Node<Nt> = program.clone();

    assert_eq!(program.decls.len(), 1);
    assert!(Rc::ptr_eq(&deepest.root(), &program_dyn));
    assert!(Rc::ptr_eq(&program.root(), &program_dyn));
    assert_eq!(program.descendants().len(), 6);
}

#[test]
fn test_descendants_are_pre_order() {
    let a = lit(TextLoc::new(1, 1, 1, 1), true);
    let b = lit(TextLoc::new(1, 3, 1, 3), false);
    let c = lit(TextLoc::new(1, 5, 1, 5), true);
    let inner = BinopLogor::new(a, b);
    let outer = BinopLogor::new(inner, c);
    let tags: Vec<Nt> = outer.descendants().iter().map(|n| n.tag()).collect();
    assert_eq!(
        tags,
        vec![
            Nt::BinopLogor,
            Nt::BoolLiteral,
            Nt::BoolLiteral,
            Nt::BoolLiteral
        ]
    );
    let cols: Vec<usize> = outer
        .descendants()
        .iter()
        .filter(|n| n.tag() == Nt::BoolLiteral)
        .map(|n| n.loc().first_cno)
        .collect();
    assert_eq!(cols, vec![1, 3, 5]);
}

#[test]
fn test_downcast_by_tag() {
    let decl = DataDecl::new(TextLoc::default(), "flag", lit(TextLoc::default(), true));
    let expr = &decl.expr;
    let literal = downcast_node::<Nt, BoolLiteral>(&**expr).expect("literal");
    assert!(literal.value);
    assert!(downcast_node::<Nt, DataDecl>(&**expr).is_none());
}

#[test]
fn test_dropping_linear_chain_drops_each_node_once() {
    let before = dropped();
    {
        let leaf = lit(TextLoc::default(), true);
        let decl1: Node<Nt> = DataDecl::new(TextLoc::default(), "a", leaf);
        let decl2: Node<Nt> = DataDecl::new(TextLoc::default(), "b", decl1);
        let decl3 = DataDecl::new(TextLoc::default(), "c", decl2);
        assert_eq!(dropped(), before);
        drop(decl3);
    }
    assert_eq!(dropped() - before, 4);
}

#[test]
fn test_dropping_branching_tree_drops_each_node_once() {
    let before = dropped();
    let tree = BinopLogor::new(
        BinopLogor::new(
            lit(TextLoc::default(), true),
            lit(TextLoc::default(), false),
        ),
        BinopLogor::new(
            lit(TextLoc::default(), false),
            lit(TextLoc::default(), true),
        ),
    );
    assert_eq!(tree.descendants().len(), 6);
    assert_eq!(dropped(), before);
    drop(tree);
    assert_eq!(dropped() - before, 7);
}

#[test]
fn test_subtree_kept_alive_outlives_dropped_root() {
    let before = dropped();
    let leaf = lit(TextLoc::default(), true);
    let decl = DataDecl::new(TextLoc::default(), "a", leaf.clone());
    drop(decl);
    assert_eq!(dropped() - before, 1);
    assert!(!leaf.is_root());
    drop(leaf);
    assert_eq!(dropped() - before, 2);
}
