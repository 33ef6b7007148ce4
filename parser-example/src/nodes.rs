use common_framework::FIRST_TEXT_LOC;
use parser_framework::{ast_node, span_loc, AstBase, AstNode, Node, TextLoc};
use std::rc::Rc;

/// Node variants of the logic declaration language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nt {
    Root,
    BoolLiteral,
    StringLiteral,
    BinopLogor,
    DataDecl,
}

/// A whole source file: its declarations in order.
pub struct Program {
    base: AstBase<Nt>,
    decls: Vec<Rc<DataDecl>>,
}

ast_node!(Program, Nt => Nt::Root);

impl Program {
    /// Spans from the first declaration to the last; an empty program sits
    /// at the start of the text.
    pub fn new(decls: Vec<Rc<DataDecl>>) -> Rc<Self> {
        let loc = match (decls.first(), decls.last()) {
            (Some(first), Some(last)) => span_loc(&first.loc(), &last.loc()),
            _ => FIRST_TEXT_LOC,
        };
        AstBase::alloc(loc, |mut base: AstBase<Nt>| {
            base.add_childs(decls.iter().map(|decl| &**decl));
            Program { base, decls }
        })
    }

    pub fn decls(&self) -> &[Rc<DataDecl>] {
        &self.decls
    }
}

pub struct BoolLiteral {
    base: AstBase<Nt>,
    value: bool,
}

ast_node!(BoolLiteral, Nt => Nt::BoolLiteral);

impl BoolLiteral {
    pub fn new(loc: TextLoc, value: bool) -> Rc<Self> {
        AstBase::alloc(loc, |base| BoolLiteral { base, value })
    }

    pub fn value(&self) -> bool {
        self.value
    }
}

pub struct StringLiteral {
    base: AstBase<Nt>,
    value: String,
}

ast_node!(StringLiteral, Nt => Nt::StringLiteral);

impl StringLiteral {
    /// `value` is the literal's text without its quotes.
    pub fn new(loc: TextLoc, value: impl Into<String>) -> Rc<Self> {
        let value = value.into();
        AstBase::alloc(loc, |base| StringLiteral { base, value })
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// `left || right`.
pub struct BinopLogor {
    base: AstBase<Nt>,
    left: Node<Nt>,
    right: Node<Nt>,
}

ast_node!(BinopLogor, Nt => Nt::BinopLogor);

impl BinopLogor {
    pub fn new(left: Node<Nt>, right: Node<Nt>) -> Rc<Self> {
        let loc = span_loc(&left.loc(), &right.loc());
        AstBase::alloc(loc, |mut base: AstBase<Nt>| {
            base.add_childs([&*left, &*right]);
            BinopLogor { base, left, right }
        })
    }

    pub fn left(&self) -> &Node<Nt> {
        &self.left
    }

    pub fn right(&self) -> &Node<Nt> {
        &self.right
    }
}

/// `data <name> = <value>;`
pub struct DataDecl {
    base: AstBase<Nt>,
    name: String,
    value: Node<Nt>,
}

ast_node!(DataDecl, Nt => Nt::DataDecl);

impl DataDecl {
    /// `loc` runs from the `data` keyword to the closing `;`.
    pub fn new(loc: TextLoc, name: impl Into<String>, value: Node<Nt>) -> Rc<Self> {
        let name = name.into();
        AstBase::alloc(loc, |mut base: AstBase<Nt>| {
            base.add_child(&*value);
            DataDecl { base, name, value }
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &Node<Nt> {
        &self.value
    }
}
