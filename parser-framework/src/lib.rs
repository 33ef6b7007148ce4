//! Parser Framework
//!
//! The parser side of the scanner/parser bridge: the capability trait an
//! external parsing automaton implements, and the AST node framework its
//! semantic actions build trees with.

pub mod ast;
pub mod automaton;

pub use ast::{
    downcast_node, is_ast_node_class, is_ast_node_subclass, AstBase, AstNode, AstNodeClass, Node,
    NodeTag, TypedNode,
};
pub use automaton::{Automaton, FnAutomaton};
pub use common_framework::{span_loc, TextLoc};
pub use lexer_framework::{LocatedToken, TokenKind};
