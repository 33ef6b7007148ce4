//! A small declaration language built on the framework crates.
//!
//! `LogicScanner` splits the text into lexemes, the pipeline turns them into
//! located tokens, and `LogicParser` builds the tree:
//!
//! ```
//! use parser_example::{parse, render_tree};
//! use pipeline_core::BridgeConfig;
//!
//! let ctx = parse("data ok = true;", BridgeConfig::default()).unwrap();
//! assert!(ctx.is_ok());
//! let root = ctx.root.unwrap();
//! assert_eq!(root.decls()[0].name(), "ok");
//! assert!(render_tree(&*root).starts_with("Root@1:1-15"));
//! ```

pub mod grammar;
pub mod nodes;
pub mod scanner;

pub use grammar::{LogicContext, LogicParser, SyntaxError};
pub use nodes::{BinopLogor, BoolLiteral, DataDecl, Nt, Program, StringLiteral};
pub use scanner::LogicScanner;

use common_framework::escape_str;
use parser_framework::{downcast_node, AstNode};
use pipeline_core::{BridgeConfig, Pipeline, PipelineError};
use std::fmt::Write;

/// Verbosity at which the parser traces its shifts and reductions.
pub const TRACE_PARSER_VERBOSITY: u8 = 3;

/// Parses `input` as a whole file.
///
/// Syntax errors do not stop the parse; they are collected in the returned
/// context next to the tree of the declarations that did parse. Only a scan
/// failure is an `Err`.
pub fn parse(input: &str, config: BridgeConfig) -> Result<LogicContext, PipelineError> {
    let trace = config.verbosity >= TRACE_PARSER_VERBOSITY;
    let mut ctx = LogicContext::default();
    let pipeline = Pipeline::new(input, LogicScanner::new(), LogicParser::new(), config);
    let pipeline = if trace {
        pipeline.trace(Some("logic"))
    } else {
        pipeline
    };
    pipeline.run(&mut ctx)?;
    Ok(ctx)
}

/// Renders the tree under `node`, one node per line, indented by depth.
pub fn render_tree(node: &dyn AstNode<Nt>) -> String {
    let mut out = String::new();
    render_into(node, 0, &mut out);
    out
}

fn render_into(node: &dyn AstNode<Nt>, depth: usize, out: &mut String) {
    let _ = write!(out, "{:indent$}{:?}", "", node, indent = depth * 2);
    if let Some(lit) = downcast_node::<Nt, BoolLiteral>(node) {
        let _ = write!(out, " {}", lit.value());
    } else if let Some(lit) = downcast_node::<Nt, StringLiteral>(node) {
        let _ = write!(out, " \"{}\"", escape_str(lit.value()));
    } else if let Some(decl) = downcast_node::<Nt, DataDecl>(node) {
        let _ = write!(out, " {}", decl.name());
    }
    out.push('\n');
    for child in node.childs() {
        render_into(&*child, depth + 1, out);
    }
}
