//! Rule parsing, evaluation and combination
//!
//! This module handles rule strings like "age>30ANDstatus='active'": it
//! tokenizes them, builds an AST, evaluates the AST against a data record,
//! renders it back to text and folds several rules into one.

mod ast;
pub mod cache;
pub mod combiner;
mod evaluator;
pub mod parser;
pub mod render;
pub mod tokenizer;


pub use ast::*;
pub use cache::*;
pub use combiner::*;
pub use evaluator::*;
pub use parser::*;
pub use render::*;
