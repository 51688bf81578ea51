//! Textual and tree-shaped projections of an AST
//!
//! The canonical rendering is the only text form the combiner reparses, so
//! `parse(render(ast)) == ast` must hold for every parsed rule. The labeled
//! tree is what tree-layout front ends consume; it carries no presentation
//! data.

use crate::rule::ast::Node;
use serde::Serialize;

/// Render a rule in its canonical, fully parenthesized form
pub fn render(node: &Node) -> String {
    node.to_string()
}

/// Labeled tree node: leaves are comparisons, internal nodes are connectives
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

impl Drop for TreeNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut child) = pending.pop() {
            pending.append(&mut child.children);
        }
    }
}

/// Project an AST onto a generic labeled tree
pub fn project(node: &Node) -> TreeNode {
    node.fold(
        |operand| TreeNode {
            name: operand.to_string(),
            children: Vec::new(),
        },
        |connective, left, right| TreeNode {
            name: connective.to_string(),
            children: vec![left, right],
        },
    )
}
