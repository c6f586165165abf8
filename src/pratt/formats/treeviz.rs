//! Treeviz formatter for parsed trees
//!
//! One line per node, nesting drawn with box connectors, each line an icon and the
//! node's label (truncated to 30 characters). Nodes without a label of their own (calls,
//! conditionals) show their type instead.
//!
//!   ⊕ +
//!   ├─ ⊣ -
//!   │  └─ # 1
//!   └─ ƒ Call
//!      ├─ ◦ f
//!      └─ # 2
//!
//! Icons
//!     Block: ⧉
//!     Name: ◦
//!     Literal: #
//!     Prefix: ⊣
//!     Postfix: ⊢
//!     Binary: ⊕
//!     Call: ƒ
//!     Conditional: ?
//!     Assign: ≔
//!     TypeName: τ
//!     Tagged: §
//!     Invalid: ∅

use super::registry::{FormatError, Formatter};
use crate::pratt::ast::{snapshot_node, AstNode, AstSnapshot};
use std::collections::HashMap;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

fn get_icon(node_type: &str) -> &'static str {
    match node_type {
        "Block" => "⧉",
        "Name" => "◦",
        "Literal" => "#",
        "Prefix" => "⊣",
        "Postfix" => "⊢",
        "Binary" => "⊕",
        "Call" => "ƒ",
        "Conditional" => "?",
        "Assign" => "≔",
        "TypeName" => "τ",
        "Tagged" => "§",
        "Invalid" => "∅",
        _ => "○",
    }
}

fn line_for(snapshot: &AstSnapshot, show_linum: bool) -> String {
    let label = if snapshot.label.is_empty() {
        snapshot.node_type.as_str()
    } else {
        snapshot.label.as_str()
    };
    let linum = if show_linum {
        format!("{:02} ", snapshot.range.start.line + 1)
    } else {
        String::new()
    };
    format!(
        "{}{} {}",
        linum,
        get_icon(&snapshot.node_type),
        truncate(label, 30)
    )
}

fn format_children(snapshot: &AstSnapshot, prefix: &str, show_linum: bool, output: &mut String) {
    let count = snapshot.children.len();
    for (index, child) in snapshot.children.iter().enumerate() {
        let is_last = index + 1 == count;
        let connector = if is_last { "└─" } else { "├─" };
        output.push_str(&format!(
            "{}{} {}\n",
            prefix,
            connector,
            line_for(child, show_linum)
        ));
        let child_prefix = format!("{}{}", prefix, if is_last { "   " } else { "│  " });
        format_children(child, &child_prefix, show_linum, output);
    }
}

pub fn to_treeviz_str(tree: &AstNode) -> String {
    to_treeviz_str_with_params(tree, &HashMap::new())
}

pub fn to_treeviz_str_with_params(tree: &AstNode, params: &HashMap<String, String>) -> String {
    let show_linum = params
        .get("show-linum")
        .map(|v| v != "false")
        .unwrap_or(false);

    let snapshot = snapshot_node(tree);
    let mut output = format!("{}\n", line_for(&snapshot, show_linum));
    format_children(&snapshot, "", show_linum, &mut output);
    output
}

/// Formatter implementation for treeviz format
pub struct TreevizFormatter;

impl Formatter for TreevizFormatter {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn serialize(&self, tree: &AstNode) -> Result<String, FormatError> {
        Ok(to_treeviz_str(tree))
    }

    fn description(&self) -> &str {
        "Visual tree representation with box connectors and Unicode icons"
    }
}
