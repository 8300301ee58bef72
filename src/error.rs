use thiserror::Error;

use crate::ast::{Expr, Node};

/// Conditions a renderer can hit. They are never returned as `Err`:
/// renderers embed the display text at the offending node's position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("ERROR: could not print {repr} :ERROR")]
    UnsupportedNodeKind { kind: String, repr: String },

    /// A supported kind with an arity it has no layout for, e.g. a `call`
    /// without a callee.
    #[error("ERROR: could not print {repr} :ERROR")]
    MalformedNode { kind: String, repr: String },

    /// The tree nests deeper than `RenderOptions::max_depth`.
    #[error("ERROR: could not print {repr} :ERROR")]
    NestingTooDeep { depth: usize, repr: String },
}

impl RenderError {
    pub fn unsupported(node: &Node) -> Self {
        let repr = node.repr();
        tracing::debug!(kind = node.kind.name(), %repr, "unsupported node kind");
        RenderError::UnsupportedNodeKind {
            kind: node.kind.name().to_string(),
            repr,
        }
    }

    pub fn malformed(node: &Node) -> Self {
        let repr = node.repr();
        tracing::debug!(
            kind = node.kind.name(),
            args = node.args.len(),
            "node has no layout for its arity"
        );
        RenderError::MalformedNode {
            kind: node.kind.name().to_string(),
            repr,
        }
    }

    /// Only the head of `expr` is shown; the rest of the subtree is elided.
    pub fn too_deep(expr: &Expr, depth: usize) -> Self {
        tracing::warn!(depth, "expression nesting exceeds the render depth limit");
        RenderError::NestingTooDeep {
            depth,
            repr: expr.repr_to_depth(1),
        }
    }

    /// Sentinel text embedded in rendered output.
    pub fn sentinel(&self) -> String {
        self.to_string()
    }
}
