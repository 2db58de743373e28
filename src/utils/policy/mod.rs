//! Monotone access trees over integer attributes.
//!
//! A policy is a tree of threshold gates whose leaves name attributes. An
//! `or` gate is satisfied by any child, an `and` gate only by all of them.
//! Trees are built programmatically or parsed from one of the policy
//! languages in [`pest`](self::pest).
pub mod pest;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::KpAbeError;
use crate::utils::tools::has_duplicates;

/// A node of a monotone access policy: an attribute leaf or a gate over an
/// ordered list of children.
///
/// Child order is significant; it fixes the share indices used by the
/// secret-sharing layer. Only the key holder ever walks the tree, so the
/// order never has to be agreed on with the encrypting side.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub enum PolicyNode {
    Leaf(u32),
    And(Vec<PolicyNode>),
    Or(Vec<PolicyNode>),
}

impl PolicyNode {
    /// All leaf attributes below this node, depth-first, left to right.
    pub fn leafs(&self) -> Vec<u32> {
        match self {
            PolicyNode::Leaf(attr) => vec![*attr],
            PolicyNode::And(children) | PolicyNode::Or(children) => {
                children.iter().flat_map(|child| child.leafs()).collect()
            }
        }
    }

    /// The ordered children of this node; empty for a leaf.
    pub fn children(&self) -> &[PolicyNode] {
        match self {
            PolicyNode::Leaf(_) => &[],
            PolicyNode::And(children) | PolicyNode::Or(children) => children,
        }
    }

    /// Number of children that must be satisfied for this node to be.
    ///
    /// A single-child gate of either type has threshold one and acts as a
    /// pass-through.
    pub fn threshold(&self) -> usize {
        match self {
            PolicyNode::And(children) => children.len(),
            _ => 1,
        }
    }

    /// Degree of the sharing polynomial rooted at this node.
    pub fn poly_degree(&self) -> usize {
        self.threshold() - 1
    }

    /// Checks the structural invariants: every gate carries at least one
    /// child and no attribute appears on more than one leaf.
    pub fn validate(&self) -> Result<(), KpAbeError> {
        self.check_gates()?;
        if has_duplicates(&self.leafs()) {
            return Err(KpAbeError::InvalidPolicy(
                "an attribute appears on more than one leaf".to_string(),
            ));
        }
        Ok(())
    }

    fn check_gates(&self) -> Result<(), KpAbeError> {
        match self {
            PolicyNode::Leaf(_) => Ok(()),
            PolicyNode::And(children) | PolicyNode::Or(children) => {
                if children.is_empty() {
                    return Err(KpAbeError::InvalidPolicy("gate without children".to_string()));
                }
                for child in children {
                    child.check_gates()?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for PolicyNode {
    /// Renders the human policy language, e.g. `((1 or 2) and (3 or 4))`.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PolicyNode::Leaf(attr) => write!(f, "{}", attr),
            PolicyNode::And(children) => {
                let parts: Vec<String> = children.iter().map(|child| child.to_string()).collect();
                write!(f, "({})", parts.join(" and "))
            }
            PolicyNode::Or(children) => {
                let parts: Vec<String> = children.iter().map(|child| child.to_string()).collect();
                write!(f, "({})", parts.join(" or "))
            }
        }
    }
}
