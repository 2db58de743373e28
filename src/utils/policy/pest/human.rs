use pest::iterators::Pair;
use pest_derive::Parser;

use crate::error::KpAbeError;
use crate::utils::policy::PolicyNode;

#[derive(Parser)]
#[grammar = "human.policy.pest"]
pub(crate) struct HumanPolicyParser;

pub(crate) fn parse(pair: Pair<Rule>) -> Result<PolicyNode, KpAbeError> {
    match pair.as_rule() {
        Rule::number => {
            let attr = pair.as_str().parse::<u32>().map_err(|e| {
                KpAbeError::InvalidPolicy(format!("attribute is not a 32-bit integer: {}", e))
            })?;
            Ok(PolicyNode::Leaf(attr))
        }
        Rule::orexpr => gate(pair, false),
        Rule::andexpr => gate(pair, true),
        Rule::content
        | Rule::EOI
        | Rule::term
        | Rule::AND
        | Rule::OR
        | Rule::WHITESPACE => unreachable!(),
    }
}

// An operator chain of length one is no gate at all.
fn gate(pair: Pair<Rule>, and: bool) -> Result<PolicyNode, KpAbeError> {
    let mut children = Vec::new();
    for inner in pair.into_inner() {
        children.push(parse(inner)?);
    }
    if children.len() == 1 {
        Ok(children.remove(0))
    } else if and {
        Ok(PolicyNode::And(children))
    } else {
        Ok(PolicyNode::Or(children))
    }
}
