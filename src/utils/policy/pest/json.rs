use pest::iterators::Pair;
use pest_derive::Parser;

use crate::error::KpAbeError;
use crate::utils::policy::PolicyNode;

#[derive(Parser)]
#[grammar = "json.policy.pest"]
pub(crate) struct JSONPolicyParser;

pub(crate) fn parse(pair: Pair<Rule>) -> Result<PolicyNode, KpAbeError> {
    match pair.as_rule() {
        Rule::node => {
            let mut inner = pair.into_inner();
            let name = node_name(inner.next().unwrap());
            let children = match inner.next() {
                Some(childpair) => childpair
                    .into_inner()
                    .next()
                    .unwrap()
                    .into_inner()
                    .map(parse)
                    .collect::<Result<Vec<PolicyNode>, KpAbeError>>()?,
                None => Vec::new(),
            };
            match name.to_lowercase().as_str() {
                "and" => Ok(PolicyNode::And(children)),
                "or" => Ok(PolicyNode::Or(children)),
                attr => {
                    if !children.is_empty() {
                        return Err(KpAbeError::InvalidPolicy(format!(
                            "leaf node {} must not carry children",
                            attr
                        )));
                    }
                    let attr = attr.parse::<u32>().map_err(|e| {
                        KpAbeError::InvalidPolicy(format!(
                            "attribute is not a 32-bit integer: {}",
                            e
                        ))
                    })?;
                    Ok(PolicyNode::Leaf(attr))
                }
            }
        }
        Rule::content
        | Rule::EOI
        | Rule::nodepair
        | Rule::childpair
        | Rule::array
        | Rule::value
        | Rule::string
        | Rule::inner
        | Rule::char
        | Rule::number
        | Rule::WHITESPACE => unreachable!(),
    }
}

fn node_name(nodepair: Pair<Rule>) -> String {
    let value = nodepair.into_inner().next().unwrap();
    match value.as_rule() {
        Rule::string => value
            .into_inner()
            .next()
            .map(|inner| inner.as_str())
            .unwrap_or("")
            .to_string(),
        Rule::number => value.as_str().to_string(),
        _ => unreachable!(),
    }
}
