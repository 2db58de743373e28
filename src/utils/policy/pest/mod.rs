use pest::Parser;

use self::human::HumanPolicyParser;
use self::json::JSONPolicyParser;
use crate::error::KpAbeError;
use crate::utils::policy::PolicyNode;
use serde::{Deserialize, Serialize};

pub(crate) mod human;
pub(crate) mod json;

/// Policy language type. Currently two types are available:
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum PolicyLanguage {
    /// A JSON policy language, e.g.
    /// `{"name": "and", "children": [{"name": "1"}, {"name": "2"}]}`
    JsonPolicy,
    /// A natural human language, e.g. `(1 or 2) and (3 or 4)`
    HumanPolicy,
}

/// Parses a `&str` in a given [`PolicyLanguage`] into an access tree.
pub fn parse(policy: &str, language: PolicyLanguage) -> Result<PolicyNode, KpAbeError> {
    match language {
        PolicyLanguage::JsonPolicy => {
            use self::json::Rule;
            match JSONPolicyParser::parse(Rule::content, policy) {
                Ok(mut result) => json::parse(result.next().unwrap()),
                Err(e) => Err(e.into()),
            }
        }
        PolicyLanguage::HumanPolicy => {
            use self::human::Rule;
            match HumanPolicyParser::parse(Rule::content, policy) {
                Ok(mut result) => human::parse(result.next().unwrap()),
                Err(e) => Err(e.into()),
            }
        }
    }
}
