//! Shamir secret sharing over an access tree and Lagrange recovery.
//!
//! Shares are generated top-down: each gate splits its incoming secret with
//! a fresh polynomial and hands share `q(x)` to its `x`-th child (1-based,
//! left to right). Recovery walks a satisfying subtree bottom-up by folding
//! the product of Lagrange coefficients along the path to each leaf.
use rabe_bn::Fr;
use rand::Rng;

use crate::utils::policy::PolicyNode;
use crate::utils::tools::usize_to_fr;

/// Evaluates `Σ coeff[k] · x^k` in the scalar field.
///
/// Powers of `x` are computed in the field; share indices are small
/// integers but never take a detour through machine floats.
pub fn polynomial(coeff: &[Fr], x: Fr) -> Fr {
    let mut share = Fr::zero();
    for (k, c) in coeff.iter().enumerate() {
        share = share + (*c * x.pow(usize_to_fr(k)));
    }
    share
}

/// Splits `secret` into one share per child of `node`.
///
/// The sharing polynomial has `q(0) = secret` and `poly_degree()` random
/// coefficients, so any `threshold()` children can reconstruct while fewer
/// learn nothing.
pub fn split_shares(secret: Fr, node: &PolicyNode) -> Vec<Fr> {
    let mut rng = rand::thread_rng();
    let mut coeff: Vec<Fr> = vec![secret];
    for _ in 0..node.poly_degree() {
        coeff.push(rng.gen());
    }
    (1..=node.children().len())
        .map(|x| polynomial(&coeff, usize_to_fr(x)))
        .collect()
}

/// Propagates `secret` down the tree, returning one share per leaf.
///
/// The result's order matches [`PolicyNode::leafs`].
pub fn gen_shares_policy(secret: Fr, node: &PolicyNode) -> Vec<(u32, Fr)> {
    match node {
        PolicyNode::Leaf(attr) => vec![(*attr, secret)],
        _ => {
            let splits = split_shares(secret, node);
            node.children()
                .iter()
                .zip(splits)
                .flat_map(|(child, share)| gen_shares_policy(share, child))
                .collect()
        }
    }
}

/// Lagrange basis coefficients at zero for the given evaluation points.
pub fn recover_coefficients(points: &[Fr]) -> Vec<Fr> {
    let mut coeff: Vec<Fr> = Vec::new();
    for i in points {
        let mut result = Fr::one();
        for j in points {
            if i != j {
                // the points are distinct, so (i - j) is invertible
                result = result * ((Fr::zero() - *j) * (*i - *j).inverse().unwrap());
            }
        }
        coeff.push(result);
    }
    coeff
}

fn gate_coefficients(node: &PolicyNode) -> Vec<Fr> {
    let points: Vec<Fr> = (1..=node.threshold()).map(usize_to_fr).collect();
    recover_coefficients(&points)
}

/// Searches for a leaf subset of `node` satisfied by `attrs`, folding the
/// product of Lagrange coefficients along the accepted path.
///
/// Returns one `(attribute, coefficient)` pair per leaf of the chosen
/// subtree, or an empty vector when the node cannot be satisfied. The
/// coefficient product is threaded as a plain argument; recovered
/// coefficient vectors are never mutated.
pub fn satisfying_attributes(node: &PolicyNode, attrs: &[u32], coeff: Fr) -> Vec<(u32, Fr)> {
    match node {
        PolicyNode::Leaf(attr) => {
            if attrs.contains(attr) {
                vec![(*attr, coeff)]
            } else {
                Vec::new()
            }
        }
        PolicyNode::And(children) => {
            let rec_coeffs = gate_coefficients(node);
            let mut sat = Vec::new();
            for (i, child) in children.iter().enumerate() {
                let child_sat = satisfying_attributes(child, attrs, rec_coeffs[i] * coeff);
                if child_sat.is_empty() {
                    return Vec::new();
                }
                sat.extend(child_sat);
            }
            sat
        }
        PolicyNode::Or(children) => {
            // threshold 1: whichever child is chosen interpolates over the
            // single point {1}, whose Lagrange coefficient at zero is one.
            // It is computed uniformly all the same.
            let rec_coeffs = gate_coefficients(node);
            for child in children {
                let child_sat = satisfying_attributes(child, attrs, rec_coeffs[0] * coeff);
                if !child_sat.is_empty() {
                    return child_sat;
                }
            }
            Vec::new()
        }
    }
}
