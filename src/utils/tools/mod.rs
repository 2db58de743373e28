use std::collections::HashSet;

use rabe_bn::Fr;

/// Maps a small integer (a share index or an attribute id) to its
/// scalar-field representative.
pub fn usize_to_fr(i: usize) -> Fr {
    Fr::from_str(&i.to_string()).unwrap()
}

/// True iff `values` contains at least one attribute twice.
pub fn has_duplicates(values: &[u32]) -> bool {
    let mut seen: HashSet<u32> = HashSet::new();
    values.iter().any(|value| !seen.insert(*value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usize_to_fr() {
        assert_eq!(usize_to_fr(0), Fr::zero());
        assert_eq!(usize_to_fr(1), Fr::one());
        assert_eq!(usize_to_fr(2), Fr::one() + Fr::one());
    }

    #[test]
    fn test_has_duplicates() {
        assert!(!has_duplicates(&[]));
        assert!(!has_duplicates(&[1, 2, 3]));
        assert!(has_duplicates(&[1, 2, 1]));
    }
}
