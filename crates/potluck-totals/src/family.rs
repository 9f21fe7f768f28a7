//! Family-index resolution

/// Label used for any affiliation index that does not point into the list
pub const UNKNOWN_FAMILY: &str = "Unknown";

/// Map a 1-based affiliation index to its family label.
///
/// Out-of-range indices (including zero and negatives) and an empty list
/// all resolve to [`UNKNOWN_FAMILY`].
pub fn resolve_family_name(index: i64, families: &[String]) -> &str {
    usize::try_from(index)
        .ok()
        .and_then(|i| i.checked_sub(1))
        .and_then(|i| families.get(i))
        .map(String::as_str)
        .unwrap_or(UNKNOWN_FAMILY)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn families() -> Vec<String> {
        vec!["Razvan".to_string(), "Andrei".to_string(), "Matei".to_string()]
    }

    #[test]
    fn test_one_based_lookup() {
        let f = families();
        assert_eq!(resolve_family_name(1, &f), "Razvan");
        assert_eq!(resolve_family_name(3, &f), "Matei");
    }

    #[test]
    fn test_out_of_range() {
        let f = families();
        assert_eq!(resolve_family_name(0, &f), UNKNOWN_FAMILY);
        assert_eq!(resolve_family_name(4, &f), UNKNOWN_FAMILY);
        assert_eq!(resolve_family_name(-1, &f), UNKNOWN_FAMILY);
        assert_eq!(resolve_family_name(i64::MIN, &f), UNKNOWN_FAMILY);
        assert_eq!(resolve_family_name(i64::MAX, &f), UNKNOWN_FAMILY);
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(resolve_family_name(1, &[]), UNKNOWN_FAMILY);
    }
}
