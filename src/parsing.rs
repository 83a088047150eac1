//! Raw text entry parsing.
//!
//! Pair lists, fixed-member lists, and history blocks arrive as free-form
//! text. These parsers never fail: they split and trim, and leave semantic
//! checks (arity, roster membership, self-pairs) to [`crate::validation`].

/// Parses `"A-B, C-D"` into `[["A","B"], ["C","D"]]`.
///
/// Each comma-separated token is split on `-` and every part is trimmed.
/// A token with the wrong number of parts is returned as-is so the
/// validator can reject it by name. Tokens that are blank after trimming
/// (a trailing comma, say) are dropped.
pub fn parse_pairs(raw: &str) -> Vec<Vec<String>> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| token.split('-').map(|name| name.trim().to_string()).collect())
        .collect()
}

/// Parses `"A, B, C"` into `["A","B","C"]`, dropping blanks.
pub fn parse_member_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses one history block `"Team1: A, B; Team2: C, D"` into its
/// per-group member lists `[["A","B"], ["C","D"]]`.
///
/// Group labels are ignored. A segment with no `:` carries no members
/// and is skipped.
pub fn parse_history_block(raw: &str) -> Vec<Vec<String>> {
    raw.split(';')
        .filter_map(|segment| segment.split_once(':'))
        .map(|(_, members)| parse_member_list(members))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pairs() {
        let pairs = parse_pairs("A-B, C - D");
        assert_eq!(pairs, vec![vec!["A", "B"], vec!["C", "D"]]);
    }

    #[test]
    fn test_parse_pairs_empty() {
        assert!(parse_pairs("").is_empty());
        assert!(parse_pairs("   ").is_empty());
        assert!(parse_pairs(" , ").is_empty());
    }

    #[test]
    fn test_parse_pairs_keeps_malformed_tokens() {
        let pairs = parse_pairs("A-B,C,D-E-F,G-");
        assert_eq!(pairs.len(), 4);
        assert_eq!(pairs[1], vec!["C"]);
        assert_eq!(pairs[2], vec!["D", "E", "F"]);
        assert_eq!(pairs[3], vec!["G", ""]);
    }

    #[test]
    fn test_parse_pairs_keeps_self_pair() {
        assert_eq!(parse_pairs("A-A"), vec![vec!["A", "A"]]);
    }

    #[test]
    fn test_parse_member_list() {
        assert_eq!(parse_member_list(" A,B ,, C "), vec!["A", "B", "C"]);
        assert!(parse_member_list("").is_empty());
    }

    #[test]
    fn test_parse_history_block() {
        let groups = parse_history_block("Team1: A, B; Team2: C,D");
        assert_eq!(groups, vec![vec!["A", "B"], vec!["C", "D"]]);
    }

    #[test]
    fn test_parse_history_block_skips_unlabeled_segments() {
        let groups = parse_history_block("A, B; Team2: C, D;");
        assert_eq!(groups, vec![vec!["C", "D"]]);
        assert!(parse_history_block("").is_empty());
    }
}
