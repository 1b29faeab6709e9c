/// Parse a final-score string into (home, away) goals. Accepts `H:A`,
/// `H - A`, en/em dashes, and arbitrary surrounding whitespace. Returns
/// `None` for anything else; callers stamp "Unknown" rather than raising.
pub fn parse_score(raw: &str) -> Option<(i32, i32)> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    for sep in [':', '-', '–', '—'] {
        if let Some((left, right)) = trimmed.split_once(sep) {
            let home = left.trim().parse::<i32>().ok()?;
            let away = right.trim().parse::<i32>().ok()?;
            if home < 0 || away < 0 {
                return None;
            }
            return Some((home, away));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colon_separator() {
        assert_eq!(parse_score("2:1"), Some((2, 1)));
        assert_eq!(parse_score("  0:0  "), Some((0, 0)));
    }

    #[test]
    fn test_hyphen_with_spaces() {
        assert_eq!(parse_score("3 - 2"), Some((3, 2)));
        assert_eq!(parse_score("3-2"), Some((3, 2)));
    }

    #[test]
    fn test_unicode_dashes() {
        assert_eq!(parse_score("1 – 1"), Some((1, 1)));
        assert_eq!(parse_score("4—0"), Some((4, 0)));
    }

    #[test]
    fn test_garbage_yields_none() {
        assert_eq!(parse_score("postponed"), None);
        assert_eq!(parse_score("2:x"), None);
        assert_eq!(parse_score(""), None);
        assert_eq!(parse_score("abandoned - fog"), None);
    }
}
