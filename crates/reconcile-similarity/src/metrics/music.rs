use reconcile_core::constants::round_similarity;

/// 1 on equal release years, 0 otherwise.
pub fn year_similarity(a: Option<i32>, b: Option<i32>) -> Option<f64> {
    Some(if a? == b? { 1.0 } else { 0.0 })
}

/// `1 - |a - b| / max(a, b)` over track lengths.
pub fn length_similarity(a: Option<u32>, b: Option<u32>) -> Option<f64> {
    let (a, b) = (a?, b?);
    let longest = a.max(b);
    if longest == 0 {
        return Some(1.0);
    }
    let diff = a.abs_diff(b) as f64;
    Some(round_similarity(1.0 - diff / longest as f64))
}

/// Track numbers compare case-insensitively after trimming; leading zeros are
/// ignored so "03" and "3" match.
pub fn number_similarity(a: Option<&str>, b: Option<&str>) -> Option<f64> {
    let clean = |s: &str| -> Option<String> {
        let t = s.trim().to_lowercase();
        if t.is_empty() {
            return None;
        }
        let stripped = t.trim_start_matches('0');
        Some(if stripped.is_empty() { "0".to_string() } else { stripped.to_string() })
    };
    let (a, b) = (clean(a?)?, clean(b?)?);
    Some(if a == b { 1.0 } else { 0.0 })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn years() {
        assert_eq!(year_similarity(Some(1999), Some(1999)), Some(1.0));
        assert_eq!(year_similarity(Some(1999), Some(2000)), Some(0.0));
        assert_eq!(year_similarity(None, Some(2000)), None);
    }

    #[test]
    fn lengths() {
        assert_eq!(length_similarity(Some(200_000), Some(200_000)), Some(1.0));
        assert_eq!(length_similarity(Some(150_000), Some(200_000)), Some(0.75));
        assert_eq!(length_similarity(Some(0), Some(0)), Some(1.0));
        assert_eq!(length_similarity(Some(1), None), None);
    }

    #[test]
    fn numbers() {
        assert_eq!(number_similarity(Some("03"), Some("3")), Some(1.0));
        assert_eq!(number_similarity(Some("A2"), Some("a2")), Some(1.0));
        assert_eq!(number_similarity(Some("2"), Some("12")), Some(0.0));
        assert_eq!(number_similarity(Some(" "), Some("1")), None);
    }
}
