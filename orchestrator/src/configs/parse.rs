/// Reads the integer at the start of `s`, ignoring whatever follows it.
///
/// Leading whitespace and a single sign are accepted, so `" 12px"` reads as `12` and `"-3"` as
/// `-3`, while `"px12"` doesn't read at all.
pub(super) fn leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    let digits = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());

    if digits == 0 {
        return None;
    }

    let end = s.len() - unsigned.len() + digits;
    s[..end].parse().ok()
}

/// Reads the longest prefix of `s` that's a number, ignoring whatever follows it.
///
/// `NaN` never reads, the infinities do.
pub(super) fn leading_float(s: &str) -> Option<f32> {
    let s = s.trim_start();

    s.char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .rev()
        .find_map(|end| s[..end].parse::<f32>().ok())
        .filter(|v| !v.is_nan())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_stop_at_the_first_non_digit() {
        assert_eq!(leading_int("600"), Some(600));
        assert_eq!(leading_int("  42 points"), Some(42));
        assert_eq!(leading_int("7.9"), Some(7));
        assert_eq!(leading_int("-15"), Some(-15));
        assert_eq!(leading_int("+3"), Some(3));
        assert_eq!(leading_int("abc"), None);
        assert_eq!(leading_int("-"), None);
        assert_eq!(leading_int(""), None);
    }

    #[test]
    fn floats_take_the_longest_numeric_prefix() {
        assert_eq!(leading_float("0.25"), Some(0.25));
        assert_eq!(leading_float(" 1.5e-1x"), Some(0.15));
        assert_eq!(leading_float("3abc"), Some(3.));
        assert_eq!(leading_float(".5"), Some(0.5));
        assert_eq!(leading_float("inf"), Some(f32::INFINITY));
        assert_eq!(leading_float("NaN"), None);
        assert_eq!(leading_float("x1"), None);
        assert_eq!(leading_float(""), None);
    }
}
