//! Spreadsheet-style column labels and A1 cell references.

/// Convert a 0-based column index to column letters (A, B, ..., Z, AA, AB, ...)
pub fn col_to_letter(col: u32) -> String {
    let mut result = String::new();
    let mut n = u64::from(col) + 1; // Convert to 1-based
    while n > 0 {
        n -= 1;
        let offset = u8::try_from(n % 26).unwrap_or(0);
        result.insert(0, char::from(b'A' + offset));
        n /= 26;
    }
    result
}

/// Parse column letters like "AB" into a 0-based column index.
pub fn letter_to_col(letters: &str) -> Option<u32> {
    if letters.is_empty() {
        return None;
    }
    let mut col: u32 = 0;
    for ch in letters.chars() {
        if !ch.is_ascii_alphabetic() {
            return None;
        }
        let digit = u32::from(ch.to_ascii_uppercase()) - u32::from('A') + 1;
        col = col.checked_mul(26)?.checked_add(digit)?;
    }
    Some(col - 1)
}

/// Parse a cell reference like "A1" or "$B$10" into 0-based `(row, col)`.
///
/// Column letters must precede the row number; anything else is rejected so
/// that plain words and numbers are never mistaken for references.
pub fn parse_cell_ref(cell_ref: &str) -> Option<(u32, u32)> {
    let cleaned: String = cell_ref.trim().chars().filter(|&c| c != '$').collect();
    let split = cleaned.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = cleaned.split_at(split);
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let col = letter_to_col(letters)?;
    let row: u32 = digits.parse().ok()?;
    if row == 0 {
        return None;
    }
    Some((row - 1, col))
}

/// Parse a range like "A1:B10" or "A1" into normalized
/// `(start_row, start_col, end_row, end_col)`.
pub fn parse_cell_range(range: &str) -> Option<(u32, u32, u32, u32)> {
    if let Some((start, end)) = range.split_once(':') {
        let (r1, c1) = parse_cell_ref(start)?;
        let (r2, c2) = parse_cell_ref(end)?;
        Some((r1.min(r2), c1.min(c2), r1.max(r2), c1.max(c2)))
    } else {
        let (row, col) = parse_cell_ref(range)?;
        Some((row, col, row, col))
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0, "A")]
    #[test_case(1, "B")]
    #[test_case(25, "Z")]
    #[test_case(26, "AA")]
    #[test_case(51, "AZ")]
    #[test_case(52, "BA")]
    #[test_case(701, "ZZ")]
    #[test_case(702, "AAA")]
    fn test_col_to_letter(col: u32, expected: &str) {
        assert_eq!(col_to_letter(col), expected);
        assert_eq!(letter_to_col(expected), Some(col));
    }

    #[test]
    fn test_parse_cell_ref() {
        assert_eq!(parse_cell_ref("A1"), Some((0, 0)));
        assert_eq!(parse_cell_ref("$C$5"), Some((4, 2)));
        assert_eq!(parse_cell_ref("aa10"), Some((9, 26)));
        assert_eq!(parse_cell_ref("A0"), None);
        assert_eq!(parse_cell_ref("SUM"), None);
        assert_eq!(parse_cell_ref("12"), None);
        assert_eq!(parse_cell_ref("1A"), None);
    }

    #[test]
    fn test_parse_cell_range_normalizes() {
        assert_eq!(parse_cell_range("B3:A1"), Some((0, 0, 2, 1)));
        assert_eq!(parse_cell_range("C2"), Some((1, 2, 1, 2)));
        assert_eq!(parse_cell_range("A1:nope"), None);
    }
}
