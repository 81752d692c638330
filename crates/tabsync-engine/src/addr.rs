//! A1-style addressing helpers for emitted formulas.

/// Spreadsheet column letters for a zero-based column index.
pub fn col_letter(col: usize) -> String {
    let mut n = col + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push((b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// One-based sheet row for a zero-based body row under `header_rows`.
pub fn sheet_row(body_row: usize, header_rows: usize) -> usize {
    body_row + header_rows + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn col_letters() {
        assert_eq!(col_letter(0), "A");
        assert_eq!(col_letter(10), "K");
        assert_eq!(col_letter(25), "Z");
        assert_eq!(col_letter(26), "AA");
        assert_eq!(col_letter(27), "AB");
        assert_eq!(col_letter(701), "ZZ");
        assert_eq!(col_letter(702), "AAA");
    }

    #[test]
    fn sheet_rows_account_for_headers() {
        assert_eq!(sheet_row(0, 1), 2);
        assert_eq!(sheet_row(4, 2), 7);
    }
}
