//! A1-style references for grid cells and regions.

/// Convert a 0-indexed column to its letter form (0 -> "A", 26 -> "AA").
pub fn col_to_letter(col: u32) -> String {
    let mut result = String::new();
    let mut n = u64::from(col) + 1; // Convert to 1-based
    while n > 0 {
        n -= 1;
        let letter = u8::try_from(n % 26).unwrap_or(0);
        result.insert(0, char::from(b'A' + letter));
        n /= 26;
    }
    result
}

/// Format a 0-indexed (row, col) as an A1 reference.
pub fn cell_ref(row: u32, col: u32) -> String {
    format!("{}{}", col_to_letter(col), u64::from(row) + 1)
}

/// Format an inclusive 0-indexed range as `"A1:B2"`, collapsing single cells to `"A1"`.
pub fn range_ref(start_row: u32, start_col: u32, end_row: u32, end_col: u32) -> String {
    if start_row == end_row && start_col == end_col {
        return cell_ref(start_row, start_col);
    }
    format!(
        "{}:{}",
        cell_ref(start_row, start_col),
        cell_ref(end_row, end_col)
    )
}
