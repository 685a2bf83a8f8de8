/// Renders a count the way the dataset sidebar shows scores: `"999"`, `"1K"`, `"12K"`.
pub fn compact_count(value: u32) -> String {
    if value >= 1000 {
        format!("{}K", value.saturating_add(500) / 1000)
    } else {
        value.to_string()
    }
}

/// Packs a signed grid cell coordinate into a single map key.
pub fn cell_key(cell_x: i32, cell_y: i32) -> u64 {
    ((cell_x as u32 as u64) << 32) | (cell_y as u32 as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_count_switches_to_thousands() {
        assert_eq!(compact_count(0), "0");
        assert_eq!(compact_count(999), "999");
        assert_eq!(compact_count(1000), "1K");
        assert_eq!(compact_count(1499), "1K");
        assert_eq!(compact_count(1500), "2K");
        assert_eq!(compact_count(10_000), "10K");
    }

    #[test]
    fn cell_keys_distinguish_negative_cells() {
        assert_ne!(cell_key(-1, 0), cell_key(0, -1));
        assert_ne!(cell_key(-1, -1), cell_key(1, 1));
        assert_eq!(cell_key(3, 4), cell_key(3, 4));
    }
}
