const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Scales `size` to the largest unit whose value stays at or above 1,
/// keeping at most two decimals.
pub fn format_size(size: u64) -> String {
    if size == 0 {
        return "0 Bytes".to_string();
    }

    let mut scaled = size as f64;
    let mut unit_index = 0;

    while scaled >= 1024.0 && unit_index < UNITS.len() - 1 {
        scaled /= 1024.0;
        unit_index += 1;
    }

    let rounded = format!("{:.2}", scaled);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[unit_index])
}

#[cfg(test)]
mod tests {
    use super::format_size;

    #[test]
    fn zero_is_literal() {
        assert_eq!(format_size(0), "0 Bytes");
    }

    #[test]
    fn picks_largest_whole_unit() {
        assert_eq!(format_size(1), "1 Bytes");
        assert_eq!(format_size(1023), "1023 Bytes");
        assert_eq!(format_size(1024), "1 KB");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(1_048_576), "1 MB");
        assert_eq!(format_size(1_073_741_824), "1 GB");
    }

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(format_size(1100), "1.07 KB");
        assert_eq!(format_size(10 * 1024 + 10), "10.01 KB");
    }

    #[test]
    fn stays_in_gigabytes_past_the_table() {
        assert_eq!(format_size(2048 * 1_073_741_824), "2048 GB");
    }
}
