// secdash-widgets/src/common/formatting.rs

/// Format a rate in bytes per second to a human-readable string,
/// e.g. `"15.2 MB/s"` or `"1.5 GB/s"`.
pub fn format_rate(bytes_per_sec: f64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    const GB: f64 = MB * 1024.0;
    const TB: f64 = GB * 1024.0;

    if bytes_per_sec >= TB {
        format!("{:.1} TB/s", bytes_per_sec / TB)
    } else if bytes_per_sec >= GB {
        format!("{:.1} GB/s", bytes_per_sec / GB)
    } else if bytes_per_sec >= MB {
        format!("{:.1} MB/s", bytes_per_sec / MB)
    } else if bytes_per_sec >= KB {
        format!("{:.1} KB/s", bytes_per_sec / KB)
    } else {
        format!("{:.0} B/s", bytes_per_sec)
    }
}

/// Format a percentage with one decimal place, e.g. `"45.2%"`
pub fn format_percentage(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Format a counter with comma separators, e.g. `"1,234,567"`
pub fn format_number(value: u64) -> String {
    let mut result = String::new();
    let s = value.to_string();
    let chars: Vec<char> = s.chars().collect();

    for (i, ch) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*ch);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_rate() {
        assert_eq!(format_rate(0.0), "0 B/s");
        assert_eq!(format_rate(1024.0), "1.0 KB/s");
        assert_eq!(format_rate(15.2 * 1024.0 * 1024.0), "15.2 MB/s");
        assert_eq!(format_rate(1.5 * 1024.0 * 1024.0 * 1024.0), "1.5 GB/s");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.0), "0.0%");
        assert_eq!(format_percentage(45.2), "45.2%");
        assert_eq!(format_percentage(100.0), "100.0%");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(123), "123");
        assert_eq!(format_number(1234), "1,234");
        assert_eq!(format_number(1234567), "1,234,567");
        assert_eq!(format_number(1234567890), "1,234,567,890");
    }
}
