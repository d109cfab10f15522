//! Byte formatting for descriptions and reports.

const KB: u64 = 1024;
const MB: u64 = 1024 * KB;

/// Formats a byte count into a human-readable string.
pub fn format_bytes(bytes: u64) -> String {
    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(500), "500 bytes");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(2_097_152), "2.00 MB");
    }
}
