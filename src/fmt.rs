/// Format a value as dollars with two decimals: $1954.50, $-12.00.
pub fn dollars(val: f64) -> String {
    format!("${val:.2}")
}

/// Render a dashboard label such as `Income: $2000.00`.
pub fn label(name: &str, val: f64) -> String {
    format!("{name}: {}", dollars(val))
}

/// Human-readable file size: 512 B, 4.0 KB, 1.2 MB.
pub fn format_bytes(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    let b = bytes as f64;
    if b >= MB {
        format!("{:.1} MB", b / MB)
    } else if b >= KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{bytes} B")
    }
}
