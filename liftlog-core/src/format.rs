//! Formatting helpers shared by report front ends.

/// Format a weight in kilograms (e.g., "82.5 kg").
pub fn format_weight(weight_kg: f64) -> String {
    if weight_kg == weight_kg.trunc() {
        format!("{} kg", weight_kg as i64)
    } else {
        format!("{:.1} kg", weight_kg)
    }
}

/// Format a training volume compactly (e.g., "12.4k kg").
pub fn format_volume(volume_kg: f64) -> String {
    if volume_kg >= 1_000.0 {
        format!("{:.1}k kg", volume_kg / 1_000.0)
    } else {
        format_weight(volume_kg)
    }
}

/// Format a percent delta with an explicit sign (e.g., "+10.0%" or "-5.2%").
pub fn format_percent(delta: f64) -> String {
    if delta >= 0.0 {
        format!("+{:.1}%", delta)
    } else {
        format!("{:.1}%", delta)
    }
}

/// Format a duration in seconds (e.g., "2m 30s").
pub fn format_duration(seconds: u32) -> String {
    let mins = seconds / 60;
    let secs = seconds % 60;
    if mins > 0 {
        format!("{}m {}s", mins, secs)
    } else {
        format!("{}s", secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_weight() {
        assert_eq!(format_weight(80.0), "80 kg");
        assert_eq!(format_weight(82.5), "82.5 kg");
    }

    #[test]
    fn test_format_volume() {
        assert_eq!(format_volume(500.0), "500 kg");
        assert_eq!(format_volume(12_400.0), "12.4k kg");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(10.0), "+10.0%");
        assert_eq!(format_percent(-5.25), "-5.2%");
        assert_eq!(format_percent(0.0), "+0.0%");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(45), "45s");
        assert_eq!(format_duration(150), "2m 30s");
    }
}
