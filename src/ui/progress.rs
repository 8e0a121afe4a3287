//! Duration and tally formatting.

use std::time::Duration;

/// Format a duration for display.
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 1.0 {
        format!("{}ms", d.as_millis())
    } else if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        let mins = secs / 60.0;
        format!("{:.1}m", mins)
    }
}

/// `Total: 8/9 checks passed`
pub fn format_tally(passed: usize, total: usize) -> String {
    let noun = if total == 1 { "check" } else { "checks" };
    format!("Total: {}/{} {} passed", passed, total, noun)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_duration_millis() {
        assert_eq!(format_duration(Duration::from_millis(250)), "250ms");
    }

    #[test]
    fn format_duration_seconds() {
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.5s");
    }

    #[test]
    fn format_duration_minutes() {
        assert_eq!(format_duration(Duration::from_secs(300)), "5.0m");
    }

    #[test]
    fn tally_pluralizes() {
        assert_eq!(format_tally(2, 3), "Total: 2/3 checks passed");
        assert_eq!(format_tally(1, 1), "Total: 1/1 check passed");
        assert_eq!(format_tally(0, 0), "Total: 0/0 checks passed");
    }
}
