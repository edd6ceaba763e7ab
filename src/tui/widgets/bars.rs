/// Text progress bar, e.g. `[#####-----] 50%`.
///
/// The fill is clamped at 100% but the printed percentage is not, so a
/// goal beaten twice over still reads `200%`.
pub fn progress_bar(percent: u32, width: usize) -> String {
    let filled = (percent.min(100) as usize * width) / 100;
    format!(
        "[{}{}] {}%",
        "#".repeat(filled),
        "-".repeat(width - filled),
        percent
    )
}

/// Fixed-width bar scaled against `max`, for the weekly chart
pub fn relative_bar(value: u32, max: u32, width: usize) -> String {
    let filled = if max == 0 {
        0
    } else {
        ((value.min(max) as u64 * width as u64) / max as u64) as usize
    };
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0, 10), "[----------] 0%");
        assert_eq!(progress_bar(25, 8), "[##------] 25%");
        assert_eq!(progress_bar(100, 4), "[####] 100%");
        assert_eq!(progress_bar(140, 4), "[####] 140%");
        assert_eq!(progress_bar(50, 0), "[] 50%");
    }

    #[test]
    fn test_relative_bar() {
        assert_eq!(relative_bar(0, 0, 4), "░░░░");
        assert_eq!(relative_bar(2, 4, 4), "██░░");
        assert_eq!(relative_bar(4, 4, 4), "████");
        assert_eq!(relative_bar(1, 3, 6), "██░░░░");
        assert_eq!(relative_bar(5, 4, 4), "████");
        assert_eq!(relative_bar(2, 4, 4).chars().count(), 4);
    }
}
