pub const FREQUENCY_DAILY: &str = "daily";
pub const FREQUENCY_SPORADIC: &str = "sporadic";

/// DaisyUI theme names the client persists.
pub const THEME_DARK: &str = "business";
pub const THEME_LIGHT: &str = "corporate";

pub const DAILY_ICONS: &[&str] = &["bed", "utensils", "glass-water", "person-running", "pen"];
pub const SPORADIC_ICONS: &[&str] = &["money-bill-wave", "angles-left", "angles-right"];

pub fn icons_for_frequency(frequency: &str) -> &'static [&'static str] {
    if frequency == FREQUENCY_DAILY {
        DAILY_ICONS
    } else {
        SPORADIC_ICONS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icons_for_frequency() {
        assert_eq!(icons_for_frequency(FREQUENCY_DAILY), DAILY_ICONS);
        assert_eq!(icons_for_frequency(FREQUENCY_SPORADIC), SPORADIC_ICONS);
        // Anything unrecognized falls through to the sporadic set.
        assert_eq!(icons_for_frequency("weekly"), SPORADIC_ICONS);
    }
}
