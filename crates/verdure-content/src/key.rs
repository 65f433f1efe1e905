//! Artifact key construction for stored plant photos.
//!
//! Keys double as the references written into the journal, so they follow
//! the historical naming: `<sanitized-name>_day<N>.png` for real photos and
//! `<sanitized-name>_day<N>_predicted.png` for generated frames.

/// Lowercase the plant name and replace anything non-alphanumeric with `_`.
/// An empty or all-symbol name falls back to `"plant"`.
pub fn sanitize_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    if cleaned.chars().all(|c| c == '_') {
        "plant".to_string()
    } else {
        cleaned
    }
}

/// Key for the real photo uploaded on `day`.
pub fn photo_key(name: &str, day: u32) -> String {
    format!("{}_day{}.png", sanitize_name(name), day)
}

/// Key for the generated frame predicting `day`.
pub fn predicted_key(name: &str, day: u32) -> String {
    format!("{}_day{}_predicted.png", sanitize_name(name), day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_lowercases_and_replaces() {
        assert_eq!(sanitize_name("Sweet Basil #2"), "sweet_basil__2");
    }

    #[test]
    fn sanitize_empty_falls_back() {
        assert_eq!(sanitize_name(""), "plant");
        assert_eq!(sanitize_name("!!!"), "plant");
    }

    #[test]
    fn keys_follow_naming() {
        assert_eq!(photo_key("Basil", 20), "basil_day20.png");
        assert_eq!(predicted_key("Basil", 21), "basil_day21_predicted.png");
    }
}
