/// Shortens `text` to `max_chars` characters followed by `..` when it is longer than that.
pub fn truncate_for_display(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let mut truncated: String = text.chars().take(max_chars).collect();
        truncated.push_str("..");
        truncated
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::truncate_for_display;

    #[test]
    fn test_short_text_is_unchanged() {
        assert_eq!(truncate_for_display("The sky is beautiful", 57), "The sky is beautiful");
    }

    #[test]
    fn test_long_text_is_truncated() {
        let text = "a".repeat(60);
        let truncated = truncate_for_display(&text, 57);
        assert_eq!(truncated, format!("{}..", "a".repeat(57)));
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        assert_eq!(truncate_for_display("ééé", 3), "ééé");
        assert_eq!(truncate_for_display("éééé", 3), "ééé..");
    }
}
