//! Label derivation for record paths.
//!
//! Word boundaries follow ASCII word characters (`[A-Za-z0-9_]`), so a
//! character is capitalized when it starts a run of word characters.

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Uppercase the first character of every word
#[must_use]
pub fn capitalize_words(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_is_word = false;
    for c in text.chars() {
        let is_word = is_word_char(c);
        if is_word && !prev_is_word {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
        prev_is_word = is_word;
    }
    out
}

/// `company_info` → `Company Info`
#[must_use]
pub fn humanize_key(key: &str) -> String {
    capitalize_words(&key.replace('_', " "))
}

/// `pricing.pricing_url` → `Pricing > Pricing Url`
#[must_use]
pub fn path_label(path: &str) -> String {
    capitalize_words(&path.replace('_', " ").replace('.', " > "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn humanize_replaces_underscores_and_capitalizes() {
        assert_eq!(humanize_key("company_info"), "Company Info");
        assert_eq!(humanize_key("year_founded"), "Year Founded");
        assert_eq!(humanize_key("faq"), "Faq");
    }

    #[test]
    fn path_label_renders_separators() {
        assert_eq!(path_label("pricing.pricing_url"), "Pricing > Pricing Url");
        assert_eq!(
            path_label("reviews.strengths_paragraph"),
            "Reviews > Strengths Paragraph"
        );
    }

    #[test]
    fn brackets_start_new_words() {
        assert_eq!(path_label("items[0].sub_key"), "Items[0] > Sub Key");
    }

    #[test]
    fn existing_capitals_are_kept() {
        assert_eq!(humanize_key("metaKeys"), "MetaKeys");
        assert_eq!(humanize_key("updatedAt"), "UpdatedAt");
    }
}
