use once_cell::sync::Lazy;
use percent_encoding::percent_decode_str;
use regex::Regex;

static LINK_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^(.*)\[([^\[]*)\]$").expect("link suffix pattern is valid")
});

/// Display text and optional hyperlink split out of a `Label[url]` field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkText {
    pub text: Option<String>,
    pub href: Option<String>,
}

impl LinkText {
    pub fn text_or_empty(&self) -> String {
        self.text.clone().unwrap_or_default()
    }
}

/// Splits a trailing `[url]` off a label. The URL is percent-decoded; fields
/// without a non-blank bracketed suffix are returned untouched.
pub fn parse_link_field(value: Option<&str>) -> LinkText {
    let Some(value) = value else {
        return LinkText::default();
    };
    let trimmed = value.trim();
    if let Some(caps) = LINK_SUFFIX.captures(trimmed) {
        let encoded = caps.get(2).map(|m| m.as_str().trim()).unwrap_or("");
        if !encoded.is_empty() {
            let label = caps.get(1).map(|m| m.as_str().trim()).unwrap_or("");
            return LinkText {
                text: (!label.is_empty()).then(|| label.to_string()),
                href: Some(decode_url(encoded)),
            };
        }
    }
    LinkText {
        text: Some(value.to_string()),
        href: None,
    }
}

/// Form-style URL decoding: `+` becomes a space and `%XX` sequences are
/// decoded as UTF-8. Input that does not decode to UTF-8 is returned as-is.
pub fn decode_url(value: &str) -> String {
    let spaced = value.replace('+', " ");
    match percent_decode_str(&spaced).decode_utf8() {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_label_and_decodes_url() {
        let link = parse_link_field(Some("Static Scanning[https%3A%2F%2Fexample.com%2Fsast]"));
        assert_eq!(link.text.as_deref(), Some("Static Scanning"));
        assert_eq!(link.href.as_deref(), Some("https://example.com/sast"));
    }

    #[test]
    fn plain_text_is_untouched() {
        let link = parse_link_field(Some("  Plain name "));
        assert_eq!(link.text.as_deref(), Some("  Plain name "));
        assert_eq!(link.href, None);
    }

    #[test]
    fn blank_brackets_are_not_links() {
        let link = parse_link_field(Some("Name[  ]"));
        assert_eq!(link.text.as_deref(), Some("Name[  ]"));
        assert_eq!(link.href, None);
    }

    #[test]
    fn empty_label_has_no_text() {
        let link = parse_link_field(Some("[https://example.com]"));
        assert_eq!(link.text, None);
        assert_eq!(link.href.as_deref(), Some("https://example.com"));
    }

    #[test]
    fn uses_last_bracket_pair() {
        let link = parse_link_field(Some("A [draft] label[https://x.io/a]"));
        assert_eq!(link.text.as_deref(), Some("A [draft] label"));
        assert_eq!(link.href.as_deref(), Some("https://x.io/a"));
    }

    #[test]
    fn null_field_is_empty() {
        assert_eq!(parse_link_field(None), LinkText::default());
    }

    #[test]
    fn decode_handles_plus_and_invalid_utf8() {
        assert_eq!(decode_url("a+b%20c"), "a b c");
        assert_eq!(decode_url("%FF%FE"), "%FF%FE");
    }
}
