pub const ELLIPSIS: char = '\u{2026}';

/// Greedy word wrap into at most `max_lines` lines of at most
/// `max_chars_per_line` characters. Words longer than a line are cut; when
/// words remain after the last line, that line ends with an ellipsis.
/// Always returns at least one line.
pub fn wrap_text(value: Option<&str>, max_chars_per_line: usize, max_lines: usize) -> Vec<String> {
    let Some(value) = value.filter(|v| !v.trim().is_empty()) else {
        return vec![String::new()];
    };
    let max_lines = max_lines.max(1);
    let max_chars = max_chars_per_line.max(1);
    let words: Vec<&str> = value.split_whitespace().collect();

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut index = 0;
    while index < words.len() {
        let word = words[index];
        let candidate_len = if current.is_empty() {
            char_len(word)
        } else {
            char_len(&current) + 1 + char_len(word)
        };
        if candidate_len <= max_chars {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            index += 1;
            continue;
        }

        if current.is_empty() {
            current = truncate_chars(word, max_chars);
            index += 1;
        }
        lines.push(std::mem::take(&mut current));
        if lines.len() == max_lines {
            if index < words.len()
                && let Some(last) = lines.last_mut()
            {
                *last = add_ellipsis(last, max_chars);
            }
            return lines;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

fn add_ellipsis(line: &str, max_chars: usize) -> String {
    let trimmed = line.trim();
    let mut out = if char_len(trimmed) >= max_chars {
        truncate_chars(trimmed, max_chars.saturating_sub(1))
    } else {
        trimmed.to_string()
    };
    out.push(ELLIPSIS);
    out
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

fn truncate_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_input_yields_one_empty_line() {
        assert_eq!(wrap_text(None, 10, 2), vec![String::new()]);
        assert_eq!(wrap_text(Some("   "), 10, 2), vec![String::new()]);
    }

    #[test]
    fn short_text_stays_on_one_line() {
        assert_eq!(wrap_text(Some("Static Code Scanning"), 24, 2), vec!["Static Code Scanning"]);
    }

    #[test]
    fn wraps_on_word_boundaries() {
        let lines = wrap_text(Some("Web Application Firewall Rules"), 16, 2);
        assert_eq!(lines, vec!["Web Application", "Firewall Rules"]);
    }

    #[test]
    fn overflow_ends_with_ellipsis() {
        let lines = wrap_text(Some("one two three four five six"), 9, 2);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "one two");
        assert!(lines[1].ends_with(ELLIPSIS));
        assert!(lines.iter().all(|l| l.chars().count() <= 9));
    }

    #[test]
    fn full_last_line_is_shortened_before_ellipsis() {
        let lines = wrap_text(Some("abcd efgh ijkl"), 4, 2);
        assert_eq!(lines, vec!["abcd".to_string(), format!("efg{ELLIPSIS}")]);
    }

    #[test]
    fn long_word_is_cut_to_fit() {
        let lines = wrap_text(Some("Supercalifragilistic"), 8, 1);
        assert_eq!(lines, vec!["Supercal"]);
    }

    #[test]
    fn long_word_after_text_moves_to_next_line() {
        let lines = wrap_text(Some("a Supercalifragilistic"), 8, 2);
        assert_eq!(lines, vec!["a", "Supercal"]);
    }

    #[test]
    fn respects_line_and_width_bounds() {
        let text = "Identity and access management for privileged service accounts across clouds";
        for width in 1..30 {
            for max_lines in 1..4 {
                let lines = wrap_text(Some(text), width, max_lines);
                assert!(!lines.is_empty() && lines.len() <= max_lines);
                assert!(lines.iter().all(|l| l.chars().count() <= width));
            }
        }
    }

    #[test]
    fn untruncated_lines_reproduce_the_words() {
        let text = "Secrets  management\tand rotation";
        let lines = wrap_text(Some(text), 12, 5);
        assert_eq!(lines.join(" "), "Secrets management and rotation");
    }

    #[test]
    fn is_deterministic() {
        let a = wrap_text(Some("Threat modelling and secure design review"), 10, 2);
        let b = wrap_text(Some("Threat modelling and secure design review"), 10, 2);
        assert_eq!(a, b);
    }
}
