//! Fixed A4 report geometry and text layout helpers.
//!
//! Widths use an approximate Helvetica advance (0.5 em per character), which
//! is accurate enough for wrapping and centering body text in a report
//! template; the page never depends on exact glyph metrics.

pub(crate) const PAGE_WIDTH: f32 = 595.28;
pub(crate) const PAGE_HEIGHT: f32 = 841.89;
pub(crate) const MARGIN: f32 = 48.0;

pub(crate) const HEADER_NAME_SIZE: f32 = 16.0;
pub(crate) const META_SIZE: f32 = 10.0;
pub(crate) const TITLE_SIZE: f32 = 14.0;
pub(crate) const BODY_SIZE: f32 = 12.0;
pub(crate) const FOOTER_SIZE: f32 = 8.0;

pub(crate) const BODY_LEADING: f32 = 17.0;
pub(crate) const LOGO_WIDTH: f32 = 56.7;

/// Y coordinate below which the header never reaches; body text starts here
/// on continuation pages.
pub(crate) const HEADER_BOTTOM: f32 = PAGE_HEIGHT - 150.0;
/// Height reserved on the first page for the title and date block.
pub(crate) const TITLE_BLOCK_HEIGHT: f32 = 52.0;
/// Body text must stay above the footer area.
pub(crate) const FOOTER_TOP: f32 = 60.0;

pub(crate) const FOOTER_BASELINE: f32 = 32.0;

/// Approximate rendered width of `text` at `size` points.
pub(crate) fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * 0.5
}

/// X coordinate that centers `text` on the page.
pub(crate) fn centered_x(text: &str, size: f32) -> f32 {
    ((PAGE_WIDTH - text_width(text, size)) / 2.0).max(MARGIN)
}

/// Number of body lines that fit between `body_top` and the footer.
pub(crate) fn lines_between(body_top: f32) -> usize {
    let span = body_top - FOOTER_TOP;
    if span <= 0.0 {
        0
    } else {
        (span / BODY_LEADING) as usize
    }
}

/// Greedy word wrap. Paragraph breaks (`\n`) are preserved as separate lines;
/// words wider than the line are hard-split.
pub(crate) fn wrap_text(text: &str, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let paragraph = paragraph.trim_end();
        if paragraph.is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if text_width(word, size) > max_width {
                // Flush the current line, then hard-split the long word.
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let mut chunk = String::new();
                for c in word.chars() {
                    chunk.push(c);
                    if text_width(&chunk, size) >= max_width {
                        lines.push(std::mem::take(&mut chunk));
                    }
                }
                current = chunk;
                continue;
            }

            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };
            if text_width(&candidate, size) > max_width {
                lines.push(std::mem::take(&mut current));
                current = word.to_string();
            } else {
                current = candidate;
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }

    lines
}

/// Split wrapped body lines into pages. The first page has less room because
/// of the title block; every document has at least one page.
pub(crate) fn paginate(lines: Vec<String>) -> Vec<Vec<String>> {
    let first_capacity = lines_between(HEADER_BOTTOM - TITLE_BLOCK_HEIGHT).max(1);
    let rest_capacity = lines_between(HEADER_BOTTOM).max(1);

    let mut pages = Vec::new();
    let mut remaining = lines.as_slice();

    let first_take = remaining.len().min(first_capacity);
    pages.push(remaining[..first_take].to_vec());
    remaining = &remaining[first_take..];

    while !remaining.is_empty() {
        let take = remaining.len().min(rest_capacity);
        pages.push(remaining[..take].to_vec());
        remaining = &remaining[take..];
    }

    pages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_short_text_single_line() {
        let lines = wrap_text("hello world", BODY_SIZE, 400.0);
        assert_eq!(lines, vec!["hello world".to_string()]);
    }

    #[test]
    fn test_wrap_respects_max_width() {
        let text = "alpha beta gamma delta epsilon zeta eta theta iota kappa";
        let max_width = 80.0;
        let lines = wrap_text(text, BODY_SIZE, max_width);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width(line, BODY_SIZE) <= max_width, "line too wide: {}", line);
        }
        // No words lost
        let rejoined = lines.join(" ");
        assert_eq!(rejoined.split_whitespace().count(), text.split_whitespace().count());
    }

    #[test]
    fn test_wrap_preserves_paragraph_breaks() {
        let lines = wrap_text("first\n\nsecond", BODY_SIZE, 400.0);
        assert_eq!(
            lines,
            vec!["first".to_string(), String::new(), "second".to_string()]
        );
    }

    #[test]
    fn test_wrap_hard_splits_long_words() {
        let word = "x".repeat(300);
        let lines = wrap_text(&word, BODY_SIZE, 120.0);
        assert!(lines.len() > 1);
        let total: usize = lines.iter().map(|l| l.chars().count()).sum();
        assert_eq!(total, 300);
    }

    #[test]
    fn test_paginate_empty_body_is_one_page() {
        let pages = paginate(Vec::new());
        assert_eq!(pages.len(), 1);
        assert!(pages[0].is_empty());
    }

    #[test]
    fn test_paginate_overflows_to_second_page() {
        let capacity = lines_between(HEADER_BOTTOM - TITLE_BLOCK_HEIGHT);
        let lines: Vec<String> = (0..capacity + 5).map(|i| format!("line {}", i)).collect();
        let pages = paginate(lines);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].len(), capacity);
        assert_eq!(pages[1].len(), 5);
    }

    #[test]
    fn test_centered_x_never_left_of_margin() {
        let long = "w".repeat(500);
        assert_eq!(centered_x(&long, BODY_SIZE), MARGIN);
        assert!(centered_x("short", BODY_SIZE) > MARGIN);
    }
}
