//! Word-window chunking

/// Split `text` on whitespace into windows of `max_words` words, keeping at
/// most `max_chunks` windows.
///
/// Words inside a chunk are re-joined with a single space. Windows do not
/// overlap and the last one may be short. A `max_words` of zero is treated
/// as one.
pub fn chunk_text(text: &str, max_words: usize, max_chunks: usize) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();

    words
        .chunks(max_words.max(1))
        .take(max_chunks)
        .map(|window| window.join(" "))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text() {
        assert!(chunk_text("", 300, 10).is_empty());
        assert!(chunk_text(" \n\t ", 300, 10).is_empty());
    }

    #[test]
    fn test_windows_and_remainder() {
        let chunks = chunk_text("a b c d e f g", 3, 10);
        assert_eq!(chunks, vec!["a b c", "d e f", "g"]);
    }

    #[test]
    fn test_truncated_to_max_chunks() {
        let text = "w ".repeat(1000);
        let chunks = chunk_text(&text, 10, 4);
        assert_eq!(chunks.len(), 4);
        assert!(chunks.iter().all(|c| c.split(' ').count() == 10));
    }

    #[test]
    fn test_whitespace_normalized() {
        let chunks = chunk_text("This  Agreement\n\nis\tbinding", 300, 10);
        assert_eq!(chunks, vec!["This Agreement is binding"]);
    }

    #[test]
    fn test_zero_window_treated_as_one() {
        assert_eq!(chunk_text("a b", 0, 10), vec!["a", "b"]);
    }
}
