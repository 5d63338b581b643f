//! Auto-growing text cells.

/// Height of a wrapping text cell, in visual lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoResizeText;

impl AutoResizeText {
    /// Visual line count of `text` wrapped at `columns` characters.
    ///
    /// Each hard line takes at least one row; longer lines soft-wrap. Never
    /// less than 1.
    pub fn rows_for(text: &str, columns: usize) -> usize {
        let columns = columns.max(1);
        text.split('\n')
            .map(|line| {
                let chars = line.chars().count();
                chars.div_ceil(columns).max(1)
            })
            .sum::<usize>()
            .max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_for() {
        assert_eq!(AutoResizeText::rows_for("", 10), 1);
        assert_eq!(AutoResizeText::rows_for("short", 10), 1);
        assert_eq!(AutoResizeText::rows_for("0123456789", 10), 1);
        assert_eq!(AutoResizeText::rows_for("0123456789a", 10), 2);
        assert_eq!(AutoResizeText::rows_for("a\nb\n", 10), 3);
        assert_eq!(AutoResizeText::rows_for("abc", 0), 3);
    }
}
