//! String to cell conversion.
//!
//! Each character becomes its own one-character `String` cell, so string
//! programs can compare cells against literals like `"a"`.

use tapeworks_core::{Lifo, Sequence};

pub fn sequence(text: &str) -> Sequence<String> {
    text.chars().map(String::from).collect()
}

pub fn stack(text: &str) -> Lifo<String> {
    text.chars().map(String::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_has_one_cell_per_char() {
        let cells = sequence("aβc");
        assert_eq!(cells.count(), 3);
        assert_eq!(cells.to_vec(), vec!["a", "β", "c"]);
    }

    #[test]
    fn stack_keeps_order_bottom_up() {
        let mut cells = stack("xy");
        assert_eq!(cells.get(0).unwrap(), "x");
        assert_eq!(cells.pop().as_deref(), Some("y"));
    }

    #[test]
    fn empty_text_is_empty() {
        assert!(sequence("").is_empty());
        assert!(stack("").is_empty());
    }
}
