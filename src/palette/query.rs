/// Search box contents with a char-indexed cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryInput {
    value: String,
    cursor: usize,
}

impl QueryInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &str {
        self.value.as_str()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = char_count(&self.value);
    }

    pub fn clear(&mut self) -> bool {
        if self.value.is_empty() {
            return false;
        }
        self.value.clear();
        self.cursor = 0;
        true
    }

    pub fn insert_char(&mut self, ch: char) {
        let pos = clamp_cursor(self.cursor, &self.value);
        let byte_pos = byte_index_at_char(&self.value, pos);
        self.value.insert(byte_pos, ch);
        self.cursor = pos + 1;
    }

    pub fn backspace(&mut self) -> bool {
        let pos = clamp_cursor(self.cursor, &self.value);
        if pos == 0 {
            return false;
        }
        let byte_pos = byte_index_at_char(&self.value, pos - 1);
        self.value.remove(byte_pos);
        self.cursor = pos - 1;
        true
    }

    pub fn delete(&mut self) -> bool {
        let pos = clamp_cursor(self.cursor, &self.value);
        if pos >= char_count(&self.value) {
            return false;
        }
        let byte_pos = byte_index_at_char(&self.value, pos);
        self.value.remove(byte_pos);
        true
    }

    pub fn move_left(&mut self) -> bool {
        let pos = clamp_cursor(self.cursor, &self.value);
        if pos == 0 {
            return false;
        }
        self.cursor = pos - 1;
        true
    }

    pub fn move_right(&mut self) -> bool {
        let pos = clamp_cursor(self.cursor, &self.value);
        if pos >= char_count(&self.value) {
            return false;
        }
        self.cursor = pos + 1;
        true
    }

    pub fn move_home(&mut self) -> bool {
        let moved = self.cursor != 0;
        self.cursor = 0;
        moved
    }

    pub fn move_end(&mut self) -> bool {
        let end = char_count(&self.value);
        let moved = self.cursor != end;
        self.cursor = end;
        moved
    }

    pub fn delete_word_left(&mut self) -> bool {
        let mut chars: Vec<char> = self.value.chars().collect();
        let pos = self.cursor.min(chars.len());
        if pos == 0 {
            self.cursor = 0;
            return false;
        }

        let mut start = pos;
        while start > 0 && is_separator(chars[start - 1]) {
            start -= 1;
        }
        while start > 0 && !is_separator(chars[start - 1]) {
            start -= 1;
        }

        chars.drain(start..pos);
        self.value = chars.into_iter().collect();
        self.cursor = start;
        true
    }
}

fn char_count(value: &str) -> usize {
    value.chars().count()
}

fn clamp_cursor(cursor: usize, value: &str) -> usize {
    cursor.min(char_count(value))
}

fn byte_index_at_char(value: &str, char_idx: usize) -> usize {
    value
        .char_indices()
        .nth(char_idx)
        .map(|(idx, _)| idx)
        .unwrap_or(value.len())
}

fn is_separator(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, '/' | '\\' | '-' | '_' | '.' | ':')
}

#[cfg(test)]
mod tests {
    use super::QueryInput;

    #[test]
    fn insert_and_backspace_track_cursor() {
        let mut query = QueryInput::new();
        for ch in "tåb".chars() {
            query.insert_char(ch);
        }
        assert_eq!(query.value(), "tåb");
        assert_eq!(query.cursor(), 3);

        assert!(query.move_left());
        assert!(query.backspace());
        assert_eq!(query.value(), "tb");
        assert_eq!(query.cursor(), 1);

        query.insert_char('a');
        assert_eq!(query.value(), "tab");
    }

    #[test]
    fn delete_removes_under_cursor() {
        let mut query = QueryInput::new();
        query.set("tabs");
        assert!(!query.delete());
        query.move_home();
        assert!(query.delete());
        assert_eq!(query.value(), "abs");
        assert!(!query.move_left());
    }

    #[test]
    fn delete_word_left_stops_at_separator() {
        let mut query = QueryInput::new();
        query.set("> echo hello");
        assert!(query.delete_word_left());
        assert_eq!(query.value(), "> echo ");
        assert!(query.delete_word_left());
        assert_eq!(query.value(), "> ");
        assert!(query.delete_word_left());
        assert_eq!(query.value(), "");
        assert!(!query.delete_word_left());
    }

    #[test]
    fn clear_reports_change() {
        let mut query = QueryInput::new();
        assert!(!query.clear());
        query.set("x");
        assert!(query.clear());
        assert_eq!(query.cursor(), 0);
    }
}
