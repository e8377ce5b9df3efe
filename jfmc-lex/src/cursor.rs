//! Character cursor for traversing source text.
//!
//! Tracks byte position plus 1-based line/column. `\r\n` is treated as
//! a single newline (so a CRLF file reports the same line/column
//! positions as an LF file of identical content) and a leading UTF-8
//! BOM, if present, is consumed before line 1 column 1 begins.

pub struct Cursor<'a> {
    source: &'a str,
    position: usize,
    line: u32,
    column: u32,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut cursor = Self {
            source,
            position: 0,
            line: 1,
            column: 1,
        };
        cursor.skip_bom();
        cursor
    }

    fn skip_bom(&mut self) {
        const BOM: &str = "\u{feff}";
        if self.source[self.position..].starts_with(BOM) {
            self.position += BOM.len();
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn column(&self) -> u32 {
        self.column
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.source.len()
    }

    pub fn current_char(&self) -> char {
        self.char_at(0)
    }

    pub fn char_at(&self, offset: usize) -> char {
        self.source[self.position..].chars().nth(offset).unwrap_or('\0')
    }

    pub fn peek_char(&self, offset: usize) -> char {
        self.char_at(offset)
    }

    /// Advances past the current character, updating line/column.
    /// `\r\n` is consumed as a single unit so it counts as one newline;
    /// a bare `\r` (classic Mac line ending) or bare `\n` each count as
    /// one newline on their own.
    pub fn advance(&mut self) -> char {
        let ch = self.current_char();
        if ch == '\0' {
            return ch;
        }
        self.position += ch.len_utf8();
        if ch == '\r' && self.current_char() == '\n' {
            self.position += 1;
            self.line += 1;
            self.column = 1;
        } else if ch == '\r' || ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        ch
    }

    pub fn matches(&self, expected: char) -> bool {
        self.current_char() == expected
    }

    /// Advances only if the current character equals `expected`.
    /// Returns whether it matched and advanced.
    pub fn advance_if(&mut self, expected: char) -> bool {
        if self.matches(expected) {
            self.advance();
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crlf_counts_as_a_single_newline() {
        let mut c = Cursor::new("a\r\nb");
        assert_eq!(c.advance(), 'a');
        assert_eq!(c.line(), 1);
        assert_eq!(c.advance(), '\r');
        assert_eq!(c.line(), 2);
        assert_eq!(c.column(), 1);
        assert_eq!(c.current_char(), 'b');
    }

    #[test]
    fn bom_is_skipped_before_position_zero() {
        let c = Cursor::new("\u{feff}fn main");
        assert_eq!(c.current_char(), 'f');
        assert_eq!(c.position(), 3);
    }

    #[test]
    fn bare_cr_also_counts_as_a_newline() {
        let mut c = Cursor::new("a\rb");
        c.advance();
        assert_eq!(c.line(), 1);
        c.advance();
        assert_eq!(c.line(), 2);
        assert_eq!(c.column(), 1);
    }

    #[test]
    fn bare_lf_advances_line_and_resets_column() {
        let mut c = Cursor::new("ab\ncd");
        c.advance();
        c.advance();
        assert_eq!(c.line(), 1);
        assert_eq!(c.column(), 3);
        c.advance();
        assert_eq!(c.line(), 2);
        assert_eq!(c.column(), 1);
    }
}
