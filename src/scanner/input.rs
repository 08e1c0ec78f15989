use std::str::Chars;

use peekmore::{PeekMore, PeekMoreIterator};

/// A lookahead cursor over the source characters. The end of the stream is
/// represented by the `'\0'` sentinel.
pub struct Input<'s> {
    chars: PeekMoreIterator<Chars<'s>>,
}

impl<'s> Input<'s> {
    pub fn new(source: &'s str) -> Input<'s> {
        Input {
            chars: source.chars().peekmore(),
        }
    }

    /// Consumes and returns the next character.
    #[inline]
    pub fn advance(&mut self) -> char {
        self.chars.next().unwrap_or('\0')
    }

    /// Peeks into the next character without consuming it.
    #[inline]
    pub fn peek(&mut self) -> char {
        self.chars.peek().copied().unwrap_or('\0')
    }

    /// Peeks one character past `peek`. Needed to decide whether a `.` after
    /// a number's integer part starts a fractional part.
    #[inline]
    pub fn peek_second(&mut self) -> char {
        self.chars.peek_nth(1).copied().unwrap_or('\0')
    }

    /// Checks if the input is exhausted.
    #[inline]
    pub fn finished(&mut self) -> bool {
        self.chars.peek().is_none()
    }
}
