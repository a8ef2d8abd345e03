/// Character iterator over a type expression with byte-offset tracking.
pub(crate) struct Cursor<'src> {
    source: &'src str,
    pos: u32,
    chars: std::str::Chars<'src>,
}

impl<'src> Cursor<'src> {
    pub(crate) fn new(source: &'src str) -> Self {
        Self {
            source,
            pos: 0,
            chars: source.chars(),
        }
    }

    /// Look at the current character without consuming it.
    pub(crate) fn peek(&self) -> Option<char> {
        self.chars.clone().next()
    }

    /// Consume the current character and advance the position.
    pub(crate) fn advance(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        self.pos += c.len_utf8() as u32;
        Some(c)
    }

    pub(crate) fn pos(&self) -> u32 {
        self.pos
    }

    /// Advance while the predicate holds for the current character.
    pub(crate) fn eat_while(&mut self, predicate: impl Fn(char) -> bool) {
        while let Some(c) = self.peek() {
            if predicate(c) {
                self.advance();
            } else {
                break;
            }
        }
    }

    pub(crate) fn slice(&self, start: u32, end: u32) -> &'src str {
        &self.source[start as usize..end as usize]
    }
}
