/*!
Byte level cursor over SQL text.

The [Scanner] never materializes a token list. It only keeps the current position and
produces one [Token] at a time, skipping whitespace and the three comment styles
(`# ...`, `-- ...` and `/* ... */`). Quoted regions (`'...'`, `"..."` and `` `...` ``)
are returned as a single opaque token so that keywords inside them are never seen.

Every operation moves the cursor forward or leaves it in place, and malformed input
(unterminated comments, strings or parentheses) simply extends to the end of the buffer.
*/

use memchr::{memchr, memchr2, memmem};

/// Smallest unit produced by the [Scanner].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Keyword, bare identifier or number
    Word(&'a [u8]),
    /// Quoted string or identifier, `content` excludes the delimiters
    Quoted {
        /// One of `'`, `"` or `` ` ``
        delimiter: u8,
        /// Raw bytes between the delimiters, doubled delimiters are not collapsed
        content: &'a [u8],
    },
    /// Any other single byte
    Punct(u8),
    /// End of buffer
    Eof,
}

impl Token<'_> {
    /// Returns true for tokens that can name a table or alias.
    pub fn is_identifier(&self) -> bool {
        matches!(
            self,
            Token::Word(_)
                | Token::Quoted {
                    delimiter: b'`' | b'"',
                    ..
                }
        )
    }
}

/// Forward only cursor over a byte buffer.
///
/// The scanner is `Copy`, lookahead is done by scanning a copy and committing it.
#[derive(Debug, Clone, Copy)]
pub struct Scanner<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    /// Create scanner positioned at the start of `buf`
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }
    /// Current position
    pub fn position(&self) -> usize {
        self.pos
    }
    /// Returns true if the cursor reached the end of the buffer
    pub fn is_eof(&self) -> bool {
        self.pos >= self.buf.len()
    }
    /// Byte at the current position
    pub fn peek_byte(&self) -> Option<u8> {
        self.buf.get(self.pos).copied()
    }

    /// Returns true if a comment starts at the current position.
    ///
    /// `--` only starts a comment when followed by whitespace, a control character or
    /// the end of the buffer, otherwise it is read as two minus signs.
    pub fn at_comment(&self) -> bool {
        match self.peek_byte() {
            Some(b'#') => true,
            Some(b'-') => {
                self.buf.get(self.pos + 1) == Some(&b'-')
                    && self.buf.get(self.pos + 2).map_or(true, |b| is_separator(*b))
            }
            Some(b'/') => self.buf.get(self.pos + 1) == Some(&b'*'),
            _ => false,
        }
    }

    /// Returns the delimiter if a quoted region starts at the current position.
    pub fn at_quote(&self) -> Option<u8> {
        self.peek_byte().filter(|b| matches!(b, b'\'' | b'"' | b'`'))
    }

    /// Skips one comment if the cursor is at one. Returns whether a comment was skipped.
    pub fn skip_comment(&mut self) -> bool {
        if !self.at_comment() {
            return false;
        }
        if self.buf[self.pos] == b'/' {
            let body = self.pos + 2;
            self.pos = memmem::find(&self.buf[body..], b"*/")
                .map(|offset| body + offset + 2)
                .unwrap_or(self.buf.len());
        } else {
            let start = self.pos;
            self.pos = memchr(b'\n', &self.buf[start..])
                .map(|offset| start + offset + 1)
                .unwrap_or(self.buf.len());
        }
        true
    }

    /// Skips whitespace, control characters and comments.
    pub fn skip_insignificant(&mut self) {
        loop {
            while self.peek_byte().is_some_and(is_separator) {
                self.pos += 1;
            }
            if !self.skip_comment() {
                break;
            }
        }
    }

    /// Skips a quoted region starting at the current position and returns its content.
    ///
    /// A doubled delimiter is part of the content. Inside `'` and `"` quotes a backslash
    /// escapes the following byte. An unterminated region runs to the end of the buffer.
    pub fn skip_quoted(&mut self) -> &'a [u8] {
        let Some(delimiter) = self.at_quote() else {
            return &[];
        };
        let start = self.pos + 1;
        let mut i = start;
        loop {
            let rest = &self.buf[i.min(self.buf.len())..];
            let found = if delimiter == b'`' {
                memchr(delimiter, rest)
            } else {
                memchr2(delimiter, b'\\', rest)
            };
            let Some(offset) = found else {
                break;
            };
            let at = i + offset;
            if self.buf[at] == b'\\' || self.buf.get(at + 1) == Some(&delimiter) {
                i = at + 2;
            } else {
                self.pos = at + 1;
                return &self.buf[start..at];
            }
        }
        self.pos = self.buf.len();
        &self.buf[start.min(self.buf.len())..]
    }

    /// Reads the next significant token.
    pub fn next_token(&mut self) -> Token<'a> {
        self.skip_insignificant();
        let Some(b) = self.peek_byte() else {
            return Token::Eof;
        };
        if let Some(delimiter) = self.at_quote() {
            let content = self.skip_quoted();
            return Token::Quoted { delimiter, content };
        }
        if is_word_byte(b) {
            let start = self.pos;
            while self.peek_byte().is_some_and(is_word_byte) {
                self.pos += 1;
            }
            return Token::Word(&self.buf[start..self.pos]);
        }
        self.pos += 1;
        Token::Punct(b)
    }

    /// Returns the next significant token without consuming it.
    pub fn peek_token(&self) -> Token<'a> {
        let mut lookahead = *self;
        lookahead.next_token()
    }

    /// Position of the `)` matching the `(` at `open`.
    ///
    /// Parentheses inside comments and quoted regions are ignored. Returns the buffer
    /// length if the parenthesis is never closed.
    pub fn matching_paren(&self, open: usize) -> usize {
        let mut scanner = Scanner {
            buf: self.buf,
            pos: open + 1,
        };
        let mut depth = 1usize;
        loop {
            scanner.skip_insignificant();
            match scanner.peek_byte() {
                None => return self.buf.len(),
                Some(b'(') => depth += 1,
                Some(b')') => {
                    depth -= 1;
                    if depth == 0 {
                        return scanner.pos;
                    }
                }
                Some(b'\'' | b'"' | b'`') => {
                    scanner.skip_quoted();
                    continue;
                }
                Some(_) => {}
            }
            scanner.pos += 1;
        }
    }

    /// Consumes the rest of a parenthesized span whose `(` was just returned by
    /// [`Scanner::next_token`] and returns the bytes between the parentheses.
    pub fn enclosed(&mut self) -> &'a [u8] {
        let open = self.pos.saturating_sub(1);
        let close = self.matching_paren(open);
        let body = &self.buf[self.pos.min(close)..close];
        self.pos = (close + 1).min(self.buf.len());
        body
    }
}

fn is_separator(b: u8) -> bool {
    b <= b' ' || b == 0x7f
}

/// Identifier bytes, non ascii bytes are treated as part of an identifier.
fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$' || b >= 0x80
}
