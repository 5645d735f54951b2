//! Tokenizer for ChordPro source

use std::borrow::Cow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Directive,
    BodyLine,
    Comment,
    Blank,
    End,
}

/// A token borrows its text from the (normalized) input. For directives the
/// text is what lies between the braces; for comments it includes the
/// leading '#'. Line and column are 1-origin character positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'i> {
    pub kind: TokenKind,
    pub text: &'i str,
    pub line: usize,
    pub column: usize,
}

/// Convert CRLF and bare CR line endings to LF. Input that is already
/// normalized is returned borrowed.
pub fn normalize(content: &str) -> Cow<'_, str> {
    if content.contains('\r') {
        Cow::Owned(
            content
                .replace("\r\n", "\n")
                .replace('\r', "\n"),
        )
    } else {
        Cow::Borrowed(content)
    }
}

/// Scan normalized input into a sequence of tokens, always terminated by
/// an End token.
pub fn tokenize(content: &str) -> Vec<Token<'_>> {
    let mut lexer = Lexer::new(content);
    lexer.run();
    lexer.tokens
}

#[derive(Debug)]
pub(crate) struct Lexer<'i> {
    source: &'i str,
    offset: usize,
    line: usize,
    column: usize,
    tokens: Vec<Token<'i>>,
}

impl<'i> Lexer<'i> {
    pub(crate) fn new(source: &'i str) -> Lexer<'i> {
        Lexer {
            source,
            offset: 0,
            line: 1,
            column: 1,
            tokens: Vec::new(),
        }
    }

    fn run(&mut self) {
        while !self.is_finished() {
            self.scan_token();
        }

        self.tokens
            .push(Token {
                kind: TokenKind::End,
                text: "",
                line: self.line,
                column: self.column,
            });
    }

    fn is_finished(&self) -> bool {
        self.offset
            >= self
                .source
                .len()
    }

    fn entire(&self) -> &'i str {
        &self.source[self.offset..]
    }

    fn peek(&self) -> Option<char> {
        self.entire()
            .chars()
            .next()
    }

    /// Move forward to the given byte offset, keeping the line and column
    /// counters in step with any characters passed over.
    fn advance_to(&mut self, end: usize) {
        for c in self.source[self.offset..end].chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.offset = end;
    }

    /// Byte offset of the next newline, or of the end of input.
    fn end_of_line(&self) -> usize {
        self.offset
            + self
                .entire()
                .find('\n')
                .unwrap_or(
                    self.entire()
                        .len(),
                )
    }

    fn push(&mut self, kind: TokenKind, text: &'i str, line: usize, column: usize) {
        self.tokens
            .push(Token {
                kind,
                text,
                line,
                column,
            });
    }

    fn scan_token(&mut self) {
        let source = self.source;
        let line = self.line;
        let column = self.column;
        let start = self.offset;

        match self.peek() {
            None => {}
            Some(' ') | Some('\t') => {
                let width = self
                    .entire()
                    .find(|c: char| c != ' ' && c != '\t')
                    .unwrap_or(
                        self.entire()
                            .len(),
                    );
                self.advance_to(start + width);
            }
            Some('\n') => {
                self.advance_to(start + 1);
                self.push(TokenKind::Blank, &source[start..start + 1], line, column);
            }
            Some('{') => {
                let inner = start + 1;
                match source[inner..].find('}') {
                    Some(width) => {
                        let text = &source[inner..inner + width];
                        self.advance_to(inner + width + 1);
                        self.push(TokenKind::Directive, text, line, column);
                    }
                    None => {
                        // unterminated; discard the rest of this line only
                        let end = self.end_of_line();
                        self.advance_to(end);
                    }
                }
            }
            Some('#') => {
                let end = self.end_of_line();
                let text = &source[start..end];
                self.advance_to(end);
                self.push(TokenKind::Comment, text, line, column);
            }
            Some(_) => {
                let end = self.end_of_line();
                let text = &source[start..end];
                self.advance_to(end);
                if !text
                    .trim()
                    .is_empty()
                {
                    self.push(TokenKind::BodyLine, text, line, column);
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "checks/lexer.rs"]
mod check;
