/*
    This module turns text into a stream of tokens
*/

mod cursor;

use std::collections::BTreeSet;
use std::fmt::Display;

use itertools::{Itertools, PeekingNext};

use crate::error_handling::*;
use crate::grammar::{Ll1Table, Lookahead, EOF_DOMAIN};

pub use cursor::Cursor;

pub const IDENT_DOMAIN: &str = "Ident";
pub const QUOTED_DOMAIN: &str = "QuotedStr";
pub const NUMBER_DOMAIN: &str = "Number";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // A fixed keyword or punctuation spelling
    Keyword(String),
    // Any member of a lexical domain, e.g. an identifier
    Item { domain: String, text: String },
    EndOfInput,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Keyword(spelling) => write!(f, "`{}`", spelling),
            TokenKind::Item { domain, text } => write!(f, "{}({})", domain, text),
            TokenKind::EndOfInput => write!(f, "end of input"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn keyword(spelling: &str, span: Span) -> Self {
        Token { kind: TokenKind::Keyword(spelling.to_string()), span }
    }

    pub fn item(domain: &str, text: &str, span: Span) -> Self {
        Token {
            kind: TokenKind::Item { domain: domain.to_string(), text: text.to_string() },
            span,
        }
    }

    pub fn end_of_input(position: Position) -> Self {
        Token { kind: TokenKind::EndOfInput, span: Span::at(position) }
    }

    pub fn is_end_of_input(&self) -> bool {
        self.kind == TokenKind::EndOfInput
    }

    /// The table column this token selects.
    pub fn lookahead(&self) -> Lookahead {
        match &self.kind {
            TokenKind::Keyword(spelling) => Lookahead::Literal(spelling.clone()),
            TokenKind::Item { domain, .. } => Lookahead::Domain(domain.clone()),
            TokenKind::EndOfInput => Lookahead::end_of_input(),
        }
    }

    /// The source text of the token, empty at end of input.
    pub fn text(&self) -> &str {
        match &self.kind {
            TokenKind::Keyword(spelling) => spelling,
            TokenKind::Item { text, .. } => text,
            TokenKind::EndOfInput => "",
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.kind, self.span.start)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LexErrorType {
    // A character that cannot start any token
    UnexpectedCharacter(char),
    // A word that is neither a keyword nor allowed as an identifier
    UnexpectedWord(String),
    // A backslash followed by something other than `"` or `\`
    UnknownEscape(char),
    // A quoted string not closed before the end of the line
    UnterminatedString,
}

impl ErrorType for LexErrorType {}

impl Display for LexErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LexErrorType::UnexpectedCharacter(c) => write!(f, "unexpected symbol: {:?}", c),
            LexErrorType::UnexpectedWord(word) => write!(f, "unexpected word: `{}`", word),
            LexErrorType::UnknownEscape(c) => write!(f, "unknown special symbol: \\{}", c),
            LexErrorType::UnterminatedString => write!(f, "expected a closing quote (\")"),
        }
    }
}

pub type LexError = Error<LexErrorType>;
pub type LexResult<T> = std::result::Result<T, LexError>;

/// Which spellings and token domains a [`Lexer`] recognizes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LexerConfig {
    pub keywords: BTreeSet<String>,
    pub domains: BTreeSet<String>,
}

impl LexerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keyword(mut self, spelling: &str) -> Self {
        self.keywords.insert(spelling.to_string());
        self
    }

    pub fn domain(mut self, domain: &str) -> Self {
        self.domains.insert(domain.to_string());
        self
    }

    /// A configuration recognizing every terminal of a synthesized table.
    pub fn from_table(table: &Ll1Table) -> Self {
        let mut config = LexerConfig::new();
        for column in table.columns() {
            match column {
                Lookahead::Literal(spelling) => {
                    config.keywords.insert(spelling.clone());
                }
                Lookahead::Domain(domain) if domain == EOF_DOMAIN => {}
                Lookahead::Domain(domain) => {
                    if ![IDENT_DOMAIN, QUOTED_DOMAIN, NUMBER_DOMAIN].contains(&domain.as_str()) {
                        log::warn!("no built-in scanner for token domain `{}`", domain);
                    }
                    config.domains.insert(domain.clone());
                }
            }
        }
        config
    }

    fn accepts(&self, domain: &str) -> bool {
        self.domains.contains(domain)
    }
}

fn is_word_start(c: char) -> bool {
    c.is_alphabetic()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '\''
}

fn is_word(text: &str) -> bool {
    let mut chars = text.chars();
    chars.next().is_some_and(is_word_start) && chars.all(is_word_char)
}

/// Lazy scanner over a text. Yields a final `EndOfInput` token, then stops.
///
/// After an unexpected character, the following unexpected characters are
/// skipped silently until a token is recognized again.
pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    config: LexerConfig,
    errored: bool,
    finished: bool,
    pending: Option<Token>,
}

impl<'a> Lexer<'a> {
    pub fn new(text: &'a str, config: LexerConfig) -> Self {
        Lexer { cursor: Cursor::new(text), config, errored: false, finished: false, pending: None }
    }

    fn skip_spaces(&mut self) {
        while self.cursor.peeking_next(|c| c.is_whitespace()).is_some() {}
    }

    // Longest keyword that is not a plain word and prefixes the rest of the text
    fn symbol_keyword(&self) -> Option<String> {
        let rest = self.cursor.rest();
        self.config.keywords.iter()
            .filter(|k| !k.is_empty() && !is_word(k) && rest.starts_with(k.as_str()))
            .max_by_key(|k| k.len())
            .cloned()
    }

    fn lex_word(&mut self, start: Position) -> LexResult<Token> {
        let word: String = self.cursor.peeking_take_while(|&c| is_word_char(c)).collect();
        let span = Span::new(start, self.cursor.position());
        if self.config.keywords.contains(&word) {
            Ok(Token::keyword(&word, span))
        } else if self.config.accepts(IDENT_DOMAIN) {
            Ok(Token::item(IDENT_DOMAIN, &word, span))
        } else {
            Err(LexError::new(LexErrorType::UnexpectedWord(word), Some(start)))
        }
    }

    fn lex_number(&mut self, start: Position) -> Token {
        let digits: String = self.cursor.peeking_take_while(|c| c.is_ascii_digit()).collect();
        Token::item(NUMBER_DOMAIN, &digits, Span::new(start, self.cursor.position()))
    }

    fn lex_quoted(&mut self, start: Position) -> LexResult<Token> {
        self.cursor.next(); // Consume open quote
        let mut value = String::new();
        let mut escape_error = None;
        loop {
            match self.cursor.peek() {
                None | Some('\n') => {
                    return Err(LexError::new(LexErrorType::UnterminatedString, Some(self.cursor.position())));
                }
                Some('"') => break,
                Some('\\') => {
                    self.cursor.next();
                    let escape_position = self.cursor.position();
                    match self.cursor.peek() {
                        Some(c @ ('"' | '\\')) => {
                            value.push(c);
                            self.cursor.next();
                        }
                        Some(c) if c != '\n' => {
                            value.push('\\');
                            value.push(c);
                            self.cursor.next();
                            escape_error.get_or_insert(LexError::new(LexErrorType::UnknownEscape(c), Some(escape_position)));
                        }
                        _ => {}
                    }
                }
                Some(c) => {
                    value.push(c);
                    self.cursor.next();
                }
            }
        }
        self.cursor.next(); // Consume close quote
        let token = Token::item(QUOTED_DOMAIN, &value, Span::new(start, self.cursor.position()));
        match escape_error {
            // The string is still delivered, right after the error
            Some(error) => {
                self.pending = Some(token);
                Err(error)
            }
            None => Ok(token),
        }
    }

    fn lex_symbol(&mut self, start: Position, keyword: String) -> Token {
        self.cursor.consume(keyword.chars().count());
        Token::keyword(&keyword, Span::new(start, self.cursor.position()))
    }
}

impl Iterator for Lexer<'_> {
    type Item = LexResult<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(token) = self.pending.take() {
            return Some(Ok(token));
        }
        loop {
            self.skip_spaces();
            let start = self.cursor.position();
            let Some(c) = self.cursor.peek() else {
                if self.finished {
                    return None;
                }
                self.finished = true;
                return Some(Ok(Token::end_of_input(start)));
            };

            let keyword = self.symbol_keyword();
            let keyword_len = keyword.as_ref().map_or(0, |k| k.chars().count());
            let result = if is_word_start(c) {
                let word_len = self.cursor.rest().chars().take_while(|&c| is_word_char(c)).count();
                match keyword {
                    Some(keyword) if keyword_len > word_len => Ok(self.lex_symbol(start, keyword)),
                    _ => self.lex_word(start),
                }
            } else if c == '"' && self.config.accepts(QUOTED_DOMAIN) {
                self.lex_quoted(start)
            } else if c.is_ascii_digit() && self.config.accepts(NUMBER_DOMAIN) {
                let digits_len = self.cursor.rest().chars().take_while(|c| c.is_ascii_digit()).count();
                match keyword {
                    Some(keyword) if keyword_len > digits_len => Ok(self.lex_symbol(start, keyword)),
                    _ => Ok(self.lex_number(start)),
                }
            } else if let Some(keyword) = keyword {
                Ok(self.lex_symbol(start, keyword))
            } else {
                self.cursor.next();
                if self.errored {
                    continue;
                }
                self.errored = true;
                return Some(Err(LexError::new(LexErrorType::UnexpectedCharacter(c), Some(start))));
            };

            self.errored = false;
            return Some(result);
        }
    }
}

/// Scans the whole text, splitting tokens from lexical errors.
pub fn lex_all(text: &str, config: LexerConfig) -> (Vec<Token>, Vec<LexError>) {
    Lexer::new(text, config).partition_result()
}
