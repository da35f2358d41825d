/*
    This module drives an LL(1) table against a token stream
*/

use itertools::Itertools;
use thiserror::Error;

use crate::error_handling::Position;
use crate::grammar::*;
use crate::lexer::{LexError, Token};

fn render_expected(expected: &[Lookahead]) -> String {
    expected.iter().join(", ")
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lexical(#[from] LexError),
    #[error("unexpected {found} while reading `{nonterminal}`, expected one of: {}", render_expected(.expected))]
    UnexpectedToken { nonterminal: String, found: Token, expected: Vec<Lookahead> },
    #[error("expected {expected}, found {found}")]
    Mismatch { expected: GrammarSymbol, found: Token },
    #[error("[{position}] unexpected end of input, expected one of: {}", render_expected(.expected))]
    UnexpectedEndOfInput { expected: Vec<Lookahead>, position: Position },
    #[error("{found} comes after the end of the parse")]
    StackExhausted { found: Token },
    #[error("[{position}] {message}")]
    Rejected { message: String, position: Position },
}

impl ParseError {
    pub fn position(&self) -> Option<Position> {
        match self {
            ParseError::Lexical(error) => error.position,
            ParseError::UnexpectedToken { found, .. }
            | ParseError::Mismatch { found, .. }
            | ParseError::StackExhausted { found } => Some(found.span.start),
            ParseError::UnexpectedEndOfInput { position, .. }
            | ParseError::Rejected { position, .. } => Some(*position),
        }
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

#[derive(Debug, Clone, PartialEq)]
pub enum NodeValue {
    // Not reached yet
    Pending,
    // A non-terminal and the symbols of the rule it expanded to. An empty
    // list is an epsilon match.
    Expanded(Vec<ParseNode>),
    // A terminal and the token it matched
    Matched(Token),
}

/// One grammar-symbol occurrence of a derivation.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseNode {
    pub symbol: GrammarSymbol,
    pub value: NodeValue,
    pub position: Option<Position>,
}

impl ParseNode {
    pub fn children(&self) -> &[ParseNode] {
        match &self.value {
            NodeValue::Expanded(children) => children,
            _ => &[],
        }
    }

    pub fn token(&self) -> Option<&Token> {
        match &self.value {
            NodeValue::Matched(token) => Some(token),
            _ => None,
        }
    }

    /// The matched tokens, left to right.
    pub fn tokens(&self) -> Vec<&Token> {
        let mut tokens = Vec::new();
        let mut todo = vec![self];
        while let Some(node) = todo.pop() {
            match &node.value {
                NodeValue::Matched(token) => tokens.push(token),
                NodeValue::Expanded(children) => todo.extend(children.iter().rev()),
                NodeValue::Pending => {}
            }
        }
        tokens
    }

    /// Whether no node of the tree is still pending.
    pub fn is_complete(&self) -> bool {
        let mut todo = vec![self];
        while let Some(node) = todo.pop() {
            match &node.value {
                NodeValue::Pending => return false,
                NodeValue::Expanded(children) => todo.extend(children),
                NodeValue::Matched(_) => {}
            }
        }
        true
    }
}

#[derive(Debug)]
enum SlotValue {
    Pending,
    Expanded(Vec<usize>),
    Matched(Token),
}

#[derive(Debug)]
struct Slot {
    symbol: GrammarSymbol,
    value: SlotValue,
    position: Option<Position>,
}

// Handle on a slot that has not been resolved yet. Resolving consumes it, so
// a slot is written at most once.
#[derive(Debug)]
struct PendingSlot(usize);

/// Explicit-stack predictive parser over one table.
///
/// The tree is stored as an arena of slots; children are always allocated
/// after their parent.
pub struct Engine<'t> {
    table: &'t Ll1Table,
    slots: Vec<Slot>,
    stack: Vec<PendingSlot>,
    last_position: Position,
}

impl<'t> Engine<'t> {
    pub fn new(table: &'t Ll1Table) -> Self {
        let mut engine = Engine { table, slots: Vec::new(), stack: Vec::new(), last_position: Position::default() };
        let root = engine.alloc(GrammarSymbol::nonterminal(table.start()));
        engine.stack.push(root);
        engine
    }

    fn alloc(&mut self, symbol: GrammarSymbol) -> PendingSlot {
        self.slots.push(Slot { symbol, value: SlotValue::Pending, position: None });
        PendingSlot(self.slots.len() - 1)
    }

    fn resolve(&mut self, slot: PendingSlot, value: SlotValue, position: Position) {
        let slot = &mut self.slots[slot.0];
        slot.value = value;
        slot.position = Some(position);
    }

    /// Whether the whole input has been accepted.
    pub fn is_done(&self) -> bool {
        self.stack.is_empty()
    }

    fn expectations(&self, symbol: &GrammarSymbol) -> Vec<Lookahead> {
        match symbol {
            GrammarSymbol::NonTerminal(name) => self.table.expected(name),
            other => Lookahead::of(other).into_iter().collect(),
        }
    }

    /// Resolves stack entries against `token` until a terminal consumes it.
    pub fn feed(&mut self, token: Token) -> ParseResult<()> {
        let table = self.table;
        let lookahead = token.lookahead();
        self.last_position = token.span.end;

        loop {
            let Some(slot) = self.stack.pop() else {
                return Err(ParseError::StackExhausted { found: token });
            };
            let symbol = self.slots[slot.0].symbol.clone();
            log::trace!("pop {} on {}", symbol, token);

            match &symbol {
                GrammarSymbol::NonTerminal(name) => {
                    let Some(rule) = table.get(name, &lookahead) else {
                        self.stack.push(slot);
                        return Err(self.unexpected(name, token));
                    };
                    log::trace!("expand {} into {}", name, rule);
                    let children: Vec<PendingSlot> = rule.symbols().iter()
                        .map(|symbol| self.alloc(symbol.clone()))
                        .collect();
                    let indices = children.iter().map(|child| child.0).collect();
                    self.resolve(slot, SlotValue::Expanded(indices), token.span.start);
                    self.stack.extend(children.into_iter().rev());
                }
                GrammarSymbol::Epsilon => {
                    self.resolve(slot, SlotValue::Expanded(Vec::new()), token.span.start);
                }
                leaf => {
                    if Lookahead::of(leaf).as_ref() != Some(&lookahead) {
                        self.stack.push(slot);
                        return Err(self.mismatch(leaf, token));
                    }
                    log::trace!("match {}", token);
                    let position = token.span.start;
                    self.resolve(slot, SlotValue::Matched(token), position);
                    return Ok(());
                }
            }
        }
    }

    fn unexpected(&self, nonterminal: &str, found: Token) -> ParseError {
        let expected = self.table.expected(nonterminal);
        if found.is_end_of_input() {
            ParseError::UnexpectedEndOfInput { expected, position: found.span.start }
        } else {
            ParseError::UnexpectedToken { nonterminal: nonterminal.to_string(), found, expected }
        }
    }

    fn mismatch(&self, expected: &GrammarSymbol, found: Token) -> ParseError {
        if found.is_end_of_input() {
            ParseError::UnexpectedEndOfInput { expected: self.expectations(expected), position: found.span.start }
        } else {
            ParseError::Mismatch { expected: expected.clone(), found }
        }
    }

    /// Checks that nothing is left to match once the tokens run out.
    pub fn finish(&self) -> ParseResult<()> {
        match self.stack.last() {
            None => Ok(()),
            Some(top) => Err(ParseError::UnexpectedEndOfInput {
                expected: self.expectations(&self.slots[top.0].symbol),
                position: self.last_position,
            }),
        }
    }

    /// The tree built so far, with unresolved nodes left pending.
    pub fn tree(&self) -> ParseNode {
        // Children always have larger indices than their parent, so walking
        // backwards builds every child before its parent needs it
        let mut built: Vec<Option<ParseNode>> = Vec::with_capacity(self.slots.len());
        built.resize_with(self.slots.len(), || None);

        for (index, slot) in self.slots.iter().enumerate().rev() {
            let value = match &slot.value {
                SlotValue::Pending => NodeValue::Pending,
                SlotValue::Matched(token) => NodeValue::Matched(token.clone()),
                SlotValue::Expanded(children) => NodeValue::Expanded(
                    children.iter().filter_map(|&child| built[child].take()).collect(),
                ),
            };
            built[index] = Some(ParseNode { symbol: slot.symbol.clone(), value, position: slot.position });
        }

        built.into_iter().next().flatten().unwrap_or(ParseNode {
            symbol: GrammarSymbol::nonterminal(self.table.start()),
            value: NodeValue::Pending,
            position: None,
        })
    }

    pub fn into_tree(self) -> ParseNode {
        self.tree()
    }
}

/// Parses a whole token stream. Lexical errors in the stream are fatal.
pub fn parse<I>(table: &Ll1Table, tokens: I) -> ParseResult<ParseNode>
where
    I: IntoIterator<Item = Result<Token, LexError>>,
{
    let mut engine = Engine::new(table);
    for token in tokens {
        engine.feed(token?)?;
    }
    engine.finish()?;
    log::debug!("accepted input of `{}` ({} nodes)", table.axiom(), engine.slots.len());
    Ok(engine.into_tree())
}
