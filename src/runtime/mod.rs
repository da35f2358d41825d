/*
    This module is what generated parsers are built on
*/

use std::fmt::Display;
use std::ops::{Index, IndexMut};

use crate::engine::{NodeValue, ParseNode};

pub use crate::engine::ParseError;
pub use crate::error_handling::Position;
pub use crate::lexer::{LexError, Token, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Flat storage for the nodes of one parse tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Arena<N> {
    nodes: Vec<N>,
}

impl<N> Arena<N> {
    pub fn new() -> Self {
        Arena { nodes: Vec::new() }
    }

    pub fn alloc(&mut self, node: N) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub fn get(&self, id: NodeId) -> Option<&N> {
        self.nodes.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl<N> Default for Arena<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> Index<NodeId> for Arena<N> {
    type Output = N;

    fn index(&self, id: NodeId) -> &N {
        &self.nodes[id.0]
    }
}

impl<N> IndexMut<NodeId> for Arena<N> {
    fn index_mut(&mut self, id: NodeId) -> &mut N {
        &mut self.nodes[id.0]
    }
}

/// What the expansion function of a generated parser did with a node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expansion {
    // A non-terminal expanded into these new nodes, leftmost first. Empty
    // for an epsilon match.
    Children(Vec<NodeId>),
    // A terminal matched the token
    Consumed,
    Error(String),
}

/// Read access to the nodes of a generated parser.
pub trait TreeNode {
    /// The grammar symbol of the node, as written in a grammar.
    fn label(&self) -> &str;
    fn children(&self) -> Vec<NodeId>;
    fn token(&self) -> Option<&Token>;
    fn position(&self) -> Option<Position>;
    fn is_pending(&self) -> bool;
}

/// A parse tree built by a generated parser.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree<N> {
    pub arena: Arena<N>,
    pub root: NodeId,
}

impl<N: TreeNode> Tree<N> {
    pub fn outline(&self) -> Outline {
        Outline::from_arena(&self.arena, self.root)
    }
}

/// Runs the explicit-stack loop of the table-driven engine with `expand`
/// standing in for the table.
pub fn drive<N, I, F>(arena: &mut Arena<N>, root: NodeId, tokens: I, mut expand: F) -> Result<(), ParseError>
where
    I: IntoIterator<Item = Result<Token, LexError>>,
    F: FnMut(&mut Arena<N>, NodeId, &Token) -> Expansion,
{
    let mut stack = vec![root];
    let mut last_position = Position::default();
    for token in tokens {
        let token = token?;
        last_position = token.span.end;
        loop {
            let Some(current) = stack.pop() else {
                return Err(ParseError::StackExhausted { found: token });
            };
            match expand(arena, current, &token) {
                Expansion::Children(children) => stack.extend(children.into_iter().rev()),
                Expansion::Consumed => break,
                Expansion::Error(message) => {
                    return Err(ParseError::Rejected { message, position: token.span.start });
                }
            }
        }
    }
    if stack.is_empty() {
        Ok(())
    } else {
        Err(ParseError::Rejected { message: "unexpected end of input".to_string(), position: last_position })
    }
}

/// A parser-independent view of a parse tree, used to compare the trees of
/// the engine and of generated parsers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outline {
    pub label: String,
    pub token: Option<String>,
    pub position: Option<Position>,
    pub pending: bool,
    pub children: Vec<Outline>,
}

struct Frame<T> {
    outline: Outline,
    todo: Vec<T>,
}

// Builds bottom-up with an explicit stack so deep trees cannot overflow
fn build_outline<T, F>(root: T, describe: F) -> Outline
where
    F: Fn(&T) -> (Outline, Vec<T>),
{
    let start = |node: T| {
        let (outline, mut children) = describe(&node);
        children.reverse();
        Frame { outline, todo: children }
    };

    let mut stack = vec![start(root)];
    let mut finished = None;
    while let Some(mut frame) = stack.pop() {
        if let Some(child) = frame.todo.pop() {
            stack.push(frame);
            stack.push(start(child));
        } else if let Some(parent) = stack.last_mut() {
            parent.outline.children.push(frame.outline);
        } else {
            finished = Some(frame.outline);
        }
    }
    finished.unwrap_or_default()
}

impl Outline {
    pub fn from_parse_node(root: &ParseNode) -> Self {
        build_outline(root, |node| {
            let outline = Outline {
                label: node.symbol.to_string(),
                token: node.token().map(|token| token.text().to_string()),
                position: node.position,
                pending: node.value == NodeValue::Pending,
                children: Vec::new(),
            };
            (outline, node.children().iter().collect())
        })
    }

    pub fn from_arena<N: TreeNode>(arena: &Arena<N>, root: NodeId) -> Self {
        build_outline(root, |&id| {
            let node = &arena[id];
            let outline = Outline {
                label: node.label().to_string(),
                token: node.token().map(|token| token.text().to_string()),
                position: node.position(),
                pending: node.is_pending(),
                children: Vec::new(),
            };
            (outline, node.children())
        })
    }
}

/// One line per node, children indented under their parent.
impl Display for Outline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut todo = vec![(0, self)];
        while let Some((depth, outline)) = todo.pop() {
            write!(f, "{:indent$}{}", "", outline.label, indent = depth * 2)?;
            if let Some(text) = &outline.token {
                write!(f, " `{}`", text)?;
            }
            if outline.pending {
                write!(f, " ...")?;
            }
            writeln!(f)?;
            todo.extend(outline.children.iter().rev().map(|child| (depth + 1, child)));
        }
        Ok(())
    }
}
