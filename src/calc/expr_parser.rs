// Parser for the grammar with axiom `E`, generated by lligator.
// Do not edit by hand.
//
// |   |(|)|*|+|#EOF|#Number|
// |---|---|---|---|---|---|---|
// |E|T E1|---|---|---|---|T E1|
// |E1|---|𝓔|---|+ T E1|𝓔|---|
// |F|( E )|---|---|---|---|#Number|
// |Init|E #EOF|---|---|---|---|E #EOF|
// |T|F T1|---|---|---|---|F T1|
// |T1|---|𝓔|* F T1|𝓔|𝓔|---|

use crate::runtime::{drive, Arena, Expansion, LexError, NodeId, ParseError, Position, Token, TokenKind, Tree, TreeNode};

/// A node of the parse tree, one variant per grammar symbol.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    E(ENode),
    E1(E1Node),
    F(FNode),
    Init(InitNode),
    T(TNode),
    T1(T1Node),
    KeywordLeftParen(KeywordLeftParenNode),
    KeywordRightParen(KeywordRightParenNode),
    KeywordAsterisk(KeywordAsteriskNode),
    KeywordPlus(KeywordPlusNode),
    EOF(EOFNode),
    Number(NumberNode),
}

/// Non-terminal `E`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ENode {
    pub value: Option<ERule>,
    pub position: Option<Position>,
}

/// Rules of `E`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ERule {
    TE1(NodeId, NodeId),
}

/// Non-terminal `E1`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct E1Node {
    pub value: Option<E1Rule>,
    pub position: Option<Position>,
}

/// Rules of `E1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum E1Rule {
    PlusTE1(NodeId, NodeId, NodeId),
    Empty,
}

/// Non-terminal `F`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FNode {
    pub value: Option<FRule>,
    pub position: Option<Position>,
}

/// Rules of `F`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FRule {
    LeftParenERightParen(NodeId, NodeId, NodeId),
    Number(NodeId),
}

/// Non-terminal `Init`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InitNode {
    pub value: Option<InitRule>,
    pub position: Option<Position>,
}

/// Rules of `Init`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InitRule {
    EEOF(NodeId, NodeId),
}

/// Non-terminal `T`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TNode {
    pub value: Option<TRule>,
    pub position: Option<Position>,
}

/// Rules of `T`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TRule {
    FT1(NodeId, NodeId),
}

/// Non-terminal `T1`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct T1Node {
    pub value: Option<T1Rule>,
    pub position: Option<Position>,
}

/// Rules of `T1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum T1Rule {
    AsteriskFT1(NodeId, NodeId, NodeId),
    Empty,
}

/// Terminal `"("`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeywordLeftParenNode {
    pub value: Option<Token>,
    pub position: Option<Position>,
}

/// Terminal `")"`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeywordRightParenNode {
    pub value: Option<Token>,
    pub position: Option<Position>,
}

/// Terminal `"*"`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeywordAsteriskNode {
    pub value: Option<Token>,
    pub position: Option<Position>,
}

/// Terminal `"+"`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeywordPlusNode {
    pub value: Option<Token>,
    pub position: Option<Position>,
}

/// Terminal `#EOF`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EOFNode {
    pub value: Option<Token>,
    pub position: Option<Position>,
}

/// Terminal `#Number`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumberNode {
    pub value: Option<Token>,
    pub position: Option<Position>,
}

impl TreeNode for Node {
    fn label(&self) -> &str {
        match self {
            Node::E(_) => "E",
            Node::E1(_) => "E1",
            Node::F(_) => "F",
            Node::Init(_) => "Init",
            Node::T(_) => "T",
            Node::T1(_) => "T1",
            Node::KeywordLeftParen(_) => "\"(\"",
            Node::KeywordRightParen(_) => "\")\"",
            Node::KeywordAsterisk(_) => "\"*\"",
            Node::KeywordPlus(_) => "\"+\"",
            Node::EOF(_) => "#EOF",
            Node::Number(_) => "#Number",
        }
    }

    fn children(&self) -> Vec<NodeId> {
        match self {
            Node::E(node) => match node.value {
                Some(ERule::TE1(c0, c1)) => vec![c0, c1],
                _ => Vec::new(),
            }
            Node::E1(node) => match node.value {
                Some(E1Rule::PlusTE1(c0, c1, c2)) => vec![c0, c1, c2],
                _ => Vec::new(),
            }
            Node::F(node) => match node.value {
                Some(FRule::LeftParenERightParen(c0, c1, c2)) => vec![c0, c1, c2],
                Some(FRule::Number(c0)) => vec![c0],
                _ => Vec::new(),
            }
            Node::Init(node) => match node.value {
                Some(InitRule::EEOF(c0, c1)) => vec![c0, c1],
                _ => Vec::new(),
            }
            Node::T(node) => match node.value {
                Some(TRule::FT1(c0, c1)) => vec![c0, c1],
                _ => Vec::new(),
            }
            Node::T1(node) => match node.value {
                Some(T1Rule::AsteriskFT1(c0, c1, c2)) => vec![c0, c1, c2],
                _ => Vec::new(),
            }
            _ => Vec::new(),
        }
    }

    fn token(&self) -> Option<&Token> {
        match self {
            Node::KeywordLeftParen(node) => node.value.as_ref(),
            Node::KeywordRightParen(node) => node.value.as_ref(),
            Node::KeywordAsterisk(node) => node.value.as_ref(),
            Node::KeywordPlus(node) => node.value.as_ref(),
            Node::EOF(node) => node.value.as_ref(),
            Node::Number(node) => node.value.as_ref(),
            _ => None,
        }
    }

    fn position(&self) -> Option<Position> {
        match self {
            Node::E(node) => node.position,
            Node::E1(node) => node.position,
            Node::F(node) => node.position,
            Node::Init(node) => node.position,
            Node::T(node) => node.position,
            Node::T1(node) => node.position,
            Node::KeywordLeftParen(node) => node.position,
            Node::KeywordRightParen(node) => node.position,
            Node::KeywordAsterisk(node) => node.position,
            Node::KeywordPlus(node) => node.position,
            Node::EOF(node) => node.position,
            Node::Number(node) => node.position,
        }
    }

    fn is_pending(&self) -> bool {
        match self {
            Node::E(node) => node.value.is_none(),
            Node::E1(node) => node.value.is_none(),
            Node::F(node) => node.value.is_none(),
            Node::Init(node) => node.value.is_none(),
            Node::T(node) => node.value.is_none(),
            Node::T1(node) => node.value.is_none(),
            Node::KeywordLeftParen(node) => node.value.is_none(),
            Node::KeywordRightParen(node) => node.value.is_none(),
            Node::KeywordAsterisk(node) => node.value.is_none(),
            Node::KeywordPlus(node) => node.value.is_none(),
            Node::EOF(node) => node.value.is_none(),
            Node::Number(node) => node.value.is_none(),
        }
    }
}

/// Expands the non-terminal or matches the terminal `current` against `token`.
pub fn expand(arena: &mut Arena<Node>, current: NodeId, token: &Token) -> Expansion {
    let position = Some(token.span.start);
    match arena[current] {
        Node::E(_) => match &token.kind {
            TokenKind::Keyword(keyword) if keyword == "(" => {
                let c0 = arena.alloc(Node::T(TNode::default()));
                let c1 = arena.alloc(Node::E1(E1Node::default()));
                arena[current] = Node::E(ENode { value: Some(ERule::TE1(c0, c1)), position });
                Expansion::Children(vec![c0, c1])
            }
            TokenKind::Item { domain, .. } if domain == "Number" => {
                let c0 = arena.alloc(Node::T(TNode::default()));
                let c1 = arena.alloc(Node::E1(E1Node::default()));
                arena[current] = Node::E(ENode { value: Some(ERule::TE1(c0, c1)), position });
                Expansion::Children(vec![c0, c1])
            }
            _ => Expansion::Error(format!("unexpected {} while reading {}, expected one of: {}", token, "`E`", "\"(\", #Number")),
        }
        Node::E1(_) => match &token.kind {
            TokenKind::Keyword(keyword) if keyword == ")" => {
                arena[current] = Node::E1(E1Node { value: Some(E1Rule::Empty), position });
                Expansion::Children(Vec::new())
            }
            TokenKind::Keyword(keyword) if keyword == "+" => {
                let c0 = arena.alloc(Node::KeywordPlus(KeywordPlusNode::default()));
                let c1 = arena.alloc(Node::T(TNode::default()));
                let c2 = arena.alloc(Node::E1(E1Node::default()));
                arena[current] = Node::E1(E1Node { value: Some(E1Rule::PlusTE1(c0, c1, c2)), position });
                Expansion::Children(vec![c0, c1, c2])
            }
            TokenKind::EndOfInput => {
                arena[current] = Node::E1(E1Node { value: Some(E1Rule::Empty), position });
                Expansion::Children(Vec::new())
            }
            _ => Expansion::Error(format!("unexpected {} while reading {}, expected one of: {}", token, "`E1`", "\")\", \"+\", #EOF")),
        }
        Node::F(_) => match &token.kind {
            TokenKind::Keyword(keyword) if keyword == "(" => {
                let c0 = arena.alloc(Node::KeywordLeftParen(KeywordLeftParenNode::default()));
                let c1 = arena.alloc(Node::E(ENode::default()));
                let c2 = arena.alloc(Node::KeywordRightParen(KeywordRightParenNode::default()));
                arena[current] = Node::F(FNode { value: Some(FRule::LeftParenERightParen(c0, c1, c2)), position });
                Expansion::Children(vec![c0, c1, c2])
            }
            TokenKind::Item { domain, .. } if domain == "Number" => {
                let c0 = arena.alloc(Node::Number(NumberNode::default()));
                arena[current] = Node::F(FNode { value: Some(FRule::Number(c0)), position });
                Expansion::Children(vec![c0])
            }
            _ => Expansion::Error(format!("unexpected {} while reading {}, expected one of: {}", token, "`F`", "\"(\", #Number")),
        }
        Node::Init(_) => match &token.kind {
            TokenKind::Keyword(keyword) if keyword == "(" => {
                let c0 = arena.alloc(Node::E(ENode::default()));
                let c1 = arena.alloc(Node::EOF(EOFNode::default()));
                arena[current] = Node::Init(InitNode { value: Some(InitRule::EEOF(c0, c1)), position });
                Expansion::Children(vec![c0, c1])
            }
            TokenKind::Item { domain, .. } if domain == "Number" => {
                let c0 = arena.alloc(Node::E(ENode::default()));
                let c1 = arena.alloc(Node::EOF(EOFNode::default()));
                arena[current] = Node::Init(InitNode { value: Some(InitRule::EEOF(c0, c1)), position });
                Expansion::Children(vec![c0, c1])
            }
            _ => Expansion::Error(format!("unexpected {} while reading {}, expected one of: {}", token, "`Init`", "\"(\", #Number")),
        }
        Node::T(_) => match &token.kind {
            TokenKind::Keyword(keyword) if keyword == "(" => {
                let c0 = arena.alloc(Node::F(FNode::default()));
                let c1 = arena.alloc(Node::T1(T1Node::default()));
                arena[current] = Node::T(TNode { value: Some(TRule::FT1(c0, c1)), position });
                Expansion::Children(vec![c0, c1])
            }
            TokenKind::Item { domain, .. } if domain == "Number" => {
                let c0 = arena.alloc(Node::F(FNode::default()));
                let c1 = arena.alloc(Node::T1(T1Node::default()));
                arena[current] = Node::T(TNode { value: Some(TRule::FT1(c0, c1)), position });
                Expansion::Children(vec![c0, c1])
            }
            _ => Expansion::Error(format!("unexpected {} while reading {}, expected one of: {}", token, "`T`", "\"(\", #Number")),
        }
        Node::T1(_) => match &token.kind {
            TokenKind::Keyword(keyword) if keyword == ")" => {
                arena[current] = Node::T1(T1Node { value: Some(T1Rule::Empty), position });
                Expansion::Children(Vec::new())
            }
            TokenKind::Keyword(keyword) if keyword == "*" => {
                let c0 = arena.alloc(Node::KeywordAsterisk(KeywordAsteriskNode::default()));
                let c1 = arena.alloc(Node::F(FNode::default()));
                let c2 = arena.alloc(Node::T1(T1Node::default()));
                arena[current] = Node::T1(T1Node { value: Some(T1Rule::AsteriskFT1(c0, c1, c2)), position });
                Expansion::Children(vec![c0, c1, c2])
            }
            TokenKind::Keyword(keyword) if keyword == "+" => {
                arena[current] = Node::T1(T1Node { value: Some(T1Rule::Empty), position });
                Expansion::Children(Vec::new())
            }
            TokenKind::EndOfInput => {
                arena[current] = Node::T1(T1Node { value: Some(T1Rule::Empty), position });
                Expansion::Children(Vec::new())
            }
            _ => Expansion::Error(format!("unexpected {} while reading {}, expected one of: {}", token, "`T1`", "\")\", \"*\", \"+\", #EOF")),
        }
        Node::KeywordLeftParen(_) => match &token.kind {
            TokenKind::Keyword(keyword) if keyword == "(" => {
                arena[current] = Node::KeywordLeftParen(KeywordLeftParenNode { value: Some(token.clone()), position });
                Expansion::Consumed
            }
            _ => Expansion::Error(format!("expected {}, found {}", "\"(\"", token)),
        }
        Node::KeywordRightParen(_) => match &token.kind {
            TokenKind::Keyword(keyword) if keyword == ")" => {
                arena[current] = Node::KeywordRightParen(KeywordRightParenNode { value: Some(token.clone()), position });
                Expansion::Consumed
            }
            _ => Expansion::Error(format!("expected {}, found {}", "\")\"", token)),
        }
        Node::KeywordAsterisk(_) => match &token.kind {
            TokenKind::Keyword(keyword) if keyword == "*" => {
                arena[current] = Node::KeywordAsterisk(KeywordAsteriskNode { value: Some(token.clone()), position });
                Expansion::Consumed
            }
            _ => Expansion::Error(format!("expected {}, found {}", "\"*\"", token)),
        }
        Node::KeywordPlus(_) => match &token.kind {
            TokenKind::Keyword(keyword) if keyword == "+" => {
                arena[current] = Node::KeywordPlus(KeywordPlusNode { value: Some(token.clone()), position });
                Expansion::Consumed
            }
            _ => Expansion::Error(format!("expected {}, found {}", "\"+\"", token)),
        }
        Node::EOF(_) => match &token.kind {
            TokenKind::EndOfInput => {
                arena[current] = Node::EOF(EOFNode { value: Some(token.clone()), position });
                Expansion::Consumed
            }
            _ => Expansion::Error(format!("expected {}, found {}", "#EOF", token)),
        }
        Node::Number(_) => match &token.kind {
            TokenKind::Item { domain, .. } if domain == "Number" => {
                arena[current] = Node::Number(NumberNode { value: Some(token.clone()), position });
                Expansion::Consumed
            }
            _ => Expansion::Error(format!("expected {}, found {}", "#Number", token)),
        }
    }
}

/// Parses a whole token stream.
pub fn parse<I>(tokens: I) -> Result<Tree<Node>, ParseError>
where
    I: IntoIterator<Item = Result<Token, LexError>>,
{
    let mut arena = Arena::new();
    let root = arena.alloc(Node::Init(InitNode::default()));
    drive(&mut arena, root, tokens, expand)?;
    Ok(Tree { arena, root })
}
