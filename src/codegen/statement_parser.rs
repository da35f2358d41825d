// Parser for the grammar with axiom `Program`, generated by lligator.
// Do not edit by hand.
//
// |   |(|)|;|<=|while|{|}|#EOF|#Ident|#Number|#QuotedStr|
// |---|---|---|---|---|---|---|---|---|---|---|---|
// |Block|---|---|---|---|---|{ Program }|---|---|---|---|---|
// |Condition|( Operand <= Operand )|---|---|---|---|---|---|---|---|---|---|
// |Init|---|---|Program #EOF|---|Program #EOF|---|---|Program #EOF|---|---|Program #EOF|
// |Node|---|---|Token Tail|---|---|---|---|---|---|---|Token Tail|
// |Operand|---|---|---|---|---|---|---|---|#Ident|#Number|---|
// |Program|---|---|Statement Program|---|Statement Program|---|𝓔|𝓔|---|---|Statement Program|
// |Statement|---|---|Node ;|---|while Condition Block|---|---|---|---|---|Node ;|
// |Tail|---|---|𝓔|---|---|---|---|---|---|---|---|
// |Token|---|---|𝓔|---|---|---|---|---|---|---|#QuotedStr|

use crate::runtime::{drive, Arena, Expansion, LexError, NodeId, ParseError, Position, Token, TokenKind, Tree, TreeNode};

/// A node of the parse tree, one variant per grammar symbol.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Block(BlockNode),
    Condition(ConditionNode),
    Init(InitNode),
    Node1(Node1Node),
    Operand(OperandNode),
    Program(ProgramNode),
    Statement(StatementNode),
    Tail(TailNode),
    Token1(Token1Node),
    KeywordLeftParen(KeywordLeftParenNode),
    KeywordRightParen(KeywordRightParenNode),
    KeywordSemicolon(KeywordSemicolonNode),
    KeywordLessThanEquals(KeywordLessThanEqualsNode),
    KeywordWhile(KeywordWhileNode),
    KeywordLeftBrace(KeywordLeftBraceNode),
    KeywordRightBrace(KeywordRightBraceNode),
    EOF(EOFNode),
    Ident(IdentNode),
    Number(NumberNode),
    QuotedStr(QuotedStrNode),
}

/// Non-terminal `Block`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockNode {
    pub value: Option<BlockRule>,
    pub position: Option<Position>,
}

/// Rules of `Block`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BlockRule {
    LeftBraceProgramRightBrace(NodeId, NodeId, NodeId),
}

/// Non-terminal `Condition`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConditionNode {
    pub value: Option<ConditionRule>,
    pub position: Option<Position>,
}

/// Rules of `Condition`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConditionRule {
    LeftParenOperandLessThanEqualsOperandRightParen(NodeId, NodeId, NodeId, NodeId, NodeId),
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
    ProgramEOF(NodeId, NodeId),
}

/// Non-terminal `Node`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Node1Node {
    pub value: Option<Node1Rule>,
    pub position: Option<Position>,
}

/// Rules of `Node`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Node1Rule {
    Token1Tail(NodeId, NodeId),
}

/// Non-terminal `Operand`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperandNode {
    pub value: Option<OperandRule>,
    pub position: Option<Position>,
}

/// Rules of `Operand`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OperandRule {
    Ident(NodeId),
    Number(NodeId),
}

/// Non-terminal `Program`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgramNode {
    pub value: Option<ProgramRule>,
    pub position: Option<Position>,
}

/// Rules of `Program`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProgramRule {
    StatementProgram(NodeId, NodeId),
    Empty,
}

/// Non-terminal `Statement`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatementNode {
    pub value: Option<StatementRule>,
    pub position: Option<Position>,
}

/// Rules of `Statement`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatementRule {
    WhileConditionBlock(NodeId, NodeId, NodeId),
    Node1Semicolon(NodeId, NodeId),
}

/// Non-terminal `Tail`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TailNode {
    pub value: Option<TailRule>,
    pub position: Option<Position>,
}

/// Rules of `Tail`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TailRule {
    Empty,
}

/// Non-terminal `Token`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Token1Node {
    pub value: Option<Token1Rule>,
    pub position: Option<Position>,
}

/// Rules of `Token`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token1Rule {
    QuotedStr(NodeId),
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

/// Terminal `";"`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeywordSemicolonNode {
    pub value: Option<Token>,
    pub position: Option<Position>,
}

/// Terminal `"<="`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeywordLessThanEqualsNode {
    pub value: Option<Token>,
    pub position: Option<Position>,
}

/// Terminal `"while"`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeywordWhileNode {
    pub value: Option<Token>,
    pub position: Option<Position>,
}

/// Terminal `"{"`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeywordLeftBraceNode {
    pub value: Option<Token>,
    pub position: Option<Position>,
}

/// Terminal `"}"`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeywordRightBraceNode {
    pub value: Option<Token>,
    pub position: Option<Position>,
}

/// Terminal `#EOF`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EOFNode {
    pub value: Option<Token>,
    pub position: Option<Position>,
}

/// Terminal `#Ident`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdentNode {
    pub value: Option<Token>,
    pub position: Option<Position>,
}

/// Terminal `#Number`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumberNode {
    pub value: Option<Token>,
    pub position: Option<Position>,
}

/// Terminal `#QuotedStr`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuotedStrNode {
    pub value: Option<Token>,
    pub position: Option<Position>,
}

impl TreeNode for Node {
    fn label(&self) -> &str {
        match self {
            Node::Block(_) => "Block",
            Node::Condition(_) => "Condition",
            Node::Init(_) => "Init",
            Node::Node1(_) => "Node",
            Node::Operand(_) => "Operand",
            Node::Program(_) => "Program",
            Node::Statement(_) => "Statement",
            Node::Tail(_) => "Tail",
            Node::Token1(_) => "Token",
            Node::KeywordLeftParen(_) => "\"(\"",
            Node::KeywordRightParen(_) => "\")\"",
            Node::KeywordSemicolon(_) => "\";\"",
            Node::KeywordLessThanEquals(_) => "\"<=\"",
            Node::KeywordWhile(_) => "\"while\"",
            Node::KeywordLeftBrace(_) => "\"{\"",
            Node::KeywordRightBrace(_) => "\"}\"",
            Node::EOF(_) => "#EOF",
            Node::Ident(_) => "#Ident",
            Node::Number(_) => "#Number",
            Node::QuotedStr(_) => "#QuotedStr",
        }
    }

    fn children(&self) -> Vec<NodeId> {
        match self {
            Node::Block(node) => match node.value {
                Some(BlockRule::LeftBraceProgramRightBrace(c0, c1, c2)) => vec![c0, c1, c2],
                _ => Vec::new(),
            }
            Node::Condition(node) => match node.value {
                Some(ConditionRule::LeftParenOperandLessThanEqualsOperandRightParen(c0, c1, c2, c3, c4)) => vec![c0, c1, c2, c3, c4],
                _ => Vec::new(),
            }
            Node::Init(node) => match node.value {
                Some(InitRule::ProgramEOF(c0, c1)) => vec![c0, c1],
                _ => Vec::new(),
            }
            Node::Node1(node) => match node.value {
                Some(Node1Rule::Token1Tail(c0, c1)) => vec![c0, c1],
                _ => Vec::new(),
            }
            Node::Operand(node) => match node.value {
                Some(OperandRule::Ident(c0)) => vec![c0],
                Some(OperandRule::Number(c0)) => vec![c0],
                _ => Vec::new(),
            }
            Node::Program(node) => match node.value {
                Some(ProgramRule::StatementProgram(c0, c1)) => vec![c0, c1],
                _ => Vec::new(),
            }
            Node::Statement(node) => match node.value {
                Some(StatementRule::WhileConditionBlock(c0, c1, c2)) => vec![c0, c1, c2],
                Some(StatementRule::Node1Semicolon(c0, c1)) => vec![c0, c1],
                _ => Vec::new(),
            }
            Node::Token1(node) => match node.value {
                Some(Token1Rule::QuotedStr(c0)) => vec![c0],
                _ => Vec::new(),
            }
            _ => Vec::new(),
        }
    }

    fn token(&self) -> Option<&Token> {
        match self {
            Node::KeywordLeftParen(node) => node.value.as_ref(),
            Node::KeywordRightParen(node) => node.value.as_ref(),
            Node::KeywordSemicolon(node) => node.value.as_ref(),
            Node::KeywordLessThanEquals(node) => node.value.as_ref(),
            Node::KeywordWhile(node) => node.value.as_ref(),
            Node::KeywordLeftBrace(node) => node.value.as_ref(),
            Node::KeywordRightBrace(node) => node.value.as_ref(),
            Node::EOF(node) => node.value.as_ref(),
            Node::Ident(node) => node.value.as_ref(),
            Node::Number(node) => node.value.as_ref(),
            Node::QuotedStr(node) => node.value.as_ref(),
            _ => None,
        }
    }

    fn position(&self) -> Option<Position> {
        match self {
            Node::Block(node) => node.position,
            Node::Condition(node) => node.position,
            Node::Init(node) => node.position,
            Node::Node1(node) => node.position,
            Node::Operand(node) => node.position,
            Node::Program(node) => node.position,
            Node::Statement(node) => node.position,
            Node::Tail(node) => node.position,
            Node::Token1(node) => node.position,
            Node::KeywordLeftParen(node) => node.position,
            Node::KeywordRightParen(node) => node.position,
            Node::KeywordSemicolon(node) => node.position,
            Node::KeywordLessThanEquals(node) => node.position,
            Node::KeywordWhile(node) => node.position,
            Node::KeywordLeftBrace(node) => node.position,
            Node::KeywordRightBrace(node) => node.position,
            Node::EOF(node) => node.position,
            Node::Ident(node) => node.position,
            Node::Number(node) => node.position,
            Node::QuotedStr(node) => node.position,
        }
    }

    fn is_pending(&self) -> bool {
        match self {
            Node::Block(node) => node.value.is_none(),
            Node::Condition(node) => node.value.is_none(),
            Node::Init(node) => node.value.is_none(),
            Node::Node1(node) => node.value.is_none(),
            Node::Operand(node) => node.value.is_none(),
            Node::Program(node) => node.value.is_none(),
            Node::Statement(node) => node.value.is_none(),
            Node::Tail(node) => node.value.is_none(),
            Node::Token1(node) => node.value.is_none(),
            Node::KeywordLeftParen(node) => node.value.is_none(),
            Node::KeywordRightParen(node) => node.value.is_none(),
            Node::KeywordSemicolon(node) => node.value.is_none(),
            Node::KeywordLessThanEquals(node) => node.value.is_none(),
            Node::KeywordWhile(node) => node.value.is_none(),
            Node::KeywordLeftBrace(node) => node.value.is_none(),
            Node::KeywordRightBrace(node) => node.value.is_none(),
            Node::EOF(node) => node.value.is_none(),
            Node::Ident(node) => node.value.is_none(),
            Node::Number(node) => node.value.is_none(),
            Node::QuotedStr(node) => node.value.is_none(),
        }
    }
}

/// Expands the non-terminal or matches the terminal `current` against `token`.
pub fn expand(arena: &mut Arena<Node>, current: NodeId, token: &Token) -> Expansion {
    let position = Some(token.span.start);
    match arena[current] {
        Node::Block(_) => match &token.kind {
            TokenKind::Keyword(keyword) if keyword == "{" => {
                let c0 = arena.alloc(Node::KeywordLeftBrace(KeywordLeftBraceNode::default()));
                let c1 = arena.alloc(Node::Program(ProgramNode::default()));
                let c2 = arena.alloc(Node::KeywordRightBrace(KeywordRightBraceNode::default()));
                arena[current] = Node::Block(BlockNode { value: Some(BlockRule::LeftBraceProgramRightBrace(c0, c1, c2)), position });
                Expansion::Children(vec![c0, c1, c2])
            }
            _ => Expansion::Error(format!("unexpected {} while reading {}, expected one of: {}", token, "`Block`", "\"{\"")),
        }
        Node::Condition(_) => match &token.kind {
            TokenKind::Keyword(keyword) if keyword == "(" => {
                let c0 = arena.alloc(Node::KeywordLeftParen(KeywordLeftParenNode::default()));
                let c1 = arena.alloc(Node::Operand(OperandNode::default()));
                let c2 = arena.alloc(Node::KeywordLessThanEquals(KeywordLessThanEqualsNode::default()));
                let c3 = arena.alloc(Node::Operand(OperandNode::default()));
                let c4 = arena.alloc(Node::KeywordRightParen(KeywordRightParenNode::default()));
                arena[current] = Node::Condition(ConditionNode { value: Some(ConditionRule::LeftParenOperandLessThanEqualsOperandRightParen(c0, c1, c2, c3, c4)), position });
                Expansion::Children(vec![c0, c1, c2, c3, c4])
            }
            _ => Expansion::Error(format!("unexpected {} while reading {}, expected one of: {}", token, "`Condition`", "\"(\"")),
        }
        Node::Init(_) => match &token.kind {
            TokenKind::Keyword(keyword) if keyword == ";" => {
                let c0 = arena.alloc(Node::Program(ProgramNode::default()));
                let c1 = arena.alloc(Node::EOF(EOFNode::default()));
                arena[current] = Node::Init(InitNode { value: Some(InitRule::ProgramEOF(c0, c1)), position });
                Expansion::Children(vec![c0, c1])
            }
            TokenKind::Keyword(keyword) if keyword == "while" => {
                let c0 = arena.alloc(Node::Program(ProgramNode::default()));
                let c1 = arena.alloc(Node::EOF(EOFNode::default()));
                arena[current] = Node::Init(InitNode { value: Some(InitRule::ProgramEOF(c0, c1)), position });
                Expansion::Children(vec![c0, c1])
            }
            TokenKind::EndOfInput => {
                let c0 = arena.alloc(Node::Program(ProgramNode::default()));
                let c1 = arena.alloc(Node::EOF(EOFNode::default()));
                arena[current] = Node::Init(InitNode { value: Some(InitRule::ProgramEOF(c0, c1)), position });
                Expansion::Children(vec![c0, c1])
            }
            TokenKind::Item { domain, .. } if domain == "QuotedStr" => {
                let c0 = arena.alloc(Node::Program(ProgramNode::default()));
                let c1 = arena.alloc(Node::EOF(EOFNode::default()));
                arena[current] = Node::Init(InitNode { value: Some(InitRule::ProgramEOF(c0, c1)), position });
                Expansion::Children(vec![c0, c1])
            }
            _ => Expansion::Error(format!("unexpected {} while reading {}, expected one of: {}", token, "`Init`", "\";\", \"while\", #EOF, #QuotedStr")),
        }
        Node::Node1(_) => match &token.kind {
            TokenKind::Keyword(keyword) if keyword == ";" => {
                let c0 = arena.alloc(Node::Token1(Token1Node::default()));
                let c1 = arena.alloc(Node::Tail(TailNode::default()));
                arena[current] = Node::Node1(Node1Node { value: Some(Node1Rule::Token1Tail(c0, c1)), position });
                Expansion::Children(vec![c0, c1])
            }
            TokenKind::Item { domain, .. } if domain == "QuotedStr" => {
                let c0 = arena.alloc(Node::Token1(Token1Node::default()));
                let c1 = arena.alloc(Node::Tail(TailNode::default()));
                arena[current] = Node::Node1(Node1Node { value: Some(Node1Rule::Token1Tail(c0, c1)), position });
                Expansion::Children(vec![c0, c1])
            }
            _ => Expansion::Error(format!("unexpected {} while reading {}, expected one of: {}", token, "`Node`", "\";\", #QuotedStr")),
        }
        Node::Operand(_) => match &token.kind {
            TokenKind::Item { domain, .. } if domain == "Ident" => {
                let c0 = arena.alloc(Node::Ident(IdentNode::default()));
                arena[current] = Node::Operand(OperandNode { value: Some(OperandRule::Ident(c0)), position });
                Expansion::Children(vec![c0])
            }
            TokenKind::Item { domain, .. } if domain == "Number" => {
                let c0 = arena.alloc(Node::Number(NumberNode::default()));
                arena[current] = Node::Operand(OperandNode { value: Some(OperandRule::Number(c0)), position });
                Expansion::Children(vec![c0])
            }
            _ => Expansion::Error(format!("unexpected {} while reading {}, expected one of: {}", token, "`Operand`", "#Ident, #Number")),
        }
        Node::Program(_) => match &token.kind {
            TokenKind::Keyword(keyword) if keyword == ";" => {
                let c0 = arena.alloc(Node::Statement(StatementNode::default()));
                let c1 = arena.alloc(Node::Program(ProgramNode::default()));
                arena[current] = Node::Program(ProgramNode { value: Some(ProgramRule::StatementProgram(c0, c1)), position });
                Expansion::Children(vec![c0, c1])
            }
            TokenKind::Keyword(keyword) if keyword == "while" => {
                let c0 = arena.alloc(Node::Statement(StatementNode::default()));
                let c1 = arena.alloc(Node::Program(ProgramNode::default()));
                arena[current] = Node::Program(ProgramNode { value: Some(ProgramRule::StatementProgram(c0, c1)), position });
                Expansion::Children(vec![c0, c1])
            }
            TokenKind::Keyword(keyword) if keyword == "}" => {
                arena[current] = Node::Program(ProgramNode { value: Some(ProgramRule::Empty), position });
                Expansion::Children(Vec::new())
            }
            TokenKind::EndOfInput => {
                arena[current] = Node::Program(ProgramNode { value: Some(ProgramRule::Empty), position });
                Expansion::Children(Vec::new())
            }
            TokenKind::Item { domain, .. } if domain == "QuotedStr" => {
                let c0 = arena.alloc(Node::Statement(StatementNode::default()));
                let c1 = arena.alloc(Node::Program(ProgramNode::default()));
                arena[current] = Node::Program(ProgramNode { value: Some(ProgramRule::StatementProgram(c0, c1)), position });
                Expansion::Children(vec![c0, c1])
            }
            _ => Expansion::Error(format!("unexpected {} while reading {}, expected one of: {}", token, "`Program`", "\";\", \"while\", \"}\", #EOF, #QuotedStr")),
        }
        Node::Statement(_) => match &token.kind {
            TokenKind::Keyword(keyword) if keyword == ";" => {
                let c0 = arena.alloc(Node::Node1(Node1Node::default()));
                let c1 = arena.alloc(Node::KeywordSemicolon(KeywordSemicolonNode::default()));
                arena[current] = Node::Statement(StatementNode { value: Some(StatementRule::Node1Semicolon(c0, c1)), position });
                Expansion::Children(vec![c0, c1])
            }
            TokenKind::Keyword(keyword) if keyword == "while" => {
                let c0 = arena.alloc(Node::KeywordWhile(KeywordWhileNode::default()));
                let c1 = arena.alloc(Node::Condition(ConditionNode::default()));
                let c2 = arena.alloc(Node::Block(BlockNode::default()));
                arena[current] = Node::Statement(StatementNode { value: Some(StatementRule::WhileConditionBlock(c0, c1, c2)), position });
                Expansion::Children(vec![c0, c1, c2])
            }
            TokenKind::Item { domain, .. } if domain == "QuotedStr" => {
                let c0 = arena.alloc(Node::Node1(Node1Node::default()));
                let c1 = arena.alloc(Node::KeywordSemicolon(KeywordSemicolonNode::default()));
                arena[current] = Node::Statement(StatementNode { value: Some(StatementRule::Node1Semicolon(c0, c1)), position });
                Expansion::Children(vec![c0, c1])
            }
            _ => Expansion::Error(format!("unexpected {} while reading {}, expected one of: {}", token, "`Statement`", "\";\", \"while\", #QuotedStr")),
        }
        Node::Tail(_) => match &token.kind {
            TokenKind::Keyword(keyword) if keyword == ";" => {
                arena[current] = Node::Tail(TailNode { value: Some(TailRule::Empty), position });
                Expansion::Children(Vec::new())
            }
            _ => Expansion::Error(format!("unexpected {} while reading {}, expected one of: {}", token, "`Tail`", "\";\"")),
        }
        Node::Token1(_) => match &token.kind {
            TokenKind::Keyword(keyword) if keyword == ";" => {
                arena[current] = Node::Token1(Token1Node { value: Some(Token1Rule::Empty), position });
                Expansion::Children(Vec::new())
            }
            TokenKind::Item { domain, .. } if domain == "QuotedStr" => {
                let c0 = arena.alloc(Node::QuotedStr(QuotedStrNode::default()));
                arena[current] = Node::Token1(Token1Node { value: Some(Token1Rule::QuotedStr(c0)), position });
                Expansion::Children(vec![c0])
            }
            _ => Expansion::Error(format!("unexpected {} while reading {}, expected one of: {}", token, "`Token`", "\";\", #QuotedStr")),
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
        Node::KeywordSemicolon(_) => match &token.kind {
            TokenKind::Keyword(keyword) if keyword == ";" => {
                arena[current] = Node::KeywordSemicolon(KeywordSemicolonNode { value: Some(token.clone()), position });
                Expansion::Consumed
            }
            _ => Expansion::Error(format!("expected {}, found {}", "\";\"", token)),
        }
        Node::KeywordLessThanEquals(_) => match &token.kind {
            TokenKind::Keyword(keyword) if keyword == "<=" => {
                arena[current] = Node::KeywordLessThanEquals(KeywordLessThanEqualsNode { value: Some(token.clone()), position });
                Expansion::Consumed
            }
            _ => Expansion::Error(format!("expected {}, found {}", "\"<=\"", token)),
        }
        Node::KeywordWhile(_) => match &token.kind {
            TokenKind::Keyword(keyword) if keyword == "while" => {
                arena[current] = Node::KeywordWhile(KeywordWhileNode { value: Some(token.clone()), position });
                Expansion::Consumed
            }
            _ => Expansion::Error(format!("expected {}, found {}", "\"while\"", token)),
        }
        Node::KeywordLeftBrace(_) => match &token.kind {
            TokenKind::Keyword(keyword) if keyword == "{" => {
                arena[current] = Node::KeywordLeftBrace(KeywordLeftBraceNode { value: Some(token.clone()), position });
                Expansion::Consumed
            }
            _ => Expansion::Error(format!("expected {}, found {}", "\"{\"", token)),
        }
        Node::KeywordRightBrace(_) => match &token.kind {
            TokenKind::Keyword(keyword) if keyword == "}" => {
                arena[current] = Node::KeywordRightBrace(KeywordRightBraceNode { value: Some(token.clone()), position });
                Expansion::Consumed
            }
            _ => Expansion::Error(format!("expected {}, found {}", "\"}\"", token)),
        }
        Node::EOF(_) => match &token.kind {
            TokenKind::EndOfInput => {
                arena[current] = Node::EOF(EOFNode { value: Some(token.clone()), position });
                Expansion::Consumed
            }
            _ => Expansion::Error(format!("expected {}, found {}", "#EOF", token)),
        }
        Node::Ident(_) => match &token.kind {
            TokenKind::Item { domain, .. } if domain == "Ident" => {
                arena[current] = Node::Ident(IdentNode { value: Some(token.clone()), position });
                Expansion::Consumed
            }
            _ => Expansion::Error(format!("expected {}, found {}", "#Ident", token)),
        }
        Node::Number(_) => match &token.kind {
            TokenKind::Item { domain, .. } if domain == "Number" => {
                arena[current] = Node::Number(NumberNode { value: Some(token.clone()), position });
                Expansion::Consumed
            }
            _ => Expansion::Error(format!("expected {}, found {}", "#Number", token)),
        }
        Node::QuotedStr(_) => match &token.kind {
            TokenKind::Item { domain, .. } if domain == "QuotedStr" => {
                arena[current] = Node::QuotedStr(QuotedStrNode { value: Some(token.clone()), position });
                Expansion::Consumed
            }
            _ => Expansion::Error(format!("expected {}, found {}", "#QuotedStr", token)),
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
