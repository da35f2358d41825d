/*
    This module is a small calculator over the parser generated for
    example_data/expr.grammar
*/

pub mod expr_parser;

use thiserror::Error;

use crate::lexer::{Lexer, LexerConfig, NUMBER_DOMAIN};
use crate::runtime::{Arena, NodeId, ParseError};
use expr_parser::*;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("`{0}` does not fit in a 64-bit integer")]
    InvalidNumber(String),
    #[error("arithmetic overflow")]
    Overflow,
    // Only reachable with a tree that was not fully parsed
    #[error("the parse tree is incomplete")]
    Incomplete,
}

pub type CalcResult<T> = Result<T, CalcError>;

pub fn lexer_config() -> LexerConfig {
    LexerConfig::new()
        .keyword("+")
        .keyword("*")
        .keyword("(")
        .keyword(")")
        .domain(NUMBER_DOMAIN)
}

/// Parses and evaluates an arithmetic expression made of integers, `+`,
/// `*` and parentheses.
pub fn evaluate(text: &str) -> CalcResult<i64> {
    let tree = parse(Lexer::new(text, lexer_config()))?;
    let evaluator = Evaluator { arena: &tree.arena };
    match &tree.arena[tree.root] {
        Node::Init(InitNode { value: Some(InitRule::EEOF(expression, _)), .. }) => evaluator.expression(*expression),
        _ => Err(CalcError::Incomplete),
    }
}

struct Evaluator<'a> {
    arena: &'a Arena<Node>,
}

impl Evaluator<'_> {
    fn expression(&self, id: NodeId) -> CalcResult<i64> {
        let Node::E(ENode { value: Some(ERule::TE1(term, rest)), .. }) = &self.arena[id] else {
            return Err(CalcError::Incomplete);
        };
        let mut rest = *rest;
        let mut sum = self.term(*term)?;
        loop {
            match &self.arena[rest] {
                Node::E1(E1Node { value: Some(E1Rule::PlusTE1(_, term, next)), .. }) => {
                    sum = sum.checked_add(self.term(*term)?).ok_or(CalcError::Overflow)?;
                    rest = *next;
                }
                Node::E1(E1Node { value: Some(E1Rule::Empty), .. }) => return Ok(sum),
                _ => return Err(CalcError::Incomplete),
            }
        }
    }

    fn term(&self, id: NodeId) -> CalcResult<i64> {
        let Node::T(TNode { value: Some(TRule::FT1(factor, rest)), .. }) = &self.arena[id] else {
            return Err(CalcError::Incomplete);
        };
        let mut rest = *rest;
        let mut product = self.factor(*factor)?;
        loop {
            match &self.arena[rest] {
                Node::T1(T1Node { value: Some(T1Rule::AsteriskFT1(_, factor, next)), .. }) => {
                    product = product.checked_mul(self.factor(*factor)?).ok_or(CalcError::Overflow)?;
                    rest = *next;
                }
                Node::T1(T1Node { value: Some(T1Rule::Empty), .. }) => return Ok(product),
                _ => return Err(CalcError::Incomplete),
            }
        }
    }

    fn factor(&self, id: NodeId) -> CalcResult<i64> {
        match &self.arena[id] {
            Node::F(FNode { value: Some(FRule::LeftParenERightParen(_, inner, _)), .. }) => self.expression(*inner),
            Node::F(FNode { value: Some(FRule::Number(number)), .. }) => self.number(*number),
            _ => Err(CalcError::Incomplete),
        }
    }

    fn number(&self, id: NodeId) -> CalcResult<i64> {
        match &self.arena[id] {
            Node::Number(NumberNode { value: Some(token), .. }) => {
                token.text().parse().map_err(|_| CalcError::InvalidNumber(token.text().to_string()))
            }
            _ => Err(CalcError::Incomplete),
        }
    }
}
