/*
    This module turns the parse trees of a grammar description into
    productions
*/

use std::fmt::Display;

use itertools::Itertools;

use crate::engine::{NodeValue, ParseNode};
use crate::error_handling::*;
use crate::grammar::*;
use crate::lexer::{IDENT_DOMAIN, QUOTED_DOMAIN};
use crate::meta::{GrammarAst, KEYWORD_END, KEYWORD_EPSILON};

// Children of a `Production` node:
// Axiom #Ident "is" Rule RuleAlt "end" Production
const AXIOM_MARK: usize = 0;
const NAME: usize = 1;
const IS: usize = 2;
const FIRST_RULE: usize = 3;
const ALTERNATIVES: usize = 4;
const END: usize = 5;
const NEXT: usize = 6;

#[derive(Debug, Clone, PartialEq)]
pub enum SemanticErrorType {
    // A part of a production that the parser never got to
    MissingNode { expected: GrammarSymbol },
    // The same non-terminal defined twice
    DuplicateDefinition { name: String, previous: Option<Position> },
    // A second production marked as axiom
    DuplicateAxiom { name: String, previous: String },
    NoAxiom,
}

impl ErrorType for SemanticErrorType {}

// What a missing part of a production looks like to whoever wrote it: a
// rule tail or alternative list that never started is an unfinished
// production
fn describe_missing(expected: &GrammarSymbol) -> String {
    match expected {
        GrammarSymbol::NonTerminal(name) if name == "Rule" => "rule".to_string(),
        GrammarSymbol::NonTerminal(name) if name == "RuleTail" || name == "RuleAlt" => {
            GrammarSymbol::terminal(KEYWORD_END).to_string()
        }
        GrammarSymbol::TokenClass(domain) if domain == IDENT_DOMAIN => "name".to_string(),
        GrammarSymbol::TokenClass(domain) if domain == QUOTED_DOMAIN => "quoted terminal".to_string(),
        other => other.to_string(),
    }
}

impl Display for SemanticErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SemanticErrorType::MissingNode { expected } => {
                write!(f, "missing {} in production", describe_missing(expected))
            }
            SemanticErrorType::DuplicateDefinition { name, previous: Some(previous) } => {
                write!(f, "`{}` is already defined at {}", name, previous)
            }
            SemanticErrorType::DuplicateDefinition { name, previous: None } => write!(f, "`{}` is already defined", name),
            SemanticErrorType::DuplicateAxiom { name, previous } => {
                write!(f, "`{}` is marked as axiom but `{}` already is", name, previous)
            }
            SemanticErrorType::NoAxiom => write!(f, "no production is marked as axiom"),
        }
    }
}

pub type Diagnostic = Error<SemanticErrorType>;
pub type Diagnostics = Errors<SemanticErrorType>;

/// Reads the axiom and productions out of a grammar description.
///
/// Every problem is collected; a production with a problem does not stop
/// the ones after it from being read.
pub fn extract(ast: &GrammarAst) -> Result<(String, Productions), Diagnostics> {
    let mut extractor = Extractor::default();
    for tree in &ast.trees {
        extractor.walk_tree(tree);
    }
    extractor.finish()
}

#[derive(Default)]
struct Extractor {
    productions: Productions,
    axiom: Option<String>,
    diagnostics: Diagnostics,
    // Set once the production being read has reported a missing node
    failed: bool,
}

impl Extractor {
    fn report(&mut self, error: SemanticErrorType, position: Option<Position>) {
        self.diagnostics.push(Diagnostic::new(error, position));
    }

    // Only the first gap of a production is reported, the rest of it is
    // missing for the same reason
    fn missing(&mut self, node: &ParseNode, fallback: Option<Position>) {
        if self.failed {
            return;
        }
        self.failed = true;
        self.report(SemanticErrorType::MissingNode { expected: node.symbol.clone() }, node.position.or(fallback));
    }

    fn walk_tree(&mut self, root: &ParseNode) {
        // Init -> Production #EOF
        let mut current = root.children().first();
        self.failed = false;
        while let Some(node) = current {
            current = match &node.value {
                NodeValue::Expanded(children) if children.is_empty() => None,
                NodeValue::Expanded(children) => {
                    self.failed = false;
                    self.production(node.position, children);
                    children.get(NEXT)
                }
                _ => {
                    self.missing(node, None);
                    None
                }
            };
        }
    }

    fn production(&mut self, position: Option<Position>, children: &[ParseNode]) {
        let is_axiom = match children.get(AXIOM_MARK) {
            Some(ParseNode { value: NodeValue::Expanded(marker), .. }) => !marker.is_empty(),
            Some(node) => return self.missing(node, position),
            None => return,
        };
        let name = match children.get(NAME) {
            Some(node) => match node.token() {
                Some(token) => token.text().to_string(),
                None => return self.missing(node, position),
            },
            None => return,
        };
        if let Some(node) = children.get(IS).filter(|node| node.token().is_none()) {
            return self.missing(node, position);
        }

        let mut rules = Vec::new();
        if let Some(node) = children.get(FIRST_RULE) {
            rules.extend(self.rule(node, position));
        }
        let mut alternatives = children.get(ALTERNATIVES);
        while let Some(node) = alternatives {
            alternatives = match &node.value {
                // "or" Rule RuleAlt
                NodeValue::Expanded(link) if !link.is_empty() => {
                    if let Some(rule) = link.get(1) {
                        rules.extend(self.rule(rule, position));
                    }
                    link.get(2)
                }
                NodeValue::Expanded(_) => None,
                _ => {
                    self.missing(node, position);
                    None
                }
            };
        }
        if let Some(node) = children.get(END).filter(|node| node.token().is_none()) {
            self.missing(node, position);
        }

        self.define(name, rules, is_axiom, position);
    }

    fn rule(&mut self, node: &ParseNode, fallback: Option<Position>) -> Option<Rule> {
        let NodeValue::Expanded(children) = &node.value else {
            self.missing(node, fallback);
            return None;
        };
        if let [marker] = &children[..] {
            if marker.symbol == GrammarSymbol::terminal(KEYWORD_EPSILON) {
                return Some(Rule::epsilon());
            }
        }

        // Item RuleTail, where RuleTail is again Item RuleTail or empty
        let mut symbols = Vec::new();
        let mut item = children.first();
        let mut tail = children.get(1);
        while let Some(leaf) = item {
            match (&leaf.symbol, leaf.token()) {
                (GrammarSymbol::TokenClass(domain), Some(token)) if domain == QUOTED_DOMAIN => {
                    symbols.push(GrammarSymbol::from_quoted(token.text()));
                }
                (GrammarSymbol::TokenClass(domain), Some(token)) if domain == IDENT_DOMAIN => {
                    symbols.push(GrammarSymbol::nonterminal(token.text()));
                }
                _ => self.missing(leaf, fallback),
            }

            item = None;
            match tail.map(|tail| (tail, &tail.value)) {
                Some((_, NodeValue::Expanded(link))) => {
                    item = link.first();
                    tail = link.get(1);
                }
                Some((tail, _)) => self.missing(tail, fallback),
                None => {}
            }
        }

        if symbols.is_empty() {
            None
        } else {
            Some(Rule::new(symbols))
        }
    }

    fn define(&mut self, name: String, rules: Vec<Rule>, is_axiom: bool, position: Option<Position>) {
        if is_axiom {
            match &self.axiom {
                Some(previous) => {
                    let previous = previous.clone();
                    self.report(SemanticErrorType::DuplicateAxiom { name: name.clone(), previous }, position);
                }
                None => self.axiom = Some(name.clone()),
            }
        }
        if let Some(previous) = self.productions.get(&name) {
            let previous = previous.position;
            self.report(SemanticErrorType::DuplicateDefinition { name: name.clone(), previous }, position);
        }

        let mut info = ProductionInfo::new(&name, rules.into_iter().unique().collect());
        info.is_axiom = is_axiom;
        info.position = position;
        log::trace!("extracted {}", info);
        self.productions.insert(name, info);
    }

    fn finish(mut self) -> Result<(String, Productions), Diagnostics> {
        let Some(axiom) = self.axiom.take() else {
            self.report(SemanticErrorType::NoAxiom, None);
            return Err(self.diagnostics);
        };
        if !self.diagnostics.is_empty() {
            return Err(self.diagnostics);
        }
        log::debug!("extracted {} production(s), axiom `{}`", self.productions.len(), axiom);
        Ok((axiom, self.productions))
    }
}
