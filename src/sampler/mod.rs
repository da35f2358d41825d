/*
    This module generates random sentences of a grammar
*/

use std::collections::BTreeMap;
use std::fmt::Display;

use itertools::Itertools;
use rand::prelude::*;

use crate::error_handling::*;
use crate::grammar::*;
use crate::lexer::{Token, TokenKind, IDENT_DOMAIN, NUMBER_DOMAIN, QUOTED_DOMAIN};

#[derive(Debug, PartialEq)]
pub enum SampleErrorType {
    // An undefined nonterminal was used
    UndefinedNonterminal(String),
    // Every rule of the nonterminal recurses forever
    Unproductive(String),
}

impl ErrorType for SampleErrorType {}

impl Display for SampleErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SampleErrorType::UndefinedNonterminal(nonterminal) => write!(f, "No definition for nonterminal `{}`", nonterminal),
            SampleErrorType::Unproductive(nonterminal) => write!(f, "`{}` derives no finite sentence", nonterminal),
        }
    }
}

pub type SampleError = Error<SampleErrorType>;
pub type SampleResult<T> = Result<T, SampleError>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplerOptions {
    /// Derivation depth after which only the shortest rules are chosen.
    pub max_depth: usize,
}

impl Default for SamplerOptions {
    fn default() -> Self {
        SamplerOptions { max_depth: 12 }
    }
}

/// Random derivations over a production map.
///
/// Every non-terminal gets a height: the depth of its shallowest complete
/// derivation. Past `max_depth` the sampler only picks rules of minimal
/// height, which makes every derivation finite.
pub struct Sampler<'g> {
    productions: &'g Productions,
    heights: BTreeMap<&'g str, usize>,
    options: SamplerOptions,
}

impl<'g> Sampler<'g> {
    pub fn new(productions: &'g Productions, options: SamplerOptions) -> Self {
        let mut sampler = Sampler { productions, heights: BTreeMap::new(), options };
        let mut changed = true;
        while changed {
            changed = false;
            for (name, info) in productions {
                let Some(height) = info.rules.iter().filter_map(|rule| sampler.rule_height(rule)).min() else {
                    continue;
                };
                if sampler.heights.get(name.as_str()).map_or(true, |&known| height < known) {
                    sampler.heights.insert(name, height);
                    changed = true;
                }
            }
        }
        sampler
    }

    fn rule_height(&self, rule: &Rule) -> Option<usize> {
        rule.nonterminals()
            .map(|name| self.heights.get(name).copied())
            .fold_options(0, usize::max)
            .map(|height| height + 1)
    }

    pub fn height(&self, nonterminal: &str) -> Option<usize> {
        self.heights.get(nonterminal).copied()
    }

    fn production(&self, nonterminal: &str, location: Option<Position>) -> SampleResult<&'g ProductionInfo> {
        let info = self.productions.get(nonterminal).ok_or_else(|| {
            SampleError::new(SampleErrorType::UndefinedNonterminal(nonterminal.to_string()), location)
        })?;
        if !self.heights.contains_key(nonterminal) {
            return Err(SampleError::new(SampleErrorType::Unproductive(nonterminal.to_string()), info.position));
        }
        Ok(info)
    }

    fn choose_rule<R: Rng + ?Sized>(&self, info: &'g ProductionInfo, depth: usize, rng: &mut R) -> Option<&'g Rule> {
        let heights: Vec<(&Rule, usize)> = info.rules.iter()
            .filter_map(|rule| self.rule_height(rule).map(|height| (rule, height)))
            .collect();
        let within: Vec<&Rule> = heights.iter()
            .filter(|(_, height)| depth + height <= self.options.max_depth)
            .map(|(rule, _)| *rule)
            .collect();
        if !within.is_empty() {
            return within.choose(rng).copied();
        }
        let lowest = heights.iter().map(|(_, height)| *height).min()?;
        let shortest: Vec<&Rule> = heights.iter()
            .filter(|(_, height)| *height == lowest)
            .map(|(rule, _)| *rule)
            .collect();
        shortest.choose(rng).copied()
    }

    /// Derives one random sentence from `start`, ending with the
    /// end-of-input token.
    pub fn sentence<R: Rng + ?Sized>(&self, start: &str, rng: &mut R) -> SampleResult<Vec<Token>> {
        let mut tokens = Vec::new();
        let mut column = 1;
        let mut todo = vec![(GrammarSymbol::nonterminal(start), 0, None)];

        while let Some((symbol, depth, location)) = todo.pop() {
            let text = match &symbol {
                GrammarSymbol::NonTerminal(name) => {
                    let info = self.production(name, location)?;
                    let rule = self.choose_rule(info, depth, rng)
                        .ok_or_else(|| SampleError::new(SampleErrorType::Unproductive(name.clone()), info.position))?;
                    todo.extend(rule.symbols().iter().rev().map(|child| (child.clone(), depth + 1, info.position)));
                    continue;
                }
                GrammarSymbol::Epsilon => continue,
                GrammarSymbol::Terminal(spelling) => spelling.clone(),
                GrammarSymbol::TokenClass(domain) => sample_text(domain, rng),
            };

            let begin = Position::new(1, column);
            column += text.chars().count() + 1;
            let span = Span::new(begin, Position::new(1, column - 1));
            tokens.push(match symbol {
                GrammarSymbol::TokenClass(domain) if domain == EOF_DOMAIN => Token::end_of_input(begin),
                GrammarSymbol::TokenClass(domain) => Token::item(&domain, &text, span),
                _ => Token::keyword(&text, span),
            });
        }

        if !tokens.last().is_some_and(Token::is_end_of_input) {
            tokens.push(Token::end_of_input(Position::new(1, column)));
        }
        log::trace!("sampled {} token(s) from `{}`", tokens.len(), start);
        Ok(tokens)
    }
}

// Some text of a token domain
fn sample_text<R: Rng + ?Sized>(domain: &str, rng: &mut R) -> String {
    match domain {
        NUMBER_DOMAIN => rng.gen_range(0..100u32).to_string(),
        IDENT_DOMAIN => ["x", "y", "foo", "bar"].choose(rng).copied().unwrap_or("x").to_string(),
        QUOTED_DOMAIN => ["a", "+", "#Number"].choose(rng).copied().unwrap_or("a").to_string(),
        EOF_DOMAIN => String::new(),
        other => other.to_lowercase(),
    }
}

/// Writes tokens back as text, separated by spaces.
pub fn render_sentence(tokens: &[Token]) -> String {
    tokens.iter()
        .filter(|token| !token.is_end_of_input())
        .map(|token| match &token.kind {
            TokenKind::Item { domain, text } if domain == QUOTED_DOMAIN => format!("{:?}", text),
            _ => token.text().to_string(),
        })
        .join(" ")
}
