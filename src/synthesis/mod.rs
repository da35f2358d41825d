/*
    This module builds the LL(1) table of a grammar from its FIRST and
    FOLLOW sets
*/

use std::collections::{BTreeMap, BTreeSet};

use itertools::Itertools;
use thiserror::Error;

use crate::grammar::*;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SynthesisError {
    #[error("the axiom `{0}` has no production")]
    UndefinedAxiom(String),
    #[error("`{name}` is used in the production of `{lhs}` but never defined")]
    UndefinedSymbol { name: String, lhs: String },
    #[error("`{0}` is a reserved name and cannot be defined by a grammar")]
    ReservedSymbol(String),
    #[error("the grammar is not LL(1): `{lhs}` can expand to both `{existing}` and `{new}` on {lookahead}")]
    Ambiguity { lhs: String, lookahead: Lookahead, existing: Rule, new: Rule },
}

pub type SynthesisResult<T> = Result<T, SynthesisError>;

type LookaheadSets = BTreeMap<String, BTreeSet<Lookahead>>;

/// Builds the predictive table for `productions`, starting from `axiom`.
///
/// The table gets an extra `Init` row whose single rule is `axiom #EOF`.
pub fn synthesize(axiom: &str, productions: &Productions) -> SynthesisResult<Ll1Table> {
    Synthesizer::run(axiom, productions).map(Synthesizer::into_table)
}

fn check_preconditions(axiom: &str, productions: &Productions) -> SynthesisResult<()> {
    if productions.contains_key(INIT_SYMBOL) {
        return Err(SynthesisError::ReservedSymbol(INIT_SYMBOL.to_string()));
    }
    if !productions.contains_key(axiom) {
        return Err(SynthesisError::UndefinedAxiom(axiom.to_string()));
    }
    for (lhs, info) in productions {
        for name in info.rules.iter().flat_map(Rule::nonterminals) {
            if !productions.contains_key(name) {
                return Err(SynthesisError::UndefinedSymbol { name: name.to_string(), lhs: lhs.clone() });
            }
        }
    }
    Ok(())
}

// Non-terminals that no derivation from the axiom ever uses
fn unreachable(axiom: &str, productions: &Productions) -> Vec<String> {
    let mut seen = BTreeSet::from([axiom.to_string()]);
    let mut todo = vec![axiom.to_string()];
    while let Some(name) = todo.pop() {
        let Some(info) = productions.get(&name) else { continue };
        for inner in info.rules.iter().flat_map(Rule::nonterminals) {
            if seen.insert(inner.to_string()) {
                todo.push(inner.to_string());
            }
        }
    }
    productions.keys().filter(|name| !seen.contains(*name)).cloned().collect()
}

struct Synthesizer {
    axiom: String,
    productions: Productions,
    rows: BTreeMap<String, BTreeMap<Lookahead, Rule>>,
    first: LookaheadSets,
    follow: LookaheadSets,
    // Rules through which a non-terminal derives the empty string
    nullable: BTreeMap<String, Vec<Rule>>,
}

impl Synthesizer {
    fn run(axiom: &str, productions: &Productions) -> SynthesisResult<Self> {
        check_preconditions(axiom, productions)?;
        for name in unreachable(axiom, productions) {
            log::warn!("`{}` cannot be reached from the axiom `{}`", name, axiom);
        }

        let mut augmented = productions.clone();
        augmented.insert(INIT_SYMBOL.to_string(), ProductionInfo::new(INIT_SYMBOL, vec![
            Rule::new(vec![GrammarSymbol::nonterminal(axiom), GrammarSymbol::end_of_input()]),
        ]));

        let mut synthesizer = Synthesizer {
            axiom: axiom.to_string(),
            rows: augmented.keys().map(|name| (name.clone(), BTreeMap::new())).collect(),
            productions: augmented,
            first: BTreeMap::new(),
            follow: BTreeMap::new(),
            nullable: BTreeMap::new(),
        };

        let names: Vec<String> = synthesizer.productions.keys().cloned().collect();
        for name in &names {
            let mut visited = BTreeSet::new();
            synthesizer.first_of(name, &mut visited)?;
        }
        log::debug!("FIRST sets: {}", render_sets(&synthesizer.first));

        synthesizer.compute_follow();
        log::debug!("FOLLOW sets: {}", render_sets(&synthesizer.follow));

        synthesizer.close_nullable()?;
        log::debug!("table for `{}` has {} cells", axiom, synthesizer.rows.values().map(BTreeMap::len).sum::<usize>());
        Ok(synthesizer)
    }

    fn is_nullable(&self, name: &str) -> bool {
        self.nullable.contains_key(name)
    }

    fn install(&mut self, lhs: &str, lookahead: Lookahead, rule: &Rule) -> SynthesisResult<()> {
        let row = self.rows.entry(lhs.to_string()).or_default();
        match row.get(&lookahead) {
            Some(existing) if existing != rule => Err(SynthesisError::Ambiguity {
                lhs: lhs.to_string(),
                lookahead,
                existing: existing.clone(),
                new: rule.clone(),
            }),
            Some(_) => Ok(()),
            None => {
                row.insert(lookahead, rule.clone());
                Ok(())
            }
        }
    }

    // Computes FIRST(name) and installs the table cells it selects. A
    // non-terminal met again while it is still being computed contributes
    // nothing, so left-recursive alternatives are truncated.
    fn first_of(&mut self, name: &str, visited: &mut BTreeSet<String>) -> SynthesisResult<BTreeSet<Lookahead>> {
        if let Some(first) = self.first.get(name) {
            return Ok(first.clone());
        }
        if !visited.insert(name.to_string()) {
            return Ok(BTreeSet::new());
        }

        let rules = match self.productions.get(name) {
            Some(info) => info.rules.clone(),
            None => return Ok(BTreeSet::new()),
        };

        let mut first = BTreeSet::new();
        for rule in &rules {
            let mut exhausted = true;
            for symbol in rule.symbols() {
                match symbol {
                    GrammarSymbol::NonTerminal(inner) => {
                        let inner_first = self.first_of(inner, visited)?;
                        for lookahead in &inner_first {
                            self.install(name, lookahead.clone(), rule)?;
                        }
                        first.extend(inner_first);
                        if !self.is_nullable(inner) {
                            exhausted = false;
                            break;
                        }
                    }
                    GrammarSymbol::Epsilon => {}
                    leaf => {
                        if let Some(lookahead) = Lookahead::of(leaf) {
                            self.install(name, lookahead.clone(), rule)?;
                            first.insert(lookahead);
                        }
                        exhausted = false;
                        break;
                    }
                }
            }
            if exhausted {
                self.nullable.entry(name.to_string()).or_default().push(rule.clone());
            }
        }

        self.first.insert(name.to_string(), first.clone());
        Ok(first)
    }

    fn compute_follow(&mut self) {
        self.follow = self.productions.keys().map(|name| (name.clone(), BTreeSet::new())).collect();

        let mut passes = 0;
        loop {
            passes += 1;
            let mut changed = false;
            for (lhs, info) in &self.productions {
                for rule in &info.rules {
                    let symbols = rule.symbols();
                    for (i, symbol) in symbols.iter().enumerate() {
                        let Some(name) = symbol.as_nonterminal() else { continue };

                        let mut additions = BTreeSet::new();
                        let mut reached_end = true;
                        for next in &symbols[i + 1..] {
                            match next {
                                GrammarSymbol::NonTerminal(inner) => {
                                    additions.extend(self.first.get(inner).into_iter().flatten().cloned());
                                    if !self.nullable.contains_key(inner) {
                                        reached_end = false;
                                        break;
                                    }
                                }
                                GrammarSymbol::Epsilon => {}
                                leaf => {
                                    additions.extend(Lookahead::of(leaf));
                                    reached_end = false;
                                    break;
                                }
                            }
                        }
                        if reached_end {
                            additions.extend(self.follow.get(lhs).into_iter().flatten().cloned());
                        }

                        let follow = self.follow.entry(name.to_string()).or_default();
                        let before = follow.len();
                        follow.extend(additions);
                        changed |= follow.len() != before;
                    }
                }
            }
            if !changed {
                break;
            }
        }
        log::trace!("FOLLOW sets stable after {} passes", passes);
    }

    // Every rule deriving the empty string is selected by the FOLLOW set of
    // its non-terminal
    fn close_nullable(&mut self) -> SynthesisResult<()> {
        let nullable = std::mem::take(&mut self.nullable);
        for (name, rules) in &nullable {
            let follow = self.follow.get(name).cloned().unwrap_or_default();
            for lookahead in follow {
                for rule in rules {
                    self.install(name, lookahead.clone(), rule)?;
                }
            }
        }
        self.nullable = nullable;
        Ok(())
    }

    fn columns(&self) -> BTreeSet<Lookahead> {
        self.productions.values()
            .flat_map(|info| info.rules.iter())
            .flat_map(|rule| rule.symbols().iter())
            .filter_map(Lookahead::of)
            .collect()
    }

    fn into_table(self) -> Ll1Table {
        let columns = self.columns();
        Ll1Table::new(self.axiom, self.rows, columns)
    }
}

fn render_sets(sets: &LookaheadSets) -> String {
    sets.iter()
        .map(|(name, set)| format!("{} = {{{}}}", name, set.iter().map(Lookahead::to_key).join(", ")))
        .join("; ")
}
