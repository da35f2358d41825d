use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;

use super::{Lookahead, Rule, INIT_SYMBOL};

/// Predictive parsing table: `rows[non-terminal][lookahead]` is the rule to
/// expand, an absent cell is a syntax error.
#[derive(Debug, Clone, PartialEq)]
pub struct Ll1Table {
    axiom: String,
    rows: BTreeMap<String, BTreeMap<Lookahead, Rule>>,
    columns: BTreeSet<Lookahead>,
}

impl Ll1Table {
    pub(crate) fn new(
        axiom: String,
        rows: BTreeMap<String, BTreeMap<Lookahead, Rule>>,
        columns: BTreeSet<Lookahead>,
    ) -> Self {
        Ll1Table { axiom, rows, columns }
    }

    pub fn axiom(&self) -> &str {
        &self.axiom
    }

    pub fn start(&self) -> &str {
        INIT_SYMBOL
    }

    pub fn get(&self, nonterminal: &str, lookahead: &Lookahead) -> Option<&Rule> {
        self.rows.get(nonterminal)?.get(lookahead)
    }

    pub fn row(&self, nonterminal: &str) -> Option<&BTreeMap<Lookahead, Rule>> {
        self.rows.get(nonterminal)
    }

    pub fn nonterminals(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    pub fn contains(&self, nonterminal: &str) -> bool {
        self.rows.contains_key(nonterminal)
    }

    /// Every terminal and token domain of the grammar, `#EOF` included.
    pub fn columns(&self) -> impl Iterator<Item = &Lookahead> {
        self.columns.iter()
    }

    /// Lookaheads with a rule in the row of `nonterminal`.
    pub fn expected(&self, nonterminal: &str) -> Vec<Lookahead> {
        self.rows.get(nonterminal)
            .map(|row| row.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Number of occupied cells.
    pub fn len(&self) -> usize {
        self.rows.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Markdown rendering, one column per serialized lookahead key.
impl Display for Ll1Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "|   |")?;
        for column in &self.columns {
            write!(f, "{}|", column.to_key())?;
        }
        writeln!(f)?;

        write!(f, "|---|")?;
        for _ in &self.columns {
            write!(f, "---|")?;
        }
        writeln!(f)?;

        for (nonterminal, row) in &self.rows {
            write!(f, "|{}|", nonterminal)?;
            for column in &self.columns {
                match row.get(column) {
                    Some(rule) => write!(f, "{}|", rule.to_cell())?,
                    None => write!(f, "---|")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
