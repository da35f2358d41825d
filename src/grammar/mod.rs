/*
    This module is for storing and manipulating grammars
*/

mod table;
#[cfg(test)]
pub(crate) mod fixtures;

use std::collections::BTreeMap;
use std::fmt::Display;

use itertools::Itertools;

use crate::error_handling::Position;

pub use table::Ll1Table;

/// Name of the synthetic start non-terminal injected by the synthesizer.
pub const INIT_SYMBOL: &str = "Init";

/// Prefix of serialized lookahead keys standing for a whole token domain.
pub const DIRECTIVE_PREFIX: char = '#';

/// Token domain of the end-of-input marker.
pub const EOF_DOMAIN: &str = "EOF";

// The base unit in a grammar rule
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GrammarSymbol {
    Terminal(String),
    TokenClass(String),
    NonTerminal(String),
    Epsilon,
}

impl GrammarSymbol {
    pub fn terminal(literal: &str) -> Self {
        GrammarSymbol::Terminal(literal.to_string())
    }

    pub fn token_class(domain: &str) -> Self {
        GrammarSymbol::TokenClass(domain.to_string())
    }

    pub fn nonterminal(name: &str) -> Self {
        GrammarSymbol::NonTerminal(name.to_string())
    }

    pub fn end_of_input() -> Self {
        GrammarSymbol::TokenClass(EOF_DOMAIN.to_string())
    }

    /// Reads the text of a quoted grammar terminal: a leading `#` turns it
    /// into a token-domain directive.
    pub fn from_quoted(text: &str) -> Self {
        match text.strip_prefix(DIRECTIVE_PREFIX) {
            Some(domain) if !domain.is_empty() => GrammarSymbol::TokenClass(domain.to_string()),
            _ => GrammarSymbol::Terminal(text.to_string()),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, GrammarSymbol::Terminal(_) | GrammarSymbol::TokenClass(_))
    }

    pub fn as_nonterminal(&self) -> Option<&str> {
        match self {
            GrammarSymbol::NonTerminal(name) => Some(name),
            _ => None,
        }
    }
}

fn quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for c in text.chars() {
        if c == '"' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

impl Display for GrammarSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GrammarSymbol::Terminal(literal) => write!(f, "{}", quote(literal)),
            GrammarSymbol::TokenClass(domain) => write!(f, "{}{}", DIRECTIVE_PREFIX, domain),
            GrammarSymbol::NonTerminal(name) => write!(f, "{}", name),
            GrammarSymbol::Epsilon => write!(f, "epsilon"),
        }
    }
}

/// A one-token lookahead, i.e. one column of the LL(1) table.
///
/// Literal keys and domain keys are kept apart structurally; the `#` prefix
/// only exists in the serialized form (see [`Lookahead::to_key`]).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Lookahead {
    Literal(String),
    Domain(String),
}

impl Lookahead {
    pub fn end_of_input() -> Self {
        Lookahead::Domain(EOF_DOMAIN.to_string())
    }

    /// The lookahead a leaf symbol matches, `None` for non-terminals and epsilon.
    pub fn of(symbol: &GrammarSymbol) -> Option<Self> {
        match symbol {
            GrammarSymbol::Terminal(literal) => Some(Lookahead::Literal(literal.clone())),
            GrammarSymbol::TokenClass(domain) => Some(Lookahead::Domain(domain.clone())),
            GrammarSymbol::NonTerminal(_) | GrammarSymbol::Epsilon => None,
        }
    }

    pub fn is_end_of_input(&self) -> bool {
        matches!(self, Lookahead::Domain(domain) if domain == EOF_DOMAIN)
    }

    pub fn to_symbol(&self) -> GrammarSymbol {
        match self {
            Lookahead::Literal(literal) => GrammarSymbol::Terminal(literal.clone()),
            Lookahead::Domain(domain) => GrammarSymbol::TokenClass(domain.clone()),
        }
    }

    /// Serialized cell key: the bare spelling, or `#Domain`.
    pub fn to_key(&self) -> String {
        match self {
            Lookahead::Literal(literal) => literal.clone(),
            Lookahead::Domain(domain) => format!("{}{}", DIRECTIVE_PREFIX, domain),
        }
    }

    pub fn from_key(key: &str) -> Self {
        match key.strip_prefix(DIRECTIVE_PREFIX) {
            Some(domain) if !domain.is_empty() => Lookahead::Domain(domain.to_string()),
            _ => Lookahead::Literal(key.to_string()),
        }
    }
}

impl Display for Lookahead {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Lookahead::Literal(literal) => write!(f, "{}", quote(literal)),
            Lookahead::Domain(domain) => write!(f, "{}{}", DIRECTIVE_PREFIX, domain),
        }
    }
}

/// The symbols in a single alternative. The empty rule is the one-symbol
/// sequence `[Epsilon]`, never an empty vector.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rule(Vec<GrammarSymbol>);

impl Rule {
    /// No symbols at all gives the epsilon rule.
    pub fn new(symbols: Vec<GrammarSymbol>) -> Self {
        if symbols.is_empty() {
            return Rule::epsilon();
        }
        Rule(symbols)
    }

    pub fn epsilon() -> Self {
        Rule(vec![GrammarSymbol::Epsilon])
    }

    pub fn is_epsilon(&self) -> bool {
        self.0.iter().all(|symbol| *symbol == GrammarSymbol::Epsilon)
    }

    pub fn symbols(&self) -> &[GrammarSymbol] {
        if self.is_epsilon() {
            &[]
        } else {
            &self.0
        }
    }

    pub fn nonterminals(&self) -> impl Iterator<Item = &str> {
        self.0.iter().filter_map(GrammarSymbol::as_nonterminal)
    }

    /// The rule as it appears in a rendered table cell.
    pub fn to_cell(&self) -> String {
        if self.is_epsilon() {
            return "𝓔".to_string();
        }
        self.0.iter()
            .map(|symbol| match symbol {
                GrammarSymbol::Terminal(literal) => literal.clone(),
                other => other.to_string(),
            })
            .join(" ")
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().join(" "))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductionInfo {
    pub lhs: String,
    pub rules: Vec<Rule>,
    pub is_axiom: bool,
    pub position: Option<Position>,
}

impl ProductionInfo {
    pub fn new(lhs: &str, rules: Vec<Rule>) -> Self {
        ProductionInfo {
            lhs: lhs.to_string(),
            rules,
            is_axiom: false,
            position: None,
        }
    }

    pub fn axiom(mut self) -> Self {
        self.is_axiom = true;
        self
    }
}

/// Renders the production back in the grammar-description syntax.
impl Display for ProductionInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_axiom {
            write!(f, "axiom ")?;
        }
        write!(f, "{} is {} end", self.lhs, self.rules.iter().join(" or "))
    }
}

pub type Productions = BTreeMap<String, ProductionInfo>;

/// Builds a production map from a list of productions, keyed by lhs.
pub fn productions_from(list: Vec<ProductionInfo>) -> Productions {
    list.into_iter().map(|info| (info.lhs.clone(), info)).collect()
}

/// Renders a whole production map as grammar-description text, axiom first.
pub fn render_productions(productions: &Productions) -> String {
    productions.values()
        .sorted_by_key(|info| !info.is_axiom)
        .map(|info| info.to_string())
        .join("\n")
}
