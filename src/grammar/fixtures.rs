// Grammars shared by the test modules

use super::*;

pub fn nt(name: &str) -> GrammarSymbol {
    GrammarSymbol::nonterminal(name)
}

pub fn t(literal: &str) -> GrammarSymbol {
    GrammarSymbol::terminal(literal)
}

pub fn class(domain: &str) -> GrammarSymbol {
    GrammarSymbol::token_class(domain)
}

pub fn rule(symbols: &[GrammarSymbol]) -> Rule {
    Rule::new(symbols.to_vec())
}

/// E -> T E1; E1 -> "+" T E1 | epsilon; T -> F T1;
/// T1 -> "*" F T1 | epsilon; F -> "(" E ")" | #Number
pub fn expression() -> Productions {
    productions_from(vec![
        ProductionInfo::new("E", vec![rule(&[nt("T"), nt("E1")])]).axiom(),
        ProductionInfo::new("E1", vec![rule(&[t("+"), nt("T"), nt("E1")]), Rule::epsilon()]),
        ProductionInfo::new("T", vec![rule(&[nt("F"), nt("T1")])]),
        ProductionInfo::new("T1", vec![rule(&[t("*"), nt("F"), nt("T1")]), Rule::epsilon()]),
        ProductionInfo::new("F", vec![
            rule(&[t("("), nt("E"), t(")")]),
            rule(&[class("Number")]),
        ]),
    ])
}

/// A -> "x" | "x" "y"
pub fn ambiguous() -> Productions {
    productions_from(vec![
        ProductionInfo::new("A", vec![rule(&[t("x")]), rule(&[t("x"), t("y")])]).axiom(),
    ])
}
