/*
    This module reads grammar descriptions. The description language is
    itself an LL(1) grammar, parsed by the table-driven engine.
*/

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::engine::{Engine, ParseError, ParseNode};
use crate::error_handling::Position;
use crate::extractor::{extract, Diagnostic};
use crate::grammar::*;
use crate::lexer::*;
use crate::synthesis::{synthesize, SynthesisError};

pub const AXIOM: &str = "Production";

pub const KEYWORD_AXIOM: &str = "axiom";
pub const KEYWORD_IS: &str = "is";
pub const KEYWORD_OR: &str = "or";
pub const KEYWORD_END: &str = "end";
pub const KEYWORD_EPSILON: &str = "epsilon";

/// The grammar of grammar descriptions:
///
/// ```text
/// axiom Production is Axiom "#Ident" "is" Rule RuleAlt "end" Production or epsilon end
/// Axiom is "axiom" or epsilon end
/// Rule is "#QuotedStr" RuleTail or "#Ident" RuleTail or "epsilon" end
/// RuleTail is "#QuotedStr" RuleTail or "#Ident" RuleTail or epsilon end
/// RuleAlt is "or" Rule RuleAlt or epsilon end
/// ```
pub fn productions() -> Productions {
    let nt = GrammarSymbol::nonterminal;
    let t = GrammarSymbol::terminal;
    let ident = || GrammarSymbol::token_class(IDENT_DOMAIN);
    let quoted = || GrammarSymbol::token_class(QUOTED_DOMAIN);

    productions_from(vec![
        ProductionInfo::new(AXIOM, vec![
            Rule::new(vec![
                nt("Axiom"), ident(), t(KEYWORD_IS), nt("Rule"), nt("RuleAlt"), t(KEYWORD_END), nt(AXIOM),
            ]),
            Rule::epsilon(),
        ]).axiom(),
        ProductionInfo::new("Axiom", vec![Rule::new(vec![t(KEYWORD_AXIOM)]), Rule::epsilon()]),
        ProductionInfo::new("Rule", vec![
            Rule::new(vec![quoted(), nt("RuleTail")]),
            Rule::new(vec![ident(), nt("RuleTail")]),
            Rule::new(vec![t(KEYWORD_EPSILON)]),
        ]),
        ProductionInfo::new("RuleTail", vec![
            Rule::new(vec![quoted(), nt("RuleTail")]),
            Rule::new(vec![ident(), nt("RuleTail")]),
            Rule::epsilon(),
        ]),
        ProductionInfo::new("RuleAlt", vec![
            Rule::new(vec![t(KEYWORD_OR), nt("Rule"), nt("RuleAlt")]),
            Rule::epsilon(),
        ]),
    ])
}

pub fn lexer_config() -> LexerConfig {
    [KEYWORD_AXIOM, KEYWORD_IS, KEYWORD_OR, KEYWORD_END, KEYWORD_EPSILON].iter()
        .fold(LexerConfig::new(), |config, keyword| config.keyword(keyword))
        .domain(IDENT_DOMAIN)
        .domain(QUOTED_DOMAIN)
}

pub fn table() -> Result<Ll1Table, SynthesisError> {
    synthesize(AXIOM, &productions())
}

/// The parse trees of one grammar file: one per stretch of input parsed
/// without a syntax error. Every tree is rooted at `Init`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GrammarAst {
    pub trees: Vec<ParseNode>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FrontendError {
    #[error(transparent)]
    Lexical(LexError),
    #[error(transparent)]
    Syntax(ParseError),
    #[error("the grammar of grammars is broken: {0}")]
    Bootstrap(#[from] SynthesisError),
}

impl FrontendError {
    pub fn position(&self) -> Option<Position> {
        match self {
            FrontendError::Lexical(error) => error.position,
            FrontendError::Syntax(error) => error.position(),
            FrontendError::Bootstrap(_) => None,
        }
    }
}

fn is_end_keyword(token: &Token) -> bool {
    matches!(&token.kind, TokenKind::Keyword(spelling) if spelling == KEYWORD_END)
}

/// Parses a grammar description.
///
/// Lexical errors are reported and the offending text dropped. After a
/// syntax error the partial tree is kept and parsing starts over after the
/// next `end`, so that the remaining productions are still read.
pub fn parse_grammar(text: &str) -> (GrammarAst, Vec<FrontendError>) {
    let (tokens, lex_errors) = lex_all(text, lexer_config());
    let mut errors: Vec<FrontendError> = lex_errors.into_iter().map(FrontendError::Lexical).collect();

    let table = match table() {
        Ok(table) => table,
        Err(error) => {
            errors.push(error.into());
            return (GrammarAst::default(), errors);
        }
    };

    let mut trees = Vec::new();
    let mut rest = &tokens[..];
    loop {
        let mut engine = Engine::new(&table);
        let mut failure = None;
        for (index, token) in rest.iter().enumerate() {
            if let Err(error) = engine.feed(token.clone()) {
                log::debug!("syntax error in grammar: {}", error);
                errors.push(FrontendError::Syntax(error));
                failure = Some((index, token.is_end_of_input()));
                break;
            }
        }
        trees.push(engine.tree());

        let Some((index, at_end)) = failure else {
            if let Err(error) = engine.finish() {
                errors.push(FrontendError::Syntax(error));
            }
            break;
        };
        if at_end {
            break;
        }
        match rest[index..].iter().position(is_end_keyword) {
            Some(offset) => rest = &rest[index + offset + 1..],
            None => break,
        }
    }

    log::debug!("grammar text parsed into {} tree(s), {} error(s)", trees.len(), errors.len());
    (GrammarAst { trees }, errors)
}

#[derive(Debug, Error)]
pub enum GrammarFileError {
    #[error("cannot read `{}`: {source}", .path.display())]
    Io { path: PathBuf, source: std::io::Error },
    #[error("`{}` is not a valid grammar", .path.display())]
    Invalid { path: PathBuf, frontend: Vec<FrontendError>, semantic: Vec<Diagnostic> },
}

impl GrammarFileError {
    /// One `file:line:col: message` line per problem.
    pub fn report(&self) -> Vec<String> {
        match self {
            GrammarFileError::Io { .. } => vec![self.to_string()],
            GrammarFileError::Invalid { path, frontend, semantic } => {
                let located = |position: Option<Position>, message: String| match position {
                    Some(position) => format!("{}:{}: {}", path.display(), position, message),
                    None => format!("{}: {}", path.display(), message),
                };
                frontend.iter()
                    .map(|error| located(error.position(), error.to_string()))
                    .chain(semantic.iter().map(|error| located(error.position, error.error.to_string())))
                    .collect()
            }
        }
    }
}

/// Reads, parses and checks the grammar in `text`.
pub fn read_grammar(text: &str) -> Result<(String, Productions), (Vec<FrontendError>, Vec<Diagnostic>)> {
    let (ast, frontend) = parse_grammar(text);
    match (extract(&ast), frontend.is_empty()) {
        (Ok(grammar), true) => Ok(grammar),
        (Ok(_), false) => Err((frontend, Vec::new())),
        (Err(semantic), _) => Err((frontend, semantic)),
    }
}

pub fn load_grammar(path: &Path) -> Result<(String, Productions), GrammarFileError> {
    let text = std::fs::read_to_string(path)
        .map_err(|source| GrammarFileError::Io { path: path.to_path_buf(), source })?;
    read_grammar(&text).map_err(|(frontend, semantic)| GrammarFileError::Invalid {
        path: path.to_path_buf(),
        frontend,
        semantic,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::NodeValue;

    #[test]
    fn meta_grammar_is_ll1() {
        let table = table().unwrap();
        assert_eq!(table.axiom(), AXIOM);
        assert_eq!(
            table.get("RuleTail", &Lookahead::Literal(KEYWORD_OR.to_string())),
            Some(&Rule::epsilon()),
        );
    }

    #[test]
    fn parses_one_production_per_chain_link() {
        let (ast, errors) = parse_grammar("axiom S is \"a\" S or epsilon end\n");
        assert!(errors.is_empty());
        assert_eq!(ast.trees.len(), 1);
        let tree = &ast.trees[0];
        assert!(tree.is_complete());

        let production = &tree.children()[0];
        assert_eq!(production.children().len(), 7);
        let next = &production.children()[6];
        assert_eq!(next.value, NodeValue::Expanded(Vec::new()));
    }

    #[test]
    fn resynchronizes_after_end() {
        let text = "A is \"x\" end\nB \"y\" end\naxiom C is A end\n";
        let (ast, errors) = parse_grammar(text);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].position(), Some(Position::new(2, 3)));
        assert_eq!(ast.trees.len(), 2);
        assert!(!ast.trees[0].is_complete());
        assert!(ast.trees[1].is_complete());
        let texts: Vec<_> = ast.trees[1].tokens().iter().map(|t| t.text().to_string()).collect();
        assert_eq!(texts, vec!["axiom", "C", "is", "A", "end", ""]);
    }

    #[test]
    fn error_at_end_of_input_stops() {
        let (ast, errors) = parse_grammar("axiom S is \"a\"");
        assert_eq!(ast.trees.len(), 1);
        assert!(matches!(errors[..], [FrontendError::Syntax(ParseError::UnexpectedEndOfInput { .. })]));
    }

    #[test]
    fn lexical_errors_are_reported_and_skipped() {
        let (ast, errors) = parse_grammar("axiom S is \"a\" $ end");
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], FrontendError::Lexical(_)));
        assert!(ast.trees[0].is_complete());
    }

    #[test]
    fn meta_grammar_describes_itself() {
        let (axiom, described) = load_grammar(Path::new("example_data/meta.grammar")).unwrap();
        assert_eq!(axiom, AXIOM);
        let built = productions();
        assert_eq!(described.keys().collect::<Vec<_>>(), built.keys().collect::<Vec<_>>());
        for (name, info) in &built {
            assert_eq!(described[name].rules, info.rules, "rules of {}", name);
            assert_eq!(described[name].is_axiom, info.is_axiom);
        }
    }

    #[test]
    fn missing_file() {
        let error = load_grammar(Path::new("example_data/no_such.grammar")).unwrap_err();
        assert!(matches!(error, GrammarFileError::Io { .. }));
    }

    #[test]
    fn malformed_file_reports_every_problem() {
        let _ = env_logger::builder().is_test(true).try_init();
        let error = load_grammar(Path::new("example_data/malformed.grammar")).unwrap_err();
        let lines = error.report();
        // A lexical and a syntax error, then what the extractor finds in the
        // productions around them
        assert_eq!(lines.len(), 4);
        assert!(lines.iter().all(|line| line.starts_with("example_data/malformed.grammar")));
        assert!(lines[0].starts_with("example_data/malformed.grammar:3:6: "));
        assert!(lines[1].starts_with("example_data/malformed.grammar:2:3: "));
        assert_eq!(lines[2], "example_data/malformed.grammar:2:1: missing \"is\" in production");
        assert_eq!(lines[3], "example_data/malformed.grammar:4:1: `C` is marked as axiom but `S` already is");
    }
}
