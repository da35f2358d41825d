/*
    This module turns an LL(1) table into the source of a parser that
    performs the table lookups as compiled match statements
*/

mod names;
pub mod printer;
#[cfg(test)]
#[allow(dead_code)]
mod statement_parser;
pub mod syntax;

use std::collections::BTreeMap;

use itertools::Itertools;

use crate::grammar::*;
use names::{transliterate, NameFixer};
use printer::{literal, render};
use syntax::*;

// Everything the generated code imports from the runtime
const RUNTIME_NAMES: [&str; 11] = [
    "drive", "Arena", "Expansion", "LexError", "NodeId", "ParseError", "Position", "Token", "TokenKind", "Tree", "TreeNode",
];
const NODE_ENUM: &str = "Node";

#[derive(Debug, Clone, PartialEq)]
pub struct CodegenOptions {
    /// Module path the generated code imports the runtime from.
    pub runtime_path: String,
    /// Whether to copy the rendered table into the header comment.
    pub embed_table: bool,
    /// Module documentation placed at the top of the file.
    pub module_doc: Option<String>,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        CodegenOptions {
            runtime_path: "lligator::runtime".to_string(),
            embed_table: true,
            module_doc: None,
        }
    }
}

/// Generates the source of a parser for `table`. The table is trusted: it
/// must come out of a successful synthesis.
pub fn generate(table: &Ll1Table, productions: &Productions, options: &CodegenOptions) -> String {
    let generator = Generator::new(table, productions);
    let items = generator.items(options);
    log::debug!(
        "generated {} declarations for {} non-terminal(s) and {} terminal(s)",
        items.len(),
        generator.nonterminals.len(),
        generator.leaves.len(),
    );
    render(&items)
}

struct NonTerminal {
    name: String,
    stem: String,
    // Every rule with its variant in the rule enum
    variants: Vec<(Rule, String)>,
}

struct Generator<'a> {
    table: &'a Ll1Table,
    // Variant of `Node` for every grammar symbol
    stems: BTreeMap<GrammarSymbol, String>,
    nonterminals: Vec<NonTerminal>,
    leaves: Vec<GrammarSymbol>,
}

fn child_ids(count: usize) -> Vec<String> {
    (0..count).map(|index| format!("c{}", index)).collect()
}

// Pattern and guard matching a token kind against one lookahead
fn token_pattern(lookahead: &Lookahead) -> (String, Option<String>) {
    match lookahead {
        Lookahead::Literal(spelling) => {
            ("TokenKind::Keyword(keyword)".to_string(), Some(format!("keyword == {}", literal(spelling))))
        }
        lookahead if lookahead.is_end_of_input() => ("TokenKind::EndOfInput".to_string(), None),
        Lookahead::Domain(domain) => {
            ("TokenKind::Item { domain, .. }".to_string(), Some(format!("domain == {}", literal(domain))))
        }
    }
}

fn token_arm(lookahead: &Lookahead, body: Vec<Statement>) -> Arm {
    match token_pattern(lookahead) {
        (pattern, Some(guard)) => Arm::guarded(pattern, guard, Expr::Block(body)),
        (pattern, None) => Arm::new(pattern, Expr::Block(body)),
    }
}

impl<'a> Generator<'a> {
    fn new(table: &'a Ll1Table, productions: &Productions) -> Self {
        let mut fixer = NameFixer::with_reserved(&RUNTIME_NAMES);
        fixer.unique(NODE_ENUM.to_string());

        let mut stems = BTreeMap::new();
        for name in table.nonterminals() {
            let stem = fixer.unique_with(transliterate(name), &["", "Node", "Rule"]);
            stems.insert(GrammarSymbol::nonterminal(name), stem);
        }
        let leaves: Vec<GrammarSymbol> = table.columns().map(Lookahead::to_symbol).collect();
        for leaf in &leaves {
            let base = match leaf {
                GrammarSymbol::Terminal(spelling) => format!("Keyword{}", transliterate(spelling)),
                GrammarSymbol::TokenClass(domain) => transliterate(domain),
                other => transliterate(&other.to_string()),
            };
            stems.insert(leaf.clone(), fixer.unique_with(base, &["", "Node"]));
        }

        let mut generator = Generator { table, stems, nonterminals: Vec::new(), leaves };
        for name in table.nonterminals() {
            let mut rules = productions.get(name).map(|info| info.rules.clone()).unwrap_or_default();
            for rule in table.row(name).into_iter().flat_map(|row| row.values()) {
                if !rules.contains(rule) {
                    rules.push(rule.clone());
                }
            }

            let mut variant_fixer = NameFixer::with_reserved(&[]);
            let variants = rules.into_iter()
                .map(|rule| {
                    let base = generator.variant_base(&rule);
                    let variant = variant_fixer.unique(base);
                    (rule, variant)
                })
                .collect();
            let stem = generator.stem(&GrammarSymbol::nonterminal(name));
            generator.nonterminals.push(NonTerminal { name: name.to_string(), stem, variants });
        }
        generator
    }

    fn stem(&self, symbol: &GrammarSymbol) -> String {
        match self.stems.get(symbol) {
            Some(stem) => stem.clone(),
            None => transliterate(&symbol.to_string()),
        }
    }

    fn variant_base(&self, rule: &Rule) -> String {
        if rule.is_epsilon() {
            return "Empty".to_string();
        }
        rule.symbols().iter()
            .map(|symbol| match symbol {
                GrammarSymbol::NonTerminal(_) | GrammarSymbol::TokenClass(_) => self.stem(symbol),
                GrammarSymbol::Terminal(spelling) => transliterate(spelling),
                GrammarSymbol::Epsilon => "Empty".to_string(),
            })
            .collect()
    }

    fn variant_of<'n>(&self, nonterminal: &'n NonTerminal, rule: &Rule) -> Option<&'n str> {
        nonterminal.variants.iter()
            .find(|(candidate, _)| candidate == rule)
            .map(|(_, variant)| variant.as_str())
    }

    fn symbols(&self) -> impl Iterator<Item = (GrammarSymbol, &str)> + '_ {
        let nonterminals = self.nonterminals.iter()
            .map(|nonterminal| (GrammarSymbol::nonterminal(&nonterminal.name), nonterminal.stem.as_str()));
        let leaves = self.leaves.iter()
            .map(|leaf| (leaf.clone(), self.stems.get(leaf).map(String::as_str).unwrap_or_default()));
        nonterminals.chain(leaves)
    }

    fn items(&self, options: &CodegenOptions) -> Vec<Item> {
        let mut items = Vec::new();
        if let Some(doc) = &options.module_doc {
            items.push(Item::InnerDoc(doc.lines().map(String::from).collect()));
        }

        let mut header = vec![
            format!("Parser for the grammar with axiom `{}`, generated by lligator.", self.table.axiom()),
            "Do not edit by hand.".to_string(),
        ];
        if options.embed_table {
            header.push(String::new());
            header.extend(self.table.to_string().lines().map(String::from));
        }
        items.push(Item::Comment(header));
        items.push(Item::Use {
            path: options.runtime_path.clone(),
            names: RUNTIME_NAMES.iter().map(|name| name.to_string()).collect(),
        });

        items.push(Item::Enum(Enum {
            doc: Some("A node of the parse tree, one variant per grammar symbol.".to_string()),
            derives: vec!["Debug", "Clone", "PartialEq"],
            name: NODE_ENUM.to_string(),
            variants: self.symbols()
                .map(|(_, stem)| Variant { name: stem.to_string(), fields: vec![format!("{}Node", stem)] })
                .collect(),
        }));

        for nonterminal in &self.nonterminals {
            items.push(Item::Struct(Struct {
                doc: Some(format!("Non-terminal `{}`.", nonterminal.name)),
                derives: vec!["Debug", "Clone", "Default", "PartialEq"],
                name: format!("{}Node", nonterminal.stem),
                fields: vec![
                    ("value".to_string(), format!("Option<{}Rule>", nonterminal.stem)),
                    ("position".to_string(), "Option<Position>".to_string()),
                ],
            }));
            items.push(Item::Enum(Enum {
                doc: Some(format!("Rules of `{}`.", nonterminal.name)),
                derives: vec!["Debug", "Clone", "Copy", "PartialEq"],
                name: format!("{}Rule", nonterminal.stem),
                variants: nonterminal.variants.iter()
                    .map(|(rule, variant)| Variant {
                        name: variant.clone(),
                        fields: vec!["NodeId".to_string(); rule.symbols().len()],
                    })
                    .collect(),
            }));
        }

        for leaf in &self.leaves {
            items.push(Item::Struct(Struct {
                doc: Some(format!("Terminal `{}`.", leaf)),
                derives: vec!["Debug", "Clone", "Default", "PartialEq"],
                name: format!("{}Node", self.stem(leaf)),
                fields: vec![
                    ("value".to_string(), "Option<Token>".to_string()),
                    ("position".to_string(), "Option<Position>".to_string()),
                ],
            }));
        }

        items.push(self.tree_node_impl());
        items.push(Item::Function(self.expand_function()));
        items.push(Item::Function(self.parse_function()));
        items
    }

    fn method(signature: &str, returns: &str, arms: Vec<Arm>) -> Function {
        Function {
            doc: None,
            public: false,
            signature: signature.to_string(),
            returns: Some(returns.to_string()),
            bounds: Vec::new(),
            body: vec![Statement::Tail(Expr::Match(Match { scrutinee: "self".to_string(), arms }))],
        }
    }

    fn tree_node_impl(&self) -> Item {
        let label = self.symbols()
            .map(|(symbol, stem)| Arm::new(format!("Node::{}(_)", stem), Expr::text(literal(&symbol.to_string()))))
            .collect();

        let mut children: Vec<Arm> = self.nonterminals.iter()
            .filter(|nonterminal| nonterminal.variants.iter().any(|(rule, _)| !rule.is_epsilon()))
            .map(|nonterminal| {
                let mut arms: Vec<Arm> = nonterminal.variants.iter()
                    .filter(|(rule, _)| !rule.is_epsilon())
                    .map(|(rule, variant)| {
                        let ids = child_ids(rule.symbols().len()).join(", ");
                        Arm::new(
                            format!("Some({}Rule::{}({}))", nonterminal.stem, variant, ids),
                            Expr::text(format!("vec![{}]", ids)),
                        )
                    })
                    .collect();
                arms.push(Arm::new("_", Expr::text("Vec::new()")));
                Arm::new(
                    format!("Node::{}(node)", nonterminal.stem),
                    Expr::Match(Match { scrutinee: "node.value".to_string(), arms }),
                )
            })
            .collect();
        children.push(Arm::new("_", Expr::text("Vec::new()")));

        let mut token: Vec<Arm> = self.leaves.iter()
            .map(|leaf| Arm::new(format!("Node::{}(node)", self.stem(leaf)), Expr::text("node.value.as_ref()")))
            .collect();
        token.push(Arm::new("_", Expr::text("None")));

        let position = self.symbols()
            .map(|(_, stem)| Arm::new(format!("Node::{}(node)", stem), Expr::text("node.position")))
            .collect();
        let pending = self.symbols()
            .map(|(_, stem)| Arm::new(format!("Node::{}(node)", stem), Expr::text("node.value.is_none()")))
            .collect();

        Item::Impl {
            trait_name: Some("TreeNode".to_string()),
            target: NODE_ENUM.to_string(),
            functions: vec![
                Self::method("label(&self)", "&str", label),
                Self::method("children(&self)", "Vec<NodeId>", children),
                Self::method("token(&self)", "Option<&Token>", token),
                Self::method("position(&self)", "Option<Position>", position),
                Self::method("is_pending(&self)", "bool", pending),
            ],
        }
    }

    // Builds the children of `rule` and records them in the current node
    fn expansion_body(&self, nonterminal: &NonTerminal, rule: &Rule) -> Vec<Statement> {
        let variant = self.variant_of(nonterminal, rule).unwrap_or("Empty");
        let ids = child_ids(rule.symbols().len());
        let mut body: Vec<Statement> = rule.symbols().iter()
            .zip(&ids)
            .map(|(symbol, id)| {
                let stem = self.stem(symbol);
                Statement::Let { name: id.clone(), value: Expr::text(format!("arena.alloc(Node::{}({}Node::default()))", stem, stem)) }
            })
            .collect();

        let value = if ids.is_empty() {
            format!("{}Rule::{}", nonterminal.stem, variant)
        } else {
            format!("{}Rule::{}({})", nonterminal.stem, variant, ids.join(", "))
        };
        body.push(Statement::Semi(Expr::text(format!(
            "arena[current] = Node::{}({}Node {{ value: Some({}), position }})",
            nonterminal.stem, nonterminal.stem, value,
        ))));
        body.push(Statement::Tail(Expr::text(if ids.is_empty() {
            "Expansion::Children(Vec::new())".to_string()
        } else {
            format!("Expansion::Children(vec![{}])", ids.join(", "))
        })));
        body
    }

    fn nonterminal_arm(&self, nonterminal: &NonTerminal) -> Arm {
        let mut arms: Vec<Arm> = self.table.row(&nonterminal.name).into_iter()
            .flatten()
            .map(|(lookahead, rule)| token_arm(lookahead, self.expansion_body(nonterminal, rule)))
            .collect();

        let expected = self.table.expected(&nonterminal.name).iter().join(", ");
        arms.push(Arm::new("_", Expr::text(format!(
            "Expansion::Error(format!(\"unexpected {{}} while reading {{}}, expected one of: {{}}\", token, {}, {}))",
            literal(&format!("`{}`", nonterminal.name)),
            literal(&expected),
        ))));

        Arm::new(
            format!("Node::{}(_)", nonterminal.stem),
            Expr::Match(Match { scrutinee: "&token.kind".to_string(), arms }),
        )
    }

    fn leaf_arm(&self, leaf: &GrammarSymbol) -> Arm {
        let stem = self.stem(leaf);
        let mut arms = Vec::new();
        if let Some(lookahead) = Lookahead::of(leaf) {
            arms.push(token_arm(&lookahead, vec![
                Statement::Semi(Expr::text(format!(
                    "arena[current] = Node::{}({}Node {{ value: Some(token.clone()), position }})",
                    stem, stem,
                ))),
                Statement::Tail(Expr::text("Expansion::Consumed")),
            ]));
        }
        arms.push(Arm::new("_", Expr::text(format!(
            "Expansion::Error(format!(\"expected {{}}, found {{}}\", {}, token))",
            literal(&leaf.to_string()),
        ))));

        Arm::new(format!("Node::{}(_)", stem), Expr::Match(Match { scrutinee: "&token.kind".to_string(), arms }))
    }

    fn expand_function(&self) -> Function {
        let arms = self.nonterminals.iter()
            .map(|nonterminal| self.nonterminal_arm(nonterminal))
            .chain(self.leaves.iter().map(|leaf| self.leaf_arm(leaf)))
            .collect();

        Function {
            doc: Some("Expands the non-terminal or matches the terminal `current` against `token`.".to_string()),
            public: true,
            signature: "expand(arena: &mut Arena<Node>, current: NodeId, token: &Token)".to_string(),
            returns: Some("Expansion".to_string()),
            bounds: Vec::new(),
            body: vec![
                Statement::Let { name: "position".to_string(), value: Expr::text("Some(token.span.start)") },
                Statement::Tail(Expr::Match(Match { scrutinee: "arena[current]".to_string(), arms })),
            ],
        }
    }

    fn parse_function(&self) -> Function {
        let init = self.stem(&GrammarSymbol::nonterminal(self.table.start()));
        Function {
            doc: Some("Parses a whole token stream.".to_string()),
            public: true,
            signature: "parse<I>(tokens: I)".to_string(),
            returns: Some("Result<Tree<Node>, ParseError>".to_string()),
            bounds: vec!["I: IntoIterator<Item = Result<Token, LexError>>".to_string()],
            body: vec![
                Statement::Let { name: "mut arena".to_string(), value: Expr::text("Arena::new()") },
                Statement::Let {
                    name: "root".to_string(),
                    value: Expr::text(format!("arena.alloc(Node::{}({}Node::default()))", init, init)),
                },
                Statement::Semi(Expr::text("drive(&mut arena, root, tokens, expand)?")),
                Statement::Tail(Expr::text("Ok(Tree { arena, root })")),
            ],
        }
    }
}
