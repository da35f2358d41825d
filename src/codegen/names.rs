use std::collections::BTreeSet;

// Words standing for the characters that cannot appear in an identifier
const SPECIAL_NAMES: [(char, &str); 32] = [
    ('(', "LeftParen"), (')', "RightParen"), ('[', "LeftBracket"), (']', "RightBracket"),
    ('{', "LeftBrace"), ('}', "RightBrace"), ('<', "LessThan"), ('>', "GreaterThan"),
    ('+', "Plus"), ('-', "Minus"), ('*', "Asterisk"), ('/', "Slash"),
    ('\\', "Backslash"), ('=', "Equals"), ('!', "Exclamation"), ('?', "Question"),
    ('.', "Dot"), (',', "Comma"), (':', "Colon"), (';', "Semicolon"),
    ('\'', "Prime"), ('"', "Quote"), ('#', "Hash"), ('%', "Percent"),
    ('&', "Ampersand"), ('|', "Pipe"), ('^', "Caret"), ('~', "Tilde"),
    ('@', "At"), ('$', "Dollar"), ('`', "Backquote"), (' ', "Space"),
];

/// Turns any spelling into a CamelCase identifier: special characters are
/// replaced by their name, `_` separates words.
///
/// `"("` gives `LeftParen`, `"<="` gives `LessThanEquals`, `"my_rule"`
/// gives `MyRule`.
pub fn transliterate(text: &str) -> String {
    let mut name = String::new();
    let mut capitalize = true;
    for c in text.chars() {
        if c.is_alphanumeric() {
            if capitalize {
                name.extend(c.to_uppercase());
            } else {
                name.push(c);
            }
            capitalize = false;
            continue;
        }
        capitalize = true;
        if c == '_' {
            continue;
        }
        match SPECIAL_NAMES.iter().find(|(special, _)| *special == c) {
            Some((_, word)) => name.push_str(word),
            None => name.push_str(&format!("U{:X}", c as u32)),
        }
    }
    if name.is_empty() {
        name.push_str("Underscore");
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, 'N');
    }
    name
}

/// Dictionary of names already taken in one scope of the generated code.
#[derive(Clone, Debug, Default)]
pub struct NameFixer {
    taken: BTreeSet<String>,
}

impl NameFixer {
    const RUST_KEYWORDS: [&'static str; 51] = [
        "as", "break", "const", "continue", "crate", "else", "enum", "extern", "false", "fn", "for", "if", "impl", "in",
        "let", "loop", "match", "mod", "move", "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super",
        "trait", "true", "type", "unsafe", "use", "where", "while", "async", "await", "dyn", "abstract", "become", "box",
        "do", "final", "macro", "override", "priv", "typeof", "unsized", "virtual", "yield", "try"];

    /// A dictionary pre-filled with the Rust keywords and `reserved`.
    pub fn with_reserved(reserved: &[&str]) -> Self {
        let taken = Self::RUST_KEYWORDS.iter().chain(reserved).map(|name| name.to_string()).collect();
        NameFixer { taken }
    }

    /// Returns `base`, or `base` with a number added if it is taken.
    pub fn unique(&mut self, base: String) -> String {
        self.unique_with(base, &[""])
    }

    /// Returns `base` or a numbered variant such that `base + suffix` is
    /// free for every suffix, and takes all of them.
    pub fn unique_with(&mut self, base: String, suffixes: &[&str]) -> String {
        let mut name = base.clone();
        let mut index = 0;
        while suffixes.iter().any(|suffix| self.taken.contains(&format!("{}{}", name, suffix))) {
            index += 1;
            name = base.clone();
            Self::add_number(&mut name, index);
        }
        for suffix in suffixes {
            self.taken.insert(format!("{}{}", name, suffix));
        }
        name
    }

    // `_` keeps a number apart from a name already ending with a digit
    fn add_number(name: &mut String, number: usize) {
        if name.ends_with(|c: char| c.is_ascii_digit()) {
            name.push('_');
        }
        name.push_str(&number.to_string());
    }
}
