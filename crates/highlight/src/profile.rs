//! Syntax profile registry.
//!
//! A small fixed table matched against the open filename; profiles are
//! immutable and selected once per open or save.

/// Highlighting rules for one file type.
#[derive(Debug)]
pub struct SyntaxProfile {
    /// File-type name shown in the status bar
    pub name: &'static str,
    /// Filename patterns: a leading '.' matches an extension,
    /// anything else matches as a substring
    pub patterns: &'static [&'static str],
    /// Primary keywords
    pub keywords: &'static [&'static str],
    /// Secondary keywords (type names)
    pub types: &'static [&'static str],
    /// Single-line comment marker
    pub line_comment: Option<&'static str>,
    /// Block comment start/end markers
    pub block_comment: Option<(&'static str, &'static str)>,
    pub highlight_numbers: bool,
    pub highlight_strings: bool,
}

/// The built-in file-type table.
pub static PROFILES: &[SyntaxProfile] = &[
    SyntaxProfile {
        name: "c",
        patterns: &[".c", ".h", ".cpp", ".hpp", ".cc"],
        keywords: &[
            "switch", "if", "while", "for", "break", "continue", "return", "else", "struct",
            "union", "typedef", "static", "enum", "class", "case", "sizeof", "const", "do",
            "goto", "default",
        ],
        types: &[
            "int", "long", "double", "float", "char", "unsigned", "signed", "void", "short",
            "size_t",
        ],
        line_comment: Some("//"),
        block_comment: Some(("/*", "*/")),
        highlight_numbers: true,
        highlight_strings: true,
    },
    SyntaxProfile {
        name: "rust",
        patterns: &[".rs"],
        keywords: &[
            "fn", "let", "mut", "pub", "use", "mod", "impl", "trait", "struct", "enum", "match",
            "if", "else", "while", "for", "loop", "return", "break", "continue", "const",
            "static", "unsafe", "where", "move", "ref", "in", "as", "dyn", "crate", "self",
            "super", "type",
        ],
        types: &[
            "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64", "u128",
            "usize", "f32", "f64", "bool", "char", "str", "String", "Vec", "Option", "Result",
            "Box", "Self",
        ],
        line_comment: Some("//"),
        block_comment: Some(("/*", "*/")),
        highlight_numbers: true,
        highlight_strings: true,
    },
];

/// Find the profile matching a filename, if any.
pub fn select_profile(filename: &str) -> Option<&'static SyntaxProfile> {
    PROFILES.iter().find(|profile| {
        profile.patterns.iter().any(|pattern| {
            if let Some(ext) = pattern.strip_prefix('.') {
                // Extension match: require the dot so "main.c" matches
                // ".c" but "basic" does not.
                filename
                    .rsplit_once('.')
                    .is_some_and(|(_, file_ext)| file_ext == ext)
            } else {
                filename.contains(pattern)
            }
        })
    })
}
