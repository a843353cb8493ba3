//! Built-in C++ rule table
//!
//! Registration order is the overwrite order: keyword, type,
//! preprocessor, string, char, number, line comment, function name,
//! class name.

use super::highlighter::Highlighter;
use super::rules::{BlockComment, Rule};
use super::tokens::StyleTag;
use crate::error::Result;

/// C++11 through C++20 keywords plus common macro-like names
pub const KEYWORDS: &[&str] = &[
    "alignas", "alignof", "and", "and_eq", "asm", "auto", "bitand", "bitor",
    "bool", "break", "case", "catch", "char", "char8_t", "char16_t", "char32_t",
    "class", "concept", "const", "consteval", "constexpr", "constinit", "const_cast",
    "continue", "co_await", "co_return", "co_yield", "decltype", "default", "delete",
    "do", "double", "dynamic_cast", "else", "enum", "explicit", "export",
    "extern", "false", "float", "for", "friend", "goto", "if", "inline",
    "int", "long", "mutable", "namespace", "new", "noexcept", "not", "not_eq",
    "nullptr", "operator", "or", "or_eq", "private", "protected", "public",
    "reflexpr", "register", "reinterpret_cast", "requires", "return", "short",
    "signed", "sizeof", "static", "static_assert", "static_cast", "struct",
    "switch", "template", "this", "thread_local", "throw", "true", "try",
    "typedef", "typeid", "typename", "union", "unsigned", "using", "virtual",
    "void", "volatile", "wchar_t", "while", "xor", "xor_eq",
    "NULL", "override", "final",
];

/// Fixed-width integer and standard library type names
pub const TYPES: &[&str] = &[
    "int8_t", "int16_t", "int32_t", "int64_t",
    "uint8_t", "uint16_t", "uint32_t", "uint64_t",
    "size_t", "ssize_t", "ptrdiff_t", "intptr_t", "uintptr_t",
    "string", "wstring", "u16string", "u32string",
    "vector", "map", "unordered_map", "set", "unordered_set",
    "shared_ptr", "unique_ptr", "weak_ptr", "function",
];

fn word_list(words: &[&str]) -> String {
    format!(r"\b(?:{})\b", words.join("|"))
}

/// The C++ rules in priority order
///
/// Word, digit and space classes are ASCII-only; a non-ASCII letter ends a
/// word rather than extending it.
pub fn cpp_rules() -> Result<Vec<Rule>> {
    use StyleTag::*;

    let mut rules = vec![
        Rule::ascii("keyword", &word_list(KEYWORDS), Keyword)?,
        Rule::ascii("type", &word_list(TYPES), Type)?,
        Rule::ascii("directive", r"#\s*\w+", Preprocessor)?,
        Rule::ascii("include_system", r"#include\s*<[^>]*>", Preprocessor)?,
        Rule::ascii("include_local", r#"#include\s*"[^"]*""#, Preprocessor)?,
        Rule::ascii(
            "conditional",
            r"#(if|elif|else|endif|define|undef|pragma|error|warning)\b",
            Preprocessor,
        )?,
        Rule::ascii("string", r#""(?:\\.|[^"\\])*""#, String)?,
        Rule::ascii("char", r"'(?:\\(?u:.)|(?u:[^'\\]))'", Char)?,
        Rule::ascii("decimal", r"\b\d+(?:\.\d*)?(?:[eE][+-]?\d+)?[fFlL]?\b", Number)?,
        Rule::ascii("hex", r"\b0[xX][0-9a-fA-F]+(?:[uU]?[lL]{0,2}|[lL]{0,2}[uU]?)\b", Number)?,
        Rule::ascii("binary", r"\b0[bB][01]+(?:[uU]?[lL]{0,2}|[lL]{0,2}[uU]?)\b", Number)?,
        Rule::ascii("octal", r"\b0[oO]?[0-7]+(?:[uU]?[lL]{0,2}|[lL]{0,2}[uU]?)\b", Number)?,
        Rule::ascii("line_comment", r"//.*$", Comment)?,
    ];
    rules.push(Rule::ascii("function", r"\b([a-zA-Z_]\w*)\s*\(", Function)?.with_capture_group(1));
    rules.push(Rule::ascii("class", r"\b[A-Z][a-zA-Z0-9_]*\b", ClassName)?);
    Ok(rules)
}

impl Highlighter {
    /// Highlighter loaded with the built-in C++ rules and `/* */` comments
    pub fn cpp() -> Result<Self> {
        let mut highlighter = Highlighter::new(BlockComment::c_style()?);
        for rule in cpp_rules()? {
            highlighter.add_rule(rule);
        }
        Ok(highlighter)
    }
}
