//! Fixed SQL vocabularies and the regex pattern behind each category.
//!
//! Every pattern runs with Unicode disabled: `\b` is an ASCII word boundary and `(?i)` folds
//! ASCII letters only, so `naïve` splits into `na` and `ve`.

use super::Category;

/// Clause and operator keywords, matched case-insensitively.
pub const KEYWORDS: &[&str] = &[
    "SELECT", "FROM", "WHERE", "AND", "OR", "JOIN", "INNER", "LEFT", "RIGHT", "FULL", "OUTER",
    "ON", "GROUP", "BY", "HAVING", "ORDER", "INSERT", "INTO", "VALUES", "UPDATE", "SET", "DELETE",
    "CREATE", "ALTER", "DROP", "UNION", "ALL", "DISTINCT", "TOP", "LIMIT", "OFFSET", "CASE",
    "WHEN", "THEN", "ELSE", "END", "AS", "IS", "NOT", "NULL", "LIKE", "IN", "EXISTS", "WITH",
    "CROSS", "APPLY", "BETWEEN",
];

/// Scalar and aggregate function names, matched case-insensitively.
pub const FUNCTIONS: &[&str] = &[
    "COUNT", "SUM", "AVG", "MIN", "MAX", "UPPER", "LOWER", "COALESCE", "NVL", "LEN", "SUBSTRING",
    "ROUND", "CAST", "CONVERT",
];

pub const BOOLEANS: &[&str] = &["true", "false"];

fn word_alternation(words: &[&str]) -> String {
    format!(r"(?i-u)\b(?:{})\b", words.join("|"))
}

/// Regex source for a category's matcher.
pub fn pattern_for(category: Category) -> String {
    match category {
        // Dotted names group into one match: `u.name`, `dbo.Users.Id`
        Category::Identifier => {
            r"(?-u)\b[a-zA-Z_][a-zA-Z0-9_]*(?:\.[a-zA-Z_][a-zA-Z0-9_]*)*\b".to_string()
        }
        Category::Keyword => word_alternation(KEYWORDS),
        Category::Function => word_alternation(FUNCTIONS),
        Category::Boolean => word_alternation(BOOLEANS),
        Category::Parameter => r"(?-u)@[A-Za-z_][A-Za-z0-9_]*".to_string(),
        // `''` is an escaped quote; the match stops at the first lone quote
        Category::String => r"(?-u)'(?:''|[^'])*'".to_string(),
        Category::Number => r"(?-u)\b[0-9]+(?:\.[0-9]+)?\b".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vocabularies_are_disjoint() {
        for function in FUNCTIONS {
            assert!(!KEYWORDS.contains(function), "{function} is also a keyword");
        }
        for boolean in BOOLEANS {
            assert!(!KEYWORDS.iter().any(|k| k.eq_ignore_ascii_case(boolean)));
        }
    }

    #[test]
    fn every_pattern_compiles() {
        for category in Category::ALL {
            assert!(regex::bytes::Regex::new(&pattern_for(category)).is_ok());
        }
    }
}
