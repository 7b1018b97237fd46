//! Semantic tokens for highlighted SQL
//!
//!     The legend is the category list in emit order. Classified tokens overlap (every keyword is
//!     also an identifier, `'top 5'` contains the identifier `top` and the number `5`), but the
//!     wire format wants one token per character. Overlaps are resolved per byte the same way the
//!     classification passes stack: the later pass wins. A string with a number inside comes out
//!     as string, number, string.

use super::positions::line_pieces;
use sqlmark_parser::sqlmark::ast::Range;
use sqlmark_parser::sqlmark::document::TextBuffer;
use sqlmark_parser::{Category, ClassifiedToken};
use tower_lsp::lsp_types::{SemanticToken, SemanticTokenType, SemanticTokensLegend};

pub fn semantic_tokens_legend() -> SemanticTokensLegend {
    SemanticTokensLegend {
        token_types: Category::EMIT_ORDER
            .iter()
            .map(|category| SemanticTokenType::new(category.as_str()))
            .collect(),
        token_modifiers: Vec::new(),
    }
}

fn token_type(category: Category) -> u32 {
    Category::EMIT_ORDER
        .iter()
        .position(|candidate| *candidate == category)
        .unwrap_or(0) as u32
}

/// Paint every token in pass order over the bytes it covers, then read back the visible runs.
///
/// Each run belongs to exactly one token, so two adjacent tokens of the same category stay
/// apart. Runs come out sorted by start and never overlap.
fn visible_runs<B: TextBuffer + ?Sized>(
    buffer: &B,
    tokens: &[ClassifiedToken],
) -> Vec<(Category, Range)> {
    let Some(first) = tokens.iter().map(|token| token.range.span.start).min() else {
        return Vec::new();
    };
    let last = tokens
        .iter()
        .map(|token| token.range.span.end)
        .max()
        .unwrap_or(first);

    let mut painting: Vec<usize> = (0..tokens.len()).collect();
    painting.sort_by_key(|&index| tokens[index].category.index());

    let mut owners: Vec<Option<usize>> = vec![None; last.saturating_sub(first)];
    for index in painting {
        let token = &tokens[index];
        if token.range.is_empty() {
            continue;
        }
        let span = token.range.span.start - first..token.range.span.end - first;
        for owner in &mut owners[span] {
            *owner = Some(index);
        }
    }

    let mut runs = Vec::new();
    let mut offset = 0;
    while offset < owners.len() {
        let Some(index) = owners[offset] else {
            offset += 1;
            continue;
        };
        let run_start = offset;
        while offset < owners.len() && owners[offset] == Some(index) {
            offset += 1;
        }
        runs.push((
            tokens[index].category,
            buffer.range_for(first + run_start, first + offset),
        ));
    }
    runs
}

pub fn encode_semantic_tokens<B: TextBuffer + ?Sized>(
    buffer: &B,
    tokens: &[ClassifiedToken],
) -> Vec<SemanticToken> {
    let mut data = Vec::new();
    let mut prev_line = 0u32;
    let mut prev_start = 0u32;

    for (category, range) in visible_runs(buffer, tokens) {
        let token_type = token_type(category);
        for (line, start, length) in line_pieces(buffer, &range) {
            let delta_line = line.saturating_sub(prev_line);
            let delta_start = if delta_line == 0 {
                start.saturating_sub(prev_start)
            } else {
                start
            };
            data.push(SemanticToken {
                delta_line,
                delta_start,
                length,
                token_type,
                token_modifiers_bitset: 0,
            });
            prev_line = line;
            prev_start = start;
        }
    }

    data
}
