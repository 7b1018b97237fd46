//! Highlighting pass
//!
//!     Region Finder -> String Extractor -> Interpolation Splitter -> Tokenizer -> buckets.
//!
//!     Data only flows forward. A pass is synchronous and rebuilt from scratch every time; the
//!     result is a plain value the adapters hand to whatever styles the text.

use super::ast::{MarkedRegion, Range, SqlSegment, StringLiteralSpan};
use super::document::TextBuffer;
use super::extraction::extract_literals;
use super::interpolation::segments_for;
use super::regions::find_regions;
use super::tokenizing::{tokenize_segment, Category, ClassifiedToken};
use serde::Serialize;

/// Everything one highlighting pass found.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Highlights {
    regions: Vec<MarkedRegion>,
    literals: Vec<StringLiteralSpan>,
    segments: Vec<SqlSegment>,
    tokens: Vec<ClassifiedToken>,
    #[serde(skip)]
    buckets: [Vec<Range>; 7],
}

impl Highlights {
    pub fn regions(&self) -> &[MarkedRegion] {
        &self.regions
    }

    pub fn literals(&self) -> &[StringLiteralSpan] {
        &self.literals
    }

    pub fn segments(&self) -> &[SqlSegment] {
        &self.segments
    }

    /// All classified tokens, segment by segment, each segment in pass order.
    pub fn tokens(&self) -> &[ClassifiedToken] {
        &self.tokens
    }

    /// Every range of one category, in document order.
    pub fn ranges(&self, category: Category) -> &[Range] {
        &self.buckets[category.index()]
    }

    /// Category sets in the order the styling sink expects them. Empty sets are included so
    /// that a sink replacing whole sets also clears stale ranges.
    pub fn by_category(&self) -> impl Iterator<Item = (Category, &[Range])> + '_ {
        Category::EMIT_ORDER
            .iter()
            .map(move |&category| (category, self.ranges(category)))
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    fn push_token(&mut self, token: ClassifiedToken) {
        self.buckets[token.category.index()].push(token.range.clone());
        self.tokens.push(token);
    }
}

/// Run a full highlighting pass over a buffer.
pub fn highlight<B: TextBuffer + ?Sized>(buffer: &B) -> Highlights {
    let mut highlights = Highlights {
        regions: find_regions(buffer),
        ..Highlights::default()
    };

    for region in &highlights.regions {
        for literal in extract_literals(buffer, region) {
            let index = highlights.literals.len();
            highlights
                .segments
                .extend(segments_for(buffer, &literal, index));
            highlights.literals.push(literal);
        }
    }

    for index in 0..highlights.segments.len() {
        let tokens = tokenize_segment(buffer, &highlights.segments[index]);
        for token in tokens {
            highlights.push_token(token);
        }
    }

    tracing::debug!(
        regions = highlights.regions.len(),
        literals = highlights.literals.len(),
        segments = highlights.segments.len(),
        tokens = highlights.tokens.len(),
        "highlight pass complete"
    );

    highlights
}
