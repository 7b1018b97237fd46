//! End-to-end highlighting scenarios over small C# documents.

use sqlmark_parser::sqlmark::document::{SourceDocument, TextBuffer};
use sqlmark_parser::sqlmark::regions::find_regions;
use sqlmark_parser::{highlight, Category, Highlights};

fn wrap(body: &str) -> String {
    format!("// sql begin\n{body}\n// sql end\n")
}

fn texts(doc: &SourceDocument, highlights: &Highlights, category: Category) -> Vec<String> {
    highlights
        .ranges(category)
        .iter()
        .map(|range| doc.text(range).to_string())
        .collect()
}

fn render(doc: &SourceDocument, highlights: &Highlights) -> String {
    highlights
        .tokens()
        .iter()
        .map(|token| format!("{} {} {}", token.category, token.range, doc.text(&token.range)))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn plain_literal_with_parameter() {
    let doc = SourceDocument::new(wrap(
        r#"var q = @"SELECT id FROM Users WHERE @minAge < age";"#,
    ));
    let highlights = highlight(&doc);

    insta::assert_snapshot!(render(&doc, &highlights), @r"
    identifier 1:10..1:16 SELECT
    identifier 1:17..1:19 id
    identifier 1:20..1:24 FROM
    identifier 1:25..1:30 Users
    identifier 1:31..1:36 WHERE
    identifier 1:38..1:44 minAge
    identifier 1:47..1:50 age
    keyword 1:10..1:16 SELECT
    keyword 1:20..1:24 FROM
    keyword 1:31..1:36 WHERE
    parameter 1:37..1:44 @minAge
    ");
    assert!(highlights.ranges(Category::String).is_empty());
    assert!(highlights.ranges(Category::Number).is_empty());
}

#[test]
fn interpolated_literal_is_split_around_holes() {
    let doc = SourceDocument::new(wrap(
        r#"var q = $@"SELECT * FROM T WHERE id = {id} AND name = '{name}'";"#,
    ));
    let highlights = highlight(&doc);

    let segments: Vec<&str> = highlights
        .segments()
        .iter()
        .map(|segment| doc.text(&segment.range))
        .collect();
    assert_eq!(segments, vec!["SELECT * FROM T WHERE id = ", " AND name = '", "'"]);
    assert_eq!(
        texts(&doc, &highlights, Category::Keyword),
        vec!["SELECT", "FROM", "WHERE", "AND"]
    );
    assert!(highlights.ranges(Category::String).is_empty());
    // `{id}` and `{name}` are C# holes and stay unclassified
    assert_eq!(
        texts(&doc, &highlights, Category::Identifier),
        vec!["SELECT", "FROM", "T", "WHERE", "id", "AND", "name"]
    );
}

#[test]
fn quote_bounded_segment_still_gets_numbers_and_keywords() {
    let doc = SourceDocument::new(wrap(
        r#"var q = $@"SELECT {a}' OR 1 = 1 OR '{b}";"#,
    ));
    let highlights = highlight(&doc);

    assert!(highlights.ranges(Category::String).is_empty());
    assert_eq!(texts(&doc, &highlights, Category::Number), vec!["1", "1"]);
    assert_eq!(
        texts(&doc, &highlights, Category::Keyword),
        vec!["SELECT", "OR", "OR"]
    );
}

#[test]
fn literal_value_collapses_doubled_quotes() {
    let doc = SourceDocument::new(wrap(
        "var q = @\"SELECT \"\"Order\"\"\n  FROM \"\"Sales\"\".\"\"Orders\"\"\";",
    ));
    let highlights = highlight(&doc);

    assert_eq!(highlights.literals().len(), 1);
    assert_eq!(
        highlights.literals()[0].value(&doc),
        "SELECT \"Order\"\n  FROM \"Sales\".\"Orders\""
    );
}

#[test]
fn quoted_brace_in_hole_does_not_close_it() {
    let doc = SourceDocument::new(wrap(
        r#"var q = $@"SELECT a FROM T WHERE b = {Lookup('}')} AND c = 2";"#,
    ));
    let highlights = highlight(&doc);

    let segments: Vec<&str> = highlights
        .segments()
        .iter()
        .map(|segment| doc.text(&segment.range))
        .collect();
    assert_eq!(segments, vec!["SELECT a FROM T WHERE b = ", " AND c = 2"]);
    assert!(!texts(&doc, &highlights, Category::Identifier).contains(&"Lookup".to_string()));
}

#[test]
fn escaped_braces_stay_in_segment_text() {
    let doc = SourceDocument::new(wrap(
        r#"var q = $@"SELECT '{{x}}' AS Raw FROM T WHERE id = {id}";"#,
    ));
    let highlights = highlight(&doc);

    assert_eq!(highlights.segments().len(), 1);
    assert_eq!(
        doc.text(&highlights.segments()[0].range),
        "SELECT '{{x}}' AS Raw FROM T WHERE id = "
    );
    assert_eq!(texts(&doc, &highlights, Category::String), vec!["'{{x}}'"]);
}

#[test]
fn keyword_case_does_not_matter() {
    let doc = SourceDocument::new(wrap(r#"var q = @"select a Select b SELECT c";"#));
    let highlights = highlight(&doc);

    assert_eq!(
        texts(&doc, &highlights, Category::Keyword),
        vec!["select", "Select", "SELECT"]
    );
}

#[test]
fn missing_end_marker_produces_nothing() {
    let doc = SourceDocument::new("// sql begin\nvar q = @\"SELECT 1 FROM T\";\n");
    let highlights = highlight(&doc);

    assert!(highlights.regions().is_empty());
    assert!(highlights.segments().is_empty());
    assert!(highlights.is_empty());
}

#[test]
fn unterminated_literal_produces_no_segments() {
    let doc = SourceDocument::new(wrap("var q = @\"SELECT 1\nFROM T;"));
    let highlights = highlight(&doc);

    assert_eq!(highlights.regions().len(), 1);
    assert!(highlights.literals().is_empty());
    assert!(highlights.segments().is_empty());
    assert!(highlights.is_empty());
}

#[test]
fn malformed_region_does_not_affect_later_regions() {
    let source = format!(
        "{}{}",
        wrap("var broken = @\"SELECT 1"),
        wrap(r#"var ok = @"SELECT 2";"#)
    );
    let doc = SourceDocument::new(source);
    let highlights = highlight(&doc);

    assert_eq!(find_regions(&doc).len(), 2);
    assert_eq!(texts(&doc, &highlights, Category::Number), vec!["2"]);
}

#[test]
fn multiline_tokens_keep_document_positions() {
    let doc = SourceDocument::new(wrap("var q = @\"\n    SELECT 1\n    FROM T\";"));
    let highlights = highlight(&doc);

    let from = highlights.ranges(Category::Keyword)[1].clone();
    assert_eq!(doc.text(&from), "FROM");
    assert_eq!(from.start.line, 3);
    assert_eq!(from.start.column, 4);
    assert_eq!(doc.line(from.start.line), "    FROM T\";");
}

#[test]
fn highlights_serialize_for_adapters() {
    let doc = SourceDocument::new(wrap(r#"var q = @"SELECT 1";"#));
    let value = serde_json::to_value(highlight(&doc)).unwrap();

    assert_eq!(value["regions"][0]["begin_line"], 0);
    assert_eq!(value["literals"][0]["kind"], "verbatim");
    assert_eq!(value["tokens"][1]["category"], "keyword");
}
