//! Integration tests for ranked search over loaded tables.

use ftsmachine::document::Row;
use ftsmachine::error::{FtsError, Result};
use ftsmachine::index::FtsTable;
use ftsmachine::query::{MatchType, SearchQuery};
use ftsmachine::schema::{Segmentation, StemmerKind, TokenizerConfig};

fn row(title: &str, body: &str) -> Row {
    vec![title.into(), body.into()]
}

fn scenario_table() -> Result<FtsTable> {
    let config = TokenizerConfig::new(StemmerKind::Porter, Segmentation::UnicodeWord);
    let mut table = FtsTable::create_index(["title", "body"], config)?;
    table.load(vec![
        row("fox jumps", "over the lazy dog"),
        row("bar none", "the fox ran"),
        row("foobar", "nothing here"),
    ])?;
    Ok(table)
}

#[test]
fn test_body_search_excludes_non_matching_documents() -> Result<()> {
    let table = scenario_table()?;

    // Document 0 mentions the fox only in its title.
    let results = table.search("fox", "body", MatchType::TokenMatch, 5)?;
    assert_eq!(results.doc_ids(), vec![1]);
    assert_eq!(results.total_hits, 1);

    // One occurrence in a three-token body whose length equals the column
    // average: ln(1 + 2.5 / 1.5) * 1 / (1 + 1.2).
    let expected = (8.0f32 / 3.0).ln() / 2.2;
    assert!((results.hits[0].score - expected).abs() < 1e-6);
    assert_eq!(
        results.hits[0].document.get("body").and_then(|v| v.as_text()),
        Some("the fox ran")
    );

    Ok(())
}

#[test]
fn test_all_columns_search() -> Result<()> {
    let table = scenario_table()?;

    let results = table.execute(&SearchQuery::all_columns("fox"))?;
    let mut ids = results.doc_ids();
    assert_eq!(ids.len(), 2);
    ids.sort_unstable();
    assert_eq!(ids, vec![0, 1]);

    // Every token must occur somewhere in the row.
    let results = table.execute(&SearchQuery::all_columns("fox dog"))?;
    assert_eq!(results.doc_ids(), vec![0]);

    Ok(())
}

#[test]
fn test_stemmed_query_terms() -> Result<()> {
    let table = scenario_table()?;

    let results = table.search("jumping", "title", MatchType::TokenMatch, 5)?;
    assert_eq!(results.doc_ids(), vec![0]);

    let results = table.search("DOGS", "body", MatchType::TokenMatch, 5)?;
    assert_eq!(results.doc_ids(), vec![0]);

    Ok(())
}

#[test]
fn test_unique_term_ranks_its_document_first() -> Result<()> {
    let table = scenario_table()?;

    for (term, column, expected) in [
        ("foobar", "title", 2),
        ("lazy", "body", 0),
        ("none", "title", 1),
    ] {
        let results = table.search(term, column, MatchType::TokenMatch, 1)?;
        assert_eq!(results.doc_ids(), vec![expected], "term {term}");
    }

    Ok(())
}

#[test]
fn test_scores_are_non_increasing_with_ties_by_doc_id() -> Result<()> {
    let mut table = FtsTable::create_index(["body"], TokenizerConfig::default())?;
    table.load(vec![
        vec!["alpha beta".into()],
        vec!["alpha alpha alpha beta gamma delta".into()],
        vec!["beta alpha".into()],
        vec!["alpha".into()],
        vec!["gamma".into()],
    ])?;

    let results = table.search("alpha", "body", MatchType::TokenMatch, 10)?;
    assert_eq!(results.total_hits, 4);

    let scores: Vec<f32> = results.hits.iter().map(|hit| hit.score).collect();
    assert!(scores.windows(2).all(|pair| pair[0] >= pair[1]));

    // Documents 0 and 2 have the same length and frequency.
    let ids = results.doc_ids();
    let first = ids.iter().position(|&id| id == 0).unwrap();
    let second = ids.iter().position(|&id| id == 2).unwrap();
    assert_eq!(second, first + 1);
    assert_eq!(results.hits[first].score, results.hits[second].score);

    Ok(())
}

#[test]
fn test_limit_bounds_result_length() -> Result<()> {
    let mut table = FtsTable::create_index(["body"], TokenizerConfig::default())?;
    table.load((0..20).map(|i| vec![format!("common word {i}").into()]))?;

    for limit in [1, 5, 19, 20, 50] {
        let results = table.search("common", "body", MatchType::TokenMatch, limit)?;
        assert_eq!(results.len(), limit.min(20));
        assert_eq!(results.total_hits, 20);
    }

    // Equal scores: the first inserted documents win.
    let results = table.search("common", "body", MatchType::TokenMatch, 3)?;
    assert_eq!(results.doc_ids(), vec![0, 1, 2]);

    assert!(matches!(
        table.search("common", "body", MatchType::TokenMatch, 0),
        Err(FtsError::Query(_))
    ));

    Ok(())
}

#[test]
fn test_default_limit_is_five() -> Result<()> {
    let mut table = FtsTable::create_index(["body"], TokenizerConfig::default())?;
    table.load((0..8).map(|_| vec!["same".into()]))?;

    let results = table.execute(&SearchQuery::new("body", "same"))?;
    assert_eq!(results.len(), 5);

    Ok(())
}

#[test]
fn test_repeated_searches_are_identical() -> Result<()> {
    let table = scenario_table()?;

    let query = SearchQuery::all_columns("the fox");
    let first = table.execute(&query)?;
    for _ in 0..5 {
        let again = table.execute(&query)?;
        assert_eq!(again.doc_ids(), first.doc_ids());
        let scores: Vec<f32> = again.hits.iter().map(|h| h.score).collect();
        let expected: Vec<f32> = first.hits.iter().map(|h| h.score).collect();
        assert_eq!(scores, expected);
    }

    Ok(())
}

#[test]
fn test_prefix_search() -> Result<()> {
    let table = scenario_table()?;

    let results = table.search("fo*", "title", MatchType::PrefixMatch, 5)?;
    let mut ids = results.doc_ids();
    ids.sort_unstable();
    assert_eq!(ids, vec![0, 2]);

    // Prefixes are not stemmed: "jumps" is indexed as "jump".
    let results = table.search("jumps", "title", MatchType::PrefixMatch, 5)?;
    assert!(results.is_empty());
    let results = table.search("jum", "title", MatchType::PrefixMatch, 5)?;
    assert_eq!(results.doc_ids(), vec![0]);

    assert!(matches!(
        table.search("fox jumps", "title", MatchType::PrefixMatch, 5),
        Err(FtsError::Query(_))
    ));

    Ok(())
}

#[test]
fn test_phrase_search() -> Result<()> {
    let table = scenario_table()?;

    let results = table.search("the lazy dog", "body", MatchType::ExactPhrase, 5)?;
    assert_eq!(results.doc_ids(), vec![0]);

    let results = table.search("dog lazy", "body", MatchType::ExactPhrase, 5)?;
    assert!(results.is_empty());

    let results = table.search("the fox", "body", MatchType::ExactPhrase, 5)?;
    assert_eq!(results.doc_ids(), vec![1]);

    Ok(())
}

#[test]
fn test_query_errors_do_not_invalidate_table() -> Result<()> {
    let table = scenario_table()?;

    assert!(matches!(
        table.search("fox", "author", MatchType::TokenMatch, 5),
        Err(FtsError::Query(_))
    ));
    assert!(matches!(
        table.search("  ", "body", MatchType::TokenMatch, 5),
        Err(FtsError::Query(_))
    ));
    assert!(matches!(
        table.search("?!", "body", MatchType::TokenMatch, 5),
        Err(FtsError::Query(_))
    ));

    let results = table.search("fox", "body", MatchType::TokenMatch, 5)?;
    assert_eq!(results.doc_ids(), vec![1]);

    Ok(())
}

#[test]
fn test_quotes_in_terms_are_literal() -> Result<()> {
    let mut table = FtsTable::create_index(["body"], TokenizerConfig::default())?;
    table.load(vec![vec![r#"she said "hello" OR goodbye"#.into()]])?;

    let results = table.search(r#""hello" OR"#, "body", MatchType::TokenMatch, 5)?;
    assert_eq!(results.doc_ids(), vec![0]);

    let results = table.search("NEAR(hello)", "body", MatchType::TokenMatch, 5)?;
    assert!(results.is_empty());

    Ok(())
}

#[test]
fn test_ascii_segmentation_keeps_non_ascii_words() -> Result<()> {
    let config: TokenizerConfig = "ascii".parse()?;
    let mut table = FtsTable::create_index(["body"], config)?;
    table.load(vec![vec!["Café au lait".into()], vec!["CAFÉ noir".into()]])?;

    // Only ASCII letters are case folded.
    let results = table.search("café", "body", MatchType::TokenMatch, 5)?;
    assert_eq!(results.doc_ids(), vec![0]);

    Ok(())
}

#[test]
fn test_unicode61_folds_diacritics_and_splits_apostrophes() -> Result<()> {
    let config: TokenizerConfig = "porter unicode61".parse()?;
    let mut table = FtsTable::create_index(["body"], config)?;
    table.load(vec![
        vec!["résumé of the café".into()],
        vec!["I can't stop".into()],
    ])?;

    let results = table.search("resume", "body", MatchType::TokenMatch, 5)?;
    assert_eq!(results.doc_ids(), vec![0]);
    let results = table.search("CAFÉ", "body", MatchType::TokenMatch, 5)?;
    assert_eq!(results.doc_ids(), vec![0]);
    let results = table.search("caf*", "body", MatchType::PrefixMatch, 5)?;
    assert_eq!(results.doc_ids(), vec![0]);

    let results = table.search("can", "body", MatchType::TokenMatch, 5)?;
    assert_eq!(results.doc_ids(), vec![1]);
    let results = table.search("can't stop", "body", MatchType::ExactPhrase, 5)?;
    assert_eq!(results.doc_ids(), vec![1]);

    Ok(())
}
