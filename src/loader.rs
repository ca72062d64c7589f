//! Catalog ingestion: product and hierarchy feeds, stopwords, and the
//! discard filter applied before records reach canonicalization.
//!
//! Feeds are JSON-lines files; `#`-prefixed lines are comments. Individual
//! malformed lines are skipped with a warning, but a missing file is fatal:
//! the engine cannot serve any query without an index.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{info, warn};

use larder_core::{LarderError, LarderResult, ProductRecord};

use crate::catalog::Catalog;

/// Names with leading quantities ("250g chocolate").
static LEADING_QUANTITY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d").unwrap());

/// Names with embedded quantities ("flour (250g)", "chocolate, 70% 2 bars").
static EMBEDDED_QUANTITY: Lazy<Regex> = Lazy::new(|| Regex::new(r"[(, /]+\d").unwrap());

/// Separator pseudo-entries. A prefix match, unlike the per-word rule in the
/// tokenizer: a record whose name merely *starts* with a separator run
/// ("---- toppings") is a section divider in the feed, while a query word is
/// only noise when it is separators through and through.
static SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-_]+").unwrap());

/// At least one run of three non-whitespace characters.
static MIN_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S{3}").unwrap());

/// Ingestion thresholds.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Records below this recipe count are discarded as too rare to match.
    pub min_recipe_count: u64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        LoaderConfig { min_recipe_count: 5 }
    }
}

/// Seam for an external quantity-stripping parser applied to catalog names
/// ("2 cups of flour" → "flour"). The engine treats its output as ordinary
/// input text and has no dependency on its internals.
pub trait QuantityParser {
    fn strip_quantities(&self, name: &str) -> String;
}

/// Default parser: passes names through unchanged.
pub struct NoQuantityParser;

impl QuantityParser for NoQuantityParser {
    fn strip_quantities(&self, name: &str) -> String {
        name.to_string()
    }
}

/// True if a raw catalog record should never reach canonicalization:
/// too rare, a separator pseudo-entry, quantity-bearing, too short, or a
/// container label. These are the same noise patterns the tokenizer applies
/// per word to query text.
pub fn discard(record: &ProductRecord, config: &LoaderConfig) -> bool {
    record.recipe_count < config.min_recipe_count
        || SEPARATOR.is_match(&record.name)
        || LEADING_QUANTITY.is_match(&record.name)
        || EMBEDDED_QUANTITY.is_match(&record.name)
        || !MIN_WORD.is_match(&record.name)
        || record.name.ends_with(':')
}

/// Strip one parenthesized segment from a raw name, then hand the rest to
/// the quantity parser. The opening bracket must not be the first
/// character ("(see note) flour" keeps its note).
pub fn prefilter(name: &str, parser: &dyn QuantityParser) -> String {
    let stripped = match (name.find('('), name.rfind(')')) {
        (Some(open), Some(close)) if open > 0 && close > open => {
            let mut out = name[..open].trim_end().to_string();
            out.push_str(&name[close + 1..]);
            out
        }
        _ => name.to_string(),
    };
    parser.strip_quantities(&stripped)
}

/// Read product records from a JSON-lines feed, applying `prefilter` and the
/// discard filter. Malformed lines are skipped.
pub fn read_products(
    path: &Path,
    config: &LoaderConfig,
    parser: &dyn QuantityParser,
) -> LarderResult<Vec<ProductRecord>> {
    info!(path = %path.display(), "reading products");
    let mut records = Vec::new();
    for line in read_data_lines(path)? {
        let mut record: ProductRecord = match serde_json::from_str(&line) {
            Ok(record) => record,
            Err(err) => {
                warn!(%err, "skipping malformed product record");
                continue;
            }
        };
        if discard(&record, config) {
            continue;
        }
        record.name = prefilter(&record.name, parser);
        records.push(record);
        if records.len() % 1000 == 0 {
            info!(count = records.len(), "products loaded");
        }
    }
    info!(count = records.len(), "products loaded");
    Ok(records)
}

/// Read the full hierarchy feed (already curated upstream, so no discard
/// filter): every record with its parent reference and nutrition payload.
pub fn read_hierarchy(path: &Path) -> LarderResult<Vec<ProductRecord>> {
    info!(path = %path.display(), "reading hierarchy");
    let mut records = Vec::new();
    for line in read_data_lines(path)? {
        match serde_json::from_str(&line) {
            Ok(record) => records.push(record),
            Err(err) => warn!(%err, "skipping malformed hierarchy record"),
        }
    }
    Ok(records)
}

/// Read a stopword list: one word per line, `#` comments, lowercased.
pub fn read_stopwords(path: &Path) -> LarderResult<Vec<String>> {
    info!(path = %path.display(), "reading stopwords");
    Ok(read_data_lines(path)?
        .map(|line| line.to_lowercase())
        .collect())
}

/// Build a serving snapshot from the hierarchy and stopword files. Either
/// file missing is a startup failure.
pub fn load_catalog(hierarchy: &Path, stopwords: &Path) -> LarderResult<Catalog> {
    let records = read_hierarchy(hierarchy)?;
    let stopwords = read_stopwords(stopwords)?;
    Ok(Catalog::build(records, stopwords))
}

/// Non-empty, non-comment lines of a data file.
fn read_data_lines(path: &Path) -> LarderResult<impl Iterator<Item = String>> {
    if !path.exists() {
        return Err(LarderError::missing_source(path.display().to_string()));
    }
    let reader = BufReader::new(File::open(path)?);
    Ok(reader
        .lines()
        .map_while(Result::ok)
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty() && !line.starts_with('#')))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn record(name: &str, count: u64) -> ProductRecord {
        ProductRecord::new(name, count)
    }

    #[test]
    fn test_discard_rare_records() {
        let config = LoaderConfig::default();
        assert!(discard(&record("onion", 4), &config));
        assert!(!discard(&record("onion", 5), &config));
    }

    #[test]
    fn test_discard_noise_names() {
        let config = LoaderConfig {
            min_recipe_count: 0,
        };
        assert!(discard(&record("---", 10), &config));
        // Prefix separator run discards the whole record even when words
        // follow; the tokenizer's per-word rule would keep "toppings".
        assert!(discard(&record("---- toppings", 10), &config));
        assert!(discard(&record("250g chocolate", 10), &config));
        assert!(discard(&record("flour (250g)", 10), &config));
        assert!(discard(&record("chocolate, 70% cocoa", 10), &config));
        assert!(discard(&record("ab", 10), &config));
        assert!(discard(&record("for the sauce:", 10), &config));
        assert!(!discard(&record("baked beans", 10), &config));
    }

    #[test]
    fn test_prefilter_strips_parenthetical() {
        let parser = NoQuantityParser;
        assert_eq!(prefilter("soy milk (unsweetened)", &parser), "soy milk");
        assert_eq!(prefilter("plain flour", &parser), "plain flour");
        // Leading parenthetical is retained.
        assert_eq!(prefilter("(see note) flour", &parser), "(see note) flour");
    }

    #[test]
    fn test_quantity_parser_seam() {
        struct DropFirstWord;
        impl QuantityParser for DropFirstWord {
            fn strip_quantities(&self, name: &str) -> String {
                name.split_once(' ').map_or_else(|| name.to_string(), |(_, rest)| rest.to_string())
            }
        }
        assert_eq!(prefilter("two cups flour", &DropFirstWord), "cups flour");
    }

    #[test]
    fn test_read_products_skips_bad_lines() {
        let file = write_file(concat!(
            "# comment\n",
            "{\"product\": \"onion\", \"recipe_count\": 10}\n",
            "not json at all\n",
            "{\"product\": \"rare herb\", \"recipe_count\": 1}\n",
            "{\"product\": \"soy milk (unsweetened)\", \"recipe_count\": 8}\n",
        ));
        let records =
            read_products(file.path(), &LoaderConfig::default(), &NoQuantityParser).unwrap();
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["onion", "soy milk"]);
    }

    #[test]
    fn test_read_hierarchy_keeps_parent_and_nutrition() {
        let file = write_file(concat!(
            "{\"product\": \"bean\", \"recipe_count\": 20}\n",
            "{\"product\": \"baked bean\", \"recipe_count\": 5, ",
            "\"parent_id\": \"bean\", \"nutrition\": {\"protein\": 5.2}}\n",
        ));
        let records = read_hierarchy(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].parent_id.as_deref(), Some("bean"));
        assert!(records[1].nutrition.is_some());
    }

    #[test]
    fn test_read_stopwords() {
        let file = write_file("# header\nFresh\nchopped\n\n");
        let stopwords = read_stopwords(file.path()).unwrap();
        assert_eq!(stopwords, vec!["fresh", "chopped"]);
    }

    #[test]
    fn test_missing_source_is_fatal() {
        let err = read_stopwords(Path::new("/nonexistent/stopwords.txt")).unwrap_err();
        assert!(matches!(err, LarderError::MissingSource { .. }));
    }

    #[test]
    fn test_load_catalog_end_to_end() {
        let hierarchy = write_file(concat!(
            "{\"product\": \"tofu\", \"recipe_count\": 20}\n",
            "{\"product\": \"firm tofu\", \"recipe_count\": 10, \"parent_id\": \"tofu\"}\n",
        ));
        let stopwords = write_file("");
        let catalog = load_catalog(hierarchy.path(), stopwords.path()).unwrap();
        let result = catalog.resolve("block of firm tofu").unwrap();
        assert_eq!(result.id.as_str(), "firm_tofu");
    }
}
