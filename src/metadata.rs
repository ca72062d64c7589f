//! Metadata reporting for resolved products: singular/plural forms, the
//! category tag from hand-authored classification tables, and ancestor
//! names.
//!
//! This is a thin read-only composition over the product graph; it plays no
//! part in the matching algorithm.

use larder_core::ProductId;
use larder_engine::ProductGraph;

/// Pluralization/singularization lookup.
///
/// The engine treats inflection as an external collaborator; this trait is
/// its seam. Implementations operate on the final word of a phrase
/// ("greek black olives" → "greek black olive").
pub trait Inflector {
    /// Singular form if `noun` is plural, `None` if already singular.
    fn singular(&self, noun: &str) -> Option<String>;

    /// Plural form of a (singular) noun.
    fn plural(&self, noun: &str) -> String;
}

/// Rule-based English inflector covering the regular noun patterns that
/// occur in ingredient names.
pub struct EnglishInflector;

impl Inflector for EnglishInflector {
    fn singular(&self, noun: &str) -> Option<String> {
        map_last_word(noun, |word| {
            if let Some(stem) = word.strip_suffix("ies") {
                if stem.len() >= 2 {
                    return Some(format!("{stem}y"));
                }
            }
            for suffix in ["ches", "shes", "sses", "xes", "zes", "oes"] {
                if let Some(stem) = word.strip_suffix("es") {
                    if word.ends_with(suffix) {
                        return Some(stem.to_string());
                    }
                }
            }
            if word.ends_with('s') && !word.ends_with("ss") && word.len() > 2 {
                return Some(word[..word.len() - 1].to_string());
            }
            None
        })
    }

    fn plural(&self, noun: &str) -> String {
        map_last_word(noun, |word| {
            if let Some(stem) = word.strip_suffix('y') {
                if !stem.is_empty() && !stem.ends_with(|c: char| "aeiou".contains(c)) {
                    return Some(format!("{stem}ies"));
                }
            }
            for suffix in ["ch", "sh", "ss", "x", "z", "o"] {
                if word.ends_with(suffix) {
                    return Some(format!("{word}es"));
                }
            }
            Some(format!("{word}s"))
        })
        .unwrap_or_else(|| noun.to_string())
    }
}

/// Apply `f` to the last whitespace-separated word, keeping the head intact.
fn map_last_word(phrase: &str, f: impl FnOnce(&str) -> Option<String>) -> Option<String> {
    let (head, last) = match phrase.rsplit_once(' ') {
        Some((head, last)) => (Some(head), last),
        None => (None, phrase),
    };
    let mapped = f(last)?;
    Some(match head {
        Some(head) => format!("{head} {mapped}"),
        None => mapped,
    })
}

/// Metadata report for one product.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductMetadata {
    pub product: String,
    pub is_plural: bool,
    pub singular: String,
    pub plural: String,
    /// Display category ("Meat", "Dairy", ...), if any content class maps
    /// to one.
    pub category: Option<String>,
    /// Content classes the name matched, the singularized name first.
    pub contents: Vec<String>,
    /// Ancestor names, nearest first.
    pub ancestors: Vec<String>,
}

/// Content keyword → content class. Hand-authored; order fixes the
/// deterministic order of the contents list.
const CONTENT_CLASSES: &[(&str, &str)] = &[
    ("baguette", "bread"),
    ("bread", "bread"),
    ("loaf", "bread"),
    ("butter", "dairy"),
    ("cheese", "dairy"),
    ("milk", "dairy"),
    ("yogurt", "dairy"),
    ("egg", "egg"),
    ("eggs", "egg"),
    ("all-purpose flour", "dry_goods"),
    ("baking powder", "dry_goods"),
    ("black pepper", "dry_goods"),
    ("brown sugar", "dry_goods"),
    ("salt", "dry_goods"),
    ("sugar", "dry_goods"),
    ("vanilla extract", "dry_goods"),
    ("white sugar", "dry_goods"),
    ("banana", "fruit_and_veg"),
    ("berry", "fruit_and_veg"),
    ("berries", "fruit_and_veg"),
    ("garlic", "fruit_and_veg"),
    ("onion", "fruit_and_veg"),
    ("tomato", "fruit_and_veg"),
    ("bacon", "meat"),
    ("beef", "meat"),
    ("chicken", "meat"),
    ("ham", "meat"),
    ("lamb", "meat"),
    ("pork", "meat"),
    ("sausage", "meat"),
    ("steak", "meat"),
    ("turkey", "meat"),
    ("venison", "meat"),
    ("ketchup", "oil_and_vinegar_and_condiments"),
    ("oil", "oil_and_vinegar_and_condiments"),
    ("soy sauce", "oil_and_vinegar_and_condiments"),
    ("vinegar", "oil_and_vinegar_and_condiments"),
];

/// Content class → display category.
const CATEGORY_LABELS: &[(&str, &str)] = &[
    ("bread", "Bakery"),
    ("dairy", "Dairy"),
    ("dry_goods", "Dry Goods"),
    ("fruit_and_veg", "Fruit & Vegetables"),
    ("egg", "Dairy"),
    ("meat", "Meat"),
    ("oil_and_vinegar_and_condiments", "Oil, Vinegar & Condiments"),
];

/// Names containing any of these terms do not classify under the keyed
/// keyword or class ("chicken broth" is not meat).
const CLASS_EXCLUSIONS: &[(&str, &[&str])] = &[
    ("meat", &["stock", "broth", "tomato", "bouillon", "soup", "eggs"]),
    ("bread", &["crumbs"]),
    ("fruit_and_veg", &["green tomato"]),
];

/// Build the metadata report for a product, or `None` if the id is unknown.
pub fn product_metadata(
    graph: &ProductGraph,
    inflector: &dyn Inflector,
    id: &ProductId,
) -> Option<ProductMetadata> {
    let product = graph.get(id)?;
    let name = product.name();

    let singular = inflector.singular(name).unwrap_or_else(|| name.to_string());
    let plural = inflector.plural(&singular);
    let is_plural = name == plural;

    let contents = contents_of(name, inflector);
    let category = category_of(&contents);
    let ancestors = graph.ancestry(id).map(|p| p.name().to_string()).collect();

    Some(ProductMetadata {
        product: name.to_string(),
        is_plural,
        singular,
        plural,
        category,
        contents,
        ancestors,
    })
}

/// Content classes a name belongs to: the singularized name itself, then
/// every matching keyword and its class, in table order.
fn contents_of(name: &str, inflector: &dyn Inflector) -> Vec<String> {
    let base = inflector.singular(name).unwrap_or_else(|| name.to_string());
    let mut contents = vec![base];

    for &(keyword, class) in CONTENT_CLASSES {
        if !keyword_matches(name, keyword) {
            continue;
        }
        if is_excluded(name, keyword) || is_excluded(name, class) {
            continue;
        }
        for entry in [keyword, class] {
            if !contents.iter().any(|c| c.as_str() == entry) {
                contents.push(entry.to_string());
            }
        }
    }
    contents
}

fn keyword_matches(name: &str, keyword: &str) -> bool {
    if keyword.contains(' ') {
        name.contains(keyword)
    } else {
        name.split_whitespace().any(|word| word == keyword)
    }
}

fn is_excluded(name: &str, field: &str) -> bool {
    CLASS_EXCLUSIONS
        .iter()
        .find(|(class, _)| *class == field)
        .is_some_and(|(_, terms)| terms.iter().any(|term| name.contains(term)))
}

/// First content class with a display category, in contents order.
fn category_of(contents: &[String]) -> Option<String> {
    contents.iter().find_map(|content| {
        CATEGORY_LABELS
            .iter()
            .find(|(class, _)| *class == content.as_str())
            .map(|(_, label)| label.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use larder_core::ProductRecord;
    use larder_engine::{Canonicalizer, Tokenizer};

    fn graph(records: Vec<ProductRecord>) -> ProductGraph {
        ProductGraph::build(&Canonicalizer::empty(), &Tokenizer::new(), records)
    }

    #[test]
    fn test_inflector_roundtrips() {
        let inflector = EnglishInflector;
        assert_eq!(inflector.singular("olives").as_deref(), Some("olive"));
        assert_eq!(inflector.plural("olive"), "olives");
        assert_eq!(inflector.singular("berries").as_deref(), Some("berry"));
        assert_eq!(inflector.plural("berry"), "berries");
        assert_eq!(inflector.singular("tomatoes").as_deref(), Some("tomato"));
        assert_eq!(inflector.plural("tomato"), "tomatoes");
        assert_eq!(inflector.singular("cress"), None);
    }

    #[test]
    fn test_inflector_operates_on_last_word() {
        let inflector = EnglishInflector;
        assert_eq!(
            inflector.singular("greek black olives").as_deref(),
            Some("greek black olive")
        );
        assert_eq!(inflector.plural("greek black olive"), "greek black olives");
    }

    #[test]
    fn test_metadata_report() {
        let g = graph(vec![
            ProductRecord::new("olives", 30),
            ProductRecord::new("black olives", 10).with_parent("oliv"),
            ProductRecord::new("greek black olives", 5).with_parent("black_oliv"),
        ]);
        let metadata =
            product_metadata(&g, &EnglishInflector, &ProductId::from("black_greek_oliv")).unwrap();

        assert_eq!(metadata.singular, "greek black olive");
        assert_eq!(metadata.plural, "greek black olives");
        assert!(metadata.is_plural);
        assert_eq!(metadata.ancestors, vec!["black olives", "olives"]);
    }

    #[test]
    fn test_unknown_product() {
        let g = graph(vec![ProductRecord::new("onion", 10)]);
        assert!(product_metadata(&g, &EnglishInflector, &ProductId::from("tofu")).is_none());
    }

    #[test]
    fn test_chicken_contents() {
        let contents = contents_of("chicken", &EnglishInflector);
        assert!(contents.contains(&"chicken".to_string()));
        assert!(contents.contains(&"meat".to_string()));
    }

    #[test]
    fn test_chicken_breast_contents() {
        let contents = contents_of("chicken breast", &EnglishInflector);
        assert!(contents.contains(&"chicken breast".to_string()));
        assert!(contents.contains(&"chicken".to_string()));
        assert!(contents.contains(&"meat".to_string()));
    }

    #[test]
    fn test_meat_exclusions() {
        for exclusion in ["broth", "bouillon", "soup"] {
            let name = format!("chicken {exclusion}");
            let contents = contents_of(&name, &EnglishInflector);
            assert!(contents.contains(&name), "{name}");
            assert!(!contents.contains(&"chicken".to_string()), "{name}");
        }
    }

    #[test]
    fn test_contents_singularization() {
        let contents = contents_of("mushrooms", &EnglishInflector);
        assert!(contents.contains(&"mushroom".to_string()));
        assert!(!contents.contains(&"mushrooms".to_string()));
    }

    #[test]
    fn test_categories() {
        let cases = [
            ("olive oil", "Oil, Vinegar & Condiments"),
            ("canola oil", "Oil, Vinegar & Condiments"),
            ("white wine vinegar", "Oil, Vinegar & Condiments"),
            ("ketchup", "Oil, Vinegar & Condiments"),
            ("chicken breast", "Meat"),
            ("soy milk", "Dairy"),
        ];
        for (name, expected) in cases {
            let contents = contents_of(name, &EnglishInflector);
            assert_eq!(category_of(&contents).as_deref(), Some(expected), "{name}");
        }
    }

    #[test]
    fn test_uncategorized_product() {
        let contents = contents_of("saffron", &EnglishInflector);
        assert_eq!(category_of(&contents), None);
    }
}
