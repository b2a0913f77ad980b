//! The block database: one descriptor per canonical block, plus the
//! languages which name those blocks.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::debug;

use crate::language::{Category, DatabaseError, Flag, LoadingError, Shape};

mod english;
mod index;
mod minify;

pub use english::image_text;
pub use index::*;
pub use minify::*;

/// Special-case rules for blocks whose category or shape depends on the
/// argument they were given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disambiguator {
    None,
    /// `_ of _` is a math function (operators) or an attribute lookup
    /// (sensing).
    OfFunction,
    /// `length of _` is a list block when given a dropdown.
    LengthOf,
    /// `stop _` is a cap unless it stops other scripts.
    StopBlock,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockDescriptor {
    pub blockid: String,
    pub category: Category,
    pub shape: Option<Shape>,
    pub flag: Option<Flag>,
    pub image: Option<String>,
    pub disambiguator: Disambiguator,
}

impl BlockDescriptor {
    fn describe(
        blockid: &str,
        category: Category,
        flags: &[&str],
    ) -> Result<BlockDescriptor, DatabaseError> {
        let mut shape = None;
        let mut flag: Option<Flag> = None;

        for token in flags
            .iter()
            .rev()
        {
            match *token {
                "hat" => shape = Some(Shape::Hat),
                "cap" => shape = Some(Shape::Cap),
                other => {
                    let parsed = Flag::from_name(other).ok_or(DatabaseError::UnknownFlag {
                        blockid: blockid.to_string(),
                        flag: other.to_string(),
                    })?;
                    if let Some(existing) = flag {
                        return Err(DatabaseError::DuplicateFlag {
                            blockid: blockid.to_string(),
                            first: existing
                                .as_str()
                                .to_string(),
                            second: other.to_string(),
                        });
                    }
                    flag = Some(parsed);
                }
            }
        }

        let image = regex!(r"@([-A-Za-z]+)")
            .captures(blockid)
            .and_then(|cap| cap.get(1))
            .map(|token| {
                token
                    .as_str()
                    .to_string()
            });

        let disambiguator = match blockid {
            "_ of _" => Disambiguator::OfFunction,
            "length of _" => Disambiguator::LengthOf,
            "stop _" => Disambiguator::StopBlock,
            _ => Disambiguator::None,
        };

        Ok(BlockDescriptor {
            blockid: blockid.to_string(),
            category,
            shape,
            flag,
            image,
            disambiguator,
        })
    }
}

/// A set of block names in one natural language. Translations list
/// their specs in the same order as the base language's blockids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub code: String,
    #[serde(default)]
    pub blocks: Vec<String>,
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
    #[serde(default)]
    pub define: Vec<String>,
    #[serde(default, rename = "ignorelt")]
    pub ignore_lt: Vec<String>,
    #[serde(default)]
    pub math: Vec<String>,
    #[serde(default)]
    pub osis: Vec<String>,
}

/// The immutable block database. Construct it once; build a
/// [`LookupIndex`] from it for each parse.
#[derive(Debug, Clone)]
pub struct Database {
    blockids: Vec<String>,
    descriptors: HashMap<String, BlockDescriptor>,
    base: String,
    languages: BTreeMap<String, Language>,
}

impl Database {
    /// The standard database, with English as its base language.
    pub fn english() -> Result<Database, DatabaseError> {
        Database::from_table(english::BLOCKS, english::language())
    }

    /// Build a database from a block table grouped by category. Any
    /// block list already present on the base language is replaced by
    /// the table's specs.
    pub fn from_table(
        table: &[(Category, &[(&str, &[&str])])],
        mut base: Language,
    ) -> Result<Database, DatabaseError> {
        let mut blockids = Vec::new();
        let mut descriptors = HashMap::new();

        for (category, entries) in table {
            for (spec, flags) in entries.iter() {
                let descriptor = BlockDescriptor::describe(spec, *category, flags)?;
                blockids.push(spec.to_string());
                // a blockid listed twice takes the later category
                descriptors.insert(spec.to_string(), descriptor);
            }
        }

        debug!(
            "Loaded {} blocks ({} distinct)",
            blockids.len(),
            descriptors.len()
        );

        base.blocks = blockids.clone();

        let code = base
            .code
            .clone();
        let mut languages = BTreeMap::new();
        languages.insert(code.clone(), base);

        Ok(Database {
            blockids,
            descriptors,
            base: code,
            languages,
        })
    }

    /// Register a translation, replacing any earlier one with the same
    /// code. The base language cannot be replaced.
    pub fn with_translation(mut self, language: Language) -> Database {
        if language.code == self.base {
            tracing::warn!("Ignoring translation replacing the base language");
            return self;
        }
        self.languages
            .insert(
                language
                    .code
                    .clone(),
                language,
            );
        self
    }

    /// The canonical blockids in table order. Blockids listed twice in
    /// the table appear twice here.
    pub fn blockids(&self) -> &[String] {
        &self.blockids
    }

    pub fn descriptor(&self, blockid: &str) -> Option<&BlockDescriptor> {
        self.descriptors
            .get(blockid)
    }

    /// Every distinct descriptor, in table order.
    pub fn descriptors(&self) -> Vec<&BlockDescriptor> {
        let mut seen = std::collections::HashSet::new();
        self.blockids
            .iter()
            .filter(|blockid| seen.insert(blockid.as_str()))
            .filter_map(|blockid| self.descriptor(blockid))
            .collect()
    }

    pub fn base(&self) -> &Language {
        &self.languages[&self.base]
    }

    pub fn language(&self, code: &str) -> Option<&Language> {
        self.languages
            .get(code)
    }
}

/// Read a translation pack from a JSON file.
pub fn load_language(filename: &Path) -> Result<Language, LoadingError> {
    let content = std::fs::read_to_string(filename).map_err(|error| LoadingError {
        problem: match error.kind() {
            std::io::ErrorKind::NotFound => "File not found".to_string(),
            _ => "Failed reading".to_string(),
        },
        details: String::new(),
        filename: filename.to_path_buf(),
    })?;

    serde_json::from_str(&content).map_err(|error| LoadingError {
        problem: "Invalid translation".to_string(),
        details: error.to_string(),
        filename: filename.to_path_buf(),
    })
}

#[cfg(test)]
mod check {
    use super::*;

    #[test]
    fn flags_and_shapes() {
        let database = Database::english().unwrap();

        let forever = database
            .descriptor("forever")
            .unwrap();
        assert_eq!(forever.shape, Some(Shape::Cap));
        assert_eq!(forever.flag, Some(Flag::CStart));
        assert_eq!(forever.category, Category::Control);

        let hat = database
            .descriptor("when @green-flag clicked")
            .unwrap();
        assert_eq!(hat.shape, Some(Shape::Hat));
        assert_eq!(hat.flag, None);
        assert_eq!(hat.image, Some("green-flag".to_string()));

        let move_steps = database
            .descriptor("move _ steps")
            .unwrap();
        assert_eq!(move_steps.shape, None);
        assert_eq!(move_steps.flag, None);
        assert_eq!(move_steps.image, None);
    }

    #[test]
    fn later_duplicate_wins() {
        let database = Database::english().unwrap();

        let of = database
            .descriptor("_ of _")
            .unwrap();
        assert_eq!(of.category, Category::Operators);
        assert_eq!(of.disambiguator, Disambiguator::OfFunction);

        let length = database
            .descriptor("length of _")
            .unwrap();
        assert_eq!(length.category, Category::Operators);
        assert_eq!(length.disambiguator, Disambiguator::LengthOf);

        let count = database
            .blockids()
            .iter()
            .filter(|id| *id == "_ of _")
            .count();
        assert_eq!(count, 2);
        assert!(database.descriptors().len() < database.blockids().len());
    }

    #[test]
    fn rejects_two_structural_flags() {
        let table: &[(Category, &[(&str, &[&str])])] =
            &[(Category::Control, &[("broken", &["cstart", "cend"])])];

        let result = Database::from_table(table, english::language());
        assert_eq!(
            result.unwrap_err(),
            DatabaseError::DuplicateFlag {
                blockid: "broken".to_string(),
                first: "cend".to_string(),
                second: "cstart".to_string(),
            }
        );
    }

    #[test]
    fn rejects_unknown_flag() {
        let table: &[(Category, &[(&str, &[&str])])] =
            &[(Category::Control, &[("broken", &["wobbly"])])];

        let result = Database::from_table(table, english::language());
        assert!(matches!(
            result,
            Err(DatabaseError::UnknownFlag { .. })
        ));
    }

    #[test]
    fn translation_from_json() {
        let language: Language = serde_json::from_str(
            r#"{
                "code": "xx",
                "blocks": ["gehe _ schritt"],
                "define": ["definiere"],
                "ignorelt": ["wenn abstand"]
            }"#,
        )
        .unwrap();

        assert_eq!(language.code, "xx");
        assert_eq!(language.blocks, vec!["gehe _ schritt".to_string()]);
        assert_eq!(language.ignore_lt, vec!["wenn abstand".to_string()]);
        assert!(language
            .math
            .is_empty());

        let database = Database::english()
            .unwrap()
            .with_translation(language);
        assert!(database
            .language("xx")
            .is_some());
        assert_eq!(
            database
                .base()
                .code,
            "en"
        );
    }
}
