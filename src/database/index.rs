//! Text-to-block lookup built from the database and the languages
//! requested for one parse.

use std::collections::HashMap;
use tracing::{debug, warn};

use crate::database::{minify, normalize_spec, BlockDescriptor, Database, Language};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub blockid: String,
    pub language: String,
}

/// Phrases gathered from every merged language, each minified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    pub define: Vec<String>,
    pub ignore_lt: Vec<String>,
    pub math: Vec<String>,
    pub osis: Vec<String>,
}

/// Maps minified block text to the block it names. Owned by a single
/// parse; build a fresh one whenever the set of languages changes.
#[derive(Debug, Clone)]
pub struct LookupIndex<'d> {
    database: &'d Database,
    entries: HashMap<String, IndexEntry>,
    specs: HashMap<String, HashMap<String, String>>,
    vocabulary: Vocabulary,
    languages: Vec<String>,
}

impl<'d> LookupIndex<'d> {
    /// Index the base language and then each requested language in
    /// order. Where two languages produce the same text the later one
    /// wins.
    pub fn build(database: &'d Database, languages: &[String]) -> LookupIndex<'d> {
        let mut index = LookupIndex {
            database,
            entries: HashMap::new(),
            specs: HashMap::new(),
            vocabulary: Vocabulary::default(),
            languages: Vec::new(),
        };

        index.merge(database.base());

        for code in languages {
            if index
                .languages
                .contains(code)
            {
                continue;
            }
            match database.language(code) {
                Some(language) => index.merge(language),
                None => warn!("Unknown language '{}' requested", code),
            }
        }

        debug!(
            "Indexed {} block texts from {}",
            index
                .entries
                .len(),
            index
                .languages
                .join(", ")
        );

        index
    }

    fn merge(&mut self, language: &Language) {
        let code = &language.code;
        let database = self.database;
        let blockids = database.blockids();

        if language
            .blocks
            .len()
            > blockids.len()
        {
            warn!(
                "Language '{}' lists {} blocks but only {} exist; ignoring the rest",
                code,
                language
                    .blocks
                    .len(),
                blockids.len()
            );
        }

        let specs = self
            .specs
            .entry(code.clone())
            .or_default();

        for (spec, blockid) in language
            .blocks
            .iter()
            .zip(blockids)
        {
            // images are drawn as icons, never matched literally
            let spec = regex!(r"@[-A-Za-z]+")
                .replacen(spec, 1, "@")
                .into_owned();

            let key = minify(&normalize_spec(&spec));
            specs.insert(blockid.clone(), spec);

            if !key.is_empty() {
                self.entries
                    .insert(
                        key,
                        IndexEntry {
                            blockid: blockid.clone(),
                            language: code.clone(),
                        },
                    );
            }
        }

        for (text, blockid) in &language.aliases {
            if database
                .descriptor(blockid)
                .is_none()
            {
                warn!(
                    "Alias '{}' in language '{}' names unknown block '{}'",
                    text, code, blockid
                );
                continue;
            }
            self.entries
                .insert(
                    minify(&normalize_spec(text)),
                    IndexEntry {
                        blockid: blockid.clone(),
                        language: code.clone(),
                    },
                );
        }

        extend_minified(&mut self.vocabulary.define, &language.define);
        extend_minified(&mut self.vocabulary.ignore_lt, &language.ignore_lt);
        extend_minified(&mut self.vocabulary.math, &language.math);
        extend_minified(&mut self.vocabulary.osis, &language.osis);

        self.languages
            .push(code.clone());
    }

    /// Find the block named by some (normalized) block text.
    pub fn lookup(&self, text: &str) -> Option<(&'d BlockDescriptor, &IndexEntry)> {
        let entry = self
            .entries
            .get(&minify(text))?;
        let descriptor = self
            .database
            .descriptor(&entry.blockid)?;
        Some((descriptor, entry))
    }

    /// The spec of a block as written in the given language, with any
    /// image marker reduced to `@`.
    pub fn spec(&self, language: &str, blockid: &str) -> Option<&str> {
        self.specs
            .get(language)?
            .get(blockid)
            .map(|spec| spec.as_str())
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Codes of the languages merged into this index, in merge order.
    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    pub fn database(&self) -> &'d Database {
        self.database
    }
}

fn extend_minified(target: &mut Vec<String>, phrases: &[String]) {
    for phrase in phrases {
        if !phrase.is_empty() {
            target.push(minify(phrase));
        }
    }
}
