//! Recursive parsing of block text into syntax nodes.
//!
//! Nothing here fails. Text which doesn't name a known block becomes an
//! obsolete (or, for reporters, variable) block carrying the text as
//! written, so every line produces something that can be drawn.

use tracing::debug;

use crate::database::{minify, normalize_spec, Disambiguator, LookupIndex};
use crate::language::*;
use crate::parsing::context::ParseContext;
use crate::parsing::tokenizer::{is_open_bracket, split_into_pieces, strip_brackets, Token};

/// A block as found in the database, before its arguments are parsed.
#[derive(Debug, Clone, PartialEq)]
struct Resolved {
    blockid: String,
    category: Category,
    shape: Option<Shape>,
    flag: Option<Flag>,
    image: Option<String>,
    language: String,
    text: String,
}

/// Arguments nested deeper than this are kept as unparsed text.
const MAXIMUM_NESTING: usize = 128;

/// What the brackets and content of a fragment say it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Block(Shape),
    Insert(InsertShape),
}

pub struct Parser<'a> {
    index: &'a LookupIndex<'a>,
    context: ParseContext,
    base: String,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(index: &'a LookupIndex<'a>) -> Parser<'a> {
        let base = index
            .database()
            .base()
            .code
            .clone();

        Parser {
            index,
            context: ParseContext::new(),
            base,
            depth: 0,
        }
    }

    pub fn into_context(self) -> ParseContext {
        self.context
    }

    /// Parse one line: a block (with any trailing comment), a
    /// free-floating reporter, a `define` hat, or a lone comment.
    pub fn parse_line(&mut self, line: &str) -> SyntaxNode {
        let mut line = line.trim();
        let mut comment = None;

        // a "//" straight after a colon is part of a URL, not a comment
        if let Some(i) = line.find("//") {
            if !line[..i].ends_with(':') {
                let text = &line[i + 2..];
                line = line[..i].trim();
                if line.is_empty() {
                    return SyntaxNode::Comment {
                        text: text
                            .trim()
                            .to_string(),
                    };
                }
                comment = Some(text.to_string());
            }
        }

        let tokens = split_into_pieces(
            line,
            &self
                .index
                .vocabulary()
                .ignore_lt,
        );

        let mut node = if line.starts_with(is_open_bracket) && tokens.len() == 1 {
            match self.parse_fragment(line, true) {
                // free-floating inserts still get drawn as a line
                SyntaxNode::Insert(insert) => SyntaxNode::Block(Block {
                    id: self
                        .context
                        .next_id(),
                    blockid: "_".to_string(),
                    category: Category::Obsolete,
                    shape: Shape::Stack,
                    flag: None,
                    language: self
                        .base
                        .clone(),
                    comment: None,
                    pieces: vec![Piece::Node(SyntaxNode::Insert(insert))],
                    ringed: false,
                }),
                other => other,
            }
        } else {
            self.parse_fragment(line, false)
        };

        // deprecated: "// category=looks" sets the category of the line
        if let SyntaxNode::Block(block) = &mut node {
            if let Some(text) = comment.take() {
                comment = Some(apply_category(block, text));
            }
        }

        match &node {
            SyntaxNode::DefineHat(define) => {
                self.context
                    .define_hats
                    .push(lookup_key(&define.outline.pieces));
                for name in define.parameters() {
                    self.context
                        .custom_args
                        .push(name);
                }
            }
            SyntaxNode::Block(block)
                if block.shape == Shape::Stack && block.category == Category::Obsolete =>
            {
                self.context
                    .record_obsolete(lookup_key(&block.pieces), block.id);
            }
            _ => {}
        }

        let comment = comment
            .map(|text| {
                text.trim()
                    .to_string()
            })
            .filter(|text| !text.is_empty());

        match &mut node {
            SyntaxNode::Block(block) => block.comment = comment,
            SyntaxNode::DefineHat(define) => define.comment = comment,
            _ => {}
        }

        node
    }

    /// Parse a fragment of block text. With `strip` set, the outer
    /// brackets are removed first and determine what kind of node this
    /// is; without, the text is a bare stack block.
    pub fn parse_fragment(&mut self, text: &str, strip: bool) -> SyntaxNode {
        let (bracket, code) = if strip {
            let bracket = text
                .chars()
                .next()
                .filter(|c| is_open_bracket(*c));
            (bracket, strip_brackets(text))
        } else {
            (None, text)
        };

        let mut tokens = split_into_pieces(
            code,
            &self
                .index
                .vocabulary()
                .ignore_lt,
        );

        if let Some(define) = self.read_define_hat(code, &tokens) {
            return SyntaxNode::DefineHat(define);
        }

        let shape = match kind_of(bracket, code, tokens.len()) {
            Kind::Block(shape) => shape,
            Kind::Insert(shape) => {
                let value = match shape {
                    InsertShape::Dropdown | InsertShape::NumberDropdown => code
                        .strip_suffix(" v")
                        .unwrap_or(code),
                    _ => code,
                };
                return SyntaxNode::Insert(Insert::new(shape, value));
            }
        };

        trim_ends(&mut tokens);
        let (spec, args) = filter_pieces(&tokens);

        // explicit overrides, as in "foo (bar) :: looks cap"
        let overridden = regex!(r"^(.*)::([A-Za-z\- ]*)$")
            .captures(&spec)
            .map(|cap| {
                let overrides: Vec<String> = cap[2]
                    .split_whitespace()
                    .map(|token| token.to_string())
                    .collect();
                (
                    cap[1]
                        .trim_end()
                        .to_string(),
                    overrides,
                )
            });

        let (spec, overrides) = match overridden {
            Some((spec, overrides)) if overrides.is_empty() => (spec, None),
            Some((spec, overrides)) => (spec, Some(overrides)),
            None => (spec, None),
        };

        let resolved = if spec.is_empty() {
            None
        } else {
            self.find_block(&spec, &args)
        };

        let id = self
            .context
            .next_id();

        let resolved = match resolved {
            Some(mut resolved) => {
                if resolved
                    .shape
                    .is_none()
                {
                    resolved.shape = Some(shape);
                }
                if resolved.flag == Some(Flag::CEnd) {
                    resolved
                        .text
                        .clear();
                }
                resolved
            }
            None if spec.is_empty() && args.is_empty() => {
                // empty "<>", "{}" are slots with nothing in them
                let shape = match shape {
                    Shape::Boolean => InsertShape::Boolean,
                    Shape::Embedded | Shape::Reporter => InsertShape::Reporter,
                    _ => InsertShape::Stack,
                };
                return SyntaxNode::Insert(Insert::new(shape, ""));
            }
            None => {
                debug!("Unrecognized block '{}'", spec);
                if shape == Shape::Reporter || shape == Shape::Boolean {
                    self.context
                        .record_reporter(spec.clone(), id);
                }
                Resolved {
                    blockid: spec.clone(),
                    category: if shape == Shape::Reporter {
                        Category::Variables
                    } else {
                        Category::Obsolete
                    },
                    shape: Some(shape),
                    flag: None,
                    image: None,
                    language: self
                        .base
                        .clone(),
                    text: spec.clone(),
                }
            }
        };

        let pieces = self.substitute(&resolved, args);

        let mut block = Block {
            id,
            blockid: resolved.blockid,
            category: resolved.category,
            shape: resolved
                .shape
                .unwrap_or(shape),
            flag: resolved.flag,
            language: resolved.language,
            comment: None,
            pieces,
            ringed: false,
        };

        match overrides {
            Some(overrides) => apply_overrides(&mut block, &overrides),
            None => self.record_list(&block),
        }

        SyntaxNode::Block(block)
    }

    fn read_define_hat(&self, code: &str, tokens: &[Token]) -> Option<DefineHat> {
        let lowered = code.to_lowercase();
        let first = tokens
            .first()
            .map(|token| {
                token
                    .as_str()
                    .to_lowercase()
            });

        let keyword = self
            .index
            .vocabulary()
            .define
            .iter()
            .find(|keyword| {
                lowered == **keyword
                    || first
                        .as_deref()
                        .is_some_and(|first| first.starts_with(&format!("{} ", keyword)))
            })?;

        let width = keyword
            .chars()
            .count();

        let mut pieces = Vec::new();
        for (i, token) in tokens
            .iter()
            .enumerate()
        {
            match token {
                Token::Text(text) => {
                    let text = if i == 0 {
                        split_chars(text, width)
                            .1
                            .trim_start()
                    } else {
                        text.as_str()
                    };
                    if !text.is_empty() {
                        pieces.push(Piece::Label(text.to_string()));
                    }
                }
                Token::Group(group) => {
                    let name = strip_brackets(group).trim();
                    let shape = if group.starts_with('<') {
                        Shape::Boolean
                    } else {
                        Shape::Reporter
                    };
                    pieces.push(Piece::Node(SyntaxNode::Block(Block {
                        id: NodeId(usize::MAX),
                        blockid: name.to_string(),
                        category: Category::CustomArg,
                        shape,
                        flag: None,
                        language: self
                            .base
                            .clone(),
                        comment: None,
                        pieces: vec![Piece::Label(name.to_string())],
                        ringed: false,
                    })));
                }
            }
        }

        Some(DefineHat {
            keyword: split_chars(code, width)
                .0
                .to_string(),
            outline: Outline { pieces },
            comment: None,
        })
    }

    fn find_block(&self, spec: &str, args: &[String]) -> Option<Resolved> {
        let (descriptor, entry) = self
            .index
            .lookup(spec)?;

        let text = if descriptor
            .image
            .is_some()
        {
            self.index
                .spec(&entry.language, &descriptor.blockid)
                .unwrap_or(spec)
        } else if spec == "..." || spec == "…" {
            ". . ."
        } else {
            spec
        };

        let mut resolved = Resolved {
            blockid: descriptor
                .blockid
                .clone(),
            category: descriptor.category,
            shape: descriptor.shape,
            flag: descriptor.flag,
            image: descriptor
                .image
                .clone(),
            language: entry
                .language
                .clone(),
            text: text.to_string(),
        };

        self.disambiguate(descriptor.disambiguator, &mut resolved, args);

        Some(resolved)
    }

    /// Some blocks share their text with another block, and only the
    /// argument says which one is meant.
    fn disambiguate(&self, disambiguator: Disambiguator, resolved: &mut Resolved, args: &[String]) {
        let Some(first) = args.first() else {
            return;
        };
        let vocabulary = self
            .index
            .vocabulary();

        match disambiguator {
            Disambiguator::None => {}
            Disambiguator::OfFunction => {
                let function = match dropdown_value(first).as_str() {
                    "e^" => "e ^".to_string(),
                    "10^" => "10 ^".to_string(),
                    other => other.to_string(),
                };
                resolved.category = if vocabulary
                    .math
                    .contains(&function)
                {
                    Category::Operators
                } else {
                    Category::Sensing
                };
            }
            Disambiguator::LengthOf => {
                resolved.category = if regex!(r"^\[.* v\]$").is_match(first) {
                    Category::List
                } else {
                    Category::Operators
                };
            }
            Disambiguator::StopBlock => {
                resolved.shape = if vocabulary
                    .osis
                    .contains(&dropdown_value(first))
                {
                    None
                } else {
                    Some(Shape::Cap)
                };
            }
        }
    }

    /// Rebuild the pieces of a block from its text, parsing one argument
    /// for each placeholder in turn.
    fn substitute(&mut self, resolved: &Resolved, args: Vec<String>) -> Vec<Piece> {
        let mut args = args.into_iter();
        let mut pieces = Vec::new();

        for part in split_spec(&resolved.text, resolved.blockid != "_ + _") {
            match part {
                "_" => match args.next() {
                    Some(arg) => {
                        self.depth += 1;
                        let node = if self.depth > MAXIMUM_NESTING {
                            self.unparsed(&arg)
                        } else {
                            self.parse_fragment(&arg, true)
                        };
                        self.depth -= 1;
                        pieces.push(Piece::Node(node));
                    }
                    // no arguments left, so this was a real underscore
                    None => pieces.push(Piece::Label("_".to_string())),
                },
                "@" => match &resolved.image {
                    Some(token) => pieces.push(Piece::Icon(token.clone())),
                    None => pieces.push(Piece::Label("@".to_string())),
                },
                "" => {}
                text => pieces.push(Piece::Label(text.to_string())),
            }
        }

        pieces
    }

    /// An argument too deeply nested to parse, kept as an obsolete block
    /// holding its text with the outer brackets removed.
    fn unparsed(&mut self, text: &str) -> SyntaxNode {
        let bracket = text
            .chars()
            .next()
            .filter(|c| is_open_bracket(*c));
        let code = strip_brackets(text);

        let shape = match kind_of(bracket, code, 1) {
            Kind::Block(shape) => shape,
            // inserts are leaves, so parsing them doesn't go any deeper
            Kind::Insert(_) => return self.parse_fragment(text, true),
        };

        debug!("Not parsing argument nested {} deep", self.depth);

        SyntaxNode::Block(Block {
            id: self
                .context
                .next_id(),
            blockid: code.to_string(),
            category: Category::Obsolete,
            shape,
            flag: None,
            language: self
                .base
                .clone(),
            comment: None,
            pieces: vec![Piece::Label(code.to_string())],
            ringed: false,
        })
    }

    /// Remember names given to the list argument of list blocks, so
    /// reporters with those names can be recognised as lists.
    fn record_list(&mut self, block: &Block) {
        let position = match block
            .blockid
            .as_str()
        {
            "add _ to _" => 1,
            "delete _ of _" => 1,
            "insert _ at _ of _" => 2,
            "replace item _ of _ with _" => 1,
            "item _ of _" => 1,
            "length of _" => 0,
            "_ contains _" => 0,
            "show list _" => 0,
            "hide list _" => 0,
            _ => return,
        };

        if let Some(SyntaxNode::Insert(Insert {
            shape: InsertShape::Dropdown,
            value: Some(name),
            ..
        })) = block
            .arguments()
            .nth(position)
        {
            self.context
                .lists
                .push(name.clone());
        }
    }
}

fn kind_of(bracket: Option<char>, code: &str, count: usize) -> Kind {
    if count > 1 && bracket != Some('[') {
        return Kind::Block(match bracket {
            Some('(') => Shape::Embedded,
            Some('<') => Shape::Boolean,
            _ => Shape::Stack,
        });
    }

    match bracket {
        Some('(') => {
            if regex!(r"(?i)^([0-9e.-]+( v)?)?$").is_match(code) {
                if code.ends_with(" v") {
                    Kind::Insert(InsertShape::NumberDropdown)
                } else {
                    Kind::Insert(InsertShape::Number)
                }
            } else if code.ends_with(" v") {
                // rounded dropdowns which aren't numbers
                Kind::Insert(InsertShape::NumberDropdown)
            } else {
                Kind::Block(Shape::Reporter)
            }
        }
        Some('[') => {
            if regex!(r"(?i)^#[a-f0-9]{3}([a-f0-9]{3})?$").is_match(code) {
                Kind::Insert(InsertShape::Color)
            } else if code.ends_with(" v") {
                Kind::Insert(InsertShape::Dropdown)
            } else {
                Kind::Insert(InsertShape::String)
            }
        }
        Some('<') => Kind::Block(Shape::Boolean),
        _ => Kind::Block(Shape::Stack),
    }
}

fn trim_ends(tokens: &mut [Token]) {
    if let Some(Token::Text(text)) = tokens.first_mut() {
        *text = text
            .trim_start()
            .to_string();
    }
    if let Some(Token::Text(text)) = tokens.last_mut() {
        *text = text
            .trim_end()
            .to_string();
    }
}

/// Collapse tokens into block text with `_` for each group, and the
/// groups themselves as arguments.
fn filter_pieces(tokens: &[Token]) -> (String, Vec<String>) {
    let mut spec = String::new();
    let mut args = Vec::new();

    for token in tokens {
        match token {
            Token::Text(text) => spec.push_str(text),
            Token::Group(group) => {
                spec.push('_');
                args.push(group.clone());
            }
        }
    }

    (normalize_spec(&spec), args)
}

fn apply_category(block: &mut Block, comment: String) -> String {
    let re = regex!(r"(^| )category=([a-z]+)($| )");
    let Some(cap) = re.captures(&comment) else {
        return comment;
    };
    match Category::from_name(&cap[2]) {
        Some(category) => {
            block.category = category;
            comment
                .replacen(&cap[0], " ", 1)
                .trim()
                .to_string()
        }
        None => comment.clone(),
    }
}

fn apply_overrides(block: &mut Block, overrides: &[String]) {
    for value in overrides {
        if let Some(category) = Category::from_name(value) {
            block.category = category;
        } else if let Some(flag) = Flag::from_name(value) {
            block.flag = Some(flag);
        } else if let Some(shape) = Shape::from_name(value) {
            block.shape = shape;
        }
    }

    if block.flag == Some(Flag::Ring) {
        for piece in &mut block.pieces {
            match piece {
                Piece::Node(SyntaxNode::Block(inner)) => inner.ringed = true,
                Piece::Node(SyntaxNode::Insert(insert)) => {
                    insert.ringed = true;
                    // an empty number slot in a ring takes a reporter
                    if insert.shape == InsertShape::Number && insert.value.is_none() {
                        insert.shape = InsertShape::Reporter;
                    }
                }
                _ => {}
            }
        }
    }
}

/// Split block text on placeholders, image markers and arrows, keeping
/// each separator as its own part.
fn split_spec(text: &str, split_plus: bool) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;

    for (i, c) in text.char_indices() {
        let separator = matches!(c, '_' | '@' | '▶' | '◀' | '▸' | '◂') || (split_plus && c == '+');
        if separator {
            parts.push(&text[start..i]);
            parts.push(&text[i..i + c.len_utf8()]);
            start = i + c.len_utf8();
        }
    }
    parts.push(&text[start..]);

    parts
}

/// The value of a dropdown argument, as compared against the phrase
/// lists: brackets and the dropdown marker removed, then minified.
fn dropdown_value(arg: &str) -> String {
    let inner = strip_brackets(arg);
    let inner = inner
        .strip_suffix(" v")
        .unwrap_or(inner);
    minify(inner)
}

fn lookup_key(pieces: &[Piece]) -> String {
    minify(&normalize_spec(&spec_of(pieces)))
}

fn split_chars(text: &str, count: usize) -> (&str, &str) {
    match text
        .char_indices()
        .nth(count)
    {
        Some((i, _)) => text.split_at(i),
        None => (text, ""),
    }
}

#[cfg(test)]
#[path = "checks/parser.rs"]
mod check;
