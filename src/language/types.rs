//! Types representing the syntax tree of a scratchblocks document

use serde::Serialize;
use std::fmt;

/// The colour family a block belongs to. These double as the vocabulary
/// accepted by `:: category` overrides and `category=` comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Motion,
    Looks,
    Sound,
    Pen,
    Variables,
    List,
    Events,
    Control,
    Sensing,
    Operators,
    Custom,
    CustomArg,
    Extension,
    Grey,
    Obsolete,
}

impl Category {
    pub const ALL: [Category; 15] = [
        Category::Motion,
        Category::Looks,
        Category::Sound,
        Category::Pen,
        Category::Variables,
        Category::List,
        Category::Events,
        Category::Control,
        Category::Sensing,
        Category::Operators,
        Category::Custom,
        Category::CustomArg,
        Category::Extension,
        Category::Grey,
        Category::Obsolete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Motion => "motion",
            Category::Looks => "looks",
            Category::Sound => "sound",
            Category::Pen => "pen",
            Category::Variables => "variables",
            Category::List => "list",
            Category::Events => "events",
            Category::Control => "control",
            Category::Sensing => "sensing",
            Category::Operators => "operators",
            Category::Custom => "custom",
            Category::CustomArg => "custom-arg",
            Category::Extension => "extension",
            Category::Grey => "grey",
            Category::Obsolete => "obsolete",
        }
    }

    pub fn from_name(name: &str) -> Option<Category> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == name)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outline of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Shape {
    Hat,
    Cap,
    Stack,
    Embedded,
    Boolean,
    Reporter,
}

impl Shape {
    pub fn as_str(&self) -> &'static str {
        match self {
            Shape::Hat => "hat",
            Shape::Cap => "cap",
            Shape::Stack => "stack",
            Shape::Embedded => "embedded",
            Shape::Boolean => "boolean",
            Shape::Reporter => "reporter",
        }
    }

    pub fn from_name(name: &str) -> Option<Shape> {
        match name {
            "hat" => Some(Shape::Hat),
            "cap" => Some(Shape::Cap),
            "stack" => Some(Shape::Stack),
            "embedded" => Some(Shape::Embedded),
            "boolean" => Some(Shape::Boolean),
            "reporter" => Some(Shape::Reporter),
            _ => None,
        }
    }
}

/// Marks blocks which open, continue or close a C block, or wrap their
/// arguments in a ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Flag {
    CStart,
    CElse,
    CEnd,
    Ring,
}

impl Flag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Flag::CStart => "cstart",
            Flag::CElse => "celse",
            Flag::CEnd => "cend",
            Flag::Ring => "ring",
        }
    }

    pub fn from_name(name: &str) -> Option<Flag> {
        match name {
            "cstart" => Some(Flag::CStart),
            "celse" => Some(Flag::CElse),
            "cend" => Some(Flag::CEnd),
            "ring" => Some(Flag::Ring),
            _ => None,
        }
    }
}

/// Shape of an argument slot holding a literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InsertShape {
    String,
    Number,
    Dropdown,
    NumberDropdown,
    Color,
    Boolean,
    Stack,
    Reporter,
}

/// Identifies a block within one parse call so that the resolver can
/// find it again once the whole document has been assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum Piece {
    Label(String),
    Icon(String),
    Node(SyntaxNode),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Block {
    #[serde(skip)]
    pub id: NodeId,
    pub blockid: String,
    pub category: Category,
    pub shape: Shape,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flag: Option<Flag>,
    pub language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub pieces: Vec<Piece>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub ringed: bool,
}

impl Block {
    /// The literal text of this block with its arguments shown as
    /// underscores, the same form block specs are written in.
    pub fn spec(&self) -> String {
        spec_of(&self.pieces)
    }

    /// Iterate over the argument nodes, in order.
    pub fn arguments(&self) -> impl Iterator<Item = &SyntaxNode> {
        self.pieces
            .iter()
            .filter_map(|piece| match piece {
                Piece::Node(node) => Some(node),
                _ => None,
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insert {
    pub shape: InsertShape,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub ringed: bool,
}

impl Insert {
    pub fn new(shape: InsertShape, value: &str) -> Insert {
        Insert {
            shape,
            value: if value.is_empty() {
                None
            } else {
                Some(value.to_string())
            },
            ringed: false,
        }
    }
}

/// The parameter list of a custom block definition; text labels
/// interleaved with custom-arg blocks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outline {
    pub pieces: Vec<Piece>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefineHat {
    pub keyword: String,
    pub outline: Outline,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl DefineHat {
    /// Names of the declared parameters.
    pub fn parameters(&self) -> Vec<String> {
        self.outline
            .pieces
            .iter()
            .filter_map(|piece| match piece {
                Piece::Node(SyntaxNode::Block(block)) => Some(block.spec()),
                _ => None,
            })
            .collect()
    }
}

/// A whole C block: its header, one mouth per branch, any else headers
/// between them and the closing end marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CWrap {
    pub shape: Shape,
    pub category: Category,
    pub contents: Vec<SyntaxNode>,
}

/// The body of one branch of a C block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CMouth {
    pub category: Category,
    #[serde(rename = "capend", skip_serializing_if = "std::ops::Not::not")]
    pub cap_end: bool,
    pub contents: Vec<SyntaxNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SyntaxNode {
    Block(Block),
    Insert(Insert),
    DefineHat(DefineHat),
    CWrap(CWrap),
    CMouth(CMouth),
    Comment { text: String },
}

impl SyntaxNode {
    pub fn category(&self) -> Option<Category> {
        match self {
            SyntaxNode::Block(block) => Some(block.category),
            SyntaxNode::DefineHat(_) => Some(Category::Custom),
            SyntaxNode::CWrap(wrap) => Some(wrap.category),
            SyntaxNode::CMouth(mouth) => Some(mouth.category),
            SyntaxNode::Insert(_) | SyntaxNode::Comment { .. } => None,
        }
    }

    /// Whether nothing can be stacked below this node.
    pub fn is_cap(&self) -> bool {
        match self {
            SyntaxNode::Block(block) => block.shape == Shape::Cap,
            SyntaxNode::CWrap(wrap) => wrap.shape == Shape::Cap,
            _ => false,
        }
    }
}

/// One independent stack of blocks, or a lone reporter or comment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Script(pub Vec<SyntaxNode>);

impl Script {
    pub fn nodes(&self) -> &[SyntaxNode] {
        &self.0
    }

    /// Every block in this script, including those nested in C blocks
    /// and in arguments, in reading order.
    pub fn blocks(&self) -> Vec<&Block> {
        let mut result = Vec::new();
        for node in &self.0 {
            collect_blocks(node, &mut result);
        }
        result
    }
}

fn collect_blocks<'a>(node: &'a SyntaxNode, result: &mut Vec<&'a Block>) {
    let pieces = match node {
        SyntaxNode::Block(block) => {
            result.push(block);
            &block.pieces
        }
        SyntaxNode::DefineHat(define) => &define
            .outline
            .pieces,
        SyntaxNode::CWrap(CWrap { contents, .. }) | SyntaxNode::CMouth(CMouth { contents, .. }) => {
            for node in contents {
                collect_blocks(node, result);
            }
            return;
        }
        SyntaxNode::Insert(_) | SyntaxNode::Comment { .. } => return,
    };

    for piece in pieces {
        if let Piece::Node(node) = piece {
            collect_blocks(node, result);
        }
    }
}

/// Rebuild block text from pieces, each argument written as `_`.
pub fn spec_of(pieces: &[Piece]) -> String {
    let mut spec = String::new();
    for piece in pieces {
        match piece {
            Piece::Label(text) => spec.push_str(text),
            Piece::Icon(_) => spec.push('@'),
            Piece::Node(_) => spec.push('_'),
        }
    }
    spec
}

#[cfg(test)]
mod check {
    use super::*;

    #[test]
    fn category_names() {
        for category in Category::ALL {
            assert_eq!(Category::from_name(category.as_str()), Some(category));
        }
        assert_eq!(Category::from_name("custom-arg"), Some(Category::CustomArg));
        assert_eq!(Category::from_name("purple"), None);
    }

    #[test]
    fn spec_from_pieces() {
        let pieces = vec![
            Piece::Label("move ".to_string()),
            Piece::Node(SyntaxNode::Insert(Insert::new(InsertShape::Number, "10"))),
            Piece::Label(" steps".to_string()),
        ];
        assert_eq!(spec_of(&pieces), "move _ steps");
    }

    #[test]
    fn blocks_in_reading_order() {
        let reporter = Block {
            id: NodeId(2),
            blockid: "x position".to_string(),
            category: Category::Motion,
            shape: Shape::Reporter,
            flag: None,
            language: "en".to_string(),
            comment: None,
            pieces: vec![Piece::Label("x position".to_string())],
            ringed: false,
        };
        let say = Block {
            id: NodeId(1),
            blockid: "say _".to_string(),
            category: Category::Looks,
            shape: Shape::Stack,
            flag: None,
            language: "en".to_string(),
            comment: None,
            pieces: vec![
                Piece::Label("say ".to_string()),
                Piece::Node(SyntaxNode::Block(reporter)),
            ],
            ringed: false,
        };
        let script = Script(vec![SyntaxNode::CWrap(CWrap {
            shape: Shape::Cap,
            category: Category::Control,
            contents: vec![SyntaxNode::CMouth(CMouth {
                category: Category::Control,
                cap_end: false,
                contents: vec![SyntaxNode::Block(say)],
            })],
        })]);

        let ids: Vec<_> = script
            .blocks()
            .iter()
            .map(|block| block.id)
            .collect();
        assert_eq!(ids, vec![NodeId(1), NodeId(2)]);
    }

    #[test]
    fn empty_insert_has_no_value() {
        let insert = Insert::new(InsertShape::String, "");
        assert_eq!(insert.value, None);
    }
}
