//! Code formatter for scratchblocks scripts

use crate::database::image_text;
use crate::formatting::*;
use crate::language::*;

/// Format scripts as canonical text with no markup.
pub fn format(scripts: &[Script]) -> String {
    format_with_renderer(scripts, false)
        .into_iter()
        .map(|(_, content)| content)
        .collect()
}

/// Convert scripts into fragments tagged with their kind of content. With
/// `annotate` set every line carries an explicit `:: category` override.
pub fn format_with_renderer(scripts: &[Script], annotate: bool) -> Vec<(Syntax, String)> {
    let mut output = Formatter::new(annotate);

    for (i, script) in scripts
        .iter()
        .enumerate()
    {
        // a blank line between scripts
        if i > 0 {
            output.newline();
        }
        for node in script.nodes() {
            output.format_line(node);
        }
    }

    output.fragments
}

struct Formatter {
    fragments: Vec<(Syntax, String)>,
    nesting: usize,
    annotate: bool,
}

impl Formatter {
    fn new(annotate: bool) -> Formatter {
        Formatter {
            fragments: Vec::new(),
            nesting: 0,
            annotate,
        }
    }

    fn append(&mut self, syntax: Syntax, content: &str) {
        if content.is_empty() {
            return;
        }
        self.fragments
            .push((syntax, content.to_string()));
    }

    fn increase(&mut self) {
        self.nesting += 1;
    }

    fn decrease(&mut self) {
        self.nesting -= 1;
    }

    fn indent(&mut self) {
        if self.nesting > 0 {
            let spaces = " ".repeat(self.nesting * 4);
            self.append(Syntax::Indent, &spaces);
        }
    }

    fn newline(&mut self) {
        self.append(Syntax::Newline, "\n");
    }

    fn format_line(&mut self, node: &SyntaxNode) {
        match node {
            SyntaxNode::Block(block) => {
                self.indent();
                self.append_statement(block);
                self.append_comment(block.comment.as_deref());
                self.newline();
            }
            SyntaxNode::DefineHat(define) => {
                self.indent();
                self.append_define(define);
                self.append_comment(define.comment.as_deref());
                self.newline();
            }
            SyntaxNode::CWrap(wrap) => {
                for node in &wrap.contents {
                    self.format_line(node);
                }
            }
            SyntaxNode::CMouth(mouth) => {
                self.increase();
                for node in &mouth.contents {
                    self.format_line(node);
                }
                self.decrease();
            }
            SyntaxNode::Insert(insert) => {
                self.indent();
                self.append_insert(insert);
                self.newline();
            }
            SyntaxNode::Comment { text } => {
                self.indent();
                self.append(Syntax::Comment, "//");
                if !text.is_empty() {
                    self.append(Syntax::Comment, " ");
                    self.append(Syntax::Comment, text);
                }
                self.newline();
            }
        }
    }

    /// A block written as a line of its own.
    fn append_statement(&mut self, block: &Block) {
        if block.flag == Some(Flag::CEnd)
            && block
                .pieces
                .is_empty()
        {
            self.append(Syntax::Keyword, "end");
            self.append_overrides(block, self.annotate);
            return;
        }

        // a free-floating insert, drawn without a block around it
        if block.blockid == "_" {
            if let [Piece::Node(node)] = block
                .pieces
                .as_slice()
            {
                self.append_argument(node);
                return;
            }
        }

        self.append_block(block, self.annotate, false);
    }

    fn append_block(&mut self, block: &Block, annotate: bool, nested: bool) {
        let syntax = Syntax::Block(block.category);
        let (open, close) = match block.shape {
            Shape::Boolean => ("<", ">"),
            Shape::Reporter | Shape::Embedded => ("(", ")"),
            _ if nested => ("{", "}"),
            _ => ("", ""),
        };

        self.append(syntax, open);
        for piece in &block.pieces {
            match piece {
                Piece::Label(text) => self.append(syntax, text),
                Piece::Icon(token) => match image_text(token) {
                    Some(text) => self.append(syntax, text),
                    None => self.append(syntax, &format!("@{}", token)),
                },
                Piece::Node(node) => self.append_argument(node),
            }
        }
        self.append_overrides(block, annotate);
        self.append(syntax, close);
    }

    fn append_overrides(&mut self, block: &Block, annotate: bool) {
        let mut overrides = Vec::new();
        if annotate {
            overrides.push(
                block
                    .category
                    .as_str(),
            );
        }
        if block.flag == Some(Flag::Ring) {
            overrides.push(Flag::Ring.as_str());
        }

        if !overrides.is_empty() {
            self.append(Syntax::Annotation, " :: ");
            self.append(Syntax::Annotation, &overrides.join(" "));
        }
    }

    fn append_argument(&mut self, node: &SyntaxNode) {
        match node {
            SyntaxNode::Insert(insert) => self.append_insert(insert),
            SyntaxNode::Block(block) => self.append_block(block, false, true),
            SyntaxNode::DefineHat(define) => self.append_define(define),
            // structure never appears as an argument
            _ => {}
        }
    }

    fn append_insert(&mut self, insert: &Insert) {
        let value = insert
            .value
            .as_deref()
            .unwrap_or("");

        let (open, text, close) = match insert.shape {
            InsertShape::Number => ("(", value.to_string(), ")"),
            InsertShape::NumberDropdown => ("(", format!("{} v", value), ")"),
            InsertShape::String | InsertShape::Color => ("[", value.to_string(), "]"),
            InsertShape::Dropdown => ("[", format!("{} v", value), "]"),
            InsertShape::Boolean => ("<", String::new(), ">"),
            InsertShape::Stack => ("{", String::new(), "}"),
            InsertShape::Reporter => ("(", String::new(), ")"),
        };

        self.append(Syntax::Punctuation, open);
        self.append(Syntax::Literal, &text);
        self.append(Syntax::Punctuation, close);
    }

    fn append_define(&mut self, define: &DefineHat) {
        self.append(Syntax::Keyword, &define.keyword);

        if define
            .outline
            .pieces
            .is_empty()
        {
            return;
        }
        self.append(Syntax::Neutral, " ");

        for piece in &define
            .outline
            .pieces
        {
            match piece {
                Piece::Label(text) => self.append(Syntax::Block(Category::Custom), text),
                Piece::Icon(token) => self.append(Syntax::Block(Category::Custom), token),
                Piece::Node(node) => self.append_argument(node),
            }
        }
    }

    fn append_comment(&mut self, comment: Option<&str>) {
        if let Some(text) = comment {
            self.append(Syntax::Neutral, " ");
            self.append(Syntax::Comment, "// ");
            self.append(Syntax::Comment, text);
        }
    }

    #[cfg(test)]
    fn to_string(&self) -> String {
        self.fragments
            .iter()
            .map(|(_, content)| content.as_str())
            .collect()
    }
}
