//! Grouping parsed lines into scripts, nesting the contents of C blocks.

use std::mem::take;
use tracing::debug;

use crate::language::*;

/// A C block whose end hasn't been seen yet.
#[derive(Debug, Clone, PartialEq)]
struct OpenWrap {
    shape: Shape,
    category: Category,
    /// Header, and any completed mouths and else markers.
    contents: Vec<SyntaxNode>,
    /// The mouth currently being filled.
    mouth: Vec<SyntaxNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Assembler {
    top: Vec<SyntaxNode>,
    open: Vec<OpenWrap>,
    scripts: Vec<Script>,
}

impl Assembler {
    pub(crate) fn new() -> Assembler {
        Assembler {
            top: vec![],
            open: vec![],
            scripts: vec![],
        }
    }

    /// A blank line ends the current script, unless inside a C block.
    pub(crate) fn blank(&mut self) {
        if self
            .open
            .is_empty()
        {
            self.seal();
        }
    }

    pub(crate) fn push(&mut self, node: SyntaxNode) {
        match node {
            SyntaxNode::Comment { .. }
                if self
                    .open
                    .is_empty() =>
            {
                self.seal();
                self.current()
                    .push(node);
                self.seal();
            }
            SyntaxNode::DefineHat(_) => {
                self.seal();
                self.current()
                    .push(node);
            }
            SyntaxNode::Block(block) => self.push_block(block),
            other => self
                .current()
                .push(other),
        }
    }

    fn push_block(&mut self, block: Block) {
        match (block.flag, block.shape) {
            (Some(Flag::CStart), _) => self.open_wrap(block),
            (Some(Flag::CElse), _) if !self
                .open
                .is_empty() =>
            {
                self.next_mouth(block)
            }
            (Some(Flag::CEnd), _) if !self
                .open
                .is_empty() =>
            {
                self.close_wrap(block)
            }
            (Some(Flag::Ring), _)
            | (None, Shape::Reporter)
            | (None, Shape::Boolean)
            | (None, Shape::Embedded) => {
                // free-floating reporters get a script of their own
                self.seal();
                self.current()
                    .push(SyntaxNode::Block(block));
                self.seal();
            }
            (None, Shape::Hat) => {
                self.seal();
                self.current()
                    .push(SyntaxNode::Block(block));
            }
            (None, Shape::Cap) => {
                self.current()
                    .push(SyntaxNode::Block(block));
                if self
                    .open
                    .is_empty()
                {
                    self.seal();
                }
            }
            _ => self
                .current()
                .push(SyntaxNode::Block(block)),
        }
    }

    fn current(&mut self) -> &mut Vec<SyntaxNode> {
        match self
            .open
            .last_mut()
        {
            Some(wrap) => &mut wrap.mouth,
            None => &mut self.top,
        }
    }

    fn open_wrap(&mut self, mut header: Block) {
        let shape = if header.shape == Shape::Cap {
            Shape::Cap
        } else {
            Shape::Stack
        };
        header.shape = Shape::Stack;

        self.open
            .push(OpenWrap {
                shape,
                category: header.category,
                contents: vec![SyntaxNode::Block(header)],
                mouth: vec![],
            });
    }

    fn next_mouth(&mut self, mut marker: Block) {
        if let Some(wrap) = self
            .open
            .last_mut()
        {
            let mouth = close_mouth(wrap.category, take(&mut wrap.mouth));
            marker.category = wrap.category;
            wrap.contents
                .push(mouth);
            wrap.contents
                .push(SyntaxNode::Block(marker));
        }
    }

    fn close_wrap(&mut self, mut marker: Block) {
        if let Some(mut wrap) = self
            .open
            .pop()
        {
            let mouth = close_mouth(wrap.category, wrap.mouth);
            marker.category = wrap.category;
            wrap.contents
                .push(mouth);
            wrap.contents
                .push(SyntaxNode::Block(marker));

            self.current()
                .push(SyntaxNode::CWrap(CWrap {
                    shape: wrap.shape,
                    category: wrap.category,
                    contents: wrap.contents,
                }));
        }
    }

    /// End the current script, closing any C blocks left open.
    fn seal(&mut self) {
        if self
            .top
            .is_empty()
            && self
                .open
                .is_empty()
        {
            return;
        }

        if !self
            .open
            .is_empty()
        {
            debug!(
                "Closing {} unterminated C block(s)",
                self.open
                    .len()
            );
        }
        while !self
            .open
            .is_empty()
        {
            self.close_wrap(end_marker());
        }

        self.scripts
            .push(Script(take(&mut self.top)));
    }

    pub(crate) fn finish(mut self) -> Vec<Script> {
        self.seal();
        self.scripts
    }
}

fn close_mouth(category: Category, contents: Vec<SyntaxNode>) -> SyntaxNode {
    let cap_end = contents
        .last()
        .is_some_and(|node| node.is_cap());

    SyntaxNode::CMouth(CMouth {
        category,
        cap_end,
        contents,
    })
}

/// The `end` written in for C blocks still open when a script ends.
fn end_marker() -> Block {
    Block {
        id: NodeId(usize::MAX),
        blockid: "end".to_string(),
        category: Category::Control,
        shape: Shape::Stack,
        flag: Some(Flag::CEnd),
        language: "en".to_string(),
        comment: None,
        pieces: vec![],
        ringed: false,
    }
}

#[cfg(test)]
#[path = "checks/assembler.rs"]
mod check;
