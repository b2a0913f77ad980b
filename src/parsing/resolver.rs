//! Recognising custom blocks, lists and custom block parameters once the
//! whole document has been read.

use std::collections::HashMap;
use tracing::debug;

use crate::database::minify;
use crate::language::*;
use crate::parsing::context::ParseContext;

/// Recategorise nodes using what was learned while parsing: obsolete
/// blocks matching a `define` hat become custom blocks, reporters (and
/// bare words on a line of their own) named as lists become list
/// reporters, and reporters named as parameters become custom block
/// arguments. Where more than one applies, the last of these wins.
pub fn resolve(scripts: &mut [Script], context: &ParseContext) {
    let mut categories: HashMap<NodeId, Category> = HashMap::new();

    mark(
        &mut categories,
        &context.define_hats,
        &context.obsolete_blocks,
        Category::Custom,
    );
    let lists: Vec<String> = context
        .lists
        .iter()
        .map(|name| minify(name))
        .collect();
    mark(
        &mut categories,
        &lists,
        &context.obsolete_blocks,
        Category::List,
    );
    mark(
        &mut categories,
        &context.lists,
        &context.variable_reporters,
        Category::List,
    );
    mark(
        &mut categories,
        &context.custom_args,
        &context.variable_reporters,
        Category::CustomArg,
    );

    if categories.is_empty() {
        return;
    }

    debug!("Recategorising {} blocks", categories.len());

    for script in scripts {
        for node in &mut script.0 {
            apply(node, &categories);
        }
    }
}

fn mark(
    categories: &mut HashMap<NodeId, Category>,
    names: &[String],
    found: &HashMap<String, Vec<NodeId>>,
    category: Category,
) {
    for name in names {
        if let Some(ids) = found.get(name) {
            for id in ids {
                categories.insert(*id, category);
            }
        }
    }
}

fn apply(node: &mut SyntaxNode, categories: &HashMap<NodeId, Category>) {
    match node {
        SyntaxNode::Block(block) => {
            if let Some(category) = categories.get(&block.id) {
                block.category = *category;
            }
            apply_pieces(&mut block.pieces, categories);
        }
        SyntaxNode::DefineHat(define) => apply_pieces(&mut define.outline.pieces, categories),
        SyntaxNode::CWrap(wrap) => {
            for node in &mut wrap.contents {
                apply(node, categories);
            }
        }
        SyntaxNode::CMouth(mouth) => {
            for node in &mut mouth.contents {
                apply(node, categories);
            }
        }
        SyntaxNode::Insert(_) | SyntaxNode::Comment { .. } => {}
    }
}

fn apply_pieces(pieces: &mut [Piece], categories: &HashMap<NodeId, Category>) {
    for piece in pieces {
        if let Piece::Node(node) = piece {
            apply(node, categories);
        }
    }
}
