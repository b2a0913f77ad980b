use std::collections::HashMap;

use crate::language::NodeId;

/// What the parser learns about a document while reading it, used once
/// the whole document has been seen to recognise custom blocks, lists
/// and custom block parameters.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParseContext {
    /// Unrecognised stack blocks, by minified text.
    pub obsolete_blocks: HashMap<String, Vec<NodeId>>,
    /// Minified outline text of every `define` hat.
    pub define_hats: Vec<String>,
    /// Parameter names declared by `define` hats.
    pub custom_args: Vec<String>,
    /// Unrecognised reporters and booleans, by literal text.
    pub variable_reporters: HashMap<String, Vec<NodeId>>,
    /// Names used as the list argument of list blocks.
    pub lists: Vec<String>,
    next: usize,
}

impl ParseContext {
    pub fn new() -> ParseContext {
        ParseContext::default()
    }

    pub(crate) fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next);
        self.next += 1;
        id
    }

    pub(crate) fn record_obsolete(&mut self, text: String, id: NodeId) {
        self.obsolete_blocks
            .entry(text)
            .or_default()
            .push(id);
    }

    pub(crate) fn record_reporter(&mut self, name: String, id: NodeId) {
        self.variable_reporters
            .entry(name)
            .or_default()
            .push(id);
    }
}
