//! Styled output of formatted scripts.

use crate::formatting::*;
use crate::language::Script;

mod terminal;

pub use terminal::Terminal;

/// We do the code formatting in two passes. First we convert the scripts
/// into a Vec of "fragments" (Syntax tag, String pairs). Then second we
/// apply the specified renderer to each pair to result in an embellished
/// String.
pub fn render(renderer: &impl Render, scripts: &[Script], annotate: bool) -> String {
    let fragments = format_with_renderer(scripts, annotate);

    let mut output = String::new();
    for (syntax, content) in fragments {
        let rendered = renderer.style(syntax, &content);
        output.push_str(&rendered);
    }

    output
}
