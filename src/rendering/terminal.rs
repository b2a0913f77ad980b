//! Renderer for colourizing scratchblocks in a terminal

use owo_colors::{OwoColorize, Rgb};

use crate::formatting::*;
use crate::language::Category;

/// Embellish fragments with ANSI escapes to create syntax highlighting in
/// terminal output.
pub struct Terminal;

impl Render for Terminal {
    fn style(&self, syntax: Syntax, content: &str) -> String {
        match syntax {
            Syntax::Neutral => content.to_string(),
            Syntax::Indent => content.to_string(),
            Syntax::Newline => "\n".to_string(),
            Syntax::Block(category) => content
                .color(colour(category))
                .bold()
                .to_string(),
            Syntax::Literal => content
                .bright_white()
                .to_string(),
            Syntax::Punctuation => content // #999999 (grey)
                .color(Rgb(0x99, 0x99, 0x99))
                .to_string(),
            Syntax::Keyword => content
                .color(colour(Category::Control))
                .bold()
                .to_string(),
            Syntax::Comment => content
                .color(Rgb(0x8a, 0x8b, 0x8d))
                .italic()
                .to_string(),
            Syntax::Annotation => content
                .color(Rgb(0x99, 0x99, 0x99))
                .to_string(),
        }
    }
}

/// The fill colour blocks of each category are drawn with.
pub fn colour(category: Category) -> Rgb {
    match category {
        Category::Obsolete => Rgb(0xd4, 0x28, 0x28),
        Category::Motion => Rgb(0x4a, 0x6c, 0xd4),
        Category::Looks => Rgb(0x8a, 0x55, 0xd7),
        Category::Sound => Rgb(0xbb, 0x42, 0xc3),
        Category::Pen => Rgb(0x0e, 0x9a, 0x6c),
        Category::Events => Rgb(0xc8, 0x83, 0x30),
        Category::Control => Rgb(0xe1, 0xa9, 0x1a),
        Category::Sensing => Rgb(0x2c, 0xa5, 0xe2),
        Category::Operators => Rgb(0x5c, 0xb7, 0x12),
        Category::Variables => Rgb(0xee, 0x7d, 0x16),
        Category::List => Rgb(0xcc, 0x5b, 0x22),
        Category::Custom => Rgb(0x63, 0x2d, 0x99),
        Category::CustomArg => Rgb(0x59, 0x47, 0xb1),
        Category::Extension => Rgb(0x4b, 0x4a, 0x60),
        Category::Grey => Rgb(0x96, 0x96, 0x96),
    }
}

#[cfg(test)]
mod check {
    use super::*;

    #[test]
    fn basic_handling() {
        let result = Render::style(&Terminal, Syntax::Neutral, "hello world");
        assert_eq!(result, "hello world");

        let result = Render::style(&Terminal, Syntax::Newline, "\n");
        assert_eq!(result, "\n");
    }

    #[test]
    fn categories_are_coloured() {
        let result = Render::style(&Terminal, Syntax::Block(Category::Motion), "move");
        assert!(result.contains("move"));
        assert!(result.contains("\u{1b}["));
        assert_ne!(
            Render::style(&Terminal, Syntax::Block(Category::Looks), "say"),
            Render::style(&Terminal, Syntax::Block(Category::Sound), "say")
        );
    }
}
