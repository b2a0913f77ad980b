#[cfg(test)]
mod database {
    use scratchblocks::database::{Database, LookupIndex};
    use scratchblocks::language::*;
    use scratchblocks::parsing::parser::Parser;

    /// Write a blockid the way someone would type it: image markers as a
    /// bare `@` and every placeholder filled with a string.
    fn typed(blockid: &str) -> String {
        let text = blockid
            .split(' ')
            .map(|word| {
                if word.starts_with('@') {
                    "@"
                } else {
                    word
                }
            })
            .collect::<Vec<_>>()
            .join(" ");
        text.replace('_', "[a]")
    }

    #[test]
    fn every_block_parses_to_itself() {
        let database = Database::english().unwrap();
        let index = LookupIndex::build(&database, &[]);
        let mut parser = Parser::new(&index);

        let mut failures = Vec::new();

        for descriptor in database.descriptors() {
            if matches!(
                descriptor
                    .blockid
                    .as_str(),
                "_ of _" | "length of _" | "stop _"
            ) {
                continue;
            }

            let text = typed(&descriptor.blockid);
            let node = parser.parse_line(&text);

            let block = match node {
                SyntaxNode::Block(block) => block,
                other => {
                    failures.push(format!("{}: parsed as {:?}", text, other));
                    continue;
                }
            };

            if block.category != descriptor.category {
                failures.push(format!(
                    "{}: category {} instead of {}",
                    text, block.category, descriptor.category
                ));
            }
            if let Some(shape) = descriptor.shape {
                if block.shape != shape {
                    failures.push(format!(
                        "{}: shape {:?} instead of {:?}",
                        text, block.shape, shape
                    ));
                }
            }
            if block.flag != descriptor.flag {
                failures.push(format!(
                    "{}: flag {:?} instead of {:?}",
                    text, block.flag, descriptor.flag
                ));
            }
        }

        if !failures.is_empty() {
            for failure in &failures {
                println!("{}", failure);
            }
            panic!("{} blocks did not parse to themselves", failures.len());
        }
    }

    #[test]
    fn disambiguated_blocks_follow_their_argument() {
        let database = Database::english().unwrap();
        let index = LookupIndex::build(&database, &[]);
        let mut parser = Parser::new(&index);

        let cases = [
            ("([abs v] of (-3))", Category::Operators, Shape::Embedded),
            ("([10^ v] of (2))", Category::Operators, Shape::Embedded),
            ("([costume # v] of [Sprite1 v])", Category::Sensing, Shape::Embedded),
            ("(length of [high scores v])", Category::List, Shape::Embedded),
            ("(length of [banana])", Category::Operators, Shape::Embedded),
            ("stop [this script v]", Category::Control, Shape::Cap),
            ("stop [other scripts in stage v]", Category::Control, Shape::Stack),
        ];

        for (text, category, shape) in cases {
            match parser.parse_line(text) {
                SyntaxNode::Block(block) => {
                    assert_eq!(block.category, category, "{}", text);
                    assert_eq!(block.shape, shape, "{}", text);
                }
                other => panic!("{}: parsed as {:?}", text, other),
            }
        }
    }
}
