#[cfg(test)]
mod verify {
    use scratchblocks::database::{minify, Database, Language};
    use scratchblocks::language::*;
    use scratchblocks::parsing::{self, ParseOptions};

    fn parse(code: &str) -> Vec<Script> {
        let database = Database::english().unwrap();
        parsing::parse(&database, code, &ParseOptions::default())
    }

    fn block(node: &SyntaxNode) -> &Block {
        match node {
            SyntaxNode::Block(block) => block,
            other => panic!("expected a block, found {:?}", other),
        }
    }

    #[test]
    fn hat_then_stack() {
        let scripts = parse("when green flag clicked\nmove (10) steps");

        assert_eq!(scripts.len(), 1);
        let nodes = scripts[0].nodes();
        assert_eq!(nodes.len(), 2);

        assert_eq!(block(&nodes[0]).shape, Shape::Hat);
        assert_eq!(block(&nodes[0]).category, Category::Events);
        assert_eq!(block(&nodes[1]).shape, Shape::Stack);
        assert_eq!(block(&nodes[1]).category, Category::Motion);
    }

    #[test]
    fn repeat_wraps_body() {
        let scripts = parse("repeat (10)\nmove (10) steps\nend");

        assert_eq!(scripts.len(), 1);
        assert_eq!(scripts[0].nodes().len(), 1);

        let wrap = match &scripts[0].nodes()[0] {
            SyntaxNode::CWrap(wrap) => wrap,
            other => panic!("expected a C block, found {:?}", other),
        };
        assert_eq!(wrap.shape, Shape::Stack);
        assert_eq!(block(&wrap.contents[0]).blockid, "repeat _");

        let mouths: Vec<&CMouth> = wrap
            .contents
            .iter()
            .filter_map(|node| match node {
                SyntaxNode::CMouth(mouth) => Some(mouth),
                _ => None,
            })
            .collect();
        assert_eq!(mouths.len(), 1);
        assert_eq!(mouths[0].contents.len(), 1);
        assert_eq!(block(&mouths[0].contents[0]).shape, Shape::Stack);
    }

    #[test]
    fn custom_block_recognised() {
        let scripts = parse("define jump\njump");

        assert_eq!(scripts.len(), 1);
        let nodes = scripts[0].nodes();
        assert!(matches!(nodes[0], SyntaxNode::DefineHat(_)));
        assert_eq!(block(&nodes[1]).category, Category::Custom);
    }

    #[test]
    fn custom_block_with_arguments() {
        let scripts = parse("define move by (distance) fast <quickly>\nchange x by (distance)\n\nMove by (10) fast <mouse down?>");

        let definition = scripts[0].nodes();
        let change = block(&definition[1]);
        let argument = block(
            change
                .arguments()
                .next()
                .unwrap(),
        );
        assert_eq!(argument.category, Category::CustomArg);

        let call = block(&scripts[1].nodes()[0]);
        assert_eq!(call.category, Category::Custom);
    }

    #[test]
    fn list_recognised() {
        let scripts = parse("add [thing] to [mylist v]\nmylist");

        let nodes = scripts
            .iter()
            .flat_map(|script| script.nodes())
            .collect::<Vec<_>>();
        let last = block(nodes[nodes.len() - 1]);
        assert_eq!(last.spec(), "mylist");
        assert_eq!(last.category, Category::List);
    }

    #[test]
    fn list_reporter_recognised() {
        let scripts = parse("say (inventory)\ndelete (1) of [inventory v]");

        let say = block(&scripts[0].nodes()[0]);
        let reporter = block(
            say.arguments()
                .next()
                .unwrap(),
        );
        assert_eq!(reporter.category, Category::List);
    }

    #[test]
    fn unknown_line_is_obsolete() {
        let scripts = parse("foo bar baz");

        assert_eq!(scripts.len(), 1);
        assert_eq!(scripts[0].nodes().len(), 1);
        let result = block(&scripts[0].nodes()[0]);
        assert_eq!(result.category, Category::Obsolete);
        assert_eq!(result.shape, Shape::Stack);
        assert_eq!(result.spec(), "foo bar baz");
    }

    #[test]
    fn comparison_inside_boolean() {
        let scripts = parse("<[6] < [3]>");

        let result = block(&scripts[0].nodes()[0]);
        assert_eq!(result.blockid, "_ < _");
        assert_eq!(result.shape, Shape::Boolean);

        let arguments: Vec<_> = result
            .arguments()
            .collect();
        assert_eq!(arguments.len(), 2);
        assert_eq!(
            arguments[0],
            &SyntaxNode::Insert(Insert::new(InsertShape::String, "6"))
        );
        assert_eq!(
            arguments[1],
            &SyntaxNode::Insert(Insert::new(InsertShape::String, "3"))
        );
    }

    #[test]
    fn minify_is_idempotent() {
        for text in [
            "Move (10) Steps!",
            "  go to x: _   y: _ ",
            "Größe ändern um _%",
            ". . .",
            "…",
            "",
            "when ⚑ clicked",
        ] {
            let once = minify(text);
            assert_eq!(minify(&once), once);
        }
    }

    #[test]
    fn url_in_block_is_not_a_comment() {
        let scripts = parse("say [see http://scratch.mit.edu]");

        let result = block(&scripts[0].nodes()[0]);
        assert_eq!(result.blockid, "say _");
        assert_eq!(result.comment, None);
        assert_eq!(
            result
                .arguments()
                .next(),
            Some(&SyntaxNode::Insert(Insert::new(
                InsertShape::String,
                "see http://scratch.mit.edu"
            )))
        );
    }

    #[test]
    fn custom_separator() {
        let database = Database::english().unwrap();
        let options = ParseOptions {
            separator: ";".to_string(),
            ..Default::default()
        };

        let scripts = parsing::parse(&database, "when green flag clicked;move (10) steps", &options);
        assert_eq!(scripts.len(), 1);
        assert_eq!(scripts[0].nodes().len(), 2);
    }

    #[test]
    fn inline_is_one_line() {
        let database = Database::english().unwrap();
        let options = ParseOptions {
            inline: true,
            ..Default::default()
        };

        let scripts = parsing::parse(&database, "move (10)\n steps", &options);
        assert_eq!(scripts.len(), 1);
        assert_eq!(block(&scripts[0].nodes()[0]).blockid, "move _ steps");
    }

    #[test]
    fn crlf_input() {
        let scripts = parse("when green flag clicked\r\nmove (10) steps\r\n");

        assert_eq!(scripts.len(), 1);
        assert_eq!(block(&scripts[0].nodes()[1]).blockid, "move _ steps");
    }

    #[test]
    fn translation_requested_by_code() {
        let database = Database::english().unwrap();
        let blocks = database
            .blockids()
            .iter()
            .map(|blockid| {
                if blockid == "move _ steps" {
                    "gehe _ er-Schritt".to_string()
                } else {
                    blockid.clone()
                }
            })
            .collect();
        let database = database.with_translation(Language {
            code: "de".to_string(),
            blocks,
            aliases: Default::default(),
            define: vec!["Definiere".to_string()],
            ignore_lt: vec![],
            math: vec![],
            osis: vec![],
        });

        let code = "gehe (10) er-Schritt\n\ndefiniere springen\nspringen";

        let scripts = parsing::parse(&database, code, &ParseOptions::default());
        assert_eq!(
            block(&scripts[0].nodes()[0]).category,
            Category::Obsolete
        );

        let options = ParseOptions {
            languages: vec!["de".to_string()],
            ..Default::default()
        };
        let scripts = parsing::parse(&database, code, &options);

        let result = block(&scripts[0].nodes()[0]);
        assert_eq!(result.blockid, "move _ steps");
        assert_eq!(result.language, "de");
        assert_eq!(block(&scripts[1].nodes()[1]).category, Category::Custom);
    }

    #[test]
    fn json_output() {
        let scripts = parse("move (10) steps // go");
        let value = serde_json::to_value(&scripts).unwrap();

        let node = &value[0][0];
        assert_eq!(node["type"], "block");
        assert_eq!(node["blockid"], "move _ steps");
        assert_eq!(node["category"], "motion");
        assert_eq!(node["shape"], "stack");
        assert_eq!(node["comment"], "go");
        assert_eq!(node["pieces"][0]["kind"], "label");
        assert_eq!(node["pieces"][1]["value"]["type"], "insert");
        assert_eq!(node["pieces"][1]["value"]["shape"], "number");
        assert_eq!(node["pieces"][1]["value"]["value"], "10");
    }

    #[test]
    fn json_structure_names() {
        let scripts = parse("repeat (3)\nstop [all v]\nend");
        let value = serde_json::to_value(&scripts).unwrap();

        let wrap = &value[0][0];
        assert_eq!(wrap["type"], "c-wrap");

        let contents = &wrap["contents"];
        assert_eq!(contents[0]["flag"], "cstart");
        assert_eq!(contents[1]["type"], "c-mouth");
        assert_eq!(contents[1]["capend"], true);
        assert_eq!(contents[2]["flag"], "cend");
    }
}
