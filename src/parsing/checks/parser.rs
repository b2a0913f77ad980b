use super::*;
use crate::database::Database;

fn line(text: &str) -> SyntaxNode {
    lines(&[text])
        .0
        .remove(0)
}

fn fragment(text: &str) -> SyntaxNode {
    let database = Database::english().unwrap();
    let index = LookupIndex::build(&database, &[]);
    let mut parser = Parser::new(&index);
    parser.parse_fragment(text, true)
}

fn lines(texts: &[&str]) -> (Vec<SyntaxNode>, ParseContext) {
    let database = Database::english().unwrap();
    let index = LookupIndex::build(&database, &[]);
    let mut parser = Parser::new(&index);
    let nodes = texts
        .iter()
        .map(|text| parser.parse_line(text))
        .collect();
    (nodes, parser.into_context())
}

fn block(node: &SyntaxNode) -> &Block {
    match node {
        SyntaxNode::Block(block) => block,
        other => panic!("expected a block, found {:?}", other),
    }
}

fn insert(node: &SyntaxNode) -> &Insert {
    match node {
        SyntaxNode::Insert(insert) => insert,
        other => panic!("expected an insert, found {:?}", other),
    }
}

fn number(value: &str) -> Piece {
    Piece::Node(SyntaxNode::Insert(Insert::new(InsertShape::Number, value)))
}

fn label(text: &str) -> Piece {
    Piece::Label(text.to_string())
}

#[test]
fn known_stack_block() {
    let node = line("move (10) steps");
    let result = block(&node);

    assert_eq!(result.blockid, "move _ steps");
    assert_eq!(result.category, Category::Motion);
    assert_eq!(result.shape, Shape::Stack);
    assert_eq!(result.flag, None);
    assert_eq!(result.language, "en");
    assert_eq!(
        result.pieces,
        vec![label("move "), number("10"), label(" steps")]
    );
}

#[test]
fn lookup_ignores_case_and_spacing() {
    let node = line("MOVE   (10)    Steps");
    assert_eq!(block(&node).blockid, "move _ steps");

    let node = line("go to x:(1) y:(2)");
    assert_eq!(block(&node).blockid, "go to x:_ y:_");
}

#[test]
fn insert_shapes() {
    let result = fragment("(10)");
    assert_eq!(insert(&result), &Insert::new(InsertShape::Number, "10"));

    let result = fragment("(-1.5e3)");
    assert_eq!(insert(&result).shape, InsertShape::Number);

    let result = fragment("()");
    assert_eq!(insert(&result), &Insert::new(InsertShape::Number, ""));

    let result = fragment("(10 v)");
    assert_eq!(insert(&result), &Insert::new(InsertShape::NumberDropdown, "10"));

    let result = fragment("(costume name v)");
    assert_eq!(
        insert(&result),
        &Insert::new(InsertShape::NumberDropdown, "costume name")
    );

    let result = fragment("[Hello!]");
    assert_eq!(insert(&result), &Insert::new(InsertShape::String, "Hello!"));

    let result = fragment("[mouse-pointer v]");
    assert_eq!(insert(&result), &Insert::new(InsertShape::Dropdown, "mouse-pointer"));

    let result = fragment("[#C0FFEE]");
    assert_eq!(insert(&result), &Insert::new(InsertShape::Color, "#C0FFEE"));

    let result = fragment("[#abcd]");
    assert_eq!(insert(&result).shape, InsertShape::String);

    let result = fragment("<>");
    assert_eq!(insert(&result), &Insert::new(InsertShape::Boolean, ""));

    let result = fragment("{}");
    assert_eq!(insert(&result), &Insert::new(InsertShape::Stack, ""));
}

#[test]
fn square_brackets_never_make_blocks() {
    let result = fragment("[say (hello)]");
    assert_eq!(insert(&result), &Insert::new(InsertShape::String, "say (hello)"));
}

#[test]
fn unknown_reporters_become_variables() {
    let (nodes, context) = lines(&["say (score)", "if <ready> then"]);

    let score = block(&nodes[0])
        .arguments()
        .next()
        .unwrap();
    let score = block(score);
    assert_eq!(score.blockid, "score");
    assert_eq!(score.category, Category::Variables);
    assert_eq!(score.shape, Shape::Reporter);

    let ready = block(&nodes[1])
        .arguments()
        .next()
        .unwrap();
    let ready = block(ready);
    assert_eq!(ready.category, Category::Obsolete);
    assert_eq!(ready.shape, Shape::Boolean);

    assert_eq!(context.variable_reporters["score"], vec![score.id]);
    assert_eq!(context.variable_reporters["ready"], vec![ready.id]);
}

#[test]
fn unknown_stack_blocks_are_obsolete() {
    let (nodes, context) = lines(&["foo bar baz"]);
    let result = block(&nodes[0]);

    assert_eq!(result.blockid, "foo bar baz");
    assert_eq!(result.category, Category::Obsolete);
    assert_eq!(result.shape, Shape::Stack);
    assert_eq!(result.spec(), "foo bar baz");
    assert_eq!(context.obsolete_blocks["foo bar baz"], vec![result.id]);
}

#[test]
fn obsolete_blocks_keyed_by_minified_text() {
    let (nodes, context) = lines(&["Jump (10) High?"]);
    let result = block(&nodes[0]);

    assert_eq!(result.spec(), "Jump _ High?");
    assert_eq!(context.obsolete_blocks["jump _ high"], vec![result.id]);
}

#[test]
fn icons() {
    let node = line("turn right (15) degrees");
    let result = block(&node);

    assert_eq!(result.blockid, "turn @arrow-cw _ degrees");
    assert_eq!(
        result.pieces,
        vec![
            label("turn "),
            Piece::Icon("arrow-cw".to_string()),
            label(" "),
            number("15"),
            label(" degrees"),
        ]
    );

    let node = line("when green flag clicked");
    let result = block(&node);
    assert_eq!(result.shape, Shape::Hat);
    assert_eq!(result.category, Category::Events);
    assert!(result
        .pieces
        .contains(&Piece::Icon("green-flag".to_string())));
}

#[test]
fn math_function_or_attribute() {
    let result = fragment("([sqrt v] of (9))");
    assert_eq!(block(&result).blockid, "_ of _");
    assert_eq!(block(&result).category, Category::Operators);

    let result = fragment("([e^ v] of (1))");
    assert_eq!(block(&result).category, Category::Operators);

    let result = fragment("([x position v] of [Sprite1 v])");
    assert_eq!(block(&result).category, Category::Sensing);
}

#[test]
fn length_of_list_or_text() {
    let result = fragment("(length of [things v])");
    assert_eq!(block(&result).category, Category::List);

    let result = fragment("(length of [world])");
    assert_eq!(block(&result).category, Category::Operators);
}

#[test]
fn stop_block_shape() {
    let node = line("stop [all v]");
    assert_eq!(block(&node).shape, Shape::Cap);

    let node = line("stop [other scripts in sprite v]");
    assert_eq!(block(&node).shape, Shape::Stack);
}

#[test]
fn structural_flags() {
    let node = line("repeat (10)");
    assert_eq!(block(&node).flag, Some(Flag::CStart));

    let node = line("forever");
    assert_eq!(block(&node).flag, Some(Flag::CStart));
    assert_eq!(block(&node).shape, Shape::Cap);

    let node = line("else");
    assert_eq!(block(&node).flag, Some(Flag::CElse));

    let node = line("end");
    assert_eq!(block(&node).flag, Some(Flag::CEnd));
    assert!(block(&node)
        .pieces
        .is_empty());
}

#[test]
fn define_hat() {
    let (nodes, context) = lines(&["define jump (height) <fast?>"]);

    let define = match &nodes[0] {
        SyntaxNode::DefineHat(define) => define,
        other => panic!("expected a define hat, found {:?}", other),
    };

    assert_eq!(define.keyword, "define");
    assert_eq!(define.parameters(), vec!["height", "fast?"]);
    assert_eq!(spec_of(&define.outline.pieces), "jump _ _");

    match &define.outline.pieces[1] {
        Piece::Node(SyntaxNode::Block(arg)) => {
            assert_eq!(arg.category, Category::CustomArg);
            assert_eq!(arg.shape, Shape::Reporter);
        }
        other => panic!("expected a parameter, found {:?}", other),
    }
    match &define.outline.pieces[3] {
        Piece::Node(SyntaxNode::Block(arg)) => assert_eq!(arg.shape, Shape::Boolean),
        other => panic!("expected a parameter, found {:?}", other),
    }

    assert_eq!(context.define_hats, vec!["jump _ _"]);
    assert_eq!(context.custom_args, vec!["height", "fast?"]);
}

#[test]
fn define_keyword_keeps_case() {
    let node = line("DEFINE Jump");
    match node {
        SyntaxNode::DefineHat(define) => {
            assert_eq!(define.keyword, "DEFINE");
            assert_eq!(define.outline.pieces, vec![label("Jump")]);
        }
        other => panic!("expected a define hat, found {:?}", other),
    }

    // the keyword has to be a word of its own
    let node = line("defined");
    assert!(matches!(node, SyntaxNode::Block(_)));
}

#[test]
fn trailing_comment() {
    let node = line("move (10) steps // walk forward ");
    assert_eq!(block(&node).blockid, "move _ steps");
    assert_eq!(
        block(&node)
            .comment
            .as_deref(),
        Some("walk forward")
    );

    let node = line("move (10) steps //   ");
    assert_eq!(block(&node).comment, None);
}

#[test]
fn lone_comment() {
    let node = line("// a note to self");
    assert_eq!(
        node,
        SyntaxNode::Comment {
            text: "a note to self".to_string()
        }
    );
}

#[test]
fn slashes_after_colon_are_not_comments() {
    let node = line("say [http://example.com]");
    let result = block(&node);

    assert_eq!(result.comment, None);
    assert_eq!(
        result
            .arguments()
            .next(),
        Some(&SyntaxNode::Insert(Insert::new(
            InsertShape::String,
            "http://example.com"
        )))
    );
}

#[test]
fn category_in_comment() {
    let node = line("flap wings // category=looks");
    assert_eq!(block(&node).category, Category::Looks);
    assert_eq!(block(&node).comment, None);

    let node = line("flap wings // slowly category=pen please");
    assert_eq!(block(&node).category, Category::Pen);
    assert_eq!(
        block(&node)
            .comment
            .as_deref(),
        Some("slowly please")
    );

    let node = line("flap wings // category=wings");
    assert_eq!(block(&node).category, Category::Obsolete);
    assert_eq!(
        block(&node)
            .comment
            .as_deref(),
        Some("category=wings")
    );
}

#[test]
fn overrides() {
    let (nodes, context) = lines(&["flap wings :: looks"]);
    let result = block(&nodes[0]);
    assert_eq!(result.blockid, "flap wings");
    assert_eq!(result.category, Category::Looks);
    assert!(context
        .obsolete_blocks
        .is_empty());

    let node = line("say [hi] :: cap");
    assert_eq!(block(&node).blockid, "say _");
    assert_eq!(block(&node).shape, Shape::Cap);

    let result = fragment("(things :: list)");
    assert_eq!(block(&result).category, Category::List);
    assert_eq!(block(&result).blockid, "things");

    let node = line("flap wings :: ");
    assert_eq!(block(&node).category, Category::Obsolete);
}

#[test]
fn ring_override() {
    let result = fragment("(move () steps :: ring)");
    let result = block(&result);

    assert_eq!(result.flag, Some(Flag::Ring));
    assert_eq!(result.shape, Shape::Embedded);
    let arg = insert(
        result
            .arguments()
            .next()
            .unwrap(),
    );
    assert!(arg.ringed);
    assert_eq!(arg.shape, InsertShape::Reporter);
}

#[test]
fn comparisons() {
    let node = line("<[6] < [3]>");
    let result = block(&node);
    assert_eq!(result.blockid, "_ < _");
    assert_eq!(result.category, Category::Operators);
    assert_eq!(result.shape, Shape::Boolean);

    let node = line("when distance < (20)");
    assert_eq!(block(&node).blockid, "when distance < _");
}

#[test]
fn addition_keeps_operator() {
    let result = fragment("((1) + (2))");
    let result = block(&result);

    assert_eq!(result.blockid, "_ + _");
    assert_eq!(
        result.pieces,
        vec![number("1"), label(" + "), number("2")]
    );
}

#[test]
fn free_floating_insert() {
    let node = line("[hello]");
    let result = block(&node);

    assert_eq!(result.blockid, "_");
    assert_eq!(result.category, Category::Obsolete);
    assert_eq!(
        result.pieces,
        vec![Piece::Node(SyntaxNode::Insert(Insert::new(
            InsertShape::String,
            "hello"
        )))]
    );
}

#[test]
fn free_floating_reporter() {
    let node = line("(x position)");
    let result = block(&node);

    assert_eq!(result.blockid, "x position");
    assert_eq!(result.category, Category::Motion);
    assert_eq!(result.shape, Shape::Reporter);
}

#[test]
fn list_names_recorded() {
    let (_, context) = lines(&[
        "add [thing] to [stuff v]",
        "say (item (1) of [inventory v])",
        "add [thing] to [not a dropdown]",
    ]);
    assert_eq!(context.lists, vec!["stuff", "inventory"]);
}

#[test]
fn ellipsis() {
    let node = line("...");
    let result = block(&node);
    assert_eq!(result.category, Category::Grey);
    assert_eq!(result.pieces, vec![label(". . .")]);
}

#[test]
fn underscore_without_argument() {
    let node = line("snake_case thing");
    let result = block(&node);
    assert_eq!(result.category, Category::Obsolete);
    assert_eq!(result.spec(), "snake _ case thing");
}

#[test]
fn deeply_nested_arguments() {
    let text = format!("say {}x{}", "(".repeat(5000), ")".repeat(5000));
    let node = line(&text);

    let mut current = block(&node);
    assert_eq!(current.blockid, "say _");

    let mut depth = 0;
    while let Some(SyntaxNode::Block(inner)) = current
        .arguments()
        .next()
    {
        current = inner;
        depth += 1;
    }

    assert_eq!(depth, MAXIMUM_NESTING + 1);
    assert_eq!(current.category, Category::Obsolete);
    assert_eq!(current.shape, Shape::Reporter);
    assert!(current
        .spec()
        .starts_with("(("));
}

#[test]
fn nesting_within_limit_is_parsed() {
    let text = format!("say {}(x position){}", "((".repeat(20), "))".repeat(20));
    let node = line(&text);

    let mut current = block(&node);
    while let Some(SyntaxNode::Block(inner)) = current
        .arguments()
        .next()
    {
        current = inner;
    }
    assert_eq!(current.blockid, "x position");
    assert_eq!(current.category, Category::Motion);
}
