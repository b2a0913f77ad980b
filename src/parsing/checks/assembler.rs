use super::*;
use crate::database::{Database, LookupIndex};
use crate::parsing::parser::Parser;

fn assemble(code: &str) -> Vec<Script> {
    let database = Database::english().unwrap();
    let index = LookupIndex::build(&database, &[]);
    let mut parser = Parser::new(&index);
    let mut assembler = Assembler::new();

    for line in code.lines() {
        if line
            .trim()
            .is_empty()
        {
            assembler.blank();
            continue;
        }
        assembler.push(parser.parse_line(line));
    }

    assembler.finish()
}

fn blockid(node: &SyntaxNode) -> &str {
    match node {
        SyntaxNode::Block(block) => &block.blockid,
        other => panic!("expected a block, found {:?}", other),
    }
}

fn wrap(node: &SyntaxNode) -> &CWrap {
    match node {
        SyntaxNode::CWrap(wrap) => wrap,
        other => panic!("expected a C block, found {:?}", other),
    }
}

fn mouth(node: &SyntaxNode) -> &CMouth {
    match node {
        SyntaxNode::CMouth(mouth) => mouth,
        other => panic!("expected a C mouth, found {:?}", other),
    }
}

#[test]
fn hat_and_stack() {
    let scripts = assemble("when green flag clicked\nmove (10) steps");

    assert_eq!(scripts.len(), 1);
    let nodes = scripts[0].nodes();
    assert_eq!(nodes.len(), 2);
    assert_eq!(blockid(&nodes[0]), "when @green-flag clicked");
    assert_eq!(blockid(&nodes[1]), "move _ steps");
}

#[test]
fn hat_starts_new_script() {
    let scripts = assemble("move (10) steps\nwhen this sprite clicked\nmove (10) steps");

    assert_eq!(scripts.len(), 2);
    assert_eq!(scripts[0].nodes().len(), 1);
    assert_eq!(scripts[1].nodes().len(), 2);
}

#[test]
fn c_block() {
    let scripts = assemble("repeat (10)\nmove (10) steps\nend");

    assert_eq!(scripts.len(), 1);
    let nodes = scripts[0].nodes();
    assert_eq!(nodes.len(), 1);

    let result = wrap(&nodes[0]);
    assert_eq!(result.shape, Shape::Stack);
    assert_eq!(result.category, Category::Control);
    assert_eq!(result.contents.len(), 3);

    assert_eq!(blockid(&result.contents[0]), "repeat _");
    let body = mouth(&result.contents[1]);
    assert_eq!(body.contents.len(), 1);
    assert_eq!(blockid(&body.contents[0]), "move _ steps");
    assert!(!body.cap_end);
    assert_eq!(blockid(&result.contents[2]), "end");
}

#[test]
fn if_else() {
    let scripts = assemble(
        "if <touching [edge v]?> then\nturn right (180) degrees\nelse\nmove (10) steps\nmove (10) steps\nend",
    );

    assert_eq!(scripts.len(), 1);
    let result = wrap(&scripts[0].nodes()[0]);
    assert_eq!(result.contents.len(), 5);

    assert_eq!(blockid(&result.contents[0]), "if _ then");
    assert_eq!(
        mouth(&result.contents[1])
            .contents
            .len(),
        1
    );
    assert_eq!(blockid(&result.contents[2]), "else");
    assert_eq!(
        mouth(&result.contents[3])
            .contents
            .len(),
        2
    );
    assert_eq!(blockid(&result.contents[4]), "end");
}

#[test]
fn markers_take_header_category() {
    let scripts = assemble("if <> then :: pen\nelse\nend");
    let result = wrap(&scripts[0].nodes()[0]);

    assert_eq!(result.category, Category::Pen);
    for node in &result.contents {
        assert_eq!(node.category(), Some(Category::Pen));
    }
}

#[test]
fn nested_c_blocks() {
    let scripts = assemble("forever\nrepeat (3)\nmove (1) steps\nend\nend");

    assert_eq!(scripts.len(), 1);
    let outer = wrap(&scripts[0].nodes()[0]);
    assert_eq!(outer.shape, Shape::Cap);
    assert!(!outer.contents[0].is_cap());

    let inner = wrap(&mouth(&outer.contents[1]).contents[0]);
    assert_eq!(blockid(&inner.contents[0]), "repeat _");
}

#[test]
fn unterminated_c_block_is_closed() {
    let scripts = assemble("forever\nmove (10) steps");

    assert_eq!(scripts.len(), 1);
    let result = wrap(&scripts[0].nodes()[0]);
    assert_eq!(result.contents.len(), 3);

    match &result.contents[2] {
        SyntaxNode::Block(end) => {
            assert_eq!(end.blockid, "end");
            assert_eq!(end.flag, Some(Flag::CEnd));
            assert_eq!(end.category, Category::Control);
            assert!(end
                .pieces
                .is_empty());
        }
        other => panic!("expected an end marker, found {:?}", other),
    }
}

#[test]
fn cap_ends_script() {
    let scripts = assemble("move (10) steps\nstop [all v]\nmove (10) steps");

    assert_eq!(scripts.len(), 2);
    assert_eq!(scripts[0].nodes().len(), 2);
    assert_eq!(scripts[1].nodes().len(), 1);
}

#[test]
fn cap_inside_mouth() {
    let scripts = assemble("if <> then\nstop [all v]\nend\nmove (10) steps");

    assert_eq!(scripts.len(), 1);
    let nodes = scripts[0].nodes();
    assert_eq!(nodes.len(), 2);

    let result = wrap(&nodes[0]);
    assert!(mouth(&result.contents[1]).cap_end);
}

#[test]
fn reporters_stand_alone() {
    let scripts = assemble("move (10) steps\n(x position)\n<mouse down?>\nmove (10) steps");

    assert_eq!(scripts.len(), 4);
    assert_eq!(blockid(&scripts[1].nodes()[0]), "x position");
    assert_eq!(blockid(&scripts[2].nodes()[0]), "mouse down?");
}

#[test]
fn blank_lines_separate_scripts() {
    let scripts = assemble("move (10) steps\n\n\nturn right (15) degrees");
    assert_eq!(scripts.len(), 2);

    // but not inside a C block
    let scripts = assemble("repeat (2)\nmove (10) steps\n\nmove (10) steps\nend");
    assert_eq!(scripts.len(), 1);
    assert_eq!(
        mouth(&wrap(&scripts[0].nodes()[0]).contents[1])
            .contents
            .len(),
        2
    );
}

#[test]
fn stray_markers_are_ordinary_blocks() {
    let scripts = assemble("move (10) steps\nend\nelse");

    assert_eq!(scripts.len(), 1);
    let nodes = scripts[0].nodes();
    assert_eq!(nodes.len(), 3);
    assert_eq!(blockid(&nodes[1]), "end");
    assert_eq!(blockid(&nodes[2]), "else");
}

#[test]
fn comments() {
    let scripts = assemble("move (10) steps\n// between\nmove (10) steps");

    assert_eq!(scripts.len(), 3);
    assert_eq!(
        scripts[1].nodes(),
        &[SyntaxNode::Comment {
            text: "between".to_string()
        }]
    );

    let scripts = assemble("forever\n// inside\nend");
    assert_eq!(scripts.len(), 1);
    let body = mouth(&wrap(&scripts[0].nodes()[0]).contents[1]);
    assert!(matches!(body.contents[0], SyntaxNode::Comment { .. }));
}

#[test]
fn define_starts_script() {
    let scripts = assemble("move (10) steps\ndefine jump\nchange y by (10)");

    assert_eq!(scripts.len(), 2);
    assert!(matches!(scripts[1].nodes()[0], SyntaxNode::DefineHat(_)));
    assert_eq!(scripts[1].nodes().len(), 2);
}
