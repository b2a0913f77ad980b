#[cfg(test)]
mod verify {
    use scratchblocks::database::Database;
    use scratchblocks::formatting::*;
    use scratchblocks::parsing::{self, ParseOptions};
    use scratchblocks::rendering;

    fn reformat(code: &str) -> String {
        let database = Database::english().unwrap();
        let scripts = parsing::parse(&database, code, &ParseOptions::default());
        format(&scripts)
    }

    #[test]
    fn body_is_indented() {
        assert_eq!(
            reformat("repeat (10)\nmove (10) steps\nend"),
            "repeat (10)\n    move (10) steps\nend\n"
        );
    }

    #[test]
    fn scripts_separated_by_blank_line() {
        assert_eq!(
            reformat("when green flag clicked\nmove (10) steps\n\n\n\nsay [hi]"),
            "when ⚑ clicked\nmove (10) steps\n\nsay [hi]\n"
        );
    }

    #[test]
    fn hat_starts_new_script() {
        assert_eq!(
            reformat("move (10) steps\nwhen this sprite clicked\nhide"),
            "move (10) steps\n\nwhen this sprite clicked\nhide\n"
        );
    }

    #[test]
    fn aliases_written_canonically() {
        assert_eq!(
            reformat("Turn Right (15) Degrees"),
            "turn ↻ (15) degrees\n"
        );
        assert_eq!(reformat("turn ccw (90) degrees"), "turn ↺ (90) degrees\n");
    }

    #[test]
    fn unterminated_c_block_closed() {
        assert_eq!(
            reformat("forever\nnext costume"),
            "forever\n    next costume\nend\n"
        );
    }

    #[test]
    fn hundreds_of_nested_c_blocks() {
        let result = reformat(&"forever\n".repeat(300));

        let mut expected = String::new();
        for depth in 0..300 {
            expected.push_str(&"    ".repeat(depth));
            expected.push_str("forever\n");
        }
        for depth in (0..300).rev() {
            expected.push_str(&"    ".repeat(depth));
            expected.push_str("end\n");
        }

        assert_eq!(result, expected);
    }

    #[test]
    fn if_else_nesting() {
        let code = "\
when gf clicked
forever
if <mouse down?> then
show
else
hide
end
end";
        assert_eq!(
            reformat(code),
            "\
when ⚑ clicked
forever
    if <mouse down?> then
        show
    else
        hide
    end
end
"
        );
    }

    #[test]
    fn reporter_on_its_own() {
        assert_eq!(reformat("(x position)"), "(x position)\n");
        assert_eq!(reformat("<mouse down?>"), "<mouse down?>\n");
    }

    #[test]
    fn comments_kept() {
        assert_eq!(
            reformat("move (10) steps   //   go\n// on its own"),
            "move (10) steps // go\n\n// on its own\n"
        );
    }

    #[test]
    fn annotated_output() {
        let database = Database::english().unwrap();
        let scripts = parsing::parse(
            &database,
            "move (10) steps\nsay (x position)",
            &ParseOptions::default(),
        );

        let result = rendering::render(&Identity, &scripts, true);
        assert_eq!(
            result,
            "move (10) steps :: motion\nsay (x position) :: looks\n"
        );
    }

    #[test]
    fn override_category_reformats_with_annotation() {
        let database = Database::english().unwrap();
        let scripts = parsing::parse(
            &database,
            "flap wings :: pen",
            &ParseOptions::default(),
        );

        assert_eq!(format(&scripts), "flap wings\n");
        assert_eq!(
            rendering::render(&Identity, &scripts, true),
            "flap wings :: pen\n"
        );
    }
}
