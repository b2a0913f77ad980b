use super::*;

fn ignore() -> Vec<String> {
    vec!["when distance".to_string()]
}

fn texts(tokens: &[Token]) -> Vec<&str> {
    tokens
        .iter()
        .map(|token| token.as_str())
        .collect()
}

#[test]
fn plain_text() {
    let tokens = split_into_pieces("move ten steps", &ignore());
    assert_eq!(tokens, vec![Token::Text("move ten steps".to_string())]);
}

#[test]
fn groups_and_text() {
    let tokens = split_into_pieces("say [Hello!] for (2) secs", &ignore());
    assert_eq!(
        tokens,
        vec![
            Token::Text("say ".to_string()),
            Token::Group("[Hello!]".to_string()),
            Token::Text(" for ".to_string()),
            Token::Group("(2)".to_string()),
            Token::Text(" secs".to_string()),
        ]
    );
}

#[test]
fn nested_groups() {
    let tokens = split_into_pieces("set [x v] to ((a) + (item (1) of [l v]))", &ignore());
    assert_eq!(
        texts(&tokens),
        vec!["set ", "[x v]", " to ", "((a) + (item (1) of [l v]))"]
    );
}

#[test]
fn nothing_nests_inside_square_brackets() {
    let tokens = split_into_pieces("say [a (b] c", &ignore());
    assert_eq!(texts(&tokens), vec!["say ", "[a (b]", " c"]);

    let tokens = split_into_pieces("say [<3] and <x>", &ignore());
    assert_eq!(texts(&tokens), vec!["say ", "[<3]", " and ", "<x>"]);
}

#[test]
fn close_must_match() {
    let tokens = split_into_pieces("(a ] b) c", &ignore());
    assert_eq!(texts(&tokens), vec!["(a ] b)", " c"]);
}

#[test]
fn unterminated_group() {
    let tokens = split_into_pieces("say (hello", &ignore());
    assert_eq!(
        tokens,
        vec![
            Token::Text("say ".to_string()),
            Token::Group("(hello".to_string()),
        ]
    );
}

#[test]
fn concatenation_reproduces_input() {
    let samples = [
        "",
        "when green flag clicked",
        "if <(x position) > [10]> then",
        "say (join [a] (b)) for ((1) + (2)) secs",
        "<[6] < [3]>",
        "broken ((( input ]]] <<< >",
        "when distance < (30)",
        "comment // with :: things",
        "{[}]<(>)",
    ];
    for sample in samples {
        let tokens = split_into_pieces(sample, &ignore());
        let joined: String = tokens
            .iter()
            .map(|token| token.as_str())
            .collect();
        assert_eq!(joined, sample);
    }
}

#[test]
fn comparison_between_groups() {
    // the outer brackets delimit a boolean, the inner sign compares
    let text = "<[6] < [3]>";
    let chars: Vec<char> = text
        .chars()
        .collect();
    assert!(!is_lt_gt(&chars, 0, &ignore()));
    assert!(is_lt_gt(&chars, 5, &ignore()));

    let tokens = split_into_pieces(text, &ignore());
    assert_eq!(tokens, vec![Token::Group("<[6] < [3]>".to_string())]);

    let inner = strip_brackets(text);
    assert_eq!(inner, "[6] < [3]");
    let tokens = split_into_pieces(inner, &ignore());
    assert_eq!(
        tokens,
        vec![
            Token::Group("[6]".to_string()),
            Token::Text(" < ".to_string()),
            Token::Group("[3]".to_string()),
        ]
    );
}

#[test]
fn greater_than_between_reporters() {
    let tokens = split_into_pieces("(x position) > (10)", &ignore());
    assert_eq!(texts(&tokens), vec!["(x position)", " > ", "(10)"]);
}

#[test]
fn boolean_group_is_a_bracket() {
    let tokens = split_into_pieces("wait until <mouse down?>", &ignore());
    assert_eq!(texts(&tokens), vec!["wait until ", "<mouse down?>"]);

    let chars: Vec<char> = "wait until <mouse down?>"
        .chars()
        .collect();
    assert!(!is_lt_gt(&chars, 11, &ignore()));
}

#[test]
fn ignored_phrase() {
    let tokens = split_into_pieces("when distance < (30)", &ignore());
    assert_eq!(texts(&tokens), vec!["when distance < ", "(30)"]);

    // without the phrase the sign would open a group
    let tokens = split_into_pieces("when distance < (30)", &[]);
    assert_eq!(texts(&tokens), vec!["when distance ", "< (30)"]);
}

#[test]
fn not_an_angle() {
    let chars: Vec<char> = "a(b)"
        .chars()
        .collect();
    assert!(!is_lt_gt(&chars, 1, &ignore()));
    assert!(!is_lt_gt(&chars, 10, &ignore()));
}

#[test]
fn stripping() {
    assert_eq!(strip_brackets("(10)"), "10");
    assert_eq!(strip_brackets("[abc v]"), "abc v");
    assert_eq!(strip_brackets("(unterminated"), "unterminated");
    assert_eq!(strip_brackets("(mismatch]"), "mismatch]");
    assert_eq!(strip_brackets("plain"), "plain");
    assert_eq!(strip_brackets(""), "");
}
