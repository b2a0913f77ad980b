//! The base block table. Every blockid is the English spec of its block,
//! and translations list their own specs in exactly this order.

use std::collections::BTreeMap;

use crate::database::Language;
use crate::language::Category;

pub(crate) type Entry = (&'static str, &'static [&'static str]);

pub(crate) static BLOCKS: &[(Category, &[Entry])] = &[
    (
        Category::Motion,
        &[
            ("move _ steps", &[]),
            ("turn @arrow-ccw _ degrees", &[]),
            ("turn @arrow-cw _ degrees", &[]),
            ("point in direction _", &[]),
            ("point towards _", &[]),
            ("go to x:_ y:_", &[]),
            ("go to _", &[]),
            ("glide _ secs to x:_ y:_", &[]),
            ("change x by _", &[]),
            ("set x to _", &[]),
            ("change y by _", &[]),
            ("set y to _", &[]),
            ("if on edge, bounce", &[]),
            ("set rotation style _", &[]),
            ("x position", &[]),
            ("y position", &[]),
            ("direction", &[]),
        ],
    ),
    (
        Category::Looks,
        &[
            ("say _ for _ secs", &[]),
            ("say _", &[]),
            ("think _ for _ secs", &[]),
            ("think _", &[]),
            ("show", &[]),
            ("hide", &[]),
            ("switch costume to _", &[]),
            ("next costume", &[]),
            ("switch backdrop to _", &[]),
            ("change _ effect by _", &[]),
            ("set _ effect to _", &[]),
            ("clear graphic effects", &[]),
            ("change size by _", &[]),
            ("set size to _%", &[]),
            ("go to front", &[]),
            ("go back _ layers", &[]),
            ("costume #", &[]),
            ("backdrop name", &[]),
            ("size", &[]),
            // stage
            ("switch backdrop to _ and wait", &[]),
            ("next backdrop", &[]),
            ("backdrop #", &[]),
            // Scratch 1.4
            ("switch to costume _", &[]),
            ("switch to background _", &[]),
            ("next background", &[]),
            ("background #", &[]),
        ],
    ),
    (
        Category::Sound,
        &[
            ("play sound _", &[]),
            ("play sound _ until done", &[]),
            ("stop all sounds", &[]),
            ("play drum _ for _ beats", &[]),
            ("rest for _ beats", &[]),
            ("play note _ for _ beats", &[]),
            ("set instrument to _", &[]),
            ("change volume by _", &[]),
            ("set volume to _%", &[]),
            ("volume", &[]),
            ("change tempo by _", &[]),
            ("set tempo to _ bpm", &[]),
            ("tempo", &[]),
        ],
    ),
    (
        Category::Pen,
        &[
            ("clear", &[]),
            ("stamp", &[]),
            ("pen down", &[]),
            ("pen up", &[]),
            ("set pen color to _", &[]),
            ("change pen color by _", &[]),
            ("set pen color to _", &[]),
            ("change pen shade by _", &[]),
            ("set pen shade to _", &[]),
            ("change pen size by _", &[]),
            ("set pen size to _", &[]),
        ],
    ),
    (
        Category::Variables,
        &[
            ("set _ to _", &[]),
            ("change _ by _", &[]),
            ("show variable _", &[]),
            ("hide variable _", &[]),
        ],
    ),
    (
        Category::List,
        &[
            ("add _ to _", &[]),
            ("delete _ of _", &[]),
            ("insert _ at _ of _", &[]),
            ("replace item _ of _ with _", &[]),
            ("item _ of _", &[]),
            ("length of _", &[]),
            ("_ contains _", &[]),
            ("show list _", &[]),
            ("hide list _", &[]),
        ],
    ),
    (
        Category::Events,
        &[
            ("when @green-flag clicked", &["hat"]),
            ("when _ key pressed", &["hat"]),
            ("when this sprite clicked", &["hat"]),
            ("when Stage clicked", &["hat"]),
            ("when backdrop switches to _", &["hat"]),
            ("when _ > _", &["hat"]),
            ("when I receive _", &["hat"]),
            ("broadcast _", &[]),
            ("broadcast _ and wait", &[]),
        ],
    ),
    (
        Category::Control,
        &[
            ("wait _ secs", &[]),
            ("repeat _", &["cstart"]),
            ("forever", &["cstart", "cap"]),
            ("if _ then", &["cstart"]),
            ("else", &["celse"]),
            ("end", &["cend"]),
            ("wait until _", &[]),
            ("repeat until _", &["cstart"]),
            ("stop _", &["cap"]),
            ("when I start as a clone", &["hat"]),
            ("create clone of _", &[]),
            ("delete this clone", &["cap"]),
            // Scratch 1.4
            ("if _", &["cstart"]),
            ("forever if _", &["cstart", "cap"]),
            ("stop script", &["cap"]),
            ("stop all", &["cap"]),
        ],
    ),
    (
        Category::Sensing,
        &[
            ("touching _?", &[]),
            ("touching color _?", &[]),
            ("color _ is touching _?", &[]),
            ("distance to _", &[]),
            ("ask _ and wait", &[]),
            ("answer", &[]),
            ("key _ pressed?", &[]),
            ("mouse down?", &[]),
            ("mouse x", &[]),
            ("mouse y", &[]),
            ("loudness", &[]),
            ("video _ on _", &[]),
            ("turn video _", &[]),
            ("set video transparency to _%", &[]),
            ("timer", &[]),
            ("reset timer", &[]),
            ("_ of _", &[]),
            ("current _", &[]),
            ("days since 2000", &[]),
            ("username", &[]),
            // Scratch 1.4
            ("loud?", &[]),
        ],
    ),
    (
        Category::Operators,
        &[
            ("_ + _", &[]),
            ("_ - _", &[]),
            ("_ * _", &[]),
            ("_ / _", &[]),
            ("pick random _ to _", &[]),
            ("_ < _", &[]),
            ("_ = _", &[]),
            ("_ > _", &[]),
            ("_ and _", &[]),
            ("_ or _", &[]),
            ("not _", &[]),
            ("join _ _", &[]),
            ("letter _ of _", &[]),
            ("length of _", &[]),
            ("_ mod _", &[]),
            ("round _", &[]),
            ("_ of _", &[]),
        ],
    ),
    (
        Category::Extension,
        &[
            // PicoBoard
            ("when _", &["hat"]),
            ("when _ _ _", &["hat"]),
            ("sensor _?", &[]),
            ("_ sensor value", &[]),
            // LEGO WeDo
            ("turn _ on for _ secs", &[]),
            ("turn _ on", &[]),
            ("turn _ off", &[]),
            ("set _ power _", &[]),
            ("set _ direction _", &[]),
            ("when distance _ _", &["hat"]),
            ("when tilt _ _", &["hat"]),
            ("distance", &[]),
            ("tilt", &[]),
            // LEGO WeDo, older names
            ("turn motor on for _ secs", &[]),
            ("turn motor on", &[]),
            ("turn motor off", &[]),
            ("set motor power _", &[]),
            ("set motor direction _", &[]),
            ("when distance < _", &["hat"]),
            ("when tilt = _", &["hat"]),
            // Scratch 1.4
            ("motor on", &[]),
            ("motor off", &[]),
            ("motor on for _ secs", &[]),
            ("motor power _", &[]),
            ("motor direction _", &[]),
        ],
    ),
    (Category::Grey, &[("…", &[]), ("...", &[])]),
];

/// The base language. Its block list is filled in from the table when
/// the database is built.
pub(crate) fn language() -> Language {
    let aliases = [
        ("turn left _ degrees", "turn @arrow-ccw _ degrees"),
        ("turn ccw _ degrees", "turn @arrow-ccw _ degrees"),
        ("turn ↺ _ degrees", "turn @arrow-ccw _ degrees"),
        ("turn right _ degrees", "turn @arrow-cw _ degrees"),
        ("turn cw _ degrees", "turn @arrow-cw _ degrees"),
        ("turn ↻ _ degrees", "turn @arrow-cw _ degrees"),
        ("when gf clicked", "when @green-flag clicked"),
        ("when flag clicked", "when @green-flag clicked"),
        ("when green flag clicked", "when @green-flag clicked"),
        ("when ⚑ clicked", "when @green-flag clicked"),
    ]
    .into_iter()
    .map(|(text, blockid)| (text.to_string(), blockid.to_string()))
    .collect::<BTreeMap<_, _>>();

    Language {
        code: "en".to_string(),
        blocks: vec![],
        aliases,
        define: strings(&["define"]),
        // the "when distance < _" hat has a literal less-than sign
        ignore_lt: strings(&["when distance"]),
        // valid arguments to the "_ of _" dropdown when it is a math function
        math: strings(&[
            "abs", "floor", "ceiling", "sqrt", "sin", "cos", "tan", "asin", "acos", "atan", "ln",
            "log", "e ^", "10 ^",
        ]),
        osis: strings(&["other scripts in sprite", "other scripts in stage"]),
    }
}

/// Text shown in place of an image marker when writing blocks out as
/// plain text.
pub fn image_text(token: &str) -> Option<&'static str> {
    match token {
        "arrow-cw" => Some("↻"),
        "arrow-ccw" => Some("↺"),
        "green-flag" => Some("⚑"),
        _ => None,
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values
        .iter()
        .map(|value| value.to_string())
        .collect()
}
