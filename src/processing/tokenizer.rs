//! Language-aware word tokenization

use unicode_segmentation::UnicodeSegmentation;

/// English clitics split off the end of a word, longest first
const ENGLISH_CLITICS: &[&str] = &[
    "n't", "'re", "'ve", "'ll", "'s", "'d", "'m", "n\u{2019}t", "\u{2019}re", "\u{2019}ve",
    "\u{2019}ll", "\u{2019}s", "\u{2019}d", "\u{2019}m",
];

/// Split text into word-level tokens.
///
/// Words are found with Unicode word boundaries (UAX #29). Whitespace is
/// dropped and punctuation becomes tokens of its own, except that `--` stays
/// one token. A double quote becomes two backticks when it opens a quotation
/// and two single quotes otherwise. For English, contractions are split the way the Penn
/// Treebank does it, with straight or curly apostrophes: `don't` becomes
/// `do` + `n't`, `she’s` becomes `she` + `’s`, `cannot` becomes
/// `can` + `not`. Treebank's rarer splits (`gonna`, `wanna`, `'tis`) are not
/// applied.
pub fn word_tokenize(text: &str, language: &str) -> Vec<String> {
    let split_clitics = language == "english";
    let mut tokens: Vec<String> = Vec::new();
    // Whether the previous segment was whitespace, or there was none
    let mut after_space = true;

    for segment in text.split_word_bounds() {
        if segment.chars().all(char::is_whitespace) {
            after_space = true;
            continue;
        }

        match segment {
            "\"" => {
                let opens = after_space
                    || matches!(tokens.last().map(String::as_str), Some("(" | "[" | "{" | "<"));
                tokens.push(if opens { "``" } else { "''" }.to_string());
            }
            "-" if !after_space && tokens.last().map(String::as_str) == Some("-") => {
                if let Some(last) = tokens.last_mut() {
                    last.push('-');
                }
            }
            _ if split_clitics => push_with_clitics(segment, &mut tokens),
            _ => tokens.push(segment.to_string()),
        }
        after_space = false;
    }

    tokens
}

fn push_with_clitics(word: &str, tokens: &mut Vec<String>) {
    let lower = word.to_lowercase();
    if lower.len() != word.len() {
        tokens.push(word.to_string());
        return;
    }

    if lower == "cannot" {
        tokens.push(word[..3].to_string());
        tokens.push(word[3..].to_string());
        return;
    }

    for clitic in ENGLISH_CLITICS {
        if lower.len() > clitic.len() && lower.ends_with(clitic) {
            let split = word.len() - clitic.len();
            if word.is_char_boundary(split) {
                tokens.push(word[..split].to_string());
                tokens.push(word[split..].to_string());
                return;
            }
        }
    }
    tokens.push(word.to_string());
}
