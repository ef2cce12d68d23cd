/// How many non-empty lines at the top of a resume are considered.
const HEADER_LINES: usize = 8;

/// Title-case words that head a resume but are not a name.
const HEADER_WORDS: &[&str] = &["Curriculum", "Vitae", "Resume", "Profile", "Contact"];

/// Best-effort candidate name: the first header line whose first two words
/// are both title-case ("Jane Doe"), keeping letters only.
pub fn guess_display_name(text: &str) -> Option<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(HEADER_LINES)
        .find_map(name_from_line)
}

fn name_from_line(line: &str) -> Option<String> {
    let cleaned: String = line
        .chars()
        .map(|c| if c.is_alphabetic() { c } else { ' ' })
        .collect();
    let words: Vec<&str> = cleaned.split_whitespace().take(2).collect();

    match words.as_slice() {
        [first, second]
            if is_title_word(first)
                && is_title_word(second)
                && !HEADER_WORDS.contains(first)
                && !HEADER_WORDS.contains(second) =>
        {
            Some(format!("{first} {second}"))
        }
        _ => None,
    }
}

fn is_title_word(word: &str) -> bool {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) if first.is_uppercase() => chars.all(|c| c.is_lowercase()),
        _ => false,
    }
}
