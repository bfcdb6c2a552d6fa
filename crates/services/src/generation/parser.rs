//! Best-effort parsing of free-form generator output.
//!
//! Generators are asked for a JSON array but frequently answer with prose.
//! Parsing never fails: anything unrecognizable yields fewer (or zero)
//! records, and the normalizer filters whatever does come out.

use quiz_core::model::{CHOICE_COUNT, RawQuestion};
use serde_json::Value;

/// Extract raw questions from generator output.
///
/// Tries the text between the first `[` and the last `]` as a JSON array of
/// `{question, choices, answer}` objects. When there is no such array or it
/// does not decode, falls back to line-oriented parsing: a line containing
/// `?` opens a question, and lines starting with `A)`–`D)`, `1.`–`4.` or `-`
/// are its options. An `Answer:` line picks the correct option by letter,
/// number or text; without one the first option is taken as correct, which
/// is known to be imprecise.
#[must_use]
pub fn parse_generated(text: &str) -> Vec<RawQuestion> {
    if let Some(rows) = json_array(text) {
        return rows.iter().filter_map(row_to_raw).collect();
    }
    parse_structured_text(text)
}

fn json_array(text: &str) -> Option<Vec<Value>> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    if end <= start {
        return None;
    }
    serde_json::from_str::<Vec<Value>>(&text[start..=end]).ok()
}

fn row_to_raw(row: &Value) -> Option<RawQuestion> {
    let obj = row.as_object()?;
    let question = ["question", "text", "prompt"]
        .iter()
        .find_map(|key| obj.get(*key)?.as_str())?;
    let choices: Vec<String> = ["choices", "options", "answers"]
        .iter()
        .find_map(|key| obj.get(*key)?.as_array())?
        .iter()
        .filter_map(scalar_to_string)
        .collect();
    let answer = ["answer", "correct_answer", "correct"]
        .iter()
        .find_map(|key| obj.get(*key).and_then(scalar_to_string))?;

    let correct = resolve_answer(&answer, &choices).unwrap_or(answer);
    Some(RawQuestion::new(question, choices, correct))
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[derive(Default)]
struct Block {
    question: String,
    options: Vec<String>,
    answer: Option<String>,
}

impl Block {
    fn finish(self) -> Option<RawQuestion> {
        if self.question.is_empty() || self.options.len() < CHOICE_COUNT {
            return None;
        }
        let mut options = self.options;
        options.truncate(CHOICE_COUNT);
        let correct = self
            .answer
            .and_then(|answer| resolve_answer(&answer, &options))
            .unwrap_or_else(|| options[0].clone());
        Some(RawQuestion::new(self.question, options, correct))
    }
}

fn parse_structured_text(text: &str) -> Vec<RawQuestion> {
    let mut out = Vec::new();
    let mut block: Option<Block> = None;

    for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
        if let Some(answer) = answer_marker(line) {
            if let Some(current) = block.as_mut() {
                current.answer = Some(answer.to_string());
            }
        } else if line.contains('?') {
            if let Some(done) = block.take().and_then(Block::finish) {
                out.push(done);
            }
            block = Some(Block {
                question: line.to_string(),
                ..Block::default()
            });
        } else if let Some(option) = option_marker(line) {
            if let Some(current) = block.as_mut() {
                current.options.push(option.trim().to_string());
            }
        }
    }

    if let Some(done) = block.and_then(Block::finish) {
        out.push(done);
    }
    out
}

/// Strip an `A)`..`D)`, `1.`..`4.` or `-` prefix.
fn option_marker(line: &str) -> Option<&str> {
    let mut chars = line.chars();
    let first = chars.next()?;
    let second = chars.next();
    match (first, second) {
        ('A'..='D', Some(')')) | ('1'..='4', Some('.')) => Some(&line[2..]),
        ('-', _) => Some(&line[1..]),
        _ => None,
    }
}

/// Value of an `Answer:` / `Correct answer:` line, if this is one.
fn answer_marker(line: &str) -> Option<&str> {
    let lower = line.to_ascii_lowercase();
    ["correct answer", "answer"].iter().find_map(|prefix| {
        if !lower.starts_with(prefix) {
            return None;
        }
        let rest = line[prefix.len()..].trim_start();
        rest.strip_prefix([':', '-'])
            .map(str::trim)
            .filter(|value| !value.is_empty())
    })
}

/// Map an answer given as a letter, a 1-based number, or option text onto
/// one of `options`.
fn resolve_answer(answer: &str, options: &[String]) -> Option<String> {
    let answer = answer.trim();
    if let Some(found) = options.iter().find(|opt| opt.as_str() == answer) {
        return Some(found.clone());
    }

    let mut chars = answer.chars();
    let first = chars.next()?;
    let rest = chars.as_str().trim_start_matches([')', '.', ':']).trim();
    let index = match first {
        'A'..='D' | 'a'..='d' => first.to_ascii_uppercase() as usize - 'A' as usize,
        '1'..='4' => first as usize - '1' as usize,
        _ => return None,
    };
    let candidate = options.get(index)?;
    if rest.is_empty() || rest == candidate {
        Some(candidate.clone())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_json_array_embedded_in_prose() {
        let text = r#"Sure! Here are your questions:
[
  {"question": "Who directed Sholay?", "choices": ["Ramesh Sippy", "Yash Chopra", "K. Asif", "Karan Johar"], "answer": "Ramesh Sippy"},
  {"question": "Year of Lagaan?", "choices": [2000, 2001, 2002, 2003], "answer": 2001},
  "not an object"
]
Enjoy!"#;
        let rows = parse_generated(text);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].correct, "Ramesh Sippy");
        assert_eq!(rows[1].options, vec!["2000", "2001", "2002", "2003"]);
        assert_eq!(rows[1].correct, "2001");
    }

    #[test]
    fn json_answer_letter_maps_to_choice() {
        let text = r#"[{"question": "q?", "choices": ["w", "x", "y", "z"], "answer": "C"}]"#;
        assert_eq!(parse_generated(text)[0].correct, "y");
    }

    #[test]
    fn parses_lettered_text_blocks() {
        let text = "\
1) Who sang Lag Jaa Gale?
A) Lata Mangeshkar
B) Asha Bhosle
C) Alka Yagnik
D) Shreya Ghoshal

Which film features Jai Ho?
1. Slumdog Millionaire
2. Lagaan
3. Taal
4. Swades
Answer: 1
";
        let rows = parse_generated(text);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].question, "1) Who sang Lag Jaa Gale?");
        assert_eq!(rows[0].correct, "Lata Mangeshkar");
        assert_eq!(rows[1].correct, "Slumdog Millionaire");
    }

    #[test]
    fn explicit_answer_overrides_first_option() {
        let text = "\
Who is called Pancham Da?
- Kishore Kumar
- R.D. Burman
- Mukesh
- Manna Dey
Correct answer: B) R.D. Burman
";
        let rows = parse_generated(text);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].correct, "R.D. Burman");
    }

    #[test]
    fn blocks_with_too_few_options_are_dropped() {
        let text = "Question one?\nA) a\nB) b\nQuestion two?\nA) a\nB) b\nC) c\nD) d\nE) e";
        let rows = parse_generated(text);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].question, "Question two?");
        assert_eq!(rows[0].options.len(), 4);
    }

    #[test]
    fn garbage_yields_nothing() {
        assert!(parse_generated("").is_empty());
        assert!(parse_generated("I cannot help with that.").is_empty());
        assert!(parse_generated("] backwards [").is_empty());
    }

    #[test]
    fn malformed_json_falls_back_to_text() {
        let text = "[broken json\nWhat is 2+2?\nA) 4\nB) 3\nC) 5\nD) 6\n]";
        let rows = parse_generated(text);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].correct, "4");
    }
}
