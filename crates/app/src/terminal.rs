//! Line-oriented rendering and input for a quiz attempt.

use std::io::{self, BufRead, Write};

use quiz_core::model::{CATALOG, CHOICE_COUNT, ScoreSummary};
use quiz_core::{AnswerOutcome, QuizSession};

/// How a call to [`play`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundEnd {
    Completed,
    /// The player typed `q` or input ran out.
    Quit,
}

pub fn render_topics() -> String {
    let mut out = String::from("Available topics:\n");
    for info in CATALOG {
        out.push_str(&format!("  {:>3}  {}\n", info.id, info.name));
    }
    out
}

/// Progress line, question text and numbered choices for the current
/// question, or `None` outside a running quiz.
pub fn render_question(session: &QuizSession) -> Option<String> {
    let question = session.current_question()?;
    let progress = session.progress()?;

    let mut out = format!(
        "\nQuestion {} of {} [{:>3.0}%]\n{}\n",
        progress.position,
        progress.total,
        progress.fraction() * 100.0,
        question.text()
    );
    for (index, choice) in question.choices().iter().enumerate() {
        out.push_str(&format!("  {}. {}\n", index + 1, choice));
    }
    Some(out)
}

pub fn render_feedback(outcome: &AnswerOutcome) -> String {
    if outcome.correct {
        "Correct!".to_string()
    } else {
        format!("Wrong. The correct answer was: {}", outcome.answer)
    }
}

pub fn render_summary(summary: &ScoreSummary) -> String {
    format!(
        "\nYou scored {} out of {} ({}%). {}",
        summary.score(),
        summary.total(),
        summary.percentage(),
        summary.band().message()
    )
}

/// Parse a 1-based choice number.
pub fn parse_choice(line: &str) -> Option<usize> {
    line.trim()
        .parse::<usize>()
        .ok()
        .filter(|choice| (1..=CHOICE_COUNT).contains(choice))
}

/// Drive `session` to completion from `input`, writing prompts to `out`.
///
/// # Errors
///
/// Returns any I/O error from reading input or writing output.
pub fn play<R: BufRead, W: Write>(
    session: &mut QuizSession,
    input: &mut R,
    out: &mut W,
) -> io::Result<RoundEnd> {
    let mut line = String::new();

    while let Some(rendered) = render_question(session) {
        write!(out, "{rendered}")?;

        let outcome = loop {
            write!(out, "Your answer (1-{CHOICE_COUNT}, q to quit): ")?;
            out.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                writeln!(out)?;
                return Ok(RoundEnd::Quit);
            }
            if line.trim().eq_ignore_ascii_case("q") {
                return Ok(RoundEnd::Quit);
            }
            match parse_choice(&line).and_then(|choice| session.record_choice(choice)) {
                Some(outcome) => break outcome,
                None => writeln!(out, "Please enter a number from 1 to {CHOICE_COUNT}.")?,
            }
        };

        writeln!(out, "{}", render_feedback(&outcome))?;
        session.advance();
    }

    Ok(RoundEnd::Completed)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use quiz_core::model::{Question, QuestionSet};
    use quiz_core::time::test_util::frozen_clock;

    use super::*;

    fn session_with(count: usize) -> QuizSession {
        let questions = (0..count)
            .map(|n| {
                Question::new(
                    format!("Question {n}?"),
                    vec![
                        format!("right {n}"),
                        format!("wrong a{n}"),
                        format!("wrong b{n}"),
                        format!("wrong c{n}"),
                    ],
                    format!("right {n}"),
                )
                .unwrap()
            })
            .collect();
        let mut session = QuizSession::with_clock(frozen_clock());
        session.start(QuestionSet::new(questions).unwrap());
        session
    }

    fn run(session: &mut QuizSession, input: &str) -> (RoundEnd, String) {
        let mut out = Vec::new();
        let end = play(session, &mut Cursor::new(input.as_bytes()), &mut out).unwrap();
        (end, String::from_utf8(out).unwrap())
    }

    #[test]
    fn parse_choice_accepts_only_one_to_four() {
        assert_eq!(parse_choice(" 3\n"), Some(3));
        assert_eq!(parse_choice("0"), None);
        assert_eq!(parse_choice("5"), None);
        assert_eq!(parse_choice("two"), None);
    }

    #[test]
    fn renders_progress_and_numbered_choices() {
        let session = session_with(4);
        let text = render_question(&session).unwrap();
        assert!(text.contains("Question 1 of 4"));
        assert!(text.contains("Question 0?"));
        assert!(text.contains("  1. right 0"));
        assert!(text.contains("  4. wrong c0"));
    }

    #[test]
    fn plays_to_completion_and_scores() {
        let mut session = session_with(2);
        let (end, out) = run(&mut session, "1\n2\n");

        assert_eq!(end, RoundEnd::Completed);
        assert!(session.is_complete());
        assert_eq!(session.score(), 1);
        assert!(out.contains("Correct!"));
        assert!(out.contains("Wrong. The correct answer was: right 1"));
    }

    #[test]
    fn invalid_input_reprompts_without_scoring() {
        let mut session = session_with(1);
        let (end, out) = run(&mut session, "9\nabc\n1\n");

        assert_eq!(end, RoundEnd::Completed);
        assert_eq!(session.score(), 1);
        assert_eq!(out.matches("Please enter a number").count(), 2);
    }

    #[test]
    fn quitting_or_eof_stops_early() {
        let mut session = session_with(3);
        let (end, _) = run(&mut session, "1\nq\n");
        assert_eq!(end, RoundEnd::Quit);
        assert_eq!(session.current_index(), 1);

        let mut session = session_with(3);
        let (end, _) = run(&mut session, "");
        assert_eq!(end, RoundEnd::Quit);
        assert!(!session.is_complete());
    }

    #[test]
    fn summary_includes_band_message() {
        let mut session = session_with(2);
        run(&mut session, "1\n1\n");
        let text = render_summary(&session.summary().unwrap());
        assert!(text.contains("2 out of 2 (100%)"));
        assert!(text.contains("Outstanding!"));
    }

    #[test]
    fn topic_listing_covers_catalog() {
        let text = render_topics();
        assert!(text.contains("General Knowledge"));
        assert!(text.contains(" 11  Bollywood Movies"));
    }
}
