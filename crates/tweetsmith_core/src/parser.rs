//! Line-oriented extraction of polls and threads from generated text.
//!
//! Both parsers are total: malformed or missing delimiters degrade to a
//! heuristic reading of the text instead of failing.

use crate::{POLL_OPTION_COUNT, PollDraft, ThreadDraft};
use tracing::debug;

const QUESTION_DELIMITER: &str = "question:";
const OPTIONS_DELIMITER: &str = "options:";

/// Parse a poll from generated text.
///
/// Looks for a `Question:` line and an `Options:` line (case-insensitive).
/// When either is missing, the first non-empty line becomes the question and
/// the following non-empty lines become the options. The result always has
/// exactly four options.
///
/// # Examples
///
/// ```
/// use tweetsmith_core::parse_poll;
///
/// let poll = parse_poll("Question: Pick one\nOptions: [\"A\",\"B\",\"C\"]", 1440);
/// assert_eq!(poll.question(), "Pick one");
/// assert_eq!(poll.options(), &["A", "B", "C", "Option 4"]);
/// ```
pub fn parse_poll(text: &str, duration_minutes: u32) -> PollDraft {
    let lines: Vec<&str> = non_empty_lines(text).collect();

    let question = lines
        .iter()
        .find_map(|line| after_delimiter(line, QUESTION_DELIMITER))
        .filter(|question| !question.is_empty());
    let options = lines
        .iter()
        .find_map(|line| after_delimiter(line, OPTIONS_DELIMITER))
        .map(split_options);

    match (question, options) {
        (Some(question), Some(options)) => {
            PollDraft::new(question.to_string(), options, duration_minutes)
        }
        _ => {
            debug!(lines = lines.len(), "Poll delimiters missing, using line heuristic");
            let question = lines.first().copied().unwrap_or_default().to_string();
            let options = lines
                .iter()
                .skip(1)
                .take(POLL_OPTION_COUNT)
                .map(|line| strip_wrapping(line).to_string())
                .filter(|option| !option.is_empty())
                .collect();
            PollDraft::new(question, options, duration_minutes)
        }
    }
}

/// Parse a thread from generated text: one post per non-empty line.
///
/// Lines beyond `max_items` are dropped.
///
/// # Examples
///
/// ```
/// use tweetsmith_core::parse_thread;
///
/// let thread = parse_thread("1️⃣ Use clippy\n\n2️⃣ Read the docs\n3️⃣ Ship", 2);
/// assert_eq!(thread.texts(), vec!["1️⃣ Use clippy", "2️⃣ Read the docs"]);
/// ```
pub fn parse_thread(text: &str, max_items: usize) -> ThreadDraft {
    ThreadDraft::from_texts(non_empty_lines(text), max_items)
}

fn non_empty_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim).filter(|line| !line.is_empty())
}

/// Text following `delimiter` in `line`, matched ASCII case-insensitively.
fn after_delimiter<'a>(line: &'a str, delimiter: &str) -> Option<&'a str> {
    // ASCII lowercasing keeps byte offsets aligned with the original line.
    let lowered = line.to_ascii_lowercase();
    let start = lowered.find(delimiter)? + delimiter.len();
    Some(line[start..].trim())
}

fn split_options(raw: &str) -> Vec<String> {
    strip_wrapping(raw)
        .split(',')
        .map(strip_wrapping)
        .filter(|option| !option.is_empty())
        .map(str::to_string)
        .collect()
}

fn strip_wrapping(value: &str) -> &str {
    value
        .trim()
        .trim_matches(|c: char| matches!(c, '[' | ']' | '"' | '\'' | '“' | '”'))
        .trim()
}
