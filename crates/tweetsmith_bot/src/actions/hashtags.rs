//! Hashtag decoration and length limits for outgoing posts.

use rand::Rng;
use rand::seq::SliceRandom;
use tweetsmith_social::MAX_POST_CHARS;

/// Whether the text already carries a hashtag.
pub fn has_hashtag(text: &str) -> bool {
    text.split_whitespace().any(|word| {
        word.strip_prefix('#')
            .is_some_and(|tag| tag.chars().next().is_some_and(char::is_alphanumeric))
    })
}

/// Pick one tag from `tags`, or from `fallback` when `tags` is empty.
pub fn pick_tag<'a, R: Rng + ?Sized>(
    tags: &'a [String],
    fallback: &'a [String],
    rng: &mut R,
) -> Option<&'a str> {
    let pool = if tags.is_empty() { fallback } else { tags };
    pool.choose(rng).map(String::as_str)
}

/// Append `tag` unless it is already present or the result would exceed the
/// post limit.
///
/// # Examples
///
/// ```
/// use tweetsmith_bot::append_hashtag;
///
/// assert_eq!(append_hashtag("Ship it", "#tech"), "Ship it #tech");
/// assert_eq!(append_hashtag("Ship it #Tech", "#tech"), "Ship it #Tech");
/// ```
pub fn append_hashtag(text: &str, tag: &str) -> String {
    let lowered = text.to_lowercase();
    let tag_lowered = tag.to_lowercase();
    if lowered
        .split_whitespace()
        .any(|word| word.trim_end_matches(|c: char| c.is_ascii_punctuation()) == tag_lowered)
    {
        return text.to_string();
    }

    if text.chars().count() + 1 + tag.chars().count() > MAX_POST_CHARS {
        return text.to_string();
    }

    format!("{text} {tag}")
}

/// Cut text to the post limit, ending with an ellipsis when shortened.
pub fn fit_to_limit(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
