//! Poll and thread drafts produced by the response parser.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Number of options every poll draft carries.
pub const POLL_OPTION_COUNT: usize = 4;

/// A poll ready to publish.
///
/// `options` always holds exactly [`POLL_OPTION_COUNT`] entries.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct PollDraft {
    question: String,
    options: Vec<String>,
    duration_minutes: u32,
}

impl PollDraft {
    /// Create a poll draft, normalizing the options to exactly four.
    ///
    /// Missing options are synthesized as `Option N`; extra options are dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use tweetsmith_core::PollDraft;
    ///
    /// let poll = PollDraft::new("Tabs or spaces?", vec!["Tabs".into()], 60);
    /// assert_eq!(poll.options(), &["Tabs", "Option 2", "Option 3", "Option 4"]);
    /// ```
    pub fn new(question: impl Into<String>, mut options: Vec<String>, duration_minutes: u32) -> Self {
        options.truncate(POLL_OPTION_COUNT);
        while options.len() < POLL_OPTION_COUNT {
            options.push(format!("Option {}", options.len() + 1));
        }
        Self {
            question: question.into(),
            options,
            duration_minutes,
        }
    }
}

/// One post of a thread.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ThreadItem {
    text: String,
    sequence_index: usize,
}

impl ThreadItem {
    /// Create a thread item.
    pub fn new(text: impl Into<String>, sequence_index: usize) -> Self {
        Self {
            text: text.into(),
            sequence_index,
        }
    }
}

/// Ordered thread of posts; never longer than the configured maximum.
#[derive(Debug, Clone, PartialEq, Eq, Default, Getters, Serialize, Deserialize)]
pub struct ThreadDraft {
    items: Vec<ThreadItem>,
}

impl ThreadDraft {
    /// Build a draft from texts, keeping at most `max_items`.
    pub fn from_texts<I, S>(texts: I, max_items: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items = texts
            .into_iter()
            .take(max_items)
            .enumerate()
            .map(|(index, text)| ThreadItem::new(text, index))
            .collect();
        Self { items }
    }

    /// Number of posts in the thread.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the thread has no posts.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Texts in sequence order.
    pub fn texts(&self) -> Vec<String> {
        self.items.iter().map(|item| item.text.clone()).collect()
    }

    /// Mutable access to the first post, for tagging.
    pub fn first_mut(&mut self) -> Option<&mut String> {
        self.items.first_mut().map(|item| &mut item.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_truncates_extra_options() {
        let options = (1..=6).map(|n| format!("Choice {n}")).collect();
        let poll = PollDraft::new("Q", options, 1440);
        assert_eq!(poll.options().len(), POLL_OPTION_COUNT);
        assert_eq!(poll.options()[3], "Choice 4");
    }

    #[test]
    fn test_thread_indices_are_sequential() {
        let thread = ThreadDraft::from_texts(["a", "b", "c"], 2);
        assert_eq!(thread.len(), 2);
        assert_eq!(*thread.items()[1].sequence_index(), 1);
    }
}
