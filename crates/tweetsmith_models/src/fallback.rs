//! Static content used when every backend fails.

use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashMap;
use tweetsmith_core::PromptKey;

const LAST_RESORT: &str = "Keep shipping, keep learning. 🚀";

/// Literal samples per prompt key; one is chosen uniformly at random.
#[derive(Debug, Clone)]
pub struct FallbackTable {
    samples: HashMap<PromptKey, Vec<String>>,
}

impl Default for FallbackTable {
    fn default() -> Self {
        let mut table = Self {
            samples: HashMap::new(),
        };
        table.insert(
            PromptKey::Quote,
            &[
                "\"Code is like humor. When you have to explain it, it's bad.\" - Cory House",
                "\"First, solve the problem. Then, write the code.\" - John Johnson",
                "\"Simplicity is the soul of efficiency.\" - Austin Freeman",
                "\"Programs must be written for people to read, and only incidentally for machines to execute.\" - Harold Abelson",
                "\"The best error message is the one that never shows up.\" - Thomas Fuchs",
            ],
        );
        table.insert(
            PromptKey::NewsItem,
            &[
                "🚀 Open-source AI models close the gap with proprietary giants #AI #OpenSource",
                "🚀 Memory-safe languages gain ground in critical infrastructure #Rust #Security",
                "🚀 Developers report big productivity gains from AI pair programming #DevTools #AI",
                "🚀 WebAssembly moves beyond the browser into edge computing #Wasm #Cloud",
            ],
        );
        table.insert(
            PromptKey::Poll,
            &[
                "Question: What's your favorite programming language?\nOptions: [\"Rust\", \"Python\", \"TypeScript\", \"Go\"]",
                "Question: Where do you write most of your code?\nOptions: [\"VS Code\", \"Neovim\", \"JetBrains\", \"Other\"]",
                "Question: How do you use AI while coding?\nOptions: [\"Autocomplete\", \"Chat\", \"Code review\", \"Not at all\"]",
            ],
        );
        table.insert(
            PromptKey::Thread,
            &[
                "🧵 3 habits that make you a better developer\n1️⃣ Read code written by others. It teaches you patterns no tutorial will.\n2️⃣ Write tests before you fix a bug. It proves the fix and prevents regressions.\n3️⃣ Ship small changes often. Smaller diffs mean faster reviews and fewer surprises.",
                "🧵 Getting more out of AI coding tools\n1️⃣ Give context: paste the types and the error, not just the question.\n2️⃣ Ask for tests alongside the code, then run them.\n3️⃣ Treat suggestions like a junior's PR: review before you merge.",
                "🧵 Productivity tips for deep work\n1️⃣ Block two focus hours a day and guard them.\n2️⃣ Batch notifications instead of reacting instantly.\n3️⃣ End each day by writing tomorrow's first task.",
            ],
        );
        table.insert(
            PromptKey::EngagementReply,
            &[
                "Great point! Thanks for sharing this. 🙌",
                "Really insightful, this is going on my reading list.",
                "Love this perspective. Curious to see where it goes next!",
            ],
        );
        table.insert(
            PromptKey::EngagementQuote,
            &[
                "Worth a read for every developer 👇 #tech",
                "This one is a great reminder for all of us building software. #programming",
                "Interesting take. What do you all think? #community",
            ],
        );
        table
    }
}

impl FallbackTable {
    /// An empty table; every key resolves to a built-in last-resort line.
    pub fn empty() -> Self {
        Self {
            samples: HashMap::new(),
        }
    }

    fn insert(&mut self, key: PromptKey, samples: &[&str]) {
        self.samples
            .insert(key, samples.iter().map(|s| s.to_string()).collect());
    }

    /// Replace the samples for a key. Empty sample lists are ignored.
    pub fn with_samples(mut self, key: PromptKey, samples: Vec<String>) -> Self {
        if !samples.is_empty() {
            self.samples.insert(key, samples);
        }
        self
    }

    /// Samples registered for a key.
    pub fn samples(&self, key: PromptKey) -> &[String] {
        self.samples.get(&key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Pick one sample for `key` uniformly at random.
    pub fn pick<R: Rng + ?Sized>(&self, key: PromptKey, rng: &mut R) -> &str {
        self.samples(key)
            .choose(rng)
            .map(String::as_str)
            .unwrap_or(LAST_RESORT)
    }
}
