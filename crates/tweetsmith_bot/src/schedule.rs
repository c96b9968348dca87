//! Cron expressions for scheduled activities.

use chrono::{DateTime, Utc};
use cron::Schedule;
use std::str::FromStr;
use std::time::Duration;
use tweetsmith_error::ConfigError;

/// Day names indexed by five-field cron numbering (0 and 7 are Sunday).
const WEEKDAYS: [&str; 8] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Normalise a cron expression to the 6/7-field form the `cron` crate reads.
///
/// Five-field expressions (`min hour dom month dow`) get a leading `0`
/// seconds field, and numeric days of week are rewritten as day names: the
/// `cron` crate counts Sunday as 1 where five-field cron counts it as 0.
///
/// # Examples
///
/// ```
/// use tweetsmith_bot::normalize_cron;
///
/// assert_eq!(normalize_cron("0 */4 * * *"), "0 0 */4 * * *");
/// assert_eq!(normalize_cron("0 9 * * 1-5"), "0 0 9 * * Mon-Fri");
/// assert_eq!(normalize_cron("30 0 9 * * *"), "30 0 9 * * *");
/// ```
pub fn normalize_cron(expression: &str) -> String {
    let fields: Vec<&str> = expression.split_whitespace().collect();
    match fields.as_slice() {
        [minute, hour, day, month, weekday] => format!(
            "0 {minute} {hour} {day} {month} {}",
            weekday_names(weekday)
        ),
        _ => fields.join(" "),
    }
}

fn weekday_name(token: &str) -> Option<&'static str> {
    token
        .parse::<usize>()
        .ok()
        .and_then(|n| WEEKDAYS.get(n).copied())
}

/// Rewrite each element of a five-field day-of-week list with day names.
///
/// `*` and `*/n` select the same days in both numberings and stay as they
/// are; so do tokens that are already names.
fn weekday_names(field: &str) -> String {
    field
        .split(',')
        .map(|element| {
            let (base, step) = match element.split_once('/') {
                Some((base, step)) => (base, Some(step)),
                None => (element, None),
            };
            let with_step = |base: String| match step {
                Some(step) => format!("{base}/{step}"),
                None => base,
            };

            if base == "*" {
                return element.to_string();
            }
            match base.split_once('-') {
                Some((start, end)) => match (weekday_name(start), weekday_name(end)) {
                    // Sunday as 7 closes a range; the crate's week ends on Saturday.
                    (Some(from), Some(_)) if end == "7" => match (from, step) {
                        _ if start == "0" => with_step("Sun-Sat".to_string()),
                        ("Sun", _) => with_step("Sun".to_string()),
                        (_, Some(_)) => with_step(format!("{from}-Sat")),
                        (_, None) => format!("{from}-Sat,Sun"),
                    },
                    (Some(from), Some(to)) => with_step(format!("{from}-{to}")),
                    _ => element.to_string(),
                },
                None => match weekday_name(base) {
                    Some(name) => with_step(name.to_string()),
                    None => element.to_string(),
                },
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Parse a cron expression in 5, 6, or 7-field form.
///
/// # Errors
///
/// Returns error if the expression is not a valid cron schedule.
pub fn parse_cron(expression: &str) -> Result<Schedule, ConfigError> {
    let normalized = normalize_cron(expression);
    Schedule::from_str(&normalized)
        .map_err(|e| ConfigError::new(format!("Invalid cron expression '{expression}': {e}")))
}

/// Next fire time strictly after `after`.
pub fn next_fire(schedule: &Schedule, after: DateTime<Utc>) -> Option<DateTime<Utc>> {
    schedule.after(&after).next()
}

/// Wait from `now` until `next`; zero when `next` has passed.
pub fn delay_until(now: DateTime<Utc>, next: DateTime<Utc>) -> Duration {
    (next - now).to_std().unwrap_or(Duration::ZERO)
}
