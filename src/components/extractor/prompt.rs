use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use schemars::schema_for;

use super::models::ParsedEventDescription;
use crate::error::AppResult;

/// System preamble fixing the model's output contract
pub const SYSTEM_PREAMBLE: &str = "You are a strict JSON calendar event extraction engine. You read instructions and an event description and reply ONLY with a single JSON object, with no markdown, no backticks, and no extra text. If the text gives an explicit date (e.g. \"December 6th\"), you preserve that exact month and day and only fill in a missing year or time according to the instructions.";

/// User prompt template for one extraction request
const USER_PROMPT_TEMPLATE: &str = "Extract the calendar event described in the text below.
Current date and time (UTC): {now}
User timezone: {timezone}

Fill these fields:
- \"title\": a short name for the occasion.
- \"description\": one sentence summarizing the event; omit it when the text adds nothing beyond the title.
- \"start\": an RFC3339 datetime string in the user's timezone.
- \"end\": an RFC3339 datetime string in the user's timezone, ONLY when the text states an end time or a duration; otherwise omit the field entirely.
- \"location\": where the event takes place; omit it when not stated.
- \"participants\": the names of the people attending, or an empty array when none are named.

Rules:
- If the text gives an explicit date like \"December 6th\", use that exact month and day; do NOT change them.
- If the year is omitted, assume the next occurrence of that date on or after the current date.
- If the text gives a relative time (e.g. \"in two weeks\", \"tomorrow at 3pm\"), compute the concrete datetime from the current date/time.
- For day-of-week phrases:
  - \"Friday\" or \"this Friday\" means the next occurrence of that weekday on or after today.
  - \"next Friday\" means the occurrence in the following week (at least 7 days after today), not the immediate upcoming one.
- If no time of day is stated, give the start as the bare date (YYYY-MM-DD) with no time part.
- Never invent or adjust the date away from what the text states; only add a year or time if needed.
- Never output the string \"unknown\"; omit optional fields you cannot fill.
- Output ONLY raw JSON, no prose, markdown, or code fences.
- The JSON must match this schema:
{schema}

Text: \"{text}\"";

/// Build the extraction prompt for one description
pub fn build_extraction_prompt(text: &str, now: DateTime<Utc>, timezone: Tz) -> AppResult<String> {
    let schema = schema_for!(ParsedEventDescription);
    let schema_json = serde_json::to_string_pretty(&schema)?;

    Ok(USER_PROMPT_TEMPLATE
        .replace("{now}", &now.to_rfc3339())
        .replace("{timezone}", &timezone.to_string())
        .replace("{schema}", &schema_json)
        .replace("{text}", text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_prompt_carries_clock_and_text() {
        let now = Utc.with_ymd_and_hms(2024, 8, 14, 12, 0, 0).unwrap();
        let prompt =
            build_extraction_prompt("Lunch with Sam tomorrow", now, chrono_tz::Tz::UTC).unwrap();

        assert!(prompt.contains("2024-08-14T12:00:00+00:00"));
        assert!(prompt.contains("User timezone: UTC"));
        assert!(prompt.contains("Lunch with Sam tomorrow"));
        // The schema of the target type is embedded so the reply shape is fixed
        assert!(prompt.contains("\"title\""));
        assert!(prompt.contains("\"participants\""));
    }

    #[test]
    fn test_prompt_resolves_timezone_name() {
        let now = Utc.with_ymd_and_hms(2024, 8, 14, 12, 0, 0).unwrap();
        let prompt = build_extraction_prompt(
            "Standup on Monday",
            now,
            chrono_tz::America::Los_Angeles,
        )
        .unwrap();

        assert!(prompt.contains("User timezone: America/Los_Angeles"));
    }
}
