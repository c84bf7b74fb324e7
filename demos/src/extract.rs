use agentlab_core::Event;

pub const NO_TEXT_FALLBACK: &str = "Response received but text content could not be extracted.";
pub const NO_RESPONSE_FALLBACK: &str = "No response received.";

/// Extract the final text answer from an event stream's collected events.
///
/// The latest event carrying text wins; fragments within one content are
/// joined, so a response split across several parts reads the same as a
/// single-part one.
pub fn response_text(events: &[Event]) -> String {
    if events.is_empty() {
        return NO_RESPONSE_FALLBACK.to_string();
    }
    for event in events.iter().rev() {
        if let Some(content) = &event.content {
            let text = content.text();
            if !text.is_empty() {
                return text;
            }
        }
    }
    NO_TEXT_FALLBACK.to_string()
}

/// Extract the final story from a refinement-loop run.
///
/// Walks backwards past function-call turns and critic verdicts: the
/// newest event whose text looks like a story (long enough, and not an
/// "APPROVED" verdict) is the answer. Falls back to [`response_text`].
pub fn story_text(events: &[Event]) -> String {
    if events.is_empty() {
        return NO_RESPONSE_FALLBACK.to_string();
    }
    for event in events.iter().rev() {
        let Some(content) = &event.content else {
            continue;
        };
        if content.has_function_calls() {
            continue;
        }
        let text = content.text();
        if text.len() > 50 && !text.contains("APPROVED") {
            return text;
        }
    }
    response_text(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentlab_core::{Content, Part};
    use serde_json::json;

    fn text_event(author: &str, text: &str) -> Event {
        Event::new("inv-1")
            .with_author(author)
            .with_content(Content::new("model").with_text(text))
    }

    #[test]
    fn test_empty_events() {
        assert_eq!(response_text(&[]), NO_RESPONSE_FALLBACK);
        assert_eq!(story_text(&[]), NO_RESPONSE_FALLBACK);
    }

    #[test]
    fn test_events_without_text() {
        let events = vec![Event::new("inv-1").with_author("agent")];
        assert_eq!(response_text(&events), NO_TEXT_FALLBACK);
    }

    #[test]
    fn test_latest_text_wins() {
        let events = vec![
            text_event("OutlineAgent", "the outline"),
            text_event("EditorAgent", "the polished post"),
            Event::new("inv-1").with_author("EditorAgent"),
        ];
        assert_eq!(response_text(&events), "the polished post");
    }

    #[test]
    fn test_fragments_join_like_single_part() {
        let mut split = Content::new("model");
        split.parts.push(Part::Text { text: "Hello ".into() });
        split.parts.push(Part::Text { text: "world".into() });
        let split_events = vec![Event::new("inv-1").with_author("a").with_content(split)];

        let whole_events = vec![text_event("a", "Hello world")];
        assert_eq!(response_text(&split_events), response_text(&whole_events));
    }

    #[test]
    fn test_story_skips_function_calls_and_verdicts() {
        let story = "Once upon a time a lighthouse keeper found a glowing map hidden in the lamp room.";
        let mut call_content = Content::new("model");
        call_content.parts.push(Part::FunctionCall {
            name: "exit_loop".into(),
            args: json!({}),
        });
        let events = vec![
            text_event("RefinerAgent", story),
            text_event("CriticAgent", "APPROVED"),
            Event::new("inv-1")
                .with_author("RefinerAgent")
                .with_content(call_content),
        ];
        assert_eq!(story_text(&events), story);
    }

    #[test]
    fn test_story_falls_back_when_nothing_looks_like_a_story() {
        let events = vec![text_event("CriticAgent", "APPROVED")];
        assert_eq!(story_text(&events), "APPROVED");
    }
}
