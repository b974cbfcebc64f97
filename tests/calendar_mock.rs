use calscribe::components::nylas::models::{Calendar, CalendarEvent, EventDraft, EventWhen};
use calscribe::error::AppResult;

/// Mock implementation of the Nylas client surface for testing
#[derive(Debug, Clone, Default)]
pub struct MockNylasHandle {
    calendars: Vec<Calendar>,
    events: Vec<CalendarEvent>,
}

impl MockNylasHandle {
    /// Create a new mock handle with predefined calendars and events
    pub fn new() -> Self {
        let calendars = vec![
            Calendar {
                id: "cal1".to_string(),
                name: "Personal".to_string(),
                timezone: Some("America/Los_Angeles".to_string()),
                ..Default::default()
            },
            Calendar {
                id: "cal2".to_string(),
                name: "Work".to_string(),
                read_only: true,
                ..Default::default()
            },
        ];

        let events = vec![
            CalendarEvent {
                id: "event1".to_string(),
                title: Some("Test Event 1".to_string()),
                description: Some("Test Description 1".to_string()),
                when: Some(EventWhen {
                    object: Some("timespan".to_string()),
                    start_time: Some(1723852800),
                    end_time: Some(1723856400),
                    ..Default::default()
                }),
                ..Default::default()
            },
            CalendarEvent {
                id: "event2".to_string(),
                title: Some("Test Event 2".to_string()),
                when: Some(EventWhen {
                    object: Some("date".to_string()),
                    date: Some("2024-08-17".to_string()),
                    ..Default::default()
                }),
                ..Default::default()
            },
        ];

        Self { calendars, events }
    }

    /// Create a mock handle for an account with no calendars
    pub fn empty() -> Self {
        Self::default()
    }

    /// List the calendars on the mock account
    pub async fn list_calendars(&self) -> AppResult<Vec<Calendar>> {
        Ok(self.calendars.clone())
    }

    /// List up to `limit` events from the mock calendar
    pub async fn list_events(
        &self,
        _calendar_id: &str,
        limit: u32,
    ) -> AppResult<Vec<CalendarEvent>> {
        Ok(self.events.iter().take(limit as usize).cloned().collect())
    }

    /// Echo the draft back the way the service would
    pub async fn create_event(
        &self,
        calendar_id: &str,
        draft: &EventDraft,
    ) -> AppResult<CalendarEvent> {
        Ok(CalendarEvent {
            id: "created1".to_string(),
            calendar_id: Some(calendar_id.to_string()),
            title: Some(draft.title.clone()),
            description: draft.description.clone(),
            location: draft.location.clone(),
            status: Some(draft.status.clone()),
            busy: Some(draft.busy),
            participants: draft.participants.clone(),
            when: Some(EventWhen {
                object: Some(draft.when.object.clone()),
                start_time: Some(draft.when.start_time),
                end_time: Some(draft.when.end_time),
                ..Default::default()
            }),
        })
    }
}

#[tokio::test]
async fn test_nylas_mock() {
    let mock_handle = MockNylasHandle::new();

    let calendars = mock_handle.list_calendars().await.unwrap();
    assert_eq!(calendars.len(), 2);
    assert_eq!(calendars[0].id, "cal1");
    assert_eq!(calendars[1].id, "cal2");
    assert!(calendars[1].read_only);

    let events = mock_handle.list_events("cal1", 5).await.unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].id, "event1");
}

#[tokio::test]
async fn test_empty_account_lists_no_calendars() {
    // Zero calendars is an empty sequence, not an error
    let mock_handle = MockNylasHandle::empty();

    let calendars = mock_handle.list_calendars().await.unwrap();
    assert!(calendars.is_empty());

    let events = mock_handle.list_events("cal1", 5).await.unwrap();
    assert!(events.is_empty());
}

#[tokio::test]
async fn test_event_listing_honors_limit() {
    let mock_handle = MockNylasHandle::new();

    let events = mock_handle.list_events("cal1", 1).await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].id, "event1");
}

#[tokio::test]
async fn test_created_event_echoes_draft_fields() {
    use calscribe::components::extractor::models::ParsedEventDescription;
    use calscribe::utils::time::resolve_event_window;
    use chrono::Duration;

    let parsed = ParsedEventDescription {
        title: "Quarterly review".to_string(),
        description: Some("Planning session".to_string()),
        start: "2024-08-16T10:00:00".to_string(),
        end: None,
        location: Some("Room 2".to_string()),
        participants: vec!["Alice".to_string()],
    };

    let window =
        resolve_event_window(&parsed, chrono_tz::Tz::UTC, Duration::minutes(60)).unwrap();
    let draft = EventDraft::from_extraction(&parsed, &window);

    let mock_handle = MockNylasHandle::new();
    let event = mock_handle.create_event("cal1", &draft).await.unwrap();

    assert_eq!(event.calendar_id.as_deref(), Some("cal1"));
    assert_eq!(event.title.as_deref(), Some("Quarterly review"));
    assert_eq!(event.status.as_deref(), Some("confirmed"));
    assert_eq!(event.busy, Some(true));
    let when = event.when.unwrap();
    assert_eq!(when.object.as_deref(), Some("timespan"));
    assert_eq!(
        when.end_time.unwrap() - when.start_time.unwrap(),
        3600
    );
}
