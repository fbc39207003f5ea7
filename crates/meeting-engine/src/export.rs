//! Calendar hand-off formats: "add to calendar" links and iCalendar text.
//!
//! Every timestamp here is derived from the meeting's authoritative instant and
//! written in UTC, so the receiving calendar renders it in its own zone.

use chrono::{DateTime, Utc};

use crate::meeting::Meeting;

const GOOGLE_CALENDAR_URL: &str = "https://calendar.google.com/calendar/render";
const OUTLOOK_CALENDAR_URL: &str = "https://outlook.live.com/calendar/0/deeplink/compose";
const PRODID: &str = "-//meeting-engine//EN";

/// Maximum content line length in octets (not including CRLF).
const MAX_LINE_OCTETS: usize = 75;

/// Google Calendar event-template link.
pub fn google_calendar_url(meeting: &Meeting) -> String {
    let start = meeting.instant.start_utc();
    let end = meeting.instant.end_utc();
    format!(
        "{GOOGLE_CALENDAR_URL}?action=TEMPLATE&text={}&dates={}/{}&details={}",
        urlencoding::encode(&meeting.title),
        ical_utc(&start),
        ical_utc(&end),
        urlencoding::encode(meeting.description.as_deref().unwrap_or("")),
    )
}

/// Outlook.com compose link.
pub fn outlook_calendar_url(meeting: &Meeting) -> String {
    let start = meeting.instant.start_utc();
    let end = meeting.instant.end_utc();
    format!(
        "{OUTLOOK_CALENDAR_URL}?subject={}&startdt={}&enddt={}&body={}",
        urlencoding::encode(&meeting.title),
        start.format("%Y-%m-%dT%H:%M:%SZ"),
        end.format("%Y-%m-%dT%H:%M:%SZ"),
        urlencoding::encode(meeting.description.as_deref().unwrap_or("")),
    )
}

/// A single-event `VCALENDAR` document with CRLF line endings.
///
/// `uid` and `stamp` are supplied by the caller so output is reproducible.
pub fn to_ics(meeting: &Meeting, uid: &str, stamp: DateTime<Utc>) -> String {
    let mut lines = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        format!("PRODID:{PRODID}"),
        "CALSCALE:GREGORIAN".to_string(),
        "BEGIN:VEVENT".to_string(),
        format!("UID:{}", escape_text(uid)),
        format!("DTSTAMP:{}", ical_utc(&stamp)),
        format!("DTSTART:{}", ical_utc(&meeting.instant.start_utc())),
        format!("DTEND:{}", ical_utc(&meeting.instant.end_utc())),
        format!("SUMMARY:{}", escape_text(&meeting.title)),
    ];
    if let Some(description) = &meeting.description {
        lines.push(format!("DESCRIPTION:{}", escape_text(description)));
    }
    if let Some(url) = &meeting.meeting_url {
        lines.push(format!("URL:{}", strip_controls(url)));
    }
    for email in &meeting.attendees {
        lines.push(format!("ATTENDEE;RSVP=TRUE:mailto:{}", strip_controls(email)));
    }
    lines.push("END:VEVENT".to_string());
    lines.push("END:VCALENDAR".to_string());

    lines.iter().map(|line| fold_line(line)).collect()
}

fn ical_utc(dt: &DateTime<Utc>) -> String {
    dt.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Escape an iCalendar TEXT value: backslash, comma, semicolon, newline.
fn escape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            ',' => result.push_str("\\,"),
            ';' => result.push_str("\\;"),
            '\n' => result.push_str("\\n"),
            '\r' => {}
            _ => result.push(c),
        }
    }
    result
}

/// URI values are not TEXT-escaped; control characters are dropped so a
/// value can never break out of its content line.
fn strip_controls(s: &str) -> String {
    s.chars().filter(|c| !c.is_control()).collect()
}

/// Fold a content line at 75 octets without splitting a UTF-8 sequence.
/// Continuation lines start with one space. Always ends in CRLF.
fn fold_line(line: &str) -> String {
    if line.len() <= MAX_LINE_OCTETS {
        return format!("{line}\r\n");
    }

    let mut result = String::with_capacity(line.len() + (line.len() / MAX_LINE_OCTETS) * 3);
    let mut rest = line;
    let mut first = true;
    while !rest.is_empty() {
        let budget = if first {
            MAX_LINE_OCTETS
        } else {
            MAX_LINE_OCTETS - 1
        };
        let mut end = budget.min(rest.len());
        while !rest.is_char_boundary(end) {
            end -= 1;
        }
        if !first {
            result.push(' ');
        }
        result.push_str(&rest[..end]);
        result.push_str("\r\n");
        rest = &rest[end..];
        first = false;
    }
    result
}
