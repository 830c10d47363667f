use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use regex::Regex;
use std::sync::LazyLock;
use uuid::Uuid;

use super::{required_text, ValidationError};
use crate::domain::models::event::{Event, EventDraft};

static NON_SLUG_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_\s-]").expect("invalid slug filter regex"));
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("invalid whitespace regex"));
static TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([01]\d|2[0-3]):([0-5]\d)$").expect("invalid time regex"));

const OFFSET_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M%z",
];
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];
const NAIVE_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Lower-cases, trims, drops everything but ASCII word characters, whitespace and
/// hyphens, then turns each whitespace run into a single hyphen.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let stripped = NON_SLUG_CHARS.replace_all(lowered.trim(), "");
    WHITESPACE_RUN.replace_all(&stripped, "-").into_owned()
}

/// Parses a calendar date or instant and renders it as `YYYY-MM-DDTHH:MM:SS.sssZ`.
/// Inputs without an offset are read as UTC.
pub fn normalize_date(raw: &str) -> Result<String, ValidationError> {
    parse_instant(raw.trim())
        .map(|instant| instant.to_rfc3339_opts(SecondsFormat::Millis, true))
        .ok_or(ValidationError::InvalidDate)
}

fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Some(dt) = OFFSET_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(raw, fmt).ok())
    {
        return Some(dt.with_timezone(&Utc));
    }
    // `Z` without seconds, e.g. `2025-06-12T09:30Z`
    let local = raw.strip_suffix(['Z', 'z']).unwrap_or(raw);
    if let Some(naive) = NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(local, fmt).ok())
    {
        return Some(naive.and_utc());
    }
    NAIVE_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

pub fn is_valid_time(time: &str) -> bool {
    TIME_RE.is_match(time)
}

fn check_time(time: Option<&str>) -> Result<String, ValidationError> {
    let time = time.ok_or(ValidationError::EmptyField("time"))?;
    if time.trim().is_empty() {
        return Err(ValidationError::EmptyField("time"));
    }
    if !is_valid_time(time) {
        return Err(ValidationError::InvalidTime);
    }
    Ok(time.to_string())
}

fn check_date(date: Option<&str>) -> Result<String, ValidationError> {
    match date {
        Some(d) if !d.trim().is_empty() => normalize_date(d),
        _ => Err(ValidationError::EmptyField("date")),
    }
}

fn check_agenda(agenda: Option<Vec<String>>) -> Result<Vec<String>, ValidationError> {
    agenda
        .filter(|items| !items.is_empty())
        .ok_or(ValidationError::EmptyAgenda)
}

fn check_tags(tags: Option<Vec<String>>) -> Result<Vec<String>, ValidationError> {
    let tags = tags.filter(|items| !items.is_empty()).ok_or(ValidationError::EmptyTags)?;
    let mut unique: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        if !unique.contains(&tag) {
            unique.push(tag);
        }
    }
    Ok(unique)
}

/// Validates and normalizes an event about to be written.
///
/// `persisted` is the stored record for updates and `None` for a first save. The
/// slug is recomputed only when the trimmed title differs from the persisted one.
/// Timestamps are carried over untouched; the repository owns them.
pub fn prepare_event(draft: EventDraft, persisted: Option<&Event>) -> Result<Event, ValidationError> {
    let title = draft.title.as_deref().map(str::trim).unwrap_or_default();
    let slug = match persisted {
        Some(p) if p.title == title => p.slug.clone(),
        _ => slugify(title),
    };

    let date = check_date(draft.date.as_deref())?;
    let time = check_time(draft.time.as_deref())?;

    let title = required_text("title", draft.title.as_deref())?;
    let description = required_text("description", draft.description.as_deref())?;
    let overview = required_text("overview", draft.overview.as_deref())?;
    let image = required_text("image", draft.image.as_deref())?;
    let venue = required_text("venue", draft.venue.as_deref())?;
    let location = required_text("location", draft.location.as_deref())?;
    let mode = required_text("mode", draft.mode.as_deref())?;
    let audience = required_text("audience", draft.audience.as_deref())?;
    let organizer = required_text("organizer", draft.organizer.as_deref())?;

    let agenda = check_agenda(draft.agenda)?;
    let tags = check_tags(draft.tags)?;
    if slug.is_empty() {
        return Err(ValidationError::EmptySlug);
    }

    let now = Utc::now();
    Ok(Event {
        id: persisted.map(|p| p.id.clone()).unwrap_or_else(|| Uuid::new_v4().to_string()),
        slug,
        title,
        description,
        overview,
        image,
        venue,
        location,
        date,
        time,
        mode,
        audience,
        agenda,
        organizer,
        tags,
        created_at: persisted.map_or(now, |p| p.created_at),
        updated_at: persisted.map_or(now, |p| p.updated_at),
    })
}
