use std::{fmt::Display, fs, path::Path};

use anyhow::{anyhow, bail, Context, Result};
use gesturekit::{
    touch::{Emitted, GestureEvent},
    Contact, GestureConfig, ManualHost, Recognizer, TouchId, TouchSample,
};

pub const TRACE_HEADER: &str = "contact,ms,phase,id,x,y";
pub const EVENT_HEADER: &str =
    "event,ms,kind,id,x,y,offset_x,offset_y,duration_ms,speed_x,speed_y,touches,rotate,scale";

// Traces are recorded against a single surface.
const SURFACE: &str = "surface";

const EVENT_KINDS: [&str; 11] = [
    "press",
    "pressend",
    "tap",
    "doubletap",
    "panstart",
    "pan",
    "panend",
    "flick",
    "dualtouchstart",
    "dualtouch",
    "dualtouchend",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Start,
    Move,
    End,
    Cancel,
}

impl Phase {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "start" => Some(Self::Start),
            "move" => Some(Self::Move),
            "end" => Some(Self::End),
            "cancel" => Some(Self::Cancel),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TraceRow {
    pub ms: u64,
    pub phase: Phase,
    pub sample: TouchSample,
}

pub fn load_config(path: &Path) -> Result<GestureConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let config: GestureConfig =
        toml::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("invalid gesture profile {}", path.display()))?;
    Ok(config)
}

pub fn parse_trace(path: &Path) -> Result<Vec<TraceRow>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_trace_str(&raw, &path.display().to_string())
}

/// Parses `contact,ms,phase,id,x,y` rows. Rows with another leading tag are
/// skipped; timestamps must not go backwards.
pub fn parse_trace_str(raw: &str, origin: &str) -> Result<Vec<TraceRow>> {
    let mut rows: Vec<TraceRow> = Vec::new();
    for (line_no, line) in raw.lines().enumerate() {
        let line_no = line_no + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed == TRACE_HEADER {
            continue;
        }

        let parts: Vec<&str> = trimmed.split(',').map(str::trim).collect();
        if parts[0] != "contact" {
            continue;
        }
        if parts.len() != 6 {
            bail!("{origin}:{line_no} invalid trace line, expected 6 columns");
        }

        let ms = parse_field::<u64>(parts[1], origin, line_no, "ms")?;
        let phase = Phase::parse(parts[2])
            .ok_or_else(|| anyhow!("{origin}:{line_no} invalid phase '{}'", parts[2]))?;
        let id = parse_field::<TouchId>(parts[3], origin, line_no, "id")?;
        let x = parse_field::<f64>(parts[4], origin, line_no, "x")?;
        let y = parse_field::<f64>(parts[5], origin, line_no, "y")?;

        if let Some(last) = rows.last() {
            if ms < last.ms {
                bail!("{origin}:{line_no} timestamp {ms} goes back from {}", last.ms);
            }
        }

        rows.push(TraceRow {
            ms,
            phase,
            sample: TouchSample::at(id, x, y),
        });
    }
    Ok(rows)
}

fn parse_field<F>(raw: &str, origin: &str, line_no: usize, field: &str) -> Result<F>
where
    F: std::str::FromStr,
    F::Err: Display,
{
    raw.parse::<F>()
        .map_err(|e| anyhow!("{origin}:{line_no} invalid {field} '{raw}': {e}"))
}

/// Feeds the trace through a fresh recognizer. Consecutive rows sharing a
/// timestamp and phase form one raw batch. After the last row the clock runs
/// one press delay further so held touches can still report `press`.
pub fn replay(config: GestureConfig, rows: &[TraceRow]) -> Vec<Emitted<&'static str>> {
    let mut recognizer: Recognizer<&'static str> = Recognizer::new(config);
    let mut host: ManualHost<&'static str> =
        ManualHost::new(rows.first().map_or(0, |row| row.ms));
    let mut active: Vec<Contact<&'static str>> = Vec::new();

    for batch in rows.chunk_by(|a, b| a.ms == b.ms && a.phase == b.phase) {
        let ms = batch[0].ms;
        let phase = batch[0].phase;
        let changed: Vec<Contact<&'static str>> = batch
            .iter()
            .map(|row| Contact::new(row.sample, SURFACE))
            .collect();

        host.advance_to(&mut recognizer, ms);
        match phase {
            Phase::Start => {
                for contact in &changed {
                    upsert(&mut active, contact);
                }
                recognizer.contact_start(&mut host, &active, &changed);
            }
            Phase::Move => {
                for contact in &changed {
                    upsert(&mut active, contact);
                }
                recognizer.contact_move(&mut host, &active, &changed);
            }
            Phase::End | Phase::Cancel => {
                active.retain(|held| {
                    changed
                        .iter()
                        .all(|gone| gone.identifier() != held.identifier())
                });
                if phase == Phase::End {
                    recognizer.contact_end(&mut host, &active, &changed);
                } else {
                    recognizer.contact_cancel(&mut host, &active, &changed);
                }
            }
        }
        log::debug!("batch {phase:?} at {ms} ms with {} contacts", changed.len());
    }

    if let Some(last) = rows.last() {
        let tail_ms = last.ms.saturating_add(config.press_delay_ms);
        host.advance_to(&mut recognizer, tail_ms);
    }

    host.take_events()
}

fn upsert(active: &mut Vec<Contact<&'static str>>, contact: &Contact<&'static str>) {
    match active
        .iter_mut()
        .find(|held| held.identifier() == contact.identifier())
    {
        Some(held) => held.sample = contact.sample,
        None => active.push(contact.clone()),
    }
}

#[derive(Default)]
struct EventRow {
    id: Option<TouchId>,
    x: Option<f64>,
    y: Option<f64>,
    offset_x: Option<f64>,
    offset_y: Option<f64>,
    duration_ms: Option<u64>,
    speed_x: Option<f64>,
    speed_y: Option<f64>,
    touches: Option<usize>,
    rotate: Option<f64>,
    scale: Option<f64>,
}

fn cell<V: Display>(value: Option<V>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

pub fn format_event(emitted: &Emitted<&'static str>) -> String {
    let event = &emitted.event;
    let mut row = EventRow::default();
    if let Some(sample) = event.sample() {
        row.id = Some(sample.identifier);
        row.x = Some(sample.client.x);
        row.y = Some(sample.client.y);
    }
    if let Some(touches) = event.touches() {
        row.touches = Some(touches.len());
    }
    match event {
        GestureEvent::PanStart(pan) | GestureEvent::Pan(pan) => {
            row.offset_x = Some(pan.offset.x);
            row.offset_y = Some(pan.offset.y);
        }
        GestureEvent::PanEnd(end) => {
            row.offset_x = Some(end.offset.x);
            row.offset_y = Some(end.offset.y);
            row.duration_ms = Some(end.duration_ms);
        }
        GestureEvent::Flick(flick) => {
            row.offset_x = Some(flick.offset.x);
            row.offset_y = Some(flick.offset.y);
            row.duration_ms = Some(flick.duration_ms);
            row.speed_x = Some(flick.speed_x);
            row.speed_y = Some(flick.speed_y);
        }
        GestureEvent::DualTouch(dual) => {
            row.rotate = Some(dual.transform.rotate);
            row.scale = Some(dual.transform.scale);
        }
        _ => {}
    }

    format!(
        "event,{},{},{},{},{},{},{},{},{},{},{},{},{}",
        emitted.at_ms,
        event.name(),
        cell(row.id),
        cell(row.x),
        cell(row.y),
        cell(row.offset_x),
        cell(row.offset_y),
        cell(row.duration_ms),
        cell(row.speed_x),
        cell(row.speed_y),
        cell(row.touches),
        cell(row.rotate),
        cell(row.scale),
    )
}

pub fn parse_expected_kinds(path: &Path) -> Result<Vec<&'static str>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let mut kinds = Vec::new();
    for (line_no, line) in raw.lines().enumerate() {
        let token = line.trim();
        if token.is_empty() || token.starts_with('#') {
            continue;
        }
        let kind = normalize_kind(token).ok_or_else(|| {
            anyhow!(
                "{}:{} invalid expected event kind: {token}",
                path.display(),
                line_no + 1
            )
        })?;
        kinds.push(kind);
    }
    Ok(kinds)
}

fn normalize_kind(kind: &str) -> Option<&'static str> {
    let kind = kind.to_ascii_lowercase();
    EVENT_KINDS.iter().copied().find(|known| *known == kind)
}
