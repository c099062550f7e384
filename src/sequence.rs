#![doc = r#"
The emitted sequence document and the decode loop that fills it.

[`StepSequence::decode`] makes one forward pass over the byte stream: file
header first, then each track in order. Only the derived step grid and
class name of a track survive into the output; the event stream itself is
transient.
"#]

use crate::{
    event::{ChannelCommand, MetaKind, MetaMessage, TrackMessage},
    file::{DecodeOptions, FileHeader, TrackEvents, TrackHeader},
    grid::{StepGrid, StepSlot},
    reader::{ReadResult, Reader, ReaderError},
};
use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Attribution string carried in every emitted document.
pub const INFO: &str = "converted using midi2json by superpanic, https://github.com/superpanic";

/// Class name of the reserved setup track.
pub const SETUP_CLASS: &str = "SETUP";

/// The decoded sequence document.
///
/// Serializes to the JSON contract: `info`, `name`, then `patterns`, one
/// per track, in file order.
#[derive(Debug, PartialEq, Eq, serde::Serialize)]
pub struct StepSequence {
    info: &'static str,
    name: String,
    patterns: Vec<Pattern>,
}

/// One track's emitted record.
#[derive(Debug, PartialEq, Eq, serde::Serialize)]
pub struct Pattern {
    /// Zero-based track ordinal.
    #[serde(rename = "track number")]
    pub track_number: u16,
    /// "SETUP" for track 0, or the name bound by a 0x03 meta event.
    /// Omitted from the output when unbound.
    #[serde(rename = "className", skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// The quantized grid; empty if the track had no note onsets.
    pub steps: Vec<StepSlot>,
}

// The wire shape of a slot is stringly: {"on": 0|1, "key": "60"|"", "step": "1"}.
impl Serialize for StepSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("StepSlot", 3)?;
        state.serialize_field("on", &u8::from(self.active))?;
        let key = self.key.map(|k| k.to_string()).unwrap_or_default();
        state.serialize_field("key", &key)?;
        state.serialize_field("step", &self.index.to_string())?;
        state.end()
    }
}

impl StepSequence {
    /// Decode a whole MIDI file into a sequence document.
    ///
    /// `name` is recorded verbatim in the output's `name` field (the CLI
    /// passes the input path). The run ends after the last track's End of
    /// Track event; trailing bytes are ignored.
    pub fn decode(name: impl Into<String>, bytes: &[u8], options: DecodeOptions) -> ReadResult<Self> {
        let mut reader = Reader::from_byte_slice(bytes);
        let header = FileHeader::read(&mut reader)?;

        let mut patterns = Vec::with_capacity(usize::from(header.track_count()));
        for track_number in 0..header.track_count() {
            let track_header = TrackHeader::read(&mut reader)?;
            tracing::debug!(track_number, length = track_header.length(), "reading track");
            patterns.push(decode_track(&mut reader, track_number, options)?);
        }

        Ok(Self {
            info: INFO,
            name: name.into(),
            patterns,
        })
    }

    /// The input name recorded in the document.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The per-track patterns, in file order.
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// Render the document as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Pull one track's events, routing note onsets into a [`StepGrid`].
///
/// Track 0 is reserved for global setup metadata: its channel events are
/// read in full but never contribute notes.
fn decode_track(
    reader: &mut Reader<'_>,
    track_number: u16,
    options: DecodeOptions,
) -> ReadResult<Pattern> {
    let mut events = TrackEvents::new(reader, options);
    let mut absolute_time: u32 = 0;
    let mut grid = StepGrid::new();
    let mut class_name = (track_number == 0).then(|| SETUP_CLASS.to_owned());

    loop {
        let event = events.next_event()?;
        absolute_time = absolute_time.saturating_add(event.delta_time);
        match event.message {
            TrackMessage::Meta(MetaMessage::EndOfTrack) => break,
            TrackMessage::Meta(MetaMessage::Text(MetaKind::TrackName, text)) => {
                // the setup track keeps its reserved label
                if track_number > 0 {
                    class_name = Some(text);
                }
            }
            TrackMessage::Channel(message)
                if track_number > 0 && message.command == ChannelCommand::NoteOn =>
            {
                let at = events.buffer_position();
                grid.note_on(absolute_time, message.key())
                    .map_err(|e| ReaderError::parse_error(at, e))?;
            }
            _ => {}
        }
    }

    Ok(Pattern {
        track_number,
        class_name,
        steps: grid.finish(),
    })
}
