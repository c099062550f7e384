#![doc = r#"
The parse error taxonomy.

Every condition here is fatal to the run that detects it: the decoder makes
one forward pass and does not attempt skip-and-continue or partial-track
recovery. Errors are values, though, not process exits; callers (the CLI
binary included) decide how to report them.
"#]

use thiserror::Error;

pub use crate::grid::GridError;

/// Any error produced while interpreting bytes that were otherwise
/// successfully read.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Chunk-level errors (file and track headers)
    #[error("{0}")]
    Chunk(#[from] ChunkError),
    /// Event-level errors within a track
    #[error("{0}")]
    Event(#[from] EventError),
    /// Step grid errors
    #[error("{0}")]
    Grid(#[from] GridError),
}

/// Errors in the chunk structure of the file.
#[derive(Debug, Error)]
pub enum ChunkError {
    /// The first four bytes were not the "MThd" tag.
    #[error("not a MIDI file (missing \"MThd\" tag)")]
    NotAMidiFile,
    /// The header declared a format other than 0, 1 or 2.
    #[error("unknown MIDI file format {0}")]
    UnknownFormat(u16),
    /// A track chunk did not start with the "MTrk" tag.
    #[error("could not find a MIDI track (missing \"MTrk\" tag)")]
    MissingTrackHeader,
}

/// Errors in the event stream of a track.
#[derive(Debug, Error)]
pub enum EventError {
    /// A delta-time failed to terminate within 4 bytes.
    #[error("delta-time exceeds the 4 byte limit")]
    VlqTooLong,
    /// A meta event tag missing from the meta event table.
    #[error("unknown meta event type {0:#04x}")]
    UnknownMetaEvent(u8),
    /// A channel event command missing from the channel event table.
    #[error("unknown channel event command {0:#x}")]
    UnknownChannelCommand(u8),
    /// A channel number at or above the 16 channel limit.
    #[error("channel {0} is above the limit of 16")]
    ChannelOutOfRange(u8),
    /// An End of Track event declaring a non-zero data length.
    #[error("end of track event has data length {0}, should be 0")]
    MalformedEndOfTrack(u8),
    /// A data byte arrived before any status byte.
    ///
    /// Only reachable in [`StatusRecovery::RunningStatus`](crate::file::StatusRecovery)
    /// mode.
    #[error("data byte {0:#04x} with no status byte to run from")]
    OrphanDataByte(u8),
}
