#![doc = r#"
The decoded track event model.

Every event in a track chunk is a (delta-time, message) pair. Messages are
one of three shapes: a meta event (`0xFF` status), a system exclusive event
(`0xF0`, contents discarded), or a channel voice event addressed to one of
the 16 channels.
"#]

mod meta;
pub use meta::*;

mod channel;
pub use channel::*;

/// A single decoded track event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackEvent {
    /// Ticks elapsed since the previous event in the same track.
    pub delta_time: u32,
    /// The decoded message.
    pub message: TrackMessage,
}

/// The set of possible track messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackMessage {
    /// A non-sounding track annotation.
    Meta(MetaMessage),
    /// A channel voice message.
    Channel(ChannelMessage),
    /// A system exclusive message; contents are consumed and discarded.
    SystemExclusive,
}

impl TrackMessage {
    /// True if this message terminates its track.
    pub const fn is_end_of_track(&self) -> bool {
        matches!(self, TrackMessage::Meta(MetaMessage::EndOfTrack))
    }
}

/// A decoded meta event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaMessage {
    /// The zero-length End of Track marker.
    EndOfTrack,
    /// A text-carrying meta event.
    Text(MetaKind, String),
    /// Any other meta event; payload kept as raw bytes.
    Data(MetaKind, Vec<u8>),
}

/// A decoded channel voice message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelMessage {
    /// The command from the status byte's high nibble.
    pub command: ChannelCommand,
    /// The channel from the status byte's low nibble.
    pub channel: Channel,
    /// First data byte. For note commands this is the key number.
    pub data1: u8,
    /// Second data byte, for two-byte commands.
    pub data2: Option<u8>,
}

impl ChannelMessage {
    /// The key number of a note command.
    pub const fn key(&self) -> u8 {
        self.data1
    }

    /// The velocity of a note command.
    pub const fn velocity(&self) -> Option<u8> {
        self.data2
    }
}
