use num_enum::TryFromPrimitive;

#[doc = r#"
The meta event table: every meta tag the decoder understands, keyed by the
type byte that follows a `0xFF` status.

A tag outside this table is fatal
([`EventError::UnknownMetaEvent`](crate::EventError::UnknownMetaEvent)).
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive)]
#[repr(u8)]
pub enum MetaKind {
    /// 0x00, fixed 2 bytes
    SequenceNumber = 0x00,
    /// 0x01, length-prefixed text
    Text = 0x01,
    /// 0x02, length-prefixed text
    Copyright = 0x02,
    /// 0x03, length-prefixed text. Binds the emitted pattern's class name.
    TrackName = 0x03,
    /// 0x04, length-prefixed text
    InstrumentName = 0x04,
    /// 0x05, length-prefixed text
    Lyrics = 0x05,
    /// 0x06, length-prefixed text
    Marker = 0x06,
    /// 0x07, length-prefixed text
    CuePoint = 0x07,
    /// 0x20, fixed 1 byte
    ChannelPrefix = 0x20,
    /// 0x2F, zero length. Terminates the track.
    EndOfTrack = 0x2F,
    /// 0x51, fixed 3 bytes
    Tempo = 0x51,
    /// 0x54, fixed 5 bytes
    SmpteOffset = 0x54,
    /// 0x58, fixed 4 bytes
    TimeSignature = 0x58,
    /// 0x59, fixed 2 bytes
    KeySignature = 0x59,
    /// 0x7F, variable length
    SequencerSpecific = 0x7F,
}

/// How a meta event's payload bytes are laid out after the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadPolicy {
    /// One length byte (trusted to match) followed by exactly `n` bytes.
    Fixed(u8),
    /// One length byte followed by that many text bytes.
    Text,
    /// One length byte followed by that many opaque bytes.
    Variable,
    /// One length byte that must be zero.
    EndOfTrack,
}

impl MetaKind {
    /// The payload layout for this tag.
    pub const fn payload_policy(self) -> PayloadPolicy {
        use MetaKind::*;
        match self {
            SequenceNumber => PayloadPolicy::Fixed(2),
            Text | Copyright | TrackName | InstrumentName | Lyrics | Marker | CuePoint => {
                PayloadPolicy::Text
            }
            ChannelPrefix => PayloadPolicy::Fixed(1),
            EndOfTrack => PayloadPolicy::EndOfTrack,
            Tempo => PayloadPolicy::Fixed(3),
            SmpteOffset => PayloadPolicy::Fixed(5),
            TimeSignature => PayloadPolicy::Fixed(4),
            KeySignature => PayloadPolicy::Fixed(2),
            SequencerSpecific => PayloadPolicy::Variable,
        }
    }

    /// Display name, as used in trace output.
    pub const fn name(self) -> &'static str {
        use MetaKind::*;
        match self {
            SequenceNumber => "Sequence Number",
            Text => "Text Event",
            Copyright => "Copyright Notice",
            TrackName => "Sequence/Track Name",
            InstrumentName => "Instrument Name",
            Lyrics => "Lyrics",
            Marker => "Marker",
            CuePoint => "Cue Point",
            ChannelPrefix => "Midi Channel Prefix",
            EndOfTrack => "End of Track",
            Tempo => "Set Tempo",
            SmpteOffset => "SMPTE Offset",
            TimeSignature => "Time Signature",
            KeySignature => "Key Signature",
            SequencerSpecific => "Sequencer Specific",
        }
    }
}
