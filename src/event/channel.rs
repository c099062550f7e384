use crate::EventError;
use num_enum::TryFromPrimitive;

#[doc = r#"
The channel event table: the seven channel voice commands, keyed by the high
nibble of the status byte.

A high nibble outside this table is fatal
([`EventError::UnknownChannelCommand`](crate::EventError::UnknownChannelCommand)).
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive)]
#[repr(u8)]
pub enum ChannelCommand {
    /// 0x8, 2 data bytes
    NoteOff = 0x8,
    /// 0x9, 2 data bytes
    NoteOn = 0x9,
    /// 0xA, 2 data bytes
    Aftertouch = 0xA,
    /// 0xB, 2 data bytes
    Controller = 0xB,
    /// 0xC, 1 data byte
    ProgramChange = 0xC,
    /// 0xD, 1 data byte
    ChannelAftertouch = 0xD,
    /// 0xE, 2 data bytes
    PitchBend = 0xE,
}

impl ChannelCommand {
    /// The fixed number of data bytes following the status byte.
    pub const fn data_len(self) -> usize {
        use ChannelCommand::*;
        match self {
            ProgramChange | ChannelAftertouch => 1,
            NoteOff | NoteOn | Aftertouch | Controller | PitchBend => 2,
        }
    }

    /// Display name, as used in trace output.
    pub const fn name(self) -> &'static str {
        use ChannelCommand::*;
        match self {
            NoteOff => "Note OFF",
            NoteOn => "Note ON",
            Aftertouch => "Note Aftertouch",
            Controller => "Controller",
            ProgramChange => "Program Change",
            ChannelAftertouch => "Channel Aftertouch",
            PitchBend => "Pitch Bend",
        }
    }
}

/// One of the 16 MIDI channels, validated on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Channel(u8);

impl Channel {
    /// Create a channel from its number, checking the 16 channel limit.
    pub const fn new(number: u8) -> Result<Self, EventError> {
        if number < 16 {
            Ok(Self(number))
        } else {
            Err(EventError::ChannelOutOfRange(number))
        }
    }

    /// The zero-based channel number (0-15).
    pub const fn number(self) -> u8 {
        self.0
    }
}
