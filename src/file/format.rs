use num_enum::TryFromPrimitive;

#[doc = r#"
The declared format of a MIDI file, from the header chunk.

- Format 0 stores one multi-channel track.
- Format 1 stores one or more simultaneous tracks of a single song.
- Format 2 stores sequentially independent single-track patterns.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
#[repr(u16)]
pub enum Format {
    /// Format 0
    SingleMultiChannel = 0,
    /// Format 1
    Simultaneous = 1,
    /// Format 2
    SequentiallyIndependent = 2,
}

impl Format {
    /// The raw format code as written in the file header.
    pub const fn code(self) -> u16 {
        self as u16
    }
}
