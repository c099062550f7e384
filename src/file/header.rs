use crate::{
    file::Format,
    reader::{ReadResult, Reader, ReaderError},
    ChunkError,
};

/// The 4-byte tag opening the header chunk.
pub const FILE_TAG: &[u8; 4] = b"MThd";
/// The 4-byte tag opening every track chunk.
pub const TRACK_TAG: &[u8; 4] = b"MTrk";

#[doc = r#"
The file header chunk ("MThd"), read once at the start of the stream.

Carries the declared [`Format`], the number of track chunks to expect, and
the tick resolution of every delta-time in the file. Immutable once read.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
    format: Format,
    track_count: u16,
    ticks_per_quarter_note: u16,
}

impl FileHeader {
    /// Read and validate the header chunk.
    ///
    /// The declared chunk length is parsed but not validated against the
    /// fields that follow, matching what the rest of the decoder relies on.
    pub fn read(reader: &mut Reader<'_>) -> ReadResult<Self> {
        let at = reader.buffer_position();
        let tag = reader.read_exact(4)?;
        if tag != FILE_TAG {
            return Err(ReaderError::parse_error(at, ChunkError::NotAMidiFile));
        }
        let _declared_length = reader.read_u32()?;

        let at = reader.buffer_position();
        let raw_format = reader.read_u16()?;
        let format = Format::try_from(raw_format)
            .map_err(|_| ReaderError::parse_error(at, ChunkError::UnknownFormat(raw_format)))?;

        let track_count = reader.read_u16()?;
        let ticks_per_quarter_note = reader.read_u16()?;

        tracing::debug!(
            ?format,
            track_count,
            ticks_per_quarter_note,
            "read file header"
        );

        Ok(Self {
            format,
            track_count,
            ticks_per_quarter_note,
        })
    }

    /// Returns the declared file format.
    pub const fn format(&self) -> Format {
        self.format
    }

    /// Returns the number of track chunks the header declares.
    pub const fn track_count(&self) -> u16 {
        self.track_count
    }

    /// Returns the tick resolution of one quarter note.
    pub const fn ticks_per_quarter_note(&self) -> u16 {
        self.ticks_per_quarter_note
    }
}

/// A track chunk header ("MTrk").
///
/// The declared byte length is informational; the decoder terminates each
/// track on its End of Track event rather than on this count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackHeader {
    length: u32,
}

impl TrackHeader {
    /// Read and validate a track chunk header.
    pub fn read(reader: &mut Reader<'_>) -> ReadResult<Self> {
        let at = reader.buffer_position();
        let tag = reader.read_exact(4)?;
        if tag != TRACK_TAG {
            return Err(ReaderError::parse_error(at, ChunkError::MissingTrackHeader));
        }
        let length = reader.read_u32()?;
        Ok(Self { length })
    }

    /// Returns the declared length of the event region in bytes.
    pub const fn length(&self) -> u32 {
        self.length
    }
}
