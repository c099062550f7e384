use crate::{
    event::{
        Channel, ChannelCommand, ChannelMessage, MetaKind, MetaMessage, PayloadPolicy,
        TrackEvent, TrackMessage,
    },
    reader::{ReadResult, Reader, ReaderError},
    EventError,
};

/// Terminator byte of a system exclusive message.
const SYSEX_END: u8 = 0xF7;

/// How to treat a sub-`0x80` byte where a status byte was expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusRecovery {
    /// Scan forward, discarding bytes until one with the high bit set is
    /// found. A recovery for mis-encoded streams, not standard MIDI
    /// running status; each scan is logged.
    #[default]
    FastForward,
    /// Standard-compliant running status: reuse the previous channel
    /// status byte and treat the low byte as the first data byte.
    RunningStatus,
}

/// Options for the track event parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodeOptions {
    /// Selected sub-`0x80` status byte handling.
    pub status_recovery: StatusRecovery,
}

#[doc = r#"
A pull-parser over one track's event region.

Repeatedly yields (delta-time, message) pairs from the underlying
[`Reader`]: the caller pulls events until one satisfies
[`TrackMessage::is_end_of_track`], at which point the cursor rests on the
first byte after this track (the next track's header, or the end of the
meaningful stream).
"#]
pub struct TrackEvents<'a, 'r> {
    reader: &'r mut Reader<'a>,
    recovery: StatusRecovery,
    running_status: Option<u8>,
}

impl<'a, 'r> TrackEvents<'a, 'r> {
    /// Start parsing events at the reader's current position.
    pub fn new(reader: &'r mut Reader<'a>, options: DecodeOptions) -> Self {
        Self {
            reader,
            recovery: options.status_recovery,
            running_status: None,
        }
    }

    /// The underlying cursor position, for error reporting.
    pub fn buffer_position(&self) -> usize {
        self.reader.buffer_position()
    }

    /// Read the next (delta-time, message) pair.
    pub fn next_event(&mut self) -> ReadResult<TrackEvent> {
        let delta_time = self.reader.read_vlq()?;
        let (status, carried) = self.next_status()?;
        let message = match status {
            0xFF => TrackMessage::Meta(self.read_meta()?),
            0xF0 => {
                self.skip_sysex()?;
                TrackMessage::SystemExclusive
            }
            _ => TrackMessage::Channel(self.read_channel(status, carried)?),
        };
        Ok(TrackEvent {
            delta_time,
            message,
        })
    }

    /// Read the status byte of the next event.
    ///
    /// Returns the status and, in running-status mode, a data byte that was
    /// consumed while looking for it.
    fn next_status(&mut self) -> ReadResult<(u8, Option<u8>)> {
        let at = self.reader.buffer_position();
        let byte = self.reader.read_u8()?;
        if byte >= 0x80 {
            self.note_status(byte);
            return Ok((byte, None));
        }
        match self.recovery {
            StatusRecovery::FastForward => {
                let mut skipped: u32 = 1;
                loop {
                    let byte = self.reader.read_u8()?;
                    if byte >= 0x80 {
                        tracing::warn!(skipped, "fast-forward over non-status bytes");
                        self.note_status(byte);
                        return Ok((byte, None));
                    }
                    skipped += 1;
                }
            }
            StatusRecovery::RunningStatus => {
                let status = self
                    .running_status
                    .ok_or_else(|| ReaderError::parse_error(at, EventError::OrphanDataByte(byte)))?;
                Ok((status, Some(byte)))
            }
        }
    }

    /// Channel statuses arm running status; meta and sysex cancel it.
    fn note_status(&mut self, status: u8) {
        if status < 0xF0 {
            self.running_status = Some(status);
        } else {
            self.running_status = None;
        }
    }

    fn read_meta(&mut self) -> ReadResult<MetaMessage> {
        let at = self.reader.buffer_position();
        let tag = self.reader.read_u8()?;
        let kind = MetaKind::try_from(tag)
            .map_err(|_| ReaderError::parse_error(at, EventError::UnknownMetaEvent(tag)))?;
        tracing::debug!(name = kind.name(), "meta event");

        match kind.payload_policy() {
            PayloadPolicy::EndOfTrack => {
                let length = self.reader.read_u8()?;
                if length != 0 {
                    return Err(ReaderError::parse_error(
                        at,
                        EventError::MalformedEndOfTrack(length),
                    ));
                }
                Ok(MetaMessage::EndOfTrack)
            }
            PayloadPolicy::Text => {
                let length = self.reader.read_u8()?;
                let bytes = self.reader.read_exact(length as usize)?;
                Ok(MetaMessage::Text(
                    kind,
                    String::from_utf8_lossy(bytes).into_owned(),
                ))
            }
            PayloadPolicy::Variable => {
                let length = self.reader.read_u8()?;
                let bytes = self.reader.read_exact(length as usize)?;
                Ok(MetaMessage::Data(kind, bytes.to_vec()))
            }
            PayloadPolicy::Fixed(n) => {
                // the length byte is present but the table is authoritative
                let _declared = self.reader.read_u8()?;
                let bytes = self.reader.read_exact(n as usize)?;
                Ok(MetaMessage::Data(kind, bytes.to_vec()))
            }
        }
    }

    /// Consume a system exclusive message through its `0xF7` terminator.
    fn skip_sysex(&mut self) -> ReadResult<()> {
        while self.reader.read_u8()? != SYSEX_END {}
        Ok(())
    }

    fn read_channel(&mut self, status: u8, carried: Option<u8>) -> ReadResult<ChannelMessage> {
        let at = self.reader.buffer_position();
        let nibble = status >> 4;
        let command = ChannelCommand::try_from(nibble)
            .map_err(|_| ReaderError::parse_error(at, EventError::UnknownChannelCommand(nibble)))?;
        let channel = Channel::new(status & 0x0F)
            .map_err(|e| ReaderError::parse_error(at, e))?;
        let data1 = match carried {
            Some(byte) => byte,
            None => self.reader.read_u8()?,
        };
        let data2 = if command.data_len() == 2 {
            Some(self.reader.read_u8()?)
        } else {
            None
        };
        Ok(ChannelMessage {
            command,
            channel,
            data1,
            data2,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{reader::ReaderErrorKind, ParseError};

    fn events_of(bytes: &[u8], options: DecodeOptions) -> Vec<TrackEvent> {
        let mut reader = Reader::from_byte_slice(bytes);
        let mut events = TrackEvents::new(&mut reader, options);
        let mut out = Vec::new();
        loop {
            let event = events.next_event().unwrap();
            let done = event.message.is_end_of_track();
            out.push(event);
            if done {
                return out;
            }
        }
    }

    fn end_of_track() -> [u8; 4] {
        [0x00, 0xFF, 0x2F, 0x00]
    }

    #[test]
    fn note_on_then_end_of_track() {
        let mut bytes = vec![0x00, 0x90, 60, 100];
        bytes.extend_from_slice(&end_of_track());
        let events = events_of(&bytes, DecodeOptions::default());
        assert_eq!(events.len(), 2);
        let TrackMessage::Channel(message) = &events[0].message else {
            panic!("expected a channel event");
        };
        assert_eq!(message.command, ChannelCommand::NoteOn);
        assert_eq!(message.channel.number(), 0);
        assert_eq!(message.key(), 60);
        assert_eq!(message.velocity(), Some(100));
        assert!(events[1].message.is_end_of_track());
    }

    #[test]
    fn delta_times_decode() {
        let mut bytes = vec![0x81, 0x70, 0xC5, 0x07]; // delta 240, program change ch 5
        bytes.extend_from_slice(&end_of_track());
        let events = events_of(&bytes, DecodeOptions::default());
        assert_eq!(events[0].delta_time, 240);
        let TrackMessage::Channel(message) = &events[0].message else {
            panic!("expected a channel event");
        };
        assert_eq!(message.command, ChannelCommand::ProgramChange);
        assert_eq!(message.channel.number(), 5);
        assert_eq!(message.data2, None);
    }

    #[test]
    fn text_meta_decodes() {
        let mut bytes = vec![0x00, 0xFF, 0x03, 0x04];
        bytes.extend_from_slice(b"Lead");
        bytes.extend_from_slice(&end_of_track());
        let events = events_of(&bytes, DecodeOptions::default());
        assert_eq!(
            events[0].message,
            TrackMessage::Meta(MetaMessage::Text(MetaKind::TrackName, "Lead".into()))
        );
    }

    #[test]
    fn fixed_meta_payload_follows_the_table() {
        // tempo: length byte then 3 payload bytes
        let mut bytes = vec![0x00, 0xFF, 0x51, 0x03, 0x07, 0xA1, 0x20];
        bytes.extend_from_slice(&end_of_track());
        let events = events_of(&bytes, DecodeOptions::default());
        assert_eq!(
            events[0].message,
            TrackMessage::Meta(MetaMessage::Data(MetaKind::Tempo, vec![0x07, 0xA1, 0x20]))
        );
    }

    #[test]
    fn sysex_is_skipped_through_terminator() {
        let mut bytes = vec![0x00, 0xF0, 0x43, 0x12, 0x00, 0xF7];
        bytes.extend_from_slice(&end_of_track());
        let events = events_of(&bytes, DecodeOptions::default());
        assert_eq!(events[0].message, TrackMessage::SystemExclusive);
        assert!(events[1].message.is_end_of_track());
    }

    #[test]
    fn fast_forward_scans_to_next_status() {
        // two stray data bytes where a status byte belongs
        let mut bytes = vec![0x00, 0x15, 0x2A, 0x90, 62, 90];
        bytes.extend_from_slice(&end_of_track());
        let events = events_of(&bytes, DecodeOptions::default());
        let TrackMessage::Channel(message) = &events[0].message else {
            panic!("expected a channel event");
        };
        assert_eq!(message.key(), 62);
    }

    #[test]
    fn running_status_reuses_previous_status() {
        let options = DecodeOptions {
            status_recovery: StatusRecovery::RunningStatus,
        };
        let mut bytes = vec![0x00, 0x90, 60, 100, 0x00, 64, 110];
        bytes.extend_from_slice(&end_of_track());
        let events = events_of(&bytes, options);
        let TrackMessage::Channel(second) = &events[1].message else {
            panic!("expected a channel event");
        };
        assert_eq!(second.command, ChannelCommand::NoteOn);
        assert_eq!(second.key(), 64);
        assert_eq!(second.velocity(), Some(110));
    }

    #[test]
    fn orphan_data_byte_is_fatal_in_running_status_mode() {
        let options = DecodeOptions {
            status_recovery: StatusRecovery::RunningStatus,
        };
        let bytes = [0x00, 0x42, 60, 100];
        let mut reader = Reader::from_byte_slice(&bytes);
        let mut events = TrackEvents::new(&mut reader, options);
        let err = events.next_event().unwrap_err();
        assert!(matches!(
            err.error_kind(),
            ReaderErrorKind::ParseError(ParseError::Event(EventError::OrphanDataByte(0x42)))
        ));
    }

    #[test]
    fn meta_cancels_running_status() {
        let options = DecodeOptions {
            status_recovery: StatusRecovery::RunningStatus,
        };
        let bytes = [
            0x00, 0x90, 60, 100, // arm running status
            0x00, 0xFF, 0x06, 0x02, b'h', b'i', // marker cancels it
            0x00, 64, 90, // now orphaned
        ];
        let mut reader = Reader::from_byte_slice(&bytes);
        let mut events = TrackEvents::new(&mut reader, options);
        events.next_event().unwrap();
        events.next_event().unwrap();
        let err = events.next_event().unwrap_err();
        assert!(matches!(
            err.error_kind(),
            ReaderErrorKind::ParseError(ParseError::Event(EventError::OrphanDataByte(64)))
        ));
    }

    #[test]
    fn unknown_meta_tag_is_fatal() {
        let bytes = [0x00, 0xFF, 0x60, 0x00];
        let mut reader = Reader::from_byte_slice(&bytes);
        let mut events = TrackEvents::new(&mut reader, DecodeOptions::default());
        let err = events.next_event().unwrap_err();
        assert!(matches!(
            err.error_kind(),
            ReaderErrorKind::ParseError(ParseError::Event(EventError::UnknownMetaEvent(0x60)))
        ));
    }

    #[test]
    fn unknown_system_status_is_fatal() {
        // 0xF8 is neither sysex start nor meta, and 0xF is not in the table
        let bytes = [0x00, 0xF8];
        let mut reader = Reader::from_byte_slice(&bytes);
        let mut events = TrackEvents::new(&mut reader, DecodeOptions::default());
        let err = events.next_event().unwrap_err();
        assert!(matches!(
            err.error_kind(),
            ReaderErrorKind::ParseError(ParseError::Event(EventError::UnknownChannelCommand(0xF)))
        ));
    }

    #[test]
    fn malformed_end_of_track_is_fatal() {
        let bytes = [0x00, 0xFF, 0x2F, 0x01, 0x00];
        let mut reader = Reader::from_byte_slice(&bytes);
        let mut events = TrackEvents::new(&mut reader, DecodeOptions::default());
        let err = events.next_event().unwrap_err();
        assert!(matches!(
            err.error_kind(),
            ReaderErrorKind::ParseError(ParseError::Event(EventError::MalformedEndOfTrack(1)))
        ));
    }

    #[test]
    fn unterminated_sysex_runs_out_of_bounds() {
        let bytes = [0x00, 0xF0, 0x43, 0x12];
        let mut reader = Reader::from_byte_slice(&bytes);
        let mut events = TrackEvents::new(&mut reader, DecodeOptions::default());
        assert!(events.next_event().unwrap_err().is_out_of_bounds());
    }
}
