#![doc = r#"
Chunk-level structure of a Standard MIDI File.

A file is a header chunk ("MThd") followed by one track chunk ("MTrk") per
declared track. The header carries the [`Format`] and tick resolution; each
track chunk is a stream of (delta-time, event) pairs terminated by an End
of Track meta event, pulled off by [`TrackEvents`].
"#]

mod format;
pub use format::*;

mod header;
pub use header::*;

mod track;
pub use track::*;
