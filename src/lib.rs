#![doc = r#"
# midigrid

Decodes a Standard MIDI File's binary event stream and re-projects its
channel note events onto a fixed-resolution 16-step grid, emitting a
structured JSON sequence description.

The crate is a single forward pass, read-only: no seeking, no editing, no
multi-pass track merging. Parse errors are values, not process exits, so
the core stays embeddable; the bundled `midigrid` binary is the terminal
driver that reports them.

## Example

```no_run
use midigrid::{DecodeOptions, StepSequence};

let bytes = std::fs::read("pattern.mid").unwrap();
let sequence = StepSequence::decode("pattern.mid", &bytes, DecodeOptions::default()).unwrap();
println!("{}", sequence.to_json().unwrap());
```
"#]
#![warn(missing_docs)]

mod error;
pub use error::*;

pub mod event;
pub mod file;
pub mod grid;
pub mod reader;

mod sequence;
pub use sequence::*;

pub use file::{DecodeOptions, StatusRecovery};

/// Common imports.
pub mod prelude {
    pub use crate::{
        error::*,
        event::*,
        file::*,
        grid::*,
        reader::{encode_vlq, ReadResult, Reader, ReaderError, ReaderErrorKind},
        sequence::*,
    };
}
