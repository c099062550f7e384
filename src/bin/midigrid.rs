//! Converts a Standard MIDI File into a 16-step grid JSON document.
//!
//! Usage: `midigrid <FILENAME_IN> <FILENAME_OUT>`

use color_eyre::eyre::{eyre, Context, Result};
use midigrid::{DecodeOptions, StepSequence};
use std::{env, fs, path::PathBuf};

fn main() -> Result<()> {
    color_eyre::install()?;

    let mut args = env::args_os().skip(1);
    let (input, output) = match (args.next(), args.next()) {
        (Some(input), Some(output)) => (PathBuf::from(input), PathBuf::from(output)),
        _ => return Err(eyre!("please provide [FILENAME_IN] and [FILENAME_OUT]")),
    };

    let bytes = fs::read(&input)
        .wrap_err_with(|| format!("could not open \"{}\" for reading", input.display()))?;
    println!("File \"{}\" open for reading.", input.display());

    let name = input.to_string_lossy().into_owned();
    let sequence = StepSequence::decode(name, &bytes, DecodeOptions::default())?;

    fs::write(&output, sequence.to_json()?)
        .wrap_err_with(|| format!("failed to create \"{}\"", output.display()))?;
    println!(
        "Wrote {} patterns to \"{}\".",
        sequence.patterns().len(),
        output.display()
    );

    Ok(())
}
