//! Unit and encoding conversion commands.
//!
//! These never touch the node or the file system.

use adakit_types::codec;
use adakit_types::units::{to_display_unit, to_smallest_unit};
use adakit_types::Lovelace;

use crate::error::CliResult;
use crate::output::{ConversionOutput, OutputFormat, Render};

fn render(input: &str, output: String, format: OutputFormat) -> String {
    ConversionOutput {
        input: input.to_string(),
        output,
    }
    .render(format)
}

/// Execute the lovelace-to-ada command.
pub fn lovelace_to_ada(format: OutputFormat, amount: &str) -> CliResult<String> {
    let lovelace: Lovelace = amount.parse()?;
    Ok(render(amount, to_display_unit(lovelace), format))
}

/// Execute the ada-to-lovelace command.
pub fn ada_to_lovelace(format: OutputFormat, amount: &str) -> CliResult<String> {
    let lovelace = to_smallest_unit(amount)?;
    Ok(render(amount, lovelace.to_string(), format))
}

/// Execute the text-to-hex command.
pub fn text_to_hex(format: OutputFormat, text: &str) -> CliResult<String> {
    Ok(render(text, codec::text_to_hex(text), format))
}

/// Execute the hex-to-text command.
pub fn hex_to_text(format: OutputFormat, hex: &str) -> CliResult<String> {
    let text = codec::hex_to_text(hex)?;
    Ok(render(hex, text, format))
}
