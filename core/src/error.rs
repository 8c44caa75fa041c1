use crate::{host::SurfaceId, notation::ParseError};
use snafu::Snafu;
use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Unknown command: {command}"))]
    UnknownCommand { command: String },

    #[snafu(display("Command {command} requires a {{ \"text\": .. }} argument"))]
    MissingArgs { command: String },

    #[snafu(display("Invalid arguments for {command}: {source}"))]
    InvalidArgs {
        command: String,
        source: serde_json::Error,
    },

    #[snafu(display("Failed to read config {}: {source}", path.display()))]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("Config error: {source}"))]
    ConfigParse { source: ron::error::SpannedError },

    #[snafu(display("Surface {surface} is not open"))]
    UnknownSurface { surface: SurfaceId },

    #[snafu(display("Malformed marked text: {source}"))]
    Notation { source: ParseError },
}
