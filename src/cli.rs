use ddsref::IdentifierKind;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "ddsref", version, about = "MSDDS COM identifier and registry reference")]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        help = "Markdown resource to load instead of the bundled MSDDS table"
    )]
    pub source: Option<String>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Lookup {
        #[arg(help = "GUID, braces optional, any hex case")]
        guid: String,
        #[arg(long, value_enum)]
        kind: Option<IdentifierKind>,
    },
    Find {
        #[arg(help = "Case-insensitive label substring")]
        substring: String,
        #[arg(long, value_enum)]
        kind: Option<IdentifierKind>,
    },
    Validate {
        progid: String,
    },
    List {
        #[arg(long, value_enum)]
        kind: Option<IdentifierKind>,
    },
    Check,
    Dump,
}
