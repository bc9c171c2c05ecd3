use clap::{Parser, Subcommand};

use tecla_cli::commands::{config_ops, fetch_ops, layout_ops};

#[derive(Parser)]
#[command(name = "teclatool", about = "Tecla keyboard layout diagnostics")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the key grid with resolved labels
    Render {
        /// Layout document (JSON)
        file: String,
        /// Design index (default: settings layout.design)
        #[arg(long)]
        design: Option<usize>,
        /// Mode to render in
        #[arg(long)]
        mode: Option<i64>,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List the switchable modes of a design
    Modes {
        /// Layout document (JSON)
        file: String,
        /// Design index
        #[arg(long)]
        design: Option<usize>,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List the designs bundled in a document
    Designs {
        /// Layout document (JSON)
        file: String,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Show the long-press variants of one key
    Variants {
        /// Layout document (JSON)
        file: String,
        /// Grid row
        row: usize,
        /// Position within the row
        slot: usize,
        /// Design index
        #[arg(long)]
        design: Option<usize>,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Simulate typing: steps are R:S (tap), R:S@N (pick variant N), mode=M
    Type {
        /// Layout document (JSON)
        file: String,
        /// Typing script
        script: String,
        /// Design index
        #[arg(long)]
        design: Option<usize>,
    },
    /// Decode encoded payloads
    Decode {
        /// Payloads (hex code points or literal text)
        #[arg(required = true)]
        payloads: Vec<String>,
        /// Also list the decoded code points
        #[arg(long)]
        codepoints: bool,
    },
    /// Download a layout document and check that it loads
    Fetch {
        /// Document URL
        url: String,
        /// Save the document here
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a custom settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Render {
            file,
            design,
            mode,
            json,
        } => layout_ops::render(&file, design, mode, json),
        Command::Modes { file, design, json } => layout_ops::modes(&file, design, json),
        Command::Designs { file, json } => layout_ops::designs(&file, json),
        Command::Variants {
            file,
            row,
            slot,
            design,
            json,
        } => layout_ops::variants(&file, design, row, slot, json),
        Command::Type {
            file,
            script,
            design,
        } => layout_ops::type_script(&file, design, &script),
        Command::Decode {
            payloads,
            codepoints,
        } => layout_ops::decode(&payloads, codepoints),
        Command::Fetch { url, output } => fetch_ops::fetch(&url, output.as_deref()),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
