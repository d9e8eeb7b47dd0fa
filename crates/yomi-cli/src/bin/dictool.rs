use clap::{Parser, Subcommand};

use yomi_cli::commands::{config_ops, dict_ops};
use yomi_cli::trace_init::init_tracing;

#[derive(Parser)]
#[command(name = "dictool", about = "yomi dictionary build tool")]
struct Cli {
    /// Debug-level logging
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Download raw dictionary files
    Fetch {
        /// Dictionary source (mozc)
        #[arg(long, default_value = "mozc")]
        source: String,
        /// Output directory
        output_dir: String,
    },
    /// Compile raw dictionary files into a binary dictionary
    Compile {
        /// Dictionary source (tsv: surface, reading, cost; mozc: Mozc OSS dictionary)
        #[arg(long, default_value = "tsv")]
        source: String,
        /// Input file or directory
        input: String,
        /// Output file
        output_file: String,
    },
    /// Show dictionary statistics and sample lookups
    Info {
        /// Dictionary file
        dict_file: String,
    },
    /// Look up the readings of a surface (exact match)
    Lookup {
        /// Dictionary file
        dict_file: String,
        /// Surface form (kanji/kana)
        surface: String,
    },
    /// Common-prefix search (all surfaces that are prefixes of the query)
    Prefix {
        /// Dictionary file
        dict_file: String,
        /// Query text
        query: String,
    },
    /// Print a compiled dictionary as TSV
    Dump {
        /// Dictionary file
        dict_file: String,
    },
    /// Print the embedded seed dictionary as TSV
    DictExport,
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
    init_tracing(cli.verbose, false);

    match cli.command {
        Command::Fetch { source, output_dir } => dict_ops::fetch(&source, &output_dir),
        Command::Compile {
            source,
            input,
            output_file,
        } => dict_ops::compile(&source, &input, &output_file),
        Command::Info { dict_file } => dict_ops::info(&dict_file),
        Command::Lookup { dict_file, surface } => dict_ops::lookup(&dict_file, &surface),
        Command::Prefix { dict_file, query } => dict_ops::prefix(&dict_file, &query),
        Command::Dump { dict_file } => dict_ops::dump(&dict_file),
        Command::DictExport => config_ops::dict_export(),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
