use clap::{Args, Parser, Subcommand};

use yomi_cli::commands::{convert_ops, run_ops};
use yomi_cli::setup::ConverterArgs;
use yomi_cli::trace_init::init_tracing;

#[derive(Parser)]
#[command(name = "yomi", about = "Kanji to hiragana transliteration")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct GlobalArgs {
    /// Settings TOML (see `dictool settings-export`)
    #[arg(long, global = true)]
    settings: Option<String>,
    /// Compiled dictionary file (default: embedded seed dictionary)
    #[arg(long, global = true)]
    dict: Option<String>,
    /// User dictionary in TSV form, layered over the main dictionary
    #[arg(long, global = true)]
    user_dict: Option<String>,
    /// Debug-level logging
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Log as JSON lines
    #[arg(long, global = true)]
    json_log: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Transliterate a file into hiragana, in place unless --output is given
    Run {
        /// Input file (UTF-8)
        #[arg(default_value = run_ops::DEFAULT_INOUT_PATH)]
        input: String,
        /// Output file (default: overwrite the input)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Convert text given on the command line and show its segments
    Convert {
        /// Text to convert
        text: String,
        /// Number of alternative readings
        #[arg(short, long, default_value = "1")]
        n: usize,
        /// Output as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose, cli.global.json_log);

    let args = ConverterArgs {
        settings: cli.global.settings,
        dict: cli.global.dict,
        user_dict: cli.global.user_dict,
    };

    match cli.command {
        Command::Run { input, output } => run_ops::run_cmd(&args, &input, output.as_deref()),
        Command::Convert { text, n, json } => convert_ops::convert_cmd(&args, &text, n, json),
    }
}
