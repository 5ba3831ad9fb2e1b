use std::path::PathBuf;

use clap::{Parser, Subcommand};
use twbridge_cli::{
    ExportOptions, GenerateOptions, logging::init_logging, run_export_command,
    run_generate_command,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Bindings between printf-style sources and translatewiki", long_about = None)]
struct Args {
    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Export translation strings from a library.
    Export {
        /// The library the strings were extracted from
        library: PathBuf,

        /// Name for the project being exported
        #[arg(long = "as", value_name = "NAME")]
        name: String,

        /// Extractor output to read instead of <LIBRARY>/.cache/i18n_strings.json
        #[arg(long, value_name = "FILE")]
        strings: Option<PathBuf>,

        /// Base URI for browsing files in the project being exported
        #[arg(long, value_name = "URI")]
        browse_uri: Option<String>,

        /// Directory holding exported projects
        #[arg(long, default_value = "projects")]
        projects_root: PathBuf,
    },

    /// Generate a translation class from translated strings.
    Generate {
        /// JSON source file containing translation strings
        #[arg(long, value_name = "FILE")]
        source: PathBuf,

        /// Class name to generate
        #[arg(long, value_name = "CLASSNAME")]
        class: String,

        /// Locale code for the generated source
        #[arg(long, value_name = "CODE")]
        locale: String,

        /// Name of the project the translations were exported under
        #[arg(long, value_name = "NAME")]
        project: String,

        /// Location to write the generated translation file
        #[arg(long, value_name = "FILE")]
        out: PathBuf,

        /// Directory holding exported projects
        #[arg(long, default_value = "projects")]
        projects_root: PathBuf,
    },
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let result = match args.commands {
        Commands::Export {
            library,
            name,
            strings,
            browse_uri,
            projects_root,
        } => run_export_command(&ExportOptions {
            library,
            name,
            strings,
            browse_uri,
            projects_root,
        })
        .map(|_| ()),
        Commands::Generate {
            source,
            class,
            locale,
            project,
            out,
            projects_root,
        } => run_generate_command(&GenerateOptions {
            source,
            class,
            locale,
            project,
            out,
            projects_root,
        })
        .map(|_| ()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
