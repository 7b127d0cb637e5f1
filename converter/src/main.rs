//! atelier-data CLI - convert sheet exports to site JSON
//!
//! ```bash
//! atelier-data products products-template.csv products.json   # product catalog
//! atelier-data pages                                           # pages-content-template.csv → pages-content.json
//! atelier-data validate pages-content.json --kind pages        # schema check + summary
//! atelier-data parse products-template.csv                     # dump raw rows as JSON
//! ```

use clap::{Parser, Subcommand};
use atelier_data::logs::{log_error, log_info, LOGGER};
use atelier_data::output::{render, write_atomic};
use atelier_data::pipeline::read_input;
use atelier_data::{
    convert_pages, convert_products, validate_file, CategoryTable,
    DocumentKind, EmptyListPolicy, OptionalFieldPolicy, PageOptions, PipelineError,
    ProductOptions, ValidationPolicy, DEFAULT_PAGES_INPUT, DEFAULT_PAGES_OUTPUT,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "atelier-data")]
#[command(about = "Convert product and page-content CSV exports to site JSON", long_about = None)]
struct Cli {
    /// Only print errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert the products CSV into the category catalog JSON
    Products {
        /// Input CSV file
        input: PathBuf,

        /// Output JSON file
        output: PathBuf,

        /// Abort on the first invalid row instead of skipping it
        #[arg(long)]
        strict: bool,

        /// Leave empty optional fields out instead of writing ""
        #[arg(long)]
        omit_empty: bool,

        /// Write [""] for an empty colors/sizes cell instead of []
        #[arg(long)]
        blank_list_element: bool,

        /// JSON file with category names and descriptions
        #[arg(long)]
        categories: Option<PathBuf>,
    },

    /// Convert the page-content CSV into the pages JSON, then validate it
    Pages {
        /// Input CSV file
        #[arg(short, long, default_value = DEFAULT_PAGES_INPUT)]
        input: PathBuf,

        /// Output JSON file
        #[arg(short, long, default_value = DEFAULT_PAGES_OUTPUT)]
        output: PathBuf,

        /// Abort on the first invalid row instead of skipping it
        #[arg(long)]
        strict: bool,

        /// Write "" for empty optional fields instead of leaving them out
        #[arg(long)]
        keep_empty: bool,
    },

    /// Validate a generated JSON document and print its summary
    Validate {
        /// JSON document
        input: PathBuf,

        /// Document kind
        #[arg(short, long, value_enum)]
        kind: DocumentKind,
    },

    /// Parse a CSV file and output its rows as JSON
    Parse {
        /// Input CSV file
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    LOGGER.set_quiet(cli.quiet);

    let result = match cli.command {
        Commands::Products {
            input,
            output,
            strict,
            omit_empty,
            blank_list_element,
            categories,
        } => cmd_products(
            &input,
            &output,
            strict,
            omit_empty,
            blank_list_element,
            categories.as_deref(),
        ),

        Commands::Pages {
            input,
            output,
            strict,
            keep_empty,
        } => cmd_pages(&input, &output, strict, keep_empty),

        Commands::Validate { input, kind } => validate_file(&input, kind).map(|_| ()),

        Commands::Parse { input, output } => cmd_parse(&input, output.as_deref()),
    };

    if let Err(e) = result {
        log_error(format!("Error: {}", e));
        std::process::exit(1);
    }
}

fn validation_policy(strict: bool) -> ValidationPolicy {
    if strict {
        ValidationPolicy::Strict
    } else {
        ValidationPolicy::Lenient
    }
}

fn cmd_products(
    input: &Path,
    output: &Path,
    strict: bool,
    omit_empty: bool,
    blank_list_element: bool,
    categories: Option<&Path>,
) -> Result<(), PipelineError> {
    let categories = match categories {
        Some(path) => {
            log_info(format!("📋 Category table: {}", path.display()));
            CategoryTable::from_file(path)?
        }
        None => CategoryTable::builtin(),
    };

    let options = ProductOptions {
        validation: validation_policy(strict),
        empty_fields: if omit_empty {
            OptionalFieldPolicy::Omit
        } else {
            OptionalFieldPolicy::Keep
        },
        empty_lists: if blank_list_element {
            EmptyListPolicy::SingleBlank
        } else {
            EmptyListPolicy::Empty
        },
        categories,
    };

    convert_products(input, output, &options)?;
    Ok(())
}

fn cmd_pages(input: &Path, output: &Path, strict: bool, keep_empty: bool) -> Result<(), PipelineError> {
    let options = PageOptions {
        validation: validation_policy(strict),
        empty_fields: if keep_empty {
            OptionalFieldPolicy::Keep
        } else {
            OptionalFieldPolicy::Omit
        },
    };

    log_info("🔄 Converting page content CSV to JSON...");
    convert_pages(input, output, &options)?;
    Ok(())
}

fn cmd_parse(input: &Path, output: Option<&Path>) -> Result<(), PipelineError> {
    let parsed = read_input(input)?;

    let json = render(&parsed.records)?;
    match output {
        Some(path) => {
            write_atomic(path, &json)?;
            log_info(format!("💾 Output written to: {}", path.display()));
        }
        None => print!("{}", json),
    }
    Ok(())
}
