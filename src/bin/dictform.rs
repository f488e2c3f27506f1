//! dictform CLI - render and manage data dictionaries from the command line
//!
//! Paths default to the values of `dictform.yaml` and the `DICTFORM_*`
//! environment variables.

use clap::{Parser, Subcommand};
use dictform::components::{GridView, LegendView};
use dictform::config::{Settings, DEFAULT_CONFIG_FILE};
use dictform::dictionary::{load_dictionaries, DictionaryStore, Element, FileDictionaryStore, Values};
use dictform::panel::DataPanel;
use dictform::records::{JsonRecordProvider, RecordProvider};
use dictform::service::{DatabaseType, ElementService};
use dictform::{Error, PageState, Result};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dictform")]
#[command(version, about = "Metadata-driven forms, grids and filters from data dictionaries", long_about = None)]
struct Cli {
    /// Settings file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Directory holding the dictionaries (overrides settings)
    #[arg(short, long, global = true)]
    dictionaries: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the panel (or the grid, for list state) of a dictionary
    Render {
        /// Dictionary name
        name: String,

        /// Page state (filter, insert, update, view, list)
        #[arg(short, long, default_value = "insert")]
        state: String,

        /// Write the HTML to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate every dictionary in the directory
    Validate,

    /// List stored dictionaries
    List,

    /// Create the dictionary of a table
    New {
        /// Table name, e.g. tb_customer
        table: String,

        /// YAML file with the table structure to import fields from
        #[arg(short, long)]
        structure: Option<PathBuf>,
    },

    /// Copy a dictionary under a new name
    Duplicate {
        origin: String,
        name: String,
    },

    /// Print a Rust struct for a dictionary
    Class {
        name: String,
    },

    /// Print the CREATE TABLE script of a dictionary
    Script {
        name: String,

        /// Database type (postgresql, mysql, mariadb); detected from DATABASE_URL when absent
        #[arg(long)]
        database: Option<String>,
    },

    /// Export dictionaries to a zip file
    Export {
        /// Dictionary names; all dictionaries when empty
        names: Vec<String>,

        #[arg(short, long, default_value = "dictionaries.zip")]
        output: PathBuf,
    },

    /// Import dictionaries from a .zip or .json file
    Import {
        file: PathBuf,
    },

    /// Print the icon legend of a dictionary
    Legend {
        name: String,
    },
}

fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = Settings::load(&cli.config).and_then(|mut settings| {
        if let Some(dir) = cli.dictionaries {
            settings.dictionaries_dir = dir;
        }
        settings.install_translator()?;
        run(cli.command, &settings)
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(command: Commands, settings: &Settings) -> Result<()> {
    match command {
        Commands::Render { name, state, output } => render(settings, &name, &state, output),
        Commands::Validate => validate(settings),
        Commands::List => list(settings),
        Commands::New { table, structure } => new_dictionary(settings, &table, structure),
        Commands::Duplicate { origin, name } => duplicate(settings, &origin, &name),
        Commands::Class { name } => {
            println!("{}", service(settings)?.class_source_code(&name)?);
            Ok(())
        }
        Commands::Script { name, database } => script(settings, &name, database),
        Commands::Export { names, output } => export(settings, names, output),
        Commands::Import { file } => import(settings, file),
        Commands::Legend { name } => {
            let dictionary = store(settings)?.get(&name)?;
            println!("{}", LegendView::new(&dictionary).html_element().render_indented(1));
            Ok(())
        }
    }
}

fn store(settings: &Settings) -> Result<FileDictionaryStore> {
    FileDictionaryStore::open(&settings.dictionaries_dir)
}

fn service(settings: &Settings) -> Result<ElementService<FileDictionaryStore>> {
    Ok(ElementService::new(store(settings)?))
}

/// Print collected service errors and fail
fn service_failure(service: &ElementService<FileDictionaryStore>) -> Error {
    for (key, message) in service.errors() {
        eprintln!("  ✗ {}: {}", key, message);
    }
    Error::Other("operation rejected".to_string())
}

fn render(settings: &Settings, name: &str, state: &str, output: Option<PathBuf>) -> Result<()> {
    let page_state = PageState::parse(state)
        .ok_or_else(|| Error::Other(format!("Unknown page state '{}'", state)))?;
    let dictionary = store(settings)?.get(name)?;

    let html = if page_state == PageState::List {
        let records = JsonRecordProvider::open(&settings.records_dir)?.find(&dictionary, &Values::new())?;
        let mut grid = GridView::new(&dictionary, records);
        grid.app_path = settings.app_path.clone();
        grid.html_element()?.render_indented(1)
    } else {
        let mut panel = DataPanel::new(&dictionary, page_state);
        panel.app_path = settings.app_path.clone();
        panel.values = panel.values_with_defaults()?;
        panel.html_element()?.render_indented(1)
    };

    match output {
        Some(path) => {
            std::fs::write(&path, html)?;
            println!("✓ Rendered {} ({}) to {}", name, page_state, path.display());
        }
        None => println!("{}", html),
    }
    Ok(())
}

fn validate(settings: &Settings) -> Result<()> {
    println!("🔍 Validating dictionaries in {}...", settings.dictionaries_dir.display());
    let dictionaries = load_dictionaries(&settings.dictionaries_dir)?;
    for dictionary in &dictionaries {
        println!("  ✓ {} ({} fields)", dictionary.name, dictionary.fields.len());
    }
    println!("✨ {} dictionaries are valid", dictionaries.len());
    Ok(())
}

fn list(settings: &Settings) -> Result<()> {
    for info in store(settings)?.list()? {
        println!(
            "{:<32} {:<32} {}",
            info.name,
            info.table_name,
            info.modified.format("%Y-%m-%d %H:%M:%S")
        );
    }
    Ok(())
}

fn new_dictionary(settings: &Settings, table: &str, structure: Option<PathBuf>) -> Result<()> {
    let structure = match structure {
        Some(path) => {
            let content = std::fs::read_to_string(&path)?;
            Some(serde_yaml::from_str::<Element>(&content)?)
        }
        None => None,
    };

    let mut service = service(settings)?;
    match service.create_entity(table, structure)? {
        Some(dictionary) => {
            println!("✓ Created dictionary {} for {}", dictionary.name, table);
            Ok(())
        }
        None => Err(service_failure(&service)),
    }
}

fn duplicate(settings: &Settings, origin: &str, name: &str) -> Result<()> {
    let mut service = service(settings)?;
    if service.duplicate_entity(origin, name)? {
        println!("✓ Copied {} to {}", origin, name);
        Ok(())
    } else {
        Err(service_failure(&service))
    }
}

fn script(settings: &Settings, name: &str, database: Option<String>) -> Result<()> {
    let db_type = match database {
        Some(db) => DatabaseType::parse(&db).ok_or_else(|| {
            Error::Other(format!(
                "Unsupported database type: '{}'. Supported types: postgresql, mysql, mariadb",
                db
            ))
        })?,
        None => settings.database_type(),
    };
    println!("{}", service(settings)?.scripts(name, db_type)?);
    Ok(())
}

fn export(settings: &Settings, names: Vec<String>, output: PathBuf) -> Result<()> {
    let service = service(settings)?;
    let names = if names.is_empty() {
        service.store().list()?.into_iter().map(|info| info.name).collect()
    } else {
        names
    };

    std::fs::write(&output, service.export(&names)?)?;
    println!("✓ Exported {} dictionaries to {}", names.len(), output.display());
    Ok(())
}

fn import(settings: &Settings, file: PathBuf) -> Result<()> {
    let mut service = service(settings)?;
    let is_zip = file
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("zip"));

    let imported = if is_zip {
        service.import_zip(&std::fs::read(&file)?)?
    } else {
        usize::from(service.import(&std::fs::read_to_string(&file)?)?)
    };

    if imported == 0 && !service.is_valid() {
        return Err(service_failure(&service));
    }
    if !service.is_valid() {
        for (key, message) in service.errors() {
            eprintln!("  ✗ {}: {}", key, message);
        }
    }
    println!("✓ Imported {} dictionaries from {}", imported, file.display());
    Ok(())
}
