use clap::{Parser, Subcommand};
use coursegen::config::{self, BuildConfig};
use coursegen::{document, output, scan, write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;

#[derive(Parser)]
#[command(name = "coursegen")]
#[command(version)]
#[command(about = "Build the course manifest and master document from a content tree")]
#[command(long_about = "\
Build the course manifest and master document from a content tree

The content directory is the data source. Four levels of directories make up
the course: units, lessons, tabs and cards. Numeric prefixes set the order and
are dropped from titles.

Content structure:

  usii/
  ├── manifest.json                 # Generated (rewritten only on change)
  └── 01_colonial_america/          # Unit → \"Colonial America\"
      ├── icon.png                  # Icon (icon.* preferred, bgimage.* fallback)
      └── 01_jamestown/             # Lesson
          └── overview/             # Tab
              └── 01_the_fort/      # Card
                  ├── writing       # Card text
                  ├── bgimage.jpg   # Card background (png/jpg/jpeg)
                  ├── fort.jpg      # Media (png, jpg, jpeg, svg, mp4)
                  └── fort.caption  # Caption for fort.jpg

Run 'coursegen gen-config' to generate a documented coursegen.toml.")]
struct Cli {
    /// Config file
    #[arg(long, default_value = config::CONFIG_FILENAME, global = true)]
    config: PathBuf,

    /// Content directory (overrides `content_root`)
    #[arg(long, global = true)]
    source: Option<PathBuf>,

    /// Log format: text (default) or json
    #[arg(long, default_value = "text", global = true)]
    log_format: LogFormat,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Write manifest.json if the content tree changed
    Manifest {
        /// Manifest path (overrides `manifest.output`)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Write the master HTML document
    Document {
        /// Document path (overrides `document.output`)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Run both: manifest → document
    Build,
    /// Scan the content tree and print it without writing anything
    Check,
    /// Print a stock coursegen.toml with all options documented
    GenConfig,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match &cli.command {
        Command::Manifest { output } => {
            let project = Project::load(&cli)?;
            let path = project.output_path(output.as_deref(), &project.config.manifest.output);
            run_manifest(&project, &path)?;
        }
        Command::Document { output } => {
            let project = Project::load(&cli)?;
            let path = project.output_path(output.as_deref(), &project.config.document.output);
            run_document(&project, &path)?;
        }
        Command::Build => {
            let project = Project::load(&cli)?;
            println!("==> Stage 1: Manifest from {}", project.root.display());
            run_manifest(&project, &project.dir.join(&project.config.manifest.output))?;
            println!("==> Stage 2: Master document");
            run_document(&project, &project.dir.join(&project.config.document.output))?;
            println!("==> Build complete");
        }
        Command::Check => {
            let project = Project::load(&cli)?;
            println!("==> Checking {}", project.root.display());
            let manifest = scan::scan(&project.root, &project.path_prefix())?;
            output::print_scan_output(&manifest);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Resolved config plus the paths it points at.
///
/// Paths in the config file are relative to the directory holding it; paths
/// given on the command line are taken as-is.
struct Project {
    config: BuildConfig,
    dir: PathBuf,
    root: PathBuf,
}

impl Project {
    fn load(cli: &Cli) -> Result<Self, config::ConfigError> {
        let config = config::load_config(&cli.config)?;
        let dir = cli.config.parent().unwrap_or(Path::new("")).to_path_buf();
        let root = cli
            .source
            .clone()
            .unwrap_or_else(|| dir.join(&config.content_root));
        Ok(Self { config, dir, root })
    }

    fn output_path(&self, flag: Option<&Path>, configured: &Path) -> PathBuf {
        flag.map(Path::to_path_buf)
            .unwrap_or_else(|| self.dir.join(configured))
    }

    /// Configured path prefix, or the content directory's own name.
    fn path_prefix(&self) -> String {
        self.config
            .manifest
            .path_prefix
            .clone()
            .unwrap_or_else(|| scan::default_path_prefix(&self.root))
    }
}

fn run_manifest(project: &Project, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let prefix = project.path_prefix();
    info!(root = %project.root.display(), prefix = %prefix, "scanning content tree");
    let manifest = scan::scan(&project.root, &prefix)?;
    info!(units = manifest.units.len(), cards = manifest.card_count(), "scan complete");

    let outcome = write::write_manifest(path, manifest)?;
    output::print_manifest_output(path, outcome);
    Ok(())
}

fn run_document(project: &Project, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    info!(root = %project.root.display(), "building master document");
    let doc = document::build_document(&project.root, &project.config.document)?;
    document::write_document(path, &doc.html)?;
    output::print_document_output(path, &doc);
    Ok(())
}

/// Initialize tracing based on CLI flags. Logs go to stderr so stdout
/// carries only the status lines.
fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "coursegen=info",
        1 => "coursegen=debug",
        _ => "coursegen=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
