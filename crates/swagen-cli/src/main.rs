use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use swagen_core::config::{self, GeneratorConfig, Language};
use swagen_core::spec::{self, Document};
use swagen_core::verify::{self, Diagnostic};
use swagen_core::{template_data, transform};

const CONFIG_FILE_NAME: &str = "swagen.json";

#[derive(Parser)]
#[command(name = "swagen", about = "Swagger 2.x template-data generator", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate template data for every API in the config
    Generate {
        /// Path to the config file
        #[arg(short, long, default_value = CONFIG_FILE_NAME)]
        config: PathBuf,
    },

    /// Check every configured spec and report problems without writing output
    Validate {
        /// Path to the config file
        #[arg(short, long, default_value = CONFIG_FILE_NAME)]
        config: PathBuf,
    },

    /// Inspect the template data built from one spec file
    Inspect {
        /// Path to the Swagger spec file (YAML or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Target language whose type map to use (swift, kotlin, or js)
        #[arg(long, default_value = "swift", value_parser = parse_language)]
        language: Language,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,
    },

    /// Initialize a new swagen configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

fn parse_language(s: &str) -> Result<Language, String> {
    s.parse()
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { config } => cmd_generate(config),

        Commands::Validate { config } => cmd_validate(config),

        Commands::Inspect {
            input,
            language,
            format,
        } => cmd_inspect(input, language, format),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "swagen", &mut std::io::stdout());
            Ok(())
        }
    }
}

fn load_document(path: &Path) -> Result<Document> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("yaml");

    let doc = match ext {
        "json" => spec::from_json(&content)?,
        _ => spec::from_yaml(&content)?,
    };
    Ok(doc)
}

/// Print one API's diagnostics grouped by kind.
fn report_problems(api_name: &str, problems: &[Diagnostic]) {
    eprintln!("Problems in {api_name}:");
    let mut last_heading = "";
    for problem in problems {
        let heading = problem.kind.heading();
        if heading != last_heading {
            eprintln!("  {heading}:");
            last_heading = heading;
        }
        eprintln!("    {}", problem.message);
    }
}

/// Build and verify every API in the config, returning the total problem
/// count. `emit` receives each clean or dirty API's template data.
fn process_apis(
    cfg: &GeneratorConfig,
    mut emit: impl FnMut(&str, &swagen_core::ir::TemplateData) -> Result<()>,
) -> Result<usize> {
    let type_map = cfg.language.type_map();
    let mut problem_count = 0;

    for (api_name, api) in &cfg.specs {
        let doc = load_document(&api.spec)?;
        let data = template_data(
            &doc,
            api.class_name.as_deref().unwrap_or(api_name),
            api.base_path.as_deref().unwrap_or(""),
            &type_map,
        )?;

        let problems = verify::verify(&data);
        if !problems.is_empty() {
            report_problems(api_name, &problems);
            problem_count += problems.len();
        }

        emit(api_name, &data)?;
    }

    Ok(problem_count)
}

fn cmd_generate(config_path: PathBuf) -> Result<()> {
    let cfg = config::load_config(&config_path)?;
    let output_dir = PathBuf::from(&cfg.output);
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("failed to create output directory {}", output_dir.display()))?;

    let problem_count = process_apis(&cfg, |api_name, data| {
        let path = output_dir.join(format!("{api_name}.json"));
        let json = serde_json::to_string_pretty(data)?;
        fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))?;
        eprintln!("  wrote {}", path.display());
        Ok(())
    })?;

    if problem_count > 0 {
        anyhow::bail!("found {problem_count} problems in the configured specs");
    }

    eprintln!(
        "Generated template data for {} APIs in {}",
        cfg.specs.len(),
        output_dir.display()
    );
    Ok(())
}

fn cmd_validate(config_path: PathBuf) -> Result<()> {
    let cfg = config::load_config(&config_path)?;
    let problem_count = process_apis(&cfg, |api_name, data| {
        eprintln!(
            "{api_name}: {} methods, {} object models, {} enum models",
            data.methods.len(),
            data.object_models.len(),
            data.enum_models.len()
        );
        Ok(())
    })?;

    if problem_count > 0 {
        anyhow::bail!("found {problem_count} problems in the configured specs");
    }

    eprintln!("Validation successful.");
    Ok(())
}

fn cmd_inspect(input: PathBuf, language: Language, format: InspectFormat) -> Result<()> {
    let doc = load_document(&input)?;
    let api_name = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("api")
        .to_string();
    let type_map = language.type_map();
    let data = transform::template_data(&doc, &api_name, "", &type_map)?;

    match format {
        InspectFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&data)?;
            print!("{yaml}");
        }
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(&data)?;
            println!("{json}");
        }
    }

    Ok(())
}

fn default_config_content() -> &'static str {
    r#"{
  "language": "swift",
  "output": "client",
  "specs": {
    "petstore": {
      "spec": "petstore.json",
      "className": "Petstore",
      "basePath": "/v1"
    }
  }
}
"#
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
