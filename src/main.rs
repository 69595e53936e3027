use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use agora::{client::SimulationClient, form::SetupForm, payload, validate::validate};

#[derive(Debug, Parser)]
#[command(author, version, about = "AGORA configuration client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Write the default setup template to a form file
    Init {
        #[arg(long, default_value = "setup.yaml")]
        form: PathBuf,
    },
    /// Check a form file and report anything blocking submission
    Validate {
        #[arg(long, default_value = "setup.yaml")]
        form: PathBuf,
    },
    /// Build the wire config from a form file and print it as JSON
    Build {
        #[arg(long, default_value = "setup.yaml")]
        form: PathBuf,

        /// Write the JSON here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Download the service template into a form file
    Fetch {
        #[arg(long)]
        url: String,

        #[arg(long, default_value = "setup.yaml")]
        form: PathBuf,
    },
    /// Validate, build, and create a model on the service
    Submit {
        #[arg(long)]
        url: String,

        #[arg(long, default_value = "setup.yaml")]
        form: PathBuf,

        /// Start the run immediately after creating the model
        #[arg(long)]
        start: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Init { form } => {
            SetupForm::template().save_to_path(&form)?;
            println!("Wrote default setup template to {}", form.display());
        }
        Command::Validate { form } => {
            let setup = SetupForm::load_from_path(&form)?;
            let report = validate(&setup);
            if report.is_clean() {
                println!("{} is ready to submit.", form.display());
            } else {
                eprintln!(
                    "{} has {} problem(s):",
                    form.display(),
                    report.messages.len()
                );
                for (key, message) in &report.messages {
                    eprintln!("  {key}: {message}");
                }
                bail!("form is not submittable");
            }
        }
        Command::Build { form, out } => {
            let setup = SetupForm::load_from_path(&form)?;
            let wire = payload::build(&setup);
            let json =
                serde_json::to_string_pretty(&wire).context("Failed to encode wire config")?;
            match out {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("Wrote wire config to {}", path.display());
                }
                None => println!("{json}"),
            }
        }
        Command::Fetch { url, form } => {
            let client = SimulationClient::new(url);
            let wire = client.fetch_template().await?;
            let setup = payload::receive_setup(&wire);
            setup.save_to_path(&form)?;
            println!("Saved service template to {}", form.display());
        }
        Command::Submit { url, form, start } => {
            let setup = SetupForm::load_from_path(&form)?;
            let report = validate(&setup);
            if !report.is_clean() {
                for (key, message) in &report.messages {
                    eprintln!("  {key}: {message}");
                }
                bail!("form is not submittable");
            }
            let client = SimulationClient::new(url);
            let wire = payload::build(&setup);
            let model = client.create_model(&wire).await?;
            println!("Created model {}", model.model_id);
            if start {
                client.start_run(&model).await?;
                println!("Run started.");
            }
        }
    }
    Ok(())
}
