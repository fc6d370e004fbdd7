//! Command dispatch

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::render::{render_report, tree_summary, TreeNodeConvert};
use crate::application::services::InputSource;
use crate::cli::args::{Cli, Commands, ConfigCommands, ModeArg, OutputFormat};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{PromptMode, TreeOutcome};
use crate::infrastructure::{InfraError, ServiceContainer};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Err(CliError::Usage(
            "no command given, run 'rectree --help'".to_string(),
        ));
    };

    // Completions need neither settings nor services.
    if let Commands::Completion { shell } = command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let project_dir = resolve_project_dir(cli.project_dir.as_deref())?;
    let settings = Settings::load(Some(project_dir.as_path()))?;
    debug!("settings: {:?}", settings);
    let container = ServiceContainer::new(settings);

    match command {
        Commands::Prompt {
            mode,
            content,
            file,
            payload,
        } => _prompt(&container, *mode, content.as_deref(), file.as_deref(), *payload),
        Commands::Split {
            file,
            envelope,
            format,
        } => _split(&container, file.as_deref(), *envelope, *format),
        Commands::Tree { file, envelope } => _tree(&container, file.as_deref(), *envelope),
        Commands::Config { command } => _config(&container, command, &project_dir),
        Commands::Completion { .. } => Ok(()),
    }
}

fn resolve_project_dir(dir: Option<&Path>) -> CliResult<PathBuf> {
    match dir {
        Some(d) if !d.is_dir() => Err(CliError::InvalidArgs(format!(
            "project directory does not exist: {}",
            d.display()
        ))),
        Some(d) => Ok(d.to_path_buf()),
        None => std::env::current_dir()
            .map_err(|e| CliError::Infra(InfraError::io("determine current directory", e))),
    }
}

#[instrument(skip(container, content))]
fn _prompt(
    container: &ServiceContainer,
    mode: ModeArg,
    content: Option<&str>,
    file: Option<&Path>,
    payload: bool,
) -> CliResult<()> {
    let mode = PromptMode::from(mode);
    let content = match content {
        Some(c) => c.to_string(),
        None => container
            .analysis_service()
            .load(&InputSource::from_arg(file))?,
    };

    let service = container.prompt_service();
    if payload {
        let body = service.payload(mode, &content)?;
        let json = serde_json::to_string_pretty(&body).map_err(InfraError::from)?;
        output::info(&json);
    } else {
        output::info(&service.prompt(mode, &content)?);
    }
    Ok(())
}

#[instrument(skip(container))]
fn _split(
    container: &ServiceContainer,
    file: Option<&Path>,
    envelope: bool,
    format: OutputFormat,
) -> CliResult<()> {
    let parsed = container
        .analysis_service()
        .analyze_source(&InputSource::from_arg(file), envelope)?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&parsed).map_err(InfraError::from)?;
            output::info(&json);
        }
        OutputFormat::Text => {
            let missing = parsed.missing_markers();
            if !missing.is_empty() {
                let names: Vec<String> = missing.iter().map(|m| m.to_string()).collect();
                output::warning(&format!("sections not found: {}", names.join(", ")));
            }
            print!("{}", render_report(&parsed, &container.settings));
        }
    }
    Ok(())
}

#[instrument(skip(container))]
fn _tree(container: &ServiceContainer, file: Option<&Path>, envelope: bool) -> CliResult<()> {
    let parsed = container
        .analysis_service()
        .analyze_source(&InputSource::from_arg(file), envelope)?;

    match &parsed.tree {
        TreeOutcome::Valid { root } => {
            print!("{}", root.to_termtree(container.settings.label_max_len));
            output::detail(&tree_summary(root));
            Ok(())
        }
        TreeOutcome::Absent => Err(CliError::TreeUnavailable(
            "answer contains no ```json block".to_string(),
        )),
        TreeOutcome::Invalid { error } => Err(CliError::TreeUnavailable(error.to_string())),
    }
}

#[instrument(skip(container))]
fn _config(
    container: &ServiceContainer,
    command: &ConfigCommands,
    project_dir: &Path,
) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&container.settings.to_toml()?);
        }
        ConfigCommands::Template => {
            output::info(&Settings::template());
        }
        ConfigCommands::Path => {
            output::header("Config files");
            match global_config_path() {
                Some(p) => output::action("global", &describe_path(&p)),
                None => output::action("global", &"(no home directory)"),
            }
            output::action("local", &describe_path(&local_config_path(project_dir)));
        }
    }
    Ok(())
}

fn describe_path(path: &Path) -> String {
    if path.exists() {
        path.display().to_string()
    } else {
        format!("{} (not present)", path.display())
    }
}
