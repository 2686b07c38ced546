use std::process;

use clap::{Parser, Subcommand};
use comfy_table::{modifiers, presets, ContentArrangement, Table};
use terminal_size::{terminal_size, Width};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use wsctl::api::{client, ApiClient, CatalogService, HttpBackend};
use wsctl::config::{self, Settings, CUSTOM_TSHIRT_SIZE};
use wsctl::models::BuildKind;
use wsctl::services::{ConsoleNavigator, ConsoleNotifier};
use wsctl::wizard::{assemble, WizardController, WizardEvent};

type Controller = WizardController<HttpBackend, ConsoleNotifier, ConsoleNavigator>;

fn load_settings(env_file: Option<&str>) -> Settings {
    config::load_env_file(env_file);
    Settings::from_env()
}

fn build_backend(settings: &Settings) -> HttpBackend {
    match ApiClient::new(settings) {
        Ok(api) => HttpBackend::new(api),
        Err(e) => {
            tracing::error!(%e, "Failed to create HTTP client");
            eprintln!("{}: {}", yansi::Paint::red("Failed to create HTTP client"), e);
            process::exit(1);
        }
    }
}

fn require_settings(settings: &Settings) {
    let missing = settings.missing();
    if !missing.is_empty() {
        for name in missing {
            eprintln!("{}", yansi::Paint::new(format!("{} is not configured", name)).red());
        }
        process::exit(1);
    }
}

async fn mounted_controller(env_file: Option<&str>) -> Controller {
    let settings = load_settings(env_file);
    require_settings(&settings);
    let backend = build_backend(&settings);
    let mut controller = WizardController::new(
        backend,
        ConsoleNotifier,
        ConsoleNavigator,
        settings.project_id.clone(),
        settings.created_by.clone(),
    );
    controller.mount().await;
    controller
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    if let Some((Width(w), _)) = terminal_size() {
        table.set_width(w.saturating_sub(4));
    }
    table
}

async fn dispatch_or_exit(controller: &mut Controller, event: WizardEvent) {
    if !controller.dispatch(event).await {
        process::exit(1);
    }
}

fn parse_build_kind(raw: &str) -> BuildKind {
    match raw.parse::<BuildKind>() {
        Ok(kind) => kind,
        Err(e) => {
            eprintln!(
                "{}; {}",
                yansi::Paint::new(e.to_string()).red(),
                yansi::Paint::new("expected default or custom").yellow()
            );
            process::exit(1);
        }
    }
}

/// Accept a template id, or a template name matched case-insensitively.
fn resolve_template(controller: &Controller, wanted: &str) -> String {
    let templates = controller.session().catalog().templates();
    templates
        .iter()
        .find(|t| t.id == wanted)
        .or_else(|| templates.iter().find(|t| t.name.eq_ignore_ascii_case(wanted)))
        .map(|t| t.id.clone())
        .unwrap_or_else(|| wanted.to_string())
}

/// Accept an image reference, or an image name from the current listing.
fn resolve_image(controller: &Controller, wanted: &str) -> String {
    let images = controller.session().available_images();
    images
        .iter()
        .find(|img| img.reference == wanted)
        .or_else(|| images.iter().find(|img| img.name == wanted))
        .map(|img| img.reference.clone())
        .unwrap_or_else(|| wanted.to_string())
}

async fn select_template(controller: &mut Controller, template: &str, build_type: &str) {
    let template_id = resolve_template(controller, template);
    dispatch_or_exit(controller, WizardEvent::SelectTemplate(template_id)).await;
    let build_kind = parse_build_kind(build_type);
    dispatch_or_exit(controller, WizardEvent::SetBuildKind(build_kind)).await;
}

#[derive(Parser)]
#[command(
    name = "wsctl",
    author,
    version,
    about = "Create compute workspaces from the command line",
    long_about = r#"wsctl walks the create-workspace wizard (template, image, compute, scheduler) non-interactively.

Configuration comes from environment variables or a `.env` file: API_BASE_URL, API_TOKEN, PROJECT_ID and CREATED_BY.

Examples:
  1) Inspect the catalogs:
      wsctl templates
      wsctl images --template "Python"
  2) Preview a workspace without creating it:
      wsctl create --name "My Workspace" --template Python --image "Python 3.12" --size S --drive 20 --dry-run
"#,
    after_help = "Use `wsctl <subcommand> --help` to get subcommand specific options and usage examples."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Disable colorized output
    #[arg(long, global = true)]
    no_color: bool,
    /// Disable request/response logging
    #[arg(long, global = true)]
    silent: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate configuration and API connectivity
    #[command(long_about = "Check that the project, creator and API base URL are configured, then fetch the project's templates to confirm the backend answers.")]
    CheckConfig {
        #[arg(long)]
        env_file: Option<String>,
    },
    /// List starter templates for the configured project
    Templates {
        #[arg(long)]
        env_file: Option<String>,
    },
    /// List tshirt sizes
    Sizes {
        #[arg(long)]
        env_file: Option<String>,
    },
    /// List images offered for a template
    Images {
        /// Template id or name
        #[arg(long)]
        template: String,
        /// Build type (default or custom)
        #[arg(long, default_value = "default")]
        build_type: String,
        #[arg(long)]
        env_file: Option<String>,
    },
    /// Walk the wizard and create a workspace
    #[command(long_about = "Apply each flag as a wizard step in order and submit the result. With --dry-run the assembled request is printed instead of sent.")]
    Create {
        /// Workspace name; the id is derived from it
        #[arg(long)]
        name: String,
        /// Template id or name
        #[arg(long)]
        template: String,
        /// Build type (default or custom)
        #[arg(long, default_value = "default")]
        build_type: String,
        /// Image reference or name
        #[arg(long)]
        image: String,
        /// Tshirt size code; TX allows --cpu and --memory
        #[arg(long)]
        size: String,
        #[arg(long)]
        cpu: Option<String>,
        #[arg(long)]
        memory: Option<String>,
        /// Storage in GB
        #[arg(long)]
        drive: String,
        /// Enable the start/stop schedule
        #[arg(long, default_value_t = false)]
        schedule: bool,
        #[arg(long, requires = "schedule")]
        start_cron: Option<String>,
        #[arg(long, requires = "schedule")]
        stop_cron: Option<String>,
        /// Print the request instead of submitting it
        #[arg(long, default_value_t = false)]
        dry_run: bool,
        #[arg(long)]
        env_file: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.no_color {
        yansi::whenever(yansi::Condition::NEVER);
    }

    if cli.silent {
        client::set_silent(true);
    }

    match cli.command {
        Commands::CheckConfig { env_file } => {
            let settings = load_settings(env_file.as_deref());
            let mut ok = true;
            for name in settings.missing() {
                eprintln!("{}", yansi::Paint::new(format!("{} is not configured", name)).red());
                ok = false;
            }
            if settings.api_token.trim().is_empty() {
                eprintln!("{}", yansi::Paint::new("API_TOKEN is empty; requests are sent without a bearer token").yellow());
            }
            if !ok {
                process::exit(1);
            }
            let backend = build_backend(&settings);
            match backend.list_templates(&settings.project_id).await {
                Ok(templates) => {
                    println!(
                        "{}",
                        yansi::Paint::new(format!(
                            "Configuration looks valid ({} templates returned from {})",
                            templates.len(),
                            backend.api().base_url()
                        ))
                        .green()
                    );
                }
                Err(e) => {
                    eprintln!("{}: {}", yansi::Paint::new("Configuration appears invalid").red(), e.user_message());
                    process::exit(1);
                }
            }
        }
        Commands::Templates { env_file } => {
            let controller = mounted_controller(env_file.as_deref()).await;
            let catalog = controller.session().catalog();
            if let Some(project) = catalog.templates_project() {
                println!("{}", yansi::Paint::new(format!("Templates for project {}", project)).dim());
            }
            let mut table = new_table();
            table.set_header(vec!["ID", "Name", "Type", "Kind", "OS"]);
            for t in catalog.templates() {
                table.add_row(vec![
                    t.id.clone(),
                    t.label().to_string(),
                    t.template_type.clone(),
                    t.workspace_kind().to_string(),
                    t.operating_system().to_string(),
                ]);
            }
            println!("\n{table}\n");
        }
        Commands::Sizes { env_file } => {
            let controller = mounted_controller(env_file.as_deref()).await;
            let mut table = new_table();
            table.set_header(vec!["Size", "CPU", "Memory (GB)"]);
            for s in controller.session().catalog().tshirt_sizes() {
                table.add_row(vec![s.size_code.clone(), s.cpu.clone(), s.memory.clone()]);
            }
            table.add_row(vec![CUSTOM_TSHIRT_SIZE.to_string(), "custom".to_string(), "custom".to_string()]);
            println!("\n{table}\n");
        }
        Commands::Images { template, build_type, env_file } => {
            let mut controller = mounted_controller(env_file.as_deref()).await;
            select_template(&mut controller, &template, &build_type).await;
            let session = controller.session();
            println!("{}", yansi::Paint::new(format!("Images for {}", session.image_query())).dim());
            let mut table = new_table();
            table.set_header(vec!["Name", "Type", "Reference"]);
            for img in session.available_images() {
                table.add_row(vec![img.name.clone(), img.image_type.clone(), img.reference.clone()]);
            }
            println!("\n{table}\n");
        }
        Commands::Create {
            name,
            template,
            build_type,
            image,
            size,
            cpu,
            memory,
            drive,
            schedule,
            start_cron,
            stop_cron,
            dry_run,
            env_file,
        } => {
            let mut controller = mounted_controller(env_file.as_deref()).await;

            dispatch_or_exit(&mut controller, WizardEvent::RenameWorkspace(name)).await;
            select_template(&mut controller, &template, &build_type).await;
            dispatch_or_exit(&mut controller, WizardEvent::Next).await;

            let reference = resolve_image(&controller, &image);
            dispatch_or_exit(&mut controller, WizardEvent::SelectImage(reference)).await;
            dispatch_or_exit(&mut controller, WizardEvent::Next).await;

            dispatch_or_exit(&mut controller, WizardEvent::SetTshirtSize(size)).await;
            if let Some(cpu) = cpu {
                dispatch_or_exit(&mut controller, WizardEvent::SetCpu(cpu)).await;
            }
            if let Some(memory) = memory {
                dispatch_or_exit(&mut controller, WizardEvent::SetMemory(memory)).await;
            }
            dispatch_or_exit(&mut controller, WizardEvent::SetDrive(drive)).await;

            if schedule {
                dispatch_or_exit(&mut controller, WizardEvent::ToggleSchedule(true)).await;
                dispatch_or_exit(&mut controller, WizardEvent::Next).await;
                if start_cron.is_some() || stop_cron.is_some() {
                    let draft = controller.session().draft();
                    let start = start_cron.or_else(|| draft.start_cron_expression.clone()).unwrap_or_default();
                    let stop = stop_cron.or_else(|| draft.stop_cron_expression.clone()).unwrap_or_default();
                    dispatch_or_exit(&mut controller, WizardEvent::SetSchedule { start, stop }).await;
                }
            }

            let session = controller.session();
            tracing::debug!(step = %session.step(), heading = session.step().heading(), "wizard walked");
            if dry_run {
                let report = session.validation();
                if !report.is_valid() {
                    eprintln!("{}: {}", yansi::Paint::new("Workspace is incomplete").red(), report);
                    process::exit(1);
                }
                match serde_json::to_string_pretty(&assemble(session.draft())) {
                    Ok(body) => println!("{}", body),
                    Err(e) => {
                        eprintln!("{}: {}", yansi::Paint::red("Failed to serialize request"), e);
                        process::exit(1);
                    }
                }
                return;
            }

            if controller.submit().await.is_none() {
                process::exit(1);
            }
        }
    }
}
