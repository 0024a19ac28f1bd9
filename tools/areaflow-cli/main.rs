use areaflow::api::UserProfile;
use areaflow::config::TOKEN_VAR;
use areaflow::flow::TEMPLATES;
use areaflow::naming::display_name;
use areaflow::prelude::*;
use clap::{Parser, Subcommand, ValueEnum};
use serde::de::DeserializeOwned;
use std::fs;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Define CLI-specific enums for clap to parse.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum PlatformCli {
    Web,
    Ios,
    Android,
}

impl From<PlatformCli> for Platform {
    fn from(value: PlatformCli) -> Self {
        match value {
            PlatformCli::Web => Platform::Web,
            PlatformCli::Ios => Platform::Ios,
            PlatformCli::Android => Platform::Android,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ScopeCli {
    Event,
    Reaction,
}

impl From<ScopeCli> for ParamScope {
    fn from(value: ScopeCli) -> Self {
        match value {
            ScopeCli::Event => ParamScope::Event,
            ScopeCli::Reaction => ParamScope::Reaction,
        }
    }
}

/// Compile editor flows into automation tasks and talk to the backend
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Which client platform's default backend address to use
    #[arg(short, long, value_enum, default_value = "web")]
    platform: PlatformCli,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the trigger-first node sequence of a flow
    Linearize {
        /// Path to the flow JSON exported by the editor
        flow_path: String,
    },
    /// Print the task payload a flow compiles to, without sending it
    Payload {
        flow_path: String,
        /// Path to a `/users/me` profile JSON used for the user id, plan and tokens
        #[arg(long)]
        profile: String,
    },
    /// Compile a flow and create the task for the signed-in user
    Submit { flow_path: String },
    /// List the built-in flow templates
    Templates,
    /// Show the parameter form of a trigger or reaction
    Params {
        #[arg(value_enum)]
        scope: ScopeCli,
        identifier: String,
    },
    /// List the tasks of the signed-in user
    Tasks,
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("areaflow=info")),
        )
        .init();

    let cli = Cli::parse();
    let platform = Platform::from(cli.platform);

    match cli.command {
        Command::Linearize { flow_path } => run_linearize(&flow_path),
        Command::Payload { flow_path, profile } => run_payload(&flow_path, &profile),
        Command::Submit { flow_path } => run_submit(platform, &flow_path).await,
        Command::Templates => run_templates(),
        Command::Params { scope, identifier } => {
            run_params(platform, scope.into(), &identifier).await
        }
        Command::Tasks => run_tasks(platform).await,
    }
}

fn run_linearize(flow_path: &str) {
    let flow = load_flow(flow_path);
    let sequence =
        linearize(&flow).unwrap_or_else(|e| exit_with_error(&format!("Failed to linearize: {}", e)));

    for (position, node) in sequence.iter().enumerate() {
        println!(
            "{}. [{}] {:?} {} ({})",
            position + 1,
            node.id,
            node.kind,
            node.data.title().map(display_name).unwrap_or_default(),
            node.data.service().unwrap_or("-")
        );
    }
}

fn run_payload(flow_path: &str, profile_path: &str) {
    let flow = load_flow(flow_path);
    let profile: UserProfile = load_json(profile_path);
    let account = AccountContext::from_profile(&profile);

    let compiled = TaskCompiler::builder(flow, account)
        .build()
        .compile()
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to compile flow: {}", e)));

    for warning in &compiled.warnings {
        eprintln!("Warning: {}", warning);
    }
    let json = serde_json::to_string_pretty(&compiled.payload)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to serialize payload: {}", e)));
    println!("{}", json);
}

async fn run_submit(platform: Platform, flow_path: &str) {
    let flow = load_flow(flow_path);
    let backend = signed_in_backend(platform);
    let profile = backend
        .me()
        .await
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load profile: {}", e)));

    let account = AccountContext::from_profile(&profile);
    let feedback = Submitter::new(Arc::new(backend))
        .submit(&flow, &account)
        .await;

    match feedback.kind {
        FeedbackKind::Silent => println!("Nothing to save."),
        FeedbackKind::Success => {
            println!("{}: {}", feedback.title, feedback.message);
            for warning in &feedback.warnings {
                println!("Warning: {}", warning);
            }
        }
        FeedbackKind::Error => {
            exit_with_error(&format!("{}: {}", feedback.title, feedback.message))
        }
    }
}

fn run_templates() {
    for template in TEMPLATES {
        println!(
            "{:<12} {} ({}) -> {} ({})",
            template.id,
            display_name(template.trigger),
            display_name(template.trigger_service),
            display_name(template.reaction),
            display_name(template.reaction_service)
        );
    }
}

async fn run_params(platform: Platform, scope: ParamScope, identifier: &str) {
    let backend = backend_for(platform, Session::new());
    let schema = backend
        .params_schema(scope, identifier)
        .await
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load parameters: {}", e)));

    if schema.is_empty() {
        println!("{} takes no parameters.", display_name(identifier));
    }
    for spec in schema {
        println!("{:<16} {:?} {}", spec.id, spec.param_type, spec.label);
    }
}

async fn run_tasks(platform: Platform) {
    let backend = signed_in_backend(platform);
    let profile = backend
        .me()
        .await
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load profile: {}", e)));
    let tasks = backend
        .user_tasks(profile.id)
        .await
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load tasks: {}", e)));

    info!(count = tasks.len(), user = %profile.username, "loaded tasks");
    for task in tasks {
        println!(
            "#{:<5} {} -> {}",
            task.id,
            display_name(&task.trigger),
            display_name(&task.action_name)
        );
    }
}

fn backend_for(platform: Platform, session: Arc<Session>) -> HttpBackend {
    let config = BackendConfig::from_env(platform)
        .unwrap_or_else(|e| exit_with_error(&format!("Invalid configuration: {}", e)));
    HttpBackend::new(config, session)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to create client: {}", e)))
}

fn signed_in_backend(platform: Platform) -> HttpBackend {
    let token = std::env::var(TOKEN_VAR)
        .unwrap_or_else(|_| exit_with_error(&format!("{} is not set", TOKEN_VAR)));
    backend_for(platform, Session::with_token(token))
}

fn load_json<T: DeserializeOwned>(path: &str) -> T {
    let json = fs::read_to_string(path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to read file '{}': {}", path, e)));
    serde_json::from_str(&json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse '{}': {}", path, e)))
}

fn load_flow(path: &str) -> FlowDefinition {
    let json = fs::read_to_string(path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to read flow file '{}': {}", path, e)));
    FlowDefinition::from_json(&json).unwrap_or_else(|e| exit_with_error(&e.to_string()))
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
