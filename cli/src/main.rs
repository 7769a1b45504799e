//! CLI entrypoint for turnstile
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use turnstile_application::{
    ConversationLogger, HumanInputPort, HumanPrompt, HumanProxy, LlmAgent, LlmGateway,
    NestedSummary, NestedWorkflow, NoConversationLogger, WorkflowBuilder,
};
use turnstile_domain::{ParticipantId, PromptTemplate, SEED_SOURCE, roles};
use turnstile_infrastructure::{
    ConfigLoader, FileConfig, FileSummaryMode, JsonlConversationLogger, OpenAiCompatibleGateway,
};
use turnstile_presentation::{Cli, ConsoleRenderer, InteractiveHumanInput, SummaryArg};

const INNER_GATE_HELP: &str =
    "Reply approve/good to advance, anything else to redo the stage. Include FINALIZE to finish.";
const OUTER_GATE_HELP: &str =
    "Reply approve to hand the plan to the crew, anything else to re-plan. Reply TERMINATE to finish.";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        let config = load_config(&cli)?;
        println!();
        println!("{}", config.to_toml_string()?);
        return Ok(());
    }

    let config = load_config(&cli)?;
    let problems = config.validate();
    if !problems.is_empty() {
        for problem in &problems {
            eprintln!("config error: {}", problem);
        }
        bail!("invalid configuration ({} problem(s))", problems.len());
    }
    ConsoleRenderer::configure_color(config.output.color);

    info!("Starting turnstile");

    // === Dependency Injection ===
    let gateway: Arc<dyn LlmGateway> = Arc::new(
        OpenAiCompatibleGateway::from_config(&config.provider)
            .context("Failed to create LLM gateway")?,
    );
    let input: Arc<dyn HumanInputPort> = Arc::new(InteractiveHumanInput::new());

    let task = match cli.task.clone() {
        Some(task) => task,
        None => read_task(input.as_ref()).await?,
    };

    let logger: Arc<dyn ConversationLogger> = match &config.logging.conversation_log {
        Some(path) => match JsonlConversationLogger::new(path) {
            Some(logger) => {
                info!("Writing conversation log to {}", logger.path().display());
                Arc::new(logger)
            }
            None => Arc::new(NoConversationLogger),
        },
        None => Arc::new(NoConversationLogger),
    };

    let renderer = ConsoleRenderer::new().with_progress(!cli.quiet && config.output.show_progress);

    let cancellation = CancellationToken::new();
    let on_interrupt = cancellation.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, stopping after the current step");
            on_interrupt.cancel();
        }
    });

    let crew = build_crew(&config, &gateway, &input)?;
    let planner = LlmAgent::new(
        roles::PLANNER,
        config.models.for_role(roles::PLANNER),
        PromptTemplate::planner_system(),
        Arc::clone(&gateway),
    );

    let mut project = WorkflowBuilder::new(config.outer.apply(roles::outer_workflow()))
        .participant(planner)
        .participant(crew)
        .participant(HumanProxy::new(
            roles::OUTER_GATE,
            OUTER_GATE_HELP,
            Arc::clone(&input),
        ))
        .with_observer(Arc::new(renderer))
        .with_logger(logger)
        .with_cancellation(cancellation)
        .build()
        .context("Invalid workflow configuration")?;

    match project.run(task).await {
        Ok(outcome) => {
            info!(
                turns = outcome.turns,
                messages = project.log().len(),
                "Project finished"
            );
            Ok(())
        }
        Err(e) if e.is_cancelled() => bail!("cancelled"),
        Err(e) => Err(e.into()),
    }
}

/// Load configuration, then apply command-line overrides on top.
fn load_config(cli: &Cli) -> Result<FileConfig> {
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    if let Some(model) = &cli.model {
        config.models.default = Some(model.clone());
    }
    if cli.max_turns.is_some() {
        config.outer.max_turns = cli.max_turns;
        config.inner.max_turns = cli.max_turns;
    }
    if let Some(summary) = cli.summary {
        config.nested.summary = match summary {
            SummaryArg::Final => FileSummaryMode::FinalMessage,
            SummaryArg::Model => FileSummaryMode::ModelSummary,
        };
    }
    if let Some(path) = &cli.conversation_log {
        config.logging.conversation_log = Some(path.clone());
    }
    Ok(config)
}

/// The Developer → Tester → DocWriter crew, wrapped as one participant.
fn build_crew(
    config: &FileConfig,
    gateway: &Arc<dyn LlmGateway>,
    input: &Arc<dyn HumanInputPort>,
) -> Result<NestedWorkflow> {
    let agent = |role: &str, instructions: &str| {
        LlmAgent::new(
            role,
            config.models.for_role(role),
            instructions,
            Arc::clone(gateway),
        )
    };

    let blueprint = WorkflowBuilder::new(config.inner.apply(roles::inner_workflow()))
        .participant(agent(roles::DEVELOPER, PromptTemplate::developer_system()))
        .participant(agent(roles::TESTER, PromptTemplate::tester_system()))
        .participant(agent(roles::DOC_WRITER, PromptTemplate::doc_writer_system()))
        .participant(HumanProxy::new(
            roles::INNER_GATE,
            INNER_GATE_HELP,
            Arc::clone(input),
        ));

    let mut crew = NestedWorkflow::new(roles::CREW, blueprint)
        .context("Invalid crew configuration")?;
    if let Some(instruction) = &config.nested.instruction {
        crew = crew.with_instruction(instruction.clone());
    }
    if config.nested.summary == FileSummaryMode::ModelSummary {
        let summary = match &config.nested.response_prompt {
            Some(prompt) => NestedSummary::ModelSummary {
                gateway: Arc::clone(gateway),
                model: config.models.summary_model(),
                response_prompt: prompt.clone(),
            },
            None => NestedSummary::model(Arc::clone(gateway), config.models.summary_model()),
        };
        crew = crew.with_summary(summary);
    }
    Ok(crew)
}

async fn read_task(input: &dyn HumanInputPort) -> Result<String> {
    let source = ParticipantId::new(SEED_SOURCE);
    let prompt = HumanPrompt {
        participant: &source,
        description: "What should the team build?",
        messages: &[],
    };
    let task = input.read_line(&prompt).await.context("No task given")?;
    if task.trim().is_empty() {
        bail!("Task cannot be empty");
    }
    Ok(task)
}
