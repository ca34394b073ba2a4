//! tasktrack-client CLI entry point.

use clap::Parser;
use tasktrack_client::cli::health::HealthAction;
use tasktrack_client::cli::tasks::TasksAction;
use tasktrack_client::cli::{Cli, Commands, OutputFormat};
use tasktrack_client::client::TasktrackClient;
use tasktrack_client::output::{format_output, pretty};
use tasktrack_core::task::TaskInput;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = TasktrackClient::new(&cli.base_url);

    match cli.command {
        Commands::Tasks(tasks_cmd) => match tasks_cmd.action {
            TasksAction::List => {
                let tasks = client.list_tasks().await?;
                match cli.format {
                    OutputFormat::Json => println!("{}", format_output(&tasks, cli.format)),
                    OutputFormat::Pretty => println!("{}", pretty::format_tasks(&tasks)),
                }
            }
            TasksAction::Get { id } => {
                let task = client.get_task(id).await?;
                match cli.format {
                    OutputFormat::Json => println!("{}", format_output(&task, cli.format)),
                    OutputFormat::Pretty => println!("{}", pretty::format_task(&task)),
                }
            }
            TasksAction::ByStatus { status } => {
                let tasks = client.list_tasks_by_status(status).await?;
                match cli.format {
                    OutputFormat::Json => println!("{}", format_output(&tasks, cli.format)),
                    OutputFormat::Pretty => println!("{}", pretty::format_tasks(&tasks)),
                }
            }
            TasksAction::Search { title } => {
                let tasks = client.search_tasks(&title).await?;
                match cli.format {
                    OutputFormat::Json => println!("{}", format_output(&tasks, cli.format)),
                    OutputFormat::Pretty => println!("{}", pretty::format_tasks(&tasks)),
                }
            }
            TasksAction::Count => {
                let count = client.count_tasks().await?;
                match cli.format {
                    OutputFormat::Json => println!("{}", format_output(&count, cli.format)),
                    OutputFormat::Pretty => println!("{} task(s)", count),
                }
            }
            TasksAction::Create(fields) => {
                let task = client.create_task(&TaskInput::from(fields)).await?;
                match cli.format {
                    OutputFormat::Json => println!("{}", format_output(&task, cli.format)),
                    OutputFormat::Pretty => {
                        println!("Created:\n{}", pretty::format_task(&task))
                    }
                }
            }
            TasksAction::Update { id, fields } => {
                let task = client.update_task(id, &TaskInput::from(fields)).await?;
                match cli.format {
                    OutputFormat::Json => println!("{}", format_output(&task, cli.format)),
                    OutputFormat::Pretty => {
                        println!("Updated:\n{}", pretty::format_task(&task))
                    }
                }
            }
            TasksAction::Delete { id } => {
                client.delete_task(id).await?;
                if !cli.quiet {
                    println!("Deleted task {}", id);
                }
            }
        },
        Commands::Health(health_cmd) => match health_cmd.action {
            HealthAction::Info => {
                let health = client.health().await?;
                match cli.format {
                    OutputFormat::Json => println!("{}", format_output(&health, cli.format)),
                    OutputFormat::Pretty => println!("{}", pretty::format_health(&health)),
                }
            }
            HealthAction::Live => {
                let live = client.live().await?;
                if !cli.quiet {
                    println!("{}", if live { "live" } else { "not live" });
                }
                if !live {
                    std::process::exit(1);
                }
            }
            HealthAction::Ready => {
                let report = client.ready().await?;
                match cli.format {
                    OutputFormat::Json => println!("{}", format_output(&report, cli.format)),
                    OutputFormat::Pretty => println!("{}", pretty::format_readiness(&report)),
                }
                if !report.is_ready() {
                    std::process::exit(1);
                }
            }
        },
    }

    Ok(())
}
