//! Task command handlers
//!
//! Submitting tasks to a collaboration and looking them up.

use anyhow::{Context, Result};
use clap::Subcommand;
use cohort_client::BrokerClient;
use cohort_core::domain::collaboration::Collaboration;
use cohort_core::domain::task::Task;
use cohort_core::dto::task::{CreateTask, DatabaseRef, TaskInput};
use colored::*;
use serde_json::Value;
use tracing::info;

use super::result::report_outcome;
use crate::id_resolver::resolve_collaboration;
use crate::types::{CollaborationRef, PollArgs, parse_json_value, parse_key_val};

/// Task subcommands
#[derive(Subcommand)]
pub enum TaskCommands {
    /// Submit a task
    Create {
        /// Task name
        #[arg(short, long)]
        name: String,

        /// Docker image of the algorithm
        #[arg(short, long)]
        image: String,

        /// Collaboration ID or name (defaults to the first collaboration)
        #[arg(short, long)]
        collaboration: Option<String>,

        /// Target organization IDs (defaults to every organization in the collaboration)
        #[arg(long = "org", value_delimiter = ',')]
        organizations: Vec<u64>,

        /// Algorithm method to run
        #[arg(short, long, default_value = "master")]
        method: String,

        /// Keyword arguments as key=value pairs, values parsed as JSON when possible
        #[arg(long = "kwarg", value_parser = parse_key_val)]
        kwargs: Vec<(String, Value)>,

        /// Positional arguments, parsed as JSON when possible
        #[arg(long = "arg", value_parser = parse_json_value)]
        args: Vec<Value>,

        /// Run the method as the central part of the algorithm
        #[arg(long)]
        master: bool,

        /// Database labels handed to the algorithm
        #[arg(long = "database", default_value = "default")]
        databases: Vec<String>,

        /// Task description
        #[arg(short, long)]
        description: Option<String>,

        /// Wait for the first result after submitting
        #[arg(short, long)]
        wait: bool,

        #[command(flatten)]
        poll: PollArgs,
    },
    /// Get task details
    Get {
        /// Task ID
        id: u64,
    },
}

pub async fn handle_task_command(command: TaskCommands, client: &BrokerClient) -> Result<()> {
    match command {
        TaskCommands::Create {
            name,
            image,
            collaboration,
            organizations,
            method,
            kwargs,
            args,
            master,
            databases,
            description,
            wait,
            poll,
        } => {
            let mut input = TaskInput::new(method).master(master);
            for (key, value) in kwargs {
                input = input.kwarg(key, value);
            }
            for value in args {
                input = input.arg(value);
            }

            let collaboration = collaboration.as_deref().map(CollaborationRef::parse);
            let task = create_task(
                client,
                collaboration.as_ref(),
                organizations,
                CreateTaskArgs {
                    name,
                    image,
                    input,
                    description,
                    databases,
                },
            )
            .await?;

            if wait {
                let outcome = client
                    .await_result(&task, poll.max_attempts, poll.delay)
                    .await
                    .with_context(|| format!("Failed to wait for task {}", task.id))?;
                println!();
                report_outcome(client, outcome)?;
            }

            Ok(())
        }
        TaskCommands::Get { id } => {
            let task = client.get_task(id).await?;
            print_task_details(&task);
            Ok(())
        }
    }
}

/// Task fields that pass straight through to the request
struct CreateTaskArgs {
    name: String,
    image: String,
    input: TaskInput,
    description: Option<String>,
    databases: Vec<String>,
}

/// Resolve the collaboration and its organizations, then submit
async fn create_task(
    client: &BrokerClient,
    collaboration: Option<&CollaborationRef>,
    organizations: Vec<u64>,
    args: CreateTaskArgs,
) -> Result<Task> {
    let collaboration = resolve_collaboration(client, collaboration).await?;
    let organization_ids = target_organizations(client, &collaboration, organizations).await?;

    info!(
        "Submitting '{}' to collaboration {} ({} organization(s))",
        args.name,
        collaboration.id,
        organization_ids.len()
    );

    let task = client
        .create_task(CreateTask {
            name: args.name,
            image: args.image,
            collaboration_id: collaboration.id,
            organization_ids,
            input: args.input,
            description: args.description,
            databases: args.databases.into_iter().map(DatabaseRef::new).collect(),
        })
        .await
        .context("Failed to create task")?;

    println!("{}", "✓ Task created".green());
    print_task_details(&task);

    Ok(task)
}

/// Organizations a task goes to: the ones given, or all of the collaboration
async fn target_organizations(
    client: &BrokerClient,
    collaboration: &Collaboration,
    requested: Vec<u64>,
) -> Result<Vec<u64>> {
    if !requested.is_empty() {
        return Ok(requested);
    }

    client
        .organization_ids(collaboration)
        .await
        .context("Failed to fetch organizations of the collaboration")
}

/// Print detailed task information
fn print_task_details(task: &Task) {
    println!("{}", "Task Details:".bold());
    println!("  ID:            {}", task.id.to_string().cyan());
    if let Some(name) = &task.name {
        println!("  Name:          {}", name);
    }
    if let Some(image) = &task.image {
        println!("  Image:         {}", image.dimmed());
    }
    if let Some(collab) = &task.collaboration {
        println!("  Collaboration: {}", collab.id);
    }
    if let Some(status) = &task.status {
        println!("  Status:        {}", status);
    }
    if let Some(description) = task.description.as_deref().filter(|d| !d.is_empty()) {
        println!("  Description:   {}", description);
    }

    if !task.results.is_empty() {
        let ids: Vec<String> = task.results.items().iter().map(|r| r.id.to_string()).collect();
        println!("  Results:       {}", ids.join(", "));
    } else if let Some(link) = task.results.link() {
        println!("  Results:       {}", link.dimmed());
    }
}
