use std::process::ExitCode;

use anyhow::Context;
use bookshelf_cli::{Console, HttpBookClient, Submission};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bookshelf", version, about = "Browse and edit the book catalog")]
struct Cli {
    /// Base URL of the bookshelf server
    #[arg(
        long,
        global = true,
        env = "BOOKSHELF_API_URL",
        default_value = "http://localhost:8082"
    )]
    api_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every book
    List,
    /// Show one book
    Show {
        #[arg(value_parser = book_id)]
        id: String,
    },
    /// Add a book; without fields, shows the empty form
    Create {
        #[command(flatten)]
        form: FormArgs,
    },
    /// Change a book; without fields, shows the current values
    Edit {
        #[arg(value_parser = book_id)]
        id: String,
        #[command(flatten)]
        form: FormArgs,
    },
    /// Delete a book
    Delete {
        #[arg(value_parser = book_id)]
        id: String,
    },
    /// Navigate to a console path such as /show-book/<id>
    Open {
        path: String,
        #[command(flatten)]
        form: FormArgs,
        /// Trigger the delete action of the detail view
        #[arg(long)]
        delete: bool,
    },
}

#[derive(Args, Default)]
struct FormArgs {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    author: Option<String>,
    #[arg(long)]
    description: Option<String>,
}

/// Ids become one segment of a console path, so they cannot carry path syntax.
fn book_id(value: &str) -> Result<String, String> {
    if value.is_empty() {
        return Err("book id must not be empty".to_string());
    }
    match value.chars().find(|c| matches!(c, '/' | '?' | '#')) {
        Some(c) => Err(format!("book id must not contain '{}'", c)),
        None => Ok(value.to_string()),
    }
}

impl FormArgs {
    fn into_submission(self, delete: bool) -> Submission {
        Submission {
            title: self.title,
            author: self.author,
            description: self.description,
            delete,
        }
    }
}

impl Command {
    /// Console path and submission this command stands for
    fn into_navigation(self) -> (String, Submission) {
        match self {
            Command::List => ("/".to_string(), Submission::default()),
            Command::Show { id } => (format!("/show-book/{}", id), Submission::default()),
            Command::Create { form } => {
                ("/create-book".to_string(), form.into_submission(false))
            }
            Command::Edit { id, form } => {
                (format!("/edit-book/{}", id), form.into_submission(false))
            }
            Command::Delete { id } => (
                format!("/show-book/{}", id),
                FormArgs::default().into_submission(true),
            ),
            Command::Open { path, form, delete } => (path, form.into_submission(delete)),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Screens own stdout; diagnostics go to stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .try_init()
        .ok();

    let cli = Cli::parse();
    let (path, submission) = cli.command.into_navigation();
    tracing::debug!(api_url = %cli.api_url, %path, "navigating");

    let console = Console::new(HttpBookClient::new(cli.api_url));
    let screens = console
        .navigate(&path, submission)
        .await
        .with_context(|| format!("cannot open '{}'", path))?;

    for (i, screen) in screens.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print!("{}", screen);
    }

    let failed = screens.last().map(|s| s.failed).unwrap_or(false);
    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
