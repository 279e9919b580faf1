use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;

use mflix_api::ObjectId;

#[derive(Parser)]
#[command(name = "mflix-cli")]
#[command(about = "Management CLI for the mflix REST API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3000/api")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage movies
    Movies {
        #[command(subcommand)]
        action: Action,
    },
    /// Manage comments under a movie
    Comments {
        movie_id: String,
        #[command(subcommand)]
        action: Action,
    },
    /// Manage theaters
    Theaters {
        #[command(subcommand)]
        action: Action,
    },
}

#[derive(Subcommand)]
enum Action {
    /// List the first page of documents
    List,
    /// Fetch one document
    Get { id: String },
    /// Create a document, from a JSON file or the server's sample
    Create {
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Replace a document, from a JSON file or the server's sample revision
    Update {
        id: String,
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Delete a document
    Delete { id: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let (base, action) = match cli.command {
        Commands::Movies { action } => (format!("{}/movies", cli.url), action),
        Commands::Comments { movie_id, action } => {
            (format!("{}/movies/{}/comments", cli.url, movie_id), action)
        }
        Commands::Theaters { action } => (format!("{}/theaters", cli.url), action),
    };

    let request = match action {
        Action::List => client.get(&base),
        Action::Get { id } => client.get(format!("{}/{}", base, id)),
        Action::Create { file } => {
            // The server assigns the stored id; the path segment only has to be well formed.
            let request = client.post(format!("{}/{}", base, ObjectId::generate()));
            with_body(request, file)?
        }
        Action::Update { id, file } => with_body(client.put(format!("{}/{}", base, id)), file)?,
        Action::Delete { id } => client.delete(format!("{}/{}", base, id)),
    };

    let res = request.send().await?;
    if !print_response(res).await? {
        std::process::exit(1);
    }
    Ok(())
}

fn with_body(
    request: reqwest::RequestBuilder,
    file: Option<PathBuf>,
) -> Result<reqwest::RequestBuilder, Box<dyn std::error::Error>> {
    match file {
        Some(path) => {
            let body: Value = serde_json::from_str(&std::fs::read_to_string(path)?)?;
            Ok(request.json(&body))
        }
        None => Ok(request),
    }
}

/// Print the envelope. Returns false for non-2xx answers.
async fn print_response(res: reqwest::Response) -> Result<bool, Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    match serde_json::from_str::<Value>(&text) {
        Ok(json) if status.is_success() => println!("{}", serde_json::to_string_pretty(&json)?),
        Ok(json) => {
            eprintln!("Error: API returned status {}", status);
            eprintln!("{}", serde_json::to_string_pretty(&json)?);
        }
        Err(_) => {
            eprintln!("Error: API returned status {}", status);
            eprintln!("Response: {}", text);
        }
    }
    Ok(status.is_success())
}
