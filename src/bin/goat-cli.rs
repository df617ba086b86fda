use clap::{Parser, Subcommand};
use strange_errors_sdk::{Reply, ServerClient};

#[derive(Parser)]
#[command(name = "goat-cli")]
#[command(about = "Command-line client for the Strange Errors Server", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    /// Distinguished verb used by `goat`.
    #[arg(long, default_value = strange_errors_sdk::GOAT_METHOD)]
    verb: String,

    /// Health-check path the escalator listens on.
    #[arg(long, default_value = strange_errors_sdk::HEALTH_CHECK_PATH)]
    path: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Regular health check
    Health,
    /// Call the escalating health check, optionally several times
    Goat {
        #[arg(short, long, default_value_t = 1)]
        times: u32,
    },
    /// List articles
    Articles,
    /// Create an article
    CreateArticle { title: String, content: String },
    /// Delete an article by id
    DeleteArticle { id: String },
    /// Create a user
    CreateUser { name: String, email: String },
    /// List users
    Users,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = ServerClient::new(&cli.url)
        .with_goat_method(&cli.verb)
        .with_health_check_path(&cli.path);

    match cli.command {
        Commands::Health => print_reply(&client.health_check().await?)?,
        Commands::Goat { times } => {
            for _ in 0..times {
                print_reply(&client.goat().await?)?;
            }
        }
        Commands::Articles => print_reply(&client.list_articles().await?)?,
        Commands::CreateArticle { title, content } => {
            print_reply(&client.create_article(&title, &content).await?)?
        }
        Commands::DeleteArticle { id } => print_reply(&client.delete_article(&id).await?)?,
        Commands::CreateUser { name, email } => {
            print_reply(&client.create_user(&name, &email).await?)?
        }
        Commands::Users => print_reply(&client.list_users().await?)?,
    }

    Ok(())
}

fn print_reply(reply: &Reply) -> Result<(), Box<dyn std::error::Error>> {
    println!("HTTP {}", reply.status);
    println!("{}", serde_json::to_string_pretty(&reply.body)?);
    Ok(())
}
