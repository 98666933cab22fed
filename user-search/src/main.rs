use clap::Parser;
use tracing_subscriber::EnvFilter;
use wiki_user_search::Cli;
use wiki_user_search::Reporter;
use wiki_user_search::UserSummary;
use wiki_user_search::run_main;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let default_level = "error";
    let _ = tracing_subscriber::fmt()
        // Fallback to the `default_level` log filter if the environment
        // variable is not set _or_ contains an invalid value
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(default_level))
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();
    let reporter = StdioReporter {
        write_output_as_json: cli.json,
    };
    run_main(cli, reporter).await?;
    Ok(())
}

struct StdioReporter {
    write_output_as_json: bool,
}

impl Reporter for StdioReporter {
    fn report_user(&self, user: &UserSummary) {
        if self.write_output_as_json {
            match serde_json::to_string(user) {
                Ok(line) => println!("{line}"),
                Err(err) => tracing::error!("failed to serialize {}: {err}", user.username),
            }
            return;
        }
        match &user.display_name {
            Some(name) => println!("@{} ({name})", user.username),
            None => println!("@{}", user.username),
        }
    }

    /// Stdout carries only user records, one per line, in either mode.
    fn warn_no_users(&self, query: &str) {
        eprintln!("No users match '{query}'.");
    }

    fn warn_no_search_query(&self, base_url: &str) {
        eprintln!("No search query specified. Pass the text typed after '@' to search {base_url}.");
    }
}
