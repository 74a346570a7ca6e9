use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, WrapErr};
use tgp_content::{ConversionOptions, ListItemMode};
use tgp_telegraph::Client;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::publish::{InputFormat, Publisher, render_content};

#[derive(Parser, Debug)]
#[command(name = "tgp")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(after_help = "# Examples:\n\n\
    ## To preview the content nodes of a note:\n\
    tgp convert note.md\n\n\
    ## To publish a note (creates the page on first run):\n\
    TGP_ACCESS_TOKEN=... tgp publish note.md\n\n\
    ## To create an account:\n\
    tgp account create --short-name notes")]
#[command(about = "Publish Markdown notes to Telegraph.", long_about = None)]
pub struct Cli {
    #[clap(flatten)]
    global: GlobalArgs,

    #[clap(subcommand)]
    commands: Commands,
}

#[derive(Clone, Debug, clap::Args, Default)]
struct GlobalArgs {
    /// Telegraph access token (overrides TGP_ACCESS_TOKEN)
    #[arg(long, global = true)]
    access_token: Option<String>,

    /// Author name for new pages and accounts (overrides TGP_AUTHOR_NAME)
    #[arg(long, global = true)]
    author_name: Option<String>,

    /// Telegraph API base URL (overrides TGP_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,
}

/// How list items are published.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
enum ListItems {
    /// Collapse each item to plain text
    #[default]
    Flatten,
    /// Keep inline formatting inside items
    Inline,
}

impl From<ListItems> for ListItemMode {
    fn from(value: ListItems) -> Self {
        match value {
            ListItems::Flatten => ListItemMode::Flatten,
            ListItems::Inline => ListItemMode::Inline,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the Telegraph content nodes of a file as JSON
    Convert {
        /// Set input format
        #[arg(short = 'I', long, value_enum, default_value_t)]
        input_format: InputFormat,
        #[arg(long, value_enum, default_value_t)]
        list_items: ListItems,
        file: PathBuf,
    },
    /// Create or update the page of a Markdown file
    Publish {
        /// Page title (defaults to the file name)
        #[arg(long)]
        title: Option<String>,
        #[arg(long, value_enum, default_value_t)]
        list_items: ListItems,
        file: PathBuf,
    },
    /// Replace the content of a published page
    Clear {
        /// Page title (defaults to the file name)
        #[arg(long)]
        title: Option<String>,
        file: PathBuf,
    },
    /// Manage the Telegraph account
    Account {
        #[command(subcommand)]
        command: AccountCommands,
    },
    /// Inspect published pages
    Page {
        #[command(subcommand)]
        command: PageCommands,
    },
}

#[derive(Debug, Subcommand)]
enum AccountCommands {
    /// Create an account and print its access token
    Create {
        #[arg(long)]
        short_name: String,
    },
    /// Show the account of the access token
    Info,
}

#[derive(Debug, Subcommand)]
enum PageCommands {
    /// List pages of the account
    List {
        #[arg(long, default_value_t = 0)]
        offset: u32,
        #[arg(long, default_value_t = 50)]
        limit: u32,
    },
    /// Show a page and its content
    Get { path: String },
}

fn init_tracing(log_level: &str) {
    let env_filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    // A subscriber may already be installed when embedded.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn print_json<T: serde::Serialize>(value: &T) -> miette::Result<()> {
    println!("{}", serde_json::to_string_pretty(value).into_diagnostic()?);
    Ok(())
}

impl Cli {
    /// Environment configuration with command-line overrides applied.
    pub fn config(&self) -> Config {
        let mut config = Config::from_env();

        if let Some(token) = &self.global.access_token {
            config.access_token = Some(token.clone()).filter(|token| !token.is_empty());
        }
        if let Some(author_name) = &self.global.author_name {
            config.author_name = author_name.clone();
        }
        if let Some(api_url) = &self.global.api_url {
            config.api_url = api_url.clone();
        }
        if self.global.verbose {
            config.log_level = "debug".to_string();
        }

        config
    }

    pub async fn run(&self) -> miette::Result<()> {
        let config = self.config();
        init_tracing(&config.log_level);

        match &self.commands {
            Commands::Convert {
                input_format,
                list_items,
                file,
            } => {
                let source = fs::read_to_string(file)
                    .into_diagnostic()
                    .wrap_err_with(|| format!("Failed to read {}", file.display()))?;
                let nodes = render_content(&source, *input_format, &conversion_options(*list_items))?;
                print_json(&nodes)
            }
            Commands::Publish {
                title,
                list_items,
                file,
            } => {
                let client = client(&config)?;
                let page = Publisher::new(&client, &config.author_name, conversion_options(*list_items))
                    .publish(file, title.as_deref())
                    .await?;
                println!("{}", page.url);
                Ok(())
            }
            Commands::Clear { title, file } => {
                let client = client(&config)?;
                let page = Publisher::new(&client, &config.author_name, ConversionOptions::default())
                    .clear(file, title.as_deref())
                    .await?;
                println!("{}", page.url);
                Ok(())
            }
            Commands::Account { command } => {
                let client = client(&config)?;
                match command {
                    AccountCommands::Create { short_name } => {
                        let account = client
                            .create_account(short_name, &config.author_name)
                            .await
                            .into_diagnostic()?;
                        println!("access_token: {}", account.access_token.unwrap_or_default());
                        println!("auth_url: {}", account.auth_url.unwrap_or_default());
                        Ok(())
                    }
                    AccountCommands::Info => print_json(&client.get_account_info().await.into_diagnostic()?),
                }
            }
            Commands::Page { command } => {
                let client = client(&config)?;
                match command {
                    PageCommands::List { offset, limit } => {
                        print_json(&client.get_page_list(*offset, *limit).await.into_diagnostic()?)
                    }
                    PageCommands::Get { path } => print_json(&client.get_page(path).await.into_diagnostic()?),
                }
            }
        }
    }
}

fn conversion_options(list_items: ListItems) -> ConversionOptions {
    ConversionOptions {
        list_items: list_items.into(),
        ..Default::default()
    }
}

fn client(config: &Config) -> miette::Result<Client> {
    Client::with_options(&config.api_url, config.access_token.clone(), config.timeout).into_diagnostic()
}
