use clap::{Parser, Subcommand, ValueEnum};
use log::error;
use recipe_summarizer::{
    reduce_url, render, Assistant, ExtractorProfile, RecipeSummarizer, SchemaVersion,
    SummarizeError, Summary, SummarizerConfig,
};
use std::process::ExitCode;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "recipe-summarizer", version, about = "Summarize recipe web pages")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch a recipe page and summarize it
    Summarize {
        /// URL of the recipe page
        url: String,

        /// Structured recipe or free-form HTML
        #[arg(long, value_enum)]
        profile: Option<Profile>,

        /// Ingredient shape requested from the model
        #[arg(long, value_enum)]
        schema: Option<Schema>,

        /// How to print a structured recipe
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Gemini model to use
        #[arg(long)]
        model: Option<String>,

        /// Gemini API key (overrides configuration)
        #[arg(long)]
        api_key: Option<String>,

        /// Timeout in seconds for each network call
        #[arg(long)]
        timeout: Option<f64>,
    },

    /// Print the reduced text of a page without calling the model
    Reduce {
        /// URL of the page
        url: String,

        /// Timeout in seconds for the fetch
        #[arg(long)]
        timeout: Option<f64>,
    },

    /// Ask the model a single question
    Ask {
        /// The question
        #[arg(required = true)]
        prompt: Vec<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Profile {
    Structured,
    Prose,
}

#[derive(Clone, Copy, ValueEnum)]
enum Schema {
    PlainText,
    Measured,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
    Html,
}

impl From<Profile> for ExtractorProfile {
    fn from(profile: Profile) -> Self {
        match profile {
            Profile::Structured => ExtractorProfile::Structured,
            Profile::Prose => ExtractorProfile::Prose,
        }
    }
}

impl From<Schema> for SchemaVersion {
    fn from(schema: Schema) -> Self {
        match schema {
            Schema::PlainText => SchemaVersion::PlainText,
            Schema::Measured => SchemaVersion::Measured,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let config = match SummarizerConfig::load() {
        Ok(config) => config,
        Err(e) => return fail(&SummarizeError::from(e)),
    };

    match cli.command {
        Command::Summarize {
            url,
            profile,
            schema,
            format,
            model,
            api_key,
            timeout,
        } => {
            let mut builder = RecipeSummarizer::with_config(config).url(url);
            if let Some(profile) = profile {
                builder = builder.profile(profile.into());
            }
            if let Some(schema) = schema {
                builder = builder.schema_version(schema.into());
            }
            if let Some(model) = model {
                builder = builder.model(model);
            }
            if let Some(api_key) = api_key {
                builder = builder.api_key(api_key);
            }
            if let Some(secs) = timeout {
                match Duration::try_from_secs_f64(secs) {
                    Ok(duration) => builder = builder.timeout(duration),
                    Err(_) => {
                        return fail(&SummarizeError::InvalidInput(format!(
                            "invalid timeout: {}",
                            secs
                        )))
                    }
                }
            }

            match builder.build().await {
                Ok(summary) => print_summary(summary, format),
                Err(e) => fail(&e),
            }
        }
        Command::Reduce { url, timeout } => {
            let config = SummarizerConfig {
                timeout: timeout.or(config.timeout),
                ..config
            };
            match reduce_url(&url, &config).await {
                Ok(text) => {
                    println!("{}", text);
                    ExitCode::SUCCESS
                }
                Err(e) => fail(&e),
            }
        }
        Command::Ask { prompt } => {
            let assistant = match Assistant::from_config(&config) {
                Ok(assistant) => assistant,
                Err(e) => return fail(&e),
            };
            match assistant.ask(&prompt.join(" ")).await {
                Ok(answer) => {
                    println!("{}", answer);
                    ExitCode::SUCCESS
                }
                Err(e) => fail(&e),
            }
        }
    }
}

fn print_summary(summary: Summary, format: Format) -> ExitCode {
    match summary {
        Summary::Recipe(recipe) => match format {
            Format::Text => print!("{}", render::to_text(&recipe)),
            Format::Html => print!("{}", render::to_html(&recipe)),
            Format::Json => match serde_json::to_string_pretty(&recipe) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    error!("Failed to serialize recipe: {}", e);
                    eprintln!("{}", recipe_summarizer::error::GENERIC_FAILURE_MESSAGE);
                    return ExitCode::FAILURE;
                }
            },
        },
        Summary::Html(html) => println!("{}", html),
    }
    ExitCode::SUCCESS
}

fn fail(err: &SummarizeError) -> ExitCode {
    match err {
        SummarizeError::SchemaValidationFailed { detail } => error!("{}: {}", err, detail),
        _ => error!("{}", err),
    }
    eprintln!("{}", err.user_message());
    ExitCode::FAILURE
}
