//! The command-line interface: write a configuration, show the compiled lookups and run them
//! inside a transaction.

pub mod state;

use std::io::Write;
use std::path::PathBuf;

use clap::Subcommand;

use query_engine_execution::{transaction, Error, Record};
use query_engine_sql::sql::string::{Param, Query};
use query_engine_translation::translation::query::select_by_id;
use sqltx_configuration::environment::Environment;
use sqltx_configuration::{ConnectionUri, ParsedConfiguration};

/// The id looked up when none is given.
pub const DEFAULT_ID: i64 = 32;

/// The various contextual bits and bobs we need to run.
pub struct Context<Env: Environment> {
    /// The directory holding `configuration.json`.
    pub context_path: PathBuf,
    pub environment: Env,
    /// Takes precedence over the connection URI in the configuration.
    pub connection_uri: Option<String>,
}

/// The command invoked by the user.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Write a default configuration into the configuration directory.
    Initialize {
        /// Overwrite an existing configuration.
        #[arg(long)]
        force: bool,
    },
    /// Print the compiled queries, for `--id` or for both demo lookups.
    Print {
        #[arg(long, allow_negative_numbers = true)]
        id: Option<i64>,
        /// Lay the SQL out over several lines.
        #[arg(long)]
        pretty: bool,
    },
    /// Look a row up by id, then read every row, in one transaction.
    Run {
        #[arg(long, default_value_t = DEFAULT_ID, allow_negative_numbers = true)]
        id: i64,
    },
}

/// Run a command in a given directory.
pub async fn run(
    command: Command,
    context: Context<impl Environment>,
    output: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        Command::Initialize { force } => initialize(&context, force).await?,
        Command::Print { id, pretty } => {
            let queries = match id {
                Some(id) => vec![select_by_id(Some(id))],
                None => vec![select_by_id(Some(DEFAULT_ID)), select_by_id(None)],
            };
            for query in &queries {
                writeln!(output, "{}", render_query(query, pretty))?;
            }
        }
        Command::Run { id } => {
            let rows = run_lookups(&context, id).await?;
            writeln!(output, "{}", serde_json::to_string_pretty(&rows)?)?;
        }
    };
    Ok(())
}

/// Write the initial configuration, refusing to clobber an existing one unless forced.
async fn initialize(context: &Context<impl Environment>, force: bool) -> anyhow::Result<()> {
    let configuration_file = context
        .context_path
        .join(sqltx_configuration::CONFIGURATION_FILENAME);
    if configuration_file.exists() && !force {
        anyhow::bail!(
            "{} already exists, pass --force to overwrite it",
            configuration_file.display()
        );
    }

    sqltx_configuration::write_parsed_configuration(
        &ParsedConfiguration::initial(),
        &context.context_path,
    )
    .await?;
    tracing::info!(path = %configuration_file.display(), "wrote configuration");
    Ok(())
}

/// Render a query as its SQL followed by a comment listing the bound values.
pub fn render_query(query: &Query, pretty: bool) -> String {
    let sql = if pretty {
        sqlformat::format(
            query.text(),
            &sqlformat::QueryParams::None,
            sqlformat::FormatOptions::default(),
        )
    } else {
        query.text().to_string()
    };
    let values: Vec<serde_json::Value> = query.values().iter().map(param_to_json).collect();
    format!("{sql}\n-- values: {}", serde_json::Value::Array(values))
}

fn param_to_json(param: &Param) -> serde_json::Value {
    match param {
        Param::Int8(i) => (*i).into(),
        Param::String(s) => s.clone().into(),
        Param::Bool(b) => (*b).into(),
        Param::Value(v) => v.clone(),
    }
}

/// Both lookups run in the same transaction, so they see the same snapshot of the table.
async fn run_lookups(
    context: &Context<impl Environment>,
    id: i64,
) -> anyhow::Result<serde_json::Value> {
    let configuration = load_configuration(context).await?;
    let pool = state::create_pool(&configuration).await?;

    let (by_id, all) = transaction::run(&pool, |mut execution| {
        Box::pin(async move {
            let by_id: Vec<Record> = execution.query(select_by_id(Some(id))).await?;
            let all: Vec<Record> = execution.query(select_by_id(None)).await?;
            Ok::<_, Error>((by_id, all))
        })
    })
    .await?;

    pool.close().await;
    Ok(serde_json::json!({ "byId": by_id, "all": all }))
}

/// Read the configuration directory, falling back to the empty configuration when there is
/// no file. The command-line connection URI replaces the configured one.
async fn load_configuration(
    context: &Context<impl Environment>,
) -> anyhow::Result<sqltx_configuration::Configuration> {
    let configuration_file = context
        .context_path
        .join(sqltx_configuration::CONFIGURATION_FILENAME);
    let mut parsed = if configuration_file.exists() {
        sqltx_configuration::parse_configuration(&context.context_path).await?
    } else {
        tracing::info!(
            path = %configuration_file.display(),
            "no configuration file, using defaults"
        );
        ParsedConfiguration::empty()
    };
    if let Some(uri) = &context.connection_uri {
        parsed.connection_settings.connection_uri = Some(ConnectionUri::from(uri.as_str()));
    }

    Ok(sqltx_configuration::make_runtime_configuration(
        parsed,
        &context.environment,
    )?)
}
