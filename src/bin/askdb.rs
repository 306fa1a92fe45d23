//! askdb CLI
//!
//! Ask a database questions in natural language, or run SQL directly.

use askdb::db::QueryResult;
use askdb::SqlAgent;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Natural-language-to-SQL agent for PostgreSQL
#[derive(Parser)]
#[command(name = "askdb")]
#[command(about = "Ask a PostgreSQL database questions in natural language", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer a natural-language question
    Ask {
        /// Question in natural language
        question: String,

        /// Print the generated SQL without executing it
        #[arg(long)]
        sql_only: bool,

        /// Print the raw result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Execute a SQL statement directly
    Query {
        /// SQL statement
        sql: String,

        /// Print the raw result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the introspected schema as prompt text
    Schema,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut agent = SqlAgent::from_env()?;

    match cli.command {
        Commands::Ask {
            question,
            sql_only,
            json,
        } => {
            if sql_only {
                println!("{}", agent.generate_sql(&question).await);
                return Ok(());
            }
            let result = agent.answer(&question).await;
            print_result(&result, json)?;
        }
        Commands::Query { sql, json } => {
            let result = agent.execute(&sql).await;
            print_result(&result, json)?;
        }
        Commands::Schema => {
            let text = agent.schema_text().await;
            if text.is_empty() {
                anyhow::bail!("schema introspection returned no tables");
            }
            println!("{}", text);
        }
    }

    Ok(())
}

fn print_result(result: &QueryResult, as_json: bool) -> anyhow::Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    if !result.query.is_empty() {
        println!("Query: {}", result.query);
    }

    match &result.data {
        Some(data) => print_table(&data.columns, &data.rows),
        None => anyhow::bail!(
            "{}",
            result.error.as_deref().unwrap_or("unknown error")
        ),
    }

    Ok(())
}

/// Print rows as an aligned text table.
fn print_table(columns: &[String], rows: &[Vec<String>]) {
    if columns.is_empty() {
        println!("(no columns)");
        return;
    }

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, col)| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.len())
                .chain(std::iter::once(col.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(col, w)| format!("{:<width$}", col, width = *w))
        .collect();
    let header = header.join(" | ");
    println!("{}", header);
    println!("{}", "-".repeat(header.len()));

    for row in rows {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{:<width$}", cell, width = *w))
            .collect();
        println!("{}", line.join(" | "));
    }

    println!("({} rows)", rows.len());
}
