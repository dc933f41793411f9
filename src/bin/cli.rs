//! Census CLI
//!
//! Command-line interface for Census operations:
//! - Send queries to a running server
//! - Preview null-argument sanitizing locally
//! - Filter and aggregate a roster without a server
//! - Generate a default config file

use anyhow::{bail, Context};
use census::query::{age_range_by_city, filter_records, sanitize_query, Criteria, Criterion};
use census::store::{Person, RecordStore};
use clap::{Parser, Subcommand};
use serde_json::{Map, Value};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "census")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Query, filter and aggregate person records")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API server URL
    #[arg(long, default_value = "http://localhost:8080", global = true)]
    pub api_url: String,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Send a query to the server
    Query {
        /// Query text, e.g. '{ infoFiltrada(edadMin: 25) { id nombre } }'
        query: String,
        /// Argument names sent as null (their clauses are removed server-side)
        #[arg(short, long = "null")]
        nulls: Vec<String>,
    },

    /// Show how a query is rewritten for null arguments, without a server
    Sanitize {
        /// Query text
        query: String,
        /// Argument names treated as null
        #[arg(short, long = "null")]
        nulls: Vec<String>,
    },

    /// Filter people by age, city and gender
    Filter {
        /// Minimum age (inclusive)
        #[arg(long)]
        min_age: Option<i64>,
        /// Maximum age (inclusive)
        #[arg(long)]
        max_age: Option<i64>,
        /// Exact city
        #[arg(long, conflicts_with = "no_city")]
        city: Option<String>,
        /// Only people without a city
        #[arg(long)]
        no_city: bool,
        /// Exact gender
        #[arg(long, conflicts_with = "no_gender")]
        gender: Option<String>,
        /// Only people without a gender
        #[arg(long)]
        no_gender: bool,
        /// JSON file of people (default: built-in roster)
        #[arg(short, long)]
        records: Option<PathBuf>,
    },

    /// Show the age range of each city
    Aggregate {
        /// JSON file of people (default: built-in roster)
        #[arg(short, long)]
        records: Option<PathBuf>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Query { query, nulls } => {
            let body = Value::Object(request_body(&query, &nulls));

            let response = reqwest::Client::new()
                .post(format!("{}/graphql", cli.api_url))
                .json(&body)
                .send()
                .await
                .with_context(|| format!("Cannot connect to Census API at {}", cli.api_url))?;

            if !response.status().is_success() {
                let status = response.status();
                let text = response.text().await.unwrap_or_default();
                bail!("Query failed ({}): {}", status, text);
            }

            let result: Value = response.json().await?;
            println!("{}", serde_json::to_string_pretty(&result)?);

            if let Some(errors) = result["errors"].as_array() {
                for error in errors {
                    eprintln!("error: {}", error["message"].as_str().unwrap_or("-"));
                }
            }
        }

        Commands::Sanitize { query, nulls } => {
            let body = request_body(&query, &nulls);
            println!("{}", sanitize_query(&query, &body));
        }

        Commands::Filter {
            min_age,
            max_age,
            city,
            no_city,
            gender,
            no_gender,
            records,
        } => {
            let store = load_store(records.as_ref())?;

            let mut criteria = Criteria::new()
                .city(criterion_from_flags(city, no_city))
                .gender(criterion_from_flags(gender, no_gender));
            if let Some(min) = min_age {
                criteria = criteria.min_age(min);
            }
            if let Some(max) = max_age {
                criteria = criteria.max_age(max);
            }

            let matched = filter_records(store.records(), &criteria);

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&matched)?);
            } else {
                print_people(&matched);
            }
        }

        Commands::Aggregate { records } => {
            let store = load_store(records.as_ref())?;
            let ranges = age_range_by_city(store.records());

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&ranges)?);
            } else if ranges.is_empty() {
                println!("No people with a city.");
            } else {
                println!("{:<20} {:>8} {:>8}", "City", "Min", "Max");
                println!("{}", "-".repeat(38));
                for entry in ranges {
                    println!(
                        "{:<20} {:>8} {:>8}",
                        entry.city, entry.range.min, entry.range.max
                    );
                }
            }
        }

        Commands::Config { output } => {
            let config = census::config::generate_default_config();

            if let Some(path) = output {
                std::fs::write(&path, &config)
                    .with_context(|| format!("Failed to write {:?}", path))?;
                println!("Config written to {:?}", path);
            } else {
                print!("{}", config);
            }
        }
    }

    Ok(())
}

/// Build a request body with the query and one null entry per name
fn request_body(query: &str, nulls: &[String]) -> Map<String, Value> {
    let mut body = Map::new();
    body.insert("query".to_string(), Value::String(query.to_string()));
    for name in nulls {
        body.insert(name.clone(), Value::Null);
    }
    body
}

fn criterion_from_flags(value: Option<String>, null: bool) -> Criterion<String> {
    match (value, null) {
        (Some(v), _) => Criterion::Value(v),
        (None, true) => Criterion::Null,
        (None, false) => Criterion::Absent,
    }
}

fn load_store(path: Option<&PathBuf>) -> anyhow::Result<RecordStore> {
    match path {
        Some(path) => RecordStore::from_json_file(path)
            .with_context(|| format!("Failed to load records from {:?}", path)),
        None => Ok(RecordStore::seed()),
    }
}

fn print_people(people: &[&Person]) {
    if people.is_empty() {
        println!("No matching people.");
        return;
    }

    println!(
        "{:<6} {:<12} {:>5} {:<12} {}",
        "ID", "Name", "Age", "City", "Gender"
    );
    println!("{}", "-".repeat(50));

    for person in people {
        println!(
            "{:<6} {:<12} {:>5} {:<12} {}",
            person.id,
            person.name.as_deref().unwrap_or("-"),
            person.age,
            person.city.as_deref().unwrap_or("-"),
            person.gender.as_deref().unwrap_or("-")
        );
    }
}
