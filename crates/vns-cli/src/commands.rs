use std::fs;
use std::io::Write;

use anyhow::{anyhow, Context};
use colored::Colorize;
use serde_json::json;
use vns_crypto::SigningKey;
use vns_store::{DirectoryContentStore, Outcome, RecordStore, Request, RequestOptions, SetOutcome, StoreConfig};
use vns_types::Record;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let format = cli.format.clone();
    match cli.command {
        Command::Keygen(ref args) => return cmd_keygen(args, &format),
        Command::Sign(ref args) => return cmd_sign(args, &format),
        _ => {}
    }
    let config = load_config(&cli)?;
    match cli.command {
        Command::Get(args) => cmd_get(config, args, &format),
        Command::Set(args) => cmd_set(config, args, &format),
        Command::Resolve(args) => cmd_resolve(config, args),
        Command::List(_) => cmd_list(config, &format),
        Command::Request(args) => cmd_request(config, args, &format),
        Command::Put(args) => cmd_put(config, args, &format),
        Command::Keygen(_) | Command::Sign(_) => Ok(()),
    }
}

/// Config file first, then command-line overrides.
pub fn load_config(cli: &Cli) -> anyhow::Result<StoreConfig> {
    let mut config = match &cli.config {
        Some(path) => StoreConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => StoreConfig::default(),
    };
    if let Some(storage) = &cli.storage {
        config.table_path = storage.clone();
    }
    if let Some(root) = &cli.content_root {
        config.content_root = Some(root.clone());
    }
    Ok(config)
}

fn cmd_get(config: StoreConfig, args: GetArgs, format: &OutputFormat) -> anyhow::Result<()> {
    print_outcome(&get_outcome(config, args.uid)?, format)
}

/// Same result shape as `request --request-type name-record-get`.
fn get_outcome(config: StoreConfig, uid: String) -> anyhow::Result<Outcome> {
    Ok(RecordStore::new(config).execute(Request::Get { identifier: uid })?)
}

fn cmd_set(config: StoreConfig, args: SetArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let signature = hex::decode(args.sig.trim()).context("signature is not valid hex")?;
    let mut store = RecordStore::new(config);
    let outcome = store.set(&args.uid, &args.link, &signature)?;
    match format {
        OutputFormat::Json => print_json(&outcome)?,
        OutputFormat::Text => print_stored(&outcome),
    }
    Ok(())
}

fn cmd_resolve(config: StoreConfig, args: ResolveArgs) -> anyhow::Result<()> {
    let store = RecordStore::new(config);
    let content = store.resolve(&args.uid)?;
    match args.output {
        Some(path) => {
            fs::write(&path, &content).with_context(|| format!("writing {}", path.display()))?;
            eprintln!("{} Wrote {} bytes to {}", "✓".green().bold(), content.len(), path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&content)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn cmd_list(config: StoreConfig, format: &OutputFormat) -> anyhow::Result<()> {
    let store = RecordStore::new(config);
    let records = store.list()?;
    match format {
        OutputFormat::Json => print_json(&records)?,
        OutputFormat::Text => {
            if records.is_empty() {
                println!("No records in {}.", store.table().path().display());
            }
            for record in &records {
                print_record(record);
            }
        }
    }
    Ok(())
}

fn cmd_request(config: StoreConfig, args: RequestArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let request = Request::try_from(RequestOptions {
        request_type: args.request_type,
        uid: args.uid,
        link: args.link,
        sig: args.sig,
    })?;
    let outcome = RecordStore::new(config).execute(request)?;
    print_outcome(&outcome, format)
}

fn print_outcome(outcome: &Outcome, format: &OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => print_json(outcome)?,
        OutputFormat::Text => match outcome {
            Outcome::Found { link, .. } => println!("{}", link),
            Outcome::Stored(stored) => print_stored(stored),
        },
    }
    Ok(())
}

fn cmd_keygen(args: &KeygenArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let key = SigningKey::generate();
    let identifier = key.verifying_key().identifier(&args.name)?;
    match format {
        OutputFormat::Json => print_json(&json!({
            "identifier": identifier.to_canonical(),
            "secret": key.to_hex(),
        }))?,
        OutputFormat::Text => {
            println!("{} Generated key for {}", "✓".green().bold(), args.name.yellow());
            println!("  Identifier: {}", identifier.to_canonical().cyan());
            println!("  Secret:     {}", key.to_hex());
            println!("  {}", "Keep the secret private; anyone holding it can rebind the name.".dimmed());
        }
    }
    Ok(())
}

fn cmd_sign(args: &SignArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let key = SigningKey::from_hex(&args.secret)?;
    let signature = key.sign(args.link.as_bytes()).to_hex();
    match format {
        OutputFormat::Json => print_json(&json!({ "link": args.link, "sig": signature }))?,
        OutputFormat::Text => println!("{}", signature),
    }
    Ok(())
}

fn cmd_put(config: StoreConfig, args: PutArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let root = config
        .content_root
        .ok_or_else(|| anyhow!("no content directory configured (use --content-root or content-root in the config file)"))?;
    let data = fs::read(&args.path).with_context(|| format!("reading {}", args.path.display()))?;
    let link = DirectoryContentStore::new(root).put(&data)?;
    match format {
        OutputFormat::Json => print_json(&json!({ "link": link, "bytes": data.len() }))?,
        OutputFormat::Text => println!("{}", link),
    }
    Ok(())
}

fn print_stored(outcome: &SetOutcome) {
    let action = match outcome.replaced_line {
        Some(line) => format!("replaced line {}", line),
        None => "new record".to_string(),
    };
    println!("{} Stored ({})", "✓".green().bold(), action.dimmed());
    print_record(&outcome.record);
}

fn print_record(record: &Record) {
    println!("  {} {} {}", short_identifier(record).yellow(), "→".dimmed(), record.link);
}

/// `name:` plus the first 16 hex digits of the key.
fn short_identifier(record: &Record) -> String {
    let key = record.identifier.key_hex();
    let end = key.len().min(16);
    format!("{}:{}…", record.identifier.name(), &key[..end])
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
