use std::{env, path, process::ExitCode, sync::Arc};

use setkeep::config::SettingsConfig;
use setkeep::prelude::*;
use setkeep_adapter_sqlite::SettingsAdapterSqlite;

const USAGE: &str = "usage: setkeep <command> <scope> [args]

commands:
  get <scope> <key> [default]
  set <scope> <key> <value> [data-type]
  list <scope>
  delete <scope> <key>

scope: any | app | global | user:<id> | model:<type>:<id>

environment:
  SETKEEP_DB     database file (default ./data/settings.db)
  SETKEEP_TABLE  settings table name (default settings)
  RUST_LOG       log filter (default info)";

pub struct Config {
	pub db_path: path::PathBuf,
	pub table: Option<String>,
}

impl Config {
	fn from_env() -> Self {
		Config {
			db_path: path::PathBuf::from(
				env::var("SETKEEP_DB").unwrap_or("./data/settings.db".to_string()),
			),
			table: env::var("SETKEEP_TABLE").ok(),
		}
	}

	fn settings_config(&self) -> SkResult<SettingsConfig> {
		let mut builder = SettingsConfig::builder();
		if let Some(table) = &self.table {
			builder = builder.table(table.as_str());
		}
		builder.build()
	}
}

enum Command {
	Get { key: String, default: Option<String> },
	Set { key: String, value: String, data_type: Option<DataType> },
	List,
	Delete { key: String },
}

/// Parse `any`, `app`, `global`, `user:<id>` or `model:<type>:<id>`
fn parse_scope(arg: &str) -> SkResult<(ScopeName, Option<OwnerRef>)> {
	let (name, rest) = match arg.split_once(':') {
		Some((name, rest)) => (name.parse::<ScopeName>()?, Some(rest)),
		None => (arg.parse::<ScopeName>()?, None),
	};

	let owner = match (name, rest) {
		(ScopeName::User, Some(id)) => Some(OwnerRef::new("user", id)),
		(ScopeName::Model, Some(rest)) => {
			let (typ, id) = rest.split_once(':').ok_or_else(|| {
				Error::ValidationError(format!("Model scope needs <type>:<id>, got '{}'", rest))
			})?;
			Some(OwnerRef::new(typ, id))
		}
		(_, None) => None,
		(name, Some(_)) => {
			return Err(Error::ValidationError(format!("{} scope takes no owner", name)));
		}
	};

	Ok((name, owner))
}

fn parse_args(args: &[String]) -> SkResult<(Command, ScopeName, Option<OwnerRef>)> {
	let usage = || Error::ValidationError(USAGE.into());
	let arg = |i: usize| args.get(i).cloned().ok_or_else(usage);

	let (name, owner) = parse_scope(&arg(1)?)?;
	let command = match args.first().map(String::as_str) {
		Some("get") => Command::Get { key: arg(2)?, default: args.get(3).cloned() },
		Some("set") => Command::Set {
			key: arg(2)?,
			value: arg(3)?,
			data_type: args.get(4).map(|t| t.parse::<DataType>()).transpose()?,
		},
		Some("list") => Command::List,
		Some("delete") => Command::Delete { key: arg(2)? },
		_ => return Err(usage()),
	};

	Ok((command, name, owner))
}

async fn run(config: &Config, args: &[String]) -> SkResult<serde_json::Value> {
	let (command, name, owner) = parse_args(args)?;

	let settings_config = config.settings_config()?;
	if let Some(dir) = config.db_path.parent() {
		std::fs::create_dir_all(dir).map_err(Error::persistence)?;
	}
	let adapter = SettingsAdapterSqlite::new(&config.db_path, &settings_config).await?;
	let store = SettingsStore::new(Arc::new(adapter), settings_config)?;
	let repo = store.named(name, owner, None)?;

	let res = match command {
		Command::Get { key, default: Some(default) } => {
			serde_json::to_value(repo.get(&key, default).await?)?
		}
		Command::Get { key, default: None } => serde_json::to_value(repo.find_or_fail(&key).await?)?,
		Command::Set { key, value, data_type } => {
			let opts = SetOptions { data_type, ..SetOptions::default() };
			serde_json::to_value(repo.set_with(&key, value, opts).await?)?
		}
		Command::List => serde_json::to_value(repo.all().await?)?,
		Command::Delete { key } => serde_json::json!({ "deleted": repo.delete(&key).await? }),
	};

	Ok(res)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
	tracing_subscriber::fmt()
		.with_env_filter(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
		)
		.with_target(false)
		.with_writer(std::io::stderr)
		.init();

	let config = Config::from_env();
	let args: Vec<String> = env::args().skip(1).collect();

	match run(&config, &args).await {
		Ok(res) => {
			println!("{}", res);
			ExitCode::SUCCESS
		}
		Err(Error::ValidationError(msg)) => {
			eprintln!("{}", msg);
			ExitCode::from(2)
		}
		Err(err) => {
			error!("{}", err);
			ExitCode::FAILURE
		}
	}
}


// vim: ts=4
