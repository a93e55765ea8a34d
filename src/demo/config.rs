use mongodb::options::{CollectionOptions, DatabaseOptions, ReadPreference, SelectionCriteria};

use crate::core::errors::ConfigError;
use crate::hanzi::checked_length;

pub const DEFAULT_URI: &str = "mongodb://localhost:27017";
pub const DEFAULT_DATABASE: &str = "foo";
pub const DEFAULT_COLLECTION: &str = "Person";
pub const DEFAULT_NAME_LENGTH: usize = 5;

pub const USAGE: &str = "Usage: mgsample-demo [--uri <URI>] [--db <NAME>] [--collection <NAME>] [--name-length <N>]\n\
     \x20                    [--username <USER> --password <PASS> [--auth-source <DB>]]\n\
     \n\
     Options:\n\
       --uri, -u          Connection string (default: mongodb://localhost:27017)\n\
       --db, -d           Database to use (default: foo)\n\
       --collection, -c   Collection holding the sample people (default: Person)\n\
       --name-length, -n  Characters per generated name (default: 5)\n\
       --username         User to authenticate as\n\
       --password         Password for --username\n\
       --auth-source      Database holding the user's credentials (default: driver's choice)\n\
       --help, -h         Show this help message\n\
     \n\
     Notes:\n\
       * Every option also accepts the --option=value form.\n\
       * Flags win over MGSAMPLE_URI, MGSAMPLE_DB, MGSAMPLE_COLLECTION,\n\
         MGSAMPLE_NAME_LENGTH, MGSAMPLE_USERNAME, MGSAMPLE_PASSWORD and\n\
         MGSAMPLE_AUTH_SOURCE.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoConfig {
    pub uri: String,
    pub database: String,
    pub collection: String,
    pub name_length: usize,
    pub username: Option<String>,
    pub password: Option<String>,
    pub auth_source: Option<String>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            uri: DEFAULT_URI.to_string(),
            database: DEFAULT_DATABASE.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            name_length: DEFAULT_NAME_LENGTH,
            username: None,
            password: None,
            auth_source: None,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Run(DemoConfig),
    Help,
}

#[derive(Default)]
struct ParsedArgs {
    uri: Option<String>,
    database: Option<String>,
    collection: Option<String>,
    name_length: Option<String>,
    username: Option<String>,
    password: Option<String>,
    auth_source: Option<String>,
}

impl ParsedArgs {
    fn slot(&mut self, flag: &str) -> Option<(&'static str, &mut Option<String>)> {
        let slot = match flag {
            "--uri" | "-u" => ("--uri", &mut self.uri),
            "--db" | "-d" => ("--db", &mut self.database),
            "--collection" | "-c" => ("--collection", &mut self.collection),
            "--name-length" | "-n" => ("--name-length", &mut self.name_length),
            "--username" => ("--username", &mut self.username),
            "--password" => ("--password", &mut self.password),
            "--auth-source" => ("--auth-source", &mut self.auth_source),
            _ => return None,
        };
        Some(slot)
    }
}

impl DemoConfig {
    /// Build a config from command-line arguments (without the program name),
    /// falling back to `env` for anything not given as a flag.
    pub fn from_args<I, F>(args: I, env: F) -> Result<Command, ConfigError>
    where
        I: IntoIterator<Item = String>,
        F: Fn(&str) -> Option<String>,
    {
        let mut parsed = ParsedArgs::default();
        let mut iter = args.into_iter();
        while let Some(arg) = iter.next() {
            if arg == "--help" || arg == "-h" {
                return Ok(Command::Help);
            }
            if let Some((flag, value)) = arg.split_once('=') {
                if flag.starts_with("--") {
                    let (_, slot) = parsed
                        .slot(flag)
                        .ok_or_else(|| ConfigError::UnknownOption(flag.to_string()))?;
                    *slot = Some(value.to_string());
                    continue;
                }
            }
            if !arg.starts_with('-') {
                return Err(ConfigError::UnexpectedArgument(arg));
            }
            let (name, slot) = parsed
                .slot(&arg)
                .ok_or_else(|| ConfigError::UnknownOption(arg.clone()))?;
            let value = iter
                .next()
                .ok_or_else(|| ConfigError::MissingValue(name.to_string()))?;
            *slot = Some(value);
        }

        let pick = |flag: Option<String>, var: &str| {
            flag.or_else(|| env(var).filter(|v| !v.is_empty()))
        };

        let defaults = Self::default();
        let name_length = match pick(parsed.name_length, "MGSAMPLE_NAME_LENGTH") {
            Some(raw) => parse_length(&raw)?,
            None => defaults.name_length,
        };

        Ok(Command::Run(Self {
            uri: pick(parsed.uri, "MGSAMPLE_URI").unwrap_or(defaults.uri),
            database: pick(parsed.database, "MGSAMPLE_DB").unwrap_or(defaults.database),
            collection: pick(parsed.collection, "MGSAMPLE_COLLECTION").unwrap_or(defaults.collection),
            name_length,
            username: pick(parsed.username, "MGSAMPLE_USERNAME"),
            password: pick(parsed.password, "MGSAMPLE_PASSWORD"),
            auth_source: pick(parsed.auth_source, "MGSAMPLE_AUTH_SOURCE"),
        }))
    }
}

/// Reads that may be served by a secondary when one is available.
pub fn secondary_reads() -> SelectionCriteria {
    SelectionCriteria::ReadPreference(ReadPreference::SecondaryPreferred {
        options: Default::default(),
    })
}

/// Database settings overriding what the client would otherwise pass down.
pub fn database_options() -> DatabaseOptions {
    let mut options = DatabaseOptions::default();
    options.selection_criteria = Some(secondary_reads());
    options
}

pub fn collection_options() -> CollectionOptions {
    let mut options = CollectionOptions::default();
    options.selection_criteria = Some(secondary_reads());
    options
}

fn parse_length(raw: &str) -> Result<usize, ConfigError> {
    let invalid = || ConfigError::InvalidValue {
        option: "--name-length".to_string(),
        value: raw.to_string(),
    };
    let n: i64 = raw.trim().parse().map_err(|_| invalid())?;
    checked_length(n).map_err(|_| invalid())
}
