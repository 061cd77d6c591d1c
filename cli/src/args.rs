use clap::{
    Arg, ArgAction, ArgMatches, Command, arg,
    error::ErrorKind,
    parser::ValueSource::DefaultValue,
    value_parser,
};
use serde::Deserialize;
use std::{ffi::OsString, fs, path::PathBuf};
use toml::from_str;

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Args {
    // NOTE: property names match config file fields
    pub logdir: Option<String>,
    #[serde(rename = "nologfiles")]
    pub no_log_files: bool,
    #[serde(rename = "loglevel")]
    pub log_level: String,
    /// Blocks are read and written as base64 text instead of raw protobuf
    pub base64: bool,
}

impl Default for Args {
    fn default() -> Self {
        Self { logdir: None, no_log_files: false, log_level: "info".into(), base64: false }
    }
}

impl Args {
    /// The directory log files go to, unless file logging is disabled
    pub fn log_dir(&self) -> Option<&str> {
        if self.no_log_files { None } else { self.logdir.as_deref() }
    }
}

/// The command to run, with the files it operates on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Validate { block: PathBuf, preimages: Option<PathBuf> },
    Preimages { block: PathBuf, attached: bool },
    Vanilla { block: PathBuf, output: PathBuf },
    Attach { block: PathBuf, preimages: PathBuf, output: PathBuf },
    Reinstate { block: PathBuf, preimages: PathBuf, output: PathBuf },
}

fn block_arg() -> Arg {
    Arg::new("block").value_name("BLOCK_FILE").required(true).value_parser(value_parser!(PathBuf)).help("Path of the block file.")
}

fn preimages_arg(required: bool) -> Arg {
    Arg::new("preimages")
        .short('p')
        .long("preimages")
        .value_name("PREIMAGES_FILE")
        .required(required)
        .value_parser(value_parser!(PathBuf))
        .help("Path of a preimage file holding one hex encoded value per line.")
}

fn output_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("OUTPUT_FILE")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Path of the block file to write.")
}

pub fn cli() -> Command {
    let defaults: Args = Default::default();

    Command::new("erasure")
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg(arg!(-C --configfile <CONFIG_FILE> "Path of config file."))
        .arg(arg!(--logdir <LOG_DIR> "Directory to log output."))
        .arg(arg!(--nologfiles "Disable logging to files."))
        .arg(
            Arg::new("log_level")
                .short('d')
                .long("loglevel")
                .env("ERASURE_LOG_LEVEL")
                .value_name("LEVEL")
                .default_value("info")
                .require_equals(true)
                .help("Logging level for all subsystems {off, error, warn, info, debug, trace}\n-- You may also specify <subsystem>=<level>,<subsystem2>=<level>,... to set the log level for individual subsystems.".to_string()),
        )
        .arg(
            Arg::new("base64")
                .long("base64")
                .env("ERASURE_BASE64")
                .action(ArgAction::SetTrue)
                .help(format!("Read and write blocks as base64 text instead of raw protobuf (default: {}).", defaults.base64)),
        )
        .subcommand(
            Command::new("validate")
                .about("Validate that every write of a block is backed by its preimage space")
                .arg(block_arg())
                .arg(preimages_arg(false).help("Attach the preimages of this file (one hex value per line) before validating.")),
        )
        .subcommand(
            Command::new("preimages")
                .about("Print the write values of a block, one hex value per line")
                .arg(block_arg())
                .arg(arg!(--attached "Print the attached preimage space instead of the write values.")),
        )
        .subcommand(Command::new("vanilla").about("Write the vanilla form of a block, with every write value cleared").arg(block_arg()).arg(output_arg()))
        .subcommand(
            Command::new("attach")
                .about("Attach a preimage space to a block")
                .arg(block_arg())
                .arg(preimages_arg(true))
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("reinstate")
                .about("Refill the cleared writes of a block, pairing writes and preimages by position")
                .arg(block_arg())
                .arg(preimages_arg(true))
                .arg(output_arg()),
        )
}

pub fn parse_args() -> (Args, Action) {
    match Args::parse(std::env::args_os()) {
        Ok(parsed) => parsed,
        Err(err) => err.exit(),
    }
}

impl Args {
    pub fn parse<I, T>(itr: I) -> Result<(Args, Action), clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let m: ArgMatches = cli().try_get_matches_from(itr)?;
        let mut defaults: Args = Default::default();

        if let Some(config_file) = m.get_one::<String>("configfile") {
            let config_str = fs::read_to_string(config_file)?;
            defaults = from_str(&config_str).map_err(|toml_error| {
                clap::Error::raw(ErrorKind::ValueValidation, format!("failed parsing config file, reason: {}", toml_error.message()))
            })?;
        }

        let args = Args {
            logdir: m.get_one::<String>("logdir").cloned().or(defaults.logdir),
            no_log_files: arg_match_unwrap_or::<bool>(&m, "nologfiles", defaults.no_log_files),
            log_level: arg_match_unwrap_or::<String>(&m, "log_level", defaults.log_level),
            base64: arg_match_unwrap_or::<bool>(&m, "base64", defaults.base64),
        };

        Ok((args, Action::from_matches(&m)?))
    }
}

impl Action {
    fn from_matches(m: &ArgMatches) -> Result<Action, clap::Error> {
        let action = match m.subcommand() {
            Some(("validate", sub)) => Action::Validate { block: required_path(sub, "block")?, preimages: sub.get_one::<PathBuf>("preimages").cloned() },
            Some(("preimages", sub)) => {
                Action::Preimages { block: required_path(sub, "block")?, attached: arg_match_unwrap_or::<bool>(sub, "attached", false) }
            }
            Some(("vanilla", sub)) => Action::Vanilla { block: required_path(sub, "block")?, output: required_path(sub, "output")? },
            Some(("attach", sub)) => Action::Attach {
                block: required_path(sub, "block")?,
                preimages: required_path(sub, "preimages")?,
                output: required_path(sub, "output")?,
            },
            Some(("reinstate", sub)) => Action::Reinstate {
                block: required_path(sub, "block")?,
                preimages: required_path(sub, "preimages")?,
                output: required_path(sub, "output")?,
            },
            _ => return Err(clap::Error::raw(ErrorKind::MissingSubcommand, "a command is required")),
        };
        Ok(action)
    }
}

fn required_path(m: &ArgMatches, arg_id: &str) -> Result<PathBuf, clap::Error> {
    m.get_one::<PathBuf>(arg_id)
        .cloned()
        .ok_or_else(|| clap::Error::raw(ErrorKind::MissingRequiredArgument, format!("missing required argument {arg_id}")))
}

fn arg_match_unwrap_or<T: Clone + Send + Sync + 'static>(m: &ArgMatches, arg_id: &str, default: T) -> T {
    m.get_one::<T>(arg_id).cloned().filter(|_| m.value_source(arg_id) != Some(DefaultValue)).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_parse_defaults() {
        let (args, action) = Args::parse(["erasure", "validate", "block.pb"]).unwrap();
        assert_eq!(args.log_level, "info");
        assert!(!args.base64);
        assert_eq!(args.log_dir(), None);
        assert_eq!(action, Action::Validate { block: "block.pb".into(), preimages: None });
    }

    #[test]
    fn test_parse_commands() {
        let (args, action) = Args::parse(["erasure", "--base64", "preimages", "--attached", "block.b64"]).unwrap();
        assert!(args.base64);
        assert_eq!(action, Action::Preimages { block: "block.b64".into(), attached: true });

        let (_, action) = Args::parse(["erasure", "attach", "block.pb", "-p", "values.hex", "-o", "out.pb"]).unwrap();
        assert_eq!(action, Action::Attach { block: "block.pb".into(), preimages: "values.hex".into(), output: "out.pb".into() });

        let (_, action) = Args::parse(["erasure", "vanilla", "block.pb", "--output", "vanilla.pb"]).unwrap();
        assert_eq!(action, Action::Vanilla { block: "block.pb".into(), output: "vanilla.pb".into() });

        assert!(Args::parse(["erasure", "attach", "block.pb", "-o", "out.pb"]).is_err());
        assert!(Args::parse(["erasure", "vanilla", "block.pb"]).is_err());
        assert!(Args::parse(["erasure"]).is_err());
    }

    #[test]
    fn test_config_file() {
        let file = config_file("loglevel = \"debug\"\nlogdir = \"/tmp/erasure-logs\"\nbase64 = true\n");
        let path = file.path().to_str().unwrap();

        let (args, _) = Args::parse(["erasure", "-C", path, "preimages", "block.b64"]).unwrap();
        assert_eq!(args.log_level, "debug");
        assert_eq!(args.log_dir(), Some("/tmp/erasure-logs"));
        assert!(args.base64);

        // Command line values override the file
        let (args, _) = Args::parse(["erasure", "-C", path, "--loglevel=warn", "--nologfiles", "preimages", "block.b64"]).unwrap();
        assert_eq!(args.log_level, "warn");
        assert_eq!(args.log_dir(), None);
    }

    #[test]
    fn test_invalid_config_file() {
        let file = config_file("unknown-field = 1\n");
        let path = file.path().to_str().unwrap();
        let err = Args::parse(["erasure", "-C", path, "validate", "block.pb"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }
}
