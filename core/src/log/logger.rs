use super::LogError;
use log::LevelFilter;
use log4rs::config::Logger;
use std::{collections::HashMap, env, mem};

#[derive(Clone)]
pub(super) struct LoggerSpec {
    pub name: String,
    pub level: LevelFilter,
    pub appenders: Vec<&'static str>,
}

impl LoggerSpec {
    pub fn new(name: String, level: LevelFilter, appenders: Vec<&'static str>) -> Self {
        Self { name, level, appenders }
    }

    pub fn logger(&self) -> Logger {
        Logger::builder().appenders(self.appenders.iter().map(|x| x.to_string())).build(self.name.clone(), self.level)
    }
}

pub(super) struct Loggers {
    loggers: Vec<LoggerSpec>,
    root_level: LevelFilter,
}

impl Loggers {
    pub fn root_level(&self) -> LevelFilter {
        self.root_level
    }

    pub fn items(&self) -> impl Iterator<Item = Logger> + '_ {
        self.loggers.iter().map(|x| x.logger())
    }
}

/// Collects `level` and `module=level` filter specs into log4rs loggers.
pub(super) struct Builder {
    appenders: Vec<&'static str>,
    loggers: HashMap<String, (Vec<&'static str>, LevelFilter)>,
    root_level: Option<LevelFilter>,
}

impl Builder {
    pub fn new() -> Builder {
        Builder { appenders: vec![], loggers: HashMap::new(), root_level: None }
    }

    pub fn parse_env(&mut self, env: &str) -> &mut Self {
        self.parse_expression(&env::var(env).unwrap_or_default())
    }

    pub fn parse_expression(&mut self, expression: &str) -> &mut Self {
        for spec in expression.split(',').map(|x| x.trim()) {
            if spec.is_empty() {
                continue;
            }
            match parse_spec(spec) {
                Ok((level, Some(name))) => {
                    self.logger(name.to_string(), level);
                }
                Ok((level, None)) => {
                    self.root_level(level);
                }
                Err(err) => eprintln!("Ignoring invalid logging spec '{}'", err),
            }
        }
        self
    }

    pub fn appenders(&mut self, appenders: impl Iterator<Item = &'static str>) -> &mut Self {
        self.appenders = appenders.collect();
        self
    }

    pub fn root_level(&mut self, root_level: LevelFilter) -> &mut Self {
        self.root_level.replace(root_level);
        self
    }

    pub fn logger(&mut self, name: String, level: LevelFilter) -> &mut Self {
        self.loggers.insert(name, (self.appenders.clone(), level));
        self
    }

    pub fn build(&mut self) -> Loggers {
        let loggers_map = mem::take(&mut self.loggers);
        let loggers =
            loggers_map.into_iter().map(|(name, (appenders, level))| LoggerSpec::new(name, level, appenders)).collect::<Vec<_>>();
        Loggers { loggers, root_level: self.root_level.take().unwrap_or(LevelFilter::Info) }
    }
}

fn parse_spec(spec: &str) -> Result<(LevelFilter, Option<&str>), LogError> {
    let mut parts = spec.split('=');
    match (parts.next(), parts.next().map(|x| x.trim()), parts.next()) {
        // A single level defines the root level, a single name enables the module at max level
        (Some(part0), None, None) => match part0.parse() {
            Ok(level) => Ok((level, None)),
            Err(_) => Ok((LevelFilter::max(), Some(part0))),
        },
        (Some(part0), Some(""), None) => Ok((LevelFilter::max(), Some(part0))),
        (Some(part0), Some(part1), None) => match part1.parse() {
            Ok(level) => Ok((level, Some(part0))),
            Err(_) => Err(LogError::ParseLoggerSpecError(part1.to_string())),
        },
        _ => Err(LogError::ParseLoggerSpecError(spec.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_spec() {
        assert_eq!(parse_spec("debug").unwrap(), (LevelFilter::Debug, None));
        assert_eq!(parse_spec("erasure_redaction").unwrap(), (LevelFilter::Trace, Some("erasure_redaction")));
        assert_eq!(parse_spec("erasure_redaction=warn").unwrap(), (LevelFilter::Warn, Some("erasure_redaction")));
        assert!(parse_spec("erasure_redaction=loud").is_err());
        assert!(parse_spec("a=b=c").is_err());
    }

    #[test]
    fn test_builder_expression() {
        let loggers = Builder::new()
            .appenders(["stderr"].into_iter())
            .parse_expression("warn, erasure_redaction=trace, ,erasure_cli=nonsense")
            .build();
        assert_eq!(loggers.root_level(), LevelFilter::Warn);
        assert_eq!(loggers.loggers.len(), 1);
        let spec = &loggers.loggers[0];
        assert_eq!(spec.name, "erasure_redaction");
        assert_eq!(spec.level, LevelFilter::Trace);
        assert_eq!(spec.appenders, vec!["stderr"]);
    }

    #[test]
    fn test_builder_default_root_level() {
        let loggers = Builder::new().parse_expression("").build();
        assert_eq!(loggers.root_level(), LevelFilter::Info);
        assert_eq!(loggers.items().count(), 0);
    }
}
