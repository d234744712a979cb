use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

const USAGE: &str = "usage: tintype <root> [--config=FILE] [--output=FILE] [--unload]
       tintype models [--config=FILE]";

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Classify(ClassifyConfig),
    Models(ModelsCommand),
}

#[derive(Debug, PartialEq, Eq)]
pub struct ClassifyConfig {
    pub root: PathBuf,
    pub config: Option<PathBuf>,
    pub output: PathBuf,
    pub unload: bool,
    pub extensions: Vec<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct ModelsCommand {
    pub config: Option<PathBuf>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum CliError {
    Help,
    MissingRoot,
    InvalidFlag(String),
}

impl Command {
    pub fn from_env() -> Result<Self, CliError> {
        Self::from_iter(env::args().skip(1))
    }

    pub fn from_iter<I>(args: I) -> Result<Self, CliError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        match args.next() {
            Some(first) if first == "models" => ModelsCommand::parse(args).map(Command::Models),
            Some(first) if first == "--help" || first == "-h" => Err(CliError::Help),
            Some(first) => {
                let mut rest = vec![first];
                rest.extend(args);
                ClassifyConfig::parse(rest.into_iter()).map(Command::Classify)
            }
            None => Err(CliError::Help),
        }
    }
}

impl ClassifyConfig {
    fn parse<I>(args: I) -> Result<Self, CliError>
    where
        I: Iterator<Item = String>,
    {
        let mut root: Option<PathBuf> = None;
        let mut config: Option<PathBuf> = None;
        let mut output: Option<PathBuf> = None;
        let mut unload = false;

        for arg in args {
            if arg.starts_with("--") {
                if arg == "--unload" {
                    unload = true;
                    continue;
                }
                if let Some(value) = arg.strip_prefix("--config=") {
                    config = Some(PathBuf::from(value));
                    continue;
                }
                if let Some(value) = arg.strip_prefix("--output=") {
                    output = Some(PathBuf::from(value));
                    continue;
                }
                if let Some(value) = arg.strip_prefix("--root=") {
                    root = Some(PathBuf::from(value));
                    continue;
                }
                return Err(CliError::InvalidFlag(arg));
            }

            if root.is_none() {
                root = Some(PathBuf::from(&arg));
                continue;
            }

            return Err(CliError::InvalidFlag(arg));
        }

        let root = root.ok_or(CliError::MissingRoot)?;

        Ok(Self {
            root,
            config,
            output: output.unwrap_or_else(|| PathBuf::from("classification-report.json")),
            unload,
            extensions: default_extensions(),
        })
    }
}

impl ModelsCommand {
    fn parse<I>(args: I) -> Result<Self, CliError>
    where
        I: Iterator<Item = String>,
    {
        let mut config: Option<PathBuf> = None;

        for arg in args {
            if let Some(value) = arg.strip_prefix("--config=") {
                config = Some(PathBuf::from(value));
                continue;
            }
            return Err(CliError::InvalidFlag(arg));
        }

        Ok(Self { config })
    }
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Help => write!(f, "{}", USAGE),
            Self::MissingRoot => write!(f, "root directory argument is required"),
            Self::InvalidFlag(flag) => write!(f, "unrecognized argument: {}", flag),
        }
    }
}

impl Error for CliError {}

fn default_extensions() -> Vec<String> {
    vec![
        "jpg".to_string(),
        "jpeg".to_string(),
        "png".to_string(),
        "bmp".to_string(),
        "webp".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_classify_root_only() {
        let command = Command::from_iter(vec![String::from("./photos")]).unwrap();
        match command {
            Command::Classify(config) => {
                assert_eq!(config.root, PathBuf::from("./photos"));
                assert!(config.config.is_none());
                assert_eq!(config.output, PathBuf::from("classification-report.json"));
                assert!(!config.unload);
                assert_eq!(config.extensions, default_extensions());
            }
            _ => panic!("expected classify command"),
        }
    }

    #[test]
    fn parses_classify_flags() {
        let command = Command::from_iter(vec![
            String::from("--root=./photos"),
            String::from("--config=./tintype.toml"),
            String::from("--output=./out.json"),
            String::from("--unload"),
        ])
        .unwrap();
        match command {
            Command::Classify(config) => {
                assert_eq!(config.root, PathBuf::from("./photos"));
                assert_eq!(config.config, Some(PathBuf::from("./tintype.toml")));
                assert_eq!(config.output, PathBuf::from("./out.json"));
                assert!(config.unload);
            }
            _ => panic!("expected classify command"),
        }
    }

    #[test]
    fn parses_models_command() {
        let command = Command::from_iter(vec![
            String::from("models"),
            String::from("--config=custom.toml"),
        ])
        .unwrap();
        match command {
            Command::Models(models) => {
                assert_eq!(models.config, Some(PathBuf::from("custom.toml")));
            }
            _ => panic!("expected models command"),
        }
    }

    #[test]
    fn rejects_unknown_flags() {
        let result = Command::from_iter(vec![String::from("--frobnicate")]);
        assert!(matches!(result, Err(CliError::InvalidFlag(_))));
    }

    #[test]
    fn no_arguments_prints_usage() {
        let result = Command::from_iter(Vec::new());
        assert_eq!(result, Err(CliError::Help));
    }
}
