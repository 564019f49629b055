// src/core/arg_parser.rs

use crate::constants::HELP_DESCRIPTION_COLUMN;
use crate::core::string_utils::{self, ConvertError, ParseValue};
use std::collections::HashMap;
use std::io::{self, Write};
use thiserror::Error;

/// Whether an option takes a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// A plain flag: `--verbose`.
    None,
    /// `--output FILE`, `--output=FILE` or `-oFILE`.
    Required,
    /// Only attached values are taken: `--level=3`, `-l3`.
    Optional,
}

/// Result of [`Args::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStatus {
    /// Everything required was given and recognized.
    Success,
    /// The command line was invalid; the reason went to the output.
    Error,
    /// `--help` was given and the help message was printed.
    HelpShown,
}

/// Failures when registering arguments or reading their values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgsError {
    /// A long name was registered twice.
    #[error("Option '--{0}' is already registered.")]
    DuplicateOption(String),
    /// A short name was registered twice.
    #[error("Short option '-{0}' is already registered.")]
    DuplicateShort(char),
    /// A positional name was registered twice.
    #[error("Positional argument '{0}' is already registered.")]
    DuplicatePositional(String),
    /// A required positional was added after an optional one.
    #[error("Required argument '{0}' cannot follow an optional one.")]
    RequiredAfterOptional(String),
    /// The argument was not on the command line.
    #[error("Argument '{0}' was not given.")]
    NotSet(String),
    /// The stored text does not convert to the requested type.
    #[error("Invalid value for '{name}': {source}")]
    Convert { name: String, source: ConvertError },
}

/// Problems found on the command line. Reported to the user, never returned.
#[derive(Error, Debug)]
enum UsageError {
    #[error("unrecognized option '--{0}'")]
    UnknownLong(String),
    #[error("option '--{name}' is ambiguous; possibilities: {candidates}")]
    Ambiguous { name: String, candidates: String },
    #[error("invalid option -- '{0}'")]
    UnknownShort(char),
    #[error("option '--{0}' requires an argument")]
    MissingValue(String),
    #[error("option '--{0}' doesn't allow an argument")]
    UnexpectedValue(String),
    #[error("option --{name} must be set to {label}")]
    InvalidEnumValue { name: String, label: String },
    #[error("option --{0} is required")]
    MissingOption(String),
    #[error("option <{0}> is required")]
    MissingPositional(String),
}

#[derive(Debug, Clone)]
struct OptionSpec {
    long: String,
    short: Option<char>,
    description: String,
    arity: Arity,
    required: bool,
    /// Legal values of an enum option, empty otherwise.
    choices: Vec<String>,
    /// Placeholder for the value in the help message.
    label: String,
}

#[derive(Debug, Clone)]
struct PositionalSpec {
    name: String,
    description: String,
    required: bool,
}

/// What a successful scan of the command line produced.
enum Scan {
    Parsed {
        options: HashMap<String, String>,
        positionals: HashMap<String, String>,
        ignored: Vec<String>,
    },
    Help,
}

/// A command-line parser following the GNU `getopt_long` conventions.
///
/// Options are registered up front, then [`Args::parse`] consumes the
/// argument vector once. Values are read back with the typed getters, using
/// the same conversion as [`string_utils::parse`].
///
/// ```
/// use utilkit::core::arg_parser::{Args, Arity, ParseStatus};
///
/// let mut args = Args::new("Copies a file.", true);
/// args.add_option("verbose", Some('v'), "Print more", Arity::None, false).unwrap();
/// args.add_positional("source", "File to copy", true).unwrap();
///
/// let status = args.parse(&["cp", "-v", "a.txt"], true);
/// assert_eq!(status, ParseStatus::Success);
/// assert!(args.get_flag("verbose", false));
/// assert_eq!(args.get_positional::<String>("source").unwrap(), "a.txt");
/// ```
#[derive(Debug)]
pub struct Args {
    description: String,
    add_help: bool,
    footer: String,
    options: Vec<OptionSpec>,
    positionals: Vec<PositionalSpec>,
    values: HashMap<String, String>,
    positional_values: HashMap<String, String>,
    parsed: bool,
}

impl Args {
    /// Creates an empty parser. With `add_help`, `--help`/`-h` is registered
    /// when parsing starts, unless those names are taken by then.
    pub fn new(description: impl Into<String>, add_help: bool) -> Self {
        Self {
            description: description.into(),
            add_help,
            footer: String::new(),
            options: Vec::new(),
            positionals: Vec::new(),
            values: HashMap::new(),
            positional_values: HashMap::new(),
            parsed: false,
        }
    }

    /// Registers an option. `required` makes `parse` fail when it is missing.
    pub fn add_option(
        &mut self,
        long: &str,
        short: Option<char>,
        description: &str,
        arity: Arity,
        required: bool,
    ) -> Result<(), ArgsError> {
        let label = match arity {
            Arity::None => String::new(),
            Arity::Required | Arity::Optional => value_label(long),
        };
        self.register(OptionSpec {
            long: long.to_string(),
            short,
            description: description.to_string(),
            arity,
            required,
            choices: Vec::new(),
            label,
        })
    }

    /// Registers an option whose value must be one of `values`.
    ///
    /// The stored value is the index of the matching entry, so
    /// `get::<usize>` yields the position in `values`.
    pub fn add_enum_option<S: AsRef<str>>(
        &mut self,
        long: &str,
        values: &[S],
        short: Option<char>,
        description: &str,
        required: bool,
    ) -> Result<(), ArgsError> {
        let choices: Vec<String> = values.iter().map(|v| v.as_ref().to_string()).collect();
        let label = format!("{{{}}}", string_utils::join(&choices, "|"));
        self.register(OptionSpec {
            long: long.to_string(),
            short,
            description: description.to_string(),
            arity: Arity::Required,
            required,
            choices,
            label,
        })
    }

    /// Registers the next positional argument. Optional positionals must come last.
    pub fn add_positional(
        &mut self,
        name: &str,
        description: &str,
        required: bool,
    ) -> Result<(), ArgsError> {
        if self.positionals.iter().any(|p| p.name == name) {
            return Err(ArgsError::DuplicatePositional(name.to_string()));
        }
        if required && self.positionals.last().is_some_and(|p| !p.required) {
            return Err(ArgsError::RequiredAfterOptional(name.to_string()));
        }

        self.positionals.push(PositionalSpec {
            name: name.to_string(),
            description: description.to_string(),
            required,
        });
        Ok(())
    }

    /// Free text printed after the option tables.
    pub fn set_help_footer(&mut self, text: impl Into<String>) {
        self.footer = text.into();
    }

    fn register(&mut self, spec: OptionSpec) -> Result<(), ArgsError> {
        if self.options.iter().any(|o| o.long == spec.long) {
            return Err(ArgsError::DuplicateOption(spec.long));
        }
        if let Some(short) = spec.short
            && self.options.iter().any(|o| o.short == Some(short))
        {
            return Err(ArgsError::DuplicateShort(short));
        }

        log::trace!("Registered option '--{}'", spec.long);
        self.options.push(spec);
        Ok(())
    }

    // --- Parsing ---

    /// Parses `argv`, whose first element is the program name.
    ///
    /// Help goes to standard output, errors and warnings to standard error.
    pub fn parse<S: AsRef<str>>(&mut self, argv: &[S], print_help_on_error: bool) -> ParseStatus {
        self.parse_with_output(
            argv,
            print_help_on_error,
            &mut io::stdout().lock(),
            &mut io::stderr().lock(),
        )
    }

    /// Like [`Args::parse`], writing help to `out` and diagnostics to `err`.
    pub fn parse_with_output<S: AsRef<str>>(
        &mut self,
        argv: &[S],
        print_help_on_error: bool,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> ParseStatus {
        if self.parsed {
            log::warn!("Command line arguments were already parsed");
            return ParseStatus::Error;
        }
        self.parsed = true;

        let program = argv.first().map_or("", AsRef::<str>::as_ref);
        if self.add_help {
            self.register_help();
        }

        match self.scan(argv) {
            Ok(Scan::Help) => {
                if let Err(e) = self.print_help(program, out) {
                    log::debug!("Writing the help message failed: {}", e);
                }
                ParseStatus::HelpShown
            }
            Ok(Scan::Parsed {
                options,
                positionals,
                ignored,
            }) => {
                if print_help_on_error {
                    for parameter in &ignored {
                        let _ = writeln!(err, "{}: ignoring unknown parameter \"{}\"", program, parameter);
                    }
                }
                log::debug!(
                    "Parsed {} option(s) and {} positional argument(s)",
                    options.len(),
                    positionals.len()
                );
                self.values = options;
                self.positional_values = positionals;
                ParseStatus::Success
            }
            Err(e) => {
                log::debug!("Command line rejected: {}", e);
                if print_help_on_error {
                    let _ = writeln!(err, "{}: {}", program, e);
                    if let Err(e) = self.print_help(program, err) {
                        log::debug!("Writing the help message failed: {}", e);
                    }
                }
                ParseStatus::Error
            }
        }
    }

    fn register_help(&mut self) {
        if self.options.iter().any(|o| o.long == "help") {
            return;
        }
        let short = (!self.options.iter().any(|o| o.short == Some('h'))).then_some('h');
        self.options.push(OptionSpec {
            long: "help".to_string(),
            short,
            description: "Show this help message".to_string(),
            arity: Arity::None,
            required: false,
            choices: Vec::new(),
            label: String::new(),
        });
    }

    /// Walks the argument vector. Options and positionals may be interleaved
    /// until `--`, after which everything is positional.
    fn scan<S: AsRef<str>>(&self, argv: &[S]) -> Result<Scan, UsageError> {
        let mut options = HashMap::new();
        let mut operands = Vec::new();
        let mut tokens = argv.iter().skip(1).map(AsRef::<str>::as_ref);
        let mut only_operands = false;

        while let Some(token) = tokens.next() {
            if only_operands {
                operands.push(token.to_string());
            } else if token == "--" {
                only_operands = true;
            } else if let Some(body) = token.strip_prefix("--") {
                let (name, attached) = match body.split_once('=') {
                    Some((name, value)) => (name, Some(value)),
                    None => (body, None),
                };
                let spec = self.find_long(name)?;
                let value = match (spec.arity, attached) {
                    (Arity::None, Some(_)) => {
                        return Err(UsageError::UnexpectedValue(spec.long.clone()));
                    }
                    (Arity::None, None) => String::new(),
                    (_, Some(value)) => value.to_string(),
                    (Arity::Required, None) => tokens
                        .next()
                        .ok_or_else(|| UsageError::MissingValue(spec.long.clone()))?
                        .to_string(),
                    (Arity::Optional, None) => String::new(),
                };
                store(&mut options, spec, value)?;
            } else if let Some(cluster) = token.strip_prefix('-')
                && !cluster.is_empty()
            {
                let mut chars = cluster.chars();
                while let Some(c) = chars.next() {
                    let spec = self.find_short(c)?;
                    let rest = chars.as_str();
                    let value = match spec.arity {
                        Arity::None => {
                            store(&mut options, spec, String::new())?;
                            continue;
                        }
                        Arity::Required if rest.is_empty() => tokens
                            .next()
                            .ok_or_else(|| UsageError::MissingValue(spec.long.clone()))?
                            .to_string(),
                        Arity::Required | Arity::Optional => rest.to_string(),
                    };
                    store(&mut options, spec, value)?;
                    break;
                }
            } else {
                operands.push(token.to_string());
            }
        }

        if self.add_help && options.contains_key("help") {
            return Ok(Scan::Help);
        }

        if let Some(missing) = self
            .options
            .iter()
            .find(|o| o.required && !options.contains_key(&o.long))
        {
            return Err(UsageError::MissingOption(missing.long.clone()));
        }

        let mut positionals = HashMap::new();
        let mut operands = operands.into_iter();
        for spec in &self.positionals {
            match operands.next() {
                Some(value) => {
                    positionals.insert(spec.name.clone(), value);
                }
                None if spec.required => {
                    return Err(UsageError::MissingPositional(spec.name.clone()));
                }
                None => break,
            }
        }

        Ok(Scan::Parsed {
            options,
            positionals,
            ignored: operands.collect(),
        })
    }

    /// Exact match first, otherwise a unique prefix.
    fn find_long(&self, name: &str) -> Result<&OptionSpec, UsageError> {
        if let Some(spec) = self.options.iter().find(|o| o.long == name) {
            return Ok(spec);
        }

        let candidates: Vec<&OptionSpec> = self
            .options
            .iter()
            .filter(|o| o.long.starts_with(name))
            .collect();
        match candidates.as_slice() {
            [spec] => {
                log::trace!("Expanded '--{}' to '--{}'", name, spec.long);
                Ok(spec)
            }
            [] => Err(UsageError::UnknownLong(name.to_string())),
            many => Err(UsageError::Ambiguous {
                name: name.to_string(),
                candidates: many
                    .iter()
                    .map(|o| format!("'--{}'", o.long))
                    .collect::<Vec<_>>()
                    .join(" "),
            }),
        }
    }

    fn find_short(&self, short: char) -> Result<&OptionSpec, UsageError> {
        self.options
            .iter()
            .find(|o| o.short == Some(short))
            .ok_or(UsageError::UnknownShort(short))
    }

    // --- Accessors ---

    /// Whether the option was given on the command line.
    pub fn is_set(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Whether the positional argument was given.
    pub fn is_set_positional(&self, name: &str) -> bool {
        self.positional_values.contains_key(name)
    }

    /// Converts the value of an option. Fails if the option was not given.
    pub fn get<T: ParseValue>(&self, name: &str) -> Result<T, ArgsError> {
        convert(&self.values, name)
    }

    /// Converts the value of an option, or returns `default` if it was not
    /// given or cannot be converted.
    pub fn get_or<T: ParseValue>(&self, name: &str, default: T) -> T {
        convert_or(&self.values, name, default)
    }

    /// Reads a flag: its presence inverts `default`.
    pub fn get_flag(&self, name: &str, default: bool) -> bool {
        if self.is_set(name) { !default } else { default }
    }

    /// Converts a positional argument. Fails if it was not given.
    pub fn get_positional<T: ParseValue>(&self, name: &str) -> Result<T, ArgsError> {
        convert(&self.positional_values, name)
    }

    /// Converts a positional argument, or returns `default`.
    pub fn get_positional_or<T: ParseValue>(&self, name: &str, default: T) -> T {
        convert_or(&self.positional_values, name, default)
    }

    // --- Help ---

    /// Writes the usage line, the description and the argument tables.
    pub fn print_help(&self, program: &str, out: &mut dyn Write) -> io::Result<()> {
        write!(out, "Usage: {}", program)?;
        for spec in &self.options {
            let name = match spec.short {
                Some(short) => format!("-{}", short),
                None => format!("--{}", spec.long),
            };
            let usage = format!("{}{}", name, argument_hint(spec));
            if spec.required {
                write!(out, " {}", usage)?;
            } else {
                write!(out, " [{}]", usage)?;
            }
        }
        for spec in &self.positionals {
            if spec.required {
                write!(out, " <{}>", spec.name)?;
            } else {
                write!(out, " [<{}>]", spec.name)?;
            }
        }
        writeln!(out)?;

        if !self.description.is_empty() {
            write!(out, "\n{}\n", self.description)?;
        }

        if !self.positionals.is_empty() {
            write!(out, "\narguments:\n")?;
            for spec in &self.positionals {
                write_row(out, &format!("  <{}>", spec.name), &spec.description)?;
            }
        }

        if !self.options.is_empty() {
            write!(out, "\noptional arguments:\n")?;
            for spec in &self.options {
                let short = spec.short.map(|s| format!("-{}, ", s)).unwrap_or_default();
                let left = format!("  {}--{}{}", short, spec.long, argument_hint(spec));
                write_row(out, &left, &spec.description)?;
            }
        }

        write!(out, "{}", self.footer)?;
        out.flush()
    }
}

// --- Helpers ---

/// Records an option value. Enum options store the index of the value.
fn store(
    options: &mut HashMap<String, String>,
    spec: &OptionSpec,
    value: String,
) -> Result<(), UsageError> {
    let value = if spec.choices.is_empty() {
        value
    } else {
        spec.choices
            .iter()
            .position(|choice| *choice == value)
            .ok_or_else(|| UsageError::InvalidEnumValue {
                name: spec.long.clone(),
                label: spec.label.clone(),
            })?
            .to_string()
    };
    options.insert(spec.long.clone(), value);
    Ok(())
}

fn convert<T: ParseValue>(values: &HashMap<String, String>, name: &str) -> Result<T, ArgsError> {
    let raw = values
        .get(name)
        .ok_or_else(|| ArgsError::NotSet(name.to_string()))?;
    T::parse_value(raw).map_err(|source| ArgsError::Convert {
        name: name.to_string(),
        source,
    })
}

fn convert_or<T: ParseValue>(values: &HashMap<String, String>, name: &str, default: T) -> T {
    if !values.contains_key(name) {
        return default;
    }
    match convert(values, name) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("{} Using the default value.", e);
            default
        }
    }
}

/// `output-file` is shown as `OUTPUT_FILE`.
fn value_label(long: &str) -> String {
    let mut label = long.replace('-', "_");
    string_utils::to_upper(&mut label);
    label
}

fn argument_hint(spec: &OptionSpec) -> String {
    match spec.arity {
        Arity::None => String::new(),
        Arity::Required => format!(" {}", spec.label),
        Arity::Optional => format!(" [{}]", spec.label),
    }
}

/// Writes `left` and aligns `description` to the description column,
/// moving it to its own line when `left` is too wide.
fn write_row(out: &mut dyn Write, left: &str, description: &str) -> io::Result<()> {
    let width = left.chars().count();
    if width >= HELP_DESCRIPTION_COLUMN {
        writeln!(out, "{}", left)?;
        writeln!(out, "{}{}", " ".repeat(HELP_DESCRIPTION_COLUMN), description)
    } else {
        writeln!(out, "{}{}", string_utils::pad_right(left, HELP_DESCRIPTION_COLUMN, ' '), description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Parses with captured output, returning the status and both streams.
    fn run(args: &mut Args, argv: &[&str]) -> (ParseStatus, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let status = args.parse_with_output(argv, true, &mut out, &mut err);
        (
            status,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    fn sample() -> Args {
        let mut args = Args::new("A test program.", true);
        args.add_option("verbose", Some('v'), "Print more", Arity::None, false)
            .unwrap();
        args.add_option("output", Some('o'), "Output file", Arity::Required, false)
            .unwrap();
        args.add_option("level", Some('l'), "Level", Arity::Optional, false)
            .unwrap();
        args.add_option("version", None, "Print the version", Arity::None, false)
            .unwrap();
        args
    }

    #[test]
    fn test_positionals_in_order() {
        let mut args = Args::new("", true);
        args.add_positional("test1", "", true).unwrap();
        args.add_positional("test2", "", true).unwrap();
        args.add_positional("test3", "", false).unwrap();

        let (status, _, _) = run(&mut args, &["prog", "a", "2"]);
        assert_eq!(status, ParseStatus::Success);
        assert_eq!(args.get_positional::<String>("test1").unwrap(), "a");
        assert_eq!(args.get_positional::<i32>("test2").unwrap(), 2);
        assert!(!args.is_set_positional("test3"));
        assert_eq!(args.get_positional_or("test3", 7), 7);
    }

    #[test]
    fn test_missing_required_positional() {
        let mut args = Args::new("", true);
        args.add_positional("input", "", true).unwrap();

        let (status, _, err) = run(&mut args, &["prog"]);
        assert_eq!(status, ParseStatus::Error);
        assert!(err.starts_with("prog: option <input> is required\n"));
        assert!(err.contains("Usage: prog"));
    }

    #[test]
    fn test_required_after_optional_is_rejected() {
        let mut args = Args::new("", true);
        args.add_positional("first", "", false).unwrap();
        assert_eq!(
            args.add_positional("second", "", true),
            Err(ArgsError::RequiredAfterOptional("second".to_string()))
        );
        assert!(args.add_positional("third", "", false).is_ok());
    }

    #[test]
    fn test_duplicates_are_rejected() {
        let mut args = sample();
        assert_eq!(
            args.add_option("verbose", None, "", Arity::None, false),
            Err(ArgsError::DuplicateOption("verbose".to_string()))
        );
        assert_eq!(
            args.add_option("other", Some('v'), "", Arity::None, false),
            Err(ArgsError::DuplicateShort('v'))
        );
        args.add_positional("file", "", true).unwrap();
        assert_eq!(
            args.add_positional("file", "", true),
            Err(ArgsError::DuplicatePositional("file".to_string()))
        );
    }

    #[test]
    fn test_option_forms() {
        let mut args = sample();
        let (status, _, _) = run(&mut args, &["prog", "--output=a.txt", "-l5", "--verbose"]);
        assert_eq!(status, ParseStatus::Success);
        assert_eq!(args.get::<String>("output").unwrap(), "a.txt");
        assert_eq!(args.get::<u32>("level").unwrap(), 5);
        assert!(args.get_flag("verbose", false));
        assert!(!args.is_set("version"));
    }

    #[test]
    fn test_separate_value_and_cluster() {
        let mut args = sample();
        let (status, _, _) = run(&mut args, &["prog", "-vo", "out.bin"]);
        assert_eq!(status, ParseStatus::Success);
        assert!(args.is_set("verbose"));
        assert_eq!(args.get::<String>("output").unwrap(), "out.bin");
    }

    #[test]
    fn test_optional_argument_without_value() {
        let mut args = sample();
        args.add_positional("file", "", false).unwrap();

        let (status, _, _) = run(&mut args, &["prog", "--level", "x"]);
        assert_eq!(status, ParseStatus::Success);
        assert!(args.is_set("level"));
        assert_eq!(args.get::<String>("level").unwrap(), "");
        assert_eq!(args.get_positional::<String>("file").unwrap(), "x");
    }

    #[test]
    fn test_flag_inverts_default() {
        let mut args = sample();
        let (status, _, _) = run(&mut args, &["prog", "--verbose"]);
        assert_eq!(status, ParseStatus::Success);
        assert!(args.get_flag("verbose", false));
        assert!(!args.get_flag("verbose", true));
        assert!(args.get_flag("version", true));
    }

    #[test]
    fn test_prefix_abbreviation() {
        let mut args = sample();
        let (status, _, _) = run(&mut args, &["prog", "--out", "f", "--verb"]);
        assert_eq!(status, ParseStatus::Success);
        assert_eq!(args.get::<String>("output").unwrap(), "f");
        assert!(args.is_set("verbose"));
    }

    #[test]
    fn test_ambiguous_prefix() {
        let mut args = sample();
        let (status, _, err) = run(&mut args, &["prog", "--ver"]);
        assert_eq!(status, ParseStatus::Error);
        assert!(err.contains("option '--ver' is ambiguous; possibilities: '--verbose' '--version'"));
    }

    #[test]
    fn test_unknown_option() {
        let mut args = sample();
        let (status, _, err) = run(&mut args, &["prog", "--nope"]);
        assert_eq!(status, ParseStatus::Error);
        assert!(err.starts_with("prog: unrecognized option '--nope'\n"));

        let mut args = sample();
        let (status, _, err) = run(&mut args, &["prog", "-x"]);
        assert_eq!(status, ParseStatus::Error);
        assert!(err.starts_with("prog: invalid option -- 'x'\n"));
    }

    #[test]
    fn test_silent_errors() {
        let mut args = sample();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let status = args.parse_with_output(&["prog", "--nope"], false, &mut out, &mut err);
        assert_eq!(status, ParseStatus::Error);
        assert!(out.is_empty());
        assert!(err.is_empty());
    }

    #[test]
    fn test_missing_value() {
        let mut args = sample();
        let (status, _, err) = run(&mut args, &["prog", "--output"]);
        assert_eq!(status, ParseStatus::Error);
        assert!(err.contains("option '--output' requires an argument"));
    }

    #[test]
    fn test_value_on_flag() {
        let mut args = sample();
        let (status, _, err) = run(&mut args, &["prog", "--verbose=yes"]);
        assert_eq!(status, ParseStatus::Error);
        assert!(err.contains("option '--verbose' doesn't allow an argument"));
    }

    #[test]
    fn test_enum_option() {
        let mut args = Args::new("", true);
        args.add_enum_option("mode", &["fast", "slow"], Some('m'), "Mode", true)
            .unwrap();

        let (status, _, _) = run(&mut args, &["prog", "--mode", "slow"]);
        assert_eq!(status, ParseStatus::Success);
        assert_eq!(args.get::<usize>("mode").unwrap(), 1);
    }

    #[test]
    fn test_enum_option_rejects_unknown_value() {
        let mut args = Args::new("", true);
        args.add_enum_option("mode", &["fast", "slow"], Some('m'), "Mode", true)
            .unwrap();

        let (status, _, err) = run(&mut args, &["prog", "-m", "medium"]);
        assert_eq!(status, ParseStatus::Error);
        assert!(err.starts_with("prog: option --mode must be set to {fast|slow}\n"));
    }

    #[test]
    fn test_missing_required_option() {
        let mut args = Args::new("", true);
        args.add_option("input", Some('i'), "", Arity::Required, true)
            .unwrap();

        let (status, _, err) = run(&mut args, &["prog"]);
        assert_eq!(status, ParseStatus::Error);
        assert!(err.starts_with("prog: option --input is required\n"));
    }

    #[test]
    fn test_help_wins_over_missing_options() {
        let mut args = Args::new("Does things.", true);
        args.add_option("input", Some('i'), "", Arity::Required, true)
            .unwrap();

        let (status, out, err) = run(&mut args, &["prog", "-h"]);
        assert_eq!(status, ParseStatus::HelpShown);
        assert!(out.starts_with("Usage: prog -i INPUT [-h]\n"));
        assert!(err.is_empty());
    }

    #[test]
    fn test_help_disabled() {
        let mut args = Args::new("", false);
        let (status, _, _) = run(&mut args, &["prog", "--help"]);
        assert_eq!(status, ParseStatus::Error);
    }

    #[test]
    fn test_help_keeps_user_short_option() {
        let mut args = Args::new("", true);
        args.add_option("host", Some('h'), "Host name", Arity::Required, false)
            .unwrap();

        let (status, _, _) = run(&mut args, &["prog", "-h", "example.org"]);
        assert_eq!(status, ParseStatus::Success);
        assert_eq!(args.get::<String>("host").unwrap(), "example.org");
        assert!(!args.is_set("help"));
    }

    #[test]
    fn test_extra_positionals_are_ignored() {
        let mut args = Args::new("", true);
        args.add_positional("file", "", true).unwrap();

        let (status, _, err) = run(&mut args, &["prog", "a", "b"]);
        assert_eq!(status, ParseStatus::Success);
        assert_eq!(args.get_positional::<String>("file").unwrap(), "a");
        assert_eq!(err, "prog: ignoring unknown parameter \"b\"\n");
    }

    #[test]
    fn test_double_dash_and_permutation() {
        let mut args = sample();
        args.add_positional("first", "", true).unwrap();
        args.add_positional("second", "", true).unwrap();

        let (status, _, _) = run(&mut args, &["prog", "one", "-v", "--", "-o"]);
        assert_eq!(status, ParseStatus::Success);
        assert!(args.is_set("verbose"));
        assert!(!args.is_set("output"));
        assert_eq!(args.get_positional::<String>("first").unwrap(), "one");
        assert_eq!(args.get_positional::<String>("second").unwrap(), "-o");
    }

    #[test]
    fn test_lone_dash_is_positional() {
        let mut args = Args::new("", true);
        args.add_positional("input", "", true).unwrap();

        let (status, _, _) = run(&mut args, &["prog", "-"]);
        assert_eq!(status, ParseStatus::Success);
        assert_eq!(args.get_positional::<String>("input").unwrap(), "-");
    }

    #[test]
    fn test_second_parse_fails() {
        let mut args = sample();
        let (status, _, _) = run(&mut args, &["prog", "-v"]);
        assert_eq!(status, ParseStatus::Success);

        let (status, _, _) = run(&mut args, &["prog"]);
        assert_eq!(status, ParseStatus::Error);
        assert!(args.is_set("verbose"));
    }

    #[test]
    fn test_getters() {
        let mut args = sample();
        let (status, _, _) = run(&mut args, &["prog", "-o", "abc"]);
        assert_eq!(status, ParseStatus::Success);

        assert_eq!(
            args.get::<String>("level"),
            Err(ArgsError::NotSet("level".to_string()))
        );
        assert!(matches!(
            args.get::<i32>("output"),
            Err(ArgsError::Convert { .. })
        ));
        assert_eq!(args.get_or("output", 3), 3);
        assert_eq!(args.get_or("level", 4), 4);
    }

    #[test]
    fn test_help_message() {
        let mut args = Args::new("Converts things.", true);
        args.add_option("output-file", Some('o'), "Where to write", Arity::Required, true)
            .unwrap();
        args.add_option("level", None, "Compression level", Arity::Optional, false)
            .unwrap();
        args.add_enum_option("mode", &["a", "b"], None, "Mode", false)
            .unwrap();
        args.add_positional("input", "Input file", true).unwrap();
        args.add_positional("extra", "Extra file", false).unwrap();
        args.set_help_footer("See the manual.\n");

        let (status, out, _) = run(&mut args, &["conv", "--help"]);
        assert_eq!(status, ParseStatus::HelpShown);

        let expected = "\
Usage: conv -o OUTPUT_FILE [--level [LEVEL]] [--mode {a|b}] [-h] <input> [<extra>]

Converts things.

arguments:
  <input>                     Input file
  <extra>                     Extra file

optional arguments:
  -o, --output-file OUTPUT_FILE
                              Where to write
  --level [LEVEL]             Compression level
  --mode {a|b}                Mode
  -h, --help                  Show this help message
See the manual.
";
        assert_eq!(out, expected);
    }
}
