use std::fs;
use std::path::PathBuf;

use ariadne::{Color, Label, Report, ReportKind, Source};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use arctos_post::config::{ConfigError, PostConfig};
use arctos_post::host::HostUi;
use arctos_post::parser::{self, ParseError};
use arctos_post::{replay, ArctosPost, RobotPost, ShowResult};

#[derive(Parser, Debug)]
#[command(
    name = "arctos-post",
    version,
    about = "Generate Arctos G-code from a host call script"
)]
struct Cli {
    /// Call script, one host call per line
    script: PathBuf,

    /// Folder the program is saved in
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Post configuration (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Program name (defaults to the script's prog_start name, then its file name)
    #[arg(long)]
    name: Option<String>,

    /// Always ask where to save
    #[arg(long)]
    ask: bool,

    /// Open the saved program, optionally with the given application
    #[arg(long, num_args = 0..=1, default_missing_value = "")]
    show: Option<String>,

    /// Print the program to stdout instead of saving it
    #[arg(long)]
    print: bool,
}

#[derive(Debug)]
enum Error {
    Io(std::io::Error),
    Parse(ParseError),
    Config(ConfigError),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Error::Parse(e)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => PostConfig::from_file(path)?,
        None => PostConfig::default(),
    };

    let source = fs::read_to_string(&cli.script)?;
    let script = match parser::parse_script(&source) {
        Ok(script) => script,
        Err(e) => {
            report(&cli.script.display().to_string(), &source, &e);
            return Err(e.into());
        }
    };

    let progname = cli
        .name
        .clone()
        .or_else(|| script.program_name().map(str::to_string))
        .or_else(|| {
            cli.script
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| "Program".to_string());

    let mut post = ArctosPost::new(config).with_host(host());
    replay::replay(&mut post, &script);
    info!(
        program = %progname,
        lines = post.program().lines.len(),
        "program generated"
    );

    if cli.print {
        print!("{}", post.program());
        if !post.log().is_empty() {
            eprint!("{}", post.log());
        }
        return Ok(());
    }

    let show = match cli.show {
        None => ShowResult::No,
        Some(app) if app.is_empty() => ShowResult::Default,
        Some(app) => ShowResult::Application(app),
    };

    match post.prog_save(&cli.out_dir, &progname, cli.ask, show)? {
        Some(path) => println!("Generated: {}", path.display()),
        None => eprintln!("No destination for {}, nothing saved", progname),
    }

    Ok(())
}

#[cfg(feature = "dialog")]
fn host() -> Box<dyn HostUi> {
    Box::new(arctos_post::host::DialogHost)
}

#[cfg(not(feature = "dialog"))]
fn host() -> Box<dyn HostUi> {
    Box::new(arctos_post::host::HeadlessHost)
}

/// Print a script error with its source location
fn report(path: &str, source: &str, err: &ParseError) {
    let span = err.span();
    let _ = Report::build(ReportKind::Error, path, span.start)
        .with_message("invalid call script")
        .with_label(
            Label::new((path, span))
                .with_message(err.to_string())
                .with_color(Color::Red),
        )
        .finish()
        .eprint((path, Source::from(source)));
}
