use anyhow::Context;
use calculon::{Session, SvgPlotter};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Once;

mod repl;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Seed for randomlyPick, for reproducible runs
  #[arg(long, global = true)]
  seed: Option<u64>,

  /// Directory rendered plots are written to
  #[arg(long, global = true, default_value = ".")]
  plot_dir: PathBuf,

  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Evaluate expressions in order, sharing one set of variables
  Eval {
    /// The expressions to evaluate, e.g. "x := 3" "x ^ 2"
    #[arg(required = true)]
    expressions: Vec<String>,
  },
  /// Start an interactive session (the default)
  Repl,
}

static TRACING_INIT: Once = Once::new();

/// Install a tracing subscriber when `RUST_LOG` is set, e.g.
/// `RUST_LOG=calculon=debug`.
fn init_tracing() {
  TRACING_INIT.call_once(|| {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    if std::env::var("RUST_LOG").is_ok() {
      tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(EnvFilter::from_default_env())
        .init();
    }
  });
}

/// Writes the SVG documents collected by a session to numbered files.
pub(crate) struct PlotWriter {
  dir: PathBuf,
  written: usize,
}

impl PlotWriter {
  pub(crate) fn new(dir: PathBuf) -> Self {
    Self { dir, written: 0 }
  }

  /// Write every plot rendered since the last call, returning the paths.
  pub(crate) fn flush(
    &mut self,
    session: &mut Session<SvgPlotter>,
  ) -> anyhow::Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for plot in session.plotter_mut().take_rendered() {
      self.written += 1;
      let path = self.dir.join(format!("plot-{}.svg", self.written));
      std::fs::write(&path, plot.svg).with_context(|| {
        format!("writing plot \"{}\" to {}", plot.title, path.display())
      })?;
      paths.push(path);
    }
    Ok(paths)
  }
}

fn main() -> anyhow::Result<()> {
  init_tracing();
  let cli = Cli::parse();

  if let Some(seed) = cli.seed {
    calculon::seed_rng(seed);
  }

  let mut session = Session::with_plotter(SvgPlotter::default());
  let mut plots = PlotWriter::new(cli.plot_dir);

  match cli.command.unwrap_or(Commands::Repl) {
    Commands::Eval { expressions } => {
      for expression in expressions {
        let result = session.interpret(&expression);
        for path in plots.flush(&mut session)? {
          eprintln!("Plot written to {}", path.display());
        }
        match result {
          Ok(result) => println!("{result}"),
          Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
          }
        }
      }
    }
    Commands::Repl => {
      repl::Repl::new(session, plots)?.run()?;
    }
  }

  Ok(())
}
