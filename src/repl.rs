//! Interactive read-eval-print loop.

use calculon::{Session, SvgPlotter};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::PlotWriter;

const PROMPT: &str = "> ";

pub struct Repl {
  editor: DefaultEditor,
  session: Session<SvgPlotter>,
  plots: PlotWriter,
}

impl Repl {
  pub fn new(
    session: Session<SvgPlotter>,
    plots: PlotWriter,
  ) -> anyhow::Result<Self> {
    Ok(Self {
      editor: DefaultEditor::new()?,
      session,
      plots,
    })
  }

  pub fn run(&mut self) -> anyhow::Result<()> {
    println!("calculon {}", env!("CARGO_PKG_VERSION"));
    println!("Type :help for help, :quit to exit.\n");

    loop {
      match self.editor.readline(PROMPT) {
        Ok(line) => {
          let line = line.trim();
          if line.is_empty() {
            continue;
          }
          let _ = self.editor.add_history_entry(line);

          if line.starts_with(':') {
            if self.handle_command(line) {
              break;
            }
            continue;
          }

          self.eval_input(line)?;
        }
        Err(ReadlineError::Interrupted) => {
          println!("^C");
          continue;
        }
        Err(ReadlineError::Eof) => break,
        Err(err) => return Err(err.into()),
      }
    }

    Ok(())
  }

  fn eval_input(&mut self, line: &str) -> anyhow::Result<()> {
    let result = self.session.interpret(line);
    for path in self.plots.flush(&mut self.session)? {
      println!("Plot written to {}", path.display());
    }
    match result {
      Ok(result) => println!("{result}"),
      Err(e) => eprintln!("Error: {e}"),
    }
    Ok(())
  }

  /// Returns true when the REPL should exit.
  fn handle_command(&mut self, line: &str) -> bool {
    match line {
      ":quit" | ":q" => return true,
      ":vars" => {
        let variables = self.session.variables();
        if variables.is_empty() {
          println!("(no variables)");
        }
        for name in variables.names() {
          if let Some(value) = variables.get(name) {
            println!("{name} := {value}");
          }
        }
      }
      ":clear" => {
        self.session.clear_variables();
        println!("Variables cleared.");
      }
      ":help" => {
        println!("Enter an expression, for example:");
        println!("  x := 3");
        println!("  simplify(x * y + 2 * 3)");
        println!("  toDouble(sin(x))");
        println!("  for(0, 10, i, 1, i ^ 2)");
        println!("  plot(x ^ 2, x, -2, 2, 0.1)");
        println!();
        println!("Commands:");
        println!("  :vars   list variables");
        println!("  :clear  remove all variables");
        println!("  :quit   exit");
      }
      other => println!("Unknown command: {other}"),
    }
    false
  }
}
