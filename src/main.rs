use calc::{eval, parse_str};
use std::io::{self, BufRead, Write};
use std::process;
use structopt::StructOpt;

#[derive(StructOpt)]
#[structopt(about = "exact rational calculator for sums and differences")]
struct Options {
    #[structopt(subcommand)]
    command: Option<Command>,
}

#[derive(StructOpt)]
enum Command {
    /// Evaluate expressions read from stdin, one per line
    Repl {
        /// Stop at the first line that fails
        #[structopt(long)]
        strict: bool,
        /// Print the syntax tree before each result
        #[structopt(long)]
        tree: bool,
        #[structopt(long, default_value = "> ")]
        prompt: String,
    },
    /// Evaluate a single expression
    Eval {
        expression: String,
        #[structopt(long)]
        tree: bool,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Repl {
            strict: false,
            tree: false,
            prompt: "> ".to_string(),
        }
    }
}

fn render(input: &str, tree: bool) -> Result<String, calc::Error> {
    let ast = parse_str(input)?;
    let value = eval::evaluate(&ast)?;
    if tree {
        Ok(format!("{}{}", ast.dump(), value))
    } else {
        Ok(value.to_string())
    }
}

fn prompt(stdout: &mut impl Write, prompt: &str) -> io::Result<()> {
    write!(stdout, "{}", prompt)?;
    stdout.flush()
}

// Returns false if a line failed and the loop gave up because of it.
fn repl(strict: bool, tree: bool, prompt_text: &str) -> io::Result<bool> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    prompt(&mut stdout, prompt_text)?;
    for line in stdin.lock().lines() {
        let line = line?;
        if !line.trim().is_empty() {
            match render(&line, tree) {
                Ok(output) => writeln!(stdout, "{}", output)?,
                Err(error) => {
                    eprintln!("error: {}", error);
                    if strict {
                        return Ok(false);
                    }
                }
            }
        }
        prompt(&mut stdout, prompt_text)?;
    }
    writeln!(stdout)?;
    Ok(true)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let options = Options::from_args();
    let succeeded = match options.command.unwrap_or_default() {
        Command::Repl {
            strict,
            tree,
            prompt,
        } => match repl(strict, tree, &prompt) {
            Ok(succeeded) => succeeded,
            Err(error) => {
                eprintln!("error reading input: {}", error);
                false
            }
        },
        Command::Eval { expression, tree } => match render(&expression, tree) {
            Ok(output) => {
                println!("{}", output);
                true
            }
            Err(error) => {
                eprintln!("error: {}", error);
                false
            }
        },
    };

    if !succeeded {
        process::exit(1);
    }
}
