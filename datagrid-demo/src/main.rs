mod jobs;
mod server;
mod text;

use std::fs::File;
use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use datagrid::prelude::*;
use datagrid::view::PageTarget;
use simplelog::{Config, LevelFilter, WriteLogger};
use tokio::io::{AsyncBufReadExt, BufReader};

use server::SlowServer;

const HELP: &str = "\
commands:
  next | prev | first | last      move between pages
  page N                          jump to page N (1-based)
  sort N | sort+ N                sort by column N (1-based); sort+ adds a key
  search TEXT | regex TEXT        search (empty TEXT clears)
  length N                        rows per page
  draw reset|hold|page            redraw through the external handle
  help | quit";

#[derive(Debug, PartialEq)]
enum Command {
    Page(PageTarget),
    Sort { column: usize, multi: bool },
    Search { text: String, regex: bool },
    Length(String),
    Draw(DrawMode),
    Help,
    Quit,
}

fn one_based(arg: &str) -> Result<usize, String> {
    match arg.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(format!("expected a number from 1, got {arg:?}")),
    }
}

fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (name, arg) = line.split_once(' ').unwrap_or((line, ""));
    Ok(match name {
        "next" | "n" => Command::Page(PageTarget::Next),
        "prev" | "p" => Command::Page(PageTarget::Previous),
        "first" => Command::Page(PageTarget::First),
        "last" => Command::Page(PageTarget::Last),
        "page" => Command::Page(PageTarget::Page(one_based(arg)?)),
        "sort" => Command::Sort {
            column: one_based(arg)?,
            multi: false,
        },
        "sort+" => Command::Sort {
            column: one_based(arg)?,
            multi: true,
        },
        "search" => Command::Search {
            text: arg.to_string(),
            regex: false,
        },
        "regex" => Command::Search {
            text: arg.to_string(),
            regex: true,
        },
        "length" => Command::Length(arg.trim().to_string()),
        "draw" => Command::Draw(match arg.trim() {
            "reset" | "" => DrawMode::FullReset,
            "hold" => DrawMode::FullHold,
            "page" => DrawMode::Page,
            other => return Err(format!("unknown draw mode {other:?}")),
        }),
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => return Err(format!("unknown command {other:?} (try `help`)")),
    })
}

fn apply(grid: &DataGrid, handle: &Mutex<Option<GridHandle>>, command: Command) {
    let result = match command {
        Command::Page(target) => {
            grid.dispatch(&Action::Page(target), &UiEvent::Click(Modifiers::NONE))
        }
        Command::Sort { column, multi } => {
            let modifiers = if multi { Modifiers::SHIFT } else { Modifiers::NONE };
            grid.dispatch(&Action::Sort(column), &UiEvent::Click(modifiers))
        }
        Command::Search { text, regex } => {
            grid.engine().search(text, regex);
            EventResult::Consumed
        }
        Command::Length(value) => grid.dispatch(&Action::SetLength, &UiEvent::Change(value)),
        Command::Draw(mode) => {
            let drawn = handle
                .lock()
                .ok()
                .and_then(|guard| guard.as_ref().map(|h| h.draw(mode)))
                .unwrap_or(false);
            if drawn {
                EventResult::Consumed
            } else {
                EventResult::Ignored
            }
        }
        Command::Help => {
            println!("{HELP}");
            EventResult::Consumed
        }
        Command::Quit => EventResult::Consumed,
    };
    if !result.is_consumed() {
        println!("(nothing to do)");
    }
}

fn prompt() {
    print!("> ");
    let _ = std::io::stdout().flush();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut remote = false;
    let mut settings = Settings::default();
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--remote" => remote = true,
            "--settings" => {
                let path = args.next().ok_or("--settings needs a path")?;
                settings = Settings::from_json(&std::fs::read_to_string(path)?)?;
            }
            other => return Err(format!("unknown argument: {other}").into()),
        }
    }

    let source = if remote {
        DataSource::remote(SlowServer::new(
            jobs::rows(),
            jobs::columns(),
            Duration::from_millis(300),
        ))
    } else {
        DataSource::local(jobs::rows())
    };

    let handle: Arc<Mutex<Option<GridHandle>>> = Arc::default();
    let registered = Arc::clone(&handle);
    let config = GridConfig::builder(source, jobs::columns())
        .settings(settings)
        .row_key(|row, index| {
            row.get("id")
                .map_or_else(|| index.to_string(), ToString::to_string)
        })
        .order(OrderSpec::asc("name"))
        .on_handle(move |h| {
            if let Ok(mut guard) = registered.lock() {
                *guard = h;
            }
        })
        .on_error(|err| {
            log::error!("refresh failed: {err}");
            println!("error: {err}");
        })
        .build()?;

    let mut grid = DataGrid::new(config);
    let mut repaint = grid.subscribe();
    let _initial = grid.mount();
    log::info!("demo started (remote: {remote})");
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            Some(()) = repaint.recv() => {
                repaint.drain();
                print!("\n{}", text::paint(&grid.render()));
                prompt();
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if line.trim().is_empty() {
                    prompt();
                    continue;
                }
                match parse_command(&line) {
                    Ok(Command::Quit) => break,
                    Ok(command) => apply(&grid, &handle, command),
                    Err(message) => {
                        println!("{message}");
                        prompt();
                    }
                }
            }
        }
    }

    grid.unmount();
    log::info!("demo finished");
    Ok(())
}

#[tokio::main]
async fn main() {
    let log_file = File::create("datagrid-demo.log").expect("Failed to create log file");
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("page 3"), Ok(Command::Page(PageTarget::Page(2))));
        assert_eq!(
            parse_command("sort+ 2"),
            Ok(Command::Sort {
                column: 1,
                multi: true
            })
        );
        assert_eq!(
            parse_command("search san fran"),
            Ok(Command::Search {
                text: "san fran".into(),
                regex: false
            })
        );
        assert_eq!(parse_command("draw hold"), Ok(Command::Draw(DrawMode::FullHold)));
        assert!(parse_command("page 0").is_err());
        assert!(parse_command("jump").is_err());
    }
}
