//! Shell command parsing.
//!
//! One command per line, whitespace separated. Names (finishes, items,
//! brands, sizes) take the rest of the line so they may contain spaces.
//! Numeric row inputs are kept as raw text; the row decides how to coerce
//! them.

use anyhow::{anyhow, bail, Context, Result};
use quote_core::numeric::coerce_input;
use quote_core::rows::RowId;
use quote_core::{Category, ServicesTotals};

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add(Category),
    Remove(Category, RowId),
    Finish(Category, RowId, String),
    Length(Category, RowId, String),
    Height(Category, RowId, String),
    Item(Category, RowId, String),
    Brand(Category, RowId, String),
    Size(Category, RowId, String),
    Quantity(Category, RowId, String),
    Services(ServicesTotals),
    Show,
    Summary,
    Json,
    Catalog,
    Export,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  add <cat>                      add a row, prints its id
  rm <cat> <id>                  remove a row
  finish <cat> <id> <name>       choose a finish (wood rows)
  len <cat> <id> <value>         set length (wood rows)
  height <cat> <id> <value>      set height (wood rows)
  item <cat> <id> <name>         choose an accessory (accessory rows)
  brand <cat> <id> <brand>       choose a brand (accessory rows)
  size <cat> <id> <size>         choose a size (accessory rows)
  qty <cat> <id> <value>         set quantity (accessory rows)
  services <excl> <incl> <discount> <handling>
                                 set services totals (GST excl/incl)
  show                           list rows and totals
  summary                        print the summary table
  json                           print totals as JSON
  catalog                        list catalog options
  export                         write the summary workbook
  help                           this text
  quit                           leave
Categories: wardrobe-wood, wardrobe-acc, kitchen-wood, kitchen-acc";

/// Parse one input line. Blank lines give `Ok(None)`.
pub fn parse(line: &str) -> Result<Option<Command>> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let command = match verb.to_ascii_lowercase().as_str() {
        "add" => {
            expect_args(verb, &args, 1)?;
            Command::Add(category(args[0])?)
        }
        "rm" | "remove" => {
            expect_args(verb, &args, 2)?;
            Command::Remove(category(args[0])?, row_id(args[1])?)
        }
        "finish" => row_text(verb, &args, line, Command::Finish)?,
        "len" | "length" => row_value(verb, &args, Command::Length)?,
        "height" => row_value(verb, &args, Command::Height)?,
        "item" => row_text(verb, &args, line, Command::Item)?,
        "brand" => row_text(verb, &args, line, Command::Brand)?,
        "size" => row_text(verb, &args, line, Command::Size)?,
        "qty" | "quantity" => row_value(verb, &args, Command::Quantity)?,
        "services" => {
            expect_args(verb, &args, 4)?;
            Command::Services(ServicesTotals {
                without_gst: coerce_input(args[0]),
                with_gst: coerce_input(args[1]),
                discount_total: coerce_input(args[2]),
                handling_fee: coerce_input(args[3]),
            })
        }
        "show" | "ls" => Command::Show,
        "summary" => Command::Summary,
        "json" => Command::Json,
        "catalog" => Command::Catalog,
        "export" => Command::Export,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => bail!("unknown command '{}' (try 'help')", other),
    };
    Ok(Some(command))
}

fn expect_args(verb: &str, args: &[&str], count: usize) -> Result<()> {
    if args.len() != count {
        bail!("'{}' takes {} argument(s), got {}", verb, count, args.len());
    }
    Ok(())
}

fn category(token: &str) -> Result<Category> {
    Ok(token.parse::<Category>()?)
}

fn row_id(token: &str) -> Result<RowId> {
    token
        .parse::<RowId>()
        .with_context(|| format!("'{}' is not a row id", token))
}

/// `<verb> <cat> <id> <single value>`
fn row_value(verb: &str, args: &[&str], build: fn(Category, RowId, String) -> Command) -> Result<Command> {
    expect_args(verb, args, 3)?;
    Ok(build(category(args[0])?, row_id(args[1])?, args[2].to_string()))
}

/// `<verb> <cat> <id> <name with spaces>`
///
/// The name is the rest of `line` as typed, so inner spacing survives.
fn row_text(
    verb: &str,
    args: &[&str],
    line: &str,
    build: fn(Category, RowId, String) -> Command,
) -> Result<Command> {
    if args.len() < 3 {
        return Err(anyhow!("'{}' needs a category, a row id and a name", verb));
    }
    let name = skip_words(line, 3);
    Ok(build(category(args[0])?, row_id(args[1])?, name.to_string()))
}

/// Remainder of `line` after its first `count` words, outer whitespace trimmed.
fn skip_words(line: &str, count: usize) -> &str {
    let mut rest = line.trim();
    for _ in 0..count {
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        rest = rest[end..].trim_start();
    }
    rest
}
