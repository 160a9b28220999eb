//! # Commands Module
//!
//! One input line is one command. Parsing lives here; each family of
//! commands renders its own output.
//!
//! ## Command Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  catalog.rs            cart.rs                coupon.rs                 │
//! │  ──────────            ───────                ─────────                 │
//! │  list                  set <id> <qty>         coupon <code>             │
//! │  search [text]         add <id>               total                     │
//! │  sort <field> [dir]    remove <id>                                      │
//! │  reload                cart                                             │
//! │                        clear                                            │
//! │                        save / forget                                    │
//! │                                                                         │
//! │  help, quit                                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cart;
pub mod catalog;
pub mod coupon;

use std::str::FromStr;

use checkout_core::{SortDirection, SortField};
use checkout_engine::{CartEngine, CatalogLoader};
use checkout_store::KeyValueStore;

use crate::error::ApiError;
use crate::state::CheckoutConfig;

/// A parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    List,
    Search(String),
    Sort {
        field: SortField,
        direction: Option<SortDirection>,
    },
    Reload,
    ShowCart,
    Set { product_id: i64, quantity: i64 },
    Add(i64),
    Remove(i64),
    Clear,
    Save,
    Forget,
    Coupon(String),
    Total,
    Help,
    Quit,
}

/// What the shell should do after a command.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Print(String),
    Quit,
}

pub const HELP: &str = "\
Commands:
  list                      Show products matching the search, in sort order
  search [text]             Filter by name or id (no text clears the filter)
  sort <price|name|id> [asc|desc]
  set <id> <qty>            Set a quantity (clamped to stock)
  add <id>                  Add one unit
  remove <id>               Remove one unit
  cart                      Show products with a quantity
  clear                     Set every quantity to zero
  coupon <code>             Apply a coupon code
  total                     Show subtotal, discounts and total
  save                      Save the cart
  forget                    Delete the saved cart
  reload                    Fetch the catalog again and restore the saved cart
  help                      Show this message
  quit                      Exit";

impl FromStr for Command {
    type Err = ApiError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_start();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim_start()),
            None => (line, ""),
        };
        let args: Vec<&str> = rest.split_whitespace().collect();

        let command = match word.to_lowercase().as_str() {
            "list" | "ls" => Command::List,
            "search" | "find" => Command::Search(rest.trim_end().to_string()),
            "sort" => {
                let field = args
                    .first()
                    .ok_or_else(|| ApiError::validation("Usage: sort <price|name|id> [asc|desc]"))?
                    .parse()?;
                let direction = args.get(1).map(|d| d.parse()).transpose()?;
                Command::Sort { field, direction }
            }
            "reload" => Command::Reload,
            "cart" | "show" => Command::ShowCart,
            "set" => match args.as_slice() {
                [id, qty] => Command::Set {
                    product_id: parse_id(id)?,
                    quantity: parse_quantity(qty)?,
                },
                _ => return Err(ApiError::validation("Usage: set <id> <qty>")),
            },
            "add" | "+" => Command::Add(single_id(&args, "add")?),
            "remove" | "rm" | "-" => Command::Remove(single_id(&args, "remove")?),
            "clear" => Command::Clear,
            "save" => Command::Save,
            "forget" => Command::Forget,
            "coupon" => Command::Coupon(rest.trim_end().to_string()),
            "total" | "totals" => Command::Total,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            "" => return Err(ApiError::validation("Empty command")),
            other => {
                return Err(ApiError::validation(format!(
                    "Unknown command '{}'. Type 'help' for a list.",
                    other
                )))
            }
        };

        Ok(command)
    }
}

fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::validation(format!("'{}' is not a product id", raw)))
}

fn parse_quantity(raw: &str) -> Result<i64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::validation(format!("'{}' is not a whole number", raw)))
}

fn single_id(args: &[&str], name: &str) -> Result<i64, ApiError> {
    match args {
        [id] => parse_id(id),
        _ => Err(ApiError::validation(format!("Usage: {} <id>", name))),
    }
}

/// Runs one command against the session.
pub async fn execute<L, S>(
    engine: &mut CartEngine<L, S>,
    config: &CheckoutConfig,
    command: Command,
) -> Result<Outcome, ApiError>
where
    L: CatalogLoader,
    S: KeyValueStore,
{
    let text = match command {
        Command::List => catalog::list(engine, config),
        Command::Search(query) => catalog::search(engine, config, query),
        Command::Sort { field, direction } => catalog::sort(engine, config, field, direction),
        Command::Reload => catalog::reload(engine).await?,
        Command::ShowCart => cart::show(engine, config),
        Command::Set {
            product_id,
            quantity,
        } => cart::set(engine, config, product_id, quantity)?,
        Command::Add(product_id) => cart::add(engine, config, product_id)?,
        Command::Remove(product_id) => cart::remove(engine, config, product_id)?,
        Command::Clear => cart::clear(engine),
        Command::Save => cart::save(engine)?,
        Command::Forget => cart::forget(engine)?,
        Command::Coupon(code) => coupon::apply(engine, config, &code),
        Command::Total => coupon::totals(engine, config),
        Command::Help => HELP.to_string(),
        Command::Quit => return Ok(Outcome::Quit),
    };

    Ok(Outcome::Print(text))
}

#[cfg(test)]
pub(crate) mod test_support {
    use checkout_core::Product;
    use checkout_engine::{CartEngine, StaticLoader};
    use checkout_store::MemoryStore;

    use crate::state::CheckoutConfig;

    pub type TestEngine = CartEngine<StaticLoader, MemoryStore>;

    pub async fn engine() -> TestEngine {
        let loader = StaticLoader::new(vec![
            Product::new(1, "Notebook", 60_000, 3),
            Product::new(2, "Desk Lamp", 45_000, 10),
            Product::new(3, "Pencil", 2_500, 0),
        ]);
        let mut engine = CartEngine::new(loader, MemoryStore::new());
        engine.initialize().await.unwrap();
        engine
    }

    pub fn config() -> CheckoutConfig {
        CheckoutConfig::default()
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{config, engine};
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_parse_commands() {
        assert_eq!("list".parse::<Command>().unwrap(), Command::List);
        assert_eq!("  LS".parse::<Command>().unwrap(), Command::List);
        assert_eq!(
            "set 2 5".parse::<Command>().unwrap(),
            Command::Set {
                product_id: 2,
                quantity: 5
            }
        );
        assert_eq!(
            "set 2 -3".parse::<Command>().unwrap(),
            Command::Set {
                product_id: 2,
                quantity: -3
            }
        );
        assert_eq!("add 7".parse::<Command>().unwrap(), Command::Add(7));
        assert_eq!("- 7".parse::<Command>().unwrap(), Command::Remove(7));
        assert_eq!(
            "sort name desc".parse::<Command>().unwrap(),
            Command::Sort {
                field: SortField::Name,
                direction: Some(SortDirection::Desc)
            }
        );
        assert_eq!(
            "sort ID".parse::<Command>().unwrap(),
            Command::Sort {
                field: SortField::Id,
                direction: None
            }
        );
        assert_eq!("quit".parse::<Command>().unwrap(), Command::Quit);
    }

    #[test]
    fn test_search_keeps_inner_spaces() {
        assert_eq!(
            "search desk lamp".parse::<Command>().unwrap(),
            Command::Search("desk lamp".into())
        );
        assert_eq!(
            "search".parse::<Command>().unwrap(),
            Command::Search(String::new())
        );
    }

    #[test]
    fn test_coupon_code_is_passed_verbatim() {
        assert_eq!(
            "coupon New".parse::<Command>().unwrap(),
            Command::Coupon("New".into())
        );
    }

    #[test]
    fn test_parse_errors() {
        for line in ["", "frobnicate", "set 1", "set x 2", "set 1 two", "add", "sort", "sort size", "sort price up"] {
            let err = line.parse::<Command>().unwrap_err();
            assert_eq!(err.code, ErrorCode::ValidationError, "{line}");
        }
    }

    #[tokio::test]
    async fn test_execute_quit_and_help() {
        let mut engine = engine().await;
        let config = config();

        assert_eq!(
            execute(&mut engine, &config, Command::Quit).await.unwrap(),
            Outcome::Quit
        );
        assert_eq!(
            execute(&mut engine, &config, Command::Help).await.unwrap(),
            Outcome::Print(HELP.to_string())
        );
    }

    #[tokio::test]
    async fn test_execute_session_flow() {
        let mut engine = engine().await;
        let config = config();

        for line in ["set 1 3", "coupon New", "save"] {
            let command = line.parse().unwrap();
            execute(&mut engine, &config, command).await.unwrap();
        }

        let Outcome::Print(total) = execute(&mut engine, &config, Command::Total).await.unwrap() else {
            panic!("expected output");
        };
        assert!(total.contains("₹1440.00"), "{total}");
    }
}
