//! jfmc-par - recursive-descent parser turning a token stream into a
//! [`jfmc_ast::Program`], with panic-mode error recovery so one
//! malformed construct doesn't stop the rest of the file from being
//! checked.

mod expr;
mod item;
mod parser;
mod stmt;
mod types;

#[cfg(test)]
mod edge_cases;

use jfmc_ast::Program;
use jfmc_lex::Token;
use jfmc_util::Handler;

pub use item::parse_item;
pub use parser::{Parser, MAX_LIST_ITEMS, MAX_POSTFIX_CHAIN};
pub use stmt::{parse_block, parse_stmt, parse_top_level_stmt};
pub use types::parse_type;

/// Parses a whole token stream into a [`Program`]. Diagnostics for
/// malformed items are pushed onto `handler` and parsing continues
/// past them (each failed item synchronizes to the next likely
/// declaration boundary); the caller checks `handler.has_errors()` to
/// decide whether to proceed to semantic analysis.
pub fn parse_program(
    tokens: Vec<Token>,
    source: &str,
    file: impl Into<std::path::PathBuf>,
    handler: &Handler,
) -> Program {
    let mut p = Parser::new(tokens, source, file, handler);
    let mut items = Vec::new();
    let mut guard = 0usize;
    let mut stuck_at = None;

    while !p.is_at_end() {
        guard += 1;
        if guard > MAX_LIST_ITEMS {
            p.error("program too large or parser stuck in infinite loop");
            break;
        }

        let before = p.pos();
        if let Some(item) = parse_item(&mut p) {
            items.push(item);
        }

        if p.pos() == before {
            // No item parser consumed anything; force advancement so
            // the loop can't spin forever on a token nothing starts
            // from.
            if stuck_at == Some(before) {
                p.error("parser stuck at same position, forcing advance");
            }
            stuck_at = Some(before);
            p.advance();
        } else {
            stuck_at = None;
        }
    }

    Program { items }
}
