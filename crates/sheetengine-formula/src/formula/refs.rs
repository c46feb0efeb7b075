use super::ast::Expr;
use crate::position::Position;
use std::collections::BTreeSet;

/// Collect every position referenced by `expr`, sorted, deduplicated, and
/// filtered to those within grid bounds. Out-of-bounds positions appear in
/// the AST (and so still render correctly) but are dropped here: a formula
/// referencing them raises `#REF!` on evaluation rather than gaining a graph
/// edge to a position that could never hold a cell.
pub(super) fn collect(expr: &Expr) -> Vec<Position> {
    let mut seen = BTreeSet::new();
    walk(expr, &mut seen);
    seen.into_iter().collect()
}

fn walk(expr: &Expr, seen: &mut BTreeSet<Position>) {
    match expr {
        Expr::Number(_) => {}
        Expr::Ref(pos) => {
            if pos.is_valid() {
                seen.insert(*pos);
            }
        }
        Expr::Neg(inner) => walk(inner, seen),
        Expr::BinOp(_, lhs, rhs) => {
            walk(lhs, seen);
            walk(rhs, seen);
        }
    }
}
