use super::ast::{BinOp, Expr};
use crate::format::format_number;
use std::fmt::Write as _;

/// Precedence of a binary operator; higher binds tighter.
fn precedence(op: BinOp) -> u8 {
    match op {
        BinOp::Add | BinOp::Sub => 1,
        BinOp::Mul | BinOp::Div => 2,
    }
}

fn op_str(op: BinOp) -> &'static str {
    match op {
        BinOp::Add => "+",
        BinOp::Sub => "-",
        BinOp::Mul => "*",
        BinOp::Div => "/",
    }
}

/// Render `expr` as canonical text: no redundant parentheses, no source
/// whitespace, numeric literals in their shortest round-trippable form.
pub(super) fn render(expr: &Expr) -> String {
    let mut out = String::new();
    write_expr(&mut out, expr, 0);
    out
}

fn write_expr(out: &mut String, expr: &Expr, parent_prec: u8) {
    match expr {
        Expr::Number(n) => {
            let _ = write!(out, "{}", format_number(*n));
        }
        Expr::Ref(pos) => {
            let _ = write!(out, "{pos}");
        }
        Expr::Neg(inner) => {
            out.push('-');
            write_expr(out, inner, 3);
        }
        Expr::BinOp(op, lhs, rhs) => {
            let prec = precedence(*op);
            let needs_parens = prec < parent_prec;
            if needs_parens {
                out.push('(');
            }
            write_expr(out, lhs, prec);
            out.push_str(op_str(*op));
            // The right operand of a left-associative operator needs parens
            // whenever its own top-level precedence would otherwise re-group
            // differently, so require strictly-greater precedence from it.
            write_expr(out, rhs, prec + 1);
            if needs_parens {
                out.push(')');
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::parse_formula;

    fn roundtrip(input: &str) -> String {
        parse_formula(input).unwrap().render()
    }

    #[test]
    fn drops_redundant_parens() {
        assert_eq!(roundtrip("(1 + 2)"), "1+2");
        assert_eq!(roundtrip("1 + (2 * 3)"), "1+2*3");
    }

    #[test]
    fn keeps_necessary_parens() {
        assert_eq!(roundtrip("(1 + 2) * 3"), "(1+2)*3");
        assert_eq!(roundtrip("1 - (2 - 3)"), "1-(2-3)");
        assert_eq!(roundtrip("1 / (2 / 3)"), "1/(2/3)");
    }

    #[test]
    fn drops_source_whitespace() {
        assert_eq!(roundtrip("1   +   2"), "1+2");
    }

    #[test]
    fn renders_unary_minus() {
        assert_eq!(roundtrip("-A1 + 2"), "-A1+2");
        assert_eq!(roundtrip("-(1 + 2)"), "-(1+2)");
    }
}
