//! Textual and TeX rendering of expressions.
//!
//! Both renderings are purely structural. An operand is wrapped in grouping marks when it binds
//! more weakly than its parent, or equally strongly and on the right-hand side, so that the text
//! rendering of a parsed expression parses back to the same tree.

use std::fmt::{Display, Formatter, Result};
use crate::node::{Binary, BinaryKind, Call, Expr, Level, Nary, NaryKind, Term, Unary, UnaryKind};

/// A trait for types that can be formatted as LaTeX.
pub trait Latex {
    /// Format the value as LaTeX.
    fn fmt_latex(&self, f: &mut Formatter) -> Result;

    /// Wraps the value in a [`LatexFormatter`], which implements [`Display`].
    fn as_display(&self) -> LatexFormatter<'_, Self> {
        LatexFormatter(self)
    }

    /// Renders the value as a LaTeX string.
    fn to_tex(&self) -> String {
        self.as_display().to_string()
    }
}

/// A wrapper type that implements [`Display`] for any type that implements [`Latex`].
pub struct LatexFormatter<'a, T: ?Sized>(&'a T);

impl<T: ?Sized> Display for LatexFormatter<'_, T>
where
    T: Latex,
{
    fn fmt(&self, f: &mut Formatter) -> Result {
        self.0.fmt_latex(f)
    }
}

/// Which operand slot of a parent an expression occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// The side of the `index`-th operand of an n-ary node.
    fn of_index(index: usize) -> Self {
        if index == 0 {
            Side::Left
        } else {
            Side::Right
        }
    }
}

/// Returns true if `child`, rendered as the `side` operand of a parent binding at `parent`, must
/// be wrapped in grouping marks.
pub fn needs_group(parent: Level, child: &Expr, side: Side) -> bool {
    // a sign prefix takes everything to its right at the level it appears in
    if let Expr::Binary(Binary { op, rhs, .. }) = child {
        if op.implicit {
            return parent > Level::Subtraction
                && (side == Side::Left || rhs.level() <= parent);
        }
    }

    let level = child.level();
    level < parent || (level == parent && side == Side::Right)
}

/// Returns true if one of `count` call arguments must be wrapped in grouping marks.
fn arg_needs_group(arg: &Expr, count: usize) -> bool {
    match arg.level() {
        Level::Sequence => true,
        Level::Equality => count > 1,
        _ => false,
    }
}

/// Formats a number the way it would be typed: integral values without a fractional part, other
/// values in their shortest round-trip form.
pub fn fmt_number(f: &mut Formatter, n: f64) -> Result {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        write!(f, "{}", n as i64)
    } else {
        write!(f, "{}", n)
    }
}

/// Formats an operand, wrapping it in parentheses if needed.
fn fmt_operand(f: &mut Formatter, parent: Level, child: &Expr, side: Side) -> Result {
    if needs_group(parent, child, side) {
        write!(f, "({})", child)
    } else {
        write!(f, "{}", child)
    }
}

/// Formats an operand as LaTeX, wrapping it in `\left(` and `\right)` if needed.
fn fmt_operand_latex(f: &mut Formatter, parent: Level, child: &Expr, side: Side) -> Result {
    if needs_group(parent, child, side) {
        write!(f, "\\left({}\\right)", child.as_display())
    } else {
        child.fmt_latex(f)
    }
}

impl Display for Term {
    fn fmt(&self, f: &mut Formatter) -> Result {
        fmt_operand(f, Level::Multiplication, &self.constant, Side::Left)?;
        write!(f, "*")?;
        fmt_operand(f, Level::Multiplication, &self.coefficient, Side::Right)?;
        write!(f, "*")?;
        fmt_operand(f, Level::Multiplication, &self.unknown, Side::Right)
    }
}

impl Display for Unary {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self.op {
            UnaryKind::Positive => write!(f, "+({})", self.operand),
            UnaryKind::Negative => write!(f, "-({})", self.operand),
            UnaryKind::Inverse => write!(f, "1/({})", self.operand),
            UnaryKind::Parenthesized => write!(f, "({})", self.operand),
            UnaryKind::Bracketed => write!(f, "[{}]", self.operand),
        }
    }
}

impl Display for Binary {
    fn fmt(&self, f: &mut Formatter) -> Result {
        if self.op.implicit {
            write!(f, "{}", self.op.kind.tag())?;
            return fmt_operand(f, Level::Subtraction, &self.rhs, Side::Right);
        }

        let level = self.op.kind.level();
        fmt_operand(f, level, &self.lhs, Side::Left)?;
        match self.op.kind {
            BinaryKind::Root => write!(f, " v ")?,
            kind => write!(f, "{}", kind.tag())?,
        }
        fmt_operand(f, level, &self.rhs, Side::Right)
    }
}

impl Display for Nary {
    fn fmt(&self, f: &mut Formatter) -> Result {
        if self.children.is_empty() {
            return match self.kind {
                NaryKind::Sum => write!(f, "0"),
                NaryKind::Product => write!(f, "1"),
                NaryKind::Sequence => Ok(()),
            };
        }

        let level = self.kind.level();
        for (i, child) in self.children.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", self.kind.tag())?;
            }
            fmt_operand(f, level, child, Side::of_index(i))?;
        }
        Ok(())
    }
}

impl Display for Call {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "{}(", self.name)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            if arg_needs_group(arg, self.args.len()) {
                write!(f, "({})", arg)?;
            } else {
                write!(f, "{}", arg)?;
            }
        }
        write!(f, ")")
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            Expr::Constant(n) => fmt_number(f, *n),
            Expr::Coefficient(symbol) | Expr::UnknownTerm(symbol) => write!(f, "{}", symbol.name),
            Expr::Term(term) => Display::fmt(term, f),
            Expr::Unary(unary) => Display::fmt(unary, f),
            Expr::Binary(binary) => Display::fmt(binary, f),
            Expr::Nary(nary) => Display::fmt(nary, f),
            Expr::Call(call) => Display::fmt(call, f),
        }
    }
}

/// Formats a number as LaTeX.
fn fmt_number_latex(f: &mut Formatter, n: f64) -> Result {
    if n.is_nan() {
        write!(f, "\\mathrm{{NaN}}")
    } else if n == f64::INFINITY {
        write!(f, "\\infty")
    } else if n == f64::NEG_INFINITY {
        write!(f, "-\\infty")
    } else {
        fmt_number(f, n)
    }
}

impl Latex for Term {
    fn fmt_latex(&self, f: &mut Formatter) -> Result {
        fmt_operand_latex(f, Level::Multiplication, &self.constant, Side::Left)?;
        fmt_operand_latex(f, Level::Multiplication, &self.coefficient, Side::Right)?;
        fmt_operand_latex(f, Level::Multiplication, &self.unknown, Side::Right)
    }
}

impl Latex for Unary {
    fn fmt_latex(&self, f: &mut Formatter) -> Result {
        let operand = self.operand.as_display();
        match self.op {
            UnaryKind::Positive => write!(f, "+\\left({}\\right)", operand),
            UnaryKind::Negative => write!(f, "-\\left({}\\right)", operand),
            UnaryKind::Inverse => write!(f, "\\frac{{1}}{{{}}}", self.operand.innermost().as_display()),
            UnaryKind::Parenthesized => write!(f, "\\left({}\\right)", operand),
            UnaryKind::Bracketed => write!(f, "\\left[{}\\right]", operand),
        }
    }
}

impl Latex for Binary {
    fn fmt_latex(&self, f: &mut Formatter) -> Result {
        if self.op.implicit {
            write!(f, "{}", self.op.kind.tag())?;
            return fmt_operand_latex(f, Level::Subtraction, &self.rhs, Side::Right);
        }

        let level = self.op.kind.level();
        match self.op.kind {
            BinaryKind::Division => write!(
                f,
                "\\frac{{{}}}{{{}}}",
                self.lhs.innermost().as_display(),
                self.rhs.innermost().as_display(),
            ),
            BinaryKind::Power => {
                write!(f, "{{")?;
                fmt_operand_latex(f, level, &self.lhs, Side::Left)?;
                write!(f, "}}^{{{}}}", self.rhs.innermost().as_display())
            },
            BinaryKind::Root => {
                let radicand = self.lhs.innermost().as_display();
                match self.rhs.innermost().as_constant() {
                    Some(degree) if degree == 2.0 => write!(f, "\\sqrt{{{}}}", radicand),
                    _ => write!(
                        f,
                        "\\sqrt[{}]{{{}}}",
                        self.rhs.innermost().as_display(),
                        radicand,
                    ),
                }
            },
            BinaryKind::Addition | BinaryKind::Subtraction | BinaryKind::Multiplication | BinaryKind::Equality => {
                fmt_operand_latex(f, level, &self.lhs, Side::Left)?;
                match self.op.kind {
                    BinaryKind::Multiplication => write!(f, " \\cdot ")?,
                    BinaryKind::Equality => write!(f, " = ")?,
                    kind => write!(f, "{}", kind.tag())?,
                }
                fmt_operand_latex(f, level, &self.rhs, Side::Right)
            },
        }
    }
}

impl Latex for Nary {
    fn fmt_latex(&self, f: &mut Formatter) -> Result {
        if self.children.is_empty() {
            return match self.kind {
                NaryKind::Sum => write!(f, "0"),
                NaryKind::Product => write!(f, "1"),
                NaryKind::Sequence => Ok(()),
            };
        }

        let level = self.kind.level();
        let separator = match self.kind {
            NaryKind::Sum => "+",
            NaryKind::Product => " \\cdot ",
            NaryKind::Sequence => ", ",
        };
        for (i, child) in self.children.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", separator)?;
            }
            fmt_operand_latex(f, level, child, Side::of_index(i))?;
        }
        Ok(())
    }
}

impl Latex for Call {
    fn fmt_latex(&self, f: &mut Formatter) -> Result {
        write!(f, "\\mathrm{{{}}}\\left(", self.name)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            if arg_needs_group(arg, self.args.len()) {
                write!(f, "\\left({}\\right)", arg.as_display())?;
            } else {
                arg.fmt_latex(f)?;
            }
        }
        write!(f, "\\right)")
    }
}

impl Latex for Expr {
    fn fmt_latex(&self, f: &mut Formatter) -> Result {
        match self {
            Expr::Constant(n) => fmt_number_latex(f, *n),
            Expr::Coefficient(symbol) | Expr::UnknownTerm(symbol) => write!(f, "{}", symbol.name),
            Expr::Term(term) => term.fmt_latex(f),
            Expr::Unary(unary) => unary.fmt_latex(f),
            Expr::Binary(binary) => binary.fmt_latex(f),
            Expr::Nary(nary) => nary.fmt_latex(f),
            Expr::Call(call) => call.fmt_latex(f),
        }
    }
}
