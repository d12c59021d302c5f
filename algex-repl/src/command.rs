/// A line of input to the REPL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    /// `let NAME = EXPR`: binds the computed value of `EXPR` to `NAME`.
    Let {
        name: &'a str,
        expr: &'a str,
    },

    /// `unlet NAME`: removes the binding of `NAME`.
    Unlet(&'a str),

    /// `tex EXPR`: prints the TeX rendering of `EXPR`.
    Tex(&'a str),

    /// `convert EXPR`: prints `EXPR` with every bound name replaced by its value.
    Convert(&'a str),

    /// `unique EXPR`: prints the canonical nodes of `EXPR`.
    Unique(&'a str),

    /// `vars`: prints every binding.
    Vars,

    /// Any other line: prints the rendering of the expression and its computed form.
    Eval(&'a str),
}

/// Returns the rest of `line` if it starts with the keyword `keyword` followed by whitespace.
fn keyword<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(keyword)?;
    if rest.starts_with(char::is_whitespace) {
        Some(rest.trim())
    } else {
        None
    }
}

impl<'a> Command<'a> {
    /// Parses a line of input.
    ///
    /// A line that does not start with a command keyword is an expression, so names such as `tex`
    /// can still be used in expressions (`tex+1`).
    pub fn parse(line: &'a str) -> Self {
        let line = line.trim();

        if line == "vars" {
            return Command::Vars;
        }

        if let Some(rest) = keyword(line, "let") {
            if let Some((name, expr)) = rest.split_once('=') {
                return Command::Let { name: name.trim(), expr: expr.trim() };
            }
        }

        if let Some(name) = keyword(line, "unlet") {
            return Command::Unlet(name);
        }

        if let Some(expr) = keyword(line, "tex") {
            return Command::Tex(expr);
        }

        if let Some(expr) = keyword(line, "convert") {
            return Command::Convert(expr);
        }

        if let Some(expr) = keyword(line, "unique") {
            return Command::Unique(expr);
        }

        Command::Eval(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn commands() {
        assert_eq!(Command::parse("let x = 2*3"), Command::Let { name: "x", expr: "2*3" });
        assert_eq!(Command::parse("  unlet x "), Command::Unlet("x"));
        assert_eq!(Command::parse("tex x^2"), Command::Tex("x^2"));
        assert_eq!(Command::parse("convert a+b"), Command::Convert("a+b"));
        assert_eq!(Command::parse("unique a*x+a*x"), Command::Unique("a*x+a*x"));
        assert_eq!(Command::parse("vars"), Command::Vars);
    }

    #[test]
    fn expressions() {
        assert_eq!(Command::parse("2+2"), Command::Eval("2+2"));
        assert_eq!(Command::parse("tex+1"), Command::Eval("tex+1"));
        assert_eq!(Command::parse("letter=1"), Command::Eval("letter=1"));

        // an equation whose left side starts with `let` but has no name
        assert_eq!(Command::parse("let x"), Command::Eval("let x"));
    }
}
