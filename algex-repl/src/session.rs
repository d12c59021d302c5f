use algex_expr::{Environment, Latex};
use algex_parser::parse;
use crate::{command::Command, error::Error};
use std::fmt::Write;

/// The state of a REPL session: the bindings made so far.
#[derive(Debug, Clone)]
pub struct Session {
    env: Environment,
}

impl Default for Session {
    fn default() -> Self {
        Self { env: Environment::with_constants() }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles a line of input, returning the text to print.
    pub fn handle(&mut self, line: &str) -> Result<String, Error> {
        match Command::parse(line) {
            Command::Let { name, expr } => {
                let target = parse(name)?;
                if target.symbol_ref().is_none() {
                    return Err(Error::NotAName(name.to_string()));
                }

                let value = parse(expr)?.compute(&self.env);
                let output = format!("{} = {}", name, value);
                self.env.add_var(name, value);
                Ok(output)
            },
            Command::Unlet(name) => match self.env.remove_var(name) {
                Some(value) => Ok(format!("{} was {}", name, value)),
                None => Ok(self.unknown_name(name)),
            },
            Command::Tex(expr) => Ok(parse(expr)?.to_tex()),
            Command::Convert(expr) => Ok(parse(expr)?.converting(&self.env).to_string()),
            Command::Unique(expr) => {
                let expr = parse(expr)?;
                let formula = expr.make_unique()?;
                let zone = formula.zone();

                let mut output = format!(
                    "{} node(s) in {} record(s), root {}",
                    expr.node_count(),
                    zone.len(),
                    formula.root(),
                );
                for (id, _) in zone.iter() {
                    // writing into a `String` cannot fail
                    let _ = write!(output, "\n{} {}", id, zone.to_expr(id)?);
                }
                Ok(output)
            },
            Command::Vars => Ok(self.env
                .sorted_vars()
                .into_iter()
                .map(|(name, value)| format!("{} = {}", name, value))
                .collect::<Vec<_>>()
                .join("\n")),
            Command::Eval(expr) => {
                let expr = parse(expr)?;
                let computed = expr.compute(&self.env);

                let mut output = expr.to_string();
                if computed != expr {
                    let _ = write!(output, " = {}", computed);
                }
                for name in computed.names() {
                    let _ = write!(output, "\n{}", self.unknown_name(name));
                }
                Ok(output)
            },
        }
    }

    /// Describes a name without a value, suggesting similar names.
    fn unknown_name(&self, name: &str) -> String {
        let similar = self.env.similar_names(name);
        if similar.is_empty() {
            format!("note: `{}` has no value", name)
        } else {
            format!(
                "note: `{}` has no value; did you mean {}?",
                name,
                similar.iter().map(|n| format!("`{}`", n)).collect::<Vec<_>>().join(", "),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(session: &mut Session, line: &str) -> String {
        session.handle(line).unwrap()
    }

    #[test]
    fn let_and_eval() {
        let mut session = Session::new();
        assert_eq!(run(&mut session, "let b = 2"), "b = 2");
        assert_eq!(run(&mut session, "let x = 2+3"), "x = 5");
        assert_eq!(run(&mut session, "b*x"), "b*x = 10");
        assert_eq!(run(&mut session, "2"), "2");
        assert!(parse("b*x").unwrap().compute(&session.env).names().is_empty());
    }

    #[test]
    fn unknown_names_are_noted() {
        let mut session = Session::new();
        run(&mut session, "let rate = 2");
        assert_eq!(
            run(&mut session, "rat*2"),
            "rat*2\nnote: `rat` has no value; did you mean `rate`?",
        );
        assert_eq!(run(&mut session, "unlet nope"), "note: `nope` has no value");
        assert_eq!(run(&mut session, "unlet rate"), "rate was 2");
    }

    #[test]
    fn tex_and_convert() {
        let mut session = Session::new();
        assert_eq!(run(&mut session, "tex a v 2"), "\\sqrt{a}");
        run(&mut session, "let a = 4");
        assert_eq!(run(&mut session, "convert a*X"), "4*X");
    }

    #[test]
    fn unique_lists_records() {
        let mut session = Session::new();
        assert_eq!(
            run(&mut session, "unique a*x+a*x"),
            "7 node(s) in 4 record(s), root #3\n#0 a\n#1 x\n#2 a*x\n#3 a*x+a*x",
        );
    }

    #[test]
    fn errors() {
        let mut session = Session::new();
        assert!(matches!(session.handle("2*(3"), Err(Error::Parse(_))));
        assert!(matches!(session.handle("let 2 = 3"), Err(Error::NotAName(_))));
    }
}
