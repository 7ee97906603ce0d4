//! Formatting API for minimized forms

use crate::{Form, Implicant, VarList};

use std::fmt;

/// Symbols used to display a minimized form.
pub struct FormatterConfig<'a> {
    s_and: &'a str,
    s_or: &'a str,
    s_not: &'a str,
    postfix_not: bool,
}

/// Textbook notation: ```AB' + C``` and ```(A + B)(A' + B')```
pub static DEFAULT_FMT_CFG: FormatterConfig = FormatterConfig {
    s_and: "",
    s_or: " + ",
    s_not: "'",
    postfix_not: true,
};

/// Operator notation: ```A & !B | C``` and ```(A | B) & (!A | !B)```
pub static OPERATOR_FMT_CFG: FormatterConfig = FormatterConfig {
    s_and: " & ",
    s_or: " | ",
    s_not: "!",
    postfix_not: false,
};

/// Define hooks to display separate parts of a minimized form.
///
/// A form is a list of terms (products for SOP, sums for POS), each term being a list of literals.
/// [FormFormatter::write_form] visits the implicants and calls the other hooks.
pub trait FormFormatter {
    /// Pass-through function calling an internal [fmt::Formatter].
    ///
    /// This function enables the use of the ```write!``` macro in other functions.
    fn write_fmt(&mut self, args: fmt::Arguments) -> fmt::Result;

    /// Write a fixed Boolean value
    fn write_constant(&mut self, b: bool) -> fmt::Result;

    /// Write a single variable, which can be complemented
    fn write_literal(&mut self, var: char, complemented: bool) -> fmt::Result;

    /// Start writing a term with at least one literal
    fn start_term(&mut self, form: Form) -> fmt::Result;

    /// Separate two literals of the same term
    fn sep_literal(&mut self, form: Form) -> fmt::Result;

    /// Stop writing a term with at least one literal
    fn end_term(&mut self, form: Form) -> fmt::Result;

    /// Separate two terms
    fn sep_term(&mut self, form: Form) -> fmt::Result;

    /// Write a complete form.
    ///
    /// Without implicant, SOP is the constant 0 and POS the constant 1.
    /// An implicant without fixed position is written as the constant 1.
    fn write_form(&mut self, form: Form, vars: &VarList, implicants: &[Implicant]) -> fmt::Result {
        if implicants.is_empty() {
            return self.write_constant(form == Form::Pos);
        }

        for (idx, imp) in implicants.iter().enumerate() {
            if idx > 0 {
                self.sep_term(form)?;
            }
            if imp.dashes() == imp.width() {
                self.write_constant(true)?;
                continue;
            }

            self.start_term(form)?;
            for (rank, (pos, value)) in imp.iter_fixed_values().enumerate() {
                if rank > 0 {
                    self.sep_literal(form)?;
                }
                let complemented = match form {
                    Form::Sop => !value,
                    Form::Pos => value,
                };
                let var = vars.get(pos).copied().unwrap_or('?');
                self.write_literal(var, complemented)?;
            }
            self.end_term(form)?;
        }
        Ok(())
    }
}

/// Default formatter writing infix forms in a [fmt::Formatter]
pub struct InfixFormatter<'a, 'b>(&'a mut fmt::Formatter<'b>, &'a FormatterConfig<'a>);

impl<'a, 'b> InfixFormatter<'a, 'b> {
    pub fn new(f: &'a mut fmt::Formatter<'b>) -> Self {
        Self(f, &DEFAULT_FMT_CFG)
    }

    pub fn with(f: &'a mut fmt::Formatter<'b>, cfg: &'a FormatterConfig) -> Self {
        Self(f, cfg)
    }
}

impl FormFormatter for InfixFormatter<'_, '_> {
    fn write_fmt(&mut self, args: fmt::Arguments) -> fmt::Result {
        fmt::Formatter::write_fmt(self.0, args)
    }

    fn write_constant(&mut self, b: bool) -> fmt::Result {
        match b {
            false => write!(self, "0"),
            true => write!(self, "1"),
        }
    }

    fn write_literal(&mut self, var: char, complemented: bool) -> fmt::Result {
        match (complemented, self.1.postfix_not) {
            (false, _) => write!(self, "{}", var),
            (true, true) => write!(self, "{}{}", var, self.1.s_not),
            (true, false) => write!(self, "{}{}", self.1.s_not, var),
        }
    }

    fn start_term(&mut self, form: Form) -> fmt::Result {
        match form {
            Form::Sop => Ok(()),
            Form::Pos => write!(self, "("),
        }
    }

    fn sep_literal(&mut self, form: Form) -> fmt::Result {
        match form {
            Form::Sop => write!(self, "{}", self.1.s_and),
            Form::Pos => write!(self, "{}", self.1.s_or),
        }
    }

    fn end_term(&mut self, form: Form) -> fmt::Result {
        match form {
            Form::Sop => Ok(()),
            Form::Pos => write!(self, ")"),
        }
    }

    fn sep_term(&mut self, form: Form) -> fmt::Result {
        match form {
            Form::Sop => write!(self, "{}", self.1.s_or),
            Form::Pos => write!(self, "{}", self.1.s_and),
        }
    }
}

/// Display wrapper for a list of implicants rendered as a minimized form
pub struct Rendered<'a> {
    pub(crate) form: Form,
    pub(crate) vars: &'a VarList,
    pub(crate) implicants: &'a [Implicant],
    pub(crate) cfg: &'a FormatterConfig<'a>,
}

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut ff = InfixFormatter::with(f, self.cfg);
        ff.write_form(self.form, self.vars, self.implicants)
    }
}

impl FormatterConfig<'_> {
    /// Wrap a list of implicants to display it with this configuration
    pub fn render<'a>(
        &'a self,
        form: Form,
        vars: &'a VarList,
        implicants: &'a [Implicant],
    ) -> Rendered<'a> {
        Rendered {
            form,
            vars,
            implicants,
            cfg: self,
        }
    }
}
