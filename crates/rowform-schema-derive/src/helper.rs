use crate::prelude::*;

/// Emit a string literal for any displayable value.
pub fn str_lit(s: impl ToString) -> LitStr {
    LitStr::new(&s.to_string(), Span::call_site())
}

/// Row struct ident for a scenario, e.g. `User` + HostInsert → `UserInsert`.
pub fn row_ident(table: &Ident, scenario: Scenario) -> Ident {
    format_ident!("{table}{}", scenario.row_suffix())
}
