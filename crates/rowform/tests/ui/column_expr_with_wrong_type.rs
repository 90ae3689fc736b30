use rowform::{core::wire::Text, prelude::*};

#[table(db = "app", name = "user", column(ident = "age", wire = "Int4"))]
pub struct User;

fn main() {
    let _ = Expr::<Text, NotNull>::column(user::Age::REF);
}
