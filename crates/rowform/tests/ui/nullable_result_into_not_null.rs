use rowform::{core::wire::Int4, prelude::*};

#[table(db = "app", name = "user", column(ident = "age", wire = "Int4", nullable))]
pub struct User;

fn main() {
    let catalog = Catalog::builder().table::<User>().build().unwrap();

    let _older: Expr<Int4, NotNull> = catalog.exprs().add(user::Age::expr(), 1i32).unwrap();
}
