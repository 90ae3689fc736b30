use rowform::prelude::*;

#[table(
    db = "app",
    name = "user",
    column(ident = "age", wire = "Int4", nullable),
    column(ident = "favorite_number", wire = "Int4", nullable)
)]
pub struct User;

fn main() {
    let catalog = Catalog::builder().table::<User>().build().unwrap();

    let _ = catalog.exprs().coalesce(user::Age::expr(), Null::Value(0i32));
    let _ = catalog
        .exprs()
        .coalesce(user::Age::expr(), user::FavoriteNumber::expr());
}
