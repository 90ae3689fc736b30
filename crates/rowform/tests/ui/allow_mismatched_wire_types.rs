use rowform::prelude::*;

#[table(
    db = "app",
    name = "user",
    column(ident = "age", wire = "Int4"),
    column(ident = "name", wire = "Text")
)]
pub struct User;

fn main() {
    let _ = Catalog::builder()
        .table::<User>()
        .allow::<user::Age, user::Name>()
        .build();
}
