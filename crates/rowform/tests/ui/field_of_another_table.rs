use rowform::prelude::*;

#[table(db = "app", name = "user", column(ident = "age", wire = "Int4"))]
pub struct User;

#[table(db = "app", name = "post", column(ident = "author_id", wire = "Int4"))]
pub struct Post;

fn main() {
    let row = UserRead { age: 41 };

    let _ = row.field::<post::AuthorId>();
}
