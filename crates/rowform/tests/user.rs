use rowform::{
    core::{
        compare::{ComparabilityError, DenyReason},
        expr::ExprNode,
        obs::{CatalogEvent, EventSink, with_event_sink},
        wire::{Bool, Int4},
    },
    prelude::*,
    schema::SchemaError,
};
use std::{cell::RefCell, rc::Rc};

#[table(
    db = "app",
    name = "user",
    column(ident = "id", wire = "Int4", default),
    column(ident = "name", wire = "Text"),
    column(
        ident = "favorite_number",
        name = "favoriteNumber",
        wire = "Int4",
        nullable,
        default
    ),
    column(ident = "age", wire = "Int4", nullable)
)]
pub struct User;

#[table(
    db = "warehouse",
    name = "user",
    column(ident = "age", wire = "Int4", nullable)
)]
pub struct RemoteUser;

fn bob() -> UserInsert {
    UserInsert {
        id: Defaultable::Default,
        name: "bob".to_string(),
        favorite_number: Defaultable::Default,
        age: Null::Value(41),
    }
}

fn user_catalog() -> Catalog {
    Catalog::builder()
        .table::<User>()
        .allow::<user::Age, user::FavoriteNumber>()
        .build()
        .unwrap()
}

#[test]
fn insert_shape_keeps_default_outside_null() {
    let shape = User::shape(Scenario::HostInsert);

    let rendered: Vec<String> = shape
        .columns()
        .map(|(name, ty)| format!("{name}: {ty}"))
        .collect();

    assert_eq!(
        rendered,
        vec![
            "id: Default(Int32)",
            "name: Text",
            "favoriteNumber: Default(Null(Int32))",
            "age: Null(Int32)",
        ]
    );
    assert_eq!(UserInsert::shape(), shape);
}

#[test]
fn every_scenario_shape_is_tagged_with_the_table() {
    for scenario in Scenario::ALL {
        let shape = User::shape(scenario);

        assert_eq!(shape.len(), 4);
        assert!(shape.slots.iter().all(|slot| slot.column.table == User::id()));
    }
}

#[test]
fn no_value_converts_to_default_not_null() {
    let write = UserWrite::from(bob());

    assert_eq!(write.favorite_number, Defaultable::Default);
    assert!(
        write
            .assignments()
            .contains(&(user::FavoriteNumber::REF, ExprNode::Default))
    );
}

#[test]
fn explicit_null_converts_to_populated_null_branch() {
    let insert = UserInsert {
        favorite_number: Defaultable::null(),
        ..bob()
    };

    let write = UserWrite::from(insert);

    assert_eq!(write.favorite_number, Defaultable::Value(Expr::null()));
    assert_eq!(
        write.assignments()[2],
        (user::FavoriteNumber::REF, ExprNode::Null)
    );
}

#[test]
fn explicit_values_convert_to_literals() {
    let insert = UserInsert {
        id: Defaultable::Value(7),
        favorite_number: Defaultable::present(3),
        ..bob()
    };

    let nodes: Vec<String> = UserWrite::from(insert)
        .assignments()
        .into_iter()
        .map(|(column, node)| format!("{}={node}", column.column))
        .collect();

    assert_eq!(
        nodes,
        vec!["id=7", "name='bob'", "favoriteNumber=3", "age=41"]
    );
}

#[test]
fn undeclared_comparison_fails_until_registered() {
    let cols = UserWire::columns();

    let bare = Catalog::builder().table::<User>().build().unwrap();
    let err = bare
        .exprs()
        .eq(&cols.age, &cols.favorite_number)
        .unwrap_err();
    assert!(matches!(
        err,
        ComparabilityError::Denied {
            reason: DenyReason::Undeclared,
            ..
        }
    ));

    let catalog = user_catalog();
    let eq: Expr<Bool, Nullable> = catalog
        .exprs()
        .eq(&cols.age, &cols.favorite_number)
        .unwrap();

    assert!(eq.is_nullable());
    assert_eq!(
        eq.to_string(),
        "(\"public\".\"user\".\"age\" = \"public\".\"user\".\"favoriteNumber\")"
    );
}

#[test]
fn registration_is_unordered_and_specific() {
    let catalog = user_catalog();

    assert!(
        catalog
            .check(&user::FavoriteNumber::REF, &user::Age::REF)
            .is_allowed()
    );
    assert!(!catalog.check(&user::Age::REF, &user::Id::REF).is_allowed());
}

#[test]
fn cross_database_comparisons_are_hard_denied() {
    let err = Catalog::builder()
        .table::<User>()
        .table::<RemoteUser>()
        .allow::<user::Age, remote_user::Age>()
        .build()
        .unwrap_err();
    assert!(matches!(
        err,
        rowform::Error::Schema(SchemaError::Validation(_))
    ));

    let catalog = Catalog::builder()
        .table::<User>()
        .table::<RemoteUser>()
        .build()
        .unwrap();
    let local = user::Age::expr();
    let remote = remote_user::Age::expr();

    assert!(matches!(
        catalog.exprs().eq(local, remote),
        Err(ComparabilityError::Denied {
            reason: DenyReason::CrossDatabase,
            ..
        })
    ));
}

#[test]
fn nested_cross_database_operands_are_denied() {
    let catalog = Catalog::builder()
        .table::<User>()
        .table::<RemoteUser>()
        .build()
        .unwrap();
    let b = catalog.exprs();

    let shifted = b.add(user::Age::expr(), 0i32).unwrap();
    assert!(b.eq(shifted, remote_user::Age::expr()).is_err());

    let local = b.coalesce(user::Age::expr(), 0i32).unwrap();
    assert!(matches!(
        b.coalesce(remote_user::Age::expr(), local),
        Err(ComparabilityError::Denied {
            reason: DenyReason::CrossDatabase,
            ..
        })
    ));
}

#[test]
fn literal_comparisons_need_no_registration() {
    let catalog = Catalog::builder().table::<User>().build().unwrap();
    let b = catalog.exprs();

    let adult: Expr<Bool, Nullable> = b.ge(user::Age::expr(), 18i32).unwrap();
    let known: Expr<Int4, NotNull> = b.coalesce(user::Age::expr(), 0i32).unwrap();

    assert!(adult.is_nullable());
    assert!(!known.is_nullable());
}

#[test]
fn dynamic_field_access_checks_slot_types() {
    let mut read = UserRead {
        id: 1,
        name: "bob".to_string(),
        favorite_number: Null::Null,
        age: Null::Value(41),
    };

    assert_eq!(read.get_value(&user::Age::REF).unwrap(), Value::Int32(41));
    assert_eq!(
        read.get_value(&user::FavoriteNumber::REF).unwrap(),
        Value::Null
    );

    read.set_value(&user::Name::REF, Value::Text("alice".to_string()))
        .unwrap();
    assert_eq!(read.field::<user::Name>(), "alice");

    let err = read
        .set_value(&user::Name::REF, Value::Null)
        .unwrap_err();
    assert!(matches!(
        err,
        rowform::Error::Slot {
            scenario: Scenario::HostRead,
            ..
        }
    ));
}

#[test]
fn unknown_columns_name_the_column_and_scenario() {
    let read = UserWire::columns();
    let ghost = ColumnRef::new(User::id(), "ghost");

    for column in [remote_user::Age::REF, ghost] {
        let err = read.get_value(&column).unwrap_err();
        let from_shape = UserWire::shape().slot_for(&column).unwrap_err();

        match err {
            rowform::Error::Schema(SchemaError::UnknownColumn {
                table,
                column: name,
                scenario,
            }) => {
                assert_eq!(table, User::id());
                assert_eq!(name, column.to_string());
                assert_eq!(scenario, Scenario::WireRead);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(
            rowform::Error::from(from_shape).to_string(),
            read.get_value(&column).unwrap_err().to_string()
        );
    }
}

#[test]
fn dynamic_expressions_are_checked_against_the_slot_type() {
    let mut wire = UserWire::columns();

    let null = wire
        .set_value(&user::Id::REF, Expr::<Int4, Nullable>::null().to_value())
        .unwrap_err();
    assert!(matches!(
        null,
        rowform::Error::Slot {
            scenario: Scenario::WireRead,
            ..
        }
    ));

    let foreign = wire
        .set_value(&user::Name::REF, remote_user::Age::expr().to_value())
        .unwrap_err();
    assert!(foreign.to_string().contains("expected Text value, found Int4 expression"));

    let mut write = UserWrite::from(bob());
    assert!(write.set_value(&user::Name::REF, Value::Default).is_err());
    assert!(
        !write
            .assignments()
            .contains(&(user::Name::REF, ExprNode::Default))
    );

    wire.set_value(&user::Age::REF, Expr::<Int4, NotNull>::literal(5i32).to_value())
        .unwrap();
    assert_eq!(wire.age.to_string(), "5");
}

#[test]
fn typed_slots_are_mutable() {
    let mut insert = bob();

    *insert.field_mut::<user::FavoriteNumber>() = Defaultable::present(9);

    assert_eq!(insert.favorite_number, Defaultable::Value(Null::Value(9)));
}

#[test]
fn outer_rows_make_every_slot_nullable() {
    let outer = UserWireOuter::columns();

    assert!(outer.id.is_nullable());
    assert!(outer.name.is_nullable());
    assert_eq!(outer.id.column_ref(), Some(&user::Id::REF));
    assert!(
        UserWireOuter::shape()
            .slots
            .iter()
            .all(|slot| slot.ty.is_nullable() && slot.ty.depth() == 1)
    );
}

#[test]
fn host_outer_rows_keep_row_absence_separate() {
    let absent: Null<UserRead> = Null::Null;
    let present: Null<UserRead> = Null::Value(UserRead {
        id: 1,
        name: "bob".to_string(),
        favorite_number: Null::Null,
        age: Null::Null,
    });

    assert!(absent.is_null());
    assert_eq!(
        present.as_ref().map(|row| row.favorite_number),
        Null::Value(Null::Null)
    );
}

#[test]
fn wire_rows_update_through_write() {
    let catalog = user_catalog();
    let b = catalog.exprs();
    let mut wire = UserWire::columns();
    wire.age = b.add(&wire.age, 1i32).unwrap();

    let write = UserWrite::from(wire);

    assert_eq!(
        write.assignments()[3].1.to_string(),
        "(\"public\".\"user\".\"age\" + 1)"
    );
    assert_eq!(
        write.id.value().and_then(|e| e.column_ref().copied()),
        Some(user::Id::REF)
    );
}

#[test]
fn host_rows_round_trip_through_json() {
    let insert = UserInsert {
        favorite_number: Defaultable::null(),
        ..bob()
    };

    let json = serde_json::to_value(&insert).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "id": "Default",
            "name": "bob",
            "favorite_number": { "Value": null },
            "age": 41,
        })
    );

    let back: UserInsert = serde_json::from_value(json).unwrap();
    assert_eq!(back, insert);
}

#[test]
fn catalog_build_reports_events() {
    #[derive(Default)]
    struct Capture(RefCell<Vec<CatalogEvent>>);

    impl EventSink for Capture {
        fn record(&self, event: CatalogEvent) {
            self.0.borrow_mut().push(event);
        }
    }

    let capture = Rc::new(Capture::default());
    with_event_sink(capture.clone(), || {
        let _ = user_catalog();
    });

    let events = capture.0.borrow();
    assert_eq!(
        *events,
        vec![
            CatalogEvent::TableRegistered {
                table: User::id(),
                columns: 4,
            },
            CatalogEvent::PairAllowed {
                lhs: user::Age::REF,
                rhs: user::FavoriteNumber::REF,
            },
        ]
    );
}
