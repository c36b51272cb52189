use coalsynth_core::{
    BLEND_TABLE, COAL_MOVEMENT_TABLE, InsertStatement, Section, SqlValue, VALUE_COLUMNS,
};

#[test]
fn blend_statement_has_no_space_before_priority() {
    let mut values = vec![SqlValue::text("2024-03-04"), SqlValue::raw("2")];
    values.extend((1..=VALUE_COLUMNS).map(|n| {
        if n % 2 == 0 {
            SqlValue::from_cell("NULL")
        } else {
            SqlValue::from_cell(&format!("C{n}"))
        }
    }));

    let statement = InsertStatement::checked(&BLEND_TABLE, values).expect("full blend row");
    assert_eq!(
        statement.to_string(),
        "INSERT INTO Blend(date, Priority, Coal1, Coal2, Coal3, Coal4, Coal5, Coal6, Coal7, \
         Coal8, Coal9, Coal10) VALUES ('2024-03-04',2,'C1',NULL,'C3',NULL,'C5',NULL,'C7',NULL,\
         'C9',NULL);"
    );
}

#[test]
fn coal_movement_statement_shape() {
    let statement = InsertStatement::checked(
        &COAL_MOVEMENT_TABLE,
        vec![
            SqlValue::text("Coking"),
            SqlValue::text("Truck7"),
            SqlValue::text("2024-01-01 12:00:00"),
        ],
    )
    .expect("movement row");

    assert_eq!(
        statement.render(),
        "INSERT INTO CoalMovement(Coal, Truck, DateTimeArrival) \
         VALUES('Coking','Truck7', '2024-01-01 12:00:00');"
    );
}

#[test]
fn sections_serialize_as_snake_case() {
    let names: Vec<String> = Section::ORDER
        .iter()
        .map(|section| serde_json::to_string(section).expect("serialize section"))
        .collect();
    assert_eq!(names, ["\"stockpile\"", "\"blend\"", "\"movements\""]);
}
