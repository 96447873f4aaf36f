use tests::prelude::*;

use strata::schema::{
    Arg, FieldData, FieldInput, FieldOutput, FieldType, InputObjectType, InputType, MultiField,
    ScalarDefault, ScalarField, StorageField,
};
use strata::stmt::ValueRecord;

/// An address stored as two columns, rendered as one line.
fn address() -> impl FnOnce(&FieldData<'_>) -> FieldType {
    |_| {
        let storage = MultiField::new([
            (
                "street",
                StorageField::from(ScalarField::optional(ScalarType::String)),
            ),
            (
                "country",
                StorageField::from(ScalarField {
                    default: Some(ScalarDefault::Literal(Value::from("NZ"))),
                    ..ScalarField::required(ScalarType::String)
                }),
            ),
        ]);

        let string = || Arg::new(InputType::Scalar(ScalarType::String));
        let input = InputObjectType::new("AddressInput")
            .field("street", string())
            .field("country", string());
        let filter = InputObjectType::new("AddressFilter")
            .field("street", string())
            .field("country", string());
        let order_by = InputObjectType::new("AddressOrderByInput")
            .field("street", InputType::OrderDirection.non_null())
            .field("country", InputType::OrderDirection.non_null());

        let as_record = Resolver::from_fn(|value| {
            Ok(Some(match value {
                Some(Value::Record(record)) => Value::Record(record),
                _ => Value::Record(ValueRecord::new()),
            }))
        });

        let one_line = Resolver::from_fn(|value| {
            let Some(Value::Record(address)) = value else {
                return Ok(None);
            };
            let parts: Vec<_> = ["street", "country"]
                .iter()
                .filter_map(|key| address.get(key).and_then(Value::as_str))
                .collect();
            Ok(Some(Value::from(parts.join(", "))))
        });

        let mut field = FieldType::new(
            storage,
            FieldOutput::new(OutputType::Scalar(ScalarType::String)).resolve(one_line),
            "app/fields/address",
        );
        field.input.create =
            Some(FieldInput::new(InputType::Object(input.clone())).resolve(as_record.clone()).into());
        field.input.update = Some(FieldInput::new(InputType::Object(input)).resolve(as_record));
        field.input.filter = Some(FieldInput::new(InputType::Object(filter)));
        field.input.order_by = Some(FieldInput::new(InputType::Object(order_by)));
        field
    }
}

fn schema() -> strata::db::Builder {
    lists!(ListDef::new("Shop")
        .field("name", text(TextConfig::default()))
        .field("address", address()))
}

async fn subfields_are_stored_together(test: &mut DbTest) {
    let db = test.setup_db(schema()).await;

    let shop = assert_ok!(
        db.create(
            "Shop",
            record! { name: "corner", address: record! { street: "1 Main St" } }
        )
        .await
    );

    // the missing subfield took its default
    assert_eq!(
        shop.get("address"),
        Some(&Value::from(record! { street: "1 Main St", country: "NZ" }))
    );

    let output = assert_ok!(db.output(&shop).await);
    assert_eq!(output.value("address"), Some(&Value::from("1 Main St, NZ")));

    let shop = assert_ok!(
        db.update(
            "Shop",
            record! { id: 1 },
            record! { address: record! { country: "AU" } }
        )
        .await
    );
    assert_eq!(
        shop.get("address"),
        Some(&Value::from(record! { street: "1 Main St", country: "AU" }))
    );
}

async fn subfields_filter_and_order(test: &mut DbTest) {
    let db = test.setup_db(schema()).await;

    let shops = [("a", "Queen St", "NZ"), ("b", "King St", "AU"), ("c", "Bay Rd", "NZ")];
    for (name, street, country) in shops {
        assert_ok!(
            db.create(
                "Shop",
                record! { name: name, address: record! { street: street, country: country } }
            )
            .await
        );
    }

    let items = assert_ok!(
        db.find_many(
            "Shop",
            record! {
                where: record! {
                    address: record! { country: record! { equals: "NZ" } },
                },
                orderBy: record! { address: record! { street: "asc" } },
            }
        )
        .await
    );
    let names: Vec<_> = items
        .iter()
        .filter_map(|item| item.get("name").and_then(Value::as_str))
        .collect();
    assert_eq!(names, ["c", "a"]);
}

tests!(subfields_are_stored_together, subfields_filter_and_order);
