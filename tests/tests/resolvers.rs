use tests::prelude::*;

use strata::schema::{
    FieldData, FieldInput, FieldOutput, FieldType, InputType, Resolve, ResolveCx, ScalarField,
};
use strata::stmt::ValueRecord;
use strata::Output;

/// Lowercases and trims slugs on the way in.
struct Slugify;

#[async_trait::async_trait]
impl Resolve for Slugify {
    async fn resolve(&self, input: Option<Value>, cx: &ResolveCx<'_>) -> strata::Result<Option<Value>> {
        match input {
            Some(Value::String(slug)) => Ok(Some(Value::String(slug.trim().to_lowercase()))),
            Some(Value::Null) | None => Err(strata::err!("{} needs a slug", cx.path())),
            Some(other) => Ok(Some(other)),
        }
    }
}

fn slug() -> impl FnOnce(&FieldData<'_>) -> FieldType {
    |_| {
        let string = || InputType::Scalar(ScalarType::String);
        let mut field = FieldType::new(
            ScalarField::required(ScalarType::String),
            FieldOutput::new(OutputType::Scalar(ScalarType::String).non_null()),
            "app/fields/slug",
        );
        field.input.create = Some(FieldInput::new(string()).resolve(Resolver::new(Slugify)).into());
        field.input.update = Some(FieldInput::new(string()).resolve(Resolver::new(Slugify)));
        field
    }
}

/// A field whose resolvers return values that do not fit its storage.
fn broken() -> impl FnOnce(&FieldData<'_>) -> FieldType {
    |_| {
        let mut field = FieldType::new(
            ScalarField::optional(ScalarType::Int),
            FieldOutput::new(OutputType::Scalar(ScalarType::Int)).resolve(Resolver::from_fn(|_| {
                Ok(Some(Value::from("not a number")))
            })),
            "app/fields/broken",
        );
        field.input.update = Some(
            FieldInput::new(InputType::Scalar(ScalarType::Int))
                .resolve(Resolver::from_fn(|_| Ok(Some(Value::from("nope"))))),
        );
        field
    }
}

/// A byte count that also reports itself as a human readable size.
fn file_size() -> impl FnOnce(&FieldData<'_>) -> FieldType {
    |_| {
        let mut field = FieldType::new(
            ScalarField::required(ScalarType::Int),
            FieldOutput::new(OutputType::Scalar(ScalarType::Int)),
            "app/fields/file-size",
        );
        field.input.create = Some(FieldInput::new(InputType::Scalar(ScalarType::Int)).into());
        field.extra_output.insert(
            "sizeLabel".to_string(),
            FieldOutput::new(OutputType::Scalar(ScalarType::String)).resolve(Resolver::from_fn(
                |stored| match stored {
                    Some(Value::I32(bytes)) => Ok(Some(Value::String(format!("{} KiB", bytes / 1024)))),
                    _ => Err(strata::err!("no size stored")),
                },
            )),
        );
        field.extra_output.insert(
            "sizeBroken".to_string(),
            FieldOutput::new(OutputType::Scalar(ScalarType::String)).resolve(Resolver::from_fn(Ok)),
        );
        field
    }
}

fn schema() -> strata::db::Builder {
    lists!(ListDef::new("Post")
        .field("title", text(TextConfig::default()))
        .field("slug", slug())
        .field("broken", broken())
        .field(
            "summary",
            virtual_field(VirtualConfig::new(
                OutputType::Scalar(ScalarType::String).non_null(),
                Resolver::from_item(|item: &ValueRecord| {
                    let title = item.get("title").and_then(Value::as_str).unwrap_or_default();
                    Ok(Some(Value::String(format!("{title} ({} chars)", title.len()))))
                }),
            )),
        ))
}

async fn input_resolvers_transform_values(test: &mut DbTest) {
    let db = test.setup_db(schema()).await;

    let post = assert_ok!(
        db.create("Post", record! { title: "Hello", slug: "  Hello-World " })
            .await
    );
    assert_eq!(post.get("slug"), Some(&Value::from("hello-world")));
}

async fn failures_are_collected_per_field(test: &mut DbTest) {
    let db = test.setup_db(schema()).await;

    // the slug resolver runs even when the argument is absent
    let err = assert_err!(db.create("Post", record! { title: Value::Null }).await);
    let mut failures: Vec<_> = err
        .resolution_failures()
        .iter()
        .map(|failure| failure.path().to_string())
        .collect();
    failures.sort();
    assert_eq!(failures, ["Post.slug", "Post.title"]);
    assert_eq!(test.log().creates("Post"), 0);
}

async fn resolver_results_must_fit_storage(test: &mut DbTest) {
    let db = test.setup_db(schema()).await;
    assert_ok!(db.create("Post", record! { title: "a", slug: "a" }).await);

    let err = assert_err!(
        db.update("Post", record! { id: 1 }, record! { broken: 3 })
            .await
    );
    assert!(err.is_resolution());
    let [failure] = err.resolution_failures() else {
        panic!("expected one failure, got {err}");
    };
    assert_eq!(failure.path(), "Post.broken");
    assert_eq!(
        failure.cause().to_string(),
        "resolver returned String, which does not fit `Int | null | undefined`"
    );
}

async fn output_fails_per_field(test: &mut DbTest) {
    let db = test.setup_db(schema()).await;
    let post = assert_ok!(db.create("Post", record! { title: "Hello", slug: "hello" }).await);

    let output = assert_ok!(db.output(&post).await);
    assert!(!output.is_complete());

    assert_eq!(output.value("id"), Some(&Value::from("1")));
    assert_eq!(output.value("title"), Some(&Value::from("Hello")));
    assert_eq!(output.value("summary"), Some(&Value::from("Hello (5 chars)")));

    let errors: Vec<_> = output.errors().map(|(name, _)| name).collect();
    assert_eq!(errors, ["broken"]);

    let Some(Err(err)) = output.get("broken") else {
        panic!("expected `broken` to fail");
    };
    assert!(err.is_resolution());

    assert!(matches!(output.get("slug"), Some(Ok(Output::Value(Some(_))))));
}

async fn extra_outputs_resolve_from_the_stored_value(test: &mut DbTest) {
    let db = test
        .setup_db(lists!(ListDef::new("Upload").field("size", file_size())))
        .await;
    let upload = assert_ok!(db.create("Upload", record! { size: 4096 }).await);

    let output = assert_ok!(db.output(&upload).await);
    assert_eq!(output.value("size"), Some(&Value::I32(4096)));
    assert_eq!(output.value("sizeLabel"), Some(&Value::from("4 KiB")));

    let errors: Vec<_> = output.errors().map(|(name, _)| name).collect();
    assert_eq!(errors, ["sizeBroken"]);

    let Some(Err(err)) = output.get("sizeBroken") else {
        panic!("expected `sizeBroken` to fail");
    };
    let [failure] = err.resolution_failures() else {
        panic!("expected one failure, got {err}");
    };
    assert_eq!(failure.path(), "Upload.sizeBroken");
}

tests!(
    input_resolvers_transform_values,
    failures_are_collected_per_field,
    resolver_results_must_fit_storage,
    output_fails_per_field,
    extra_outputs_resolve_from_the_stored_value,
);
