use tests::prelude::*;

fn post() -> ListDef {
    ListDef::new("Post")
        .field("title", text(TextConfig::default()))
        .field(
            "status",
            select(SelectConfig {
                default: Some("draft".to_string()),
                ..SelectConfig::new(["draft", "published"])
            }),
        )
        .field(
            "views",
            integer(IntegerConfig {
                default: Some(0),
                ..IntegerConfig::default()
            }),
        )
        .field("pinned", checkbox(CheckboxConfig::default()))
        .field(
            "createdAt",
            timestamp(TimestampConfig {
                default_now: true,
                ..TimestampConfig::default()
            }),
        )
}

async fn defaults_fill_absent_fields(test: &mut DbTest) {
    let db = test.setup_db(lists!(post())).await;

    let post = assert_ok!(db.create("Post", record! { title: "hello" }).await);

    assert_eq!(post.id(), &Value::I32(1));
    assert_eq!(post.get("status"), Some(&Value::from("draft")));
    assert_eq!(post.get("views"), Some(&Value::I32(0)));
    assert_eq!(post.get("pinned"), Some(&Value::Bool(false)));
    assert!(matches!(post.get("createdAt"), Some(Value::DateTime(_))));

    // the stored record carries the default too
    let found = assert_some!(assert_ok!(db.find_one("Post", record! { id: 1 }).await));
    assert_eq!(found.get("status"), Some(&Value::from("draft")));
}

async fn given_values_win_over_defaults(test: &mut DbTest) {
    let db = test.setup_db(lists!(post())).await;

    let post = assert_ok!(
        db.create(
            "Post",
            record! { title: "hello", status: "published", views: 7 }
        )
        .await
    );

    assert_eq!(post.get("status"), Some(&Value::from("published")));
    assert_eq!(post.get("views"), Some(&Value::I32(7)));
}

async fn null_is_rejected_for_required_fields(test: &mut DbTest) {
    let db = test.setup_db(lists!(post())).await;

    let err = assert_err!(
        db.create("Post", record! { title: Value::Null, status: Value::Null })
            .await
    );
    assert!(err.is_resolution());

    let mut paths: Vec<_> = err
        .resolution_failures()
        .iter()
        .map(|failure| failure.path().to_string())
        .collect();
    paths.sort();
    assert_eq!(paths, ["Post.status", "Post.title"]);

    assert_eq!(test.log().creates("Post"), 0);
}

async fn unknown_input_is_rejected(test: &mut DbTest) {
    let db = test.setup_db(lists!(post())).await;

    let err = assert_err!(db.create("Post", record! { body: "hi" }).await);
    assert!(err.is_invalid_argument());
    assert_eq!(
        err.to_string(),
        "invalid argument: `body` is not a create input of `Post`"
    );
}

async fn ids_follow_the_list_strategy(test: &mut DbTest) {
    let db = test
        .setup_db(lists!(
            ListDef::new("Tag")
                .id(IdStrategy::Cuid)
                .field("name", text(TextConfig::default())),
            ListDef::new("Token")
                .id(IdStrategy::Uuid)
                .field("name", text(TextConfig::default()))
        ))
        .await;

    let tag = assert_ok!(db.create("Tag", record! { name: "rust" }).await);
    let Value::String(id) = tag.id() else {
        panic!("expected a string id, got {:?}", tag.id());
    };
    assert!(id.starts_with('c'));
    assert_eq!(id.len(), 25);

    let token = assert_ok!(db.create("Token", record! { name: "t" }).await);
    let Value::String(id) = token.id() else {
        panic!("expected a string id, got {:?}", token.id());
    };
    assert_eq!(id.len(), 36);

    // string ids pass through unique-where resolution untouched
    let found = assert_ok!(db.find_one("Token", record! { id: id.clone() }).await);
    assert_eq!(assert_some!(found).id(), token.id());
}

async fn updated_at_is_stamped(test: &mut DbTest) {
    let db = test
        .setup_db(lists!(ListDef::new("Post")
            .field("title", text(TextConfig::default()))
            .field(
                "updatedAt",
                timestamp(TimestampConfig {
                    is_nullable: true,
                    updated_at: true,
                    ..TimestampConfig::default()
                }),
            )))
        .await;

    let post = assert_ok!(db.create("Post", record! { title: "a" }).await);
    assert_none!(post.get("updatedAt"));

    let post = assert_ok!(
        db.update("Post", record! { id: 1 }, record! { title: "b" })
            .await
    );
    assert_eq!(post.get("title"), Some(&Value::from("b")));
    assert!(matches!(post.get("updatedAt"), Some(Value::DateTime(_))));
}

async fn update_of_missing_record_is_not_found(test: &mut DbTest) {
    let db = test.setup_db(lists!(post())).await;

    let err = assert_err!(
        db.update("Post", record! { id: 42 }, record! { title: "b" })
            .await
    );
    assert!(err.is_record_not_found());
    assert_eq!(test.log().writes(), 0);
}

tests!(
    defaults_fill_absent_fields,
    given_values_win_over_defaults,
    null_is_rejected_for_required_fields,
    unknown_input_is_rejected,
    ids_follow_the_list_strategy,
    updated_at_is_stamped,
    update_of_missing_record_is_not_found,
);
