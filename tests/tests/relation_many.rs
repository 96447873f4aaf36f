use tests::prelude::*;

fn schema(policy: SetPolicy) -> strata::db::Builder {
    let mut builder = lists!(
        ListDef::new("User")
            .field("name", text(TextConfig::default()))
            .field("posts", relationship(RelationshipConfig::many("Post.author"))),
        ListDef::new("Post")
            .field("title", text(TextConfig::default()))
            .field("author", relationship(RelationshipConfig::one("User.posts")))
    );
    builder.config(Config {
        relation_set: policy,
        ..Config::default()
    });
    builder
}

fn ids(ids: &[i32]) -> Vec<Value> {
    ids.iter().map(|id| Value::from(record! { id: *id })).collect()
}

/// Ids of the posts linked to `user`, ascending.
async fn post_ids(db: &Db, user: &Item) -> Vec<Value> {
    let output = assert_ok!(db.output(user).await);
    let posts = assert_ok!(assert_some!(output.get("posts")));
    let posts = assert_some!(posts.as_many());

    let items = assert_ok!(
        posts
            .find_many(record! { orderBy: record! { id: "asc" } })
            .await
    );
    items.iter().map(|item| item.id().clone()).collect()
}

async fn setup(test: &mut DbTest, policy: SetPolicy) -> (Db, Item) {
    let db = test.setup_db(schema(policy)).await;

    let user = assert_ok!(db.create("User", record! { name: "ann" }).await);
    for title in ["a", "b", "c"] {
        assert_ok!(db.create("Post", record! { title: title }).await);
    }

    (db, user)
}

async fn set_replaces_linked_records(test: &mut DbTest) {
    let (db, user) = setup(test, SetPolicy::SetFirst).await;

    assert_ok!(
        db.update(
            "User",
            record! { id: 1 },
            record! { posts: record! { set: ids(&[1, 2]) } }
        )
        .await
    );
    assert_eq!(post_ids(&db, &user).await, [Value::I32(1), Value::I32(2)]);

    assert_ok!(
        db.update(
            "User",
            record! { id: 1 },
            record! { posts: record! { set: ids(&[3]) } }
        )
        .await
    );
    assert_eq!(post_ids(&db, &user).await, [Value::I32(3)]);

    // an empty set clears every link
    assert_ok!(
        db.update(
            "User",
            record! { id: 1 },
            record! { posts: record! { set: Vec::<Value>::new() } }
        )
        .await
    );
    assert!(post_ids(&db, &user).await.is_empty());
}

async fn set_runs_before_connect(test: &mut DbTest) {
    let (db, user) = setup(test, SetPolicy::SetFirst).await;

    assert_ok!(
        db.update(
            "User",
            record! { id: 1 },
            record! { posts: record! { set: ids(&[1]), connect: ids(&[3]) } }
        )
        .await
    );
    assert_eq!(post_ids(&db, &user).await, [Value::I32(1), Value::I32(3)]);

    let err = assert_err!(
        db.update(
            "User",
            record! { id: 1 },
            record! { posts: record! { set: ids(&[1]), disconnect: ids(&[3]) } }
        )
        .await
    );
    assert!(err.is_ambiguous_relation_input());
}

async fn exclusive_set_rejects_other_verbs(test: &mut DbTest) {
    let (db, user) = setup(test, SetPolicy::Exclusive).await;

    let err = assert_err!(
        db.update(
            "User",
            record! { id: 1 },
            record! { posts: record! { set: ids(&[1]), connect: ids(&[3]) } }
        )
        .await
    );
    assert!(err.is_ambiguous_relation_input());
    assert!(post_ids(&db, &user).await.is_empty());
}

async fn connect_and_disconnect(test: &mut DbTest) {
    let (db, user) = setup(test, SetPolicy::SetFirst).await;

    assert_ok!(
        db.update(
            "User",
            record! { id: 1 },
            record! { posts: record! { connect: ids(&[1, 2, 3]) } }
        )
        .await
    );
    assert_ok!(
        db.update(
            "User",
            record! { id: 1 },
            record! { posts: record! { disconnect: ids(&[2]) } }
        )
        .await
    );
    assert_eq!(post_ids(&db, &user).await, [Value::I32(1), Value::I32(3)]);

    let output = assert_ok!(db.output(&user).await);
    let posts = assert_some!(assert_ok!(assert_some!(output.get("posts"))).as_many());
    assert_eq!(assert_ok!(posts.count(record! {}).await), 2);
    assert_eq!(
        assert_ok!(
            posts
                .count(record! { title: record! { equals: "c" } })
                .await
        ),
        1
    );
}

async fn nested_create_links_new_records(test: &mut DbTest) {
    let db = test.setup_db(schema(SetPolicy::SetFirst)).await;

    let user = assert_ok!(
        db.create(
            "User",
            record! {
                name: "ann",
                posts: record! {
                    create: vec![record! { title: "first" }, record! { title: "second" }],
                },
            }
        )
        .await
    );

    assert_eq!(test.log().creates("Post"), 2);
    assert_eq!(post_ids(&db, &user).await, [Value::I32(1), Value::I32(2)]);
}

async fn missing_reference_leaves_storage_untouched(test: &mut DbTest) {
    let (db, user) = setup(test, SetPolicy::SetFirst).await;
    test.log().clear();

    let err = assert_err!(
        db.update(
            "User",
            record! { id: 1 },
            record! { name: "bob", posts: record! { connect: ids(&[1, 99]) } }
        )
        .await
    );
    assert!(err.is_record_not_found());
    assert_eq!(test.log().writes(), 0);

    let user = assert_some!(assert_ok!(db.find_one("User", record! { id: user.id().clone() }).await));
    assert_eq!(user.get("name"), Some(&Value::from("ann")));
    assert!(post_ids(&db, &user).await.is_empty());
}

async fn failing_nested_create_writes_nothing(test: &mut DbTest) {
    let db = test.setup_db(schema(SetPolicy::SetFirst)).await;

    let err = assert_err!(
        db.create(
            "User",
            record! {
                name: "ann",
                posts: record! {
                    create: vec![record! { title: "ok" }, record! { title: Value::Null }],
                },
            }
        )
        .await
    );
    assert!(err.is_resolution());
    assert_eq!(
        err.to_string(),
        "User.posts: resolution failed at Post.title: text fields cannot be set to null"
    );

    assert_eq!(test.log().writes(), 0);
    assert!(assert_ok!(db.find_many("User", record! {}).await).is_empty());
    assert!(assert_ok!(db.find_many("Post", record! {}).await).is_empty());
}

async fn failing_create_after_set_keeps_links(test: &mut DbTest) {
    let (db, user) = setup(test, SetPolicy::SetFirst).await;
    assert_ok!(
        db.update(
            "User",
            record! { id: 1 },
            record! { posts: record! { connect: ids(&[1]) } }
        )
        .await
    );
    test.log().clear();

    let err = assert_err!(
        db.update(
            "User",
            record! { id: 1 },
            record! {
                posts: record! {
                    set: ids(&[2]),
                    create: vec![record! { title: Value::Null }],
                },
            }
        )
        .await
    );
    assert!(err.is_resolution());
    assert_eq!(test.log().writes(), 0);
    assert_eq!(post_ids(&db, &user).await, [Value::I32(1)]);
}

async fn connecting_moves_a_one_end(test: &mut DbTest) {
    let (db, ann) = setup(test, SetPolicy::SetFirst).await;
    let bob = assert_ok!(db.create("User", record! { name: "bob" }).await);

    assert_ok!(
        db.update(
            "User",
            record! { id: 1 },
            record! { posts: record! { connect: ids(&[1, 2]) } }
        )
        .await
    );
    assert_ok!(
        db.update(
            "User",
            record! { id: 2 },
            record! { posts: record! { connect: ids(&[2]) } }
        )
        .await
    );

    // a post has one author, so post 2 left ann
    assert_eq!(post_ids(&db, &ann).await, [Value::I32(1)]);
    assert_eq!(post_ids(&db, &bob).await, [Value::I32(2)]);
}

async fn set_is_not_a_create_verb(test: &mut DbTest) {
    let db = test.setup_db(schema(SetPolicy::SetFirst)).await;
    assert_ok!(db.create("Post", record! { title: "a" }).await);

    let err = assert_err!(
        db.create(
            "User",
            record! { name: "ann", posts: record! { set: ids(&[1]) } }
        )
        .await
    );
    assert!(err.is_invalid_argument());
    assert_eq!(test.log().creates("User"), 0);
}

tests!(
    set_replaces_linked_records,
    set_runs_before_connect,
    exclusive_set_rejects_other_verbs,
    connect_and_disconnect,
    nested_create_links_new_records,
    missing_reference_leaves_storage_untouched,
    failing_nested_create_writes_nothing,
    failing_create_after_set_keeps_links,
    connecting_moves_a_one_end,
    set_is_not_a_create_verb,
);
