use pretty_assertions::assert_eq;
use tests::prelude::*;

fn schema() -> strata::db::Builder {
    lists!(
        ListDef::new("User")
            .field("name", text(TextConfig::default()))
            .field("posts", relationship(RelationshipConfig::many("Post.author"))),
        ListDef::new("Post")
            .field("title", text(TextConfig::default()))
            .field(
                "rank",
                integer(IntegerConfig {
                    is_nullable: true,
                    ..IntegerConfig::default()
                }),
            )
            .field(
                "status",
                select(SelectConfig {
                    default: Some("draft".to_string()),
                    ..SelectConfig::new(["draft", "published"])
                }),
            )
            .field("author", relationship(RelationshipConfig::one("User.posts")))
    )
}

/// ann wrote "alpha" and "beta", bob wrote "gamma", nobody wrote "delta"
/// and carol wrote nothing.
async fn seed(test: &mut DbTest) -> Db {
    let db = test.setup_db(schema()).await;

    for name in ["ann", "bob", "carol"] {
        assert_ok!(db.create("User", record! { name: name }).await);
    }

    let posts = [
        ("alpha", Some(3), "published", Some(1)),
        ("beta", Some(1), "draft", Some(1)),
        ("gamma", None, "published", Some(2)),
        ("delta", Some(2), "draft", None),
    ];

    for (title, rank, status, author) in posts {
        let mut data = record! { title: title, rank: rank, status: status };
        if let Some(author) = author {
            data.insert("author", record! { connect: record! { id: author } });
        }
        assert_ok!(db.create("Post", data).await);
    }

    db
}

async fn titles(db: &Db, args: strata::stmt::ValueRecord) -> Vec<String> {
    let items = assert_ok!(db.find_many("Post", args).await);
    items
        .iter()
        .filter_map(|item| item.get("title").and_then(Value::as_str).map(str::to_string))
        .collect()
}

async fn names(db: &Db, filter: strata::stmt::ValueRecord) -> Vec<String> {
    let items = assert_ok!(
        db.find_many(
            "User",
            record! { where: filter, orderBy: record! { id: "asc" } }
        )
        .await
    );
    items
        .iter()
        .filter_map(|item| item.get("name").and_then(Value::as_str).map(str::to_string))
        .collect()
}

fn by_id() -> Value {
    Value::from(record! { id: "asc" })
}

async fn scalar_operators(test: &mut DbTest) {
    let db = seed(test).await;

    let filter = |op: &str, value: Value| {
        let mut ops = strata::stmt::ValueRecord::new();
        ops.insert(op, value);
        record! { where: record! { title: ops }, orderBy: by_id() }
    };

    assert_eq!(titles(&db, filter("equals", "beta".into())).await, ["beta"]);
    assert_eq!(
        titles(&db, filter("not", "beta".into())).await,
        ["alpha", "gamma", "delta"]
    );
    assert_eq!(
        titles(&db, filter("in", vec!["alpha", "delta"].into())).await,
        ["alpha", "delta"]
    );
    assert_eq!(
        titles(&db, filter("notIn", vec!["alpha", "delta"].into())).await,
        ["beta", "gamma"]
    );
    assert_eq!(titles(&db, filter("contains", "mm".into())).await, ["gamma"]);
    assert_eq!(titles(&db, filter("startsWith", "de".into())).await, ["delta"]);
    assert_eq!(
        titles(&db, filter("endsWith", "a".into())).await,
        ["alpha", "beta", "gamma", "delta"]
    );
    assert_eq!(
        titles(&db, filter("gt", "beta".into())).await,
        ["gamma", "delta"]
    );

    let ranked = record! {
        where: record! { rank: record! { gte: 2, lte: 3 } },
        orderBy: by_id(),
    };
    assert_eq!(titles(&db, ranked).await, ["alpha", "delta"]);

    let nested_not = record! {
        where: record! { rank: record! { not: record! { in: vec![1, 2] } } },
        orderBy: by_id(),
    };
    assert_eq!(titles(&db, nested_not).await, ["alpha", "gamma"]);

    let unranked = record! {
        where: record! { rank: record! { equals: Value::Null } },
    };
    assert_eq!(titles(&db, unranked).await, ["gamma"]);

    let published = record! {
        where: record! { status: record! { equals: "published" } },
        orderBy: by_id(),
    };
    assert_eq!(titles(&db, published).await, ["alpha", "gamma"]);
}

async fn insensitive_string_filters(test: &mut DbTest) {
    let db = seed(test).await;

    let title = |filter: strata::stmt::ValueRecord| {
        record! { where: record! { title: filter }, orderBy: by_id() }
    };

    assert_eq!(
        titles(&db, title(record! { equals: "BETA", mode: "insensitive" })).await,
        ["beta"]
    );
    assert_eq!(
        titles(&db, title(record! { contains: "PH", mode: "insensitive" })).await,
        ["alpha"]
    );
    assert!(titles(&db, title(record! { contains: "PH", mode: "default" }))
        .await
        .is_empty());

    // the mode carries into `not`
    assert_eq!(
        titles(
            &db,
            title(record! { not: record! { startsWith: "A" }, mode: "insensitive" })
        )
        .await,
        ["beta", "gamma", "delta"]
    );

    let err = assert_err!(
        db.find_many("Post", title(record! { equals: "beta", mode: "loud" }))
            .await
    );
    assert!(err.is_invalid_argument());
}

async fn combinators(test: &mut DbTest) {
    let db = seed(test).await;

    let or = record! {
        where: record! {
            OR: vec![
                record! { title: record! { equals: "alpha" } },
                record! { rank: record! { equals: 2 } },
            ],
        },
        orderBy: by_id(),
    };
    assert_eq!(titles(&db, or).await, ["alpha", "delta"]);

    let and = record! {
        where: record! {
            AND: vec![
                record! { status: record! { equals: "draft" } },
                record! { rank: record! { lt: 2 } },
            ],
        },
    };
    assert_eq!(titles(&db, and).await, ["beta"]);

    // NOT over a list excludes records matching any entry
    let not = record! {
        where: record! {
            NOT: vec![
                record! { title: record! { equals: "alpha" } },
                record! { title: record! { equals: "beta" } },
            ],
        },
        orderBy: by_id(),
    };
    assert_eq!(titles(&db, not).await, ["gamma", "delta"]);

    let empty = record! { where: record! {}, orderBy: by_id() };
    assert_eq!(titles(&db, empty).await.len(), 4);
}

async fn relation_filters(test: &mut DbTest) {
    let db = seed(test).await;

    let by_author = record! {
        where: record! { author: record! { name: record! { equals: "ann" } } },
        orderBy: by_id(),
    };
    assert_eq!(titles(&db, by_author).await, ["alpha", "beta"]);

    let orphan = record! { where: record! { author: Value::Null } };
    assert_eq!(titles(&db, orphan).await, ["delta"]);

    let published = || record! { status: record! { equals: "published" } };

    // carol has no posts: `every` and `none` hold, `some` does not
    assert_eq!(
        names(&db, record! { posts: record! { every: published() } }).await,
        ["bob", "carol"]
    );
    assert_eq!(
        names(&db, record! { posts: record! { some: published() } }).await,
        ["ann", "bob"]
    );
    assert_eq!(
        names(&db, record! { posts: record! { none: published() } }).await,
        ["carol"]
    );
    assert_eq!(
        names(&db, record! { posts: record! { none: record! {} } }).await,
        ["carol"]
    );
}

async fn ordering_and_pagination(test: &mut DbTest) {
    let db = seed(test).await;

    let by_rank = record! { orderBy: vec![record! { rank: "desc" }] };
    assert_eq!(
        titles(&db, by_rank).await,
        ["alpha", "delta", "beta", "gamma"]
    );

    let multi_key = record! {
        orderBy: vec![record! { status: "asc" }, record! { title: "desc" }],
    };
    assert_eq!(
        titles(&db, multi_key).await,
        ["delta", "beta", "gamma", "alpha"]
    );

    let page = record! { orderBy: by_id(), skip: 1, take: 2 };
    assert_eq!(titles(&db, page).await, ["beta", "gamma"]);

    let after = record! { orderBy: by_id(), cursor: record! { id: 2 }, take: 1 };
    assert_eq!(titles(&db, after).await, ["gamma"]);

    let err = assert_err!(
        db.find_many("Post", record! { orderBy: by_id(), skip: -1 })
            .await
    );
    assert!(err.is_invalid_argument());

    let err = assert_err!(
        db.find_many(
            "Post",
            record! { orderBy: record! { title: "asc", rank: "asc" } }
        )
        .await
    );
    assert!(err.is_invalid_argument());

    let err = assert_err!(
        db.find_many("Post", record! { orderBy: by_id(), first: 1 })
            .await
    );
    assert!(err.is_invalid_argument());
}

async fn cursor_without_order_is_rejected(test: &mut DbTest) {
    let db = seed(test).await;

    let err = assert_err!(
        db.find_many("Post", record! { cursor: record! { id: 2 } })
            .await
    );
    assert!(err.is_invalid_argument());
    assert_eq!(
        err.to_string(),
        "invalid argument: `cursor` requires a non-empty `orderBy`"
    );
}

async fn cursor_without_order_can_warn(test: &mut DbTest) {
    let mut builder = schema();
    builder.config(Config {
        cursor: CursorPolicy::Warn,
        ..Config::default()
    });
    let db = test.setup_db(builder).await;

    for title in ["a", "b", "c"] {
        assert_ok!(db.create("Post", record! { title: title }).await);
    }

    // insertion order stands in for the missing orderBy
    let rest = record! { cursor: record! { id: 1 } };
    assert_eq!(titles(&db, rest).await, ["b", "c"]);
}

async fn count_and_find_one(test: &mut DbTest) {
    let db = seed(test).await;

    let drafts = record! { status: record! { equals: "draft" } };
    assert_eq!(assert_ok!(db.count("Post", drafts).await), 2);
    assert_eq!(assert_ok!(db.count("Post", record! {}).await), 4);

    let post = assert_some!(assert_ok!(db.find_one("Post", record! { id: "3" }).await));
    assert_eq!(post.get("title"), Some(&Value::from("gamma")));
    assert_none!(assert_ok!(db.find_one("Post", record! { id: 99 }).await));

    // only unique fields identify a record
    let err = assert_err!(db.find_one("Post", record! { title: "gamma" }).await);
    assert!(err.is_invalid_argument());

    let err = assert_err!(
        db.find_one("Post", record! { id: 1, title: "alpha" })
            .await
    );
    assert!(err.is_invalid_argument());
}

tests!(
    scalar_operators,
    insensitive_string_filters,
    combinators,
    relation_filters,
    ordering_and_pagination,
    cursor_without_order_is_rejected,
    cursor_without_order_can_warn,
    count_and_find_one,
);
