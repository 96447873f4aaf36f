use tests::prelude::*;

async fn invalid_schema_is_reported_on_connect(test: &mut DbTest) {
    let builder = lists!(
        ListDef::new("Post")
            .field(
                "status",
                select(SelectConfig {
                    default: Some("archived".to_string()),
                    ..SelectConfig::new(["draft", "published"])
                }),
            )
            .field("author", relationship(RelationshipConfig::one("Person.posts"))),
        ListDef::new("Post")
    );

    let err = assert_err!(test.try_setup_db(builder).await);
    assert!(err.is_invalid_schema());

    let issues: Vec<_> = err
        .schema_issues()
        .iter()
        .map(ToString::to_string)
        .collect();
    for expect in [
        "Post.status: default `archived` is not one of the enum's values",
        "Post.author: relation target `Person` is not registered",
        "Post: list is registered more than once",
    ] {
        assert!(issues.iter().any(|issue| issue == expect), "missing `{expect}` in {issues:#?}");
    }

    // arguments that name the missing list are reported too
    assert!(issues
        .iter()
        .any(|issue| issue.contains("argument refers to `PersonWhereInput`")));

    // nothing reached storage
    assert!(test.log().is_empty());
}

async fn relations_must_point_back(test: &mut DbTest) {
    let builder = lists!(
        ListDef::new("User").field("name", text(TextConfig::default())),
        ListDef::new("Post").field("author", relationship(RelationshipConfig::one("User.posts")))
    );

    let err = assert_err!(test.try_setup_db(builder).await);
    assert!(err.is_invalid_schema());
    assert_eq!(
        err.to_string(),
        "invalid schema: Post.author: `User.posts` is not a relation field"
    );
}

async fn valid_schema_compiles(test: &mut DbTest) {
    let db = test
        .setup_db(lists!(
            ListDef::new("User")
                .field("name", text(TextConfig::default()))
                .field("posts", relationship(RelationshipConfig::many("Post.author"))),
            ListDef::new("Post")
                .field("title", text(TextConfig::default()))
                .field("status", select(SelectConfig::new(["draft", "in_review"])))
                .field("author", relationship(RelationshipConfig::one("User.posts")))
        ))
        .await;

    let post = db.schema().expect_list("Post");
    assert_eq!(post.types().create.name, "PostCreateInput");

    let fields: Vec<_> = post.fields().map(|field| field.name()).collect();
    assert_eq!(fields, ["id", "title", "status", "author"]);

    let status = assert_some!(post.field("status"));
    let meta = assert_some!(status.admin_meta());
    assert_eq!(meta["options"][1]["label"], "In Review");
    assert_eq!(meta["options"][1]["value"], "in_review");
    assert_eq!(meta["isRequired"], true);
    assert!(post.field("title").unwrap().admin_meta().is_none());

    let author = assert_some!(post.field("author"));
    assert_eq!(author.label(), "Author");
    assert_eq!(author.views(), "strata/fields/relationship/views");
}

tests!(
    invalid_schema_is_reported_on_connect,
    relations_must_point_back,
    valid_schema_compiles,
);
