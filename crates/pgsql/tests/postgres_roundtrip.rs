use pgsql::{RowMap, SqlStatement, Value, from, insert, raw, select, sql};
use tokio_postgres::NoTls;

type TestResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

async fn connect(
    test: &str,
) -> Result<Option<tokio_postgres::Client>, tokio_postgres::Error> {
    dotenvy::dotenv().ok();
    let database_url = match std::env::var("DATABASE_URL") {
        Ok(v) => v,
        Err(_) => {
            eprintln!("DATABASE_URL is not set; skipping {test}");
            return Ok(None);
        }
    };

    let (client, connection) = tokio_postgres::connect(&database_url, NoTls).await?;
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            eprintln!("connection error: {e}");
        }
    });
    Ok(Some(client))
}

#[tokio::test]
async fn params_bind_with_column_types() -> TestResult {
    let Some(client) = connect("params_bind_with_column_types").await? else {
        return Ok(());
    };

    let built = select(sql(
        "?::int2 as a, ?::int4 as b, ?::int8 as c, ?::float4 as d, ?::text as e, ?::bool as f",
        (1, 2, 3, 1.5f64, "x", true),
    ))
    .build()?;
    let row = client.query_one(&built.sql, &built.params_ref()).await?;

    assert_eq!(row.get::<_, i16>("a"), 1);
    assert_eq!(row.get::<_, i32>("b"), 2);
    assert_eq!(row.get::<_, i64>("c"), 3);
    assert_eq!(row.get::<_, f32>("d"), 1.5);
    assert_eq!(row.get::<_, String>("e"), "x");
    assert!(row.get::<_, bool>("f"));
    Ok(())
}

#[tokio::test]
async fn insert_and_select_roundtrip() -> TestResult {
    let Some(client) = connect("insert_and_select_roundtrip").await? else {
        return Ok(());
    };

    client
        .batch_execute(
            "create temp table pgsql_people (
                id bigserial primary key,
                name text not null,
                age int4,
                tags jsonb,
                created_at timestamptz not null
            )",
        )
        .await?;

    let row = RowMap::new()
        .set("name", "Alice")
        .set("age", 30)
        .set("tags", serde_json::json!(["a", "b"]))
        .set("created_at", raw("now()"));
    let built = insert("pgsql_people").data(&row).returning("id").build()?;
    let id: i64 = client
        .query_one(&built.sql, &built.params_ref())
        .await?
        .get(0);

    let built = select("name, age")
        .from("pgsql_people")
        .where_("id = ?", [Value::Int(id)])
        .where_("age is null or age > ?", [18])
        .build()?;
    let row = client.query_one(&built.sql, &built.params_ref()).await?;
    assert_eq!(row.get::<_, String>("name"), "Alice");
    assert_eq!(row.get::<_, Option<i32>>("age"), Some(30));

    let built = from("pgsql_people")
        .where_("tags = ?", [serde_json::json!(["a", "b"])])
        .build()?;
    assert_eq!(client.query(&built.sql, &built.params_ref()).await?.len(), 1);
    Ok(())
}
