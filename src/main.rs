use sfbackend::sql::{Aggregate, Count, SelectQuery, SqlDialect};
use sfbackend::{standard_schema, Account, BackendConfig, Lead, ModelRouter, SalesforceModel};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== Aggregate Demo ===\n");

    let counts = [
        ("Count(\"*\")", Count::new("*")),
        ("Count(\"Id\")", Count::new("Id")),
        ("Count(\"Industry\", distinct)", Count::new("Industry").distinct(true)),
        ("Count(\"*\", distinct)", Count::new("*").distinct(true)),
    ];
    for (label, count) in &counts {
        match count.as_sql() {
            Ok(sql) => println!("  {:<32} {}", label, sql),
            Err(e) => eprintln!("  {:<32} error: {}", label, e),
        }
    }
    println!();

    println!("--- Queries ---");
    let queries = [
        SelectQuery::new("Account").count(Count::new("*")),
        SelectQuery::new("Account")
            .field("Industry")
            .count(Count::new("Id"))
            .aggregate(Aggregate::max("Name")),
        SelectQuery::new("Lead")
            .fields(Lead::describe().field_names())
            .filter("LastName", "O'Brien")
            .limit(10),
    ];
    for query in &queries {
        for dialect in [SqlDialect::Soql, SqlDialect::Ansi] {
            match query.to_sql(dialect) {
                Ok(sql) => println!("  {:?}: {}", dialect, sql),
                Err(e) => eprintln!("  {:?}: error: {}", dialect, e),
            }
        }
    }
    println!();

    println!("--- Objects ---");
    let config = BackendConfig::default();
    let router = ModelRouter::new(&config, standard_schema());
    for object in [Account::describe(), Lead::describe()] {
        println!(
            "Object: {} ({} fields, routed to {:?}, migrations allowed: {})",
            object.name,
            object.fields().count(),
            router.db_for_read(&object),
            router.allow_migrate(&object)
        );
        for field in object.fields() {
            let mut line = format!("    - {} ({}", field.name, field.field_type.as_str());
            if let Some(max) = field.max_length {
                line.push_str(&format!(", max {}", max));
            }
            if field.primary_key {
                line.push_str(", primary key");
            }
            line.push(')');
            if let Some(values) = &field.picklist_values {
                line.push_str(&format!(" [{} choices]", values.len()));
            }
            println!("{}", line);
        }
        println!();
    }

    println!("--- Records ---");
    let mut account = Account::new("Acme Corporation");
    account.industry = Some("Mining".to_string());
    println!("  Account: {}", account);
    if let Err(e) = account.validate() {
        println!("    {}", e);
    }

    let lead = Lead::new("Ada", "Lovelace").with_email("ada@example.com");
    println!("  Lead: {}", lead);
    match lead.validate() {
        Ok(()) => println!("    valid"),
        Err(e) => println!("    {}", e),
    }
}
