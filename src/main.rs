use myview::{Autocomplete, Error, MySqlSchema, ParseOptions, Parser, Result, config};
use tokio::io::AsyncReadExt;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Reads SQL from stdin. Without arguments prints the parse tree; with a byte offset
/// prints completions for that cursor against `MYVIEW_DATABASE_URL`.
#[tokio::main]
async fn main() -> Result {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut sql = String::new();
    tokio::io::stdin().read_to_string(&mut sql).await?;

    let Some(cursor) = std::env::args().nth(1) else {
        let parsed = Parser::new(&sql)
            .with_options(ParseOptions::from_config())
            .parse();
        print!("{}", parsed.render());
        return Ok(());
    };
    let cursor: usize = cursor
        .parse()
        .map_err(|_| Error::Config(format!("cursor must be a byte offset, got {cursor:?}")))?;
    let url = config()
        .database_url
        .as_deref()
        .ok_or_else(|| Error::Config("MYVIEW_DATABASE_URL is not set".to_string()))?;

    let source = MySqlSchema::connect(url).await?;
    info!(cursor, "completing stdin");
    let completion = Autocomplete::new(source).suggestions(&sql, cursor).await;
    for suggestion in completion.suggestions {
        println!("{suggestion}");
    }
    Ok(())
}
