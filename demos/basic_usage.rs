//! Basic usage against a live REST API.
//!
//! ```bash
//! REST_CLIENT_BASE_ADDRESS=https://jsonplaceholder.typicode.com/ \
//! REST_CLIENT_CONTENT_TYPE=application/json \
//! RUST_LOG=rest_client=debug cargo run --example basic_usage
//! ```

use rest_client::{Error, RestClientBuilder};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Deserialize)]
struct Todo {
    id: u64,
    title: String,
    completed: bool,
}

#[derive(Debug, Serialize)]
struct NewTodo<'a> {
    title: &'a str,
    completed: bool,
}

#[tokio::main]
async fn main() -> rest_client::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut client = RestClientBuilder::from_env().build()?;
    if let Ok(token) = std::env::var("REST_CLIENT_TOKEN") {
        client.set_bearer_token(&token);
    }

    let todo: Todo = client.get_as("todos/1").await?;
    println!("fetched #{} {:?} (completed: {})", todo.id, todo.title, todo.completed);

    let created: Todo = client
        .post_as(
            "todos",
            &NewTodo {
                title: "write the docs",
                completed: false,
            },
        )
        .await?;
    println!("created #{}", created.id);

    let response = client.delete("todos/1").await?;
    println!("delete answered {}", response.status());

    match client.get_as::<Todo>("todos/does-not-exist").await {
        Err(Error::ApiCall { status, reason }) => println!("expected failure: {} {}", status, reason),
        Err(e) => return Err(e),
        Ok(todo) => println!("unexpectedly found {:?}", todo),
    }

    Ok(())
}
