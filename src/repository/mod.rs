pub mod catalog_repo;
pub mod notification_repo;
pub mod quote_repo;
pub mod repository_error;

use crate::config::mongo_conf::MongoConfig;
use mongodb::{
    options::{ClientOptions, Credential},
    Client, Database,
};

/// Open the MongoDB database handle shared by the repositories.
pub async fn connect(config: &MongoConfig) -> Result<Database, mongodb::error::Error> {
    let mut client_options = ClientOptions::parse(&config.uri).await?;
    client_options.app_name = Some("AluquoteBackend".to_string());
    client_options.max_pool_size = Some(config.pool_size);
    client_options.connect_timeout = Some(std::time::Duration::from_secs(
        config.connection_timeout_secs,
    ));

    if let (Some(ref username), Some(ref password)) = (&config.username, &config.password) {
        client_options.credential = Some(
            Credential::builder()
                .username(username.clone())
                .password(password.clone())
                .build(),
        );
    }

    let client = Client::with_options(client_options)?;
    Ok(client.database(&config.database))
}
