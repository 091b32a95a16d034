use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use tracing::{error, info};

/// Opens the process-wide client and verifies it with a ping. One attempt,
/// no retry; a failure here is fatal to startup.
pub async fn connect(mongo_url: &str, db_name: &str) -> Result<(Client, Database), mongodb::error::Error> {
    let options = ClientOptions::parse(mongo_url).await?;
    let client = Client::with_options(options)?;
    let database = client.database(db_name);

    if let Err(e) = database.run_command(doc! { "ping": 1 }, None).await {
        error!("failed to connect to MongoDB: {}", e);
        return Err(e);
    }
    info!(database = db_name, "connected to MongoDB");

    Ok((client, database))
}
