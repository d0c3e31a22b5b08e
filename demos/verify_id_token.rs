use firebase_jwt::FirebaseJwtVerifier;
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let token = match env::var("FIREBASE_ID_TOKEN") {
        Ok(value) => value,
        Err(_) => {
            eprintln!("FIREBASE_ID_TOKEN is not set. Skipping.");
            eprintln!(
                "Example: FIREBASE_PROJECT_ID=my-project FIREBASE_ID_TOKEN=eyJhbGciOi... cargo run --example verify_id_token"
            );
            return Ok(());
        }
    };
    let project_id = env::var("FIREBASE_PROJECT_ID")?;
    let tenant_id = env::var("FIREBASE_TENANT_ID").unwrap_or_default();

    let verifier = FirebaseJwtVerifier::builder(project_id)
        .tenant_id(tenant_id)
        .build()?;
    let claims = verifier.verify_id_token(&token).await?;

    println!("uid: {}", claims.uid);
    println!("claims: {}", serde_json::to_string_pretty(&claims)?);
    Ok(())
}
