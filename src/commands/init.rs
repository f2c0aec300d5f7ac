use std::path::Path;

use todos::db::Store;

pub fn run(db_path: &Path) -> Result<(), String> {
    let store = Store::new(db_path);
    store
        .migrate()
        .map_err(|e| format!("failed to initialize database: {e}"))?;
    let version = store
        .schema_version()
        .map_err(|e| format!("failed to read schema version: {e}"))?;

    println!("Initialized todos database at {}", db_path.display());
    println!("Schema version: {version}");
    Ok(())
}
