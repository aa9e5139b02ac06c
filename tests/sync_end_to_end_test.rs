use anyhow::Result;
use httpmock::prelude::*;
use image::RgbImage;
use shopctl::{
    LocalImageReader, LocalStorage, NoProgress, ShopConfig, ShopifyClient, StoreConfig,
    SyncEngine, TypeStatus,
};
use std::path::Path;
use tempfile::TempDir;

const PRODUCTS_PATH: &str = "/admin/api/2019-07/products.json";

const SHIRT_CONFIG: &str = r#"{
    "type": "Shirt",
    "dataPath": "data/shirts.csv",
    "title": "{{ name }}",
    "specifications": [
        { "key": "color", "label": "Color" },
        { "key": "size", "label": "Size" }
    ],
    "image": {
        "key": "image",
        "charIndices": [0, 2],
        "filenamePattern": "shirt-##",
        "dir": "images"
    },
    "option1": { "key": "size", "label": "Size" }
}"#;

const SHIRTS_CSV: &str = "name,color,size,weight,sku,image,vendor\n\
                          Shirt,Red,S,0.2,SH-S,R1D,Acme\n\
                          Shirt,Red,M,0.3,SH-M,R1D,Acme\n";

fn write_shop(root: &Path, csv: &str) -> Result<()> {
    std::fs::create_dir_all(root.join("data"))?;
    std::fs::create_dir_all(root.join("images"))?;
    std::fs::write(root.join("shopctl.json"), r#"{ "products": ["shirt.json"] }"#)?;
    std::fs::write(root.join("shirt.json"), SHIRT_CONFIG)?;
    std::fs::write(root.join("data/shirts.csv"), csv)?;
    RgbImage::new(4, 4).save(root.join("images/shirt-RD.jpg"))?;
    Ok(())
}

fn engine(server: &MockServer) -> SyncEngine<ShopifyClient, LocalImageReader, LocalStorage, NoProgress> {
    let store = StoreConfig::new(server.base_url(), "key", "secret");
    SyncEngine::new(
        ShopifyClient::new(store),
        LocalImageReader::default(),
        LocalStorage::default(),
        NoProgress,
    )
}

/// 兩列共用標題 "Shirt"，只差在 size：應建立一個含兩個變體的產品
#[tokio::test]
async fn test_two_sizes_become_one_product() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_shop(temp_dir.path(), SHIRTS_CSV)?;

    let server = MockServer::start();
    let create_mock = server.mock(|when, then| {
        when.method(POST)
            .path(PRODUCTS_PATH)
            .header("authorization", "Basic a2V5OnNlY3JldA==")
            .body_contains("\"title\":\"Shirt\"")
            .body_contains("\"options\":[{\"name\":\"Size\"}]")
            .body_contains("\"option1\":\"S\"")
            .body_contains("\"option1\":\"M\"")
            .body_contains("\"key\":\"Color\",\"value\":\"Red\"")
            .body_contains("\"filename\":\"shirt-RD.jpg\"");
        then.status(201)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "product": {
                    "id": 1001,
                    "title": "Shirt",
                    "variants": [{ "id": 2001 }, { "id": 2002 }]
                }
            }));
    });

    let shop = ShopConfig::from_file(temp_dir.path().join("shopctl.json"))?;
    let report = engine(&server).run(&shop).await?;

    create_mock.assert_hits(1);
    assert_eq!(report.outcomes.len(), 1);
    assert_eq!(
        report.outcomes[0].status,
        TypeStatus::Synced { groups: 1, rows: 2 }
    );

    let written = std::fs::read_to_string(temp_dir.path().join("data/shirts.csv"))?;
    assert_eq!(
        written,
        "name,color,size,weight,sku,image,vendor,product_id,variant_id\n\
         Shirt,Red,S,0.2,SH-S,R1D,Acme,1001,2001\n\
         Shirt,Red,M,0.3,SH-M,R1D,Acme,1001,2002\n"
    );

    Ok(())
}

#[tokio::test]
async fn test_rerun_with_assigned_ids_is_idempotent() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let synced = "name,color,size,weight,sku,image,vendor,product_id,variant_id\n\
                  Shirt,Red,S,0.2,SH-S,R1D,Acme,1001,2001\n\
                  Shirt,Red,M,0.3,SH-M,R1D,Acme,1001,2002\n";
    write_shop(temp_dir.path(), synced)?;

    let server = MockServer::start();
    let create_mock = server.mock(|when, then| {
        when.method(POST).path(PRODUCTS_PATH);
        then.status(201).json_body(serde_json::json!({ "product": { "id": 1 } }));
    });

    let shop = ShopConfig::from_file(temp_dir.path().join("shopctl.json"))?;
    let report = engine(&server).run(&shop).await?;

    create_mock.assert_hits(0);
    assert_eq!(report.outcomes[0].status, TypeStatus::Skipped);
    assert_eq!(
        std::fs::read(temp_dir.path().join("data/shirts.csv"))?,
        synced.as_bytes()
    );

    Ok(())
}

#[tokio::test]
async fn test_rejected_submission_leaves_file_untouched() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_shop(temp_dir.path(), SHIRTS_CSV)?;

    let server = MockServer::start();
    let create_mock = server.mock(|when, then| {
        when.method(POST).path(PRODUCTS_PATH);
        then.status(422)
            .json_body(serde_json::json!({ "errors": { "title": ["can't be blank"] } }));
    });

    let shop = ShopConfig::from_file(temp_dir.path().join("shopctl.json"))?;
    let report = engine(&server).run(&shop).await?;

    create_mock.assert_hits(1);
    assert!(report.has_failures());
    match &report.outcomes[0].status {
        TypeStatus::Failed { error } => {
            assert!(error.contains("422"));
            assert!(error.contains("payload"));
        }
        other => panic!("unexpected status: {other:?}"),
    }
    assert_eq!(
        std::fs::read_to_string(temp_dir.path().join("data/shirts.csv"))?,
        SHIRTS_CSV
    );

    Ok(())
}

#[tokio::test]
async fn test_missing_product_config_aborts_run() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(
        temp_dir.path().join("shopctl.json"),
        r#"{ "products": ["missing.json"] }"#,
    )?;

    let server = MockServer::start();
    let shop = ShopConfig::from_file(temp_dir.path().join("shopctl.json"))?;
    let result = engine(&server).run(&shop).await;

    assert!(matches!(result, Err(shopctl::SyncError::ConfigError { .. })));
    Ok(())
}
