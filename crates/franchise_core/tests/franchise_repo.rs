use franchise_core::db::{open_db, open_db_in_memory};
use franchise_core::{
    Branch, Franchise, FranchiseRepository, Product, RepoError, SqliteFranchiseRepository,
};
use rusqlite::Connection;

fn memory_repo() -> SqliteFranchiseRepository {
    SqliteFranchiseRepository::try_new(open_db_in_memory().unwrap()).unwrap()
}

#[tokio::test]
async fn save_assigns_id_and_find_by_id_roundtrips() {
    let repo = memory_repo();

    let saved = repo.save(Franchise::new("Burger Hut")).await.unwrap();
    assert!(saved.is_persisted());
    assert!(uuid::Uuid::parse_str(&saved.id).is_ok());

    let loaded = repo.find_by_id(&saved.id).await.unwrap().unwrap();
    assert_eq!(loaded, saved);
}

#[tokio::test]
async fn save_keeps_caller_provided_id() {
    let repo = memory_repo();

    let saved = repo
        .save(Franchise::with_id("franchise-1", "Burger Hut"))
        .await
        .unwrap();
    assert_eq!(saved.id, "franchise-1");
}

#[tokio::test]
async fn save_replaces_whole_document() {
    let repo = memory_repo();
    let mut franchise = repo.save(Franchise::new("Burger Hut")).await.unwrap();

    let mut branch = Branch::new("Centro");
    branch.products.push(Product::new("Fries", 12));
    franchise.branches.push(branch);
    franchise.name = "Burger Hut Group".to_string();
    repo.save(franchise.clone()).await.unwrap();

    let loaded = repo.find_by_id(&franchise.id).await.unwrap().unwrap();
    assert_eq!(loaded.name, "Burger Hut Group");
    assert_eq!(loaded.branches.len(), 1);
    assert_eq!(loaded.branches[0].products[0].stock, 12);
    assert_eq!(repo.find_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn find_by_id_returns_none_for_unknown_id() {
    let repo = memory_repo();
    assert!(repo.find_by_id("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn find_all_follows_insertion_order_across_updates() {
    let repo = memory_repo();
    let first = repo.save(Franchise::new("First")).await.unwrap();
    let second = repo.save(Franchise::new("Second")).await.unwrap();

    let mut renamed = first.clone();
    renamed.name = "First renamed".to_string();
    repo.save(renamed).await.unwrap();

    let ids = repo
        .find_all()
        .await
        .unwrap()
        .into_iter()
        .map(|franchise| franchise.id)
        .collect::<Vec<_>>();
    assert_eq!(ids, vec![first.id, second.id]);
}

#[tokio::test]
async fn delete_by_id_reports_whether_a_document_was_removed() {
    let repo = memory_repo();
    let saved = repo.save(Franchise::new("Burger Hut")).await.unwrap();

    assert!(repo.delete_by_id(&saved.id).await.unwrap());
    assert!(!repo.delete_by_id(&saved.id).await.unwrap());
    assert!(repo.find_by_id(&saved.id).await.unwrap().is_none());
}

#[tokio::test]
async fn save_rejects_blank_names_without_writing() {
    let repo = memory_repo();

    let err = repo.save(Franchise::new("  ")).await.unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    assert!(repo.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn documents_survive_reopening_the_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("franchises.sqlite3");

    let saved = {
        let repo = SqliteFranchiseRepository::try_new(open_db(&path).unwrap()).unwrap();
        let mut franchise = Franchise::new("Burger Hut");
        franchise.branches.push(Branch::new("Centro"));
        repo.save(franchise).await.unwrap()
    };

    let reopened = SqliteFranchiseRepository::try_new(open_db(&path).unwrap()).unwrap();
    let loaded = reopened.find_by_id(&saved.id).await.unwrap().unwrap();
    assert_eq!(loaded, saved);
}

#[tokio::test]
async fn corrupted_documents_are_reported_as_invalid_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("franchises.sqlite3");

    let conn = open_db(&path).unwrap();
    conn.execute(
        "INSERT INTO franchises (id, name, document) VALUES ('broken', 'x', '{not json');",
        [],
    )
    .unwrap();
    let repo = SqliteFranchiseRepository::try_new(conn).unwrap();

    let err = repo.find_by_id("broken").await.unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
    assert!(matches!(
        repo.find_all().await.unwrap_err(),
        RepoError::InvalidData(_)
    ));
}

#[test]
fn try_new_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let err = SqliteFranchiseRepository::try_new(conn)
        .err()
        .expect("unmigrated connection must be rejected");
    assert!(matches!(
        err,
        RepoError::UninitializedConnection {
            actual_version: 0,
            ..
        }
    ));
}
