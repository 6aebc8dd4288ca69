//! Repository tests against a real PostgreSQL database.
//!
//! Each test gets a fresh database with the migrations applied; point
//! `DATABASE_URL` at a server and run `cargo test -p storage -- --ignored`.

use sqlx::PgPool;
use storage::{
    dto::{
        athlete::{AthleteColumns, AthleteQuery, CreateAthleteRequest, UpdateAthleteRequest},
        category::{CategoryRef, CreateCategoryRequest},
        common::PaginationParams,
        training_center::{CreateTrainingCenterRequest, TrainingCenterRef},
    },
    error::StorageError,
    models::{Category, TrainingCenter},
    repository::{
        athlete::AthleteRepository, category::CategoryRepository,
        training_center::TrainingCenterRepository,
    },
};
use uuid::Uuid;

async fn seed(pool: &PgPool) -> (Category, TrainingCenter) {
    let category = CategoryRepository::new(pool)
        .create(
            &CreateCategoryRequest {
                nome: "Iniciante".to_string(),
            }
            .into_category(),
        )
        .await
        .unwrap();

    let center = TrainingCenterRepository::new(pool)
        .create(
            &CreateTrainingCenterRequest {
                nome: "CT Central".to_string(),
                endereco: "Rua das Flores, 100".to_string(),
                telefone: None,
                proprietario: "Marcos".to_string(),
            }
            .into_training_center(),
        )
        .await
        .unwrap();

    (category, center)
}

fn athlete_request(nome: &str, cpf: &str) -> CreateAthleteRequest {
    CreateAthleteRequest {
        nome: nome.to_string(),
        cpf: cpf.to_string(),
        idade: 25,
        peso: 80.0,
        altura: 1.80,
        sexo: "H".to_string(),
        categoria: CategoryRef {
            nome: "Iniciante".to_string(),
        },
        centro_treinamento: TrainingCenterRef {
            nome: "CT Central".to_string(),
        },
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn category_lookup_by_name_and_id(pool: PgPool) {
    let (category, _) = seed(&pool).await;
    let repo = CategoryRepository::new(&pool);

    let by_name = repo.find_by_name("Iniciante").await.unwrap().unwrap();
    assert_eq!(by_name.id, category.id);
    assert!(repo.find_by_name("Elite").await.unwrap().is_none());

    let by_id = repo.find_by_id(category.id).await.unwrap();
    assert_eq!(by_id.nome, "Iniciante");
    assert!(matches!(
        repo.find_by_id(Uuid::new_v4()).await,
        Err(StorageError::NotFound)
    ));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn duplicate_category_is_a_constraint_violation(pool: PgPool) {
    seed(&pool).await;

    let err = CategoryRepository::new(&pool)
        .create(
            &CreateCategoryRequest {
                nome: "Iniciante".to_string(),
            }
            .into_category(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, StorageError::ConstraintViolation(_)));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn listing_pages_carry_the_total(pool: PgPool) {
    let repo = CategoryRepository::new(&pool);
    for nome in ["A", "B", "C"] {
        repo.create(
            &CreateCategoryRequest {
                nome: nome.to_string(),
            }
            .into_category(),
        )
        .await
        .unwrap();
    }

    let (page, total) = repo.list(PaginationParams::new(2, 1)).await.unwrap();
    assert_eq!(total, 3);
    let names: Vec<_> = page.into_iter().map(|c| c.nome).collect();
    assert_eq!(names, vec!["B", "C"]);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn athlete_insert_rejects_duplicate_cpf(pool: PgPool) {
    let (category, center) = seed(&pool).await;
    let repo = AthleteRepository::new(&pool);

    repo.create(&athlete_request("João", "11122233344").to_athlete(category.id, center.id))
        .await
        .unwrap();
    let err = repo
        .create(&athlete_request("Maria", "11122233344").to_athlete(category.id, center.id))
        .await
        .unwrap_err();

    match err {
        StorageError::ConstraintViolation(msg) => assert!(msg.contains("11122233344")),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(repo.count().await.unwrap(), 1);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn athlete_insert_with_dangling_reference_is_invalid(pool: PgPool) {
    let (category, _) = seed(&pool).await;

    let err = AthleteRepository::new(&pool)
        .create(&athlete_request("João", "11122233344").to_athlete(category.id, Uuid::new_v4()))
        .await
        .unwrap_err();

    assert!(matches!(err, StorageError::InvalidReference(_)));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn search_combines_filters(pool: PgPool) {
    let (category, center) = seed(&pool).await;
    let repo = AthleteRepository::new(&pool);
    repo.create(&athlete_request("João", "11122233344").to_athlete(category.id, center.id))
        .await
        .unwrap();
    repo.create(&athlete_request("João", "55566677788").to_athlete(category.id, center.id))
        .await
        .unwrap();

    let by_name = repo
        .search(&AthleteQuery {
            nome: Some("João".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_name.len(), 2);

    let by_name_and_cpf = repo
        .search(&AthleteQuery {
            nome: Some("João".to_string()),
            cpf: Some("55566677788".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_name_and_cpf.len(), 1);
    assert_eq!(by_name_and_cpf[0].categoria_nome, "Iniciante");
    assert_eq!(by_name_and_cpf[0].centro_treinamento_nome, "CT Central");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn update_persists_only_patched_fields(pool: PgPool) {
    let (category, center) = seed(&pool).await;
    let repo = AthleteRepository::new(&pool);
    let created = repo
        .create(&athlete_request("João", "11122233344").to_athlete(category.id, center.id))
        .await
        .unwrap();

    let patch = UpdateAthleteRequest {
        nome: Some("João Silva".to_string()),
        idade: None,
    };
    let updated = repo.update(created.id, &patch).await.unwrap();

    assert_eq!(updated.nome, "João Silva");
    assert_eq!(updated.idade, created.idade);
    assert_eq!(updated.cpf, created.cpf);
    assert_eq!(updated.created_at, created.created_at);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn interleaved_patches_keep_each_others_fields(pool: PgPool) {
    let (category, center) = seed(&pool).await;
    let repo = AthleteRepository::new(&pool);
    let created = repo
        .create(&athlete_request("João", "11122233344").to_athlete(category.id, center.id))
        .await
        .unwrap();

    // First writer reads the row, then a second writer changes the age
    // before the first one commits its rename.
    let stale = repo.find_by_id(created.id).await.unwrap();
    let age_patch = UpdateAthleteRequest {
        nome: None,
        idade: Some(40),
    };
    repo.update(created.id, &age_patch).await.unwrap();

    let rename = UpdateAthleteRequest {
        nome: Some("Ana".to_string()),
        idade: None,
    };
    repo.update(stale.id, &rename).await.unwrap();

    let current = repo.find_by_id(created.id).await.unwrap();
    assert_eq!(current.nome, "Ana");
    assert_eq!(current.idade, 40);
    assert_eq!(stale.idade, 25);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn update_of_missing_athlete_is_not_found(pool: PgPool) {
    let repo = AthleteRepository::new(&pool);
    let patch = UpdateAthleteRequest {
        nome: Some("Ana".to_string()),
        idade: None,
    };

    assert!(matches!(
        repo.update(Uuid::new_v4(), &patch).await,
        Err(StorageError::NotFound)
    ));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn projection_returns_only_selected_columns(pool: PgPool) {
    let (category, center) = seed(&pool).await;
    let repo = AthleteRepository::new(&pool);
    repo.create(&athlete_request("João", "11122233344").to_athlete(category.id, center.id))
        .await
        .unwrap();

    let columns = AthleteColumns {
        categoria: true,
        ..Default::default()
    };
    let (rows, total) = repo
        .list_projection(columns, PaginationParams::default())
        .await
        .unwrap();

    assert_eq!(total, 1);
    assert_eq!(rows[0].categoria.as_deref(), Some("Iniciante"));
    assert!(rows[0].nome.is_none());
    assert!(rows[0].centro_treinamento.is_none());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn delete_removes_the_row(pool: PgPool) {
    let (category, center) = seed(&pool).await;
    let repo = AthleteRepository::new(&pool);
    let created = repo
        .create(&athlete_request("João", "11122233344").to_athlete(category.id, center.id))
        .await
        .unwrap();

    repo.delete(created.id).await.unwrap();

    assert!(matches!(repo.find_by_id(created.id).await, Err(StorageError::NotFound)));
    assert!(matches!(repo.delete(created.id).await, Err(StorageError::NotFound)));
}
