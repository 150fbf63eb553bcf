//! Database query functions (Data Access Objects).
//!
//! This module centralizes all direct database operations, providing
//! reusable functions for interacting with the store and abstracting the
//! query logic from higher-level services and API handlers. Every function
//! takes an executor so callers decide whether it runs on the pool or
//! inside a transaction.

use sqlx::{QueryBuilder, Sqlite, SqliteExecutor};
use uuid::Uuid;

use crate::database::models::{Application, Pet, PetFilter, Shelter, User};

const SHELTER_COLUMNS: &str =
    "id, name, location, contact_email, contact_phone, created_at, updated_at";
const USER_COLUMNS: &str =
    "id, email, password_hash, role, shelter_ref, created_at, updated_at";
const PET_COLUMNS: &str = "id, name, species, breed, age, gender, size, description, \
     image_url, status, shelter_id, created_at, updated_at";
const APPLICATION_COLUMNS: &str = "id, applicant_name, applicant_email, applicant_phone, \
     message, status, pet_id, created_at, updated_at";

pub async fn insert_shelter(
    exec: impl SqliteExecutor<'_>,
    shelter: &Shelter,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO shelters (id, name, location, contact_email, contact_phone, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(shelter.id)
    .bind(&shelter.name)
    .bind(&shelter.location)
    .bind(&shelter.contact_email)
    .bind(&shelter.contact_phone)
    .bind(shelter.created_at)
    .bind(shelter.updated_at)
    .execute(exec)
    .await?;
    Ok(())
}

pub async fn list_shelters(exec: impl SqliteExecutor<'_>) -> Result<Vec<Shelter>, sqlx::Error> {
    sqlx::query_as(&format!(
        "SELECT {SHELTER_COLUMNS} FROM shelters ORDER BY created_at, id"
    ))
    .fetch_all(exec)
    .await
}

pub async fn shelter_by_id(
    exec: impl SqliteExecutor<'_>,
    id: Uuid,
) -> Result<Option<Shelter>, sqlx::Error> {
    sqlx::query_as(&format!("SELECT {SHELTER_COLUMNS} FROM shelters WHERE id = ?"))
        .bind(id)
        .fetch_optional(exec)
        .await
}

pub async fn shelters_by_ids(
    exec: impl SqliteExecutor<'_>,
    ids: &[Uuid],
) -> Result<Vec<Shelter>, sqlx::Error> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let mut query: QueryBuilder<Sqlite> =
        QueryBuilder::new(format!("SELECT {SHELTER_COLUMNS} FROM shelters WHERE id IN ("));
    let mut separated = query.separated(", ");
    for id in ids {
        separated.push_bind(*id);
    }
    query.push(")");
    query.build_query_as().fetch_all(exec).await
}

pub async fn shelter_exists(exec: impl SqliteExecutor<'_>, id: Uuid) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM shelters WHERE id = ?)")
        .bind(id)
        .fetch_one(exec)
        .await
}

pub async fn update_shelter(
    exec: impl SqliteExecutor<'_>,
    shelter: &Shelter,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE shelters SET name = ?, location = ?, contact_email = ?, contact_phone = ?, \
         updated_at = ? WHERE id = ?",
    )
    .bind(&shelter.name)
    .bind(&shelter.location)
    .bind(&shelter.contact_email)
    .bind(&shelter.contact_phone)
    .bind(shelter.updated_at)
    .bind(shelter.id)
    .execute(exec)
    .await?;
    Ok(())
}

pub async fn insert_user(exec: impl SqliteExecutor<'_>, user: &User) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO users (id, email, password_hash, role, shelter_ref, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(user.id)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(user.role)
    .bind(user.shelter_ref)
    .bind(user.created_at)
    .bind(user.updated_at)
    .execute(exec)
    .await?;
    Ok(())
}

pub async fn user_by_email(
    exec: impl SqliteExecutor<'_>,
    email: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?"))
        .bind(email)
        .fetch_optional(exec)
        .await
}

pub async fn insert_pet(exec: impl SqliteExecutor<'_>, pet: &Pet) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO pets (id, name, species, breed, age, gender, size, description, \
         image_url, status, shelter_id, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(pet.id)
    .bind(&pet.name)
    .bind(&pet.species)
    .bind(&pet.breed)
    .bind(pet.age)
    .bind(pet.gender)
    .bind(pet.size)
    .bind(&pet.description)
    .bind(&pet.image_url)
    .bind(pet.status)
    .bind(pet.shelter_id)
    .bind(pet.created_at)
    .bind(pet.updated_at)
    .execute(exec)
    .await?;
    Ok(())
}

pub async fn pet_by_id(
    exec: impl SqliteExecutor<'_>,
    id: Uuid,
) -> Result<Option<Pet>, sqlx::Error> {
    sqlx::query_as(&format!("SELECT {PET_COLUMNS} FROM pets WHERE id = ?"))
        .bind(id)
        .fetch_optional(exec)
        .await
}

pub async fn pets_by_ids(
    exec: impl SqliteExecutor<'_>,
    ids: &[Uuid],
) -> Result<Vec<Pet>, sqlx::Error> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let mut query: QueryBuilder<Sqlite> =
        QueryBuilder::new(format!("SELECT {PET_COLUMNS} FROM pets WHERE id IN ("));
    let mut separated = query.separated(", ");
    for id in ids {
        separated.push_bind(*id);
    }
    query.push(")");
    query.build_query_as().fetch_all(exec).await
}

pub async fn pet_exists(exec: impl SqliteExecutor<'_>, id: Uuid) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM pets WHERE id = ?)")
        .bind(id)
        .fetch_one(exec)
        .await
}

/// Lists pets matching the filter; conditions compose conjunctively and
/// compare as exact text equality.
pub async fn list_pets(
    exec: impl SqliteExecutor<'_>,
    filter: &PetFilter,
) -> Result<Vec<Pet>, sqlx::Error> {
    let mut query: QueryBuilder<Sqlite> =
        QueryBuilder::new(format!("SELECT {PET_COLUMNS} FROM pets WHERE 1 = 1"));
    if let Some(species) = &filter.species {
        query.push(" AND species = ").push_bind(species);
    }
    if let Some(size) = &filter.size {
        query.push(" AND size = ").push_bind(size);
    }
    if let Some(status) = &filter.status {
        query.push(" AND status = ").push_bind(status);
    }
    query.push(" ORDER BY created_at, id");
    query.build_query_as().fetch_all(exec).await
}

pub async fn update_pet(exec: impl SqliteExecutor<'_>, pet: &Pet) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE pets SET name = ?, species = ?, breed = ?, age = ?, gender = ?, size = ?, \
         description = ?, image_url = ?, status = ?, shelter_id = ?, updated_at = ? WHERE id = ?",
    )
    .bind(&pet.name)
    .bind(&pet.species)
    .bind(&pet.breed)
    .bind(pet.age)
    .bind(pet.gender)
    .bind(pet.size)
    .bind(&pet.description)
    .bind(&pet.image_url)
    .bind(pet.status)
    .bind(pet.shelter_id)
    .bind(pet.updated_at)
    .bind(pet.id)
    .execute(exec)
    .await?;
    Ok(())
}

/// Deletes a pet; returns whether a row was removed.
pub async fn delete_pet(exec: impl SqliteExecutor<'_>, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM pets WHERE id = ?")
        .bind(id)
        .execute(exec)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn insert_application(
    exec: impl SqliteExecutor<'_>,
    application: &Application,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO applications (id, applicant_name, applicant_email, applicant_phone, \
         message, status, pet_id, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(application.id)
    .bind(&application.applicant_name)
    .bind(&application.applicant_email)
    .bind(&application.applicant_phone)
    .bind(&application.message)
    .bind(application.status)
    .bind(application.pet_id)
    .bind(application.created_at)
    .bind(application.updated_at)
    .execute(exec)
    .await?;
    Ok(())
}

pub async fn application_by_id(
    exec: impl SqliteExecutor<'_>,
    id: Uuid,
) -> Result<Option<Application>, sqlx::Error> {
    sqlx::query_as(&format!(
        "SELECT {APPLICATION_COLUMNS} FROM applications WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(exec)
    .await
}

/// Lists applications, optionally restricted to those whose pet belongs to
/// the given shelter.
pub async fn list_applications(
    exec: impl SqliteExecutor<'_>,
    shelter_scope: Option<Uuid>,
) -> Result<Vec<Application>, sqlx::Error> {
    match shelter_scope {
        Some(shelter_id) => {
            sqlx::query_as(&format!(
                "SELECT {APPLICATION_COLUMNS} FROM applications \
                 WHERE pet_id IN (SELECT id FROM pets WHERE shelter_id = ?) \
                 ORDER BY created_at, id"
            ))
            .bind(shelter_id)
            .fetch_all(exec)
            .await
        }
        None => {
            sqlx::query_as(&format!(
                "SELECT {APPLICATION_COLUMNS} FROM applications ORDER BY created_at, id"
            ))
            .fetch_all(exec)
            .await
        }
    }
}

pub async fn update_application(
    exec: impl SqliteExecutor<'_>,
    application: &Application,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE applications SET applicant_name = ?, applicant_email = ?, applicant_phone = ?, \
         message = ?, status = ?, updated_at = ? WHERE id = ?",
    )
    .bind(&application.applicant_name)
    .bind(&application.applicant_email)
    .bind(&application.applicant_phone)
    .bind(&application.message)
    .bind(application.status)
    .bind(application.updated_at)
    .bind(application.id)
    .execute(exec)
    .await?;
    Ok(())
}

/// Deletes an application; returns whether a row was removed.
pub async fn delete_application(
    exec: impl SqliteExecutor<'_>,
    id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM applications WHERE id = ?")
        .bind(id)
        .execute(exec)
        .await?;
    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::models::{PasswordHash, Role};
    use crate::database::models::{
        ApplicationStatus, Gender, NewApplication, NewPet, PetStatus, Size,
    };
    use crate::database::{is_unique_violation, Database};
    use sqlx::SqlitePool;

    async fn pool() -> SqlitePool {
        let db = Database::new("sqlite::memory:", 1);
        db.pool().await.expect("in-memory database").clone()
    }

    fn sample_pet(name: &str, species: &str, size: Size, shelter_id: Option<Uuid>) -> Pet {
        Pet::new(NewPet {
            name: name.to_owned(),
            species: species.to_owned(),
            breed: None,
            age: Some(3),
            gender: Gender::Unknown,
            size,
            description: format!("{name} the {species}"),
            image_url: "/uploads/test.png".to_owned(),
            status: PetStatus::Available,
            shelter_id,
        })
    }

    #[tokio::test]
    async fn user_round_trip_preserves_role_and_shelter() {
        let pool = pool().await;
        let shelter = Shelter::new("Haven".into(), "Springfield".into(), None, None);
        insert_shelter(&pool, &shelter).await.unwrap();

        let user = User::new(
            "staff@haven.org".into(),
            PasswordHash("$2b$04$fakefakefakefakefakefak".into()),
            Role::ShelterAdmin,
            Some(shelter.id),
        );
        insert_user(&pool, &user).await.unwrap();

        let found = user_by_email(&pool, "staff@haven.org").await.unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert_eq!(found.role, Role::ShelterAdmin);
        assert_eq!(found.shelter_ref, Some(shelter.id));
        assert_eq!(found.password_hash, user.password_hash);

        assert!(user_by_email(&pool, "nobody@haven.org").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_email_hits_the_unique_index() {
        let pool = pool().await;
        let first = User::new(
            "staff@haven.org".into(),
            PasswordHash("hash-a".into()),
            Role::SuperAdmin,
            None,
        );
        let second = User::new(
            "staff@haven.org".into(),
            PasswordHash("hash-b".into()),
            Role::SuperAdmin,
            None,
        );
        insert_user(&pool, &first).await.unwrap();
        let err = insert_user(&pool, &second).await.unwrap_err();
        assert!(is_unique_violation(&err));
    }

    #[tokio::test]
    async fn pet_filters_compose_conjunctively() {
        let pool = pool().await;
        for pet in [
            sample_pet("Rex", "Dog", Size::Small, None),
            sample_pet("Brutus", "Dog", Size::Large, None),
            sample_pet("Whiskers", "Cat", Size::Small, None),
        ] {
            insert_pet(&pool, &pet).await.unwrap();
        }

        let dogs = list_pets(&pool, &PetFilter::new(Some("Dog".into()), None, None))
            .await
            .unwrap();
        assert_eq!(dogs.len(), 2);

        let small_dogs = list_pets(
            &pool,
            &PetFilter::new(Some("Dog".into()), Some("Small".into()), None),
        )
        .await
        .unwrap();
        assert_eq!(small_dogs.len(), 1);
        assert_eq!(small_dogs[0].name, "Rex");

        let everyone = list_pets(&pool, &PetFilter::default()).await.unwrap();
        assert_eq!(everyone.len(), 3);
        assert_eq!(everyone[0].name, "Rex");

        let nobody = list_pets(&pool, &PetFilter::new(Some("Banana".into()), None, None))
            .await
            .unwrap();
        assert!(nobody.is_empty());
    }

    #[tokio::test]
    async fn delete_reports_whether_a_row_existed() {
        let pool = pool().await;
        let pet = sample_pet("Rex", "Dog", Size::Small, None);
        insert_pet(&pool, &pet).await.unwrap();

        assert!(delete_pet(&pool, pet.id).await.unwrap());
        assert!(!delete_pet(&pool, pet.id).await.unwrap());
        assert!(pet_by_id(&pool, pet.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn batched_lookups_skip_the_query_on_no_ids() {
        let pool = pool().await;
        assert!(shelters_by_ids(&pool, &[]).await.unwrap().is_empty());
        assert!(pets_by_ids(&pool, &[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn application_scope_follows_the_pets_shelter() {
        let pool = pool().await;
        let haven = Shelter::new("Haven".into(), "Springfield".into(), None, None);
        let refuge = Shelter::new("Refuge".into(), "Shelbyville".into(), None, None);
        insert_shelter(&pool, &haven).await.unwrap();
        insert_shelter(&pool, &refuge).await.unwrap();

        let rex = sample_pet("Rex", "Dog", Size::Small, Some(haven.id));
        let milo = sample_pet("Milo", "Cat", Size::Small, Some(refuge.id));
        insert_pet(&pool, &rex).await.unwrap();
        insert_pet(&pool, &milo).await.unwrap();

        for pet_id in [rex.id, milo.id] {
            let application = Application::new(NewApplication {
                applicant_name: "Pat Doe".into(),
                applicant_email: "pat@example.com".into(),
                applicant_phone: "555-0100".into(),
                message: None,
                status: ApplicationStatus::Submitted,
                pet_id,
            });
            insert_application(&pool, &application).await.unwrap();
        }

        let all = list_applications(&pool, None).await.unwrap();
        assert_eq!(all.len(), 2);

        let haven_only = list_applications(&pool, Some(haven.id)).await.unwrap();
        assert_eq!(haven_only.len(), 1);
        assert_eq!(haven_only[0].pet_id, rex.id);
    }
}
